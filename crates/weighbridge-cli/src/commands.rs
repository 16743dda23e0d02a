//! Command handlers

use crate::cli::{AxleGroupAction, Cli, Commands, EntryArgs, VehicleTypeAction};
use crate::output::{
    output_axle_groups, output_axle_rows, output_sales, output_transaction, output_vehicle_types,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::warn;
use weighbridge_app::config::Config;
use weighbridge_app::export::export_sales;
use weighbridge_app::{setup, EntrySession};
use weighbridge_domain::WeighbridgeApi;
use weighbridge_infra::ApiClient;
use weighbridge_types::{Credentials, NewAxleGroup, NewVehicleType, OutputFormat, Result};

/// What a weigh-in entry starts from
enum EntryTarget {
    VehicleType(i64),
    Reweigh(i64),
}

pub fn execute(cli: Cli) -> Result<()> {
    // Load config
    let mut config = Config::load()?;

    // Override from CLI args
    if let Some(ref base_url) = cli.base_url {
        config.base_url = base_url.clone();
    }
    if let Some(timeout) = cli.timeout {
        config.timeout_secs = timeout;
    }
    config.validate()?;
    let output_format = cli.format.unwrap_or(config.output_format);

    match cli.command {
        Commands::Config {
            show,
            set_base_url,
            set_timeout,
            set_output,
            set_receipt_dir,
            logout,
            reset,
        } => cmd_config(
            show,
            set_base_url,
            set_timeout,
            set_output,
            set_receipt_dir,
            logout,
            reset,
        ),
        command => {
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(run(command, &config, output_format))
        }
    }
}

async fn run(command: Commands, config: &Config, output_format: OutputFormat) -> Result<()> {
    let api = Arc::new(ApiClient::new(config.client_config())?);

    match command {
        Commands::Login { email, password } => cmd_login(&*api, email, password).await,

        Commands::AxleGroups { action } => match action.unwrap_or(AxleGroupAction::List) {
            AxleGroupAction::List => {
                let groups = api.fetch_axle_groups().await?;
                output_axle_groups(output_format, &groups)
            }
            AxleGroupAction::Add {
                name,
                limit,
                description,
            } => {
                let group = NewAxleGroup {
                    group_name: name,
                    description,
                    allowed: limit,
                };
                setup::create_axle_group(&*api, &group).await?;
                println!("Axle group '{}' created", group.group_name);
                Ok(())
            }
        },

        Commands::VehicleTypes { action } => match action.unwrap_or(VehicleTypeAction::List) {
            VehicleTypeAction::List => {
                let types = api.fetch_vehicle_types().await?;
                output_vehicle_types(output_format, &types)
            }
            VehicleTypeAction::Add {
                name,
                price,
                groups,
            } => {
                let vehicle_type = NewVehicleType {
                    vehicle_type: name,
                    price,
                    axle_group_ids: groups,
                };
                setup::create_vehicle_type(&*api, &vehicle_type).await?;
                println!("Vehicle type '{}' created", vehicle_type.vehicle_type);
                Ok(())
            }
        },

        Commands::Sales { search, limit } => {
            let sales = setup::search_sales(&*api, search.as_deref()).await?;
            let shown: Vec<_> = sales.iter().take(limit.unwrap_or(usize::MAX)).collect();
            output_sales(output_format, &shown)
        }

        Commands::Weigh {
            vehicle_type,
            truck,
            entry,
        } => {
            cmd_entry(
                api,
                output_format,
                EntryTarget::VehicleType(vehicle_type),
                Some(truck),
                entry,
            )
            .await
        }

        Commands::Reweigh {
            sale_id,
            truck,
            entry,
        } => cmd_entry(api, output_format, EntryTarget::Reweigh(sale_id), truck, entry).await,

        Commands::Receipt { sale_id, output } => {
            cmd_receipt(&*api, config, sale_id, output).await
        }

        Commands::Report { output, search } => {
            let sales = setup::search_sales(&*api, search.as_deref()).await?;
            export_sales(&sales, &output)?;
            println!("Exported {} sales to {}", sales.len(), output.display());
            Ok(())
        }

        Commands::Config { .. } => Ok(()),
    }
}

async fn cmd_login(api: &ApiClient, email: String, password: String) -> Result<()> {
    let credentials = Credentials { email, password };
    let token = setup::login(api, &credentials).await?;

    // Only the token is persisted; CLI overrides stay out of the saved config
    let mut stored = Config::load()?;
    stored.api_token = Some(token);
    stored.save()?;

    println!("Logged in as {}", credentials.email);
    Ok(())
}

async fn cmd_entry(
    api: Arc<ApiClient>,
    output_format: OutputFormat,
    target: EntryTarget,
    truck: Option<String>,
    entry: EntryArgs,
) -> Result<()> {
    let mut session = EntrySession::new(api);
    session.load_reference_data().await?;

    let request = match target {
        EntryTarget::VehicleType(id) => session.begin_vehicle_type(id)?,
        EntryTarget::Reweigh(sale_id) => {
            let sale = session.find_sale(sale_id).await?;
            session.begin_reweigh(&sale)?
        }
    };
    let template = session.fetch_template(request).await;
    if let Err(e) = session.complete_template(request, template) {
        warn!(error = %e, "Using the vehicle type's axle layout");
    }

    if let Some(slots) = entry.slots {
        session.set_slot_count(slots)?;
    }
    if let Some(truck) = truck {
        session.set_truck_number(truck)?;
    }
    for (row, axle_group_id) in entry.groups {
        session.assign_axle_group(row, axle_group_id)?;
    }
    for (row, weight) in entry.weights {
        session.set_axle_weight(row, Some(weight))?;
    }
    if entry.price.is_some() {
        session.set_sale_price(entry.price)?;
    }

    if output_format == OutputFormat::Table {
        output_axle_rows(output_format, session.rows())?;
    }

    if entry.dry_run {
        let sale = session.state().to_transaction()?;
        output_transaction(output_format, &sale)?;
        if output_format == OutputFormat::Table {
            println!("\nDry run: sale not submitted");
        }
        return Ok(());
    }

    let sale = session.submit().await?;
    output_transaction(output_format, &sale)?;
    if output_format == OutputFormat::Table {
        println!("\nSale submitted");
    }
    Ok(())
}

async fn cmd_receipt(
    api: &ApiClient,
    config: &Config,
    sale_id: i64,
    output: Option<PathBuf>,
) -> Result<()> {
    let receipt = setup::fetch_receipt(api, sale_id).await?;
    let path = output.unwrap_or_else(|| config.receipt_path(&receipt.default_file_name()));
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&path, &receipt.pdf)?;
    println!("Receipt for sale {} saved to {}", sale_id, path.display());
    Ok(())
}

fn cmd_config(
    show: bool,
    set_base_url: Option<String>,
    set_timeout: Option<u64>,
    set_output: Option<OutputFormat>,
    set_receipt_dir: Option<PathBuf>,
    logout: bool,
    reset: bool,
) -> Result<()> {
    if reset {
        let config = Config::default();
        config.save()?;
        println!("Configuration reset to defaults");
        println!("\n{}", config);
        return Ok(());
    }

    let mut config = Config::load()?;
    let mut modified = false;

    if let Some(base_url) = set_base_url {
        config.base_url = base_url;
        modified = true;
    }
    if let Some(timeout) = set_timeout {
        config.timeout_secs = timeout;
        modified = true;
    }
    if let Some(output) = set_output {
        config.output_format = output;
        modified = true;
    }
    if let Some(dir) = set_receipt_dir {
        config.receipt_dir = Some(dir);
        modified = true;
    }
    if logout {
        config.api_token = None;
        modified = true;
    }

    if modified {
        config.save()?;
        println!("Configuration saved");
    }

    if show || !modified {
        println!("{}", config);
    }

    Ok(())
}
