//! CLI definition using clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::str::FromStr;
use weighbridge_types::OutputFormat;

#[derive(Parser)]
#[command(name = "weighbridge")]
#[command(version)]
#[command(about = "Axle weight entry and sales client for the weighbridge backend")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Backend API base URL. Uses config value if not specified.
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Request timeout in seconds. Uses config value if not specified.
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Output format (json, table). Uses config value if not specified.
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in and store the access token in the config
    Login {
        #[arg(long, short = 'e')]
        email: String,

        #[arg(long, short = 'p')]
        password: String,
    },

    /// List or create axle groups
    AxleGroups {
        #[command(subcommand)]
        action: Option<AxleGroupAction>,
    },

    /// List or create vehicle types
    VehicleTypes {
        #[command(subcommand)]
        action: Option<VehicleTypeAction>,
    },

    /// Show sales history
    Sales {
        /// Keyword matched against truck number, vehicle type, status, date and sale ID
        #[arg(long, short = 's')]
        search: Option<String>,

        /// Maximum number of entries to show
        #[arg(long, short = 'n')]
        limit: Option<usize>,
    },

    /// Record a new weigh-in
    Weigh {
        /// Vehicle type ID
        #[arg(long, short = 't')]
        vehicle_type: i64,

        /// Truck number
        #[arg(long)]
        truck: String,

        #[command(flatten)]
        entry: EntryArgs,
    },

    /// Re-weigh a prior sale
    Reweigh {
        /// Sale ID being re-weighed
        sale_id: i64,

        /// Truck number override
        #[arg(long)]
        truck: Option<String>,

        #[command(flatten)]
        entry: EntryArgs,
    },

    /// Download the PDF receipt of a sale
    Receipt {
        sale_id: i64,

        /// Output PDF path (default: receipt-<id>.pdf in the receipt directory)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Export sales history to Excel or CSV
    Report {
        /// Output file (.xlsx or .csv)
        #[arg(long, short = 'o')]
        output: PathBuf,

        /// Only export sales matching this keyword
        #[arg(long, short = 's')]
        search: Option<String>,
    },

    /// Manage configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Set backend base URL
        #[arg(long)]
        set_base_url: Option<String>,

        /// Set request timeout in seconds
        #[arg(long)]
        set_timeout: Option<u64>,

        /// Set default output format
        #[arg(long)]
        set_output: Option<OutputFormat>,

        /// Set directory receipts are written to
        #[arg(long)]
        set_receipt_dir: Option<PathBuf>,

        /// Forget the stored access token
        #[arg(long)]
        logout: bool,

        /// Reset configuration to defaults
        #[arg(long)]
        reset: bool,
    },
}

#[derive(Subcommand)]
pub enum AxleGroupAction {
    /// List axle groups
    List,

    /// Create an axle group
    Add {
        /// Group name
        name: String,

        /// Weight limit
        #[arg(long, short = 'l')]
        limit: f64,

        #[arg(long, short = 'd', default_value = "")]
        description: String,
    },
}

#[derive(Subcommand)]
pub enum VehicleTypeAction {
    /// List vehicle types
    List,

    /// Create a vehicle type
    Add {
        /// Vehicle type name
        name: String,

        /// Sale price
        #[arg(long)]
        price: f64,

        /// Axle group IDs in axle order (e.g. 1,2,2)
        #[arg(long, short = 'g', value_delimiter = ',', required = true)]
        groups: Vec<i64>,
    },
}

/// Axle entry shared by `weigh` and `reweigh`. Rows are numbered from 1.
#[derive(clap::Args)]
pub struct EntryArgs {
    /// Axle weight as ROW=WEIGHT (repeatable)
    #[arg(long = "weight", short = 'w', value_parser = parse_row_value::<f64>)]
    pub weights: Vec<(usize, f64)>,

    /// Axle group for a row as ROW=GROUP_ID (repeatable)
    #[arg(long = "group", short = 'g', value_parser = parse_row_value::<i64>)]
    pub groups: Vec<(usize, i64)>,

    /// Number of axle slots, when it differs from the vehicle type's axle groups
    #[arg(long)]
    pub slots: Option<usize>,

    /// Sale price override (defaults to the vehicle type price)
    #[arg(long)]
    pub price: Option<f64>,

    /// Validate and show the entry without submitting it
    #[arg(long)]
    pub dry_run: bool,
}

/// Parse `ROW=VALUE` with a 1-based row into a 0-based index
pub fn parse_row_value<T>(s: &str) -> Result<(usize, T), String>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let (row, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected ROW=VALUE, got '{}'", s))?;
    let row: usize = row
        .trim()
        .parse()
        .map_err(|e| format!("invalid row '{}': {}", row.trim(), e))?;
    if row == 0 {
        return Err("rows are numbered from 1".to_string());
    }
    let value = value
        .trim()
        .parse::<T>()
        .map_err(|e| format!("invalid value '{}': {}", value.trim(), e))?;
    Ok((row - 1, value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_row_weight() {
        assert_eq!(parse_row_value::<f64>("1=500").unwrap(), (0, 500.0));
        assert_eq!(parse_row_value::<f64>(" 3 = 1250.5 ").unwrap(), (2, 1250.5));
    }

    #[test]
    fn test_parse_row_value_errors() {
        assert!(parse_row_value::<f64>("500").is_err());
        assert!(parse_row_value::<f64>("0=500").is_err());
        assert!(parse_row_value::<f64>("x=500").is_err());
        assert!(parse_row_value::<i64>("1=tandem").is_err());
    }

    #[test]
    fn test_weigh_args() {
        let cli = Cli::try_parse_from([
            "weighbridge",
            "weigh",
            "-t",
            "10",
            "--truck",
            "T123ABC",
            "-w",
            "1=500",
            "-w",
            "2=1300",
            "-g",
            "2=3",
            "--slots",
            "3",
            "--dry-run",
        ])
        .unwrap();
        match cli.command {
            Commands::Weigh {
                vehicle_type,
                truck,
                entry,
            } => {
                assert_eq!(vehicle_type, 10);
                assert_eq!(truck, "T123ABC");
                assert_eq!(entry.weights, vec![(0, 500.0), (1, 1300.0)]);
                assert_eq!(entry.groups, vec![(1, 3)]);
                assert_eq!(entry.slots, Some(3));
                assert!(entry.dry_run);
            }
            _ => panic!("expected weigh"),
        }
    }

    #[test]
    fn test_vehicle_type_groups_are_comma_separated() {
        let cli = Cli::try_parse_from([
            "weighbridge",
            "vehicle-types",
            "add",
            "Semi",
            "--price",
            "35",
            "-g",
            "1,2,2",
        ])
        .unwrap();
        match cli.command {
            Commands::VehicleTypes {
                action: Some(VehicleTypeAction::Add { groups, .. }),
            } => assert_eq!(groups, vec![1, 2, 2]),
            _ => panic!("expected vehicle-types add"),
        }
    }
}
