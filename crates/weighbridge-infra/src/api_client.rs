//! HTTP client for the weighbridge backend

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Url};
use serde::Serialize;
use tracing::{debug, warn};
use weighbridge_domain::WeighbridgeApi;
use weighbridge_types::{
    ApiError, AxleGroupDefinition, AxleRow, Credentials, Error, NewAxleGroup, NewVehicleType,
    Receipt, SaleRecord, SaleTransaction, VehicleTypeDefinition,
};

use crate::envelope::{decode_list, decode_value, find_string_field};
use crate::receipt::decode_receipt;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:6363/api/v1";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const LOGIN_PATH: &str = "auth/2/token";
const AXLE_GROUP_LIST_PATH: &str = "setups/read/list/axel-group";
const AXLE_GROUP_CREATE_PATH: &str = "setups/create/axel-group";
const VEHICLE_TYPE_LIST_PATH: &str = "setups/read/list/vehicle-type";
const VEHICLE_TYPE_CREATE_PATH: &str = "setups/create/vehicle-type";
const SALES_LIST_PATH: &str = "sales/read/list/sales";
const SALES_CREATE_PATH: &str = "sales/create/sales";
const AXLE_TEMPLATE_PATH: &str = "sales/read/axel/by/vehicle-type";
const RECEIPT_PATH: &str = "reports/print/weight-sale";

/// Explicit client settings (no process-wide defaults are mutated)
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub bearer_token: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            bearer_token: None,
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_bearer_token(mut self, token: Option<String>) -> Self {
        self.bearer_token = token.filter(|t| !t.trim().is_empty());
        self
    }
}

/// reqwest-backed implementation of [`WeighbridgeApi`]
pub struct ApiClient {
    client: Client,
    base_url: Url,
    bearer_token: Option<String>,
}

impl ApiClient {
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(format!("weighbridge/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::ClientBuild(e.to_string()))?;
        Self::with_client(config, client)
    }

    /// Use an existing reqwest client; its own timeout applies
    pub fn with_client(config: ClientConfig, client: Client) -> Result<Self, ApiError> {
        let mut base_url = Url::parse(&config.base_url).map_err(|e| ApiError::InvalidUrl {
            url: config.base_url.clone(),
            message: e.to_string(),
        })?;
        ensure_trailing_slash(&mut base_url);
        Ok(Self {
            client,
            base_url,
            bearer_token: config.bearer_token,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn join_path(&self, relative: &str) -> Result<Url, ApiError> {
        self.base_url.join(relative).map_err(|e| ApiError::InvalidUrl {
            url: format!("{}{}", self.base_url, relative),
            message: e.to_string(),
        })
    }

    async fn get(&self, resource: &str, url: Url) -> Result<Vec<u8>, ApiError> {
        self.send(resource, self.client.get(url)).await
    }

    async fn post_json<B: Serialize + ?Sized>(
        &self,
        resource: &str,
        url: Url,
        body: &B,
    ) -> Result<Vec<u8>, ApiError> {
        self.send(resource, self.client.post(url).json(body)).await
    }

    async fn send(&self, resource: &str, request: RequestBuilder) -> Result<Vec<u8>, ApiError> {
        let request = match &self.bearer_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        };
        debug!(target_resource = resource, "Sending backend request");

        let response = request.send().await.map_err(|e| {
            warn!(target_resource = resource, error = %e, "Backend request failed");
            network_error(resource, e)
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(target_resource = resource, status = %status, "Backend returned error status");
            return Err(ApiError::HttpStatus {
                resource: resource.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| network_error(resource, e))?;
        debug!(target_resource = resource, bytes = body.len(), "Backend response received");
        Ok(body.to_vec())
    }
}

fn network_error(resource: &str, error: reqwest::Error) -> ApiError {
    let message = if error.is_timeout() {
        format!("timed out: {}", error)
    } else {
        error.to_string()
    };
    ApiError::Network {
        resource: resource.to_string(),
        message,
    }
}

fn ensure_trailing_slash(url: &mut Url) {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
}

#[async_trait]
impl WeighbridgeApi for ApiClient {
    async fn login(&self, credentials: &Credentials) -> Result<String, Error> {
        let url = self.join_path(LOGIN_PATH)?;
        let body = self.post_json("login", url, credentials).await?;
        let value = decode_value("login", &body)?;
        find_string_field(&value, &["token", "accessToken", "access_token"]).ok_or_else(|| {
            ApiError::InvalidResponse {
                resource: "login".to_string(),
                message: "no token in response".to_string(),
            }
            .into()
        })
    }

    async fn fetch_axle_groups(&self) -> Result<Vec<AxleGroupDefinition>, Error> {
        let url = self.join_path(AXLE_GROUP_LIST_PATH)?;
        let body = self.get("axle groups", url).await?;
        Ok(decode_list("axle groups", &body)?)
    }

    async fn create_axle_group(&self, group: &NewAxleGroup) -> Result<(), Error> {
        let url = self.join_path(AXLE_GROUP_CREATE_PATH)?;
        self.post_json("create axle group", url, group).await?;
        Ok(())
    }

    async fn fetch_vehicle_types(&self) -> Result<Vec<VehicleTypeDefinition>, Error> {
        let url = self.join_path(VEHICLE_TYPE_LIST_PATH)?;
        let body = self.get("vehicle types", url).await?;
        Ok(decode_list("vehicle types", &body)?)
    }

    async fn create_vehicle_type(&self, vehicle_type: &NewVehicleType) -> Result<(), Error> {
        let url = self.join_path(VEHICLE_TYPE_CREATE_PATH)?;
        self.post_json("create vehicle type", url, vehicle_type).await?;
        Ok(())
    }

    async fn fetch_sales(&self) -> Result<Vec<SaleRecord>, Error> {
        let url = self.join_path(SALES_LIST_PATH)?;
        let body = self.get("sales", url).await?;
        Ok(decode_list("sales", &body)?)
    }

    async fn fetch_axle_template(
        &self,
        vehicle_type_id: i64,
        parent_id: Option<i64>,
    ) -> Result<Vec<AxleRow>, Error> {
        let mut url = self.join_path(AXLE_TEMPLATE_PATH)?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("vehicleTypeId", &vehicle_type_id.to_string());
            if let Some(parent_id) = parent_id {
                query.append_pair("parentId", &parent_id.to_string());
            }
        }
        let body = self.get("axle template", url).await?;
        Ok(decode_list("axle template", &body)?)
    }

    async fn create_sale(&self, sale: &SaleTransaction) -> Result<(), Error> {
        let url = self.join_path(SALES_CREATE_PATH)?;
        self.post_json("create sale", url, sale).await?;
        Ok(())
    }

    async fn fetch_receipt(&self, sale_id: i64) -> Result<Receipt, Error> {
        let mut url = self.join_path(RECEIPT_PATH)?;
        url.query_pairs_mut()
            .append_pair("saleId", &sale_id.to_string());
        let body = self.get("receipt", url).await?;
        decode_receipt(sale_id, &body)
    }
}
