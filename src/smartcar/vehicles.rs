use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use url::Url;

use super::{GatewayError, SmartcarClient, parse_upstream_message};
use crate::types::{
    Location, Odometer, SecurityAction, SecurityRequest, VehicleIdsResponse, VehicleInfo,
    VehicleResponse,
};

const ACTION_LIST: &str = "fetching vehicles";
const ACTION_INFO: &str = "fetching vehicle info";
const ACTION_LOCATION: &str = "fetching vehicle location";
const ACTION_ODOMETER: &str = "fetching vehicle odometer";

const HEADER_DATA_AGE: &str = "sc-data-age";
const HEADER_UNIT_SYSTEM: &str = "sc-unit-system";

impl SmartcarClient {
    pub async fn get_vehicle_ids(&self, access_token: &str) -> Result<Vec<String>, GatewayError> {
        let url = self.endpoint(&["vehicles"], ACTION_LIST)?;
        let req = self.http.get(url).bearer_auth(access_token);
        let res: VehicleResponse<VehicleIdsResponse> = send(req, ACTION_LIST).await?;
        Ok(res.data.vehicles)
    }

    pub async fn get_vehicle_info(
        &self,
        vehicle_id: &str,
        access_token: &str,
    ) -> Result<VehicleInfo, GatewayError> {
        let url = self.endpoint(&["vehicles", vehicle_id], ACTION_INFO)?;
        let req = self.http.get(url).bearer_auth(access_token);
        let mut res: VehicleResponse<VehicleInfo> = send(req, ACTION_INFO).await?;

        // Older API versions omit the id in the body.
        if res.data.id.is_empty() {
            res.data.id = vehicle_id.to_string();
        }
        Ok(res.data)
    }

    pub async fn get_location(
        &self,
        vehicle_id: &str,
        access_token: &str,
    ) -> Result<VehicleResponse<Location>, GatewayError> {
        let url = self.endpoint(&["vehicles", vehicle_id, "location"], ACTION_LOCATION)?;
        send(self.http.get(url).bearer_auth(access_token), ACTION_LOCATION).await
    }

    pub async fn get_odometer(
        &self,
        vehicle_id: &str,
        access_token: &str,
    ) -> Result<VehicleResponse<Odometer>, GatewayError> {
        let url = self.endpoint(&["vehicles", vehicle_id, "odometer"], ACTION_ODOMETER)?;
        send(self.http.get(url).bearer_auth(access_token), ACTION_ODOMETER).await
    }

    pub async fn post_security(
        &self,
        vehicle_id: &str,
        access_token: &str,
        action: SecurityAction,
    ) -> Result<(), GatewayError> {
        let label = match action {
            SecurityAction::Lock => "locking vehicle",
            SecurityAction::Unlock => "unlocking vehicle",
        };

        let url = self.endpoint(&["vehicles", vehicle_id, "security"], label)?;
        let req = self
            .http
            .post(url)
            .bearer_auth(access_token)
            .json(&SecurityRequest { action });

        send_action(req, label).await
    }

    /// Appends path segments to the API base URL. Segments are percent-encoded,
    /// so a vehicle id can never escape its path position.
    fn endpoint(&self, segments: &[&str], action: &str) -> Result<Url, GatewayError> {
        let mut url = self.api_url.clone();
        url.path_segments_mut()
            .map_err(|_| GatewayError::api(action, Some("Invalid Smartcar API URL".to_string())))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

async fn send<T: DeserializeOwned>(
    req: RequestBuilder,
    action: &str,
) -> Result<VehicleResponse<T>, GatewayError> {
    let res = req
        .send()
        .await
        .map_err(|e| GatewayError::api(action, Some(e.to_string())))?;

    let age = header_value(&res, HEADER_DATA_AGE);
    let unit_system = header_value(&res, HEADER_UNIT_SYSTEM);

    let status = res.status();
    let body = res
        .text()
        .await
        .map_err(|e| GatewayError::api(action, Some(e.to_string())))?;

    if !status.is_success() {
        return Err(GatewayError::api(action, parse_upstream_message(&body)));
    }

    let data = serde_json::from_str::<T>(&body).map_err(|e| {
        GatewayError::api(action, Some(format!("Unexpected response from Smartcar: {e}")))
    })?;

    Ok(VehicleResponse {
        data,
        age,
        unit_system,
    })
}

/// Like [`send`], but for commands: any 2xx counts as done and the body is
/// only read to explain a failure.
async fn send_action(req: RequestBuilder, action: &str) -> Result<(), GatewayError> {
    let res = req
        .send()
        .await
        .map_err(|e| GatewayError::api(action, Some(e.to_string())))?;

    let status = res.status();
    if status.is_success() {
        return Ok(());
    }

    let body = res.text().await.unwrap_or_default();
    Err(GatewayError::api(action, parse_upstream_message(&body)))
}

fn header_value(res: &Response, name: &str) -> Option<String> {
    res.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}
