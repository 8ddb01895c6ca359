use axum::{
    Extension, Form,
    extract::rejection::FormRejection,
    response::Html,
};
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::{
    management::ensure_session,
    server::AppState,
    smartcar::{GatewayError, Vehicle},
    types::{RequestType, VehicleResponse},
    views::DataView,
    warning,
};

use super::Rejection;

pub const LOCK_CONFIRMATION: &str = "Lock request sent.";
pub const UNLOCK_CONFIRMATION: &str = "Unlock request sent.";

const DISPATCH_ACTION: &str = "sending a vehicle request";
const MISSING_REQUEST_TYPE: &str = "No request type was given.";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestForm {
    #[serde(default)]
    pub vehicle_id: Option<String>,
    #[serde(default)]
    pub request_type: Option<String>,
}

pub async fn request(
    Extension(state): Extension<AppState>,
    jar: CookieJar,
    form: Result<Form<RequestForm>, FormRejection>,
) -> (CookieJar, Result<Html<String>, Rejection>) {
    let (jar, session_id) = ensure_session(jar);

    // A missing or malformed body carries no request type.
    let form = match form {
        Ok(Form(form)) => form,
        Err(e) => {
            warning!("Unreadable request form: {}", e);
            return (
                jar,
                Err(Rejection::failed(DISPATCH_ACTION, MISSING_REQUEST_TYPE)),
            );
        }
    };

    let result = dispatch_request(&state, &session_id, form).await;
    (jar, result.map(|view| view.render()))
}

/// Runs exactly one vehicle request for the session.
///
/// An unrecognized request type is rejected before anything else is looked
/// at, so it never reaches the gateway.
pub async fn dispatch_request(
    state: &AppState,
    session_id: &str,
    form: RequestForm,
) -> Result<DataView, Rejection> {
    let raw = form.request_type.unwrap_or_default();
    let request_type: RequestType = raw.parse().map_err(|_| {
        Rejection::failed(DISPATCH_ACTION, format!("Unknown request type {raw:?}."))
    })?;

    if state.sessions.access_token(session_id).await.is_none() {
        return Err(Rejection::Restart("/"));
    }

    let vehicle_id = form.vehicle_id.unwrap_or_default();
    let entry = state
        .sessions
        .vehicle(session_id, &vehicle_id)
        .await
        .ok_or(Rejection::Restart("/vehicles"))?;

    let res = perform(&entry.handle, request_type).await?;

    Ok(DataView {
        vehicle: entry.info,
        request_type: request_type.to_string(),
        data: res.data,
        age: res.age,
        unit_system: res.unit_system,
    })
}

/// Issues the call behind `request_type` and returns the data to display,
/// along with whatever response metadata Smartcar reported for it.
pub async fn perform(
    vehicle: &Vehicle,
    request_type: RequestType,
) -> Result<VehicleResponse<Value>, GatewayError> {
    match request_type {
        RequestType::Info => info(vehicle).await,
        RequestType::Location => location(vehicle).await,
        RequestType::Odometer => odometer(vehicle).await,
        RequestType::Lock => lock(vehicle).await,
        RequestType::Unlock => unlock(vehicle).await,
    }
}

async fn info(vehicle: &Vehicle) -> Result<VehicleResponse<Value>, GatewayError> {
    let info = vehicle.info().await?;
    to_data(VehicleResponse::new(info), RequestType::Info)
}

async fn location(vehicle: &Vehicle) -> Result<VehicleResponse<Value>, GatewayError> {
    let res = vehicle.location().await?;
    to_data(res, RequestType::Location)
}

async fn odometer(vehicle: &Vehicle) -> Result<VehicleResponse<Value>, GatewayError> {
    let res = vehicle.odometer().await?;
    to_data(res, RequestType::Odometer)
}

async fn lock(vehicle: &Vehicle) -> Result<VehicleResponse<Value>, GatewayError> {
    vehicle.lock().await?;
    Ok(VehicleResponse::new(json!({ "action": LOCK_CONFIRMATION })))
}

async fn unlock(vehicle: &Vehicle) -> Result<VehicleResponse<Value>, GatewayError> {
    vehicle.unlock().await?;
    Ok(VehicleResponse::new(json!({ "action": UNLOCK_CONFIRMATION })))
}

fn to_data<T: Serialize>(
    res: VehicleResponse<T>,
    request_type: RequestType,
) -> Result<VehicleResponse<Value>, GatewayError> {
    let data = serde_json::to_value(&res.data)
        .map_err(|e| GatewayError::api(request_type.action_label(), Some(e.to_string())))?;

    Ok(VehicleResponse {
        data,
        age: res.age,
        unit_system: res.unit_system,
    })
}
