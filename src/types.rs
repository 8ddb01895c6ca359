use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: String,
    #[serde(default)]
    pub token_type: String,
    #[serde(default)]
    pub expires_in: u64,
    #[serde(default)]
    pub obtained_at: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleIdsResponse {
    pub vehicles: Vec<String>,
    pub paging: Option<Paging>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paging {
    pub count: u64,
    pub offset: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleInfo {
    #[serde(default)]
    pub id: String,
    pub make: String,
    pub model: String,
    pub year: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Odometer {
    pub distance: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityRequest {
    pub action: SecurityAction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SecurityAction {
    Lock,
    Unlock,
}

/// Data returned by a vehicle endpoint together with the response metadata
/// Smartcar reports in its `sc-*` headers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VehicleResponse<T> {
    pub data: T,
    pub age: Option<String>,
    pub unit_system: Option<String>,
}

impl<T> VehicleResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            age: None,
            unit_system: None,
        }
    }
}

/// The request a user can dispatch from the vehicle list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestType {
    Info,
    Location,
    Odometer,
    Lock,
    Unlock,
}

impl RequestType {
    pub const ALL: [RequestType; 5] = [
        RequestType::Info,
        RequestType::Location,
        RequestType::Odometer,
        RequestType::Lock,
        RequestType::Unlock,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RequestType::Info => "info",
            RequestType::Location => "location",
            RequestType::Odometer => "odometer",
            RequestType::Lock => "lock",
            RequestType::Unlock => "unlock",
        }
    }

    /// Label used on the error page when this request fails.
    pub fn action_label(self) -> &'static str {
        match self {
            RequestType::Info => "fetching vehicle info",
            RequestType::Location => "fetching vehicle location",
            RequestType::Odometer => "fetching vehicle odometer",
            RequestType::Lock => "locking vehicle",
            RequestType::Unlock => "unlocking vehicle",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown request type {0:?}")]
pub struct UnknownRequestType(pub String);

impl FromStr for RequestType {
    type Err = UnknownRequestType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RequestType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownRequestType(s.to_string()))
    }
}

impl fmt::Display for RequestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
