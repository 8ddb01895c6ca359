#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use smartcar_demo::{
    server::AppState,
    smartcar::{Gateway, GatewayError},
    types::{Location, Odometer, SecurityAction, Token, VehicleInfo, VehicleResponse},
};

pub const AUTH_URL: &str = "https://connect.example.test/oauth/authorize?client_id=demo";
pub const GOOD_CODE: &str = "abc123";
pub const TOKEN: &str = "tok1";

/// In-memory gateway that records every call it receives.
pub struct FakeGateway {
    pub vehicles: Vec<VehicleInfo>,
    pub failing_info: Option<String>,
    pub odometer: f64,
    calls: Mutex<Vec<String>>,
}

impl FakeGateway {
    pub fn new() -> Self {
        Self {
            vehicles: vec![
                vehicle_info("v1", "TESLA", "Model S", 2020),
                vehicle_info("v2", "BMW", "i3", 2018),
            ],
            failing_info: None,
            odometer: 12345.0,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_failing_info(mut self, vehicle_id: &str) -> Self {
        self.failing_info = Some(vehicle_id.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn check_token(&self, access_token: &str, action: &str) -> Result<(), GatewayError> {
        if access_token == TOKEN {
            Ok(())
        } else {
            Err(GatewayError::api(action, Some("The access token is invalid.".to_string())))
        }
    }

    fn find(&self, vehicle_id: &str, action: &str) -> Result<VehicleInfo, GatewayError> {
        self.vehicles
            .iter()
            .find(|v| v.id == vehicle_id)
            .cloned()
            .ok_or_else(|| GatewayError::api(action, Some("Vehicle not found.".to_string())))
    }
}

#[async_trait]
impl Gateway for FakeGateway {
    fn authorization_url(&self) -> String {
        AUTH_URL.to_string()
    }

    async fn exchange_code(&self, code: &str) -> Result<Token, GatewayError> {
        self.record(format!("exchange:{code}"));
        if code != GOOD_CODE {
            return Err(GatewayError::exchange(Some("Invalid or expired code.".to_string())));
        }
        Ok(Token {
            access_token: TOKEN.to_string(),
            refresh_token: "ref1".to_string(),
            token_type: "Bearer".to_string(),
            expires_in: 7200,
            obtained_at: 0,
        })
    }

    async fn vehicle_ids(&self, access_token: &str) -> Result<Vec<String>, GatewayError> {
        self.record("vehicle_ids".to_string());
        self.check_token(access_token, "fetching vehicles")?;
        Ok(self.vehicles.iter().map(|v| v.id.clone()).collect())
    }

    async fn info(
        &self,
        vehicle_id: &str,
        access_token: &str,
    ) -> Result<VehicleInfo, GatewayError> {
        self.record(format!("info:{vehicle_id}"));
        self.check_token(access_token, "fetching vehicle info")?;
        if self.failing_info.as_deref() == Some(vehicle_id) {
            return Err(GatewayError::api("fetching vehicle info", None));
        }
        self.find(vehicle_id, "fetching vehicle info")
    }

    async fn location(
        &self,
        vehicle_id: &str,
        access_token: &str,
    ) -> Result<VehicleResponse<Location>, GatewayError> {
        self.record(format!("location:{vehicle_id}"));
        self.check_token(access_token, "fetching vehicle location")?;
        Ok(VehicleResponse::new(Location {
            latitude: 37.4292,
            longitude: -122.1381,
        }))
    }

    async fn odometer(
        &self,
        vehicle_id: &str,
        access_token: &str,
    ) -> Result<VehicleResponse<Odometer>, GatewayError> {
        self.record(format!("odometer:{vehicle_id}"));
        self.check_token(access_token, "fetching vehicle odometer")?;
        Ok(VehicleResponse {
            data: Odometer {
                distance: self.odometer,
            },
            age: Some("2024-01-01T00:00:00.000Z".to_string()),
            unit_system: Some("metric".to_string()),
        })
    }

    async fn security(
        &self,
        vehicle_id: &str,
        access_token: &str,
        action: SecurityAction,
    ) -> Result<(), GatewayError> {
        let name = match action {
            SecurityAction::Lock => "lock",
            SecurityAction::Unlock => "unlock",
        };
        self.record(format!("{name}:{vehicle_id}"));
        self.check_token(access_token, "locking vehicle")
    }
}

pub fn vehicle_info(id: &str, make: &str, model: &str, year: i32) -> VehicleInfo {
    VehicleInfo {
        id: id.to_string(),
        make: make.to_string(),
        model: model.to_string(),
        year,
    }
}

pub fn app_state(fake: &Arc<FakeGateway>) -> AppState {
    let gateway: Arc<dyn Gateway> = fake.clone();
    AppState::new(gateway)
}
