use std::{fmt, sync::Arc};

use super::{Gateway, GatewayError};
use crate::types::{Location, Odometer, SecurityAction, VehicleInfo, VehicleResponse};

/// Capability for one vehicle, bound to the access token it was created with.
///
/// Creating a handle is purely local. Every method issues exactly one call
/// through the gateway.
#[derive(Clone)]
pub struct Vehicle {
    id: String,
    access_token: String,
    gateway: Arc<dyn Gateway>,
}

impl Vehicle {
    pub fn new(
        id: impl Into<String>,
        access_token: impl Into<String>,
        gateway: Arc<dyn Gateway>,
    ) -> Self {
        Self {
            id: id.into(),
            access_token: access_token.into(),
            gateway,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub async fn info(&self) -> Result<VehicleInfo, GatewayError> {
        self.gateway.info(&self.id, &self.access_token).await
    }

    pub async fn location(&self) -> Result<VehicleResponse<Location>, GatewayError> {
        self.gateway.location(&self.id, &self.access_token).await
    }

    pub async fn odometer(&self) -> Result<VehicleResponse<Odometer>, GatewayError> {
        self.gateway.odometer(&self.id, &self.access_token).await
    }

    pub async fn lock(&self) -> Result<(), GatewayError> {
        self.gateway
            .security(&self.id, &self.access_token, SecurityAction::Lock)
            .await
    }

    pub async fn unlock(&self) -> Result<(), GatewayError> {
        self.gateway
            .security(&self.id, &self.access_token, SecurityAction::Unlock)
            .await
    }
}

impl fmt::Debug for Vehicle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The token stays out of logs.
        f.debug_struct("Vehicle").field("id", &self.id).finish_non_exhaustive()
    }
}
