//! # Smartcar Integration Module
//!
//! This module is the boundary between the demo server and Smartcar. It exposes
//! the small call/response contract the route handlers consume and keeps the
//! HTTP details of the OAuth exchange and the vehicle API out of the handlers.
//!
//! ## Architecture
//!
//! ```text
//! Route handlers (api)
//!          ↓
//! Gateway trait  ←  Vehicle handle (one vehicle id + access token)
//!          ↓
//! SmartcarClient (reqwest, JSON)
//!          ↓
//! Smartcar Connect / Auth / Vehicle API
//! ```
//!
//! ## Core Pieces
//!
//! - [`Gateway`] - the async trait handlers depend on. Tests substitute an
//!   in-memory implementation.
//! - [`SmartcarClient`] - the production implementation. Authorization URL
//!   construction lives in `auth`, vehicle calls live in `vehicles`.
//! - [`Vehicle`] - a cheap handle bound to one vehicle id and the access
//!   token it was created with. Creating one never touches the network.
//! - [`GatewayError`] - the two failure kinds (code exchange, API call), each
//!   with an action label and a message.
//!
//! ## Error Handling
//!
//! Every network or upstream failure is converted into a [`GatewayError`].
//! No call retries, and no call imposes a deadline beyond what the HTTP
//! client itself does.

mod auth;
mod error;
mod vehicle;
mod vehicles;

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

pub use error::{DEFAULT_ERROR_MESSAGE, EXCHANGE_ACTION, GatewayError, parse_upstream_message};
pub use vehicle::Vehicle;

use crate::{
    config::{Config, Mode},
    types::{Location, Odometer, SecurityAction, Token, VehicleInfo, VehicleResponse},
};

/// Calls the demo needs from Smartcar.
#[async_trait]
pub trait Gateway: Send + Sync {
    /// Builds the Smartcar Connect URL the landing page links to.
    fn authorization_url(&self) -> String;

    /// Exchanges an authorization code for an access token.
    async fn exchange_code(&self, code: &str) -> Result<Token, GatewayError>;

    /// Lists the ids of every vehicle the access token can reach.
    async fn vehicle_ids(&self, access_token: &str) -> Result<Vec<String>, GatewayError>;

    async fn info(
        &self,
        vehicle_id: &str,
        access_token: &str,
    ) -> Result<VehicleInfo, GatewayError>;

    async fn location(
        &self,
        vehicle_id: &str,
        access_token: &str,
    ) -> Result<VehicleResponse<Location>, GatewayError>;

    async fn odometer(
        &self,
        vehicle_id: &str,
        access_token: &str,
    ) -> Result<VehicleResponse<Odometer>, GatewayError>;

    /// Sends a lock or unlock command. Smartcar returns no payload on success.
    async fn security(
        &self,
        vehicle_id: &str,
        access_token: &str,
        action: SecurityAction,
    ) -> Result<(), GatewayError>;
}

/// Smartcar client backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct SmartcarClient {
    http: Client,
    client_id: String,
    client_secret: String,
    redirect_uri: String,
    scope: String,
    mode: Mode,
    auth_url: Url,
    token_url: Url,
    api_url: Url,
}

impl SmartcarClient {
    /// Creates a client from the server configuration.
    ///
    /// # Errors
    ///
    /// Fails when one of the configured endpoint URLs cannot be parsed or
    /// cannot carry path segments.
    pub fn new(config: &Config) -> Result<Self, url::ParseError> {
        let api_url = Url::parse(&config.api_url)?;
        if api_url.cannot_be_a_base() {
            return Err(url::ParseError::RelativeUrlWithCannotBeABaseBase);
        }

        Ok(Self {
            http: Client::new(),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            redirect_uri: config.redirect_uri.clone(),
            scope: config.scope.clone(),
            mode: config.mode,
            auth_url: Url::parse(&config.auth_url)?,
            token_url: Url::parse(&config.token_url)?,
            api_url,
        })
    }
}

#[async_trait]
impl Gateway for SmartcarClient {
    fn authorization_url(&self) -> String {
        self.build_authorization_url()
    }

    async fn exchange_code(&self, code: &str) -> Result<Token, GatewayError> {
        self.request_token(code).await
    }

    async fn vehicle_ids(&self, access_token: &str) -> Result<Vec<String>, GatewayError> {
        self.get_vehicle_ids(access_token).await
    }

    async fn info(
        &self,
        vehicle_id: &str,
        access_token: &str,
    ) -> Result<VehicleInfo, GatewayError> {
        self.get_vehicle_info(vehicle_id, access_token).await
    }

    async fn location(
        &self,
        vehicle_id: &str,
        access_token: &str,
    ) -> Result<VehicleResponse<Location>, GatewayError> {
        self.get_location(vehicle_id, access_token).await
    }

    async fn odometer(
        &self,
        vehicle_id: &str,
        access_token: &str,
    ) -> Result<VehicleResponse<Odometer>, GatewayError> {
        self.get_odometer(vehicle_id, access_token).await
    }

    async fn security(
        &self,
        vehicle_id: &str,
        access_token: &str,
        action: SecurityAction,
    ) -> Result<(), GatewayError> {
        self.post_security(vehicle_id, access_token, action).await
    }
}
