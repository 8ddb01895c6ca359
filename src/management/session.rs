use std::{collections::HashMap, sync::Arc};

use tokio::sync::Mutex;

use crate::{smartcar::Vehicle, types::VehicleInfo};

/// A vehicle the session can send requests to, with the info fetched when
/// the vehicle list was last rendered.
#[derive(Debug, Clone)]
pub struct VehicleEntry {
    pub id: String,
    pub handle: Vehicle,
    pub info: VehicleInfo,
}

/// Per-browser state: the access token from the OAuth callback and the
/// vehicles from the last visit to the vehicle list.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub access_token: Option<String>,
    pub vehicles: HashMap<String, VehicleEntry>,
}

/// In-memory session storage keyed by the session cookie value.
///
/// Sessions are created on first use and live for the lifetime of the
/// process. Nothing is persisted.
#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<Mutex<HashMap<String, Session>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, session_id: &str) -> Option<Session> {
        self.sessions.lock().await.get(session_id).cloned()
    }

    pub async fn access_token(&self, session_id: &str) -> Option<String> {
        self.sessions
            .lock()
            .await
            .get(session_id)
            .and_then(|s| s.access_token.clone())
    }

    pub async fn set_access_token(&self, session_id: &str, access_token: String) {
        let mut sessions = self.sessions.lock().await;
        let session = sessions.entry(session_id.to_string()).or_default();
        session.access_token = Some(access_token);
    }

    /// Replaces the session's vehicle map wholesale.
    pub async fn replace_vehicles(&self, session_id: &str, vehicles: Vec<VehicleEntry>) {
        let mut sessions = self.sessions.lock().await;
        let session = sessions.entry(session_id.to_string()).or_default();
        session.vehicles = vehicles.into_iter().map(|v| (v.id.clone(), v)).collect();
    }

    pub async fn vehicle(&self, session_id: &str, vehicle_id: &str) -> Option<VehicleEntry> {
        self.sessions
            .lock()
            .await
            .get(session_id)
            .and_then(|s| s.vehicles.get(vehicle_id).cloned())
    }
}
