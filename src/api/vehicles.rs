use std::sync::Arc;

use axum::{Extension, response::Html};
use axum_extra::extract::CookieJar;
use futures::future::try_join_all;

use crate::{
    info,
    management::{VehicleEntry, ensure_session},
    server::AppState,
    smartcar::Vehicle,
    views::VehiclesView,
};

use super::Rejection;

pub async fn vehicles(
    Extension(state): Extension<AppState>,
    jar: CookieJar,
) -> (CookieJar, Result<Html<String>, Rejection>) {
    let (jar, session_id) = ensure_session(jar);
    let result = list_vehicles(&state, &session_id).await;
    (jar, result.map(|view| view.render()))
}

/// Lists the session's vehicles and refreshes its vehicle handles.
///
/// Info for every vehicle is fetched concurrently. The first failure aborts
/// the whole listing, and the session's previous vehicle map stays in place.
pub async fn list_vehicles(state: &AppState, session_id: &str) -> Result<VehiclesView, Rejection> {
    let access_token = state
        .sessions
        .access_token(session_id)
        .await
        .ok_or(Rejection::Restart("/"))?;

    let ids = state.gateway.vehicle_ids(&access_token).await?;

    let handles: Vec<Vehicle> = ids
        .into_iter()
        .map(|id| Vehicle::new(id, access_token.as_str(), Arc::clone(&state.gateway)))
        .collect();

    let infos = try_join_all(handles.iter().map(|handle| handle.info())).await?;

    let entries: Vec<VehicleEntry> = handles
        .into_iter()
        .zip(infos)
        .map(|(handle, mut info)| {
            let id = handle.id().to_string();
            info.id = id.clone();
            VehicleEntry { id, handle, info }
        })
        .collect();

    let view = VehiclesView {
        vehicles: entries.iter().map(|entry| entry.info.clone()).collect(),
    };

    info!("Loaded {} vehicles", entries.len());
    state.sessions.replace_vehicles(session_id, entries).await;

    Ok(view)
}
