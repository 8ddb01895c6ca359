use axum::{extract::Query, response::Html};
use serde::Deserialize;

use crate::{smartcar::DEFAULT_ERROR_MESSAGE, views::ErrorView};

use super::Rejection;

const DEFAULT_ACTION: &str = "processing your request";

#[derive(Debug, Default, Deserialize)]
pub struct ErrorParams {
    pub action: Option<String>,
    pub message: Option<String>,
}

pub async fn error_page(Query(params): Query<ErrorParams>) -> Result<Html<String>, Rejection> {
    error_view(params).map(|view| view.render())
}

/// Builds the error view. With neither parameter present there is nothing
/// to show, so the browser goes back to the landing page.
pub fn error_view(params: ErrorParams) -> Result<ErrorView, Rejection> {
    if params.action.is_none() && params.message.is_none() {
        return Err(Rejection::Restart("/"));
    }

    Ok(ErrorView {
        action: params.action.unwrap_or_else(|| DEFAULT_ACTION.to_string()),
        message: params
            .message
            .unwrap_or_else(|| DEFAULT_ERROR_MESSAGE.to_string()),
    })
}
