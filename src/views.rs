//! HTML views for the demo flow.
//!
//! Each view model carries exactly the keys its page needs and renders itself
//! into a complete HTML document sharing one layout. Every dynamic value is
//! HTML-escaped before it is written into the page.

use axum::response::Html;
use serde::Serialize;
use serde_json::Value;

use crate::{
    types::{RequestType, VehicleInfo},
    utils::escape_html,
};

/// Landing page with the Smartcar Connect link.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeView {
    pub auth_url: String,
    /// Whether this browser already holds an access token.
    pub connected: bool,
}

/// List of the connected vehicles, each with a request form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VehiclesView {
    pub vehicles: Vec<VehicleInfo>,
}

/// Result of one `/request` dispatch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataView {
    pub vehicle: VehicleInfo,
    #[serde(rename = "type")]
    pub request_type: String,
    pub data: Value,
    /// When Smartcar last heard from the vehicle (`sc-data-age`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<String>,
    /// Units of `data` (`sc-unit-system`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_system: Option<String>,
}

/// Error page naming the failed action.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorView {
    pub action: String,
    pub message: String,
}

impl HomeView {
    pub fn render(&self) -> Html<String> {
        let mut body = format!(
            r#"<h1>Smartcar Demo</h1>
<p>Connect a vehicle to see its info, location and odometer, or to lock and unlock it.</p>
<p><a class="button" href="{auth_url}">Connect your vehicle</a></p>"#,
            auth_url = escape_html(&self.auth_url),
        );
        if self.connected {
            body.push_str(r#"<p><a href="/vehicles">View connected vehicles</a></p>"#);
        }
        layout("Smartcar Demo", &body)
    }
}

impl VehiclesView {
    pub fn render(&self) -> Html<String> {
        let mut body = String::from("<h1>Your vehicles</h1>\n");

        if self.vehicles.is_empty() {
            body.push_str("<p>No vehicles are connected to this account.</p>\n");
        }

        let options: String = RequestType::ALL
            .iter()
            .map(|t| format!(r#"<option value="{t}">{t}</option>"#))
            .collect();

        for vehicle in &self.vehicles {
            body.push_str(&format!(
                r#"<section class="vehicle">
<h2>{year} {make} {model}</h2>
<form method="post" action="/request">
<input type="hidden" name="vehicleId" value="{id}">
<select name="requestType">{options}</select>
<button type="submit">Send</button>
</form>
</section>
"#,
                year = vehicle.year,
                make = escape_html(&vehicle.make),
                model = escape_html(&vehicle.model),
                id = escape_html(&vehicle.id),
            ));
        }

        body.push_str(r#"<p><a href="/">Back</a></p>"#);
        layout("Vehicles", &body)
    }
}

impl DataView {
    pub fn render(&self) -> Html<String> {
        let body = format!(
            r#"<h1>{year} {make} {model}</h1>
<h2>{request_type}</h2>
{data}
{meta}<p><a href="/vehicles">Back to vehicles</a></p>"#,
            year = self.vehicle.year,
            make = escape_html(&self.vehicle.make),
            model = escape_html(&self.vehicle.model),
            request_type = escape_html(&self.request_type),
            data = render_value(&self.data),
            meta = self.render_meta(),
        );
        layout("Vehicle data", &body)
    }

    fn render_meta(&self) -> String {
        let rows: String = [
            ("Data age", &self.age),
            ("Unit system", &self.unit_system),
        ]
        .into_iter()
        .filter_map(|(label, value)| {
            value
                .as_ref()
                .map(|v| format!("<dt>{label}</dt><dd>{}</dd>", escape_html(v)))
        })
        .collect();

        if rows.is_empty() {
            String::new()
        } else {
            format!("<dl class=\"meta\">{rows}</dl>\n")
        }
    }
}

impl ErrorView {
    pub fn render(&self) -> Html<String> {
        let body = format!(
            r#"<h1>Something went wrong</h1>
<p>An error occurred while {action}.</p>
<p class="error">{message}</p>
<p><a href="/">Start over</a></p>"#,
            action = escape_html(&self.action),
            message = escape_html(&self.message),
        );
        layout("Error", &body)
    }
}

fn render_value(value: &Value) -> String {
    match value {
        Value::Object(map) => {
            let rows: String = map
                .iter()
                .map(|(key, v)| {
                    format!(
                        "<dt>{}</dt><dd>{}</dd>",
                        escape_html(key),
                        escape_html(&scalar(v))
                    )
                })
                .collect();
            format!("<dl>{rows}</dl>")
        }
        other => format!("<pre>{}</pre>", escape_html(&scalar(other))),
    }
}

fn scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn layout(title: &str, body: &str) -> Html<String> {
    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
<link rel="stylesheet" href="/style.css">
</head>
<body>
<main>
{body}
</main>
</body>
</html>
"#,
        title = escape_html(title),
    ))
}
