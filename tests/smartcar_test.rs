mod common;

use std::{collections::HashMap, sync::Arc};

use mockito::{Matcher, Server, ServerGuard};
use serde_json::json;
use smartcar_demo::{
    config::Config,
    smartcar::{
        DEFAULT_ERROR_MESSAGE, EXCHANGE_ACTION, Gateway, GatewayError, SmartcarClient, Vehicle,
        parse_upstream_message,
    },
    types::{Location, Odometer, SecurityAction},
};

use common::{FakeGateway, TOKEN};

// base64("client:secret")
const BASIC_AUTH: &str = "Basic Y2xpZW50OnNlY3JldA==";

fn config(vars: &[(&str, &str)]) -> Config {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Config::from_lookup(|key| vars.get(key).cloned()).expect("config")
}

fn bearer() -> String {
    format!("Bearer {TOKEN}")
}

/// Starts a mock Smartcar and a client pointed at it. The guard must outlive
/// the client calls.
async fn mock_smartcar() -> (ServerGuard, SmartcarClient) {
    let server = Server::new_async().await;

    let token_url = format!("{}/oauth/token", server.url());
    let api_url = format!("{}/v2.0", server.url());
    let client = SmartcarClient::new(&config(&[
        ("SMARTCAR_CLIENT_ID", "client"),
        ("SMARTCAR_SECRET", "secret"),
        ("SMARTCAR_TOKEN_URL", token_url.as_str()),
        ("SMARTCAR_API_URL", api_url.as_str()),
    ]))
    .unwrap();

    (server, client)
}

#[test]
fn test_authorization_url_sandbox() {
    let client = SmartcarClient::new(&config(&[
        ("SMARTCAR_CLIENT_ID", "abc"),
        ("SMARTCAR_SECRET", "shh"),
    ]))
    .unwrap();

    let url = client.authorization_url();

    assert!(url.starts_with("https://connect.smartcar.com/oauth/authorize?"));
    assert!(url.contains("response_type=code"));
    assert!(url.contains("client_id=abc"));
    assert!(url.contains("redirect_uri=http%3A%2F%2Flocalhost%3A8000%2Fcallback"));
    assert!(url.contains("scope=read_vehicle_info+read_location+read_odometer+control_security"));
    assert!(url.contains("mode=test"));
    assert!(!url.contains("shh"));

    // Pure: same input, same output.
    assert_eq!(url, client.authorization_url());
}

#[test]
fn test_authorization_url_live() {
    let client = SmartcarClient::new(&config(&[
        ("SMARTCAR_CLIENT_ID", "abc"),
        ("SMARTCAR_SECRET", "shh"),
        ("SMARTCAR_MODE", "live"),
    ]))
    .unwrap();

    assert!(client.authorization_url().contains("mode=live"));
}

#[test]
fn test_client_rejects_bad_api_url() {
    let config = config(&[
        ("SMARTCAR_CLIENT_ID", "abc"),
        ("SMARTCAR_SECRET", "shh"),
        ("SMARTCAR_API_URL", "not a url"),
    ]);
    assert!(SmartcarClient::new(&config).is_err());
}

#[tokio::test]
async fn test_exchange_code() {
    let (mut server, client) = mock_smartcar().await;

    let good = server
        .mock("POST", "/oauth/token")
        .match_header("authorization", BASIC_AUTH)
        .match_body(Matcher::AllOf(vec![
            Matcher::UrlEncoded("grant_type".into(), "authorization_code".into()),
            Matcher::UrlEncoded("code".into(), "good".into()),
            Matcher::UrlEncoded("redirect_uri".into(), "http://localhost:8000/callback".into()),
        ]))
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "access_token": TOKEN,
                "token_type": "Bearer",
                "expires_in": 7200,
                "refresh_token": "ref1"
            })
            .to_string(),
        )
        .create_async()
        .await;
    let stale = server
        .mock("POST", "/oauth/token")
        .match_body(Matcher::UrlEncoded("code".into(), "stale".into()))
        .with_status(400)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "error": "invalid_grant",
                "error_description": "Invalid or expired auth code."
            })
            .to_string(),
        )
        .create_async()
        .await;

    let token = client.exchange_code("good").await.expect("token");
    assert_eq!(token.access_token, TOKEN);
    assert_eq!(token.refresh_token, "ref1");
    assert_eq!(token.expires_in, 7200);
    assert!(token.obtained_at > 0);

    let err = client.exchange_code("stale").await.unwrap_err();
    assert_eq!(
        err,
        GatewayError::Exchange {
            message: "Invalid or expired auth code.".to_string()
        }
    );
    assert_eq!(err.action(), EXCHANGE_ACTION);

    good.assert_async().await;
    stale.assert_async().await;
}

#[tokio::test]
async fn test_vehicle_calls() {
    let (mut server, client) = mock_smartcar().await;

    let list = server
        .mock("GET", "/v2.0/vehicles")
        .match_header("authorization", bearer().as_str())
        .with_header("content-type", "application/json")
        .with_body(json!({ "vehicles": ["v1", "v2"], "paging": { "count": 2, "offset": 0 } }).to_string())
        .create_async()
        .await;
    let info = server
        .mock("GET", "/v2.0/vehicles/v2")
        .match_header("authorization", bearer().as_str())
        .with_header("content-type", "application/json")
        .with_body(json!({ "id": "v2", "make": "TESLA", "model": "Model S", "year": 2020 }).to_string())
        .create_async()
        .await;
    let odometer = server
        .mock("GET", "/v2.0/vehicles/v1/odometer")
        .match_header("authorization", bearer().as_str())
        .with_header("content-type", "application/json")
        .with_header("sc-unit-system", "metric")
        .with_header("sc-data-age", "2024-01-01T00:00:00.000Z")
        .with_body(json!({ "distance": 12345.0 }).to_string())
        .create_async()
        .await;
    let lock = server
        .mock("POST", "/v2.0/vehicles/v1/security")
        .match_header("authorization", bearer().as_str())
        .match_body(Matcher::PartialJson(json!({ "action": "LOCK" })))
        .with_header("content-type", "application/json")
        .with_body(
            json!({ "status": "success", "message": "Successfully sent request to vehicle" })
                .to_string(),
        )
        .create_async()
        .await;

    let ids = client.vehicle_ids(TOKEN).await.expect("ids");
    assert_eq!(ids, vec!["v1", "v2"]);

    let vehicle = client.info("v2", TOKEN).await.expect("info");
    assert_eq!(vehicle.id, "v2");
    assert_eq!(vehicle.make, "TESLA");

    let res = client.odometer("v1", TOKEN).await.expect("odometer");
    assert_eq!(res.data, Odometer { distance: 12345.0 });
    assert_eq!(res.unit_system.as_deref(), Some("metric"));
    assert_eq!(res.age.as_deref(), Some("2024-01-01T00:00:00.000Z"));

    client
        .security("v1", TOKEN, SecurityAction::Lock)
        .await
        .expect("lock");

    list.assert_async().await;
    info.assert_async().await;
    odometer.assert_async().await;
    lock.assert_async().await;
}

#[tokio::test]
async fn test_location() {
    let (mut server, client) = mock_smartcar().await;

    let location = server
        .mock("GET", "/v2.0/vehicles/v1/location")
        .match_header("authorization", bearer().as_str())
        .with_header("content-type", "application/json")
        .with_header("sc-data-age", "2024-01-01T00:00:00.000Z")
        .with_body(json!({ "latitude": 37.4292, "longitude": -122.1381 }).to_string())
        .create_async()
        .await;

    let res = client.location("v1", TOKEN).await.expect("location");
    assert_eq!(
        res.data,
        Location {
            latitude: 37.4292,
            longitude: -122.1381
        }
    );
    assert_eq!(res.age.as_deref(), Some("2024-01-01T00:00:00.000Z"));
    assert_eq!(res.unit_system, None);

    location.assert_async().await;
}

#[tokio::test]
async fn test_security_ignores_success_body() {
    let (mut server, client) = mock_smartcar().await;

    // Bare 200 with no payload.
    let lock = server
        .mock("POST", "/v2.0/vehicles/v1/security")
        .match_body(Matcher::PartialJson(json!({ "action": "LOCK" })))
        .with_status(200)
        .create_async()
        .await;
    // Success with a body that is not JSON.
    let unlock = server
        .mock("POST", "/v2.0/vehicles/v1/security")
        .match_body(Matcher::PartialJson(json!({ "action": "UNLOCK" })))
        .with_status(202)
        .with_body("OK")
        .create_async()
        .await;

    assert_eq!(client.security("v1", TOKEN, SecurityAction::Lock).await, Ok(()));
    assert_eq!(client.security("v1", TOKEN, SecurityAction::Unlock).await, Ok(()));

    lock.assert_async().await;
    unlock.assert_async().await;
}

#[tokio::test]
async fn test_vehicle_call_errors() {
    let (mut server, client) = mock_smartcar().await;

    let _list = server
        .mock("GET", "/v2.0/vehicles")
        .match_header("authorization", "Bearer wrong")
        .with_status(401)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "type": "AUTHENTICATION",
                "code": null,
                "description": "The access token provided is invalid."
            })
            .to_string(),
        )
        .create_async()
        .await;
    let _asleep = server
        .mock("POST", "/v2.0/vehicles/asleep/security")
        .with_status(409)
        .create_async()
        .await;

    let err = client.vehicle_ids("wrong").await.unwrap_err();
    assert_eq!(err.action(), "fetching vehicles");
    assert_eq!(err.message(), "The access token provided is invalid.");

    // No body: the message falls back to the default.
    let err = client
        .security("asleep", TOKEN, SecurityAction::Unlock)
        .await
        .unwrap_err();
    assert_eq!(err.action(), "unlocking vehicle");
    assert_eq!(err.message(), DEFAULT_ERROR_MESSAGE);
}

#[tokio::test]
async fn test_unreachable_api_is_an_api_error() {
    let client = SmartcarClient::new(&config(&[
        ("SMARTCAR_CLIENT_ID", "abc"),
        ("SMARTCAR_SECRET", "shh"),
        ("SMARTCAR_API_URL", "http://127.0.0.1:1/v2.0"),
    ]))
    .unwrap();

    match client.vehicle_ids(TOKEN).await {
        Err(GatewayError::Api { action, message }) => {
            assert_eq!(action, "fetching vehicles");
            assert!(!message.is_empty());
        }
        other => panic!("expected api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_vehicle_handle_is_bound_to_id_and_token() {
    let fake = Arc::new(FakeGateway::new());
    let gateway: Arc<dyn Gateway> = fake.clone();

    let vehicle = Vehicle::new("v2", TOKEN, Arc::clone(&gateway));
    assert_eq!(vehicle.id(), "v2");
    assert!(fake.calls().is_empty());

    assert_eq!(vehicle.info().await.unwrap().model, "i3");
    vehicle.lock().await.unwrap();
    assert_eq!(fake.calls(), vec!["info:v2", "lock:v2"]);

    let stale = Vehicle::new("v2", "expired", gateway);
    assert!(stale.odometer().await.is_err());

    assert!(!format!("{vehicle:?}").contains(TOKEN));
}

#[test]
fn test_parse_upstream_message() {
    assert_eq!(
        parse_upstream_message(r#"{"type":"VEHICLE_STATE","description":"Vehicle is asleep."}"#),
        Some("Vehicle is asleep.".to_string())
    );
    assert_eq!(
        parse_upstream_message(r#"{"error":"invalid_grant","error_description":"Expired."}"#),
        Some("Expired.".to_string())
    );
    assert_eq!(
        parse_upstream_message(r#"{"message":"Old style."}"#),
        Some("Old style.".to_string())
    );
    assert_eq!(parse_upstream_message(r#"{"description":"  "}"#), None);
    assert_eq!(parse_upstream_message("<html>Bad Gateway</html>"), None);
}

#[test]
fn test_gateway_error_default_message() {
    let err = GatewayError::api("fetching vehicle location", Some("   ".to_string()));
    assert_eq!(err.message(), DEFAULT_ERROR_MESSAGE);

    let err = GatewayError::exchange(None);
    assert_eq!(err.message(), DEFAULT_ERROR_MESSAGE);
    assert_eq!(err.action(), EXCHANGE_ACTION);
}
