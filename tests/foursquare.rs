//! HTTP behavior of the Foursquare details gateway against a mock server.

use cafescout::{
    gateways::foursquare::{FoursquareConfig, FoursquareDetails},
    DetailsGateway, Error, LatLng,
};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const NEAR: LatLng = LatLng {
    lat: 37.7936,
    lng: -122.3957,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn gateway(server: &MockServer) -> FoursquareDetails {
    FoursquareDetails::new(
        FoursquareConfig::new("test-id", "test-secret").with_base_url(server.uri()),
    )
}

async fn mount_search(server: &MockServer, venues: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/v2/venues/search"))
        .and(query_param("query", "Blue Bottle Coffee"))
        .and(query_param("limit", "1"))
        .and(query_param("ll", "37.7936,-122.3957"))
        .and(query_param("client_id", "test-id"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "response": { "venues": venues } })),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_fetch_returns_hours_and_links() {
    init_logging();
    let server = MockServer::start().await;
    mount_search(&server, json!([{ "id": "v1", "name": "Blue Bottle Coffee" }])).await;
    Mock::given(method("GET"))
        .and(path("/v2/venues/v1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": {
                "venue": {
                    "hours": { "status": "Open until 6:00 PM" },
                    "canonicalUrl": "https://foursquare.com/v/v1",
                    "url": "https://bluebottle.example"
                }
            }
        })))
        .mount(&server)
        .await;

    let details = gateway(&server)
        .fetch(NEAR, "Blue Bottle Coffee")
        .await
        .unwrap();

    assert_eq!(details.hours_text.as_deref(), Some("Open until 6:00 PM"));
    assert_eq!(
        details.external_url.as_deref(),
        Some("https://foursquare.com/v/v1")
    );
    assert_eq!(
        details.official_url.as_deref(),
        Some("https://bluebottle.example")
    );
}

#[tokio::test]
async fn test_fetch_tolerates_missing_optional_fields() {
    init_logging();
    let server = MockServer::start().await;
    mount_search(&server, json!([{ "id": "v2" }])).await;
    Mock::given(method("GET"))
        .and(path("/v2/venues/v2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": { "venue": { "canonicalUrl": "https://foursquare.com/v/v2" } }
        })))
        .mount(&server)
        .await;

    let details = gateway(&server)
        .fetch(NEAR, "Blue Bottle Coffee")
        .await
        .unwrap();

    assert!(details.hours_text.is_none());
    assert!(details.official_url.is_none());
    assert_eq!(
        details.external_url.as_deref(),
        Some("https://foursquare.com/v/v2")
    );
}

#[tokio::test]
async fn test_fetch_with_no_matching_venue_is_not_found() {
    init_logging();
    let server = MockServer::start().await;
    mount_search(&server, json!([])).await;

    let result = gateway(&server).fetch(NEAR, "Blue Bottle Coffee").await;
    assert!(matches!(result, Err(Error::NotFound(_))));
}

#[tokio::test]
async fn test_fetch_with_missing_venue_record_is_not_found() {
    init_logging();
    let server = MockServer::start().await;
    mount_search(&server, json!([{ "id": "v3" }])).await;
    Mock::given(method("GET"))
        .and(path("/v2/venues/v3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "response": {} })))
        .mount(&server)
        .await;

    let result = gateway(&server).fetch(NEAR, "Blue Bottle Coffee").await;
    assert!(matches!(result, Err(Error::NotFound(_))));
}

#[tokio::test]
async fn test_fetch_maps_server_error_to_provider_error() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/venues/search"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let result = gateway(&server).fetch(NEAR, "Blue Bottle Coffee").await;
    assert!(matches!(result, Err(Error::Provider(_))));
}
