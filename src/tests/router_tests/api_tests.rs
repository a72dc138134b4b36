use crate::errors::ServerError;
use crate::router::handle;
use crate::tests::utils::{body_string, card_ids, get, post_json, test_app};
use serde_json::Value;

fn json(resp: &mut astra::Response) -> Value {
    serde_json::from_str(&body_string(resp)).unwrap()
}

#[test]
fn fragment_and_geojson_show_the_same_places() {
    let app = test_app(Some("pk.test"));
    let query = "f=1&cat=cafe&cat=vet&cat=park&cat=hotel&radius=10&lat=1.30&lng=103.85";

    let mut fragment = handle(get(&format!("/places?{query}")), &app).unwrap();
    let listed = card_ids(&body_string(&mut fragment));

    let mut geo = handle(get(&format!("/api/places.geojson?{query}")), &app).unwrap();
    let fc = json(&mut geo);
    assert_eq!(fc["type"], "FeatureCollection");

    let mapped: Vec<String> = fc["features"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["properties"]["id"].as_str().unwrap().to_string())
        .collect();

    assert_eq!(listed, mapped);
    assert_eq!(listed.first().map(String::as_str), Some("ChIJcafe1"));

    let first = &fc["features"][0]["geometry"]["coordinates"];
    assert_eq!(first[0], 103.85);
    assert_eq!(first[1], 1.30);
}

#[test]
fn places_api_returns_ranked_listings() {
    let app = test_app(None);

    let mut resp = handle(get("/api/places?lat=1.30&lng=103.85&radius=25"), &app).unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.headers()["Content-Type"], "application/json");

    let v = json(&mut resp);
    assert_eq!(v["count"], 4);
    let results = v["results"].as_array().unwrap();
    assert_eq!(results[0]["slug"], "chijcafe1");
    assert_eq!(results[0]["distanceKm"], 0.0);
    assert_eq!(results[0]["verificationStatus"], "verified");

    let distances: Vec<f64> = results
        .iter()
        .map(|r| r["distanceKm"].as_f64().unwrap())
        .collect();
    assert!(distances.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn places_api_honours_search_and_limit() {
    let app = test_app(None);

    let mut resp = handle(get("/api/places?q=bark"), &app).unwrap();
    let v = json(&mut resp);
    assert_eq!(v["count"], 1);
    assert!(v["results"][0]["distanceKm"].is_null());

    let mut resp = handle(get("/api/places?limit=2"), &app).unwrap();
    assert_eq!(json(&mut resp)["count"], 2);
}

#[test]
fn cluster_event_zooms_within_bounds() {
    let app = test_app(Some("pk.test"));
    let body = r#"{"kind":"cluster_activated","clusterId":7,"lng":103.85,"lat":1.3,"expansionZoom":25}"#;

    let mut resp = handle(post_json("/api/map/events", body), &app).unwrap();
    let v = json(&mut resp);

    assert_eq!(v["action"], "zoom_to");
    assert_eq!(v["zoom"], 18.0);
    assert_eq!(v["center"]["lng"], 103.85);
}

#[test]
fn point_event_opens_popup_or_navigates() {
    let app = test_app(Some("pk.test"));

    // A stale slug still resolves through the id.
    let body = r#"{"kind":"point_activated","id":"ChIJvet1","slug":"old-slug"}"#;
    let mut resp = handle(post_json("/api/map/events", body), &app).unwrap();
    let v = json(&mut resp);
    assert_eq!(v["action"], "popup");
    assert_eq!(v["url"], "/place/chijvet1");
    assert!(v["html"].as_str().unwrap().contains("Mount Pleasant Vets"));

    let body = r#"{"kind":"point_activated","id":"ChIJgone","slug":"gone"}"#;
    let mut resp = handle(post_json("/api/map/events", body), &app).unwrap();
    let v = json(&mut resp);
    assert_eq!(v["action"], "navigate");
    assert_eq!(v["url"], "/listing/ChIJgone");
}

#[test]
fn malformed_map_event_is_bad_request() {
    let app = test_app(None);
    let err = handle(post_json("/api/map/events", r#"{"kind":"zoom"}"#), &app).unwrap_err();
    assert!(matches!(err, ServerError::BadRequest(_)));
}

#[test]
fn export_downloads_the_filtered_view() {
    let app = test_app(None);

    let mut resp = handle(get("/export.xlsx?f=1&cat=park"), &app).unwrap();
    assert_eq!(resp.status(), 200);
    assert!(resp.headers()["Content-Disposition"]
        .to_str()
        .unwrap()
        .contains("dog_friendly_places_"));

    let mut bytes = Vec::new();
    std::io::Read::read_to_end(&mut resp.body_mut().reader(), &mut bytes).unwrap();
    assert!(bytes.starts_with(b"PK"));
}

#[test]
fn static_assets_are_embedded() {
    let app = test_app(None);

    let resp = handle(get("/static/app.js"), &app).unwrap();
    assert_eq!(resp.status(), 200);
    assert!(resp.headers()["Content-Type"]
        .to_str()
        .unwrap()
        .starts_with("application/javascript"));

    assert!(handle(get("/static/main.css"), &app).is_ok());
    assert!(matches!(
        handle(get("/static/secrets.env"), &app),
        Err(ServerError::NotFound)
    ));
}
