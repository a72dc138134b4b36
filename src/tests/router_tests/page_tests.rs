use crate::errors::ServerError;
use crate::router::handle;
use crate::templates::html_error_response;
use crate::tests::utils::{body_string, card_ids, get, test_app};

#[test]
fn home_page_renders_controls_and_all_places() {
    let app = test_app(Some("pk.test-token"));

    let mut resp = handle(get("/"), &app).unwrap();
    assert_eq!(resp.status(), 200);

    let body = body_string(&mut resp);
    assert!(body.contains("id=\"controls\""));
    assert!(body.contains("id=\"map\""));
    assert!(body.contains("data-token=\"pk.test-token\""));
    assert_eq!(card_ids(&body).len(), 4);
}

#[test]
fn missing_map_token_shows_inline_message_and_keeps_the_list() {
    let app = test_app(None);

    let mut resp = handle(get("/"), &app).unwrap();
    assert_eq!(resp.status(), 200);

    let body = body_string(&mut resp);
    assert!(body.contains("Map unavailable."));
    assert!(!body.contains("id=\"map\""));
    assert!(body.contains("Bark Cafe"));
}

#[test]
fn results_fragment_applies_filters() {
    let app = test_app(None);

    let mut resp = handle(
        get("/places?f=1&cat=cafe&cat=vet&cat=park&radius=5&lat=1.30&lng=103.85"),
        &app,
    )
    .unwrap();
    let body = body_string(&mut resp);

    // The park is ~5.6 km out; the hotel's category is off.
    assert_eq!(card_ids(&body), vec!["ChIJcafe1", "ChIJvet1"]);
    assert!(body.contains("within 5 km"));
    assert!(!body.contains("<html"));
}

#[test]
fn empty_category_selection_lists_nothing() {
    let app = test_app(None);

    let mut resp = handle(get("/places?f=1&radius=5"), &app).unwrap();
    let body = body_string(&mut resp);

    assert!(card_ids(&body).is_empty());
    assert!(body.contains("No places match these filters."));
}

#[test]
fn geolocation_error_is_shown_without_hiding_results() {
    let app = test_app(None);

    let mut resp = handle(get("/places?geo_err=1"), &app).unwrap();
    let body = body_string(&mut resp);

    assert!(body.contains("id=\"geo-alert\""));
    assert_eq!(card_ids(&body).len(), 4);
}

#[test]
fn dismissing_the_geolocation_alert_keeps_the_filters() {
    let app = test_app(None);

    let mut resp = handle(get("/places?f=1&cat=cafe&geo_err=1"), &app).unwrap();
    let body = body_string(&mut resp);
    assert!(body.contains("dismiss_geo=1"));

    let mut resp = handle(get("/places?f=1&cat=cafe&geo_err=1&dismiss_geo=1"), &app).unwrap();
    let body = body_string(&mut resp);
    assert!(!body.contains("id=\"geo-alert\""));
    assert_eq!(card_ids(&body), vec!["ChIJcafe1"]);
}

#[test]
fn empty_results_offer_category_links() {
    let app = test_app(None);

    let mut resp = handle(get("/places?f=1&cat=mall"), &app).unwrap();
    let body = body_string(&mut resp);
    assert!(card_ids(&body).is_empty());
    assert!(body.contains("toggle=park"));
    assert!(!body.contains("toggle=mall"));

    // Following one of them adds that category to the selection.
    let mut resp = handle(get("/?f=1&cat=mall&toggle=park"), &app).unwrap();
    let body = body_string(&mut resp);
    assert_eq!(card_ids(&body), vec!["ChIJpark1"]);
}

#[test]
fn detail_page_by_slug() {
    let app = test_app(None);

    let mut resp = handle(get("/place/chijcafe1"), &app).unwrap();
    assert_eq!(resp.status(), 200);

    let body = body_string(&mut resp);
    assert!(body.contains("Bark Cafe"));
    assert!(body.contains("Bark Cafe Road, Singapore"));
}

#[test]
fn unknown_slug_is_404() {
    let app = test_app(None);

    let err = handle(get("/place/no-such-place"), &app).unwrap_err();
    assert!(matches!(err, ServerError::NotFound));
    assert_eq!(html_error_response(err).status(), 404);
}

#[test]
fn legacy_id_route_redirects_to_slug() {
    let app = test_app(None);

    let resp = handle(get("/listing/ChIJvet1"), &app).unwrap();
    assert_eq!(resp.status(), 301);
    assert_eq!(resp.headers()["Location"], "/place/chijvet1");

    let err = handle(get("/listing/ChIJmissing"), &app).unwrap_err();
    assert!(matches!(err, ServerError::NotFound));
}

#[test]
fn unknown_route_is_404() {
    let app = test_app(None);
    assert!(matches!(
        handle(get("/admin"), &app),
        Err(ServerError::NotFound)
    ));
}
