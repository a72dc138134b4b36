use crate::domain::filter::tests::listing;
use crate::domain::{Category, VerificationStatus};
use crate::map::MapConfig;
use crate::router::App;
use crate::store::ListingStore;
use astra::{Body, Request, Response};
use http::Method;
use std::io::Read;

/// Four places around the city centre. Slugs are the lowercased ids.
pub fn test_app(token: Option<&str>) -> App {
    let mut cafe = listing("ChIJcafe1", "Bark Cafe", Category::Cafe, 1.3000, 103.8500);
    cafe.verification_status = Some(VerificationStatus::Verified);
    cafe.verified_by = Some("reviews".into());
    cafe.rating = Some(4.6);
    cafe.review_count = Some(128);

    let listings = vec![
        cafe,
        listing("ChIJpark1", "Bishan Dog Run", Category::Park, 1.3500, 103.8480),
        listing("ChIJvet1", "Mount Pleasant Vets", Category::Vet, 1.3190, 103.8350),
        listing("ChIJhotel1", "Pan Pacific", Category::Hotel, 1.2920, 103.8590),
    ];

    App {
        store: ListingStore::new(listings).expect("fixture listings are valid"),
        map: MapConfig::with_token(token.map(str::to_string)),
    }
}

pub fn get(uri: &str) -> Request {
    http::Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn post_json(uri: &str, json: &str) -> Request {
    http::Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(json.to_string()))
        .unwrap()
}

pub fn body_string(resp: &mut Response) -> String {
    let mut bytes = Vec::new();
    resp.body_mut().reader().read_to_end(&mut bytes).unwrap();
    String::from_utf8(bytes).unwrap()
}

/// Listing ids in the order the results fragment renders them.
pub fn card_ids(html: &str) -> Vec<String> {
    html.split("data-id=\"")
        .skip(1)
        .filter_map(|rest| rest.split('"').next())
        .map(str::to_string)
        .collect()
}
