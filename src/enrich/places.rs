// places.rs
use crate::enrich::models::{DetailsResponse, PlaceDetails, TextSearchResponse};
use crate::enrich::EnrichError;
use reqwest::blocking::Client;
use std::time::Duration;
use tracing::debug;

const USER_AGENT: &str = concat!("dogfriendly-sg/", env!("CARGO_PKG_VERSION"));
const API_BASE: &str = "https://maps.googleapis.com/maps/api/place";

// Bias searches to Singapore.
const LOCATION_BIAS: &str = "1.3521,103.8198";
const BIAS_RADIUS_M: &str = "30000";
const REGION: &str = "sg";

const DETAIL_FIELDS: &str = "place_id,types,rating,user_ratings_total,website,\
formatted_phone_number,opening_hours,price_level,reviews,editorial_summary";

/// The two Places calls the jobs make. Abstracted so the stages can be
/// exercised without the network.
pub trait PlacesApi {
    fn text_search(
        &self,
        query: &str,
        page_token: Option<&str>,
    ) -> Result<TextSearchResponse, EnrichError>;

    fn details(&self, place_id: &str) -> Result<PlaceDetails, EnrichError>;
}

pub struct GooglePlacesClient {
    client: Client,
    api_key: String,
}

impl GooglePlacesClient {
    pub fn new(api_key: String) -> Result<Self, EnrichError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| EnrichError::Network(e.to_string()))?;

        Ok(Self { client, api_key })
    }

    fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<T, EnrichError> {
        let mut url = url::Url::parse(&format!("{API_BASE}/{endpoint}/json"))
            .map_err(|e| EnrichError::Config(e.to_string()))?;
        url.query_pairs_mut()
            .extend_pairs(params.iter().copied())
            .append_pair("key", &self.api_key);

        debug!("GET {endpoint} {:?}", params);

        let resp = self.client.get(url).send()?;
        let status = resp.status();
        let text = resp.text()?;

        if !status.is_success() {
            return Err(EnrichError::Api {
                status: status.to_string(),
                message: text,
            });
        }

        Ok(serde_json::from_str(&text)?)
    }
}

/// Places answers HTTP 200 even for failures; the body `status` tells.
fn check_status(status: &str, message: Option<String>) -> Result<(), EnrichError> {
    match status {
        "OK" | "ZERO_RESULTS" => Ok(()),
        other => Err(EnrichError::Api {
            status: other.to_string(),
            message: message.unwrap_or_default(),
        }),
    }
}

impl PlacesApi for GooglePlacesClient {
    fn text_search(
        &self,
        query: &str,
        page_token: Option<&str>,
    ) -> Result<TextSearchResponse, EnrichError> {
        let mut params = vec![
            ("query", query),
            ("location", LOCATION_BIAS),
            ("radius", BIAS_RADIUS_M),
            ("region", REGION),
        ];
        if let Some(token) = page_token {
            params.push(("pagetoken", token));
        }

        let mut resp: TextSearchResponse = self.get_json("textsearch", &params)?;
        check_status(&resp.status, resp.error_message.take())?;
        Ok(resp)
    }

    fn details(&self, place_id: &str) -> Result<PlaceDetails, EnrichError> {
        let params = [("place_id", place_id), ("fields", DETAIL_FIELDS)];
        let mut resp: DetailsResponse = self.get_json("details", &params)?;
        check_status(&resp.status, resp.error_message.take())?;
        resp.result.ok_or_else(|| EnrichError::Api {
            status: resp.status,
            message: "details response without result".into(),
        })
    }
}
