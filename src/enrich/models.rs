use crate::domain::{Category, VerificationStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One entry of the search plan fed to `fetch`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchQuery {
    pub category: Category,
    pub query: String,
}

/// How a record got its category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassifiedBy {
    Types,
    Name,
    Hint,
}

/// Working record passed between the enrichment stages.
///
/// Every stage reads and writes a JSON array of these. Later stages only fill
/// fields in; `error` is set by whichever stage failed on the record.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lng: Option<f64>,
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub review_count: Option<i64>,

    #[serde(default)]
    pub category_hint: Option<Category>,
    #[serde(default)]
    pub source_query: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classified_by: Option<ClassifiedBy>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hours: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_range: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verification_status: Option<VerificationStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verified_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fetched_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PlaceRecord {
    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }
}

// Google Places web service payloads. Only the fields we read are modelled.

#[derive(Debug, Deserialize)]
pub struct TextSearchResponse {
    pub status: String,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub results: Vec<PlaceResult>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DetailsResponse {
    pub status: String,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub result: Option<PlaceDetails>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlaceResult {
    pub place_id: String,
    pub name: String,
    #[serde(default)]
    pub formatted_address: Option<String>,
    #[serde(default)]
    pub geometry: Option<Geometry>,
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub user_ratings_total: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Geometry {
    pub location: LatLng,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlaceDetails {
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub user_ratings_total: Option<i64>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub formatted_phone_number: Option<String>,
    #[serde(default)]
    pub opening_hours: Option<OpeningHours>,
    #[serde(default)]
    pub price_level: Option<u8>,
    #[serde(default)]
    pub reviews: Vec<Review>,
    #[serde(default)]
    pub editorial_summary: Option<EditorialSummary>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OpeningHours {
    #[serde(default)]
    pub weekday_text: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Review {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EditorialSummary {
    #[serde(default)]
    pub overview: Option<String>,
}

impl PlaceRecord {
    pub fn from_search_result(result: PlaceResult, query: &SearchQuery, now: DateTime<Utc>) -> Self {
        let location = result.geometry.map(|g| g.location);
        Self {
            id: result.place_id,
            name: result.name,
            address: result.formatted_address.unwrap_or_default(),
            lat: location.map(|l| l.lat),
            lng: location.map(|l| l.lng),
            types: result.types,
            rating: result.rating,
            review_count: result.user_ratings_total,
            category_hint: Some(query.category),
            source_query: Some(query.query.clone()),
            fetched_at: Some(now),
            ..Self::default()
        }
    }

    /// Placeholder for a search that failed, so the failure shows up in the output.
    pub fn failed_query(query: &SearchQuery, reason: String) -> Self {
        Self {
            name: query.query.clone(),
            category_hint: Some(query.category),
            source_query: Some(query.query.clone()),
            error: Some(reason),
            ..Self::default()
        }
    }
}
