// src/domain/listing.rs

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The closed set of place categories shown in the directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Cafe,
    Hotel,
    Mall,
    Park,
    Groomer,
    Vet,
    Supplies,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Cafe,
        Category::Hotel,
        Category::Mall,
        Category::Park,
        Category::Groomer,
        Category::Vet,
        Category::Supplies,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Cafe => "cafe",
            Category::Hotel => "hotel",
            Category::Mall => "mall",
            Category::Park => "park",
            Category::Groomer => "groomer",
            Category::Vet => "vet",
            Category::Supplies => "supplies",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::Cafe => "Cafes & Restaurants",
            Category::Hotel => "Hotels",
            Category::Mall => "Malls",
            Category::Park => "Parks & Dog Runs",
            Category::Groomer => "Groomers",
            Category::Vet => "Vets",
            Category::Supplies => "Pet Supplies",
        }
    }

    /// Marker colour used by both the map layer and the list badges.
    pub fn color(self) -> &'static str {
        match self {
            Category::Cafe => "#f59e0b",
            Category::Hotel => "#8b5cf6",
            Category::Mall => "#ec4899",
            Category::Park => "#10b981",
            Category::Groomer => "#06b6d4",
            Category::Vet => "#ef4444",
            Category::Supplies => "#3b82f6",
        }
    }

    /// Groomers, vets and supply shops serve dogs by definition.
    pub fn is_pet_service(self) -> bool {
        matches!(self, Category::Groomer | Category::Vet | Category::Supplies)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown category '{s}'"))
    }
}

/// Latitude/longitude in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    Verified,
    NeedsCheck,
}

impl VerificationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            VerificationStatus::Verified => "verified",
            VerificationStatus::NeedsCheck => "needs_check",
        }
    }
}

/// One place in the directory, exactly as persisted in `listings.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub id: String,
    pub slug: String,
    pub name: String,
    pub category: Category,
    pub address: String,

    #[serde(flatten)]
    pub coordinates: GeoPoint,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hours: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_range: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pet_policy: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub writeup: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,

    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub review_count: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verification_status: Option<VerificationStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verified_by: Option<String>,
}

impl Listing {
    pub fn detail_url(&self) -> String {
        format!("/place/{}", self.slug)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_reads_flat_lat_lng_and_camel_case_fields() {
        let json = r#"{
            "id": "ChIJ123",
            "slug": "the-dog-cafe",
            "name": "The Dog Cafe",
            "category": "cafe",
            "address": "1 Jalan Kayu",
            "lat": 1.39,
            "lng": 103.87,
            "priceRange": "$$",
            "rating": 4.5,
            "reviewCount": null,
            "verificationStatus": "needs_check"
        }"#;

        let listing: Listing = serde_json::from_str(json).unwrap();
        assert_eq!(listing.category, Category::Cafe);
        assert_eq!(listing.coordinates, GeoPoint::new(1.39, 103.87));
        assert_eq!(listing.price_range.as_deref(), Some("$$"));
        assert_eq!(listing.review_count, None);
        assert_eq!(
            listing.verification_status,
            Some(VerificationStatus::NeedsCheck)
        );
        assert!(listing.images.is_empty());

        let back = serde_json::to_value(&listing).unwrap();
        assert_eq!(back["lat"], 1.39);
        assert_eq!(back["verificationStatus"], "needs_check");
        assert!(back.get("website").is_none());
    }

    #[test]
    fn unknown_category_is_rejected() {
        assert!("bar".parse::<Category>().is_err());
        assert_eq!(" VET ".parse::<Category>(), Ok(Category::Vet));
    }

    #[test]
    fn coordinate_ranges() {
        assert!(GeoPoint::new(1.3, 103.8).is_valid());
        assert!(!GeoPoint::new(91.0, 0.0).is_valid());
        assert!(!GeoPoint::new(0.0, -180.5).is_valid());
        assert!(!GeoPoint::new(f64::NAN, 0.0).is_valid());
    }
}
