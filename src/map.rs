// map.rs
//
// Boundary with the browser map library. The core hands it a GeoJSON point
// collection and interprets the two events it sends back. Clustering and
// rendering happen on the other side.

use crate::domain::{GeoPoint, Listing, RankedListing};
use crate::templates::components::popup_html;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

pub const SINGAPORE_CENTER: GeoPoint = GeoPoint {
    lat: 1.3521,
    lng: 103.8198,
};
pub const DEFAULT_STYLE: &str = "mapbox://styles/mapbox/streets-v12";

/// Everything the client needs to mount the widget.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapConfig {
    #[serde(skip)]
    pub access_token: Option<String>,
    pub style: String,
    pub center: GeoPoint,
    pub zoom: f64,
    pub max_zoom: f64,
    pub cluster_radius: u32,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            access_token: None,
            style: DEFAULT_STYLE.to_string(),
            center: SINGAPORE_CENTER,
            zoom: 11.0,
            max_zoom: 18.0,
            cluster_radius: 50,
        }
    }
}

impl MapConfig {
    pub fn with_token(token: Option<String>) -> Self {
        Self {
            access_token: token.filter(|t| !t.trim().is_empty()),
            ..Self::default()
        }
    }

    pub fn is_available(&self) -> bool {
        self.access_token.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureCollection {
    #[serde(rename = "type")]
    kind: &'static str,
    pub features: Vec<Feature>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Feature {
    #[serde(rename = "type")]
    kind: &'static str,
    pub geometry: Value,
    pub properties: Map<String, Value>,
}

impl FeatureCollection {
    /// One point per ranked listing, in pipeline order.
    pub fn from_ranked(ranked: &[RankedListing<'_>]) -> Self {
        Self {
            kind: "FeatureCollection",
            features: ranked.iter().map(Feature::from_ranked).collect(),
        }
    }
}

impl Feature {
    fn from_ranked(ranked: &RankedListing<'_>) -> Self {
        let l: &Listing = ranked.listing;

        let mut props = Map::new();
        props.insert("id".into(), json!(l.id));
        props.insert("slug".into(), json!(l.slug));
        props.insert("name".into(), json!(l.name));
        props.insert("category".into(), json!(l.category));
        props.insert("color".into(), json!(l.category.color()));
        props.insert("address".into(), json!(l.address));
        props.insert("distanceKm".into(), json!(ranked.distance_km));
        props.insert("rating".into(), json!(l.rating));
        props.insert("reviewCount".into(), json!(l.review_count));
        props.insert(
            "verificationStatus".into(),
            json!(l.verification_status.map(|s| s.as_str())),
        );
        props.insert("url".into(), json!(l.detail_url()));
        props.insert("popup".into(), json!(popup_html(ranked).into_string()));

        Self {
            kind: "Feature",
            geometry: json!({
                "type": "Point",
                "coordinates": [l.coordinates.lng, l.coordinates.lat],
            }),
            properties: props,
        }
    }
}

/// Events the map widget reports back.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MapEvent {
    #[serde(rename_all = "camelCase")]
    ClusterActivated {
        cluster_id: u64,
        lng: f64,
        lat: f64,
        /// Zoom level reported by the library's cluster source.
        expansion_zoom: f64,
    },
    PointActivated {
        id: String,
        slug: String,
    },
}

/// What the page should do in response to a [`MapEvent`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum MapAction {
    ZoomTo { center: GeoPoint, zoom: f64 },
    Popup { slug: String, url: String, html: String },
    Navigate { url: String },
}

/// Resolve a map event. `lookup` finds a listing by the slug/id the event
/// carries; an unknown point falls back to plain navigation.
pub fn resolve_event<'a, F>(config: &MapConfig, event: MapEvent, lookup: F) -> MapAction
where
    F: Fn(&str, &str) -> Option<&'a Listing>,
{
    match event {
        MapEvent::ClusterActivated {
            lng,
            lat,
            expansion_zoom,
            ..
        } => MapAction::ZoomTo {
            center: GeoPoint::new(lat, lng),
            zoom: expansion_zoom.clamp(0.0, config.max_zoom),
        },
        MapEvent::PointActivated { id, slug } => match lookup(&slug, &id) {
            Some(listing) => MapAction::Popup {
                slug: listing.slug.clone(),
                url: listing.detail_url(),
                html: popup_html(&RankedListing {
                    listing,
                    distance_km: None,
                })
                .into_string(),
            },
            None => MapAction::Navigate {
                url: format!("/listing/{id}"),
            },
        },
    }
}
