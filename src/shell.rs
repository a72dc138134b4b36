// shell.rs
//
// State behind the page controls: category toggles, radius slider, search box
// and the locate-me request. Every change produces a fresh `FilterQuery`; the
// filtered view is recomputed from scratch, never patched.

use crate::domain::{filter_and_rank, Category, FilterQuery, GeoPoint, Listing, RankedListing};
use crate::map::FeatureCollection;
use std::collections::BTreeSet;
use thiserror::Error;
use tracing::debug;

pub const RADIUS_MIN_KM: f64 = 1.0;
pub const RADIUS_MAX_KM: f64 = 25.0;
pub const RADIUS_DEFAULT_KM: f64 = 5.0;
pub const LOCATE_TIMEOUT_MS: u32 = 10_000;

/// Geolocation failures as reported by the browser (`GeolocationPositionError.code`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LocationError {
    #[error("Location permission was denied. Allow location access to sort by distance.")]
    PermissionDenied,
    #[error("Your location is currently unavailable.")]
    Unavailable,
    #[error("Locating you took too long. Please try again.")]
    Timeout,
    #[error("Could not determine your location.")]
    Unknown,
}

impl LocationError {
    pub fn from_code(code: &str) -> Self {
        match code.trim() {
            "1" => LocationError::PermissionDenied,
            "2" => LocationError::Unavailable,
            "3" => LocationError::Timeout,
            _ => LocationError::Unknown,
        }
    }

    /// Inverse of [`LocationError::from_code`]; `Unknown` is `0`.
    pub fn code(self) -> &'static str {
        match self {
            LocationError::PermissionDenied => "1",
            LocationError::Unavailable => "2",
            LocationError::Timeout => "3",
            LocationError::Unknown => "0",
        }
    }
}

/// Identifies one outstanding location request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocateTicket(u64);

#[derive(Debug, Clone, PartialEq)]
pub enum LocateStatus {
    Idle,
    Pending(LocateTicket),
    Located(GeoPoint),
    Failed(LocationError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShellState {
    pub categories: BTreeSet<Category>,
    pub radius_km: f64,
    pub search: String,
    pub reference_point: Option<GeoPoint>,
    pub locate: LocateStatus,
    pub limit: Option<usize>,
    next_ticket: u64,
}

impl Default for ShellState {
    fn default() -> Self {
        Self {
            categories: Category::ALL.into_iter().collect(),
            radius_km: RADIUS_DEFAULT_KM,
            search: String::new(),
            reference_point: None,
            locate: LocateStatus::Idle,
            limit: None,
            next_ticket: 0,
        }
    }
}

/// The filtered result and the map layer built from that same result.
pub struct ShellView<'a> {
    pub results: Vec<RankedListing<'a>>,
    pub features: FeatureCollection,
}

impl ShellState {
    /// Rebuild the control state from a page query string.
    ///
    /// Without the `f` marker every category is selected; with it, only the
    /// `cat` values present are (possibly none).
    pub fn from_query(query: Option<&str>) -> Self {
        let mut state = ShellState::default();
        let pairs: Vec<(String, String)> = query
            .map(|q| {
                url::form_urlencoded::parse(q.as_bytes())
                    .into_owned()
                    .collect()
            })
            .unwrap_or_default();

        let get = |key: &str| {
            pairs
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.as_str())
        };

        if get("f").is_some() {
            state.categories = pairs
                .iter()
                .filter(|(k, _)| k == "cat")
                .filter_map(|(_, v)| v.parse().ok())
                .collect();
        }
        // Links that flip one category on top of the current selection.
        for (_, v) in pairs.iter().filter(|(k, _)| k == "toggle") {
            if let Ok(category) = v.parse() {
                state.toggle_category(category);
            }
        }

        if let Some(radius) = get("radius") {
            state.set_radius(parse_radius(radius));
        }
        if let Some(q) = get("q") {
            state.set_search(q);
        }
        state.limit = get("limit").and_then(|v| v.trim().parse().ok());

        let lat = get("lat").and_then(|v| v.trim().parse::<f64>().ok());
        let lng = get("lng").and_then(|v| v.trim().parse::<f64>().ok());
        if let (Some(lat), Some(lng)) = (lat, lng) {
            let ticket = state.begin_locate();
            state.resolve_location(ticket, Ok(GeoPoint::new(lat, lng)));
        }
        if let Some(code) = get("geo_err").filter(|c| !c.is_empty()) {
            let ticket = state.begin_locate();
            state.resolve_location(ticket, Err(LocationError::from_code(code)));
        }
        if get("dismiss_geo").is_some() {
            state.dismiss_location_error();
        }

        state
    }

    pub fn toggle_category(&mut self, category: Category) {
        if !self.categories.remove(&category) {
            self.categories.insert(category);
        }
    }

    pub fn set_radius(&mut self, radius_km: f64) {
        self.radius_km = radius_km.clamp(RADIUS_MIN_KM, RADIUS_MAX_KM);
    }

    pub fn set_search(&mut self, search: &str) {
        self.search = search.to_string();
    }

    /// Start a location request. Any earlier request becomes stale.
    pub fn begin_locate(&mut self) -> LocateTicket {
        self.next_ticket += 1;
        let ticket = LocateTicket(self.next_ticket);
        self.locate = LocateStatus::Pending(ticket);
        ticket
    }

    /// Apply a location result. Returns false when the result was discarded
    /// because a newer request superseded `ticket`.
    pub fn resolve_location(
        &mut self,
        ticket: LocateTicket,
        result: Result<GeoPoint, LocationError>,
    ) -> bool {
        if self.locate != LocateStatus::Pending(ticket) {
            debug!("discarding location result for {:?}", ticket);
            return false;
        }

        match result {
            Ok(point) if point.is_valid() => {
                self.reference_point = Some(point);
                self.locate = LocateStatus::Located(point);
            }
            Ok(_) => self.locate = LocateStatus::Failed(LocationError::Unknown),
            // The previous reference point, if any, stays in effect.
            Err(err) => self.locate = LocateStatus::Failed(err),
        }
        true
    }

    pub fn dismiss_location_error(&mut self) {
        if let LocateStatus::Failed(_) = self.locate {
            self.locate = match self.reference_point {
                Some(point) => LocateStatus::Located(point),
                None => LocateStatus::Idle,
            };
        }
    }

    pub fn location_error(&self) -> Option<LocationError> {
        match self.locate {
            LocateStatus::Failed(err) => Some(err),
            _ => None,
        }
    }

    pub fn filter_query(&self) -> FilterQuery {
        FilterQuery {
            categories: self.categories.clone(),
            reference_point: self.reference_point,
            radius_km: self.radius_km,
            search: Some(self.search.clone()).filter(|s| !s.trim().is_empty()),
            limit: self.limit,
        }
    }

    /// Run the pipeline once and derive both views from its output.
    pub fn view<'a>(&self, listings: &'a [Listing]) -> ShellView<'a> {
        let results = filter_and_rank(listings, &self.filter_query());
        let features = FeatureCollection::from_ranked(&results);
        ShellView { results, features }
    }

    /// Query string that reproduces this state (used by fragment/API links).
    pub fn to_query(&self) -> String {
        let mut ser = url::form_urlencoded::Serializer::new(String::new());
        ser.append_pair("f", "1");
        for c in &self.categories {
            ser.append_pair("cat", c.as_str());
        }
        ser.append_pair("radius", &format_radius(self.radius_km));
        if !self.search.trim().is_empty() {
            ser.append_pair("q", &self.search);
        }
        if let Some(p) = self.reference_point {
            ser.append_pair("lat", &p.lat.to_string());
            ser.append_pair("lng", &p.lng.to_string());
        }
        if let Some(limit) = self.limit {
            ser.append_pair("limit", &limit.to_string());
        }
        if let Some(err) = self.location_error() {
            ser.append_pair("geo_err", err.code());
        }
        ser.finish()
    }
}

fn parse_radius(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|r| r.is_finite())
        .unwrap_or(RADIUS_DEFAULT_KM)
}

pub fn format_radius(radius_km: f64) -> String {
    if radius_km.fract() == 0.0 {
        format!("{}", radius_km as i64)
    } else {
        format!("{radius_km:.1}")
    }
}
