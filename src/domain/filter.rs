// src/domain/filter.rs

use crate::domain::geo::haversine_km;
use crate::domain::listing::{Category, GeoPoint, Listing};
use serde::Serialize;
use std::collections::BTreeSet;

/// Inputs to the listing pipeline, as produced by the page controls.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterQuery {
    pub categories: BTreeSet<Category>,
    pub reference_point: Option<GeoPoint>,
    /// Only read when `reference_point` is set.
    pub radius_km: f64,
    pub search: Option<String>,
    pub limit: Option<usize>,
}

impl Default for FilterQuery {
    fn default() -> Self {
        Self {
            categories: Category::ALL.into_iter().collect(),
            reference_point: None,
            radius_km: 5.0,
            search: None,
            limit: None,
        }
    }
}

/// A listing annotated with its distance from the reference point.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedListing<'a> {
    #[serde(flatten)]
    pub listing: &'a Listing,
    pub distance_km: Option<f64>,
}

/// Filter by category, cut by radius, sort by distance, then narrow by search.
///
/// The returned sequence is what both the map layer and the results list
/// render. Never fails: an empty collection or category set gives an empty
/// vector.
pub fn filter_and_rank<'a>(listings: &'a [Listing], query: &FilterQuery) -> Vec<RankedListing<'a>> {
    let in_category = listings
        .iter()
        .filter(|l| query.categories.contains(&l.category));

    let mut ranked: Vec<RankedListing<'a>> = match query.reference_point {
        None => in_category
            .map(|listing| RankedListing {
                listing,
                distance_km: None,
            })
            .collect(),
        Some(origin) => {
            let mut near: Vec<(&'a Listing, f64)> = in_category
                .map(|l| (l, haversine_km(origin, l.coordinates)))
                .filter(|(_, d)| *d <= query.radius_km)
                .collect();
            // Vec::sort_by is stable, so equal distances keep collection order.
            near.sort_by(|a, b| a.1.total_cmp(&b.1));
            near.into_iter()
                .map(|(listing, d)| RankedListing {
                    listing,
                    distance_km: Some(d),
                })
                .collect()
        }
    };

    if let Some(needle) = normalized_search(query.search.as_deref()) {
        ranked.retain(|r| matches_search(r.listing, &needle));
    }

    if let Some(limit) = query.limit {
        ranked.truncate(limit);
    }

    ranked
}

fn normalized_search(search: Option<&str>) -> Option<String> {
    search
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase)
}

fn matches_search(listing: &Listing, needle: &str) -> bool {
    listing.name.to_lowercase().contains(needle) || listing.address.to_lowercase().contains(needle)
}
