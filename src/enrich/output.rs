// output.rs
//
// Job file I/O. Every stage writes its JSON output plus a flat CSV copy next
// to it (same stem, `.csv`) for eyeballing in a spreadsheet.

use crate::domain::Listing;
use crate::enrich::models::PlaceRecord;
use crate::enrich::EnrichError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

fn io_error(path: &Path, source: std::io::Error) -> EnrichError {
    EnrichError::Io {
        path: path.display().to_string(),
        source,
    }
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, EnrichError> {
    let raw = fs::read_to_string(path).map_err(|e| io_error(path, e))?;
    Ok(serde_json::from_str(&raw)?)
}

pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), EnrichError> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(|e| io_error(dir, e))?;
    }
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json).map_err(|e| io_error(path, e))
}

pub fn csv_path(json_path: &Path) -> PathBuf {
    json_path.with_extension("csv")
}

fn write_csv<R: Serialize>(path: &Path, rows: impl IntoIterator<Item = R>) -> Result<(), EnrichError> {
    let mut writer = csv::Writer::from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush().map_err(|e| io_error(path, e))
}

/// CSV rows must be flat; lists are joined with `|`.
#[derive(Serialize)]
struct RecordRow<'a> {
    id: &'a str,
    name: &'a str,
    address: &'a str,
    lat: Option<f64>,
    lng: Option<f64>,
    types: String,
    rating: Option<f64>,
    review_count: Option<i64>,
    category_hint: Option<&'static str>,
    category: Option<&'static str>,
    website: Option<&'a str>,
    verification_status: Option<&'static str>,
    verified_by: Option<&'a str>,
    evidence: Option<&'a str>,
    error: Option<&'a str>,
}

impl<'a> From<&'a PlaceRecord> for RecordRow<'a> {
    fn from(r: &'a PlaceRecord) -> Self {
        Self {
            id: &r.id,
            name: &r.name,
            address: &r.address,
            lat: r.lat,
            lng: r.lng,
            types: r.types.join("|"),
            rating: r.rating,
            review_count: r.review_count,
            category_hint: r.category_hint.map(|c| c.as_str()),
            category: r.category.map(|c| c.as_str()),
            website: r.website.as_deref(),
            verification_status: r.verification_status.map(|s| s.as_str()),
            verified_by: r.verified_by.as_deref(),
            evidence: r.evidence.as_deref(),
            error: r.error.as_deref(),
        }
    }
}

#[derive(Serialize)]
struct ListingRow<'a> {
    id: &'a str,
    slug: &'a str,
    name: &'a str,
    category: &'static str,
    address: &'a str,
    lat: f64,
    lng: f64,
    website: Option<&'a str>,
    phone: Option<&'a str>,
    rating: Option<f64>,
    review_count: Option<i64>,
    verification_status: Option<&'static str>,
    verified_by: Option<&'a str>,
}

impl<'a> From<&'a Listing> for ListingRow<'a> {
    fn from(l: &'a Listing) -> Self {
        Self {
            id: &l.id,
            slug: &l.slug,
            name: &l.name,
            category: l.category.as_str(),
            address: &l.address,
            lat: l.coordinates.lat,
            lng: l.coordinates.lng,
            website: l.website.as_deref(),
            phone: l.phone.as_deref(),
            rating: l.rating,
            review_count: l.review_count,
            verification_status: l.verification_status.map(|s| s.as_str()),
            verified_by: l.verified_by.as_deref(),
        }
    }
}

/// Write a stage's working records as JSON plus CSV.
pub fn write_records(path: &Path, records: &[PlaceRecord]) -> Result<(), EnrichError> {
    write_json(path, records)?;
    let csv = csv_path(path);
    write_csv(&csv, records.iter().map(RecordRow::from))?;
    info!("💾 wrote {} records to {} (+ {})", records.len(), path.display(), csv.display());
    Ok(())
}

/// Write the final listings as JSON plus CSV.
pub fn write_listings(path: &Path, listings: &[Listing]) -> Result<(), EnrichError> {
    write_json(path, listings)?;
    let csv = csv_path(path);
    write_csv(&csv, listings.iter().map(ListingRow::from))?;
    info!("💾 wrote {} listings to {} (+ {})", listings.len(), path.display(), csv.display());
    Ok(())
}
