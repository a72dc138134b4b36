use crate::domain::{GeoPoint, Listing};
use crate::enrich::models::PlaceRecord;
use std::collections::HashSet;
use tracing::{debug, info};

/// Counts reported at the end of `finalize`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FinalizeReport {
    pub input: usize,
    pub kept: usize,
    pub errored: usize,
    pub invalid_coordinates: usize,
    pub uncategorised: usize,
    pub duplicates: usize,
}

/// Lowercase ASCII slug: alphanumeric runs joined by single dashes.
///
/// Accented letters are dropped rather than transliterated, so "Café Melba"
/// becomes `caf-melba`. A name with nothing usable falls back to `place`.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut dash = false;

    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            if dash && !slug.is_empty() {
                slug.push('-');
            }
            slug.push(c.to_ascii_lowercase());
            dash = false;
        } else if c == '\'' || c == '’' {
            // "Tiong Bahru's" -> "tiong-bahrus"
        } else {
            dash = true;
        }
    }

    if slug.is_empty() {
        "place".to_string()
    } else {
        slug
    }
}

/// Hands out slugs, suffixing `-2`, `-3`, ... when a base slug is taken.
#[derive(Debug, Default)]
pub struct SlugAllocator {
    taken: HashSet<String>,
}

impl SlugAllocator {
    pub fn allocate(&mut self, name: &str) -> String {
        let base = slugify(name);
        let mut candidate = base.clone();
        let mut n = 2;
        while self.taken.contains(&candidate) {
            candidate = format!("{base}-{n}");
            n += 1;
        }
        self.taken.insert(candidate.clone());
        candidate
    }
}

fn coordinates(record: &PlaceRecord) -> Option<GeoPoint> {
    let point = GeoPoint::new(record.lat?, record.lng?);
    point.is_valid().then_some(point)
}

/// Turn the verified working records into the persisted listings.
///
/// Errored records, records without usable coordinates or category, and
/// repeated ids (first occurrence wins) are dropped; input order is kept.
pub fn finalize(records: Vec<PlaceRecord>) -> (Vec<Listing>, FinalizeReport) {
    let mut report = FinalizeReport {
        input: records.len(),
        ..FinalizeReport::default()
    };
    let mut seen = HashSet::new();
    let mut slugs = SlugAllocator::default();
    let mut listings = Vec::new();

    for record in records {
        if record.has_error() {
            report.errored += 1;
            continue;
        }
        let Some(point) = coordinates(&record) else {
            debug!("dropping {}: no valid coordinates", record.id);
            report.invalid_coordinates += 1;
            continue;
        };
        let Some(category) = record.category else {
            report.uncategorised += 1;
            continue;
        };
        if !seen.insert(record.id.clone()) {
            report.duplicates += 1;
            continue;
        }

        let slug = slugs.allocate(&record.name);
        listings.push(Listing {
            id: record.id,
            slug,
            name: record.name,
            category,
            address: record.address,
            coordinates: point,
            website: record.website,
            phone: record.phone,
            hours: record.hours,
            price_range: record.price_range,
            pet_policy: None,
            note: record.evidence,
            writeup: record.summary,
            images: Vec::new(),
            rating: record.rating,
            review_count: record.review_count,
            verification_status: record.verification_status,
            verified_by: record.verified_by,
        });
    }

    report.kept = listings.len();
    info!(
        "🏁 finalize: input={}, kept={}, errored={}, bad_coords={}, uncategorised={}, duplicates={}",
        report.input,
        report.kept,
        report.errored,
        report.invalid_coordinates,
        report.uncategorised,
        report.duplicates
    );

    (listings, report)
}
