// verify.rs
//
// Decides whether a place's dog-friendly claim is corroborated. Evidence is a
// literal, case-insensitive phrase match in reviews, the editorial summary or
// (optionally) the place's website; nothing here understands the text.

use crate::domain::{Category, VerificationStatus};
use crate::enrich::classify::{category_for_types, expected_types};
use crate::enrich::models::{PlaceDetails, PlaceRecord};
use crate::enrich::{Outcome, PlacesApi};
use crate::enrich::website::{visible_text, PageFetcher};
use tracing::{debug, warn};

pub const POSITIVE_KEYWORDS: &[&str] = &[
    "dog friendly",
    "dog-friendly",
    "pet friendly",
    "pet-friendly",
    "dogs allowed",
    "dogs are allowed",
    "dogs are welcome",
    "pets allowed",
    "pets are allowed",
    "pets are welcome",
    "bring your dog",
    "brought our dog",
    "brought my dog",
    "furkid",
    "fur kid",
    "pup cup",
    "puppuccino",
    "dog menu",
    "water bowl",
];

/// Checked before the positive list, so "not dog friendly" never counts as a yes.
pub const NEGATIVE_KEYWORDS: &[&str] = &[
    "no dogs",
    "no pets",
    "dogs not allowed",
    "pets not allowed",
    "dogs are not allowed",
    "pets are not allowed",
    "not dog friendly",
    "not dog-friendly",
    "not pet friendly",
    "not pet-friendly",
];

pub const BY_CATEGORY: &str = "category";
pub const BY_REVIEWS: &str = "reviews";
pub const BY_WEBSITE: &str = "website";

#[derive(Debug, Clone, PartialEq)]
pub struct Verdict {
    pub status: VerificationStatus,
    pub verified_by: Option<&'static str>,
    pub evidence: Option<String>,
}

impl Verdict {
    fn needs_check(evidence: Option<String>) -> Self {
        Self {
            status: VerificationStatus::NeedsCheck,
            verified_by: None,
            evidence,
        }
    }

    fn verified(by: &'static str, evidence: String) -> Self {
        Self {
            status: VerificationStatus::Verified,
            verified_by: Some(by),
            evidence: Some(evidence),
        }
    }
}

/// First keyword (in list order) that occurs in `text`.
pub fn find_keyword(text: &str, keywords: &[&'static str]) -> Option<&'static str> {
    let lower = text.to_lowercase();
    keywords.iter().copied().find(|kw| lower.contains(kw))
}

/// The record's category disagrees with what its Google types point to.
pub fn category_mismatch(category: Category, types: &[String]) -> Option<Category> {
    let own = expected_types(category);
    if types.iter().any(|t| own.contains(&t.as_str())) {
        return None;
    }
    category_for_types(types).filter(|other| *other != category)
}

/// Review text and editorial summary joined for matching.
fn corpus(details: &PlaceDetails) -> String {
    let mut parts: Vec<&str> = details.reviews.iter().map(|r| r.text.as_str()).collect();
    if let Some(overview) = details.editorial_summary.as_ref().and_then(|s| s.overview.as_deref()) {
        parts.push(overview);
    }
    parts.join("\n")
}

/// Verdict from the Places data alone.
pub fn decide(category: Category, details: &PlaceDetails, types: &[String]) -> Verdict {
    let text = corpus(details);

    if let Some(kw) = find_keyword(&text, NEGATIVE_KEYWORDS) {
        return Verdict::needs_check(Some(format!("reviews mention \"{kw}\"")));
    }
    if let Some(other) = category_mismatch(category, types) {
        return Verdict::needs_check(Some(format!("types suggest {other}, listed as {category}")));
    }
    if category.is_pet_service() {
        return Verdict::verified(BY_CATEGORY, format!("{category} serves pets"));
    }
    if let Some(kw) = find_keyword(&text, POSITIVE_KEYWORDS) {
        return Verdict::verified(BY_REVIEWS, format!("reviews mention \"{kw}\""));
    }
    Verdict::needs_check(None)
}

/// Copy the descriptive fields from Place Details onto the record.
pub fn apply_details(record: &mut PlaceRecord, details: &PlaceDetails) {
    if !details.types.is_empty() {
        record.types = details.types.clone();
    }
    record.rating = details.rating.or(record.rating);
    record.review_count = details.user_ratings_total.or(record.review_count);
    record.website = details.website.clone().or(record.website.take());
    record.phone = details
        .formatted_phone_number
        .clone()
        .or(record.phone.take());
    if let Some(hours) = details.opening_hours.as_ref().filter(|h| !h.weekday_text.is_empty()) {
        record.hours = Some(hours.weekday_text.join("; "));
    }
    if let Some(level) = details.price_level {
        record.price_range = Some(price_range(level));
    }
    if let Some(summary) = details.editorial_summary.as_ref().and_then(|s| s.overview.clone()) {
        record.summary = Some(summary);
    }
}

fn price_range(level: u8) -> String {
    match level {
        0 => "Free".to_string(),
        n => "$".repeat(n.min(4) as usize),
    }
}

pub struct Verifier<'a> {
    pub api: &'a dyn PlacesApi,
    /// Set to scan websites when the Places data is inconclusive.
    pub pages: Option<&'a dyn PageFetcher>,
}

impl Verifier<'_> {
    pub fn verify_record(&self, mut record: PlaceRecord) -> Outcome<PlaceRecord> {
        if record.has_error() {
            return Outcome::Done(record);
        }
        let Some(category) = record.category else {
            return Outcome::Failed {
                record,
                reason: "record has no category; run classify first".into(),
            };
        };

        let details = match self.api.details(&record.id) {
            Ok(details) => details,
            Err(e) => {
                return Outcome::Failed {
                    record,
                    reason: e.to_string(),
                }
            }
        };

        apply_details(&mut record, &details);
        let mut verdict = decide(category, &details, &record.types);

        if verdict.status == VerificationStatus::NeedsCheck && verdict.evidence.is_none() {
            if let (Some(pages), Some(site)) = (self.pages, record.website.clone()) {
                if let Some(found) = self.check_website(pages, &site) {
                    verdict = found;
                }
            }
        }

        debug!("verdict for {}: {:?}", record.name, verdict);
        record.verification_status = Some(verdict.status);
        record.verified_by = verdict.verified_by.map(str::to_string);
        record.evidence = verdict.evidence;
        Outcome::Done(record)
    }

    /// A website problem is not a record failure; the record stays unverified.
    fn check_website(&self, pages: &dyn PageFetcher, url: &str) -> Option<Verdict> {
        let html = match pages.fetch_page(url) {
            Ok(html) => html,
            Err(e) => {
                warn!("⚠️ website check failed for {url}: {e}");
                return None;
            }
        };
        let text = match visible_text(&html) {
            Ok(text) => text,
            Err(e) => {
                warn!("⚠️ could not read {url}: {e}");
                return None;
            }
        };

        if let Some(kw) = find_keyword(&text, NEGATIVE_KEYWORDS) {
            return Some(Verdict::needs_check(Some(format!("website mentions \"{kw}\""))));
        }
        find_keyword(&text, POSITIVE_KEYWORDS)
            .map(|kw| Verdict::verified(BY_WEBSITE, format!("website mentions \"{kw}\"")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enrich::fetch::tests::FakePlaces;
    use crate::enrich::models::{EditorialSummary, OpeningHours, Review};
    use crate::enrich::EnrichError;
    use std::collections::HashMap;

    fn details(reviews: &[&str], types: &[&str]) -> PlaceDetails {
        PlaceDetails {
            types: types.iter().map(|t| t.to_string()).collect(),
            reviews: reviews
                .iter()
                .map(|t| Review {
                    text: t.to_string(),
                })
                .collect(),
            ..PlaceDetails::default()
        }
    }

    fn types(list: &[&str]) -> Vec<String> {
        list.iter().map(|t| t.to_string()).collect()
    }

    fn classified(id: &str, category: Category) -> PlaceRecord {
        PlaceRecord {
            id: id.into(),
            name: format!("Place {id}"),
            category: Some(category),
            ..PlaceRecord::default()
        }
    }

    struct FakePages(HashMap<String, String>);

    impl PageFetcher for FakePages {
        fn fetch_page(&self, url: &str) -> Result<String, EnrichError> {
            self.0
                .get(url)
                .cloned()
                .ok_or_else(|| EnrichError::Network(format!("{url} unreachable")))
        }
    }

    #[test]
    fn review_keyword_verifies_a_cafe() {
        let d = details(&["Great coffee, and they are DOG-FRIENDLY!"], &["cafe"]);
        let v = decide(Category::Cafe, &d, &d.types);
        assert_eq!(v.status, VerificationStatus::Verified);
        assert_eq!(v.verified_by, Some(BY_REVIEWS));
        assert_eq!(v.evidence.as_deref(), Some("reviews mention \"dog-friendly\""));
    }

    #[test]
    fn negative_phrase_wins_over_positive() {
        let d = details(&["Sadly not dog friendly anymore"], &["cafe"]);
        let v = decide(Category::Cafe, &d, &d.types);
        assert_eq!(v.status, VerificationStatus::NeedsCheck);
        assert_eq!(v.evidence.as_deref(), Some("reviews mention \"not dog friendly\""));
    }

    #[test]
    fn pet_services_are_verified_by_category() {
        let d = details(&[], &["veterinary_care"]);
        let v = decide(Category::Vet, &d, &d.types);
        assert_eq!(v.verified_by, Some(BY_CATEGORY));

        // Groomers have no distinguishing Google type.
        let d = details(&[], &["point_of_interest"]);
        assert_eq!(
            decide(Category::Groomer, &d, &d.types).status,
            VerificationStatus::Verified
        );
    }

    #[test]
    fn category_mismatch_needs_check() {
        assert_eq!(
            category_mismatch(Category::Park, &types(&["restaurant", "food"])),
            Some(Category::Cafe)
        );
        assert_eq!(category_mismatch(Category::Park, &types(&["park", "cafe"])), None);
        assert_eq!(category_mismatch(Category::Park, &types(&["establishment"])), None);

        let d = details(&["dog friendly!"], &["lodging"]);
        let v = decide(Category::Cafe, &d, &d.types);
        assert_eq!(v.status, VerificationStatus::NeedsCheck);
        assert!(v.evidence.unwrap().contains("types suggest hotel"));
    }

    #[test]
    fn details_fill_descriptive_fields() {
        let mut record = classified("a", Category::Cafe);
        record.website = Some("https://old.example".into());
        let d = PlaceDetails {
            rating: Some(4.6),
            user_ratings_total: Some(321),
            formatted_phone_number: Some("6123 4567".into()),
            opening_hours: Some(OpeningHours {
                weekday_text: vec!["Monday: 9 AM – 5 PM".into(), "Tuesday: Closed".into()],
            }),
            price_level: Some(2),
            editorial_summary: Some(EditorialSummary {
                overview: Some("Cosy neighbourhood cafe.".into()),
            }),
            ..PlaceDetails::default()
        };

        apply_details(&mut record, &d);
        assert_eq!(record.rating, Some(4.6));
        assert_eq!(record.review_count, Some(321));
        assert_eq!(record.website.as_deref(), Some("https://old.example"));
        assert_eq!(record.phone.as_deref(), Some("6123 4567"));
        assert_eq!(
            record.hours.as_deref(),
            Some("Monday: 9 AM – 5 PM; Tuesday: Closed")
        );
        assert_eq!(record.price_range.as_deref(), Some("$$"));
        assert_eq!(record.summary.as_deref(), Some("Cosy neighbourhood cafe."));
    }

    #[test]
    fn details_failure_fails_only_that_record() {
        let mut api = FakePlaces::default();
        api.details.insert("ok".into(), details(&["pet friendly staff"], &["cafe"]));
        let verifier = Verifier {
            api: &api,
            pages: None,
        };

        match verifier.verify_record(classified("missing", Category::Cafe)) {
            Outcome::Failed { reason, .. } => assert!(reason.contains("timeout")),
            other => panic!("expected failure, got {other:?}"),
        }
        match verifier.verify_record(classified("ok", Category::Cafe)) {
            Outcome::Done(r) => {
                assert_eq!(r.verification_status, Some(VerificationStatus::Verified));
                assert_eq!(r.verified_by.as_deref(), Some(BY_REVIEWS));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn website_check_runs_only_when_places_data_is_inconclusive() {
        let mut api = FakePlaces::default();
        let mut quiet = details(&["Nice food"], &["cafe"]);
        quiet.website = Some("https://quiet.example".into());
        api.details.insert("quiet".into(), quiet);
        let mut down = details(&["Nice food"], &["cafe"]);
        down.website = Some("https://down.example".into());
        api.details.insert("down".into(), down);

        let pages = FakePages(HashMap::from([(
            "https://quiet.example".to_string(),
            "<html><body><p>Well-behaved dogs are welcome on our patio.</p></body></html>"
                .to_string(),
        )]));
        let verifier = Verifier {
            api: &api,
            pages: Some(&pages),
        };

        match verifier.verify_record(classified("quiet", Category::Cafe)) {
            Outcome::Done(r) => {
                assert_eq!(r.verified_by.as_deref(), Some(BY_WEBSITE));
                assert_eq!(r.evidence.as_deref(), Some("website mentions \"dogs are welcome\""));
            }
            other => panic!("unexpected {other:?}"),
        }
        match verifier.verify_record(classified("down", Category::Cafe)) {
            Outcome::Done(r) => {
                assert_eq!(r.verification_status, Some(VerificationStatus::NeedsCheck));
                assert!(r.error.is_none());
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
