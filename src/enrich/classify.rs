// classify.rs
//
// Keyword/type heuristics. These are literal matches and nothing more: a
// "Velvet Lounge" is not a vet because `vet` must be a whole word, but a
// "Park Avenue Hotel" with no useful types is a hotel only because hotel
// outranks park.

use crate::domain::Category;
use crate::enrich::Outcome;
use crate::enrich::models::{ClassifiedBy, PlaceRecord};

struct Rule {
    category: Category,
    types: &'static [&'static str],
    /// Single words match whole words; phrases match as substrings.
    keywords: &'static [&'static str],
}

/// Precedence order: the first matching rule wins.
const RULES: [Rule; 7] = [
    Rule {
        category: Category::Vet,
        types: &["veterinary_care"],
        keywords: &["vet", "vets", "veterinary", "animal clinic", "animal hospital", "animal medical"],
    },
    Rule {
        category: Category::Groomer,
        types: &[],
        keywords: &["groom", "groomer", "groomers", "grooming", "pet spa", "dog spa"],
    },
    Rule {
        category: Category::Supplies,
        types: &["pet_store"],
        keywords: &["pet shop", "pet store", "pet supplies", "pet mart", "petmart", "pet lovers"],
    },
    Rule {
        category: Category::Hotel,
        types: &["lodging"],
        keywords: &["hotel", "resort", "hostel", "inn", "staycation"],
    },
    Rule {
        category: Category::Mall,
        types: &["shopping_mall"],
        keywords: &["mall", "shopping centre", "shopping center", "plaza"],
    },
    Rule {
        category: Category::Park,
        types: &["park", "campground"],
        keywords: &["park", "dog run", "garden", "gardens", "reservoir", "beach", "trail"],
    },
    Rule {
        category: Category::Cafe,
        types: &["cafe", "restaurant", "bakery", "bar", "meal_takeaway"],
        keywords: &["cafe", "café", "coffee", "bistro", "restaurant", "kitchen", "bakery", "bar", "eatery"],
    },
];

/// Google types that hint strongly at one of our categories.
pub fn category_for_types(types: &[String]) -> Option<Category> {
    RULES
        .iter()
        .find(|rule| types.iter().any(|t| rule.types.contains(&t.as_str())))
        .map(|rule| rule.category)
}

pub fn category_for_name(name: &str) -> Option<Category> {
    let lower = name.to_lowercase();
    let words: Vec<&str> = lower
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect();

    RULES
        .iter()
        .find(|rule| {
            rule.keywords.iter().any(|kw| {
                if kw.contains(' ') {
                    lower.contains(kw)
                } else {
                    words.contains(kw)
                }
            })
        })
        .map(|rule| rule.category)
}

/// Types first, then name keywords, then the search plan's hint.
pub fn classify(record: &PlaceRecord) -> Option<(Category, ClassifiedBy)> {
    category_for_types(&record.types)
        .map(|c| (c, ClassifiedBy::Types))
        .or_else(|| category_for_name(&record.name).map(|c| (c, ClassifiedBy::Name)))
        .or_else(|| record.category_hint.map(|c| (c, ClassifiedBy::Hint)))
}

/// Google types that identify `category`.
pub fn expected_types(category: Category) -> &'static [&'static str] {
    RULES
        .iter()
        .find(|rule| rule.category == category)
        .map(|rule| rule.types)
        .unwrap_or(&[])
}

pub fn classify_record(mut record: PlaceRecord) -> Outcome<PlaceRecord> {
    if record.has_error() {
        // Already failed upstream; pass it through untouched.
        return Outcome::Done(record);
    }

    match classify(&record) {
        Some((category, by)) => {
            record.category = Some(category);
            record.classified_by = Some(by);
            Outcome::Done(record)
        }
        None => Outcome::Failed {
            record,
            reason: "no category matched and no hint".into(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(name: &str, types: &[&str], hint: Option<Category>) -> PlaceRecord {
        PlaceRecord {
            id: "x".into(),
            name: name.into(),
            types: types.iter().map(|t| t.to_string()).collect(),
            category_hint: hint,
            ..PlaceRecord::default()
        }
    }

    #[test]
    fn types_win_over_name_and_hint() {
        let r = rec("Sunny Park Cafe", &["cafe", "food"], Some(Category::Park));
        assert_eq!(classify(&r), Some((Category::Cafe, ClassifiedBy::Types)));
    }

    #[test]
    fn precedence_within_types() {
        // A vet clinic in a mall stays a vet.
        let r = rec("Clinic", &["shopping_mall", "veterinary_care"], None);
        assert_eq!(classify(&r), Some((Category::Vet, ClassifiedBy::Types)));
    }

    #[test]
    fn name_keywords_match_whole_words_and_phrases() {
        assert_eq!(category_for_name("Velvet Lounge"), None);
        assert_eq!(category_for_name("Mount Pleasant Vets"), Some(Category::Vet));
        assert_eq!(category_for_name("Happy Tails Grooming"), Some(Category::Groomer));
        assert_eq!(category_for_name("The Pet Lovers Centre"), Some(Category::Supplies));
        assert_eq!(category_for_name("Bishan Dog Run"), Some(Category::Park));
        assert_eq!(category_for_name("Park Avenue Hotel"), Some(Category::Hotel));
        assert_eq!(category_for_name("Café Melba"), Some(Category::Cafe));
    }

    #[test]
    fn falls_back_to_hint() {
        let r = rec("Wagging Tails", &["point_of_interest", "establishment"], Some(Category::Groomer));
        assert_eq!(classify(&r), Some((Category::Groomer, ClassifiedBy::Hint)));
    }

    #[test]
    fn unclassifiable_record_fails() {
        let r = rec("Wagging Tails", &["establishment"], None);
        match classify_record(r) {
            Outcome::Failed { reason, .. } => assert!(reason.contains("no category")),
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[test]
    fn errored_records_pass_through() {
        let mut r = rec("Broken", &["cafe"], None);
        r.error = Some("fetch failed".into());
        match classify_record(r) {
            Outcome::Done(r) => assert!(r.category.is_none()),
            other => panic!("unexpected {other:?}"),
        }
    }
}
