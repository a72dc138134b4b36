use crate::domain::{Listing, RankedListing, VerificationStatus};
use maud::{html, Markup};

pub mod controls;
pub mod error;
pub mod listing_card;
pub mod map_panel;

pub use controls::controls_form;
pub use error::html_error_response;
pub use listing_card::results_list;
pub use map_panel::map_panel;

pub fn verification_badge(listing: &Listing) -> Markup {
    html! {
        @match listing.verification_status {
            Some(VerificationStatus::Verified) => {
                span class="badge badge-verified" title=(verified_title(listing)) { "✓ Verified" }
            }
            Some(VerificationStatus::NeedsCheck) => {
                span class="badge badge-check" title="Pet policy not confirmed yet" { "Call ahead" }
            }
            None => {}
        }
    }
}

fn verified_title(listing: &Listing) -> String {
    match listing.verified_by.as_deref() {
        Some(source) => format!("Dog-friendly, confirmed by {source}"),
        None => "Dog-friendly".to_string(),
    }
}

pub fn category_chip(listing: &Listing) -> Markup {
    html! {
        span class="chip" style=(format!("--chip: {}", listing.category.color())) {
            (listing.category.label())
        }
    }
}

pub fn rating(listing: &Listing) -> Markup {
    html! {
        @if let Some(r) = listing.rating {
            span class="rating" {
                "★ " (format!("{r:.1}"))
                @if let Some(n) = listing.review_count {
                    span class="muted" { " (" (n) ")" }
                }
            }
        }
    }
}

pub fn distance(ranked: &RankedListing<'_>) -> Markup {
    html! {
        @if let Some(d) = ranked.distance_km {
            span class="distance" {
                @if d < 1.0 {
                    (format!("{:.0} m", d * 1000.0))
                } @else {
                    (format!("{d:.1} km"))
                }
            }
        }
    }
}

/// Popup body shown when a marker is activated.
pub fn popup_html(ranked: &RankedListing<'_>) -> Markup {
    let l = ranked.listing;
    html! {
        div class="popup" {
            strong { (l.name) }
            div class="popup-meta" {
                (category_chip(l))
                (verification_badge(l))
            }
            p class="muted" { (l.address) }
            (rating(l))
            (distance(ranked))
            a href=(l.detail_url()) { "View details →" }
        }
    }
}
