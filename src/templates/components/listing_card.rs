use crate::domain::{Category, RankedListing};
use crate::map::FeatureCollection;
use crate::shell::ShellState;
use crate::templates::components::{category_chip, distance, rating, verification_badge};
use maud::{html, Markup, PreEscaped};

pub fn listing_card(ranked: &RankedListing<'_>) -> Markup {
    let l = ranked.listing;
    html! {
        li class="listing-card" data-id=(l.id) data-lng=(l.coordinates.lng) data-lat=(l.coordinates.lat) {
            div class="listing-head" {
                a href=(l.detail_url()) class="listing-name" { (l.name) }
                (distance(ranked))
            }
            div class="listing-meta" {
                (category_chip(l))
                (verification_badge(l))
                (rating(l))
            }
            p class="muted" { (l.address) }
            @if let Some(note) = &l.note {
                p class="note" { (note) }
            }
        }
    }
}

/// The `#results` fragment: status line, location message, list, and the map
/// features for exactly the same listings.
pub fn results_list(
    state: &ShellState,
    results: &[RankedListing<'_>],
    features: &FeatureCollection,
) -> Markup {
    // `</` would close the script element early.
    let features_json = serde_json::to_string(features)
        .unwrap_or_else(|_| r#"{"type":"FeatureCollection","features":[]}"#.to_string())
        .replace("</", "<\\/");

    let query = state.to_query();

    html! {
        @if let Some(err) = state.location_error() {
            div class="alert" role="alert" id="geo-alert" {
                span { (err) }
                a
                    class="dismiss"
                    aria-label="Dismiss"
                    href=(format!("/?{query}&dismiss_geo=1"))
                    hx-get=(format!("/places?{query}&dismiss_geo=1"))
                    hx-target="#results"
                    data-dismiss="geo-alert"
                { "×" }
            }
        }

        p class="result-count" {
            strong { (results.len()) }
            @if results.len() == 1 { " place" } @else { " places" }
            @if state.reference_point.is_some() {
                " within " (crate::shell::format_radius(state.radius_km)) " km"
            }
            @if !results.is_empty() {
                " · "
                a href=(format!("/export.xlsx?{query}")) { "Download these results" }
            }
        }

        @if results.is_empty() {
            p class="empty" { "No places match these filters." }
            @if state.categories.len() < Category::ALL.len() {
                p class="suggest" {
                    "Also show: "
                    @for category in Category::ALL.into_iter().filter(|c| !state.categories.contains(c)) {
                        a class="chip" style=(format!("--chip: {}", category.color()))
                            href=(format!("/?{query}&toggle={}", category.as_str()))
                        { (category.label()) }
                        " "
                    }
                }
            }
        } @else {
            ul class="listing-list" {
                @for ranked in results {
                    (listing_card(ranked))
                }
            }
        }

        script type="application/json" id="map-features" { (PreEscaped(features_json)) }
    }
}
