use crate::domain::Category;
use crate::shell::{format_radius, ShellState, LOCATE_TIMEOUT_MS, RADIUS_MAX_KM, RADIUS_MIN_KM};
use maud::{html, Markup};

/// Filter controls. Any change re-requests `/places` through htmx.
pub fn controls_form(state: &ShellState) -> Markup {
    let point = state.reference_point;

    html! {
        form
            id="controls"
            class="controls"
            method="get"
            action="/"
            hx-get="/places"
            hx-target="#results"
            hx-swap="innerHTML"
            hx-trigger="change, search, keyup changed delay:300ms from:#search"
        {
            input type="hidden" name="f" value="1";
            input type="hidden" name="lat" id="lat" value=[point.map(|p| p.lat)];
            input type="hidden" name="lng" id="lng" value=[point.map(|p| p.lng)];
            input type="hidden" name="geo_err" id="geo_err" value="";

            label class="sr-only" for="search" { "Search by name or address" }
            input
                type="search"
                id="search"
                name="q"
                placeholder="Search by name or address"
                value=(state.search)
                autocomplete="off";

            fieldset class="categories" {
                legend { "Show" }
                @for category in Category::ALL {
                    label class="toggle" style=(format!("--chip: {}", category.color())) {
                        input
                            type="checkbox"
                            name="cat"
                            value=(category.as_str())
                            checked[state.categories.contains(&category)];
                        span { (category.label()) }
                    }
                }
            }

            div class="radius" {
                label for="radius" {
                    "Within "
                    output id="radius-value" for="radius" { (format_radius(state.radius_km)) }
                    " km"
                }
                input
                    type="range"
                    id="radius"
                    name="radius"
                    min=(RADIUS_MIN_KM)
                    max=(RADIUS_MAX_KM)
                    step="1"
                    value=(format_radius(state.radius_km))
                    disabled[point.is_none()];
                @if point.is_none() {
                    p class="hint" { "Use your location to filter by distance." }
                }
            }

            button
                type="button"
                id="locate-btn"
                class="primary"
                data-timeout=(LOCATE_TIMEOUT_MS)
            {
                @if point.is_some() { "📍 Update my location" } @else { "📍 Use my location" }
            }

            noscript {
                button type="submit" { "Apply filters" }
            }
        }
    }
}
