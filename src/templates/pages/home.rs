// templates/pages/home.rs

use crate::map::MapConfig;
use crate::shell::{ShellState, ShellView};
use crate::templates::{
    components::{controls_form, map_panel, results_list},
    desktop_layout,
};
use maud::{html, Markup};

pub fn home_page(state: &ShellState, view: &ShellView<'_>, map: &MapConfig) -> Markup {
    desktop_layout(
        "Map",
        map.is_available(),
        html! {
            main class="home" {
                aside class="sidebar" {
                    h1 { "Find dog-friendly places" }
                    (controls_form(state))
                    section id="results" aria-live="polite" {
                        (results_list(state, &view.results, &view.features))
                    }
                }
                section class="map-wrap" {
                    (map_panel(map))
                }
            }
        },
    )
}
