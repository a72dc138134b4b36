use crate::map::MapConfig;
use maud::{html, Markup};

pub fn map_panel(config: &MapConfig) -> Markup {
    html! {
        @match &config.access_token {
            Some(token) => {
                div
                    id="map"
                    class="map"
                    data-token=(token)
                    data-config=(serde_json::to_string(config).unwrap_or_default())
                {}
            }
            None => {
                div class="map map-unavailable" role="status" {
                    p { strong { "Map unavailable." } }
                    p { "No map access token is configured (set MAPBOX_TOKEN). The list of places still works." }
                }
            }
        }
    }
}
