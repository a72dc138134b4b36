use crate::errors::ServerError;
use crate::map::{resolve_event, MapConfig, MapEvent};
use crate::responses::{
    html_response, json_response, redirect_permanent, static_asset, ResultResp,
};
use crate::shell::ShellState;
use crate::spreadsheets::export_listings_xlsx;
use crate::store::ListingStore;
use crate::templates;
use astra::Request;
use serde::Serialize;
use std::io::Read;
use tracing::debug;

const MAX_EVENT_BODY: u64 = 16 * 1024;

/// Everything a request handler can read. Immutable after startup.
pub struct App {
    pub store: ListingStore,
    pub map: MapConfig,
}

#[derive(Serialize)]
struct PlacesPayload<'a, T: Serialize> {
    count: usize,
    results: &'a [T],
}

pub fn handle(mut req: Request, app: &App) -> ResultResp {
    let method = req.method().as_str().to_string();
    let path = req.uri().path().to_string();
    let query = req.uri().query().map(str::to_string);

    debug!("{method} {path}");

    match (method.as_str(), path.as_str()) {
        ("GET", "/") => {
            let state = ShellState::from_query(query.as_deref());
            let view = state.view(app.store.all());
            html_response(templates::pages::home_page(&state, &view, &app.map))
        }

        // htmx target: re-rendered whenever a control changes.
        ("GET", "/places") => {
            let state = ShellState::from_query(query.as_deref());
            let view = state.view(app.store.all());
            html_response(templates::components::results_list(
                &state,
                &view.results,
                &view.features,
            ))
        }

        ("GET", "/api/places") => {
            let state = ShellState::from_query(query.as_deref());
            let view = state.view(app.store.all());
            json_response(&PlacesPayload {
                count: view.results.len(),
                results: view.results.as_slice(),
            })
        }

        ("GET", "/api/places.geojson") => {
            let state = ShellState::from_query(query.as_deref());
            json_response(&state.view(app.store.all()).features)
        }

        ("POST", "/api/map/events") => {
            let mut body = String::new();
            req.body_mut()
                .reader()
                .take(MAX_EVENT_BODY)
                .read_to_string(&mut body)
                .map_err(|e| ServerError::BadRequest(format!("unreadable body: {e}")))?;

            let event: MapEvent = serde_json::from_str(&body)
                .map_err(|e| ServerError::BadRequest(format!("invalid map event: {e}")))?;

            let action = resolve_event(&app.map, event, |slug, id| {
                app.store.by_slug(slug).or_else(|| app.store.by_id(id))
            });
            json_response(&action)
        }

        ("GET", "/export.xlsx") => {
            let state = ShellState::from_query(query.as_deref());
            let view = state.view(app.store.all());
            export_listings_xlsx(&view.results)
        }

        ("GET", p) if p.starts_with("/place/") => {
            let slug = &p["/place/".len()..];
            let listing = app.store.by_slug(slug).ok_or(ServerError::NotFound)?;
            html_response(templates::pages::detail_page(listing))
        }

        // Old links used the place id; the slug route is canonical.
        ("GET", p) if p.starts_with("/listing/") => {
            let id = &p["/listing/".len()..];
            let listing = app.store.by_id(id).ok_or(ServerError::NotFound)?;
            redirect_permanent(&listing.detail_url())
        }

        ("GET", p) if p.starts_with("/static/") => static_asset(&p["/static/".len()..]),

        _ => Err(ServerError::NotFound),
    }
}
