use crate::errors::ServerError;
use crate::responses::ResultResp;
use astra::{Body, ResponseBuilder};

const APP_JS: &str = include_str!("../../static/app.js");
const MAIN_CSS: &str = include_str!("../../static/main.css");

/// Assets compiled into the binary, looked up by file name.
pub fn static_asset(name: &str) -> ResultResp {
    let (body, content_type) = match name {
        "app.js" => (APP_JS, mime::APPLICATION_JAVASCRIPT_UTF_8),
        "main.css" => (MAIN_CSS, mime::TEXT_CSS_UTF_8),
        _ => return Err(ServerError::NotFound),
    };

    ResponseBuilder::new()
        .status(200)
        .header("Content-Type", content_type.as_ref())
        .header("Cache-Control", "public, max-age=3600")
        .body(Body::from(body))
        .map_err(|_| ServerError::InternalError)
}
