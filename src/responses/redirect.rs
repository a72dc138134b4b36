use crate::errors::ServerError;
use crate::responses::ResultResp;
use astra::{Body, ResponseBuilder};

/// 301 to the canonical location.
pub fn redirect_permanent(location: &str) -> ResultResp {
    ResponseBuilder::new()
        .status(301)
        .header("Location", location)
        .body(Body::empty())
        .map_err(|_| ServerError::InternalError)
}
