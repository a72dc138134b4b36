pub mod assets;
pub mod html;
pub mod json;
pub mod redirect;
pub mod xlsx;

pub use crate::errors::ResultResp;

// Normal HTML response
pub use assets::static_asset;
pub use html::html_response;
pub use json::json_response;
pub use redirect::redirect_permanent;
pub use xlsx::xlsx_response;
