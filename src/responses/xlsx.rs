use crate::errors::ServerError;
use crate::responses::ResultResp;
use astra::{Body, ResponseBuilder};

const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Serves a generated workbook as a download named `filename`.
///
/// The export reflects the filters in the URL, so it is never cached.
pub fn xlsx_response(workbook: Vec<u8>, filename: &str) -> ResultResp {
    // Quotes and path separators would break the header or the saved name.
    let filename: String = filename
        .chars()
        .map(|c| if matches!(c, '"' | '/' | '\\') { '_' } else { c })
        .collect();

    ResponseBuilder::new()
        .status(200)
        .header("Content-Type", XLSX_MIME)
        .header(
            "Content-Disposition",
            format!("attachment; filename=\"{filename}\""),
        )
        .header("Cache-Control", "no-store")
        .body(Body::from(workbook))
        .map_err(|_| ServerError::InternalError)
}
