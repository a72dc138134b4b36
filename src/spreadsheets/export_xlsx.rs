use crate::domain::RankedListing;
use crate::errors::ServerError;
use crate::responses::xlsx_response;
use crate::responses::ResultResp;
use chrono::Local;
use rust_xlsxwriter::{Format, Workbook, XlsxError};

const HEADERS: [&str; 14] = [
    "Name",
    "Category",
    "Address",
    "Latitude",
    "Longitude",
    "Distance (km)",
    "Rating",
    "Reviews",
    "Verification",
    "Phone",
    "Website",
    "Hours",
    "Pet Policy",
    "Link",
];

fn xlsx_err(what: &str) -> impl Fn(XlsxError) -> ServerError + '_ {
    move |e| ServerError::XlsxError(format!("Failed to write {what}: {e}"))
}

/// Build the workbook for a filtered view, one row per ranked listing.
pub fn listings_workbook(listings: &[RankedListing<'_>]) -> Result<Vec<u8>, ServerError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    let bold = Format::new().set_bold();

    for (col, header) in HEADERS.iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, *header, &bold)
            .map_err(xlsx_err(header))?;
    }

    for (i, ranked) in listings.iter().enumerate() {
        let r = (i + 1) as u32;
        let l = ranked.listing;

        worksheet.write_string(r, 0, &l.name).map_err(xlsx_err("name"))?;
        worksheet
            .write_string(r, 1, l.category.as_str())
            .map_err(xlsx_err("category"))?;
        worksheet
            .write_string(r, 2, &l.address)
            .map_err(xlsx_err("address"))?;
        worksheet
            .write_number(r, 3, l.coordinates.lat)
            .map_err(xlsx_err("latitude"))?;
        worksheet
            .write_number(r, 4, l.coordinates.lng)
            .map_err(xlsx_err("longitude"))?;

        if let Some(d) = ranked.distance_km {
            worksheet
                .write_number(r, 5, (d * 100.0).round() / 100.0)
                .map_err(xlsx_err("distance"))?;
        }
        if let Some(rating) = l.rating {
            worksheet
                .write_number(r, 6, rating)
                .map_err(xlsx_err("rating"))?;
        }
        if let Some(count) = l.review_count {
            worksheet
                .write_number(r, 7, count as f64)
                .map_err(xlsx_err("review count"))?;
        }

        let verification = l.verification_status.map(|s| s.as_str()).unwrap_or("");
        worksheet
            .write_string(r, 8, verification)
            .map_err(xlsx_err("verification"))?;

        let optional = [&l.phone, &l.website, &l.hours, &l.pet_policy];
        for (offset, value) in optional.into_iter().enumerate() {
            worksheet
                .write_string(r, 9 + offset as u16, value.as_deref().unwrap_or(""))
                .map_err(xlsx_err(HEADERS[9 + offset]))?;
        }

        worksheet
            .write_string(r, 13, l.detail_url())
            .map_err(xlsx_err("link"))?;
    }

    worksheet.autofit();

    workbook
        .save_to_buffer()
        .map_err(|e| ServerError::XlsxError(format!("Failed to save workbook: {}", e)))
}

pub fn export_listings_xlsx(listings: &[RankedListing<'_>]) -> ResultResp {
    let buffer = listings_workbook(listings)?;
    let filename = format!("dog_friendly_places_{}.xlsx", Local::now().format("%Y%m%d"));
    xlsx_response(buffer, &filename)
}
