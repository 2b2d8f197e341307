use crate::errors::{ResultResp, ServerError};
use astra::{Body, ResponseBuilder};

pub fn csv_response(text: String, filename: &str) -> ResultResp {
    ResponseBuilder::new()
        .status(200)
        .header("Content-Type", "text/csv; charset=utf-8")
        .header(
            "Content-Disposition",
            format!("attachment; filename=\"{filename}\""),
        )
        .body(Body::from(text))
        .map_err(|_| ServerError::InternalError)
}
