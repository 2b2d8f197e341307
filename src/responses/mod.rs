pub mod csv;
pub mod html;
pub mod xlsx;

pub use csv::csv_response;
pub use html::{html_response, redirect};
pub use xlsx::xlsx_response;
