pub mod csv;
pub mod xlsx;

pub use csv::to_csv;
pub use xlsx::leads_workbook;
