pub mod buyers;
pub mod calculator;
pub mod compose;
pub mod dashboard;
pub mod leads;
pub mod market;
pub mod pipeline;
pub mod settings;

pub use buyers::{buyers_page, BuyersVm};
pub use calculator::{calculator_page, CalculatorVm};
pub use compose::{compose_page, ComposeVm};
pub use dashboard::{dashboard_page, DashboardVm};
pub use leads::{leads_page, LeadsVm};
pub use market::{market_page, MarketVm};
pub use pipeline::{pipeline_page, PipelineVm};
pub use settings::settings_page;
