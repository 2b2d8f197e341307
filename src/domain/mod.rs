pub mod buyer;
pub mod coerce;
pub mod lead;
pub mod logic;
pub mod settings;
pub mod tasks;

pub use buyer::Buyer;
pub use lead::{Lead, LEAD_STATUSES};
pub use logic::{compute_mao, money, new_record_id, now_millis};
pub use settings::Settings;
pub use tasks::{TaskBoard, DAY_TASKS};
