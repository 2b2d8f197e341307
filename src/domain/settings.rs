// src/domain/settings.rs

use crate::domain::coerce;
use crate::domain::logic::clamp;
use crate::forms::FormData;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const DEFAULT_COMPANY: &str = "MB Property Solutions";
pub const DEFAULT_PERCENT: f64 = 0.70;
pub const DEFAULT_FEE: f64 = 10_000.0;
pub const DEFAULT_OFFERS: i64 = 10;

/// Installation-wide settings. Fields missing from a stored document fall
/// back to their defaults; keys this build does not know survive a
/// load/save cycle through `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    #[serde(deserialize_with = "coerce::string")]
    pub zips: String,
    /// Fraction of ARV, 0..=1.
    #[serde(deserialize_with = "coerce::number")]
    pub percent: f64,
    #[serde(deserialize_with = "coerce::number")]
    pub fee: f64,
    /// Target number of offers.
    #[serde(deserialize_with = "coerce::integer")]
    pub offers: i64,
    #[serde(deserialize_with = "coerce::string")]
    pub company: String,
    #[serde(deserialize_with = "coerce::string")]
    pub sender: String,
    #[serde(deserialize_with = "coerce::string")]
    pub reply_email: String,
    #[serde(deserialize_with = "coerce::string")]
    pub phone: String,
    #[serde(deserialize_with = "coerce::boolean")]
    pub zip_filter: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            zips: String::new(),
            percent: DEFAULT_PERCENT,
            fee: DEFAULT_FEE,
            offers: DEFAULT_OFFERS,
            company: DEFAULT_COMPANY.to_string(),
            sender: String::new(),
            reply_email: String::new(),
            phone: String::new(),
            zip_filter: true,
            extra: Map::new(),
        }
    }
}

impl Settings {
    /// Apply a settings form submit. Out-of-range or zero values fall back
    /// to the defaults rather than rejecting the submit.
    pub fn apply_form(&mut self, form: &FormData) {
        self.zips = form.text("zips");

        let percent = clamp(form.number_opt("percent").unwrap_or(DEFAULT_PERCENT), 0.0, 1.0);
        self.percent = if percent == 0.0 { DEFAULT_PERCENT } else { percent };

        let fee = form.number_opt("fee").unwrap_or(DEFAULT_FEE);
        self.fee = if fee == 0.0 { DEFAULT_FEE } else { fee };

        let offers = form.number_opt("offers").unwrap_or(0.0).trunc() as i64;
        self.offers = if offers == 0 { DEFAULT_OFFERS } else { offers };

        let company = form.text("company");
        self.company = if company.is_empty() {
            DEFAULT_COMPANY.to_string()
        } else {
            company
        };

        self.sender = form.text("sender");
        self.reply_email = form.text("replyEmail");
        self.phone = form.text("phone");
        self.zip_filter = form.checked("zipFilter");
    }

    /// Percent as shown to users, e.g. `70`.
    pub fn percent_label(&self) -> String {
        format!("{:.0}", self.percent * 100.0)
    }
}
