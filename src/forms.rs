// src/forms.rs
use crate::domain::coerce::parse_number;
use crate::errors::ServerError;
use astra::Request;
use std::collections::HashMap;
use std::io::Read;
use url::form_urlencoded;

/// Decoded `application/x-www-form-urlencoded` pairs (or query string).
#[derive(Debug, Default, Clone)]
pub struct FormData {
    fields: HashMap<String, String>,
}

impl FormData {
    pub fn parse(raw: &[u8]) -> Self {
        let fields = form_urlencoded::parse(raw).into_owned().collect();
        Self { fields }
    }

    pub fn from_query(req: &Request) -> Self {
        Self::parse(req.uri().query().unwrap_or("").as_bytes())
    }

    pub fn from_body(req: &mut Request) -> Result<Self, ServerError> {
        let mut raw = Vec::new();
        req.body_mut()
            .reader()
            .read_to_end(&mut raw)
            .map_err(|e| ServerError::BadRequest(format!("Unreadable form body: {e}")))?;
        Ok(Self::parse(&raw))
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// Trimmed text, empty when missing.
    pub fn text(&self, key: &str) -> String {
        self.get(key).unwrap_or("").trim().to_string()
    }

    /// Numeric field; blank or non-numeric input is 0.
    pub fn number(&self, key: &str) -> f64 {
        parse_number(self.get(key).unwrap_or(""))
    }

    /// Numeric field that keeps "absent or blank" distinct from 0.
    pub fn number_opt(&self, key: &str) -> Option<f64> {
        self.get(key)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(parse_number)
    }

    /// Checkboxes are only submitted when checked.
    pub fn checked(&self, key: &str) -> bool {
        matches!(self.get(key), Some(v) if v != "false" && v != "0")
    }

    pub fn require(&self, key: &str) -> Result<String, ServerError> {
        let v = self.text(key);
        if v.is_empty() {
            return Err(ServerError::BadRequest(format!("missing field '{key}'")));
        }
        Ok(v)
    }
}
