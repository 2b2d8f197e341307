// src/store/document.rs

use crate::domain::coerce;
use crate::domain::{Buyer, Lead, Settings, TaskBoard};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Everything the dashboard persists, as one JSON value.
///
/// Deserializing applies the defaulting step: settings fields missing from
/// the stored copy take their defaults, and absent or `null` collections
/// become empty. A single unreadable lead or buyer is dropped on its own
/// rather than failing the document. Unknown top-level keys are carried along untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Document {
    #[serde(deserialize_with = "coerce::null_default")]
    pub settings: Settings,
    #[serde(deserialize_with = "coerce::records")]
    pub leads: Vec<Lead>,
    #[serde(deserialize_with = "coerce::records")]
    pub buyers: Vec<Buyer>,
    #[serde(deserialize_with = "coerce::tasks")]
    pub tasks: TaskBoard,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Document {
    /// Parse a stored document. Anything that does not parse as a document
    /// object yields `None`; callers fall back to `Document::default()`.
    pub fn parse(raw: &str) -> Option<Self> {
        match serde_json::from_str::<Value>(raw) {
            Ok(value @ Value::Object(_)) => serde_json::from_value(value).ok(),
            _ => None,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::settings::{DEFAULT_COMPANY, DEFAULT_PERCENT};
    use serde_json::json;

    #[test]
    fn garbage_and_non_objects_do_not_parse() {
        assert!(Document::parse("{not json").is_none());
        assert!(Document::parse("null").is_none());
        assert!(Document::parse("[1,2]").is_none());
        assert!(Document::parse("42").is_none());
    }

    #[test]
    fn missing_containers_default_to_empty() {
        let doc = Document::parse(r#"{ "settings": { "sender": "Pat" }, "leads": null }"#).unwrap();
        assert!(doc.leads.is_empty());
        assert!(doc.buyers.is_empty());
        assert!(doc.tasks.is_empty());
        assert_eq!(doc.settings.sender, "Pat");
        assert_eq!(doc.settings.company, DEFAULT_COMPANY);
        assert_eq!(doc.settings.percent, DEFAULT_PERCENT);
    }

    #[test]
    fn bad_elements_do_not_sink_the_document() {
        let doc = Document::parse(
            &json!({
                "settings": { "company": "Keep Co" },
                "leads": [
                    { "id": "a", "address": "1 Keep St", "cl": [] },
                    null,
                    "junk",
                    { "id": "b", "address": "2 Keep St" }
                ],
                "buyers": [{ "id": "x", "email": "x@keep.test" }, null]
            })
            .to_string(),
        )
        .unwrap();
        assert_eq!(doc.settings.company, "Keep Co");
        let ids: Vec<&str> = doc.leads.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert!(doc.leads[0].checklist.is_empty());
        assert_eq!(doc.buyers.len(), 1);
    }

    #[test]
    fn sparse_task_arrays_read_as_false() {
        let doc = Document::parse(r#"{ "tasks": { "3": [null, null, true], "x": [true] } }"#).unwrap();
        assert_eq!(doc.tasks.get(&3), Some(&vec![false, false, true]));
        assert_eq!(doc.tasks.len(), 1);
    }

    #[test]
    fn defaulting_is_idempotent() {
        let raw = json!({
            "settings": { "percent": 0.65, "oldFlag": 1 },
            "leads": [{ "id": "a", "address": "1 Main", "arv": "150000", "cl": { "basic_info": true } }],
            "tasks": { "1": [true] },
            "version": 3
        })
        .to_string();

        let once = Document::parse(&raw).unwrap();
        let twice = Document::parse(&once.to_json().unwrap()).unwrap();
        assert_eq!(once, twice);
        assert_eq!(twice.extra.get("version"), Some(&json!(3)));
        assert_eq!(twice.settings.extra.get("oldFlag"), Some(&json!(1)));
    }

    #[test]
    fn serialized_shape_uses_stored_key_names() {
        let value = serde_json::to_value(Document::default()).unwrap();
        let keys: Vec<&String> = value.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["settings", "leads", "buyers", "tasks"]);
        assert_eq!(value["settings"]["zipFilter"], json!(true));
        assert_eq!(value["settings"]["replyEmail"], json!(""));
    }
}
