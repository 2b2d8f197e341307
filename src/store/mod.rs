// src/store/mod.rs
//
// The single owner of the dashboard document. Every mutation goes through a
// method here, and every such method persists before returning.

mod document;
mod merge;

pub use document::Document;
pub use merge::merge_remote;

use crate::db::{kv, Database};
use crate::domain::tasks;
use crate::domain::{now_millis, Buyer, Lead, Settings};
use crate::errors::ServerError;
use crate::forms::FormData;

/// Storage key of the persisted document.
pub const DOCUMENT_KEY: &str = "mbps_ds_v1";

/// Read the stored document. Absent or corrupt data yields the defaults.
pub fn load(db: &Database) -> Result<Document, ServerError> {
    let raw = db.with_conn(|conn| kv::get(conn, DOCUMENT_KEY))?;
    let Some(raw) = raw else {
        return Ok(Document::default());
    };
    match Document::parse(&raw) {
        Some(doc) => Ok(doc),
        None => {
            tracing::warn!(key = DOCUMENT_KEY, "stored document unreadable, starting from defaults");
            Ok(Document::default())
        }
    }
}

/// Overwrite the stored document in one write.
pub fn save(db: &Database, doc: &Document) -> Result<(), ServerError> {
    let json = doc
        .to_json()
        .map_err(|e| ServerError::DbError(format!("serialize document failed: {e}")))?;
    db.with_conn(|conn| kv::put(conn, DOCUMENT_KEY, &json))
}

fn newest_first<'a, T>(items: impl Iterator<Item = &'a T>, updated: impl Fn(&T) -> i64) -> Vec<&'a T>
where
    T: 'a,
{
    let mut out: Vec<&T> = items.collect();
    out.sort_by_key(|item| std::cmp::Reverse(updated(*item)));
    out
}

pub struct RecordStore {
    db: Database,
    doc: Document,
}

impl RecordStore {
    pub fn open(db: Database) -> Result<Self, ServerError> {
        let doc = load(&db)?;
        Ok(Self { db, doc })
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn settings(&self) -> &Settings {
        &self.doc.settings
    }

    fn persist(&self) -> Result<(), ServerError> {
        save(&self.db, &self.doc)
    }

    // --- leads ---

    pub fn lead(&self, id: &str) -> Option<&Lead> {
        self.doc.leads.iter().find(|l| l.id == id)
    }

    /// Filtered leads, most recently updated first.
    pub fn leads_view(&self, filter: &str) -> Vec<&Lead> {
        newest_first(self.doc.leads.iter().filter(|l| l.matches(filter)), |l| l.updated)
    }

    /// Insert or replace by id.
    pub fn put_lead(&mut self, lead: Lead) -> Result<(), ServerError> {
        match self.doc.leads.iter_mut().find(|l| l.id == lead.id) {
            Some(slot) => *slot = lead,
            None => self.doc.leads.push(lead),
        }
        self.persist()
    }

    /// Save a lead coming from the edit form. The form has no workflow
    /// fields, so an existing deal keeps its stage and checklist.
    pub fn save_lead_form(&mut self, mut lead: Lead) -> Result<Lead, ServerError> {
        if let Some(existing) = self.lead(&lead.id) {
            if lead.stage.is_none() {
                lead.stage = existing.stage;
                lead.checklist = existing.checklist.clone();
            }
        }
        self.put_lead(lead.clone())?;
        Ok(lead)
    }

    /// Read-modify-write of one deal. `edit` sees the current stored copy
    /// and its result is stamped as a fresh edit. An `Err` from `edit`
    /// leaves the store untouched.
    pub fn update_deal_with<F>(&mut self, id: &str, edit: F) -> Result<Lead, ServerError>
    where
        F: FnOnce(&Lead) -> Result<Lead, ServerError>,
    {
        let current = self.lead(id).ok_or(ServerError::NotFound)?;
        let mut deal = edit(current)?;
        deal.id = id.to_string();
        deal.updated = now_millis();
        self.put_lead(deal.clone())?;
        Ok(deal)
    }

    pub fn delete_lead(&mut self, id: &str) -> Result<bool, ServerError> {
        let before = self.doc.leads.len();
        self.doc.leads.retain(|l| l.id != id);
        let removed = self.doc.leads.len() != before;
        if removed {
            self.persist()?;
        }
        Ok(removed)
    }

    /// Fold a remote lead list into the local one and persist the result.
    pub fn merge_remote_leads(&mut self, remote: Vec<Lead>) -> Result<usize, ServerError> {
        self.doc.leads = merge_remote(&self.doc.leads, remote);
        self.persist()?;
        Ok(self.doc.leads.len())
    }

    // --- buyers ---

    pub fn buyer(&self, id: &str) -> Option<&Buyer> {
        self.doc.buyers.iter().find(|b| b.id == id)
    }

    pub fn buyers_view(&self, filter: &str) -> Vec<&Buyer> {
        newest_first(self.doc.buyers.iter().filter(|b| b.matches(filter)), |b| b.updated)
    }

    pub fn put_buyer(&mut self, buyer: Buyer) -> Result<(), ServerError> {
        match self.doc.buyers.iter_mut().find(|b| b.id == buyer.id) {
            Some(slot) => *slot = buyer,
            None => self.doc.buyers.push(buyer),
        }
        self.persist()
    }

    pub fn delete_buyer(&mut self, id: &str) -> Result<bool, ServerError> {
        let before = self.doc.buyers.len();
        self.doc.buyers.retain(|b| b.id != id);
        let removed = self.doc.buyers.len() != before;
        if removed {
            self.persist()?;
        }
        Ok(removed)
    }

    // --- tasks / settings ---

    pub fn set_task(&mut self, day: u8, slot: usize, checked: bool) -> Result<bool, ServerError> {
        if !tasks::set_task(&mut self.doc.tasks, day, slot, checked) {
            return Ok(false);
        }
        self.persist()?;
        Ok(true)
    }

    pub fn apply_settings_form(&mut self, form: &FormData) -> Result<(), ServerError> {
        self.doc.settings.apply_form(form);
        self.persist()
    }

    /// Drop every lead, buyer, task flag and setting.
    pub fn reset_all(&mut self) -> Result<(), ServerError> {
        self.doc = Document::default();
        self.persist()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_db;
    use crate::workflow::Stage;
    use std::collections::BTreeMap;

    fn temp_db() -> (tempfile::TempDir, Database) {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::new(dir.path().join("store.sqlite3"));
        init_db(&db).unwrap();
        (dir, db)
    }

    fn lead(id: &str, updated: i64) -> Lead {
        Lead {
            id: id.into(),
            address: format!("{id} Main St"),
            updated,
            ..Lead::default()
        }
    }

    #[test]
    fn empty_database_loads_defaults() {
        let (_dir, db) = temp_db();
        assert_eq!(load(&db).unwrap(), Document::default());
    }

    #[test]
    fn corrupt_document_loads_defaults() {
        let (_dir, db) = temp_db();
        db.with_conn(|conn| kv::put(conn, DOCUMENT_KEY, "{\"leads\": [")).unwrap();
        assert_eq!(load(&db).unwrap(), Document::default());
    }

    #[test]
    fn save_then_load_round_trips() {
        let (_dir, db) = temp_db();
        let mut doc = Document::default();
        doc.settings.sender = "Jordan".into();
        doc.leads.push(Lead {
            stage: Some(Stage::Lead),
            checklist: BTreeMap::from([("seller_contact".to_string(), true)]),
            ..lead("a", 10)
        });
        doc.buyers.push(Buyer {
            id: "b1".into(),
            email: "cash@example.com".into(),
            ..Buyer::default()
        });
        doc.tasks.insert(4, vec![true, false, true]);

        save(&db, &doc).unwrap();
        assert_eq!(load(&db).unwrap(), doc);
    }

    #[test]
    fn defaulted_raw_document_is_stable_across_save() {
        let (_dir, db) = temp_db();
        db.with_conn(|conn| {
            kv::put(
                conn,
                DOCUMENT_KEY,
                r#"{"settings":{"fee":"5000"},"leads":[{"id":"z","arv":"1"}],"tasks":{"2":[null,true]}}"#,
            )
        })
        .unwrap();

        let first = load(&db).unwrap();
        save(&db, &first).unwrap();
        assert_eq!(load(&db).unwrap(), first);
        assert_eq!(first.settings.fee, 5000.0);
    }

    #[test]
    fn mutations_persist_immediately() {
        let (_dir, db) = temp_db();
        let mut store = RecordStore::open(db.clone()).unwrap();
        store.put_lead(lead("a", 1)).unwrap();
        store
            .put_buyer(Buyer {
                id: "b".into(),
                ..Buyer::default()
            })
            .unwrap();
        assert!(store.set_task(1, 0, true).unwrap());
        assert!(!store.set_task(9, 0, true).unwrap());

        let reopened = RecordStore::open(db).unwrap();
        assert_eq!(reopened.document(), store.document());
        assert_eq!(reopened.document().leads.len(), 1);
    }

    #[test]
    fn form_save_keeps_workflow_state() {
        let (_dir, db) = temp_db();
        let mut store = RecordStore::open(db).unwrap();
        store
            .put_lead(Lead {
                stage: Some(Stage::UnderContract),
                checklist: BTreeMap::from([("buyer_outreach".to_string(), true)]),
                ..lead("a", 1)
            })
            .unwrap();

        let saved = store.save_lead_form(lead("a", 2)).unwrap();
        assert_eq!(saved.stage, Some(Stage::UnderContract));
        assert_eq!(store.lead("a").unwrap().checklist.len(), 1);
        assert_eq!(store.lead("a").unwrap().updated, 2);
    }

    #[test]
    fn views_sort_newest_first_and_filter() {
        let (_dir, db) = temp_db();
        let mut store = RecordStore::open(db).unwrap();
        for (id, ts) in [("old", 1), ("new", 3), ("mid", 2)] {
            store.put_lead(lead(id, ts)).unwrap();
        }
        let ids: Vec<&str> = store.leads_view("").iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["new", "mid", "old"]);
        assert_eq!(store.leads_view("MID main").len(), 1);
    }

    #[test]
    fn delete_and_reset() {
        let (_dir, db) = temp_db();
        let mut store = RecordStore::open(db.clone()).unwrap();
        store.put_lead(lead("a", 1)).unwrap();
        assert!(store.delete_lead("a").unwrap());
        assert!(!store.delete_lead("a").unwrap());

        store.put_lead(lead("b", 1)).unwrap();
        store.reset_all().unwrap();
        assert_eq!(load(&db).unwrap(), Document::default());
    }

    #[test]
    fn remote_merge_is_persisted() {
        let (_dir, db) = temp_db();
        let mut store = RecordStore::open(db.clone()).unwrap();
        store.put_lead(lead("a", 100)).unwrap();

        let count = store
            .merge_remote_leads(vec![Lead {
                address: "remote".into(),
                ..lead("a", 200)
            }, lead("c", 1)])
            .unwrap();
        assert_eq!(count, 2);
        assert_eq!(load(&db).unwrap().leads[0].address, "remote");
    }

    #[test]
    fn update_deal_requires_existing_lead() {
        let (_dir, db) = temp_db();
        let mut store = RecordStore::open(db).unwrap();
        assert!(matches!(
            store.update_deal_with("ghost", |d| Ok(d.clone())),
            Err(ServerError::NotFound)
        ));
        store.put_lead(lead("a", 1)).unwrap();
        let stamped = store.update_deal_with("a", |d| Ok(d.clone())).unwrap();
        assert!(stamped.updated > 1);
    }

    #[test]
    fn deal_update_starts_from_the_latest_copy() {
        let (_dir, db) = temp_db();
        let mut store = RecordStore::open(db.clone()).unwrap();
        store.put_lead(Lead { stage: Some(Stage::Lead), ..lead("a", 1) }).unwrap();
        store
            .save_lead_form(Lead { address: "99 New Ave".into(), ..lead("a", 2) })
            .unwrap();

        store
            .update_deal_with("a", |d| {
                let mut next = d.clone();
                next.checklist.insert("seller_contact".into(), true);
                Ok(next)
            })
            .unwrap();

        let stored = &load(&db).unwrap().leads[0];
        assert_eq!(stored.address, "99 New Ave");
        assert_eq!(stored.checklist.get("seller_contact"), Some(&true));
    }

    #[test]
    fn rejected_deal_update_changes_nothing() {
        let (_dir, db) = temp_db();
        let mut store = RecordStore::open(db).unwrap();
        store.put_lead(lead("a", 1)).unwrap();
        let result = store.update_deal_with("a", |_| Err(ServerError::BadRequest("no".into())));
        assert!(matches!(result, Err(ServerError::BadRequest(_))));
        assert_eq!(store.lead("a").unwrap().updated, 1);
    }

    #[test]
    fn one_bad_lead_keeps_the_rest() {
        let (_dir, db) = temp_db();
        db.with_conn(|conn| {
            kv::put(
                conn,
                DOCUMENT_KEY,
                r#"{"settings":{"company":"Keep Co"},
                    "leads":[{"id":"a","address":"1 Keep St","cl":[]},null,{"id":"b","address":"2 Keep St"}],
                    "buyers":[{"id":"x","email":"x@keep.test"}]}"#,
            )
        })
        .unwrap();

        let mut store = RecordStore::open(db.clone()).unwrap();
        assert!(store.set_task(1, 0, true).unwrap());

        let stored = load(&db).unwrap();
        assert_eq!(stored.settings.company, "Keep Co");
        assert_eq!(stored.leads.len(), 2);
        assert_eq!(stored.leads[0].address, "1 Keep St");
        assert_eq!(stored.buyers.len(), 1);
        assert_eq!(stored.tasks.get(&1), Some(&vec![true]));
    }
}
