// src/store/merge.rs

use crate::domain::Lead;
use std::collections::HashMap;

/// Last-write-wins merge of the remote lead list into the local one.
///
/// Locals go in first, in order. A remote record replaces the entry with the
/// same id when its `updated` is at least as new (ties go to the remote
/// copy); remote-only ids are appended. Nothing is ever removed, so a lead
/// deleted remotely survives locally.
pub fn merge_remote(local: &[Lead], remote: Vec<Lead>) -> Vec<Lead> {
    let mut merged: Vec<Lead> = Vec::with_capacity(local.len() + remote.len());
    let mut index: HashMap<String, usize> = HashMap::with_capacity(local.len() + remote.len());

    for lead in local {
        match index.get(&lead.id) {
            Some(&i) => merged[i] = lead.clone(),
            None => {
                index.insert(lead.id.clone(), merged.len());
                merged.push(lead.clone());
            }
        }
    }

    for lead in remote {
        match index.get(&lead.id) {
            Some(&i) => {
                if lead.updated >= merged[i].updated {
                    merged[i] = lead;
                }
            }
            None => {
                index.insert(lead.id.clone(), merged.len());
                merged.push(lead);
            }
        }
    }

    merged
}
