// src/workflow/engine.rs
//
// Pure stage-gate operations. Nothing here holds state; deal updates come
// back as new values.

use crate::domain::lead::Lead;
use crate::workflow::config::{ChecklistItem, Stage, WorkflowConfig};
use std::collections::BTreeMap;

pub type Checklist = BTreeMap<String, bool>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateStatus {
    pub satisfied: bool,
    pub missing_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Proposal {
    pub ready: bool,
    pub target_stage: Option<Stage>,
    pub prompt_text: String,
}

impl Proposal {
    fn not_ready() -> Self {
        Self {
            ready: false,
            target_stage: None,
            prompt_text: String::new(),
        }
    }
}

/// Required items not yet checked. A stage without a flow has no gate.
pub fn gate_status(config: &WorkflowConfig, stage: Stage, checklist: &Checklist) -> GateStatus {
    let Some(flow) = config.flow(stage) else {
        return GateStatus {
            satisfied: true,
            missing_ids: Vec::new(),
        };
    };

    let missing_ids: Vec<String> = flow
        .required
        .iter()
        .filter(|id| !checklist.get(id.as_str()).copied().unwrap_or(false))
        .cloned()
        .collect();

    GateStatus {
        satisfied: missing_ids.is_empty(),
        missing_ids,
    }
}

pub fn checklist_for(config: &WorkflowConfig, stage: Stage) -> &[ChecklistItem] {
    config
        .flow(stage)
        .map(|flow| flow.checklist.as_slice())
        .unwrap_or(&[])
}

/// Ready only when the gate is satisfied and the stage has somewhere to go.
pub fn propose_transition(config: &WorkflowConfig, stage: Stage, checklist: &Checklist) -> Proposal {
    let Some(flow) = config.flow(stage) else {
        return Proposal::not_ready();
    };
    let Some(next) = flow.next_stage else {
        return Proposal::not_ready();
    };
    if !gate_status(config, stage, checklist).satisfied {
        return Proposal::not_ready();
    }

    Proposal {
        ready: true,
        target_stage: Some(next),
        prompt_text: flow.next_text.clone(),
    }
}

/// Move the deal to its stage's next stage with a fresh checklist.
///
/// The gate is not consulted: callers that want to block an unready deal
/// check `propose_transition` first, and callers that force-advance skip it.
pub fn apply_transition(config: &WorkflowConfig, deal: &Lead) -> Lead {
    let next = deal
        .stage
        .and_then(|stage| config.flow(stage))
        .and_then(|flow| flow.next_stage);

    match next {
        Some(next) => Lead {
            stage: Some(next),
            checklist: Checklist::new(),
            ..deal.clone()
        },
        None => deal.clone(),
    }
}

/// A deal sits on the board only when its stage is a configured one.
pub fn in_pipeline(config: &WorkflowConfig, deal: &Lead) -> bool {
    deal.stage.is_some_and(|stage| config.tracks(stage))
}

/// Put an off-board deal at the first configured stage. Deals already in
/// the pipeline come back unchanged.
pub fn enter_pipeline(config: &WorkflowConfig, deal: &Lead) -> Lead {
    if in_pipeline(config, deal) {
        return deal.clone();
    }
    Lead {
        stage: Some(config.first_stage()),
        checklist: Checklist::new(),
        ..deal.clone()
    }
}

pub fn set_checklist_item(deal: &Lead, item_id: &str, checked: bool) -> Lead {
    let mut next = deal.clone();
    next.checklist.insert(item_id.to_string(), checked);
    next
}

pub fn status_label(config: &WorkflowConfig, stage: Stage, checklist: &Checklist) -> String {
    let gate = gate_status(config, stage, checklist);
    if gate.satisfied {
        "Ready".to_string()
    } else {
        format!("Needs {}", gate.missing_ids.len())
    }
}

/// Deals per configured stage, in pipeline order. Deals outside the
/// workflow are not counted.
pub fn pipeline_counts(config: &WorkflowConfig, leads: &[Lead]) -> Vec<(Stage, usize)> {
    config
        .stages()
        .iter()
        .map(|&stage| {
            let n = leads.iter().filter(|l| l.stage == Some(stage)).count();
            (stage, n)
        })
        .collect()
}
