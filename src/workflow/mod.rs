pub mod config;
pub mod engine;

pub use config::{ChecklistItem, Stage, StageFlow, WorkflowConfig, WorkflowError};
pub use engine::{
    apply_transition, checklist_for, enter_pipeline, gate_status, in_pipeline, pipeline_counts,
    propose_transition, set_checklist_item, status_label, Checklist, GateStatus, Proposal,
};
