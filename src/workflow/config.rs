// src/workflow/config.rs

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::Path;
use thiserror::Error;

/// The fixed set of pipeline stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Stage {
    Prospect,
    Lead,
    #[serde(rename = "Under Contract")]
    UnderContract,
    #[serde(rename = "Title/Attorney")]
    TitleAttorney,
    Closing,
}

impl Stage {
    pub const ALL: [Stage; 5] = [
        Stage::Prospect,
        Stage::Lead,
        Stage::UnderContract,
        Stage::TitleAttorney,
        Stage::Closing,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Prospect => "Prospect",
            Stage::Lead => "Lead",
            Stage::UnderContract => "Under Contract",
            Stage::TitleAttorney => "Title/Attorney",
            Stage::Closing => "Closing",
        }
    }

    pub fn parse(s: &str) -> Option<Stage> {
        let s = s.trim();
        Stage::ALL.into_iter().find(|stage| stage.as_str() == s)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub id: String,
    pub label: String,
}

/// Gate and checklist for one stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageFlow {
    /// Item ids that must be checked before the deal may advance.
    pub required: Vec<String>,
    pub checklist: Vec<ChecklistItem>,
    pub next_stage: Option<Stage>,
    pub next_text: String,
}

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("Invalid workflow config: {0}")]
    Invalid(String),
    #[error("Could not read workflow config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed workflow config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Immutable stage table, validated once when built.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowConfig {
    stages: Vec<Stage>,
    flows: HashMap<Stage, StageFlow>,
}

// On-disk shape: `{ "stages": [...], "flows": { "<stage>": {...} } }`.
#[derive(Deserialize)]
struct RawConfig {
    stages: Option<Vec<String>>,
    flows: Option<BTreeMap<String, RawFlow>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawFlow {
    #[serde(default)]
    required: Vec<String>,
    #[serde(default)]
    checklist: Vec<ChecklistItem>,
    #[serde(default)]
    next_stage: Option<String>,
    #[serde(default)]
    next_text: String,
}

fn stage_named(name: &str) -> Result<Stage, WorkflowError> {
    Stage::parse(name).ok_or_else(|| WorkflowError::Invalid(format!("unknown stage '{name}'")))
}

impl WorkflowConfig {
    pub fn new(stages: Vec<Stage>, flows: HashMap<Stage, StageFlow>) -> Result<Self, WorkflowError> {
        if stages.is_empty() {
            return Err(WorkflowError::Invalid("no stages defined".into()));
        }
        for (stage, flow) in &flows {
            if let Some(next) = flow.next_stage {
                if !stages.contains(&next) {
                    return Err(WorkflowError::Invalid(format!(
                        "{stage} moves to {next}, which is not in the stage list"
                    )));
                }
            }
            for id in &flow.required {
                if !flow.checklist.iter().any(|item| &item.id == id) {
                    return Err(WorkflowError::Invalid(format!(
                        "{stage} requires '{id}' but its checklist has no such item"
                    )));
                }
            }
        }
        Ok(Self { stages, flows })
    }

    pub fn from_json(raw: &str) -> Result<Self, WorkflowError> {
        let raw: RawConfig = serde_json::from_str(raw)?;
        let stage_names = raw
            .stages
            .ok_or_else(|| WorkflowError::Invalid("missing 'stages'".into()))?;
        let raw_flows = raw
            .flows
            .ok_or_else(|| WorkflowError::Invalid("missing 'flows'".into()))?;

        let stages = stage_names
            .iter()
            .map(|name| stage_named(name))
            .collect::<Result<Vec<_>, _>>()?;

        let mut flows = HashMap::new();
        for (name, flow) in raw_flows {
            let next_stage = match flow.next_stage.as_deref() {
                Some(next) => Some(stage_named(next)?),
                None => None,
            };
            flows.insert(
                stage_named(&name)?,
                StageFlow {
                    required: flow.required,
                    checklist: flow.checklist,
                    next_stage,
                    next_text: flow.next_text,
                },
            );
        }

        Self::new(stages, flows)
    }

    pub fn load(path: &Path) -> Result<Self, WorkflowError> {
        let raw = std::fs::read_to_string(path).map_err(|source| WorkflowError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&raw)
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// Whether `stage` is one of the configured stages.
    pub fn tracks(&self, stage: Stage) -> bool {
        self.stages.contains(&stage)
    }

    pub fn flow(&self, stage: Stage) -> Option<&StageFlow> {
        self.flows.get(&stage)
    }

    pub fn first_stage(&self) -> Stage {
        self.stages.first().copied().unwrap_or(Stage::Prospect)
    }
}

fn items(pairs: &[(&str, &str)]) -> Vec<ChecklistItem> {
    pairs
        .iter()
        .map(|(id, label)| ChecklistItem {
            id: id.to_string(),
            label: label.to_string(),
        })
        .collect()
}

fn flow(required: &[&str], checklist: &[(&str, &str)], next: Option<Stage>, text: &str) -> StageFlow {
    StageFlow {
        required: required.iter().map(|s| s.to_string()).collect(),
        checklist: items(checklist),
        next_stage: next,
        next_text: text.to_string(),
    }
}

impl Default for WorkflowConfig {
    /// The built-in wholesaling pipeline.
    fn default() -> Self {
        let mut flows = HashMap::new();
        flows.insert(
            Stage::Prospect,
            flow(
                &["basic_info", "initial_comps"],
                &[
                    ("basic_info", "Enter address + owner details"),
                    ("initial_comps", "Add 3 comps (quick) and estimate ARV"),
                    ("qualify_seller", "Qualify seller motivation & timeline"),
                ],
                Some(Stage::Lead),
                "Prospect complete → Move to **Lead** and create seller contact + follow-up tasks?",
            ),
        );
        flows.insert(
            Stage::Lead,
            flow(
                &["seller_contact", "appointment"],
                &[
                    ("seller_contact", "Create/Link seller contact"),
                    ("appointment", "Set inspection/virtual walk-through appointment"),
                    ("offer_ready", "Prepare initial offer range"),
                ],
                Some(Stage::UnderContract),
                "Lead complete → Move to **Under Contract** and create contract checklist?",
            ),
        );
        flows.insert(
            Stage::UnderContract,
            flow(
                &["contract_uploaded", "buyer_outreach"],
                &[
                    ("contract_uploaded", "Upload signed purchase agreement"),
                    ("buyer_outreach", "Send to VIP buyers list"),
                    ("dispo_price", "Set dispo price and margin"),
                ],
                Some(Stage::TitleAttorney),
                "Contract in place → Move to **Title/Attorney** and create title packet checklist?",
            ),
        );
        flows.insert(
            Stage::TitleAttorney,
            flow(
                &["title_opened", "hoa_payoff"],
                &[
                    ("title_opened", "Open title with attorney and send packet"),
                    ("hoa_payoff", "Request HOA & payoff statements"),
                    ("clear_exceptions", "Track title exceptions to clear"),
                ],
                Some(Stage::Closing),
                "Title opened → Move to **Closing** and create closing-day checklist?",
            ),
        );
        flows.insert(
            Stage::Closing,
            flow(
                &["final_walk", "wire_instr"],
                &[
                    ("final_walk", "Final walk-through scheduled/completed"),
                    ("wire_instr", "Verify wire instructions with attorney"),
                    ("closing_packet", "Prepare closing packet for all parties"),
                ],
                None,
                "All set! Closing tasks created. No further stage.",
            ),
        );

        Self {
            stages: Stage::ALL.to_vec(),
            flows,
        }
    }
}
