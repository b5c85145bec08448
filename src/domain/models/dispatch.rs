use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DispatchOutcome {
    Sent,
    Skipped { reason: String },
    Failed { reason: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipientOutcome {
    pub recipient: String,
    pub outcome: DispatchOutcome,
}

/// Result of one dispatch pass. Built fresh per invocation and returned to
/// the caller; nothing is persisted between passes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DispatchReport {
    pub sent_count: u32,
    pub outcomes: Vec<RecipientOutcome>,
}

impl DispatchReport {
    pub fn from_outcomes(outcomes: Vec<RecipientOutcome>) -> Self {
        let sent_count = outcomes
            .iter()
            .filter(|entry| matches!(entry.outcome, DispatchOutcome::Sent))
            .count() as u32;
        Self {
            sent_count,
            outcomes,
        }
    }
}
