use poem_openapi::Enum;

use crate::domain::models::DispatchOutcome;

#[derive(Enum, Copy, Clone, Debug, Eq, PartialEq)]
pub enum OutcomeKind {
    #[oai(rename = "sent")]
    Sent,
    #[oai(rename = "skipped")]
    Skipped,
    #[oai(rename = "failed")]
    Failed,
}

impl From<&DispatchOutcome> for OutcomeKind {
    fn from(value: &DispatchOutcome) -> Self {
        match value {
            DispatchOutcome::Sent => OutcomeKind::Sent,
            DispatchOutcome::Skipped { .. } => OutcomeKind::Skipped,
            DispatchOutcome::Failed { .. } => OutcomeKind::Failed,
        }
    }
}
