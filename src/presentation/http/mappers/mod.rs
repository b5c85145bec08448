use crate::{
    domain::models::{DispatchOutcome, DispatchReport, RecipientOutcome},
    presentation::{
        http::responses::{RecipientOutcomeDto, SendRemindersResponseDto},
        models::OutcomeKind,
    },
};

pub fn map_report(report: &DispatchReport) -> SendRemindersResponseDto {
    SendRemindersResponseDto {
        sent: report.sent_count,
        outcomes: report.outcomes.iter().map(map_outcome).collect(),
    }
}

pub fn map_outcome(entry: &RecipientOutcome) -> RecipientOutcomeDto {
    RecipientOutcomeDto {
        recipient: entry.recipient.clone(),
        status: OutcomeKind::from(&entry.outcome),
        reason: extract_reason(&entry.outcome),
    }
}

fn extract_reason(outcome: &DispatchOutcome) -> Option<String> {
    match outcome {
        DispatchOutcome::Skipped { reason } | DispatchOutcome::Failed { reason } => {
            Some(reason.clone())
        }
        DispatchOutcome::Sent => None,
    }
}
