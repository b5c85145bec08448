use poem_openapi::Object;

use crate::presentation::models::OutcomeKind;

#[derive(Object)]
pub struct RecipientOutcomeDto {
    pub recipient: String,
    pub status: OutcomeKind,
    pub reason: Option<String>,
}

#[derive(Object)]
pub struct SendRemindersResponseDto {
    pub sent: u32,
    pub outcomes: Vec<RecipientOutcomeDto>,
}

#[derive(Object)]
pub struct DispatchErrorDto {
    pub sent: u32,
    pub error: String,
    pub missing: Option<Vec<String>>,
}
