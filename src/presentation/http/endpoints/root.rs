use poem_openapi::Tags;

pub struct Endpoints;

/// Enum of API sections (tags)
#[derive(Tags)]
pub enum EndpointsTags {
    Health,
    Reminders,
}
