pub mod dispatch;
pub mod recipient;
pub mod window;

pub use dispatch::{DispatchOutcome, DispatchReport, RecipientOutcome};
pub use recipient::Recipient;
pub use window::{LeadWindow, classify};
