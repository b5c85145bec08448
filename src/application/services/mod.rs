pub mod channel;
pub mod generator;
