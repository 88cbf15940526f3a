pub mod client;
pub mod types;

pub use client::TravelApi;
pub use types::{ApiError, AssistantReply, HealthStatus};
