//! Client for the platform's REST backend (consumed, not defined here).

pub mod client;
pub mod error;
pub mod types;

pub use client::PlatformClient;
pub use error::ApiError;
pub use types::{
    CreatedExperience, ExperienceSubmission, ExperienceSummary, PendingCompany, VoteDirection,
};
