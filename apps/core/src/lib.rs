// MoodBoost core
// Mood detection, behavior tracking and personalization

pub mod actors;
pub mod brain;
pub mod config;
pub mod error;
pub mod fs_manager;
pub mod journal;
pub mod logging;
pub mod models;
pub mod session;
pub mod sources;
pub mod store;
pub mod tracker;
pub mod transcript;

pub use config::MoodConfig;
pub use error::{AppError, Result};
pub use models::{BehaviorProfile, InteractionKind, Mood, MoodTransition, Timestamp};
pub use session::MoodSession;

#[cfg(test)]
mod tests;
