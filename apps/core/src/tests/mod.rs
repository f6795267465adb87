//! Test Module
//!
//! Test suite for the mood booster core.
//!
//! ## Test Categories
//! - `brain_tests`: Keyword classification, insight and recommendation rules, action dispatch
//! - `tracker_tests`: Behavior event sequences and profile serialization
//! - `store_tests`: File and in-memory persistence
//! - `session_tests`: The session facade with a pinned clock
//! - `actor_tests`: Profile actor request/reply and concurrent writers
//! - `integration_tests`: Full workflows from events to recommendations
//! - `property_tests`: Laws checked over generated inputs

pub mod brain_tests;
pub mod session_tests;
