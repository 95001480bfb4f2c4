//! Calendar math for the inline due-date picker.
//!
//! # Responsibility
//! - Pure month/day arithmetic delegated to `chrono`.
//! - Picker state that never touches persistence.

pub mod date_selector;
