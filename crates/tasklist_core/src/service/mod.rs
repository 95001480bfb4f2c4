//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store and picker calls into screen-level intents.
//! - Keep UI/FFI layers decoupled from storage details.

pub mod task_screen;
