//! Flutter bridge surface for the task list core.

pub mod api;
