//! CLI library components for the mod message composer.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod session;
pub mod summary;
pub mod terminal;
