//! Library surface of the ndex-tasks CLI, exposed for integration tests.

pub mod cli;
pub mod commands;
pub mod error;
pub mod logger;
pub mod serve;
pub mod ui;
