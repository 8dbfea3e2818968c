//! Command implementations.

pub mod build;
pub mod dist;
pub mod run;
pub mod serve;
pub mod utils;
