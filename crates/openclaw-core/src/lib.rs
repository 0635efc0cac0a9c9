pub mod audit;
pub mod config;
pub mod consent;
pub mod detect;
pub mod digest;
pub mod error;
pub mod exec;
pub mod flags;
pub mod guard;
pub mod io;
pub mod orchestrator;
pub mod paths;
pub mod plan;
pub mod reconcile;
pub mod scope;

pub use error::{OpenclawError, Result};
