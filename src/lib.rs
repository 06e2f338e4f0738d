pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;
pub use crate::config::scenario::ScenarioConfig;

pub use crate::core::dom::{Document, ElementHandle};
pub use crate::core::runner::{
    Mutation, MutationAction, RunReport, Sandbox, SandboxEngine, Selector,
};
pub use crate::domain::model::{Person, Value};
pub use crate::domain::ports::{BufferSink, OutputSink, StdoutSink};
pub use crate::utils::error::{Result, SandboxError};
