pub mod demos;
pub mod dom;
pub mod runner;

pub use crate::domain::model::{Person, Value};
pub use crate::domain::ports::{BufferSink, DemoConfig, OutputSink, StdoutSink};
pub use crate::utils::error::Result;
