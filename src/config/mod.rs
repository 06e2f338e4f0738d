pub mod scenario;

#[cfg(feature = "cli")]
use crate::core::demos;
#[cfg(feature = "cli")]
use crate::domain::ports::DemoConfig;
#[cfg(feature = "cli")]
use crate::utils::error::{Result, SandboxError};
#[cfg(feature = "cli")]
use crate::utils::validation::Validate;

#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "script-sandbox")]
#[command(about = "Runs language-primitive demos against an in-memory document")]
pub struct CliConfig {
    /// Demos to run, comma separated. Empty means all of them.
    #[arg(long, value_delimiter = ',')]
    pub demos: Vec<String>,

    /// Optional TOML scenario file with demo selection and document mutations.
    #[arg(long)]
    pub scenario: Option<String>,

    /// List available demos and exit.
    #[arg(long)]
    pub list: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    pub fn effective_demos(&self) -> Vec<String> {
        if self.demos.is_empty() {
            demos::demo_names().iter().map(|s| s.to_string()).collect()
        } else {
            self.demos.clone()
        }
    }
}

#[cfg(feature = "cli")]
impl DemoConfig for CliConfig {
    fn demos(&self) -> &[String] {
        &self.demos
    }

    fn verbose(&self) -> bool {
        self.verbose
    }

    fn validate_selection(&self) -> Result<()> {
        for name in &self.demos {
            if !demos::is_known_demo(name) {
                return Err(SandboxError::UnknownDemo { name: name.clone() });
            }
        }
        Ok(())
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        self.validate_selection()
    }
}
