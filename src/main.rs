use clap::Parser;
use script_sandbox::core::demos;
use script_sandbox::utils::{logger, validation::Validate};
use script_sandbox::{CliConfig, Document, Sandbox, SandboxEngine, ScenarioConfig, StdoutSink};

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting script-sandbox CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if config.list {
        println!("Available demos:");
        for name in demos::demo_names() {
            println!("  {}", name);
        }
        return Ok(());
    }

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("{}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }

    // Scenario file overrides the demo selection and supplies mutations.
    let (demo_names, mutations) = match &config.scenario {
        Some(path) => {
            let scenario = match ScenarioConfig::from_file(path) {
                Ok(scenario) => scenario,
                Err(e) => {
                    tracing::error!("Failed to load scenario '{}': {}", path, e);
                    eprintln!("{}", e.user_friendly_message());
                    std::process::exit(e.exit_code());
                }
            };
            tracing::info!("Loaded scenario: {}", scenario.scenario.name);
            let demos = if scenario.scenario.demos.is_empty() {
                config.effective_demos()
            } else {
                scenario.scenario.demos.clone()
            };
            let mutations = match scenario.to_mutations() {
                Ok(mutations) => mutations,
                Err(e) => {
                    tracing::error!("Invalid mutation in scenario '{}': {}", path, e);
                    eprintln!("{}", e.user_friendly_message());
                    std::process::exit(e.exit_code());
                }
            };
            (demos, mutations)
        }
        None => (config.effective_demos(), Vec::new()),
    };

    let state = Sandbox::new(Document::sample_page(), StdoutSink);
    let mut engine = SandboxEngine::new(state);

    match engine.run(&demo_names, &mutations) {
        Ok(report) => {
            tracing::info!(
                "Run complete: {} demos, {} lines, {} mutations",
                report.demos_run,
                report.lines_emitted,
                report.mutations_applied
            );
        }
        Err(e) => {
            tracing::error!("Run failed: {} (category: {:?})", e, e.category());
            eprintln!("{}", e.user_friendly_message());
            std::process::exit(e.exit_code());
        }
    }

    Ok(())
}
