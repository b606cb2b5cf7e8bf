use anyhow::{Context, Result};
use clap::Parser;
use homerisk::cli::{Cli, Commands};
use homerisk::commands::{
    self, ImpactConfig, ScoreConfig, TimelineCommandConfig, WindowConfig,
};
use homerisk::config::{load_config, HomeriskConfig};
use homerisk::observability::{init_logging, install_panic_hook, level_for_verbosity};

fn main() -> Result<()> {
    install_panic_hook();
    let cli = Cli::parse();

    // Init must work even when an existing config is broken
    if let Commands::Init { force } = cli.command {
        init_logging(&level_for_verbosity("warn", cli.verbose));
        return commands::init_config(force);
    }

    let config = load_config(cli.config.as_deref()).context("Failed to load configuration")?;
    init_logging(&level_for_verbosity(&config.log_level(), cli.verbose));

    run(cli.command, &config)
}

fn run(command: Commands, config: &HomeriskConfig) -> Result<()> {
    let calibration = config.calibration()?;

    match command {
        Commands::Window {
            input,
            now,
            format,
            output,
        } => commands::handle_window(
            WindowConfig {
                input,
                now,
                format,
                output,
            },
            calibration,
        ),
        Commands::Score {
            input,
            threshold,
            capture,
            format,
            output,
        } => commands::handle_score(
            ScoreConfig {
                input,
                threshold,
                capture,
                format,
                output,
            },
            config.intervention_threshold(),
            calibration,
        ),
        Commands::Timeline {
            input,
            horizon,
            now,
            order,
            format,
            output,
        } => commands::handle_timeline(
            TimelineCommandConfig {
                input,
                horizon,
                now,
                order,
                format,
                output,
            },
            config.horizon_years(),
            calibration,
        ),
        Commands::Impact {
            system_type,
            category,
            format,
        } => commands::handle_impact(ImpactConfig {
            system_type,
            category,
            format,
        }),
        Commands::Init { force } => commands::init_config(force),
    }
}
