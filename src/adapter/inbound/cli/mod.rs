//! CLI module graph and command dispatch.

pub mod command;
pub mod config;
pub mod diagnostic;
pub mod export;
pub mod history;
pub mod loader;
pub mod output;
pub mod screen;
pub mod snowball;
pub mod strategy;

pub use command::{Cli, Commands, ConfigCommand};

use tracing::{debug, error};

use self::output::OutputMode;

/// Run one parsed invocation.
///
/// Configuration problems and command failures come back as rendered
/// diagnostics; the caller only prints them and sets the exit code.
pub async fn run(cli: Cli) -> miette::Result<()> {
    output::configure(OutputMode::from_flags(cli.json, cli.quiet));

    if matches!(cli.command, Commands::Strategies) {
        strategy::list();
        return Ok(());
    }

    let mut loaded = loader::load(cli.config.as_deref())?;
    loader::apply_log_flags(&mut loaded.config, &cli);
    loaded.config.init_logging();
    debug!(path = ?loaded.path, "Configuration loaded");

    let config = &loaded.config;
    let result = match &cli.command {
        Commands::Export(args) => export::execute(config, args).await,
        Commands::Screen(args) => screen::execute(config, args).await,
        Commands::History(args) => history::execute(config, args).await,
        Commands::Snowball(args) => snowball::execute(config, args).await,
        Commands::Config(ConfigCommand::Validate) => config::execute_validate(&loaded),
        Commands::Config(ConfigCommand::Show) => config::execute_show(&loaded),
        Commands::Strategies => Ok(()),
    };

    result.map_err(|e| {
        error!(error = %e, "Command failed");
        diagnostic::report(e, None)
    })
}
