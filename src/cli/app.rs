// ABOUTME: Main application orchestration for the templet CLI
// ABOUTME: Coordinates between CLI arguments, configuration, and command execution

use anyhow::Result;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use super::commands::{self, ExpandOptions};
use super::{Args, Commands, Config};

pub struct App {
    config: Config,
}

impl App {
    /// Create a new application instance
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Log level to use when RUST_LOG is unset; --verbose wins over the config
    fn log_level(&self, verbose: bool) -> &str {
        if verbose {
            "debug"
        } else {
            &self.config.logging.level
        }
    }

    /// Initialize logging on stderr, keeping stdout for expanded text
    pub fn init_logging(&self, verbose: bool, no_color: bool) -> Result<()> {
        let log_level = self.log_level(verbose);
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

        let builder = tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .with_ansi(!no_color)
            .with_target(false);

        match self.config.logging.format.as_str() {
            "compact" => builder.compact().try_init(),
            _ => builder.try_init(),
        }
        .map_err(|err| anyhow::anyhow!("Failed to initialize logging: {}", err))?;

        debug!(
            "Logging initialized with level {} ({} format)",
            log_level, self.config.logging.format
        );
        Ok(())
    }

    /// Run the application with parsed arguments
    pub fn run(&mut self, args: Args) -> Result<()> {
        self.init_logging(args.verbose, args.no_color)?;

        info!("Starting templet v{}", env!("CARGO_PKG_VERSION"));
        debug!("Configuration loaded from: {:?}", args.config);

        match args.command {
            Commands::Expand {
                template,
                vars,
                positional,
                vars_file,
                table,
                table_name,
                scope,
                localize,
                locale,
                diagnostics,
            } => commands::expand_template(
                ExpandOptions {
                    template,
                    vars,
                    positional,
                    vars_file,
                    tables: table,
                    table_name,
                    scope,
                    localize,
                    locale,
                    diagnostics,
                },
                &self.config,
            ),

            Commands::Check { template, strict } => commands::check_template(&template, strict),

            Commands::Operators => commands::list_operators(),
        }
    }

    /// Create application from parsed command line arguments
    pub fn from_args(args: &Args) -> Result<Self> {
        let config = Config::load(args.config.clone())?;
        Ok(Self::new(config))
    }
}
