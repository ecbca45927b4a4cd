use std::io::IsTerminal;
use std::str::FromStr;
use tracing_subscriber::util::SubscriberInitExt;

const DEFAULT_MAX_LEVEL: tracing::Level = tracing::Level::INFO;

#[derive(clap::Args, Debug, Clone, Default)]
pub struct LogConfigArgs {
    /// Turn-on the DEBUG log level.
    ///
    /// If off only reports ERROR, WARN, and INFO, if on also reports DEBUG
    #[clap(long, global = true)]
    pub debug: bool,

    /// Configures the logging level.
    ///
    /// One of error/warn/info/debug/trace.
    /// Logs with verbosity lower or equal to the selected level will be printed,
    /// i.e. warn prints ERROR and WARN logs and trace prints logs of all levels.
    ///
    /// Overrides `--debug`
    #[clap(long, global = true)]
    pub log_level: Option<tracing::Level>,
}

/// Configures and enables logging taking into account flags, env variables and file config.
///
/// 1. Log level is taken from the file configuration first
/// 2. If `RUST_LOG` variable is set, it overrides file-based configuration
/// 3. If `--debug` or `--log-level` flags are set, they override previous steps
pub fn log_init(flags: &LogConfigArgs, configured_level: Option<&str>) -> anyhow::Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal() && yansi::Condition::no_color())
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339());

    let log_level = flags
        .log_level
        .or(flags.debug.then_some(tracing::Level::DEBUG));

    if let Some(log_level) = log_level {
        subscriber.with_max_level(log_level).finish().try_init()?;
        return Ok(());
    }

    if std::env::var("RUST_LOG").is_ok() {
        subscriber
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_file(true)
            .with_line_number(true)
            .finish()
            .try_init()?;
        return Ok(());
    }

    let log_level = configured_level
        .map(parse_log_level)
        .transpose()?
        .unwrap_or(DEFAULT_MAX_LEVEL);
    subscriber.with_max_level(log_level).finish().try_init()?;
    Ok(())
}

fn parse_log_level(level: &str) -> anyhow::Result<tracing::Level> {
    tracing::Level::from_str(&level.to_uppercase()).map_err(|_| {
        anyhow::anyhow!(
            "Invalid log level: {level:?}, supported levels are info, warn, error and debug"
        )
    })
}
