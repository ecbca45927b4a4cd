//! Command line tool to check how OwnTracks messages are filtered.
//!
//! The filters and the topics they apply to are read from
//! `/etc/tedge/owntracks-filter.toml`, the default being to apply
//! `owntracks-battery-filter` on `owntracks/#`.

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::Parser;
use tedge_owntracks_filter::BuiltinFilters;
use tedge_owntracks_filter::FilterConfig;
use tedge_owntracks_filter::FilterDispatcher;
use tedge_owntracks_filter::Message;
use tedge_owntracks_filter::DEFAULT_CONFIG_PATH;
use tracing::info;

mod list;
mod log;

use crate::list::ListCommand;
use crate::log::LogConfigArgs;
use crate::test::TestCommand;

#[derive(Debug, Parser)]
#[command(name = "owntracks-filter", version, about)]
pub struct Opt {
    /// Path to the TOML file binding filters to topics
    #[clap(long, default_value = DEFAULT_CONFIG_PATH, global = true)]
    config: Utf8PathBuf,

    #[command(flatten)]
    log_args: LogConfigArgs,

    #[command(subcommand)]
    command: FilterCli,
}

#[derive(clap::Subcommand, Debug)]
pub enum FilterCli {
    /// List the builtin filters and the topics they are bound to
    List {
        /// List only the filters applied to messages published on this topic
        #[clap(long)]
        topic: Option<String>,
    },

    /// Process message samples and print those that are forwarded
    ///
    /// The samples are read from stdin, one per line, formatted as `[topic] payload`,
    /// unless a single message is given with `--topic` and `--payload`.
    Test {
        /// Topic of the message sample
        #[clap(long, requires = "payload")]
        topic: Option<String>,

        /// Payload of the message sample
        #[clap(long, requires = "topic")]
        payload: Option<String>,

        /// Print the ignored messages on stderr
        #[clap(long = "show-ignored")]
        show_ignored: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let opt = Opt::parse();

    let config = FilterConfig::load(&opt.config);
    let configured_level = config
        .as_ref()
        .ok()
        .and_then(|config| config.log_level.as_deref());
    log::log_init(&opt.log_args, configured_level)?;

    let config =
        config.with_context(|| format!("Failed to load the filters from {}", opt.config))?;
    info!(target: "owntracks", "Using filters from {}", opt.config);
    let builtins = BuiltinFilters::new();
    let dispatcher = FilterDispatcher::try_from_config(&config, &builtins)
        .with_context(|| format!("Incorrect filter definition in {}", opt.config))?;

    match opt.command {
        FilterCli::List { topic } => {
            ListCommand { topic }.execute(&builtins, &dispatcher);
        }
        FilterCli::Test {
            topic,
            payload,
            show_ignored,
        } => {
            let message = topic.zip(payload).map(|(t, p)| Message::new(t, p));
            TestCommand {
                message,
                show_ignored,
            }
            .execute(dispatcher)
            .await;
        }
    }
    Ok(())
}
