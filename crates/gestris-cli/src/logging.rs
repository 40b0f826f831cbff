use std::{fs::File, io, path::PathBuf, sync::Mutex};

use anyhow::Context as _;
use tracing::level_filters::LevelFilter;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct LogArg {
    /// Write log messages to this file
    #[clap(long, global = true)]
    log_file: Option<PathBuf>,
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[clap(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

/// Where log output goes when no `--log-file` is given.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Fallback {
    Stderr,
    /// The terminal UI owns the screen; drop log output.
    Discard,
}

impl LogArg {
    fn level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    }
}

pub(crate) fn init(arg: &LogArg, fallback: Fallback) -> anyhow::Result<()> {
    let builder = tracing_subscriber::fmt()
        .with_max_level(arg.level())
        .with_target(false);

    let result = match (&arg.log_file, fallback) {
        (Some(path), _) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file: {}", path.display()))?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        (None, Fallback::Stderr) => builder.with_writer(io::stderr).try_init(),
        (None, Fallback::Discard) => return Ok(()),
    };
    result.map_err(|err| anyhow::anyhow!(err).context("Failed to install log subscriber"))
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[derive(Debug, Parser)]
    struct TestArgs {
        #[clap(flatten)]
        log: LogArg,
    }

    #[test]
    fn test_verbosity_levels() {
        let level = |args: &[&str]| TestArgs::parse_from(args).log.level();
        assert_eq!(level(&["gestris"]), LevelFilter::WARN);
        assert_eq!(level(&["gestris", "-v"]), LevelFilter::INFO);
        assert_eq!(level(&["gestris", "-vv"]), LevelFilter::DEBUG);
        assert_eq!(level(&["gestris", "-vvvv"]), LevelFilter::TRACE);
    }

    #[test]
    fn test_discard_without_log_file_installs_nothing() {
        init(&LogArg::default(), Fallback::Discard).unwrap();
    }
}
