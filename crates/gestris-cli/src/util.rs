use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use anyhow::Context;
use serde::Serialize;

/// Where a command writes its JSON report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportSink {
    Stdout,
    File(PathBuf),
}

impl From<Option<PathBuf>> for ReportSink {
    fn from(path: Option<PathBuf>) -> Self {
        path.map_or(Self::Stdout, Self::File)
    }
}

impl ReportSink {
    /// Writes `value` as pretty-printed JSON followed by a newline.
    pub fn write_json<T>(&self, value: &T) -> anyhow::Result<()>
    where
        T: Serialize,
    {
        match self {
            Self::Stdout => {
                write_pretty(io::stdout().lock(), value).context("Failed to write report to stdout")
            }
            Self::File(path) => write_file(path, value),
        }
    }
}

fn write_file<T>(path: &Path, value: &T) -> anyhow::Result<()>
where
    T: Serialize,
{
    let file = File::create(path)
        .with_context(|| format!("Failed to create report file: {}", path.display()))?;
    write_pretty(BufWriter::new(file), value)
        .with_context(|| format!("Failed to write report to {}", path.display()))
}

fn write_pretty<W, T>(mut writer: W, value: &T) -> io::Result<()>
where
    W: Write,
    T: Serialize,
{
    serde_json::to_writer_pretty(&mut writer, value)?;
    writeln!(writer)?;
    writer.flush()
}
