use crate::LogFormat;
use std::path::{Path, PathBuf};
use structopt::StructOpt;

#[derive(Debug, StructOpt, Clone)]
pub struct InputOpt {
    /// Reads the hook context from this file. If none is given, the context
    /// is read from STDIN
    #[structopt(short = "i", long, parse(from_os_str))]
    pub input: Option<PathBuf>,

    /// Pretty prints the rewritten context
    #[structopt(long)]
    pub pretty: bool,
}

#[derive(Debug, StructOpt, Clone)]
pub enum Subcommand {
    /// Rewrites association filters and adds the joins they need
    JoinQuery(InputOpt),
    /// Turns `$groupBy` into a grouping directive
    GroupBy(InputOpt),
    /// Runs the grouping hook, then the join hook, as a find request would
    Find(InputOpt),
}

impl Subcommand {
    pub fn input(&self) -> &InputOpt {
        match self {
            Subcommand::JoinQuery(input) | Subcommand::GroupBy(input) | Subcommand::Find(input) => input,
        }
    }
}

#[derive(Debug, StructOpt, Clone)]
#[structopt(version = env!("CARGO_PKG_VERSION"))]
/// Runs the association query hooks over a hook context
pub struct EngineOpt {
    /// Path to the datamodel document
    #[structopt(short = "d", long, env = "JOIN_QUERY_DATAMODEL", parse(from_os_str))]
    pub datamodel: PathBuf,

    /// Log output format, `text` or `json`
    #[structopt(long = "log-format", env = "JOIN_QUERY_LOG_FORMAT")]
    log_format: Option<String>,

    #[structopt(subcommand)]
    pub subcommand: Subcommand,
}

impl EngineOpt {
    pub fn log_format(&self) -> LogFormat {
        match self.log_format.as_deref() {
            Some("text") => LogFormat::Text,
            _ => LogFormat::Json,
        }
    }

    pub fn datamodel_path(&self) -> &Path {
        &self.datamodel
    }
}
