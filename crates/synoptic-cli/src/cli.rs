//! CLI argument definitions.

use std::net::IpAddr;
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "synoptic",
    version,
    about = "Synoptic pathology report generator",
    long_about = "Generate synoptic cancer pathology reports from staging forms.\n\n\
                  Organ definitions (sections, fields, TNM stage tables) are YAML\n\
                  documents loaded at startup; submitted forms are summarized into\n\
                  a diagnostic paragraph."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the form and report HTTP server.
    Serve(ServeArgs),

    /// List registered organ configurations.
    Organs(OrgansArgs),

    /// Render a report from a saved form submission.
    Report(ReportArgs),
}

#[derive(Parser)]
pub struct ServeArgs {
    /// Address to bind.
    #[arg(long, default_value = "127.0.0.1")]
    pub host: IpAddr,

    /// Port to listen on.
    #[arg(long, default_value_t = 8000)]
    pub port: u16,

    /// Organ config directory (default: SYNOPTIC_CONFIG_DIR or the workspace
    /// config/ directory).
    #[arg(long = "config-dir", value_name = "DIR")]
    pub config_dir: Option<PathBuf>,

    /// Static asset directory served at `/` (default: SYNOPTIC_STATIC_DIR or
    /// the workspace static/ directory).
    #[arg(long = "static-dir", value_name = "DIR")]
    pub static_dir: Option<PathBuf>,
}

#[derive(Parser)]
pub struct OrgansArgs {
    /// Organ config directory (default: SYNOPTIC_CONFIG_DIR or the workspace
    /// config/ directory).
    #[arg(long = "config-dir", value_name = "DIR")]
    pub config_dir: Option<PathBuf>,
}

#[derive(Parser)]
pub struct ReportArgs {
    /// Organ code, e.g. `lung`.
    #[arg(value_name = "ORGAN")]
    pub organ: String,

    /// JSON file with the submitted form values (field name to string,
    /// number, or list of strings).
    #[arg(value_name = "FORM_FILE")]
    pub form_file: PathBuf,

    /// Organ config directory (default: SYNOPTIC_CONFIG_DIR or the workspace
    /// config/ directory).
    #[arg(long = "config-dir", value_name = "DIR")]
    pub config_dir: Option<PathBuf>,

    /// Print the assembled context as JSON instead of the rendered report.
    #[arg(long = "json")]
    pub json: bool,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
