//! CLI argument definitions for the WebDocs renderer.

use std::path::PathBuf;

use catln_source::DEFAULT_URL;
use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "catln-webdocs",
    version,
    about = "Render Catln compiler dumps as text or HTML",
    long_about = "Render the intermediate representations served by the Catln compiler.\n\n\
                  Fetches typecheck, desugar, constraint, LLVM and documentation dumps\n\
                  from a running compiler server or from a directory of saved dumps."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[command(flatten)]
    pub source: SourceArgs,

    /// Output format of rendered views.
    #[arg(long = "format", value_enum, default_value = "text", global = true)]
    pub format: OutputFormatArg,

    /// Show metas as raw JSON instead of rendered types.
    #[arg(long = "raw-meta", global = true)]
    pub raw_meta: bool,

    /// Write the rendered view to a file instead of stdout.
    #[arg(long = "output", short = 'o', value_name = "FILE", global = true)]
    pub output: Option<PathBuf>,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
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

/// Where dumps come from.
#[derive(Args)]
pub struct SourceArgs {
    /// Address of the compiler server.
    #[arg(
        long = "url",
        env = "CATLN_WEBDOCS_URL",
        default_value = DEFAULT_URL,
        global = true
    )]
    pub url: String,

    /// Read dumps from `<DIR>/<view>.json` instead of the server.
    #[arg(long = "dir", value_name = "DIR", global = true)]
    pub dir: Option<PathBuf>,

    /// Request timeout in seconds.
    #[arg(long = "timeout", value_name = "SECS", default_value_t = 30, global = true)]
    pub timeout: u64,
}

#[derive(Subcommand)]
pub enum Command {
    /// Typechecked program with object details.
    Typecheck,

    /// Desugared program.
    Desugar,

    /// Constraint solving steps.
    Constrain,

    /// Generated LLVM modules.
    Llvm,

    /// A documentation page, the last page when none is given.
    Docs {
        #[arg(value_name = "PAGE")]
        page: Option<String>,
    },

    /// List the documentation pages.
    Pages,

    /// Render the view for a browser path such as `/docs/main.ct`.
    Route {
        #[arg(value_name = "PATH")]
        path: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormatArg {
    Text,
    Html,
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
