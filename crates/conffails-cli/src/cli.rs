use clap::Parser;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "Roy Nguyen",
    version,
    about = "conffails - Triages OMEGA conformational-search logs: writes per-library warning reports and collects the 3-D structure files of failed molecules.",
    after_help = "Run from a working directory containing the 'Conformers-Logs' and 'Compound-3D-Structure' folders.",
    help_template = HELP_TEMPLATE,
)]
pub struct Cli {
    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}
