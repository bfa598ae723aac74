use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "form-builder",
    version,
    about = "Build, preview and validate forms in the terminal"
)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Option<Cmd>,
}

impl Cli {
    /// `run` without options when no subcommand is given.
    pub fn into_command(self) -> Cmd {
        self.cmd.unwrap_or(Cmd::Run {
            load: None,
            tick_rate: None,
            frame_rate: None,
        })
    }
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Cmd {
    /// Run the interactive TUI
    Run {
        /// Config document to load into the field list on startup
        #[arg(short, long, value_name = "FILE")]
        load: Option<PathBuf>,
        /// Tick rate, i.e. number of ticks per second
        #[arg(short, long, value_name = "FLOAT")]
        tick_rate: Option<f64>,
        /// Frame rate, i.e. number of frames per second
        #[arg(short, long, value_name = "FLOAT")]
        frame_rate: Option<f64>,
    },
    /// Validate a submission against a config document without the TUI
    Check {
        /// Config document (JSON array of field definitions)
        config: PathBuf,
        /// JSON object mapping field names to values
        #[arg(long, value_name = "FILE")]
        values: Option<PathBuf>,
    },
}
