use std::path::PathBuf;

use clap::{Parser, Subcommand};
use mtrh_store::export::EXPORT_FILE_NAME;

#[derive(Debug, Parser)]
#[clap(name = "mtrh", about = "MTRH patient intake desk")]
pub struct CommandLine {
    /// SQLite database holding the patients table.
    #[clap(long, default_value = "sqlite://mtrh.db")]
    pub db: String,
    #[clap(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Interactive intake prompt (the default).
    Shell,
    Add {
        #[clap(long)]
        patient_id: String,
        #[clap(long)]
        diagnosis: String,
        /// Clinic name, or its number from `mtrh units`.
        #[clap(long)]
        unit: String,
        #[clap(long)]
        mobile: String,
        /// Male, Female or Other, or its number from `mtrh units`.
        #[clap(long)]
        gender: String,
        #[clap(long)]
        age: String,
    },
    Show {
        patient_id: String,
        #[clap(long, action)]
        json: bool,
    },
    Delete {
        patient_id: String,
        /// Only remove the oldest matching record.
        #[clap(long, action)]
        first: bool,
    },
    Export {
        #[clap(long, default_value = EXPORT_FILE_NAME)]
        out: PathBuf,
    },
    Units,
}
