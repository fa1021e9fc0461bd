use std::io::Write;

use clap::Parser;
use cli::{CommandLine, Command};
use desk::Desk;
use mtrh_store::patient::PatientDraft;
use mtrh_store::choices::{Gender, HealthcareUnit};
use shell::{DeleteScope, Host, Shell};
use tracing_subscriber::EnvFilter;

pub use self::error::{Error, Result};

mod cli;
mod desk;
mod error;
mod report;
mod shell;

fn main() -> core::result::Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = CommandLine::parse();
    let mut desk = Desk::open(&args.db)?;
    let mut out = std::io::stdout().lock();

    let res = match args.command.unwrap_or(Command::Shell) {
        Command::Shell => {
            let input = std::io::stdin().lock();
            Shell::new(&mut desk, input, &mut out).start()
        },
        Command::Add { patient_id, diagnosis, unit, mobile, gender, age } => {
            let draft = PatientDraft {
                diagnosis,
                healthcare_unit: report::choose::<HealthcareUnit>(&unit).unwrap_or(unit),
                patient_id,
                mobile_number: mobile,
                gender: report::choose::<Gender>(&gender).unwrap_or(gender),
                age,
            };
            desk.add_patient(draft).and_then(|id| {
                report::success(&mut out, &format!("Patient data saved successfully! (record {id})"))?;
                Ok(())
            })
        },
        Command::Show { patient_id, json } => {
            desk.find_patient(&patient_id).and_then(|patient| {
                if json {
                    writeln!(out, "{}", serde_json::to_string_pretty(&patient)?)?;
                } else {
                    report::record(&mut out, &patient)?;
                }
                Ok(())
            })
        },
        Command::Delete { patient_id, first } => {
            let scope = if first { DeleteScope::First } else { DeleteScope::All };
            desk.delete_patients(&patient_id, scope).and_then(|count| {
                report::deleted(&mut out, &patient_id, count)?;
                Ok(())
            })
        },
        Command::Export { out: path } => {
            desk.export_patients(&path).and_then(|count| {
                report::exported(&mut out, &path, count)?;
                Ok(())
            })
        },
        Command::Units => report::units(&mut out).map_err(Error::from),
    };

    match res {
        Err(err) if err.is_recoverable() => {
            report::recover(&mut out, err)?;
            std::process::exit(1);
        },
        Err(err) => {
            report::failure(&mut std::io::stderr(), &err.operator_message())?;
            Err(err.into())
        },
        Ok(()) => Ok(()),
    }
}
