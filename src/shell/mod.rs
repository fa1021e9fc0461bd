mod parser;
mod command;

use std::fmt::Display;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use mtrh_store::choices::{Gender, HealthcareUnit};
use mtrh_store::export::EXPORT_FILE_NAME;
use mtrh_store::patient::{Patient, PatientDraft};
use strum::IntoEnumIterator;

use crate::report;
use crate::Result;
use command::Command;
use parser::{ParseErr, Parser};

/// What the shell needs from whoever owns the patient store.
pub trait Host {
    fn add_patient(&mut self, draft: PatientDraft) -> Result<i64>;
    fn find_patient(&mut self, patient_id: &str) -> Result<Patient>;
    fn delete_patients(&mut self, patient_id: &str, scope: DeleteScope) -> Result<u64>;
    /// Writes the CSV export to `path` and returns the number of records in
    /// it. Nothing is written when the store is empty.
    fn export_patients(&mut self, path: &Path) -> Result<usize>;
    fn count_patients(&mut self) -> Result<i64>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteScope {
    All,
    First,
}

const HELP: &str = "\
add                  enter a new patient record
view <patient id>    show the first record for a patient
delete <patient id>  delete every record for a patient
delete-first <id>    delete only the oldest record for a patient
export [file]        write all records as CSV (default mtrh_data.csv)
count                number of stored records
units                list clinic names and genders
quit";

pub struct Shell<'a, T, R, W> where T: Host, R: BufRead, W: Write {
    host: &'a mut T,
    input: R,
    out: W,
    prompt: String,
}

impl<'a, T, R, W> Shell<'a, T, R, W> where T: Host, R: BufRead, W: Write {
    pub fn new(host_: &'a mut T, input: R, out: W) -> Self {
        Self {
            host: host_,
            input,
            out,
            prompt: String::from("(mtrh)> "),
        }
    }

    pub fn start(&mut self) -> Result<()> {
        writeln!(self.out, "MTRH Healthcare System - type 'help' for commands")?;
        self.main_loop()
    }

    fn print_prompt(&mut self) -> Result<()> {
        write!(self.out, "{}", self.prompt)?;
        self.out.flush()?;
        Ok(())
    }

    /// `None` once input is exhausted.
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    pub fn main_loop(&mut self) -> Result<()> {
        let mut parser = Parser {};
        loop {
            self.print_prompt()?;
            let Some(input) = self.read_line()? else {
                writeln!(self.out)?;
                return Ok(());
            };

            let command = match parser.parse(&input) {
                Ok(inner) => inner,
                Err(ParseErr::IncorrectNArguments(command, actual, expected)) => {
                    report::warning(
                        &mut self.out,
                        &format!("Incorrect number of args for command: {command}, {actual}/{expected}"),
                    )?;
                    continue;
                },
                Err(ParseErr::UnknownCommand(command)) => {
                    report::warning(&mut self.out, &format!("Unknown command: {command} (try 'help')"))?;
                    continue;
                },
                Err(ParseErr::EmptyLine) => continue,
            };

            if command == Command::Quit {
                return Ok(());
            }
            if let Err(err) = self.run(command) {
                report::recover(&mut self.out, err)?;
            }
        }
    }

    fn run(&mut self, command: Command) -> Result<()> {
        match command {
            Command::Add => self.guided_add()?,
            Command::View { patient_id } => {
                let patient = self.host.find_patient(&patient_id)?;
                report::record(&mut self.out, &patient)?;
            },
            Command::Delete { patient_id } => {
                let count = self.host.delete_patients(&patient_id, DeleteScope::All)?;
                report::deleted(&mut self.out, &patient_id, count)?;
            },
            Command::DeleteFirst { patient_id } => {
                let count = self.host.delete_patients(&patient_id, DeleteScope::First)?;
                report::deleted(&mut self.out, &patient_id, count)?;
            },
            Command::Export { file } => {
                let path = file.unwrap_or_else(|| PathBuf::from(EXPORT_FILE_NAME));
                let count = self.host.export_patients(&path)?;
                report::exported(&mut self.out, &path, count)?;
            },
            Command::Count => {
                let count = self.host.count_patients()?;
                report::info(&mut self.out, &format!("{count} record(s) stored"))?;
            },
            Command::Units => report::units(&mut self.out)?,
            Command::Help => writeln!(self.out, "{HELP}")?,
            Command::Quit => {},
        }
        Ok(())
    }

    fn guided_add(&mut self) -> Result<()> {
        let Some(patient_id) = self.ask("Patient ID")? else { return Ok(()) };
        let Some(diagnosis) = self.ask("Diagnosis")? else { return Ok(()) };
        let Some(healthcare_unit) = self.ask_choice::<HealthcareUnit>("Healthcare Service Unit")? else {
            return Ok(())
        };
        let Some(mobile_number) = self.ask("Mobile Number")? else { return Ok(()) };
        let Some(gender) = self.ask_choice::<Gender>("Gender")? else { return Ok(()) };
        let Some(age) = self.ask("Age (0-120)")? else { return Ok(()) };

        let draft = PatientDraft {
            diagnosis,
            healthcare_unit,
            patient_id,
            mobile_number,
            gender,
            age,
        };
        let id = self.host.add_patient(draft)?;
        report::success(&mut self.out, &format!("Patient data saved successfully! (record {id})"))?;
        Ok(())
    }

    fn ask(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.out, "{label}: ")?;
        self.out.flush()?;
        self.read_line()
    }

    /// Numbered pick list; loops until the answer names one of the options.
    fn ask_choice<E>(&mut self, label: &str) -> Result<Option<String>>
    where
        E: IntoEnumIterator + Display,
    {
        let n_options = E::iter().count();
        loop {
            writeln!(self.out, "{label}:")?;
            for (i, option) in E::iter().enumerate() {
                writeln!(self.out, "  {:>2}) {option}", i + 1)?;
            }
            let Some(answer) = self.ask("Choice")? else { return Ok(None) };
            if let Some(choice) = report::choose::<E>(&answer) {
                return Ok(Some(choice));
            }
            report::warning(&mut self.out, &format!("Pick a number from 1 to {n_options}"))?;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use crate::desk::Desk;
    use super::*;

    fn run_script(desk: &mut Desk, script: &str) -> Result<String> {
        let mut out = Vec::new();
        Shell::new(desk, Cursor::new(script.as_bytes()), &mut out).start()?;
        Ok(String::from_utf8_lossy(&out).into_owned())
    }

    #[test]
    fn test_guided_add_then_view() -> Result<()> {
        let mut desk = Desk::open("sqlite::memory:")?;
        // unit 8 is MOPC CLINIC - MTRH, gender 2 is Female
        let script = "add\nP-1001\nMalaria\n8\n0712345678\n2\n34\nview P-1001\nquit\n";

        let output = run_script(&mut desk, script)?;

        assert!(output.contains("Patient data saved successfully! (record 1)"));
        assert!(output.contains("Diagnosis: Malaria"));
        assert!(output.contains("Healthcare Unit: MOPC CLINIC - MTRH"));
        assert!(output.contains("Gender: Female"));
        Ok(())
    }

    #[test]
    fn test_choice_reprompts() -> Result<()> {
        let mut desk = Desk::open("sqlite::memory:")?;
        let script = "add\nP-2\nAsthma\n0\n11\nENT - General - MTRH\n0700\nmale\nMale\n12\n";

        let output = run_script(&mut desk, script)?;

        assert_eq!(output.matches("Pick a number from 1 to 10").count(), 2);
        assert_eq!(output.matches("Pick a number from 1 to 3").count(), 1);
        assert_eq!(desk.find_patient("P-2")?.healthcare_service_unit, "ENT - General - MTRH");
        Ok(())
    }

    #[test]
    fn test_validation_warns_and_continues() -> Result<()> {
        let mut desk = Desk::open("sqlite::memory:")?;
        let script = "add\nP-3\n\n1\n0700\n1\n40\ncount\n";

        let output = run_script(&mut desk, script)?;

        assert!(output.contains("All fields must be filled! Missing: diagnosis"));
        assert!(output.contains("0 record(s) stored"));
        Ok(())
    }

    #[test]
    fn test_unknown_patient_and_bad_commands() -> Result<()> {
        let mut desk = Desk::open("sqlite::memory:")?;
        let script = "view ghost\ndelete ghost\nfly away\nview\n";

        let output = run_script(&mut desk, script)?;

        assert!(output.contains("No record found for the given Patient ID!"));
        assert!(output.contains("Unknown command: fly"));
        assert!(output.contains("Incorrect number of args for command: view, 0/1"));
        Ok(())
    }
}
