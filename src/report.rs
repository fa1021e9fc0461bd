//! Operator-facing output shared by the one-shot commands and the shell.

use std::fmt::Display;
use std::io::{self, Write};
use std::path::Path;

use color_print::cformat;
use mtrh_store::choices::{Gender, HealthcareUnit};
use mtrh_store::patient::Patient;
use mtrh_store::ErrorKind;
use strum::IntoEnumIterator;

use crate::{Error, Result};

pub fn success<W: Write>(out: &mut W, msg: &str) -> io::Result<()> {
    writeln!(out, "{}", cformat!("<green>{}</green>", msg))
}

pub fn info<W: Write>(out: &mut W, msg: &str) -> io::Result<()> {
    writeln!(out, "{}", cformat!("<cyan>{}</cyan>", msg))
}

pub fn warning<W: Write>(out: &mut W, msg: &str) -> io::Result<()> {
    writeln!(out, "{}", cformat!("<yellow>{}</yellow>", msg))
}

pub fn failure<W: Write>(out: &mut W, msg: &str) -> io::Result<()> {
    writeln!(out, "{}", cformat!("<red>{}</red>", msg))
}

/// Shows a recoverable error to the operator and swallows it. Storage and
/// I/O failures are handed back untouched.
pub fn recover<W: Write>(out: &mut W, err: Error) -> Result<()> {
    if !err.is_recoverable() {
        return Err(err);
    }

    let msg = err.operator_message();
    match &err {
        Error::Store(e) if e.kind() == ErrorKind::Validation => warning(out, &msg)?,
        _ => failure(out, &msg)?,
    }
    Ok(())
}

pub fn record<W: Write>(out: &mut W, patient: &Patient) -> io::Result<()> {
    writeln!(out, "ID: {}", patient.id)?;
    writeln!(out, "Creation Date: {}", patient.creation_date)?;
    writeln!(out, "Diagnosis Date: {}", patient.diagnosis_date)?;
    writeln!(out, "Diagnosis: {}", patient.diagnosis)?;
    writeln!(out, "Healthcare Unit: {}", patient.healthcare_service_unit)?;
    writeln!(out, "Patient ID: {}", patient.patient_id)?;
    writeln!(out, "Mobile Number: {}", patient.mobile_number)?;
    writeln!(out, "Gender: {}", patient.gender)?;
    writeln!(out, "Age: {}", patient.age)
}

pub fn deleted<W: Write>(out: &mut W, patient_id: &str, count: u64) -> io::Result<()> {
    match count {
        0 => warning(out, "No record found for the given Patient ID!"),
        n => success(out, &format!("Deleted {n} record(s) for patient {patient_id}")),
    }
}

pub fn exported<W: Write>(out: &mut W, path: &Path, count: usize) -> io::Result<()> {
    match count {
        0 => warning(out, "No records found to download."),
        n => success(out, &format!("Exported {n} record(s) to {}", path.display())),
    }
}

pub fn units<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "Healthcare Service Units:")?;
    for (i, unit) in HealthcareUnit::iter().enumerate() {
        writeln!(out, "  {:>2}) {unit}", i + 1)?;
    }
    writeln!(out, "Genders:")?;
    for (i, gender) in Gender::iter().enumerate() {
        writeln!(out, "  {:>2}) {gender}", i + 1)?;
    }
    Ok(())
}

/// Resolves a 1-based list number or an exact option name.
pub fn choose<E>(answer: &str) -> Option<String>
where
    E: IntoEnumIterator + Display,
{
    let answer = answer.trim();
    if let Ok(n) = answer.parse::<usize>() {
        return n.checked_sub(1)
            .and_then(|i| E::iter().nth(i))
            .map(|option| option.to_string());
    }
    E::iter()
        .map(|option| option.to_string())
        .find(|option| option == answer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_choose_by_number_or_name() {
        assert_eq!(choose::<Gender>("3").as_deref(), Some("Other"));
        assert_eq!(choose::<Gender>(" Female ").as_deref(), Some("Female"));
        assert_eq!(choose::<Gender>("0"), None);
        assert_eq!(choose::<Gender>("4"), None);
        assert_eq!(choose::<HealthcareUnit>("10").as_deref(), Some("General-Oncology Telemedicine - MTRH"));
        assert_eq!(choose::<HealthcareUnit>("ENT"), None);
    }

    #[test]
    fn test_recover_hands_back_storage_errors() -> Result<()> {
        let mut out = Vec::new();

        recover(&mut out, Error::Store(mtrh_store::Error::AgeOutOfRange { age: 130 }))?;
        let res = recover(
            &mut out,
            Error::Store(mtrh_store::Error::StoreOpen { url: "x".to_string(), cause: "y".to_string() }),
        );

        assert!(String::from_utf8_lossy(&out).contains("Age must be between 0 and 120, got 130"));
        assert!(matches!(res, Err(Error::Store(mtrh_store::Error::StoreOpen { .. }))));
        Ok(())
    }
}
