//! Server-rendered intake page.
//!
//! One form carries every field; the View, Delete and Download buttons reuse
//! it through `formaction` so the patient id only has to be typed once.

use mtrh_store::choices::{Gender, HealthcareUnit};
use mtrh_store::patient::{Patient, PatientDraft, PATIENT_ID_MAX_LEN};
use strum::IntoEnumIterator;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flash {
    Success(String),
    Info(String),
    Warning(String),
    Error(String),
}

impl Flash {
    fn class(&self) -> &'static str {
        match self {
            Flash::Success(_) => "success",
            Flash::Info(_) => "info",
            Flash::Warning(_) => "warning",
            Flash::Error(_) => "error",
        }
    }

    fn text(&self) -> &str {
        match self {
            Flash::Success(t) | Flash::Info(t) | Flash::Warning(t) | Flash::Error(t) => t,
        }
    }
}

#[derive(Debug, Default)]
pub struct IntakePage<'a> {
    pub flash: Option<Flash>,
    pub draft: Option<&'a PatientDraft>,
    pub patient_id: Option<&'a str>,
    pub record: Option<&'a Patient>,
}

impl IntakePage<'_> {
    pub fn render(&self) -> String {
        let draft = self.draft.cloned().unwrap_or_default();
        let patient_id = self.patient_id.unwrap_or(draft.patient_id.as_str());

        let mut html = String::with_capacity(4096);
        html.push_str(concat!(
            "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n",
            "<meta charset=\"utf-8\">\n",
            "<title>MTRH Healthcare System</title>\n",
            "<link rel=\"stylesheet\" href=\"/style.css\">\n",
            "</head>\n<body>\n<h1>MTRH Healthcare System</h1>\n",
        ));

        if let Some(flash) = &self.flash {
            html.push_str(&format!("<p class=\"flash {}\">{}</p>\n", flash.class(), escape(flash.text())));
        }
        if let Some(record) = self.record {
            render_record(&mut html, record);
        }

        html.push_str("<form method=\"post\" action=\"/patients\">\n");
        html.push_str("<h2>Enter Patient ID</h2>\n");
        html.push_str(&format!(
            "<label>Patient ID <input name=\"patient_id\" maxlength=\"{PATIENT_ID_MAX_LEN}\" value=\"{}\"></label>\n",
            escape(patient_id)
        ));

        html.push_str("<h2>Enter Patient Details</h2>\n");
        html.push_str(&format!(
            "<label>Diagnosis <input name=\"diagnosis\" value=\"{}\"></label>\n",
            escape(&draft.diagnosis)
        ));
        render_select(
            &mut html,
            "Healthcare Service Unit",
            "healthcare_unit",
            HealthcareUnit::iter().map(|u| u.to_string()),
            &draft.healthcare_unit,
        );
        html.push_str(&format!(
            "<label>Mobile Number <input name=\"mobile_number\" value=\"{}\"></label>\n",
            escape(&draft.mobile_number)
        ));
        render_select(
            &mut html,
            "Gender",
            "gender",
            Gender::iter().map(|g| g.to_string()),
            &draft.gender,
        );
        html.push_str(&format!(
            "<label>Age <input name=\"age\" type=\"number\" min=\"0\" max=\"120\" step=\"1\" value=\"{}\"></label>\n",
            escape(if draft.age.is_empty() { "0" } else { draft.age.as_str() })
        ));

        html.push_str(concat!(
            "<div class=\"actions\">\n",
            "<button type=\"submit\">Submit Data</button>\n",
            "<button type=\"submit\" formmethod=\"get\" formaction=\"/patients/view\">View Patient</button>\n",
            "<button type=\"submit\" formaction=\"/patients/delete\">Delete Patient</button>\n",
            "<button type=\"submit\" formmethod=\"get\" formaction=\"/patients/export\">Download All Data as CSV</button>\n",
            "</div>\n</form>\n</body>\n</html>\n",
        ));

        html
    }
}

fn render_select(
    html: &mut String,
    label: &str,
    name: &str,
    options: impl Iterator<Item = String>,
    selected: &str,
) {
    html.push_str(&format!("<label>{label} <select name=\"{name}\">\n"));
    for option in options {
        let attr = if option == selected { " selected" } else { "" };
        let option = escape(&option);
        html.push_str(&format!("<option value=\"{option}\"{attr}>{option}</option>\n"));
    }
    html.push_str("</select></label>\n");
}

fn render_record(html: &mut String, record: &Patient) {
    let age = record.age.to_string();
    let rows = [
        ("ID", record.id.to_string()),
        ("Creation Date", record.creation_date.clone()),
        ("Diagnosis Date", record.diagnosis_date.clone()),
        ("Diagnosis", record.diagnosis.clone()),
        ("Healthcare Unit", record.healthcare_service_unit.clone()),
        ("Patient ID", record.patient_id.clone()),
        ("Mobile Number", record.mobile_number.clone()),
        ("Gender", record.gender.clone()),
        ("Age", age),
    ];

    html.push_str("<dl class=\"record\">\n");
    for (label, value) in rows {
        html.push_str(&format!("<dt>{label}</dt><dd>{}</dd>\n", escape(&value)));
    }
    html.push_str("</dl>\n");
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}
