//! `attrition form`: a line-oriented stand-in for the prediction form.
//!
//! Each input line is one action. `field=value` edits a field, `show` prints
//! the form, `predict` scores it, `reset` restores the derived defaults,
//! `quit` ends the session. Every failure is reported and the session goes on.

use std::io::{BufRead, Write};

use anyhow::Context;
use attrition_core::responses::PredictionResponse;
use attrition_core::{
    Classifier, FormDefaults, OverrideField, OverrideSet, OverrideValue, RawRow, predict, reconcile,
};
use serde::Serialize;

use crate::cli::{GlobalFlags, OutputFormat};
use crate::context::AppContext;
use crate::output::render;
use crate::ui;

const HELP: &str = "\
commands:
  <field>=<value>  set a field (Age, MonthlyIncome, DistanceFromHome,
                   WorkLifeBalance, OverTime, Department)
  show             print the current form
  predict          score the current form
  reset            restore the initial values
  help             print this help
  quit             end the session";

/// Handle `attrition form` on stdin/stdout.
pub fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let mut session = FormSession::new(
        &ctx.artifacts.pipeline,
        &ctx.artifacts.defaults,
        &ctx.form_defaults,
    );
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let prompt = ui::prefs().interactive;
    if prompt {
        eprintln!("{HELP}");
    }
    session.run(stdin.lock(), stdout.lock(), flags.format, prompt)
}

/// One row of `show` output.
#[derive(Debug, Serialize)]
struct FormFieldEntry {
    field: OverrideField,
    value: OverrideValue,
    domain: String,
    changed: bool,
}

/// What one input line did.
#[derive(Debug)]
enum Reply {
    Updated(OverrideField, OverrideValue),
    Form(Vec<FormFieldEntry>),
    Prediction(PredictionResponse),
    Reset,
    Help,
    Failed(String),
    Nothing,
    Quit,
}

/// Mutable form state over read-only artifacts.
pub struct FormSession<'a> {
    classifier: &'a dyn Classifier,
    defaults_row: &'a RawRow,
    initial: &'a FormDefaults,
    current: OverrideSet,
}

impl<'a> FormSession<'a> {
    pub fn new(
        classifier: &'a dyn Classifier,
        defaults_row: &'a RawRow,
        initial: &'a FormDefaults,
    ) -> Self {
        Self {
            classifier,
            defaults_row,
            initial,
            current: initial.overrides().clone(),
        }
    }

    /// Process lines until `quit` or end of input.
    pub fn run<R, W>(
        &mut self,
        input: R,
        mut out: W,
        format: OutputFormat,
        prompt: bool,
    ) -> anyhow::Result<()>
    where
        R: BufRead,
        W: Write,
    {
        if prompt {
            write!(out, "> ")?;
            out.flush()?;
        }

        for line in input.lines() {
            let line = line.context("failed to read form input")?;
            let reply = self.step(&line);
            if matches!(reply, Reply::Quit) {
                break;
            }
            write_reply(&mut out, &reply, format)?;
            if prompt {
                write!(out, "> ")?;
                out.flush()?;
            }
        }
        Ok(())
    }

    fn step(&mut self, line: &str) -> Reply {
        let line = line.trim();
        match line.to_ascii_lowercase().as_str() {
            "" => return Reply::Nothing,
            "quit" | "exit" | "q" => return Reply::Quit,
            "help" | "?" => return Reply::Help,
            "show" => return Reply::Form(self.entries()),
            "reset" => {
                self.current = self.initial.overrides().clone();
                return Reply::Reset;
            }
            "predict" => return self.predict(),
            _ => {}
        }

        let Some((name, value)) = line.split_once('=') else {
            return Reply::Failed(format!("unrecognized input '{line}' (try 'help')"));
        };
        match self.set(name, value) {
            Ok((field, value)) => Reply::Updated(field, value),
            Err(error) => Reply::Failed(error.to_string()),
        }
    }

    fn set(
        &mut self,
        name: &str,
        value: &str,
    ) -> Result<(OverrideField, OverrideValue), attrition_core::CoreError> {
        let field: OverrideField = name.parse()?;
        self.current.set_from_str(field, value)?;
        let value = self
            .current
            .get(field)
            .cloned()
            .unwrap_or_else(|| field.fallback());
        tracing::debug!(%field, %value, "form field updated");
        Ok((field, value))
    }

    fn predict(&self) -> Reply {
        let row = reconcile(self.defaults_row, &self.current);
        match predict(self.classifier, &row) {
            Ok(result) => Reply::Prediction(result.into()),
            Err(error) => Reply::Failed(error.to_string()),
        }
    }

    fn entries(&self) -> Vec<FormFieldEntry> {
        self.current
            .iter()
            .map(|(field, value)| FormFieldEntry {
                field,
                value: value.clone(),
                domain: field.domain().to_string(),
                changed: self.initial.overrides().get(field) != Some(value),
            })
            .collect()
    }
}

fn write_reply<W: Write>(out: &mut W, reply: &Reply, format: OutputFormat) -> anyhow::Result<()> {
    match reply {
        Reply::Updated(field, value) => writeln!(out, "{field} = {value}")?,
        Reply::Form(entries) => writeln!(out, "{}", render(entries, format)?)?,
        Reply::Prediction(response) if format == OutputFormat::Table => writeln!(
            out,
            "Attrition probability: {} ({})",
            response.probability_display, response.label_display
        )?,
        Reply::Prediction(response) => writeln!(out, "{}", render(response, format)?)?,
        Reply::Reset => writeln!(out, "form reset to initial values")?,
        Reply::Help => writeln!(out, "{HELP}")?,
        Reply::Failed(message) => writeln!(out, "error: {message}")?,
        Reply::Nothing | Reply::Quit => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use attrition_core::{FeatureRow, FeatureValue, InferenceError, derive_form_defaults};
    use pretty_assertions::assert_eq;

    use super::FormSession;
    use crate::cli::OutputFormat;
    use crate::context::AppContext;

    /// Leaves when on overtime, unless the row says otherwise.
    struct OvertimeModel;

    impl attrition_core::Classifier for OvertimeModel {
        fn predict_proba(&self, row: &FeatureRow) -> Result<[f64; 2], InferenceError> {
            match row.get("OverTime") {
                Some(FeatureValue::Text(value)) if value == "Yes" => Ok([0.2, 0.8]),
                Some(_) => Ok([0.9, 0.1]),
                None => Err(InferenceError::MissingColumn {
                    column: "OverTime".into(),
                }),
            }
        }
    }

    fn transcript(session: &mut FormSession<'_>, input: &str, format: OutputFormat) -> String {
        let mut out = Vec::new();
        session
            .run(input.as_bytes(), &mut out, format, false)
            .expect("session runs");
        String::from_utf8(out).expect("utf8 output")
    }

    #[test]
    fn edits_then_predicts_then_resets() {
        let row = attrition_core::RawRow::from_pairs([("Age", "40"), ("OverTime", "No")])
            .expect("valid row");
        let initial = derive_form_defaults(&row);
        let mut session = FormSession::new(&OvertimeModel, &row, &initial);

        let out = transcript(
            &mut session,
            "predict\novertime=Yes\npredict\nreset\npredict\n",
            OutputFormat::Table,
        );

        assert_eq!(
            out.lines().collect::<Vec<_>>(),
            vec![
                "Attrition probability: 10.00% (Likely to Stay)",
                "OverTime = Yes",
                "Attrition probability: 80.00% (May Leave)",
                "form reset to initial values",
                "Attrition probability: 10.00% (Likely to Stay)",
            ]
        );
    }

    #[test]
    fn errors_are_reported_and_the_session_continues() {
        let row = attrition_core::RawRow::from_pairs([("Age", "40"), ("OverTime", "No")])
            .expect("valid row");
        let initial = derive_form_defaults(&row);
        let mut session = FormSession::new(&OvertimeModel, &row, &initial);

        let out = transcript(
            &mut session,
            "age=90\nsalary=10\nhello\n\nage=50\nquit\nage=51\n",
            OutputFormat::Table,
        );
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("error: Validation error: Age"), "{}", lines[0]);
        assert!(lines[1].starts_with("error: Unknown field: salary"), "{}", lines[1]);
        assert!(lines[2].starts_with("error: unrecognized input 'hello'"), "{}", lines[2]);
        assert_eq!(lines[3], "Age = 50");
    }

    #[test]
    fn inference_errors_keep_the_session_alive() {
        let row = attrition_core::RawRow::from_pairs([("Age", "40")]).expect("valid row");
        let initial = derive_form_defaults(&row);
        let mut session = FormSession::new(&OvertimeModel, &row, &initial);

        let out = transcript(&mut session, "predict\nage=41\n", OutputFormat::Table);
        let lines: Vec<&str> = out.lines().collect();

        assert!(lines[0].contains("Inference failed"), "{}", lines[0]);
        assert_eq!(lines[1], "Age = 41");
    }

    #[test]
    fn show_marks_changed_fields_in_json() {
        let ctx = AppContext::sample();
        let mut session = FormSession::new(
            &ctx.artifacts.pipeline,
            &ctx.artifacts.defaults,
            &ctx.form_defaults,
        );

        let out = transcript(&mut session, "work_life_balance=1\nshow\n", OutputFormat::Raw);
        let mut lines = out.lines();
        assert_eq!(lines.next(), Some("WorkLifeBalance = 1"));

        let shown: serde_json::Value =
            serde_json::from_str(lines.next().expect("show output")).expect("json");
        let changed: Vec<&str> = shown
            .as_array()
            .expect("array")
            .iter()
            .filter(|entry| entry["changed"] == true)
            .filter_map(|entry| entry["field"].as_str())
            .collect();
        assert_eq!(changed, ["WorkLifeBalance"]);
    }

    #[test]
    fn json_predictions_render_the_full_response() {
        let ctx = AppContext::sample();
        let mut session = FormSession::new(
            &ctx.artifacts.pipeline,
            &ctx.artifacts.defaults,
            &ctx.form_defaults,
        );

        let out = transcript(&mut session, "predict\n", OutputFormat::Raw);
        let response: serde_json::Value = serde_json::from_str(out.trim()).expect("json");
        assert_eq!(response["label"], "likely_to_stay");
    }
}
