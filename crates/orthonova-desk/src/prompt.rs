//! Interactive entry of form fields on a terminal.

use std::io::{BufRead, Write};

use anyhow::{bail, Context, Result};
use orthonova_core::form::{FieldKind, FieldSpec, RegistrationForm};

/// Parse a `name=value` pair from the command line.
pub fn parse_pair(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.trim().to_string(), v.to_string()))
        .filter(|(k, _)| !k.is_empty())
        .ok_or_else(|| format!("expected name=value, got {:?}", s))
}

/// Prompt for every field of `form` that is still empty.
///
/// Select fields take either the option number or its exact text.
/// Multi-line fields end at the first blank line.
pub fn fill_missing<R: BufRead, W: Write>(
    form: &mut RegistrationForm,
    input: &mut R,
    output: &mut W,
) -> Result<()> {
    let missing: Vec<FieldSpec> = form.missing_fields().into_iter().cloned().collect();

    for field in missing {
        loop {
            let value = ask(&field, input, output)?;
            if value.trim().is_empty() {
                writeln!(output, "{} is required.", field.label)?;
                continue;
            }
            match form.set_value(&field.name, value) {
                Ok(()) => break,
                Err(e) => writeln!(output, "{}", e)?,
            }
        }
    }

    Ok(())
}

fn ask<R: BufRead, W: Write>(field: &FieldSpec, input: &mut R, output: &mut W) -> Result<String> {
    match &field.kind {
        FieldKind::Text => {
            write!(output, "{}: ", field.label)?;
            output.flush()?;
            read_line(input, &field.label)
        }
        FieldKind::Textarea => {
            writeln!(output, "{} (finish with an empty line):", field.label)?;
            let mut lines = Vec::new();
            loop {
                let line = read_line(input, &field.label)?;
                if line.is_empty() {
                    break;
                }
                lines.push(line);
            }
            Ok(lines.join("\n"))
        }
        FieldKind::Select { options } => {
            writeln!(output, "{}:", field.label)?;
            for (i, option) in options.iter().enumerate() {
                writeln!(output, "  {}) {}", i + 1, option)?;
            }
            write!(output, "> ")?;
            output.flush()?;
            let answer = read_line(input, &field.label)?;
            let picked = answer
                .trim()
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .and_then(|i| options.get(i));
            Ok(picked.cloned().unwrap_or(answer))
        }
    }
}

fn read_line<R: BufRead>(input: &mut R, label: &str) -> Result<String> {
    let mut line = String::new();
    let read = input
        .read_line(&mut line)
        .with_context(|| format!("failed to read {}", label))?;
    if read == 0 {
        bail!("input ended before {} was entered", label);
    }
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use orthonova_core::models::patient_form;
    use std::io::Cursor;

    #[test]
    fn test_parse_pair() {
        assert_eq!(
            parse_pair("name=Jane Doe"),
            Ok(("name".into(), "Jane Doe".into()))
        );
        assert_eq!(parse_pair("opdFees=a=b"), Ok(("opdFees".into(), "a=b".into())));
        assert!(parse_pair("name").is_err());
        assert!(parse_pair("=x").is_err());
    }

    #[test]
    fn test_fill_missing_prompts_only_empty_fields() {
        let mut form = RegistrationForm::new(patient_form());
        form.set_value("name", "Jane Doe").unwrap();

        let mut input = Cursor::new("34\n2\n9998887777\n12 Lake Road\nPune\n\n");
        let mut output = Vec::new();
        fill_missing(&mut form, &mut input, &mut output).unwrap();

        assert!(form.is_complete());
        assert_eq!(form.value("name"), "Jane Doe");
        assert_eq!(form.value("age"), "34");
        assert_eq!(form.value("gender"), "Female");
        assert_eq!(form.value("address"), "12 Lake Road\nPune");

        let shown = String::from_utf8(output).unwrap();
        assert!(!shown.contains("Full Name"));
        assert!(shown.contains("  3) Other\n"));
    }

    #[test]
    fn test_fill_missing_reprompts_bad_option_and_blank() {
        let mut form = RegistrationForm::new(patient_form());
        for (name, value) in [
            ("name", "Ravi"),
            ("age", "50"),
            ("contactNumber", "987"),
            ("address", "Nashik"),
        ] {
            form.set_value(name, value).unwrap();
        }

        let mut input = Cursor::new("\nUnknown\n9\nOther\n");
        let mut output = Vec::new();
        fill_missing(&mut form, &mut input, &mut output).unwrap();

        assert_eq!(form.value("gender"), "Other");
        let shown = String::from_utf8(output).unwrap();
        assert!(shown.contains("Gender is required."));
        assert!(shown.contains("\"Unknown\" is not an option for gender"));
    }

    #[test]
    fn test_fill_missing_fails_on_eof() {
        let mut form = RegistrationForm::new(patient_form());
        let mut input = Cursor::new("Jane\n");
        let mut output = Vec::new();

        assert!(fill_missing(&mut form, &mut input, &mut output).is_err());
    }
}
