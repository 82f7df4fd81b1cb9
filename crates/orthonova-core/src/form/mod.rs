//! Generic registration form engine.
//!
//! A [`RegistrationForm`] knows nothing about patients, doctors or stores.
//! It holds the values typed so far for an arbitrary [`FormSchema`] and hands
//! the full value map to a caller-supplied [`SubmitHandler`] on submit.
//!
//! Submission outcome:
//! - handler returns `true`: status becomes `Succeeded` and all values clear
//! - handler returns `false`: status becomes `Failed` and values are kept
//!
//! `submit` borrows the form mutably for the whole round trip, so one form
//! instance can never have two submissions in flight.

mod schema;

pub use schema::*;

use std::collections::HashMap;

use async_trait::async_trait;
use thiserror::Error;

/// Entered values keyed by field name.
pub type FormValues = HashMap<String, String>;

/// Banner shown after a successful submission.
pub const SUCCESS_BANNER: &str = "Saved successfully!";

/// Banner shown after a failed submission.
pub const ERROR_BANNER: &str = "Error saving data.";

/// Form errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormError {
    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("{value:?} is not an option for {field}")]
    InvalidOption { field: String, value: String },

    #[error("Required fields missing: {}", .0.join(", "))]
    MissingFields(Vec<String>),
}

pub type FormResult<T> = Result<T, FormError>;

/// Outcome of the most recent submission attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionStatus {
    /// Nothing submitted yet
    #[default]
    Idle,
    Succeeded,
    Failed,
}

impl SubmissionStatus {
    /// Banner text for this status, if any.
    pub fn banner(&self) -> Option<&'static str> {
        match self {
            SubmissionStatus::Idle => None,
            SubmissionStatus::Succeeded => Some(SUCCESS_BANNER),
            SubmissionStatus::Failed => Some(ERROR_BANNER),
        }
    }
}

/// Receives the submitted values and reports whether they were saved.
#[async_trait]
pub trait SubmitHandler: Send {
    async fn on_submit(&mut self, values: &FormValues) -> bool;
}

/// Form state for one schema.
#[derive(Debug, Clone)]
pub struct RegistrationForm {
    schema: FormSchema,
    values: FormValues,
    status: SubmissionStatus,
}

impl RegistrationForm {
    pub fn new(schema: FormSchema) -> Self {
        Self {
            schema,
            values: FormValues::new(),
            status: SubmissionStatus::Idle,
        }
    }

    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    pub fn title(&self) -> &str {
        &self.schema.title
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn status(&self) -> SubmissionStatus {
        self.status
    }

    /// Current value of a field, empty if never set.
    pub fn value(&self, name: &str) -> &str {
        self.values.get(name).map(String::as_str).unwrap_or("")
    }

    /// Update one field, leaving the others untouched.
    pub fn set_value(&mut self, name: &str, value: impl Into<String>) -> FormResult<()> {
        let field = self
            .schema
            .get(name)
            .ok_or_else(|| FormError::UnknownField(name.to_string()))?;

        let value = value.into();
        if !field.accepts(&value) {
            return Err(FormError::InvalidOption {
                field: name.to_string(),
                value,
            });
        }

        self.values.insert(name.to_string(), value);
        Ok(())
    }

    /// Fields that are still empty, in schema order.
    pub fn missing_fields(&self) -> Vec<&FieldSpec> {
        self.schema
            .fields
            .iter()
            .filter(|f| self.value(&f.name).trim().is_empty())
            .collect()
    }

    /// Whether every field has a value.
    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// Submit the current values to `handler`.
    ///
    /// Refuses (without calling the handler or touching the status) while
    /// any field is empty.
    pub async fn submit<H>(&mut self, handler: &mut H) -> FormResult<SubmissionStatus>
    where
        H: SubmitHandler + ?Sized,
    {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(FormError::MissingFields(
                missing.into_iter().map(|f| f.name.clone()).collect(),
            ));
        }

        if handler.on_submit(&self.values).await {
            self.status = SubmissionStatus::Succeeded;
            self.values.clear();
        } else {
            self.status = SubmissionStatus::Failed;
        }

        Ok(self.status)
    }

    /// Plain-text view of the form.
    pub fn render(&self) -> String {
        let mut out = format!("== {} ==\n", self.schema.title);

        if let Some(banner) = self.status.banner() {
            out.push_str(&format!("[{}]\n", banner));
        }

        for field in &self.schema.fields {
            let value = self.value(&field.name);
            match &field.kind {
                FieldKind::Text => out.push_str(&format!("{}: {}\n", field.label, value)),
                FieldKind::Textarea => {
                    out.push_str(&format!("{}:\n", field.label));
                    for line in value.lines() {
                        out.push_str(&format!("  {}\n", line));
                    }
                }
                FieldKind::Select { options } => out.push_str(&format!(
                    "{} ({}): {}\n",
                    field.label,
                    options.join("/"),
                    value
                )),
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Handler that returns a fixed answer and records what it saw.
    struct Scripted {
        answer: bool,
        seen: Vec<FormValues>,
    }

    impl Scripted {
        fn new(answer: bool) -> Self {
            Self {
                answer,
                seen: Vec::new(),
            }
        }
    }

    #[async_trait]
    impl SubmitHandler for Scripted {
        async fn on_submit(&mut self, values: &FormValues) -> bool {
            self.seen.push(values.clone());
            self.answer
        }
    }

    fn schema() -> FormSchema {
        FormSchema::new("Register Pet")
            .field(FieldSpec::text("Name", "name"))
            .field(FieldSpec::select(
                "Kind",
                "kind",
                vec!["Cat".into(), "Dog".into()],
            ))
            .field(FieldSpec::textarea("Notes", "notes"))
    }

    fn filled() -> RegistrationForm {
        let mut form = RegistrationForm::new(schema());
        form.set_value("name", "Rex").unwrap();
        form.set_value("kind", "Dog").unwrap();
        form.set_value("notes", "Friendly").unwrap();
        form
    }

    #[test]
    fn test_new_form_is_empty() {
        let form = RegistrationForm::new(schema());
        assert!(form.values().is_empty());
        assert_eq!(form.status(), SubmissionStatus::Idle);
        assert_eq!(form.missing_fields().len(), 3);
    }

    #[test]
    fn test_set_value_merges() {
        let mut form = RegistrationForm::new(schema());
        form.set_value("name", "Rex").unwrap();
        form.set_value("notes", "Bites").unwrap();
        form.set_value("name", "Max").unwrap();

        assert_eq!(form.value("name"), "Max");
        assert_eq!(form.value("notes"), "Bites");
        assert_eq!(form.value("kind"), "");
    }

    #[test]
    fn test_set_value_rejects_unknown_field_and_option() {
        let mut form = RegistrationForm::new(schema());
        assert_eq!(
            form.set_value("colour", "brown"),
            Err(FormError::UnknownField("colour".into()))
        );
        assert!(matches!(
            form.set_value("kind", "Horse"),
            Err(FormError::InvalidOption { .. })
        ));
        assert!(form.values().is_empty());
    }

    #[tokio::test]
    async fn test_submit_success_clears_values() {
        let mut form = filled();
        let mut handler = Scripted::new(true);

        let status = form.submit(&mut handler).await.unwrap();

        assert_eq!(status, SubmissionStatus::Succeeded);
        assert!(form.values().is_empty());
        assert_eq!(handler.seen.len(), 1);
        assert_eq!(handler.seen[0]["kind"], "Dog");
    }

    #[tokio::test]
    async fn test_submit_failure_keeps_values() {
        let mut form = filled();
        let mut handler = Scripted::new(false);

        let status = form.submit(&mut handler).await.unwrap();

        assert_eq!(status, SubmissionStatus::Failed);
        assert_eq!(form.value("name"), "Rex");
        assert_eq!(form.value("notes"), "Friendly");
    }

    #[tokio::test]
    async fn test_submit_blocked_when_incomplete() {
        let mut form = RegistrationForm::new(schema());
        form.set_value("name", "Rex").unwrap();
        form.set_value("notes", "   ").unwrap();
        let mut handler = Scripted::new(true);

        let err = form.submit(&mut handler).await.unwrap_err();

        assert_eq!(
            err,
            FormError::MissingFields(vec!["kind".into(), "notes".into()])
        );
        assert!(handler.seen.is_empty());
        assert_eq!(form.status(), SubmissionStatus::Idle);
    }

    #[tokio::test]
    async fn test_status_overwritten_each_attempt() {
        let mut form = filled();

        form.submit(&mut Scripted::new(false)).await.unwrap();
        assert_eq!(form.status(), SubmissionStatus::Failed);

        form.submit(&mut Scripted::new(true)).await.unwrap();
        assert_eq!(form.status(), SubmissionStatus::Succeeded);

        form.set_value("name", "Tom").unwrap();
        form.set_value("kind", "Cat").unwrap();
        form.set_value("notes", "Shy").unwrap();
        form.submit(&mut Scripted::new(false)).await.unwrap();
        assert_eq!(form.status(), SubmissionStatus::Failed);
        assert_eq!(form.status().banner(), Some(ERROR_BANNER));
    }

    #[test]
    fn test_render() {
        let mut form = filled();
        form.set_value("notes", "Friendly\nVaccinated").unwrap();
        let text = form.render();

        assert!(text.starts_with("== Register Pet ==\n"));
        assert!(text.contains("Name: Rex\n"));
        assert!(text.contains("Kind (Cat/Dog): Dog\n"));
        assert!(text.contains("Notes:\n  Friendly\n  Vaccinated\n"));
        assert!(!text.contains(SUCCESS_BANNER));
    }
}
