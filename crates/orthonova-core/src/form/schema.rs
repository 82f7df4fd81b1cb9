//! Field descriptors for registration forms.

use serde::{Deserialize, Serialize};

/// How a field is entered.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FieldKind {
    /// Single-line text input
    #[default]
    Text,
    /// Multi-line text input
    Textarea,
    /// One of a fixed list of options
    Select { options: Vec<String> },
}

/// A single form field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "RawField", into = "RawField")]
pub struct FieldSpec {
    /// Label shown to the user
    pub label: String,
    /// Key under which the value is submitted
    pub name: String,
    pub kind: FieldKind,
}

/// Wire shape of a field: `{ label, name, type?, options? }`.
#[derive(Serialize, Deserialize)]
struct RawField {
    label: String,
    name: String,
    #[serde(rename = "type", default)]
    kind: RawKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    options: Vec<String>,
}

#[derive(Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
enum RawKind {
    #[default]
    Text,
    Textarea,
    Select,
}

impl TryFrom<RawField> for FieldSpec {
    type Error = String;

    fn try_from(raw: RawField) -> Result<Self, Self::Error> {
        let kind = match raw.kind {
            RawKind::Text => FieldKind::Text,
            RawKind::Textarea => FieldKind::Textarea,
            RawKind::Select if raw.options.is_empty() => {
                return Err(format!("select field {:?} has no options", raw.name));
            }
            RawKind::Select => FieldKind::Select {
                options: raw.options,
            },
        };
        Ok(FieldSpec {
            label: raw.label,
            name: raw.name,
            kind,
        })
    }
}

impl From<FieldSpec> for RawField {
    fn from(field: FieldSpec) -> Self {
        let (kind, options) = match field.kind {
            FieldKind::Text => (RawKind::Text, Vec::new()),
            FieldKind::Textarea => (RawKind::Textarea, Vec::new()),
            FieldKind::Select { options } => (RawKind::Select, options),
        };
        RawField {
            label: field.label,
            name: field.name,
            kind,
            options,
        }
    }
}

impl FieldSpec {
    pub fn text(label: &str, name: &str) -> Self {
        Self::new(label, name, FieldKind::Text)
    }

    pub fn textarea(label: &str, name: &str) -> Self {
        Self::new(label, name, FieldKind::Textarea)
    }

    pub fn select(label: &str, name: &str, options: Vec<String>) -> Self {
        Self::new(label, name, FieldKind::Select { options })
    }

    fn new(label: &str, name: &str, kind: FieldKind) -> Self {
        Self {
            label: label.to_string(),
            name: name.to_string(),
            kind,
        }
    }

    /// Options for a select field, empty otherwise.
    pub fn options(&self) -> &[String] {
        match &self.kind {
            FieldKind::Select { options } => options,
            _ => &[],
        }
    }

    /// Whether `value` may be stored in this field.
    ///
    /// Empty is always accepted (it means "not filled in yet").
    pub fn accepts(&self, value: &str) -> bool {
        match &self.kind {
            FieldKind::Select { options } => value.is_empty() || options.iter().any(|o| o == value),
            _ => true,
        }
    }
}

/// A titled, ordered list of fields.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FormSchema {
    pub title: String,
    pub fields: Vec<FieldSpec>,
}

impl FormSchema {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            fields: Vec::new(),
        }
    }

    /// Append a field.
    pub fn field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }

    /// Look up a field by name.
    pub fn get(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_accepts_only_options() {
        let field = FieldSpec::select("Gender", "gender", vec!["Male".into(), "Female".into()]);
        assert!(field.accepts("Male"));
        assert!(field.accepts(""));
        assert!(!field.accepts("male"));
        assert_eq!(field.options().len(), 2);
    }

    #[test]
    fn test_text_accepts_anything() {
        let field = FieldSpec::textarea("Address", "address");
        assert!(field.accepts("line one\nline two"));
        assert!(field.options().is_empty());
    }

    #[test]
    fn test_schema_from_json_defaults_to_text() {
        let schema: FormSchema = serde_json::from_str(
            r#"{
                "title": "Register",
                "fields": [
                    { "label": "Full Name", "name": "name" },
                    { "label": "Notes", "name": "notes", "type": "textarea" },
                    { "label": "Shift", "name": "shift", "type": "select", "options": ["AM", "PM"] }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(schema.fields[0].kind, FieldKind::Text);
        assert_eq!(schema.fields[1].kind, FieldKind::Textarea);
        assert_eq!(schema.get("shift").unwrap().options(), ["AM", "PM"]);
        assert!(schema.get("missing").is_none());
    }

    #[test]
    fn test_select_without_options_rejected() {
        let result: Result<FieldSpec, _> =
            serde_json::from_str(r#"{ "label": "Shift", "name": "shift", "type": "select" }"#);
        assert!(result.is_err());
    }
}
