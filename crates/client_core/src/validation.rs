//! Field-level "required" checks run on blur and before dispatch.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldValue {
    pub name: String,
    pub value: String,
}

impl FieldValue {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Payloads that expose named field values to a [`ValidationGate`].
pub trait FieldSource {
    fn field_values(&self) -> Vec<FieldValue> {
        Vec::new()
    }
}

/// Field name to message, in rule order. An empty message means the field is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    entries: Vec<(String, String)>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.entries.iter().all(|(_, message)| message.is_empty())
    }

    /// `Some("")` for a checked valid field, `None` for a field never checked.
    pub fn message(&self, field: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, message)| message.as_str())
    }

    pub fn errors(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .filter(|(_, message)| !message.is_empty())
            .map(|(name, message)| (name.as_str(), message.as_str()))
    }

    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Replaces the entry for `field`, or appends it when absent.
    pub fn merge(&mut self, field: &str, message: String) {
        match self.entries.iter_mut().find(|(name, _)| name == field) {
            Some((_, existing)) => *existing = message,
            None => self.entries.push((field.to_string(), message)),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationGate {
    required: Vec<String>,
}

impl ValidationGate {
    pub fn required<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            required: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// Only emptiness is checked; whitespace counts as a value.
    pub fn validate_field(&self, name: &str, value: &str) -> String {
        if value.is_empty() {
            format!("The {name} is required")
        } else {
            String::new()
        }
    }

    /// Checks every required field. Fields missing from `fields` count as empty.
    pub fn validate_all(&self, fields: &[FieldValue]) -> ValidationResult {
        let mut result = ValidationResult::default();
        for name in &self.required {
            let value = fields
                .iter()
                .find(|field| &field.name == name)
                .map(|field| field.value.as_str())
                .unwrap_or_default();
            result.merge(name, self.validate_field(name, value));
        }
        result
    }
}
