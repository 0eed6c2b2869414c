//! Explicit, typed column layout of a record file.
//!
//! A `Schema` is the single authority for three things: the column order used
//! when a file is written, the set of header names accepted when a file is
//! read, and how each raw cell is turned into a [`FieldValue`]. Boolean
//! coercion therefore applies to every `Bool` column uniformly instead of to a
//! hand-picked list of fields.

use crate::model::field::{FieldDef, FieldError, FieldType, FieldValue};
use crate::model::record::Record;
use serde_json::{Map, Value};

pub const SUBMITTED_AT: &str = "submittedAt";
pub const STATUS: &str = "status";

/// Separator used when a list (e.g. tags) is flattened into one text cell.
pub const LIST_SEPARATOR: &str = ";";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    pub name: String,
    pub key_field: String,
    pub initial_status: String,
    pub fields: Vec<FieldDef>,
}

impl Schema {
    pub fn new(
        name: impl Into<String>,
        key_field: impl Into<String>,
        initial_status: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            key_field: key_field.into(),
            initial_status: initial_status.into(),
            fields: Vec::new(),
        }
    }

    fn push(mut self, name: &str, field_type: FieldType) -> Self {
        self.fields.push(FieldDef {
            name: name.to_string(),
            field_type,
        });
        self
    }

    pub fn text(self, name: &str) -> Self {
        self.push(name, FieldType::Text)
    }

    pub fn boolean(self, name: &str) -> Self {
        self.push(name, FieldType::Bool)
    }

    pub fn number(self, name: &str) -> Self {
        self.push(name, FieldType::Number)
    }

    /// Model/brand registrations, keyed by e-mail.
    pub fn registrations() -> Self {
        Schema::new("registrations", "email", "pending")
            .text("email")
            .text("fullName")
            .text("stageName")
            .text("role")
            .text("gender")
            .text("dob")
            .text("location")
            .text("height")
            .number("bust")
            .number("waist")
            .number("hips")
            .number("shoeSize")
            .text("hairColor")
            .text("eyeColor")
            .text("tags")
            .text("bio")
            .text("instagram")
            .text("contactEmail")
            .text(STATUS)
            .boolean("verified")
            .boolean("featured")
            .text(SUBMITTED_AT)
    }

    /// Contact-form inquiries, keyed by a server generated id.
    pub fn inquiries() -> Self {
        Schema::new("inquiries", "id", "new")
            .text("id")
            .text("name")
            .text("email")
            .text("subject")
            .text("message")
            .text(STATUS)
            .text(SUBMITTED_AT)
    }

    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Turns one raw cell into a typed value.
    pub fn parse_cell(def: &FieldDef, raw: &str) -> Result<FieldValue, String> {
        match def.field_type {
            FieldType::Text => Ok(FieldValue::Text(raw.to_string())),
            FieldType::Bool => {
                let trimmed = raw.trim();
                if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("false") {
                    Ok(FieldValue::Bool(false))
                } else if trimmed.eq_ignore_ascii_case("true") {
                    Ok(FieldValue::Bool(true))
                } else {
                    Err(format!("'{}' is not a boolean", raw))
                }
            }
            FieldType::Number => {
                let trimmed = raw.trim();
                if trimmed.is_empty() || trimmed.parse::<f64>().is_ok() {
                    Ok(FieldValue::Number(trimmed.to_string()))
                } else {
                    Err(format!("'{}' is not a number", raw))
                }
            }
        }
    }

    /// Converts a loosely typed JSON object into a [`Record`].
    ///
    /// Null values are skipped, arrays of strings are joined with
    /// [`LIST_SEPARATOR`]. Every unknown field or type mismatch is reported;
    /// a partially valid object never produces a record.
    pub fn coerce(&self, object: &Map<String, Value>) -> Result<Record, Vec<FieldError>> {
        let mut record = Record::new();
        let mut errors = Vec::new();

        for (name, value) in object {
            let Some(def) = self.field(name) else {
                errors.push(FieldError::new(name, "unknown field"));
                continue;
            };

            let coerced = match (def.field_type, value) {
                (_, Value::Null) => continue,
                (FieldType::Bool, Value::Bool(b)) => Ok(FieldValue::Bool(*b)),
                (FieldType::Number, Value::Number(n)) => Ok(FieldValue::Number(n.to_string())),
                (FieldType::Text, Value::Number(n)) => Ok(FieldValue::Text(n.to_string())),
                (_, Value::String(s)) => Schema::parse_cell(def, s),
                (FieldType::Text, Value::Array(items)) => items
                    .iter()
                    .map(|item| item.as_str().ok_or_else(|| "expected a list of strings".to_string()))
                    .collect::<Result<Vec<_>, _>>()
                    .map(|parts| FieldValue::Text(parts.join(LIST_SEPARATOR))),
                (field_type, _) => Err(format!("expected a {:?} value", field_type)),
            };

            match coerced {
                Ok(v) => record.set(name.clone(), v),
                Err(message) => errors.push(FieldError::new(name, message)),
            }
        }

        if errors.is_empty() {
            Ok(record)
        } else {
            Err(errors)
        }
    }
}
