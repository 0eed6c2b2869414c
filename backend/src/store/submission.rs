use chrono::{DateTime, SecondsFormat, Utc};
use common::model::field::{FieldType, FieldValue};
use common::model::record::Record;
use common::model::schema::{Schema, STATUS, SUBMITTED_AT};

/// Prepares a freshly submitted record for its first write.
///
/// Sets `submittedAt` and the schema's initial `status` (overriding whatever
/// the submitter sent) and defaults every unset boolean to `false`.
pub fn stamp(mut record: Record, schema: &Schema, now: DateTime<Utc>) -> Record {
    if schema.field(SUBMITTED_AT).is_some() {
        record.set(
            SUBMITTED_AT,
            FieldValue::Text(now.to_rfc3339_opts(SecondsFormat::Millis, true)),
        );
    }
    if schema.field(STATUS).is_some() {
        record.set(STATUS, FieldValue::text(schema.initial_status.as_str()));
    }
    for def in schema.fields.iter().filter(|d| d.field_type == FieldType::Bool) {
        if !record.contains(&def.name) {
            record.set(def.name.clone(), FieldValue::Bool(false));
        }
    }
    record
}
