use crate::error::StoreError;
use common::model::field::{FieldDef, FieldType, FieldValue};
use common::model::record::Record;
use common::model::schema::Schema;
use csv::{ReaderBuilder, Terminator, WriterBuilder};

/// Record terminator written after every row.
pub const LINE_SEPARATOR: &[u8] = b"\n";

/// Decodes a whole record file.
///
/// The header must name exactly the schema's fields, in any order. Rows with
/// a different cell count, or cells that do not fit their column type, fail
/// the whole decode.
pub fn decode(bytes: &[u8], schema: &Schema) -> Result<Vec<Record>, StoreError> {
    if is_blank(bytes) {
        return Ok(Vec::new());
    }

    let mut reader = ReaderBuilder::new().has_headers(true).from_reader(bytes);
    let columns = resolve_columns(reader.headers()?, schema)?;

    let mut records = Vec::new();
    for (index, row) in reader.records().enumerate() {
        let row = row?;
        let mut record = Record::new();
        for (def, cell) in columns.iter().zip(row.iter()) {
            let value = Schema::parse_cell(def, cell).map_err(|reason| {
                // +2: header line and 1-based numbering
                StoreError::Parse(format!("line {}, field '{}': {}", index + 2, def.name, reason))
            })?;
            record.set(def.name.clone(), value);
        }
        records.push(record);
    }
    Ok(records)
}

/// A blank file has no header yet and decodes to an empty set.
pub fn is_blank(bytes: &[u8]) -> bool {
    bytes.iter().all(u8::is_ascii_whitespace)
}

/// Encodes records in schema column order, optionally preceded by the header.
///
/// Missing fields become empty cells, except booleans which are always
/// written in canonical form.
pub fn encode(records: &[Record], schema: &Schema, with_header: bool) -> Result<Vec<u8>, StoreError> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .terminator(Terminator::Any(LINE_SEPARATOR[0]))
        .from_writer(Vec::new());

    if with_header {
        writer.write_record(schema.field_names())?;
    }
    for record in records {
        writer.write_record(schema.fields.iter().map(|def| cell_for(record, def)))?;
    }

    writer.into_inner().map_err(|e| StoreError::Io(e.into_error()))
}

/// Rejects records carrying fields the schema does not declare.
pub fn ensure_known_fields(record: &Record, schema: &Schema) -> Result<(), StoreError> {
    match record.iter().find(|(name, _)| schema.field(name).is_none()) {
        Some((name, _)) => Err(StoreError::SchemaMismatch(format!(
            "field '{}' is not part of {}",
            name, schema.name
        ))),
        None => Ok(()),
    }
}

fn cell_for(record: &Record, def: &FieldDef) -> String {
    match (record.get(&def.name), def.field_type) {
        (Some(value), _) => value.to_cell(),
        (None, FieldType::Bool) => FieldValue::Bool(false).to_cell(),
        (None, _) => String::new(),
    }
}

fn resolve_columns<'a>(
    headers: &csv::StringRecord,
    schema: &'a Schema,
) -> Result<Vec<&'a FieldDef>, StoreError> {
    let mut columns: Vec<&FieldDef> = Vec::with_capacity(headers.len());

    for name in headers.iter() {
        let name = name.trim().trim_start_matches('\u{feff}');
        let def = schema.field(name).ok_or_else(|| {
            StoreError::SchemaMismatch(format!("unknown column '{}' in {}", name, schema.name))
        })?;
        if columns.iter().any(|c| c.name == def.name) {
            return Err(StoreError::SchemaMismatch(format!(
                "duplicate column '{}' in {}",
                name, schema.name
            )));
        }
        columns.push(def);
    }

    if let Some(missing) = schema
        .fields
        .iter()
        .find(|def| !columns.iter().any(|c| c.name == def.name))
    {
        return Err(StoreError::SchemaMismatch(format!(
            "missing column '{}' in {}",
            missing.name, schema.name
        )));
    }

    Ok(columns)
}
