use crate::data::{Record, Schema, DELIMITER};

/// Canonical line for a record: every schema field, in schema order, as
/// `key=value` joined by `|`. Missing fields are written empty and keys outside
/// the schema are dropped. This is both the on-disk format and the `list` output.
pub(crate) fn format_record(record: &Record, schema: &Schema) -> String {
    let separator = DELIMITER.to_string();
    schema
        .fields
        .iter()
        .map(|field| format!("{field}={}", record.get(field).unwrap_or_default()))
        .collect::<Vec<_>>()
        .join(separator.as_str())
}

/// Basic line exporter for a `Record`. The line goes out in a single write so an
/// append-mode file gets it in one piece.
pub(crate) fn write_record<W: std::io::Write>(
    mut writer: W,
    record: &Record,
    schema: &Schema,
) -> Result<(), anyhow::Error> {
    let mut line = format_record(record, schema);
    line.push('\n');
    writer.write_all(line.as_bytes())?;
    writer.flush()?;
    Ok(())
}
