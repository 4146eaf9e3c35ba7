use crate::data::{Error, Record, Schema, DELIMITER};
use anyhow::Context;
use log::debug;
use std::{
    collections::HashMap,
    io::{BufRead, BufReader},
};

/// Trait for doing something with a `Record` read from the store. Used to collect
/// records for listing and to fold them into a `Summary`, but also used for mock
/// tests to check we get the correct results from reading a store stream.
pub(crate) trait RecordUser {
    fn use_record(&mut self, record: Record);
}

impl RecordUser for Vec<Record> {
    fn use_record(&mut self, record: Record) {
        self.push(record)
    }
}

/// Builds a record out of command line `key=value` items. Every item is checked
/// against the schema, then omitted fields are filled with empty strings. When a
/// key is given twice, the last value wins.
pub(crate) fn parse_input<I, S>(items: I, schema: &Schema) -> Result<Record, Error>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut values = HashMap::new();
    for item in items {
        let item = item.as_ref();
        let (key, value) = item
            .split_once('=')
            .ok_or_else(|| Error::InvalidItem(item.to_string()))?;
        if !schema.contains(key) {
            return Err(Error::UnknownField(key.to_string()));
        }
        if value.contains(DELIMITER) {
            return Err(Error::InvalidValue {
                field: key.to_string(),
                value: value.to_string(),
            });
        }
        values.insert(key.to_string(), value.to_string());
    }
    for field in &schema.fields {
        values.entry(field.clone()).or_default();
    }
    Ok(Record { values })
}

/// Decodes one stored line. Unlike `parse_input` this neither checks keys against
/// the schema nor fills in missing fields: the record holds exactly what the line
/// holds.
pub(crate) fn parse_line(line: &str) -> Result<Record, Error> {
    let mut values = HashMap::new();
    for segment in line.trim().split(DELIMITER) {
        if segment.is_empty() {
            continue;
        }
        let (key, value) = segment
            .split_once('=')
            .ok_or_else(|| Error::MalformedSegment(segment.to_string()))?;
        values.insert(key.to_string(), value.to_string());
    }
    Ok(Record { values })
}

/// Simple line importer for stored `Record`s. Blank lines are skipped. Stops at the
/// first line that fails to decode; whatever was handed to `user` before that is
/// the caller's to throw away.
pub(crate) fn read_records<R: std::io::Read, U: RecordUser>(
    reader: R,
    user: &mut U,
) -> Result<(), anyhow::Error> {
    for (index, line) in BufReader::new(reader).lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            debug!("skipping blank line {}", index + 1);
            continue;
        }
        let record =
            parse_line(&line).with_context(|| format!("corrupt record on line {}", index + 1))?;
        user.use_record(record);
    }
    Ok(())
}
