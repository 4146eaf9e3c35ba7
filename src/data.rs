use std::{collections::HashMap, path::PathBuf};
use thiserror::Error;

pub const DEFAULT_FIELDS: [&str; 4] = ["day", "condition", "high", "low"];
pub const DEFAULT_NUMERIC_FIELD: &str = "high";
pub const DEFAULT_STORE_PATH: &str = "data/store.txt";

/// Separates the `key=value` segments of a stored line. Values coming from the
/// command line may not contain it.
pub const DELIMITER: char = '|';

/// One row of key/value data. Records built from user input always carry every
/// schema field (empty when omitted); records decoded from the store carry
/// exactly the keys found on the line, schema or not.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct Record {
    pub values: HashMap<String, String>,
}

impl Record {
    pub fn get(&self, field: &str) -> Option<&str> {
        self.values.get(field).map(String::as_str)
    }
}

/// The fixed field list, in canonical order, and the field summed by `summary`.
/// The order of `fields` is the on-disk order, so it must never come from map
/// iteration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Schema {
    pub fields: Vec<String>,
    pub numeric_field: Option<String>,
}

impl Schema {
    pub fn new<I, S>(fields: I, numeric_field: Option<&str>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
            numeric_field: numeric_field
                .filter(|field| !field.is_empty())
                .map(String::from),
        }
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.iter().any(|f| f == field)
    }
}

impl Default for Schema {
    fn default() -> Self {
        Self::new(DEFAULT_FIELDS, Some(DEFAULT_NUMERIC_FIELD))
    }
}

/// Everything a `Store` needs; built once by the CLI and handed down.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Config {
    pub schema: Schema,
    pub store_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            schema: Schema::default(),
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
        }
    }
}

/// Record encoding errors. Input errors are raised before anything touches the
/// store; `MalformedSegment` only comes out of a stored line.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("invalid item: {0} (expected key=value)")]
    InvalidItem(String),
    #[error("unknown field: {0}")]
    UnknownField(String),
    #[error("value for {field} may not contain '|': {value}")]
    InvalidValue { field: String, value: String },
    #[error("bad segment: {0}")]
    MalformedSegment(String),
}
