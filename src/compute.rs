use crate::{
    data::{Record, Schema},
    read::RecordUser,
};
use std::fmt;

/// Record count plus, when the schema names a numeric field, the sum of that
/// field over every record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Summary {
    pub count: usize,
    pub total: Option<FieldTotal>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FieldTotal {
    pub field: String,
    pub sum: i64,
}

impl Summary {
    pub fn new(schema: &Schema) -> Self {
        Self {
            count: 0,
            total: schema.numeric_field.as_ref().map(|field| FieldTotal {
                field: field.clone(),
                sum: 0,
            }),
        }
    }
}

/// Values that are missing or don't parse as an integer count as zero; they are
/// not errors.
impl RecordUser for Summary {
    fn use_record(&mut self, record: Record) {
        self.count += 1;
        if let Some(total) = &mut self.total {
            let value = record
                .get(&total.field)
                .and_then(|value| value.parse::<i64>().ok())
                .unwrap_or(0);
            total.sum = total.sum.wrapping_add(value);
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "count={}", self.count)?;
        if let Some(FieldTotal { field, sum }) = &self.total {
            write!(f, ", {field}_total={sum}")?;
        }
        Ok(())
    }
}

pub(crate) fn summarize<I: IntoIterator<Item = Record>>(records: I, schema: &Schema) -> Summary {
    let mut summary = Summary::new(schema);
    for record in records {
        summary.use_record(record);
    }
    summary
}

#[cfg(test)]
mod tests {
    use crate::{
        data::{Record, Schema},
        read::{parse_input, parse_line},
    };

    use super::{summarize, FieldTotal, Summary};

    fn records(schema: &Schema, inputs: &[&[&str]]) -> Vec<Record> {
        inputs
            .iter()
            .map(|items| parse_input(*items, schema).unwrap())
            .collect()
    }

    #[test]
    fn test_summary_sum() {
        let schema = Schema::default();
        let summary = summarize(
            records(&schema, &[&["day=Mon", "high=10"], &["day=Tue", "high=20"]]),
            &schema,
        );
        assert_eq!(
            summary,
            Summary {
                count: 2,
                total: Some(FieldTotal {
                    field: "high".to_string(),
                    sum: 30
                }),
            }
        );
        assert_eq!(summary.to_string(), "count=2, high_total=30");
    }

    #[test]
    fn test_summary_ignores_non_numeric() {
        let schema = Schema::default();
        let summary = summarize(
            records(&schema, &[&["high=abc"], &["high="], &["high=-4"], &["high=+6"]]),
            &schema,
        );
        assert_eq!(summary.to_string(), "count=4, high_total=2");
        let summary = summarize(records(&schema, &[&["high=abc"]]), &schema);
        assert_eq!(summary.to_string(), "count=1, high_total=0");
    }

    #[test]
    fn test_summary_missing_field() {
        // Records read back from the store may lack the numeric field altogether.
        let schema = Schema::default();
        let summary = summarize([parse_line("day=Mon").unwrap()], &schema);
        assert_eq!(summary.to_string(), "count=1, high_total=0");
    }

    #[test]
    fn test_summary_without_numeric_field() {
        let schema = Schema::new(["day", "condition", "high", "low"], None);
        let summary = summarize(records(&schema, &[&["high=10"], &[]]), &schema);
        assert_eq!(summary, Summary { count: 2, total: None });
        assert_eq!(summary.to_string(), "count=2");
    }

    #[test]
    fn test_summary_empty() {
        let schema = Schema::default();
        assert_eq!(summarize(Vec::new(), &schema).to_string(), "count=0, high_total=0");
    }
}
