//! CSV output format for synthetic call records.

use crate::generator::CallRecord;
use anyhow::{Context, Result};
use std::path::Path;

/// Fixed column set of the generated dataset.
const HEADER: &str =
    "Name,Phone Number,Response Description,Gave Information,Call Length (s),Phishing Scenario";

/// CSV output formatter.
#[derive(Debug, Default)]
pub struct CsvOutput {
    records: Vec<CallRecord>,
}

impl CsvOutput {
    /// Create a new CSV output formatter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a record to the output.
    pub fn add_record(&mut self, record: CallRecord) {
        self.records.push(record);
    }

    /// Number of buffered records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no records are buffered.
    #[allow(dead_code)] // Pairs with len
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Escape CSV field (handle commas, quotes, newlines).
    fn escape_field(field: &str) -> String {
        // If field contains comma, quote, or newline, wrap in quotes and escape quotes
        if field.contains(',') || field.contains('"') || field.contains('\n') {
            format!("\"{}\"", field.replace('"', "\"\""))
        } else {
            field.to_string()
        }
    }

    /// Format a record as a CSV row.
    fn format_record(record: &CallRecord) -> String {
        let fields = [
            Self::escape_field(&record.name),
            Self::escape_field(&record.phone_number),
            Self::escape_field(&record.response.to_string()),
            record.response.gave_information().to_string(),
            format!("{:.2}", record.call_length_secs),
            Self::escape_field(&record.scenario.to_string()),
        ];

        fields.join(",")
    }

    /// Generate CSV output as string.
    pub fn to_csv(&self) -> String {
        let mut output = String::new();

        // Add header
        output.push_str(HEADER);
        output.push('\n');

        // Add each record
        for record in &self.records {
            output.push_str(&Self::format_record(record));
            output.push('\n');
        }

        output
    }

    /// Write the CSV output to a file.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_csv())
            .with_context(|| format!("Failed to write dataset to {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::{ResponseKind, Scenario};

    fn make_record(name: &str) -> CallRecord {
        CallRecord {
            name: name.to_string(),
            phone_number: "(555) 123-4567".to_string(),
            response: ResponseKind::SharedInformation,
            call_length_secs: 42.5,
            scenario: Scenario::BankFraud,
        }
    }

    #[test]
    fn test_csv_header() {
        let output = CsvOutput::new();
        assert!(output.to_csv().starts_with(
            "Name,Phone Number,Response Description,Gave Information,Call Length (s)"
        ));
    }

    #[test]
    fn test_csv_escape_field_simple() {
        assert_eq!(CsvOutput::escape_field("hello"), "hello");
    }

    #[test]
    fn test_csv_escape_field_with_comma() {
        assert_eq!(CsvOutput::escape_field("hello,world"), "\"hello,world\"");
    }

    #[test]
    fn test_csv_escape_field_with_quote() {
        assert_eq!(CsvOutput::escape_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_csv_format_record() {
        let row = CsvOutput::format_record(&make_record("Jane Smith"));
        assert_eq!(
            row,
            "Jane Smith,(555) 123-4567,Shared sensitive information,true,42.50,Bank Fraud"
        );
    }

    #[test]
    fn test_csv_format_record_escapes_name() {
        let row = CsvOutput::format_record(&make_record("Smith, Jane"));
        assert!(row.starts_with("\"Smith, Jane\","));
    }

    #[test]
    fn test_csv_two_decimal_call_length() {
        let mut record = make_record("Jane Smith");
        record.call_length_secs = 5.0;

        let row = CsvOutput::format_record(&record);
        assert!(row.contains(",5.00,"));
    }

    #[test]
    fn test_csv_row_count() {
        let mut output = CsvOutput::new();
        output.add_record(make_record("A B"));
        output.add_record(make_record("C D"));

        let csv = output.to_csv();
        assert_eq!(csv.lines().count(), 3); // header + 2 records
    }

    #[test]
    fn test_csv_write_to_file() {
        let mut output = CsvOutput::new();
        output.add_record(make_record("A B"));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("calls.csv");
        output.write_to(&path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written.lines().count(), 2);
    }
}
