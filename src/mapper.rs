use chrono::NaiveDate;
use csv::StringRecord;

use crate::error::{ImportError, Result};
use crate::models::ImportRecord;

/// Expected column order of a source line.
pub const FIELD_COUNT: usize = 7;

fn malformed(file: &str, line: u64, reason: impl Into<String>) -> ImportError {
    ImportError::MalformedRecord {
        file: file.to_string(),
        line,
        reason: reason.into(),
    }
}

fn parse_date(file: &str, line: u64, field: &str, raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| malformed(file, line, format!("unparsable date in {field}: {raw:?}")))
}

/// Map one delimited record into an `ImportRecord`. Comment and blank lines
/// never reach this function.
pub fn map_record(file: &str, line: u64, record: &StringRecord) -> Result<ImportRecord> {
    if record.len() != FIELD_COUNT {
        return Err(malformed(
            file,
            line,
            format!("expected {FIELD_COUNT} fields, got {}", record.len()),
        ));
    }

    let tax_id = record[0].trim().to_string();
    if tax_id.is_empty() {
        return Err(malformed(file, line, "empty cpf"));
    }

    let gross_raw = record[6].trim();
    let gross_value: f64 = gross_raw
        .parse()
        .map_err(|_| malformed(file, line, format!("non-numeric valor: {gross_raw:?}")))?;
    if !gross_value.is_finite() || gross_value < 0.0 {
        return Err(malformed(file, line, format!("invalid valor: {gross_raw:?}")));
    }

    Ok(ImportRecord {
        tax_id,
        customer_name: record[1].trim().to_string(),
        birth_date: parse_date(file, line, "nascimento", &record[2])?,
        event_name: record[3].trim().to_string(),
        event_date: parse_date(file, line, "data", &record[4])?,
        ticket_type: record[5].trim().to_string(),
        gross_value,
    })
}
