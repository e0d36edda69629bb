use chrono::{NaiveDate, NaiveDateTime};

/// One line of a source file, as parsed by the mapper. Column order in the
/// file is `cpf; cliente; nascimento; evento; data; tipoIngresso; valor`.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportRecord {
    pub tax_id: String,
    pub customer_name: String,
    pub birth_date: NaiveDate,
    pub event_name: String,
    pub event_date: NaiveDate,
    pub ticket_type: String,
    pub gross_value: f64,
}

/// A mapped record after enrichment. `admin_fee` is always computed by the
/// transformer, never read from input.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedRecord {
    pub record: ImportRecord,
    pub imported_at: NaiveDateTime,
    pub admin_fee: f64,
}

/// One row of the `imports` log table.
#[allow(dead_code)]
#[derive(Debug, Clone)]
pub struct ImportLog {
    pub id: Option<i64>,
    pub filename: String,
    pub record_count: i64,
    pub checksum: String,
    pub imported_at: String,
}
