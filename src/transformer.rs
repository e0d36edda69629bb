use std::collections::HashMap;

use crate::error::{ImportError, Result};
use crate::models::{EnrichedRecord, ImportRecord};

/// Administrative fee rates keyed by upper-cased ticket type. The fee is a
/// pure function of ticket type and gross value; callers with different
/// business rules substitute their own schedule.
#[derive(Debug, Clone)]
pub struct FeeSchedule {
    rates: HashMap<String, f64>,
    default_rate: f64,
}

impl FeeSchedule {
    pub fn new(rates: HashMap<String, f64>, default_rate: f64) -> Self {
        let rates = rates
            .into_iter()
            .map(|(k, v)| (k.to_uppercase(), v))
            .collect();
        Self { rates, default_rate }
    }

    pub fn fee_for(&self, ticket_type: &str, gross_value: f64) -> f64 {
        let rate = self
            .rates
            .get(&ticket_type.trim().to_uppercase())
            .copied()
            .unwrap_or(self.default_rate);
        round_cents(gross_value * rate)
    }
}

impl Default for FeeSchedule {
    fn default() -> Self {
        let mut rates = HashMap::new();
        rates.insert("VIP".to_string(), 0.20);
        rates.insert("CAMAROTE".to_string(), 0.15);
        rates.insert("MEIA".to_string(), 0.05);
        Self {
            rates,
            default_rate: 0.10,
        }
    }
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Enrich a mapped record with the import timestamp and the computed fee.
/// Consumes its input; the mapped record is never edited afterwards.
pub fn enrich(record: ImportRecord, fees: &FeeSchedule) -> Result<EnrichedRecord> {
    if record.tax_id.trim().is_empty() {
        return Err(ImportError::Transformation {
            tax_id: record.tax_id,
            reason: "missing cpf".to_string(),
        });
    }
    if record.gross_value < 0.0 {
        return Err(ImportError::Transformation {
            tax_id: record.tax_id,
            reason: format!("negative valor: {}", record.gross_value),
        });
    }

    let admin_fee = fees.fee_for(&record.ticket_type, record.gross_value);
    Ok(EnrichedRecord {
        admin_fee,
        imported_at: chrono::Local::now().naive_local(),
        record,
    })
}
