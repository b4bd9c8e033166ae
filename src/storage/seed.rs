//! Sample production data
//!
//! Deterministic readings for five facilities, used to populate a fresh
//! installation so the dashboard and exports have input.

use chrono::{Duration, NaiveDate, NaiveTime, TimeZone, Utc};

use crate::models::ProductionRecord;

/// Facility IDs with their baseline oil output in bbl/day
const FACILITIES: [(&str, f64); 5] = [
    ("F1", 1200.0),
    ("F2", 950.0),
    ("F3", 1500.0),
    ("F4", 700.0),
    ("F5", 1100.0),
];

/// Build `count` readings starting on `start`, one reading per facility per day
pub fn sample_records(count: usize, start: NaiveDate) -> Vec<ProductionRecord> {
    let reading_time = NaiveTime::from_hms_opt(6, 0, 0).unwrap_or_default();

    (0..count)
        .map(|i| {
            let (facility_id, baseline) = FACILITIES[i % FACILITIES.len()];
            let day = start + Duration::days((i / FACILITIES.len()) as i64);
            let timestamp = Utc.from_utc_datetime(&day.and_time(reading_time));

            let oil = baseline + ((i * 37) % 100) as f64;
            let gas = (oil * 1.8).round();
            let efficiency = 70.0 + ((i * 13) % 30) as f64;

            ProductionRecord {
                id: format!("p{}", i + 1),
                facility_id: facility_id.to_string(),
                timestamp,
                oil_production: oil,
                gas_production: gas,
                efficiency,
            }
        })
        .collect()
}
