//! Built-in sample data: quarterly actuals vs. plan.

use crate::color::Rgb8;
use crate::models::Record;

const BLUE: Rgb8 = Rgb8::new(0x3b, 0x82, 0xf6);
const VIOLET: Rgb8 = Rgb8::new(0x8b, 0x5c, 0xf6);

const SAMPLE: [(&str, &str, f64, Rgb8); 8] = [
    ("Actuals", "Q1 2024", 1200.0, BLUE),
    ("Actuals", "Q2 2024", 1350.0, BLUE),
    ("Actuals", "Q3 2024", 1180.0, BLUE),
    ("Actuals", "Q4 2024", 1420.0, BLUE),
    ("Plan 2024", "Q1 2024", 1100.0, VIOLET),
    ("Plan 2024", "Q2 2024", 1250.0, VIOLET),
    ("Plan 2024", "Q3 2024", 1300.0, VIOLET),
    ("Plan 2024", "Q4 2024", 1400.0, VIOLET),
];

/// The fixed demo dataset (eight records: two variables over four quarters).
pub fn sample_records() -> Vec<Record> {
    SAMPLE
        .iter()
        .map(|&(variable, version, value, color)| Record::new(variable, version, value, color))
        .collect()
}
