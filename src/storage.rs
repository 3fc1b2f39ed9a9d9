//! Load and save records, legend items and chart configs as CSV/JSON.

use ahash::AHashMap;
use csv::WriterBuilder;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::chart::ChartConfig;
use crate::color::{Rgb8, office_color};
use crate::error::{HarmonizerError, Result};
use crate::models::{LegendItem, Record};

/// CSV row; `color` may be blank.
#[derive(Debug, Deserialize)]
struct CsvRow {
    variable: String,
    version: String,
    value: f64,
    #[serde(default)]
    color: Option<String>,
}

/// Load records from a CSV file with header `variable,version,value[,color]`.
///
/// Rows without a color get one from the Office palette, one color per distinct
/// variable in first-seen order.
pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<Vec<Record>> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_path(path)?;
    let mut palette_slot: AHashMap<String, usize> = AHashMap::new();
    let mut out = Vec::new();
    for row in rdr.deserialize::<CsvRow>() {
        let row = row?;
        let color = match row.color.as_deref().filter(|c| !c.is_empty()) {
            Some(hex) => Rgb8::from_hex(hex)?,
            None => {
                let next = palette_slot.len();
                office_color(*palette_slot.entry(row.variable.clone()).or_insert(next))
            }
        };
        out.push(Record::new(row.variable, row.version, row.value, color));
    }
    Ok(out)
}

/// Load records from a JSON array of `{variable, version, value, color}` objects.
pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Vec<Record>> {
    let f = File::open(path)?;
    Ok(serde_json::from_reader(std::io::BufReader::new(f))?)
}

/// Load records, picking the format from the file extension (`.csv` or `.json`).
pub fn load_records<P: AsRef<Path>>(path: P) -> Result<Vec<Record>> {
    let path = path.as_ref();
    match extension(path).as_deref() {
        Some("json") => load_json(path),
        Some("csv") => load_csv(path),
        _ => Err(HarmonizerError::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("unsupported data file (expected .csv or .json): {}", path.display()),
        ))),
    }
}

/// Save records as CSV with header.
pub fn save_csv<P: AsRef<Path>>(records: &[Record], path: P) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_path(path)?;
    wtr.serialize(("variable", "version", "value", "color"))?;
    for r in records {
        wtr.serialize((&r.variable, &r.version, r.value, r.color.to_hex()))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Save any serializable value as pretty JSON.
pub fn save_json<T: Serialize + ?Sized, P: AsRef<Path>>(value: &T, path: P) -> Result<()> {
    let mut f = File::create(path)?;
    let s = serde_json::to_string_pretty(value)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}

pub fn save_legend_json<P: AsRef<Path>>(items: &[LegendItem], path: P) -> Result<()> {
    save_json(items, path)
}

pub fn save_chart_config_json<P: AsRef<Path>>(config: &ChartConfig, path: P) -> Result<()> {
    save_json(config, path)
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn csv_round_trip_keeps_order_and_colors() {
        let dir = tempdir().unwrap();
        let p = dir.path().join("x.csv");
        let recs = vec![
            Record::new("EBITDA", "Actuals", 1200.0, Rgb8::new(0, 0, 255)),
            Record::new("Revenue", "Actuals", -5.5, Rgb8::new(255, 165, 0)),
        ];
        save_csv(&recs, &p).unwrap();
        assert_eq!(load_records(&p).unwrap(), recs);
    }

    #[test]
    fn blank_colors_use_palette_per_variable() {
        let dir = tempdir().unwrap();
        let p = dir.path().join("x.csv");
        std::fs::write(
            &p,
            "variable,version,value,color\nA,v1,1,\nB,v1,2,\nA,v2,3,#00ff00\nA,v3,4,\n",
        )
        .unwrap();
        let recs = load_csv(&p).unwrap();
        assert_eq!(recs[0].color, office_color(0));
        assert_eq!(recs[1].color, office_color(1));
        assert_eq!(recs[2].color, Rgb8::new(0, 255, 0));
        assert_eq!(recs[3].color, office_color(0));
    }

    #[test]
    fn bad_color_is_an_error() {
        let dir = tempdir().unwrap();
        let p = dir.path().join("x.csv");
        std::fs::write(&p, "variable,version,value,color\nA,v1,1,chartreuse\n").unwrap();
        assert!(matches!(load_csv(&p), Err(HarmonizerError::InvalidColor(_))));
    }

    #[test]
    fn unknown_extension_is_rejected() {
        assert!(load_records("data.xlsx").is_err());
    }
}
