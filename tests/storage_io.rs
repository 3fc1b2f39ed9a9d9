use std::fs;
use tempfile::TempDir;

use legend_harmonizer::chart::{LegendDisplayPolicy, build_chart_config};
use legend_harmonizer::color::{Rgb8, office_color};
use legend_harmonizer::dataset::sample_records;
use legend_harmonizer::{GroupingMode, LegendItem, group_legend_items, storage};

#[test]
fn csv_save_then_load_keeps_records() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("records.csv");
    let records = sample_records();
    storage::save_csv(&records, &path).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("variable,version,value,color"));
    assert!(text.contains("Actuals,Q1 2024,1200.0,#3B82F6"));

    assert_eq!(storage::load_records(&path).unwrap(), records);
}

#[test]
fn csv_without_colors_uses_palette_per_variable() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("plain.csv");
    fs::write(
        &path,
        "variable,version,value,color\n\
         EBITDA, Actuals, 1200,\n\
         EBITDA, Forecast, 1350,\n\
         Revenue, Actuals, 5000, #f97316\n\
         Margin, Actuals, 12,\n",
    )
    .unwrap();
    let records = storage::load_csv(&path).unwrap();
    assert_eq!(records.len(), 4);
    assert_eq!(records[0].version, "Actuals");
    assert_eq!(records[0].color, office_color(0));
    assert_eq!(records[1].color, office_color(0));
    assert_eq!(records[2].color, Rgb8::new(0xf9, 0x73, 0x16));
    assert_eq!(records[3].color, office_color(1));
}

#[test]
fn bad_color_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.csv");
    fs::write(&path, "variable,version,value,color\nA,B,1,#zzzzzz\n").unwrap();
    assert!(storage::load_csv(&path).is_err());
}

#[test]
fn json_records_and_legend() {
    let dir = TempDir::new().unwrap();
    let records = sample_records();

    let rec_path = dir.path().join("records.json");
    storage::save_json(&records, &rec_path).unwrap();
    assert_eq!(storage::load_records(&rec_path).unwrap(), records);

    let legend_path = dir.path().join("legend.json");
    let items = group_legend_items(&records, GroupingMode::ByVersion);
    storage::save_legend_json(&items, &legend_path).unwrap();
    let back: Vec<LegendItem> =
        serde_json::from_str(&fs::read_to_string(&legend_path).unwrap()).unwrap();
    assert_eq!(back, items);
}

#[test]
fn chart_config_json_is_written() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("chart.json");
    let chart = build_chart_config(&sample_records(), LegendDisplayPolicy::NativeUngrouped);
    storage::save_chart_config_json(&chart, &path).unwrap();
    let v: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(v["series"].as_array().unwrap().len(), 8);
    assert_eq!(v["legend"]["enabled"], true);
}

#[test]
fn unknown_extension_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("records.xlsx");
    fs::write(&path, "x").unwrap();
    assert!(storage::load_records(&path).is_err());
}
