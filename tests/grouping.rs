use legend_harmonizer::color::Rgb8;
use legend_harmonizer::{GroupingMode, Record, RecordId, group_legend_items};

const BLUE: Rgb8 = Rgb8::new(0x3b, 0x82, 0xf6);
const GREEN: Rgb8 = Rgb8::new(0x22, 0xc5, 0x5e);
const ORANGE: Rgb8 = Rgb8::new(0xf9, 0x73, 0x16);

fn ebitda_revenue() -> Vec<Record> {
    vec![
        Record::new("EBITDA", "Actuals", 1200.0, BLUE),
        Record::new("EBITDA", "Forecast", 1350.0, GREEN),
        Record::new("Revenue", "Actuals", 5000.0, ORANGE),
    ]
}

#[test]
fn by_variable_folds_versions() {
    let items = group_legend_items(&ebitda_revenue(), GroupingMode::ByVariable);
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].label, "EBITDA");
    assert_eq!(items[0].colors, vec![BLUE, GREEN]);
    assert!(items[0].is_composite());
    assert_eq!(items[1].label, "Revenue");
    assert_eq!(items[1].colors, vec![ORANGE]);
    assert!(!items[1].is_composite());
}

#[test]
fn by_version_folds_variables() {
    let items = group_legend_items(&ebitda_revenue(), GroupingMode::ByVersion);
    let labels: Vec<_> = items.iter().map(|i| i.label.as_str()).collect();
    assert_eq!(labels, vec!["Actuals", "Forecast"]);
    assert_eq!(items[0].colors, vec![BLUE, ORANGE]);
    assert_eq!(items[1].colors, vec![GREEN]);
    assert_eq!(items[0].members, vec![RecordId(0), RecordId(2)]);
}

#[test]
fn pair_mode_keeps_one_item_per_record() {
    let items = group_legend_items(&ebitda_revenue(), GroupingMode::ByVariableAndVersion);
    let labels: Vec<_> = items.iter().map(|i| i.label.as_str()).collect();
    assert_eq!(
        labels,
        vec!["EBITDA • Actuals", "EBITDA • Forecast", "Revenue • Actuals"]
    );
    assert!(items.iter().all(|i| i.colors.len() == 1));
    assert_eq!(items[1].tooltip_text, "EBITDA • Forecast");
}

#[test]
fn empty_input_yields_no_items() {
    for mode in GroupingMode::ALL {
        assert!(group_legend_items(&[], mode).is_empty());
    }
}

#[test]
fn every_record_lands_in_exactly_one_item() {
    let records = legend_harmonizer::dataset::sample_records();
    for mode in GroupingMode::ALL {
        let items = group_legend_items(&records, mode);
        let mut seen: Vec<usize> = items
            .iter()
            .flat_map(|i| i.members.iter().map(|m| m.index()))
            .collect();
        seen.sort_unstable();
        assert_eq!(seen, (0..records.len()).collect::<Vec<_>>(), "mode {mode}");
        for item in &items {
            assert_eq!(item.colors.len(), item.members.len());
            for (color, id) in item.colors.iter().zip(&item.members) {
                assert_eq!(*color, records[id.index()].color);
            }
        }
    }
}

#[test]
fn folded_tooltip_lists_member_pairs() {
    let items = group_legend_items(&ebitda_revenue(), GroupingMode::ByVariable);
    assert_eq!(items[0].tooltip_text, "EBITDA • Actuals\nEBITDA • Forecast");
}

#[test]
fn grouping_is_deterministic() {
    let records = ebitda_revenue();
    for mode in GroupingMode::ALL {
        assert_eq!(group_legend_items(&records, mode), group_legend_items(&records, mode));
    }
}

#[test]
fn toggling_modes_does_not_drift() {
    let records = legend_harmonizer::dataset::sample_records();
    let first = group_legend_items(&records, GroupingMode::ByVariable);
    let _ = group_legend_items(&records, GroupingMode::ByVersion);
    let again = group_legend_items(&records, GroupingMode::ByVariable);
    assert_eq!(first, again);
}

#[test]
fn sample_dataset_groups_into_two_variables() {
    let records = legend_harmonizer::dataset::sample_records();
    let by_var = group_legend_items(&records, GroupingMode::ByVariable);
    assert_eq!(by_var.len(), 2);
    assert!(by_var.iter().all(|i| i.colors.len() == 4));
    let by_ver = group_legend_items(&records, GroupingMode::ByVersion);
    assert_eq!(by_ver.len(), 4);
    assert!(by_ver.iter().all(|i| i.colors.len() == 2));
}

#[test]
fn mode_names_parse() {
    assert_eq!("variable".parse::<GroupingMode>().unwrap(), GroupingMode::ByVariable);
    assert_eq!("VERSION".parse::<GroupingMode>().unwrap(), GroupingMode::ByVersion);
    assert_eq!(
        "variable-version".parse::<GroupingMode>().unwrap(),
        GroupingMode::ByVariableAndVersion
    );
    assert!("colour".parse::<GroupingMode>().is_err());
}
