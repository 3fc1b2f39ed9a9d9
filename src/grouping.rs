//! Grouping engine: fold records into legend items for a [`GroupingMode`].

use ahash::AHashMap;

use crate::models::{GroupingMode, LegendItem, Record, RecordId};

/// Partition records by `key`, keeping groups in first-seen key order and
/// members in input order.
pub fn ordered_partition<'a, F>(records: &'a [Record], key: F) -> Vec<(&'a str, Vec<RecordId>)>
where
    F: Fn(&'a Record) -> &'a str,
{
    let mut slot_by_key: AHashMap<&'a str, usize> = AHashMap::new();
    let mut groups: Vec<(&'a str, Vec<RecordId>)> = Vec::new();
    for (idx, rec) in records.iter().enumerate() {
        let k = key(rec);
        let slot = *slot_by_key.entry(k).or_insert_with(|| {
            groups.push((k, Vec::new()));
            groups.len() - 1
        });
        groups[slot].1.push(RecordId(idx));
    }
    groups
}

/// Build the ordered legend items for `records` under `mode`.
///
/// Total over its input: an empty slice yields an empty vector.
pub fn group_legend_items(records: &[Record], mode: GroupingMode) -> Vec<LegendItem> {
    match mode {
        GroupingMode::ByVariableAndVersion => records
            .iter()
            .enumerate()
            .map(|(idx, rec)| {
                let label = rec.pair_label();
                LegendItem {
                    id: format!("{}-{}-{}", rec.variable, rec.version, idx),
                    tooltip_text: label.clone(),
                    label,
                    colors: vec![rec.color],
                    members: vec![RecordId(idx)],
                }
            })
            .collect(),
        GroupingMode::ByVariable => fold_by(records, "variable", |r| r.variable.as_str()),
        GroupingMode::ByVersion => fold_by(records, "version", |r| r.version.as_str()),
    }
}

fn fold_by<'a, F>(records: &'a [Record], scope: &str, key: F) -> Vec<LegendItem>
where
    F: Fn(&'a Record) -> &'a str,
{
    ordered_partition(records, key)
        .into_iter()
        .map(|(k, members)| {
            let folded: Vec<&Record> = members.iter().map(|id| &records[id.index()]).collect();
            LegendItem {
                id: format!("{scope}:{k}"),
                label: k.to_string(),
                colors: folded.iter().map(|r| r.color).collect(),
                tooltip_text: folded
                    .iter()
                    .map(|r| r.pair_label())
                    .collect::<Vec<_>>()
                    .join("\n"),
                members,
            }
        })
        .collect()
}
