use crate::types::dataset::RawDataset;
use indexmap::{IndexMap, IndexSet};
use serde::Serialize;
use serde_json::Value;

/// How many missing-extended-field records the console sample shows.
const MISSING_FIELDS_SAMPLE_LIMIT: usize = 10;

/// One structural difference between the two dataset versions. Serialized
/// shapes match the diff JSON the tool has always printed.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum DiffRecord {
    UnitSetDifference {
        unit_set_difference: UnitSetDifference,
    },
    CountDiff {
        unit: String,
        count_diff: (usize, usize),
    },
    OrderMismatches {
        unit: String,
        order_mismatches: Vec<OrderMismatch>,
    },
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct UnitSetDifference {
    pub in_base_not_full: Vec<String>,
    pub in_full_not_base: Vec<String>,
}

/// A position where the two word lists disagree. `None` means the entry had
/// no word at all, which is a different thing from any real word.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct OrderMismatch {
    pub index: usize,
    pub base: Option<String>,
    pub full: Option<String>,
}

#[derive(Serialize, Debug, Clone)]
pub struct UnitSummary {
    pub unit: String,
    pub base_count: usize,
    pub full_count: usize,
    pub count_equal: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_mismatches: Option<Vec<OrderMismatch>>,
}

/// A full-dataset entry lacking at least one of the extended fields
/// (`phonetic`, `phonemes`, `phonemes_a`).
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct MissingFieldRecord {
    pub unit: String,
    pub index: usize,
    pub word: Option<String>,
}

#[derive(Serialize, Debug, Clone)]
pub struct ComparisonReport {
    pub unit_summaries: Vec<UnitSummary>,
    pub diffs: Vec<DiffRecord>,
    pub total_base: usize,
    pub total_full: usize,
    pub missing_extended_fields: Vec<MissingFieldRecord>,
}

impl ComparisonReport {
    pub fn totals_equal(&self) -> bool {
        self.total_base == self.total_full
    }
}

fn word_of(entry: &Value) -> Option<String> {
    match entry.as_object().and_then(|fields| fields.get("word")) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => Some(other.to_string()),
    }
}

/// Projects each unit onto its ordered word list. Entries without a word
/// keep a `None` slot so positions stay aligned.
fn words_list(dataset: &RawDataset) -> IndexMap<&str, Vec<Option<String>>> {
    dataset
        .iter()
        .map(|(unit, entries)| {
            let words = entries
                .as_array()
                .map(|list| list.iter().map(word_of).collect())
                .unwrap_or_default();
            (unit.as_str(), words)
        })
        .collect()
}

/// Diffs two versions of the same dataset: unit-set membership, per-unit
/// counts, and element-wise ordering. Only base units get the per-unit
/// check; units existing solely in `full` show up in the set-difference
/// record alone.
pub fn compare_datasets(base: &RawDataset, full: &RawDataset) -> ComparisonReport {
    let base_words = words_list(base);
    let full_words = words_list(full);

    let mut diffs = Vec::new();

    let base_units: IndexSet<&str> = base_words.keys().copied().collect();
    let full_units: IndexSet<&str> = full_words.keys().copied().collect();
    if base_units != full_units {
        let mut in_base_not_full: Vec<String> = base_units
            .difference(&full_units)
            .map(|unit| unit.to_string())
            .collect();
        let mut in_full_not_base: Vec<String> = full_units
            .difference(&base_units)
            .map(|unit| unit.to_string())
            .collect();
        in_base_not_full.sort();
        in_full_not_base.sort();
        diffs.push(DiffRecord::UnitSetDifference {
            unit_set_difference: UnitSetDifference {
                in_base_not_full,
                in_full_not_base,
            },
        });
    }

    let empty: Vec<Option<String>> = Vec::new();
    let mut unit_summaries = Vec::new();
    for (unit, base_list) in &base_words {
        let full_list = full_words.get(unit).unwrap_or(&empty);
        let mut summary = UnitSummary {
            unit: unit.to_string(),
            base_count: base_list.len(),
            full_count: full_list.len(),
            count_equal: base_list.len() == full_list.len(),
            order_mismatches: None,
        };

        if base_list.len() == full_list.len() {
            let mismatches: Vec<OrderMismatch> = base_list
                .iter()
                .zip(full_list.iter())
                .enumerate()
                .filter(|(_, (base_word, full_word))| base_word != full_word)
                .map(|(index, (base_word, full_word))| OrderMismatch {
                    index,
                    base: base_word.clone(),
                    full: full_word.clone(),
                })
                .collect();
            if !mismatches.is_empty() {
                summary.order_mismatches = Some(mismatches.clone());
                diffs.push(DiffRecord::OrderMismatches {
                    unit: unit.to_string(),
                    order_mismatches: mismatches,
                });
            }
        } else {
            diffs.push(DiffRecord::CountDiff {
                unit: unit.to_string(),
                count_diff: (base_list.len(), full_list.len()),
            });
        }
        unit_summaries.push(summary);
    }

    let total_base = base_words.values().map(Vec::len).sum();
    let total_full = full_words.values().map(Vec::len).sum();

    // Extended-field completeness is checked on key presence in the raw
    // entries, so an explicit null still counts as present.
    let mut missing_extended_fields = Vec::new();
    for (unit, entries) in full {
        let Some(entry_list) = entries.as_array() else {
            continue;
        };
        for (index, entry) in entry_list.iter().enumerate() {
            let fields = entry.as_object();
            let has = |key: &str| fields.map_or(false, |map| map.contains_key(key));
            if !has("phonetic") || !has("phonemes") || !has("phonemes_a") {
                missing_extended_fields.push(MissingFieldRecord {
                    unit: unit.clone(),
                    index,
                    word: word_of(entry),
                });
            }
        }
    }

    ComparisonReport {
        unit_summaries,
        diffs,
        total_base,
        total_full,
        missing_extended_fields,
    }
}

/// Console rendering of a comparison: per-unit summaries, total counts, the
/// diff JSON (empty array means no differences), and the extended-field gap
/// sample.
pub fn print_report(report: &ComparisonReport) -> Result<(), String> {
    println!("Unit summaries:");
    for summary in &report.unit_summaries {
        let line = serde_json::to_string(summary)
            .map_err(|e| format!("Failed to serialize unit summary: {}", e))?;
        println!("{}", line);
    }

    println!(
        "\nTotal (base, full): ({}, {})",
        report.total_base, report.total_full
    );
    println!("Totals equal: {}", report.totals_equal());

    let diff_json = serde_json::to_string_pretty(&report.diffs)
        .map_err(|e| format!("Failed to serialize diff records: {}", e))?;
    println!("\nDiff details (empty array means no differences):");
    println!("{}", diff_json);

    println!(
        "\nMissing extended fields count: {}",
        report.missing_extended_fields.len()
    );
    if !report.missing_extended_fields.is_empty() {
        let sample: Vec<&MissingFieldRecord> = report
            .missing_extended_fields
            .iter()
            .take(MISSING_FIELDS_SAMPLE_LIMIT)
            .collect();
        let sample_json = serde_json::to_string_pretty(&sample)
            .map_err(|e| format!("Failed to serialize missing-field sample: {}", e))?;
        println!("{} ...", sample_json);
    }
    Ok(())
}
