use crate::config::CourseStyle;
use crate::types::dataset::{
    json_type_name, Course, IssueEntry, IssueKind, NormalizedWord, RawDataset,
    MISSING_WORD_PREFIX,
};
use serde_json::Value;

/// Derives the course id from the unit name: lowercase, spaces to underscores.
pub fn unit_key_to_id(unit_name: &str) -> String {
    unit_name.to_lowercase().replace(' ', "_")
}

/// Reads an optional text field. Absent and null both mean "not there";
/// a stray non-string scalar is kept by rendering it as text rather than
/// discarded.
fn text_field(entry: Option<&serde_json::Map<String, Value>>, key: &str) -> Option<String> {
    match entry.and_then(|map| map.get(key)) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => Some(other.to_string()),
    }
}

/// Coerces a phoneme field to a list: null/absent -> empty, scalar -> one
/// element, list -> element-wise text.
fn string_list_field(entry: Option<&serde_json::Map<String, Value>>, key: &str) -> Vec<String> {
    match entry.and_then(|map| map.get(key)) {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items
            .iter()
            .filter(|item| !item.is_null())
            .map(|item| match item {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect(),
        Some(Value::String(s)) => vec![s.clone()],
        Some(other) => vec![other.to_string()],
    }
}

/// Normalizes a single entry, appending one issue per applied default.
///
/// A non-object entry is treated as an empty object, so every field takes
/// its default and gets logged. The check order (meaning, word, phonetic,
/// phoneme lists) is fixed for log readability; the resulting field values
/// do not depend on it.
fn normalize_entry(
    entry: &Value,
    unit: &str,
    idx: usize,
    issues: &mut Vec<IssueEntry>,
) -> NormalizedWord {
    let fields = entry.as_object();

    let phonemes = string_list_field(fields, "phonemes");
    let phonemes_a = string_list_field(fields, "phonemes_a");
    let raw_word = text_field(fields, "word");

    let meaning = match text_field(fields, "meaning") {
        Some(meaning) => meaning,
        None => {
            issues.push(IssueEntry::for_entry(
                IssueKind::MissingMeaning,
                unit,
                idx,
                raw_word.as_deref(),
            ));
            String::new()
        }
    };

    let word = match raw_word {
        Some(word) if !word.is_empty() => word,
        _ => {
            let placeholder = format!("{}{}_{}", MISSING_WORD_PREFIX, unit, idx);
            issues.push(IssueEntry::for_entry(
                IssueKind::MissingWord,
                unit,
                idx,
                Some(&placeholder),
            ));
            placeholder
        }
    };

    let phonetic = match text_field(fields, "phonetic") {
        Some(phonetic) => phonetic,
        None => {
            issues.push(IssueEntry::for_entry(
                IssueKind::MissingPhonetic,
                unit,
                idx,
                Some(&word),
            ));
            String::new()
        }
    };

    if phonemes.is_empty() {
        issues.push(IssueEntry::for_entry(
            IssueKind::EmptyPhonemes,
            unit,
            idx,
            Some(&word),
        ));
    }
    if phonemes_a.is_empty() {
        issues.push(IssueEntry::for_entry(
            IssueKind::EmptyPhonemesA,
            unit,
            idx,
            Some(&word),
        ));
    }

    NormalizedWord {
        word,
        meaning,
        phonetic,
        phonemes,
        phonemes_a,
    }
}

/// Converts the raw unit map into the canonical course list, collecting the
/// full issue log. A unit whose value is not an array produces no course,
/// only a structural issue; every other unit comes through with entry order
/// preserved.
pub fn transform(raw: &RawDataset, style: &CourseStyle) -> (Vec<Course>, Vec<IssueEntry>) {
    let mut courses = Vec::new();
    let mut issues = Vec::new();

    for (unit_name, entries) in raw {
        let entry_list = match entries.as_array() {
            Some(list) => list,
            None => {
                issues.push(IssueEntry::invalid_entries(unit_name, json_type_name(entries)));
                continue;
            }
        };

        let words = entry_list
            .iter()
            .enumerate()
            .map(|(idx, entry)| normalize_entry(entry, unit_name, idx, &mut issues))
            .collect();

        courses.push(Course {
            id: unit_key_to_id(unit_name),
            name: unit_name.clone(),
            emoji: style.emoji.clone(),
            description: format!("{}{}", style.description_prefix, unit_name),
            words,
        });
    }

    (courses, issues)
}
