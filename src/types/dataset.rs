use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Raw dataset as loaded from disk: unit name -> JSON value. Key order is
/// lesson order, so the map must preserve it. Values stay loosely typed
/// because a malformed unit (non-array) or entry (non-object) is a
/// recoverable condition, not a deserialization failure.
pub type RawDataset = IndexMap<String, Value>;

/// Prefix of every synthesized word placeholder. The aggregator keys off
/// this prefix, so it is a data-format constant rather than configuration.
pub const MISSING_WORD_PREFIX: &str = "_missing_word_";

/// A fully-defaulted vocabulary entry. After normalization every field is
/// present: no option types, no null-like states.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct NormalizedWord {
    pub word: String,
    pub meaning: String,
    pub phonetic: String,
    pub phonemes: Vec<String>,
    pub phonemes_a: Vec<String>,
}

/// Canonical representation of one unit for downstream consumption.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Course {
    pub id: String,
    pub name: String,
    pub emoji: String,
    pub description: String,
    pub words: Vec<NormalizedWord>,
}

/// Shape of the processed output file: `{"courses": [...]}`.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct ProcessedDataset {
    pub courses: Vec<Course>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueKind {
    MissingWord,
    MissingMeaning,
    MissingPhonetic,
    EmptyPhonemes,
    EmptyPhonemesA,
    InvalidEntries,
}

impl IssueKind {
    pub fn log_tag(&self) -> &'static str {
        match self {
            IssueKind::MissingWord => "[MISSING_WORD]",
            IssueKind::MissingMeaning => "[MISSING_MEANING]",
            IssueKind::MissingPhonetic => "[MISSING_PHONETIC]",
            IssueKind::EmptyPhonemes => "[EMPTY_PHONEMES]",
            IssueKind::EmptyPhonemesA => "[EMPTY_PHONEMES_A]",
            IssueKind::InvalidEntries => "[INVALID_ENTRIES]",
        }
    }
}

/// One substitution or structural problem recorded during normalization.
///
/// `detail` holds whatever the kind needs alongside the location: the word
/// in effect for field-level issues, the synthesized placeholder for
/// `MissingWord`, and the offending JSON type name for `InvalidEntries`.
#[derive(Debug, Clone, PartialEq)]
pub struct IssueEntry {
    pub kind: IssueKind,
    pub unit: String,
    pub index: Option<usize>,
    pub detail: Option<String>,
}

impl IssueEntry {
    pub fn for_entry(kind: IssueKind, unit: &str, index: usize, word: Option<&str>) -> Self {
        IssueEntry {
            kind,
            unit: unit.to_string(),
            index: Some(index),
            detail: word.map(String::from),
        }
    }

    pub fn invalid_entries(unit: &str, type_name: &str) -> Self {
        IssueEntry {
            kind: IssueKind::InvalidEntries,
            unit: unit.to_string(),
            index: None,
            detail: Some(type_name.to_string()),
        }
    }

    /// Renders the entry as one line of the run log.
    pub fn log_line(&self) -> String {
        match self.kind {
            IssueKind::InvalidEntries => format!(
                "{} unit={} type={}",
                self.kind.log_tag(),
                self.unit,
                self.detail.as_deref().unwrap_or("unknown")
            ),
            IssueKind::MissingWord => format!(
                "{} unit={} index={} replaced_with={}",
                self.kind.log_tag(),
                self.unit,
                self.index.unwrap_or(0),
                self.detail.as_deref().unwrap_or("")
            ),
            _ => format!(
                "{} unit={} index={} word={}",
                self.kind.log_tag(),
                self.unit,
                self.index.unwrap_or(0),
                match &self.detail {
                    Some(word) => format!("{:?}", word),
                    None => "None".to_string(),
                }
            ),
        }
    }
}

/// Returns the JSON type name of a value, for structural issue logs.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_lines_carry_location_and_detail() {
        let entry = IssueEntry::for_entry(IssueKind::MissingMeaning, "Unit 1", 3, Some("cat"));
        assert_eq!(
            entry.log_line(),
            "[MISSING_MEANING] unit=Unit 1 index=3 word=\"cat\""
        );

        let entry = IssueEntry::for_entry(IssueKind::MissingPhonetic, "Unit 1", 0, None);
        assert_eq!(
            entry.log_line(),
            "[MISSING_PHONETIC] unit=Unit 1 index=0 word=None"
        );

        let entry = IssueEntry::invalid_entries("Broken", "string");
        assert_eq!(entry.log_line(), "[INVALID_ENTRIES] unit=Broken type=string");
    }

    #[test]
    fn missing_word_logs_the_placeholder() {
        let entry =
            IssueEntry::for_entry(IssueKind::MissingWord, "U1", 0, Some("_missing_word_U1_0"));
        assert_eq!(
            entry.log_line(),
            "[MISSING_WORD] unit=U1 index=0 replaced_with=_missing_word_U1_0"
        );
    }
}
