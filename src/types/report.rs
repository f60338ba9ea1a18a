use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Read-only aggregate over all courses, computed once per run. The serde
/// shape (key names and section order) is the stats file contract.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsReport {
    pub summary: Summary,
    pub data_quality: DataQuality,
    pub duplicates: Duplicates,
    pub phoneme_stats: PhonemeStats,
    pub difficulty_buckets: DifficultyBuckets,
    pub completeness: Completeness,
    pub unit_quality: Vec<UnitQuality>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub course_count: usize,
    pub total_word_count: usize,
    pub units: Vec<UnitSummary>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UnitSummary {
    pub id: String,
    pub name: String,
    pub word_count: usize,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct DataQuality {
    pub missing_meaning: usize,
    pub missing_phonetic: usize,
    pub empty_phonemes: usize,
    pub empty_phonemes_a: usize,
    pub generated_word_placeholders: usize,
    /// First entries of the detail-issue list; capped to keep the file small.
    pub details_sample: Vec<DetailIssue>,
    pub details_total: usize,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DetailIssue {
    pub unit: String,
    pub index: usize,
    pub issue: DetailIssueKind,
    pub word: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum DetailIssueKind {
    MissingMeaning,
    MissingPhonetic,
    EmptyPhonemes,
    EmptyPhonemesA,
    GeneratedWordPlaceholder,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Duplicates {
    pub global: Vec<GlobalDuplicate>,
    /// Unit name -> within-unit repeats. Units with no repeats are absent.
    pub per_unit: IndexMap<String, Vec<DuplicateCount>>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct GlobalDuplicate {
    pub word: String,
    /// Number of distinct units containing the word.
    pub count: usize,
    pub units: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DuplicateCount {
    pub word: String,
    pub count: usize,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PhonemeStats {
    pub unique_phonemes: usize,
    pub top_phonemes: Vec<PhonemeCount>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PhonemeCount {
    pub symbol: String,
    pub count: usize,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct DifficultyBuckets {
    pub by_letters: Vec<BucketCount>,
    pub by_phonemes: Vec<BucketCount>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BucketCount {
    pub range: String,
    pub count: usize,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Completeness {
    pub average_score: f64,
    pub score_distribution: Vec<ScoreCount>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ScoreCount {
    pub score: u8,
    pub count: usize,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UnitQuality {
    pub unit: String,
    pub word_count: usize,
    pub missing_meaning: usize,
    pub missing_phonetic: usize,
    pub empty_phonemes: usize,
    pub empty_phonemes_a: usize,
    pub avg_completeness: f64,
}
