use crate::types::dataset::{Course, MISSING_WORD_PREFIX};
use crate::types::report::*;
use indexmap::{IndexMap, IndexSet};

/// How many detail issues the stats file carries verbatim; the true total
/// is reported next to the sample.
const DETAILS_SAMPLE_LIMIT: usize = 50;

/// How many phoneme symbols the frequency table lists.
const TOP_PHONEMES_LIMIT: usize = 50;

const WORD_LENGTH_RANGES: [(&str, usize, Option<usize>); 4] = [
    ("1-3", 1, Some(3)),
    ("4-6", 4, Some(6)),
    ("7-9", 7, Some(9)),
    ("10+", 10, None),
];

const PHONEME_LENGTH_RANGES: [(&str, usize, Option<usize>); 4] = [
    ("1-2", 1, Some(2)),
    ("3-4", 3, Some(4)),
    ("5-6", 5, Some(6)),
    ("7+", 7, None),
];

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Sums counter entries into fixed inclusive ranges; a `None` upper bound
/// is open-ended.
fn bucket_counts(
    counter: &IndexMap<usize, usize>,
    ranges: &[(&str, usize, Option<usize>)],
) -> Vec<BucketCount> {
    ranges
        .iter()
        .map(|&(label, min, max)| {
            let total = counter
                .iter()
                .filter(|&(&key, _)| key >= min && max.map_or(true, |max| key <= max))
                .map(|(_, &count)| count)
                .sum();
            BucketCount {
                range: label.to_string(),
                count: total,
            }
        })
        .collect()
}

/// Walks the normalized courses once and assembles the full statistics
/// report. Pure function: same courses in, same report out, input untouched.
///
/// All frequency counters are insertion-ordered maps so that "top N" and
/// duplicate listings rank ties by first encounter instead of hash order.
pub fn build_stats(courses: &[Course]) -> StatisticsReport {
    let mut total_word_count = 0;
    let mut unit_summaries = Vec::new();
    let mut unit_quality = Vec::new();

    let mut missing_meaning = 0;
    let mut missing_phonetic = 0;
    let mut empty_phonemes = 0;
    let mut empty_phonemes_a = 0;
    let mut generated_placeholders = 0;

    let mut word_to_units: IndexMap<&str, IndexSet<&str>> = IndexMap::new();

    let mut phoneme_counter: IndexMap<&str, usize> = IndexMap::new();
    let mut word_length_counter: IndexMap<usize, usize> = IndexMap::new();
    let mut phoneme_len_counter: IndexMap<usize, usize> = IndexMap::new();
    let mut score_counter: [usize; 5] = [0; 5];

    let mut detail_issues: Vec<DetailIssue> = Vec::new();

    for course in courses {
        let unit_name = &course.name;
        let unit_word_count = course.words.len();
        total_word_count += unit_word_count;

        let mut unit_missing_meaning = 0;
        let mut unit_missing_phonetic = 0;
        let mut unit_empty_phonemes = 0;
        let mut unit_empty_phonemes_a = 0;
        let mut unit_score_sum: usize = 0;

        for (idx, word) in course.words.iter().enumerate() {
            word_to_units
                .entry(word.word.as_str())
                .or_default()
                .insert(unit_name.as_str());

            let mut push_issue = |issue: DetailIssueKind| {
                detail_issues.push(DetailIssue {
                    unit: unit_name.clone(),
                    index: idx,
                    issue,
                    word: word.word.clone(),
                });
            };

            if word.meaning.is_empty() {
                missing_meaning += 1;
                unit_missing_meaning += 1;
                push_issue(DetailIssueKind::MissingMeaning);
            }
            if word.phonetic.is_empty() {
                missing_phonetic += 1;
                unit_missing_phonetic += 1;
                push_issue(DetailIssueKind::MissingPhonetic);
            }
            if word.phonemes.is_empty() {
                empty_phonemes += 1;
                unit_empty_phonemes += 1;
                push_issue(DetailIssueKind::EmptyPhonemes);
            }
            if word.phonemes_a.is_empty() {
                empty_phonemes_a += 1;
                unit_empty_phonemes_a += 1;
                push_issue(DetailIssueKind::EmptyPhonemesA);
            }
            if word.word.starts_with(MISSING_WORD_PREFIX) {
                generated_placeholders += 1;
                push_issue(DetailIssueKind::GeneratedWordPlaceholder);
            }

            *word_length_counter
                .entry(word.word.chars().count())
                .or_insert(0) += 1;
            *phoneme_len_counter.entry(word.phonemes.len()).or_insert(0) += 1;
            for phoneme in &word.phonemes {
                *phoneme_counter.entry(phoneme.as_str()).or_insert(0) += 1;
            }

            let score = [
                !word.meaning.is_empty(),
                !word.phonetic.is_empty(),
                !word.phonemes.is_empty(),
                !word.phonemes_a.is_empty(),
            ]
            .iter()
            .filter(|&&present| present)
            .count();
            score_counter[score] += 1;
            unit_score_sum += score;
        }

        let avg_completeness = if unit_word_count > 0 {
            round3(unit_score_sum as f64 / unit_word_count as f64)
        } else {
            0.0
        };
        unit_quality.push(UnitQuality {
            unit: unit_name.clone(),
            word_count: unit_word_count,
            missing_meaning: unit_missing_meaning,
            missing_phonetic: unit_missing_phonetic,
            empty_phonemes: unit_empty_phonemes,
            empty_phonemes_a: unit_empty_phonemes_a,
            avg_completeness,
        });

        unit_summaries.push(UnitSummary {
            id: course.id.clone(),
            name: unit_name.clone(),
            word_count: unit_word_count,
        });
    }

    // Words seen in more than one unit, ranked by first encounter.
    let global_duplicates = word_to_units
        .iter()
        .filter(|(_, units)| units.len() > 1)
        .map(|(&word, units)| {
            let mut unit_names: Vec<String> = units.iter().map(|&unit| unit.to_string()).collect();
            unit_names.sort();
            GlobalDuplicate {
                word: word.to_string(),
                count: units.len(),
                units: unit_names,
            }
        })
        .collect();

    let mut per_unit_duplicates: IndexMap<String, Vec<DuplicateCount>> = IndexMap::new();
    for course in courses {
        let mut counts: IndexMap<&str, usize> = IndexMap::new();
        for word in &course.words {
            *counts.entry(word.word.as_str()).or_insert(0) += 1;
        }
        let repeats: Vec<DuplicateCount> = counts
            .iter()
            .filter(|(_, &count)| count > 1)
            .map(|(&word, &count)| DuplicateCount {
                word: word.to_string(),
                count,
            })
            .collect();
        if !repeats.is_empty() {
            per_unit_duplicates.insert(course.name.clone(), repeats);
        }
    }

    // Stable sort keeps insertion order among equal counts.
    let unique_phonemes = phoneme_counter.len();
    let mut ranked_phonemes: Vec<(&str, usize)> = phoneme_counter.into_iter().collect();
    ranked_phonemes.sort_by(|a, b| b.1.cmp(&a.1));
    let top_phonemes = ranked_phonemes
        .into_iter()
        .take(TOP_PHONEMES_LIMIT)
        .map(|(symbol, count)| PhonemeCount {
            symbol: symbol.to_string(),
            count,
        })
        .collect();

    let score_distribution: Vec<ScoreCount> = score_counter
        .iter()
        .enumerate()
        .filter(|(_, &count)| count > 0)
        .map(|(score, &count)| ScoreCount {
            score: score as u8,
            count,
        })
        .collect();
    let average_score = if total_word_count > 0 {
        let weighted: usize = score_counter
            .iter()
            .enumerate()
            .map(|(score, &count)| score * count)
            .sum();
        round3(weighted as f64 / total_word_count as f64)
    } else {
        0.0
    };

    let details_total = detail_issues.len();
    let details_sample = detail_issues
        .into_iter()
        .take(DETAILS_SAMPLE_LIMIT)
        .collect();

    StatisticsReport {
        summary: Summary {
            course_count: courses.len(),
            total_word_count,
            units: unit_summaries,
        },
        data_quality: DataQuality {
            missing_meaning,
            missing_phonetic,
            empty_phonemes,
            empty_phonemes_a,
            generated_word_placeholders: generated_placeholders,
            details_sample,
            details_total,
        },
        duplicates: Duplicates {
            global: global_duplicates,
            per_unit: per_unit_duplicates,
        },
        phoneme_stats: PhonemeStats {
            unique_phonemes,
            top_phonemes,
        },
        difficulty_buckets: DifficultyBuckets {
            by_letters: bucket_counts(&word_length_counter, &WORD_LENGTH_RANGES),
            by_phonemes: bucket_counts(&phoneme_len_counter, &PHONEME_LENGTH_RANGES),
        },
        completeness: Completeness {
            average_score,
            score_distribution,
        },
        unit_quality,
    }
}
