use std::fs;
use std::path::Path;

use vocab_weaver::config::CourseStyle;
use vocab_weaver::dataset_io::{load_raw_dataset, write_processed, write_run_log, write_stats};
use vocab_weaver::normalize::transform;
use vocab_weaver::stats::build_stats;
use vocab_weaver::types::dataset::ProcessedDataset;

const SAMPLE_DATASET: &str = r#"{
  "Unit 1": [
    {"word": "cat", "meaning": "猫", "phonetic": "/kæt/", "phonemes": ["k", "æ", "t"], "phonemes_a": ["c", "a", "t"]},
    {"word": "dog", "meaning": "狗"},
    {"meaning": "失落的词"}
  ],
  "Unit 2": [
    {"word": "cat", "meaning": "猫", "phonetic": "/kæt/", "phonemes": "kæt", "phonemes_a": null}
  ],
  "Broken": 42
}"#;

fn style() -> CourseStyle {
    CourseStyle {
        emoji: "🔤".to_string(),
        description_prefix: "三年级上册".to_string(),
    }
}

fn run_pipeline(input: &Path, out_dir: &Path, tag: &str) -> (String, String, String) {
    let processed_path = out_dir.join(format!("processed_{}.json", tag));
    let stats_path = out_dir.join(format!("stats_{}.json", tag));
    let log_path = out_dir.join(format!("run_{}.log", tag));

    let raw = load_raw_dataset(input).unwrap();
    let (courses, issues) = transform(&raw, &style());
    let stats = build_stats(&courses);

    write_processed(&processed_path, &ProcessedDataset { courses }).unwrap();
    write_stats(&stats_path, &stats).unwrap();
    write_run_log(&log_path, input, &processed_path, &stats_path, &issues).unwrap();

    (
        fs::read_to_string(&processed_path).unwrap(),
        fs::read_to_string(&stats_path).unwrap(),
        fs::read_to_string(&log_path).unwrap(),
    )
}

#[test]
fn pipeline_is_idempotent_modulo_log_header() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("words.json");
    fs::write(&input, SAMPLE_DATASET).unwrap();

    let (processed_a, stats_a, log_a) = run_pipeline(&input, dir.path(), "a");
    let (processed_b, stats_b, log_b) = run_pipeline(&input, dir.path(), "b");

    assert_eq!(processed_a, processed_b);
    assert_eq!(stats_a, stats_b);

    // Log bodies match once the timestamp and path lines are stripped.
    let body = |log: &str| {
        log.lines()
            .skip_while(|line| !line.starts_with("Logs:"))
            .map(String::from)
            .collect::<Vec<_>>()
    };
    assert_eq!(body(&log_a), body(&log_b));
}

#[test]
fn processed_file_has_fully_populated_words() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("words.json");
    fs::write(&input, SAMPLE_DATASET).unwrap();

    let (processed_text, _, _) = run_pipeline(&input, dir.path(), "shape");
    let processed: serde_json::Value = serde_json::from_str(&processed_text).unwrap();

    let courses = processed["courses"].as_array().unwrap();
    // "Broken" is skipped, the two valid units survive in order.
    assert_eq!(courses.len(), 2);
    assert_eq!(courses[0]["id"], "unit_1");
    assert_eq!(courses[0]["description"], "三年级上册Unit 1");

    for course in courses {
        for word in course["words"].as_array().unwrap() {
            assert!(word["word"].is_string());
            assert!(word["meaning"].is_string());
            assert!(word["phonetic"].is_string());
            assert!(word["phonemes"].is_array());
            assert!(word["phonemes_a"].is_array());
        }
    }

    // The scalar phoneme field was coerced to a one-element array.
    assert_eq!(courses[1]["words"][0]["phonemes"], serde_json::json!(["kæt"]));
    // The entry without a word got its synthesized placeholder.
    assert_eq!(courses[0]["words"][2]["word"], "_missing_word_Unit 1_2");
}

#[test]
fn stats_file_reports_quality_and_duplicates() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("words.json");
    fs::write(&input, SAMPLE_DATASET).unwrap();

    let (_, stats_text, log_text) = run_pipeline(&input, dir.path(), "stats");
    let stats: serde_json::Value = serde_json::from_str(&stats_text).unwrap();

    assert_eq!(stats["summary"]["courseCount"], 2);
    assert_eq!(stats["summary"]["totalWordCount"], 4);
    assert_eq!(stats["dataQuality"]["generatedWordPlaceholders"], 1);

    // "cat" appears in both units.
    assert_eq!(stats["duplicates"]["global"][0]["word"], "cat");
    assert_eq!(
        stats["duplicates"]["global"][0]["units"],
        serde_json::json!(["Unit 1", "Unit 2"])
    );

    // The skipped unit shows up in the run log, not the stats.
    assert!(log_text.contains("[INVALID_ENTRIES] unit=Broken type=number"));
}

#[test]
fn missing_input_file_fails_without_partial_output() {
    let dir = tempfile::tempdir().unwrap();
    let result = load_raw_dataset(&dir.path().join("absent.json"));
    assert!(result.is_err());
}
