use crate::types::dataset::{Course, NormalizedWord, ProcessedDataset};
use rand::seq::SliceRandom;
use serde::Serialize;
use std::error::Error;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Read-side view over a processed courses file: lookups and word sampling
/// for study sessions.
#[derive(Debug, Clone, Default)]
pub struct CourseCatalog {
    courses: Vec<Course>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct CourseSummary {
    pub id: String,
    pub name: String,
    pub emoji: String,
    pub word_count: usize,
    pub description: String,
}

impl CourseCatalog {
    pub fn load(file_path: &Path) -> Result<Self, Box<dyn Error>> {
        let file = File::open(file_path)
            .map_err(|e| format!("Failed to open courses file at {:?}: {}", file_path, e))?;
        let reader = BufReader::new(file);

        let processed: ProcessedDataset = serde_json::from_reader(reader)
            .map_err(|e| format!("Failed to parse courses file from {:?}: {}", file_path, e))?;
        Ok(CourseCatalog {
            courses: processed.courses,
        })
    }

    pub fn from_courses(courses: Vec<Course>) -> Self {
        CourseCatalog { courses }
    }

    pub fn all_courses(&self) -> Vec<CourseSummary> {
        self.courses
            .iter()
            .map(|course| CourseSummary {
                id: course.id.clone(),
                name: course.name.clone(),
                emoji: course.emoji.clone(),
                word_count: course.words.len(),
                description: course.description.clone(),
            })
            .collect()
    }

    pub fn course_by_id(&self, course_id: &str) -> Option<&Course> {
        self.courses.iter().find(|course| course.id == course_id)
    }

    pub fn course_by_name(&self, course_name: &str) -> Option<&Course> {
        self.courses.iter().find(|course| course.name == course_name)
    }

    pub fn course_names(&self) -> Vec<&str> {
        self.courses.iter().map(|course| course.name.as_str()).collect()
    }

    pub fn contains_course(&self, course_name: &str) -> bool {
        self.course_by_name(course_name).is_some()
    }

    /// Samples up to `count` distinct words from a course, without
    /// replacement. An unknown or empty course yields an empty list.
    pub fn random_words(&self, course_name: &str, count: usize) -> Vec<NormalizedWord> {
        let course = match self.course_by_name(course_name) {
            Some(course) if !course.words.is_empty() => course,
            _ => {
                eprintln!(
                    "Course {:?} does not exist or has no word data",
                    course_name
                );
                return Vec::new();
            }
        };

        let mut rng = rand::thread_rng();
        course
            .words
            .choose_multiple(&mut rng, count)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(text: &str) -> NormalizedWord {
        NormalizedWord {
            word: text.to_string(),
            meaning: "意思".to_string(),
            phonetic: String::new(),
            phonemes: vec![],
            phonemes_a: vec![],
        }
    }

    fn catalog() -> CourseCatalog {
        CourseCatalog::from_courses(vec![
            Course {
                id: "unit_1".to_string(),
                name: "Unit 1".to_string(),
                emoji: "🔤".to_string(),
                description: "三年级上册Unit 1".to_string(),
                words: vec![word("cat"), word("dog"), word("sun")],
            },
            Course {
                id: "unit_2".to_string(),
                name: "Unit 2".to_string(),
                emoji: "🔤".to_string(),
                description: "三年级上册Unit 2".to_string(),
                words: vec![],
            },
        ])
    }

    #[test]
    fn summaries_carry_word_counts() {
        let summaries = catalog().all_courses();
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].id, "unit_1");
        assert_eq!(summaries[0].word_count, 3);
        assert_eq!(summaries[1].word_count, 0);
    }

    #[test]
    fn lookup_by_id_and_name() {
        let catalog = catalog();
        assert_eq!(catalog.course_by_id("unit_1").unwrap().name, "Unit 1");
        assert_eq!(catalog.course_by_name("Unit 2").unwrap().id, "unit_2");
        assert!(catalog.course_by_id("unit_9").is_none());
        assert!(catalog.contains_course("Unit 1"));
        assert!(!catalog.contains_course("Unit 9"));
        assert_eq!(catalog.course_names(), vec!["Unit 1", "Unit 2"]);
    }

    #[test]
    fn random_words_are_distinct_members_of_the_course() {
        let catalog = catalog();
        let sample = catalog.random_words("Unit 1", 2);
        assert_eq!(sample.len(), 2);
        assert_ne!(sample[0].word, sample[1].word);
        for picked in &sample {
            assert!(["cat", "dog", "sun"].contains(&picked.word.as_str()));
        }
    }

    #[test]
    fn oversized_request_returns_the_whole_course() {
        let sample = catalog().random_words("Unit 1", 10);
        assert_eq!(sample.len(), 3);
    }

    #[test]
    fn unknown_or_empty_course_yields_nothing() {
        let catalog = catalog();
        assert!(catalog.random_words("Unit 9", 5).is_empty());
        assert!(catalog.random_words("Unit 2", 5).is_empty());
    }

    #[test]
    fn load_round_trips_a_processed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("courses.json");
        let processed = ProcessedDataset {
            courses: catalog().courses,
        };
        let file = std::fs::File::create(&path).unwrap();
        serde_json::to_writer_pretty(file, &processed).unwrap();

        let loaded = CourseCatalog::load(&path).unwrap();
        assert_eq!(loaded.course_names(), vec!["Unit 1", "Unit 2"]);
    }
}
