use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

/// Tool configuration loaded from `config.toml`. File paths and the
/// locale-specific course presentation values all live here rather than
/// as literals in the pipeline code.
#[derive(Deserialize, Debug, Clone)]
pub struct Config {
    pub input_file: PathBuf,
    pub processed_file: PathBuf,
    pub stats_file: PathBuf,
    pub log_file: PathBuf,
    #[serde(default)]
    pub course_style: CourseStyle,
}

/// Presentation values stamped onto every generated course.
#[derive(Deserialize, Debug, Clone)]
pub struct CourseStyle {
    #[serde(default = "default_emoji")]
    pub emoji: String,
    #[serde(default)]
    pub description_prefix: String,
}

fn default_emoji() -> String {
    "\u{1F524}".to_string() // 🔤
}

impl Default for CourseStyle {
    fn default() -> Self {
        CourseStyle {
            emoji: default_emoji(),
            description_prefix: String::new(),
        }
    }
}

pub fn load_config_from_file(file_path: &str) -> Result<Config, String> {
    match fs::read_to_string(file_path) {
        Ok(contents) => match toml::from_str::<Config>(&contents) {
            Ok(loaded_config) => Ok(loaded_config),
            Err(e) => Err(format!("Failed to parse {}: {}", file_path, e)),
        },
        Err(e) => Err(format!(
            "Failed to read {}: {}. Please ensure it exists.",
            file_path, e
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_config() {
        let toml_src = r#"
            input_file = "words.json"
            processed_file = "words_processed.json"
            stats_file = "words_stats.json"
            log_file = "words_process.log"

            [course_style]
            emoji = "📚"
            description_prefix = "三年级上册"
        "#;
        let config: Config = toml::from_str(toml_src).unwrap();
        assert_eq!(config.input_file, PathBuf::from("words.json"));
        assert_eq!(config.course_style.emoji, "📚");
        assert_eq!(config.course_style.description_prefix, "三年级上册");
    }

    #[test]
    fn course_style_defaults_when_missing() {
        let toml_src = r#"
            input_file = "words.json"
            processed_file = "out.json"
            stats_file = "stats.json"
            log_file = "run.log"
        "#;
        let config: Config = toml::from_str(toml_src).unwrap();
        assert_eq!(config.course_style.emoji, "🔤");
        assert_eq!(config.course_style.description_prefix, "");
    }

    #[test]
    fn missing_file_is_an_error() {
        let result = load_config_from_file("definitely_not_here.toml");
        assert!(result.is_err());
    }
}
