use crate::types::dataset::{IssueEntry, ProcessedDataset, RawDataset};
use crate::types::report::StatisticsReport;
use std::error::Error;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// Loads a raw unit -> entries dataset. A file that cannot be read, or whose
/// top level is not a JSON object, is a fatal error; everything below the
/// top level stays loosely typed and is validated during normalization.
pub fn load_raw_dataset(file_path: &Path) -> Result<RawDataset, Box<dyn Error>> {
    let file = File::open(file_path)
        .map_err(|e| format!("Failed to open dataset file at {:?}: {}", file_path, e))?;
    let reader = BufReader::new(file);

    let dataset: RawDataset = serde_json::from_reader(reader)
        .map_err(|e| format!("Failed to parse dataset from {:?}: {}", file_path, e))?;
    Ok(dataset)
}

pub fn write_processed(
    file_path: &Path,
    processed: &ProcessedDataset,
) -> Result<(), Box<dyn Error>> {
    let file = File::create(file_path)
        .map_err(|e| format!("Failed to create processed file at {:?}: {}", file_path, e))?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, processed)
        .map_err(|e| format!("Failed to serialize processed courses to {:?}: {}", file_path, e))?;
    Ok(())
}

pub fn write_stats(file_path: &Path, stats: &StatisticsReport) -> Result<(), Box<dyn Error>> {
    let file = File::create(file_path)
        .map_err(|e| format!("Failed to create stats file at {:?}: {}", file_path, e))?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, stats)
        .map_err(|e| format!("Failed to serialize stats to {:?}: {}", file_path, e))?;
    Ok(())
}

/// Writes the run log: a timestamp header, the file paths of the run, and
/// one line per recorded issue (or a no-issues marker).
pub fn write_run_log(
    log_path: &Path,
    input_path: &Path,
    processed_path: &Path,
    stats_path: &Path,
    issues: &[IssueEntry],
) -> Result<(), Box<dyn Error>> {
    let file = File::create(log_path)
        .map_err(|e| format!("Failed to create log file at {:?}: {}", log_path, e))?;
    let mut writer = BufWriter::new(file);

    let timestamp = chrono::Local::now().format("%Y-%m-%dT%H:%M:%S");
    writeln!(writer, "Process Time: {}", timestamp)?;
    writeln!(writer, "Input File: {}", input_path.display())?;
    writeln!(writer, "Processed File: {}", processed_path.display())?;
    writeln!(writer, "Stats File: {}", stats_path.display())?;
    writeln!(writer)?;
    writeln!(writer, "Logs:")?;
    if issues.is_empty() {
        writeln!(writer, "[NO_ISSUES]")?;
    } else {
        for issue in issues {
            writeln!(writer, "{}", issue.log_line())?;
        }
    }
    writer
        .flush()
        .map_err(|e| format!("Failed to flush log file at {:?}: {}", log_path, e))?;
    Ok(())
}
