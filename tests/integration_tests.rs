use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use segcat::adapters::{LocalFsAdapter, RecordingEngineAdapter};
use segcat::*;
use tempfile::TempDir;

/// Test utilities for pipeline runs
mod test_utils {
    use super::*;

    /// Lay out an input file and range config inside a fresh temp dir
    pub fn workspace(ranges: &str) -> (TempDir, PipelineSettings) {
        let temp = TempDir::new().unwrap();
        let input = temp.path().join("movie.mkv");
        std::fs::write(&input, b"not really a video").unwrap();
        let ranges_path = temp.path().join("config.json");
        std::fs::write(&ranges_path, ranges).unwrap();

        let mut settings = PipelineSettings::new(input, temp.path().join("clip.mp4"));
        settings.ranges_path = ranges_path;
        settings.work_root = temp.path().to_path_buf();
        (temp, settings)
    }

    pub fn run_with(
        settings: PipelineSettings,
        engine: Arc<RecordingEngineAdapter>,
    ) -> PipelineInteractor {
        PipelineInteractor::new(settings, engine, Arc::new(LocalFsAdapter::new()))
    }

    pub fn manifest_lines(path: &Path) -> Vec<String> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }
}

use test_utils::*;

#[test]
fn test_time_parsing() {
    assert_eq!(parse_time("01:02:03").unwrap(), 3723);
    assert_eq!(parse_time("90").unwrap(), 90);
    assert_eq!(parse_time("2:05").unwrap(), 125);
    assert!(parse_time("1:2:3:4").is_err());
    assert!(parse_time("1:x").is_err());
}

#[tokio::test]
async fn test_manifest_follows_config_order_not_completion_order() {
    let (temp, settings) = workspace("00:05:00 00:06:00\n00:01:00 00:02:00\n00:03:00 00:04:00\n");
    let engine = Arc::new(
        RecordingEngineAdapter::new()
            .touching_outputs()
            .with_delay("0.mp4", Duration::from_millis(150))
            .with_delay("1.mp4", Duration::from_millis(75)),
    );

    let report = run_with(settings, engine.clone()).execute().await.unwrap();

    let work_dir = temp.path().join("movie_tmp");
    let expected: Vec<PathBuf> = (0..3).map(|i| work_dir.join(format!("{}.mp4", i))).collect();
    assert_eq!(report.segments, expected);

    let lines = manifest_lines(&report.manifest);
    let expected_lines: Vec<String> = expected
        .iter()
        .map(|p| format!("file '{}'", p.display()))
        .collect();
    assert_eq!(lines, expected_lines);

    // extraction of segment 2 finished first, segment 0 last
    let finished: Vec<PathBuf> = engine
        .completion_order()
        .into_iter()
        .filter(|p| p.extension().is_some_and(|e| e == "mp4") && p.starts_with(&work_dir))
        .collect();
    assert_eq!(finished.first(), Some(&work_dir.join("2.mp4")));
    assert_eq!(finished.last(), Some(&work_dir.join("0.mp4")));
}

#[tokio::test]
async fn test_concurrency_limit_from_settings() {
    let ranges: String = (0..8).map(|i| format!("{} {}\n", i * 10, i * 10 + 5)).collect();
    let (_temp, mut settings) = workspace(&ranges);
    settings.concurrency = Concurrency::Limit(3);

    let mut engine = RecordingEngineAdapter::new().touching_outputs();
    for i in 0..8 {
        engine = engine.with_delay(&format!("{}.mp4", i), Duration::from_millis(15));
    }
    let engine = Arc::new(engine);

    let report = run_with(settings, engine.clone()).execute().await.unwrap();

    assert_eq!(report.segments.len(), 8);
    assert!(engine.peak_in_flight() <= 3);
}

#[tokio::test]
async fn test_repeated_ranges_are_accepted() {
    let (_temp, settings) = workspace("0:30 1:00\n0:30 1:00\n0:10 0:20\n");
    let engine = Arc::new(RecordingEngineAdapter::new().touching_outputs());

    let report = run_with(settings, engine.clone()).execute().await.unwrap();

    assert_eq!(report.segments.len(), 3);
    let extracts: Vec<(String, String)> = engine
        .invocations()
        .iter()
        .filter(|c| c.operation == EngineOperation::Extract)
        .map(|c| (c.arg_after("-ss").unwrap().to_string(), c.arg_after("-to").unwrap().to_string()))
        .collect();
    assert_eq!(extracts.iter().filter(|r| r.0 == "30" && r.1 == "60").count(), 2);
}

#[tokio::test]
async fn test_reversed_range_aborts_before_engine() {
    let (temp, settings) = workspace("0:30 1:00\n2:00 1:00\n");
    let engine = Arc::new(RecordingEngineAdapter::new().touching_outputs());

    let err = run_with(settings, engine.clone()).execute().await.unwrap_err();

    assert_eq!(err.stage(), Some(PipelineStage::ConfigLoaded));
    assert!(matches!(err.root(), PipelineError::EmptyRange { line_number: 2, .. }));
    assert!(engine.invocations().is_empty());
    assert!(!temp.path().join("movie_tmp").exists());
}

#[tokio::test]
async fn test_failure_reports_stage() {
    let (_temp, settings) = workspace("10 20\n30 40\n");
    let engine = Arc::new(
        RecordingEngineAdapter::new()
            .touching_outputs()
            .failing_on("clip.mp4"),
    );

    let err = run_with(settings, engine).execute().await.unwrap_err();

    assert_eq!(err.stage(), Some(PipelineStage::Concatenated));
    assert!(err.to_string().contains("concatenating segments"));
}

#[tokio::test]
async fn test_dry_run_container_writes_manifest_only() {
    let (temp, mut settings) = workspace("10 20\n");
    settings.dry_run = true;
    let container = DefaultAppContainer::new(settings);

    use segcat::app::AppContainer;
    let report = container.pipeline_interactor().execute().await.unwrap();

    assert!(report.manifest.exists());
    assert!(!report.master.exists());
    assert!(!temp.path().join("clip.mp4").exists());
}
