//! Logging integration test: the collector installed as the global `log`
//! backend persists macro output and forwards it to the UI channel.

use log::LevelFilter;
use tempfile::TempDir;
use testbench_dashboard::{LogCollector, LogLine};

#[tokio::test]
async fn test_global_logger_reaches_disk_and_ui() {
    let dir = TempDir::new().unwrap();
    let (ui_tx, mut ui_rx) = tokio::sync::mpsc::channel::<LogLine>(64);
    let collector = LogCollector::new(dir.path().join("logs"), ui_tx, LevelFilter::Info).unwrap();
    collector.install().unwrap();

    log::debug!("[Test] filtered out");
    log::warn!("[Test] Model 'x' has no execution records");
    collector.wait_for_empty().await.unwrap();

    let content = std::fs::read_to_string(collector.log_path()).unwrap();
    assert!(content.contains("[WARN] [Test] Model 'x' has no execution records"));
    assert!(!content.contains("filtered out"));

    let line = ui_rx.recv().await.unwrap();
    assert_eq!(line.level, log::Level::Warn);
}
