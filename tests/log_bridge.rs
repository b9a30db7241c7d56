//! Verifies that library tracing events reach the `log` facade.
//!
//! The binary only installs env_logger, so the library's tracing events are
//! visible exactly when tracing's log bridge forwards them. This file holds a
//! single test: the capture logger is process-global.

use std::sync::Mutex;

use async_trait::async_trait;
use dejaq::api::{
    DataSourceDetail, DataSourceSummary, DocumentUpload, FailedDocument, QBusinessApi,
};
use dejaq::error::Result;
use dejaq::service::QService;
use serde_json::Value;

static CAPTURED: Mutex<Vec<String>> = Mutex::new(Vec::new());

struct CaptureLogger;

impl log::Log for CaptureLogger {
    fn enabled(&self, _metadata: &log::Metadata) -> bool {
        true
    }

    fn log(&self, record: &log::Record) {
        CAPTURED.lock().unwrap().push(record.args().to_string());
    }

    fn flush(&self) {}
}

/// Accepts every document; enough to drive the upload path end to end.
struct AcceptingApi;

#[async_trait]
impl QBusinessApi for AcceptingApi {
    async fn put_document(&self, _document: DocumentUpload) -> Result<Vec<FailedDocument>> {
        Ok(Vec::new())
    }

    async fn list_data_sources(&self) -> Result<Vec<DataSourceSummary>> {
        Ok(Vec::new())
    }

    async fn get_data_source(&self, _data_source_id: &str) -> Result<DataSourceDetail> {
        unimplemented!("not exercised by this test")
    }

    async fn update_data_source(&self, _data_source_id: &str, _configuration: Value) -> Result<()> {
        Ok(())
    }
}

#[tokio::test]
async fn library_tracing_events_reach_the_log_facade() {
    log::set_logger(&CaptureLogger).unwrap();
    log::set_max_level(log::LevelFilter::Trace);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.txt");
    std::fs::write(&path, "hello").unwrap();

    QService::new(AcceptingApi)
        .upload_document(&path)
        .await
        .unwrap();

    let captured = CAPTURED.lock().unwrap();
    assert!(
        captured.iter().any(|m| m.contains("Successfully uploaded")),
        "tracing events must forward into the log facade, captured: {captured:?}"
    );
}
