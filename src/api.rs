// src/api.rs

//! Remote indexing API seam.
//!
//! One async trait covering the four Q Business calls this tool performs,
//! expressed over plain domain types so the service layer stays independent
//! of the SDK and tests can mock the boundary.

use std::path::Path;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use serde_json::Value;

use crate::error::Result;

/// Content type accepted by the index, inferred from a file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    Pdf,
    Html,
    MsWord,
    MsExcel,
    Ppt,
    Rtf,
    Xml,
    Json,
    Csv,
    Md,
    PlainText,
}

impl ContentType {
    /// Static extension table; unknown extensions index as plain text.
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match ext.as_deref() {
            Some("pdf") => Self::Pdf,
            Some("htm" | "html") => Self::Html,
            Some("doc" | "docx") => Self::MsWord,
            Some("xls" | "xlsx") => Self::MsExcel,
            Some("ppt" | "pptx") => Self::Ppt,
            Some("rtf") => Self::Rtf,
            Some("xml") => Self::Xml,
            Some("json") => Self::Json,
            Some("csv") => Self::Csv,
            Some("md") => Self::Md,
            _ => Self::PlainText,
        }
    }
}

/// A single document staged for batch submission.
#[derive(Debug, Clone)]
pub struct DocumentUpload {
    pub id: String,
    pub title: String,
    pub content: Vec<u8>,
    pub content_type: ContentType,
}

/// One rejected entry from a batch submission response.
#[derive(Debug, Clone)]
pub struct FailedDocument {
    pub id: String,
    pub message: String,
}

/// Summary row from the data source listing.
#[derive(Debug, Clone)]
pub struct DataSourceSummary {
    pub id: String,
    pub display_name: String,
}

/// Full data source view used for the seed-list read-modify-write.
#[derive(Debug, Clone)]
pub struct DataSourceDetail {
    pub id: String,
    pub display_name: String,
    /// The untyped connector configuration blob, as JSON.
    pub configuration: Value,
}

/// The four remote operations against the indexing service.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait QBusinessApi: Send + Sync {
    /// Submit a single-document batch; returns the entries the service rejected.
    async fn put_document(&self, document: DocumentUpload) -> Result<Vec<FailedDocument>>;

    /// List every data source of the configured index, following pagination.
    async fn list_data_sources(&self) -> Result<Vec<DataSourceSummary>>;

    /// Fetch one data source including its configuration blob.
    async fn get_data_source(&self, data_source_id: &str) -> Result<DataSourceDetail>;

    /// Write a data source configuration back.
    async fn update_data_source(&self, data_source_id: &str, configuration: Value) -> Result<()>;
}
