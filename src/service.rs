// src/service.rs

//! Upload and crawler-registration operations.

use std::path::Path;

use serde_json::{json, Value};
use tracing::info;

use crate::api::{ContentType, DocumentUpload, QBusinessApi};
use crate::error::{AppError, Result};

/// JSON pointer to the seed URL list inside a web crawler data source
/// configuration.
const SEED_URLS_POINTER: &str =
    "/connectionConfiguration/repositoryEndpointMetadata/seedUrlConnections";

/// The two operations this tool performs against the index.
pub struct QService<A: QBusinessApi> {
    api: A,
}

impl<A: QBusinessApi> QService<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    /// Read a local file fully into memory and submit it as a
    /// single-document batch. No retry, no partial-success handling.
    pub async fn upload_document(&self, path: &Path) -> Result<()> {
        let content = tokio::fs::read(path)
            .await
            .map_err(|e| AppError::upload(path, format!("failed to read file: {e}")))?;

        let content_type = ContentType::from_path(path);
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("document")
            .to_string();

        info!(
            file = %path.display(),
            ?content_type,
            bytes = content.len(),
            "Submitting document batch"
        );

        let failed = self
            .api
            .put_document(DocumentUpload {
                id: name.clone(),
                title: name,
                content,
                content_type,
            })
            .await?;

        if let Some(failure) = failed.first() {
            return Err(AppError::upload(
                path,
                format!("document '{}' rejected: {}", failure.id, failure.message),
            ));
        }

        info!(file = %path.display(), "Successfully uploaded");
        Ok(())
    }

    /// Append a seed URL to the named web crawler data source.
    ///
    /// Fetch-modify-write with no version check; concurrent runs against the
    /// same crawler can lose an append. The first data source whose display
    /// name matches exactly (case-sensitive) wins; everything in the
    /// configuration apart from the appended URL is written back verbatim.
    pub async fn add_url_to_crawler(&self, url: &str, crawler_name: &str) -> Result<()> {
        let sources = self.api.list_data_sources().await?;

        let Some(source) = sources.iter().find(|s| s.display_name == crawler_name) else {
            return Err(AppError::DataSourceNotFound(crawler_name.to_string()));
        };

        let mut detail = self.api.get_data_source(&source.id).await?;

        let seeds = detail
            .configuration
            .pointer_mut(SEED_URLS_POINTER)
            .and_then(Value::as_array_mut)
            .ok_or_else(|| {
                AppError::config(format!(
                    "data source '{crawler_name}' has no seed URL list; is it a web crawler?"
                ))
            })?;

        seeds.push(json!({ "seedUrl": url }));
        let seed_count = seeds.len();

        self.api
            .update_data_source(&source.id, detail.configuration)
            .await?;

        info!(url, crawler = crawler_name, seed_count, "Added URL to web crawler");
        Ok(())
    }
}
