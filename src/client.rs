// src/client.rs

//! `aws-sdk-qbusiness` implementation of the API seam.

use async_trait::async_trait;
use aws_sdk_qbusiness::primitives::Blob;
use aws_sdk_qbusiness::types as qb;
use aws_smithy_types::error::display::DisplayErrorContext;
use aws_smithy_types::{Document, Number};
use serde_json::Value;
use tracing::debug;

use crate::api::{
    ContentType, DataSourceDetail, DataSourceSummary, DocumentUpload, FailedDocument,
    QBusinessApi,
};
use crate::config::QConfig;
use crate::error::{AppError, Result};

/// Q Business client scoped to one application/index/role from the config.
pub struct QBusinessClient {
    client: aws_sdk_qbusiness::Client,
    application_id: String,
    index_id: String,
    role_arn: String,
}

impl QBusinessClient {
    pub fn new(client: aws_sdk_qbusiness::Client, config: &QConfig) -> Self {
        Self {
            client,
            application_id: config.application_id.clone(),
            index_id: config.index_id.clone(),
            role_arn: config.role_arn.clone(),
        }
    }
}

fn sdk_error<E: std::error::Error>(err: E) -> AppError {
    AppError::Client(format!("{}", DisplayErrorContext(&err)))
}

impl From<ContentType> for qb::ContentType {
    fn from(kind: ContentType) -> Self {
        match kind {
            ContentType::Pdf => qb::ContentType::Pdf,
            ContentType::Html => qb::ContentType::Html,
            ContentType::MsWord => qb::ContentType::MsWord,
            ContentType::MsExcel => qb::ContentType::MsExcel,
            ContentType::Ppt => qb::ContentType::Ppt,
            ContentType::Rtf => qb::ContentType::Rtf,
            ContentType::Xml => qb::ContentType::Xml,
            ContentType::Json => qb::ContentType::Json,
            ContentType::Csv => qb::ContentType::Csv,
            ContentType::Md => qb::ContentType::Md,
            ContentType::PlainText => qb::ContentType::PlainText,
        }
    }
}

#[async_trait]
impl QBusinessApi for QBusinessClient {
    async fn put_document(&self, document: DocumentUpload) -> Result<Vec<FailedDocument>> {
        let doc = qb::Document::builder()
            .id(&document.id)
            .title(&document.title)
            .content_type(document.content_type.into())
            .content(qb::DocumentContent::Blob(Blob::new(document.content)))
            .build()
            .map_err(|e| AppError::client(format!("invalid document: {e}")))?;

        let output = self
            .client
            .batch_put_document()
            .application_id(&self.application_id)
            .index_id(&self.index_id)
            .role_arn(&self.role_arn)
            .documents(doc)
            .send()
            .await
            .map_err(sdk_error)?;

        Ok(output
            .failed_documents()
            .iter()
            .map(|f| FailedDocument {
                id: f.id().unwrap_or_default().to_string(),
                message: f
                    .error()
                    .and_then(|e| e.error_message())
                    .unwrap_or("unknown error")
                    .to_string(),
            })
            .collect())
    }

    async fn list_data_sources(&self) -> Result<Vec<DataSourceSummary>> {
        let mut summaries = Vec::new();
        let mut next_token: Option<String> = None;

        loop {
            let mut request = self
                .client
                .list_data_sources()
                .application_id(&self.application_id)
                .index_id(&self.index_id);
            if let Some(token) = &next_token {
                request = request.next_token(token);
            }

            let output = request.send().await.map_err(sdk_error)?;

            summaries.extend(output.data_sources().iter().map(|ds| DataSourceSummary {
                id: ds.data_source_id().unwrap_or_default().to_string(),
                display_name: ds.display_name().unwrap_or_default().to_string(),
            }));

            match output.next_token() {
                Some(token) => next_token = Some(token.to_string()),
                None => break,
            }
        }

        debug!(count = summaries.len(), "Listed data sources");
        Ok(summaries)
    }

    async fn get_data_source(&self, data_source_id: &str) -> Result<DataSourceDetail> {
        let output = self
            .client
            .get_data_source()
            .application_id(&self.application_id)
            .index_id(&self.index_id)
            .data_source_id(data_source_id)
            .send()
            .await
            .map_err(sdk_error)?;

        let configuration = output.configuration().map(document_to_value).ok_or_else(|| {
            AppError::client(format!("data source {data_source_id} has no configuration"))
        })?;

        Ok(DataSourceDetail {
            id: output.data_source_id().unwrap_or(data_source_id).to_string(),
            display_name: output.display_name().unwrap_or_default().to_string(),
            configuration,
        })
    }

    async fn update_data_source(&self, data_source_id: &str, configuration: Value) -> Result<()> {
        self.client
            .update_data_source()
            .application_id(&self.application_id)
            .index_id(&self.index_id)
            .data_source_id(data_source_id)
            .configuration(value_to_document(&configuration))
            .send()
            .await
            .map_err(sdk_error)?;

        Ok(())
    }
}

/// Convert an untyped SDK document into JSON so the service layer can edit it.
pub(crate) fn document_to_value(doc: &Document) -> Value {
    match doc {
        Document::Null => Value::Null,
        Document::Bool(b) => Value::Bool(*b),
        Document::Number(n) => match n {
            Number::PosInt(v) => Value::from(*v),
            Number::NegInt(v) => Value::from(*v),
            Number::Float(v) => serde_json::Number::from_f64(*v)
                .map(Value::Number)
                .unwrap_or(Value::Null),
        },
        Document::String(s) => Value::String(s.clone()),
        Document::Array(items) => Value::Array(items.iter().map(document_to_value).collect()),
        Document::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), document_to_value(v)))
                .collect(),
        ),
    }
}

/// Convert edited JSON back into the SDK's untyped document form.
pub(crate) fn value_to_document(value: &Value) -> Document {
    match value {
        Value::Null => Document::Null,
        Value::Bool(b) => Document::Bool(*b),
        Value::Number(n) => {
            if let Some(v) = n.as_u64() {
                Document::Number(Number::PosInt(v))
            } else if let Some(v) = n.as_i64() {
                Document::Number(Number::NegInt(v))
            } else {
                Document::Number(Number::Float(n.as_f64().unwrap_or(f64::NAN)))
            }
        }
        Value::String(s) => Document::String(s.clone()),
        Value::Array(items) => Document::Array(items.iter().map(value_to_document).collect()),
        Value::Object(map) => Document::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), value_to_document(v)))
                .collect(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn crawler_configuration_survives_document_conversion() {
        let original = json!({
            "type": "WEBCRAWLERV2",
            "connectionConfiguration": {
                "repositoryEndpointMetadata": {
                    "seedUrlConnections": [
                        { "seedUrl": "https://example.com/docs" }
                    ],
                    "authentication": "NoAuthentication"
                }
            },
            "repositoryConfigurations": { "webPage": { "fieldMappings": [] } },
            "crawlDepth": 2,
            "enabled": true
        });

        let doc = value_to_document(&original);
        assert_eq!(document_to_value(&doc), original);
    }

    #[test]
    fn negative_and_float_numbers_convert() {
        let value = json!({ "offset": -3, "ratio": 0.5 });
        let roundtripped = document_to_value(&value_to_document(&value));
        assert_eq!(roundtripped["offset"], json!(-3));
        assert_eq!(roundtripped["ratio"], json!(0.5));
    }
}
