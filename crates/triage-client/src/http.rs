//! HTTP implementation of the classification service boundary.
//!
//! Speaks the service's multipart contract: `POST /process` with a `text`
//! field or a single `file` part, `POST /process_batch` with repeated
//! `files` parts. Responses use Portuguese wire field names
//! (`categoria`/`resposta`/`erro`); they are normalized into core types
//! here and nowhere else.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info};

use triage_core::defaults::{
    API_BASE, ENV_API_BASE, ENV_TIMEOUT_SECS, PROCESS_BATCH_PATH, PROCESS_PATH,
    REQUEST_TIMEOUT_SECS,
};
use triage_core::{
    BatchItem, BatchItemOutcome, Category, ClassificationResult, Error, FilePayload, Result,
};

use crate::backend::ClassifierBackend;

/// HTTP classifier backed by the remote service.
pub struct HttpClassifier {
    client: Client,
    base_url: String,
}

impl HttpClassifier {
    /// Create a classifier against the given base URL with the default timeout.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_timeout(base_url, REQUEST_TIMEOUT_SECS)
    }

    /// Create a classifier with an explicit request timeout.
    pub fn with_timeout(base_url: impl Into<String>, timeout_secs: u64) -> Self {
        let base_url = base_url.into();
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        info!(
            "Initializing HTTP classifier: url={}, timeout={}s",
            base_url, timeout_secs
        );

        Self { client, base_url }
    }

    /// Create from environment variables.
    pub fn from_env() -> Self {
        let base_url = std::env::var(ENV_API_BASE).unwrap_or_else(|_| API_BASE.to_string());
        let timeout = std::env::var(ENV_TIMEOUT_SECS)
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(REQUEST_TIMEOUT_SECS);

        Self::with_timeout(base_url, timeout)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn file_part(file: &FilePayload) -> Result<Part> {
        Part::bytes(file.data.clone())
            .file_name(file.filename.clone())
            .mime_str(&file.content_type)
            .map_err(|e| Error::Internal(format!("Failed to create multipart part: {}", e)))
    }

    async fn post_process(&self, form: Form) -> Result<ClassificationResult> {
        let url = format!("{}{}", self.base_url, PROCESS_PATH);
        let response = self.client.post(&url).multipart(form).send().await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(status_error(status.as_u16(), &body));
        }

        let mut wire: ProcessResponse = serde_json::from_str(&body)
            .map_err(|e| Error::MalformedResponse(format!("invalid process body: {}", e)))?;

        if let Some(message) = wire.error.take() {
            return Err(Error::Server(message));
        }

        Ok(wire.into_result())
    }
}

#[async_trait]
impl ClassifierBackend for HttpClassifier {
    async fn classify_text(&self, text: &str) -> Result<ClassificationResult> {
        debug!(prompt_len = text.len(), "Submitting text for classification");
        let form = Form::new().text("text", text.to_string());
        self.post_process(form).await
    }

    async fn classify_file(&self, file: &FilePayload) -> Result<ClassificationResult> {
        debug!(filename = %file.filename, "Submitting file for classification");
        let form = Form::new().part("file", Self::file_part(file)?);
        self.post_process(form).await
    }

    async fn classify_batch(&self, files: &[FilePayload]) -> Result<Vec<BatchItem>> {
        debug!(file_count = files.len(), "Submitting batch for classification");

        let mut form = Form::new();
        for file in files {
            form = form.part("files", Self::file_part(file)?);
        }

        let url = format!("{}{}", self.base_url, PROCESS_BATCH_PATH);
        let response = self.client.post(&url).multipart(form).send().await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(status_error(status.as_u16(), &body));
        }

        let wire: BatchResponse = serde_json::from_str(&body)
            .map_err(|e| Error::MalformedResponse(format!("invalid batch body: {}", e)))?;

        let items = wire
            .resultados
            .ok_or_else(|| Error::MalformedResponse("missing resultados sequence".to_string()))?;

        Ok(items
            .into_iter()
            .enumerate()
            .map(|(idx, item)| item.into_batch_item(idx))
            .collect())
    }
}

/// Map a non-2xx response to an error.
///
/// A JSON body carrying a `detail` (FastAPI) or `error` message is surfaced
/// verbatim; otherwise the bare status is reported.
fn status_error(status: u16, body: &str) -> Error {
    if let Ok(err_body) = serde_json::from_str::<ErrorBody>(body) {
        if let Some(message) = err_body.detail.or(err_body.error) {
            return Error::Server(message);
        }
    }
    Error::Http(status)
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Deserialize)]
struct ProcessResponse {
    categoria: Option<String>,
    resposta: Option<String>,
    texto_extraido: Option<String>,
    /// Error message riding on a 2xx body.
    error: Option<String>,
}

impl ProcessResponse {
    fn into_result(self) -> ClassificationResult {
        ClassificationResult {
            category: Category::from_label(self.categoria.as_deref().unwrap_or("-")),
            reply: self.resposta.unwrap_or_else(|| "-".to_string()),
            extracted_preview: self.texto_extraido.filter(|t| !t.is_empty()),
        }
    }
}

// `detail` comes from FastAPI error responses, `error` from the service's
// own failure bodies.
#[derive(Deserialize)]
struct ErrorBody {
    detail: Option<String>,
    error: Option<String>,
}

#[derive(Deserialize)]
struct BatchResponse {
    resultados: Option<Vec<WireBatchItem>>,
}

#[derive(Deserialize)]
struct WireBatchItem {
    filename: Option<String>,
    categoria: Option<String>,
    resposta: Option<String>,
    preview: Option<String>,
    erro: Option<String>,
}

impl WireBatchItem {
    fn into_batch_item(self, index: usize) -> BatchItem {
        let filename = self
            .filename
            .unwrap_or_else(|| format!("file {}", index + 1));

        let outcome = if let Some(message) = self.erro {
            BatchItemOutcome::Failed(message)
        } else if self.categoria.is_none() && self.resposta.is_none() {
            BatchItemOutcome::Failed("incomplete item in response".to_string())
        } else {
            BatchItemOutcome::Classified(ClassificationResult {
                category: Category::from_label(self.categoria.as_deref().unwrap_or("-")),
                reply: self.resposta.unwrap_or_else(|| "-".to_string()),
                extracted_preview: self.preview.filter(|t| !t.is_empty()),
            })
        };

        BatchItem { filename, outcome }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_response_normalizes_category() {
        let wire: ProcessResponse =
            serde_json::from_str(r#"{"categoria":"PRODUTIVO","resposta":"ok"}"#).unwrap();
        let result = wire.into_result();
        assert_eq!(result.category, Category::Productive);
        assert_eq!(result.reply, "ok");
        assert_eq!(result.extracted_preview, None);
    }

    #[test]
    fn test_process_response_missing_fields_default() {
        let wire: ProcessResponse = serde_json::from_str("{}").unwrap();
        let result = wire.into_result();
        assert_eq!(result.category, Category::Unproductive);
        assert_eq!(result.reply, "-");
    }

    #[test]
    fn test_wire_item_with_erro_is_failed() {
        let wire: WireBatchItem = serde_json::from_str(
            r#"{"filename":"a.txt","erro":"unsupported format"}"#,
        )
        .unwrap();
        let item = wire.into_batch_item(0);
        assert_eq!(item.filename, "a.txt");
        assert!(matches!(
            item.outcome,
            BatchItemOutcome::Failed(ref m) if m == "unsupported format"
        ));
    }

    #[test]
    fn test_wire_item_filename_fallback_is_positional() {
        let wire: WireBatchItem =
            serde_json::from_str(r#"{"categoria":"Produtivo","resposta":"ok"}"#).unwrap();
        let item = wire.into_batch_item(2);
        assert_eq!(item.filename, "file 3");
    }

    #[test]
    fn test_wire_item_without_result_or_erro_is_failed() {
        let wire: WireBatchItem = serde_json::from_str(r#"{"filename":"a.txt"}"#).unwrap();
        let item = wire.into_batch_item(0);
        assert!(item.is_error());
    }

    #[test]
    fn test_status_error_prefers_detail_message() {
        let err = status_error(422, r#"{"detail":"file too large"}"#);
        assert!(matches!(err, Error::Server(ref m) if m == "file too large"));
    }

    #[test]
    fn test_status_error_falls_back_to_status() {
        let err = status_error(502, "<html>bad gateway</html>");
        assert!(matches!(err, Error::Http(502)));
    }
}
