//! Mock classification backend for deterministic testing.
//!
//! Scripted rather than random: fixed or per-input responses, queued
//! failures consumed one per call, and a call log for assertions.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let backend = MockClassifier::new()
//!     .with_result(Category::Productive, "Will resend today.")
//!     .with_error(Error::Network("connection refused".into()));
//!
//! // First call fails with the queued error, the second returns the result.
//! ```

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;

use triage_core::{
    BatchItem, BatchItemOutcome, Category, ClassificationResult, Error, FilePayload, Result,
};

use crate::backend::ClassifierBackend;

/// One logged backend call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockCall {
    /// "classify_text", "classify_file", or "classify_batch".
    pub operation: String,
    /// Submitted text, filename, or comma-joined batch filenames.
    pub input: String,
}

/// Deterministic scripted classifier backend.
pub struct MockClassifier {
    default_response: ClassificationResult,
    responses: HashMap<String, ClassificationResult>,
    queued_errors: Mutex<VecDeque<Error>>,
    scripted_batch: Mutex<Option<Vec<BatchItem>>>,
    call_log: Mutex<Vec<MockCall>>,
}

impl MockClassifier {
    /// Create a mock that classifies everything as unproductive.
    pub fn new() -> Self {
        Self {
            default_response: ClassificationResult {
                category: Category::Unproductive,
                reply: "Mock reply".to_string(),
                extracted_preview: None,
            },
            responses: HashMap::new(),
            queued_errors: Mutex::new(VecDeque::new()),
            scripted_batch: Mutex::new(None),
            call_log: Mutex::new(Vec::new()),
        }
    }

    /// Set the fixed response for all classify calls.
    pub fn with_result(mut self, category: Category, reply: impl Into<String>) -> Self {
        self.default_response = ClassificationResult {
            category,
            reply: reply.into(),
            extracted_preview: None,
        };
        self
    }

    /// Set the fixed response including an extracted preview.
    pub fn with_full_result(mut self, result: ClassificationResult) -> Self {
        self.default_response = result;
        self
    }

    /// Map a specific input (text or filename) to a specific result.
    pub fn with_response_for(
        mut self,
        input: impl Into<String>,
        result: ClassificationResult,
    ) -> Self {
        self.responses.insert(input.into(), result);
        self
    }

    /// Queue an error; each queued error fails exactly one call, in order.
    pub fn with_error(self, error: Error) -> Self {
        self.queued_errors.lock().unwrap().push_back(error);
        self
    }

    /// Script the exact items the next batch call returns.
    pub fn with_batch(self, items: Vec<BatchItem>) -> Self {
        *self.scripted_batch.lock().unwrap() = Some(items);
        self
    }

    /// All logged calls, in order.
    pub fn calls(&self) -> Vec<MockCall> {
        self.call_log.lock().unwrap().clone()
    }

    /// Number of calls for one operation.
    pub fn call_count(&self, operation: &str) -> usize {
        self.call_log
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.operation == operation)
            .count()
    }

    fn log(&self, operation: &str, input: String) {
        self.call_log.lock().unwrap().push(MockCall {
            operation: operation.to_string(),
            input,
        });
    }

    fn take_queued_error(&self) -> Option<Error> {
        self.queued_errors.lock().unwrap().pop_front()
    }

    fn response_for(&self, input: &str) -> ClassificationResult {
        self.responses
            .get(input)
            .cloned()
            .unwrap_or_else(|| self.default_response.clone())
    }
}

impl Default for MockClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ClassifierBackend for MockClassifier {
    async fn classify_text(&self, text: &str) -> Result<ClassificationResult> {
        self.log("classify_text", text.to_string());
        if let Some(err) = self.take_queued_error() {
            return Err(err);
        }
        Ok(self.response_for(text))
    }

    async fn classify_file(&self, file: &FilePayload) -> Result<ClassificationResult> {
        self.log("classify_file", file.filename.clone());
        if let Some(err) = self.take_queued_error() {
            return Err(err);
        }
        Ok(self.response_for(&file.filename))
    }

    async fn classify_batch(&self, files: &[FilePayload]) -> Result<Vec<BatchItem>> {
        let names: Vec<_> = files.iter().map(|f| f.filename.clone()).collect();
        self.log("classify_batch", names.join(","));
        if let Some(err) = self.take_queued_error() {
            return Err(err);
        }

        if let Some(items) = self.scripted_batch.lock().unwrap().take() {
            return Ok(items);
        }

        Ok(files
            .iter()
            .map(|f| BatchItem {
                filename: f.filename.clone(),
                outcome: BatchItemOutcome::Classified(self.response_for(&f.filename)),
            })
            .collect())
    }
}
