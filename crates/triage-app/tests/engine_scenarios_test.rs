//! End-to-end engine scenarios against the mock backend and in-memory store.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use triage_app::{BuildWarning, Engine, Selection, ViewSink};
use triage_client::MockClassifier;
use triage_core::{
    BatchItem, BatchItemOutcome, Category, ClassificationResult, Error, FilePayload,
    HistoryEntry, RenderRow, Stats, StatusKind, StatusLine,
};
use triage_store::MemoryStore;

// =============================================================================
// RECORDING SINK
// =============================================================================

#[derive(Default)]
struct Recorded {
    results: Vec<ClassificationResult>,
    batches: Vec<Vec<RenderRow>>,
    history_frames: Vec<(Vec<HistoryEntry>, Stats)>,
    statuses: Vec<StatusLine>,
    warnings: Vec<BuildWarning>,
}

#[derive(Clone, Default)]
struct RecordingSink(Rc<RefCell<Recorded>>);

impl ViewSink for RecordingSink {
    fn result_shown(&mut self, result: &ClassificationResult) {
        self.0.borrow_mut().results.push(result.clone());
    }

    fn batch_shown(&mut self, rows: &[RenderRow]) {
        self.0.borrow_mut().batches.push(rows.to_vec());
    }

    fn history_shown(&mut self, entries: &[HistoryEntry], stats: &Stats) {
        self.0
            .borrow_mut()
            .history_frames
            .push((entries.to_vec(), *stats));
    }

    fn status_shown(&mut self, status: &StatusLine) {
        self.0.borrow_mut().statuses.push(status.clone());
    }

    fn warning_shown(&mut self, warning: &BuildWarning) {
        self.0.borrow_mut().warnings.push(warning.clone());
    }
}

async fn engine_with(
    mock: MockClassifier,
) -> (Engine<RecordingSink>, Arc<MemoryStore>, RecordingSink) {
    let store = Arc::new(MemoryStore::new());
    let sink = RecordingSink::default();
    let engine = Engine::new(Arc::new(mock), store.clone(), sink.clone())
        .await
        .unwrap();
    (engine, store, sink)
}

fn payload(name: &str) -> FilePayload {
    FilePayload {
        filename: name.to_string(),
        content_type: "text/plain".to_string(),
        data: b"body".to_vec(),
    }
}

// =============================================================================
// SCENARIOS
// =============================================================================

#[tokio::test]
async fn test_scenario_text_classification() {
    let mock = MockClassifier::new().with_result(Category::Productive, "Will resend today.");
    let (mut engine, store, sink) = engine_with(mock).await;

    engine
        .classify(Selection::text("Please resend the invoice"))
        .await
        .unwrap();

    let recorded = sink.0.borrow();
    assert_eq!(recorded.results.len(), 1);
    assert_eq!(recorded.results[0].category, Category::Productive);
    assert_eq!(recorded.results[0].reply, "Will resend today.");

    // History gained one entry with the reply and the raw input as excerpt.
    assert_eq!(engine.history().len(), 1);
    assert_eq!(engine.history()[0].reply, "Will resend today.");
    assert_eq!(engine.history()[0].excerpt, "Please resend the invoice");

    let stats = engine.stats();
    assert_eq!(
        (stats.total, stats.productive, stats.unproductive),
        (1, 1, 0)
    );

    // The persisted copy matches what the engine holds.
    let persisted = store.snapshot().unwrap();
    assert_eq!(persisted.history.len(), 1);
    assert_eq!(persisted.stats, stats);
}

#[tokio::test]
async fn test_scenario_batch_with_one_failed_item() {
    let mock = MockClassifier::new().with_batch(vec![
        BatchItem {
            filename: "a.txt".to_string(),
            outcome: BatchItemOutcome::Classified(ClassificationResult {
                category: Category::Unproductive,
                reply: "No action needed.".to_string(),
                extracted_preview: None,
            }),
        },
        BatchItem {
            filename: "b.txt".to_string(),
            outcome: BatchItemOutcome::Failed("unsupported format".to_string()),
        },
    ]);
    let (mut engine, _, sink) = engine_with(mock).await;

    engine
        .classify(Selection::files(vec![payload("a.txt"), payload("b.txt")]))
        .await
        .unwrap();

    let recorded = sink.0.borrow();
    assert_eq!(recorded.batches.len(), 1);
    assert_eq!(recorded.batches[0].len(), 2);

    let stats = engine.stats();
    assert_eq!(
        (stats.total, stats.productive, stats.unproductive),
        (1, 0, 1)
    );
    assert_eq!(engine.history().len(), 1);
    assert_eq!(engine.history()[0].reply, "No action needed.");
}

#[tokio::test]
async fn test_scenario_network_failure_leaves_state_untouched() {
    let mock = MockClassifier::new().with_error(Error::Network("connection refused".to_string()));
    let (mut engine, store, sink) = engine_with(mock).await;

    let err = engine
        .classify(Selection::text("hello"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Network(_)));

    // Controller settled and re-enabled; nothing recorded or persisted.
    assert!(!engine.submission_state().is_in_flight());
    assert!(engine.submission_state().is_settled());
    assert!(engine.history().is_empty());
    assert_eq!(engine.stats(), Stats::default());
    assert!(store.snapshot().is_none());

    // A generic failure message was surfaced, not the raw transport error.
    let recorded = sink.0.borrow();
    let last = recorded.statuses.last().unwrap();
    assert_eq!(last.kind, StatusKind::Error);
    assert!(!last.message.contains("connection refused"));
}

#[tokio::test]
async fn test_empty_input_surfaces_validation_error() {
    let (mut engine, _, sink) = engine_with(MockClassifier::new()).await;

    let err = engine.classify(Selection::text("   ")).await.unwrap_err();
    assert!(matches!(err, Error::EmptyInput));

    let recorded = sink.0.borrow();
    assert_eq!(recorded.statuses.last().unwrap().kind, StatusKind::Error);
    assert!(recorded.results.is_empty());
}

#[tokio::test]
async fn test_oversized_selection_truncates_and_warns() {
    let (mut engine, _, sink) = engine_with(MockClassifier::new()).await;

    let files: Vec<_> = (0..8).map(|i| payload(&format!("f{}.txt", i))).collect();
    engine.classify(Selection::files(files)).await.unwrap();

    let recorded = sink.0.borrow();
    assert_eq!(
        recorded.warnings,
        vec![BuildWarning::FilesTruncated { selected: 8 }]
    );
    // Only the capped six made it into the batch.
    assert_eq!(recorded.batches[0].len(), 6);
    assert_eq!(engine.stats().total, 6);
}

#[tokio::test]
async fn test_restore_rerenders_stored_entry() {
    let mock = MockClassifier::new().with_result(Category::Productive, "Will resend today.");
    let (mut engine, _, sink) = engine_with(mock).await;

    engine
        .classify(Selection::text("Please resend the invoice"))
        .await
        .unwrap();
    let id = engine.history()[0].id;

    assert!(engine.restore(id));
    assert!(!engine.restore(id + 999));

    let recorded = sink.0.borrow();
    assert_eq!(recorded.results.len(), 2);
    assert_eq!(recorded.results[1].reply, "Will resend today.");
    assert_eq!(
        recorded.results[1].extracted_preview.as_deref(),
        Some("Please resend the invoice")
    );
}

#[tokio::test]
async fn test_reset_clears_views_and_store() {
    let mock = MockClassifier::new().with_result(Category::Productive, "r");
    let (mut engine, store, sink) = engine_with(mock).await;

    engine.classify(Selection::text("hello")).await.unwrap();
    engine.reset_history().await.unwrap();

    assert!(engine.history().is_empty());
    assert_eq!(engine.stats(), Stats::default());
    assert!(store.snapshot().is_none());

    let recorded = sink.0.borrow();
    let (entries, stats) = recorded.history_frames.last().unwrap();
    assert!(entries.is_empty());
    assert_eq!(*stats, Stats::default());
}

#[tokio::test]
async fn test_initial_open_renders_persisted_state() {
    // Seed a store through one engine, then open a fresh engine over it.
    let store = Arc::new(MemoryStore::new());
    {
        let mock = MockClassifier::new().with_result(Category::Productive, "kept");
        let mut engine = Engine::new(Arc::new(mock), store.clone(), RecordingSink::default())
            .await
            .unwrap();
        engine.classify(Selection::text("hello")).await.unwrap();
    }

    let sink = RecordingSink::default();
    let engine = Engine::new(
        Arc::new(MockClassifier::new()),
        store,
        sink.clone(),
    )
    .await
    .unwrap();

    assert_eq!(engine.stats().total, 1);
    let recorded = sink.0.borrow();
    let (entries, stats) = recorded.history_frames.first().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(stats.total, 1);
}
