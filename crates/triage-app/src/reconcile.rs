//! Batch response reconciliation.
//!
//! Walks a batch response strictly in order, turning every item into a
//! render row and feeding each classified item into the aggregator exactly
//! as if it were a standalone single classification. Failed items render
//! their error and touch nothing.

use tracing::trace;

use triage_core::{BatchItem, BatchItemOutcome, RenderRow, Result, RowStatus};
use triage_store::Aggregator;

/// Reconcile a batch response into render rows and recorded history.
///
/// Call exactly once per response: reconciling the same items again records
/// them again (no deduplication happens here).
pub async fn reconcile(
    items: &[BatchItem],
    aggregator: &mut Aggregator,
) -> Result<Vec<RenderRow>> {
    let mut rows = Vec::with_capacity(items.len());

    for item in items {
        match &item.outcome {
            BatchItemOutcome::Classified(result) => {
                trace!(
                    component = "reconcile",
                    filename = %item.filename,
                    category = %result.category,
                    "Recording batch item"
                );
                aggregator.record_success(result, "").await?;
                rows.push(RenderRow {
                    filename: item.filename.clone(),
                    status: RowStatus::Classified {
                        category: result.category,
                        reply: result.reply.clone(),
                    },
                });
            }
            BatchItemOutcome::Failed(message) => {
                trace!(
                    component = "reconcile",
                    filename = %item.filename,
                    error = %message,
                    "Skipping failed batch item"
                );
                rows.push(RenderRow {
                    filename: item.filename.clone(),
                    status: RowStatus::Failed {
                        message: message.clone(),
                    },
                });
            }
        }
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use triage_core::{Category, ClassificationResult};
    use triage_store::MemoryStore;

    fn classified(filename: &str, category: Category, reply: &str) -> BatchItem {
        BatchItem {
            filename: filename.to_string(),
            outcome: BatchItemOutcome::Classified(ClassificationResult {
                category,
                reply: reply.to_string(),
                extracted_preview: Some(format!("{} body", filename)),
            }),
        }
    }

    fn failed(filename: &str, message: &str) -> BatchItem {
        BatchItem {
            filename: filename.to_string(),
            outcome: BatchItemOutcome::Failed(message.to_string()),
        }
    }

    async fn aggregator() -> Aggregator {
        Aggregator::open(Arc::new(MemoryStore::new())).await.unwrap()
    }

    #[tokio::test]
    async fn test_middle_error_is_isolated() {
        let mut agg = aggregator().await;
        let items = vec![
            classified("a.txt", Category::Productive, "ok a"),
            failed("b.txt", "unsupported format"),
            classified("c.txt", Category::Unproductive, "ok c"),
        ];

        let rows = reconcile(&items, &mut agg).await.unwrap();

        // Every item renders, in response order.
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].filename, "a.txt");
        assert_eq!(rows[1].filename, "b.txt");
        assert_eq!(rows[2].filename, "c.txt");
        assert!(matches!(
            rows[1].status,
            RowStatus::Failed { ref message } if message == "unsupported format"
        ));

        // Only the two classified items reach history/stats.
        assert_eq!(agg.history().len(), 2);
        assert_eq!(agg.stats().total, 2);
        assert_eq!(agg.stats().productive, 1);
        assert_eq!(agg.stats().unproductive, 1);
    }

    #[tokio::test]
    async fn test_history_order_matches_response_order_newest_first() {
        let mut agg = aggregator().await;
        let items = vec![
            classified("first.txt", Category::Productive, "r1"),
            classified("second.txt", Category::Productive, "r2"),
        ];

        reconcile(&items, &mut agg).await.unwrap();

        // The later response item is the newer history entry.
        assert_eq!(agg.history()[0].reply, "r2");
        assert_eq!(agg.history()[1].reply, "r1");
    }

    #[tokio::test]
    async fn test_item_preview_becomes_excerpt() {
        let mut agg = aggregator().await;
        reconcile(
            &[classified("a.txt", Category::Productive, "r")],
            &mut agg,
        )
        .await
        .unwrap();

        assert_eq!(agg.history()[0].excerpt, "a.txt body");
    }

    #[tokio::test]
    async fn test_all_failed_records_nothing() {
        let mut agg = aggregator().await;
        let rows = reconcile(
            &[failed("a.txt", "e1"), failed("b.txt", "e2")],
            &mut agg,
        )
        .await
        .unwrap();

        assert_eq!(rows.len(), 2);
        assert!(agg.history().is_empty());
        assert_eq!(agg.stats().total, 0);
    }

    #[tokio::test]
    async fn test_reconciling_twice_double_records() {
        // Accepted behavior: no deduplication, callers reconcile once.
        let mut agg = aggregator().await;
        let items = vec![classified("a.txt", Category::Productive, "r")];

        reconcile(&items, &mut agg).await.unwrap();
        reconcile(&items, &mut agg).await.unwrap();

        assert_eq!(agg.history().len(), 2);
        assert_eq!(agg.stats().total, 2);
    }
}
