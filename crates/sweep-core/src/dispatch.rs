//! Deletion dispatcher.
//!
//! Walks the delete decisions and asks the provider for one asynchronous
//! deletion each. Dispatch never blocks on job completion; the only
//! round-trip is the synchronous accept/reject. A rejection is recorded
//! against its group and the remaining list keeps going.

use tracing::{debug, warn};

use sweep_model::{Decision, DeletionHandle};

use crate::{
    metrics::{DispatchResult, MetricsHandle},
    provider::CloudProvider,
};

/// Issue delete requests for every `Delete` decision.
///
/// Returns exactly one [`DeletionHandle`] per delete decision. Decisions with
/// outcome `Keep` are skipped, so callers may pass the full decision list.
pub async fn dispatch_deletes(
    provider: &dyn CloudProvider,
    decisions: &[Decision],
    metrics: &MetricsHandle,
) -> Vec<DeletionHandle> {
    let mut handles = Vec::new();

    for decision in decisions.iter().filter(|d| d.is_delete()) {
        match provider.request_delete(&decision.group).await {
            Ok(job) => {
                debug!(group = %decision.group, job = %job, "delete dispatched");
                metrics.record_dispatch(DispatchResult::Accepted);
                handles.push(DeletionHandle::accepted(decision.group.clone(), job));
            }
            Err(e) => {
                warn!(group = %decision.group, error = %e, "delete rejected");
                metrics.record_dispatch(DispatchResult::Rejected);
                metrics.record_provider_error("delete");
                handles.push(DeletionHandle::rejected(
                    decision.group.clone(),
                    e.to_string(),
                ));
            }
        }
    }

    handles
}

#[cfg(test)]
mod tests {
    use sweep_model::{ResourceGroup, RetentionPolicy, Tags};

    use crate::{classify::classify, metrics::noop_metrics, testing::FakeProvider};

    use super::dispatch_deletes;

    fn decisions_for(names: &[(&str, Tags)]) -> Vec<sweep_model::Decision> {
        let policy = RetentionPolicy::default();
        names
            .iter()
            .map(|(name, tags)| {
                classify(
                    &ResourceGroup::new(*name, "westeurope").with_tags(tags.clone()),
                    &policy,
                )
            })
            .collect()
    }

    #[tokio::test]
    async fn every_delete_decision_yields_one_handle() {
        let provider = FakeProvider::new()
            .with_group("rg-a", Tags::new())
            .with_group("rg-b", Tags::new());
        let decisions = decisions_for(&[("rg-a", Tags::new()), ("rg-b", Tags::new())]);

        let handles = dispatch_deletes(&provider, &decisions, &noop_metrics()).await;

        assert_eq!(handles.len(), 2);
        assert!(handles.iter().all(|h| h.job().is_some()));
        assert_eq!(provider.delete_call_count(), 2);
    }

    #[tokio::test]
    async fn keep_decisions_are_never_dispatched() {
        let provider = FakeProvider::new().with_group("rg-keep", Tags::from([("keepIt", "true")]));
        let decisions = decisions_for(&[("rg-keep", Tags::from([("keepIt", "true")]))]);

        let handles = dispatch_deletes(&provider, &decisions, &noop_metrics()).await;

        assert!(handles.is_empty());
        assert_eq!(provider.delete_call_count(), 0);
    }

    #[tokio::test]
    async fn rejection_is_recorded_and_does_not_abort_the_rest() {
        let provider = FakeProvider::new()
            .with_group("rg-a", Tags::new())
            .with_group("rg-b", Tags::new())
            .with_group("rg-c", Tags::new())
            .with_delete_rejection("rg-b", "delete already in flight");
        let decisions = decisions_for(
            &[
                ("rg-a", Tags::new()),
                ("rg-b", Tags::new()),
                ("rg-c", Tags::new()),
            ],
        );

        let handles = dispatch_deletes(&provider, &decisions, &noop_metrics()).await;

        assert_eq!(handles.len(), 3);
        assert_eq!(provider.delete_call_count(), 3);

        let rejected: Vec<_> = handles.iter().filter(|h| h.dispatch_error().is_some()).collect();
        assert_eq!(rejected.len(), 1);
        assert_eq!(rejected[0].group, "rg-b");
        assert!(rejected[0]
            .dispatch_error()
            .unwrap()
            .contains("delete already in flight"));
    }
}
