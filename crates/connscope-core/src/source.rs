//! Remote operations behind the connections page

use std::future::Future;

use futures::future::join_all;
use tracing::{debug, warn};

use connscope_k8s::KubeClient;
use connscope_types::{ConnectionRef, DeleteFailure, FailureKind, FetchFailure, ProviderConnection};

use crate::delete::{DeleteBatch, DeleteReport};

/// The two remote operations the page consumes
pub trait ConnectionSource: Send + Sync {
    fn list(&self) -> impl Future<Output = Result<Vec<ProviderConnection>, FetchFailure>> + Send;

    fn delete(
        &self,
        target: &ConnectionRef,
    ) -> impl Future<Output = Result<(), DeleteFailure>> + Send;
}

/// Run a confirmed delete batch, then refresh exactly once.
///
/// The refresh is issued only after every delete has completed, and is
/// attempted even when some deletes failed.
pub async fn delete_then_refresh<S: ConnectionSource>(
    source: &S,
    batch: DeleteBatch,
) -> DeleteReport {
    let results = join_all(batch.targets.iter().map(|target| source.delete(target))).await;

    let mut deleted = Vec::new();
    let mut failures = Vec::new();
    for (target, result) in batch.targets.into_iter().zip(results) {
        match result {
            Ok(()) => deleted.push(target),
            Err(failure) => {
                warn!(error = %failure, "delete failed");
                failures.push(failure);
            }
        }
    }

    debug!(
        deleted = deleted.len(),
        failed = failures.len(),
        "delete batch finished, refreshing"
    );
    let refresh = source.list().await;

    DeleteReport {
        deleted,
        failures,
        refresh,
    }
}

/// Provider connections stored as Secrets in a Kubernetes cluster
#[derive(Clone)]
pub struct KubeSource {
    client: kube::Client,
    namespace: Option<String>,
    selector: String,
}

impl KubeSource {
    pub fn new(client: kube::Client, namespace: Option<String>, selector: impl Into<String>) -> Self {
        Self {
            client,
            namespace,
            selector: selector.into(),
        }
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }
}

impl ConnectionSource for KubeSource {
    async fn list(&self) -> Result<Vec<ProviderConnection>, FetchFailure> {
        KubeClient::list_provider_connections(
            &self.client,
            self.namespace.as_deref(),
            &self.selector,
        )
        .await
        .map_err(|e| FetchFailure::new(classify(&e), format!("{:#}", e)))
    }

    async fn delete(&self, target: &ConnectionRef) -> Result<(), DeleteFailure> {
        KubeClient::delete_provider_connection(&self.client, target)
            .await
            .map_err(|e| DeleteFailure::new(target.clone(), classify(&e), format!("{:#}", e)))
    }
}

/// Classify a client error by the API status it carries, if any
fn classify(err: &anyhow::Error) -> FailureKind {
    match err.downcast_ref::<kube::Error>() {
        Some(kube::Error::Api(response)) => FailureKind::from_status(response.code),
        _ => FailureKind::Transport,
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::collections::HashSet;

    #[derive(Clone, Debug, PartialEq, Eq)]
    pub enum Call {
        List,
        Delete(String, String),
    }

    /// In-memory source recording every call it receives
    #[derive(Default)]
    pub struct RecordingSource {
        pub records: Mutex<Vec<ProviderConnection>>,
        pub calls: Mutex<Vec<Call>>,
        pub fail_deletes: HashSet<String>,
    }

    impl RecordingSource {
        pub fn with_records(records: Vec<ProviderConnection>) -> Self {
            Self {
                records: Mutex::new(records),
                ..Default::default()
            }
        }

        pub fn calls(&self) -> Vec<Call> {
            self.calls.lock().clone()
        }
    }

    impl ConnectionSource for RecordingSource {
        async fn list(&self) -> Result<Vec<ProviderConnection>, FetchFailure> {
            self.calls.lock().push(Call::List);
            Ok(self.records.lock().clone())
        }

        async fn delete(&self, target: &ConnectionRef) -> Result<(), DeleteFailure> {
            self.calls
                .lock()
                .push(Call::Delete(target.name.clone(), target.namespace.clone()));
            if self.fail_deletes.contains(&target.name) {
                return Err(DeleteFailure::new(
                    target.clone(),
                    FailureKind::Forbidden,
                    "secrets is forbidden",
                ));
            }
            self.records
                .lock()
                .retain(|c| !(c.name == target.name && c.namespace == target.namespace));
            Ok(())
        }
    }

    fn conn(uid: &str, name: &str, namespace: &str) -> ProviderConnection {
        ProviderConnection::new(uid.into(), name.into(), namespace.into())
    }

    #[tokio::test]
    async fn test_delete_then_single_refresh() {
        let source = RecordingSource::with_records(vec![
            conn("u1", "aws-east", "ns1"),
            conn("u2", "aws-east", "ns2"),
        ]);
        let batch = DeleteBatch {
            targets: vec![ConnectionRef::new("aws-east", "ns1")],
        };

        let report = delete_then_refresh(&source, batch).await;

        assert_eq!(
            source.calls(),
            vec![
                Call::Delete("aws-east".into(), "ns1".into()),
                Call::List
            ]
        );
        assert_eq!(report.deleted, vec![ConnectionRef::new("aws-east", "ns1")]);
        let remaining = report.refresh.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].uid, "u2");
    }

    #[tokio::test]
    async fn test_failed_delete_still_refreshes() {
        let mut source = RecordingSource::with_records(vec![conn("u1", "locked", "ns1")]);
        source.fail_deletes.insert("locked".to_string());
        let batch = DeleteBatch {
            targets: vec![ConnectionRef::new("locked", "ns1")],
        };

        let report = delete_then_refresh(&source, batch).await;

        assert!(report.deleted.is_empty());
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].kind, FailureKind::Forbidden);
        assert_eq!(source.calls().last(), Some(&Call::List));
        assert_eq!(report.refresh.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_bulk_batch_refreshes_after_all_deletes() {
        let source = RecordingSource::with_records(vec![
            conn("u1", "a", "ns"),
            conn("u2", "b", "ns"),
            conn("u3", "c", "ns"),
        ]);
        let batch = DeleteBatch {
            targets: vec![ConnectionRef::new("a", "ns"), ConnectionRef::new("c", "ns")],
        };

        let report = delete_then_refresh(&source, batch).await;

        let calls = source.calls();
        assert_eq!(calls.len(), 3);
        assert_eq!(calls.iter().filter(|c| **c == Call::List).count(), 1);
        assert_eq!(calls.last(), Some(&Call::List));
        assert_eq!(report.deleted.len(), 2);
        assert_eq!(report.refresh.unwrap().len(), 1);
    }
}
