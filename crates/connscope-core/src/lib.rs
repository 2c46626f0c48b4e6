//! Provider connection management for connscope
//!
//! This crate provides the provider registry, label resolution, the list
//! view state machine, table sorting and search, and the confirm-then-delete
//! flow. Remote calls go through the [`ConnectionSource`] trait.

mod delete;
mod labels;
mod registry;
mod source;
mod table;
mod view;

pub use delete::{ConfirmPrompt, ConfirmationState, DeleteBatch, DeleteController, DeleteReport};
pub use labels::{PROVIDER_LABEL_PREFIX, compare_by_provider, provider_id, provider_name};
pub use registry::{ProviderRegistry, UNKNOWN_PROVIDER_KEY};
pub use source::{ConnectionSource, KubeSource, delete_then_refresh};
pub use table::{Column, ConnectionTable, Row, SortDirection, SortSpec};
pub use view::{ListView, ViewState};

pub use connscope_k8s::DEFAULT_CONNECTION_SELECTOR;

// Re-export types used in our public API
pub use connscope_types::{
    ConnectionRef, DeleteFailure, FailureKind, FetchFailure, ProviderConnection,
    ProviderDescriptor,
};

/// Console path of the connection creation flow
pub const ADD_CONNECTION_PATH: &str =
    "/multicloud/cluster-management/provider-connections/add-connection";

/// Navigation the page asks its host to perform
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavigationRequest {
    AddConnection,
}

impl NavigationRequest {
    pub fn path(&self) -> &'static str {
        match self {
            Self::AddConnection => ADD_CONNECTION_PATH,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::tests::{Call, RecordingSource};

    #[tokio::test]
    async fn test_confirmed_delete_flow() {
        let records = vec![
            ProviderConnection::new("u1".into(), "aws-east".into(), "ns1".into())
                .with_labels(["cluster.open-cluster-management.io/provider=aws"]),
            ProviderConnection::new("u2".into(), "gcp".into(), "ns1".into()),
        ];
        let source = RecordingSource::with_records(records.clone());
        let mut view = ListView::new();
        view.apply_fetch(Ok(records));

        let mut controller = DeleteController::new();
        let target = view.records()[0].clone();
        controller.request(&target);
        let batch = controller.confirm().expect("dialog was open");
        assert!(!controller.is_open());

        let report = delete_then_refresh(&source, batch).await;
        view.apply_fetch(report.refresh);

        assert_eq!(
            source.calls(),
            vec![
                Call::Delete("aws-east".into(), "ns1".into()),
                Call::List
            ]
        );
        assert_eq!(view.records().len(), 1);
        assert_eq!(view.records()[0].uid, "u2");
    }

    #[test]
    fn test_cancelled_delete_issues_nothing() {
        let records = vec![ProviderConnection::new(
            "u1".into(),
            "aws-east".into(),
            "ns1".into(),
        )];
        let source = RecordingSource::with_records(records.clone());
        let mut view = ListView::new();
        view.apply_fetch(Ok(records));

        let mut controller = DeleteController::new();
        controller.request(&view.records()[0].clone());
        controller.cancel();

        assert_eq!(controller.confirm(), None);
        assert!(source.calls().is_empty());
        assert_eq!(view.records().len(), 1);
    }

    #[test]
    fn test_navigation_path() {
        assert!(NavigationRequest::AddConnection.path().ends_with("/add-connection"));
    }
}
