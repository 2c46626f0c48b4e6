use connscope_types::{ConnectionRef, DeleteFailure, FetchFailure, ProviderConnection};

/// Content of an open confirmation dialog
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfirmPrompt {
    pub title: String,
    pub message: String,
    /// Connections the confirm action deletes
    pub targets: Vec<ConnectionRef>,
}

/// The single confirmation dialog of the page
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum ConfirmationState {
    #[default]
    Closed,
    Open(ConfirmPrompt),
}

/// Deletes approved by the user, ready to be executed
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeleteBatch {
    pub targets: Vec<ConnectionRef>,
}

/// Outcome of a delete batch and the refresh that follows it
#[derive(Debug)]
pub struct DeleteReport {
    pub deleted: Vec<ConnectionRef>,
    pub failures: Vec<DeleteFailure>,
    pub refresh: Result<Vec<ProviderConnection>, FetchFailure>,
}

impl DeleteReport {
    /// One-line summary for the status bar
    pub fn summary(&self) -> String {
        match (self.deleted.as_slice(), self.failures.as_slice()) {
            ([only], []) => format!("Deleted {}", only.name),
            (deleted, []) => format!("Deleted {} provider connections", deleted.len()),
            ([], [only]) => only.to_string(),
            (deleted, failures) => format!(
                "Deleted {} provider connections, {} failed: {}",
                deleted.len(),
                failures.len(),
                failures
                    .iter()
                    .map(|f| f.target.to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        }
    }
}

/// Confirmation dialog state for row and bulk deletes.
///
/// A new request while the dialog is open replaces its content. Confirming
/// consumes the prompt, so a dialog can only be confirmed once.
#[derive(Debug, Default)]
pub struct DeleteController {
    confirmation: ConfirmationState,
}

impl DeleteController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn confirmation(&self) -> &ConfirmationState {
        &self.confirmation
    }

    pub fn is_open(&self) -> bool {
        matches!(self.confirmation, ConfirmationState::Open(_))
    }

    /// Ask to delete a single connection
    pub fn request(&mut self, connection: &ProviderConnection) {
        self.confirmation = ConfirmationState::Open(ConfirmPrompt {
            title: "Delete provider connection".to_string(),
            message: delete_message(&connection.name),
            targets: vec![connection.target()],
        });
    }

    /// Ask to delete several connections at once; no-op for an empty selection
    pub fn request_bulk(&mut self, connections: &[&ProviderConnection]) {
        match connections {
            [] => {}
            [only] => self.request(only),
            many => {
                let names = many
                    .iter()
                    .map(|c| c.name.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                self.confirmation = ConfirmationState::Open(ConfirmPrompt {
                    title: "Delete provider connections".to_string(),
                    message: format!(
                        "You are about to delete {} provider connections: {}. The provider connections will no longer be available for creating new clusters, but clusters that were previously created using them are not affected. This action is irreversible.",
                        many.len(),
                        names
                    ),
                    targets: many.iter().map(|c| c.target()).collect(),
                });
            }
        }
    }

    /// User confirmed: close the dialog and hand back the deletes to run
    pub fn confirm(&mut self) -> Option<DeleteBatch> {
        match std::mem::take(&mut self.confirmation) {
            ConfirmationState::Open(prompt) => Some(DeleteBatch {
                targets: prompt.targets,
            }),
            ConfirmationState::Closed => None,
        }
    }

    /// User cancelled: close the dialog without side effects
    pub fn cancel(&mut self) {
        self.confirmation = ConfirmationState::Closed;
    }
}

fn delete_message(name: &str) -> String {
    format!(
        "You are about to delete {}. The provider connection will no longer be available for creating new clusters, but clusters that were previously created using the connection are not affected. This action is irreversible.",
        name
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use connscope_types::FailureKind;

    fn conn(uid: &str, name: &str, namespace: &str) -> ProviderConnection {
        ProviderConnection::new(uid.into(), name.into(), namespace.into())
    }

    #[test]
    fn test_starts_closed() {
        let controller = DeleteController::new();
        assert_eq!(controller.confirmation(), &ConfirmationState::Closed);
    }

    #[test]
    fn test_request_opens_prompt_naming_target() {
        let mut controller = DeleteController::new();
        controller.request(&conn("u1", "aws-east", "ns1"));

        let ConfirmationState::Open(prompt) = controller.confirmation() else {
            panic!("dialog should be open");
        };
        assert_eq!(prompt.title, "Delete provider connection");
        assert!(prompt.message.contains("aws-east"));
        assert!(prompt.message.contains("irreversible"));
        assert!(prompt.message.contains("not affected"));
        assert_eq!(prompt.targets, vec![ConnectionRef::new("aws-east", "ns1")]);
    }

    #[test]
    fn test_confirm_closes_and_returns_targets_once() {
        let mut controller = DeleteController::new();
        controller.request(&conn("u1", "aws-east", "ns1"));

        let batch = controller.confirm();
        assert_eq!(
            batch,
            Some(DeleteBatch {
                targets: vec![ConnectionRef::new("aws-east", "ns1")]
            })
        );
        assert!(!controller.is_open());
        assert_eq!(controller.confirm(), None);
    }

    #[test]
    fn test_cancel_closes_without_batch() {
        let mut controller = DeleteController::new();
        controller.request(&conn("u1", "aws-east", "ns1"));
        controller.cancel();
        assert!(!controller.is_open());
        assert_eq!(controller.confirm(), None);
    }

    #[test]
    fn test_new_request_replaces_open_prompt() {
        let mut controller = DeleteController::new();
        controller.request(&conn("u1", "aws-east", "ns1"));
        controller.request(&conn("u2", "gcp-prod", "ns2"));

        let batch = controller.confirm().map(|b| b.targets);
        assert_eq!(batch, Some(vec![ConnectionRef::new("gcp-prod", "ns2")]));
    }

    #[test]
    fn test_bulk_request() {
        let a = conn("u1", "aws-east", "ns1");
        let b = conn("u2", "aws-east", "ns2");
        let mut controller = DeleteController::new();

        controller.request_bulk(&[]);
        assert!(!controller.is_open());

        controller.request_bulk(&[&a, &b]);
        let ConfirmationState::Open(prompt) = controller.confirmation() else {
            panic!("dialog should be open");
        };
        assert_eq!(prompt.title, "Delete provider connections");
        assert!(prompt.message.contains("2 provider connections"));
        assert_eq!(prompt.targets.len(), 2);

        controller.request_bulk(&[&a]);
        let ConfirmationState::Open(prompt) = controller.confirmation() else {
            panic!("dialog should be open");
        };
        assert_eq!(prompt.title, "Delete provider connection");
    }

    #[test]
    fn test_report_summary() {
        let report = DeleteReport {
            deleted: vec![ConnectionRef::new("aws-east", "ns1")],
            failures: vec![],
            refresh: Ok(vec![]),
        };
        assert_eq!(report.summary(), "Deleted aws-east");

        let report = DeleteReport {
            deleted: vec![],
            failures: vec![DeleteFailure::new(
                ConnectionRef::new("aws-east", "ns1"),
                FailureKind::Forbidden,
                "denied",
            )],
            refresh: Ok(vec![]),
        };
        assert!(report.summary().contains("ns1/aws-east"));
    }
}
