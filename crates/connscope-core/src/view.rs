use tracing::{debug, warn};

use connscope_types::{FetchFailure, ProviderConnection};

/// Presentation state of the connections list, driven by fetch outcomes
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum ViewState {
    #[default]
    Loading,
    Error(FetchFailure),
    Empty,
    Populated(Vec<ProviderConnection>),
}

impl ViewState {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::Error(_) => "error",
            Self::Empty => "empty",
            Self::Populated(_) => "populated",
        }
    }
}

/// The connections list view: current state plus background refresh bookkeeping
#[derive(Debug, Default)]
pub struct ListView {
    state: ViewState,
    /// Failure of the latest background refresh that was not shown full-page
    last_refresh_error: Option<FetchFailure>,
    /// Number of fetch results applied so far
    fetches: u64,
}

impl ListView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Records currently rendered; empty unless populated
    pub fn records(&self) -> &[ProviderConnection] {
        match &self.state {
            ViewState::Populated(records) => records,
            _ => &[],
        }
    }

    pub fn last_refresh_error(&self) -> Option<&FetchFailure> {
        self.last_refresh_error.as_ref()
    }

    pub fn fetches(&self) -> u64 {
        self.fetches
    }

    /// Apply the outcome of the most recent fetch
    pub fn apply_fetch(&mut self, result: Result<Vec<ProviderConnection>, FetchFailure>) {
        self.fetches += 1;

        match result {
            Ok(records) => {
                debug!(count = records.len(), "provider connections refreshed");
                self.last_refresh_error = None;
                self.state = if records.is_empty() {
                    ViewState::Empty
                } else {
                    ViewState::Populated(records)
                };
            }
            Err(failure) => match self.state {
                ViewState::Loading | ViewState::Error(_) => {
                    warn!(error = %failure, "failed to load provider connections");
                    self.state = ViewState::Error(failure);
                }
                // Keep what is on screen; the next poll may succeed
                ViewState::Empty | ViewState::Populated(_) => {
                    warn!(error = %failure, "background refresh failed");
                    self.last_refresh_error = Some(failure);
                }
            },
        }
    }

    /// Return to the initial state, e.g. after switching clusters
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use connscope_types::FailureKind;

    fn record(uid: &str) -> ProviderConnection {
        ProviderConnection::new(uid.into(), format!("conn-{}", uid), "ns".into())
    }

    fn failure() -> FetchFailure {
        FetchFailure::new(FailureKind::Transport, "connection refused")
    }

    #[test]
    fn test_initial_state_is_loading() {
        let view = ListView::new();
        assert_eq!(view.state(), &ViewState::Loading);
        assert!(view.records().is_empty());
    }

    #[test]
    fn test_empty_fetch_shows_empty_state() {
        let mut view = ListView::new();
        view.apply_fetch(Ok(vec![]));
        assert_eq!(view.state(), &ViewState::Empty);
    }

    #[test]
    fn test_records_populate() {
        let mut view = ListView::new();
        view.apply_fetch(Ok(vec![record("1"), record("2")]));
        assert_eq!(view.state().label(), "populated");
        assert_eq!(view.records().len(), 2);
    }

    #[test]
    fn test_first_load_failure_is_full_page_error() {
        let mut view = ListView::new();
        view.apply_fetch(Err(failure()));
        assert_eq!(view.state(), &ViewState::Error(failure()));
        assert!(view.last_refresh_error().is_none());

        // stays in error until a successful fetch
        view.apply_fetch(Err(FetchFailure::new(FailureKind::Forbidden, "denied")));
        assert!(matches!(
            view.state(),
            ViewState::Error(f) if f.kind == FailureKind::Forbidden
        ));

        view.apply_fetch(Ok(vec![record("1")]));
        assert_eq!(view.records().len(), 1);
    }

    #[test]
    fn test_background_failure_keeps_data() {
        let mut view = ListView::new();
        view.apply_fetch(Ok(vec![record("1")]));
        view.apply_fetch(Err(failure()));

        assert_eq!(view.records().len(), 1);
        assert_eq!(view.last_refresh_error(), Some(&failure()));

        view.apply_fetch(Ok(vec![record("1"), record("2")]));
        assert!(view.last_refresh_error().is_none());
        assert_eq!(view.fetches(), 3);
    }

    #[test]
    fn test_background_failure_keeps_empty() {
        let mut view = ListView::new();
        view.apply_fetch(Ok(vec![]));
        view.apply_fetch(Err(failure()));
        assert_eq!(view.state(), &ViewState::Empty);
    }

    #[test]
    fn test_reset_returns_to_loading() {
        let mut view = ListView::new();
        view.apply_fetch(Ok(vec![record("1")]));
        view.reset();
        assert_eq!(view.state(), &ViewState::Loading);
        assert_eq!(view.fetches(), 0);
    }
}
