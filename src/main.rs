use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::KeyEvent;
use tokio::sync::mpsc;
use tracing::debug;

use connscope_core::{
    ConnectionSource, DeleteBatch, DeleteReport, FetchFailure, KubeSource, NavigationRequest,
    ProviderConnection, delete_then_refresh,
};
use connscope_k8s::KubeClient;
use connscope_tui::{
    Action, AppState, ConnectionsScreen, ContextSelectScreen, Event, EventHandler, HelpOverlay,
    KeyBindings, KeyContext, Screen, Settings, Tui,
};

/// connscope - A terminal console for cluster provider connections
#[derive(Parser, Debug)]
#[command(name = "connscope")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Kubernetes context name (optional, will prompt if not provided)
    #[arg(value_name = "CONTEXT")]
    context: Option<String>,

    /// Only list connections in this namespace
    #[arg(short, long)]
    namespace: Option<String>,

    /// Seconds between background refreshes
    #[arg(long, value_name = "SECONDS")]
    poll_interval: Option<u64>,

    /// Label selector identifying provider connection Secrets
    #[arg(long)]
    selector: Option<String>,

    /// Config file (defaults to ~/.connscope/config.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Write logs to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

impl Args {
    /// Command line flags take precedence over the config file
    fn apply(&self, settings: &mut Settings) {
        if let Some(namespace) = &self.namespace {
            settings.namespace = Some(namespace.clone());
        }
        if let Some(secs) = self.poll_interval {
            settings.poll_interval_secs = secs;
        }
        if let Some(selector) = &self.selector {
            settings.label_selector = selector.clone();
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    init_tracing(args.log_file.as_deref())?;

    // Run the application
    let result = run_app(args).await;

    // Handle any errors
    if let Err(e) = &result {
        eprintln!("Error: {:#}", e);
    }

    result
}

fn init_tracing(log_file: Option<&Path>) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::WARN.into());

    match log_file {
        Some(path) => {
            let file = File::create(path)
                .context(format!("Failed to create log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }

    Ok(())
}

/// Internal actions for async operations
enum InternalAction {
    Connect(String),
    Connected(String, kube::Client),
    Fetch,
    FetchCompleted(u64, Result<Vec<ProviderConnection>, FetchFailure>),
    RunDeletes(DeleteBatch),
    DeletesCompleted(u64, DeleteReport),
    Error(String),
}

async fn run_app(args: Args) -> Result<()> {
    let mut settings = Settings::load(args.config.as_deref())?;
    args.apply(&mut settings);

    // Create action channels
    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();
    let (internal_tx, mut internal_rx) = mpsc::unbounded_channel::<InternalAction>();

    // Initialize state
    let mut state = AppState::new(action_tx.clone(), settings.registry());
    state.namespace = settings.namespace.clone();
    state.console_url = settings.console_url.clone();

    // Load kubeconfig and contexts
    let kube_client = Arc::new(KubeClient::new()?);
    state.contexts = kube_client.get_contexts();
    if let Some(idx) = state.contexts.iter().position(|c| c.is_current) {
        state.ui_state.list_state.select(Some(idx));
    }

    // Source for the open connections view
    let mut source: Option<KubeSource> = None;

    // Handle CLI arguments for direct navigation
    if let Some(context_name) = &args.context {
        if !state.contexts.iter().any(|c| &c.name == context_name) {
            anyhow::bail!("Context '{}' not found in kubeconfig", context_name);
        }

        let client = kube_client.client_for_context(context_name).await?;
        state.selected_context = Some(context_name.clone());
        source = Some(open_connections(&mut state, &settings, client, &internal_tx));
    }

    // Initialize TUI
    let mut tui = Tui::new()?;

    // Terminal input, UI tick and list poll
    let mut events = EventHandler::new(Duration::from_millis(250), settings.poll_interval());

    let keybindings = KeyBindings::new();

    // Initial render
    render(&mut tui, &mut state)?;

    // Main event loop
    loop {
        tokio::select! {
            // Handle terminal events
            Some(event) = events.next() => {
                match event {
                    Event::Key(key) => {
                        if let Some(action) = key_action(&state, &keybindings, &key) {
                            let _ = action_tx.send(action);
                        }
                    }
                    Event::Poll => {
                        // Skip the tick if the previous poll has not answered yet
                        if state.current_screen == Screen::Connections && !state.fetch_in_flight {
                            let _ = internal_tx.send(InternalAction::Fetch);
                        }
                    }
                    Event::Tick => {}
                    Event::Resize(_, _) => {
                        let _ = action_tx.send(Action::Render);
                    }
                    Event::Error(e) => {
                        state.show_error(e);
                    }
                }
            }

            // Handle user actions
            Some(action) = action_rx.recv() => {
                handle_action(&mut state, &internal_tx, action);
            }

            // Handle internal async actions
            Some(internal) = internal_rx.recv() => {
                match internal {
                    InternalAction::Connect(context_name) => {
                        let kube_client = kube_client.clone();
                        let tx = internal_tx.clone();
                        tokio::spawn(async move {
                            let msg = match kube_client.client_for_context(&context_name).await {
                                Ok(client) => InternalAction::Connected(context_name, client),
                                Err(e) => InternalAction::Error(
                                    format!("Failed to connect to cluster: {:#}", e)
                                ),
                            };
                            let _ = tx.send(msg);
                        });
                    }

                    InternalAction::Connected(context_name, client) => {
                        state.selected_context = Some(context_name);
                        source = Some(open_connections(&mut state, &settings, client, &internal_tx));
                    }

                    InternalAction::Fetch => {
                        if let Some(source) = &source {
                            spawn_fetch(&mut state, source, &internal_tx);
                        }
                    }

                    InternalAction::FetchCompleted(generation, result) => {
                        if !state.apply_fetch(generation, result) {
                            debug!(generation, "dropping fetch result for closed view");
                        }
                    }

                    InternalAction::RunDeletes(batch) => {
                        if let Some(source) = &source {
                            spawn_deletes(&state, source, batch, &internal_tx);
                        }
                    }

                    InternalAction::DeletesCompleted(generation, report) => {
                        if !state.apply_delete_report(generation, report) {
                            debug!(generation, "dropping delete report for closed view");
                        }
                    }

                    InternalAction::Error(msg) => {
                        state.show_error(msg);
                    }
                }
            }
        }

        if state.should_quit {
            break;
        }

        render(&mut tui, &mut state)?;
    }

    // Cleanup
    events.shutdown();
    tui.restore()?;

    Ok(())
}

/// Open a fresh connections view backed by the given client and start loading
fn open_connections(
    state: &mut AppState,
    settings: &Settings,
    client: kube::Client,
    internal_tx: &mpsc::UnboundedSender<InternalAction>,
) -> KubeSource {
    let source = KubeSource::new(
        client,
        settings.namespace.clone(),
        settings.label_selector.clone(),
    );
    let generation = state.begin_connections();
    state.navigate_to(Screen::Connections);
    debug!(generation, namespace = ?source.namespace(), "opened connections view");

    let _ = internal_tx.send(InternalAction::Fetch);
    source
}

/// List connections in the background; the result comes back tagged with the view generation
fn spawn_fetch(
    state: &mut AppState,
    source: &KubeSource,
    internal_tx: &mpsc::UnboundedSender<InternalAction>,
) {
    state.fetch_in_flight = true;
    let generation = state.generation;
    let source = source.clone();
    let tx = internal_tx.clone();

    tokio::spawn(async move {
        let result = source.list().await;
        let _ = tx.send(InternalAction::FetchCompleted(generation, result));
    });
}

/// Run confirmed deletes followed by a single refresh in the background
fn spawn_deletes(
    state: &AppState,
    source: &KubeSource,
    batch: DeleteBatch,
    internal_tx: &mpsc::UnboundedSender<InternalAction>,
) {
    let generation = state.generation;
    let source = source.clone();
    let tx = internal_tx.clone();

    tokio::spawn(async move {
        let report = delete_then_refresh(&source, batch).await;
        let _ = tx.send(InternalAction::DeletesCompleted(generation, report));
    });
}

/// Map a key press to an action; the dialog and search bar capture input first
fn key_action(state: &AppState, keybindings: &KeyBindings, key: &KeyEvent) -> Option<Action> {
    if state.deletes.is_open() {
        return keybindings.get_confirm_action(key);
    }
    if state.ui_state.search_active && state.current_screen == Screen::Connections {
        return keybindings.get_search_input_action(key);
    }

    let context = match state.current_screen {
        Screen::ContextSelect => KeyContext::ListNavigation,
        Screen::Connections => KeyContext::Connections,
    };
    keybindings.get_action(context, key)
}

fn handle_action(
    state: &mut AppState,
    internal_tx: &mpsc::UnboundedSender<InternalAction>,
    action: Action,
) {
    match action {
        Action::Quit => {
            state.should_quit = true;
        }
        Action::GoBack => {
            if state.ui_state.help_visible {
                state.ui_state.help_visible = false;
            } else if !state.go_back() {
                state.should_quit = true;
            }
        }
        Action::SelectContext(name) => {
            let _ = internal_tx.send(InternalAction::Connect(name));
        }
        Action::ToggleHelp => {
            state.ui_state.help_visible = !state.ui_state.help_visible;
        }

        Action::ListUp => match state.current_screen {
            Screen::ContextSelect => state.list_up(),
            Screen::Connections => state.cursor_up(),
        },
        Action::ListDown => match state.current_screen {
            Screen::ContextSelect => state.list_down(),
            Screen::Connections => state.cursor_down(),
        },
        Action::ListSelect => {
            if state.current_screen == Screen::ContextSelect {
                if let Some(ctx) = state.selected_index().and_then(|i| state.contexts.get(i)) {
                    let _ = state.action_tx.send(Action::SelectContext(ctx.name.clone()));
                }
            }
        }

        // Search
        Action::OpenSearch => state.start_search(),
        Action::CloseSearch => state.cancel_search(),
        Action::SearchInput(c) => state.search_input_char(c),
        Action::SearchBackspace => state.search_input_backspace(),
        Action::SearchClear => state.search_clear(),
        Action::ApplySearch => state.apply_search(),

        // Connections table
        Action::SortBy(column) => state.table.sort_by(column),
        Action::ToggleSelection => state.toggle_selection(),
        Action::AddConnection => state.request_navigation(NavigationRequest::AddConnection),
        Action::Refresh => {
            let _ = internal_tx.send(InternalAction::Fetch);
        }

        // Delete flow
        Action::DeleteConnection => state.request_delete_current(),
        Action::DeleteSelected => state.request_delete_selected(),
        Action::ConfirmDelete => {
            if let Some(batch) = state.confirm_delete() {
                let _ = internal_tx.send(InternalAction::RunDeletes(batch));
            }
        }
        Action::CancelDelete => state.cancel_delete(),

        Action::DismissNotice => state.dismiss_notice(),
        Action::Render => {}
    }
}

fn render(tui: &mut Tui, state: &mut AppState) -> Result<()> {
    tui.terminal().draw(|frame| {
        match state.current_screen {
            Screen::ContextSelect => ContextSelectScreen::render(frame, state),
            Screen::Connections => ConnectionsScreen::render(frame, state),
        }

        // Render help overlay if visible
        if state.ui_state.help_visible {
            HelpOverlay::render(frame);
        }
    })?;

    Ok(())
}
