//! The filter session event loop.
//!
//! A `FilterSession` owns the [`CascadeState`] and is its only writer. User
//! events and fetch completions are applied one at a time on the session's
//! task; fetches run concurrently in a `JoinSet` and report back as
//! [`Completion`]s. Because every completion is checked against the current
//! generation before it is applied, the order in which responses arrive does
//! not matter.
//!
//! The synchronous handlers ([`FilterSession::bootstrap`],
//! [`FilterSession::handle_user`], [`FilterSession::handle_completion`])
//! return the effects to run rather than running them, so the whole protocol
//! can be driven by hand in tests.

use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::{JoinHandle, JoinSet};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, instrument};

use crate::catalog::CatalogApiError;
use crate::effects::{
    CatalogEffect, CatalogExecutor, CatalogInterpreter, CatalogResponse, Completion, FetchKind,
    TaggedEffect,
};
use crate::state::{CascadeState, Generation, Slot, load_categories, transition};
use crate::sync::{DispatchOutcome, OptionSynchronizer, SearchDispatcher, SyncOutcome};
use crate::types::{CategoryId, FilterOptions, OptionSet, ResultSet};

use super::host::{ControlsView, HostView};
use super::message::{SessionMessage, UserEvent};
use super::notice::Notice;

/// Errors from talking to a running session.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session has stopped")]
    Closed,
}

/// One user's filtering session.
#[derive(Debug)]
pub struct FilterSession<H> {
    state: CascadeState,
    synchronizer: OptionSynchronizer,
    dispatcher: SearchDispatcher,
    results: Option<ResultSet>,
    fetch_categories: bool,
    host: H,
}

impl<H: HostView> FilterSession<H> {
    /// Creates a session that accepts any category id.
    pub fn new(host: H) -> Self {
        FilterSession {
            state: CascadeState::new(),
            synchronizer: OptionSynchronizer::new(),
            dispatcher: SearchDispatcher::new(),
            results: None,
            fetch_categories: false,
            host,
        }
    }

    /// Creates a session whose category control offers `categories`.
    pub fn with_categories(host: H, categories: OptionSet<CategoryId>) -> Self {
        FilterSession {
            state: CascadeState::with_categories(categories),
            ..Self::new(host)
        }
    }

    /// Fetch the category list from the catalog during bootstrap.
    pub fn fetching_categories(mut self, fetch: bool) -> Self {
        self.fetch_categories = fetch;
        self
    }

    pub fn state(&self) -> &CascadeState {
        &self.state
    }

    /// The results currently displayed, if any have arrived.
    pub fn results(&self) -> Option<&ResultSet> {
        self.results.as_ref()
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    /// Renders the initial controls and returns the startup fetches: the
    /// category list (if requested) and an option sync for `(all, all)`. The
    /// initial search follows once that sync completes.
    pub fn bootstrap(&mut self) -> Vec<TaggedEffect> {
        info!(state = %self.state, "Starting filter session");
        self.render_controls();

        let mut effects = Vec::with_capacity(2);
        if self.fetch_categories && self.state.categories().is_none() {
            effects.push(TaggedEffect::new(
                self.state.generation(),
                CatalogEffect::ListCategories,
            ));
        }
        effects.push(self.synchronizer.issue(&self.state));
        effects
    }

    /// Re-renders the controls and the last results.
    pub fn show(&mut self) {
        self.render_controls();
        if let Some(results) = &self.results {
            self.host.render_results(results);
        }
    }

    /// Applies a user selection.
    ///
    /// Category and manufacturer changes reload the option sets; the search
    /// follows when the reload completes. A color change searches
    /// immediately, unless an option reload is still outstanding, in which
    /// case the reload is reissued for the new generation and the search
    /// follows it. A rejected selection changes nothing and the controls are
    /// redrawn to show the unchanged state.
    #[instrument(skip(self), fields(generation = %self.state.generation()))]
    pub fn handle_user(&mut self, event: UserEvent) -> Vec<TaggedEffect> {
        let slot = event.slot();

        match transition(&self.state, event.into()) {
            Err(rejection) => {
                debug!(%rejection, "Ignoring selection");
                self.render_controls();
                Vec::new()
            }
            Ok(next) => {
                self.state = next;
                info!(state = %self.state, "Selection changed");
                self.render_controls();

                let effect = match slot {
                    Slot::Category | Slot::Manufacturer => self.synchronizer.issue(&self.state),
                    Slot::Color if self.synchronizer.pending().is_some() => {
                        self.synchronizer.issue(&self.state)
                    }
                    Slot::Color => self.dispatcher.issue(&self.state),
                };
                vec![effect]
            }
        }
    }

    /// Applies or discards a fetch result and returns any follow-up fetch.
    #[instrument(skip_all, fields(generation = %completion.generation, kind = %completion.kind))]
    pub fn handle_completion(&mut self, completion: Completion) -> Vec<TaggedEffect> {
        let Completion {
            generation,
            kind,
            result,
        } = completion;

        match (kind, result) {
            (_, Ok(CatalogResponse::Options(options))) => self.on_options(generation, Ok(options)),
            (_, Ok(CatalogResponse::Results(results))) => self.on_results(generation, Ok(results)),
            (_, Ok(CatalogResponse::Categories(set))) => self.on_categories(generation, Ok(set)),
            (FetchKind::Options, Err(e)) => self.on_options(generation, Err(e)),
            (FetchKind::Search, Err(e)) => self.on_results(generation, Err(e)),
            (FetchKind::Categories, Err(e)) => self.on_categories(generation, Err(e)),
        }
    }

    fn on_options(
        &mut self,
        generation: Generation,
        result: Result<FilterOptions, CatalogApiError>,
    ) -> Vec<TaggedEffect> {
        match self.synchronizer.complete(&mut self.state, generation, result) {
            SyncOutcome::Loaded { .. } => {
                self.render_controls();
                vec![self.dispatcher.issue(&self.state)]
            }
            SyncOutcome::Superseded(_) => Vec::new(),
            SyncOutcome::Failed(error) => {
                let notice = Notice::fetch_failed(FetchKind::Options, generation, &error);
                self.host.notify(&notice);
                vec![self.dispatcher.issue(&self.state)]
            }
        }
    }

    fn on_results(
        &mut self,
        generation: Generation,
        result: Result<ResultSet, CatalogApiError>,
    ) -> Vec<TaggedEffect> {
        match self.dispatcher.complete(&self.state, generation, result) {
            DispatchOutcome::Rendered(results) => {
                self.host.render_results(&results);
                self.results = Some(results);
            }
            DispatchOutcome::Superseded(_) => {}
            DispatchOutcome::Failed(error) => {
                let notice = Notice::fetch_failed(FetchKind::Search, generation, &error);
                self.host.notify(&notice);
            }
        }
        Vec::new()
    }

    /// The category list is static for the session, so it is applied
    /// whatever generation it was requested at.
    fn on_categories(
        &mut self,
        generation: Generation,
        result: Result<OptionSet<CategoryId>, CatalogApiError>,
    ) -> Vec<TaggedEffect> {
        match result {
            Ok(categories) => {
                debug!(count = categories.len(), "Category list loaded");
                self.state = load_categories(&self.state, categories);
                self.render_controls();
            }
            Err(error) => {
                error!(error = %error, "Failed to load category list");
                let notice = Notice::fetch_failed(FetchKind::Categories, generation, &error);
                self.host.notify(&notice);
            }
        }
        Vec::new()
    }

    fn render_controls(&mut self) {
        self.host.render_controls(&ControlsView::from_state(&self.state));
    }

    /// Runs the session until shutdown, the channel closes, or a
    /// [`SessionMessage::Shutdown`] arrives. Returns the session so its final
    /// state can be inspected.
    ///
    /// Fetches still in flight at exit are abandoned.
    #[instrument(skip_all)]
    pub async fn run<C>(
        mut self,
        executor: CatalogExecutor<C>,
        mut rx: mpsc::Receiver<SessionMessage>,
        shutdown: CancellationToken,
    ) -> Self
    where
        C: CatalogInterpreter + Clone + Send + Sync + 'static,
    {
        let mut in_flight = JoinSet::new();
        let effects = self.bootstrap();
        spawn_fetches(&mut in_flight, &executor, effects);

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => {
                    info!("Shutdown signal received, stopping session");
                    break;
                }

                msg = rx.recv() => {
                    match msg {
                        Some(SessionMessage::User(event)) => {
                            let effects = self.handle_user(event);
                            spawn_fetches(&mut in_flight, &executor, effects);
                        }
                        Some(SessionMessage::Show) => self.show(),
                        Some(SessionMessage::Shutdown) => {
                            info!("Shutdown message received");
                            break;
                        }
                        None => {
                            info!("Message channel closed");
                            break;
                        }
                    }
                }

                Some(joined) = in_flight.join_next() => {
                    match joined {
                        Ok(Some(completion)) => {
                            let effects = self.handle_completion(completion);
                            spawn_fetches(&mut in_flight, &executor, effects);
                        }
                        Ok(None) => debug!("Fetch cancelled"),
                        Err(e) => error!(error = %e, "Fetch task failed"),
                    }
                }
            }
        }

        in_flight.abort_all();
        info!(state = %self.state, "Filter session stopped");
        self
    }
}

impl<H> FilterSession<H>
where
    H: HostView + Send + 'static,
{
    /// Spawns the session on the current runtime.
    pub fn spawn<C>(
        self,
        executor: CatalogExecutor<C>,
        channel_capacity: usize,
        shutdown: CancellationToken,
    ) -> (SessionHandle, JoinHandle<Self>)
    where
        C: CatalogInterpreter + Clone + Send + Sync + 'static,
    {
        let (tx, rx) = mpsc::channel(channel_capacity.max(1));
        let task = tokio::spawn(self.run(executor, rx, shutdown));
        (SessionHandle { tx }, task)
    }
}

fn spawn_fetches<C>(
    in_flight: &mut JoinSet<Option<Completion>>,
    executor: &CatalogExecutor<C>,
    effects: Vec<TaggedEffect>,
) where
    C: CatalogInterpreter + Clone + Send + Sync + 'static,
{
    for tagged in effects {
        let executor = executor.clone();
        in_flight.spawn(async move { executor.execute(tagged).await });
    }
}

/// Sends messages to a spawned session.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    tx: mpsc::Sender<SessionMessage>,
}

impl SessionHandle {
    pub async fn select(&self, event: UserEvent) -> Result<(), SessionError> {
        self.send(SessionMessage::User(event)).await
    }

    pub async fn show(&self) -> Result<(), SessionError> {
        self.send(SessionMessage::Show).await
    }

    pub async fn shutdown(&self) -> Result<(), SessionError> {
        self.send(SessionMessage::Shutdown).await
    }

    async fn send(&self, msg: SessionMessage) -> Result<(), SessionError> {
        self.tx.send(msg).await.map_err(|_| SessionError::Closed)
    }
}
