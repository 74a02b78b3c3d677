//! Shared test utilities and arbitrary generators for property-based testing.

use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use proptest::prelude::*;
use tokio::sync::{Notify, mpsc, oneshot};

use crate::catalog::CatalogApiError;
use crate::effects::{CatalogEffect, CatalogInterpreter, CatalogResponse};
use crate::session::{ControlsView, HostView, Notice};
use crate::state::FilterEvent;
use crate::types::{
    CategoryId, ColorId, FilterOptions, FilterValue, ManufacturerId, OptionEntry, OptionSet,
    ResultSet,
};

/// How long scripted helpers wait before declaring a test hung.
const SCRIPT_TIMEOUT: Duration = Duration::from_secs(5);

// ─── Fixtures ─────────────────────────────────────────────────────────────────

pub fn manufacturers(entries: &[(u64, &str)]) -> OptionSet<ManufacturerId> {
    entries
        .iter()
        .map(|(id, name)| OptionEntry::new(ManufacturerId(*id), *name))
        .collect()
}

pub fn colors(entries: &[(u64, &str)]) -> OptionSet<ColorId> {
    entries
        .iter()
        .map(|(id, name)| OptionEntry::new(ColorId(*id), *name))
        .collect()
}

pub fn categories(entries: &[(u64, &str)]) -> OptionSet<CategoryId> {
    entries
        .iter()
        .map(|(id, name)| OptionEntry::new(CategoryId(*id), *name))
        .collect()
}

pub fn options(mans: &[(u64, &str)], cols: &[(u64, &str)]) -> FilterOptions {
    FilterOptions::new(manufacturers(mans), colors(cols))
}

// ─── Strategies ───────────────────────────────────────────────────────────────

/// Small id space so that generated selections often hit generated sets.
fn arb_id() -> impl Strategy<Value = u64> {
    1u64..6
}

fn arb_value<T: std::fmt::Debug + Clone>(
    id: impl Strategy<Value = T>,
) -> impl Strategy<Value = FilterValue<T>> {
    prop_oneof![
        1 => Just(FilterValue::All),
        3 => id.prop_map(FilterValue::Only),
    ]
}

fn arb_entries() -> impl Strategy<Value = Vec<u64>> {
    prop::collection::btree_set(arb_id(), 0..5).prop_map(|ids| ids.into_iter().collect())
}

pub fn arb_filter_options() -> impl Strategy<Value = FilterOptions> {
    (arb_entries(), arb_entries()).prop_map(|(mans, cols)| {
        FilterOptions::new(
            mans.into_iter()
                .map(|id| OptionEntry::new(ManufacturerId(id), format!("m{}", id)))
                .collect(),
            cols.into_iter()
                .map(|id| OptionEntry::new(ColorId(id), format!("c{}", id)))
                .collect(),
        )
    })
}

pub fn arb_filter_event() -> impl Strategy<Value = FilterEvent> {
    prop_oneof![
        arb_value(arb_id().prop_map(CategoryId)).prop_map(FilterEvent::CategoryChanged),
        arb_value(arb_id().prop_map(ManufacturerId)).prop_map(FilterEvent::ManufacturerChanged),
        arb_value(arb_id().prop_map(ColorId)).prop_map(FilterEvent::ColorChanged),
        arb_filter_options().prop_map(FilterEvent::OptionsLoaded),
    ]
}

// ─── Scripted catalog ─────────────────────────────────────────────────────────

type Reply = Result<CatalogResponse, CatalogApiError>;

#[derive(Default)]
struct Script {
    pending: Vec<(CatalogEffect, oneshot::Sender<Reply>)>,
    calls: Vec<CatalogEffect>,
}

/// A catalog whose responses are released by the test, in any order.
///
/// Every request parks until the test answers it with [`respond_to`] or
/// [`respond_next`], which makes out-of-order delivery deterministic.
///
/// [`respond_to`]: ScriptedCatalog::respond_to
/// [`respond_next`]: ScriptedCatalog::respond_next
#[derive(Clone, Default)]
pub struct ScriptedCatalog {
    script: Arc<Mutex<Script>>,
    changed: Arc<Notify>,
}

impl std::fmt::Debug for ScriptedCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScriptedCatalog").finish_non_exhaustive()
    }
}

impl ScriptedCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every request received so far, in arrival order.
    pub fn calls(&self) -> Vec<CatalogEffect> {
        self.script.lock().unwrap().calls.clone()
    }

    /// Answers the oldest parked request matching `matches`, waiting for one
    /// to arrive if necessary.
    pub async fn respond_to(&self, matches: impl Fn(&CatalogEffect) -> bool, reply: Reply) {
        let wait = async {
            loop {
                let notified = self.changed.notified();
                tokio::pin!(notified);
                notified.as_mut().enable();

                if let Some(tx) = self.take_pending(&matches) {
                    return tx;
                }
                notified.await;
            }
        };

        let tx = tokio::time::timeout(SCRIPT_TIMEOUT, wait)
            .await
            .expect("no matching catalog request arrived");
        let _ = tx.send(reply);
    }

    /// Answers the oldest parked request.
    pub async fn respond_next(&self, reply: Reply) {
        self.respond_to(|_| true, reply).await;
    }

    /// Answers the parked request for exactly `effect`.
    pub async fn respond(&self, effect: &CatalogEffect, reply: Reply) {
        self.respond_to(|e| e == effect, reply).await;
    }

    fn take_pending(
        &self,
        matches: &impl Fn(&CatalogEffect) -> bool,
    ) -> Option<oneshot::Sender<Reply>> {
        let mut script = self.script.lock().unwrap();
        let index = script.pending.iter().position(|(e, _)| matches(e))?;
        Some(script.pending.remove(index).1)
    }
}

impl CatalogInterpreter for ScriptedCatalog {
    fn interpret(&self, effect: CatalogEffect) -> impl Future<Output = Reply> + Send {
        let (tx, rx) = oneshot::channel();
        {
            let mut script = self.script.lock().unwrap();
            script.calls.push(effect.clone());
            script.pending.push((effect, tx));
        }
        self.changed.notify_waiters();

        async move {
            rx.await.unwrap_or_else(|_| {
                Err(CatalogApiError::transient_without_source(
                    "scripted request dropped",
                ))
            })
        }
    }
}

// ─── Recording host ───────────────────────────────────────────────────────────

/// Everything a session pushed to its host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    Controls(ControlsView),
    Results(ResultSet),
    Notice(Notice),
}

/// A host that forwards every update to a channel the test reads.
#[derive(Debug, Clone)]
pub struct ChannelHost {
    tx: mpsc::UnboundedSender<HostEvent>,
}

impl ChannelHost {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<HostEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (ChannelHost { tx }, rx)
    }
}

impl HostView for ChannelHost {
    fn render_controls(&mut self, controls: &ControlsView) {
        let _ = self.tx.send(HostEvent::Controls(controls.clone()));
    }

    fn render_results(&mut self, results: &ResultSet) {
        let _ = self.tx.send(HostEvent::Results(results.clone()));
    }

    fn notify(&mut self, notice: &Notice) {
        let _ = self.tx.send(HostEvent::Notice(notice.clone()));
    }
}

/// Drains everything already queued on a host channel.
pub fn drain(rx: &mut mpsc::UnboundedReceiver<HostEvent>) -> Vec<HostEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

/// Waits for the next rendered result set, skipping other updates.
pub async fn next_results(rx: &mut mpsc::UnboundedReceiver<HostEvent>) -> ResultSet {
    next_matching(rx, |event| match event {
        HostEvent::Results(results) => Some(results),
        _ => None,
    })
    .await
}

/// Waits for the next notice, skipping other updates.
pub async fn next_notice(rx: &mut mpsc::UnboundedReceiver<HostEvent>) -> Notice {
    next_matching(rx, |event| match event {
        HostEvent::Notice(notice) => Some(notice),
        _ => None,
    })
    .await
}

async fn next_matching<T>(
    rx: &mut mpsc::UnboundedReceiver<HostEvent>,
    pick: impl Fn(HostEvent) -> Option<T>,
) -> T {
    let wait = async {
        loop {
            match rx.recv().await {
                Some(event) => {
                    if let Some(found) = pick(event) {
                        return found;
                    }
                }
                None => panic!("host channel closed"),
            }
        }
    };

    tokio::time::timeout(SCRIPT_TIMEOUT, wait)
        .await
        .expect("timed out waiting for host update")
}
