//! Table registry: owns every live [`HandEngine`] and the per-table worker
//! that drives its turn timer.
//!
//! The engine itself is synchronous and not thread-safe; external callers
//! (HTTP handlers) only ever reach it through a [`TableHandle`], which wraps
//! it in a `tokio::sync::Mutex` and arranges for exactly one background task
//! per table to watch the turn deadline and auto-fold on timeout.

use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex as StdMutex};

use thiserror::Error;
use tokio::sync::{broadcast, watch, Mutex as AsyncMutex};
use tokio::task::JoinHandle;

use axiomind_engine::engine::{HandEngine, HandOutcome, LegalAction, SettlementRecord, StateView, TableConfig};
use axiomind_engine::errors::GameError;
use axiomind_engine::money::Chips;
use axiomind_engine::player::{PlayerAction, Seat};

use crate::events::TableEventBus;

pub type TableId = String;

const SETTLEMENT_CHANNEL_CAPACITY: usize = 32;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("table `{0}` was not found")]
    TableNotFound(TableId),
    #[error("table `{0}` already exists")]
    TableExists(TableId),
    #[error("engine error: {0}")]
    Engine(#[from] GameError),
}

/// Owns every table currently in memory. One per process.
#[derive(Clone)]
pub struct TableRegistry {
    tables: Arc<StdMutex<HashMap<TableId, Arc<TableHandle>>>>,
    event_bus: Arc<TableEventBus>,
}

impl TableRegistry {
    pub fn new(event_bus: Arc<TableEventBus>) -> Self {
        Self {
            tables: Arc::new(StdMutex::new(HashMap::new())),
            event_bus,
        }
    }

    /// Creates a new table with its own engine and background timer task.
    pub fn create(&self, table_id: impl Into<TableId>, config: TableConfig) -> Result<Arc<TableHandle>, RegistryError> {
        let table_id = table_id.into();
        let mut guard = self.tables.lock().expect("table registry lock poisoned");
        if guard.contains_key(&table_id) {
            return Err(RegistryError::TableExists(table_id));
        }
        let (inner, deadline_rx) = TableHandle::new(table_id.clone(), config, Arc::clone(&self.event_bus));
        let handle = Arc::new(inner);
        handle.start_timer(deadline_rx);
        guard.insert(table_id, Arc::clone(&handle));
        Ok(handle)
    }

    pub fn get(&self, table_id: &str) -> Result<Arc<TableHandle>, RegistryError> {
        self.tables
            .lock()
            .expect("table registry lock poisoned")
            .get(table_id)
            .cloned()
            .ok_or_else(|| RegistryError::TableNotFound(table_id.to_string()))
    }

    /// Removes a table and stops its timer task. Returns an error if the
    /// table is unknown; the remove is idempotent otherwise.
    pub fn remove(&self, table_id: &str) -> Result<(), RegistryError> {
        let handle = self
            .tables
            .lock()
            .expect("table registry lock poisoned")
            .remove(table_id)
            .ok_or_else(|| RegistryError::TableNotFound(table_id.to_string()))?;
        handle.shutdown();
        self.event_bus.drop_table(table_id);
        Ok(())
    }

    pub fn table_count(&self) -> usize {
        self.tables.lock().expect("table registry lock poisoned").len()
    }
}

/// One table's engine plus the worker task that owns its turn timer.
///
/// The worker is the only writer that calls `on_timeout`; everything else
/// routes through `submit`/`attach`/`detach`, which take the same async
/// mutex, so there is never more than one mutation path active at a time.
pub struct TableHandle {
    table_id: TableId,
    engine: AsyncMutex<HandEngine>,
    event_bus: Arc<TableEventBus>,
    settlement_tx: broadcast::Sender<SettlementRecord>,
    deadline_tx: watch::Sender<Option<u64>>,
    timer_task: StdMutex<Option<JoinHandle<()>>>,
}

impl TableHandle {
    fn new(
        table_id: TableId,
        config: TableConfig,
        event_bus: Arc<TableEventBus>,
    ) -> (Self, watch::Receiver<Option<u64>>) {
        let engine = HandEngine::new(table_id.clone(), config);
        let (settlement_tx, _) = broadcast::channel(SETTLEMENT_CHANNEL_CAPACITY);
        let (deadline_tx, deadline_rx) = watch::channel(None);

        let this = Self {
            table_id,
            engine: AsyncMutex::new(engine),
            event_bus,
            settlement_tx,
            deadline_tx,
            timer_task: StdMutex::new(None),
        };
        (this, deadline_rx)
    }

    /// Starts the background timer task. Split from `spawn` because the
    /// task needs an `Arc<Self>` to call back into the handle.
    fn start_timer(self: &Arc<Self>, deadline_rx: watch::Receiver<Option<u64>>) {
        let handle = Arc::clone(self);
        let task = tokio::spawn(async move {
            handle.run_timer(deadline_rx).await;
        });
        *self.timer_task.lock().expect("timer task lock poisoned") = Some(task);
    }

    async fn run_timer(&self, mut deadline_rx: watch::Receiver<Option<u64>>) {
        loop {
            let deadline = *deadline_rx.borrow();
            match deadline {
                None => {
                    if deadline_rx.changed().await.is_err() {
                        return;
                    }
                }
                Some(deadline_ms) => {
                    let now = now_unix_ms();
                    let remaining = deadline_ms.saturating_sub(now);
                    let sleep = tokio::time::sleep(std::time::Duration::from_millis(remaining));
                    tokio::select! {
                        _ = sleep => {
                            self.fire_timeout().await;
                        }
                        changed = deadline_rx.changed() => {
                            if changed.is_err() {
                                return;
                            }
                        }
                    }
                }
            }
        }
    }

    async fn fire_timeout(&self) {
        let now = now_unix_ms();
        let mut engine = self.engine.lock().await;
        match panic::catch_unwind(AssertUnwindSafe(|| engine.on_timeout(now))) {
            Ok(Ok(outcome)) => self.after_mutation(&mut engine, outcome, now),
            Ok(Err(_)) => {}
            Err(_) => self.handle_engine_panic(&mut engine, now),
        }
    }

    /// Converts an engine panic — an internal invariant violation per
    /// spec.md §7 — into an `AbortSettlement`: refunds every participant and
    /// leaves the engine ready for the next hand rather than poisoning the
    /// table for good.
    fn handle_engine_panic(&self, engine: &mut HandEngine, now: u64) {
        tracing::error!(table_id = %self.table_id, "hand engine panicked mid-mutation; aborting hand");
        if let Some(settlement) = engine.abort_settlement() {
            self.after_mutation(engine, HandOutcome::HandEnded(settlement), now);
        } else {
            let _ = self.deadline_tx.send(engine.turn_deadline());
        }
    }

    /// Broadcasts the post-mutation state to every subscriber and, if the
    /// hand just ended, publishes the settlement and re-arms (or clears)
    /// the deadline watch for the next actor.
    fn after_mutation(&self, engine: &mut HandEngine, outcome: HandOutcome, _now: u64) {
        for seat in engine.seat_numbers() {
            self.event_bus.broadcast(&self.table_id, Some(seat), engine.snapshot(Some(seat)));
        }
        self.event_bus.broadcast(&self.table_id, None, engine.snapshot(None));

        if let HandOutcome::HandEnded(settlement) = outcome {
            let _ = self.settlement_tx.send(settlement);
        }

        let _ = self.deadline_tx.send(engine.turn_deadline());
    }

    pub fn table_id(&self) -> &str {
        &self.table_id
    }

    pub async fn attach(&self, seat: Seat, stack: Chips) -> Result<(), GameError> {
        let mut engine = self.engine.lock().await;
        engine.attach(seat, stack)?;
        self.event_bus.broadcast(&self.table_id, None, engine.snapshot(None));
        Ok(())
    }

    pub async fn detach(&self, seat: Seat) -> Result<Chips, GameError> {
        let mut engine = self.engine.lock().await;
        let result = engine.detach(seat);
        self.event_bus.broadcast(&self.table_id, None, engine.snapshot(None));
        result
    }

    pub async fn start_hand(&self) -> Result<(), GameError> {
        let now = now_unix_ms();
        let mut engine = self.engine.lock().await;
        match panic::catch_unwind(AssertUnwindSafe(|| engine.start_hand(now))) {
            Ok(result) => {
                result?;
                self.after_mutation(&mut engine, HandOutcome::Continues, now);
                Ok(())
            }
            Err(_) => {
                self.handle_engine_panic(&mut engine, now);
                Err(GameError::Invariant("engine panicked starting the hand".into()))
            }
        }
    }

    pub async fn submit(&self, action: PlayerAction) -> Result<HandOutcome, GameError> {
        let now = now_unix_ms();
        let mut engine = self.engine.lock().await;
        match panic::catch_unwind(AssertUnwindSafe(|| engine.submit(action, now))) {
            Ok(result) => {
                let outcome = result?;
                self.after_mutation(&mut engine, outcome.clone(), now);
                Ok(outcome)
            }
            Err(_) => {
                self.handle_engine_panic(&mut engine, now);
                Err(GameError::Invariant("engine panicked applying the action".into()))
            }
        }
    }

    pub async fn valid_actions(&self, seat: Seat) -> Vec<LegalAction> {
        self.engine.lock().await.valid_actions(seat)
    }

    pub async fn snapshot(&self, viewer_seat: Option<Seat>) -> StateView {
        self.engine.lock().await.snapshot(viewer_seat)
    }

    pub fn subscribe_settlements(&self) -> broadcast::Receiver<SettlementRecord> {
        self.settlement_tx.subscribe()
    }

    fn shutdown(&self) {
        if let Some(task) = self.timer_task.lock().expect("timer task lock poisoned").take() {
            task.abort();
        }
    }
}

impl Drop for TableHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn now_unix_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("system clock before unix epoch")
        .as_millis() as u64
}
