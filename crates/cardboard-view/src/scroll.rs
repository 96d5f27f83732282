//! Board scroll persistence.
//!
//! Scroll events are frequent, so writes to the persisted config are
//! debounced with a cancel-and-reschedule timer: only the last position
//! within the window is persisted. Each write is tagged with this view
//! instance's session id and a monotonically increasing revision so the
//! view can recognize the data-update notification caused by its own
//! write and suppress exactly that one render cycle.

use cardboard_core::ConfigStore;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, warn};
use uuid::Uuid;

pub const BOARD_SCROLL_KEY: &str = "board-scroll";

// Pre-session-tagging format: two bare numeric keys.
const LEGACY_LEFT_KEY: &str = "board-scroll-left";
const LEGACY_TOP_KEY: &str = "board-scroll-top";

const SAVE_DEBOUNCE: Duration = Duration::from_millis(250);

/// Persisted board scroll position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardScrollState {
    pub left: f64,
    pub top: f64,
    pub session_id: Uuid,
    pub revision: u64,
}

pub struct ScrollPersistence {
    store: Arc<dyn ConfigStore>,
    session_id: Uuid,
    next_revision: Arc<AtomicU64>,
    last_written: Arc<AtomicU64>,
    /// Highest own revision already matched against an incoming update;
    /// each written revision suppresses at most one render cycle.
    consumed_through: u64,
    pending: Option<JoinHandle<()>>,
    debounce: Duration,
}

impl ScrollPersistence {
    pub fn new(store: Arc<dyn ConfigStore>) -> Self {
        Self::with_debounce(store, SAVE_DEBOUNCE)
    }

    pub fn with_debounce(store: Arc<dyn ConfigStore>, debounce: Duration) -> Self {
        Self {
            store,
            session_id: Uuid::new_v4(),
            next_revision: Arc::new(AtomicU64::new(0)),
            last_written: Arc::new(AtomicU64::new(0)),
            consumed_through: 0,
            pending: None,
            debounce,
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Read the persisted position, falling back to the legacy two-key
    /// format. Malformed values read as "no saved position".
    pub fn load(&self) -> Option<(f64, f64)> {
        if let Some(value) = self.store.get(BOARD_SCROLL_KEY) {
            match serde_json::from_value::<BoardScrollState>(value) {
                Ok(state) => return Some((state.left, state.top)),
                Err(e) => debug!("ignoring malformed board scroll state: {}", e),
            }
        }

        let left = self.store.get(LEGACY_LEFT_KEY).and_then(|v| v.as_f64());
        let top = self.store.get(LEGACY_TOP_KEY).and_then(|v| v.as_f64());
        match (left, top) {
            (Some(left), Some(top)) => Some((left, top)),
            _ => None,
        }
    }

    /// Debounced save: cancels any pending write and schedules a fresh
    /// one, so only the last position within the window reaches the
    /// store.
    pub fn schedule_save(&mut self, left: f64, top: f64) {
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }

        let revision = self.next_revision.fetch_add(1, Ordering::SeqCst) + 1;
        let store = Arc::clone(&self.store);
        let last_written = Arc::clone(&self.last_written);
        let session_id = self.session_id;
        let debounce = self.debounce;

        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(debounce).await;
            let state = BoardScrollState {
                left,
                top,
                session_id,
                revision,
            };
            match serde_json::to_value(&state) {
                Ok(value) => {
                    store.set(BOARD_SCROLL_KEY, value);
                    last_written.store(revision, Ordering::SeqCst);
                }
                Err(e) => warn!("failed to serialize board scroll state: {}", e),
            }
        }));
    }

    /// Check whether the incoming data-update notification was triggered
    /// by this view's own just-persisted scroll write. Consumes the
    /// match, so a given write suppresses a single render cycle only.
    pub fn should_suppress_update(&mut self) -> bool {
        let Some(value) = self.store.get(BOARD_SCROLL_KEY) else {
            return false;
        };
        let Ok(state) = serde_json::from_value::<BoardScrollState>(value) else {
            return false;
        };
        if state.session_id != self.session_id {
            return false;
        }
        let written = self.last_written.load(Ordering::SeqCst);
        if state.revision > self.consumed_through && state.revision <= written {
            self.consumed_through = state.revision;
            true
        } else {
            false
        }
    }
}

impl Drop for ScrollPersistence {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value as JsonValue};
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemoryConfigStore {
        values: Mutex<HashMap<String, JsonValue>>,
    }

    impl ConfigStore for MemoryConfigStore {
        fn get(&self, key: &str) -> Option<JsonValue> {
            self.values.lock().unwrap().get(key).cloned()
        }

        fn set(&self, key: &str, value: JsonValue) {
            self.values.lock().unwrap().insert(key.to_string(), value);
        }
    }

    fn persisted_state(store: &MemoryConfigStore) -> Option<BoardScrollState> {
        store
            .get(BOARD_SCROLL_KEY)
            .and_then(|v| serde_json::from_value(v).ok())
    }

    #[tokio::test(start_paused = true)]
    async fn test_debounce_keeps_only_last_position() {
        let store = Arc::new(MemoryConfigStore::default());
        let mut scroll =
            ScrollPersistence::with_debounce(store.clone(), Duration::from_millis(100));

        scroll.schedule_save(10.0, 0.0);
        tokio::time::sleep(Duration::from_millis(10)).await;
        scroll.schedule_save(20.0, 5.0);
        tokio::time::sleep(Duration::from_millis(200)).await;

        let state = persisted_state(&store).expect("state written");
        assert_eq!(state.left, 20.0);
        assert_eq!(state.top, 5.0);
        assert_eq!(state.revision, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_own_write_suppresses_one_cycle() {
        let store = Arc::new(MemoryConfigStore::default());
        let mut scroll =
            ScrollPersistence::with_debounce(store.clone(), Duration::from_millis(50));

        scroll.schedule_save(1.0, 2.0);
        tokio::time::sleep(Duration::from_millis(100)).await;

        assert!(scroll.should_suppress_update());
        assert!(!scroll.should_suppress_update());
    }

    #[tokio::test(start_paused = true)]
    async fn test_foreign_write_never_suppresses() {
        let store = Arc::new(MemoryConfigStore::default());
        let mut scroll =
            ScrollPersistence::with_debounce(store.clone(), Duration::from_millis(50));

        let foreign = BoardScrollState {
            left: 3.0,
            top: 4.0,
            session_id: Uuid::new_v4(),
            revision: 7,
        };
        store.set(BOARD_SCROLL_KEY, serde_json::to_value(&foreign).unwrap());

        assert!(!scroll.should_suppress_update());
        assert_eq!(scroll.load(), Some((3.0, 4.0)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_legacy_two_key_fallback() {
        let store = Arc::new(MemoryConfigStore::default());
        store.set(LEGACY_LEFT_KEY, json!(12.5));
        store.set(LEGACY_TOP_KEY, json!(40.0));

        let scroll = ScrollPersistence::with_debounce(store, Duration::from_millis(50));
        assert_eq!(scroll.load(), Some((12.5, 40.0)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_malformed_state_reads_as_none() {
        let store = Arc::new(MemoryConfigStore::default());
        store.set(BOARD_SCROLL_KEY, json!("not a scroll state"));

        let scroll = ScrollPersistence::with_debounce(store, Duration::from_millis(50));
        assert_eq!(scroll.load(), None);
    }
}
