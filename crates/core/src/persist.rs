//! Write-through persistence for the session.
//!
//! Saves are queued to a background writer task and applied in order, so
//! the controller never waits on storage. Storage failures are logged and
//! otherwise ignored; a session that cannot be restored starts fresh.

use cloak_storage::SessionStore;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};

use crate::session::Session;

pub const DEFAULT_SESSION_KEY: &str = "cloakState";

enum Command {
    Save(serde_json::Value),
    Remove,
    Flush(oneshot::Sender<()>),
}

#[derive(Clone)]
pub struct Persister {
    key: String,
    store: Option<Arc<dyn SessionStore>>,
    tx: Option<mpsc::UnboundedSender<Command>>,
}

impl Persister {
    /// Start the writer task for `store`. Must be called inside a Tokio
    /// runtime. The task exits once every clone of the persister is dropped.
    pub fn spawn(store: Arc<dyn SessionStore>, key: impl Into<String>) -> Self {
        let key = key.into();
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(run_writer(store.clone(), key.clone(), rx));
        Self {
            key,
            store: Some(store),
            tx: Some(tx),
        }
    }

    /// A persister that keeps nothing
    pub fn detached() -> Self {
        Self {
            key: DEFAULT_SESSION_KEY.to_string(),
            store: None,
            tx: None,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Read the stored session. Absent, unreadable or corrupt values all
    /// yield `None`.
    pub async fn load(&self) -> Option<Session> {
        let store = self.store.as_ref()?;
        let value = match store.get(&self.key).await {
            Ok(Some(value)) => value,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!("Failed to read stored session from {}: {}", store.name(), e);
                return None;
            }
        };
        match Session::from_stored(value) {
            Ok(session) => Some(session),
            Err(e) => {
                tracing::warn!("Stored session is corrupt, starting fresh: {}", e);
                None
            }
        }
    }

    /// Queue a save of `session`
    pub fn save(&self, session: &Session) {
        let Some(tx) = &self.tx else { return };
        match session.to_stored() {
            Ok(value) => {
                let _ = tx.send(Command::Save(value));
            }
            Err(e) => tracing::error!("Failed to serialize session: {}", e),
        }
    }

    /// Queue removal of the stored session
    pub fn clear(&self) {
        if let Some(tx) = &self.tx {
            let _ = tx.send(Command::Remove);
        }
    }

    /// Wait until every write queued so far has been applied
    pub async fn flush(&self) {
        let Some(tx) = &self.tx else { return };
        let (ack, done) = oneshot::channel();
        if tx.send(Command::Flush(ack)).is_ok() {
            let _ = done.await;
        }
    }
}

async fn run_writer(
    store: Arc<dyn SessionStore>,
    key: String,
    mut rx: mpsc::UnboundedReceiver<Command>,
) {
    while let Some(command) = rx.recv().await {
        match command {
            Command::Save(value) => {
                if let Err(e) = store.set(&key, value).await {
                    tracing::warn!("Failed to persist session to {}: {}", store.name(), e);
                }
            }
            Command::Remove => {
                if let Err(e) = store.remove(&key).await {
                    tracing::warn!("Failed to remove stored session from {}: {}", store.name(), e);
                }
            }
            Command::Flush(ack) => {
                let _ = ack.send(());
            }
        }
    }
    tracing::debug!("Session writer stopped");
}
