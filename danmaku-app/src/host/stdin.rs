//! Notification host reading JSON lines from stdin.
//!
//! Each line is a `NotificationEvent` (`{"sourceAppId": .., "title": ..,
//! "body": ..}`). The line `#disconnect` simulates the host revoking the
//! listener. End of input closes the host for good.

use std::sync::{Arc, Mutex};

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::{mpsc, watch};

use super::{HostError, ListenerSignal, NotificationHost};
use crate::notification::types::NotificationEvent;

const SESSION_CAPACITY: usize = 64;
const DISCONNECT_COMMAND: &str = "#disconnect";

type SessionSlot = Arc<Mutex<Option<mpsc::Sender<ListenerSignal>>>>;

pub struct StdinHost {
    session: SessionSlot,
    closed: watch::Receiver<bool>,
}

impl StdinHost {
    /// Start reading stdin. Must be called inside a tokio runtime.
    pub fn spawn() -> Self {
        let session: SessionSlot = Arc::new(Mutex::new(None));
        let (closed_tx, closed) = watch::channel(false);
        tokio::spawn(read_loop(session.clone(), closed_tx));
        Self { session, closed }
    }

    /// Resolves to `true` once stdin has reached end of input.
    pub fn closed(&self) -> watch::Receiver<bool> {
        self.closed.clone()
    }

    fn current_session(&self) -> Option<mpsc::Sender<ListenerSignal>> {
        self.session.lock().ok().and_then(|slot| slot.clone())
    }
}

impl NotificationHost for StdinHost {
    fn subscribe(&self) -> Result<mpsc::Receiver<ListenerSignal>, HostError> {
        if *self.closed.borrow() {
            return Err(HostError::Listener("stdin closed".into()));
        }
        let (tx, rx) = mpsc::channel(SESSION_CAPACITY);
        let _ = tx.try_send(ListenerSignal::Connected);
        let mut slot = self
            .session
            .lock()
            .map_err(|_| HostError::Listener("session lock poisoned".into()))?;
        *slot = Some(tx);
        Ok(rx)
    }

    fn unsubscribe(&self) {
        if let Ok(mut slot) = self.session.lock() {
            *slot = None;
        }
    }

    fn request_rebind(&self) -> Result<(), HostError> {
        tracing::info!("Rebind requested for stdin listener");
        if self.current_session().is_some() {
            self.unsubscribe();
        }
        Ok(())
    }
}

async fn read_loop(session: SessionSlot, closed_tx: watch::Sender<bool>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                tracing::warn!("stdin read failed: {e}");
                break;
            }
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let signal = if line == DISCONNECT_COMMAND {
            ListenerSignal::Disconnected
        } else {
            match serde_json::from_str::<NotificationEvent>(line) {
                Ok(event) => ListenerSignal::Posted(event),
                Err(e) => {
                    tracing::warn!("Skipping malformed notification line: {e}");
                    continue;
                }
            }
        };

        let tx = session.lock().ok().and_then(|slot| slot.clone());
        match tx {
            Some(tx) => {
                if tx.send(signal).await.is_err() {
                    tracing::debug!("Listener session gone, dropping signal");
                }
            }
            None => tracing::debug!("No listener session, dropping signal"),
        }
    }

    tracing::info!("stdin reached end of input");
    if let Ok(mut slot) = session.lock() {
        *slot = None;
    }
    let _ = closed_tx.send(true);
}
