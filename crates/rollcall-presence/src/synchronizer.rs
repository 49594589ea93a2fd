//! The presence worker: one task, one socket, one set.

use std::time::Duration;

use futures_util::StreamExt;
use rollcall_protocol::{PresenceSet, PresenceSnapshot, UserKey};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tokio_util::sync::CancellationToken;

use crate::{LinkState, PresenceError};

type WsStream = WebSocketStream<MaybeTlsStream<tokio::net::TcpStream>>;

// ---------------------------------------------------------------------------
// PresenceConfig
// ---------------------------------------------------------------------------

/// Configuration for the presence link.
#[derive(Debug, Clone)]
pub struct PresenceConfig {
    /// How long to wait after a close or failed attempt before
    /// reconnecting. The cadence is fixed — no backoff growth and no
    /// retry cap, so an unreachable feed is retried at this interval
    /// until the synchronizer is shut down.
    ///
    /// Default: 3 seconds.
    pub retry_delay: Duration,
}

impl Default for PresenceConfig {
    fn default() -> Self {
        Self {
            retry_delay: Duration::from_secs(3),
        }
    }
}

// ---------------------------------------------------------------------------
// PresenceSynchronizer
// ---------------------------------------------------------------------------

/// Owns the live presence feed for one user key.
///
/// Created with [`connect`](Self::connect), which spawns a single worker
/// task. The worker holds the socket and is the only writer to the
/// published [`PresenceSet`]; everything else observes through watch
/// receivers. Snapshots are applied in arrival order and each one
/// replaces the set wholesale — there is no merging and no coalescing.
///
/// Dropping the synchronizer cancels the worker without waiting for it;
/// call [`shutdown`](Self::shutdown) to be certain the socket closed
/// before proceeding.
pub struct PresenceSynchronizer {
    presence_rx: watch::Receiver<PresenceSet>,
    link_rx: watch::Receiver<LinkState>,
    cancel: CancellationToken,
    worker: JoinHandle<()>,
}

impl PresenceSynchronizer {
    /// Opens the feed for `key`, connecting to `endpoint` + key.
    ///
    /// `endpoint` is the fully-resolved feed URL prefix (for example
    /// `ws://backend:8080/presence/`); the derived key is the final path
    /// segment. Returns immediately — connection happens on the worker,
    /// and failures there feed the retry loop, not this call.
    ///
    /// # Errors
    /// [`PresenceError::MissingKey`] if `key` is empty — an anonymous
    /// session has no feed to follow.
    pub fn connect(
        endpoint: &str,
        key: &UserKey,
        config: PresenceConfig,
    ) -> Result<Self, PresenceError> {
        if key.is_empty() {
            return Err(PresenceError::MissingKey);
        }

        let url = format!("{endpoint}{key}");
        let (presence_tx, presence_rx) = watch::channel(PresenceSet::new());
        let (link_tx, link_rx) = watch::channel(LinkState::Disconnected);
        let cancel = CancellationToken::new();

        let worker = tokio::spawn(run(
            url,
            config,
            presence_tx,
            link_tx,
            cancel.clone(),
        ));

        Ok(Self {
            presence_rx,
            link_rx,
            cancel,
            worker,
        })
    }

    /// A receiver for the online set. Starts empty; yields a new value
    /// for every applied snapshot.
    pub fn presence(&self) -> watch::Receiver<PresenceSet> {
        self.presence_rx.clone()
    }

    /// A receiver for the link's lifecycle state.
    pub fn link(&self) -> watch::Receiver<LinkState> {
        self.link_rx.clone()
    }

    /// Tears the feed down: closes the socket if open, cancels a
    /// pending reconnect, and waits for the worker to finish.
    ///
    /// After this returns, no further [`PresenceSet`] mutation and no
    /// reconnect attempt can occur — a stale identity key cannot keep a
    /// retry loop alive in the background.
    ///
    /// # Errors
    /// [`PresenceError::Worker`] if the worker task panicked.
    pub async fn shutdown(mut self) -> Result<(), PresenceError> {
        self.cancel.cancel();
        (&mut self.worker).await?;
        Ok(())
    }
}

/// Cancellation must not depend on the owner remembering `shutdown` —
/// a dropped synchronizer would otherwise leave a reconnect loop
/// running against a stale key forever.
impl Drop for PresenceSynchronizer {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

// ---------------------------------------------------------------------------
// Worker
// ---------------------------------------------------------------------------

/// Why one connection's read loop ended.
enum SessionEnd {
    /// The server closed, the socket errored, or the stream ended.
    /// The retry loop takes over.
    Closed,
    /// Teardown was requested. The worker exits.
    Cancelled,
}

async fn run(
    url: String,
    config: PresenceConfig,
    presence_tx: watch::Sender<PresenceSet>,
    link_tx: watch::Sender<LinkState>,
    cancel: CancellationToken,
) {
    loop {
        link_tx.send_replace(LinkState::Connecting);

        let attempt = tokio::select! {
            attempt = connect_async(&url) => attempt,
            _ = cancel.cancelled() => {
                link_tx.send_replace(LinkState::Disconnected);
                return;
            }
        };

        match attempt {
            Ok((ws, _)) => {
                link_tx.send_replace(LinkState::Connected);
                tracing::info!(%url, "presence link established");

                if let SessionEnd::Cancelled =
                    read_snapshots(ws, &presence_tx, &cancel).await
                {
                    link_tx.send_replace(LinkState::Disconnected);
                    return;
                }
            }
            Err(error) => {
                tracing::warn!(%error, "presence connect failed");
            }
        }

        link_tx.send_replace(LinkState::Disconnected);
        tracing::debug!(
            delay_ms = config.retry_delay.as_millis() as u64,
            "presence reconnect scheduled"
        );

        tokio::select! {
            _ = tokio::time::sleep(config.retry_delay) => {}
            _ = cancel.cancelled() => return,
        }
    }
}

/// Reads one connection until it ends or teardown is requested.
async fn read_snapshots(
    mut ws: WsStream,
    presence_tx: &watch::Sender<PresenceSet>,
    cancel: &CancellationToken,
) -> SessionEnd {
    loop {
        let inbound = tokio::select! {
            inbound = ws.next() => inbound,
            _ = cancel.cancelled() => {
                let _ = ws.close(None).await;
                return SessionEnd::Cancelled;
            }
        };

        match inbound {
            Some(Ok(Message::Text(text))) => {
                match PresenceSnapshot::decode(text.as_str()) {
                    Ok(snapshot) => {
                        let set = snapshot.into_set();
                        tracing::debug!(
                            online = set.len(),
                            "presence snapshot applied"
                        );
                        presence_tx.send_replace(set);
                    }
                    // Bad message, good connection: drop it, keep the
                    // previous set, stay on this socket.
                    Err(error) => {
                        tracing::warn!(
                            %error,
                            "dropping malformed presence message"
                        );
                    }
                }
            }
            // Control frames and binary payloads carry no snapshots.
            Some(Ok(Message::Ping(_) | Message::Pong(_))) => continue,
            Some(Ok(Message::Close(_))) => {
                tracing::info!("presence link closed by server");
                return SessionEnd::Closed;
            }
            Some(Ok(_)) => continue,
            Some(Err(error)) => {
                tracing::warn!(%error, "presence link error");
                return SessionEnd::Closed;
            }
            None => {
                tracing::info!("presence link ended");
                return SessionEnd::Closed;
            }
        }
    }
}
