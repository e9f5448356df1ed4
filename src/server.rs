//! Server coordinator and its public handle.
//!
//! One coordinator task owns the [`Matrix`] for the whole server lifetime
//! and applies [`ServerEvent`]s strictly one at a time. Connection tasks,
//! the gateway and bridge callers only ever enqueue events, so command
//! dispatch, disconnect cleanup and bridge injection never run
//! concurrently and each handler's fan-out completes before the next
//! event is looked at.

use std::net::SocketAddr;

use tokio::net::TcpListener;
use tokio::sync::{mpsc, oneshot};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use crate::bridge::{self, BridgeListener, relay::BridgeSink};
use crate::config::Config;
use crate::error::ServerError;
use crate::handlers::Registry;
use crate::network::Gateway;
use crate::state::{Client, ClientId, Matrix, Transport};

/// Everything the coordinator reacts to.
pub enum ServerEvent {
    /// A socket was accepted; lines for `id` follow on the same queue.
    Accepted {
        id: ClientId,
        addr: SocketAddr,
        outbound: mpsc::UnboundedSender<String>,
    },
    /// One complete, trimmed line from a client.
    Line { id: ClientId, line: String },
    /// The connection task ended.
    Closed { id: ClientId },
    /// A message from the external chat system.
    Inject {
        channel: String,
        nick: String,
        text: String,
    },
    Subscribe(Box<dyn BridgeListener>),
    Stop { done: oneshot::Sender<()> },
}

/// Entry point for starting a server.
pub struct Server;

impl Server {
    /// Bind the listener, create the bridge bot and start serving.
    ///
    /// Fails only if the listen address cannot be bound.
    pub async fn start(config: &Config) -> Result<ServerHandle, ServerError> {
        let addr = config.listen.address;
        let bind_error = |source| ServerError::Bind { addr, source };

        let listener = TcpListener::bind(addr).await.map_err(bind_error)?;
        let local_addr = listener.local_addr().map_err(bind_error)?;
        info!(%local_addr, server = %config.server.name, "Listener bound");

        let mut matrix = Matrix::new(config);
        bridge::create_bot(&mut matrix);

        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let shutdown = CancellationToken::new();

        let gateway = Gateway::new(listener, events_tx.clone(), shutdown.clone());
        tokio::spawn(gateway.run());

        let coordinator = Coordinator {
            matrix,
            registry: Registry::new(),
            events: events_rx,
            shutdown: shutdown.clone(),
        };
        tokio::spawn(coordinator.run());

        Ok(ServerHandle {
            local_addr,
            events: events_tx,
            shutdown,
        })
    }
}

/// Cloneable control surface for a running server.
#[derive(Clone)]
pub struct ServerHandle {
    local_addr: SocketAddr,
    events: mpsc::UnboundedSender<ServerEvent>,
    shutdown: CancellationToken,
}

impl ServerHandle {
    /// The address actually bound (resolves port 0).
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    pub fn is_running(&self) -> bool {
        !self.events.is_closed()
    }

    /// Deliver `text` to `channel` as if sent by `nick!bridge@waku.bridge`.
    ///
    /// Dropped with a log line if the channel does not exist.
    pub fn inject_bridge_message(
        &self,
        channel: impl Into<String>,
        nick: impl Into<String>,
        text: impl Into<String>,
    ) -> Result<(), ServerError> {
        self.send(ServerEvent::Inject {
            channel: channel.into(),
            nick: nick.into(),
            text: text.into(),
        })
    }

    /// Register a listener for channel-join and channel-message events.
    pub fn subscribe(&self, listener: impl BridgeListener + 'static) -> Result<(), ServerError> {
        self.send(ServerEvent::Subscribe(Box::new(listener)))
    }

    /// Close the listener, disconnect every client, clear all channels and
    /// remove the bridge bot. Returns once the coordinator has done so;
    /// calling it again is a no-op.
    pub async fn stop(&self) {
        self.shutdown.cancel();

        let (done_tx, done_rx) = oneshot::channel();
        if self.send(ServerEvent::Stop { done: done_tx }).is_err() {
            return;
        }
        // A dropped sender means another stop won the race.
        let _ = done_rx.await;
    }

    fn send(&self, event: ServerEvent) -> Result<(), ServerError> {
        self.events.send(event).map_err(|_| ServerError::NotRunning)
    }
}

impl BridgeSink for ServerHandle {
    fn inject(&self, channel: &str, nick: &str, text: &str) {
        if let Err(e) = self.inject_bridge_message(channel, nick, text) {
            warn!(channel = %channel, error = %e, "Bridge injection failed");
        }
    }
}

/// Exclusive owner of server state.
struct Coordinator {
    matrix: Matrix,
    registry: Registry,
    events: mpsc::UnboundedReceiver<ServerEvent>,
    shutdown: CancellationToken,
}

impl Coordinator {
    #[instrument(skip(self), name = "coordinator")]
    async fn run(mut self) {
        while let Some(event) = self.events.recv().await {
            match event {
                ServerEvent::Accepted { id, addr, outbound } => {
                    let client = Client::new(id, addr.ip().to_string(), Transport::new(outbound));
                    self.matrix.add_client(client);
                    debug!(client = %id, "Client added");
                }
                ServerEvent::Line { id, line } => {
                    self.registry.dispatch(&mut self.matrix, id, &line);
                }
                ServerEvent::Closed { id } => {
                    // Already gone after QUIT; no peer notification either way.
                    if let Some(client) = self.matrix.disconnect(id) {
                        info!(client = %id, nick = %client.nick, "Client disconnected");
                    }
                }
                ServerEvent::Inject { channel, nick, text } => {
                    bridge::inject_message(&self.matrix, &channel, &nick, &text);
                }
                ServerEvent::Subscribe(listener) => {
                    self.matrix.bridge.subscribe(listener);
                    let listeners = self.matrix.bridge.listener_count();
                    debug!(listeners, "Bridge listener added");
                }
                ServerEvent::Stop { done } => {
                    self.events.close();
                    self.stop();
                    let _ = done.send(());
                    return;
                }
            }
        }
    }

    fn stop(&mut self) {
        self.shutdown.cancel();
        bridge::remove_bot(&mut self.matrix);
        let clients = self.matrix.clients.len();
        self.matrix.clear();
        info!(clients, "Server stopped");
    }
}
