//! Gateway - TCP listener that accepts incoming connections.
//!
//! Each accepted socket gets a fresh [`ClientId`], an outbound queue and a
//! child of the shutdown token.
//! The coordinator learns about the client before the connection task
//! exists, so no line can ever arrive for an unknown id.

use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, instrument};

use crate::network::Connection;
use crate::server::ServerEvent;
use crate::state::ClientIdGenerator;

/// The Gateway accepts incoming TCP connections and spawns handlers.
pub struct Gateway {
    listener: TcpListener,
    events: mpsc::UnboundedSender<ServerEvent>,
    ids: ClientIdGenerator,
    shutdown: CancellationToken,
}

impl Gateway {
    pub fn new(
        listener: TcpListener,
        events: mpsc::UnboundedSender<ServerEvent>,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            listener,
            events,
            ids: ClientIdGenerator::new(),
            shutdown,
        }
    }

    /// Accept connections until shutdown; the listener closes on return.
    #[instrument(skip(self), name = "gateway")]
    pub async fn run(self) {
        loop {
            tokio::select! {
                _ = self.shutdown.cancelled() => {
                    info!("Listener closed");
                    break;
                }
                accepted = self.listener.accept() => match accepted {
                    Ok((stream, addr)) => {
                        let id = self.ids.next();
                        let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();

                        let event = ServerEvent::Accepted {
                            id,
                            addr,
                            outbound: outbound_tx,
                        };
                        if self.events.send(event).is_err() {
                            info!("Coordinator gone, closing listener");
                            break;
                        }

                        info!(client = %id, %addr, "Connection accepted");
                        let connection = Connection::new(
                            id,
                            stream,
                            addr,
                            outbound_rx,
                            self.events.clone(),
                            self.shutdown.child_token(),
                        );
                        tokio::spawn(connection.run());
                    }
                    Err(e) => {
                        error!(error = %e, "Failed to accept connection");
                    }
                },
            }
        }
    }
}
