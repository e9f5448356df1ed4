//! Connection - drives the socket of one client.
//!
//! ```text
//!   socket ──LineCodec──▶ ServerEvent::Line ──▶ coordinator
//!   socket ◀──LineCodec── outbound queue ◀──── coordinator
//! ```
//!
//! The task ends when the peer closes, on an I/O error, when the
//! coordinator drops the client's transport after QUIT, or on server
//! shutdown. Lines already queued are flushed before the socket is shut
//! down, except on shutdown, where the socket is dropped at once even if
//! the peer has stopped reading.

use std::net::SocketAddr;
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use logos_irc_proto::LineCodec;
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio::time::timeout;
use tokio_util::codec::Framed;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use crate::server::ServerEvent;
use crate::state::ClientId;

/// Upper bound on the final flush after the session ends.
const CLOSE_TIMEOUT: Duration = Duration::from_secs(5);

/// A client connection handler.
pub struct Connection {
    id: ClientId,
    addr: SocketAddr,
    stream: TcpStream,
    outbound: mpsc::UnboundedReceiver<String>,
    events: mpsc::UnboundedSender<ServerEvent>,
    shutdown: CancellationToken,
}

impl Connection {
    pub fn new(
        id: ClientId,
        stream: TcpStream,
        addr: SocketAddr,
        outbound: mpsc::UnboundedReceiver<String>,
        events: mpsc::UnboundedSender<ServerEvent>,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            id,
            addr,
            stream,
            outbound,
            events,
            shutdown,
        }
    }

    /// Run the connection loop.
    #[instrument(skip(self), fields(client = %self.id, addr = %self.addr), name = "connection")]
    pub async fn run(self) {
        let Self {
            id,
            stream,
            mut outbound,
            events,
            shutdown,
            ..
        } = self;

        let (mut writer, mut reader) = Framed::new(stream, LineCodec::new()).split();

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => {
                    info!("Shutdown signal received - dropping client");
                    break;
                }

                // Inbound: complete, trimmed, non-empty lines in arrival order
                result = reader.next() => match result {
                    Some(Ok(line)) => {
                        debug!(raw = %line, "Received line");
                        if events.send(ServerEvent::Line { id, line }).is_err() {
                            break;
                        }
                    }
                    Some(Err(e)) => {
                        warn!(error = %e, "Read error");
                        break;
                    }
                    None => {
                        info!("Client disconnected");
                        break;
                    }
                },

                // Outbound: replies and fan-out queued by the coordinator
                queued = outbound.recv() => match queued {
                    Some(line) => {
                        // A peer that stops reading stalls the write; only
                        // shutdown gets us out of it.
                        let written = tokio::select! {
                            result = writer.send(line) => result,
                            _ = shutdown.cancelled() => break,
                        };
                        if let Err(e) = written {
                            warn!(error = %e, "Write error");
                            break;
                        }
                    }
                    None => {
                        debug!("Session closed by server");
                        break;
                    }
                },
            }
        }

        if !shutdown.is_cancelled() {
            tokio::select! {
                closed = timeout(CLOSE_TIMEOUT, writer.close()) => match closed {
                    Ok(Ok(())) => {}
                    Ok(Err(e)) => debug!(error = %e, "Error shutting down socket"),
                    Err(_) => debug!("Timed out flushing before close"),
                },
                _ = shutdown.cancelled() => {}
            }
        }
        // Ignored if the coordinator already stopped.
        let _ = events.send(ServerEvent::Closed { id });
    }
}
