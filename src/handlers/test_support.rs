//! Transport-backed harness for handler tests.

use tokio::sync::mpsc;

use super::Registry;
use crate::bridge::{self, BridgeEvent};
use crate::config::Config;
use crate::state::{Client, ClientId, Matrix, Transport};

pub(crate) type Outbox = mpsc::UnboundedReceiver<String>;

pub(crate) struct Harness {
    pub matrix: Matrix,
    registry: Registry,
    next_id: u64,
}

impl Harness {
    /// Default config with the bridge bot in place.
    pub fn new() -> Self {
        Self::with_config(&Config::default())
    }

    pub fn with_config(config: &Config) -> Self {
        let mut matrix = Matrix::new(config);
        bridge::create_bot(&mut matrix);
        Self {
            matrix,
            registry: Registry::new(),
            next_id: 1,
        }
    }

    /// A fresh, unregistered connection.
    pub fn connect(&mut self) -> (ClientId, Outbox) {
        let (tx, rx) = mpsc::unbounded_channel();
        let id = ClientId::new(self.next_id);
        self.next_id += 1;
        self.matrix
            .add_client(Client::new(id, "127.0.0.1", Transport::new(tx)));
        (id, rx)
    }

    /// Connect and complete NICK/USER, discarding the welcome burst.
    pub fn register(&mut self, nick: &str) -> (ClientId, Outbox) {
        let (id, mut rx) = self.connect();
        self.line(id, &format!("NICK {nick}"));
        self.line(id, &format!("USER {nick} 0 * :{nick}"));
        Self::drain(&mut rx);
        (id, rx)
    }

    pub fn line(&mut self, id: ClientId, line: &str) {
        self.registry.dispatch(&mut self.matrix, id, line);
    }

    pub fn events(&mut self) -> mpsc::UnboundedReceiver<BridgeEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.matrix.bridge.subscribe(Box::new(tx));
        rx
    }

    pub fn drain(rx: &mut Outbox) -> Vec<String> {
        let mut lines = Vec::new();
        while let Ok(line) = rx.try_recv() {
            lines.push(line);
        }
        lines
    }

    /// The command or numeric of a formatted line.
    pub fn code(line: &str) -> &str {
        let mut tokens = line.split(' ');
        if line.starts_with(':') {
            tokens.next();
        }
        tokens.next().unwrap_or("")
    }
}
