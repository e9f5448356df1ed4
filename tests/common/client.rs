//! Test IRC client.
//!
//! Provides an IRC client for integration testing that can send commands
//! and assert on received lines.

use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, BufWriter};
use tokio::net::TcpStream;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::time::timeout;

/// A test IRC client.
pub struct TestClient {
    reader: BufReader<OwnedReadHalf>,
    writer: BufWriter<OwnedWriteHalf>,
    nick: String,
}

impl TestClient {
    /// Connect to a test server.
    pub async fn connect(address: &str, nick: &str) -> anyhow::Result<Self> {
        let stream = TcpStream::connect(address).await?;

        let (read_half, write_half) = stream.into_split();
        Ok(Self {
            reader: BufReader::new(read_half),
            writer: BufWriter::new(write_half),
            nick: nick.to_string(),
        })
    }

    #[allow(dead_code)]
    pub fn nick(&self) -> &str {
        &self.nick
    }

    /// Send raw bytes exactly as given.
    #[allow(dead_code)]
    pub async fn send_bytes(&mut self, bytes: &[u8]) -> anyhow::Result<()> {
        self.writer.write_all(bytes).await?;
        self.writer.flush().await?;
        Ok(())
    }

    /// Send a raw IRC line, appending `\r\n` if missing.
    pub async fn send_raw(&mut self, line: &str) -> anyhow::Result<()> {
        self.writer.write_all(line.as_bytes()).await?;
        if !line.ends_with('\n') {
            self.writer.write_all(b"\r\n").await?;
        }
        self.writer.flush().await?;
        Ok(())
    }

    /// Receive a single line (terminator stripped).
    pub async fn recv(&mut self) -> anyhow::Result<String> {
        self.recv_timeout(Duration::from_secs(5)).await
    }

    /// Receive a line with a timeout. Fails on EOF.
    pub async fn recv_timeout(&mut self, dur: Duration) -> anyhow::Result<String> {
        let mut line = String::new();
        let n = timeout(dur, self.reader.read_line(&mut line)).await??;
        if n == 0 {
            anyhow::bail!("connection closed");
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    /// Receive lines until the predicate matches; the match is included.
    pub async fn recv_until<F>(&mut self, mut predicate: F) -> anyhow::Result<Vec<String>>
    where
        F: FnMut(&str) -> bool,
    {
        let mut lines = Vec::new();
        loop {
            let line = self.recv().await?;
            let done = predicate(&line);
            lines.push(line);
            if done {
                break;
            }
        }
        Ok(lines)
    }

    /// Assert that nothing arrives within a short window.
    #[allow(dead_code)]
    pub async fn expect_silence(&mut self) -> anyhow::Result<()> {
        match self.recv_timeout(Duration::from_millis(200)).await {
            Ok(line) => anyhow::bail!("unexpected line: {line}"),
            Err(_) => Ok(()),
        }
    }

    /// Wait until the server closes the connection.
    #[allow(dead_code)]
    pub async fn expect_closed(&mut self) -> anyhow::Result<()> {
        loop {
            let mut line = String::new();
            let n = timeout(Duration::from_secs(5), self.reader.read_line(&mut line)).await??;
            if n == 0 {
                return Ok(());
            }
        }
    }

    /// Read everything still in flight until the server closes the
    /// connection, returning the number of lines seen. A reset counts as
    /// closed.
    #[allow(dead_code)]
    pub async fn drain_until_closed(&mut self, limit: Duration) -> anyhow::Result<usize> {
        let drain = async {
            let mut lines = 0;
            let mut buf = Vec::new();
            loop {
                buf.clear();
                match self.reader.read_until(b'\n', &mut buf).await {
                    Ok(0) => return Ok(lines),
                    Ok(_) => lines += 1,
                    Err(e) if e.kind() == std::io::ErrorKind::ConnectionReset => return Ok(lines),
                    Err(e) => return Err(anyhow::Error::from(e)),
                }
            }
        };
        timeout(limit, drain).await?
    }

    /// Register with the server (NICK + USER), consuming the welcome burst
    /// through end of MOTD. Returns the burst.
    pub async fn register(&mut self) -> anyhow::Result<Vec<String>> {
        let nick = self.nick.clone();
        self.send_raw(&format!("NICK {nick}")).await?;
        self.send_raw(&format!("USER {nick} 0 * :Test User {nick}")).await?;

        let burst = self.recv_until(|line| numeric(line) == Some("376")).await?;
        if !burst.iter().any(|line| numeric(line) == Some("001")) {
            anyhow::bail!("Registration failed: no RPL_WELCOME received");
        }
        Ok(burst)
    }

    /// Join a channel, consuming replies through end of NAMES.
    #[allow(dead_code)]
    pub async fn join(&mut self, channel: &str) -> anyhow::Result<Vec<String>> {
        self.send_raw(&format!("JOIN {channel}")).await?;
        self.recv_until(|line| numeric(line) == Some("366")).await
    }

    /// Send a PRIVMSG.
    #[allow(dead_code)]
    pub async fn privmsg(&mut self, target: &str, text: &str) -> anyhow::Result<()> {
        self.send_raw(&format!("PRIVMSG {target} :{text}")).await
    }

    /// Send QUIT.
    #[allow(dead_code)]
    pub async fn quit(&mut self, reason: Option<&str>) -> anyhow::Result<()> {
        match reason {
            Some(reason) => self.send_raw(&format!("QUIT :{reason}")).await,
            None => self.send_raw("QUIT").await,
        }
    }
}

/// The numeric of a server reply line, if it is one.
#[allow(dead_code)]
pub fn numeric(line: &str) -> Option<&str> {
    let mut tokens = line.split(' ');
    if line.starts_with(':') {
        tokens.next();
    }
    tokens
        .next()
        .filter(|t| t.len() == 3 && t.bytes().all(|b| b.is_ascii_digit()))
}
