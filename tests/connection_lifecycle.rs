//! Integration tests for IRC connection lifecycle.
//!
//! Tests the complete flow of connecting, registering, and disconnecting from the server.

mod common;

use std::time::Duration;

use common::client::numeric;
use common::{TestClient, TestServer};
use logos_ircd::ServerError;

#[tokio::test]
async fn test_basic_registration() {
    let server = TestServer::start().await.expect("Failed to start test server");
    let mut client = TestClient::connect(&server.address(), "alice")
        .await
        .expect("Failed to connect");

    let burst = client.register().await.expect("Registration failed");
    let codes: Vec<_> = burst.iter().filter_map(|l| numeric(l)).collect();
    assert_eq!(codes, vec!["001", "002", "003", "004", "375", "372", "372", "376"]);
    assert_eq!(burst[0], ":logos-irc-server 001 alice :Welcome to Logos IRC Server");

    client.send_raw("PING test").await.unwrap();
    assert_eq!(client.recv().await.unwrap(), "PONG :test");

    server.stop().await;
}

#[tokio::test]
async fn test_bare_newlines_and_split_writes() {
    let server = TestServer::start().await.unwrap();
    let mut client = TestClient::connect(&server.address(), "alice").await.unwrap();

    client.send_bytes(b"\r\n\nNICK al").await.unwrap();
    client.send_bytes(b"ice\nUSER alice 0 * :Alice\r\n").await.unwrap();

    let first = client.recv().await.unwrap();
    assert_eq!(numeric(&first), Some("001"));

    server.stop().await;
}

#[tokio::test]
async fn test_commands_before_registration_are_ignored() {
    let server = TestServer::start().await.unwrap();
    let mut client = TestClient::connect(&server.address(), "alice").await.unwrap();

    client.send_raw("JOIN #general").await.unwrap();
    client.send_raw("MOTD").await.unwrap();
    client.send_raw("BOGUS verb").await.unwrap();
    client.expect_silence().await.unwrap();

    server.stop().await;
}

#[tokio::test]
async fn test_nick_collision() {
    let server = TestServer::start().await.unwrap();
    let mut alice = TestClient::connect(&server.address(), "alice").await.unwrap();
    alice.register().await.unwrap();

    let mut other = TestClient::connect(&server.address(), "ALICE").await.unwrap();
    other.send_raw("NICK ALICE").await.unwrap();
    assert_eq!(
        other.recv().await.unwrap(),
        ":logos-irc-server 433 * ALICE :Nickname is already in use"
    );

    server.stop().await;
}

#[tokio::test]
async fn test_quit_notifies_peers_and_closes() {
    let server = TestServer::start().await.unwrap();
    let mut alice = TestClient::connect(&server.address(), "alice").await.unwrap();
    let mut bob = TestClient::connect(&server.address(), "bob").await.unwrap();
    alice.register().await.unwrap();
    bob.register().await.unwrap();
    alice.join("#x").await.unwrap();
    bob.join("#x").await.unwrap();
    alice.recv().await.unwrap(); // bob's JOIN

    alice.quit(Some("gone fishing")).await.unwrap();
    assert_eq!(
        bob.recv().await.unwrap(),
        ":alice!alice@127.0.0.1 QUIT :gone fishing"
    );
    alice.expect_closed().await.unwrap();

    server.stop().await;
}

#[tokio::test]
async fn test_abrupt_close_cleans_up_membership() {
    let server = TestServer::start().await.unwrap();
    let mut alice = TestClient::connect(&server.address(), "alice").await.unwrap();
    let mut bob = TestClient::connect(&server.address(), "bob").await.unwrap();
    alice.register().await.unwrap();
    bob.register().await.unwrap();
    alice.join("#x").await.unwrap();
    bob.join("#x").await.unwrap();
    drop(alice);

    // Disconnect handling is asynchronous to us; poll until alice is gone.
    let mut cleaned = false;
    for _ in 0..50 {
        bob.send_raw("WHO #x").await.unwrap();
        let lines = bob.recv_until(|l| numeric(l) == Some("315")).await.unwrap();
        if !lines.iter().any(|l| l.contains(" alice ")) {
            cleaned = true;
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    }
    assert!(cleaned, "alice still listed in #x");

    // No QUIT is announced for an abrupt close.
    bob.expect_silence().await.unwrap();

    server.stop().await;
}

#[tokio::test]
async fn test_stop_disconnects_everyone() {
    let server = TestServer::start().await.unwrap();
    let mut alice = TestClient::connect(&server.address(), "alice").await.unwrap();
    alice.register().await.unwrap();

    server.stop().await;
    alice.expect_closed().await.unwrap();

    assert!(!server.handle.is_running());
    assert!(matches!(
        server.handle.inject_bridge_message("#general", "x", "y"),
        Err(ServerError::NotRunning)
    ));

    // Second stop is a no-op.
    server.stop().await;
}

#[tokio::test]
async fn test_stop_drops_client_that_stopped_reading() {
    const FLOOD: usize = 50_000;

    let server = TestServer::start().await.unwrap();
    let mut slow = TestClient::connect(&server.address(), "slow").await.unwrap();
    slow.register().await.unwrap();
    slow.join("#flood").await.unwrap();

    let mut fast = TestClient::connect(&server.address(), "fast").await.unwrap();
    fast.register().await.unwrap();
    fast.join("#flood").await.unwrap();
    slow.recv().await.unwrap(); // fast's JOIN

    // slow never reads from here on; the fan-out backs up behind its socket.
    let line = format!("PRIVMSG #flood :{}\r\n", "x".repeat(400));
    let flood = line.repeat(FLOOD);
    fast.send_bytes(flood.as_bytes()).await.unwrap();

    // Lines from one client are handled in order, so the PONG means the
    // whole flood has been queued for slow.
    fast.send_raw("PING sync").await.unwrap();
    assert_eq!(fast.recv_timeout(Duration::from_secs(30)).await.unwrap(), "PONG :sync");

    tokio::time::timeout(Duration::from_secs(5), server.stop())
        .await
        .expect("stop hung on a stalled client");

    let seen = slow.drain_until_closed(Duration::from_secs(30)).await.unwrap();
    assert!(seen < FLOOD, "queued lines were still delivered after stop ({seen})");
}
