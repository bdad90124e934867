//! Shared test infrastructure for client integration tests.

#![allow(dead_code)]

pub mod mocks;
pub mod server;

use stalync::EventClient;
use std::time::Duration;
use tokio::sync::mpsc;

pub use mocks::*;
pub use server::*;

/// One handler invocation: event name and message.
pub type Seen = (String, Option<String>);

/// Register a recording handler for each name and return the receiving end.
pub fn watch(client: &EventClient, names: &[&str]) -> mpsc::UnboundedReceiver<Seen> {
    let (tx, rx) = mpsc::unbounded_channel();
    for name in names {
        let tx = tx.clone();
        client
            .on_event(*name, move |name, msg| {
                let _ = tx.send((name.to_string(), msg.map(str::to_string)));
            })
            .unwrap();
    }
    rx
}

/// Wait for the next recorded event, failing the test after two seconds.
pub async fn next_event(rx: &mut mpsc::UnboundedReceiver<Seen>) -> Seen {
    tokio::time::timeout(Duration::from_secs(2), rx.recv())
        .await
        .expect("timed out waiting for event")
        .expect("event channel closed")
}

/// Assert nothing else arrives within a short window.
pub async fn assert_quiet<T: std::fmt::Debug>(rx: &mut mpsc::UnboundedReceiver<T>) {
    let extra = tokio::time::timeout(Duration::from_millis(100), rx.recv()).await;
    assert!(extra.is_err(), "unexpected item: {:?}", extra);
}
