//! WebSocket transport.
//!
//! One task per connection pumps frames; a single dispatch task owns
//! the [`LobbyManager`] and every writer handle, so all routing
//! decisions are made on one thread without locks.

use std::collections::HashMap;

use futures::{SinkExt, StreamExt};
use log::{info, warn};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message;

use horde_shared::RelayMessage;

use crate::lobby::{ConnId, LobbyManager};

enum Event {
    Connected(ConnId, mpsc::UnboundedSender<RelayMessage>),
    Inbound(ConnId, RelayMessage),
    Disconnected(ConnId),
}

pub async fn run(port: u16) -> std::io::Result<()> {
    let listener = TcpListener::bind(("0.0.0.0", port)).await?;
    info!("Relay listening on port {}", port);

    let (events_tx, events_rx) = mpsc::unbounded_channel();
    tokio::spawn(dispatch(events_rx));

    let mut next_id: ConnId = 1;
    loop {
        let (stream, addr) = listener.accept().await?;
        let id = next_id;
        next_id += 1;
        info!("Connection {} from {}", id, addr);
        tokio::spawn(handle_connection(id, stream, events_tx.clone()));
    }
}

async fn dispatch(mut events: mpsc::UnboundedReceiver<Event>) {
    let mut manager = LobbyManager::new();
    let mut senders: HashMap<ConnId, mpsc::UnboundedSender<RelayMessage>> = HashMap::new();

    while let Some(event) = events.recv().await {
        let outbox = match event {
            Event::Connected(id, sender) => {
                senders.insert(id, sender);
                Vec::new()
            }
            Event::Inbound(id, message) => manager.handle(id, message),
            Event::Disconnected(id) => {
                senders.remove(&id);
                info!("Connection {} closed", id);
                manager.disconnect(id)
            }
        };

        for (target, message) in outbox {
            if let Some(sender) = senders.get(&target) {
                // A failed send means the connection is tearing down;
                // its Disconnected event will clean up
                let _ = sender.send(message);
            }
        }
    }
}

async fn handle_connection(
    id: ConnId,
    stream: TcpStream,
    events: mpsc::UnboundedSender<Event>,
) {
    let ws = match tokio_tungstenite::accept_async(stream).await {
        Ok(ws) => ws,
        Err(err) => {
            warn!("Connection {}: handshake failed: {}", id, err);
            return;
        }
    };
    let (mut write, mut read) = ws.split();

    let (sender, mut outbound) = mpsc::unbounded_channel::<RelayMessage>();
    if events.send(Event::Connected(id, sender)).is_err() {
        return;
    }

    let writer = tokio::spawn(async move {
        while let Some(message) = outbound.recv().await {
            if write.send(Message::Text(message.to_json())).await.is_err() {
                break;
            }
        }
    });

    while let Some(frame) = read.next().await {
        match frame {
            Ok(Message::Text(text)) => match RelayMessage::from_json(&text) {
                Ok(message) => {
                    if events.send(Event::Inbound(id, message)).is_err() {
                        break;
                    }
                }
                Err(err) => warn!("Connection {}: dropping malformed frame: {}", id, err),
            },
            Ok(Message::Close(_)) => break,
            Ok(_) => {}
            Err(err) => {
                warn!("Connection {}: read error: {}", id, err);
                break;
            }
        }
    }

    let _ = events.send(Event::Disconnected(id));
    writer.abort();
}
