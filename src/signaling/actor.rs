use std::collections::HashMap;

use tokio::sync::mpsc;
use tracing::{info, warn};

use super::messages::{ClientMessage, ServerMessage};
use super::types::{ConnId, OutboundMessage, Roles, Seat};

/// Greeting sent to every connection the relay accepts. Plain text, not JSON.
pub(crate) const GREETING: &str = "connected to the relay";

/// Commands sent to the router actor
pub(crate) enum RouterCommand {
    Connect {
        id: ConnId,
        tx: mpsc::UnboundedSender<OutboundMessage>,
    },
    Inbound {
        id: ConnId,
        payload: Vec<u8>,
    },
    Disconnect {
        id: ConnId,
    },
}

/// Owns the role assignment and the registry of live connections.
/// Only the actor task touches it, so every dispatch runs to completion
/// before the next command is taken — a declaration can never tear a
/// concurrent forward.
pub(crate) struct Router {
    conns: HashMap<ConnId, mpsc::UnboundedSender<OutboundMessage>>,
    roles: Roles,
}

impl Router {
    pub fn new() -> Self {
        Self {
            conns: HashMap::new(),
            roles: Roles::default(),
        }
    }

    pub fn on_connect(&mut self, id: ConnId, tx: mpsc::UnboundedSender<OutboundMessage>) {
        let _ = tx.send(OutboundMessage::new(GREETING));
        self.conns.insert(id, tx);
        info!("Connection {} registered", id);
    }

    pub fn on_message(&mut self, id: ConnId, payload: &[u8]) {
        let msg = match ClientMessage::parse(payload) {
            Ok(m) => m,
            Err(e) => {
                warn!("Unparseable payload from {}: {}", id, e);
                return;
            }
        };

        match msg {
            ClientMessage::Sender => {
                if let Some(tx) = self.conns.get(&id) {
                    self.roles.sender = Some(Seat { id, tx: tx.clone() });
                    info!("sender added: {}", id);
                }
            }

            ClientMessage::Receiver => {
                if let Some(tx) = self.conns.get(&id) {
                    self.roles.receiver = Some(Seat { id, tx: tx.clone() });
                    info!("receiver added: {}", id);
                }
            }

            ClientMessage::CreateOffer { sdp } => {
                // only the current sender may originate an offer
                if occupied_by(&self.roles.sender, id) {
                    info!("relaying offer");
                    relay(self.roles.receiver.as_ref(), &ServerMessage::CreateOffer { sdp });
                }
            }

            ClientMessage::CreateAnswer { sdp } => {
                if occupied_by(&self.roles.receiver, id) {
                    info!("relaying answer");
                    relay(self.roles.sender.as_ref(), &ServerMessage::CreateAnswer { sdp });
                }
            }

            ClientMessage::IceCandidate { candidate } => {
                let msg = ServerMessage::IceCandidate { candidate };
                if occupied_by(&self.roles.sender, id) {
                    info!("relaying ice candidate to receiver");
                    relay(self.roles.receiver.as_ref(), &msg);
                } else if occupied_by(&self.roles.receiver, id) {
                    info!("relaying ice candidate to sender");
                    relay(self.roles.sender.as_ref(), &msg);
                }
            }

            ClientMessage::Unknown => {}
        }
    }

    /// Role slots are not cleared: a stale seat's channel is closed, so
    /// relays to it degrade to no-ops until a new declaration overwrites
    /// the slot.
    pub fn on_disconnect(&mut self, id: ConnId) {
        self.conns.remove(&id);
        info!("Connection {} closed", id);
    }
}

fn occupied_by(slot: &Option<Seat>, id: ConnId) -> bool {
    slot.as_ref().is_some_and(|seat| seat.id == id)
}

/// Re-encode and send to the given seat, if any. Fire-and-forget: an
/// absent counterpart or a closed channel drops the message.
fn relay(seat: Option<&Seat>, msg: &ServerMessage) {
    if let Some(seat) = seat {
        let json =
            serde_json::to_string(msg).expect("ServerMessage serialization should never fail");
        let _ = seat.tx.send(OutboundMessage::from(json));
    }
}

pub(crate) async fn router_actor(mut rx: mpsc::Receiver<RouterCommand>) {
    let mut router = Router::new();

    while let Some(cmd) = rx.recv().await {
        match cmd {
            RouterCommand::Connect { id, tx } => router.on_connect(id, tx),
            RouterCommand::Inbound { id, payload } => router.on_message(id, &payload),
            RouterCommand::Disconnect { id } => router.on_disconnect(id),
        }
    }
}

/// Handle to communicate with the router actor
#[derive(Clone)]
pub struct RouterHandle {
    pub(crate) tx: mpsc::Sender<RouterCommand>,
}

impl RouterHandle {
    /// Register a newly accepted connection
    pub async fn connect(&self, id: ConnId, tx: mpsc::UnboundedSender<OutboundMessage>) {
        let _ = self.tx.send(RouterCommand::Connect { id, tx }).await;
    }

    /// Dispatch a raw payload received from a connection
    pub async fn inbound(&self, id: ConnId, payload: Vec<u8>) {
        let _ = self.tx.send(RouterCommand::Inbound { id, payload }).await;
    }

    /// Report that a connection is gone
    pub async fn disconnect(&self, id: ConnId) {
        let _ = self.tx.send(RouterCommand::Disconnect { id }).await;
    }
}
