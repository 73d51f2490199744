//! Event types crossing the transport/bus boundary.

use nsbus::Bus;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::net::SocketAddr;
use std::sync::Weak;

/// Namespaces the adapter dispatches under.
pub mod ns {
    /// Dispatched once per accepted socket.
    pub const CONNECTION: &str = "io.connection";
    /// Dispatched once per inbound application-level event.
    pub const MESSAGE: &str = "io.message";
}

/// The bus type the adapter drives: network events in, JSON values out.
pub type NetBus = Bus<NetEvent, Value>;

/// A network-originated dispatch payload.
#[derive(Debug)]
pub enum NetEvent {
    /// An inbound connection awaiting acceptance.
    Connection(Connection),
    /// An application-level event read from an accepted socket.
    Message(Envelope),
}

/// Context for one inbound connection.
pub struct Connection {
    /// Adapter-assigned socket id, unique per server instance.
    pub socket_id: u64,
    /// Remote peer address.
    pub peer: SocketAddr,
    /// Handle to the owning bus, attached by the adapter's `io.connection`
    /// decorator before handler dispatch. Empty until then.
    pub bus: Weak<NetBus>,
}

impl std::fmt::Debug for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection")
            .field("socket_id", &self.socket_id)
            .field("peer", &self.peer)
            .field("bus_attached", &(self.bus.strong_count() > 0))
            .finish()
    }
}

/// Wire format of one frame: a newline-terminated JSON object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Frame {
    /// Logical sub-namespace of the event; defaults to `/`.
    #[serde(default = "default_nsp")]
    pub nsp: String,
    /// Event name.
    pub event: String,
    /// Event arguments.
    #[serde(default)]
    pub args: Vec<Value>,
}

fn default_nsp() -> String {
    "/".to_string()
}

/// An inbound frame stamped with its originating socket.
#[derive(Debug)]
pub struct Envelope {
    /// The socket the frame arrived on.
    pub socket_id: u64,
    /// Logical sub-namespace from the frame.
    pub nsp: String,
    /// Event name from the frame.
    pub event: String,
    /// Event arguments from the frame.
    pub args: Vec<Value>,
}

impl Envelope {
    /// Stamp a decoded frame with its socket id.
    pub fn from_frame(socket_id: u64, frame: Frame) -> Self {
        Self {
            socket_id,
            nsp: frame.nsp,
            event: frame.event,
            args: frame.args,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Frame;
    use serde_json::json;

    #[test]
    fn frame_decodes_with_defaults() {
        let frame: Frame = serde_json::from_str(r#"{"event":"ping"}"#).unwrap();
        assert_eq!(frame.nsp, "/");
        assert_eq!(frame.event, "ping");
        assert!(frame.args.is_empty());
    }

    #[test]
    fn frame_decodes_full() {
        let frame: Frame =
            serde_json::from_str(r#"{"nsp":"/chat","event":"say","args":["hi",1]}"#).unwrap();
        assert_eq!(frame.nsp, "/chat");
        assert_eq!(frame.event, "say");
        assert_eq!(frame.args, vec![json!("hi"), json!(1)]);
    }

    #[test]
    fn frame_without_event_is_rejected() {
        assert!(serde_json::from_str::<Frame>(r#"{"nsp":"/"}"#).is_err());
    }
}
