//! TCP server — accept loop and per-socket read loop.

use crate::event::{Connection, Envelope, Frame, NetBus, NetEvent, ns};
use nsbus::decorator_fn;
use std::net::SocketAddr;
use std::sync::{
    Arc, Weak,
    atomic::{AtomicU64, Ordering},
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::net::{TcpListener, TcpStream};

/// TCP adapter wrapping a [`NetBus`].
///
/// Binding takes ownership of the bus: registration is closed from that point
/// on (the bus moves behind an `Arc`), matching the bus's setup-then-dispatch
/// lifecycle. `bind` also installs the adapter's own `io.connection`
/// decorator, which attaches a bus handle to each [`Connection`] before
/// handler dispatch.
pub struct IoServer {
    bus: Arc<NetBus>,
    listener: TcpListener,
    next_socket_id: AtomicU64,
}

impl IoServer {
    /// Bind `addr` and wrap `bus` for dispatch.
    pub async fn bind(addr: SocketAddr, mut bus: NetBus) -> std::io::Result<Self> {
        let bus = Arc::new_cyclic(|weak: &Weak<NetBus>| {
            let weak = weak.clone();
            bus.add_decorator(
                ns::CONNECTION,
                decorator_fn(move |_ns, event: &mut NetEvent, _completion| {
                    if let NetEvent::Connection(connection) = event {
                        connection.bus = weak.clone();
                    }
                    Ok(())
                }),
            );
            bus
        });

        let listener = TcpListener::bind(addr).await?;
        Ok(Self {
            bus,
            listener,
            next_socket_id: AtomicU64::new(1),
        })
    }

    /// The address the server is listening on.
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// A handle to the wrapped bus.
    pub fn bus(&self) -> Arc<NetBus> {
        self.bus.clone()
    }

    /// Run the accept loop until a fatal listener error occurs.
    pub async fn serve(self) -> std::io::Result<()> {
        tracing::info!(addr = %self.listener.local_addr()?, "listening");
        loop {
            let (stream, peer) = self.listener.accept().await?;
            let socket_id = self.next_socket_id.fetch_add(1, Ordering::Relaxed);
            let bus = self.bus.clone();
            tokio::spawn(async move {
                if let Err(err) = handle_socket(bus, stream, peer, socket_id).await {
                    tracing::warn!(%peer, socket_id, error = %err, "socket error");
                }
            });
        }
    }
}

/// Dispatch the connection, then read frames until the peer hangs up.
///
/// Returning (on refusal, EOF, or error) drops the stream, which closes the
/// socket.
async fn handle_socket(
    bus: Arc<NetBus>,
    stream: TcpStream,
    peer: SocketAddr,
    socket_id: u64,
) -> std::io::Result<()> {
    let connection = NetEvent::Connection(Connection {
        socket_id,
        peer,
        bus: Weak::new(),
    });
    if let Err(error) = bus.process(ns::CONNECTION, connection).await {
        tracing::debug!(%peer, socket_id, %error, "connection refused");
        return Ok(());
    }
    tracing::debug!(%peer, socket_id, "connection accepted");

    let mut lines = BufReader::new(stream).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let frame: Frame = match serde_json::from_str(&line) {
            Ok(frame) => frame,
            Err(error) => {
                tracing::debug!(socket_id, %error, "discarding malformed frame");
                continue;
            }
        };
        let envelope = Envelope::from_frame(socket_id, frame);
        if let Err(error) = bus.process(ns::MESSAGE, NetEvent::Message(envelope)).await {
            tracing::debug!(socket_id, %error, "event not handled");
        }
    }

    tracing::debug!(socket_id, "connection closed by peer");
    Ok(())
}
