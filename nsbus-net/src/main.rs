//! nsbus TCP server - main entry point.
//!
//! Builds one bus, registers the default root handlers (accept every
//! connection, log every event), wraps it in the TCP adapter and serves.

use clap::Parser;
use nsbus::{Bus, Signal, handler_fn};
use nsbus_net::{IoServer, NetBus, NetEvent, ns, observability};
use serde_json::Value;
use std::net::SocketAddr;

#[derive(Parser, Debug)]
#[command(name = "nsbus-server", about = "Namespace-scoped dispatch bus over TCP")]
struct Args {
    /// Address to listen on.
    #[arg(long, env = "NSBUS_LISTEN", default_value = "127.0.0.1:5000")]
    listen: SocketAddr,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    observability::init_tracing();

    let mut bus: NetBus = Bus::new();

    // Accept every inbound connection.
    bus.add_handler(
        ns::CONNECTION,
        handler_fn(|_ns, _event: &mut NetEvent| Signal::Resolve(Value::Bool(true))),
    );

    // Acknowledge every application-level event.
    bus.add_handler(
        ns::MESSAGE,
        handler_fn(|_ns, event: &mut NetEvent| {
            if let NetEvent::Message(envelope) = event {
                tracing::info!(
                    socket_id = envelope.socket_id,
                    nsp = %envelope.nsp,
                    event = %envelope.event,
                    args = envelope.args.len(),
                    "event received"
                );
            }
            Signal::Resolve(Value::Null)
        }),
    );

    let server = IoServer::bind(args.listen, bus).await?;
    server.serve().await?;
    Ok(())
}
