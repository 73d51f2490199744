use nsbus::{Bus, Signal, handler_fn};
use nsbus_net::{IoServer, NetBus, NetEvent, ns};
use serde_json::Value;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio::time::timeout;

async fn start(bus: NetBus) -> SocketAddr {
    let server = IoServer::bind("127.0.0.1:0".parse().unwrap(), bus)
        .await
        .unwrap();
    let addr = server.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = server.serve().await;
    });
    addr
}

#[tokio::test]
async fn accepted_sockets_deliver_events_to_the_bus() {
    let (tx, mut rx) = mpsc::unbounded_channel::<(&'static str, String)>();

    let mut bus: NetBus = Bus::new();
    let conn_tx = tx.clone();
    bus.add_handler(
        ns::CONNECTION,
        handler_fn(move |_ns, event: &mut NetEvent| {
            if let NetEvent::Connection(connection) = event {
                // The adapter's decorator must have attached the bus handle.
                let attached = connection.bus.upgrade().is_some();
                let _ = conn_tx.send(("connection", attached.to_string()));
            }
            Signal::Resolve(Value::Bool(true))
        }),
    );
    let msg_tx = tx.clone();
    bus.add_handler(
        ns::MESSAGE,
        handler_fn(move |_ns, event: &mut NetEvent| {
            if let NetEvent::Message(envelope) = event {
                let _ = msg_tx.send((
                    "message",
                    format!(
                        "{}|{}|{}",
                        envelope.nsp,
                        envelope.event,
                        envelope.args.len()
                    ),
                ));
            }
            Signal::Resolve(Value::Null)
        }),
    );

    let addr = start(bus).await;
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream
        .write_all(b"{\"nsp\":\"/chat\",\"event\":\"say\",\"args\":[\"hi\"]}\n")
        .await
        .unwrap();
    // A malformed frame is discarded without killing the socket.
    stream.write_all(b"not json\n").await.unwrap();
    stream.write_all(b"{\"event\":\"ping\"}\n").await.unwrap();
    stream.flush().await.unwrap();

    let mut received = Vec::new();
    for _ in 0..3 {
        let next = timeout(Duration::from_secs(5), rx.recv())
            .await
            .expect("timed out waiting for a dispatched event")
            .expect("bus handler channel closed");
        received.push(next);
    }

    assert_eq!(
        received,
        [
            ("connection", "true".to_string()),
            ("message", "/chat|say|1".to_string()),
            ("message", "/|ping|0".to_string()),
        ]
    );
}

#[tokio::test]
async fn refused_sockets_are_closed() {
    let mut bus: NetBus = Bus::new();
    bus.add_handler(
        ns::CONNECTION,
        handler_fn(|_ns, _event: &mut NetEvent| Signal::<Value>::reject("not welcome")),
    );

    let addr = start(bus).await;
    let mut stream = TcpStream::connect(addr).await.unwrap();

    let mut buf = [0u8; 16];
    let read = timeout(Duration::from_secs(5), stream.read(&mut buf))
        .await
        .expect("server should close the refused socket")
        .unwrap();
    assert_eq!(read, 0, "expected EOF on a refused socket");
}

#[tokio::test]
async fn unmatched_connection_namespace_refuses_by_default() {
    // No io.connection handler registered at all: the chain is exhausted,
    // the outcome is an error, and the adapter closes the socket.
    let bus: NetBus = Bus::new();

    let addr = start(bus).await;
    let mut stream = TcpStream::connect(addr).await.unwrap();

    let mut buf = [0u8; 16];
    let read = timeout(Duration::from_secs(5), stream.read(&mut buf))
        .await
        .expect("server should close the socket")
        .unwrap();
    assert_eq!(read, 0);
}
