// The WebSocket <-> UDP/OSC bridge

use std::sync::Arc;

use anyhow::Result;
use axum::extract::ws::{Message, WebSocket};
use axum::extract::WebSocketUpgrade;
use axum::routing::get;
use axum::Router;
use futures::stream::StreamExt;
use futures::SinkExt;
use log::{info, warn};
use tokio::net::UdpSocket;
use tokio::sync::{broadcast, mpsc};

use super::envelope::Envelope;
use crate::config::RelayConfig;

const UDP_BUFFER_SIZE: usize = 4096;
const BROADCAST_CAPACITY: usize = 256;

/// Channels shared by all WebSocket connections: envelopes bound for
/// the OSC peer, and a fan-out of envelopes arriving from it.
struct RelayState {
    to_osc: mpsc::UnboundedSender<Envelope>,
    from_osc: broadcast::Sender<Envelope>,
}

/// Run the relay until the process is killed. Browser clients connect
/// over WebSocket and exchange JSON envelopes; the OSC peer talks UDP
/// on the configured ports. Either side may come and go freely.
pub async fn run(config: RelayConfig) -> Result<()> {
    let (to_osc_tx, to_osc_rx) = mpsc::unbounded_channel();
    let (from_osc_tx, _) = broadcast::channel(BROADCAST_CAPACITY);

    let send_socket = UdpSocket::bind("0.0.0.0:0").await?;
    tokio::spawn(pump_to_osc(send_socket, config.osc_send_addr(), to_osc_rx));

    let listen_addr = config.osc_listen_addr();
    let listen_socket = UdpSocket::bind(&listen_addr).await?;
    info!("listening for OSC on {listen_addr}");
    tokio::spawn(pump_from_osc(listen_socket, from_osc_tx.clone()));

    let state = Arc::new(RelayState {
        to_osc: to_osc_tx,
        from_osc: from_osc_tx,
    });

    let app = Router::new().route(
        "/ws",
        get({
            let state = Arc::clone(&state);
            move |ws| ws_handler(ws, state)
        }),
    );

    let addr = format!("0.0.0.0:{}", config.ws_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("relay accepting WebSocket clients on ws://{addr}/ws");
    axum::serve(listener, app).await?;
    Ok(())
}

/// Forward envelopes from WebSocket clients to the OSC peer
async fn pump_to_osc(
    socket: UdpSocket,
    target: String,
    mut rx: mpsc::UnboundedReceiver<Envelope>,
) {
    while let Some(envelope) = rx.recv().await {
        match envelope.encode() {
            Ok(bytes) => {
                if let Err(e) = socket.send_to(&bytes, &target).await {
                    warn!("failed to send OSC to {target}: {e}");
                }
            }
            Err(e) => warn!("failed to encode {}: {e}", envelope.address),
        }
    }
}

/// Decode incoming OSC datagrams and fan them out to all WebSocket
/// clients. Malformed datagrams are logged and dropped; the stream
/// carries on.
async fn pump_from_osc(socket: UdpSocket, tx: broadcast::Sender<Envelope>) {
    let mut buf = [0u8; UDP_BUFFER_SIZE];
    loop {
        let (len, peer) = match socket.recv_from(&mut buf).await {
            Ok(recv) => recv,
            Err(e) => {
                warn!("OSC receive error: {e}");
                continue;
            }
        };
        let packet = match rosc::decoder::decode_udp(&buf[..len]) {
            Ok((_, packet)) => packet,
            Err(e) => {
                warn!("dropping malformed OSC datagram from {peer}: {e}");
                continue;
            }
        };
        for envelope in Envelope::from_packet(packet) {
            // No connected clients is fine
            let _ = tx.send(envelope);
        }
    }
}

async fn ws_handler(ws: WebSocketUpgrade, state: Arc<RelayState>) -> axum::response::Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: Arc<RelayState>) {
    let (mut sender, mut receiver) = socket.split();
    let mut from_osc = state.from_osc.subscribe();

    // OSC -> this client
    let send_task = tokio::spawn(async move {
        loop {
            match from_osc.recv().await {
                Ok(envelope) => {
                    let Ok(json) = serde_json::to_string(&envelope) else {
                        continue;
                    };
                    if sender.send(Message::Text(json.into())).await.is_err() {
                        break;
                    }
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    warn!("slow WebSocket client, dropped {n} envelopes");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    });

    // This client -> OSC
    while let Some(Ok(msg)) = receiver.next().await {
        match msg {
            Message::Text(text) => {
                if let Some(envelope) = parse_client_frame(&text) {
                    if state.to_osc.send(envelope).is_err() {
                        break;
                    }
                }
            }
            Message::Close(_) => break,
            _ => {}
        }
    }

    send_task.abort();
}

/// Parse one JSON frame from a WebSocket client. Malformed frames are
/// logged and dropped so one bad client cannot stall the relay.
fn parse_client_frame(text: &str) -> Option<Envelope> {
    match serde_json::from_str(text) {
        Ok(envelope) => Some(envelope),
        Err(e) => {
            warn!("dropping malformed client frame: {e}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relay::envelope::{Arg, ADDR_POSE_LABEL};

    #[test]
    fn test_parse_valid_frame() {
        let envelope =
            parse_client_frame(r#"{"address":"/poseLabel","args":["walk_right"]}"#).unwrap();
        assert_eq!(envelope.address, ADDR_POSE_LABEL);
        assert_eq!(envelope.args, vec![Arg::Text("walk_right".to_string())]);
    }

    #[test]
    fn test_parse_numeric_args() {
        let envelope =
            parse_client_frame(r#"{"address":"/poseData","args":[0.5,0.25,300]}"#).unwrap();
        assert_eq!(
            envelope.args,
            vec![Arg::Number(0.5), Arg::Number(0.25), Arg::Number(300.0)]
        );
    }

    #[test]
    fn test_malformed_frames_are_dropped() {
        assert!(parse_client_frame("not json").is_none());
        assert!(parse_client_frame(r#"{"args":[]}"#).is_none());
        assert!(parse_client_frame(r#"{"address":42,"args":[]}"#).is_none());
    }
}
