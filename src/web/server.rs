//! WebSocket server answering JSON calculator requests.

use crate::api::handle_request;
use crate::config::GachaConfig;
use futures_util::{SinkExt, StreamExt};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::AsyncWriteExt;
use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::tungstenite::Message;

const USAGE: &str = "lootbox API: open a WebSocket and send JSON requests, e.g. \
{\"op\":\"calculate\",\"profile\":\"zodiac\",\"investment\":1000,\"method\":\"original\"}\n";

/// Start the web server on the given port
pub async fn start_web_server(port: u16, config: Arc<GachaConfig>) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;

    tracing::info!("API listening on ws://localhost:{}", port);

    loop {
        match listener.accept().await {
            Ok((stream, addr)) => {
                let config = Arc::clone(&config);
                tokio::spawn(async move {
                    if let Err(e) = handle_connection(stream, addr, config).await {
                        tracing::warn!("connection error from {}: {}", addr, e);
                    }
                });
            }
            Err(e) => {
                tracing::warn!("accept error: {}", e);
            }
        }
    }
}

/// Handle a single connection: plain GETs get a usage note, upgrades get the API.
async fn handle_connection(
    stream: TcpStream,
    addr: SocketAddr,
    config: Arc<GachaConfig>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut peek_buf = [0u8; 512];
    let n = stream.peek(&mut peek_buf).await?;
    let request = String::from_utf8_lossy(&peek_buf[..n]);

    if request.starts_with("GET") && !request.to_ascii_lowercase().contains("upgrade: websocket") {
        serve_usage(stream).await?;
        return Ok(());
    }

    let ws_stream = tokio_tungstenite::accept_async(stream).await?;
    tracing::debug!("WebSocket connection from: {}", addr);

    let (mut ws_sender, mut ws_receiver) = ws_stream.split();

    while let Some(msg) = ws_receiver.next().await {
        match msg {
            Ok(Message::Text(text)) => {
                let reply = handle_request(&config, &text);
                if ws_sender.send(Message::Text(reply)).await.is_err() {
                    break;
                }
            }
            Ok(Message::Ping(data)) => {
                let _ = ws_sender.send(Message::Pong(data)).await;
            }
            Ok(Message::Close(_)) => break,
            Err(_) => break,
            _ => {}
        }
    }

    tracing::debug!("WebSocket disconnected: {}", addr);
    Ok(())
}

async fn serve_usage(mut stream: TcpStream) -> std::io::Result<()> {
    let response = format!(
        "HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        USAGE.len(),
        USAGE
    );
    stream.write_all(response.as_bytes()).await?;
    Ok(())
}
