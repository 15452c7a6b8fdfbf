use std::net::TcpStream;

use log::{debug, error, info};
use thiserror::Error;
use tungstenite::stream::MaybeTlsStream;
use tungstenite::{connect, Message, WebSocket};

use crate::remote::events::RegistrationMessage;

#[derive(Debug, Error)]
pub enum HostError {
    #[error("websocket error: {0}")]
    WebSocket(#[from] tungstenite::Error),
    #[error("cannot encode registration: {0}")]
    Json(#[from] serde_json::Error),
}

/// Why the event loop stopped.
#[derive(Debug, PartialEq, Eq)]
pub enum Closed {
    ByHost,
    ReadError(String),
}

/// Blocking WebSocket connection to the control-surface host.
pub struct HostSocket {
    socket: WebSocket<MaybeTlsStream<TcpStream>>,
}

impl HostSocket {
    pub fn connect(host: &str, port: u16) -> Result<Self, HostError> {
        let url = format!("ws://{}:{}", host, port);
        info!("Connecting to WebSocket on {}", url);
        let (socket, _response) = connect(url.as_str())?;
        Ok(HostSocket { socket })
    }

    /// Send the registration message; must come before anything else.
    pub fn register(&mut self, register_event: &str, plugin_uuid: &str) -> Result<(), HostError> {
        let msg = serde_json::to_string(&RegistrationMessage {
            event: register_event,
            uuid: plugin_uuid,
        })?;
        self.socket.send(Message::text(msg))?;
        info!("Plugin registered with event {}", register_event);
        Ok(())
    }

    /// Read messages until the host closes the connection or a read fails,
    /// handing every text payload to `on_message`.
    pub fn run<F>(&mut self, mut on_message: F) -> Closed
    where
        F: FnMut(&str),
    {
        loop {
            match self.socket.read() {
                Ok(Message::Text(text)) => on_message(text.as_str()),
                Ok(Message::Binary(data)) => match std::str::from_utf8(&data) {
                    Ok(text) => on_message(text),
                    Err(e) => debug!("Skipping non UTF-8 binary frame: {}", e),
                },
                Ok(Message::Close(frame)) => {
                    info!("Host closed the connection: {:?}", frame);
                    return Closed::ByHost;
                }
                Ok(_) => {}
                Err(tungstenite::Error::ConnectionClosed) | Err(tungstenite::Error::AlreadyClosed) => {
                    return Closed::ByHost;
                }
                Err(e) => {
                    error!("read: {}", e);
                    return Closed::ReadError(e.to_string());
                }
            }
        }
    }
}
