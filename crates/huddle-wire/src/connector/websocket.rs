// huddle/huddle-wire
//
// Copyright: 2026, Huddle Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use futures::stream::StreamExt;
use futures::SinkExt;
use tokio::sync::mpsc;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::{task, time};
use tokio_tungstenite::tungstenite::protocol::frame::coding::CloseCode;
use tokio_tungstenite::tungstenite::Message as WsMessage;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tracing::{error, warn};
use url::Url;

use crate::connector::{
    Connection as ConnectionTrait, ConnectionError, ConnectionEvent, ConnectionEventHandler,
    Connector as ConnectorTrait, ConnectorProvider,
};
use crate::envelope::Envelope;

const TIMEOUT_INTERVAL: Duration = Duration::from_secs(1);

pub struct Connector {}

impl Connector {
    pub fn provider() -> ConnectorProvider {
        Box::new(|| Box::new(Connector {}))
    }
}

#[async_trait]
impl ConnectorTrait for Connector {
    async fn connect(
        &self,
        url: &Url,
        event_handler: ConnectionEventHandler,
    ) -> Result<Box<dyn ConnectionTrait>, ConnectionError> {
        let (stream, _) = connect_async(url.as_str())
            .await
            .map_err(|err| ConnectionError::Generic {
                msg: err.to_string(),
            })?;

        Ok(Box::new(Connection::new(stream, event_handler)) as Box<dyn ConnectionTrait>)
    }
}

#[derive(Debug)]
enum Command {
    Envelope(Envelope),
    Close,
}

pub struct Connection {
    sender: Arc<UnboundedSender<Command>>,
    _stream_read_handle: Option<JoinHandle<()>>,
    _stream_write_handle: Option<JoinHandle<()>>,
    _timeout_handle: Option<JoinHandle<()>>,
}

impl Connection {
    fn new(
        stream: WebSocketStream<MaybeTlsStream<tokio::net::TcpStream>>,
        event_handler: ConnectionEventHandler,
    ) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let sender = Arc::new(tx);

        let (mut writer, mut reader) = stream.split();
        let event_handler = Arc::new(event_handler);

        let read_handle = {
            let event_handler = event_handler.clone();

            task::spawn(async move {
                let mut close_reported = false;

                while let Some(message) = reader.next().await {
                    match message {
                        Ok(WsMessage::Text(text)) => match Envelope::from_json(&text) {
                            Ok(envelope) => {
                                (event_handler)(ConnectionEvent::Envelope(envelope)).await;
                            }
                            Err(err) => {
                                // A single bad frame never terminates the
                                // session.
                                warn!("Dropping malformed frame: {err}");
                            }
                        },
                        Ok(WsMessage::Close(frame)) => {
                            let clean = frame
                                .map(|frame| {
                                    matches!(frame.code, CloseCode::Normal | CloseCode::Away)
                                })
                                .unwrap_or(false);
                            (event_handler)(ConnectionEvent::Disconnected { error: None, clean })
                                .await;
                            close_reported = true;
                            break;
                        }
                        Ok(_) => (),
                        Err(err) => {
                            (event_handler)(ConnectionEvent::Disconnected {
                                error: Some(ConnectionError::Generic {
                                    msg: err.to_string(),
                                }),
                                clean: false,
                            })
                            .await;
                            close_reported = true;
                            break;
                        }
                    }
                }

                if !close_reported {
                    (event_handler)(ConnectionEvent::Disconnected {
                        error: None,
                        clean: false,
                    })
                    .await;
                }
            })
        };

        let write_handle = task::spawn(async move {
            while let Some(command) = rx.recv().await {
                let message = match command {
                    Command::Envelope(envelope) => match envelope.to_json() {
                        Ok(json) => WsMessage::Text(json),
                        Err(err) => {
                            error!("Failed to encode envelope: {err}");
                            continue;
                        }
                    },
                    Command::Close => WsMessage::Close(None),
                };

                let is_close = matches!(message, WsMessage::Close(_));
                if let Err(err) = writer.send(message).await {
                    error!("Cannot write frame to socket: {err}");
                    break;
                }
                if is_close {
                    break;
                }
            }
        });

        let timeout_handle = {
            let event_handler = event_handler.clone();

            task::spawn(async move {
                let mut interval = time::interval(TIMEOUT_INTERVAL);

                loop {
                    interval.tick().await;
                    let fut = (event_handler)(ConnectionEvent::TimeoutTimer);
                    task::spawn(async move { fut.await });
                }
            })
        };

        Connection {
            sender,
            _stream_read_handle: Some(read_handle),
            _stream_write_handle: Some(write_handle),
            _timeout_handle: Some(timeout_handle),
        }
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        if let Some(handle) = self._timeout_handle.take() {
            handle.abort();
        }
    }
}

impl ConnectionTrait for Connection {
    fn send(&self, envelope: Envelope) -> Result<()> {
        self.sender.send(Command::Envelope(envelope))?;
        Ok(())
    }

    fn disconnect(&self) {
        let _ = self.sender.send(Command::Close);
    }
}
