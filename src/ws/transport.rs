//! Connection transport
//!
//! One WebSocket connection per subscription, owned by a spawned read-loop
//! task. Decoded events come back through a bounded channel wrapped in
//! [`EventStream`]; the channel bound is what backpressures the read loop
//! (and, transitively, the socket) when the consumer is slow.
//!
//! Lifecycle: the stream ends when the socket closes, a terminal error is
//! reported, or the caller cancels. Decode errors are yielded as `Err`
//! items without ending the stream; connection errors are yielded once and
//! end it. Reconnection is deliberately left to the caller (resubscribe).

use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;

use futures_util::{SinkExt, Stream, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio::time::{interval_at, Instant};
use tokio_tungstenite::tungstenite::{Bytes, Message};
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::config::WsConfig;
use crate::error::{ConnectorError, Result};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// A live subscription: a stream of decoded events plus its cancellation
/// handle.
///
/// Implements [`futures_util::Stream`] with `Item = Result<T>`. The stream
/// ending (`None`) is the "done" signal; [`EventStream::cancel`] (or
/// cancelling a token obtained from [`EventStream::cancellation_token`])
/// is the "stop" signal. Dropping the stream also cancels, so an abandoned
/// subscription cannot leak its task or socket.
pub struct EventStream<T> {
    events: mpsc::Receiver<Result<T>>,
    cancel: CancellationToken,
}

impl<T> EventStream<T> {
    /// Receive the next event, `None` once the subscription has ended.
    pub async fn recv(&mut self) -> Option<Result<T>> {
        self.events.recv().await
    }

    /// Request cancellation. The read loop observes it within one
    /// iteration, even while parked on a full delivery buffer, and closes
    /// the socket; events already buffered are still delivered.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// A token that cancels this subscription, for composing with other
    /// shutdown signals.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }
}

impl<T> Stream for EventStream<T> {
    type Item = Result<T>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.get_mut().events.poll_recv(cx)
    }
}

impl<T> Drop for EventStream<T> {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// Connect to `url` and spawn the read loop, decoding each raw text
/// payload with `decode`. Connection failures surface here, before any
/// task is spawned.
pub(crate) async fn subscribe<T, D>(url: String, config: &WsConfig, decode: D) -> Result<EventStream<T>>
where
    T: Send + 'static,
    D: Fn(&str) -> Result<T> + Send + 'static,
{
    info!(url = %url, "connecting to stream");
    let (socket, _) = connect_async(url.as_str()).await?;
    debug!(url = %url, "websocket connected");

    let (events_tx, events_rx) = mpsc::channel(config.event_buffer);
    let cancel = CancellationToken::new();
    let worker = ReadLoop {
        socket,
        events: events_tx,
        cancel: cancel.clone(),
        keepalive: config.keepalive,
        keepalive_interval: config.keepalive_interval,
        read_timeout: config.read_timeout,
        decode,
    };
    tokio::spawn(worker.run());

    Ok(EventStream {
        events: events_rx,
        cancel,
    })
}

struct ReadLoop<T, D> {
    socket: WsStream,
    events: mpsc::Sender<Result<T>>,
    cancel: CancellationToken,
    keepalive: bool,
    keepalive_interval: Duration,
    read_timeout: Duration,
    decode: D,
}

impl<T, D> ReadLoop<T, D>
where
    T: Send + 'static,
    D: Fn(&str) -> Result<T> + Send + 'static,
{
    async fn run(self) {
        let ReadLoop {
            socket,
            events,
            cancel,
            keepalive,
            keepalive_interval,
            read_timeout,
            decode,
        } = self;

        // All writes (keepalive pings, pong answers, close) happen in the
        // bodies of this one select loop, so the write half is never
        // contended.
        let (mut write, mut read) = socket.split();
        // A zero period would panic inside interval_at; treat it as
        // keepalive disabled when the field was set directly.
        let keepalive = keepalive && !keepalive_interval.is_zero();
        let ping_period = if keepalive {
            keepalive_interval
        } else {
            Duration::from_secs(3600)
        };
        let mut ping_timer = interval_at(Instant::now() + ping_period, ping_period);
        let deadline = tokio::time::sleep(read_timeout);
        tokio::pin!(deadline);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    debug!("cancellation requested, closing socket");
                    let _ = write.close().await;
                    break;
                }
                _ = &mut deadline => {
                    warn!(timeout = ?read_timeout, "connection silent past read deadline");
                    Self::deliver(&events, &cancel, Err(ConnectorError::ReadTimeout(read_timeout))).await;
                    let _ = write.close().await;
                    break;
                }
                _ = ping_timer.tick(), if keepalive => {
                    if let Err(e) = write.send(Message::Ping(Bytes::new())).await {
                        Self::deliver(&events, &cancel, Err(ConnectorError::Connection(e))).await;
                        break;
                    }
                    debug!("keepalive ping sent");
                }
                frame = read.next() => {
                    // Any inbound frame, control frames included, proves
                    // the connection is alive.
                    deadline.as_mut().reset(Instant::now() + read_timeout);
                    match frame {
                        None => {
                            debug!("socket closed by peer");
                            break;
                        }
                        Some(Err(e)) => {
                            Self::deliver(&events, &cancel, Err(ConnectorError::Connection(e))).await;
                            break;
                        }
                        Some(Ok(Message::Text(text))) => {
                            if !Self::deliver(&events, &cancel, decode(text.as_str())).await {
                                debug!("delivery stopped, closing socket");
                                let _ = write.close().await;
                                break;
                            }
                        }
                        Some(Ok(Message::Binary(payload))) => {
                            let text = String::from_utf8_lossy(&payload);
                            if !Self::deliver(&events, &cancel, decode(&text)).await {
                                debug!("delivery stopped, closing socket");
                                let _ = write.close().await;
                                break;
                            }
                        }
                        Some(Ok(Message::Ping(payload))) => {
                            if write.send(Message::Pong(payload)).await.is_err() {
                                warn!("failed to answer server ping");
                                break;
                            }
                        }
                        Some(Ok(Message::Pong(_))) => {
                            debug!("pong received");
                        }
                        Some(Ok(Message::Close(frame))) => {
                            info!(frame = ?frame, "close frame received");
                            break;
                        }
                        Some(Ok(Message::Frame(_))) => {
                            // Raw frames are handled inside tungstenite
                        }
                    }
                }
            }
        }
        debug!("read loop terminated");
    }

    /// Send one item, racing cancellation so a send parked on a full
    /// buffer cannot outlive a stop request. Returns false when delivery
    /// is no longer possible.
    async fn deliver(
        events: &mpsc::Sender<Result<T>>,
        cancel: &CancellationToken,
        item: Result<T>,
    ) -> bool {
        tokio::select! {
            sent = events.send(item) => sent.is_ok(),
            _ = cancel.cancelled() => false,
        }
    }
}
