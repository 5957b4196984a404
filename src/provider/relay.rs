use std::{
    collections::HashSet,
    fmt,
    sync::atomic::{AtomicU64, Ordering},
    time::Duration,
};

use async_trait::async_trait;
use futures::{future::join_all, SinkExt, StreamExt};
use tokio::{net::TcpStream, sync::Mutex, time::timeout};
use tokio_tungstenite::{
    connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream,
};
use tracing::{debug, info, warn};
use url::Url;

use super::EventSource;
use crate::{
    configuration::Config,
    error::Error,
    types::{close_frame, request_frame, Filter, RawEvent, RelayMessage},
};

type Socket = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Connections to the configured relays, shared by every request.
#[derive(Debug)]
pub struct RelayPool {
    relays: Vec<RelayConnection>,
    timeout: Duration,
    subscription_id: AtomicU64,
}

impl RelayPool {
    pub fn new(config: &Config) -> Result<Self, Error> {
        config.require_relay_settings()?;
        Self::with_relays(&config.relays, Duration::from_secs(config.timeout))
    }

    pub fn with_relays(urls: &[String], timeout: Duration) -> Result<Self, Error> {
        let mut relays = Vec::with_capacity(urls.len());

        for url in urls {
            Url::parse(url)?;
            relays.push(RelayConnection::new(url.to_owned()));
        }

        Ok(Self {
            relays,
            timeout,
            subscription_id: AtomicU64::new(1),
        })
    }

    fn next_subscription(&self) -> String {
        let id = self.subscription_id.fetch_add(1, Ordering::Relaxed);
        format!("lawallet-graph-{}", id)
    }

    async fn query_all(&self, filter: &Filter) -> Result<Vec<RawEvent>, Error> {
        if self.relays.is_empty() {
            return Err(Error::ConfigurationError(String::from(
                "no relays configured",
            )));
        }

        let queries = self.relays.iter().map(|relay| {
            let subscription = self.next_subscription();
            async move {
                let result = match timeout(self.timeout, relay.query(&subscription, filter))
                    .await
                {
                    Ok(result) => result,
                    Err(elapsed) => Err(Error::from(elapsed)),
                };
                (relay.url.as_str(), result)
            }
        });

        let mut events = vec![];
        let mut seen = HashSet::new();
        let mut first_error = None;
        let mut answered = 0;

        for (url, result) in join_all(queries).await {
            match result {
                Ok(items) => {
                    answered += 1;
                    debug!("Relay {} returned {} events", url, items.len());
                    for event in items {
                        if seen.insert(event.id.to_owned()) {
                            events.push(event);
                        }
                    }
                },
                Err(e) => {
                    warn!("Relay {} query failed: {}", url, e);
                    first_error.get_or_insert(e);
                },
            }
        }

        match first_error {
            Some(e) if answered == 0 => Err(e),
            _ => Ok(events),
        }
    }
}

#[async_trait]
impl EventSource for RelayPool {
    async fn fetch_events(&self, filter: &Filter) -> Result<Vec<RawEvent>, Error> {
        self.query_all(filter).await
    }
}

/// One relay socket, opened on first use and kept for later queries.
/// Queries on the same relay run one at a time.
struct RelayConnection {
    url: String,
    socket: Mutex<Option<Socket>>,
}

impl fmt::Debug for RelayConnection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RelayConnection")
            .field("url", &self.url)
            .finish()
    }
}

impl RelayConnection {
    fn new(url: String) -> Self {
        Self {
            url,
            socket: Mutex::new(None),
        }
    }

    async fn query(
        &self,
        subscription: &str,
        filter: &Filter,
    ) -> Result<Vec<RawEvent>, Error> {
        let mut guard = self.socket.lock().await;

        let mut socket = match guard.take() {
            Some(socket) => socket,
            None => {
                let (socket, _response) = connect_async(self.url.as_str()).await?;
                info!("Relay connected: {}", self.url);
                socket
            },
        };

        // The socket goes back into the slot only after a clean query, so
        // an error or a dropped future forces a reconnect next time.
        let events = self.collect(&mut socket, subscription, filter).await?;
        *guard = Some(socket);

        Ok(events)
    }

    async fn collect(
        &self,
        socket: &mut Socket,
        subscription: &str,
        filter: &Filter,
    ) -> Result<Vec<RawEvent>, Error> {
        socket
            .send(Message::Text(request_frame(subscription, filter)))
            .await?;

        let mut events = vec![];

        while let Some(message) = socket.next().await {
            let text = match message? {
                Message::Text(text) => text,
                Message::Close(_) => break,
                Message::Binary(_)
                | Message::Ping(_)
                | Message::Pong(_)
                | Message::Frame(_) => continue,
            };

            match RelayMessage::parse(&text) {
                Ok(RelayMessage::Event {
                    subscription: id,
                    event,
                }) if id == subscription => events.push(event),
                Ok(RelayMessage::EndOfStoredEvents { subscription: id })
                    if id == subscription =>
                {
                    socket.send(Message::Text(close_frame(subscription))).await?;
                    return Ok(events);
                },
                Ok(RelayMessage::Closed {
                    subscription: id,
                    message,
                }) if id == subscription => {
                    return Err(Error::RelayClosed {
                        relay: self.url.to_owned(),
                        message,
                    });
                },
                Ok(RelayMessage::Notice { message }) => {
                    warn!("Relay notice ({}): {}", self.url, message);
                },
                Ok(_) => {},
                Err(e) => warn!("Unreadable relay frame ({}): {}", self.url, e),
            }
        }

        Err(Error::Relay {
            relay: self.url.to_owned(),
            message: String::from("connection closed before end of stored events"),
        })
    }
}
