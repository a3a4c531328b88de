//! Minimal client for the DaZeus IRC bot core: subscribe to a command, receive it, reply.

mod address;
mod frame;

use serde::{Deserialize, Serialize};
use tokio::io::{AsyncRead, AsyncWrite, BufReader};
use tokio::net::{TcpStream, UnixStream};

pub use address::Address;
use frame::{read_message, write_message};

use crate::error::{Error, Result};

pub trait Stream: AsyncRead + AsyncWrite + Unpin + Send {}
impl<T: AsyncRead + AsyncWrite + Unpin + Send> Stream for T {}

#[derive(Serialize, Debug)]
struct Request<'a> {
    #[serde(rename = "do")]
    action: &'a str,
    params: Vec<&'a str>,
}

#[derive(Deserialize, Debug)]
#[serde(untagged)]
enum Incoming {
    Event {
        event: String,
        #[serde(default)]
        params: Vec<String>,
    },
    Response {
        did: Option<String>,
        success: Option<bool>,
        error: Option<String>,
    },
}

/// A command somebody typed, e.g. `}noms umc morgen`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandEvent {
    pub network: String,
    pub sender: String,
    pub channel: String,
    pub command: String,
    pub args: Vec<String>,
}

impl CommandEvent {
    /// Params are `[network, sender, channel, command, argline, arg...]`.
    fn from_params(params: Vec<String>) -> Result<Self> {
        let mut params = params.into_iter();
        let mut next = |what: &str| {
            params
                .next()
                .ok_or_else(|| Error::Protocol(format!("COMMAND event without {what}")))
        };
        let network = next("network")?;
        let sender = next("sender")?;
        let channel = next("channel")?;
        let command = next("command")?;
        // the unsplit argument line; the words follow it
        let _argline = params.next();
        Ok(Self {
            network,
            sender,
            channel,
            command,
            args: params.collect(),
        })
    }

    /// Channels get the answer in public, private messages go back to the sender.
    pub fn reply_target(&self) -> &str {
        if self.channel.starts_with('#') || self.channel.starts_with('&') {
            &self.channel
        } else {
            &self.sender
        }
    }
}

pub struct DaZeus<S> {
    stream: BufReader<S>,
}

impl DaZeus<Box<dyn Stream>> {
    pub async fn connect(address: &Address) -> Result<Self> {
        let stream: Box<dyn Stream> = match address {
            Address::Unix(path) => Box::new(UnixStream::connect(path).await?),
            Address::Tcp(host_port) => Box::new(TcpStream::connect(host_port.as_str()).await?),
        };
        log::info!("Connected to DaZeus at {address}");
        Ok(Self::new(stream))
    }
}

impl<S: Stream> DaZeus<S> {
    pub fn new(stream: S) -> Self {
        Self {
            stream: BufReader::new(stream),
        }
    }

    async fn send(&mut self, action: &str, params: Vec<&str>) -> Result<()> {
        write_message(self.stream.get_mut(), &Request { action, params }).await
    }

    /// Errors here mean the connection itself is broken.
    async fn receive(&mut self) -> Result<Option<serde_json::Value>> {
        let value = read_message(&mut self.stream).await?;
        if let Some(value) = &value {
            log::trace!("<- {value}");
        }
        Ok(value)
    }

    /// Asks the core to forward `command` to us and waits for it to agree.
    pub async fn subscribe_command(&mut self, command: &str) -> Result<()> {
        self.send("command", vec![command]).await?;
        loop {
            let Some(value) = self.receive().await? else {
                return Err(Error::Protocol(
                    "connection closed while subscribing".into(),
                ));
            };
            match serde_json::from_value::<Incoming>(value)? {
                Incoming::Response {
                    success: Some(false),
                    error,
                    ..
                } => {
                    return Err(Error::Protocol(format!(
                        "subscribing to {command:?} failed: {}",
                        error.unwrap_or_default()
                    )))
                }
                Incoming::Response { .. } => {
                    log::info!("Subscribed to command {command:?}");
                    return Ok(());
                }
                Incoming::Event { event, .. } => {
                    log::debug!("Ignoring {event} event while subscribing");
                }
            }
        }
    }

    /// Waits for the next command, or `None` once the core hangs up.
    ///
    /// Messages that make no sense are logged and skipped; only a broken connection is an error.
    pub async fn next_command(&mut self) -> Result<Option<CommandEvent>> {
        loop {
            let Some(value) = self.receive().await? else {
                return Ok(None);
            };
            let incoming = match serde_json::from_value::<Incoming>(value) {
                Ok(incoming) => incoming,
                Err(e) => {
                    log::warn!("Skipping malformed message from DaZeus: {e}");
                    continue;
                }
            };
            match incoming {
                Incoming::Event { event, params } if event == "COMMAND" => {
                    match CommandEvent::from_params(params) {
                        Ok(command) => return Ok(Some(command)),
                        Err(e) => log::warn!("Skipping {e}"),
                    }
                }
                Incoming::Event { event, .. } => log::debug!("Ignoring {event} event"),
                Incoming::Response {
                    did,
                    success: Some(false),
                    error,
                } => log::warn!(
                    "DaZeus refused {}: {}",
                    did.unwrap_or_default(),
                    error.unwrap_or_default()
                ),
                Incoming::Response { .. } => {}
            }
        }
    }

    pub async fn reply(&mut self, event: &CommandEvent, message: &str) -> Result<()> {
        self.send(
            "message",
            vec![event.network.as_str(), event.reply_target(), message],
        )
        .await
    }
}
