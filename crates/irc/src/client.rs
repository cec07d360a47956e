//! TCP connection to a single IRC server.
//!
//! A reader task parses inbound lines and answers PINGs; a writer task drains
//! the outbound queue. Everything else is handed to the caller in arrival
//! order through [`Connection::recv`].

use {
    secrecy::{ExposeSecret, Secret},
    tokio::{
        io::{AsyncBufReadExt, AsyncWriteExt, BufReader},
        net::TcpStream,
        sync::mpsc,
    },
    tracing::{debug, info, trace, warn},
};

use crate::{
    Result,
    message::Message,
    outbound::{IrcOutbound, IrcSender},
};

/// Where to connect and how to register.
#[derive(Clone)]
pub struct ConnectOptions {
    pub host: String,
    pub port: u16,
    pub nickname: String,
    pub username: String,
    pub realname: String,
    pub password: Option<Secret<String>>,
}

impl std::fmt::Debug for ConnectOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectOptions")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("nickname", &self.nickname)
            .field("username", &self.username)
            .field("realname", &self.realname)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// A live, registered-or-registering connection.
pub struct Connection {
    sender: IrcSender,
    inbound: mpsc::UnboundedReceiver<Message>,
}

impl Connection {
    /// Build a connection from an existing outbound sender and inbound queue.
    pub fn from_parts(sender: IrcSender, inbound: mpsc::UnboundedReceiver<Message>) -> Self {
        Self { sender, inbound }
    }

    pub fn sender(&self) -> IrcSender {
        self.sender.clone()
    }

    /// Next inbound message; `None` once the server closed the connection.
    pub async fn recv(&mut self) -> Option<Message> {
        self.inbound.recv().await
    }
}

/// Connect to the server and send the registration handshake.
pub async fn connect(options: &ConnectOptions) -> Result<Connection> {
    let stream = TcpStream::connect((options.host.as_str(), options.port)).await?;
    info!(host = %options.host, port = options.port, "connected to irc server");
    let (read_half, mut write_half) = stream.into_split();

    let (out_tx, mut out_rx) = mpsc::unbounded_channel::<Message>();
    let (in_tx, in_rx) = mpsc::unbounded_channel::<Message>();
    let sender = IrcSender::new(out_tx);

    tokio::spawn(async move {
        while let Some(message) = out_rx.recv().await {
            let line = format!("{message}\r\n");
            trace!(line = line.trim_end(), ">>");
            if let Err(e) = write_half.write_all(line.as_bytes()).await {
                warn!(error = %e, "irc write failed, stopping writer");
                break;
            }
        }
        let _ = write_half.shutdown().await;
        debug!("irc writer stopped");
    });

    // Queued before the reader starts so the handshake always goes first.
    if let Some(password) = &options.password {
        sender.send(Message::pass(password.expose_secret())).await?;
    }
    sender.nick(&options.nickname).await?;
    sender
        .send(Message::user(&options.username, &options.realname))
        .await?;

    let pong_sender = sender.clone();
    tokio::spawn(async move {
        let mut reader = BufReader::new(read_half);
        let mut buf = Vec::with_capacity(512);
        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf).await {
                Ok(0) => {
                    info!("irc server closed the connection");
                    break;
                },
                Ok(_) => {},
                Err(e) => {
                    warn!(error = %e, "irc read failed");
                    break;
                },
            }
            let line = String::from_utf8_lossy(&buf);
            let line = line.trim_end_matches(['\r', '\n']);
            if line.is_empty() {
                continue;
            }
            trace!(line, "<<");
            let message = match Message::parse(line) {
                Ok(message) => message,
                Err(e) => {
                    debug!(error = %e, "skipping unparsable line");
                    continue;
                },
            };
            if message.command == "PING" {
                let token = message.param(0).unwrap_or_default().to_string();
                if pong_sender.send(Message::pong(&token)).await.is_err() {
                    break;
                }
                continue;
            }
            if in_tx.send(message).is_err() {
                break;
            }
        }
    });

    Ok(Connection::from_parts(sender, in_rx))
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use {
        super::*,
        tokio::{io::AsyncReadExt, net::TcpListener},
    };

    #[tokio::test]
    async fn registers_answers_ping_and_forwards_messages() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();

        let server = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            socket
                .write_all(b"PING :abc\r\n:irc.test 001 bot :Welcome\r\n")
                .await
                .unwrap();
            let mut received = String::new();
            let mut buf = [0u8; 256];
            while !received.contains("PONG abc\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                assert!(n > 0, "client hung up early: {received:?}");
                received.push_str(&String::from_utf8_lossy(&buf[..n]));
            }
            received
        });

        let options = ConnectOptions {
            host: "127.0.0.1".into(),
            port,
            nickname: "bot".into(),
            username: "botuser".into(),
            realname: "Bootstrap Bot".into(),
            password: Some(Secret::new("hunter2".into())),
        };
        let mut connection = connect(&options).await.unwrap();

        let welcome = connection.recv().await.unwrap();
        assert_eq!(welcome.command, "001");

        let received = server.await.unwrap();
        assert!(received.starts_with(
            "PASS hunter2\r\nNICK bot\r\nUSER botuser 0 * :Bootstrap Bot\r\n"
        ));
        assert!(received.contains("PONG abc\r\n"));
    }

    #[test]
    fn debug_redacts_password() {
        let options = ConnectOptions {
            host: "irc.test".into(),
            port: 6667,
            nickname: "bot".into(),
            username: "bot".into(),
            realname: "bot".into(),
            password: Some(Secret::new("hunter2".into())),
        };
        let rendered = format!("{options:?}");
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("REDACTED"));
    }
}
