//! Connection server (spec component E, §4.E): the async TCP listener that accepts clients and
//! drives each through a [`Dispatcher`].
//!
//! The server is single-client-at-a-time by default — a second connection attempt is refused
//! while one is active — but every accepted socket is wrapped in a [`ConnectionHandle`] so a
//! future multi-client extension does not require restructuring the accept loop itself.

use std::sync::Arc;

use futures::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Mutex;
use tokio_util::codec::Framed;

use fmi_tcp_proto::codec::{DecodeError, Frame, ServerCodec};
use fmi_tcp_proto::WireStatus;

use crate::adapter::SimulationAdapter;
use crate::dispatcher::{Dispatcher, DispatcherConfig};
use crate::lifecycle::LifecycleState;

/// Opaque identifier for an accepted connection, handed to [`ServerHooks`] callbacks. Carries no
/// behavior today beyond the peer address; a multi-client server would key its per-client state
/// off this instead of assuming a single slot.
#[derive(Debug, Clone)]
pub struct ConnectionHandle {
    pub peer: std::net::SocketAddr,
}

/// Observable lifecycle events of the connection server, supplied as a trait object at
/// construction rather than through a subclass hierarchy.
pub trait ServerHooks: Send + Sync {
    fn on_client_connect(&self, _conn: &ConnectionHandle) {}
    fn on_client_disconnect(&self, _conn: &ConnectionHandle) {}
    fn on_error(&self, _conn: &ConnectionHandle, _error: &ServerError) {}
}

/// Hooks implementation that does nothing; the default when the caller has no observers.
#[derive(Debug, Default)]
pub struct NoopHooks;

impl ServerHooks for NoopHooks {}

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed frame: {0}")]
    Decode(#[from] DecodeError),
    #[error("a client is already connected")]
    AlreadyConnected,
    #[error("component reported a fatal status; instance poisoned")]
    Fatal,
}

/// Drives one co-simulation instance over TCP. Owns the [`Dispatcher`] (and, through it, the
/// [`SimulationAdapter`] and [`LifecycleState`]); `serve` never returns except on listener error.
pub struct Server<A: SimulationAdapter> {
    listener: TcpListener,
    dispatcher: Arc<Mutex<Dispatcher<A>>>,
    hooks: Arc<dyn ServerHooks>,
    busy: Arc<Mutex<bool>>,
}

impl<A: SimulationAdapter + Send + 'static> Server<A> {
    pub async fn bind(
        host: &str,
        port: u16,
        adapter: A,
        initial_state: LifecycleState,
        config: DispatcherConfig,
        hooks: Arc<dyn ServerHooks>,
    ) -> Result<Self, ServerError> {
        let listener = TcpListener::bind((host, port)).await?;
        Ok(Self {
            listener,
            dispatcher: Arc::new(Mutex::new(Dispatcher::new(adapter, initial_state, config))),
            hooks,
            busy: Arc::new(Mutex::new(false)),
        })
    }

    pub fn local_addr(&self) -> std::io::Result<std::net::SocketAddr> {
        self.listener.local_addr()
    }

    /// Accepts connections forever, refusing a second concurrent client (spec §5/§4.E).
    pub async fn serve(&self) -> Result<(), ServerError> {
        loop {
            let (socket, peer) = self.listener.accept().await?;
            socket.set_nodelay(true)?;
            let handle = ConnectionHandle { peer };

            let mut busy = self.busy.lock().await;
            if *busy {
                log::warn!("rejecting connection from {peer}: a client is already connected");
                self.hooks.on_error(&handle, &ServerError::AlreadyConnected);
                drop(socket);
                continue;
            }
            *busy = true;
            drop(busy);

            self.hooks.on_client_connect(&handle);
            let result = self.handle_connection(socket, &handle).await;
            if let Err(ref e) = result {
                self.hooks.on_error(&handle, e);
            }
            self.hooks.on_client_disconnect(&handle);
            *self.busy.lock().await = false;
        }
    }

    async fn handle_connection(
        &self,
        socket: TcpStream,
        handle: &ConnectionHandle,
    ) -> Result<(), ServerError> {
        let mut framed = Framed::new(socket, ServerCodec::default());

        while let Some(frame) = framed.next().await {
            let frame = match frame {
                Ok(frame) => frame,
                Err(DecodeError::UnknownOperation { tag }) => {
                    log::error!("unknown operation tag {tag} from {}", handle.peer);
                    continue;
                }
                Err(e) => {
                    log::error!("decode error from {}: {e}", handle.peer);
                    return Err(e.into());
                }
            };

            let req = match frame {
                Frame::Keepalive => continue,
                Frame::Message(req) => req,
            };

            let resp = {
                let mut dispatcher = self.dispatcher.lock().await;
                dispatcher.handle(req)
            };

            if let Some(resp) = &resp {
                if resp.status() == WireStatus::Fatal {
                    log::error!("fatal status from {}; instance poisoned", handle.peer);
                    self.hooks.on_error(handle, &ServerError::Fatal);
                }
            }

            if let Some(resp) = resp {
                if let Err(e) = framed.send(resp).await {
                    return Err(e.into());
                }
            }
        }

        log::info!("client {} disconnected", handle.peer);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::DummyAdapter;
    use fmi_tcp_proto::codec::ClientCodec;
    use fmi_tcp_proto::{FmiTcpRequest, FmiTcpResponse, WireStatus};

    #[tokio::test]
    async fn rejects_second_concurrent_client() {
        let server = Server::bind(
            "127.0.0.1",
            0,
            DummyAdapter,
            LifecycleState::Dummy,
            DispatcherConfig::default(),
            Arc::new(NoopHooks),
        )
        .await
        .unwrap();
        let addr = server.local_addr().unwrap();
        let server = Arc::new(server);

        let serve_task = {
            let server = server.clone();
            tokio::spawn(async move { server.serve().await })
        };

        let first = TcpStream::connect(addr).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;

        let second = TcpStream::connect(addr).await.unwrap();
        let mut second = Framed::new(second, ClientCodec::default());
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;

        // The connection is refused before any byte is exchanged; reading times out or the
        // stream is closed rather than getting a protocol answer.
        let result =
            tokio::time::timeout(std::time::Duration::from_millis(100), second.next()).await;
        assert!(result.is_err() || matches!(result, Ok(None)));

        drop(first);
        serve_task.abort();
    }

    #[tokio::test]
    async fn end_to_end_instantiate_over_the_wire() {
        let server = Server::bind(
            "127.0.0.1",
            0,
            DummyAdapter,
            LifecycleState::Dummy,
            DispatcherConfig::default(),
            Arc::new(NoopHooks),
        )
        .await
        .unwrap();
        let addr = server.local_addr().unwrap();
        let server = Arc::new(server);
        let serve_task = {
            let server = server.clone();
            tokio::spawn(async move { server.serve().await })
        };

        let socket = TcpStream::connect(addr).await.unwrap();
        let mut framed = Framed::new(socket, ClientCodec::default());
        framed
            .send(FmiTcpRequest::Instantiate {
                message_id: 1,
                fmu_id: 0,
                instance_name: "inst1".to_owned(),
                visible: false,
            })
            .await
            .unwrap();

        let frame = tokio::time::timeout(std::time::Duration::from_secs(1), framed.next())
            .await
            .unwrap()
            .unwrap()
            .unwrap();
        match frame {
            Frame::Message(FmiTcpResponse::Instantiate { message_id, status }) => {
                assert_eq!(message_id, 1);
                assert_eq!(status, WireStatus::Ok);
            }
            other => panic!("unexpected frame: {other:?}"),
        }

        serve_task.abort();
    }
}
