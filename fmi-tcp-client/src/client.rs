//! Master-side client (spec component G, §4.G): one `Client` per TCP connection to a
//! `fmitcp-server`, exposing a typed async method per request kind.
//!
//! A background task owns the socket's read half and demultiplexes inbound responses by
//! `message_id`, resolving the caller's pending oneshot or logging-and-dropping an id nobody is
//! waiting on (never a panic — a stray or duplicate response must not crash the coordinator).

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use futures::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::{oneshot, Mutex};
use tokio::task::JoinHandle;
use tokio_util::codec::Framed;

use fmi_tcp_proto::codec::{ClientCodec, Frame};
use fmi_tcp_proto::{FmiTcpRequest, FmiTcpResponse, ValueRef, WireStatus};

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed frame: {0}")]
    Decode(#[from] fmi_tcp_proto::codec::DecodeError),
    #[error("connection closed before a response for message_id={0} arrived")]
    ConnectionClosed(u32),
    #[error("server returned an unexpected response variant for this request")]
    UnexpectedResponse,
    #[error("server reported status {0:?}")]
    Status(WireStatus),
}

type PendingMap = Arc<Mutex<HashMap<u32, oneshot::Sender<FmiTcpResponse>>>>;

pub struct Client {
    fmu_id: u32,
    next_message_id: AtomicU32,
    pending: PendingMap,
    writer: Mutex<futures::stream::SplitSink<Framed<TcpStream, ClientCodec>, FmiTcpRequest>>,
    reader_task: JoinHandle<()>,
}

impl Client {
    /// Connects to `addr` and spawns the background demultiplexing task. `fmu_id` is the id
    /// this client stamps on every outgoing request (the single-instance server echoes it back
    /// unchanged).
    pub async fn connect(addr: impl tokio::net::ToSocketAddrs, fmu_id: u32) -> Result<Self, ClientError> {
        let socket = TcpStream::connect(addr).await?;
        let framed = Framed::new(socket, ClientCodec::default());
        let (writer, mut reader) = framed.split();

        let pending: PendingMap = Arc::new(Mutex::new(HashMap::new()));
        let pending_for_task = pending.clone();

        let reader_task = tokio::spawn(async move {
            while let Some(frame) = reader.next().await {
                let frame = match frame {
                    Ok(frame) => frame,
                    Err(e) => {
                        log::error!("client read error: {e}");
                        break;
                    }
                };
                let resp = match frame {
                    Frame::Keepalive => continue,
                    Frame::Message(resp) => resp,
                };
                let message_id = resp.message_id();
                let sender = pending_for_task.lock().await.remove(&message_id);
                match sender {
                    Some(sender) => {
                        let _ = sender.send(resp);
                    }
                    None => {
                        log::warn!("dropping response for unknown message_id={message_id}");
                    }
                }
            }
        });

        Ok(Self {
            fmu_id,
            next_message_id: AtomicU32::new(1),
            pending,
            writer: Mutex::new(writer),
            reader_task,
        })
    }

    fn allocate_message_id(&self) -> u32 {
        self.next_message_id.fetch_add(1, Ordering::Relaxed)
    }

    async fn roundtrip(&self, message_id: u32, req: FmiTcpRequest) -> Result<FmiTcpResponse, ClientError> {
        let (tx, rx) = oneshot::channel();
        self.pending.lock().await.insert(message_id, tx);

        if let Err(e) = self.writer.lock().await.send(req).await {
            self.pending.lock().await.remove(&message_id);
            return Err(e.into());
        }

        rx.await.map_err(|_| ClientError::ConnectionClosed(message_id))
    }

    pub async fn instantiate(&self, instance_name: &str, visible: bool) -> Result<WireStatus, ClientError> {
        let message_id = self.allocate_message_id();
        let resp = self
            .roundtrip(
                message_id,
                FmiTcpRequest::Instantiate {
                    message_id,
                    fmu_id: self.fmu_id,
                    instance_name: instance_name.to_owned(),
                    visible,
                },
            )
            .await?;
        match resp {
            FmiTcpResponse::Instantiate { status, .. } => Ok(status),
            _ => Err(ClientError::UnexpectedResponse),
        }
    }

    pub async fn initialize_slave(
        &self,
        tolerance: Option<f64>,
        start_time: f64,
        stop_time: Option<f64>,
    ) -> Result<WireStatus, ClientError> {
        let message_id = self.allocate_message_id();
        let resp = self
            .roundtrip(
                message_id,
                FmiTcpRequest::InitializeSlave {
                    message_id,
                    fmu_id: self.fmu_id,
                    tolerance,
                    start_time,
                    stop_time,
                },
            )
            .await?;
        match resp {
            FmiTcpResponse::InitializeSlave { status, .. } => Ok(status),
            _ => Err(ClientError::UnexpectedResponse),
        }
    }

    pub async fn do_step(
        &self,
        current_communication_point: f64,
        communication_step_size: f64,
        new_step: bool,
    ) -> Result<WireStatus, ClientError> {
        let message_id = self.allocate_message_id();
        let resp = self
            .roundtrip(
                message_id,
                FmiTcpRequest::DoStep {
                    message_id,
                    fmu_id: self.fmu_id,
                    current_communication_point,
                    communication_step_size,
                    new_step,
                },
            )
            .await?;
        match resp {
            FmiTcpResponse::DoStep { status, .. } => Ok(status),
            _ => Err(ClientError::UnexpectedResponse),
        }
    }

    pub async fn cancel_step(&self) -> Result<WireStatus, ClientError> {
        let message_id = self.allocate_message_id();
        let resp = self
            .roundtrip(
                message_id,
                FmiTcpRequest::CancelStep {
                    message_id,
                    fmu_id: self.fmu_id,
                },
            )
            .await?;
        match resp {
            FmiTcpResponse::CancelStep { status, .. } => Ok(status),
            _ => Err(ClientError::UnexpectedResponse),
        }
    }

    pub async fn terminate_slave(&self) -> Result<WireStatus, ClientError> {
        let message_id = self.allocate_message_id();
        let resp = self
            .roundtrip(
                message_id,
                FmiTcpRequest::TerminateSlave {
                    message_id,
                    fmu_id: self.fmu_id,
                },
            )
            .await?;
        match resp {
            FmiTcpResponse::TerminateSlave { status, .. } => Ok(status),
            _ => Err(ClientError::UnexpectedResponse),
        }
    }

    pub async fn reset_slave(&self) -> Result<WireStatus, ClientError> {
        let message_id = self.allocate_message_id();
        let resp = self
            .roundtrip(
                message_id,
                FmiTcpRequest::ResetSlave {
                    message_id,
                    fmu_id: self.fmu_id,
                },
            )
            .await?;
        match resp {
            FmiTcpResponse::ResetSlave { status, .. } => Ok(status),
            _ => Err(ClientError::UnexpectedResponse),
        }
    }

    pub async fn free_slave_instance(&self) -> Result<WireStatus, ClientError> {
        let message_id = self.allocate_message_id();
        let resp = self
            .roundtrip(
                message_id,
                FmiTcpRequest::FreeSlaveInstance {
                    message_id,
                    fmu_id: self.fmu_id,
                },
            )
            .await?;
        match resp {
            FmiTcpResponse::FreeSlaveInstance { status, .. } => Ok(status),
            _ => Err(ClientError::UnexpectedResponse),
        }
    }

    pub async fn get_real(&self, value_references: Vec<ValueRef>) -> Result<(WireStatus, Vec<f64>), ClientError> {
        let message_id = self.allocate_message_id();
        let resp = self
            .roundtrip(
                message_id,
                FmiTcpRequest::GetReal {
                    message_id,
                    fmu_id: self.fmu_id,
                    value_references,
                },
            )
            .await?;
        match resp {
            FmiTcpResponse::GetReal { status, values, .. } => Ok((status, values)),
            _ => Err(ClientError::UnexpectedResponse),
        }
    }

    pub async fn set_real(&self, value_references: Vec<ValueRef>, values: Vec<f64>) -> Result<WireStatus, ClientError> {
        let message_id = self.allocate_message_id();
        let resp = self
            .roundtrip(
                message_id,
                FmiTcpRequest::SetReal {
                    message_id,
                    fmu_id: self.fmu_id,
                    value_references,
                    values,
                },
            )
            .await?;
        match resp {
            FmiTcpResponse::SetReal { status, .. } => Ok(status),
            _ => Err(ClientError::UnexpectedResponse),
        }
    }

    pub async fn get_integer(&self, value_references: Vec<ValueRef>) -> Result<(WireStatus, Vec<i32>), ClientError> {
        let message_id = self.allocate_message_id();
        let resp = self
            .roundtrip(
                message_id,
                FmiTcpRequest::GetInteger {
                    message_id,
                    fmu_id: self.fmu_id,
                    value_references,
                },
            )
            .await?;
        match resp {
            FmiTcpResponse::GetInteger { status, values, .. } => Ok((status, values)),
            _ => Err(ClientError::UnexpectedResponse),
        }
    }

    pub async fn set_integer(&self, value_references: Vec<ValueRef>, values: Vec<i32>) -> Result<WireStatus, ClientError> {
        let message_id = self.allocate_message_id();
        let resp = self
            .roundtrip(
                message_id,
                FmiTcpRequest::SetInteger {
                    message_id,
                    fmu_id: self.fmu_id,
                    value_references,
                    values,
                },
            )
            .await?;
        match resp {
            FmiTcpResponse::SetInteger { status, .. } => Ok(status),
            _ => Err(ClientError::UnexpectedResponse),
        }
    }

    pub async fn get_boolean(&self, value_references: Vec<ValueRef>) -> Result<(WireStatus, Vec<bool>), ClientError> {
        let message_id = self.allocate_message_id();
        let resp = self
            .roundtrip(
                message_id,
                FmiTcpRequest::GetBoolean {
                    message_id,
                    fmu_id: self.fmu_id,
                    value_references,
                },
            )
            .await?;
        match resp {
            FmiTcpResponse::GetBoolean { status, values, .. } => Ok((status, values)),
            _ => Err(ClientError::UnexpectedResponse),
        }
    }

    pub async fn set_boolean(&self, value_references: Vec<ValueRef>, values: Vec<bool>) -> Result<WireStatus, ClientError> {
        let message_id = self.allocate_message_id();
        let resp = self
            .roundtrip(
                message_id,
                FmiTcpRequest::SetBoolean {
                    message_id,
                    fmu_id: self.fmu_id,
                    value_references,
                    values,
                },
            )
            .await?;
        match resp {
            FmiTcpResponse::SetBoolean { status, .. } => Ok(status),
            _ => Err(ClientError::UnexpectedResponse),
        }
    }

    pub async fn get_string(&self, value_references: Vec<ValueRef>) -> Result<(WireStatus, Vec<String>), ClientError> {
        let message_id = self.allocate_message_id();
        let resp = self
            .roundtrip(
                message_id,
                FmiTcpRequest::GetString {
                    message_id,
                    fmu_id: self.fmu_id,
                    value_references,
                },
            )
            .await?;
        match resp {
            FmiTcpResponse::GetString { status, values, .. } => Ok((status, values)),
            _ => Err(ClientError::UnexpectedResponse),
        }
    }

    pub async fn set_string(&self, value_references: Vec<ValueRef>, values: Vec<String>) -> Result<WireStatus, ClientError> {
        let message_id = self.allocate_message_id();
        let resp = self
            .roundtrip(
                message_id,
                FmiTcpRequest::SetString {
                    message_id,
                    fmu_id: self.fmu_id,
                    value_references,
                    values,
                },
            )
            .await?;
        match resp {
            FmiTcpResponse::SetString { status, .. } => Ok(status),
            _ => Err(ClientError::UnexpectedResponse),
        }
    }

    pub async fn set_real_input_derivatives(
        &self,
        value_references: Vec<ValueRef>,
        orders: Vec<i32>,
        values: Vec<f64>,
    ) -> Result<WireStatus, ClientError> {
        let message_id = self.allocate_message_id();
        let resp = self
            .roundtrip(
                message_id,
                FmiTcpRequest::SetRealInputDerivatives {
                    message_id,
                    fmu_id: self.fmu_id,
                    value_references,
                    orders,
                    values,
                },
            )
            .await?;
        match resp {
            FmiTcpResponse::SetRealInputDerivatives { status, .. } => Ok(status),
            _ => Err(ClientError::UnexpectedResponse),
        }
    }

    pub async fn get_real_output_derivatives(
        &self,
        value_references: Vec<ValueRef>,
        orders: Vec<i32>,
    ) -> Result<(WireStatus, Vec<f64>), ClientError> {
        let message_id = self.allocate_message_id();
        let resp = self
            .roundtrip(
                message_id,
                FmiTcpRequest::GetRealOutputDerivatives {
                    message_id,
                    fmu_id: self.fmu_id,
                    value_references,
                    orders,
                },
            )
            .await?;
        match resp {
            FmiTcpResponse::GetRealOutputDerivatives { status, values, .. } => Ok((status, values)),
            _ => Err(ClientError::UnexpectedResponse),
        }
    }

    pub async fn get_directional_derivative(
        &self,
        unknown_refs: Vec<ValueRef>,
        known_refs: Vec<ValueRef>,
        known_values: Vec<f64>,
    ) -> Result<(WireStatus, Vec<f64>), ClientError> {
        let message_id = self.allocate_message_id();
        let resp = self
            .roundtrip(
                message_id,
                FmiTcpRequest::GetDirectionalDerivative {
                    message_id,
                    fmu_id: self.fmu_id,
                    unknown_refs,
                    known_refs,
                    known_values,
                },
            )
            .await?;
        match resp {
            FmiTcpResponse::GetDirectionalDerivative { status, values, .. } => Ok((status, values)),
            _ => Err(ClientError::UnexpectedResponse),
        }
    }

    pub async fn get_status(&self) -> Result<(WireStatus, WireStatus), ClientError> {
        let message_id = self.allocate_message_id();
        let resp = self
            .roundtrip(message_id, FmiTcpRequest::GetStatus { message_id, fmu_id: self.fmu_id })
            .await?;
        match resp {
            FmiTcpResponse::GetStatus { status, value, .. } => Ok((status, value)),
            _ => Err(ClientError::UnexpectedResponse),
        }
    }

    pub async fn get_real_status(&self) -> Result<(WireStatus, f64), ClientError> {
        let message_id = self.allocate_message_id();
        let resp = self
            .roundtrip(message_id, FmiTcpRequest::GetRealStatus { message_id, fmu_id: self.fmu_id })
            .await?;
        match resp {
            FmiTcpResponse::GetRealStatus { status, value, .. } => Ok((status, value)),
            _ => Err(ClientError::UnexpectedResponse),
        }
    }

    pub async fn get_integer_status(&self) -> Result<(WireStatus, i32), ClientError> {
        let message_id = self.allocate_message_id();
        let resp = self
            .roundtrip(message_id, FmiTcpRequest::GetIntegerStatus { message_id, fmu_id: self.fmu_id })
            .await?;
        match resp {
            FmiTcpResponse::GetIntegerStatus { status, value, .. } => Ok((status, value)),
            _ => Err(ClientError::UnexpectedResponse),
        }
    }

    pub async fn get_boolean_status(&self) -> Result<(WireStatus, bool), ClientError> {
        let message_id = self.allocate_message_id();
        let resp = self
            .roundtrip(message_id, FmiTcpRequest::GetBooleanStatus { message_id, fmu_id: self.fmu_id })
            .await?;
        match resp {
            FmiTcpResponse::GetBooleanStatus { status, value, .. } => Ok((status, value)),
            _ => Err(ClientError::UnexpectedResponse),
        }
    }

    pub async fn get_string_status(&self) -> Result<(WireStatus, String), ClientError> {
        let message_id = self.allocate_message_id();
        let resp = self
            .roundtrip(message_id, FmiTcpRequest::GetStringStatus { message_id, fmu_id: self.fmu_id })
            .await?;
        match resp {
            FmiTcpResponse::GetStringStatus { status, value, .. } => Ok((status, value)),
            _ => Err(ClientError::UnexpectedResponse),
        }
    }

    pub async fn get_fmu_state(&self) -> Result<(WireStatus, u32), ClientError> {
        let message_id = self.allocate_message_id();
        let resp = self
            .roundtrip(message_id, FmiTcpRequest::GetFmuState { message_id, fmu_id: self.fmu_id })
            .await?;
        match resp {
            FmiTcpResponse::GetFmuState { status, state_id, .. } => Ok((status, state_id)),
            _ => Err(ClientError::UnexpectedResponse),
        }
    }

    pub async fn set_fmu_state(&self, state_id: u32) -> Result<WireStatus, ClientError> {
        let message_id = self.allocate_message_id();
        let resp = self
            .roundtrip(
                message_id,
                FmiTcpRequest::SetFmuState { message_id, fmu_id: self.fmu_id, state_id },
            )
            .await?;
        match resp {
            FmiTcpResponse::SetFmuState { status, .. } => Ok(status),
            _ => Err(ClientError::UnexpectedResponse),
        }
    }

    pub async fn free_fmu_state(&self, state_id: u32) -> Result<WireStatus, ClientError> {
        let message_id = self.allocate_message_id();
        let resp = self
            .roundtrip(
                message_id,
                FmiTcpRequest::FreeFmuState { message_id, fmu_id: self.fmu_id, state_id },
            )
            .await?;
        match resp {
            FmiTcpResponse::FreeFmuState { status, .. } => Ok(status),
            _ => Err(ClientError::UnexpectedResponse),
        }
    }

    pub async fn serialized_fmu_state_size(&self, state_id: u32) -> Result<(WireStatus, u32), ClientError> {
        let message_id = self.allocate_message_id();
        let resp = self
            .roundtrip(
                message_id,
                FmiTcpRequest::SerializedFmuStateSize { message_id, fmu_id: self.fmu_id, state_id },
            )
            .await?;
        match resp {
            FmiTcpResponse::SerializedFmuStateSize { status, size, .. } => Ok((status, size)),
            _ => Err(ClientError::UnexpectedResponse),
        }
    }

    pub async fn serialize_fmu_state(&self, state_id: u32) -> Result<(WireStatus, Vec<u8>), ClientError> {
        let message_id = self.allocate_message_id();
        let resp = self
            .roundtrip(
                message_id,
                FmiTcpRequest::SerializeFmuState { message_id, fmu_id: self.fmu_id, state_id },
            )
            .await?;
        match resp {
            FmiTcpResponse::SerializeFmuState { status, bytes, .. } => Ok((status, bytes)),
            _ => Err(ClientError::UnexpectedResponse),
        }
    }

    pub async fn deserialize_fmu_state(&self, bytes: Vec<u8>) -> Result<(WireStatus, u32), ClientError> {
        let message_id = self.allocate_message_id();
        let resp = self
            .roundtrip(
                message_id,
                FmiTcpRequest::DeSerializeFmuState { message_id, fmu_id: self.fmu_id, bytes },
            )
            .await?;
        match resp {
            FmiTcpResponse::DeSerializeFmuState { status, state_id, .. } => Ok((status, state_id)),
            _ => Err(ClientError::UnexpectedResponse),
        }
    }

    pub async fn get_version(&self) -> Result<String, ClientError> {
        let message_id = self.allocate_message_id();
        let resp = self
            .roundtrip(message_id, FmiTcpRequest::GetVersion { message_id, fmu_id: self.fmu_id })
            .await?;
        match resp {
            FmiTcpResponse::GetVersion { version, .. } => Ok(version),
            _ => Err(ClientError::UnexpectedResponse),
        }
    }

    pub async fn set_debug_logging(&self, logging_on: bool, categories: Vec<String>) -> Result<WireStatus, ClientError> {
        let message_id = self.allocate_message_id();
        let resp = self
            .roundtrip(
                message_id,
                FmiTcpRequest::SetDebugLogging { message_id, fmu_id: self.fmu_id, logging_on, categories },
            )
            .await?;
        match resp {
            FmiTcpResponse::SetDebugLogging { status, .. } => Ok(status),
            _ => Err(ClientError::UnexpectedResponse),
        }
    }

    pub async fn get_xml(&self) -> Result<String, ClientError> {
        let message_id = self.allocate_message_id();
        let resp = self
            .roundtrip(message_id, FmiTcpRequest::GetXml { message_id, fmu_id: self.fmu_id })
            .await?;
        match resp {
            FmiTcpResponse::GetXml { xml, .. } => Ok(xml),
            _ => Err(ClientError::UnexpectedResponse),
        }
    }
}

impl Drop for Client {
    fn drop(&mut self) {
        self.reader_task.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fmi_tcp_server::{DispatcherConfig, DummyAdapter, LifecycleState, NoopHooks, Server};
    use std::sync::Arc;

    async fn spawn_dummy_server() -> std::net::SocketAddr {
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
        tokio::spawn(async move {
            let _ = server.serve().await;
        });
        addr
    }

    #[tokio::test]
    async fn instantiate_round_trips_ok() {
        let addr = spawn_dummy_server().await;
        let client = Client::connect(addr, 0).await.unwrap();
        let status = client.instantiate("inst1", false).await.unwrap();
        assert_eq!(status, WireStatus::Ok);
    }

    #[tokio::test]
    async fn concurrent_requests_resolve_to_the_right_caller() {
        let addr = spawn_dummy_server().await;
        let client = Arc::new(Client::connect(addr, 0).await.unwrap());

        let a = {
            let client = client.clone();
            tokio::spawn(async move { client.get_real(vec![1, 2, 3]).await.unwrap() })
        };
        let b = {
            let client = client.clone();
            tokio::spawn(async move { client.get_integer(vec![4, 5]).await.unwrap() })
        };

        let (status_a, values_a) = a.await.unwrap();
        let (status_b, values_b) = b.await.unwrap();
        assert_eq!(status_a, WireStatus::Ok);
        assert_eq!(values_a.len(), 3);
        assert_eq!(status_b, WireStatus::Ok);
        assert_eq!(values_b.len(), 2);
    }
}
