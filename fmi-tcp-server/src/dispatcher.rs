//! Request dispatcher (spec component F, §4.F).
//!
//! For every recognized request: logs the inbound event, unpacks typed fields, consults the
//! lifecycle state machine for legality, invokes the adapter with exactly the specified
//! arguments, builds a response whose `message_id` matches the request's, and logs the outbound
//! event. Unknown tags are logged at ERROR and produce no response — `Dispatcher::handle` returns
//! `None` for those (and, per configuration, for a handful of not-yet-implemented operations). A
//! `fatal` status poisons the instance (`LifecycleState::Poisoned`) instead of advancing it; the
//! connection server notifies `ServerHooks::on_error` when that happens.

use fmi_tcp_proto::logger::{self, Category};
use fmi_tcp_proto::{FmiTcpRequest, FmiTcpResponse, OpKind, ValueRef, WireStatus};

use crate::adapter::SimulationAdapter;
use crate::lifecycle::LifecycleState;

/// Tunables for the dispatcher's handling of the less-traveled corners of the protocol.
#[derive(Debug, Clone, Copy)]
pub struct DispatcherConfig {
    /// When `true`, model-exchange placeholder operations (accepted by the decoder but out of
    /// scope for co-simulation) are answered with `status=error` instead of silently dropped.
    /// The reference source silently drops a handful of these; spec §9's open question prefers
    /// the explicit-error policy as the default, with this flag restoring legacy behavior for
    /// compatibility consumers.
    pub silent_drop_unimplemented: bool,
    /// When `true`, a successful `Instantiate` is immediately followed by a `set_debug_logging`
    /// call on the adapter, turning on FMI debug logging from the moment the component exists
    /// (`fmitcp-server --debug-logging`).
    pub enable_debug_logging_on_instantiate: bool,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            silent_drop_unimplemented: false,
            enable_debug_logging_on_instantiate: false,
        }
    }
}

/// Owns the single [`SimulationInstance`]'s lifecycle state and adapter, and turns decoded
/// requests into responses. One dispatcher per server connection context; the adapter is
/// exclusively owned and mutated only here (spec §5).
pub struct Dispatcher<A: SimulationAdapter> {
    adapter: A,
    state: LifecycleState,
    config: DispatcherConfig,
}

impl<A: SimulationAdapter> Dispatcher<A> {
    pub fn new(adapter: A, initial_state: LifecycleState, config: DispatcherConfig) -> Self {
        Self {
            adapter,
            state: initial_state,
            config,
        }
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    pub fn adapter_mut(&mut self) -> &mut A {
        &mut self.adapter
    }

    /// Handles one decoded request, returning the response to send, or `None` if no response
    /// should be sent (unknown tag, or a configured silent drop of an unimplemented operation).
    pub fn handle(&mut self, req: FmiTcpRequest) -> Option<FmiTcpResponse> {
        logger::log_request(Category::Network, &req);

        let op = req.op_kind();

        if op.is_model_exchange_placeholder() {
            if self.config.silent_drop_unimplemented {
                return None;
            }
            let resp = FmiTcpResponse::ModelExchangePlaceholder {
                message_id: req.message_id(),
                op,
                status: WireStatus::Error,
            };
            logger::log_response(Category::Network, op, &resp);
            return Some(resp);
        }

        if let Err(illegal) = self.state.check(op) {
            log::error!("{illegal}");
            let resp = self.error_response(&req);
            logger::log_response(Category::Network, op, &resp);
            return Some(resp);
        }

        let resp = self.dispatch(req);
        if resp.status() == WireStatus::Fatal {
            log::error!("{op:?} returned a fatal status; instance poisoned");
            self.state = LifecycleState::Poisoned;
        } else if resp.status().is_ok_or_warning() {
            self.state = self.state.advance(op);
        }
        logger::log_response(Category::Network, op, &resp);
        Some(resp)
    }

    fn error_response(&self, req: &FmiTcpRequest) -> FmiTcpResponse {
        build_error_response(req)
    }

    /// Spec §4.D: while `Instantiated`, only start-value-capable variables may be written. A
    /// value reference the adapter's catalogue doesn't recognize is treated as not capable —
    /// capability can't be proven, so the write is refused rather than let through unchecked.
    /// Outside `Instantiated` (e.g. `Initialized`) every variable may be written, matching the
    /// rest of the lifecycle table.
    fn check_start_value_capable(&self, value_references: &[ValueRef]) -> Option<WireStatus> {
        if self.state != LifecycleState::Instantiated {
            return None;
        }
        let capable = value_references.iter().all(|&vr| {
            self.adapter
                .describe_variable(vr)
                .is_some_and(|d| d.start_value_capable)
        });
        if capable {
            None
        } else {
            Some(WireStatus::Error)
        }
    }

    fn dispatch(&mut self, req: FmiTcpRequest) -> FmiTcpResponse {
        let message_id = req.message_id();
        match req {
            FmiTcpRequest::Instantiate {
                instance_name,
                visible,
                ..
            } => {
                let status = self.adapter.instantiate(&instance_name, visible);
                if status.is_ok_or_warning() && self.config.enable_debug_logging_on_instantiate {
                    self.adapter.set_debug_logging(true, &[]);
                }
                FmiTcpResponse::Instantiate { message_id, status }
            }
            FmiTcpRequest::InitializeSlave {
                tolerance,
                start_time,
                stop_time,
                ..
            } => {
                let status = self
                    .adapter
                    .initialize_slave(tolerance, start_time, stop_time);
                FmiTcpResponse::InitializeSlave { message_id, status }
            }
            FmiTcpRequest::TerminateSlave { .. } => {
                let status = self.adapter.terminate_slave();
                FmiTcpResponse::TerminateSlave { message_id, status }
            }
            FmiTcpRequest::ResetSlave { .. } => {
                let status = self.adapter.reset_slave();
                FmiTcpResponse::ResetSlave { message_id, status }
            }
            FmiTcpRequest::FreeSlaveInstance { .. } => {
                self.adapter.free();
                FmiTcpResponse::FreeSlaveInstance {
                    message_id,
                    status: WireStatus::Ok,
                }
            }
            FmiTcpRequest::DoStep {
                current_communication_point,
                communication_step_size,
                new_step,
                ..
            } => {
                let status = self.adapter.do_step(
                    current_communication_point,
                    communication_step_size,
                    new_step,
                );
                FmiTcpResponse::DoStep { message_id, status }
            }
            FmiTcpRequest::CancelStep { .. } => {
                let status = self.adapter.cancel_step();
                FmiTcpResponse::CancelStep { message_id, status }
            }
            FmiTcpRequest::GetReal {
                value_references, ..
            } => {
                let (status, values) = self.adapter.get_real(&value_references);
                FmiTcpResponse::GetReal {
                    message_id,
                    status,
                    values,
                }
            }
            FmiTcpRequest::SetReal {
                value_references,
                values,
                ..
            } => {
                let status = if value_references.len() != values.len() {
                    WireStatus::Error
                } else if let Some(status) = self.check_start_value_capable(&value_references) {
                    status
                } else {
                    self.adapter.set_real(&value_references, &values)
                };
                FmiTcpResponse::SetReal { message_id, status }
            }
            FmiTcpRequest::GetInteger {
                value_references, ..
            } => {
                let (status, values) = self.adapter.get_integer(&value_references);
                FmiTcpResponse::GetInteger {
                    message_id,
                    status,
                    values,
                }
            }
            FmiTcpRequest::SetInteger {
                value_references,
                values,
                ..
            } => {
                let status = if value_references.len() != values.len() {
                    WireStatus::Error
                } else if let Some(status) = self.check_start_value_capable(&value_references) {
                    status
                } else {
                    self.adapter.set_integer(&value_references, &values)
                };
                FmiTcpResponse::SetInteger { message_id, status }
            }
            FmiTcpRequest::GetBoolean {
                value_references, ..
            } => {
                let (status, values) = self.adapter.get_boolean(&value_references);
                FmiTcpResponse::GetBoolean {
                    message_id,
                    status,
                    values,
                }
            }
            FmiTcpRequest::SetBoolean {
                value_references,
                values,
                ..
            } => {
                let status = if value_references.len() != values.len() {
                    WireStatus::Error
                } else if let Some(status) = self.check_start_value_capable(&value_references) {
                    status
                } else {
                    self.adapter.set_boolean(&value_references, &values)
                };
                FmiTcpResponse::SetBoolean { message_id, status }
            }
            FmiTcpRequest::GetString {
                value_references, ..
            } => {
                let (status, values) = self.adapter.get_string(&value_references);
                FmiTcpResponse::GetString {
                    message_id,
                    status,
                    values,
                }
            }
            FmiTcpRequest::SetString {
                value_references,
                values,
                ..
            } => {
                let status = if value_references.len() != values.len() {
                    WireStatus::Error
                } else if let Some(status) = self.check_start_value_capable(&value_references) {
                    status
                } else {
                    self.adapter.set_string(&value_references, &values)
                };
                FmiTcpResponse::SetString { message_id, status }
            }
            FmiTcpRequest::SetRealInputDerivatives {
                value_references,
                orders,
                values,
                ..
            } => {
                let status = if value_references.len() != orders.len()
                    || value_references.len() != values.len()
                {
                    WireStatus::Error
                } else {
                    self.adapter
                        .set_real_input_derivatives(&value_references, &orders, &values)
                };
                FmiTcpResponse::SetRealInputDerivatives { message_id, status }
            }
            FmiTcpRequest::GetRealOutputDerivatives {
                value_references,
                orders,
                ..
            } => {
                let (status, values) = if value_references.len() != orders.len() {
                    (WireStatus::Error, Vec::new())
                } else {
                    self.adapter
                        .get_real_output_derivatives(&value_references, &orders)
                };
                FmiTcpResponse::GetRealOutputDerivatives {
                    message_id,
                    status,
                    values,
                }
            }
            FmiTcpRequest::GetDirectionalDerivative {
                unknown_refs,
                known_refs,
                known_values,
                ..
            } => {
                let (status, values) = if known_refs.len() != known_values.len() {
                    (WireStatus::Error, Vec::new())
                } else {
                    self.adapter.get_directional_derivative(
                        &unknown_refs,
                        &known_refs,
                        &known_values,
                    )
                };
                FmiTcpResponse::GetDirectionalDerivative {
                    message_id,
                    status,
                    values,
                }
            }
            FmiTcpRequest::GetStatus { .. } => {
                let (status, value) = self.adapter.get_status();
                FmiTcpResponse::GetStatus {
                    message_id,
                    status,
                    value,
                }
            }
            FmiTcpRequest::GetRealStatus { .. } => {
                let (status, value) = self.adapter.get_real_status();
                FmiTcpResponse::GetRealStatus {
                    message_id,
                    status,
                    value,
                }
            }
            FmiTcpRequest::GetIntegerStatus { .. } => {
                let (status, value) = self.adapter.get_integer_status();
                FmiTcpResponse::GetIntegerStatus {
                    message_id,
                    status,
                    value,
                }
            }
            FmiTcpRequest::GetBooleanStatus { .. } => {
                let (status, value) = self.adapter.get_boolean_status();
                FmiTcpResponse::GetBooleanStatus {
                    message_id,
                    status,
                    value,
                }
            }
            FmiTcpRequest::GetStringStatus { .. } => {
                let (status, value) = self.adapter.get_string_status();
                FmiTcpResponse::GetStringStatus {
                    message_id,
                    status,
                    value,
                }
            }
            FmiTcpRequest::GetFmuState { .. } => {
                let (status, state_id) = self.adapter.get_fmu_state();
                FmiTcpResponse::GetFmuState {
                    message_id,
                    status,
                    state_id,
                }
            }
            FmiTcpRequest::SetFmuState { state_id, .. } => {
                let status = self.adapter.set_fmu_state(state_id);
                FmiTcpResponse::SetFmuState { message_id, status }
            }
            FmiTcpRequest::FreeFmuState { state_id, .. } => {
                let status = self.adapter.free_fmu_state(state_id);
                FmiTcpResponse::FreeFmuState { message_id, status }
            }
            FmiTcpRequest::SerializedFmuStateSize { state_id, .. } => {
                let (status, size) = self.adapter.serialized_fmu_state_size(state_id);
                FmiTcpResponse::SerializedFmuStateSize {
                    message_id,
                    status,
                    size,
                }
            }
            FmiTcpRequest::SerializeFmuState { state_id, .. } => {
                let (status, bytes) = self.adapter.serialize_fmu_state(state_id);
                FmiTcpResponse::SerializeFmuState {
                    message_id,
                    status,
                    bytes,
                }
            }
            FmiTcpRequest::DeSerializeFmuState { bytes, .. } => {
                let (status, state_id) = self.adapter.deserialize_fmu_state(&bytes);
                FmiTcpResponse::DeSerializeFmuState {
                    message_id,
                    status,
                    state_id,
                }
            }
            FmiTcpRequest::GetVersion { .. } => FmiTcpResponse::GetVersion {
                message_id,
                status: WireStatus::Ok,
                version: self.adapter.get_version(),
            },
            FmiTcpRequest::SetDebugLogging {
                logging_on,
                categories,
                ..
            } => {
                let status = self.adapter.set_debug_logging(logging_on, &categories);
                FmiTcpResponse::SetDebugLogging { message_id, status }
            }
            FmiTcpRequest::GetXml { .. } => FmiTcpResponse::GetXml {
                message_id,
                status: WireStatus::Ok,
                xml: self.adapter.get_xml(),
            },
            // Model-exchange placeholders are intercepted in `handle` before reaching here.
            _ => build_error_response(&req),
        }
    }
}

fn build_error_response(req: &FmiTcpRequest) -> FmiTcpResponse {
    let message_id = req.message_id();
    match req.op_kind() {
        OpKind::Instantiate => FmiTcpResponse::Instantiate {
            message_id,
            status: WireStatus::Error,
        },
        OpKind::InitializeSlave => FmiTcpResponse::InitializeSlave {
            message_id,
            status: WireStatus::Error,
        },
        OpKind::TerminateSlave => FmiTcpResponse::TerminateSlave {
            message_id,
            status: WireStatus::Error,
        },
        OpKind::ResetSlave => FmiTcpResponse::ResetSlave {
            message_id,
            status: WireStatus::Error,
        },
        OpKind::FreeSlaveInstance => FmiTcpResponse::FreeSlaveInstance {
            message_id,
            status: WireStatus::Error,
        },
        OpKind::DoStep => FmiTcpResponse::DoStep {
            message_id,
            status: WireStatus::Error,
        },
        OpKind::CancelStep => FmiTcpResponse::CancelStep {
            message_id,
            status: WireStatus::Error,
        },
        OpKind::GetReal => FmiTcpResponse::GetReal {
            message_id,
            status: WireStatus::Error,
            values: Vec::new(),
        },
        OpKind::SetReal => FmiTcpResponse::SetReal {
            message_id,
            status: WireStatus::Error,
        },
        OpKind::GetInteger => FmiTcpResponse::GetInteger {
            message_id,
            status: WireStatus::Error,
            values: Vec::new(),
        },
        OpKind::SetInteger => FmiTcpResponse::SetInteger {
            message_id,
            status: WireStatus::Error,
        },
        OpKind::GetBoolean => FmiTcpResponse::GetBoolean {
            message_id,
            status: WireStatus::Error,
            values: Vec::new(),
        },
        OpKind::SetBoolean => FmiTcpResponse::SetBoolean {
            message_id,
            status: WireStatus::Error,
        },
        OpKind::GetString => FmiTcpResponse::GetString {
            message_id,
            status: WireStatus::Error,
            values: Vec::new(),
        },
        OpKind::SetString => FmiTcpResponse::SetString {
            message_id,
            status: WireStatus::Error,
        },
        OpKind::SetRealInputDerivatives => FmiTcpResponse::SetRealInputDerivatives {
            message_id,
            status: WireStatus::Error,
        },
        OpKind::GetRealOutputDerivatives => FmiTcpResponse::GetRealOutputDerivatives {
            message_id,
            status: WireStatus::Error,
            values: Vec::new(),
        },
        OpKind::GetDirectionalDerivative => FmiTcpResponse::GetDirectionalDerivative {
            message_id,
            status: WireStatus::Error,
            values: Vec::new(),
        },
        OpKind::GetStatus => FmiTcpResponse::GetStatus {
            message_id,
            status: WireStatus::Error,
            value: WireStatus::Error,
        },
        OpKind::GetRealStatus => FmiTcpResponse::GetRealStatus {
            message_id,
            status: WireStatus::Error,
            value: 0.0,
        },
        OpKind::GetIntegerStatus => FmiTcpResponse::GetIntegerStatus {
            message_id,
            status: WireStatus::Error,
            value: 0,
        },
        OpKind::GetBooleanStatus => FmiTcpResponse::GetBooleanStatus {
            message_id,
            status: WireStatus::Error,
            value: false,
        },
        OpKind::GetStringStatus => FmiTcpResponse::GetStringStatus {
            message_id,
            status: WireStatus::Error,
            value: String::new(),
        },
        OpKind::GetFmuState => FmiTcpResponse::GetFmuState {
            message_id,
            status: WireStatus::Error,
            state_id: 0,
        },
        OpKind::SetFmuState => FmiTcpResponse::SetFmuState {
            message_id,
            status: WireStatus::Error,
        },
        OpKind::FreeFmuState => FmiTcpResponse::FreeFmuState {
            message_id,
            status: WireStatus::Error,
        },
        OpKind::SerializedFmuStateSize => FmiTcpResponse::SerializedFmuStateSize {
            message_id,
            status: WireStatus::Error,
            size: 0,
        },
        OpKind::SerializeFmuState => FmiTcpResponse::SerializeFmuState {
            message_id,
            status: WireStatus::Error,
            bytes: Vec::new(),
        },
        OpKind::DeSerializeFmuState => FmiTcpResponse::DeSerializeFmuState {
            message_id,
            status: WireStatus::Error,
            state_id: 0,
        },
        OpKind::GetVersion => FmiTcpResponse::GetVersion {
            message_id,
            status: WireStatus::Error,
            version: String::new(),
        },
        OpKind::SetDebugLogging => FmiTcpResponse::SetDebugLogging {
            message_id,
            status: WireStatus::Error,
        },
        OpKind::GetXml => FmiTcpResponse::GetXml {
            message_id,
            status: WireStatus::Error,
            xml: String::new(),
        },
        op => FmiTcpResponse::ModelExchangePlaceholder {
            message_id,
            op,
            status: WireStatus::Error,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::{DummyAdapter, VariableDescriptor};

    /// A [`DummyAdapter`] whose `do_step` reports `fatal`, to exercise the poisoning path.
    #[derive(Debug, Default)]
    struct FatalOnDoStep(DummyAdapter);

    impl SimulationAdapter for FatalOnDoStep {
        fn instantiate(&mut self, instance_name: &str, visible: bool) -> WireStatus {
            self.0.instantiate(instance_name, visible)
        }
        fn initialize_slave(
            &mut self,
            tolerance: Option<f64>,
            start_time: f64,
            stop_time: Option<f64>,
        ) -> WireStatus {
            self.0.initialize_slave(tolerance, start_time, stop_time)
        }
        fn do_step(&mut self, _: f64, _: f64, _: bool) -> WireStatus {
            WireStatus::Fatal
        }
        fn cancel_step(&mut self) -> WireStatus {
            self.0.cancel_step()
        }
        fn terminate_slave(&mut self) -> WireStatus {
            self.0.terminate_slave()
        }
        fn reset_slave(&mut self) -> WireStatus {
            self.0.reset_slave()
        }
        fn get_real(&mut self, value_refs: &[ValueRef]) -> (WireStatus, Vec<f64>) {
            self.0.get_real(value_refs)
        }
        fn set_real(&mut self, value_refs: &[ValueRef], values: &[f64]) -> WireStatus {
            self.0.set_real(value_refs, values)
        }
        fn get_integer(&mut self, value_refs: &[ValueRef]) -> (WireStatus, Vec<i32>) {
            self.0.get_integer(value_refs)
        }
        fn set_integer(&mut self, value_refs: &[ValueRef], values: &[i32]) -> WireStatus {
            self.0.set_integer(value_refs, values)
        }
        fn get_boolean(&mut self, value_refs: &[ValueRef]) -> (WireStatus, Vec<bool>) {
            self.0.get_boolean(value_refs)
        }
        fn set_boolean(&mut self, value_refs: &[ValueRef], values: &[bool]) -> WireStatus {
            self.0.set_boolean(value_refs, values)
        }
        fn get_string(&mut self, value_refs: &[ValueRef]) -> (WireStatus, Vec<String>) {
            self.0.get_string(value_refs)
        }
        fn set_string(&mut self, value_refs: &[ValueRef], values: &[String]) -> WireStatus {
            self.0.set_string(value_refs, values)
        }
        fn set_real_input_derivatives(
            &mut self,
            value_refs: &[ValueRef],
            orders: &[i32],
            values: &[f64],
        ) -> WireStatus {
            self.0.set_real_input_derivatives(value_refs, orders, values)
        }
        fn get_real_output_derivatives(
            &mut self,
            value_refs: &[ValueRef],
            orders: &[i32],
        ) -> (WireStatus, Vec<f64>) {
            self.0.get_real_output_derivatives(value_refs, orders)
        }
        fn get_directional_derivative(
            &mut self,
            unknown_refs: &[ValueRef],
            known_refs: &[ValueRef],
            known_values: &[f64],
        ) -> (WireStatus, Vec<f64>) {
            self.0
                .get_directional_derivative(unknown_refs, known_refs, known_values)
        }
        fn get_status(&mut self) -> (WireStatus, WireStatus) {
            self.0.get_status()
        }
        fn get_real_status(&mut self) -> (WireStatus, f64) {
            self.0.get_real_status()
        }
        fn get_integer_status(&mut self) -> (WireStatus, i32) {
            self.0.get_integer_status()
        }
        fn get_boolean_status(&mut self) -> (WireStatus, bool) {
            self.0.get_boolean_status()
        }
        fn get_string_status(&mut self) -> (WireStatus, String) {
            self.0.get_string_status()
        }
        fn get_fmu_state(&mut self) -> (WireStatus, u32) {
            self.0.get_fmu_state()
        }
        fn set_fmu_state(&mut self, state_id: u32) -> WireStatus {
            self.0.set_fmu_state(state_id)
        }
        fn free_fmu_state(&mut self, state_id: u32) -> WireStatus {
            self.0.free_fmu_state(state_id)
        }
        fn serialized_fmu_state_size(&mut self, state_id: u32) -> (WireStatus, u32) {
            self.0.serialized_fmu_state_size(state_id)
        }
        fn serialize_fmu_state(&mut self, state_id: u32) -> (WireStatus, Vec<u8>) {
            self.0.serialize_fmu_state(state_id)
        }
        fn deserialize_fmu_state(&mut self, bytes: &[u8]) -> (WireStatus, u32) {
            self.0.deserialize_fmu_state(bytes)
        }
        fn get_version(&self) -> String {
            self.0.get_version()
        }
        fn set_debug_logging(&mut self, enabled: bool, categories: &[String]) -> WireStatus {
            self.0.set_debug_logging(enabled, categories)
        }
        fn get_xml(&self) -> String {
            self.0.get_xml()
        }
        fn describe_variable(&self, value_ref: ValueRef) -> Option<VariableDescriptor> {
            self.0.describe_variable(value_ref)
        }
        fn free(&mut self) {
            self.0.free()
        }
    }

    /// A [`DummyAdapter`] with a fixed variable catalogue: value reference 1 is start-value
    /// capable, 2 is declared but not capable, and anything else is unknown to the catalogue.
    #[derive(Debug, Default)]
    struct CatalogueAdapter(DummyAdapter);

    impl SimulationAdapter for CatalogueAdapter {
        fn instantiate(&mut self, instance_name: &str, visible: bool) -> WireStatus {
            self.0.instantiate(instance_name, visible)
        }
        fn initialize_slave(
            &mut self,
            tolerance: Option<f64>,
            start_time: f64,
            stop_time: Option<f64>,
        ) -> WireStatus {
            self.0.initialize_slave(tolerance, start_time, stop_time)
        }
        fn do_step(&mut self, a: f64, b: f64, c: bool) -> WireStatus {
            self.0.do_step(a, b, c)
        }
        fn cancel_step(&mut self) -> WireStatus {
            self.0.cancel_step()
        }
        fn terminate_slave(&mut self) -> WireStatus {
            self.0.terminate_slave()
        }
        fn reset_slave(&mut self) -> WireStatus {
            self.0.reset_slave()
        }
        fn get_real(&mut self, value_refs: &[ValueRef]) -> (WireStatus, Vec<f64>) {
            self.0.get_real(value_refs)
        }
        fn set_real(&mut self, value_refs: &[ValueRef], values: &[f64]) -> WireStatus {
            self.0.set_real(value_refs, values)
        }
        fn get_integer(&mut self, value_refs: &[ValueRef]) -> (WireStatus, Vec<i32>) {
            self.0.get_integer(value_refs)
        }
        fn set_integer(&mut self, value_refs: &[ValueRef], values: &[i32]) -> WireStatus {
            self.0.set_integer(value_refs, values)
        }
        fn get_boolean(&mut self, value_refs: &[ValueRef]) -> (WireStatus, Vec<bool>) {
            self.0.get_boolean(value_refs)
        }
        fn set_boolean(&mut self, value_refs: &[ValueRef], values: &[bool]) -> WireStatus {
            self.0.set_boolean(value_refs, values)
        }
        fn get_string(&mut self, value_refs: &[ValueRef]) -> (WireStatus, Vec<String>) {
            self.0.get_string(value_refs)
        }
        fn set_string(&mut self, value_refs: &[ValueRef], values: &[String]) -> WireStatus {
            self.0.set_string(value_refs, values)
        }
        fn set_real_input_derivatives(
            &mut self,
            value_refs: &[ValueRef],
            orders: &[i32],
            values: &[f64],
        ) -> WireStatus {
            self.0.set_real_input_derivatives(value_refs, orders, values)
        }
        fn get_real_output_derivatives(
            &mut self,
            value_refs: &[ValueRef],
            orders: &[i32],
        ) -> (WireStatus, Vec<f64>) {
            self.0.get_real_output_derivatives(value_refs, orders)
        }
        fn get_directional_derivative(
            &mut self,
            unknown_refs: &[ValueRef],
            known_refs: &[ValueRef],
            known_values: &[f64],
        ) -> (WireStatus, Vec<f64>) {
            self.0
                .get_directional_derivative(unknown_refs, known_refs, known_values)
        }
        fn get_status(&mut self) -> (WireStatus, WireStatus) {
            self.0.get_status()
        }
        fn get_real_status(&mut self) -> (WireStatus, f64) {
            self.0.get_real_status()
        }
        fn get_integer_status(&mut self) -> (WireStatus, i32) {
            self.0.get_integer_status()
        }
        fn get_boolean_status(&mut self) -> (WireStatus, bool) {
            self.0.get_boolean_status()
        }
        fn get_string_status(&mut self) -> (WireStatus, String) {
            self.0.get_string_status()
        }
        fn get_fmu_state(&mut self) -> (WireStatus, u32) {
            self.0.get_fmu_state()
        }
        fn set_fmu_state(&mut self, state_id: u32) -> WireStatus {
            self.0.set_fmu_state(state_id)
        }
        fn free_fmu_state(&mut self, state_id: u32) -> WireStatus {
            self.0.free_fmu_state(state_id)
        }
        fn serialized_fmu_state_size(&mut self, state_id: u32) -> (WireStatus, u32) {
            self.0.serialized_fmu_state_size(state_id)
        }
        fn serialize_fmu_state(&mut self, state_id: u32) -> (WireStatus, Vec<u8>) {
            self.0.serialize_fmu_state(state_id)
        }
        fn deserialize_fmu_state(&mut self, bytes: &[u8]) -> (WireStatus, u32) {
            self.0.deserialize_fmu_state(bytes)
        }
        fn get_version(&self) -> String {
            self.0.get_version()
        }
        fn set_debug_logging(&mut self, enabled: bool, categories: &[String]) -> WireStatus {
            self.0.set_debug_logging(enabled, categories)
        }
        fn get_xml(&self) -> String {
            self.0.get_xml()
        }
        fn describe_variable(&self, value_ref: ValueRef) -> Option<VariableDescriptor> {
            match value_ref {
                1 => Some(VariableDescriptor {
                    name: "capable".to_owned(),
                    value_reference: 1,
                    primitive_type: crate::adapter::PrimitiveType::Real,
                    start_value_capable: true,
                }),
                2 => Some(VariableDescriptor {
                    name: "not_capable".to_owned(),
                    value_reference: 2,
                    primitive_type: crate::adapter::PrimitiveType::Real,
                    start_value_capable: false,
                }),
                _ => None,
            }
        }
        fn free(&mut self) {
            self.0.free()
        }
    }

    fn dispatcher() -> Dispatcher<DummyAdapter> {
        Dispatcher::new(
            DummyAdapter,
            LifecycleState::Loaded,
            DispatcherConfig::default(),
        )
    }

    #[test]
    fn handshake_scenario() {
        let mut d = dispatcher();
        let resp = d
            .handle(FmiTcpRequest::Instantiate {
                message_id: 1,
                fmu_id: 0,
                instance_name: "inst1".to_owned(),
                visible: false,
            })
            .unwrap();
        assert_eq!(resp.message_id(), 1);
        assert_eq!(resp.status(), WireStatus::Ok);
        assert_eq!(d.state(), LifecycleState::Instantiated);
    }

    #[test]
    fn illegal_do_step_before_init_leaves_state_unchanged() {
        let mut d = dispatcher();
        d.handle(FmiTcpRequest::Instantiate {
            message_id: 1,
            fmu_id: 0,
            instance_name: "inst1".to_owned(),
            visible: false,
        });
        let resp = d
            .handle(FmiTcpRequest::DoStep {
                message_id: 6,
                fmu_id: 0,
                current_communication_point: 0.0,
                communication_step_size: 0.1,
                new_step: true,
            })
            .unwrap();
        assert_eq!(resp.message_id(), 6);
        assert_eq!(resp.status(), WireStatus::Error);
        assert_eq!(d.state(), LifecycleState::Instantiated);
    }

    #[test]
    fn full_end_to_end_scenario_matches_spec_example() {
        let mut d = dispatcher();
        assert_eq!(
            d.handle(FmiTcpRequest::Instantiate {
                message_id: 1,
                fmu_id: 0,
                instance_name: "inst1".to_owned(),
                visible: false,
            })
            .unwrap()
            .status(),
            WireStatus::Ok
        );
        assert_eq!(
            d.handle(FmiTcpRequest::InitializeSlave {
                message_id: 2,
                fmu_id: 0,
                tolerance: None,
                start_time: 0.0,
                stop_time: Some(1.0),
            })
            .unwrap()
            .status(),
            WireStatus::Ok
        );
        assert_eq!(
            d.handle(FmiTcpRequest::DoStep {
                message_id: 3,
                fmu_id: 0,
                current_communication_point: 0.0,
                communication_step_size: 0.1,
                new_step: true,
            })
            .unwrap()
            .status(),
            WireStatus::Ok
        );
        assert_eq!(
            d.handle(FmiTcpRequest::SetReal {
                message_id: 4,
                fmu_id: 0,
                value_references: vec![7],
                values: vec![3.14],
            })
            .unwrap()
            .status(),
            WireStatus::Ok
        );
        let get_resp = d
            .handle(FmiTcpRequest::GetReal {
                message_id: 5,
                fmu_id: 0,
                value_references: vec![7],
            })
            .unwrap();
        assert_eq!(get_resp.message_id(), 5);
        assert_eq!(get_resp.status(), WireStatus::Ok);

        assert_eq!(
            d.handle(FmiTcpRequest::TerminateSlave {
                message_id: 7,
                fmu_id: 0,
            })
            .unwrap()
            .status(),
            WireStatus::Ok
        );
        let free1 = d
            .handle(FmiTcpRequest::FreeSlaveInstance {
                message_id: 8,
                fmu_id: 0,
            })
            .unwrap();
        assert_eq!(free1.status(), WireStatus::Ok);

        // Idempotent free: a second free still succeeds.
        let free2 = d
            .handle(FmiTcpRequest::FreeSlaveInstance {
                message_id: 9,
                fmu_id: 0,
            })
            .unwrap();
        assert_eq!(free2.status(), WireStatus::Ok);
        assert_eq!(d.state(), LifecycleState::Freed);
    }

    #[test]
    fn array_length_mismatch_on_set_real_is_an_argument_error() {
        let mut d = dispatcher();
        d.handle(FmiTcpRequest::Instantiate {
            message_id: 1,
            fmu_id: 0,
            instance_name: "inst1".to_owned(),
            visible: false,
        });
        let resp = d
            .handle(FmiTcpRequest::SetReal {
                message_id: 2,
                fmu_id: 0,
                value_references: vec![1, 2],
                values: vec![1.0],
            })
            .unwrap();
        assert_eq!(resp.status(), WireStatus::Error);
    }

    #[test]
    fn get_real_returns_one_value_per_value_reference() {
        let mut d = dispatcher();
        d.handle(FmiTcpRequest::Instantiate {
            message_id: 1,
            fmu_id: 0,
            instance_name: "inst1".to_owned(),
            visible: false,
        });
        let resp = d
            .handle(FmiTcpRequest::GetReal {
                message_id: 2,
                fmu_id: 0,
                value_references: vec![1, 2, 3],
            })
            .unwrap();
        match resp {
            FmiTcpResponse::GetReal { values, .. } => assert_eq!(values.len(), 3),
            _ => panic!("expected GetReal"),
        }
    }

    #[test]
    fn unimplemented_model_exchange_op_gets_explicit_error_by_default() {
        let mut d = dispatcher();
        let resp = d
            .handle(FmiTcpRequest::SetTime {
                message_id: 1,
                fmu_id: 0,
                time: 0.0,
            })
            .unwrap();
        assert_eq!(resp.status(), WireStatus::Error);
    }

    #[test]
    fn unimplemented_model_exchange_op_can_be_configured_to_silently_drop() {
        let mut d = Dispatcher::new(
            DummyAdapter,
            LifecycleState::Loaded,
            DispatcherConfig {
                silent_drop_unimplemented: true,
                ..Default::default()
            },
        );
        let resp = d.handle(FmiTcpRequest::SetTime {
            message_id: 1,
            fmu_id: 0,
            time: 0.0,
        });
        assert!(resp.is_none());
    }

    #[test]
    fn dummy_mode_answers_everything_ok_regardless_of_order() {
        let mut d = Dispatcher::new(
            DummyAdapter,
            LifecycleState::Dummy,
            DispatcherConfig::default(),
        );
        let resp = d
            .handle(FmiTcpRequest::DoStep {
                message_id: 1,
                fmu_id: 0,
                current_communication_point: 0.0,
                communication_step_size: 1.0,
                new_step: true,
            })
            .unwrap();
        assert_eq!(resp.status(), WireStatus::Ok);
        assert_eq!(d.state(), LifecycleState::Dummy);
    }

    #[test]
    fn instantiated_rejects_writes_to_non_start_value_capable_variables() {
        let mut d = Dispatcher::new(
            CatalogueAdapter::default(),
            LifecycleState::Loaded,
            DispatcherConfig::default(),
        );
        d.handle(FmiTcpRequest::Instantiate {
            message_id: 1,
            fmu_id: 0,
            instance_name: "inst1".to_owned(),
            visible: false,
        });
        assert_eq!(d.state(), LifecycleState::Instantiated);

        let ok = d
            .handle(FmiTcpRequest::SetReal {
                message_id: 2,
                fmu_id: 0,
                value_references: vec![1],
                values: vec![3.14],
            })
            .unwrap();
        assert_eq!(ok.status(), WireStatus::Ok);

        let declared_not_capable = d
            .handle(FmiTcpRequest::SetReal {
                message_id: 3,
                fmu_id: 0,
                value_references: vec![2],
                values: vec![1.0],
            })
            .unwrap();
        assert_eq!(declared_not_capable.status(), WireStatus::Error);

        let unknown_to_catalogue = d
            .handle(FmiTcpRequest::SetReal {
                message_id: 4,
                fmu_id: 0,
                value_references: vec![99],
                values: vec![1.0],
            })
            .unwrap();
        assert_eq!(unknown_to_catalogue.status(), WireStatus::Error);
    }

    #[test]
    fn fatal_status_poisons_the_instance() {
        let mut d = Dispatcher::new(
            FatalOnDoStep::default(),
            LifecycleState::Initialized,
            DispatcherConfig::default(),
        );
        let resp = d
            .handle(FmiTcpRequest::DoStep {
                message_id: 1,
                fmu_id: 0,
                current_communication_point: 0.0,
                communication_step_size: 0.1,
                new_step: true,
            })
            .unwrap();
        assert_eq!(resp.status(), WireStatus::Fatal);
        assert_eq!(d.state(), LifecycleState::Poisoned);

        let resp = d
            .handle(FmiTcpRequest::GetVersion {
                message_id: 2,
                fmu_id: 0,
            })
            .unwrap();
        assert_eq!(resp.status(), WireStatus::Error);
    }
}
