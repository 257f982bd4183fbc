//! The request/response wire schema for the FMI 2.0 Co-Simulation TCP protocol.
//!
//! Every request carries a `message_id`, echoed verbatim on the matching response, and an
//! `fmu_id` identifying the target simulation instance (a single-instance server ignores its
//! value but must still echo it).

use serde::{Deserialize, Serialize};

/// Opaque value reference, as assigned by the simulation adapter to a model variable.
pub type ValueRef = u32;

/// Status mirrored 1:1 from the native FMI status enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WireStatus {
    Ok,
    Warning,
    Discard,
    Error,
    Fatal,
    Pending,
}

impl WireStatus {
    pub fn is_ok_or_warning(&self) -> bool {
        matches!(self, WireStatus::Ok | WireStatus::Warning)
    }
}

/// The operation an [`FmiTcpRequest`]/[`FmiTcpResponse`] pair carries. Used as the dispatch
/// table key so adding an operation never touches a branch chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OpKind {
    Instantiate,
    InitializeSlave,
    TerminateSlave,
    ResetSlave,
    FreeSlaveInstance,
    DoStep,
    CancelStep,
    GetReal,
    SetReal,
    GetInteger,
    SetInteger,
    GetBoolean,
    SetBoolean,
    GetString,
    SetString,
    SetRealInputDerivatives,
    GetRealOutputDerivatives,
    GetDirectionalDerivative,
    GetStatus,
    GetRealStatus,
    GetIntegerStatus,
    GetBooleanStatus,
    GetStringStatus,
    GetFmuState,
    SetFmuState,
    FreeFmuState,
    SerializedFmuStateSize,
    SerializeFmuState,
    DeSerializeFmuState,
    GetVersion,
    SetDebugLogging,
    GetXml,
    // Model-exchange placeholders: accepted by the decoder, answered with an explicit error by
    // default (see `DispatcherConfig::silent_drop_unimplemented`).
    InstantiateModel,
    FreeModelInstance,
    SetTime,
    SetContinuousStates,
    CompletedIntegratorStep,
    InitializeModel,
    GetDerivatives,
    GetEventIndicators,
    EventUpdate,
    CompletedEventIteration,
    GetContinuousStates,
    GetNominalContinuousStates,
    Terminate,
}

impl OpKind {
    /// The model-exchange placeholder operations, carried over unchanged from the original
    /// protocol but out of scope for co-simulation.
    pub fn is_model_exchange_placeholder(&self) -> bool {
        matches!(
            self,
            OpKind::InstantiateModel
                | OpKind::FreeModelInstance
                | OpKind::SetTime
                | OpKind::SetContinuousStates
                | OpKind::CompletedIntegratorStep
                | OpKind::InitializeModel
                | OpKind::GetDerivatives
                | OpKind::GetEventIndicators
                | OpKind::EventUpdate
                | OpKind::CompletedEventIteration
                | OpKind::GetContinuousStates
                | OpKind::GetNominalContinuousStates
                | OpKind::Terminate
        )
    }
}

macro_rules! op_kind_of {
    ($req:expr) => {
        match $req {
            FmiTcpRequest::Instantiate { .. } => OpKind::Instantiate,
            FmiTcpRequest::InitializeSlave { .. } => OpKind::InitializeSlave,
            FmiTcpRequest::TerminateSlave { .. } => OpKind::TerminateSlave,
            FmiTcpRequest::ResetSlave { .. } => OpKind::ResetSlave,
            FmiTcpRequest::FreeSlaveInstance { .. } => OpKind::FreeSlaveInstance,
            FmiTcpRequest::DoStep { .. } => OpKind::DoStep,
            FmiTcpRequest::CancelStep { .. } => OpKind::CancelStep,
            FmiTcpRequest::GetReal { .. } => OpKind::GetReal,
            FmiTcpRequest::SetReal { .. } => OpKind::SetReal,
            FmiTcpRequest::GetInteger { .. } => OpKind::GetInteger,
            FmiTcpRequest::SetInteger { .. } => OpKind::SetInteger,
            FmiTcpRequest::GetBoolean { .. } => OpKind::GetBoolean,
            FmiTcpRequest::SetBoolean { .. } => OpKind::SetBoolean,
            FmiTcpRequest::GetString { .. } => OpKind::GetString,
            FmiTcpRequest::SetString { .. } => OpKind::SetString,
            FmiTcpRequest::SetRealInputDerivatives { .. } => OpKind::SetRealInputDerivatives,
            FmiTcpRequest::GetRealOutputDerivatives { .. } => OpKind::GetRealOutputDerivatives,
            FmiTcpRequest::GetDirectionalDerivative { .. } => OpKind::GetDirectionalDerivative,
            FmiTcpRequest::GetStatus { .. } => OpKind::GetStatus,
            FmiTcpRequest::GetRealStatus { .. } => OpKind::GetRealStatus,
            FmiTcpRequest::GetIntegerStatus { .. } => OpKind::GetIntegerStatus,
            FmiTcpRequest::GetBooleanStatus { .. } => OpKind::GetBooleanStatus,
            FmiTcpRequest::GetStringStatus { .. } => OpKind::GetStringStatus,
            FmiTcpRequest::GetFmuState { .. } => OpKind::GetFmuState,
            FmiTcpRequest::SetFmuState { .. } => OpKind::SetFmuState,
            FmiTcpRequest::FreeFmuState { .. } => OpKind::FreeFmuState,
            FmiTcpRequest::SerializedFmuStateSize { .. } => OpKind::SerializedFmuStateSize,
            FmiTcpRequest::SerializeFmuState { .. } => OpKind::SerializeFmuState,
            FmiTcpRequest::DeSerializeFmuState { .. } => OpKind::DeSerializeFmuState,
            FmiTcpRequest::GetVersion { .. } => OpKind::GetVersion,
            FmiTcpRequest::SetDebugLogging { .. } => OpKind::SetDebugLogging,
            FmiTcpRequest::GetXml { .. } => OpKind::GetXml,
            FmiTcpRequest::InstantiateModel { .. } => OpKind::InstantiateModel,
            FmiTcpRequest::FreeModelInstance { .. } => OpKind::FreeModelInstance,
            FmiTcpRequest::SetTime { .. } => OpKind::SetTime,
            FmiTcpRequest::SetContinuousStates { .. } => OpKind::SetContinuousStates,
            FmiTcpRequest::CompletedIntegratorStep { .. } => OpKind::CompletedIntegratorStep,
            FmiTcpRequest::InitializeModel { .. } => OpKind::InitializeModel,
            FmiTcpRequest::GetDerivatives { .. } => OpKind::GetDerivatives,
            FmiTcpRequest::GetEventIndicators { .. } => OpKind::GetEventIndicators,
            FmiTcpRequest::EventUpdate { .. } => OpKind::EventUpdate,
            FmiTcpRequest::CompletedEventIteration { .. } => OpKind::CompletedEventIteration,
            FmiTcpRequest::GetContinuousStates { .. } => OpKind::GetContinuousStates,
            FmiTcpRequest::GetNominalContinuousStates { .. } => OpKind::GetNominalContinuousStates,
            FmiTcpRequest::Terminate { .. } => OpKind::Terminate,
        }
    };
}

/// A decoded request. `message_id` and `fmu_id` are common to every variant; the remaining
/// fields are the operation's typed arguments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum FmiTcpRequest {
    Instantiate {
        message_id: u32,
        fmu_id: u32,
        instance_name: String,
        visible: bool,
    },
    InitializeSlave {
        message_id: u32,
        fmu_id: u32,
        tolerance: Option<f64>,
        start_time: f64,
        stop_time: Option<f64>,
    },
    TerminateSlave {
        message_id: u32,
        fmu_id: u32,
    },
    ResetSlave {
        message_id: u32,
        fmu_id: u32,
    },
    FreeSlaveInstance {
        message_id: u32,
        fmu_id: u32,
    },
    DoStep {
        message_id: u32,
        fmu_id: u32,
        current_communication_point: f64,
        communication_step_size: f64,
        new_step: bool,
    },
    CancelStep {
        message_id: u32,
        fmu_id: u32,
    },
    GetReal {
        message_id: u32,
        fmu_id: u32,
        value_references: Vec<ValueRef>,
    },
    SetReal {
        message_id: u32,
        fmu_id: u32,
        value_references: Vec<ValueRef>,
        values: Vec<f64>,
    },
    GetInteger {
        message_id: u32,
        fmu_id: u32,
        value_references: Vec<ValueRef>,
    },
    SetInteger {
        message_id: u32,
        fmu_id: u32,
        value_references: Vec<ValueRef>,
        values: Vec<i32>,
    },
    GetBoolean {
        message_id: u32,
        fmu_id: u32,
        value_references: Vec<ValueRef>,
    },
    SetBoolean {
        message_id: u32,
        fmu_id: u32,
        value_references: Vec<ValueRef>,
        values: Vec<bool>,
    },
    GetString {
        message_id: u32,
        fmu_id: u32,
        value_references: Vec<ValueRef>,
    },
    SetString {
        message_id: u32,
        fmu_id: u32,
        value_references: Vec<ValueRef>,
        values: Vec<String>,
    },
    SetRealInputDerivatives {
        message_id: u32,
        fmu_id: u32,
        value_references: Vec<ValueRef>,
        orders: Vec<i32>,
        values: Vec<f64>,
    },
    GetRealOutputDerivatives {
        message_id: u32,
        fmu_id: u32,
        value_references: Vec<ValueRef>,
        orders: Vec<i32>,
    },
    GetDirectionalDerivative {
        message_id: u32,
        fmu_id: u32,
        unknown_refs: Vec<ValueRef>,
        known_refs: Vec<ValueRef>,
        known_values: Vec<f64>,
    },
    GetStatus {
        message_id: u32,
        fmu_id: u32,
    },
    GetRealStatus {
        message_id: u32,
        fmu_id: u32,
    },
    GetIntegerStatus {
        message_id: u32,
        fmu_id: u32,
    },
    GetBooleanStatus {
        message_id: u32,
        fmu_id: u32,
    },
    GetStringStatus {
        message_id: u32,
        fmu_id: u32,
    },
    GetFmuState {
        message_id: u32,
        fmu_id: u32,
    },
    SetFmuState {
        message_id: u32,
        fmu_id: u32,
        state_id: u32,
    },
    FreeFmuState {
        message_id: u32,
        fmu_id: u32,
        state_id: u32,
    },
    SerializedFmuStateSize {
        message_id: u32,
        fmu_id: u32,
        state_id: u32,
    },
    SerializeFmuState {
        message_id: u32,
        fmu_id: u32,
        state_id: u32,
    },
    DeSerializeFmuState {
        message_id: u32,
        fmu_id: u32,
        bytes: Vec<u8>,
    },
    GetVersion {
        message_id: u32,
        fmu_id: u32,
    },
    SetDebugLogging {
        message_id: u32,
        fmu_id: u32,
        logging_on: bool,
        categories: Vec<String>,
    },
    GetXml {
        message_id: u32,
        fmu_id: u32,
    },
    // Model-exchange placeholders (accepted, answered per `DispatcherConfig`).
    InstantiateModel {
        message_id: u32,
        fmu_id: u32,
    },
    FreeModelInstance {
        message_id: u32,
        fmu_id: u32,
    },
    SetTime {
        message_id: u32,
        fmu_id: u32,
        time: f64,
    },
    SetContinuousStates {
        message_id: u32,
        fmu_id: u32,
        states: Vec<f64>,
    },
    CompletedIntegratorStep {
        message_id: u32,
        fmu_id: u32,
    },
    InitializeModel {
        message_id: u32,
        fmu_id: u32,
    },
    GetDerivatives {
        message_id: u32,
        fmu_id: u32,
    },
    GetEventIndicators {
        message_id: u32,
        fmu_id: u32,
    },
    EventUpdate {
        message_id: u32,
        fmu_id: u32,
    },
    CompletedEventIteration {
        message_id: u32,
        fmu_id: u32,
    },
    GetContinuousStates {
        message_id: u32,
        fmu_id: u32,
    },
    GetNominalContinuousStates {
        message_id: u32,
        fmu_id: u32,
    },
    Terminate {
        message_id: u32,
        fmu_id: u32,
    },
}

impl FmiTcpRequest {
    pub fn message_id(&self) -> u32 {
        match_message_id(self)
    }

    pub fn op_kind(&self) -> OpKind {
        op_kind_of!(self)
    }
}

macro_rules! match_message_id_body {
    ($self:expr) => {
        match $self {
            FmiTcpRequest::Instantiate { message_id, .. }
            | FmiTcpRequest::InitializeSlave { message_id, .. }
            | FmiTcpRequest::TerminateSlave { message_id, .. }
            | FmiTcpRequest::ResetSlave { message_id, .. }
            | FmiTcpRequest::FreeSlaveInstance { message_id, .. }
            | FmiTcpRequest::DoStep { message_id, .. }
            | FmiTcpRequest::CancelStep { message_id, .. }
            | FmiTcpRequest::GetReal { message_id, .. }
            | FmiTcpRequest::SetReal { message_id, .. }
            | FmiTcpRequest::GetInteger { message_id, .. }
            | FmiTcpRequest::SetInteger { message_id, .. }
            | FmiTcpRequest::GetBoolean { message_id, .. }
            | FmiTcpRequest::SetBoolean { message_id, .. }
            | FmiTcpRequest::GetString { message_id, .. }
            | FmiTcpRequest::SetString { message_id, .. }
            | FmiTcpRequest::SetRealInputDerivatives { message_id, .. }
            | FmiTcpRequest::GetRealOutputDerivatives { message_id, .. }
            | FmiTcpRequest::GetDirectionalDerivative { message_id, .. }
            | FmiTcpRequest::GetStatus { message_id, .. }
            | FmiTcpRequest::GetRealStatus { message_id, .. }
            | FmiTcpRequest::GetIntegerStatus { message_id, .. }
            | FmiTcpRequest::GetBooleanStatus { message_id, .. }
            | FmiTcpRequest::GetStringStatus { message_id, .. }
            | FmiTcpRequest::GetFmuState { message_id, .. }
            | FmiTcpRequest::SetFmuState { message_id, .. }
            | FmiTcpRequest::FreeFmuState { message_id, .. }
            | FmiTcpRequest::SerializedFmuStateSize { message_id, .. }
            | FmiTcpRequest::SerializeFmuState { message_id, .. }
            | FmiTcpRequest::DeSerializeFmuState { message_id, .. }
            | FmiTcpRequest::GetVersion { message_id, .. }
            | FmiTcpRequest::SetDebugLogging { message_id, .. }
            | FmiTcpRequest::GetXml { message_id, .. }
            | FmiTcpRequest::InstantiateModel { message_id, .. }
            | FmiTcpRequest::FreeModelInstance { message_id, .. }
            | FmiTcpRequest::SetTime { message_id, .. }
            | FmiTcpRequest::SetContinuousStates { message_id, .. }
            | FmiTcpRequest::CompletedIntegratorStep { message_id, .. }
            | FmiTcpRequest::InitializeModel { message_id, .. }
            | FmiTcpRequest::GetDerivatives { message_id, .. }
            | FmiTcpRequest::GetEventIndicators { message_id, .. }
            | FmiTcpRequest::EventUpdate { message_id, .. }
            | FmiTcpRequest::CompletedEventIteration { message_id, .. }
            | FmiTcpRequest::GetContinuousStates { message_id, .. }
            | FmiTcpRequest::GetNominalContinuousStates { message_id, .. }
            | FmiTcpRequest::Terminate { message_id, .. } => *message_id,
        }
    };
}

fn match_message_id(req: &FmiTcpRequest) -> u32 {
    match_message_id_body!(req)
}

/// A response. Every variant echoes the triggering request's `message_id` and carries a
/// [`WireStatus`]; typed payloads are only populated when `status.is_ok_or_warning()`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum FmiTcpResponse {
    Instantiate {
        message_id: u32,
        status: WireStatus,
    },
    InitializeSlave {
        message_id: u32,
        status: WireStatus,
    },
    TerminateSlave {
        message_id: u32,
        status: WireStatus,
    },
    ResetSlave {
        message_id: u32,
        status: WireStatus,
    },
    FreeSlaveInstance {
        message_id: u32,
        status: WireStatus,
    },
    DoStep {
        message_id: u32,
        status: WireStatus,
    },
    CancelStep {
        message_id: u32,
        status: WireStatus,
    },
    GetReal {
        message_id: u32,
        status: WireStatus,
        values: Vec<f64>,
    },
    SetReal {
        message_id: u32,
        status: WireStatus,
    },
    GetInteger {
        message_id: u32,
        status: WireStatus,
        values: Vec<i32>,
    },
    SetInteger {
        message_id: u32,
        status: WireStatus,
    },
    GetBoolean {
        message_id: u32,
        status: WireStatus,
        values: Vec<bool>,
    },
    SetBoolean {
        message_id: u32,
        status: WireStatus,
    },
    GetString {
        message_id: u32,
        status: WireStatus,
        values: Vec<String>,
    },
    SetString {
        message_id: u32,
        status: WireStatus,
    },
    SetRealInputDerivatives {
        message_id: u32,
        status: WireStatus,
    },
    GetRealOutputDerivatives {
        message_id: u32,
        status: WireStatus,
        values: Vec<f64>,
    },
    GetDirectionalDerivative {
        message_id: u32,
        status: WireStatus,
        values: Vec<f64>,
    },
    GetStatus {
        message_id: u32,
        status: WireStatus,
        value: WireStatus,
    },
    GetRealStatus {
        message_id: u32,
        status: WireStatus,
        value: f64,
    },
    GetIntegerStatus {
        message_id: u32,
        status: WireStatus,
        value: i32,
    },
    GetBooleanStatus {
        message_id: u32,
        status: WireStatus,
        value: bool,
    },
    GetStringStatus {
        message_id: u32,
        status: WireStatus,
        value: String,
    },
    GetFmuState {
        message_id: u32,
        status: WireStatus,
        state_id: u32,
    },
    SetFmuState {
        message_id: u32,
        status: WireStatus,
    },
    FreeFmuState {
        message_id: u32,
        status: WireStatus,
    },
    SerializedFmuStateSize {
        message_id: u32,
        status: WireStatus,
        size: u32,
    },
    SerializeFmuState {
        message_id: u32,
        status: WireStatus,
        bytes: Vec<u8>,
    },
    DeSerializeFmuState {
        message_id: u32,
        status: WireStatus,
        state_id: u32,
    },
    GetVersion {
        message_id: u32,
        status: WireStatus,
        version: String,
    },
    SetDebugLogging {
        message_id: u32,
        status: WireStatus,
    },
    GetXml {
        message_id: u32,
        status: WireStatus,
        xml: String,
    },
    // Model-exchange placeholders share a single response shape: status only.
    ModelExchangePlaceholder {
        message_id: u32,
        op: OpKind,
        status: WireStatus,
    },
}

impl FmiTcpResponse {
    pub fn message_id(&self) -> u32 {
        match self {
            FmiTcpResponse::Instantiate { message_id, .. }
            | FmiTcpResponse::InitializeSlave { message_id, .. }
            | FmiTcpResponse::TerminateSlave { message_id, .. }
            | FmiTcpResponse::ResetSlave { message_id, .. }
            | FmiTcpResponse::FreeSlaveInstance { message_id, .. }
            | FmiTcpResponse::DoStep { message_id, .. }
            | FmiTcpResponse::CancelStep { message_id, .. }
            | FmiTcpResponse::GetReal { message_id, .. }
            | FmiTcpResponse::SetReal { message_id, .. }
            | FmiTcpResponse::GetInteger { message_id, .. }
            | FmiTcpResponse::SetInteger { message_id, .. }
            | FmiTcpResponse::GetBoolean { message_id, .. }
            | FmiTcpResponse::SetBoolean { message_id, .. }
            | FmiTcpResponse::GetString { message_id, .. }
            | FmiTcpResponse::SetString { message_id, .. }
            | FmiTcpResponse::SetRealInputDerivatives { message_id, .. }
            | FmiTcpResponse::GetRealOutputDerivatives { message_id, .. }
            | FmiTcpResponse::GetDirectionalDerivative { message_id, .. }
            | FmiTcpResponse::GetStatus { message_id, .. }
            | FmiTcpResponse::GetRealStatus { message_id, .. }
            | FmiTcpResponse::GetIntegerStatus { message_id, .. }
            | FmiTcpResponse::GetBooleanStatus { message_id, .. }
            | FmiTcpResponse::GetStringStatus { message_id, .. }
            | FmiTcpResponse::GetFmuState { message_id, .. }
            | FmiTcpResponse::SetFmuState { message_id, .. }
            | FmiTcpResponse::FreeFmuState { message_id, .. }
            | FmiTcpResponse::SerializedFmuStateSize { message_id, .. }
            | FmiTcpResponse::SerializeFmuState { message_id, .. }
            | FmiTcpResponse::DeSerializeFmuState { message_id, .. }
            | FmiTcpResponse::GetVersion { message_id, .. }
            | FmiTcpResponse::SetDebugLogging { message_id, .. }
            | FmiTcpResponse::GetXml { message_id, .. }
            | FmiTcpResponse::ModelExchangePlaceholder { message_id, .. } => *message_id,
        }
    }

    pub fn status(&self) -> WireStatus {
        match self {
            FmiTcpResponse::Instantiate { status, .. }
            | FmiTcpResponse::InitializeSlave { status, .. }
            | FmiTcpResponse::TerminateSlave { status, .. }
            | FmiTcpResponse::ResetSlave { status, .. }
            | FmiTcpResponse::FreeSlaveInstance { status, .. }
            | FmiTcpResponse::DoStep { status, .. }
            | FmiTcpResponse::CancelStep { status, .. }
            | FmiTcpResponse::GetReal { status, .. }
            | FmiTcpResponse::SetReal { status, .. }
            | FmiTcpResponse::GetInteger { status, .. }
            | FmiTcpResponse::SetInteger { status, .. }
            | FmiTcpResponse::GetBoolean { status, .. }
            | FmiTcpResponse::SetBoolean { status, .. }
            | FmiTcpResponse::GetString { status, .. }
            | FmiTcpResponse::SetString { status, .. }
            | FmiTcpResponse::SetRealInputDerivatives { status, .. }
            | FmiTcpResponse::GetRealOutputDerivatives { status, .. }
            | FmiTcpResponse::GetDirectionalDerivative { status, .. }
            | FmiTcpResponse::GetStatus { status, .. }
            | FmiTcpResponse::GetRealStatus { status, .. }
            | FmiTcpResponse::GetIntegerStatus { status, .. }
            | FmiTcpResponse::GetBooleanStatus { status, .. }
            | FmiTcpResponse::GetStringStatus { status, .. }
            | FmiTcpResponse::GetFmuState { status, .. }
            | FmiTcpResponse::SetFmuState { status, .. }
            | FmiTcpResponse::FreeFmuState { status, .. }
            | FmiTcpResponse::SerializedFmuStateSize { status, .. }
            | FmiTcpResponse::SerializeFmuState { status, .. }
            | FmiTcpResponse::DeSerializeFmuState { status, .. }
            | FmiTcpResponse::GetVersion { status, .. }
            | FmiTcpResponse::SetDebugLogging { status, .. }
            | FmiTcpResponse::GetXml { status, .. }
            | FmiTcpResponse::ModelExchangePlaceholder { status, .. } => *status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_id_round_trips_through_op_kind() {
        let req = FmiTcpRequest::DoStep {
            message_id: 42,
            fmu_id: 0,
            current_communication_point: 0.0,
            communication_step_size: 0.1,
            new_step: true,
        };
        assert_eq!(req.message_id(), 42);
        assert_eq!(req.op_kind(), OpKind::DoStep);
    }

    #[test]
    fn model_exchange_ops_are_flagged() {
        assert!(OpKind::SetTime.is_model_exchange_placeholder());
        assert!(!OpKind::DoStep.is_model_exchange_placeholder());
    }
}
