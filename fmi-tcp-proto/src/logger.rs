//! Canonical log formatting for the protocol's inbound/outbound traffic.
//!
//! Mirrors the three log categories the reference server wrote to: a line per request
//! received (`Category::Network`), a line per response sent (`Category::Network`), and a
//! separate category for decode/dispatch failures (`Category::Error`). Debug-level detail
//! (`Category::Debug`) is reserved for payload dumps that are too noisy for the default level.

use crate::message::{FmiTcpRequest, FmiTcpResponse, OpKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Network,
    Debug,
    Error,
}

/// Logs an inbound request at `info` level as `< operation(fmu_id, message_id)`, the arrow
/// pointing into the server.
pub fn log_request(category: Category, req: &FmiTcpRequest) {
    let line = format!(
        "< {:?}(fmu_id={}, message_id={})",
        req.op_kind(),
        fmu_id_of(req),
        req.message_id()
    );
    emit(category, &line);
}

/// Logs an outbound response at `info` level as `> operation(message_id, status)`, the arrow
/// pointing back out to the client.
pub fn log_response(category: Category, op: OpKind, resp: &FmiTcpResponse) {
    let line = format!(
        "> {op:?}(message_id={}, status={:?})",
        resp.message_id(),
        resp.status()
    );
    emit(category, &line);
}

fn emit(category: Category, line: &str) {
    match category {
        Category::Network => log::info!("{line}"),
        Category::Debug => log::debug!("{line}"),
        Category::Error => log::error!("{line}"),
    }
}

fn fmu_id_of(req: &FmiTcpRequest) -> u32 {
    macro_rules! fmu_id_match {
        ($($variant:ident),* $(,)?) => {
            match req {
                $(FmiTcpRequest::$variant { fmu_id, .. } => *fmu_id,)*
            }
        };
    }
    fmu_id_match!(
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
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fmu_id_is_extracted_for_every_variant() {
        let req = FmiTcpRequest::GetReal {
            message_id: 1,
            fmu_id: 3,
            value_references: vec![0, 1],
        };
        assert_eq!(fmu_id_of(&req), 3);
    }
}
