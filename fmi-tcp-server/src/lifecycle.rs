//! Instance lifecycle state machine (spec component D, §4.D).
//!
//! The state machine is reified explicitly as data rather than inferred from call order: every
//! handler consults [`LifecycleState::check`] before touching the adapter, and advances the state
//! with [`LifecycleState::advance`] only after the adapter call reports `ok`/`warning`.

use fmi_tcp_proto::OpKind;

/// One [`SimulationInstance`]'s position in the FMI 2.0 Co-Simulation lifecycle.
///
/// `Dummy` is a parallel root state: every operation performed against it succeeds without ever
/// consulting the adapter (spec §4.E's dummy-response mode), and it never transitions elsewhere.
///
/// `Poisoned` is a second parallel state, entered only from a `fatal` adapter status: unlike
/// `Freed`, which still answers a repeat `FreeSlaveInstance`, every operation against a poisoned
/// instance — including free — responds with `error`, and the state never advances out of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Loaded,
    Instantiated,
    Initialized,
    Terminated,
    Freed,
    Dummy,
    Poisoned,
}

/// Raised when `op` is not among the operations §4.D's table permits from the current state. The
/// response to such a request carries `status=error`; the state is left unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("operation {op:?} is not legal from state {state:?}")]
pub struct IllegalState {
    pub op: OpKind,
    pub state: LifecycleState,
}

impl LifecycleState {
    /// Returns `Ok(())` if `op` may legally be attempted from this state, per spec §4.D's table.
    /// Dummy mode short-circuits: every operation is legal and never advances the state.
    pub fn check(&self, op: OpKind) -> Result<(), IllegalState> {
        if *self == LifecycleState::Dummy {
            return Ok(());
        }
        if self.allows(op) {
            Ok(())
        } else {
            Err(IllegalState { op, state: *self })
        }
    }

    fn allows(&self, op: OpKind) -> bool {
        use LifecycleState::*;
        if *self == Poisoned {
            return false;
        }
        if *self == Freed {
            // Terminal: free is idempotent, everything else is rejected.
            return op == OpKind::FreeSlaveInstance;
        }
        match op {
            OpKind::Instantiate => *self == Loaded,
            OpKind::InitializeSlave => *self == Instantiated,
            OpKind::DoStep | OpKind::CancelStep => *self == Initialized,
            OpKind::TerminateSlave => *self == Initialized,
            OpKind::ResetSlave => matches!(self, Initialized | Terminated),
            OpKind::FreeSlaveInstance => true,
            OpKind::GetReal
            | OpKind::SetReal
            | OpKind::GetInteger
            | OpKind::SetInteger
            | OpKind::GetBoolean
            | OpKind::SetBoolean
            | OpKind::GetString
            | OpKind::SetString
            | OpKind::SetRealInputDerivatives
            | OpKind::GetRealOutputDerivatives
            | OpKind::GetDirectionalDerivative
            | OpKind::SetDebugLogging => matches!(self, Instantiated | Initialized),
            OpKind::GetStatus
            | OpKind::GetRealStatus
            | OpKind::GetIntegerStatus
            | OpKind::GetBooleanStatus
            | OpKind::GetStringStatus
            | OpKind::GetFmuState
            | OpKind::SetFmuState
            | OpKind::FreeFmuState
            | OpKind::SerializedFmuStateSize
            | OpKind::SerializeFmuState
            | OpKind::DeSerializeFmuState => *self == Initialized,
            OpKind::GetVersion | OpKind::GetXml => true,
            _ if op.is_model_exchange_placeholder() => true,
            _ => false,
        }
    }

    /// The state after `op` completes with an `ok`/`warning` status. Operations that don't move
    /// the state machine (`get_*`, status queries, meta) return `*self` unchanged.
    pub fn advance(&self, op: OpKind) -> LifecycleState {
        use LifecycleState::*;
        if *self == Dummy {
            return Dummy;
        }
        if *self == Poisoned {
            return Poisoned;
        }
        match op {
            OpKind::Instantiate => Instantiated,
            OpKind::InitializeSlave => Initialized,
            OpKind::TerminateSlave => Terminated,
            OpKind::ResetSlave => Instantiated,
            OpKind::FreeSlaveInstance => Freed,
            _ => *self,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instantiate_moves_loaded_to_instantiated() {
        let state = LifecycleState::Loaded;
        assert!(state.check(OpKind::Instantiate).is_ok());
        assert_eq!(state.advance(OpKind::Instantiate), LifecycleState::Instantiated);
    }

    #[test]
    fn do_step_before_initialize_is_illegal() {
        let state = LifecycleState::Instantiated;
        assert!(state.check(OpKind::DoStep).is_err());
    }

    #[test]
    fn dummy_mode_allows_everything_and_never_advances() {
        let state = LifecycleState::Dummy;
        assert!(state.check(OpKind::DoStep).is_ok());
        assert_eq!(state.advance(OpKind::DoStep), LifecycleState::Dummy);
    }

    #[test]
    fn free_is_legal_from_any_state() {
        for state in [
            LifecycleState::Loaded,
            LifecycleState::Instantiated,
            LifecycleState::Initialized,
            LifecycleState::Terminated,
        ] {
            assert!(state.check(OpKind::FreeSlaveInstance).is_ok());
            assert_eq!(
                state.advance(OpKind::FreeSlaveInstance),
                LifecycleState::Freed
            );
        }
    }

    #[test]
    fn poisoned_rejects_everything_including_free() {
        let state = LifecycleState::Poisoned;
        assert!(state.check(OpKind::FreeSlaveInstance).is_err());
        assert!(state.check(OpKind::GetVersion).is_err());
        assert_eq!(
            state.advance(OpKind::FreeSlaveInstance),
            LifecycleState::Poisoned
        );
    }

    #[test]
    fn reset_returns_to_instantiated_from_initialized_or_terminated() {
        assert_eq!(
            LifecycleState::Initialized.advance(OpKind::ResetSlave),
            LifecycleState::Instantiated
        );
        assert_eq!(
            LifecycleState::Terminated.advance(OpKind::ResetSlave),
            LifecycleState::Instantiated
        );
        assert!(LifecycleState::Loaded.check(OpKind::ResetSlave).is_err());
    }
}
