//! The simulation adapter surface (spec component C): an opaque handle over a loaded
//! co-simulation component with typed get/set/step/state operations.
//!
//! Two implementations exist side by side, selected once at server construction: [`RealAdapter`]
//! drives an actual FMU through the `fmi` crate, and [`DummyAdapter`] answers every call with a
//! canned success for protocol conformance testing (the `"dummy"` archive path sentinel, or an
//! explicit flag).

use fmi_tcp_proto::{ValueRef, WireStatus};

/// Primitive type of a model variable, as carried in the variable catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveType {
    Real,
    Integer,
    Boolean,
    String,
}

/// One entry of a [`SimulationInstance`]'s variable catalogue.
#[derive(Debug, Clone)]
pub struct VariableDescriptor {
    pub name: String,
    pub value_reference: ValueRef,
    pub primitive_type: PrimitiveType,
    /// True if the variable may be written while still in the `Instantiated` state (i.e. it has
    /// `causality="parameter"`/`"input"`, or an `initial="exact"`/`"approx"` start value).
    pub start_value_capable: bool,
}

/// The operation surface component F (the dispatcher) and component D (the lifecycle state
/// machine) drive. An implementor owns exactly one simulation instance; `free` is idempotent and
/// terminal.
///
/// Every method reports the native FMI status directly as a [`WireStatus`] — spec §4.F requires
/// the dispatcher's status mapping to be the identity, so there is no separate native status type
/// to translate.
pub trait SimulationAdapter {
    fn instantiate(&mut self, instance_name: &str, visible: bool) -> WireStatus;

    /// Runs `setupExperiment` followed by `enterInitializationMode` atomically, per spec §4.D.
    fn initialize_slave(
        &mut self,
        tolerance: Option<f64>,
        start_time: f64,
        stop_time: Option<f64>,
    ) -> WireStatus;

    fn do_step(
        &mut self,
        current_communication_point: f64,
        communication_step_size: f64,
        new_step: bool,
    ) -> WireStatus;

    fn cancel_step(&mut self) -> WireStatus;
    fn terminate_slave(&mut self) -> WireStatus;
    fn reset_slave(&mut self) -> WireStatus;

    fn get_real(&mut self, value_refs: &[ValueRef]) -> (WireStatus, Vec<f64>);
    fn set_real(&mut self, value_refs: &[ValueRef], values: &[f64]) -> WireStatus;
    fn get_integer(&mut self, value_refs: &[ValueRef]) -> (WireStatus, Vec<i32>);
    fn set_integer(&mut self, value_refs: &[ValueRef], values: &[i32]) -> WireStatus;
    fn get_boolean(&mut self, value_refs: &[ValueRef]) -> (WireStatus, Vec<bool>);
    fn set_boolean(&mut self, value_refs: &[ValueRef], values: &[bool]) -> WireStatus;
    fn get_string(&mut self, value_refs: &[ValueRef]) -> (WireStatus, Vec<String>);
    fn set_string(&mut self, value_refs: &[ValueRef], values: &[String]) -> WireStatus;

    fn set_real_input_derivatives(
        &mut self,
        value_refs: &[ValueRef],
        orders: &[i32],
        values: &[f64],
    ) -> WireStatus;
    fn get_real_output_derivatives(
        &mut self,
        value_refs: &[ValueRef],
        orders: &[i32],
    ) -> (WireStatus, Vec<f64>);
    fn get_directional_derivative(
        &mut self,
        unknown_refs: &[ValueRef],
        known_refs: &[ValueRef],
        known_values: &[f64],
    ) -> (WireStatus, Vec<f64>);

    fn get_status(&mut self) -> (WireStatus, WireStatus);
    fn get_real_status(&mut self) -> (WireStatus, f64);
    fn get_integer_status(&mut self) -> (WireStatus, i32);
    fn get_boolean_status(&mut self) -> (WireStatus, bool);
    fn get_string_status(&mut self) -> (WireStatus, String);

    fn get_fmu_state(&mut self) -> (WireStatus, u32);
    fn set_fmu_state(&mut self, state_id: u32) -> WireStatus;
    fn free_fmu_state(&mut self, state_id: u32) -> WireStatus;
    fn serialized_fmu_state_size(&mut self, state_id: u32) -> (WireStatus, u32);
    fn serialize_fmu_state(&mut self, state_id: u32) -> (WireStatus, Vec<u8>);
    fn deserialize_fmu_state(&mut self, bytes: &[u8]) -> (WireStatus, u32);

    fn get_version(&self) -> String;
    fn set_debug_logging(&mut self, enabled: bool, categories: &[String]) -> WireStatus;
    fn get_xml(&self) -> String;

    /// Looks up a variable's catalogue entry, if one was parsed from the model description.
    fn describe_variable(&self, value_ref: ValueRef) -> Option<VariableDescriptor>;

    /// Releases the runtime handle, variable catalogue, parse context, and scratch directory, in
    /// that order. Idempotent: a second call is a no-op that still reports success.
    fn free(&mut self);
}

/// Answers every call with a canned `Ok` and zeroed/empty payloads, without touching any
/// underlying FMU. Selected by the `"dummy"` archive path sentinel or an explicit config flag
/// (spec §4.E, §6).
#[derive(Debug, Default)]
pub struct DummyAdapter;

impl SimulationAdapter for DummyAdapter {
    fn instantiate(&mut self, _instance_name: &str, _visible: bool) -> WireStatus {
        WireStatus::Ok
    }

    fn initialize_slave(
        &mut self,
        _tolerance: Option<f64>,
        _start_time: f64,
        _stop_time: Option<f64>,
    ) -> WireStatus {
        WireStatus::Ok
    }

    fn do_step(&mut self, _: f64, _: f64, _: bool) -> WireStatus {
        WireStatus::Ok
    }

    fn cancel_step(&mut self) -> WireStatus {
        WireStatus::Ok
    }

    fn terminate_slave(&mut self) -> WireStatus {
        WireStatus::Ok
    }

    fn reset_slave(&mut self) -> WireStatus {
        WireStatus::Ok
    }

    fn get_real(&mut self, value_refs: &[ValueRef]) -> (WireStatus, Vec<f64>) {
        (WireStatus::Ok, vec![0.0; value_refs.len()])
    }

    fn set_real(&mut self, _: &[ValueRef], _: &[f64]) -> WireStatus {
        WireStatus::Ok
    }

    fn get_integer(&mut self, value_refs: &[ValueRef]) -> (WireStatus, Vec<i32>) {
        (WireStatus::Ok, vec![0; value_refs.len()])
    }

    fn set_integer(&mut self, _: &[ValueRef], _: &[i32]) -> WireStatus {
        WireStatus::Ok
    }

    fn get_boolean(&mut self, value_refs: &[ValueRef]) -> (WireStatus, Vec<bool>) {
        (WireStatus::Ok, vec![false; value_refs.len()])
    }

    fn set_boolean(&mut self, _: &[ValueRef], _: &[bool]) -> WireStatus {
        WireStatus::Ok
    }

    fn get_string(&mut self, value_refs: &[ValueRef]) -> (WireStatus, Vec<String>) {
        (WireStatus::Ok, vec![String::new(); value_refs.len()])
    }

    fn set_string(&mut self, _: &[ValueRef], _: &[String]) -> WireStatus {
        WireStatus::Ok
    }

    fn set_real_input_derivatives(&mut self, _: &[ValueRef], _: &[i32], _: &[f64]) -> WireStatus {
        WireStatus::Ok
    }

    fn get_real_output_derivatives(
        &mut self,
        value_refs: &[ValueRef],
        _: &[i32],
    ) -> (WireStatus, Vec<f64>) {
        (WireStatus::Ok, vec![0.0; value_refs.len()])
    }

    fn get_directional_derivative(
        &mut self,
        unknown_refs: &[ValueRef],
        _: &[ValueRef],
        _: &[f64],
    ) -> (WireStatus, Vec<f64>) {
        (WireStatus::Ok, vec![0.0; unknown_refs.len()])
    }

    fn get_status(&mut self) -> (WireStatus, WireStatus) {
        (WireStatus::Ok, WireStatus::Ok)
    }

    fn get_real_status(&mut self) -> (WireStatus, f64) {
        (WireStatus::Ok, 0.0)
    }

    fn get_integer_status(&mut self) -> (WireStatus, i32) {
        (WireStatus::Ok, 0)
    }

    fn get_boolean_status(&mut self) -> (WireStatus, bool) {
        (WireStatus::Ok, false)
    }

    fn get_string_status(&mut self) -> (WireStatus, String) {
        (WireStatus::Ok, String::new())
    }

    fn get_fmu_state(&mut self) -> (WireStatus, u32) {
        (WireStatus::Ok, 0)
    }

    fn set_fmu_state(&mut self, _: u32) -> WireStatus {
        WireStatus::Ok
    }

    fn free_fmu_state(&mut self, _: u32) -> WireStatus {
        WireStatus::Ok
    }

    fn serialized_fmu_state_size(&mut self, _: u32) -> (WireStatus, u32) {
        (WireStatus::Ok, 0)
    }

    fn serialize_fmu_state(&mut self, _: u32) -> (WireStatus, Vec<u8>) {
        (WireStatus::Ok, Vec::new())
    }

    fn deserialize_fmu_state(&mut self, _: &[u8]) -> (WireStatus, u32) {
        (WireStatus::Ok, 0)
    }

    fn get_version(&self) -> String {
        "2.0".to_owned()
    }

    fn set_debug_logging(&mut self, _: bool, _: &[String]) -> WireStatus {
        WireStatus::Ok
    }

    fn get_xml(&self) -> String {
        String::new()
    }

    fn describe_variable(&self, _value_ref: ValueRef) -> Option<VariableDescriptor> {
        None
    }

    fn free(&mut self) {}
}
