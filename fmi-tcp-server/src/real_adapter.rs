//! [`RealAdapter`]: a [`SimulationAdapter`] backed by an actual FMI 2.0 Co-Simulation FMU loaded
//! through the `fmi` crate.
//!
//! `fmi::fmi2::instance::Instance<'a, CS>` borrows its model description from the
//! `fmi::fmi2::import::Fmi2Import` that created it, so the two can't be stored as independent
//! owned fields without a self-referential struct. `RealAdapter` heap-allocates the import once
//! (`Pin<Box<_>>`, never moved) and hands the instance a `'static` reborrow of it; the invariant
//! that makes this sound is that `instance` is always dropped (in `free`, and in `Drop`) before
//! `import` is.

use std::collections::HashMap;
use std::ffi::CString;
use std::pin::Pin;

use fmi::fmi2::import::Fmi2Import;
use fmi::fmi2::instance::{Common, CoSimulation, FmuState, InstanceCS};
use fmi::fmi2::schema::{Causality, Initial, ScalarVariableElement};
use fmi::fmi2::{Fmi2Error, Fmi2Res};
use fmi::traits::FmiImport;
use fmi_tcp_proto::{ValueRef, WireStatus};

use crate::adapter::{PrimitiveType, SimulationAdapter, VariableDescriptor};

#[derive(Debug, thiserror::Error)]
pub enum ArchiveError {
    #[error(transparent)]
    Fmi(#[from] fmi::Error),
}

type Fmi2Result = Result<Fmi2Res, Fmi2Error>;

fn status_of(result: &Fmi2Result) -> WireStatus {
    match result {
        Ok(Fmi2Res::OK) => WireStatus::Ok,
        Ok(Fmi2Res::Warning) => WireStatus::Warning,
        Ok(Fmi2Res::Pending) => WireStatus::Pending,
        Err(Fmi2Error::Discard) => WireStatus::Discard,
        Err(Fmi2Error::Fatal) => WireStatus::Fatal,
        Err(Fmi2Error::Error) | Err(Fmi2Error::TypesPlatformMismatch(_)) => WireStatus::Error,
    }
}

pub struct RealAdapter {
    import: Option<Pin<Box<Fmi2Import>>>,
    instance: Option<InstanceCS<'static>>,
    states: HashMap<u32, FmuState>,
    next_state_id: u32,
}

impl RealAdapter {
    pub fn parse_archive(url: &str) -> Result<Self, ArchiveError> {
        let import: Fmi2Import = fmi::import::from_path(url)?;
        Ok(Self {
            import: Some(Box::pin(import)),
            instance: None,
            states: HashMap::new(),
            next_state_id: 0,
        })
    }

    fn import_ref(&self) -> Option<&'static Fmi2Import> {
        self.import.as_ref().map(|pinned| {
            let ptr: *const Fmi2Import = pinned.as_ref().get_ref();
            // SAFETY: see module-level invariant — `instance` never outlives `import`.
            unsafe { &*ptr }
        })
    }

    fn instance_mut(&mut self) -> Option<&mut InstanceCS<'static>> {
        self.instance.as_mut()
    }
}

impl SimulationAdapter for RealAdapter {
    fn instantiate(&mut self, instance_name: &str, visible: bool) -> WireStatus {
        let Some(import) = self.import_ref() else {
            return WireStatus::Error;
        };
        match import.instantiate_cs(instance_name, visible, true) {
            Ok(inst) => {
                self.instance = Some(inst);
                WireStatus::Ok
            }
            Err(_) => WireStatus::Error,
        }
    }

    fn initialize_slave(
        &mut self,
        tolerance: Option<f64>,
        start_time: f64,
        stop_time: Option<f64>,
    ) -> WireStatus {
        let Some(inst) = self.instance_mut() else {
            return WireStatus::Error;
        };
        let setup = Common::setup_experiment(inst, tolerance, start_time, stop_time);
        if setup.is_err() {
            return status_of(&setup);
        }
        status_of(&Common::enter_initialization_mode(inst))
    }

    fn do_step(
        &mut self,
        current_communication_point: f64,
        communication_step_size: f64,
        new_step: bool,
    ) -> WireStatus {
        let Some(inst) = self.instance_mut() else {
            return WireStatus::Error;
        };
        status_of(&CoSimulation::do_step(
            inst,
            current_communication_point,
            communication_step_size,
            new_step,
        ))
    }

    fn cancel_step(&mut self) -> WireStatus {
        let Some(inst) = self.instance_mut() else {
            return WireStatus::Error;
        };
        status_of(&CoSimulation::cancel_step(inst))
    }

    fn terminate_slave(&mut self) -> WireStatus {
        let Some(inst) = self.instance_mut() else {
            return WireStatus::Error;
        };
        status_of(&Common::terminate(inst))
    }

    fn reset_slave(&mut self) -> WireStatus {
        let Some(inst) = self.instance_mut() else {
            return WireStatus::Error;
        };
        status_of(&Common::reset(inst))
    }

    fn get_real(&mut self, value_refs: &[ValueRef]) -> (WireStatus, Vec<f64>) {
        let mut values = vec![0.0; value_refs.len()];
        let Some(inst) = self.instance_mut() else {
            return (WireStatus::Error, values);
        };
        let result = Common::get_real(inst, value_refs, &mut values);
        (status_of(&result), values)
    }

    fn set_real(&mut self, value_refs: &[ValueRef], values: &[f64]) -> WireStatus {
        if value_refs.len() != values.len() {
            return WireStatus::Error;
        }
        let Some(inst) = self.instance_mut() else {
            return WireStatus::Error;
        };
        status_of(&Common::set_real(inst, value_refs, values))
    }

    fn get_integer(&mut self, value_refs: &[ValueRef]) -> (WireStatus, Vec<i32>) {
        let mut values = vec![0; value_refs.len()];
        let Some(inst) = self.instance_mut() else {
            return (WireStatus::Error, values);
        };
        let result = Common::get_integer(inst, value_refs, &mut values);
        (status_of(&result), values)
    }

    fn set_integer(&mut self, value_refs: &[ValueRef], values: &[i32]) -> WireStatus {
        if value_refs.len() != values.len() {
            return WireStatus::Error;
        }
        let Some(inst) = self.instance_mut() else {
            return WireStatus::Error;
        };
        status_of(&Common::set_integer(inst, value_refs, values))
    }

    fn get_boolean(&mut self, value_refs: &[ValueRef]) -> (WireStatus, Vec<bool>) {
        let mut raw = vec![0; value_refs.len()];
        let Some(inst) = self.instance_mut() else {
            return (WireStatus::Error, vec![false; value_refs.len()]);
        };
        let result = Common::get_boolean(inst, value_refs, &mut raw);
        (status_of(&result), raw.into_iter().map(|v| v != 0).collect())
    }

    fn set_boolean(&mut self, value_refs: &[ValueRef], values: &[bool]) -> WireStatus {
        if value_refs.len() != values.len() {
            return WireStatus::Error;
        }
        let Some(inst) = self.instance_mut() else {
            return WireStatus::Error;
        };
        let raw: Vec<i32> = values.iter().map(|&v| v as i32).collect();
        status_of(&Common::set_boolean(inst, value_refs, &raw))
    }

    fn get_string(&mut self, value_refs: &[ValueRef]) -> (WireStatus, Vec<String>) {
        let mut raw: Vec<CString> = (0..value_refs.len())
            .map(|_| CString::new("").unwrap())
            .collect();
        let Some(inst) = self.instance_mut() else {
            return (WireStatus::Error, vec![String::new(); value_refs.len()]);
        };
        match Common::get_string(inst, value_refs, &mut raw) {
            Ok(()) => (
                WireStatus::Ok,
                raw.into_iter()
                    .map(|c| c.to_string_lossy().into_owned())
                    .collect(),
            ),
            Err(e) => (status_of(&Err(e)), vec![String::new(); value_refs.len()]),
        }
    }

    fn set_string(&mut self, value_refs: &[ValueRef], values: &[String]) -> WireStatus {
        if value_refs.len() != values.len() {
            return WireStatus::Error;
        }
        let Some(inst) = self.instance_mut() else {
            return WireStatus::Error;
        };
        let raw: Result<Vec<CString>, _> =
            values.iter().map(|s| CString::new(s.as_str())).collect();
        let Ok(raw) = raw else {
            return WireStatus::Error;
        };
        match Common::set_string(inst, value_refs, &raw) {
            Ok(()) => WireStatus::Ok,
            Err(e) => status_of(&Err(e)),
        }
    }

    fn set_real_input_derivatives(
        &mut self,
        value_refs: &[ValueRef],
        orders: &[i32],
        values: &[f64],
    ) -> WireStatus {
        if value_refs.len() != orders.len() || value_refs.len() != values.len() {
            return WireStatus::Error;
        }
        let Some(inst) = self.instance_mut() else {
            return WireStatus::Error;
        };
        status_of(&CoSimulation::set_real_input_derivatives(
            inst, value_refs, orders, values,
        ))
    }

    fn get_real_output_derivatives(
        &mut self,
        value_refs: &[ValueRef],
        orders: &[i32],
    ) -> (WireStatus, Vec<f64>) {
        let mut values = vec![0.0; value_refs.len()];
        if value_refs.len() != orders.len() {
            return (WireStatus::Error, values);
        }
        let Some(inst) = self.instance_mut() else {
            return (WireStatus::Error, values);
        };
        let result = CoSimulation::get_real_output_derivatives(inst, value_refs, orders, &mut values);
        (status_of(&result), values)
    }

    fn get_directional_derivative(
        &mut self,
        unknown_refs: &[ValueRef],
        known_refs: &[ValueRef],
        known_values: &[f64],
    ) -> (WireStatus, Vec<f64>) {
        let mut unknown_values = vec![0.0; unknown_refs.len()];
        if known_refs.len() != known_values.len() {
            return (WireStatus::Error, unknown_values);
        }
        let Some(inst) = self.instance_mut() else {
            return (WireStatus::Error, unknown_values);
        };
        let result = Common::get_directional_derivative(
            inst,
            unknown_refs,
            known_refs,
            known_values,
            &mut unknown_values,
        );
        (status_of(&result), unknown_values)
    }

    fn get_status(&mut self) -> (WireStatus, WireStatus) {
        let Some(inst) = self.instance_mut() else {
            return (WireStatus::Error, WireStatus::Error);
        };
        match CoSimulation::do_step_status(inst) {
            Ok(status) => {
                let mapped = if status.is_error() {
                    WireStatus::Error
                } else {
                    WireStatus::Ok
                };
                (WireStatus::Ok, mapped)
            }
            Err(e) => (status_of(&Err(e)), WireStatus::Error),
        }
    }

    fn get_real_status(&mut self) -> (WireStatus, f64) {
        let Some(inst) = self.instance_mut() else {
            return (WireStatus::Error, 0.0);
        };
        match CoSimulation::last_successful_time(inst) {
            Ok(t) => (WireStatus::Ok, t),
            Err(e) => (status_of(&Err(e)), 0.0),
        }
    }

    fn get_integer_status(&mut self) -> (WireStatus, i32) {
        // No fmi2*IntegerStatus* kind is defined by the standard; not supported by any real FMU.
        (WireStatus::Error, 0)
    }

    fn get_boolean_status(&mut self) -> (WireStatus, bool) {
        let Some(inst) = self.instance_mut() else {
            return (WireStatus::Error, false);
        };
        match CoSimulation::terminated(inst) {
            Ok(b) => (WireStatus::Ok, b),
            Err(e) => (status_of(&Err(e)), false),
        }
    }

    fn get_string_status(&mut self) -> (WireStatus, String) {
        let Some(inst) = self.instance_mut() else {
            return (WireStatus::Error, String::new());
        };
        match CoSimulation::pending_status(inst) {
            Ok(s) => (WireStatus::Ok, s.to_owned()),
            Err(e) => (status_of(&Err(e)), String::new()),
        }
    }

    fn get_fmu_state(&mut self) -> (WireStatus, u32) {
        let Some(inst) = self.instance_mut() else {
            return (WireStatus::Error, 0);
        };
        match inst.get_fmu_state() {
            Ok(state) => {
                let id = self.next_state_id;
                self.next_state_id += 1;
                self.states.insert(id, state);
                (WireStatus::Ok, id)
            }
            Err(e) => (status_of(&Err(e)), 0),
        }
    }

    fn set_fmu_state(&mut self, state_id: u32) -> WireStatus {
        let Some(state) = self.states.get(&state_id).copied() else {
            return WireStatus::Error;
        };
        let Some(inst) = self.instance_mut() else {
            return WireStatus::Error;
        };
        status_of(&inst.set_fmu_state(&state).ok())
    }

    fn free_fmu_state(&mut self, state_id: u32) -> WireStatus {
        if self.states.remove(&state_id).is_some() {
            WireStatus::Ok
        } else {
            WireStatus::Error
        }
    }

    fn serialized_fmu_state_size(&mut self, state_id: u32) -> (WireStatus, u32) {
        let (status, bytes) = self.serialize_fmu_state(state_id);
        (status, bytes.len() as u32)
    }

    fn serialize_fmu_state(&mut self, state_id: u32) -> (WireStatus, Vec<u8>) {
        let Some(state) = self.states.get(&state_id).copied() else {
            return (WireStatus::Error, Vec::new());
        };
        let Some(inst) = self.instance_mut() else {
            return (WireStatus::Error, Vec::new());
        };
        match inst.serialize_fmu_state(&state) {
            Ok(bytes) => (WireStatus::Ok, bytes),
            Err(e) => (status_of(&Err(e)), Vec::new()),
        }
    }

    fn deserialize_fmu_state(&mut self, bytes: &[u8]) -> (WireStatus, u32) {
        let Some(inst) = self.instance_mut() else {
            return (WireStatus::Error, 0);
        };
        match inst.deserialize_fmu_state(bytes) {
            Ok(state) => {
                let id = self.next_state_id;
                self.next_state_id += 1;
                self.states.insert(id, state);
                (WireStatus::Ok, id)
            }
            Err(e) => (status_of(&Err(e)), 0),
        }
    }

    fn get_version(&self) -> String {
        self.instance
            .as_ref()
            .map(|inst| Common::get_version(inst).to_owned())
            .unwrap_or_else(|| "2.0".to_owned())
    }

    fn set_debug_logging(&mut self, enabled: bool, categories: &[String]) -> WireStatus {
        let Some(inst) = self.instance_mut() else {
            return WireStatus::Error;
        };
        let cats: Vec<&str> = categories.iter().map(String::as_str).collect();
        status_of(&Common::set_debug_logging(inst, enabled, &cats))
    }

    fn get_xml(&self) -> String {
        self.import_ref()
            .map(|import| format!("{:?}", import.model_description()))
            .unwrap_or_default()
    }

    fn describe_variable(&self, value_ref: ValueRef) -> Option<VariableDescriptor> {
        let import = self.import_ref()?;
        import
            .model_description()
            .model_variables
            .variables
            .iter()
            .find(|v| v.value_reference == value_ref)
            .map(|v| {
                let primitive_type = match v.elem {
                    ScalarVariableElement::Real(_) => PrimitiveType::Real,
                    ScalarVariableElement::Integer(_) => PrimitiveType::Integer,
                    ScalarVariableElement::Boolean(_) => PrimitiveType::Boolean,
                    ScalarVariableElement::String | ScalarVariableElement::Enumeration => {
                        PrimitiveType::String
                    }
                };
                let start_value_capable = matches!(
                    v.causality,
                    Causality::Parameter | Causality::Input
                ) || matches!(v.initial, Some(Initial::Exact) | Some(Initial::Approx));
                VariableDescriptor {
                    name: v.name.clone(),
                    value_reference: v.value_reference,
                    primitive_type,
                    start_value_capable,
                }
            })
    }

    fn free(&mut self) {
        self.states.clear();
        self.instance = None;
        self.import = None;
    }
}

impl Drop for RealAdapter {
    fn drop(&mut self) {
        // Order matters: `instance` borrows `import`, so it must go first.
        self.instance = None;
        self.import = None;
    }
}
