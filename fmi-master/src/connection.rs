//! The coordinator-side data model (spec §3): an immutable 4-tuple connection between two
//! components' variables, and the ordered list of component indices Jacobi stepping drives.

use fmi_tcp_proto::ValueRef;

/// Primitive type of a connected variable. Declared per connection in configuration — the wire
/// protocol has no "describe variable" operation a remote master could query, so the type must
/// be known up front, exactly where spec §4.H requires the mismatch to be caught.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveType {
    Real,
    Integer,
    Boolean,
    String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("connection type mismatch: source is {src:?}, destination is {dst:?}")]
pub struct TypeMismatch {
    pub src: PrimitiveType,
    pub dst: PrimitiveType,
}

/// An immutable `(srcFmu, srcValueRef, dstFmu, dstValueRef)` 4-tuple with an implicit primitive
/// type matching both endpoints (spec §3). `src_fmu`/`dst_fmu` index into the coordinator's
/// component list, not a wire-level `fmu_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Connection {
    pub src_fmu: usize,
    pub src_value_ref: ValueRef,
    pub dst_fmu: usize,
    pub dst_value_ref: ValueRef,
    pub primitive_type: PrimitiveType,
}

impl Connection {
    /// Validates that both endpoints declare the same primitive type — a configuration error,
    /// never a run-time one (spec §4.H).
    pub fn new(
        src_fmu: usize,
        src_value_ref: ValueRef,
        src_type: PrimitiveType,
        dst_fmu: usize,
        dst_value_ref: ValueRef,
        dst_type: PrimitiveType,
    ) -> Result<Self, TypeMismatch> {
        if src_type != dst_type {
            return Err(TypeMismatch {
                src: src_type,
                dst: dst_type,
            });
        }
        Ok(Self {
            src_fmu,
            src_value_ref,
            dst_fmu,
            dst_value_ref,
            primitive_type: src_type,
        })
    }
}

/// An ordered list of component indices. For Jacobi stepping this affects only the order in
/// which transfers and log lines are emitted after a round, never the stepping itself (spec §3).
#[derive(Debug, Clone, Default)]
pub struct StepOrder(pub Vec<usize>);

impl StepOrder {
    pub fn sequential(num_components: usize) -> Self {
        Self((0..num_components).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_types_build_a_connection() {
        let conn = Connection::new(0, 1, PrimitiveType::Real, 1, 2, PrimitiveType::Real).unwrap();
        assert_eq!(conn.primitive_type, PrimitiveType::Real);
    }

    #[test]
    fn mismatched_types_are_rejected_at_construction() {
        let err =
            Connection::new(0, 1, PrimitiveType::Real, 1, 2, PrimitiveType::Integer).unwrap_err();
        assert_eq!(err.src, PrimitiveType::Real);
        assert_eq!(err.dst, PrimitiveType::Integer);
    }

    #[test]
    fn sequential_step_order_covers_every_component() {
        let order = StepOrder::sequential(3);
        assert_eq!(order.0, vec![0, 1, 2]);
    }
}
