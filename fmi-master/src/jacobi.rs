//! Jacobi coordinator (spec component H, §4.H): steps every component from the same time
//! snapshot and exchanges connection values only after every step in the round has succeeded.

use fmi_tcp_client::Client;
use fmi_tcp_proto::WireStatus;

use crate::connection::{Connection, PrimitiveType, StepOrder};

#[derive(Debug, thiserror::Error)]
pub enum CoordinatorError {
    #[error("component {index} reported non-ok status {status:?} at t={time}")]
    StepFailed {
        index: usize,
        status: WireStatus,
        time: f64,
    },
    #[error("component {index} transport error: {source}")]
    Transport {
        index: usize,
        #[source]
        source: fmi_tcp_client::ClientError,
    },
}

/// Drives `components` (one [`Client`] per remote server, indexed as `StepOrder`/`Connection`
/// refer to them) through Jacobi-style co-simulation.
pub struct Coordinator {
    components: Vec<Client>,
    connections: Vec<Connection>,
    step_order: StepOrder,
    t: f64,
    h: f64,
}

impl Coordinator {
    pub fn new(
        components: Vec<Client>,
        connections: Vec<Connection>,
        step_order: StepOrder,
        t0: f64,
        h: f64,
    ) -> Self {
        Self {
            components,
            connections,
            step_order,
            t: t0,
            h,
        }
    }

    pub fn current_time(&self) -> f64 {
        self.t
    }

    /// Borrows the `Client` for component `index`, e.g. to read out a value for logging once a
    /// round of stepping has completed.
    pub fn component(&self, index: usize) -> &Client {
        &self.components[index]
    }

    /// Advances every component by exactly `h` from the current time, then transfers every
    /// connection's value, in that order (invariants 1, 2 and 4 of spec §4.H). Halts on the
    /// first non-ok `do_step`, surfacing its index (invariant 3), without performing any
    /// transfer for that round.
    pub async fn step(&mut self) -> Result<(), CoordinatorError> {
        let t_k = self.t;
        for (index, component) in self.components.iter().enumerate() {
            let status = component
                .do_step(t_k, self.h, true)
                .await
                .map_err(|source| CoordinatorError::Transport { index, source })?;
            if !status.is_ok_or_warning() {
                return Err(CoordinatorError::StepFailed {
                    index,
                    status,
                    time: t_k,
                });
            }
        }

        for conn in ordered_connections(&self.connections, &self.step_order) {
            self.transfer(conn).await?;
        }

        self.t += self.h;
        Ok(())
    }

    async fn transfer(&self, conn: &Connection) -> Result<(), CoordinatorError> {
        let src = &self.components[conn.src_fmu];
        let dst = &self.components[conn.dst_fmu];

        match conn.primitive_type {
            PrimitiveType::Real => {
                let (status, values) = src
                    .get_real(vec![conn.src_value_ref])
                    .await
                    .map_err(|source| CoordinatorError::Transport {
                        index: conn.src_fmu,
                        source,
                    })?;
                self.require_ok(conn.src_fmu, status, self.t)?;
                let status = dst
                    .set_real(vec![conn.dst_value_ref], values)
                    .await
                    .map_err(|source| CoordinatorError::Transport {
                        index: conn.dst_fmu,
                        source,
                    })?;
                self.require_ok(conn.dst_fmu, status, self.t)
            }
            PrimitiveType::Integer => {
                let (status, values) = src
                    .get_integer(vec![conn.src_value_ref])
                    .await
                    .map_err(|source| CoordinatorError::Transport {
                        index: conn.src_fmu,
                        source,
                    })?;
                self.require_ok(conn.src_fmu, status, self.t)?;
                let status = dst
                    .set_integer(vec![conn.dst_value_ref], values)
                    .await
                    .map_err(|source| CoordinatorError::Transport {
                        index: conn.dst_fmu,
                        source,
                    })?;
                self.require_ok(conn.dst_fmu, status, self.t)
            }
            PrimitiveType::Boolean => {
                let (status, values) = src
                    .get_boolean(vec![conn.src_value_ref])
                    .await
                    .map_err(|source| CoordinatorError::Transport {
                        index: conn.src_fmu,
                        source,
                    })?;
                self.require_ok(conn.src_fmu, status, self.t)?;
                let status = dst
                    .set_boolean(vec![conn.dst_value_ref], values)
                    .await
                    .map_err(|source| CoordinatorError::Transport {
                        index: conn.dst_fmu,
                        source,
                    })?;
                self.require_ok(conn.dst_fmu, status, self.t)
            }
            PrimitiveType::String => {
                let (status, values) = src
                    .get_string(vec![conn.src_value_ref])
                    .await
                    .map_err(|source| CoordinatorError::Transport {
                        index: conn.src_fmu,
                        source,
                    })?;
                self.require_ok(conn.src_fmu, status, self.t)?;
                let status = dst
                    .set_string(vec![conn.dst_value_ref], values)
                    .await
                    .map_err(|source| CoordinatorError::Transport {
                        index: conn.dst_fmu,
                        source,
                    })?;
                self.require_ok(conn.dst_fmu, status, self.t)
            }
        }
    }

    fn require_ok(&self, index: usize, status: WireStatus, time: f64) -> Result<(), CoordinatorError> {
        if status.is_ok_or_warning() {
            Ok(())
        } else {
            Err(CoordinatorError::StepFailed { index, status, time })
        }
    }

    /// Steps repeatedly until `self.current_time() >= horizon` or a component fails.
    pub async fn run_to(&mut self, horizon: f64) -> Result<(), CoordinatorError> {
        while self.t < horizon {
            self.step().await?;
        }
        Ok(())
    }
}

/// Every connection, in `step_order` order. `step_order` reorders; it never drops a connection
/// whose `src_fmu` it doesn't name — those sort after every connection it does, stable among
/// themselves.
fn ordered_connections<'a>(connections: &'a [Connection], step_order: &StepOrder) -> Vec<&'a Connection> {
    let mut ordered: Vec<&Connection> = connections.iter().collect();
    ordered.sort_by_key(|conn| {
        step_order
            .0
            .iter()
            .position(|&fmu| fmu == conn.src_fmu)
            .unwrap_or(usize::MAX)
    });
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::PrimitiveType;

    #[test]
    fn step_order_reorders_but_never_drops_a_connection() {
        let connections = vec![
            Connection::new(0, 1, PrimitiveType::Real, 1, 2, PrimitiveType::Real).unwrap(),
            Connection::new(1, 3, PrimitiveType::Real, 2, 4, PrimitiveType::Real).unwrap(),
            Connection::new(2, 5, PrimitiveType::Real, 0, 6, PrimitiveType::Real).unwrap(),
        ];
        // Omits component 2 entirely — the bug this guards against would have dropped the
        // connection whose src_fmu is 2.
        let step_order = StepOrder(vec![1, 0]);

        let ordered = ordered_connections(&connections, &step_order);
        assert_eq!(ordered.len(), 3);
        assert_eq!(ordered[0].src_fmu, 1);
        assert_eq!(ordered[1].src_fmu, 0);
        assert_eq!(ordered[2].src_fmu, 2);
    }

    #[test]
    fn default_step_order_leaves_connections_in_declared_order() {
        let connections = vec![
            Connection::new(0, 1, PrimitiveType::Real, 1, 2, PrimitiveType::Real).unwrap(),
            Connection::new(1, 3, PrimitiveType::Real, 0, 4, PrimitiveType::Real).unwrap(),
        ];
        let step_order = StepOrder::sequential(2);
        let ordered = ordered_connections(&connections, &step_order);
        assert_eq!(ordered[0].src_fmu, 0);
        assert_eq!(ordered[1].src_fmu, 1);
    }
}
