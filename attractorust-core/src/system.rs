use crate::vec3::Vec3;

/// Trait implemented by all dynamical systems.
///
/// A system maps a state to its time derivative with no side effects and no
/// retained state, so any autonomous 3-variable ODE can be substituted
/// without touching the stepper.
///
/// Designed for **static dispatch** — steppers should be generic over
/// `S: DynamicalSystem` rather than using `dyn DynamicalSystem`, so the
/// compiler can inline and optimize the hot stepping loop.
pub trait DynamicalSystem {
    /// Evaluate the derivative `(dx/dt, dy/dt, dz/dt)` at state `v`.
    fn derivative(&self, v: Vec3) -> Vec3;
}
