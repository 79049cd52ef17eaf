use crate::system::DynamicalSystem;
use crate::vec3::Vec3;

/// Advance `v` by one classical 4th-order Runge-Kutta step of size `h`.
///
/// ```text
/// k1 = f(v)
/// k2 = f(v + (h/2)·k1)
/// k3 = f(v + (h/2)·k2)
/// k4 = f(v + h·k3)
/// v' = v + (h/6)·(k1 + 2k2 + 2k3 + k4)
/// ```
///
/// All arithmetic is double precision. The kernel is pure: callers own
/// looping, cancellation, and sample storage.
#[inline]
pub fn rk4_step<S: DynamicalSystem>(system: &S, v: Vec3, h: f64) -> Vec3 {
    let half_h = h / 2.0;

    let k1 = system.derivative(v);
    let k2 = system.derivative(v + k1 * half_h);
    let k3 = system.derivative(v + k2 * half_h);
    let k4 = system.derivative(v + k3 * h);

    v + (k1 + (k2 + k3) * 2.0 + k4) * (h / 6.0)
}
