use crate::error::CoreError;
use crate::system::DynamicalSystem;
use crate::vec3::Vec3;

/// The Rössler system:
///
/// ```text
/// dx/dt = −y − z
/// dy/dt = x + ay
/// dz/dt = b + z(x − c)
/// ```
///
/// A second chaotic system behind the same trait, so the stepper stays
/// system-agnostic. The classic parameters (a = b = 0.2, c = 5.7) produce
/// the single-scroll attractor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rossler {
    a: f64,
    b: f64,
    c: f64,
}

impl Rossler {
    pub const DEFAULT_A: f64 = 0.2;
    pub const DEFAULT_B: f64 = 0.2;
    pub const DEFAULT_C: f64 = 5.7;

    pub fn new(a: f64, b: f64, c: f64) -> crate::Result<Self> {
        if !a.is_finite() {
            return Err(CoreError::NonFiniteParameter { name: "a", value: a });
        }
        if !b.is_finite() {
            return Err(CoreError::NonFiniteParameter { name: "b", value: b });
        }
        if !c.is_finite() {
            return Err(CoreError::NonFiniteParameter { name: "c", value: c });
        }
        Ok(Self { a, b, c })
    }

    pub fn a(&self) -> f64 {
        self.a
    }

    pub fn b(&self) -> f64 {
        self.b
    }

    pub fn c(&self) -> f64 {
        self.c
    }
}

impl Default for Rossler {
    fn default() -> Self {
        Self {
            a: Self::DEFAULT_A,
            b: Self::DEFAULT_B,
            c: Self::DEFAULT_C,
        }
    }
}

impl DynamicalSystem for Rossler {
    #[inline]
    fn derivative(&self, v: Vec3) -> Vec3 {
        Vec3::new(
            -v.y - v.z,
            v.x + self.a * v.y,
            self.b + v.z * (v.x - self.c),
        )
    }
}
