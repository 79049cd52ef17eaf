use crate::error::CoreError;
use crate::system::DynamicalSystem;
use crate::vec3::Vec3;

/// The Lorenz system:
///
/// ```text
/// dx/dt = σ(y − x)
/// dy/dt = ρx − y − xz
/// dz/dt = xy − βz
/// ```
///
/// With the classic parameters (σ = 10, ρ = 28, β = 8/3) trajectories settle
/// onto the butterfly-shaped strange attractor. Parameters are fixed at
/// construction; a new system is built to change them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lorenz {
    sigma: f64,
    rho: f64,
    beta: f64,
}

impl Lorenz {
    pub const DEFAULT_SIGMA: f64 = 10.0;
    pub const DEFAULT_RHO: f64 = 28.0;
    pub const DEFAULT_BETA: f64 = 8.0 / 3.0;

    pub fn new(sigma: f64, rho: f64, beta: f64) -> crate::Result<Self> {
        if !sigma.is_finite() {
            return Err(CoreError::NonFiniteParameter {
                name: "sigma",
                value: sigma,
            });
        }
        if !rho.is_finite() {
            return Err(CoreError::NonFiniteParameter {
                name: "rho",
                value: rho,
            });
        }
        if !beta.is_finite() {
            return Err(CoreError::NonFiniteParameter {
                name: "beta",
                value: beta,
            });
        }
        Ok(Self { sigma, rho, beta })
    }

    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    pub fn rho(&self) -> f64 {
        self.rho
    }

    pub fn beta(&self) -> f64 {
        self.beta
    }
}

impl Default for Lorenz {
    fn default() -> Self {
        Self {
            sigma: Self::DEFAULT_SIGMA,
            rho: Self::DEFAULT_RHO,
            beta: Self::DEFAULT_BETA,
        }
    }
}

impl DynamicalSystem for Lorenz {
    #[inline]
    fn derivative(&self, v: Vec3) -> Vec3 {
        Vec3::new(
            self.sigma * (v.y - v.x),
            self.rho * v.x - v.y - v.x * v.z,
            v.x * v.y - self.beta * v.z,
        )
    }
}
