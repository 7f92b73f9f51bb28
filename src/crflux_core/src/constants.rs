//! Fixed numbers shared by the flux models.

/// Default lower bound of the validated energy range in GeV.
pub const E_MIN_DEFAULT: f64 = 1.0;

/// Default upper bound of the validated energy range in GeV.
pub const E_MAX_DEFAULT: f64 = 1e11;

/// Maximum mass number difference allowed when substituting a modelled nucleus for a
/// requested one.
pub const MAX_DELTA_A: u32 = 3;

/// Smallest flux written into tables, replacing non-positive values so that the
/// logarithm stays finite.
pub const FLUX_FLOOR: f64 = 1e-300;

/// Default relative step of the numerical spectral index derivatives.
pub const GAMMA_REL_DELTA: f64 = 0.01;
