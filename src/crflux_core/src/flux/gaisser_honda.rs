use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{EnergyRange, FluxModel};
use crate::constants::E_MIN_DEFAULT;
use crate::io::FileIO;
use crate::species::Nucleus;

/// Highest validated energy per nucleon of [`GaisserHonda`] in GeV.
const GH_MAX_NUCLEON_ENERGY: f64 = 1e5;

/// Fit parameters of a single mass group of [`GaisserHonda`].
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct GhParams {
    /// Spectral index.
    pub alpha: f64,

    /// Normalization.
    pub k: f64,

    /// Low energy shape parameter.
    pub b: f64,

    /// Low energy shape parameter.
    pub c: f64,
}

/// Five mass group single power law model.
///
/// T.K. Gaisser and M. Honda, Annual Review of Nuclear and Particle Science 52, 153
/// (2002).
///
/// This model was tuned to lower energy balloon data. It fails to describe the flux at
/// and above the knee, it is validated up to 100 TeV per nucleon.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct GaisserHonda {
    params: BTreeMap<Nucleus, GhParams>,
    ids: Vec<Nucleus>,
}

impl FileIO for GaisserHonda {}

impl Default for GaisserHonda {
    fn default() -> Self {
        Self::new()
    }
}

impl GaisserHonda {
    /// Construct with the published parameters.
    pub fn new() -> Self {
        let params: BTreeMap<Nucleus, GhParams> = [
            (Nucleus::PROTON, (2.74, 14900.0, 2.15, 0.21)),
            (Nucleus::HELIUM, (2.64, 600.0, 1.25, 0.14)),
            (Nucleus::CARBON, (2.60, 33.2, 0.97, 0.01)),
            (Nucleus::SILICON, (2.87, 28.2, 2.14, 0.01)),
            (Nucleus::IRON, (2.68, 4.45, 3.07, 0.41)),
        ]
        .into_iter()
        .map(|(id, (alpha, k, b, c))| (id, GhParams { alpha, k, b, c }))
        .collect();
        let ids = params.keys().copied().collect();
        Self { params, ids }
    }
}

impl FluxModel for GaisserHonda {
    fn name(&self) -> &str {
        "Gaisser-Honda"
    }

    fn short_name(&self) -> &str {
        "GH"
    }

    fn nucleus_ids(&self) -> &[Nucleus] {
        &self.ids
    }

    fn valid_range(&self, nucleus: Nucleus) -> EnergyRange {
        EnergyRange {
            min: E_MIN_DEFAULT,
            max: GH_MAX_NUCLEON_ENERGY * nucleus.a() as f64,
        }
    }

    fn flux_unchecked(&self, nucleus: Nucleus, energy: f64) -> f64 {
        let Some(p) = self.params.get(&nucleus) else {
            return 0.0;
        };
        let a = nucleus.a() as f64;
        let e_n = energy / a;
        p.k / a * (e_n + p.b * (-p.c * e_n.sqrt()).exp()).powf(-p.alpha)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_scales_with_mass() {
        let model = GaisserHonda::new();
        assert!(model.nucleus_flux(Nucleus::PROTON, 1e5).is_ok());
        assert!(model.nucleus_flux(Nucleus::PROTON, 1.1e5).is_err());
        assert!(model.nucleus_flux(Nucleus::IRON, 5.4e6).is_ok());
        // all-nucleon flux is valid right up to 100 TeV per nucleon
        assert!(model.tot_nucleon_flux(1e5).is_ok());
        assert!(model.tot_nucleon_flux(1.01e5).is_err());
    }

    #[test]
    fn test_high_energy_limit() {
        let model = GaisserHonda::new();
        // far above the shape parameters the flux is K * E_n^-alpha / A
        let flux = model.nucleus_flux(Nucleus::HELIUM, 4e4).unwrap();
        let expected = 600.0 / 4.0 * 1e4f64.powf(-2.64);
        assert!((flux / expected - 1.0).abs() < 1e-3);
    }
}
