use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{EnergyRange, FluxModel};
use crate::io::FileIO;
use crate::species::Nucleus;

/// Poly-gonato model.
///
/// J. R. Hoerandel, Astroparticle Physics 19, 193 (2003).
///
/// Every element follows a power law which steepens smoothly at a knee proportional to
/// its charge. With `constant_delta` the spectra steepen to a common index, otherwise
/// every element steepens by the same amount.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PolyGonato {
    /// Common final index instead of a common index change.
    pub constant_delta: bool,

    /// Knee energy of protons in GeV.
    pub e_p: f64,

    /// Common index above the knee, used with `constant_delta`.
    pub gamma_c: f64,

    /// Smoothness of the knee.
    pub epsilon_c: f64,

    /// Index change at the knee.
    pub delta_gamma: f64,

    /// Flux at 1 TeV in (m^2 s sr TeV)^-1 and spectral index per element.
    params: BTreeMap<Nucleus, (f64, f64)>,
    ids: Vec<Nucleus>,
}

impl FileIO for PolyGonato {}

impl PolyGonato {
    /// Construct the poly-gonato model.
    ///
    /// # Arguments
    ///
    /// * `constant_delta` - If true, all elements steepen to a common index above
    ///   their knee, otherwise each index increases by `delta_gamma`.
    pub fn new(constant_delta: bool) -> Self {
        let params: BTreeMap<Nucleus, (f64, f64)> = [
            (Nucleus::PROTON, (8.73e-2, 2.71)),
            (Nucleus::HELIUM, (5.71e-2, 2.64)),
            (Nucleus::CARBON, (1.06e-2, 2.66)),
            (Nucleus::NITROGEN, (2.35e-3, 2.72)),
            (Nucleus::OXYGEN, (1.57e-2, 2.68)),
            (Nucleus::MAGNESIUM, (8.01e-3, 2.64)),
            (Nucleus::ALUMINIUM, (1.15e-3, 2.66)),
            (Nucleus::SILICON, (7.96e-3, 2.75)),
            (Nucleus::MANGANESE, (1.35e-3, 2.46)),
            (Nucleus::IRON, (2.04e-2, 2.59)),
            (Nucleus::COBALT, (7.51e-5, 2.72)),
        ]
        .into_iter()
        .collect();
        let ids = params.keys().copied().collect();

        let (e_p, epsilon_c) = if constant_delta {
            (4.49e6, 1.90)
        } else {
            (4.51e6, 1.87)
        };
        Self {
            constant_delta,
            e_p,
            gamma_c: -4.68,
            epsilon_c,
            delta_gamma: 2.10,
            params,
            ids,
        }
    }
}

impl FluxModel for PolyGonato {
    fn name(&self) -> &str {
        "poly-gonato"
    }

    fn short_name(&self) -> &str {
        if self.constant_delta {
            "pg-const"
        } else {
            "pg"
        }
    }

    fn nucleus_ids(&self) -> &[Nucleus] {
        &self.ids
    }

    fn valid_range(&self, _nucleus: Nucleus) -> EnergyRange {
        EnergyRange::standard()
    }

    fn flux_unchecked(&self, nucleus: Nucleus, energy: f64) -> f64 {
        let Some(&(norm, gamma)) = self.params.get(&nucleus) else {
            return 0.0;
        };
        let z = nucleus.z() as f64;
        let change = if self.constant_delta {
            self.gamma_c + gamma
        } else {
            -self.delta_gamma
        };
        // normalization is given per TeV at 1 TeV
        norm / 1000.0
            * (energy / 1000.0).powf(-gamma)
            * (1.0 + (energy / z / self.e_p).powf(self.epsilon_c)).powf(change / self.epsilon_c)
    }
}
