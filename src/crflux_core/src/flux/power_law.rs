use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{EnergyRange, FluxModel};
use crate::errors::{CrfluxResult, Error};
use crate::io::FileIO;
use crate::species::Nucleus;

/// Single power law for one nucleus, `K * (E / E0)^gamma`.
///
/// ```
///     use crflux_core::prelude::*;
///     let model = PowerLaw::new(
///         "test", Nucleus::PROTON, 1.0, -2.7, 1.0, EnergyRange::standard(),
///     ).unwrap();
///     let flux = model.nucleus_flux(Nucleus::PROTON, 10.0).unwrap();
///     assert!((flux / 10f64.powf(-2.7) - 1.0).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PowerLaw {
    name: String,
    nucleus: [Nucleus; 1],

    /// Flux at the reference energy in (m^2 s sr GeV)^-1.
    pub normalization: f64,

    /// Spectral index, negative for falling spectra.
    pub index: f64,

    /// Reference energy in GeV.
    pub reference_energy: f64,

    /// Validated energy range.
    pub range: EnergyRange,
}

impl FileIO for PowerLaw {}

impl PowerLaw {
    /// Construct a new power law.
    ///
    /// # Arguments
    ///
    /// * `name` - Label of the model.
    /// * `nucleus` - The single nucleus described by the model.
    /// * `normalization` - Flux at the reference energy, must not be negative.
    /// * `index` - Spectral index.
    /// * `reference_energy` - Energy in GeV at which the normalization applies.
    /// * `range` - Validated energy range.
    pub fn new(
        name: &str,
        nucleus: Nucleus,
        normalization: f64,
        index: f64,
        reference_energy: f64,
        range: EnergyRange,
    ) -> CrfluxResult<Self> {
        if !(normalization >= 0.0 && normalization.is_finite()) {
            return Err(Error::ValueError(format!(
                "Power law normalization must be finite and non-negative, got {}.",
                normalization
            )));
        }
        if !(reference_energy > 0.0 && reference_energy.is_finite()) || !index.is_finite() {
            return Err(Error::ValueError(
                "Power law requires a finite index and a positive reference energy.".into(),
            ));
        }
        Ok(Self {
            name: name.to_string(),
            nucleus: [nucleus],
            normalization,
            index,
            reference_energy,
            range,
        })
    }

    /// Proton only `E^-2.7` spectrum, using the normalization of [`Thunman`] below the
    /// knee.
    pub fn simple_e27() -> Self {
        Self {
            name: "E-2.7".into(),
            nucleus: [Nucleus::PROTON],
            normalization: 1.7e4,
            index: -2.7,
            reference_energy: 1.0,
            range: EnergyRange::standard(),
        }
    }
}

impl FluxModel for PowerLaw {
    fn name(&self) -> &str {
        &self.name
    }

    fn short_name(&self) -> &str {
        &self.name
    }

    fn nucleus_ids(&self) -> &[Nucleus] {
        &self.nucleus
    }

    fn valid_range(&self, _nucleus: Nucleus) -> EnergyRange {
        self.range
    }

    fn flux_unchecked(&self, _nucleus: Nucleus, energy: f64) -> f64 {
        self.normalization * (energy / self.reference_energy).powf(self.index)
    }

    fn resolve_species(&self, nucleus: Nucleus) -> CrfluxResult<Nucleus> {
        exact_species(self, nucleus)
    }
}

const PROTON_ONLY: &[Nucleus] = &[Nucleus::PROTON];

/// Proton only models do not substitute neighbouring nuclei.
fn exact_species<M: FluxModel>(model: &M, nucleus: Nucleus) -> CrfluxResult<Nucleus> {
    if model.nucleus_ids().contains(&nucleus) {
        Ok(nucleus)
    } else {
        Err(Error::UnsupportedSpecies(nucleus))
    }
}

/// Broken power law for protons.
///
/// M. Thunman, G. Ingelman, and P. Gondolo, Astroparticle Physics 5, 309 (1996).
///
/// The model contains only protons with a power law index of -2.7 below the knee,
/// located at 5 PeV, and -3.0 for energies higher than that. With the published
/// normalizations the flux is not continuous at the knee, it steps up by about 0.09%.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Thunman {
    /// Normalization and index below the knee.
    pub low_e: (f64, f64),

    /// Normalization and index above the knee.
    pub high_e: (f64, f64),

    /// Knee energy in GeV.
    pub transition: f64,
}

impl FileIO for Thunman {}

impl Default for Thunman {
    fn default() -> Self {
        Self::new()
    }
}

impl Thunman {
    /// Construct with the published parameters.
    pub fn new() -> Self {
        Self {
            low_e: (1.7e4, -2.7),
            high_e: (1.74e6, -3.0),
            transition: 5e6,
        }
    }
}

impl FluxModel for Thunman {
    fn name(&self) -> &str {
        "Thunman et al. ('96)"
    }

    fn short_name(&self) -> &str {
        "TIG"
    }

    fn nucleus_ids(&self) -> &[Nucleus] {
        PROTON_ONLY
    }

    fn valid_range(&self, _nucleus: Nucleus) -> EnergyRange {
        EnergyRange::standard()
    }

    fn flux_unchecked(&self, _nucleus: Nucleus, energy: f64) -> f64 {
        let (norm, index) = if energy < self.transition {
            self.low_e
        } else {
            self.high_e
        };
        norm * energy.powf(index)
    }

    fn resolve_species(&self, nucleus: Nucleus) -> CrfluxResult<Nucleus> {
        exact_species(self, nucleus)
    }
}

/// Parameters of a single broken power law of [`BenzviMontaruli`].
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct BrokenPowerLaw {
    /// Reference energy in GeV.
    pub e_0: f64,

    /// Flux at the reference energy.
    pub norm: f64,

    /// Index below the break.
    pub gamma_1: f64,

    /// Break energy in GeV.
    pub e_break: f64,

    /// Index above the break.
    pub gamma_2: f64,
}

impl BrokenPowerLaw {
    /// Evaluate, continuous at the break energy.
    pub fn flux(&self, energy: f64) -> f64 {
        if energy < self.e_break {
            self.norm * (energy / self.e_0).powf(self.gamma_1)
        } else {
            self.norm
                * (self.e_break / self.e_0).powf(self.gamma_1 - self.gamma_2)
                * (energy / self.e_0).powf(self.gamma_2)
        }
    }
}

/// Broken power law composition model started by S. BenZvi and T. Montaruli for
/// IceCube (2014). The project is no longer maintained, the parameters are kept for
/// comparisons.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct BenzviMontaruli {
    params: BTreeMap<Nucleus, BrokenPowerLaw>,
    ids: Vec<Nucleus>,
}

impl FileIO for BenzviMontaruli {}

impl Default for BenzviMontaruli {
    fn default() -> Self {
        Self::new()
    }
}

impl BenzviMontaruli {
    /// Construct with the published parameters.
    pub fn new() -> Self {
        let table = [
            (Nucleus::PROTON, (31.623, 1.145, -2.786, 262.628, -2.695)),
            (Nucleus::HELIUM, (100.0, 0.030, -2.712, 484.059, -2.600)),
            (Nucleus::CARBON, (240.0, 6.014e-4, -2.741, 2400.0, -2.503)),
            (Nucleus::OXYGEN, (320.0, 3.828e-5, -2.741, 3200.0, -2.503)),
            (Nucleus::MAGNESIUM, (400.0, 4.458e-5, -2.741, 4800.0, -2.503)),
            (Nucleus::SILICON, (560.0, 4.314e-5, -2.741, 5600.0, -2.503)),
            (Nucleus::IRON, (1120.0, 1.659e-5, -2.741, 11200.0, -2.503)),
        ];
        let params: BTreeMap<_, _> = table
            .into_iter()
            .map(|(id, (e_0, norm, gamma_1, e_break, gamma_2))| {
                (
                    id,
                    BrokenPowerLaw {
                        e_0,
                        norm,
                        gamma_1,
                        e_break,
                        gamma_2,
                    },
                )
            })
            .collect();
        let ids = params.keys().copied().collect();
        Self { params, ids }
    }
}

impl FluxModel for BenzviMontaruli {
    fn name(&self) -> &str {
        "Benzvi-Montaruli"
    }

    fn short_name(&self) -> &str {
        "BM"
    }

    fn nucleus_ids(&self) -> &[Nucleus] {
        &self.ids
    }

    fn valid_range(&self, _nucleus: Nucleus) -> EnergyRange {
        EnergyRange {
            min: 1.0,
            max: 1e8,
        }
    }

    fn flux_unchecked(&self, nucleus: Nucleus, energy: f64) -> f64 {
        self.params
            .get(&nucleus)
            .map_or(0.0, |p| p.flux(energy))
    }
}
