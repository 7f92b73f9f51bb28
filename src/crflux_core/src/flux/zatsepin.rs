use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use super::{EnergyRange, FluxModel};
use crate::constants::E_MIN_DEFAULT;
use crate::errors::{CrfluxResult, Error};
use crate::io::FileIO;
use crate::species::Nucleus;

/// Number of source classes.
const N_SOURCES: usize = 3;

/// Energy in GeV at which every source class is normalized.
const E_NORM: f64 = 1e4;

/// Below this energy in GeV the solar modulation correction is applied.
const E_MODULATION: f64 = 300.0;

/// Parameter set of [`ZatsepinSokolskaya`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum ZsVariant {
    /// Parameters of the original publication.
    Default,

    /// Parameters refitted to PAMELA data.
    Pamela,
}

impl fmt::Display for ZsVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ZsVariant::Default => write!(f, "default"),
            ZsVariant::Pamela => write!(f, "pamela"),
        }
    }
}

impl FromStr for ZsVariant {
    type Err = Error;

    fn from_str(s: &str) -> CrfluxResult<Self> {
        match s.to_lowercase().as_str() {
            "default" => Ok(ZsVariant::Default),
            "pamela" => Ok(ZsVariant::Pamela),
            _ => Err(Error::UnknownModel(s.to_string())),
        }
    }
}

/// Normalization of a single mass group.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct ZsNormalization {
    /// Flux of each source class at 10 TeV, in units of E^-2.75.
    pub sources: [f64; N_SOURCES],

    /// Grammage scale at which escape saturates.
    pub lambda_scale: f64,
}

/// Three classes of galactic sources with rigidity dependent escape.
///
/// V. I. Zatsepin and N. V. Sokolskaya, Astronomy and Astrophysics 458, 1 (2006).
/// The PAMELA variant uses the parameters from O. Adriani et al., Science 332, 69
/// (2011).
///
/// The model does not describe the flux above the knee and is validated up to 10 PeV.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ZatsepinSokolskaya {
    /// Parameter set.
    pub variant: ZsVariant,

    /// Reference rigidity of the escape length in GV.
    pub r_0: f64,

    /// Source indices.
    pub alpha: [f64; N_SOURCES],

    /// Maximum rigidity of each source class in GV.
    pub r_max: [f64; N_SOURCES],

    /// Spectral indices.
    pub gamma: [f64; N_SOURCES],

    /// Spectral indices above the maximum rigidity.
    pub gamma_k: [f64; N_SOURCES],

    /// Nucleon mass in GeV.
    pub m_p: f64,

    norms: BTreeMap<Nucleus, ZsNormalization>,
    ids: Vec<Nucleus>,
}

impl FileIO for ZatsepinSokolskaya {}

impl ZatsepinSokolskaya {
    /// Construct with one of the published parameter sets.
    pub fn new(variant: ZsVariant) -> Self {
        let (p_norm, he_norm) = match variant {
            ZsVariant::Pamela => ((7.1e3, 6.25e3, 3.0, 74.0), (9.5e3, 8.5e3, 0.74, 18.0)),
            ZsVariant::Default => ((1.36e4, 6.25e3, 2.1, 74.0), (8.75e3, 8.5e3, 3.0, 18.0)),
        };
        let norms: BTreeMap<Nucleus, ZsNormalization> = [
            (Nucleus::PROTON, p_norm),
            (Nucleus::HELIUM, he_norm),
            (Nucleus::CARBON, (6.75e3, 1.8e3, 30.0, 5.8)),
            (Nucleus::SILICON, (5.5e3, 1.5e3, 110.0, 3.5)),
            (Nucleus::IRON, (3.5e3, 1.2e3, 750.0, 2.4)),
        ]
        .into_iter()
        .map(|(id, (s0, s1, s2, lambda_scale))| {
            (
                id,
                ZsNormalization {
                    sources: [s0, s1, s2],
                    lambda_scale,
                },
            )
        })
        .collect();
        let ids = norms.keys().copied().collect();
        Self {
            variant,
            r_0: 5.5,
            alpha: [2.3, 2.1, 2.57],
            r_max: [8e4, 4e6, 2e2],
            gamma: [2.63, 2.43, 2.9],
            gamma_k: [8.0, 4.5, 4.5],
            m_p: 0.983,
            norms,
            ids,
        }
    }

    /// Escape length at a rigidity in GV.
    fn lambda_esc(&self, rigidity: f64) -> f64 {
        let ratio = rigidity / self.r_0;
        4.2 * ratio.powf(-1.0 / 3.0) * (1.0 + ratio.powf(-2.0 / 3.0))
    }

    /// Source spectrum of a class at a rigidity in GV.
    fn source(&self, rigidity: f64, class: usize) -> f64 {
        let cutoff = (1.0 + (rigidity / self.r_max[class]).powi(2))
            .powf((self.gamma[class] - self.gamma_k[class]) / 2.0);
        rigidity.powf(-self.alpha[class]) * cutoff
    }

    /// Rigidity and dR/dE of a nucleus at a kinetic energy.
    fn rigidity(&self, nucleus: Nucleus, energy: f64) -> (f64, f64) {
        let (z, a) = nucleus.z_a();
        let momentum = (energy * energy + 2.0 * self.m_p * a * energy).sqrt();
        (momentum / z, (energy + self.m_p * a) / momentum / z)
    }

    fn d_n_d_e(&self, nucleus: Nucleus, norm: &ZsNormalization, energy: f64, class: usize) -> f64 {
        let (rigidity, d_r_d_e) = self.rigidity(nucleus, energy);
        let lambda = self.lambda_esc(rigidity);
        d_r_d_e * self.source(rigidity, class) * lambda / (1.0 + lambda / norm.lambda_scale)
    }

    /// Interstellar flux, sum of the three source classes.
    fn interstellar(&self, nucleus: Nucleus, norm: &ZsNormalization, energy: f64) -> f64 {
        (0..N_SOURCES)
            .map(|class| {
                norm.sources[class] * E_NORM.powf(-2.75)
                    / self.d_n_d_e(nucleus, norm, E_NORM, class)
                    * self.d_n_d_e(nucleus, norm, energy, class)
            })
            .sum()
    }
}

impl FluxModel for ZatsepinSokolskaya {
    fn name(&self) -> &str {
        match self.variant {
            ZsVariant::Default => "Zatsepin-Sokolskaya",
            ZsVariant::Pamela => "Zatsepin-Sokolskaya/Pamela",
        }
    }

    fn short_name(&self) -> &str {
        match self.variant {
            ZsVariant::Default => "ZS",
            ZsVariant::Pamela => "ZSP",
        }
    }

    fn nucleus_ids(&self) -> &[Nucleus] {
        &self.ids
    }

    fn valid_range(&self, _nucleus: Nucleus) -> EnergyRange {
        EnergyRange {
            min: E_MIN_DEFAULT,
            max: 1e7,
        }
    }

    fn flux_unchecked(&self, nucleus: Nucleus, energy: f64) -> f64 {
        let Some(norm) = self.norms.get(&nucleus) else {
            return 0.0;
        };
        if energy >= E_MODULATION {
            return self.interstellar(nucleus, norm, energy);
        }
        // force field solar modulation
        let shift = nucleus.z() as f64 * 0.511e-3 * 0.6;
        let shifted = energy + shift;
        let suppression = (energy * energy + 2.0 * self.m_p * energy)
            / (shifted * shifted + 2.0 * self.m_p * shifted);
        self.interstellar(nucleus, norm, shifted) * suppression
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalization() {
        for variant in [ZsVariant::Default, ZsVariant::Pamela] {
            let model = ZatsepinSokolskaya::new(variant);
            for id in model.nucleus_ids() {
                let flux = model.nucleus_flux(*id, E_NORM).unwrap();
                let norm = model.norms[id].sources.iter().sum::<f64>();
                assert!((flux / (norm * E_NORM.powf(-2.75)) - 1.0).abs() < 1e-10);
            }
        }
    }

    #[test]
    fn test_modulation_is_small() {
        let model = ZatsepinSokolskaya::new(ZsVariant::Pamela);
        let below = model.nucleus_flux(Nucleus::IRON, E_MODULATION * (1.0 - 1e-9)).unwrap();
        let above = model.nucleus_flux(Nucleus::IRON, E_MODULATION).unwrap();
        // shifted to a higher energy and suppressed
        assert!(below < above);
        assert!((below / above - 1.0).abs() < 1e-3);
        assert!(model.nucleus_flux(Nucleus::IRON, 1.1e7).is_err());
    }

    #[test]
    fn test_variant_names() {
        assert_eq!("Pamela".parse::<ZsVariant>().unwrap(), ZsVariant::Pamela);
        assert!("other".parse::<ZsVariant>().is_err());
        assert_eq!(ZatsepinSokolskaya::new(ZsVariant::Default).short_name(), "ZS");
        assert_eq!(ZatsepinSokolskaya::new(ZsVariant::Pamela).short_name(), "ZSP");
    }
}
