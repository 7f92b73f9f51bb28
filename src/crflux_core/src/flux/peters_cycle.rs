//! Models built from several populations of sources, each accelerating all nuclei up to
//! a common maximal rigidity (a "Peters cycle").
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use super::{EnergyRange, FluxModel};
use crate::errors::{CrfluxResult, Error};
use crate::io::FileIO;
use crate::species::Nucleus;

/// Set of populations with exponential rigidity cutoffs.
///
/// The flux of a nucleus with charge Z is
/// `sum_i a_i * E^(-gamma_i - 1) * exp(-E / (Z * R_i))`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PetersCycles {
    /// Cutoff rigidity of each population in GV.
    pub cutoffs: Vec<f64>,

    /// Normalization and integral spectral index of each population, per nucleus.
    pub components: BTreeMap<Nucleus, Vec<(f64, f64)>>,
}

impl PetersCycles {
    fn new(cutoffs: Vec<f64>) -> Self {
        Self {
            cutoffs,
            components: BTreeMap::new(),
        }
    }

    /// Set the parameters of one population for a list of nuclei, ordered as `nuclei`.
    fn set_population(&mut self, pop: usize, nuclei: &[Nucleus], params: &[(f64, f64)]) {
        for (nucleus, param) in nuclei.iter().zip(params) {
            let comps = self.components.entry(*nucleus).or_default();
            if comps.len() <= pop {
                comps.resize(pop + 1, (0.0, 0.0));
            }
            comps[pop] = *param;
        }
    }

    /// Flux of a nucleus, zero for nuclei without parameters.
    pub fn flux(&self, nucleus: Nucleus, energy: f64) -> f64 {
        let z = nucleus.z() as f64;
        self.components.get(&nucleus).map_or(0.0, |comps| {
            comps
                .iter()
                .zip(&self.cutoffs)
                .map(|((norm, gamma), cutoff)| {
                    norm * energy.powf(-gamma - 1.0) * (-energy / z / cutoff).exp()
                })
                .sum()
        })
    }
}

const HG_GROUPS: [Nucleus; 5] = [
    Nucleus::PROTON,
    Nucleus::HELIUM,
    Nucleus::CARBON,
    Nucleus::SILICON,
    Nucleus::IRON,
];

/// Version of the third, extra-galactic population of [`HillasGaisser2012`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum HgVariant {
    /// Mixed composition above the ankle.
    H3a,

    /// Protons only above the ankle.
    H4a,
}

impl fmt::Display for HgVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HgVariant::H3a => write!(f, "H3a"),
            HgVariant::H4a => write!(f, "H4a"),
        }
    }
}

impl FromStr for HgVariant {
    type Err = Error;

    fn from_str(s: &str) -> CrfluxResult<Self> {
        match s {
            "H3a" => Ok(HgVariant::H3a),
            "H4a" => Ok(HgVariant::H4a),
            _ => Err(Error::UnknownModel(s.to_string())),
        }
    }
}

/// Hillas-Gaisser model.
///
/// Gaisser, T.K., Astroparticle Physics 35, 801 (2012).
///
/// Based on Hillas' ideas and eye-ball fits by T.K. Gaisser. Three populations of
/// five mass groups each, the first two galactic. H3a has a mixed composition in the
/// third population, H4a has only protons there.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct HillasGaisser2012 {
    name: String,
    short_name: String,

    /// Which extra-galactic population is used.
    pub variant: HgVariant,

    /// Population parameters.
    pub populations: PetersCycles,
    ids: Vec<Nucleus>,
}

impl FileIO for HillasGaisser2012 {}

impl HillasGaisser2012 {
    /// Construct the published model.
    pub fn new(variant: HgVariant) -> Self {
        let mut pops = PetersCycles::new(vec![4e6, 30e6, 2e9]);
        pops.set_population(
            0,
            &HG_GROUPS,
            &[(7860.0, 1.66), (3550.0, 1.58), (2200.0, 1.63), (1430.0, 1.67), (2120.0, 1.63)],
        );
        pops.set_population(
            1,
            &HG_GROUPS,
            &[(20.0, 1.4), (20.0, 1.4), (13.4, 1.4), (13.4, 1.4), (13.4, 1.4)],
        );
        Self::with_third_population(
            format!("Hillas-Gaisser ({})", variant),
            variant.to_string(),
            variant,
            pops,
        )
    }

    /// Modified version which follows a five component poly-gonato at lower energies
    /// and resembles H3a/H4a above the knee.
    pub fn new_polygonato(variant: HgVariant) -> Self {
        let mut pops = PetersCycles::new(vec![4.49e6, 30e6, 2e9]);
        pops.set_population(
            0,
            &HG_GROUPS,
            &[(11800.0, 1.71), (4750.0, 1.64), (3860.0, 1.67), (3120.0, 1.70), (1080.0, 1.55)],
        );
        pops.set_population(
            1,
            &HG_GROUPS,
            &[(11.8, 1.4), (11.8, 1.4), (7.88, 1.4), (7.88, 1.4), (7.88, 1.4)],
        );
        let mut model = Self::with_third_population(
            format!("Hillas-Gaisser poly-gonato ({})", variant),
            format!("{}-pg", variant),
            variant,
            pops,
        );
        // the poly-gonato tuned version always uses the H3a extra-galactic cutoff
        model.populations.cutoffs[2] = 2e9;
        model
    }

    fn with_third_population(
        name: String,
        short_name: String,
        variant: HgVariant,
        mut pops: PetersCycles,
    ) -> Self {
        match variant {
            HgVariant::H3a => {
                pops.cutoffs[2] = 2e9;
                pops.set_population(
                    2,
                    &HG_GROUPS,
                    &[(1.7, 1.4), (1.7, 1.4), (1.14, 1.4), (1.14, 1.4), (1.14, 1.4)],
                );
            }
            HgVariant::H4a => {
                pops.cutoffs[2] = 60e9;
                pops.set_population(
                    2,
                    &HG_GROUPS,
                    &[(200.0, 1.6), (0.0, 1.4), (0.0, 1.4), (0.0, 1.4), (0.0, 1.4)],
                );
            }
        }
        Self {
            name,
            short_name,
            variant,
            populations: pops,
            ids: HG_GROUPS.to_vec(),
        }
    }
}

impl FluxModel for HillasGaisser2012 {
    fn name(&self) -> &str {
        &self.name
    }

    fn short_name(&self) -> &str {
        &self.short_name
    }

    fn nucleus_ids(&self) -> &[Nucleus] {
        &self.ids
    }

    fn valid_range(&self, _nucleus: Nucleus) -> EnergyRange {
        EnergyRange::standard()
    }

    fn flux_unchecked(&self, nucleus: Nucleus, energy: f64) -> f64 {
        self.populations.flux(nucleus, energy)
    }
}

const GST_GROUPS: [Nucleus; 7] = [
    Nucleus::PROTON,
    Nucleus::HELIUM,
    Nucleus::CARBON,
    Nucleus::OXYGEN,
    Nucleus::IRON,
    Nucleus::TELLURIUM,
    Nucleus::MERCURY,
];

/// Number of source generations of [`GaisserStanevTilav`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum GstVariant {
    /// Three populations.
    ThreeGen,

    /// Four populations, the fourth being protons only.
    FourGen,
}

impl fmt::Display for GstVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GstVariant::ThreeGen => write!(f, "3-gen"),
            GstVariant::FourGen => write!(f, "4-gen"),
        }
    }
}

impl FromStr for GstVariant {
    type Err = Error;

    fn from_str(s: &str) -> CrfluxResult<Self> {
        match s {
            "3-gen" => Ok(GstVariant::ThreeGen),
            "4-gen" => Ok(GstVariant::FourGen),
            _ => Err(Error::UnknownModel(s.to_string())),
        }
    }
}

/// Gaisser-Stanev-Tilav model.
///
/// T. K. Gaisser, T. Stanev, and S. Tilav, arXiv:1303.3565, (2013).
///
/// The heavy groups (Te, Hg) only contribute to the second population. They are left
/// out of the all-particle flux unless `include_heavy` is set, which matches the
/// published all-particle spectrum.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct GaisserStanevTilav {
    name: String,
    short_name: String,

    /// Number of populations.
    pub variant: GstVariant,

    /// Population parameters.
    pub populations: PetersCycles,
    ids: Vec<Nucleus>,
}

impl FileIO for GaisserStanevTilav {}

impl GaisserStanevTilav {
    /// Construct the published model.
    ///
    /// # Arguments
    ///
    /// * `variant` - Number of populations.
    /// * `include_heavy` - Include the Te and Hg groups in the list of nuclei.
    pub fn new(variant: GstVariant, include_heavy: bool) -> Self {
        let mut pops = PetersCycles::new(vec![120e3, 4e6]);
        pops.set_population(
            0,
            &GST_GROUPS,
            &[
                (7000.0, 1.66),
                (3200.0, 1.58),
                (100.0, 1.4),
                (130.0, 1.4),
                (60.0, 1.3),
                (0.0, 1.0),
                (0.0, 1.0),
            ],
        );
        match variant {
            GstVariant::ThreeGen => {
                pops.set_population(
                    1,
                    &GST_GROUPS,
                    &[
                        (150.0, 1.4),
                        (65.0, 1.3),
                        (6.0, 1.3),
                        (7.0, 1.3),
                        (2.3, 1.2),
                        (0.1, 1.2),
                        (0.4, 1.2),
                    ],
                );
                pops.cutoffs.push(1.3e9);
                pops.set_population(
                    2,
                    &GST_GROUPS,
                    &[
                        (14.0, 1.4),
                        (0.0, 1.4),
                        (0.0, 1.4),
                        (0.0, 1.3),
                        (0.025, 1.2),
                        (0.0, 1.0),
                        (0.0, 1.0),
                    ],
                );
            }
            GstVariant::FourGen => {
                pops.set_population(
                    1,
                    &GST_GROUPS,
                    &[
                        (150.0, 1.4),
                        (65.0, 1.3),
                        (6.0, 1.3),
                        (7.0, 1.3),
                        (2.1, 1.2),
                        (0.1, 1.2),
                        (0.53, 1.2),
                    ],
                );
                pops.cutoffs.push(1.5e9);
                pops.set_population(
                    2,
                    &GST_GROUPS,
                    &[
                        (12.0, 1.4),
                        (0.0, 1.4),
                        (0.0, 1.4),
                        (0.0, 1.3),
                        (0.011, 1.2),
                        (0.0, 1.0),
                        (0.0, 1.0),
                    ],
                );
                pops.cutoffs.push(40e9);
                pops.set_population(
                    3,
                    &GST_GROUPS,
                    &[
                        (1.2, 1.4),
                        (0.0, 0.0),
                        (0.0, 0.0),
                        (0.0, 0.0),
                        (0.0, 0.0),
                        (0.0, 0.0),
                        (0.0, 0.0),
                    ],
                );
            }
        }
        let ids = GST_GROUPS
            .iter()
            .copied()
            .filter(|id| include_heavy || (*id != Nucleus::TELLURIUM && *id != Nucleus::MERCURY))
            .collect();
        Self {
            name: format!("GST ({})", variant),
            short_name: match variant {
                GstVariant::ThreeGen => "GST3".into(),
                GstVariant::FourGen => "GST4".into(),
            },
            variant,
            populations: pops,
            ids,
        }
    }
}

impl FluxModel for GaisserStanevTilav {
    fn name(&self) -> &str {
        &self.name
    }

    fn short_name(&self) -> &str {
        &self.short_name
    }

    fn nucleus_ids(&self) -> &[Nucleus] {
        &self.ids
    }

    fn valid_range(&self, _nucleus: Nucleus) -> EnergyRange {
        EnergyRange::standard()
    }

    fn flux_unchecked(&self, nucleus: Nucleus, energy: f64) -> f64 {
        self.populations.flux(nucleus, energy)
    }
}
