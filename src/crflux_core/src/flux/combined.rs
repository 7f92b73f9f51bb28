use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{EnergyRange, FluxModel, GaisserHonda, HgVariant, HillasGaisser2012};
use crate::errors::CrfluxResult;
use crate::fitting::newton_raphson_numeric;
use crate::io::FileIO;
use crate::species::Nucleus;

/// Starting point of the transition search in log10(E / GeV).
const TRANSITION_START: f64 = 3.1;

/// Gaisser-Honda at low energies joined to Hillas-Gaisser at high energies.
///
/// A. Fedynitch, J. Becker Tjus, and P. Desiati, Phys. Rev. D 86, 114024 (2012).
///
/// For every mass group the switch happens where both models predict the same flux,
/// so the combined spectrum is continuous.
///
/// ```
///     use crflux_core::prelude::*;
///     let model = CombinedGHandHG::new(HgVariant::H3a).unwrap();
///     let e_t = model.transition(Nucleus::PROTON).unwrap();
///     assert!(e_t > 1e3 && e_t < 1e5);
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CombinedGHandHG {
    name: String,
    short_name: String,
    le_model: GaisserHonda,
    he_model: HillasGaisser2012,
    transitions: BTreeMap<Nucleus, f64>,
    ids: Vec<Nucleus>,
}

impl FileIO for CombinedGHandHG {}

impl CombinedGHandHG {
    /// Construct and solve for the transition energy of every mass group.
    pub fn new(variant: HgVariant) -> CrfluxResult<Self> {
        let le_model = GaisserHonda::new();
        let he_model = HillasGaisser2012::new(variant);
        let mut transitions = BTreeMap::new();
        for id in he_model.nucleus_ids() {
            let e_t = find_transition(&le_model, &he_model, *id)?;
            debug!("{}: switching from GH to {} at {:.4e} GeV", id, variant, e_t);
            let _ = transitions.insert(*id, e_t);
        }
        let ids = transitions.keys().copied().collect();
        Ok(Self {
            name: format!("comb. GH and {}", variant),
            short_name: format!("c{}", variant),
            le_model,
            he_model,
            transitions,
            ids,
        })
    }

    /// Energy in GeV above which the high energy model is used.
    pub fn transition(&self, nucleus: Nucleus) -> Option<f64> {
        self.transitions.get(&nucleus).copied()
    }
}

/// Solve for the energy where both models agree, working in log-log space.
fn find_transition(
    le_model: &GaisserHonda,
    he_model: &HillasGaisser2012,
    nucleus: Nucleus,
) -> CrfluxResult<f64> {
    let diff = |log_e: f64| {
        let energy = 10f64.powf(log_e);
        le_model.flux_unchecked(nucleus, energy).ln() - he_model.flux_unchecked(nucleus, energy).ln()
    };
    let log_e = newton_raphson_numeric(diff, TRANSITION_START, 1e-4, 1e-10)?;
    Ok(10f64.powf(log_e))
}

impl FluxModel for CombinedGHandHG {
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
        match self.transitions.get(&nucleus) {
            Some(e_t) if energy < *e_t => self.le_model.flux_unchecked(nucleus, energy),
            Some(_) => self.he_model.flux_unchecked(nucleus, energy),
            None => 0.0,
        }
    }
}
