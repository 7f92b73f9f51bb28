//! # Survey
//! Side by side comparison of flux models on a common energy grid.
//!
//! For each model the all-nucleon flux and the all-particle flux (both multiplied by
//! `E^2.5`), the neutron fraction and the mean log mass are evaluated. Points which a
//! model cannot provide, because they are outside of its validated range or because
//! the model has no per-nucleus information, are left empty.
//!
//! ```
//!     use crflux_core::flux::standard_models;
//!     use crflux_core::survey::survey;
//!
//!     let models = standard_models().unwrap();
//!     let rows = survey(&models, &[10.0, 1e3, 1e9]);
//!     assert_eq!(rows.len(), models.len());
//!     // Gaisser-Honda is not validated at 1e9 GeV
//!     let gh = rows.iter().find(|row| row.short_name == "GH").unwrap();
//!     assert!(gh.particle_flux_e25[1].is_some());
//!     assert!(gh.particle_flux_e25[2].is_none());
//! ```
use log::info;
use rayon::prelude::*;

use crate::constants::GAMMA_REL_DELTA;
use crate::flux::FluxModel;

/// Comparison quantities of a single model.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelSurvey {
    /// Full name of the model.
    pub name: String,

    /// Short name of the model.
    pub short_name: String,

    /// Grid of energies in GeV, per nucleon for the nucleon quantities and per
    /// particle for the rest.
    pub energies: Vec<f64>,

    /// All-nucleon flux times `E^2.5`.
    pub nucleon_flux_e25: Vec<Option<f64>>,

    /// Spectral index of the all-nucleon flux.
    pub nucleon_gamma: Vec<Option<f64>>,

    /// Fraction of neutrons among all nucleons.
    pub neutron_fraction: Vec<Option<f64>>,

    /// All-particle flux times `E^2.5`.
    pub particle_flux_e25: Vec<Option<f64>>,

    /// Mean natural log of the mass number.
    pub ln_a: Vec<Option<f64>>,
}

impl ModelSurvey {
    /// Evaluate a single model.
    pub fn evaluate<M: FluxModel + ?Sized>(model: &M, energies: &[f64]) -> Self {
        let nucleon_flux_e25 = energies
            .iter()
            .map(|e| model.tot_nucleon_flux(*e).ok().map(|f| f * e.powf(2.5)))
            .collect();
        let nucleon_gamma = energies
            .iter()
            .map(|e| model.nucleon_gamma(*e, GAMMA_REL_DELTA).ok())
            .collect();
        let neutron_fraction = energies
            .iter()
            .map(|e| model.p_and_n_flux(*e).ok().map(|(p_frac, _, _)| 1.0 - p_frac))
            .collect();
        let particle_flux_e25 = energies
            .iter()
            .map(|e| model.total_flux(*e).ok().map(|f| f * e.powf(2.5)))
            .collect();
        let ln_a = energies.iter().map(|e| model.ln_a(*e).ok()).collect();
        Self {
            name: model.name().to_string(),
            short_name: model.short_name().to_string(),
            energies: energies.to_vec(),
            nucleon_flux_e25,
            nucleon_gamma,
            neutron_fraction,
            particle_flux_e25,
            ln_a,
        }
    }

    /// Number of grid points at which the all-nucleon flux is available.
    pub fn n_valid(&self) -> usize {
        self.nucleon_flux_e25.iter().flatten().count()
    }
}

/// Evaluate a collection of models in parallel, keeping the order of the models.
pub fn survey(models: &[Box<dyn FluxModel>], energies: &[f64]) -> Vec<ModelSurvey> {
    models
        .par_iter()
        .map(|model| {
            let row = ModelSurvey::evaluate(&**model, energies);
            info!(
                "{}: all-nucleon flux available at {} of {} energies",
                row.short_name,
                row.n_valid(),
                energies.len()
            );
            row
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flux::{
        HgVariant, HillasGaisser2012, NucleonFluxTable, PowerLaw, TabulatedNucleonFlux,
    };
    use crate::interpolation::log_grid;

    #[test]
    fn test_survey_domains() {
        let energies = log_grid(1.0, 1e11, 12).unwrap();
        let hg = HillasGaisser2012::new(HgVariant::H3a);
        let table = NucleonFluxTable::tabulate(&hg, 5.0, 2e6, 51).unwrap();
        let models: Vec<Box<dyn FluxModel>> = vec![
            Box::new(PowerLaw::simple_e27()),
            Box::new(hg),
            Box::new(TabulatedNucleonFlux::new("H3a table", table)),
        ];
        let rows = survey(&models, &energies);
        assert_eq!(rows[0].short_name, "E-2.7");
        assert_eq!(rows[0].n_valid(), 12);
        assert_eq!(rows[0].neutron_fraction[3], Some(0.0));
        assert_eq!(rows[0].ln_a[3], Some(0.0));
        let gamma = rows[0].nucleon_gamma[3].unwrap();
        assert!((gamma + 2.7).abs() < 1e-9);
        // the derivative needs points on both sides
        assert!(rows[0].nucleon_gamma[0].is_none());

        // iron can not be evaluated above 1e11 GeV
        assert!(rows[1].nucleon_flux_e25[9].is_some());
        assert!(rows[1].nucleon_flux_e25[10].is_none());
        assert!(rows[1].particle_flux_e25[11].is_some());

        // the table only provides nucleon quantities inside of its bounds
        assert_eq!(rows[2].n_valid(), 6);
        assert!(rows[2].particle_flux_e25.iter().all(Option::is_none));
        assert!(rows[2].ln_a.iter().all(Option::is_none));
    }
}
