//! # Spectrum
//! Conversion between the all-particle and the all-nucleon flux conventions.
//!
//! A nucleus with mass number A and energy E is counted as A nucleons with energy
//! E / A each. The flux per nucleon energy therefore picks up a factor A for the
//! number of nucleons and another factor A from the Jacobian dE / dE_n.
//!
//! ```
//!     use crflux_core::prelude::*;
//!     use crflux_core::interpolation::log_grid;
//!
//!     let model = HillasGaisser2012::new(HgVariant::H3a);
//!     let energies = log_grid(10.0, 1e6, 81).unwrap();
//!     let particles = ParticleSpectrum::from_model(&model, &energies).unwrap();
//!     let nucleons = all_particle_to_all_nucleon(&particles).unwrap();
//!     let flux = nucleons.all_nucleon_flux(1e3).unwrap();
//!     let exact = model.tot_nucleon_flux(1e3).unwrap();
//!     assert!((flux / exact - 1.0).abs() < 1e-3);
//! ```
use itertools::Itertools;
use std::collections::BTreeMap;

use crate::errors::{CrfluxResult, Error};
use crate::flux::FluxModel;
use crate::interpolation::LogLogTable;
use crate::species::Nucleus;

/// Relative tolerance when reconstructing a common particle energy grid.
const GRID_RTOL: f64 = 1e-12;

/// Flux of several nuclei on a shared grid of particle energies.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleSpectrum {
    energies: Vec<f64>,
    fluxes: BTreeMap<Nucleus, Vec<f64>>,
}

impl ParticleSpectrum {
    /// Construct from a grid of particle energies in GeV and the flux of every nucleus
    /// on that grid.
    pub fn new(energies: Vec<f64>, fluxes: BTreeMap<Nucleus, Vec<f64>>) -> CrfluxResult<Self> {
        if let Some((id, _)) = fluxes.iter().find(|(_, f)| f.len() != energies.len()) {
            return Err(Error::ValueError(format!(
                "Flux of {} does not match the {} energies of the grid.",
                id,
                energies.len()
            )));
        }
        Ok(Self { energies, fluxes })
    }

    /// Evaluate every nucleus of a model on a grid of particle energies.
    pub fn from_model<M: FluxModel + ?Sized>(model: &M, energies: &[f64]) -> CrfluxResult<Self> {
        let fluxes = model
            .nucleus_ids()
            .iter()
            .map(|id| {
                let flux: CrfluxResult<Vec<f64>> = energies
                    .iter()
                    .map(|e| model.nucleus_flux(*id, *e))
                    .collect();
                Ok((*id, flux?))
            })
            .collect::<CrfluxResult<BTreeMap<_, _>>>()?;
        Self::new(energies.to_vec(), fluxes)
    }

    /// Particle energies in GeV.
    pub fn energies(&self) -> &[f64] {
        &self.energies
    }

    /// Flux of all nuclei.
    pub fn fluxes(&self) -> &BTreeMap<Nucleus, Vec<f64>> {
        &self.fluxes
    }

    /// Flux of a single nucleus, if present.
    pub fn flux(&self, nucleus: Nucleus) -> Option<&[f64]> {
        self.fluxes.get(&nucleus).map(Vec::as_slice)
    }

    /// All-particle flux, the sum over the nuclei at every energy.
    pub fn total(&self) -> Vec<f64> {
        (0..self.energies.len())
            .map(|idx| self.fluxes.values().map(|f| f[idx]).sum())
            .collect_vec()
    }
}

/// Per-nucleon flux of a single nucleus.
#[derive(Debug, Clone, PartialEq)]
pub struct NucleonComponent {
    energies: Vec<f64>,
    fluxes: Vec<f64>,
}

impl NucleonComponent {
    /// Energies per nucleon in GeV.
    pub fn energies(&self) -> &[f64] {
        &self.energies
    }

    /// Per-nucleon flux at every energy.
    pub fn fluxes(&self) -> &[f64] {
        &self.fluxes
    }
}

/// Per-nucleon flux of several nuclei, each on its own grid of nucleon energies.
#[derive(Debug, Clone, PartialEq)]
pub struct NucleonSpectrum {
    components: BTreeMap<Nucleus, NucleonComponent>,
}

impl NucleonSpectrum {
    /// Nucleon energies and per-nucleon flux of a single nucleus.
    pub fn component(&self, nucleus: Nucleus) -> Option<&NucleonComponent> {
        self.components.get(&nucleus)
    }

    /// All of the nuclei contained.
    pub fn nuclei(&self) -> impl Iterator<Item = &Nucleus> {
        self.components.keys()
    }

    /// All-nucleon flux at an energy per nucleon in GeV.
    ///
    /// Every component is interpolated in log-log space, so the energy has to lie
    /// inside of the grid of every nucleus and every grid needs at least 2 points.
    pub fn all_nucleon_flux(&self, energy: f64) -> CrfluxResult<f64> {
        if self.components.is_empty() {
            return Err(Error::ValueError("Nucleon spectrum is empty.".into()));
        }
        self.components
            .values()
            .map(|comp| {
                LogLogTable::new(comp.energies.clone(), comp.fluxes.clone())?
                    .interpolate(energy)
            })
            .sum()
    }
}

/// Convert an all-particle spectrum into per-nucleon spectra.
///
/// For every nucleus with mass number A, the nucleon energies are `E / A` and the
/// per-nucleon flux is `A^2 phi(E)`.
pub fn all_particle_to_all_nucleon(spectrum: &ParticleSpectrum) -> CrfluxResult<NucleonSpectrum> {
    let components = spectrum
        .fluxes
        .iter()
        .map(|(id, flux)| {
            let a = id.a() as f64;
            let component = NucleonComponent {
                energies: spectrum.energies.iter().map(|e| e / a).collect_vec(),
                fluxes: flux.iter().map(|f| a * a * f).collect_vec(),
            };
            (*id, component)
        })
        .collect();
    Ok(NucleonSpectrum { components })
}

/// Convert per-nucleon spectra back into an all-particle spectrum, the inverse of
/// [`all_particle_to_all_nucleon`].
///
/// All components must map back onto the same grid of particle energies.
pub fn all_nucleon_to_all_particle(spectrum: &NucleonSpectrum) -> CrfluxResult<ParticleSpectrum> {
    let mut energies: Option<Vec<f64>> = None;
    let mut fluxes = BTreeMap::new();
    for (id, comp) in &spectrum.components {
        let a = id.a() as f64;
        let particle_energies = comp.energies.iter().map(|e| e * a).collect_vec();
        let grid = energies.get_or_insert_with(|| particle_energies.clone());
        let matches = grid.len() == particle_energies.len()
            && grid
                .iter()
                .zip(&particle_energies)
                .all(|(x, y)| ((x - y) / x).abs() < GRID_RTOL);
        if !matches {
            return Err(Error::ValueError(format!(
                "Nucleon grid of {} does not map onto the common particle grid.",
                id
            )));
        }
        let _ = fluxes.insert(*id, comp.fluxes.iter().map(|f| f / (a * a)).collect_vec());
    }
    ParticleSpectrum::new(energies.unwrap_or_default(), fluxes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flux::{GaisserHonda, HgVariant, HillasGaisser2012};
    use crate::interpolation::log_grid;

    #[test]
    fn test_round_trip() {
        let model = GaisserHonda::new();
        let energies = log_grid(10.0, 1e5, 21).unwrap();
        let particles = ParticleSpectrum::from_model(&model, &energies).unwrap();
        let nucleons = all_particle_to_all_nucleon(&particles).unwrap();

        let iron = nucleons.component(Nucleus::IRON).unwrap();
        assert!((iron.energies()[0] - 10.0 / 54.0).abs() < 1e-12);
        let phi = model.nucleus_flux(Nucleus::IRON, 10.0).unwrap();
        assert!((iron.fluxes()[0] / (54.0 * 54.0 * phi) - 1.0).abs() < 1e-12);

        let back = all_nucleon_to_all_particle(&nucleons).unwrap();
        for (x, y) in back.energies().iter().zip(particles.energies()) {
            assert!((x / y - 1.0).abs() < 1e-12);
        }
        for id in model.nucleus_ids() {
            let orig = particles.flux(*id).unwrap();
            let conv = back.flux(*id).unwrap();
            for (x, y) in orig.iter().zip(conv) {
                assert!((x / y - 1.0).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_all_nucleon_flux_domain() {
        let model = HillasGaisser2012::new(HgVariant::H4a);
        let energies = log_grid(10.0, 1e6, 81).unwrap();
        let particles = ParticleSpectrum::from_model(&model, &energies).unwrap();
        let nucleons = all_particle_to_all_nucleon(&particles).unwrap();
        assert_eq!(nucleons.nuclei().count(), 5);

        // protons are only tabulated down to 10 GeV per nucleon
        assert!(matches!(
            nucleons.all_nucleon_flux(5.0),
            Err(Error::OutOfDomain { .. })
        ));
        // iron is only tabulated up to 1e6 / 54 GeV per nucleon
        assert!(nucleons.all_nucleon_flux(2e4).is_err());
        assert!(nucleons.all_nucleon_flux(1e4).is_ok());
    }

    #[test]
    fn test_total_and_mismatch() {
        let mut fluxes = BTreeMap::new();
        let _ = fluxes.insert(Nucleus::PROTON, vec![1.0, 2.0]);
        let _ = fluxes.insert(Nucleus::HELIUM, vec![0.5, 0.25]);
        let spectrum = ParticleSpectrum::new(vec![1.0, 2.0], fluxes.clone()).unwrap();
        assert_eq!(spectrum.total(), vec![1.5, 2.25]);

        let _ = fluxes.insert(Nucleus::IRON, vec![1.0]);
        assert!(ParticleSpectrum::new(vec![1.0, 2.0], fluxes).is_err());
    }

    #[test]
    fn test_short_grids() {
        let mut fluxes = BTreeMap::new();
        let _ = fluxes.insert(Nucleus::HELIUM, vec![2.0]);
        let single = ParticleSpectrum::new(vec![100.0], fluxes).unwrap();
        let nucleons = all_particle_to_all_nucleon(&single).unwrap();
        let helium = nucleons.component(Nucleus::HELIUM).unwrap();
        assert_eq!(helium.energies(), &[25.0]);
        assert_eq!(helium.fluxes(), &[32.0]);
        assert_eq!(all_nucleon_to_all_particle(&nucleons).unwrap(), single);
        // a single point can not be interpolated
        assert!(matches!(
            nucleons.all_nucleon_flux(25.0),
            Err(Error::ValueError(_))
        ));

        let mut fluxes = BTreeMap::new();
        let _ = fluxes.insert(Nucleus::PROTON, vec![]);
        let empty = ParticleSpectrum::new(vec![], fluxes).unwrap();
        let nucleons = all_particle_to_all_nucleon(&empty).unwrap();
        assert!(nucleons.component(Nucleus::PROTON).unwrap().energies().is_empty());
        assert_eq!(all_nucleon_to_all_particle(&nucleons).unwrap(), empty);
    }
}
