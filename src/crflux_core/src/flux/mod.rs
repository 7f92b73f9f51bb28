//! # Flux
//! Models of the primary cosmic ray flux at the top of the atmosphere.
//!
//! Every model implements [`FluxModel`], which evaluates the differential flux of a
//! single nucleus in (m^2 s sr GeV)^-1 at a laboratory energy in GeV, and derives
//! from that the all-particle flux, the all-nucleon flux, the proton/neutron split and
//! the mean logarithmic mass.
//!
//! There are a few families of models contained here:
//! [`PowerLaw`] and [`Thunman`] - Single and broken power laws for protons.
//! [`BenzviMontaruli`] - Broken power laws per mass group.
//! [`PolyGonato`] - Power laws with a rigidity dependent smooth knee.
//! [`HillasGaisser2012`], [`GaisserStanevTilav`] - Sums of populations with exponential
//! rigidity cutoffs.
//! [`GaisserHonda`] - Low energy fit to balloon data.
//! [`CombinedGHandHG`] - Gaisser-Honda joined to Hillas-Gaisser.
//! [`ZatsepinSokolskaya`] - Three classes of galactic sources in rigidity.
//! [`TabulatedNucleonFlux`] - Interpolated tables of the nucleon flux.
//!
//! Energies outside of the range in which a model has been validated are reported as
//! [`Error::OutOfDomain`]. The raw formulas may be extrapolated by explicitly wrapping
//! a model in [`Extrapolate`].
mod catalog;
mod combined;
mod gaisser_honda;
mod peters_cycle;
mod polygonato;
mod power_law;
mod tabulated;
mod zatsepin;

pub use catalog::*;
pub use combined::*;
pub use gaisser_honda::*;
pub use peters_cycle::*;
pub use polygonato::*;
pub use power_law::*;
pub use tabulated::*;
pub use zatsepin::*;

use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_2;
use std::fmt::Debug;

use crate::constants::{E_MAX_DEFAULT, E_MIN_DEFAULT, MAX_DELTA_A};
use crate::errors::{CrfluxResult, Error};
use crate::species::Nucleus;

/// Closed interval of laboratory energies in GeV.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct EnergyRange {
    /// Lowest validated energy.
    pub min: f64,

    /// Highest validated energy.
    pub max: f64,
}

impl EnergyRange {
    /// Construct a new range, requires `0 <= min < max`.
    pub fn new(min: f64, max: f64) -> CrfluxResult<Self> {
        if !(min >= 0.0 && max > min) {
            return Err(Error::ValueError(format!(
                "Invalid energy range [{}, {}].",
                min, max
            )));
        }
        Ok(Self { min, max })
    }

    /// Range shared by most of the models, 1 GeV to 1e11 GeV.
    pub const fn standard() -> Self {
        Self {
            min: E_MIN_DEFAULT,
            max: E_MAX_DEFAULT,
        }
    }

    /// All positive energies.
    pub const fn unbounded() -> Self {
        Self {
            min: 0.0,
            max: f64::INFINITY,
        }
    }

    /// Is the energy inside of the range, edges included.
    pub fn contains(&self, energy: f64) -> bool {
        energy >= self.min && energy <= self.max
    }

    /// Return an [`Error::OutOfDomain`] if the energy is not strictly positive, or not
    /// inside of the range.
    pub fn check(&self, energy: f64) -> CrfluxResult<f64> {
        if energy > 0.0 && energy.is_finite() && self.contains(energy) {
            return Ok(energy);
        }
        Err(Error::OutOfDomain {
            quantity: "energy",
            value: energy,
            min: self.min,
            max: self.max,
        })
    }
}

/// A model of the primary cosmic ray flux.
///
/// Implementers provide the raw formula through [`FluxModel::flux_unchecked`] together
/// with the list of modelled nuclei and the validated energy range. All of the public
/// quantities are provided methods which validate their inputs first.
pub trait FluxModel: Debug + Send + Sync {
    /// Full name of the model.
    fn name(&self) -> &str;

    /// Short name, typically used as a label or citation key.
    fn short_name(&self) -> &str;

    /// Nuclei or mass groups for which the model has parameters.
    fn nucleus_ids(&self) -> &[Nucleus];

    /// Validated range of laboratory energies of the nucleus in GeV.
    fn valid_range(&self, nucleus: Nucleus) -> EnergyRange;

    /// Evaluate the formula for a nucleus contained in [`FluxModel::nucleus_ids`],
    /// without any validation of the inputs.
    fn flux_unchecked(&self, nucleus: Nucleus, energy: f64) -> f64;

    /// Find the modelled nucleus which stands in for the requested one.
    ///
    /// If the nucleus is not modelled, the modelled nucleus with the closest id is used
    /// as long as the mass numbers differ by no more than 3.
    fn resolve_species(&self, nucleus: Nucleus) -> CrfluxResult<Nucleus> {
        let ids = self.nucleus_ids();
        if ids.contains(&nucleus) {
            return Ok(nucleus);
        }
        let closest = ids
            .iter()
            .min_by_key(|id| (id.id() as i64 - nucleus.id() as i64).abs())
            .ok_or(Error::UnsupportedSpecies(nucleus))?;
        if closest.a().abs_diff(nucleus.a()) > MAX_DELTA_A {
            return Err(Error::UnsupportedSpecies(nucleus));
        }
        Ok(*closest)
    }

    /// Flux of a single nucleus in (m^2 s sr GeV)^-1.
    ///
    /// # Arguments
    ///
    /// * `nucleus` - Requested nucleus, see [`FluxModel::resolve_species`].
    /// * `energy` - Laboratory energy of the nucleus in GeV.
    fn nucleus_flux(&self, nucleus: Nucleus, energy: f64) -> CrfluxResult<f64> {
        let resolved = self.resolve_species(nucleus)?;
        let energy = self.valid_range(resolved).check(energy)?;
        Ok(self.flux_unchecked(resolved, energy))
    }

    /// Flux of a single nucleus arriving under a zenith angle in radians.
    ///
    /// The primary flux at the top of the atmosphere is isotropic, the angle is
    /// validated to be between 0 and pi/2.
    fn nucleus_flux_at_zenith(
        &self,
        nucleus: Nucleus,
        energy: f64,
        zenith: f64,
    ) -> CrfluxResult<f64> {
        if !(0.0..=FRAC_PI_2).contains(&zenith) {
            return Err(Error::OutOfDomain {
                quantity: "zenith angle",
                value: zenith,
                min: 0.0,
                max: FRAC_PI_2,
            });
        }
        self.nucleus_flux(nucleus, energy)
    }

    /// Total flux of nuclei, the all-particle flux.
    ///
    /// # Arguments
    ///
    /// * `energy` - Laboratory energy of the particles in GeV.
    fn total_flux(&self, energy: f64) -> CrfluxResult<f64> {
        require_nucleus_data(self)?;
        self.nucleus_ids()
            .iter()
            .map(|id| self.nucleus_flux(*id, energy))
            .sum()
    }

    /// Total flux of nucleons, the all-nucleon flux.
    ///
    /// # Arguments
    ///
    /// * `energy` - Laboratory energy per nucleon in GeV.
    fn tot_nucleon_flux(&self, energy: f64) -> CrfluxResult<f64> {
        sum_nucleon_flux(self, energy)
    }

    /// Proton fraction, proton flux and neutron flux, counting the bound nucleons of
    /// every nucleus.
    ///
    /// # Arguments
    ///
    /// * `energy` - Laboratory energy per nucleon in GeV.
    fn p_and_n_flux(&self, energy: f64) -> CrfluxResult<(f64, f64, f64)> {
        sum_p_and_n_flux(self, energy)
    }

    /// Proton excess, `(p - n) / (p + n)`.
    ///
    /// Protons and neutrons are counted from the bound nucleons of every nucleus, so
    /// isoscalar nuclei only enter the denominator. The result therefore differs from
    /// the charge squared weighting of nuclei used in some older tabulations.
    fn delta_0(&self, energy: f64) -> CrfluxResult<f64> {
        let (_, p_flux, n_flux) = self.p_and_n_flux(energy)?;
        Ok((p_flux - n_flux) / (p_flux + n_flux))
    }

    /// Differential spectral index of the all-nucleon flux from a centered numerical
    /// derivative in log10.
    ///
    /// # Arguments
    ///
    /// * `energy` - Laboratory energy per nucleon in GeV.
    /// * `rel_delta` - Half width of the derivative relative to the energy.
    fn nucleon_gamma(&self, energy: f64, rel_delta: f64) -> CrfluxResult<f64> {
        log_slope(|e| self.tot_nucleon_flux(e), energy, rel_delta)
    }

    /// Differential spectral index of a single nucleus from a centered numerical
    /// derivative in log10.
    fn nucleus_gamma(&self, energy: f64, nucleus: Nucleus, rel_delta: f64) -> CrfluxResult<f64> {
        log_slope(|e| self.nucleus_flux(nucleus, e), energy, rel_delta)
    }

    /// Mean natural logarithm of the mass number, `<ln A>`.
    ///
    /// # Arguments
    ///
    /// * `energy` - Laboratory energy of the particles in GeV.
    fn ln_a(&self, energy: f64) -> CrfluxResult<f64> {
        require_nucleus_data(self)?;
        let mut weighted = 0.0;
        for id in self.nucleus_ids() {
            if *id == Nucleus::PROTON {
                continue;
            }
            weighted += (id.a() as f64).ln() * self.nucleus_flux(*id, energy)?;
        }
        let total = self.total_flux(energy)?;
        if total <= 0.0 {
            return Err(Error::ValueError(format!(
                "Model {} has no particle flux at {} GeV.",
                self.name(),
                energy
            )));
        }
        Ok(weighted / total)
    }
}

fn require_nucleus_data<M: FluxModel + ?Sized>(model: &M) -> CrfluxResult<()> {
    if model.nucleus_ids().is_empty() {
        return Err(Error::ValueError(format!(
            "Model {} does not provide fluxes of individual nuclei.",
            model.name()
        )));
    }
    Ok(())
}

/// All-nucleon flux summed over the nuclei of a model, `sum A^2 phi(A E)`.
fn sum_nucleon_flux<M: FluxModel + ?Sized>(model: &M, energy: f64) -> CrfluxResult<f64> {
    require_nucleus_data(model)?;
    model
        .nucleus_ids()
        .iter()
        .map(|id| {
            let a = id.a() as f64;
            Ok(a * a * model.nucleus_flux(*id, energy * a)?)
        })
        .sum()
}

fn sum_p_and_n_flux<M: FluxModel + ?Sized>(
    model: &M,
    energy: f64,
) -> CrfluxResult<(f64, f64, f64)> {
    require_nucleus_data(model)?;
    let mut p_flux = 0.0;
    let mut n_flux = 0.0;
    for id in model.nucleus_ids() {
        let (z, a) = id.z_a();
        let flux = a * model.nucleus_flux(*id, energy * a)?;
        p_flux += z * flux;
        n_flux += (a - z) * flux;
    }
    if p_flux + n_flux <= 0.0 {
        return Err(Error::ValueError(format!(
            "Model {} has no nucleon flux at {} GeV.",
            model.name(),
            energy
        )));
    }
    Ok((p_flux / (p_flux + n_flux), p_flux, n_flux))
}

fn log_slope<F>(flux: F, energy: f64, rel_delta: f64) -> CrfluxResult<f64>
where
    F: Fn(f64) -> CrfluxResult<f64>,
{
    if !(rel_delta > 0.0 && rel_delta < 1.0) {
        return Err(Error::ValueError(format!(
            "Relative derivative step must be in (0, 1), got {}.",
            rel_delta
        )));
    }
    let delta = rel_delta * energy;
    let upper = flux(energy + delta)?;
    let lower = flux(energy - delta)?;
    Ok((upper / lower).log10() / ((energy + delta) / (energy - delta)).log10())
}

/// Opt-in extrapolation of a model beyond its validated energy range.
///
/// The wrapped model is evaluated for every positive energy. Species validation is
/// unchanged. Tabulated models have nothing to extrapolate and keep their table
/// bounds.
///
/// ```
///     use crflux_core::prelude::*;
///     let model = GaisserHonda::new();
///     assert!(model.nucleus_flux(Nucleus::PROTON, 1e7).is_err());
///     let model = Extrapolate(model);
///     assert!(model.nucleus_flux(Nucleus::PROTON, 1e7).is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct Extrapolate<M: FluxModel>(pub M);

impl<M: FluxModel> FluxModel for Extrapolate<M> {
    fn name(&self) -> &str {
        self.0.name()
    }

    fn short_name(&self) -> &str {
        self.0.short_name()
    }

    fn nucleus_ids(&self) -> &[Nucleus] {
        self.0.nucleus_ids()
    }

    fn valid_range(&self, _nucleus: Nucleus) -> EnergyRange {
        EnergyRange::unbounded()
    }

    fn flux_unchecked(&self, nucleus: Nucleus, energy: f64) -> f64 {
        self.0.flux_unchecked(nucleus, energy)
    }

    fn resolve_species(&self, nucleus: Nucleus) -> CrfluxResult<Nucleus> {
        self.0.resolve_species(nucleus)
    }

    fn tot_nucleon_flux(&self, energy: f64) -> CrfluxResult<f64> {
        if self.0.nucleus_ids().is_empty() {
            return self.0.tot_nucleon_flux(energy);
        }
        sum_nucleon_flux(self, energy)
    }

    fn p_and_n_flux(&self, energy: f64) -> CrfluxResult<(f64, f64, f64)> {
        if self.0.nucleus_ids().is_empty() {
            return self.0.p_and_n_flux(energy);
        }
        sum_p_and_n_flux(self, energy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_energy_range() {
        let range = EnergyRange::new(1.0, 10.0).unwrap();
        assert!(range.check(1.0).is_ok());
        assert!(range.check(10.0).is_ok());
        assert!(range.check(0.999).is_err());
        assert!(range.check(10.001).is_err());
        assert!(range.check(f64::NAN).is_err());
        assert!(EnergyRange::new(2.0, 1.0).is_err());
        assert!(EnergyRange::new(f64::NAN, 1.0).is_err());

        let unbounded = EnergyRange::unbounded();
        assert!(unbounded.check(1e-20).is_ok());
        assert!(unbounded.check(0.0).is_err());
        assert!(unbounded.check(-1.0).is_err());
        assert!(unbounded.check(f64::INFINITY).is_err());
    }

    #[test]
    fn test_resolve_species() {
        let model = HillasGaisser2012::new(HgVariant::H3a);
        assert_eq!(
            model.resolve_species(Nucleus::HELIUM).unwrap(),
            Nucleus::HELIUM
        );
        // nitrogen is represented by the CNO group
        assert_eq!(
            model.resolve_species(Nucleus::NITROGEN).unwrap(),
            Nucleus::CARBON
        );
        // oxygen differs by 4 nucleons from the carbon group
        assert!(model.resolve_species(Nucleus::OXYGEN).is_err());
        // mercury is too far away from iron
        assert_eq!(
            model.resolve_species(Nucleus::MERCURY),
            Err(Error::UnsupportedSpecies(Nucleus::MERCURY))
        );
    }

    #[test]
    fn test_zenith() {
        let model = GaisserHonda::new();
        let vertical = model.nucleus_flux(Nucleus::PROTON, 100.0).unwrap();
        let inclined = model
            .nucleus_flux_at_zenith(Nucleus::PROTON, 100.0, 1.0)
            .unwrap();
        assert_eq!(vertical, inclined);
        assert!(model
            .nucleus_flux_at_zenith(Nucleus::PROTON, 100.0, 2.0)
            .is_err());
        assert!(model
            .nucleus_flux_at_zenith(Nucleus::PROTON, 100.0, -0.1)
            .is_err());
    }

    #[test]
    fn test_nucleon_sums() {
        let model = HillasGaisser2012::new(HgVariant::H4a);
        let energy = 1e3;
        let (p_frac, p_flux, n_flux) = model.p_and_n_flux(energy).unwrap();
        let total = model.tot_nucleon_flux(energy).unwrap();
        assert!(((p_flux + n_flux) / total - 1.0).abs() < 1e-12);
        assert!(p_frac > 0.5 && p_frac < 1.0);
        let delta = model.delta_0(energy).unwrap();
        assert!((delta - (2.0 * p_frac - 1.0)).abs() < 1e-12);
    }

    #[test]
    fn test_delta_0_bound_nucleons() {
        let helium = PowerLaw::new(
            "helium",
            Nucleus::HELIUM,
            1.0,
            -2.7,
            1.0,
            EnergyRange::standard(),
        )
        .unwrap();
        assert_eq!(helium.delta_0(10.0).unwrap(), 0.0);
        assert_eq!(PowerLaw::simple_e27().delta_0(10.0).unwrap(), 1.0);
    }

    #[test]
    fn test_gamma() {
        let model = PowerLaw::simple_e27();
        let gamma = model.nucleus_gamma(1e3, Nucleus::PROTON, 0.01).unwrap();
        assert!((gamma + 2.7).abs() < 1e-9);
        let gamma = model.nucleon_gamma(1e3, 0.01).unwrap();
        assert!((gamma + 2.7).abs() < 1e-9);
        assert!(model.nucleon_gamma(1e3, 0.0).is_err());
        // the lower sample point falls below the range
        assert!(model.nucleon_gamma(1.0, 0.01).is_err());
    }

    #[test]
    fn test_ln_a() {
        let model = PowerLaw::simple_e27();
        assert_eq!(model.ln_a(10.0).unwrap(), 0.0);

        let model = HillasGaisser2012::new(HgVariant::H3a);
        let low = model.ln_a(1e3).unwrap();
        let knee = model.ln_a(1e7).unwrap();
        assert!(low > 0.0);
        // composition gets heavier through the knee
        assert!(knee > low);
        assert!(knee < 54f64.ln());

        let empty = PowerLaw::new(
            "empty",
            Nucleus::HELIUM,
            0.0,
            -2.7,
            1.0,
            EnergyRange::standard(),
        )
        .unwrap();
        assert!(matches!(empty.ln_a(10.0), Err(Error::ValueError(_))));
        assert!(matches!(empty.p_and_n_flux(10.0), Err(Error::ValueError(_))));
    }
}
