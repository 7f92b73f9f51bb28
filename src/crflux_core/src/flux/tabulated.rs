use chrono::NaiveDate;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::{EnergyRange, FluxModel};
use crate::cache::data_dir;
use crate::constants::FLUX_FLOOR;
use crate::errors::{CrfluxResult, Error};
use crate::interpolation::{log_grid, LogLogTable};
use crate::io::FileIO;
use crate::species::Nucleus;

/// Prefix of the names of tabulated nucleon flux files, followed by a `YYYYMMDD` date.
pub const TABLE_PREFIX: &str = "GSF_table_";

/// Extension of tabulated nucleon flux files.
pub const TABLE_EXTENSION: &str = "bin";

/// Proton and neutron flux tabulated against the energy per nucleon.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(try_from = "RawNucleonFluxTable")]
pub struct NucleonFluxTable {
    /// Proton flux, including bound protons.
    pub p_flux: LogLogTable,

    /// Neutron flux, including bound neutrons.
    pub n_flux: LogLogTable,
}

#[derive(Deserialize)]
struct RawNucleonFluxTable {
    p_flux: LogLogTable,
    n_flux: LogLogTable,
}

impl TryFrom<RawNucleonFluxTable> for NucleonFluxTable {
    type Error = Error;

    fn try_from(raw: RawNucleonFluxTable) -> CrfluxResult<Self> {
        Self::new(raw.p_flux, raw.n_flux)
    }
}

impl FileIO for NucleonFluxTable {}

impl NucleonFluxTable {
    /// Construct from matching proton and neutron tables.
    pub fn new(p_flux: LogLogTable, n_flux: LogLogTable) -> CrfluxResult<Self> {
        if p_flux.x() != n_flux.x() {
            return Err(Error::ValueError(
                "Proton and neutron tables must share the same energies.".into(),
            ));
        }
        Ok(Self { p_flux, n_flux })
    }

    /// Tabulate the proton and neutron flux of a model.
    ///
    /// Fluxes are floored at a tiny positive value so that interpolation stays in
    /// log-log space everywhere.
    ///
    /// # Arguments
    ///
    /// * `model` - Any model providing [`FluxModel::p_and_n_flux`] over the grid.
    /// * `e_min` - Lowest energy per nucleon in GeV.
    /// * `e_max` - Highest energy per nucleon in GeV.
    /// * `n_points` - Number of log spaced grid points.
    pub fn tabulate<M: FluxModel + ?Sized>(
        model: &M,
        e_min: f64,
        e_max: f64,
        n_points: usize,
    ) -> CrfluxResult<Self> {
        let energies = log_grid(e_min, e_max, n_points)?;
        let mut p_flux = Vec::with_capacity(n_points);
        let mut n_flux = Vec::with_capacity(n_points);
        for energy in &energies {
            let (_, p, n) = model.p_and_n_flux(*energy)?;
            p_flux.push(p.max(FLUX_FLOOR));
            n_flux.push(n.max(FLUX_FLOOR));
        }
        Self::new(
            LogLogTable::new(energies.clone(), p_flux)?,
            LogLogTable::new(energies, n_flux)?,
        )
    }

    /// Lowest and highest tabulated energy per nucleon.
    pub fn bounds(&self) -> (f64, f64) {
        self.p_flux.bounds()
    }
}

/// All-nucleon flux model backed by interpolated tables, such as the tabulated
/// version of the Global Spline Fit.
///
/// Dembinski et al., PoS ICRC2017 533.
///
/// Only the nucleon quantities are available, fluxes of individual nuclei are not.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TabulatedNucleonFlux {
    name: String,
    table: NucleonFluxTable,
}

impl FileIO for TabulatedNucleonFlux {}

impl TabulatedNucleonFlux {
    /// Construct from a table.
    pub fn new(name: &str, table: NucleonFluxTable) -> Self {
        Self {
            name: name.to_string(),
            table,
        }
    }

    /// Load a table written with [`FileIO::save`].
    pub fn from_file<P: AsRef<Path>>(path: P) -> CrfluxResult<Self> {
        let table = NucleonFluxTable::load(path.as_ref())?;
        debug!("Loaded nucleon flux table {:?}", path.as_ref());
        Ok(Self::new("Global Spline Fit", table))
    }

    /// Load the most recent `GSF_table_YYYYMMDD.bin` table inside of a directory.
    pub fn from_dir<P: AsRef<Path>>(dir: P) -> CrfluxResult<Self> {
        Self::from_file(latest_table(dir.as_ref())?)
    }

    /// Load the most recent table inside of the data directory, see
    /// [`crate::cache::data_dir`].
    pub fn from_data_dir() -> CrfluxResult<Self> {
        Self::from_dir(data_dir()?)
    }

    /// The underlying table.
    pub fn table(&self) -> &NucleonFluxTable {
        &self.table
    }
}

/// Find the table file with the latest date tag in a directory.
fn latest_table(dir: &Path) -> CrfluxResult<PathBuf> {
    let mut latest: Option<(NaiveDate, PathBuf)> = None;
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        let Some(tag) = path
            .file_name()
            .and_then(|name| name.to_str())
            .and_then(|name| name.strip_prefix(TABLE_PREFIX))
            .and_then(|name| name.strip_suffix(TABLE_EXTENSION))
            .and_then(|name| name.strip_suffix('.'))
        else {
            continue;
        };
        let date = match NaiveDate::parse_from_str(tag, "%Y%m%d") {
            Ok(date) => date,
            Err(err) => {
                warn!("Skipping table file with invalid date {:?}: {}", path, err);
                continue;
            }
        };
        if latest.as_ref().is_none_or(|(best, _)| date >= *best) {
            latest = Some((date, path));
        }
    }
    latest.map(|(_, path)| path).ok_or(Error::IOError(format!(
        "No {}YYYYMMDD.{} files found in {:?}",
        TABLE_PREFIX, TABLE_EXTENSION, dir
    )))
}

impl FluxModel for TabulatedNucleonFlux {
    fn name(&self) -> &str {
        &self.name
    }

    fn short_name(&self) -> &str {
        "GSF"
    }

    fn nucleus_ids(&self) -> &[Nucleus] {
        &[]
    }

    fn valid_range(&self, _nucleus: Nucleus) -> EnergyRange {
        let (min, max) = self.table.bounds();
        EnergyRange { min, max }
    }

    fn flux_unchecked(&self, _nucleus: Nucleus, _energy: f64) -> f64 {
        0.0
    }

    fn tot_nucleon_flux(&self, energy: f64) -> CrfluxResult<f64> {
        let (_, p_flux, n_flux) = self.p_and_n_flux(energy)?;
        Ok(p_flux + n_flux)
    }

    fn p_and_n_flux(&self, energy: f64) -> CrfluxResult<(f64, f64, f64)> {
        let p_flux = self.table.p_flux.interpolate(energy)?;
        let n_flux = self.table.n_flux.interpolate(energy)?;
        Ok((p_flux / (p_flux + n_flux), p_flux, n_flux))
    }
}
