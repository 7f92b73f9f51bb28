//! # Interpolation
//! Piecewise linear interpolation on tabulated spectra in log-log space.
//!
//! Fluxes of cosmic rays span many orders of magnitude and are close to power laws,
//! so interpolating the logarithm of the flux against the logarithm of the energy is
//! nearly exact between grid points. Outside of the tabulated grid nothing is
//! extrapolated, see [`LogLogTable::interpolate`].
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::errors::{CrfluxResult, Error};

/// Generate `n_points` energies spaced evenly in log10 between `min` and `max`,
/// inclusive.
///
/// ```
///     use crflux_core::interpolation::log_grid;
///     let grid = log_grid(1.0, 100.0, 3).unwrap();
///     assert!((grid[1] - 10.0).abs() < 1e-12);
/// ```
pub fn log_grid(min: f64, max: f64, n_points: usize) -> CrfluxResult<Vec<f64>> {
    if !(min > 0.0 && max > min && min.is_finite() && max.is_finite()) {
        return Err(Error::ValueError(format!(
            "Log grid requires 0 < min < max, got [{}, {}].",
            min, max
        )));
    }
    if n_points < 2 {
        return Err(Error::ValueError(
            "Log grid requires at least 2 points.".into(),
        ));
    }
    let (lmin, lmax) = (min.log10(), max.log10());
    let step = (lmax - lmin) / (n_points - 1) as f64;
    let mut grid = (0..n_points)
        .map(|idx| 10f64.powf(lmin + step * idx as f64))
        .collect_vec();
    // pin the end points so that range checks at the edges are exact.
    grid[0] = min;
    grid[n_points - 1] = max;
    Ok(grid)
}

/// Table of `y(x)` values, interpolated linearly in `ln x` and `ln y`.
///
/// Where either neighbouring value is not strictly positive the interpolation falls
/// back to linear in `y`, which keeps zero flux components (such as switched off
/// populations) exactly zero.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(try_from = "RawTable")]
pub struct LogLogTable {
    x: Vec<f64>,
    y: Vec<f64>,
}

/// Unchecked table contents as stored on disk.
#[derive(Deserialize)]
struct RawTable {
    x: Vec<f64>,
    y: Vec<f64>,
}

impl TryFrom<RawTable> for LogLogTable {
    type Error = Error;

    fn try_from(raw: RawTable) -> CrfluxResult<Self> {
        Self::new(raw.x, raw.y)
    }
}

impl LogLogTable {
    /// Construct a new table, `x` must be strictly increasing and positive.
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> CrfluxResult<Self> {
        if x.len() != y.len() {
            return Err(Error::ValueError(format!(
                "Table abscissa and values differ in length ({} vs {}).",
                x.len(),
                y.len()
            )));
        }
        if x.len() < 2 {
            return Err(Error::ValueError(
                "Table requires at least 2 points.".into(),
            ));
        }
        if x[0] <= 0.0 || !x.iter().tuple_windows().all(|(a, b)| a < b) {
            return Err(Error::ValueError(
                "Table abscissa must be positive and strictly increasing.".into(),
            ));
        }
        if y.iter().any(|v| !v.is_finite()) {
            return Err(Error::ValueError("Table values must be finite.".into()));
        }
        Ok(Self { x, y })
    }

    /// Tabulated abscissa.
    pub fn x(&self) -> &[f64] {
        &self.x
    }

    /// Tabulated values.
    pub fn y(&self) -> &[f64] {
        &self.y
    }

    /// First and last abscissa.
    pub fn bounds(&self) -> (f64, f64) {
        (self.x[0], self.x[self.x.len() - 1])
    }

    /// Interpolate the table at `x`.
    ///
    /// Values outside of the tabulated range are an [`Error::OutOfDomain`].
    ///
    /// ```
    ///     use crflux_core::interpolation::LogLogTable;
    ///     let table = LogLogTable::new(vec![1.0, 100.0], vec![1.0, 1e-4]).unwrap();
    ///     let val = table.interpolate(10.0).unwrap();
    ///     assert!((val - 1e-2).abs() < 1e-14);
    ///     assert!(table.interpolate(101.0).is_err());
    /// ```
    pub fn interpolate(&self, x: f64) -> CrfluxResult<f64> {
        let (min, max) = self.bounds();
        if !(x >= min && x <= max) {
            return Err(Error::OutOfDomain {
                quantity: "energy",
                value: x,
                min,
                max,
            });
        }
        // index of the first point strictly above x, clamped into the last interval.
        let upper = self.x.partition_point(|v| *v <= x).clamp(1, self.x.len() - 1);
        let lower = upper - 1;
        let (x0, x1) = (self.x[lower], self.x[upper]);
        let (y0, y1) = (self.y[lower], self.y[upper]);

        if y0 > 0.0 && y1 > 0.0 {
            let frac = (x / x0).ln() / (x1 / x0).ln();
            Ok((y0.ln() + frac * (y1 / y0).ln()).exp())
        } else {
            let frac = (x - x0) / (x1 - x0);
            Ok(y0 + frac * (y1 - y0))
        }
    }
}
