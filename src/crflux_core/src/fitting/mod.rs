//! # Fitting
//! Root finding used to join flux models at their crossing energies.
mod newton;

pub use newton::{newton_raphson, newton_raphson_numeric};
