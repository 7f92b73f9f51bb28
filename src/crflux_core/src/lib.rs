//! # crflux Core
//! Models of the high-energy primary cosmic ray flux at the top of the atmosphere.
//!
//! These are the input layer of atmospheric lepton flux calculations. Each model maps
//! a nucleus and its laboratory energy in GeV onto a differential flux in
//! (m^2 s sr GeV)^-1, and provides the derived all-particle and all-nucleon fluxes.
//!
//! ```
//!     use crflux_core::prelude::*;
//!
//!     let model = HillasGaisser2012::new(HgVariant::H3a);
//!     let p = model.nucleus_flux(Nucleus::PROTON, 1e3).unwrap();
//!     let fe = model.nucleus_flux("Fe".parse().unwrap(), 1e3).unwrap();
//!     assert!(p > fe);
//!
//!     // outside of the validated range nothing is extrapolated
//!     assert!(model.nucleus_flux(Nucleus::PROTON, 1e12).is_err());
//! ```
//!

#![deny(
    bad_style,
    dead_code,
    improper_ctypes,
    non_shorthand_field_patterns,
    no_mangle_generic_items,
    overflowing_literals,
    path_statements,
    patterns_in_fns_without_body,
    unconditional_recursion,
    unused,
    while_true,
    missing_debug_implementations,
    missing_docs,
    trivial_casts,
    trivial_numeric_casts,
    unused_extern_crates,
    unused_import_braces,
    unused_qualifications,
    unused_results
)]

pub mod cache;
pub mod constants;
pub mod errors;
pub mod fitting;
pub mod flux;
pub mod interpolation;
pub mod io;
pub mod species;
pub mod spectrum;
pub mod survey;

/// Common useful imports
pub mod prelude {
    pub use crate::errors::{CrfluxResult, Error};
    pub use crate::flux::{
        standard_models, BenzviMontaruli, CombinedGHandHG, EnergyRange, Extrapolate,
        FluxModel, GaisserHonda, GaisserStanevTilav, GstVariant, HgVariant,
        HillasGaisser2012, ModelKind, NucleonFluxTable, PolyGonato, PowerLaw,
        TabulatedNucleonFlux, Thunman, ZatsepinSokolskaya, ZsVariant,
    };
    pub use crate::io::FileIO;
    pub use crate::species::Nucleus;
    pub use crate::spectrum::{
        all_nucleon_to_all_particle, all_particle_to_all_nucleon, NucleonComponent,
        NucleonSpectrum, ParticleSpectrum,
    };
}
