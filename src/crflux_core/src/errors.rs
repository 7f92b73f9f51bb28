//! # Errors
//! Errors emitted by crflux_core

/// Define all errors which may be raised by this crate.
use chrono::ParseError;
use std::{error, fmt, io};

use crate::species::Nucleus;

/// crflux specific result.
pub type CrfluxResult<T> = Result<T, Error>;

/// Possible Errors which may be raised by this crate.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// The model has no parameters for this nucleus, nor for a nucleus of similar mass.
    UnsupportedSpecies(Nucleus),

    /// An input exceeded the domain in which the model has been validated.
    OutOfDomain {
        /// Name of the offending quantity, such as `energy` or `zenith angle`.
        quantity: &'static str,

        /// Value which was provided.
        value: f64,

        /// Lower bound of the validated domain.
        min: f64,

        /// Upper bound of the validated domain.
        max: f64,
    },

    /// Model selection by name failed.
    UnknownModel(String),

    /// Numerical method did not converge within the algorithms limits.
    Convergence(String),

    /// Input or variable exceeded expected or allowed bounds.
    ValueError(String),

    /// Error related to IO.
    IOError(String),
}

impl error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::UnsupportedSpecies(nucleus) => {
                write!(
                    f,
                    "Nucleus {} (Z={}, A={}) is not supported by this model.",
                    nucleus.id(),
                    nucleus.z(),
                    nucleus.a()
                )
            }
            Error::OutOfDomain {
                quantity,
                value,
                min,
                max,
            } => {
                write!(
                    f,
                    "The {} {:e} is outside of the validated domain [{:e}, {:e}].",
                    quantity, value, min, max
                )
            }
            Error::UnknownModel(s) => {
                write!(f, "Unknown model selection '{}'.", s)
            }
            Error::Convergence(s) => {
                write!(f, "{}", s)
            }
            Error::ValueError(s) => {
                write!(f, "{}", s)
            }
            Error::IOError(s) => {
                write!(f, "{}", s)
            }
        }
    }
}

impl From<io::Error> for Error {
    fn from(error: io::Error) -> Self {
        Error::IOError(error.to_string())
    }
}

impl From<std::num::ParseIntError> for Error {
    fn from(value: std::num::ParseIntError) -> Self {
        Error::IOError(value.to_string())
    }
}

impl From<std::num::ParseFloatError> for Error {
    fn from(value: std::num::ParseFloatError) -> Self {
        Error::IOError(value.to_string())
    }
}

impl From<ParseError> for Error {
    fn from(value: ParseError) -> Self {
        Error::IOError(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_species() {
        let msg = Error::UnsupportedSpecies(Nucleus::new(5426)).to_string();
        assert!(msg.contains("5426"));
        assert!(msg.contains("Z=26"));
        assert!(msg.contains("A=54"));
    }

    #[test]
    fn test_display_domain() {
        let err = Error::OutOfDomain {
            quantity: "energy",
            value: 0.5,
            min: 1.0,
            max: 1e11,
        };
        assert!(err.to_string().starts_with("The energy"));
    }
}
