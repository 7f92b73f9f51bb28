//! # Species
//! Identification of cosmic ray nuclei.
//!
//! The numbering scheme is adapted from the air-shower Monte Carlo CORSIKA. Protons
//! have the ID 14. The composite ID of any other nucleus is `100 * A + Z`, where `A`
//! is the mass number and `Z` the charge, so that charge and mass are recovered from
//! the ID without a lookup table.
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::errors::{CrfluxResult, Error};

/// A cosmic ray nucleus, or a mass group represented by its leading nucleus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
pub struct Nucleus(u32);

impl Nucleus {
    /// Proton, CORSIKA id 14.
    pub const PROTON: Nucleus = Nucleus(14);

    /// Helium-4.
    pub const HELIUM: Nucleus = Nucleus(402);

    /// Carbon-12, leading nucleus of the CNO group.
    pub const CARBON: Nucleus = Nucleus(1206);

    /// Nitrogen-14.
    pub const NITROGEN: Nucleus = Nucleus(1407);

    /// Oxygen-16.
    pub const OXYGEN: Nucleus = Nucleus(1608);

    /// Magnesium-24.
    pub const MAGNESIUM: Nucleus = Nucleus(2412);

    /// Aluminium-26.
    pub const ALUMINIUM: Nucleus = Nucleus(2613);

    /// Silicon-28, leading nucleus of the Mg-Al-Si group.
    pub const SILICON: Nucleus = Nucleus(2814);

    /// Manganese-50.
    pub const MANGANESE: Nucleus = Nucleus(5025);

    /// Iron-54, leading nucleus of the iron group.
    pub const IRON: Nucleus = Nucleus(5426);

    /// Cobalt-54.
    pub const COBALT: Nucleus = Nucleus(5427);

    /// Tellurium-like heavy group, A = 128.
    pub const TELLURIUM: Nucleus = Nucleus(12852);

    /// Mercury-like heavy group, A = 201.
    pub const MERCURY: Nucleus = Nucleus(20180);

    /// Wrap a raw CORSIKA id.
    pub const fn new(corsika_id: u32) -> Self {
        Nucleus(corsika_id)
    }

    /// Construct from charge and mass number.
    ///
    /// ```
    ///     use crflux_core::species::Nucleus;
    ///     assert_eq!(Nucleus::from_za(1, 1), Nucleus::PROTON);
    ///     assert_eq!(Nucleus::from_za(26, 54).id(), 5426);
    /// ```
    pub fn from_za(z: u32, a: u32) -> Self {
        if z == 1 && a == 1 {
            return Self::PROTON;
        }
        Nucleus(100 * a + z)
    }

    /// The CORSIKA id.
    pub fn id(&self) -> u32 {
        self.0
    }

    /// Charge number Z.
    pub fn z(&self) -> u32 {
        if self.0 > 14 {
            self.0 % 100
        } else {
            1
        }
    }

    /// Mass number A.
    pub fn a(&self) -> u32 {
        if self.0 > 14 {
            self.0 / 100
        } else {
            1
        }
    }

    /// Charge and mass number as floats, which is how the flux formulas consume them.
    pub fn z_a(&self) -> (f64, f64) {
        (self.z() as f64, self.a() as f64)
    }

    /// Chemical symbol of the element if it is one of the commonly modelled ones.
    pub fn symbol(&self) -> Option<&'static str> {
        SYMBOLS
            .iter()
            .find(|(_, z)| *z == self.z())
            .map(|(sym, _)| *sym)
    }
}

impl fmt::Display for Nucleus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.symbol() {
            Some(sym) if *self != Nucleus::PROTON => write!(f, "{}-{}", sym, self.a()),
            Some(_) => write!(f, "p"),
            None => write!(f, "{}", self.0),
        }
    }
}

const SYMBOLS: &[(&str, u32)] = &[
    ("H", 1),
    ("He", 2),
    ("C", 6),
    ("N", 7),
    ("O", 8),
    ("Mg", 12),
    ("Al", 13),
    ("Si", 14),
    ("Mn", 25),
    ("Fe", 26),
    ("Co", 27),
    ("Te", 52),
    ("Hg", 80),
];

lazy_static! {
    /// Lower case element symbols mapped to the nucleus used as their representative.
    static ref BY_SYMBOL: HashMap<String, Nucleus> = {
        let mut map = HashMap::new();
        let _ = map.insert("p".to_string(), Nucleus::PROTON);
        for nucleus in [
            Nucleus::PROTON,
            Nucleus::HELIUM,
            Nucleus::CARBON,
            Nucleus::NITROGEN,
            Nucleus::OXYGEN,
            Nucleus::MAGNESIUM,
            Nucleus::ALUMINIUM,
            Nucleus::SILICON,
            Nucleus::MANGANESE,
            Nucleus::IRON,
            Nucleus::COBALT,
            Nucleus::TELLURIUM,
            Nucleus::MERCURY,
        ] {
            if let Some(sym) = nucleus.symbol() {
                let _ = map.insert(sym.to_lowercase(), nucleus);
            }
        }
        map
    };
}

impl FromStr for Nucleus {
    type Err = Error;

    /// Parse either an element symbol (case insensitive) or a numerical CORSIKA id.
    fn from_str(s: &str) -> CrfluxResult<Self> {
        let s = s.trim();
        if let Some(nucleus) = BY_SYMBOL.get(&s.to_lowercase()) {
            return Ok(*nucleus);
        }
        let id = u32::from_str(s)?;
        Ok(Nucleus(id))
    }
}

impl From<u32> for Nucleus {
    fn from(value: u32) -> Self {
        Nucleus(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_z_a() {
        assert_eq!(Nucleus::PROTON.z_a(), (1.0, 1.0));
        assert_eq!(Nucleus::HELIUM.z_a(), (2.0, 4.0));
        assert_eq!(Nucleus::IRON.z_a(), (26.0, 54.0));
        assert_eq!(Nucleus::MERCURY.z_a(), (80.0, 201.0));
        // ids below the proton id are treated as protons
        assert_eq!(Nucleus::new(13).z_a(), (1.0, 1.0));
    }

    #[test]
    fn test_from_za_round_trip() {
        for nucleus in [Nucleus::PROTON, Nucleus::OXYGEN, Nucleus::COBALT] {
            assert_eq!(Nucleus::from_za(nucleus.z(), nucleus.a()), nucleus);
        }
    }

    #[test]
    fn test_parse() {
        assert_eq!("Fe".parse::<Nucleus>().unwrap(), Nucleus::IRON);
        assert_eq!("he".parse::<Nucleus>().unwrap(), Nucleus::HELIUM);
        assert_eq!("p".parse::<Nucleus>().unwrap(), Nucleus::PROTON);
        assert_eq!("1206".parse::<Nucleus>().unwrap(), Nucleus::CARBON);
        assert!("Xx".parse::<Nucleus>().is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Nucleus::PROTON.to_string(), "p");
        assert_eq!(Nucleus::IRON.to_string(), "Fe-54");
        assert_eq!(Nucleus::new(9999).to_string(), "9999");
    }
}
