//! Selection of the published models by their short names.
use std::fmt;
use std::str::FromStr;

use super::{
    BenzviMontaruli, CombinedGHandHG, FluxModel, GaisserHonda, GaisserStanevTilav,
    GstVariant, HgVariant, HillasGaisser2012, PolyGonato, PowerLaw, Thunman,
    ZatsepinSokolskaya, ZsVariant,
};
use crate::errors::{CrfluxResult, Error};

/// Every named model variant.
///
/// ```
///     use crflux_core::prelude::*;
///     let kind: ModelKind = "cH4a".parse().unwrap();
///     let model = kind.build().unwrap();
///     assert_eq!(model.short_name(), "cH4a");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelKind {
    /// Hillas-Gaisser with a mixed extra-galactic population.
    H3a,

    /// Hillas-Gaisser with a proton extra-galactic population.
    H4a,

    /// Gaisser-Honda joined to H3a.
    CombinedH3a,

    /// Gaisser-Honda joined to H4a.
    CombinedH4a,

    /// Gaisser-Stanev-Tilav with three populations.
    Gst3,

    /// Gaisser-Stanev-Tilav with four populations.
    Gst4,

    /// Poly-gonato with a rigidity dependent index change.
    PolyGonato,

    /// Poly-gonato with a common index above the knee.
    PolyGonatoConst,

    /// Hillas-Gaisser tuned to poly-gonato below the knee.
    H3aPolyGonato,

    /// Thunman-Ingelman-Gondolo broken power law.
    Thunman,

    /// Proton E^-2.7 power law.
    SimpleE27,

    /// Gaisser-Honda.
    GaisserHonda,

    /// Zatsepin-Sokolskaya.
    ZatsepinSokolskaya,

    /// Zatsepin-Sokolskaya with PAMELA parameters.
    ZatsepinSokolskayaPamela,

    /// Benzvi-Montaruli.
    BenzviMontaruli,
}

impl ModelKind {
    /// All of the selectable variants.
    pub const ALL: [ModelKind; 15] = [
        ModelKind::H3a,
        ModelKind::H4a,
        ModelKind::CombinedH3a,
        ModelKind::CombinedH4a,
        ModelKind::Gst3,
        ModelKind::Gst4,
        ModelKind::PolyGonato,
        ModelKind::PolyGonatoConst,
        ModelKind::H3aPolyGonato,
        ModelKind::Thunman,
        ModelKind::SimpleE27,
        ModelKind::GaisserHonda,
        ModelKind::ZatsepinSokolskaya,
        ModelKind::ZatsepinSokolskayaPamela,
        ModelKind::BenzviMontaruli,
    ];

    /// Short name used for selection.
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelKind::H3a => "H3a",
            ModelKind::H4a => "H4a",
            ModelKind::CombinedH3a => "cH3a",
            ModelKind::CombinedH4a => "cH4a",
            ModelKind::Gst3 => "GST3",
            ModelKind::Gst4 => "GST4",
            ModelKind::PolyGonato => "pg",
            ModelKind::PolyGonatoConst => "pg-const",
            ModelKind::H3aPolyGonato => "H3a-pg",
            ModelKind::Thunman => "TIG",
            ModelKind::SimpleE27 => "E-2.7",
            ModelKind::GaisserHonda => "GH",
            ModelKind::ZatsepinSokolskaya => "ZS",
            ModelKind::ZatsepinSokolskayaPamela => "ZSP",
            ModelKind::BenzviMontaruli => "BM",
        }
    }

    /// Construct the model.
    pub fn build(&self) -> CrfluxResult<Box<dyn FluxModel>> {
        let model: Box<dyn FluxModel> = match self {
            ModelKind::H3a => Box::new(HillasGaisser2012::new(HgVariant::H3a)),
            ModelKind::H4a => Box::new(HillasGaisser2012::new(HgVariant::H4a)),
            ModelKind::CombinedH3a => Box::new(CombinedGHandHG::new(HgVariant::H3a)?),
            ModelKind::CombinedH4a => Box::new(CombinedGHandHG::new(HgVariant::H4a)?),
            ModelKind::Gst3 => Box::new(GaisserStanevTilav::new(GstVariant::ThreeGen, false)),
            ModelKind::Gst4 => Box::new(GaisserStanevTilav::new(GstVariant::FourGen, false)),
            ModelKind::PolyGonato => Box::new(PolyGonato::new(false)),
            ModelKind::PolyGonatoConst => Box::new(PolyGonato::new(true)),
            ModelKind::H3aPolyGonato => {
                Box::new(HillasGaisser2012::new_polygonato(HgVariant::H3a))
            }
            ModelKind::Thunman => Box::new(Thunman::new()),
            ModelKind::SimpleE27 => Box::new(PowerLaw::simple_e27()),
            ModelKind::GaisserHonda => Box::new(GaisserHonda::new()),
            ModelKind::ZatsepinSokolskaya => {
                Box::new(ZatsepinSokolskaya::new(ZsVariant::Default))
            }
            ModelKind::ZatsepinSokolskayaPamela => {
                Box::new(ZatsepinSokolskaya::new(ZsVariant::Pamela))
            }
            ModelKind::BenzviMontaruli => Box::new(BenzviMontaruli::new()),
        };
        Ok(model)
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ModelKind {
    type Err = Error;

    fn from_str(s: &str) -> CrfluxResult<Self> {
        ModelKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| Error::UnknownModel(s.to_string()))
    }
}

/// The collection of models compared against each other by [`crate::survey`].
pub fn standard_models() -> CrfluxResult<Vec<Box<dyn FluxModel>>> {
    [
        ModelKind::Gst3,
        ModelKind::Gst4,
        ModelKind::CombinedH3a,
        ModelKind::CombinedH4a,
        ModelKind::H3a,
        ModelKind::H4a,
        ModelKind::PolyGonato,
        ModelKind::Thunman,
        ModelKind::ZatsepinSokolskaya,
        ModelKind::ZatsepinSokolskayaPamela,
        ModelKind::GaisserHonda,
    ]
    .iter()
    .map(ModelKind::build)
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for kind in ModelKind::ALL {
            let parsed: ModelKind = kind.to_string().parse().unwrap();
            assert_eq!(parsed, kind);
            let model = kind.build().unwrap();
            assert_eq!(model.short_name(), kind.as_str(), "{:?}", kind);
        }
        assert_eq!(
            "H5a".parse::<ModelKind>(),
            Err(Error::UnknownModel("H5a".into()))
        );
    }

    #[test]
    fn test_standard_models() {
        let models = standard_models().unwrap();
        assert_eq!(models.len(), 11);
        for model in &models {
            assert!(model.tot_nucleon_flux(10.0).unwrap() > 0.0, "{}", model.name());
        }
    }
}
