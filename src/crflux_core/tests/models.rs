use crflux_core::interpolation::log_grid;
use crflux_core::prelude::*;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn all_models() -> Vec<Box<dyn FluxModel>> {
    let mut models: Vec<Box<dyn FluxModel>> = ModelKind::ALL
        .iter()
        .map(|kind| kind.build().unwrap())
        .collect();
    models.push(Box::new(GaisserStanevTilav::new(GstVariant::FourGen, true)));
    models.push(Box::new(HillasGaisser2012::new_polygonato(HgVariant::H4a)));
    models
}

#[test]
fn flux_is_finite_and_non_negative() {
    init_logger();
    for model in all_models() {
        for id in model.nucleus_ids() {
            let range = model.valid_range(*id);
            for energy in log_grid(range.min, range.max, 60).unwrap() {
                let flux = model.nucleus_flux(*id, energy).unwrap();
                assert!(
                    flux.is_finite() && flux >= 0.0,
                    "{} {} at {}: {}",
                    model.short_name(),
                    id,
                    energy,
                    flux
                );
            }
        }
    }
}

#[test]
fn range_edges() {
    init_logger();
    for model in all_models() {
        for id in model.nucleus_ids() {
            let range = model.valid_range(*id);
            assert!(model.nucleus_flux(*id, range.min).is_ok());
            assert!(model.nucleus_flux(*id, range.max).is_ok());
            assert!(matches!(
                model.nucleus_flux(*id, range.min * (1.0 - 1e-6)),
                Err(Error::OutOfDomain { .. })
            ));
            assert!(matches!(
                model.nucleus_flux(*id, range.max * (1.0 + 1e-6)),
                Err(Error::OutOfDomain { .. })
            ));
            assert!(matches!(
                model.nucleus_flux(*id, f64::NAN),
                Err(Error::OutOfDomain { .. })
            ));
        }
    }
}

fn assert_decreasing(model: &dyn FluxModel, id: Nucleus, min: f64, max: f64) {
    let fluxes: Vec<f64> = log_grid(min, max, 100)
        .unwrap()
        .into_iter()
        .map(|e| model.nucleus_flux(id, e).unwrap())
        .collect();
    assert!(
        fluxes.windows(2).all(|w| w[1] < w[0]),
        "{} {}",
        model.short_name(),
        id
    );
}

#[test]
fn power_laws_decrease() {
    let models: Vec<Box<dyn FluxModel>> = vec![
        Box::new(PowerLaw::simple_e27()),
        Box::new(BenzviMontaruli::new()),
    ];
    for model in models {
        for id in model.nucleus_ids() {
            let range = model.valid_range(*id);
            assert_decreasing(model.as_ref(), *id, range.min, range.max);
        }
    }

    // the two branches of Thunman et al. do not meet, each one decreases on its own
    let model = Thunman::new();
    let range = model.valid_range(Nucleus::PROTON);
    let knee = model.transition;
    assert_decreasing(&model, Nucleus::PROTON, range.min, knee * (1.0 - 1e-12));
    assert_decreasing(&model, Nucleus::PROTON, knee, range.max);
    let below = model
        .nucleus_flux(Nucleus::PROTON, knee * (1.0 - 1e-12))
        .unwrap();
    let above = model.nucleus_flux(Nucleus::PROTON, knee).unwrap();
    assert!(above > below);
}

#[test]
fn power_law_reference_value() {
    let model = PowerLaw::new(
        "reference",
        Nucleus::PROTON,
        1.0,
        -2.7,
        1.0,
        EnergyRange::standard(),
    )
    .unwrap();
    let flux = model.nucleus_flux(Nucleus::PROTON, 10.0).unwrap();
    assert!((flux / 0.001995262315 - 1.0).abs() < 1e-6);
}

#[test]
fn unsupported_species_is_named() {
    let model = HillasGaisser2012::new(HgVariant::H3a);
    let err = model.nucleus_flux(Nucleus::MERCURY, 1e3).unwrap_err();
    assert_eq!(err, Error::UnsupportedSpecies(Nucleus::MERCURY));
    assert!(err.to_string().contains("20180"));

    let err = Thunman::new().nucleus_flux(Nucleus::HELIUM, 1e3).unwrap_err();
    assert!(err.to_string().contains("402"));
}

#[test]
fn conversion_round_trip() {
    let model = GaisserStanevTilav::new(GstVariant::ThreeGen, true);
    let energies = log_grid(1.0, 1e10, 101).unwrap();
    let particles = ParticleSpectrum::from_model(&model, &energies).unwrap();
    let nucleons = all_particle_to_all_nucleon(&particles).unwrap();
    let back = all_nucleon_to_all_particle(&nucleons).unwrap();

    for (id, flux) in particles.fluxes() {
        let a = id.a() as f64;
        let nucleon = nucleons.component(*id).unwrap();
        let converted = back.flux(*id).unwrap();
        for ((orig, per_nucleon), conv) in flux.iter().zip(nucleon.fluxes()).zip(converted) {
            assert!((per_nucleon / (a * a) - orig).abs() <= 1e-12 * orig.abs());
            assert!((conv - orig).abs() <= 1e-12 * orig.abs());
        }
    }
}

#[test]
fn combined_model_is_continuous() {
    init_logger();
    for variant in [HgVariant::H3a, HgVariant::H4a] {
        let model = CombinedGHandHG::new(variant).unwrap();
        for id in model.nucleus_ids() {
            let e_t = model.transition(*id).unwrap();
            let below = model.nucleus_flux(*id, e_t * (1.0 - 1e-10)).unwrap();
            let above = model.nucleus_flux(*id, e_t).unwrap();
            assert!((below / above - 1.0).abs() < 1e-6, "{} {}", variant, id);
        }
    }
}

#[test]
fn extrapolation_is_opt_in() {
    let model = ZatsepinSokolskaya::new(ZsVariant::Pamela);
    assert!(model.tot_nucleon_flux(1e6).is_err());
    let wide = Extrapolate(model.clone());
    let flux = wide.tot_nucleon_flux(1e6).unwrap();
    assert!(flux > 0.0 && flux.is_finite());
    assert_eq!(
        wide.nucleus_flux(Nucleus::PROTON, 100.0).unwrap(),
        model.nucleus_flux(Nucleus::PROTON, 100.0).unwrap()
    );
    assert!(wide.nucleus_flux(Nucleus::MERCURY, 100.0).is_err());
}

#[test]
fn tabulated_model_from_file() {
    init_logger();
    let dir = std::env::temp_dir().join("crflux_integration_tables");
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();

    let model = GaisserStanevTilav::new(GstVariant::FourGen, false);
    let table = NucleonFluxTable::tabulate(&model, 1.0, 1e9, 181).unwrap();
    let _ = table.save(dir.join("GSF_table_20240301.bin")).unwrap();

    let tab = TabulatedNucleonFlux::from_dir(&dir).unwrap();
    assert_eq!(tab.short_name(), "GSF");
    let exact = model.tot_nucleon_flux(100.0).unwrap();
    let approx = tab.tot_nucleon_flux(100.0).unwrap();
    assert!((approx / exact - 1.0).abs() < 1e-3);
    assert!(tab.delta_0(100.0).unwrap() > 0.0);
}
