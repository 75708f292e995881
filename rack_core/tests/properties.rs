//! End-to-end properties of the load and selection pipeline.

use rack_core::calculations::beam::{check_profile, select_for_demand, select_profile, BeamDemand};
use rack_core::calculations::column::select_column_profile;
use rack_core::calculations::quantity::estimate_quantity;
use rack_core::loads::{combine, compute_dead_load, compute_snow_load, compute_wind_load};
use rack_core::tables::{GustModel, ProfileCatalog, ProfileRecord, RoofType, SectionKind, TerrainCategory};
use rack_core::{design_rack, CalcError, CodeTables, DesignSettings, GeometryParameters, PanelParameters, RackDesignInput, SiteParameters};

fn geometry() -> GeometryParameters {
    GeometryParameters {
        tilt_deg: 25.0,
        roof_type: RoofType::MonoSlope,
        array_width_m: 2.0,
        row_length_m: 10.0,
        mounting_height_m: 2.5,
        support_span_m: 2.5,
        beams_per_rack: 2,
    }
}

fn single_profile(allowable_stress_mpa: f64) -> ProfileCatalog {
    // W = 500 cm³ = 0.0005 m³, I = 1000 cm⁴ = 1e-5 m⁴
    ProfileCatalog::new(vec![ProfileRecord {
        label: "SINGLE".to_string(),
        kind: SectionKind::CChannel,
        area_cm2: 20.0,
        ix_cm4: 1000.0,
        wx_cm3: 500.0,
        mass_kg_per_m: 15.7,
        allowable_stress_mpa,
        elastic_modulus_mpa: 206_000.0,
        deflection_limit_ratio: 250.0,
    }])
    .unwrap()
}

fn scenario_demand() -> BeamDemand {
    // span 2 m, q = 2.4 kN/m
    BeamDemand {
        moment_knm: 1.2,
        service_line_load_kn_m: 2.4,
        span_m: 2.0,
    }
}

#[test]
fn wind_is_monotone_in_height() {
    let mut tables = CodeTables::gb50009_2012().unwrap();
    for gust in [GustModel::Constant(1.0), GustModel::HeightDependent] {
        tables.gust = gust;
        for terrain in TerrainCategory::ALL {
            let mut previous = 0.0;
            for height in [1.0, 3.0, 5.0, 10.0, 15.0, 20.0, 30.0, 50.0, 100.0, 400.0, 600.0] {
                let site = SiteParameters::new("beijing", terrain, height);
                let wind = compute_wind_load(&site, &geometry(), &tables).unwrap();
                assert!(wind.wk_kpa >= previous, "{gust:?}, terrain {terrain} at {height} m");
                previous = wind.wk_kpa;
            }
        }
    }
}

#[test]
fn wind_is_monotone_in_base_pressure() {
    let tables = CodeTables::gb50009_2012().unwrap();
    let mut previous = 0.0;
    for w0 in [0.0, 0.25, 0.35, 0.5, 0.75, 1.2] {
        let site = SiteParameters::new("default", TerrainCategory::B, 3.0).with_wind_pressure(w0);
        let wind = compute_wind_load(&site, &geometry(), &tables).unwrap();
        assert!(wind.wk_kpa >= previous);
        previous = wind.wk_kpa;
    }
}

#[test]
fn wind_scenario_is_deterministic() {
    // w0 = 0.35, terrain B, 3 m, 25°
    let tables = CodeTables::gb50009_2012().unwrap();
    let site = SiteParameters::new("default", TerrainCategory::B, 3.0).with_wind_pressure(0.35);
    let first = compute_wind_load(&site, &geometry(), &tables).unwrap();
    let second = compute_wind_load(&site, &geometry(), &tables).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.wk_kpa.to_bits(), second.wk_kpa.to_bits());
    assert!(first.wk_kpa > 0.0);
}

#[test]
fn loads_are_never_negative() {
    let tables = CodeTables::gb50009_2012().unwrap();
    for region in ["beijing", "guangzhou", "urumqi", "lhasa"] {
        for tilt in [0.0, 15.0, 30.0, 45.0, 60.0, 90.0] {
            let g = GeometryParameters { tilt_deg: tilt, ..geometry() };
            let site = SiteParameters::new(region, TerrainCategory::C, 6.0);
            assert!(compute_wind_load(&site, &g, &tables).unwrap().wk_kpa >= 0.0);
            assert!(compute_snow_load(&site, &g, &tables).unwrap().sk_kpa >= 0.0);
        }
    }
}

#[test]
fn combine_is_idempotent() {
    let tables = CodeTables::gb50009_2012().unwrap();
    let settings = DesignSettings::default();
    let site = SiteParameters::new("harbin", TerrainCategory::B, 3.0);
    let wind = compute_wind_load(&site, &geometry(), &tables).unwrap();
    let snow = compute_snow_load(&site, &geometry(), &tables).unwrap();
    let dead = compute_dead_load(&PanelParameters::default(), &settings).unwrap();

    let a = combine(&dead, &wind, &snow, &geometry(), &settings).unwrap();
    let b = combine(&dead, &wind, &snow, &geometry(), &settings).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.governing_combination, b.governing_combination);
    assert_eq!(a.forces.moment_knm.to_bits(), b.forces.moment_knm.to_bits());
}

#[test]
fn high_strength_single_profile_passes() {
    // M = 1.2 kN·m, W = 0.0005 m³, f = 170 MPa
    let settings = DesignSettings::default();
    let result = select_for_demand(&scenario_demand(), &single_profile(170.0), &settings).unwrap();
    assert_eq!(result.profile.label, "SINGLE");
    assert!(result.passes);
    assert!(result.strength_utilization <= settings.safety_threshold);
    assert!(result.deflection_utilization <= settings.safety_threshold);
}

#[test]
fn low_strength_single_profile_fails() {
    // f = 2 MPa gives utilization 1.2
    let err = select_for_demand(&scenario_demand(), &single_profile(2.0), &DesignSettings::default()).unwrap_err();
    match err {
        CalcError::NoSuitableProfile {
            best_candidate,
            strength_utilization,
            threshold,
            ..
        } => {
            assert_eq!(best_candidate.as_deref(), Some("SINGLE"));
            assert!((strength_utilization - 1.2).abs() < 1e-9);
            assert_eq!(threshold, 0.95);
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn selection_never_exceeds_threshold() {
    let tables = CodeTables::gb50009_2012().unwrap();
    for threshold in [0.5, 0.8, 0.95, 1.0] {
        let settings = DesignSettings {
            safety_threshold: threshold,
            ..DesignSettings::default()
        };
        for moment in [0.1, 0.5, 1.0, 2.0, 4.0, 8.0] {
            let demand = BeamDemand {
                moment_knm: moment,
                service_line_load_kn_m: moment,
                span_m: 2.5,
            };
            if let Ok(result) = select_for_demand(&demand, tables.profiles(), &settings) {
                assert!(result.strength_utilization <= threshold);
                assert!(result.deflection_utilization <= threshold);
            }
        }
    }
}

#[test]
fn heavier_demand_never_picks_lighter_profile() {
    let tables = CodeTables::gb50009_2012().unwrap();
    let catalog = tables.profiles();
    let settings = DesignSettings::default();

    let mut previous_rank = 0;
    for step in 1..=40 {
        let q = step as f64 * 0.1;
        let demand = BeamDemand {
            moment_knm: q * 2.5 * 2.5 / 8.0,
            service_line_load_kn_m: q * 0.8,
            span_m: 2.5,
        };
        let Ok(result) = select_for_demand(&demand, catalog, &settings) else {
            break;
        };
        let rank = catalog.weight_rank(&result.profile.label).unwrap();
        assert!(rank >= previous_rank, "q = {q}");
        previous_rank = rank;
    }
}

#[test]
fn selected_profile_is_lightest_passing() {
    let tables = CodeTables::gb50009_2012().unwrap();
    let catalog = tables.profiles();
    let demand = BeamDemand {
        moment_knm: 2.5,
        service_line_load_kn_m: 2.0,
        span_m: 3.0,
    };
    let result = select_for_demand(&demand, catalog, &DesignSettings::default()).unwrap();
    let first_passing = catalog
        .iter()
        .find(|p| check_profile(p, &demand, 0.95).passes)
        .unwrap();
    assert_eq!(result.profile.label, first_passing.label);
}

#[test]
fn quantity_scales_with_rack_count() {
    let tables = CodeTables::gb50009_2012().unwrap();
    let settings = DesignSettings::default();
    let site = SiteParameters::new("beijing", TerrainCategory::B, 3.0);
    let wind = compute_wind_load(&site, &geometry(), &tables).unwrap();
    let snow = compute_snow_load(&site, &geometry(), &tables).unwrap();
    let dead = compute_dead_load(&PanelParameters::default(), &settings).unwrap();
    let combined = combine(&dead, &wind, &snow, &geometry(), &settings).unwrap();
    let beam = select_profile(&combined, tables.profiles(), &settings).unwrap();

    let zero = estimate_quantity(&beam, &geometry(), 0).unwrap();
    assert_eq!(zero.total_length_m, 0.0);
    assert_eq!(zero.total_mass_kg, 0.0);

    let ten = estimate_quantity(&beam, &geometry(), 10).unwrap();
    assert_eq!(ten.total_length_m, 200.0);

    let err = estimate_quantity(&beam, &geometry(), -1).unwrap_err();
    assert_eq!(err.error_code(), "INVALID_INPUT");

    let column = select_column_profile(&combined, &geometry(), tables.profiles(), &settings).unwrap();
    assert!(column.passes);
}

#[test]
fn unknown_region_fails_everywhere() {
    let tables = CodeTables::gb50009_2012().unwrap();
    let site = SiteParameters::new("atlantis", TerrainCategory::B, 3.0);
    assert!(matches!(
        compute_wind_load(&site, &geometry(), &tables),
        Err(CalcError::UnknownRegion { .. })
    ));
    assert!(matches!(
        compute_snow_load(&site, &geometry(), &tables),
        Err(CalcError::UnknownRegion { .. })
    ));
}

#[test]
fn full_design_report_serializes() {
    let input = RackDesignInput {
        label: "Integration".to_string(),
        site: SiteParameters::new("上海", TerrainCategory::A, 8.0),
        geometry: geometry(),
        panel: PanelParameters::default(),
        rack_count: 5,
    };
    let tables = CodeTables::builtin().unwrap();
    let report = design_rack(&input, tables, &DesignSettings::default()).unwrap();

    let json = serde_json::to_string(&report).unwrap();
    let parsed: rack_core::RackDesignReport = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, report);
    assert!(report.passes());
}

#[test]
fn report_json_is_exact_across_sites() {
    let tables = CodeTables::builtin().unwrap();
    let settings = DesignSettings::default();
    for region in ["beijing", "shanghai", "guangzhou", "harbin", "urumqi", "lhasa", "default"] {
        for tilt in [0.0, 12.5, 25.0, 33.0, 47.0] {
            for height in [1.5, 3.0, 7.3, 18.0] {
                let input = RackDesignInput {
                    label: format!("{region} {tilt} {height}"),
                    site: SiteParameters::new(region, TerrainCategory::C, height),
                    geometry: GeometryParameters { tilt_deg: tilt, ..geometry() },
                    panel: PanelParameters::default(),
                    rack_count: 3,
                };
                let Ok(report) = design_rack(&input, tables, &settings) else {
                    continue;
                };
                let json = serde_json::to_string(&report).unwrap();
                let parsed: rack_core::RackDesignReport = serde_json::from_str(&json).unwrap();
                assert_eq!(parsed, report, "{}", input.label);
            }
        }
    }
}

#[test]
fn substitute_catalog_changes_selection() {
    let mut tables = CodeTables::gb50009_2012().unwrap();
    tables.sections.retain(|s| s.kind == SectionKind::SquareTube);
    let tables = tables.validated().unwrap();

    let input = RackDesignInput {
        label: "Tubes only".to_string(),
        site: SiteParameters::new("beijing", TerrainCategory::B, 3.0),
        geometry: geometry(),
        panel: PanelParameters::default(),
        rack_count: 1,
    };
    let report = design_rack(&input, &tables, &DesignSettings::default()).unwrap();
    assert_eq!(report.selection_result.profile.kind, SectionKind::SquareTube);
}
