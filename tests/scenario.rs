//! 시나리오 TOML 포맷 테스트.

use filament_toolbox::estimator::{calculate, EconomicOverrides, WasteMode};
use filament_toolbox::profile_db::ProfileDb;
use filament_toolbox::scenario::{self, CoefficientPercents, Scenario};

const SAMPLE: &str = r#"
measured_waste_kg = 2.5

[coefficients]
discard_rate_pct = 35.0
support_ratio_pct = 10.0
rate_multiplier_pct = 120.0

[overrides]
filament_cost_per_kg = 22.0

[[printer]]
profile_key = "bambu-p1s"
hours = 635.0

[[printer]]
profile_key = "bambu-a1-mini"
hours = 239.0
num_printers = 2
custom_rate_g_per_h = 7.5
"#;

#[test]
fn parses_sample_scenario() {
    let sc: Scenario = toml::from_str(SAMPLE).expect("sample scenario");
    assert_eq!(sc.measured_waste_kg, Some(2.5));
    assert_eq!(sc.measured_waste_g(), Some(2500.0));
    assert_eq!(sc.coefficients.discard_rate_pct, 35.0);
    assert_eq!(sc.overrides.filament_cost_per_kg, Some(22.0));
    assert_eq!(sc.overrides.shred_energy_kwh_per_kg, None);
    assert_eq!(sc.printers.len(), 2);
    // 생략된 필드는 기본값으로 채워진다
    assert_eq!(sc.printers[0].num_printers, 1);
    assert_eq!(sc.printers[0].custom_rate_g_per_h, None);
    assert_eq!(sc.printers[1].num_printers, 2);
    assert_eq!(sc.printers[1].custom_rate_g_per_h, Some(7.5));
}

#[test]
fn empty_file_is_default_scenario() {
    let sc: Scenario = toml::from_str("").expect("empty scenario");
    assert_eq!(sc, Scenario::default());
    assert!(sc.printers.is_empty());
    assert_eq!(sc.measured_waste_kg, None);
    assert_eq!(sc.coefficients.discard_rate_pct, 43.0);
    assert_eq!(sc.coefficients.support_ratio_pct, 8.0);
    assert_eq!(sc.coefficients.rate_multiplier_pct, 100.0);
}

#[test]
fn percent_coefficients_convert_to_ratios() {
    let c = CoefficientPercents {
        discard_rate_pct: 35.0,
        support_ratio_pct: 10.0,
        rate_multiplier_pct: 120.0,
    }
    .to_coefficients();
    assert!((c.failure_rate - 0.35).abs() < 1e-12);
    assert!((c.support_ratio - 0.10).abs() < 1e-12);
    assert!((c.rate_multiplier - 1.2).abs() < 1e-12);

    let back = CoefficientPercents::from_coefficients(c);
    assert!((back.discard_rate_pct - 35.0).abs() < 1e-9);
}

#[test]
fn serializes_printer_rows_as_printer_tables() {
    let sc: Scenario = toml::from_str(SAMPLE).expect("sample scenario");
    let text = toml::to_string_pretty(&sc).expect("serialize");
    assert!(text.contains("[[printer]]"), "got:\n{text}");
    assert!(text.contains("measured_waste_kg = 2.5"));
    // None 덮어쓰기 필드는 파일에 쓰지 않는다
    assert!(!text.contains("shred_energy_kwh_per_kg"));
}

#[test]
fn save_and_load_round_trip() {
    let sc: Scenario = toml::from_str(SAMPLE).expect("sample scenario");
    let path = std::env::temp_dir().join(format!(
        "filament_toolbox_scenario_{}.toml",
        std::process::id()
    ));
    sc.save(&path).expect("save scenario");
    let loaded = scenario::load(&path).expect("load scenario");
    std::fs::remove_file(&path).ok();
    assert_eq!(loaded, sc);
}

#[test]
fn load_reports_missing_file() {
    let err = scenario::load(std::path::Path::new("does-not-exist.toml"))
        .expect_err("missing file must fail");
    assert!(matches!(err, scenario::ScenarioError::Io(_)));
}

#[test]
fn load_reports_bad_toml() {
    let sc: Result<Scenario, _> = toml::from_str("measured_waste_kg = \"lots\"");
    assert!(sc.is_err());
}

#[test]
fn loaded_scenario_runs_through_engine() {
    let sc: Scenario = toml::from_str(SAMPLE).expect("sample scenario");
    let db = ProfileDb::default();
    let res = calculate(
        &db,
        &sc.printers,
        sc.coefficients.to_coefficients(),
        sc.measured_waste_g(),
        sc.overrides,
    )
    .expect("engine run");
    // 실측 2.5 kg → 실측 모드
    assert!(matches!(res.mode, WasteMode::Measured));
    assert_eq!(res.waste_g, 2500.0);
    // 가격 덮어쓰기가 경제성 계산까지 흘러간다
    assert!((res.recycling.reclaimed_value - 2.5 * 0.95 * 22.0).abs() < 1e-9);
}

#[test]
fn scenario_without_measurement_estimates() {
    let sc = Scenario {
        measured_waste_kg: None,
        printers: toml::from_str::<Scenario>(SAMPLE)
            .expect("sample scenario")
            .printers,
        ..Scenario::default()
    };
    let db = ProfileDb::default();
    let res = calculate(
        &db,
        &sc.printers,
        sc.coefficients.to_coefficients(),
        sc.measured_waste_g(),
        EconomicOverrides::default(),
    )
    .expect("engine run");
    assert!(matches!(res.mode, WasteMode::Estimated { .. }));
}
