//! 종합 리포트 회귀 테스트. 기본 프로파일(P1S 10 g/h, 퍼지 0.35 g/회,
//! 평균 작업 2 h)에서 손으로 계산한 기준값과 대조한다.

use filament_toolbox::estimator::{
    calculate, Coefficients, EconomicOverrides, PrinterUsageRow, ReportError, WasteMode,
};
use filament_toolbox::profile_db::ProfileDb;

fn assert_close(label: &str, actual: f64, expected: f64, tol: f64) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tol,
        "{label} expected {expected:.6} got {actual:.6} (diff {diff:.6})"
    );
}

fn row(key: &str, hours: f64) -> PrinterUsageRow {
    PrinterUsageRow {
        profile_key: key.to_string(),
        hours,
        num_printers: 1,
        custom_rate_g_per_h: None,
    }
}

#[test]
fn p1s_reference_numbers() {
    // P1S 635 h × 10 g/h = 6350 g 재료.
    // 퍼지: 635/2 h = 317.5회 시작 × 0.35 g = 111.125 g. 총 6461.125 g.
    // 계수 43%/8%: 실패 2730.5 g, 서포트 289.56 g, 실사용 3329.94 g.
    let db = ProfileDb::default();
    let res = calculate(
        &db,
        &[row("bambu-p1s", 635.0)],
        Coefficients::default(),
        None,
        EconomicOverrides::default(),
    )
    .expect("p1s report");

    assert_close("total", res.total_material_g, 6461.125, 1e-9);
    assert_close("purge", res.purge_g, 111.125, 1e-9);
    assert_close("in_use", res.in_use_g, 3329.94, 1e-9);
    assert_close("waste", res.waste_g, 3020.06 + 111.125, 1e-9);
    match res.mode {
        WasteMode::Estimated { failed_g, support_g } => {
            assert_close("failed", failed_g, 2730.5, 1e-9);
            assert_close("support", support_g, 289.56, 1e-9);
        }
        WasteMode::Measured => panic!("expected estimated mode"),
    }
    assert_close("kg mirror", res.total_material_kg, res.total_material_g / 1000.0, 1e-12);
}

#[test]
fn estimated_mode_conserves_total() {
    let db = ProfileDb::default();
    let rows = [row("bambu-p1s", 635.0), row("bambu-a1-mini", 239.0)];
    let res = calculate(
        &db,
        &rows,
        Coefficients::default(),
        None,
        EconomicOverrides::default(),
    )
    .expect("two printer report");
    assert_close(
        "in_use + waste",
        res.in_use_g + res.waste_g,
        res.total_material_g,
        1e-9,
    );
    assert_close(
        "percent sum",
        res.percent_in_use + res.percent_waste,
        100.0,
        1e-9,
    );
}

#[test]
fn measured_mode_replaces_estimate() {
    let db = ProfileDb::default();
    let res = calculate(
        &db,
        &[row("bambu-p1s", 635.0)],
        Coefficients::default(),
        Some(3000.0),
        EconomicOverrides::default(),
    )
    .expect("measured report");

    assert!(matches!(res.mode, WasteMode::Measured));
    assert_close("waste == measured", res.waste_g, 3000.0, 1e-9);
    assert_close("in_use", res.in_use_g, 6461.125 - 3000.0, 1e-9);
    // 퍼지 추정치는 참고용으로 계속 보고된다
    assert_close("purge still reported", res.purge_g, 111.125, 1e-9);
    assert_close(
        "percent_waste",
        res.percent_waste,
        3000.0 / 6461.125 * 100.0,
        1e-9,
    );
}

#[test]
fn zero_or_negative_measurement_falls_back_to_estimate() {
    let db = ProfileDb::default();
    let rows = [row("bambu-p1s", 100.0)];
    for measured in [Some(0.0), Some(-5.0), None] {
        let res = calculate(
            &db,
            &rows,
            Coefficients::default(),
            measured,
            EconomicOverrides::default(),
        )
        .expect("report");
        assert!(
            matches!(res.mode, WasteMode::Estimated { .. }),
            "measured={measured:?} should use the coefficient estimate"
        );
    }
}

#[test]
fn measurement_larger_than_total_caps_percent_only() {
    let db = ProfileDb::default();
    let res = calculate(
        &db,
        &[row("bambu-p1s", 10.0)], // 총 101.75 g
        Coefficients::default(),
        Some(500.0),
        EconomicOverrides::default(),
    )
    .expect("overweight measurement");
    assert_close("percent_waste capped", res.percent_waste, 100.0, 1e-9);
    assert_close("percent_in_use floored", res.percent_in_use, 0.0, 1e-9);
    // 실사용량 자체는 음수로 남는다
    assert!(res.in_use_g < 0.0);
    assert_close("waste", res.waste_g, 500.0, 1e-9);
}

#[test]
fn more_hours_means_more_material_and_waste() {
    let db = ProfileDb::default();
    let short = calculate(
        &db,
        &[row("generic-standard", 100.0)],
        Coefficients::default(),
        None,
        EconomicOverrides::default(),
    )
    .expect("short");
    let long = calculate(
        &db,
        &[row("generic-standard", 200.0)],
        Coefficients::default(),
        None,
        EconomicOverrides::default(),
    )
    .expect("long");
    assert!(long.total_material_g > short.total_material_g);
    assert!(long.waste_g > short.waste_g);
    assert!(long.in_use_g > short.in_use_g);
}

#[test]
fn custom_rate_ignores_multiplier() {
    let db = ProfileDb::default();
    let custom = PrinterUsageRow {
        profile_key: "bambu-p1s".to_string(),
        hours: 100.0,
        num_printers: 1,
        custom_rate_g_per_h: Some(7.5),
    };
    let base = calculate(
        &db,
        std::slice::from_ref(&custom),
        Coefficients::default(),
        None,
        EconomicOverrides::default(),
    )
    .expect("multiplier 1.0");
    let doubled = calculate(
        &db,
        std::slice::from_ref(&custom),
        Coefficients {
            rate_multiplier: 2.0,
            ..Coefficients::default()
        },
        None,
        EconomicOverrides::default(),
    )
    .expect("multiplier 2.0");
    assert_eq!(base.printer_results[0].rate_g_per_h, 7.5);
    assert_eq!(doubled.printer_results[0].rate_g_per_h, 7.5);
    assert_close(
        "material unchanged",
        doubled.total_material_g,
        base.total_material_g,
        1e-12,
    );
}

#[test]
fn multiplier_scales_profile_rates() {
    let db = ProfileDb::default();
    let res = calculate(
        &db,
        &[row("bambu-p1s", 100.0)],
        Coefficients {
            rate_multiplier: 1.5,
            ..Coefficients::default()
        },
        None,
        EconomicOverrides::default(),
    )
    .expect("scaled");
    // 10 g/h × 1.5 = 15 g/h
    assert_close("rate", res.printer_results[0].rate_g_per_h, 15.0, 1e-12);
    assert_close("material", res.printer_results[0].material_g, 1500.0, 1e-9);
}

#[test]
fn printer_count_multiplies_consumption() {
    let db = ProfileDb::default();
    let single = row("bambu-a1-mini", 200.0);
    let mut farm = row("bambu-a1-mini", 200.0);
    farm.num_printers = 3;
    let one = calculate(
        &db,
        std::slice::from_ref(&single),
        Coefficients::default(),
        None,
        EconomicOverrides::default(),
    )
    .expect("one printer");
    let three = calculate(
        &db,
        std::slice::from_ref(&farm),
        Coefficients::default(),
        None,
        EconomicOverrides::default(),
    )
    .expect("three printers");
    assert_close(
        "material ×3",
        three.printer_results[0].material_g,
        one.printer_results[0].material_g * 3.0,
        1e-9,
    );
    assert_close(
        "purge ×3",
        three.printer_results[0].purge_g,
        one.printer_results[0].purge_g * 3.0,
        1e-9,
    );
}

#[test]
fn empty_rows_give_zero_report() {
    let db = ProfileDb::default();
    let res = calculate(
        &db,
        &[],
        Coefficients::default(),
        None,
        EconomicOverrides::default(),
    )
    .expect("empty report");
    assert_eq!(res.total_material_g, 0.0);
    assert_eq!(res.waste_g, 0.0);
    assert_eq!(res.in_use_g, 0.0);
    assert_eq!(res.percent_in_use, 0.0);
    assert_eq!(res.percent_waste, 0.0);
    assert_eq!(res.recycling.net_savings, 0.0);
}

#[test]
fn unknown_profile_is_reported() {
    let db = ProfileDb::default();
    let err = calculate(
        &db,
        &[row("ender-99", 10.0)],
        Coefficients::default(),
        None,
        EconomicOverrides::default(),
    )
    .expect_err("unknown profile must fail");
    assert_eq!(err, ReportError::UnknownProfile("ender-99".to_string()));
    assert!(err.to_string().contains("ender-99"));
}

#[test]
fn profile_lookup_accepts_display_name() {
    let db = ProfileDb::default();
    let res = calculate(
        &db,
        &[row("Bambu Lab P1S", 10.0)],
        Coefficients::default(),
        None,
        EconomicOverrides::default(),
    )
    .expect("name lookup");
    assert_eq!(res.printer_results[0].name, "Bambu Lab P1S");
}

#[test]
fn recycling_uses_final_waste_mass() {
    // 실측 1 kg 폐기 → PLA 기본값으로 0.41 kWh, 회수 0.95 kg, 순익 14.127.
    let db = ProfileDb::default();
    let res = calculate(
        &db,
        &[row("bambu-p1s", 635.0)],
        Coefficients::default(),
        Some(1000.0),
        EconomicOverrides::default(),
    )
    .expect("measured 1 kg");
    assert_close("energy", res.recycling.energy_kwh, 0.41, 1e-9);
    assert_close("reclaimed", res.recycling.reclaimed_kg, 0.95, 1e-9);
    assert_close("net", res.recycling.net_savings, 14.127, 1e-9);
}

#[test]
fn overrides_flow_into_recycling() {
    // 필라멘트 가격만 22로 올리면 회수 가치가 0.95×22 = 20.9가 된다.
    let db = ProfileDb::default();
    let res = calculate(
        &db,
        &[row("bambu-p1s", 635.0)],
        Coefficients::default(),
        Some(1000.0),
        EconomicOverrides {
            filament_cost_per_kg: Some(22.0),
            ..EconomicOverrides::default()
        },
    )
    .expect("overridden price");
    assert_close("value", res.recycling.reclaimed_value, 20.9, 1e-9);
    assert_close("net", res.recycling.net_savings, 20.9 - 0.123, 1e-9);
}

#[test]
fn repeated_calculation_is_identical() {
    let db = ProfileDb::default();
    let rows = [row("bambu-p1s", 635.0), row("bambu-a1-mini", 239.0)];
    let a = calculate(
        &db,
        &rows,
        Coefficients::default(),
        None,
        EconomicOverrides::default(),
    )
    .expect("first run");
    let b = calculate(
        &db,
        &rows,
        Coefficients::default(),
        None,
        EconomicOverrides::default(),
    )
    .expect("second run");
    assert_eq!(a, b);
}
