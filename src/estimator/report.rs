//! 여러 프린터의 사용 행을 종합해 단일 리포트를 만든다.

use std::error::Error;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::estimator::consumption::{material_consumed_g, purge_estimate_g};
use crate::estimator::recycling::{recycling_economics, EconomicOverrides, RecyclingEconomics};
use crate::estimator::waste::{back_calculate_from_measured, estimate_waste};
use crate::profile_db::ProfileDb;

/// 리포트 입력 한 행: 프린터 1종 × 누적 출력 시간.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrinterUsageRow {
    /// 프로파일 키 또는 표시 이름
    pub profile_key: String,
    /// 누적 출력 시간 [h]
    pub hours: f64,
    /// 동일 기종 대수
    #[serde(default = "default_num_printers")]
    pub num_printers: u32,
    /// 실측 소비율 [g/h]. 지정하면 프로파일 기본율×배율 대신 쓴다.
    #[serde(default)]
    pub custom_rate_g_per_h: Option<f64>,
}

fn default_num_printers() -> u32 {
    1
}

/// 추정 계수. 전부 0~1 스케일의 비율이다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coefficients {
    /// 실패/폐기 출력 비율
    pub failure_rate: f64,
    /// 성공 출력의 서포트 손실 비율
    pub support_ratio: f64,
    /// 프로파일 기본율에 곱하는 소비율 배율
    pub rate_multiplier: f64,
}

impl Default for Coefficients {
    fn default() -> Self {
        // 커뮤니티 설문 기반 폐기율 43%, 서포트 8%
        Self {
            failure_rate: 0.43,
            support_ratio: 0.08,
            rate_multiplier: 1.0,
        }
    }
}

/// 프린터 행별 계산 결과.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrinterRowResult {
    pub name: String,
    pub hours: f64,
    pub num_printers: u32,
    /// 실제 적용된 소비율 [g/h]
    pub rate_g_per_h: f64,
    pub material_g: f64,
    pub purge_g: f64,
}

/// 폐기량 산정 방식. 실측치가 있으면 계수 추정을 완전히 대체한다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum WasteMode {
    /// 계수 기반 추정 (실패분/서포트분 내역 포함)
    Estimated { failed_g: f64, support_g: f64 },
    /// 실측 폐기량 역산 (내역 없음)
    Measured,
}

/// 종합 리포트.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    pub mode: WasteMode,
    pub printer_results: Vec<PrinterRowResult>,
    /// 총 소비량 (퍼지 포함) [g]
    pub total_material_g: f64,
    pub total_material_kg: f64,
    pub waste_g: f64,
    pub waste_kg: f64,
    /// 퍼지 손실 추정 [g]. Measured 모드에서는 실측치에 이미 포함된
    /// 것으로 보고 폐기량에 다시 더하지 않으며, 여기에는 참고용으로 남는다.
    pub purge_g: f64,
    pub in_use_g: f64,
    pub in_use_kg: f64,
    pub percent_in_use: f64,
    pub percent_waste: f64,
    /// 입력으로 쓴 계수를 그대로 돌려준다 (리포트 재현용)
    pub coefficients: Coefficients,
    pub recycling: RecyclingEconomics,
}

/// 리포트 계산 오류.
#[derive(Debug, Clone, PartialEq)]
pub enum ReportError {
    /// 참조 데이터에 없는 프린터 키
    UnknownProfile(String),
}

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportError::UnknownProfile(key) => {
                write!(f, "알 수 없는 프린터 프로파일: {key}")
            }
        }
    }
}

impl Error for ReportError {}

/// 사용 행 목록과 계수에서 종합 리포트를 계산한다.
///
/// `measured_waste_g`가 양수면 실측 모드: 폐기량을 실측치로 대체하고
/// 비율을 역산하며, 실패/서포트 내역과 퍼지 가산은 생략한다.
/// 그 외에는 계수 추정 모드로 퍼지를 폐기량에 합산한다.
pub fn calculate(
    db: &ProfileDb,
    rows: &[PrinterUsageRow],
    coefficients: Coefficients,
    measured_waste_g: Option<f64>,
    overrides: EconomicOverrides,
) -> Result<CalculationResult, ReportError> {
    let mut printer_results = Vec::with_capacity(rows.len());
    let mut material_total_g = 0.0;
    let mut purge_total_g = 0.0;

    for row in rows {
        let profile = db
            .find_printer(&row.profile_key)
            .ok_or_else(|| ReportError::UnknownProfile(row.profile_key.clone()))?;
        let base_rate = profile.consumption_rate_g_per_h;
        let rate = row
            .custom_rate_g_per_h
            .unwrap_or(base_rate * coefficients.rate_multiplier);
        let material_g = material_consumed_g(row.hours, rate, row.num_printers);
        let purge_g = purge_estimate_g(&db.purge, row.hours, row.num_printers, rate, base_rate);
        material_total_g += material_g;
        purge_total_g += purge_g;
        printer_results.push(PrinterRowResult {
            name: profile.name.clone(),
            hours: row.hours,
            num_printers: row.num_printers,
            rate_g_per_h: rate,
            material_g,
            purge_g,
        });
    }

    let grand_total_g = material_total_g + purge_total_g;

    let (mode, waste_g, in_use_g, percent_in_use, percent_waste) = match measured_waste_g {
        Some(measured) if measured > 0.0 => {
            // 실측 모드: 퍼지는 실측치에 포함된 것으로 보고 따로 더하지 않는다.
            // 실측치가 총량을 넘으면 실사용량은 음수로 흘러가고 비율만 잘린다.
            let split = back_calculate_from_measured(grand_total_g, measured);
            let in_use_g = grand_total_g - measured;
            (
                WasteMode::Measured,
                measured,
                in_use_g,
                split.percent_in_use,
                split.percent_waste,
            )
        }
        _ => {
            let est = estimate_waste(
                material_total_g,
                coefficients.failure_rate,
                coefficients.support_ratio,
            );
            // 퍼지는 항상 폐기량이다 (사용 가능한 출력물의 일부가 아니다)
            let waste_g = est.waste_g + purge_total_g;
            let (percent_in_use, percent_waste) = if grand_total_g > 0.0 {
                (
                    est.in_use_g / grand_total_g * 100.0,
                    waste_g / grand_total_g * 100.0,
                )
            } else {
                (0.0, 0.0)
            };
            (
                WasteMode::Estimated {
                    failed_g: est.failed_g,
                    support_g: est.support_g,
                },
                waste_g,
                est.in_use_g,
                percent_in_use,
                percent_waste,
            )
        }
    };

    let params = overrides.resolve(db);
    let recycling = recycling_economics(waste_g / 1000.0, &params);

    Ok(CalculationResult {
        mode,
        printer_results,
        total_material_g: grand_total_g,
        total_material_kg: grand_total_g / 1000.0,
        waste_g,
        waste_kg: waste_g / 1000.0,
        purge_g: purge_total_g,
        in_use_g,
        in_use_kg: in_use_g / 1000.0,
        percent_in_use,
        percent_waste,
        coefficients,
        recycling,
    })
}
