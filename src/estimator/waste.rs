//! 폐기량 분해와 실측치 역산.

use serde::{Deserialize, Serialize};

/// 계수 기반 폐기량 분해 결과. 모든 값은 [g].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WasteEstimate {
    /// 실패 출력으로 버려진 양
    pub failed_g: f64,
    /// 성공 출력의 서포트/브림/스커트 손실
    pub support_g: f64,
    /// 폐기 합계 (failed + support)
    pub waste_g: f64,
    /// 실사용분 (성공 출력에서 서포트를 뺀 나머지)
    pub in_use_g: f64,
}

/// 실측 폐기량을 소비 총량에 대입해 역산한 비율.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeasuredSplit {
    /// 실사용 비율 [%] (0 미만으로 내려가지 않는다)
    pub percent_in_use: f64,
    /// 폐기 비율 [%] (100을 넘지 않는다)
    pub percent_waste: f64,
}

/// 소비 총량을 실패분/서포트분/실사용분으로 나눈다.
///
/// 실패율을 먼저 떼고, 남은 성공분에 서포트 비율을 적용하는 2단계 분해다.
pub fn estimate_waste(total_g: f64, failure_rate: f64, support_ratio: f64) -> WasteEstimate {
    let failed_g = total_g * failure_rate;
    let successful_g = total_g * (1.0 - failure_rate);
    let support_g = successful_g * support_ratio;
    let in_use_g = successful_g - support_g;
    WasteEstimate {
        failed_g,
        support_g,
        waste_g: failed_g + support_g,
        in_use_g,
    }
}

/// 실측 폐기량에서 실사용/폐기 비율을 역산한다.
///
/// 총량이 0 이하면 둘 다 0을 돌려준다. 실측치가 총량을 넘어도 비율은
/// 0~100 범위로 잘라낸다 (입력 실수 방어).
pub fn back_calculate_from_measured(total_g: f64, measured_waste_g: f64) -> MeasuredSplit {
    if total_g <= 0.0 {
        return MeasuredSplit {
            percent_in_use: 0.0,
            percent_waste: 0.0,
        };
    }
    let percent_waste = (measured_waste_g / total_g * 100.0).min(100.0);
    let percent_in_use = (100.0 - percent_waste).max(0.0);
    MeasuredSplit {
        percent_in_use,
        percent_waste,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_conserves_total() {
        let w = estimate_waste(1000.0, 0.43, 0.08);
        assert!((w.failed_g + w.support_g + w.in_use_g - 1000.0).abs() < 1e-9);
        assert!((w.waste_g - (w.failed_g + w.support_g)).abs() < 1e-9);
    }

    #[test]
    fn zero_rates_mean_all_in_use() {
        let w = estimate_waste(500.0, 0.0, 0.0);
        assert_eq!(w.failed_g, 0.0);
        assert_eq!(w.support_g, 0.0);
        assert_eq!(w.in_use_g, 500.0);
    }

    #[test]
    fn full_failure_means_no_support() {
        // 전량 실패면 성공분이 없어 서포트 손실도 없다
        let w = estimate_waste(500.0, 1.0, 0.08);
        assert_eq!(w.failed_g, 500.0);
        assert_eq!(w.support_g, 0.0);
        assert_eq!(w.in_use_g, 0.0);
    }

    #[test]
    fn waste_grows_with_each_coefficient() {
        let base = estimate_waste(1000.0, 0.43, 0.08);
        let more_failures = estimate_waste(1000.0, 0.50, 0.08);
        let more_support = estimate_waste(1000.0, 0.43, 0.12);
        assert!(more_failures.waste_g > base.waste_g);
        assert!(more_support.waste_g > base.waste_g);
        assert!(more_failures.in_use_g < base.in_use_g);
        assert!(more_support.in_use_g < base.in_use_g);
    }

    #[test]
    fn back_calc_zero_total() {
        let s = back_calculate_from_measured(0.0, 250.0);
        assert_eq!(s.percent_in_use, 0.0);
        assert_eq!(s.percent_waste, 0.0);
    }

    #[test]
    fn back_calc_clamps_excess_measurement() {
        let s = back_calculate_from_measured(100.0, 250.0);
        assert_eq!(s.percent_waste, 100.0);
        assert_eq!(s.percent_in_use, 0.0);
    }
}
