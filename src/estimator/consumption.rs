//! 출력 시간 기반 소재 소비량 추정.

use crate::profile_db::PurgeModel;

/// 누적 출력 시간에서 소재 소비량 [g]을 계산한다.
///
/// 소비율은 예열/캘리브레이션 오버헤드까지 포함한 유효 평균값 [g/h]이다.
pub fn material_consumed_g(hours: f64, rate_g_per_h: f64, num_printers: u32) -> f64 {
    hours * rate_g_per_h * num_printers as f64
}

/// 프린트 시작 횟수를 역산해 퍼지(노즐 프라임) 손실량 [g]을 계산한다.
///
/// 평균 작업 길이는 유효율/기본율 비에 비례한다고 본다. 비율이나 작업
/// 길이가 0 이하로 퇴화하면 0을 돌려준다.
pub fn purge_estimate_g(
    model: &PurgeModel,
    hours: f64,
    num_printers: u32,
    rate_g_per_h: f64,
    base_rate_g_per_h: f64,
) -> f64 {
    if rate_g_per_h <= 0.0 || base_rate_g_per_h <= 0.0 {
        return 0.0;
    }
    let job_duration_h = model.avg_print_duration_h * (rate_g_per_h / base_rate_g_per_h);
    if job_duration_h <= 0.0 {
        return 0.0;
    }
    let num_starts = hours * num_printers as f64 / job_duration_h;
    num_starts * model.purge_per_start_g
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile_db::ProfileDb;

    #[test]
    fn material_scales_linearly() {
        assert_eq!(material_consumed_g(10.0, 10.0, 1), 100.0);
        assert_eq!(material_consumed_g(10.0, 10.0, 3), 300.0);
        assert_eq!(material_consumed_g(0.0, 10.0, 5), 0.0);
    }

    #[test]
    fn purge_at_base_rate() {
        let db = ProfileDb::builtin();
        // 기본율 그대로면 작업 길이 2 h, 635 h → 317.5회 시작
        let g = purge_estimate_g(&db.purge, 635.0, 1, 10.0, 10.0);
        assert!((g - 317.5 * 0.35).abs() < 1e-9);
    }

    #[test]
    fn purge_degenerate_rates_are_zero() {
        let db = ProfileDb::builtin();
        assert_eq!(purge_estimate_g(&db.purge, 100.0, 1, 0.0, 10.0), 0.0);
        assert_eq!(purge_estimate_g(&db.purge, 100.0, 1, 10.0, 0.0), 0.0);
        assert_eq!(purge_estimate_g(&db.purge, 100.0, 1, -5.0, 10.0), 0.0);
    }

    #[test]
    fn slower_rate_means_more_starts() {
        let db = ProfileDb::builtin();
        // 유효율이 절반이면 작업 길이도 절반 → 시작 횟수 2배
        let base = purge_estimate_g(&db.purge, 100.0, 1, 10.0, 10.0);
        let half = purge_estimate_g(&db.purge, 100.0, 1, 5.0, 10.0);
        assert!((half - base * 2.0).abs() < 1e-9);
    }
}
