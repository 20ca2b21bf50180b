//! 재활용(분쇄+압출) 경제성 계산.

use serde::{Deserialize, Serialize};

use crate::profile_db::ProfileDb;

/// 경제성 계산에 실제로 들어가는 해석 완료 파라미터.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecyclingParams {
    /// 분쇄 에너지 [kWh/kg]
    pub shred_energy_kwh_per_kg: f64,
    /// 압출 에너지 [kWh/kg]
    pub extrude_energy_kwh_per_kg: f64,
    /// 전기 요금 [통화/kWh]
    pub electricity_cost_per_kwh: f64,
    /// 필라멘트 가격 [통화/kg]
    pub filament_cost_per_kg: f64,
    /// 재활용 공정 손실률 (0~1)
    pub process_loss: f64,
}

/// 사용자 단가 덮어쓰기. None인 필드는 참조 데이터 기본값을 쓴다.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EconomicOverrides {
    pub shred_energy_kwh_per_kg: Option<f64>,
    pub extrude_energy_kwh_per_kg: Option<f64>,
    pub electricity_cost_per_kwh: Option<f64>,
    pub filament_cost_per_kg: Option<f64>,
    pub process_loss: Option<f64>,
}

impl EconomicOverrides {
    /// 필드별로 덮어쓰기 값을 기본값에 겹쳐 최종 파라미터를 만든다.
    pub fn resolve(&self, db: &ProfileDb) -> RecyclingParams {
        RecyclingParams {
            shred_energy_kwh_per_kg: self
                .shred_energy_kwh_per_kg
                .unwrap_or(db.recycling.shred_energy_kwh_per_kg),
            extrude_energy_kwh_per_kg: self
                .extrude_energy_kwh_per_kg
                .unwrap_or(db.recycling.extrude_energy_kwh_per_kg),
            electricity_cost_per_kwh: self
                .electricity_cost_per_kwh
                .unwrap_or(db.recycling.electricity_cost_per_kwh),
            filament_cost_per_kg: self.filament_cost_per_kg.unwrap_or(db.material.cost_per_kg),
            process_loss: self.process_loss.unwrap_or(db.material.recyclability_loss),
        }
    }
}

/// 재활용 경제성 결과.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecyclingEconomics {
    /// 총 에너지 [kWh]
    pub energy_kwh: f64,
    /// 전기 비용 [통화]
    pub energy_cost: f64,
    /// 회수 필라멘트 [kg] (공정 손실 반영)
    pub reclaimed_kg: f64,
    /// 회수분의 새 스풀 대체 가치 [통화]
    pub reclaimed_value: f64,
    /// 순 절감액 [통화] (가치 − 전기 비용, 음수 가능)
    pub net_savings: f64,
}

/// 폐기량 [kg]을 재활용했을 때의 에너지/비용/절감액을 계산한다.
///
/// 장비 상각이나 인건비는 넣지 않는다. 전기 요금이 비싸고 폐기량이
/// 적으면 순 절감액이 음수로 나올 수 있고, 그대로 보고한다.
pub fn recycling_economics(waste_kg: f64, params: &RecyclingParams) -> RecyclingEconomics {
    let energy_kwh =
        waste_kg * (params.shred_energy_kwh_per_kg + params.extrude_energy_kwh_per_kg);
    let energy_cost = energy_kwh * params.electricity_cost_per_kwh;
    let reclaimed_kg = waste_kg * (1.0 - params.process_loss);
    let reclaimed_value = reclaimed_kg * params.filament_cost_per_kg;
    RecyclingEconomics {
        energy_kwh,
        energy_cost,
        reclaimed_kg,
        reclaimed_value,
        net_savings: reclaimed_value - energy_cost,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_params() -> RecyclingParams {
        EconomicOverrides::default().resolve(&ProfileDb::builtin())
    }

    #[test]
    fn one_kg_pla_default_params() {
        let e = recycling_economics(1.0, &default_params());
        assert!((e.energy_kwh - 0.41).abs() < 1e-9);
        assert!((e.energy_cost - 0.123).abs() < 1e-9);
        assert!((e.reclaimed_kg - 0.95).abs() < 1e-9);
        assert!((e.reclaimed_value - 14.25).abs() < 1e-9);
        assert!((e.net_savings - 14.127).abs() < 1e-9);
    }

    #[test]
    fn zero_waste_is_all_zero() {
        let e = recycling_economics(0.0, &default_params());
        assert_eq!(e.energy_kwh, 0.0);
        assert_eq!(e.energy_cost, 0.0);
        assert_eq!(e.reclaimed_kg, 0.0);
        assert_eq!(e.net_savings, 0.0);
    }

    #[test]
    fn expensive_electricity_can_go_negative() {
        let mut p = default_params();
        p.electricity_cost_per_kwh = 50.0;
        let e = recycling_economics(1.0, &p);
        assert!(e.net_savings < 0.0);
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let db = ProfileDb::builtin();
        let ov = EconomicOverrides {
            filament_cost_per_kg: Some(22.0),
            ..Default::default()
        };
        let p = ov.resolve(&db);
        assert_eq!(p.filament_cost_per_kg, 22.0);
        assert_eq!(p.shred_energy_kwh_per_kg, db.recycling.shred_energy_kwh_per_kg);
        assert_eq!(p.process_loss, db.material.recyclability_loss);
    }
}
