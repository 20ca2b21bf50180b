//! 프린터/소재/재활용 참조 데이터.
//! 값은 참고용 평균치이며 실제 장비/소재 실측으로 보정하는 것을 권장한다.

use serde::{Deserialize, Serialize};

/// 프린터 하드웨어 프로파일.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrinterProfile {
    /// 조회 키 (예: "bambu-p1s")
    pub key: String,
    /// 표시 이름
    pub name: String,
    /// 유효 평균 소비율 [g/h] (예열/캘리브레이션 오버헤드 포함)
    pub consumption_rate_g_per_h: f64,
    /// 출력 가능 체적 (표시 전용, 계산에는 쓰지 않는다)
    pub build_volume: String,
}

/// 소재 프로파일. 현재는 PLA 단일 항목이다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialProfile {
    pub name: String,
    /// 밀도 [g/cm³] (정보용)
    pub density_g_per_cm3: f64,
    /// 스풀 소매가 [통화/kg]
    pub cost_per_kg: f64,
    /// 재활용 1회당 소재 손실률 (0~1)
    pub recyclability_loss: f64,
}

/// 재활용 에너지 기본값.
/// 출처: Recyclebot 연구(Appropedia), Felfil Evo/3devo 사양.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecyclingDefaults {
    /// 데스크톱 분쇄기 에너지 [kWh/kg]
    pub shred_energy_kwh_per_kg: f64,
    /// 데스크톱 압출기 에너지 [kWh/kg]
    pub extrude_energy_kwh_per_kg: f64,
    /// 전기 요금 [통화/kWh] (EU 가정용 평균)
    pub electricity_cost_per_kwh: f64,
}

/// 퍼지 모델 상수. 프린트 시작마다 노즐 프라임으로 버려지는 양을 추정한다.
///
/// 시작 횟수는 출력 시간과 평균 작업 길이에서 역산하며, 평균 작업 길이는
/// 유효 소비율/기본율 비에 비례한다고 가정한다 (낮은 g/h = 작은 부품
/// = 짧은 작업 = 잦은 시작).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PurgeModel {
    /// 시작 1회당 퍼지량 [g] (Bambu 계열 실측 0.2~0.4 g)
    pub purge_per_start_g: f64,
    /// 기본율(×1.0) 기준 평균 작업 길이 [h]
    pub avg_print_duration_h: f64,
}

/// 엔진에 명시적으로 주입되는 읽기 전용 참조 데이터 묶음.
///
/// 전역 테이블 대신 값으로 넘겨서 테스트에서 합성 프로파일로 교체할 수 있다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileDb {
    pub printers: Vec<PrinterProfile>,
    pub material: MaterialProfile,
    pub recycling: RecyclingDefaults,
    pub purge: PurgeModel,
}

impl Default for ProfileDb {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ProfileDb {
    /// 내장 기본 테이블. 프린터 5종 + PLA + 재활용 기본값.
    pub fn builtin() -> Self {
        Self {
            printers: vec![
                printer("bambu-p1s", "Bambu Lab P1S", 10.0, "256×256×256 mm"),
                printer("bambu-a1-mini", "Bambu Lab A1 Mini", 8.0, "180×180×180 mm"),
                printer("generic-fast", "Generic Fast (Bambu/Prusa class)", 9.0, "varies"),
                printer("generic-standard", "Generic Standard (Ender class)", 6.0, "varies"),
                printer("custom", "Custom", 8.0, "user-defined"),
            ],
            material: MaterialProfile {
                name: "PLA".into(),
                density_g_per_cm3: 1.24,
                cost_per_kg: 15.0,
                recyclability_loss: 0.05,
            },
            recycling: RecyclingDefaults {
                shred_energy_kwh_per_kg: 0.17,
                extrude_energy_kwh_per_kg: 0.24,
                electricity_cost_per_kwh: 0.30,
            },
            purge: PurgeModel {
                purge_per_start_g: 0.35,
                avg_print_duration_h: 2.0,
            },
        }
    }

    /// 키 또는 표시 이름으로 프린터 프로파일을 찾는다 (대소문자 무시).
    pub fn find_printer(&self, key: &str) -> Option<&PrinterProfile> {
        self.printers
            .iter()
            .find(|p| p.key.eq_ignore_ascii_case(key) || p.name.eq_ignore_ascii_case(key))
    }
}

fn printer(key: &str, name: &str, rate_g_per_h: f64, build_volume: &str) -> PrinterProfile {
    PrinterProfile {
        key: key.into(),
        name: name.into(),
        consumption_rate_g_per_h: rate_g_per_h,
        build_volume: build_volume.into(),
    }
}
