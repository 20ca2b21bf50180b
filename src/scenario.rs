//! 시나리오 파일(TOML) 로드/저장.
//!
//! 하나의 시나리오는 프린터 사용 행 목록과 계수, 선택적 실측 폐기량,
//! 선택적 단가 덮어쓰기를 담는다. 계수는 파일에서는 사람이 읽기 쉬운
//! 퍼센트로 다루고, 엔진에 넘길 때 0~1 비율로 바꾼다.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::estimator::{Coefficients, EconomicOverrides, PrinterUsageRow};

/// 퍼센트 단위 계수. UI 슬라이더와 시나리오 파일이 공유하는 표현이다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoefficientPercents {
    /// 실패/폐기 출력 비율 [%]
    pub discard_rate_pct: f64,
    /// 서포트 손실 비율 [%]
    pub support_ratio_pct: f64,
    /// 소비율 배율 [%] (100 = 프로파일 기본값 그대로)
    pub rate_multiplier_pct: f64,
}

impl Default for CoefficientPercents {
    fn default() -> Self {
        Self::from_coefficients(Coefficients::default())
    }
}

impl CoefficientPercents {
    pub fn to_coefficients(self) -> Coefficients {
        Coefficients {
            failure_rate: self.discard_rate_pct / 100.0,
            support_ratio: self.support_ratio_pct / 100.0,
            rate_multiplier: self.rate_multiplier_pct / 100.0,
        }
    }

    pub fn from_coefficients(c: Coefficients) -> Self {
        Self {
            discard_rate_pct: c.failure_rate * 100.0,
            support_ratio_pct: c.support_ratio * 100.0,
            rate_multiplier_pct: c.rate_multiplier * 100.0,
        }
    }
}

/// 저장 가능한 추정 시나리오.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scenario {
    /// 실측 폐기량 [kg]. 지정하면 계수 추정 대신 실측 모드로 계산한다.
    pub measured_waste_kg: Option<f64>,
    pub coefficients: CoefficientPercents,
    pub overrides: EconomicOverrides,
    #[serde(rename = "printer")]
    pub printers: Vec<PrinterUsageRow>,
}

impl Scenario {
    /// 실측 폐기량을 엔진 단위 [g]로 돌려준다.
    pub fn measured_waste_g(&self) -> Option<f64> {
        self.measured_waste_kg.map(|kg| kg * 1000.0)
    }

    /// 시나리오를 TOML 파일로 저장한다.
    pub fn save(&self, path: &Path) -> Result<(), ScenarioError> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}

/// TOML 파일에서 시나리오를 읽는다.
pub fn load(path: &Path) -> Result<Scenario, ScenarioError> {
    let content = fs::read_to_string(path)?;
    let scenario: Scenario = toml::from_str(&content)?;
    Ok(scenario)
}

/// 시나리오 로드/저장 시 발생 가능한 오류를 표현한다.
#[derive(Debug)]
pub enum ScenarioError {
    /// 파일 입출력 오류
    Io(std::io::Error),
    /// TOML 역직렬화 오류
    Parse(toml::de::Error),
    /// TOML 직렬화 오류
    Serialize(toml::ser::Error),
}

impl std::fmt::Display for ScenarioError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScenarioError::Io(e) => write!(f, "파일 입출력 오류: {e}"),
            ScenarioError::Parse(e) => write!(f, "시나리오 파싱 오류: {e}"),
            ScenarioError::Serialize(e) => write!(f, "시나리오 직렬화 오류: {e}"),
        }
    }
}

impl std::error::Error for ScenarioError {}

impl From<std::io::Error> for ScenarioError {
    fn from(value: std::io::Error) -> Self {
        ScenarioError::Io(value)
    }
}

impl From<toml::de::Error> for ScenarioError {
    fn from(value: toml::de::Error) -> Self {
        ScenarioError::Parse(value)
    }
}

impl From<toml::ser::Error> for ScenarioError {
    fn from(value: toml::ser::Error) -> Self {
        ScenarioError::Serialize(value)
    }
}
