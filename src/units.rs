//! 질량 단위 변환과 표시 포맷.

use serde::{Deserialize, Serialize};

/// 질량 단위. 엔진 내부 기준은 g이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MassUnit {
    Gram,
    Kilogram,
    Pound,
}

fn to_g(value: f64, unit: MassUnit) -> f64 {
    match unit {
        MassUnit::Gram => value,
        MassUnit::Kilogram => value * 1000.0,
        MassUnit::Pound => value * 453.592,
    }
}

fn from_g(value: f64, unit: MassUnit) -> f64 {
    match unit {
        MassUnit::Gram => value,
        MassUnit::Kilogram => value / 1000.0,
        MassUnit::Pound => value / 453.592,
    }
}

/// 질량을 변환한다.
pub fn convert_mass(value: f64, from: MassUnit, to: MassUnit) -> f64 {
    let base = to_g(value, from);
    from_g(base, to)
}

impl MassUnit {
    /// 입력 값을 엔진 기준 단위인 g으로 바꾼다.
    pub fn to_grams(&self, value: f64) -> f64 {
        to_g(value, *self)
    }

    pub fn label(&self) -> &'static str {
        match self {
            MassUnit::Gram => "g",
            MassUnit::Kilogram => "kg",
            MassUnit::Pound => "lb",
        }
    }
}

/// 질량 표시: 1 kg 이상이면 kg 소수 둘째 자리, 미만이면 g 정수.
pub fn format_grams(grams: f64) -> String {
    if grams >= 1000.0 {
        format!("{:.2} kg", grams / 1000.0)
    } else {
        format!("{grams:.0} g")
    }
}

/// 통화 표시: 기호 + 소수 둘째 자리.
pub fn format_currency(symbol: &str, amount: f64) -> String {
    format!("{symbol}{amount:.2}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mass_round_trip() {
        let v = convert_mass(2.5, MassUnit::Kilogram, MassUnit::Gram);
        assert!((v - 2500.0).abs() < 1e-9);
        let back = convert_mass(v, MassUnit::Gram, MassUnit::Kilogram);
        assert!((back - 2.5).abs() < 1e-9);
    }

    #[test]
    fn pound_to_grams() {
        assert!((MassUnit::Pound.to_grams(1.0) - 453.592).abs() < 1e-9);
    }

    #[test]
    fn grams_formatting_switches_at_one_kg() {
        assert_eq!(format_grams(999.4), "999 g");
        assert_eq!(format_grams(1000.0), "1.00 kg");
        assert_eq!(format_grams(6461.125), "6.46 kg");
    }

    #[test]
    fn currency_formatting() {
        assert_eq!(format_currency("€", 20.777), "€20.78");
        assert_eq!(format_currency("$", 0.0), "$0.00");
    }
}
