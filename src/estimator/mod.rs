//! 필라멘트 사용량/폐기량/재활용 추정 모듈 모음.
//!
//! 모든 계산 함수는 순수 함수다: 참조 데이터를 값으로 받고, 입력만으로
//! 결과가 결정되며, 전역 상태를 읽거나 쓰지 않는다.

pub mod consumption;
pub mod recycling;
pub mod report;
pub mod waste;

pub use consumption::{material_consumed_g, purge_estimate_g};
pub use recycling::{recycling_economics, EconomicOverrides, RecyclingEconomics, RecyclingParams};
pub use report::{
    calculate, CalculationResult, Coefficients, PrinterRowResult, PrinterUsageRow, ReportError,
    WasteMode,
};
pub use waste::{back_calculate_from_measured, estimate_waste, MeasuredSplit, WasteEstimate};
