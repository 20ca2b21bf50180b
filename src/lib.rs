//! 핵심 계산 로직을 라이브러리로 분리하여 CLI와 GUI가 같은 엔진을 공유한다.

pub mod app;
pub mod config;
pub mod estimator;
pub mod i18n;
pub mod profile_db;
pub mod scenario;
pub mod ui_cli;
pub mod units;
