use std::collections::HashMap;
use std::fs;
use std::path::Path;
use sys_locale::get_locale;

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const ERROR_PREFIX: &str = "general.error_prefix";
    pub const APP_EXIT: &str = "general.app_exit";

    pub const MAIN_MENU_TITLE: &str = "main_menu.title";
    pub const MAIN_MENU_ESTIMATE: &str = "main_menu.estimate";
    pub const MAIN_MENU_PROFILES: &str = "main_menu.profiles";
    pub const MAIN_MENU_SCENARIO: &str = "main_menu.scenario";
    pub const MAIN_MENU_SETTINGS: &str = "main_menu.settings";
    pub const MAIN_MENU_EXIT: &str = "main_menu.exit";
    pub const PROMPT_MENU_SELECT: &str = "prompt.menu_select";
    pub const PROMPT_SELECT: &str = "prompt.select";
    pub const INVALID_SELECTION_RETRY: &str = "error.invalid_selection_retry";
    pub const ERROR_INVALID_NUMBER: &str = "error.invalid_number";

    pub const ESTIMATE_HEADING: &str = "estimate.heading";
    pub const ESTIMATE_AVAILABLE_PROFILES: &str = "estimate.available_profiles";
    pub const ESTIMATE_PROMPT_PROFILE: &str = "estimate.prompt_profile";
    pub const ESTIMATE_PROMPT_HOURS: &str = "estimate.prompt_hours";
    pub const ESTIMATE_PROMPT_NUM_PRINTERS: &str = "estimate.prompt_num_printers";
    pub const ESTIMATE_PROMPT_CUSTOM_RATE: &str = "estimate.prompt_custom_rate";
    pub const ESTIMATE_PROMPT_DISCARD: &str = "estimate.prompt_discard";
    pub const ESTIMATE_PROMPT_SUPPORT: &str = "estimate.prompt_support";
    pub const ESTIMATE_PROMPT_RATE_MULT: &str = "estimate.prompt_rate_mult";
    pub const ESTIMATE_PROMPT_MEASURED: &str = "estimate.prompt_measured";

    pub const REPORT_HEADING: &str = "report.heading";
    pub const REPORT_TOTAL: &str = "report.total";
    pub const REPORT_IN_USE: &str = "report.in_use";
    pub const REPORT_WASTE: &str = "report.waste";
    pub const REPORT_FAILED: &str = "report.failed";
    pub const REPORT_SUPPORT: &str = "report.support";
    pub const REPORT_PURGE: &str = "report.purge";
    pub const REPORT_MEASURED_NOTE: &str = "report.measured_note";
    pub const REPORT_PER_PRINTER: &str = "report.per_printer";
    pub const REPORT_EMPTY: &str = "report.empty";

    pub const RECYCLING_HEADING: &str = "recycling.heading";
    pub const RECYCLING_RECLAIMED: &str = "recycling.reclaimed";
    pub const RECYCLING_VALUE: &str = "recycling.value";
    pub const RECYCLING_ENERGY: &str = "recycling.energy";
    pub const RECYCLING_ENERGY_COST: &str = "recycling.energy_cost";
    pub const RECYCLING_NET: &str = "recycling.net";

    pub const PROFILES_HEADING: &str = "profiles.heading";
    pub const PROFILES_PRINTERS: &str = "profiles.printers";
    pub const PROFILES_MATERIAL: &str = "profiles.material";
    pub const PROFILES_RECYCLING: &str = "profiles.recycling";
    pub const PROFILES_PURGE: &str = "profiles.purge";

    pub const SCENARIO_HEADING: &str = "scenario.heading";
    pub const SCENARIO_OPTION_RUN: &str = "scenario.option_run";
    pub const SCENARIO_OPTION_TEMPLATE: &str = "scenario.option_template";
    pub const SCENARIO_PROMPT_PATH: &str = "scenario.prompt_path";
    pub const SCENARIO_SAVED: &str = "scenario.saved";

    pub const SETTINGS_HEADING: &str = "settings.heading";
    pub const SETTINGS_CURRENT_LANGUAGE: &str = "settings.current_language";
    pub const SETTINGS_LANGUAGE_OPTIONS: &str = "settings.language_options";
    pub const SETTINGS_PROMPT_CHANGE: &str = "settings.prompt_change";
    pub const SETTINGS_CURRENT_CURRENCY: &str = "settings.current_currency";
    pub const SETTINGS_PROMPT_CURRENCY: &str = "settings.prompt_currency";
    pub const SETTINGS_INVALID: &str = "settings.invalid";
    pub const SETTINGS_SAVED: &str = "settings.saved";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Ko,
    En,
}

impl Language {
    fn from_code(code: &str) -> Self {
        let c = code.to_lowercase();
        if c.starts_with("en") {
            Language::En
        } else {
            Language::Ko
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Language::Ko => "ko",
            Language::En => "en",
        }
    }
}

/// 런타임 언어 번들을 제공한다.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Language,
    overrides: Option<HashMap<String, String>>,
}

impl Translator {
    /// 언어 코드(ko/en)에 따라 번역기를 생성한다. 알 수 없는 코드는 ko로 폴백한다.
    pub fn new(lang_code: &str) -> Self {
        Self {
            lang: Language::from_code(lang_code),
            overrides: None,
        }
    }

    /// 언어 코드 + 언어팩 디렉터리(locales/ 등)를 받아서 번역기를 생성한다.
    /// 디렉터리가 없거나 파일이 없으면 내장 문자열만 사용한다.
    pub fn new_with_pack(lang_code: &str, pack_dir: Option<&str>) -> Self {
        let overrides = pack_dir
            .and_then(|dir| load_overrides(dir, lang_code))
            .or_else(|| load_overrides("locales", lang_code))
            .or_else(|| built_in_pack(lang_code));
        Self {
            lang: Language::from_code(lang_code),
            overrides,
        }
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    pub fn language_code(&self) -> &'static str {
        self.lang.as_code()
    }

    /// 키를 조회해 문자열을 반환한다. 언어팩에 없으면 None.
    pub fn lookup(&self, key: &str) -> Option<String> {
        self.overrides
            .as_ref()
            .and_then(|m| m.get(key).cloned())
    }

    /// 번역을 가져온다. 영어 번역이 없으면 한국어 문자열을 폴백한다.
    pub fn t(&self, key: &str) -> &'static str {
        if let Some(ref map) = self.overrides {
            if let Some(v) = map.get(key) {
                return Box::leak(v.clone().into_boxed_str());
            }
        }
        match self.lang {
            Language::En => en(key).unwrap_or_else(|| ko(key)),
            Language::Ko => ko(key),
        }
    }
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: &str, config_lang: Option<&str>) -> String {
    normalize_lang(cli_arg)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "en-us".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "ko" => Some("ko".into()),
        "ko-kr" => Some("ko-kr".into()),
        "en" => Some("en".into()),
        "en-us" => Some("en-us".into()),
        "auto" | "" => None,
        other if other.starts_with("ko") => Some("ko".into()),
        other if other.starts_with("en") => Some("en-us".into()),
        _ => None,
    }
}

fn normalize_locale_string(loc: &str) -> Option<String> {
    let lang = loc
        .split(['.', '_', '-'])
        .next()
        .unwrap_or_default()
        .to_lowercase();
    match lang.as_str() {
        "ko" => Some("ko".into()),
        "en" => Some("en".into()),
        _ => None,
    }
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<String> {
    if let Some(loc) = get_locale() {
        if let Some(lang) = normalize_locale_string(&loc) {
            return Some(lang);
        }
    }
    if let Ok(lang) = std::env::var("LANG") {
        if let Some(code) = normalize_locale_string(&lang) {
            return Some(code);
        }
    }
    if let Ok(lang) = std::env::var("LC_ALL") {
        if let Some(code) = normalize_locale_string(&lang) {
            return Some(code);
        }
    }
    None
}

/// TOML 기반 언어팩을 로드한다. 형식: key = "value" 로 구성된 플랫 맵.
fn load_overrides(dir: &str, lang: &str) -> Option<HashMap<String, String>> {
    let try_load = |code: &str| -> Option<HashMap<String, String>> {
        let path = Path::new(dir).join(format!("{code}.toml"));
        let content = fs::read_to_string(path).ok()?;
        parse_toml_to_map(&content)
    };

    // 1) full code (e.g., en-us)
    if let Some(map) = try_load(lang) {
        return Some(map);
    }
    // 2) base code (e.g., en)
    if let Some((base, _)) = lang.split_once(['-', '_']) {
        if let Some(map) = try_load(base) {
            return Some(map);
        }
    }
    None
}

fn parse_toml_to_map(src: &str) -> Option<HashMap<String, String>> {
    let value: toml::Value = toml::from_str(src).ok()?;
    let table = value.as_table()?;
    let mut map = HashMap::new();

    fn walk(prefix: &str, val: &toml::Value, out: &mut HashMap<String, String>) {
        match val {
            toml::Value::String(s) => {
                out.insert(prefix.to_string(), s.to_string());
            }
            toml::Value::Table(t) => {
                for (k, v) in t {
                    let key = if prefix.is_empty() {
                        k.clone()
                    } else {
                        format!("{prefix}.{k}")
                    };
                    walk(&key, v, out);
                }
            }
            _ => {}
        }
    }

    for (k, v) in table {
        walk(k, v, &mut map);
    }

    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

/// 내장 언어팩(파일이 없어도 동작하도록 빌드 시 포함).
fn built_in_pack(lang: &str) -> Option<HashMap<String, String>> {
    match lang.to_lowercase().as_str() {
        "en-us" | "en" => parse_toml_to_map(include_str!("../locales/en-us.toml")),
        "ko-kr" | "ko" => parse_toml_to_map(include_str!("../locales/ko-kr.toml")),
        _ => None,
    }
}

fn ko(key: &str) -> &'static str {
    use keys::*;
    match key {
        ERROR_PREFIX => "오류",
        APP_EXIT => "프로그램을 종료합니다.",
        MAIN_MENU_TITLE => "\n=== Filament Usage & Recycling Toolbox ===",
        MAIN_MENU_ESTIMATE => "1) 사용량/폐기량 추정",
        MAIN_MENU_PROFILES => "2) 프로파일 보기",
        MAIN_MENU_SCENARIO => "3) 시나리오 파일",
        MAIN_MENU_SETTINGS => "4) 설정",
        MAIN_MENU_EXIT => "0) 종료",
        PROMPT_MENU_SELECT => "메뉴 선택: ",
        PROMPT_SELECT => "선택: ",
        INVALID_SELECTION_RETRY => "잘못된 입력입니다. 다시 선택하세요.",
        ERROR_INVALID_NUMBER => "숫자를 입력하세요.",
        ESTIMATE_HEADING => "\n-- 사용량/폐기량 추정 --",
        ESTIMATE_AVAILABLE_PROFILES => "사용 가능한 프린터 프로파일:",
        ESTIMATE_PROMPT_PROFILE => "프린터 프로파일 키 (빈 입력 = 입력 종료): ",
        ESTIMATE_PROMPT_HOURS => "누적 출력 시간 [h]: ",
        ESTIMATE_PROMPT_NUM_PRINTERS => "동일 기종 대수 (기본 1): ",
        ESTIMATE_PROMPT_CUSTOM_RATE => "실측 소비율 [g/h] (0 = 프로파일 기본값×배율): ",
        ESTIMATE_PROMPT_DISCARD => "실패/폐기 출력 비율 [%] (기본 43): ",
        ESTIMATE_PROMPT_SUPPORT => "서포트/라프트 비율 [%] (기본 8): ",
        ESTIMATE_PROMPT_RATE_MULT => "소비율 배율 [%] (기본 100): ",
        ESTIMATE_PROMPT_MEASURED => "실측 폐기량 (0 = 계수로 추정)",
        REPORT_HEADING => "\n===== 추정 결과 =====",
        REPORT_TOTAL => "총 소비량 (퍼지 포함):",
        REPORT_IN_USE => "실사용:",
        REPORT_WASTE => "폐기:",
        REPORT_FAILED => "실패/폐기 출력:",
        REPORT_SUPPORT => "서포트/라프트/브림:",
        REPORT_PURGE => "퍼지 (노즐 프라임):",
        REPORT_MEASURED_NOTE => "실측 폐기량 기준입니다 (실패/서포트 내역 없음, 퍼지 포함).",
        REPORT_PER_PRINTER => "프린터별 내역:",
        REPORT_EMPTY => "입력된 사용량이 없습니다.",
        RECYCLING_HEADING => "재활용 경제성 (분쇄 + 압출):",
        RECYCLING_RECLAIMED => "회수 필라멘트:",
        RECYCLING_VALUE => "소재 가치 (소매가 기준):",
        RECYCLING_ENERGY => "분쇄+압출 에너지:",
        RECYCLING_ENERGY_COST => "전기 비용:",
        RECYCLING_NET => "순 절감액:",
        PROFILES_HEADING => "\n-- 프로파일 --",
        PROFILES_PRINTERS => "프린터:",
        PROFILES_MATERIAL => "소재:",
        PROFILES_RECYCLING => "재활용 기본값:",
        PROFILES_PURGE => "퍼지 모델:",
        SCENARIO_HEADING => "\n-- 시나리오 파일 --",
        SCENARIO_OPTION_RUN => "1) 시나리오 불러와서 계산",
        SCENARIO_OPTION_TEMPLATE => "2) 시작용 템플릿 저장",
        SCENARIO_PROMPT_PATH => "파일 경로: ",
        SCENARIO_SAVED => "시나리오를 저장했습니다:",
        SETTINGS_HEADING => "\n-- 설정 --",
        SETTINGS_CURRENT_LANGUAGE => "현재 언어:",
        SETTINGS_LANGUAGE_OPTIONS => "1) 한국어  2) English",
        SETTINGS_PROMPT_CHANGE => "변경할 번호(취소하려면 엔터): ",
        SETTINGS_CURRENT_CURRENCY => "통화 기호:",
        SETTINGS_PROMPT_CURRENCY => "새 통화 기호(유지하려면 엔터): ",
        SETTINGS_INVALID => "잘못된 입력이므로 변경하지 않습니다.",
        SETTINGS_SAVED => "설정이 저장되었습니다.",
        _ => "[missing translation]",
    }
}

fn en(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "Error",
        APP_EXIT => "Exiting application.",
        MAIN_MENU_TITLE => "\n=== Filament Usage & Recycling Toolbox ===",
        MAIN_MENU_ESTIMATE => "1) Usage & waste estimate",
        MAIN_MENU_PROFILES => "2) View profiles",
        MAIN_MENU_SCENARIO => "3) Scenario files",
        MAIN_MENU_SETTINGS => "4) Settings",
        MAIN_MENU_EXIT => "0) Exit",
        PROMPT_MENU_SELECT => "Select menu: ",
        PROMPT_SELECT => "Select: ",
        INVALID_SELECTION_RETRY => "Invalid input. Please try again.",
        ERROR_INVALID_NUMBER => "Please enter a number.",
        ESTIMATE_HEADING => "\n-- Usage & Waste Estimate --",
        ESTIMATE_AVAILABLE_PROFILES => "Available printer profiles:",
        ESTIMATE_PROMPT_PROFILE => "Printer profile key (empty = done adding rows): ",
        ESTIMATE_PROMPT_HOURS => "Total print hours [h]: ",
        ESTIMATE_PROMPT_NUM_PRINTERS => "Number of identical printers (default 1): ",
        ESTIMATE_PROMPT_CUSTOM_RATE => "Measured rate [g/h] (0 = profile base × multiplier): ",
        ESTIMATE_PROMPT_DISCARD => "Discarded prints [%] (default 43): ",
        ESTIMATE_PROMPT_SUPPORT => "Support/raft share [%] (default 8): ",
        ESTIMATE_PROMPT_RATE_MULT => "Rate multiplier [%] (default 100): ",
        ESTIMATE_PROMPT_MEASURED => "Measured waste (0 = estimate from coefficients)",
        REPORT_HEADING => "\n===== Estimate =====",
        REPORT_TOTAL => "Total filament used (incl. purge):",
        REPORT_IN_USE => "In use:",
        REPORT_WASTE => "Waste:",
        REPORT_FAILED => "Discarded prints (failures + iterations):",
        REPORT_SUPPORT => "Supports / rafts / brims:",
        REPORT_PURGE => "Purge (nozzle prime per print):",
        REPORT_MEASURED_NOTE => "Based on measured waste (no failure/support breakdown; purge included).",
        REPORT_PER_PRINTER => "Per-printer breakdown:",
        REPORT_EMPTY => "No usage entered.",
        RECYCLING_HEADING => "Recycling economics (shred + extrude):",
        RECYCLING_RECLAIMED => "Reclaimed filament:",
        RECYCLING_VALUE => "Filament value (at retail):",
        RECYCLING_ENERGY => "Shredding + extrusion energy:",
        RECYCLING_ENERGY_COST => "Energy cost:",
        RECYCLING_NET => "Net savings (scrap value):",
        PROFILES_HEADING => "\n-- Profiles --",
        PROFILES_PRINTERS => "Printers:",
        PROFILES_MATERIAL => "Material:",
        PROFILES_RECYCLING => "Recycling defaults:",
        PROFILES_PURGE => "Purge model:",
        SCENARIO_HEADING => "\n-- Scenario Files --",
        SCENARIO_OPTION_RUN => "1) Load a scenario and calculate",
        SCENARIO_OPTION_TEMPLATE => "2) Save a starter template",
        SCENARIO_PROMPT_PATH => "File path: ",
        SCENARIO_SAVED => "Scenario saved:",
        SETTINGS_HEADING => "\n-- Settings --",
        SETTINGS_CURRENT_LANGUAGE => "Current language:",
        SETTINGS_LANGUAGE_OPTIONS => "1) Korean  2) English",
        SETTINGS_PROMPT_CHANGE => "Enter number to change (enter to cancel): ",
        SETTINGS_CURRENT_CURRENCY => "Currency symbol:",
        SETTINGS_PROMPT_CURRENCY => "New currency symbol (enter to keep): ",
        SETTINGS_INVALID => "Invalid input; nothing changed.",
        SETTINGS_SAVED => "Settings saved.",
        _ => return None,
    })
}
