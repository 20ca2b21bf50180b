use std::io::{self, Write};
use std::path::Path;

use crate::app::AppError;
use crate::config::Config;
use crate::estimator::{self, CalculationResult, PrinterUsageRow, WasteMode};
use crate::i18n::{keys, Translator};
use crate::profile_db::ProfileDb;
use crate::scenario::{self, CoefficientPercents, Scenario};
use crate::units::{format_currency, format_grams};

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Estimate,
    Profiles,
    Scenario,
    Settings,
    Exit,
}

/// 메인 메뉴를 표시하고 선택값을 반환한다.
pub fn main_menu(tr: &Translator) -> Result<MenuChoice, AppError> {
    println!("{}", tr.t(keys::MAIN_MENU_TITLE));
    println!("{}", tr.t(keys::MAIN_MENU_ESTIMATE));
    println!("{}", tr.t(keys::MAIN_MENU_PROFILES));
    println!("{}", tr.t(keys::MAIN_MENU_SCENARIO));
    println!("{}", tr.t(keys::MAIN_MENU_SETTINGS));
    println!("{}", tr.t(keys::MAIN_MENU_EXIT));
    loop {
        let sel = read_line(tr.t(keys::PROMPT_MENU_SELECT))?;
        match sel.trim() {
            "1" => return Ok(MenuChoice::Estimate),
            "2" => return Ok(MenuChoice::Profiles),
            "3" => return Ok(MenuChoice::Scenario),
            "4" => return Ok(MenuChoice::Settings),
            "0" => return Ok(MenuChoice::Exit),
            _ => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

/// 사용량/폐기량 추정 메뉴를 처리한다.
pub fn handle_estimate(tr: &Translator, cfg: &Config, db: &ProfileDb) -> Result<(), AppError> {
    println!("{}", tr.t(keys::ESTIMATE_HEADING));
    println!("{}", tr.t(keys::ESTIMATE_AVAILABLE_PROFILES));
    for p in &db.printers {
        println!(
            "  {}: {} ({} g/h, {})",
            p.key, p.name, p.consumption_rate_g_per_h, p.build_volume
        );
    }

    let mut rows: Vec<PrinterUsageRow> = Vec::new();
    loop {
        let key = read_line(tr.t(keys::ESTIMATE_PROMPT_PROFILE))?;
        let key = key.trim();
        if key.is_empty() {
            break;
        }
        let profile = match db.find_printer(key) {
            Some(p) => p,
            None => {
                println!("{}", tr.t(keys::INVALID_SELECTION_RETRY));
                continue;
            }
        };
        let hours = read_f64(tr, tr.t(keys::ESTIMATE_PROMPT_HOURS))?;
        let num = read_f64_default(tr, tr.t(keys::ESTIMATE_PROMPT_NUM_PRINTERS), 1.0)?;
        let custom = read_f64_default(tr, tr.t(keys::ESTIMATE_PROMPT_CUSTOM_RATE), 0.0)?;
        rows.push(PrinterUsageRow {
            profile_key: profile.key.clone(),
            hours,
            num_printers: num.max(1.0) as u32,
            custom_rate_g_per_h: if custom > 0.0 { Some(custom) } else { None },
        });
    }

    let percents = CoefficientPercents {
        discard_rate_pct: read_f64_default(tr, tr.t(keys::ESTIMATE_PROMPT_DISCARD), 43.0)?,
        support_ratio_pct: read_f64_default(tr, tr.t(keys::ESTIMATE_PROMPT_SUPPORT), 8.0)?,
        rate_multiplier_pct: read_f64_default(tr, tr.t(keys::ESTIMATE_PROMPT_RATE_MULT), 100.0)?,
    };

    let unit = cfg.measured_waste_unit;
    let measured_prompt = format!("{} [{}]: ", tr.t(keys::ESTIMATE_PROMPT_MEASURED), unit.label());
    let measured = read_f64_default(tr, &measured_prompt, 0.0)?;
    let measured_g = if measured > 0.0 {
        Some(unit.to_grams(measured))
    } else {
        None
    };

    let result = estimator::calculate(
        db,
        &rows,
        percents.to_coefficients(),
        measured_g,
        Default::default(),
    )?;
    print!("{}", render_report(tr, cfg, &result));
    Ok(())
}

/// 내장 프로파일 목록을 출력한다.
pub fn handle_profiles(tr: &Translator, cfg: &Config, db: &ProfileDb) -> Result<(), AppError> {
    println!("{}", tr.t(keys::PROFILES_HEADING));
    println!("{}", tr.t(keys::PROFILES_PRINTERS));
    for p in &db.printers {
        println!(
            "  {}: {} — {} g/h, {}",
            p.key, p.name, p.consumption_rate_g_per_h, p.build_volume
        );
    }
    let cur = cfg.currency_symbol.as_str();
    let m = &db.material;
    println!("{}", tr.t(keys::PROFILES_MATERIAL));
    println!(
        "  {} — {} g/cm³, {}/kg, {:.0}%",
        m.name,
        m.density_g_per_cm3,
        format_currency(cur, m.cost_per_kg),
        m.recyclability_loss * 100.0
    );
    let r = &db.recycling;
    println!("{}", tr.t(keys::PROFILES_RECYCLING));
    println!(
        "  {} + {} kWh/kg, {}/kWh",
        r.shred_energy_kwh_per_kg,
        r.extrude_energy_kwh_per_kg,
        format_currency(cur, r.electricity_cost_per_kwh)
    );
    println!("{}", tr.t(keys::PROFILES_PURGE));
    println!(
        "  {} g × (h / {} h)",
        db.purge.purge_per_start_g, db.purge.avg_print_duration_h
    );
    Ok(())
}

/// 시나리오 파일 메뉴를 처리한다.
pub fn handle_scenario(tr: &Translator, cfg: &Config, db: &ProfileDb) -> Result<(), AppError> {
    println!("{}", tr.t(keys::SCENARIO_HEADING));
    println!("{}", tr.t(keys::SCENARIO_OPTION_RUN));
    println!("{}", tr.t(keys::SCENARIO_OPTION_TEMPLATE));
    let sel = read_line(tr.t(keys::PROMPT_SELECT))?;
    match sel.trim() {
        "1" => {
            let path = read_line(tr.t(keys::SCENARIO_PROMPT_PATH))?;
            let sc = scenario::load(Path::new(path.trim()))?;
            let result = estimator::calculate(
                db,
                &sc.printers,
                sc.coefficients.to_coefficients(),
                sc.measured_waste_g(),
                sc.overrides,
            )?;
            print!("{}", render_report(tr, cfg, &result));
        }
        "2" => {
            let path = read_line(tr.t(keys::SCENARIO_PROMPT_PATH))?;
            let template = starter_scenario();
            template.save(Path::new(path.trim()))?;
            println!("{} {}", tr.t(keys::SCENARIO_SAVED), path.trim());
        }
        _ => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
    }
    Ok(())
}

/// 설정 메뉴를 처리한다.
pub fn handle_settings(tr: &Translator, cfg: &mut Config) -> Result<(), AppError> {
    println!("{}", tr.t(keys::SETTINGS_HEADING));
    println!("{} {}", tr.t(keys::SETTINGS_CURRENT_LANGUAGE), cfg.language);
    println!("{}", tr.t(keys::SETTINGS_LANGUAGE_OPTIONS));
    let sel = read_line(tr.t(keys::SETTINGS_PROMPT_CHANGE))?;
    match sel.trim() {
        "" => {}
        "1" => cfg.language = "ko-kr".to_string(),
        "2" => cfg.language = "en-us".to_string(),
        _ => println!("{}", tr.t(keys::SETTINGS_INVALID)),
    }
    println!(
        "{} {}",
        tr.t(keys::SETTINGS_CURRENT_CURRENCY),
        cfg.currency_symbol
    );
    let cur = read_line(tr.t(keys::SETTINGS_PROMPT_CURRENCY))?;
    if !cur.trim().is_empty() {
        cfg.currency_symbol = cur.trim().to_string();
    }
    println!("{}", tr.t(keys::SETTINGS_SAVED));
    Ok(())
}

/// 계산 결과를 사람이 읽을 리포트 문자열로 만든다. CLI와 배치 모드가 공유한다.
pub fn render_report(tr: &Translator, cfg: &Config, result: &CalculationResult) -> String {
    let cur = cfg.currency_symbol.as_str();
    let mut out = String::new();
    out.push_str(tr.t(keys::REPORT_HEADING));
    out.push('\n');

    if result.total_material_g <= 0.0 {
        out.push_str(tr.t(keys::REPORT_EMPTY));
        out.push('\n');
        return out;
    }

    out.push_str(&format!(
        "{} {}\n",
        tr.t(keys::REPORT_TOTAL),
        format_grams(result.total_material_g)
    ));
    out.push_str(&format!(
        "{} {} ({:.1}%)\n",
        tr.t(keys::REPORT_IN_USE),
        format_grams(result.in_use_g),
        result.percent_in_use
    ));
    out.push_str(&format!(
        "{} {} ({:.1}%)\n",
        tr.t(keys::REPORT_WASTE),
        format_grams(result.waste_g),
        result.percent_waste
    ));
    match result.mode {
        WasteMode::Estimated { failed_g, support_g } => {
            out.push_str(&format!(
                "  {} {}\n",
                tr.t(keys::REPORT_FAILED),
                format_grams(failed_g)
            ));
            out.push_str(&format!(
                "  {} {}\n",
                tr.t(keys::REPORT_SUPPORT),
                format_grams(support_g)
            ));
            out.push_str(&format!(
                "  {} {}\n",
                tr.t(keys::REPORT_PURGE),
                format_grams(result.purge_g)
            ));
        }
        WasteMode::Measured => {
            out.push_str(&format!("  {}\n", tr.t(keys::REPORT_MEASURED_NOTE)));
        }
    }

    let rec = &result.recycling;
    out.push_str(&format!("{}\n", tr.t(keys::RECYCLING_HEADING)));
    out.push_str(&format!(
        "  {} {:.2} kg\n",
        tr.t(keys::RECYCLING_RECLAIMED),
        rec.reclaimed_kg
    ));
    out.push_str(&format!(
        "  {} {}\n",
        tr.t(keys::RECYCLING_VALUE),
        format_currency(cur, rec.reclaimed_value)
    ));
    out.push_str(&format!(
        "  {} {:.3} kWh\n",
        tr.t(keys::RECYCLING_ENERGY),
        rec.energy_kwh
    ));
    out.push_str(&format!(
        "  {} {}\n",
        tr.t(keys::RECYCLING_ENERGY_COST),
        format_currency(cur, rec.energy_cost)
    ));
    out.push_str(&format!(
        "  {} {}\n",
        tr.t(keys::RECYCLING_NET),
        format_currency(cur, rec.net_savings)
    ));

    out.push_str(&format!("{}\n", tr.t(keys::REPORT_PER_PRINTER)));
    for p in result.printer_results.iter().filter(|p| p.material_g > 0.0) {
        out.push_str(&format!(
            "  {}: {} h × {} × {:.1} g/h = {} (+{})\n",
            p.name,
            p.hours,
            p.num_printers,
            p.rate_g_per_h,
            format_grams(p.material_g),
            format_grams(p.purge_g)
        ));
    }
    out
}

/// CLI 초기값과 같은 구성의 시작용 시나리오.
fn starter_scenario() -> Scenario {
    Scenario {
        printers: vec![
            PrinterUsageRow {
                profile_key: "bambu-p1s".to_string(),
                hours: 635.0,
                num_printers: 1,
                custom_rate_g_per_h: None,
            },
            PrinterUsageRow {
                profile_key: "bambu-a1-mini".to_string(),
                hours: 239.0,
                num_printers: 1,
                custom_rate_g_per_h: None,
            },
        ],
        ..Default::default()
    }
}

fn read_line(prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush().map_err(AppError::Io)?;
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).map_err(AppError::Io)?;
    Ok(buf)
}

fn read_f64(tr: &Translator, prompt: &str) -> Result<f64, AppError> {
    loop {
        let s = read_line(prompt)?;
        match s.trim().parse::<f64>() {
            Ok(v) => return Ok(v),
            Err(_) => println!("{}", tr.t(keys::ERROR_INVALID_NUMBER)),
        }
    }
}

/// 빈 입력이면 기본값을 돌려주는 숫자 입력.
fn read_f64_default(tr: &Translator, prompt: &str, default: f64) -> Result<f64, AppError> {
    loop {
        let s = read_line(prompt)?;
        let t = s.trim();
        if t.is_empty() {
            return Ok(default);
        }
        match t.parse::<f64>() {
            Ok(v) => return Ok(v),
            Err(_) => println!("{}", tr.t(keys::ERROR_INVALID_NUMBER)),
        }
    }
}
