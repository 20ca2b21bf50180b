#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! eframe/egui 기반 데스크톱 GUI 진입점.

use eframe::{egui, App, Frame};
use filament_toolbox::{
    config,
    estimator::{self, CalculationResult, EconomicOverrides, PrinterUsageRow, WasteMode},
    i18n,
    profile_db::{PrinterProfile, ProfileDb},
    scenario::{self, CoefficientPercents, Scenario},
    units::{convert_mass, format_currency, format_grams, MassUnit},
};
use image::GenericImageView;
use rfd::FileDialog;
use std::{env, fs, path::Path};

fn main() -> Result<(), eframe::Error> {
    // CLI 언어 옵션 처리: --lang xx 또는 --lang=xx (xx: auto/en-us/ko-kr/ko)
    let mut cli_lang: Option<String> = None;
    let args: Vec<String> = env::args().collect();
    let mut i = 1;
    while i < args.len() {
        let a = &args[i];
        if let Some(val) = a.strip_prefix("--lang=") {
            cli_lang = Some(val.to_string());
        } else if a == "--lang" || a == "-L" {
            if i + 1 < args.len() {
                cli_lang = Some(args[i + 1].clone());
                i += 1;
            }
        }
        i += 1;
    }

    let mut viewport = egui::ViewportBuilder::default().with_transparent(true);
    if let Some(icon) = load_app_icon() {
        viewport = viewport.with_icon(icon);
    }
    let cfg = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    let mut app_cfg = config::load_or_default().unwrap_or_default();
    if let Some(lang_cli) = cli_lang {
        let resolved = i18n::resolve_language(&lang_cli, Some(app_cfg.language.as_str()));
        app_cfg.language = resolved;
    }
    eframe::run_native(
        "Filament Usage & Recycling Toolbox",
        cfg,
        Box::new(move |cc| {
            if let Err(e) = setup_fonts(&cc.egui_ctx) {
                eprintln!("Font error: {e}");
            }
            Box::new(GuiApp::new(app_cfg.clone()))
        }),
    )
}

fn load_app_icon() -> Option<egui::IconData> {
    let search = [
        "FilamentToolbox.png",
        "icon.png",
        "assets/icon.png",
        "../FilamentToolbox.png",
    ];
    let path = search
        .iter()
        .find(|p| Path::new(*p).exists())
        .map(|s| s.to_string())?;
    let bytes = fs::read(&path).ok()?;
    let img = image::load_from_memory(&bytes).ok()?;
    let rgba = img.to_rgba8();
    let (w, h) = img.dimensions();
    Some(egui::IconData {
        rgba: rgba.into_raw(),
        width: w,
        height: h,
    })
}

fn label_with_tip(ui: &mut egui::Ui, text: &str, tip: &str) -> egui::Response {
    ui.label(text).on_hover_text(tip)
}

fn heading_with_tip(ui: &mut egui::Ui, text: &str, tip: &str) -> egui::Response {
    ui.heading(text).on_hover_text(tip)
}

/// 공통: 바이너리 폰트 바이트를 egui에 등록.
fn apply_font_bytes(ctx: &egui::Context, bytes: Vec<u8>, name: &str) {
    let mut fonts = egui::FontDefinitions::default();
    let font_name = name.to_string();
    fonts
        .font_data
        .insert(font_name.clone(), egui::FontData::from_owned(bytes));
    fonts
        .families
        .entry(egui::FontFamily::Proportional)
        .or_default()
        .insert(0, font_name.clone());
    fonts
        .families
        .entry(egui::FontFamily::Monospace)
        .or_default()
        .insert(0, font_name);
    ctx.set_fonts(fonts);
}

/// 한글을 표시하기 위해 시스템 폰트를 탐색해 적용한다.
/// 1) Windows 시스템 폰트(맑은 고딕/굴림/바탕 등)
/// 2) Linux Noto CJK/나눔 계열
/// 3) macOS Apple SD Gothic Neo
/// 모두 실패하면 Err를 반환하고 기본 폰트로 동작한다.
fn setup_fonts(ctx: &egui::Context) -> Result<(), String> {
    if let Some(windir) = std::env::var_os("WINDIR") {
        let fonts = Path::new(&windir).join("Fonts");
        let candidates = [
            "malgun.ttf",
            "malgunsl.ttf",
            "malgunbd.ttf",
            "gulim.ttc",
            "batang.ttc",
        ];
        for cand in candidates {
            let p = fonts.join(cand);
            if p.exists() {
                let bytes = fs::read(&p)
                    .map_err(|e| format!("Failed to read system font ({}): {e}", p.display()))?;
                apply_font_bytes(ctx, bytes, "korean_font");
                return Ok(());
            }
        }
    }

    let unix_candidates = [
        "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
        "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
        "/usr/share/fonts/truetype/nanum/NanumGothic.ttf",
        "/System/Library/Fonts/AppleSDGothicNeo.ttc",
    ];
    for cand in unix_candidates {
        let p = Path::new(cand);
        if p.exists() {
            let bytes = fs::read(p)
                .map_err(|e| format!("Failed to read system font ({}): {e}", p.display()))?;
            apply_font_bytes(ctx, bytes, "korean_font");
            return Ok(());
        }
    }

    Err("CJK font not found; falling back to default fonts.".into())
}

/// 프린터 입력 한 행의 GUI 상태.
#[derive(Clone)]
struct RowState {
    profile_key: String,
    hours: f64,
    num_printers: u32,
    /// 실측 소비율 [g/h]. 0이면 프로파일 기본값×배율을 쓴다.
    custom_rate: f64,
}

struct GuiApp {
    config: config::Config,
    tr: i18n::Translator,
    db: ProfileDb,
    lang_input: String,
    lang_pack_dir_input: String,
    lang_save_status: Option<String>,
    tab: Tab,
    window_alpha: f32,
    show_settings_modal: bool,
    show_help_modal: bool,
    apply_initial_view_size: bool,
    // 추정 입력
    rows: Vec<RowState>,
    discard_pct: f64,
    support_pct: f64,
    rate_pct: f64,
    use_measured: bool,
    measured_waste: f64,
    measured_unit: MassUnit,
    // 단가 덮어쓰기 (체크 시에만 적용)
    ov_shred_on: bool,
    ov_shred: f64,
    ov_extrude_on: bool,
    ov_extrude: f64,
    ov_elec_on: bool,
    ov_elec: f64,
    ov_cost_on: bool,
    ov_cost: f64,
    ov_loss_on: bool,
    ov_loss: f64,
    scenario_status: Option<String>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Tab {
    Estimator,
    Profiles,
}

impl GuiApp {
    fn new(config: config::Config) -> Self {
        let lang_code = i18n::resolve_language("auto", Some(config.language.as_str()));
        let tr = i18n::Translator::new_with_pack(&lang_code, config.language_pack_dir.as_deref());
        let has_overrides = tr.lookup("gui.nav.app_title").is_some();
        eprintln!("GUI language resolved: {lang_code}, overrides_loaded={has_overrides}");
        let lang_input = config.language.clone();
        let lang_pack_dir_input = config.language_pack_dir.clone().unwrap_or_default();
        let db = ProfileDb::default();
        Self {
            tr,
            lang_input,
            lang_pack_dir_input,
            lang_save_status: None,
            tab: Tab::Estimator,
            window_alpha: config.window_alpha.clamp(0.3, 1.0),
            show_settings_modal: false,
            show_help_modal: false,
            apply_initial_view_size: true,
            rows: vec![
                RowState {
                    profile_key: "bambu-p1s".into(),
                    hours: 635.0,
                    num_printers: 1,
                    custom_rate: 0.0,
                },
                RowState {
                    profile_key: "bambu-a1-mini".into(),
                    hours: 239.0,
                    num_printers: 1,
                    custom_rate: 0.0,
                },
            ],
            discard_pct: 43.0,
            support_pct: 8.0,
            rate_pct: 100.0,
            use_measured: false,
            measured_waste: 0.0,
            measured_unit: config.measured_waste_unit,
            ov_shred_on: false,
            ov_shred: db.recycling.shred_energy_kwh_per_kg,
            ov_extrude_on: false,
            ov_extrude: db.recycling.extrude_energy_kwh_per_kg,
            ov_elec_on: false,
            ov_elec: db.recycling.electricity_cost_per_kwh,
            ov_cost_on: false,
            ov_cost: db.material.cost_per_kg,
            ov_loss_on: false,
            ov_loss: db.material.recyclability_loss,
            scenario_status: None,
            config,
            db,
        }
    }

    /// 현재 입력 상태를 엔진이 받는 행 목록으로 바꾼다.
    fn build_rows(&self) -> Vec<PrinterUsageRow> {
        self.rows
            .iter()
            .map(|r| PrinterUsageRow {
                profile_key: r.profile_key.clone(),
                hours: r.hours,
                num_printers: r.num_printers,
                custom_rate_g_per_h: if r.custom_rate > 0.0 {
                    Some(r.custom_rate)
                } else {
                    None
                },
            })
            .collect()
    }

    fn coefficient_percents(&self) -> CoefficientPercents {
        CoefficientPercents {
            discard_rate_pct: self.discard_pct,
            support_ratio_pct: self.support_pct,
            rate_multiplier_pct: self.rate_pct,
        }
    }

    fn measured_g(&self) -> Option<f64> {
        if self.use_measured && self.measured_waste > 0.0 {
            Some(self.measured_unit.to_grams(self.measured_waste))
        } else {
            None
        }
    }

    fn current_overrides(&self) -> EconomicOverrides {
        EconomicOverrides {
            shred_energy_kwh_per_kg: opt(self.ov_shred_on, self.ov_shred),
            extrude_energy_kwh_per_kg: opt(self.ov_extrude_on, self.ov_extrude),
            electricity_cost_per_kwh: opt(self.ov_elec_on, self.ov_elec),
            filament_cost_per_kg: opt(self.ov_cost_on, self.ov_cost),
            process_loss: opt(self.ov_loss_on, self.ov_loss),
        }
    }

    /// 시나리오 파일 내용을 입력 상태에 반영한다.
    fn apply_scenario(&mut self, sc: Scenario) {
        self.rows = sc
            .printers
            .iter()
            .map(|r| RowState {
                profile_key: r.profile_key.clone(),
                hours: r.hours,
                num_printers: r.num_printers,
                custom_rate: r.custom_rate_g_per_h.unwrap_or(0.0),
            })
            .collect();
        self.discard_pct = sc.coefficients.discard_rate_pct;
        self.support_pct = sc.coefficients.support_ratio_pct;
        self.rate_pct = sc.coefficients.rate_multiplier_pct;
        match sc.measured_waste_kg {
            Some(kg) if kg > 0.0 => {
                self.use_measured = true;
                self.measured_waste = convert_mass(kg, MassUnit::Kilogram, self.measured_unit);
            }
            _ => self.use_measured = false,
        }
        let ov = sc.overrides;
        self.ov_shred_on = ov.shred_energy_kwh_per_kg.is_some();
        if let Some(v) = ov.shred_energy_kwh_per_kg {
            self.ov_shred = v;
        }
        self.ov_extrude_on = ov.extrude_energy_kwh_per_kg.is_some();
        if let Some(v) = ov.extrude_energy_kwh_per_kg {
            self.ov_extrude = v;
        }
        self.ov_elec_on = ov.electricity_cost_per_kwh.is_some();
        if let Some(v) = ov.electricity_cost_per_kwh {
            self.ov_elec = v;
        }
        self.ov_cost_on = ov.filament_cost_per_kg.is_some();
        if let Some(v) = ov.filament_cost_per_kg {
            self.ov_cost = v;
        }
        self.ov_loss_on = ov.process_loss.is_some();
        if let Some(v) = ov.process_loss {
            self.ov_loss = v;
        }
    }

    /// 입력 상태를 저장 가능한 시나리오로 만든다.
    fn to_scenario(&self) -> Scenario {
        Scenario {
            measured_waste_kg: self
                .measured_g()
                .map(|g| convert_mass(g, MassUnit::Gram, MassUnit::Kilogram)),
            coefficients: self.coefficient_percents(),
            overrides: self.current_overrides(),
            printers: self.build_rows(),
        }
    }

    /// 사이드 메뉴를 제공한다.
    fn ui_nav(&mut self, ui: &mut egui::Ui) {
        let tr = self.tr.clone();
        let txt = |key: &str, default: &str| tr.lookup(key).unwrap_or_else(|| default.to_string());
        ui.style_mut().wrap = Some(false);
        ui.vertical_centered(|ui| {
            ui.heading(txt("gui.nav.heading", "Menu"));
            ui.add_space(8.0);
        });
        for (tab, label) in [
            (Tab::Estimator, txt("gui.tab.estimator", "Usage Estimator")),
            (Tab::Profiles, txt("gui.tab.profiles", "Profiles")),
        ] {
            let selected = self.tab == tab;
            let button = egui::Button::new(label)
                .fill(if selected {
                    ui.visuals().selection.bg_fill
                } else {
                    ui.visuals().extreme_bg_color
                })
                .min_size(egui::vec2(ui.available_width(), 32.0));
            let resp = ui
                .add(button)
                .on_hover_text(txt("gui.nav.switch_tip", "Switch menu"));
            if resp.clicked() {
                self.tab = tab;
            }
            ui.add_space(4.0);
        }
    }

    fn ui_estimator(&mut self, ui: &mut egui::Ui) {
        let tr = self.tr.clone();
        let txt = |key: &str, default: &str| tr.lookup(key).unwrap_or_else(|| default.to_string());
        let printers: Vec<PrinterProfile> = self.db.printers.clone();

        heading_with_tip(
            ui,
            &txt("gui.est.heading", "Filament usage & waste"),
            &txt(
                "gui.est.tip",
                "Estimate consumption from print hours, then see the waste split and recycling value.",
            ),
        );
        ui.add_space(4.0);
        ui.horizontal(|ui| {
            if ui
                .button(txt("gui.est.scenario_load", "Load scenario…"))
                .clicked()
            {
                if let Some(path) = FileDialog::new().add_filter("TOML", &["toml"]).pick_file() {
                    match scenario::load(&path) {
                        Ok(sc) => {
                            self.apply_scenario(sc);
                            self.scenario_status = Some(format!(
                                "{} {}",
                                txt("gui.est.scenario_loaded", "Scenario loaded:"),
                                path.display()
                            ));
                        }
                        Err(e) => {
                            self.scenario_status = Some(format!(
                                "{}: {e}",
                                txt("gui.res.error_prefix", "Error")
                            ));
                        }
                    }
                }
            }
            if ui
                .button(txt("gui.est.scenario_save", "Save scenario…"))
                .clicked()
            {
                if let Some(path) = FileDialog::new()
                    .add_filter("TOML", &["toml"])
                    .set_file_name("scenario.toml")
                    .save_file()
                {
                    match self.to_scenario().save(&path) {
                        Ok(()) => {
                            self.scenario_status = Some(format!(
                                "{} {}",
                                txt("gui.est.scenario_saved", "Scenario saved:"),
                                path.display()
                            ));
                        }
                        Err(e) => {
                            self.scenario_status = Some(format!(
                                "{}: {e}",
                                txt("gui.res.error_prefix", "Error")
                            ));
                        }
                    }
                }
            }
            if let Some(status) = &self.scenario_status {
                ui.small(status.clone());
            }
        });
        ui.add_space(8.0);

        // 프린터 그룹 입력
        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.label(txt("gui.est.printers", "Printer groups"));
            ui.add_space(4.0);
            let mut remove_idx: Option<usize> = None;
            egui::Grid::new("printer_rows")
                .num_columns(5)
                .spacing([12.0, 6.0])
                .show(ui, |ui| {
                    ui.strong(txt("gui.est.col_profile", "Profile"));
                    ui.strong(txt("gui.est.col_hours", "Print hours"));
                    ui.strong(txt("gui.est.col_count", "Count"));
                    ui.strong(txt("gui.est.col_rate", "Rate [g/h]"));
                    ui.label("");
                    ui.end_row();
                    for (idx, row) in self.rows.iter_mut().enumerate() {
                        let current = printers
                            .iter()
                            .find(|p| p.key == row.profile_key)
                            .map(|p| p.name.clone())
                            .unwrap_or_else(|| row.profile_key.clone());
                        egui::ComboBox::from_id_source(("profile_row", idx))
                            .selected_text(current)
                            .show_ui(ui, |ui| {
                                for p in &printers {
                                    ui.selectable_value(
                                        &mut row.profile_key,
                                        p.key.clone(),
                                        &p.name,
                                    );
                                }
                            });
                        ui.add(
                            egui::DragValue::new(&mut row.hours)
                                .speed(5.0)
                                .clamp_range(0.0..=1_000_000.0),
                        );
                        ui.add(
                            egui::DragValue::new(&mut row.num_printers)
                                .speed(1)
                                .clamp_range(1..=500),
                        );
                        ui.add(
                            egui::DragValue::new(&mut row.custom_rate)
                                .speed(0.1)
                                .clamp_range(0.0..=500.0),
                        )
                        .on_hover_text(txt(
                            "gui.est.col_rate_tip",
                            "Measured consumption rate; 0 uses the profile base × multiplier",
                        ));
                        if ui
                            .button("✕")
                            .on_hover_text(txt("gui.est.remove_tip", "Remove this row"))
                            .clicked()
                        {
                            remove_idx = Some(idx);
                        }
                        ui.end_row();
                    }
                });
            if let Some(idx) = remove_idx {
                self.rows.remove(idx);
            }
            if ui.button(txt("gui.est.add_row", "Add printer")).clicked() {
                self.rows.push(RowState {
                    profile_key: "bambu-p1s".into(),
                    hours: 0.0,
                    num_printers: 1,
                    custom_rate: 0.0,
                });
            }
        });
        ui.add_space(8.0);

        // 폐기 계수
        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.label(txt("gui.est.coeffs", "Waste coefficients"));
            ui.add_space(4.0);
            egui::Grid::new("coeff_grid")
                .num_columns(2)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    label_with_tip(
                        ui,
                        &txt("gui.est.discard", "Discarded prints"),
                        &txt(
                            "gui.est.discard_tip",
                            "Share of all material that ends up in discarded prints (failures + iterations)",
                        ),
                    );
                    ui.add(egui::Slider::new(&mut self.discard_pct, 0.0..=100.0).suffix("%"));
                    ui.end_row();

                    label_with_tip(
                        ui,
                        &txt("gui.est.support", "Supports / rafts"),
                        &txt(
                            "gui.est.support_tip",
                            "Support share of successfully finished prints",
                        ),
                    );
                    ui.add(egui::Slider::new(&mut self.support_pct, 0.0..=30.0).suffix("%"));
                    ui.end_row();

                    label_with_tip(
                        ui,
                        &txt("gui.est.rate_mult", "Rate multiplier"),
                        &txt(
                            "gui.est.rate_mult_tip",
                            "Scales every profile's base rate; rows with a measured rate are unaffected",
                        ),
                    );
                    ui.add(egui::Slider::new(&mut self.rate_pct, 30.0..=300.0).suffix("%"));
                    ui.end_row();
                });
            ui.separator();
            ui.horizontal(|ui| {
                ui.checkbox(
                    &mut self.use_measured,
                    txt("gui.est.measured", "Use measured waste"),
                )
                .on_hover_text(txt(
                    "gui.est.measured_tip",
                    "Replace the coefficient estimate with your weighed scrap bin",
                ));
                ui.add_enabled(
                    self.use_measured,
                    egui::DragValue::new(&mut self.measured_waste)
                        .speed(0.1)
                        .clamp_range(0.0..=100_000.0),
                );
                mass_unit_combo(ui, &mut self.measured_unit);
            });
        });
        ui.add_space(8.0);

        // 단가 덮어쓰기
        ui.collapsing(txt("gui.est.overrides", "Economics overrides"), |ui| {
            egui::Grid::new("override_grid")
                .num_columns(2)
                .spacing([12.0, 6.0])
                .show(ui, |ui| {
                    ui.checkbox(
                        &mut self.ov_shred_on,
                        txt("gui.est.ov_shred", "Shred energy [kWh/kg]"),
                    );
                    ui.add_enabled(
                        self.ov_shred_on,
                        egui::DragValue::new(&mut self.ov_shred)
                            .speed(0.01)
                            .clamp_range(0.0..=10.0),
                    );
                    ui.end_row();

                    ui.checkbox(
                        &mut self.ov_extrude_on,
                        txt("gui.est.ov_extrude", "Extrude energy [kWh/kg]"),
                    );
                    ui.add_enabled(
                        self.ov_extrude_on,
                        egui::DragValue::new(&mut self.ov_extrude)
                            .speed(0.01)
                            .clamp_range(0.0..=10.0),
                    );
                    ui.end_row();

                    ui.checkbox(
                        &mut self.ov_elec_on,
                        txt("gui.est.ov_elec", "Electricity [/kWh]"),
                    );
                    ui.add_enabled(
                        self.ov_elec_on,
                        egui::DragValue::new(&mut self.ov_elec)
                            .speed(0.01)
                            .clamp_range(0.0..=5.0),
                    );
                    ui.end_row();

                    ui.checkbox(
                        &mut self.ov_cost_on,
                        txt("gui.est.ov_cost", "Filament price [/kg]"),
                    );
                    ui.add_enabled(
                        self.ov_cost_on,
                        egui::DragValue::new(&mut self.ov_cost)
                            .speed(0.5)
                            .clamp_range(0.0..=500.0),
                    );
                    ui.end_row();

                    ui.checkbox(
                        &mut self.ov_loss_on,
                        txt("gui.est.ov_loss", "Process loss [0-1]"),
                    );
                    ui.add_enabled(
                        self.ov_loss_on,
                        egui::DragValue::new(&mut self.ov_loss)
                            .speed(0.005)
                            .clamp_range(0.0..=1.0),
                    );
                    ui.end_row();
                });
        });
        ui.add_space(8.0);
        ui.separator();

        // 입력이 바뀔 때마다 즉시 재계산한다
        let result = estimator::calculate(
            &self.db,
            &self.build_rows(),
            self.coefficient_percents().to_coefficients(),
            self.measured_g(),
            self.current_overrides(),
        );
        match result {
            Ok(result) => self.ui_results(ui, &txt, &result),
            Err(e) => {
                ui.colored_label(
                    egui::Color32::RED,
                    format!("{}: {e}", txt("gui.res.error_prefix", "Error")),
                );
            }
        }
    }

    fn ui_results<F>(&self, ui: &mut egui::Ui, txt: &F, result: &CalculationResult)
    where
        F: Fn(&str, &str) -> String,
    {
        ui.heading(txt("gui.res.heading", "Results"));
        if result.total_material_g <= 0.0 {
            ui.label(txt("gui.res.empty", "Add print hours to see an estimate."));
            return;
        }
        let cur = self.config.currency_symbol.as_str();

        ui.label(txt("gui.res.total", "Total filament used (incl. purge)"));
        ui.label(
            egui::RichText::new(format_grams(result.total_material_g))
                .size(28.0)
                .strong(),
        );
        ui.add_space(4.0);

        let in_use_frac = (result.percent_in_use / 100.0).clamp(0.0, 1.0) as f32;
        let waste_frac = (result.percent_waste / 100.0).clamp(0.0, 1.0) as f32;
        ui.add(
            egui::ProgressBar::new(in_use_frac)
                .fill(egui::Color32::from_rgb(74, 222, 128))
                .text(format!(
                    "{} {} ({:.1}%)",
                    txt("gui.res.in_use", "In use"),
                    format_grams(result.in_use_g),
                    result.percent_in_use
                )),
        );
        ui.add(
            egui::ProgressBar::new(waste_frac)
                .fill(egui::Color32::from_rgb(248, 113, 113))
                .text(format!(
                    "{} {} ({:.1}%)",
                    txt("gui.res.waste", "Waste"),
                    format_grams(result.waste_g),
                    result.percent_waste
                )),
        );
        ui.add_space(4.0);

        match result.mode {
            WasteMode::Estimated { failed_g, support_g } => {
                egui::Grid::new("waste_detail")
                    .num_columns(2)
                    .spacing([12.0, 4.0])
                    .show(ui, |ui| {
                        ui.label(txt("gui.res.failed", "Discarded prints (failures + iterations)"));
                        ui.label(format_grams(failed_g));
                        ui.end_row();
                        ui.label(txt("gui.res.support", "Supports / rafts / brims"));
                        ui.label(format_grams(support_g));
                        ui.end_row();
                        ui.label(txt("gui.res.purge", "Purge (nozzle prime per print)"));
                        ui.label(format_grams(result.purge_g));
                        ui.end_row();
                    });
            }
            WasteMode::Measured => {
                ui.small(txt(
                    "gui.res.measured_note",
                    "Measured waste mode: no failure/support breakdown; purge is part of the measurement.",
                ));
            }
        }
        ui.add_space(8.0);

        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.label(txt("gui.res.recycling", "Recycling economics (shred + extrude)"));
            ui.add_space(4.0);
            let rec = &result.recycling;
            egui::Grid::new("recycling_grid")
                .num_columns(2)
                .spacing([12.0, 4.0])
                .show(ui, |ui| {
                    ui.label(txt("gui.res.recyclable", "Recyclable waste"));
                    ui.label(format_grams(result.waste_g));
                    ui.end_row();
                    ui.label(txt("gui.res.reclaimed", "Reclaimed filament"));
                    ui.label(format!("{:.2} kg", rec.reclaimed_kg));
                    ui.end_row();
                    ui.label(txt("gui.res.value", "Filament value (at retail)"));
                    ui.label(format_currency(cur, rec.reclaimed_value));
                    ui.end_row();
                    ui.label(txt("gui.res.energy", "Shredding + extrusion energy"));
                    ui.label(format!("{:.3} kWh", rec.energy_kwh));
                    ui.end_row();
                    ui.label(txt("gui.res.energy_cost", "Energy cost"));
                    ui.label(format_currency(cur, rec.energy_cost));
                    ui.end_row();
                    ui.label(txt("gui.res.net", "Scrap value (net savings)"));
                    let net_color = if rec.net_savings >= 0.0 {
                        egui::Color32::from_rgb(74, 222, 128)
                    } else {
                        egui::Color32::from_rgb(248, 113, 113)
                    };
                    ui.label(
                        egui::RichText::new(format_currency(cur, rec.net_savings))
                            .strong()
                            .color(net_color),
                    );
                    ui.end_row();
                });
        });
        ui.add_space(8.0);

        ui.label(txt("gui.res.per_printer", "Per-printer breakdown"));
        egui::Grid::new("per_printer_grid")
            .num_columns(6)
            .spacing([12.0, 4.0])
            .striped(true)
            .show(ui, |ui| {
                ui.strong(txt("gui.res.col_printer", "Printer"));
                ui.strong(txt("gui.res.col_hours", "Hours"));
                ui.strong(txt("gui.res.col_count", "Count"));
                ui.strong(txt("gui.res.col_rate", "Rate"));
                ui.strong(txt("gui.res.col_material", "Material"));
                ui.strong(txt("gui.res.col_purge", "Purge"));
                ui.end_row();
                for p in result.printer_results.iter().filter(|p| p.material_g > 0.0) {
                    ui.label(&p.name);
                    ui.label(format!("{:.0} h", p.hours));
                    ui.label(format!("{}", p.num_printers));
                    ui.label(format!("{:.1} g/h", p.rate_g_per_h));
                    ui.label(format_grams(p.material_g));
                    ui.label(format_grams(p.purge_g));
                    ui.end_row();
                }
            });
    }

    fn ui_profiles(&mut self, ui: &mut egui::Ui) {
        let tr = self.tr.clone();
        let txt = |key: &str, default: &str| tr.lookup(key).unwrap_or_else(|| default.to_string());
        let cur = self.config.currency_symbol.as_str();

        heading_with_tip(
            ui,
            &txt("gui.prof.heading", "Reference profiles"),
            &txt(
                "gui.prof.tip",
                "Built-in printers, material, and recycling defaults the estimator uses.",
            ),
        );
        ui.small(txt(
            "gui.prof.note",
            "Values are planning averages; calibrate with your own measurements.",
        ));
        ui.add_space(8.0);

        ui.label(txt("gui.prof.printers", "Printers"));
        egui::Grid::new("profile_grid")
            .num_columns(4)
            .spacing([12.0, 4.0])
            .striped(true)
            .show(ui, |ui| {
                ui.strong(txt("gui.prof.col_key", "Key"));
                ui.strong(txt("gui.prof.col_name", "Name"));
                ui.strong(txt("gui.prof.col_rate", "Rate [g/h]"));
                ui.strong(txt("gui.prof.col_volume", "Build volume"));
                ui.end_row();
                for p in &self.db.printers {
                    ui.label(&p.key);
                    ui.label(&p.name);
                    ui.label(format!("{}", p.consumption_rate_g_per_h));
                    ui.label(&p.build_volume);
                    ui.end_row();
                }
            });
        ui.add_space(8.0);

        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.label(txt("gui.prof.material", "Material"));
            let m = &self.db.material;
            egui::Grid::new("material_grid")
                .num_columns(2)
                .spacing([12.0, 4.0])
                .show(ui, |ui| {
                    ui.label(&m.name);
                    ui.label("");
                    ui.end_row();
                    ui.label(txt("gui.prof.mat_density", "Density [g/cm³]"));
                    ui.label(format!("{}", m.density_g_per_cm3));
                    ui.end_row();
                    ui.label(txt("gui.prof.mat_cost", "Cost [/kg]"));
                    ui.label(format_currency(cur, m.cost_per_kg));
                    ui.end_row();
                    ui.label(txt("gui.prof.mat_loss", "Recycling loss"));
                    ui.label(format!("{:.0}%", m.recyclability_loss * 100.0));
                    ui.end_row();
                });
        });
        ui.add_space(8.0);

        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.label(txt("gui.prof.recycling", "Recycling defaults"));
            let r = &self.db.recycling;
            egui::Grid::new("recycling_defaults_grid")
                .num_columns(2)
                .spacing([12.0, 4.0])
                .show(ui, |ui| {
                    ui.label(txt("gui.prof.rec_shred", "Shred energy [kWh/kg]"));
                    ui.label(format!("{}", r.shred_energy_kwh_per_kg));
                    ui.end_row();
                    ui.label(txt("gui.prof.rec_extrude", "Extrude energy [kWh/kg]"));
                    ui.label(format!("{}", r.extrude_energy_kwh_per_kg));
                    ui.end_row();
                    ui.label(txt("gui.prof.rec_elec", "Electricity [/kWh]"));
                    ui.label(format_currency(cur, r.electricity_cost_per_kwh));
                    ui.end_row();
                });
        });
        ui.add_space(8.0);

        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.label(txt("gui.prof.purge", "Purge model"));
            let purge = &self.db.purge;
            egui::Grid::new("purge_grid")
                .num_columns(2)
                .spacing([12.0, 4.0])
                .show(ui, |ui| {
                    ui.label(txt("gui.prof.purge_per_start", "Purge per start [g]"));
                    ui.label(format!("{}", purge.purge_per_start_g));
                    ui.end_row();
                    ui.label(txt("gui.prof.purge_duration", "Avg job at base rate [h]"));
                    ui.label(format!("{}", purge.avg_print_duration_h));
                    ui.end_row();
                });
        });
    }
}

fn opt(enabled: bool, value: f64) -> Option<f64> {
    if enabled {
        Some(value)
    } else {
        None
    }
}

fn mass_unit_combo(ui: &mut egui::Ui, value: &mut MassUnit) {
    egui::ComboBox::from_id_source(ui.next_auto_id())
        .selected_text(value.label())
        .show_ui(ui, |ui| {
            for unit in [MassUnit::Gram, MassUnit::Kilogram, MassUnit::Pound] {
                ui.selectable_value(value, unit, unit.label());
            }
        });
}

impl App for GuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        // 최초 1회 화면 크기 조정
        if self.apply_initial_view_size {
            if let Some(screen) = ctx.input(|i| {
                let r = i.screen_rect();
                if r.is_positive() {
                    Some(r.size())
                } else {
                    None
                }
            }) {
                let target = egui::vec2((screen.x * 0.55).max(900.0), (screen.y * 0.6).max(640.0));
                ctx.send_viewport_cmd(egui::ViewportCommand::InnerSize(target));
                self.apply_initial_view_size = false;
            }
        }

        // 투명도 적용 + 라벨 복사 방지 스타일
        let mut style = (*ctx.style()).clone();
        style.interaction.selectable_labels = false;
        style.visuals.window_fill = style.visuals.window_fill.linear_multiply(self.window_alpha);
        style.visuals.panel_fill = style.visuals.panel_fill.linear_multiply(self.window_alpha);
        ctx.set_style(style);

        let tr = self.tr.clone();
        let txt =
            move |key: &str, default: &str| tr.lookup(key).unwrap_or_else(|| default.to_string());

        // 상단 바
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(txt("gui.nav.app_title", "Filament Usage & Recycling Toolbox"));
                ui.separator();
                if ui.button(txt("gui.settings.title", "Settings")).clicked() {
                    self.show_settings_modal = true;
                }
                if ui.button(txt("gui.about.title", "Help / About")).clicked() {
                    self.show_help_modal = true;
                }
            });
        });

        // 설정 모달
        if self.show_settings_modal {
            egui::Window::new(txt("gui.settings.title", "Settings"))
                .collapsible(false)
                .resizable(true)
                .open(&mut self.show_settings_modal)
                .show(ctx, |ui| {
                    ui.heading(txt("gui.settings.general", "General"));
                    ui.separator();
                    ui.label(txt("gui.settings.alpha", "Window transparency"));
                    ui.add(egui::Slider::new(&mut self.window_alpha, 0.3..=1.0).text("alpha"));
                    ui.separator();
                    ui.label(txt("gui.settings.currency", "Currency symbol"));
                    ui.add(
                        egui::TextEdit::singleline(&mut self.config.currency_symbol)
                            .desired_width(60.0),
                    );
                    ui.separator();
                    ui.label(txt("gui.settings.waste_unit", "Measured waste unit"));
                    mass_unit_combo(ui, &mut self.measured_unit);
                    ui.separator();
                    ui.label(txt("gui.settings.lang", "Language"));
                    egui::ComboBox::from_id_source("lang_choice")
                        .selected_text(&self.lang_input)
                        .show_ui(ui, |ui| {
                            ui.selectable_value(
                                &mut self.lang_input,
                                "auto".into(),
                                txt("gui.settings.lang.auto", "System"),
                            );
                            ui.selectable_value(&mut self.lang_input, "en-us".into(), "English (US)");
                            ui.selectable_value(&mut self.lang_input, "ko-kr".into(), "한국어");
                        });
                    ui.label(txt("gui.settings.pack_dir", "Language pack folder (optional)"));
                    ui.add(
                        egui::TextEdit::singleline(&mut self.lang_pack_dir_input)
                            .desired_width(240.0),
                    );
                    if ui.button(txt("gui.settings.save", "Save settings")).clicked() {
                        self.config.language = self.lang_input.clone();
                        self.config.window_alpha = self.window_alpha;
                        self.config.measured_waste_unit = self.measured_unit;
                        self.config.language_pack_dir = if self.lang_pack_dir_input.trim().is_empty()
                        {
                            None
                        } else {
                            Some(self.lang_pack_dir_input.trim().to_string())
                        };
                        // 즉시 번역기 반영
                        let resolved = i18n::resolve_language(&self.config.language, None);
                        self.tr = i18n::Translator::new_with_pack(
                            &resolved,
                            self.config.language_pack_dir.as_deref(),
                        );
                        if let Err(e) = self.config.save() {
                            self.lang_save_status = Some(format!("Save error: {e}"));
                        } else {
                            self.lang_save_status = Some(txt("gui.settings.saved", "Saved."));
                        }
                    }
                    if let Some(msg) = &self.lang_save_status {
                        ui.label(msg);
                    }
                });
        }

        // 도움말 모달
        if self.show_help_modal {
            egui::Window::new(txt("gui.about.title", "Help / About"))
                .collapsible(false)
                .resizable(true)
                .open(&mut self.show_help_modal)
                .show(ctx, |ui| {
                    ui.heading(txt(
                        "gui.about.app",
                        "Offline estimator for filament usage, waste, and recycling economics",
                    ));
                    ui.label(txt("gui.about.version", "Version: 0.5.0"));
                    ui.separator();
                    ui.label(txt(
                        "gui.about.data",
                        "Printer rates are planning averages; recycling energy figures come from desktop shredder/extruder specs.",
                    ));
                    ui.label(txt(
                        "gui.about.hint",
                        "Language, currency, and transparency live in Settings.",
                    ));
                });
        }

        // 좌측 네비 + 본문
        egui::SidePanel::left("nav")
            .resizable(true)
            .min_width(140.0)
            .default_width(200.0)
            .max_width(400.0)
            .show(ctx, |ui| {
                self.ui_nav(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false; 2])
                .show(ui, |ui| match self.tab {
                    Tab::Estimator => self.ui_estimator(ui),
                    Tab::Profiles => self.ui_profiles(ui),
                });
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_rows_produce_estimated_mode() {
        let app = GuiApp::new(config::Config::default());
        let result = estimator::calculate(
            &app.db,
            &app.build_rows(),
            app.coefficient_percents().to_coefficients(),
            app.measured_g(),
            app.current_overrides(),
        )
        .unwrap();
        assert!(result.total_material_g > 0.0);
        assert!(matches!(result.mode, WasteMode::Estimated { .. }));
    }

    #[test]
    fn measured_toggle_converts_to_grams() {
        let mut app = GuiApp::new(config::Config::default());
        app.use_measured = true;
        app.measured_waste = 3.0;
        app.measured_unit = MassUnit::Kilogram;
        assert_eq!(app.measured_g(), Some(3000.0));
        let result = estimator::calculate(
            &app.db,
            &app.build_rows(),
            app.coefficient_percents().to_coefficients(),
            app.measured_g(),
            app.current_overrides(),
        )
        .unwrap();
        assert!(matches!(result.mode, WasteMode::Measured));
    }

    #[test]
    fn zero_custom_rate_means_auto() {
        let app = GuiApp::new(config::Config::default());
        for row in app.build_rows() {
            assert!(row.custom_rate_g_per_h.is_none());
        }
    }

    #[test]
    fn overrides_only_sent_when_enabled() {
        let mut app = GuiApp::new(config::Config::default());
        assert_eq!(app.current_overrides(), EconomicOverrides::default());
        app.ov_cost_on = true;
        app.ov_cost = 22.0;
        let ov = app.current_overrides();
        assert_eq!(ov.filament_cost_per_kg, Some(22.0));
        assert_eq!(ov.shred_energy_kwh_per_kg, None);
    }

    #[test]
    fn scenario_round_trip_preserves_inputs() {
        let mut app = GuiApp::new(config::Config::default());
        app.discard_pct = 35.0;
        app.support_pct = 12.0;
        app.rate_pct = 150.0;
        app.use_measured = true;
        app.measured_waste = 2.5;
        app.measured_unit = MassUnit::Kilogram;
        app.ov_elec_on = true;
        app.ov_elec = 0.45;
        let sc = app.to_scenario();

        let mut other = GuiApp::new(config::Config::default());
        other.apply_scenario(sc.clone());
        assert_eq!(other.discard_pct, 35.0);
        assert_eq!(other.support_pct, 12.0);
        assert_eq!(other.rate_pct, 150.0);
        assert!(other.use_measured);
        assert_eq!(other.to_scenario(), sc);
    }
}
