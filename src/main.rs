use std::fs;
use std::path::PathBuf;

use clap::Parser;

use filament_toolbox::{app, config, estimator, i18n, profile_db::ProfileDb, scenario, ui_cli};

/// 필라멘트 사용량/폐기량/재활용 추정 CLI.
#[derive(Parser, Debug)]
#[command(name = "filament_toolbox_cli", version, about)]
struct Cli {
    /// UI 언어 (auto/ko/ko-kr/en/en-us)
    #[arg(long, short = 'L', default_value = "auto")]
    lang: String,

    /// 대화형 메뉴 대신 시나리오 파일을 계산한다
    #[arg(long, value_name = "FILE")]
    scenario: Option<PathBuf>,

    /// 배치 모드에서 리포트를 저장할 파일 (생략 시 표준 출력)
    #[arg(long, value_name = "FILE")]
    report: Option<PathBuf>,
}

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 CLI 애플리케이션을 실행한다.
fn main() {
    if let Err(err) = try_run() {
        eprintln!("오류: {err}");
    }
}

fn try_run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut cfg = config::load_or_default()?;
    let lang = i18n::resolve_language(&cli.lang, Some(cfg.language.as_str()));
    let tr = i18n::Translator::new_with_pack(&lang, cfg.language_pack_dir.as_deref());

    // 배치 모드: 시나리오 파일 하나를 계산하고 종료한다
    if let Some(path) = cli.scenario {
        let sc = scenario::load(&path)?;
        let db = ProfileDb::default();
        let result = estimator::calculate(
            &db,
            &sc.printers,
            sc.coefficients.to_coefficients(),
            sc.measured_waste_g(),
            sc.overrides,
        )?;
        let report = ui_cli::render_report(&tr, &cfg, &result);
        match cli.report {
            Some(out) => fs::write(out, report)?,
            None => print!("{report}"),
        }
        return Ok(());
    }

    app::run(&mut cfg, &tr)?;
    Ok(())
}
