//! xinfo2csv - XML INFO TO CSV CONVERTER
//!
//! 메인 엔트리포인트

use anyhow::{bail, Context, Result};
use clap::Parser;
use colored::Colorize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use xinfo2csv::{
    batch::{self, BatchOptions, BatchReport, Target},
    cli::{Args, OutputMode},
    console::{print_banner, Console},
    pattern::FileFilter,
};

fn main() {
    let args = Args::parse();
    let mut console = Console::new(args.verbose);

    if let Err(e) = run(&args, &mut console) {
        console.error(format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run(args: &Args, console: &mut Console) -> Result<()> {
    // 대상 경로 확인 (실패하면 아무것도 처리하지 않음)
    let target = batch::resolve_target(&args.path, args.mode)?;

    let filter = FileFilter::new(args.pattern.as_deref())?;
    validate_output_name(&args.output)?;

    print_header(args, &target, &filter);

    let options = BatchOptions::new(args.mode)
        .with_output_name(args.output.clone())
        .with_filter(filter)
        .with_dry_run(args.dry_run);

    let report = batch::run(&target, &options, console)
        .with_context(|| format!("배치 처리 실패: {}", target.path().display()))?;

    if args.dry_run || report.files.is_empty() {
        return Ok(());
    }

    if let Some(ref log_path) = args.log {
        write_skip_log(log_path, &report)?;
        console.info(format!("Skip log saved: {}", log_path.display()));
    }

    report.stats.print_summary();
    print_result(args, &report);

    Ok(())
}

/// 통합 출력 이름은 대상 폴더 안의 파일 이름이어야 함
fn validate_output_name(name: &str) -> Result<()> {
    let path = Path::new(name);
    if name.is_empty() || path.file_name().map(|f| f != path.as_os_str()).unwrap_or(true) {
        bail!("--output must be a plain file name: {:?}", name);
    }
    Ok(())
}

/// 헤더 출력
fn print_header(args: &Args, target: &Target, filter: &FileFilter) {
    let mut lines = vec![
        ("대상", target.path().display().to_string()),
        ("모드", args.mode.to_string()),
    ];
    if args.mode == OutputMode::Combined {
        lines.push(("출력 파일", args.output.clone()));
    }
    if let Some(pattern) = filter.pattern_str() {
        lines.push(("패턴 필터", pattern.to_string()));
    }
    if args.dry_run {
        lines.push(("드라이런", "실제 저장 없음".to_string()));
    }
    print_banner(&lines);
}

/// 최종 결과 출력
fn print_result(args: &Args, report: &BatchReport) {
    match (args.mode, &report.combined_output) {
        (OutputMode::Combined, Some(path)) => {
            println!("\n{} Saved: {}\n", "✅".bright_green(), path.display());
        }
        (OutputMode::Combined, None) => {
            println!("\n{} No CSV written.\n", "ℹ️".bright_blue());
        }
        (OutputMode::PerFile, _) if report.saved.is_empty() => {
            println!("\n{} No CSV written.\n", "ℹ️".bright_blue());
        }
        (OutputMode::PerFile, _) => {
            println!(
                "\n{} Saved {} CSV file(s).\n",
                "✅".bright_green(),
                report.saved.len()
            );
        }
    }
}

/// 건너뛴 파일 로그 작성
fn write_skip_log(log_path: &Path, report: &BatchReport) -> Result<()> {
    let mut log_file = File::create(log_path)
        .with_context(|| format!("로그 파일 생성 실패: {}", log_path.display()))?;

    writeln!(log_file, "xinfo2csv skip log")?;
    writeln!(log_file, "created: {}", unix_now())?;
    writeln!(log_file, "files: {}", report.files.len())?;
    writeln!(log_file, "skipped: {}", report.skipped.len())?;
    writeln!(log_file, "{}", "=".repeat(50))?;

    for (path, reason) in &report.skipped {
        writeln!(log_file, "\nfile: {}", path.display())?;
        writeln!(log_file, "reason: {}", reason)?;
    }

    Ok(())
}

/// 현재 시간 문자열 반환
fn unix_now() -> String {
    use std::time::SystemTime;
    let duration = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .unwrap_or_default();
    format!("Unix timestamp: {}", duration.as_secs())
}
