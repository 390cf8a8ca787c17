//! CLI 인자 파싱 모듈
//!
//! clap을 사용한 명령줄 인자 정의 및 파싱을 담당합니다.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// 통합 모드 기본 출력 파일 이름
pub const DEFAULT_COMBINED_NAME: &str = "mob_info_all.csv";

/// 출력 모드
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum OutputMode {
    /// XML 파일마다 같은 이름의 CSV 생성
    #[default]
    PerFile,
    /// 폴더 전체를 하나의 CSV로 병합
    Combined,
}

impl std::fmt::Display for OutputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputMode::PerFile => write!(f, "per-file"),
            OutputMode::Combined => write!(f, "combined"),
        }
    }
}

/// xinfo2csv CLI 인자 구조체
#[derive(Parser, Debug)]
#[command(
    name = "xinfo2csv",
    author = "YourName <your@email.com>",
    version,
    about = "XML INFO TO CSV CONVERTER - <dir name=\"info\"> 항목을 CSV로 추출하는 CLI 도구",
    long_about = r#"
XML INFO TO CSV CONVERTER
=========================

XML 파일의 <dir name="info"> 안에 있는 name/value 쌍을 읽어
CSV로 저장합니다.

모드:
  • per-file : XML 파일마다 <이름>.csv 생성 (1행: 항목 이름, 2행: 값)
  • combined : 폴더 전체를 mob_info_all.csv 하나로 병합 (id + 항목 합집합)

예제:
  xinfo2csv
  xinfo2csv ./Mob
  xinfo2csv ./Mob/Mob.0100100.img.xml
  xinfo2csv ./Mob --mode combined
  xinfo2csv ./Mob -m combined -o mobs.csv --pattern "Mob.01*"
"#
)]
pub struct Args {
    /// XML 파일 또는 XML 파일들이 있는 폴더 (기본값: 현재 폴더)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// 출력 모드
    #[arg(short, long, value_enum, default_value_t = OutputMode::PerFile)]
    pub mode: OutputMode,

    /// 통합 모드 출력 파일 이름 (대상 폴더 안에 생성)
    #[arg(short, long, default_value = DEFAULT_COMBINED_NAME)]
    pub output: String,

    /// 파일 이름 패턴 필터 (glob 형식, 예: "Mob.01*")
    #[arg(short, long)]
    pub pattern: Option<String>,

    /// 상세 출력 모드
    #[arg(short, long)]
    pub verbose: bool,

    /// 실제 변환 없이 처리될 파일 목록만 표시
    #[arg(long)]
    pub dry_run: bool,

    /// 건너뛴 파일 로그 경로
    #[arg(long)]
    pub log: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["xinfo2csv"]);
        assert_eq!(args.path, PathBuf::from("."));
        assert_eq!(args.mode, OutputMode::PerFile);
        assert_eq!(args.output, DEFAULT_COMBINED_NAME);
        assert!(args.pattern.is_none());
        assert!(!args.dry_run);
    }

    #[test]
    fn test_combined_mode() {
        let args = Args::parse_from(["xinfo2csv", "data", "-m", "combined", "-o", "all.csv"]);
        assert_eq!(args.path, PathBuf::from("data"));
        assert_eq!(args.mode, OutputMode::Combined);
        assert_eq!(args.output, "all.csv");
    }

    #[test]
    fn test_unknown_mode_rejected() {
        assert!(Args::try_parse_from(["xinfo2csv", "--mode", "merge"]).is_err());
    }
}
