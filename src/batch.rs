//! 배치 처리 모듈
//!
//! 대상 경로를 해석하고, XML 파일을 모아 개별/통합 모드로 CSV를 생성합니다.
//! 파일 단위 실패는 경고만 남기고 다음 파일로 넘어갑니다.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::cli::{OutputMode, DEFAULT_COMBINED_NAME};
use crate::console::Console;
use crate::error::{Result, XinfoError};
use crate::extractor::extract_file;
use crate::naming::{csv_path_for, display_name, extract_identifier, file_stem};
use crate::pattern::{has_xml_extension, FileFilter};
use crate::stats::Statistics;
use crate::table::CombinedTable;
use crate::writer::{write_combined_csv, write_record_csv};

/// 처리 대상
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// XML 파일 하나
    File(PathBuf),
    /// 폴더 바로 아래의 XML 파일 전부
    Directory(PathBuf),
}

impl Target {
    pub fn path(&self) -> &Path {
        match self {
            Target::File(p) | Target::Directory(p) => p,
        }
    }
}

/// 입력 경로를 처리 대상으로 해석
///
/// 통합 모드에서 XML 파일 하나가 주어지면 그 파일이 있는 폴더를 대상으로 합니다.
///
/// # Errors
/// * `PathNotFound` - 경로가 없음
/// * `InvalidTarget` - .xml 이 아닌 파일
pub fn resolve_target(path: &Path, mode: OutputMode) -> Result<Target> {
    if !path.exists() {
        return Err(XinfoError::PathNotFound {
            path: path.to_path_buf(),
        });
    }

    if path.is_dir() {
        return Ok(Target::Directory(path.to_path_buf()));
    }

    if !has_xml_extension(path) {
        return Err(XinfoError::InvalidTarget {
            path: path.to_path_buf(),
        });
    }

    match mode {
        OutputMode::PerFile => Ok(Target::File(path.to_path_buf())),
        OutputMode::Combined => Ok(Target::Directory(parent_dir(path))),
    }
}

/// 상대 경로 파일의 부모가 빈 경로면 현재 폴더
fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// 폴더 바로 아래의 XML 파일을 이름순으로 수집 (하위 폴더 제외)
///
/// 폴더 자체를 읽을 수 없으면 에러, 개별 항목을 읽을 수 없으면 경고 후 건너뜁니다.
pub fn collect_xml_files(dir: &Path, filter: &FileFilter, console: &Console) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 => {
                return Err(XinfoError::ReadDir {
                    path: dir.to_path_buf(),
                    reason: e.to_string(),
                });
            }
            Err(e) => {
                console.warn(format!("Cannot read entry in {}: {}", dir.display(), e));
                continue;
            }
        };

        if entry.path().is_file() && filter.accepts(entry.path()) {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

/// 배치 옵션
#[derive(Debug)]
pub struct BatchOptions {
    pub mode: OutputMode,
    /// 통합 모드 출력 파일 이름
    pub output_name: String,
    pub filter: FileFilter,
    pub dry_run: bool,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            mode: OutputMode::PerFile,
            output_name: DEFAULT_COMBINED_NAME.to_string(),
            filter: FileFilter::default(),
            dry_run: false,
        }
    }
}

impl BatchOptions {
    pub fn new(mode: OutputMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    pub fn with_output_name(mut self, name: impl Into<String>) -> Self {
        self.output_name = name.into();
        self
    }

    pub fn with_filter(mut self, filter: FileFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

/// 배치 실행 결과
#[derive(Debug, Default)]
pub struct BatchReport {
    /// 처리 대상이었던 XML 파일
    pub files: Vec<PathBuf>,
    /// 저장된 CSV
    pub saved: Vec<PathBuf>,
    /// 건너뛴 파일과 사유
    pub skipped: Vec<(PathBuf, String)>,
    /// 통합 모드에서 저장된 CSV
    pub combined_output: Option<PathBuf>,
    pub stats: Statistics,
}

/// 대상에 대해 배치 실행
///
/// 파일 단위 실패는 `BatchReport::skipped`에 담기고,
/// 폴더 읽기 실패와 통합 CSV 쓰기 실패만 에러로 돌아옵니다.
pub fn run(target: &Target, options: &BatchOptions, console: &mut Console) -> Result<BatchReport> {
    let files = match target {
        Target::File(path) => vec![path.clone()],
        Target::Directory(dir) => {
            let files = collect_xml_files(dir, &options.filter, console)?;
            if files.is_empty() {
                console.info(format!("No .xml files found in: {}", dir.display()));
                return Ok(BatchReport::default());
            }
            console.info(format!(
                "Found {} XML file(s) in {}",
                files.len(),
                dir.display()
            ));
            files
        }
    };

    let mut report = BatchReport {
        stats: Statistics::new(files.len()),
        files,
        ..Default::default()
    };

    let output_dir = match target {
        Target::File(path) => parent_dir(path),
        Target::Directory(dir) => dir.clone(),
    };

    if options.dry_run {
        print_dry_run(&report.files, &output_dir, options, console);
        return Ok(report);
    }

    console.start_progress(report.files.len());
    let result = match options.mode {
        OutputMode::PerFile => {
            run_per_file(&mut report, console);
            Ok(())
        }
        OutputMode::Combined => {
            run_combined(&mut report, &output_dir.join(&options.output_name), console)
        }
    };
    console.finish_progress();

    result.map(|_| report)
}

/// 개별 모드: 파일마다 2행 CSV
fn run_per_file(report: &mut BatchReport, console: &Console) {
    for xml_path in report.files.clone() {
        let csv_path = csv_path_for(&xml_path);
        console.info(format!(
            "Processing {} -> {}",
            display_name(&xml_path),
            display_name(&csv_path)
        ));

        let result = extract_file(xml_path);
        console.tick();

        let record = match result.outcome {
            Ok(record) => record,
            Err(reason) => {
                skip(report, console, result.path, reason, result.file_size);
                continue;
            }
        };
        console.detail(format!("{} name/value pair(s)", record.len()));

        match write_record_csv(&csv_path, &record) {
            Ok(bytes) => {
                report.stats.record_extracted(result.file_size);
                report.stats.record_written(bytes);
                console.ok(format!("Saved CSV: {}", display_name(&csv_path)));
                report.saved.push(csv_path);
            }
            Err(e) => skip(report, console, result.path, e.to_string(), result.file_size),
        }
    }
}

/// 통합 모드: 전체를 CSV 하나로
fn run_combined(report: &mut BatchReport, output: &Path, console: &Console) -> Result<()> {
    let mut table = CombinedTable::new();

    for xml_path in report.files.clone() {
        let stem = file_stem(&xml_path);
        let id = extract_identifier(&stem).to_string();
        console.info(format!("Processing {} (id={})", display_name(&xml_path), id));

        let result = extract_file(xml_path);
        console.tick();

        match result.outcome {
            Ok(record) => {
                console.detail(format!("{} name/value pair(s)", record.len()));
                report.stats.record_extracted(result.file_size);
                table.push(id, record);
            }
            Err(reason) => skip(report, console, result.path, reason, result.file_size),
        }
    }

    if table.is_empty() {
        console.info("No valid info records found; no CSV written");
        return Ok(());
    }

    let bytes = write_combined_csv(output, &table)?;
    report.stats.record_written(bytes);
    console.ok(format!(
        "Saved combined CSV: {} ({} row(s), {} column(s))",
        output.display(),
        table.row_count(),
        table.header_row().len()
    ));
    report.saved.push(output.to_path_buf());
    report.combined_output = Some(output.to_path_buf());

    Ok(())
}

fn skip(report: &mut BatchReport, console: &Console, path: PathBuf, reason: String, size: u64) {
    console.warn(format!("Skipping {}: {}", display_name(&path), reason));
    report.stats.record_skipped(size);
    report.skipped.push((path, reason));
}

/// 드라이런 출력
fn print_dry_run(files: &[PathBuf], output_dir: &Path, options: &BatchOptions, console: &Console) {
    console.info("Dry run: nothing will be written");
    for (i, path) in files.iter().enumerate() {
        match options.mode {
            OutputMode::PerFile => console.info(format!(
                "  {}. {} -> {}",
                i + 1,
                display_name(path),
                display_name(&csv_path_for(path))
            )),
            OutputMode::Combined => console.info(format!(
                "  {}. {} (id={})",
                i + 1,
                display_name(path),
                extract_identifier(&file_stem(path))
            )),
        }
    }
    if options.mode == OutputMode::Combined {
        console.info(format!(
            "Combined output: {}",
            output_dir.join(&options.output_name).display()
        ));
    }
}
