//! 콘솔 출력 모듈
//!
//! `[INFO]`, `[WARN]`, `[OK]`, `[ERROR]` 태그가 붙은 진행 메시지와 진행률 바를 담당합니다.
//! 진행률 바가 보이는 동안에는 메시지를 바 위에 출력해 화면이 깨지지 않게 합니다.

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

/// 진행 상황 출력기
pub struct Console {
    pb: ProgressBar,
    verbose: bool,
}

impl Console {
    /// 출력기 생성 (진행률 바 없음)
    pub fn new(verbose: bool) -> Self {
        Self {
            pb: ProgressBar::hidden(),
            verbose,
        }
    }

    /// 파일 처리용 진행률 바 시작
    ///
    /// 터미널이 아니면 indicatif가 알아서 숨깁니다.
    pub fn start_progress(&mut self, total: usize) {
        let pb = ProgressBar::new(total as u64);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
        {
            pb.set_style(style.progress_chars("█▓▒░"));
        }
        self.pb = pb;
    }

    /// 진행률 한 칸 증가
    pub fn tick(&self) {
        self.pb.inc(1);
    }

    /// 진행률 바 종료
    pub fn finish_progress(&self) {
        self.pb.finish_and_clear();
    }

    pub fn info(&self, message: impl AsRef<str>) {
        self.emit(format!("{} {}", "[INFO]".bright_cyan(), message.as_ref()));
    }

    pub fn ok(&self, message: impl AsRef<str>) {
        self.emit(format!("{} {}", "[OK]".bright_green(), message.as_ref()));
    }

    pub fn warn(&self, message: impl AsRef<str>) {
        self.emit(format!("{} {}", "[WARN]".bright_yellow(), message.as_ref()));
    }

    /// 상세 모드에서만 출력
    pub fn detail(&self, message: impl AsRef<str>) {
        if self.verbose {
            self.emit(format!("       {}", message.as_ref().dimmed()));
        }
    }

    /// 치명적 에러는 항상 stderr
    pub fn error(&self, message: impl AsRef<str>) {
        self.pb.suspend(|| {
            eprintln!("{} {}", "[ERROR]".bright_red(), message.as_ref());
        });
    }

    fn emit(&self, line: String) {
        if self.pb.is_hidden() {
            println!("{}", line);
        } else {
            self.pb.println(line);
        }
    }
}

/// 실행 헤더 출력
pub fn print_banner(lines: &[(&str, String)]) {
    println!("\n{}", "═".repeat(50).bright_blue());
    println!("{}", " 🚀 XML INFO TO CSV CONVERTER".bright_white().bold());
    println!("{}", "═".repeat(50).bright_blue());
    for (label, value) in lines {
        println!("  {} {}", format!("{}:", label).bright_white(), value);
    }
    println!("{}", "═".repeat(50).bright_blue());
}
