//! 통계 및 유틸리티 모듈
//!
//! 처리 통계 수집 및 포맷팅을 담당합니다.

use colored::Colorize;
use std::time::{Duration, Instant};

/// 처리 통계 구조체
#[derive(Debug)]
pub struct Statistics {
    /// 발견된 XML 파일 수
    pub total_files: usize,
    /// 추출 성공 수
    pub extracted: usize,
    /// 건너뛴 파일 수
    pub skipped: usize,
    /// 생성된 CSV 수
    pub csv_written: usize,
    /// 읽은 총 바이트
    pub bytes_read: u64,
    /// 쓴 총 바이트
    pub bytes_written: u64,
    start_time: Instant,
}

impl Default for Statistics {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Statistics {
    pub fn new(total_files: usize) -> Self {
        Self {
            total_files,
            extracted: 0,
            skipped: 0,
            csv_written: 0,
            bytes_read: 0,
            bytes_written: 0,
            start_time: Instant::now(),
        }
    }

    /// 추출 성공 기록
    pub fn record_extracted(&mut self, bytes_read: u64) {
        self.extracted += 1;
        self.bytes_read += bytes_read;
    }

    /// 건너뛴 파일 기록
    pub fn record_skipped(&mut self, bytes_read: u64) {
        self.skipped += 1;
        self.bytes_read += bytes_read;
    }

    /// CSV 저장 기록
    pub fn record_written(&mut self, bytes: u64) {
        self.csv_written += 1;
        self.bytes_written += bytes;
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// 처리 통계 요약 출력
    pub fn print_summary(&self) {
        println!("\n{}", "═".repeat(50).bright_blue());
        println!("{}", " 📊 처리 통계".bright_white().bold());
        println!("{}", "═".repeat(50).bright_blue());

        println!("  {} XML 파일:     {}", "📁".bright_cyan(), self.total_files);
        println!(
            "  {} 추출 성공:    {}",
            "✅".bright_green(),
            self.extracted.to_string().green()
        );

        if self.skipped > 0 {
            println!(
                "  {} 건너뜀:       {}",
                "⚠️".bright_yellow(),
                self.skipped.to_string().yellow()
            );
        } else {
            println!("  {} 건너뜀:       {}", "✅".bright_green(), "0".green());
        }

        println!("  {} CSV 생성:     {}", "📄".bright_white(), self.csv_written);
        println!(
            "  {} 입력 용량:    {}",
            "📥".bright_yellow(),
            format_bytes(self.bytes_read)
        );
        println!(
            "  {} 출력 용량:    {}",
            "📤".bright_magenta(),
            format_bytes(self.bytes_written)
        );
        println!(
            "  {} 처리 시간:    {}",
            "⏱️".bright_cyan(),
            format_duration(self.elapsed())
        );

        println!("{}", "═".repeat(50).bright_blue());
    }
}

/// 바이트를 읽기 쉬운 형식으로 변환
///
/// # Examples
/// ```
/// use xinfo2csv::stats::format_bytes;
///
/// assert_eq!(format_bytes(500), "500 B");
/// assert_eq!(format_bytes(1024), "1.00 KB");
/// assert_eq!(format_bytes(1048576), "1.00 MB");
/// ```
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// 경과 시간을 읽기 쉬운 형식으로 변환
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    let millis = duration.subsec_millis();

    if secs >= 60 {
        format!("{}분 {}초", secs / 60, secs % 60)
    } else if secs > 0 {
        format!("{}.{:03}초", secs, millis)
    } else {
        format!("{}ms", millis)
    }
}
