//! CSV 출력 모듈
//!
//! 개별 모드(2행 CSV)와 통합 모드(헤더 + 파일별 행) 쓰기를 담당합니다.

use csv::Writer;
use std::fs::File;
use std::path::Path;

use crate::error::{Result, XinfoError};
use crate::extractor::InfoRecord;
use crate::table::CombinedTable;

/// 레코드 하나를 2행 CSV로 저장 (1행: 키, 2행: 값)
///
/// # Returns
/// 쓰인 바이트 수
pub fn write_record_csv(path: &Path, record: &InfoRecord) -> Result<u64> {
    let mut writer = create_writer(path)?;

    writer
        .write_record(record.keys())
        .map_err(|e| write_error(path, e))?;
    writer
        .write_record(record.values_in_order())
        .map_err(|e| write_error(path, e))?;

    finish(path, writer)
}

/// 통합 테이블을 CSV로 저장
///
/// # Returns
/// 쓰인 바이트 수
pub fn write_combined_csv(path: &Path, table: &CombinedTable) -> Result<u64> {
    let mut writer = create_writer(path)?;

    writer
        .write_record(table.header_row())
        .map_err(|e| write_error(path, e))?;

    for row in table.output_rows() {
        writer.write_record(row).map_err(|e| write_error(path, e))?;
    }

    finish(path, writer)
}

fn create_writer(path: &Path) -> Result<Writer<File>> {
    Writer::from_path(path).map_err(|e| write_error(path, e))
}

/// 버퍼를 비우고 최종 파일 크기 반환
fn finish(path: &Path, mut writer: Writer<File>) -> Result<u64> {
    writer.flush().map_err(|e| XinfoError::Write {
        file: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    drop(writer);

    Ok(std::fs::metadata(path).map(|m| m.len()).unwrap_or(0))
}

fn write_error(path: &Path, e: csv::Error) -> XinfoError {
    XinfoError::Write {
        file: path.to_path_buf(),
        reason: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_write_record_two_rows() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out.csv");

        let mut record = InfoRecord::new();
        record.insert("level", "1");
        record.insert("name", "Snail, Blue");

        let bytes = write_record_csv(&path, &record).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();

        assert_eq!(lines, vec!["level,name", "1,\"Snail, Blue\""]);
        assert_eq!(bytes, content.len() as u64);
    }

    #[test]
    fn test_write_combined_quotes_embedded_quotes() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("all.csv");

        let mut record = InfoRecord::new();
        record.insert("desc", "say \"hi\"");
        let mut table = CombinedTable::new();
        table.push("7", record);

        write_combined_csv(&path, &table).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();

        assert_eq!(lines, vec!["id,desc", "7,\"say \"\"hi\"\"\""]);
    }

    #[test]
    fn test_write_to_missing_directory_fails() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nope").join("out.csv");

        let mut record = InfoRecord::new();
        record.insert("a", "1");

        let err = write_record_csv(&path, &record).unwrap_err();
        assert!(matches!(err, XinfoError::Write { .. }));
    }
}
