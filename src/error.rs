//! 에러 타입 정의 모듈
//!
//! xinfo2csv에서 발생할 수 있는 모든 에러 타입을 정의합니다.
//! 경로/대상/패턴 에러는 실행 전체를 중단시키고, 나머지는 파일 단위로 건너뜁니다.

use std::path::PathBuf;
use thiserror::Error;

/// xinfo2csv에서 발생할 수 있는 에러 타입
#[derive(Error, Debug)]
pub enum XinfoError {
    /// 입력 경로가 존재하지 않음
    #[error("Path not found: {path}")]
    PathNotFound { path: PathBuf },

    /// 입력이 파일이지만 .xml 이 아님
    #[error("Target is a file but not .xml: {path}")]
    InvalidTarget { path: PathBuf },

    /// 유효하지 않은 글로브 패턴
    #[error("Invalid file pattern: {pattern}")]
    InvalidPattern { pattern: String },

    /// 대상 폴더를 읽을 수 없음
    #[error("Cannot read directory {path}: {reason}")]
    ReadDir { path: PathBuf, reason: String },

    /// <dir name="info"> 없음
    #[error("No <dir name='info'> found in XML")]
    InfoNotFound,

    /// info 안에 name/value 쌍이 하나도 없음
    #[error("No name/value pairs found in <dir name='info'>")]
    EmptyRecord,

    /// 입력 파일 읽기 실패
    #[error("Cannot read {file}: {reason}")]
    FileRead { file: PathBuf, reason: String },

    /// XML 파싱 실패
    #[error("XML parse error ({file}): {reason}")]
    Parse { file: PathBuf, reason: String },

    /// CSV 쓰기 실패
    #[error("Cannot write CSV {file}: {reason}")]
    Write { file: PathBuf, reason: String },
}

/// xinfo2csv 결과 타입 별칭
pub type Result<T> = std::result::Result<T, XinfoError>;
