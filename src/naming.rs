//! 파일 이름 규칙 모듈
//!
//! `Mob.0100100.img.xml` 형태의 파일 이름에서 식별자와 출력 경로를 만듭니다.

use std::path::{Path, PathBuf};

/// 확장자를 뺀 파일 이름 (UTF-8이 아니면 손실 변환)
pub fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// 파일 이름에서 식별자 추출
///
/// `.` 으로 나눈 두 번째 조각을 돌려주고, 조각이 하나뿐이면 이름 전체를 돌려줍니다.
///
/// # Examples
/// ```
/// use xinfo2csv::naming::extract_identifier;
///
/// assert_eq!(extract_identifier("Mob.0100100.img"), "0100100");
/// assert_eq!(extract_identifier("single"), "single");
/// ```
pub fn extract_identifier(stem: &str) -> &str {
    let mut parts = stem.split('.');
    match (parts.next(), parts.next()) {
        (Some(_), Some(second)) => second,
        _ => stem,
    }
}

/// 개별 CSV 출력 경로 (같은 폴더, 같은 이름, .csv 확장자)
pub fn csv_path_for(xml_path: &Path) -> PathBuf {
    xml_path.with_extension("csv")
}

/// 경로의 파일 이름만 표시용 문자열로
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
