//! 입력 파일 필터 모듈
//!
//! `.xml` 확장자 검사와 선택적인 glob 파일 이름 패턴을 함께 적용합니다.

use glob::Pattern;
use std::path::Path;

use crate::error::{Result, XinfoError};

/// 처리 대상 확장자
pub const XML_EXTENSION: &str = "xml";

/// 확장자가 .xml 인지 (대소문자 무시)
pub fn has_xml_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|s| s.eq_ignore_ascii_case(XML_EXTENSION))
        .unwrap_or(false)
}

/// 입력 파일 필터
#[derive(Debug, Default)]
pub struct FileFilter {
    pattern: Option<Pattern>,
}

impl FileFilter {
    /// 새 필터 생성
    ///
    /// # Arguments
    /// * `pattern` - 파일 이름 glob 패턴 (None이면 .xml 파일 전부)
    ///
    /// # Examples
    /// ```
    /// use std::path::Path;
    /// use xinfo2csv::pattern::FileFilter;
    ///
    /// let filter = FileFilter::new(Some("Mob.*")).unwrap();
    /// assert!(filter.accepts(Path::new("Mob.0100100.img.xml")));
    /// assert!(!filter.accepts(Path::new("Npc.9000.img.xml")));
    /// assert!(!filter.accepts(Path::new("Mob.0100100.img.csv")));
    /// ```
    pub fn new(pattern: Option<&str>) -> Result<Self> {
        let pattern = pattern
            .map(|p| {
                Pattern::new(p).map_err(|_| XinfoError::InvalidPattern {
                    pattern: p.to_string(),
                })
            })
            .transpose()?;

        Ok(Self { pattern })
    }

    /// 처리 대상 파일인지 확인
    pub fn accepts(&self, path: &Path) -> bool {
        if !has_xml_extension(path) {
            return false;
        }

        match (&self.pattern, path.file_name().and_then(|s| s.to_str())) {
            (Some(p), Some(name)) => p.matches(name),
            (Some(_), None) => false,
            (None, _) => true,
        }
    }

    pub fn pattern_str(&self) -> Option<&str> {
        self.pattern.as_ref().map(Pattern::as_str)
    }
}
