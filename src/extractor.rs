//! XML info 추출 모듈
//!
//! 하나의 XML 파일에서 `<dir name="info">` 안의 name/value 쌍을 읽어
//! 순서가 유지되는 `InfoRecord`로 만듭니다.

use quick_xml::escape::{unescape, EscapeError};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::borrow::Cow;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, XinfoError};

/// 한 파일의 info 항목들
///
/// 키는 처음 등장한 순서를 유지하고, 같은 키가 다시 나오면 값만 교체됩니다.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InfoRecord {
    keys: Vec<String>,
    values: HashMap<String, String>,
}

impl InfoRecord {
    /// 빈 레코드 생성
    pub fn new() -> Self {
        Self::default()
    }

    /// 키/값 추가 (중복 키는 위치 유지, 값 덮어쓰기)
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        if !self.values.contains_key(&key) {
            self.keys.push(key.clone());
        }
        self.values.insert(key, value.into());
    }

    /// 처음 등장한 순서대로의 키 목록
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// 키 순서대로 (키, 값) 순회
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.keys
            .iter()
            .map(move |k| (k.as_str(), self.values[k].as_str()))
    }

    /// 키 순서대로의 값 목록
    pub fn values_in_order(&self) -> Vec<&str> {
        self.iter().map(|(_, v)| v).collect()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// 파일 추출 결과
#[derive(Debug)]
pub struct ExtractResult {
    /// 처리된 파일 경로
    pub path: PathBuf,
    /// 추출된 레코드 또는 실패 사유
    pub outcome: std::result::Result<InfoRecord, String>,
    /// 원본 파일 크기
    pub file_size: u64,
}

/// 단일 XML 파일 처리
///
/// 실패해도 에러를 전파하지 않고 사유를 담은 결과를 돌려줍니다.
/// 배치는 이 결과를 보고 건너뛸지 결정합니다.
pub fn extract_file(path: PathBuf) -> ExtractResult {
    let file_size = fs::metadata(&path).map(|m| m.len()).unwrap_or(0);
    let outcome = extract_info(&path).map_err(|e| e.to_string());

    ExtractResult {
        path,
        outcome,
        file_size,
    }
}

/// XML 파일에서 `<dir name="info">` 의 name/value 쌍을 추출
///
/// # Errors
/// * `FileRead` - 파일을 읽을 수 없음
/// * `Parse` - XML 형식 오류
/// * `InfoNotFound` - 루트 바로 아래에 info 섹션이 없음
/// * `EmptyRecord` - info 섹션에 유효한 쌍이 없음
pub fn extract_info(path: &Path) -> Result<InfoRecord> {
    let content = fs::read_to_string(path).map_err(|e| XinfoError::FileRead {
        file: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    parse_info(&content).map_err(|e| match e {
        ParseFailure::Xml(reason) => XinfoError::Parse {
            file: path.to_path_buf(),
            reason,
        },
        ParseFailure::Info(err) => err,
    })
}

/// 파일 경로와 무관한 파싱 실패
#[derive(Debug)]
enum ParseFailure {
    Xml(String),
    Info(XinfoError),
}

impl From<quick_xml::Error> for ParseFailure {
    fn from(e: quick_xml::Error) -> Self {
        ParseFailure::Xml(e.to_string())
    }
}

impl From<EscapeError> for ParseFailure {
    fn from(e: EscapeError) -> Self {
        ParseFailure::Xml(e.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for ParseFailure {
    fn from(e: quick_xml::events::attributes::AttrError) -> Self {
        ParseFailure::Xml(e.to_string())
    }
}

/// XML 문자열 파싱
///
/// 문서 전체를 끝까지 읽어 형식 오류를 잡아냅니다.
/// 깊이는 현재 열린 요소 수이며 루트 자식은 1, info 자식은 2 입니다.
fn parse_info(content: &str) -> std::result::Result<InfoRecord, ParseFailure> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut reader = Reader::from_str(content);

    let mut record = InfoRecord::new();
    let mut depth = 0usize;
    let mut seen_root = false;
    let mut info_found = false;
    let mut in_info = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                if depth == 0 {
                    if seen_root {
                        return Err(ParseFailure::Xml("multiple root elements".into()));
                    }
                    seen_root = true;
                } else if depth == 1 && !info_found && is_info_dir(&e)? {
                    info_found = true;
                    in_info = true;
                } else if depth == 2 && in_info {
                    collect_pair(&e, &mut record)?;
                }
                depth += 1;
            }
            Event::Empty(e) => {
                if depth == 0 {
                    if seen_root {
                        return Err(ParseFailure::Xml("multiple root elements".into()));
                    }
                    seen_root = true;
                } else if depth == 1 && !info_found && is_info_dir(&e)? {
                    info_found = true;
                } else if depth == 2 && in_info {
                    collect_pair(&e, &mut record)?;
                }
            }
            Event::End(_) => {
                depth = depth.saturating_sub(1);
                if in_info && depth == 1 {
                    in_info = false;
                }
            }
            Event::Text(t) if depth == 0 => {
                if !t.iter().all(u8::is_ascii_whitespace) {
                    return Err(ParseFailure::Xml("text outside the root element".into()));
                }
            }
            Event::CData(_) if depth == 0 => {
                return Err(ParseFailure::Xml("text outside the root element".into()));
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !seen_root {
        return Err(ParseFailure::Xml("no element found".into()));
    }
    if depth != 0 {
        return Err(ParseFailure::Xml("unexpected end of document".into()));
    }
    if !info_found {
        return Err(ParseFailure::Info(XinfoError::InfoNotFound));
    }
    if record.is_empty() {
        return Err(ParseFailure::Info(XinfoError::EmptyRecord));
    }

    Ok(record)
}

/// `<dir name="info">` 인지 확인
fn is_info_dir(e: &BytesStart) -> std::result::Result<bool, ParseFailure> {
    if e.name().as_ref() != b"dir" {
        return Ok(false);
    }
    Ok(attribute(e, "name")?.as_deref() == Some("info"))
}

/// name/value 속성이 모두 있으면 레코드에 추가, 아니면 무시
fn collect_pair(e: &BytesStart, record: &mut InfoRecord) -> std::result::Result<(), ParseFailure> {
    if let (Some(name), Some(value)) = (attribute(e, "name")?, attribute(e, "value")?) {
        record.insert(name, value);
    }
    Ok(())
}

/// 정규화 후 이스케이프가 풀린 속성 값
fn attribute(e: &BytesStart, key: &str) -> std::result::Result<Option<String>, ParseFailure> {
    let Some(attr) = e.try_get_attribute(key)? else {
        return Ok(None);
    };
    let raw = std::str::from_utf8(&attr.value).map_err(|err| ParseFailure::Xml(err.to_string()))?;
    let normalized = normalize_attribute(raw);
    Ok(Some(unescape(&normalized)?.into_owned()))
}

/// 속성 값 공백 정규화
///
/// 문자 그대로의 탭/줄바꿈은 공백 하나가 되고 CRLF는 한 번만 바뀝니다.
/// `&#10;` 같은 문자 참조는 이 단계 뒤에 풀리므로 그대로 남습니다.
fn normalize_attribute(raw: &str) -> Cow<'_, str> {
    if !raw.contains(|c: char| matches!(c, '\t' | '\n' | '\r')) {
        return Cow::Borrowed(raw);
    }
    Cow::Owned(
        raw.replace("\r\n", "\n")
            .replace(|c: char| matches!(c, '\t' | '\n' | '\r'), " "),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(xml: &str) -> std::result::Result<InfoRecord, ParseFailure> {
        parse_info(xml)
    }

    #[test]
    fn test_extract_pairs_in_document_order() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<imgdir name="0100100.img">
  <dir name="info">
    <int32 name="level" value="1"/>
    <int32 name="maxHP" value="8"/>
    <single name="speed" value="-0.5"/>
    <string name="elemAttr" value="F2"/>
  </dir>
</imgdir>"#;

        let record = parse(xml).unwrap();
        assert_eq!(record.keys(), ["level", "maxHP", "speed", "elemAttr"]);
        assert_eq!(record.values_in_order(), vec!["1", "8", "-0.5", "F2"]);
    }

    #[test]
    fn test_duplicate_key_keeps_position_last_value_wins() {
        let xml = r#"<root><dir name="info">
            <int32 name="a" value="1"/>
            <int32 name="b" value="2"/>
            <int32 name="a" value="3"/>
        </dir></root>"#;

        let record = parse(xml).unwrap();
        assert_eq!(record.keys(), ["a", "b"]);
        assert_eq!(record.get("a"), Some("3"));
        assert_eq!(record.len(), 2);
    }

    #[test]
    fn test_children_missing_attributes_are_skipped() {
        let xml = r#"<root><dir name="info">
            <int32 name="only_name"/>
            <int32 value="only_value"/>
            <int32 name="ok" value="1"/>
        </dir></root>"#;

        let record = parse(xml).unwrap();
        assert_eq!(record.keys(), ["ok"]);
    }

    #[test]
    fn test_first_info_dir_wins() {
        let xml = r#"<root>
            <dir name="other"><int32 name="x" value="0"/></dir>
            <dir name="info"><int32 name="first" value="1"/></dir>
            <dir name="info"><int32 name="second" value="2"/></dir>
        </root>"#;

        let record = parse(xml).unwrap();
        assert_eq!(record.keys(), ["first"]);
    }

    #[test]
    fn test_nested_info_is_not_top_level() {
        let xml = r#"<root><dir name="wrap">
            <dir name="info"><int32 name="x" value="1"/></dir>
        </dir></root>"#;

        assert!(matches!(
            parse(xml),
            Err(ParseFailure::Info(XinfoError::InfoNotFound))
        ));
    }

    #[test]
    fn test_grandchildren_ignored() {
        let xml = r#"<root><dir name="info">
            <dir name="sub" value="v"><int32 name="deep" value="9"/></dir>
            <int32 name="flat" value="1"/>
        </dir></root>"#;

        let record = parse(xml).unwrap();
        assert_eq!(record.keys(), ["sub", "flat"]);
    }

    #[test]
    fn test_empty_info_is_rejected() {
        assert!(matches!(
            parse(r#"<root><dir name="info"/></root>"#),
            Err(ParseFailure::Info(XinfoError::EmptyRecord))
        ));
        assert!(matches!(
            parse(r#"<root><dir name="info"><int32 name="x"/></dir></root>"#),
            Err(ParseFailure::Info(XinfoError::EmptyRecord))
        ));
    }

    #[test]
    fn test_attribute_values_are_unescaped() {
        let xml = r#"<root><dir name="info"><string name="desc" value="a &amp; &quot;b&quot;"/></dir></root>"#;
        let record = parse(xml).unwrap();
        assert_eq!(record.get("desc"), Some("a & \"b\""));
    }

    #[test]
    fn test_malformed_xml_is_parse_error() {
        assert!(matches!(
            parse(r#"<root><dir name="info"><int32 name="a" value="1"/></dir>"#),
            Err(ParseFailure::Xml(_))
        ));
        assert!(matches!(
            parse(r#"<root><dir name="info"></wrong></root>"#),
            Err(ParseFailure::Xml(_))
        ));
        assert!(matches!(parse(""), Err(ParseFailure::Xml(_))));
    }

    #[test]
    fn test_text_outside_root_is_parse_error() {
        let body = r#"<root><dir name="info"><int32 name="a" value="1"/></dir></root>"#;

        assert!(matches!(
            parse(&format!("{}garbage", body)),
            Err(ParseFailure::Xml(_))
        ));
        assert!(matches!(
            parse(&format!("junk{}", body)),
            Err(ParseFailure::Xml(_))
        ));
        assert!(parse(&format!("\n  {}\n\n", body)).is_ok());
    }

    #[test]
    fn test_attribute_whitespace_is_normalized() {
        let xml = "<root><dir name=\"info\"><string name=\"d\" value=\"a\nb\tc\r\nd\"/></dir></root>";
        assert_eq!(parse(xml).unwrap().get("d"), Some("a b c d"));

        let xml = r#"<root><dir name="info"><string name="d" value="a&#10;b&#9;c"/></dir></root>"#;
        assert_eq!(parse(xml).unwrap().get("d"), Some("a\nb\tc"));
    }

    #[test]
    fn test_byte_order_mark_ignored() {
        let xml = "\u{feff}<root><dir name=\"info\"><int32 name=\"a\" value=\"1\"/></dir></root>";
        assert_eq!(parse(xml).unwrap().keys(), ["a"]);
    }

    #[test]
    fn test_info_record_iter() {
        let mut record = InfoRecord::new();
        record.insert("x", "1");
        record.insert("y", "2");

        let pairs: Vec<_> = record.iter().collect();
        assert_eq!(pairs, vec![("x", "1"), ("y", "2")]);
    }
}
