//! 통합 CSV 테이블 모듈
//!
//! 여러 파일의 레코드를 모아 하나의 헤더와 행 목록으로 만듭니다.

use std::collections::{HashMap, HashSet};

use crate::extractor::InfoRecord;

/// 통합 CSV의 첫 번째 열 이름
pub const ID_COLUMN: &str = "id";

/// 처음 등장한 순서를 유지하는 키 합집합
#[derive(Debug, Clone, Default)]
pub struct HeaderSet {
    order: Vec<String>,
    seen: HashSet<String>,
}

impl HeaderSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// 새 키만 뒤에 추가
    pub fn extend_from(&mut self, record: &InfoRecord) {
        for key in record.keys() {
            if self.seen.insert(key.clone()) {
                self.order.push(key.clone());
            }
        }
    }

    pub fn keys(&self) -> &[String] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// 통합 모드 누적기
///
/// 레코드는 (식별자, 값 맵)으로 보관하고, 출력할 때 최종 헤더에 맞춰 펼칩니다.
#[derive(Debug, Default)]
pub struct CombinedTable {
    headers: HeaderSet,
    rows: Vec<(String, HashMap<String, String>)>,
}

impl CombinedTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// 레코드 하나를 누적
    pub fn push(&mut self, id: impl Into<String>, record: InfoRecord) {
        self.headers.extend_from(&record);
        let values = record
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        self.rows.push((id.into(), values));
    }

    pub fn headers(&self) -> &HeaderSet {
        &self.headers
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// `id` + 누적된 헤더
    pub fn header_row(&self) -> Vec<&str> {
        std::iter::once(ID_COLUMN)
            .chain(self.headers.keys().iter().map(String::as_str))
            .collect()
    }

    /// 헤더 순서로 펼친 데이터 행 (없는 키는 빈 문자열)
    pub fn output_rows(&self) -> impl Iterator<Item = Vec<&str>> + '_ {
        self.rows.iter().map(move |(id, values)| {
            std::iter::once(id.as_str())
                .chain(
                    self.headers
                        .keys()
                        .iter()
                        .map(|k| values.get(k).map(String::as_str).unwrap_or("")),
                )
                .collect()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pairs: &[(&str, &str)]) -> InfoRecord {
        let mut r = InfoRecord::new();
        for (k, v) in pairs {
            r.insert(*k, *v);
        }
        r
    }

    #[test]
    fn test_header_set_first_seen_order() {
        let mut headers = HeaderSet::new();
        headers.extend_from(&record(&[("level", "1"), ("hp", "10")]));
        headers.extend_from(&record(&[("mp", "5"), ("level", "2")]));

        assert_eq!(headers.keys(), ["level", "hp", "mp"]);
        assert_eq!(headers.len(), 3);
    }

    #[test]
    fn test_missing_keys_render_empty() {
        let mut table = CombinedTable::new();
        table.push("1", record(&[("level", "1"), ("hp", "10")]));
        table.push("2", record(&[("level", "2"), ("mp", "5")]));

        assert_eq!(table.header_row(), vec!["id", "level", "hp", "mp"]);

        let rows: Vec<Vec<&str>> = table.output_rows().collect();
        assert_eq!(rows[0], vec!["1", "1", "10", ""]);
        assert_eq!(rows[1], vec!["2", "2", "", "5"]);
    }

    #[test]
    fn test_every_row_has_full_width() {
        let mut table = CombinedTable::new();
        table.push("a", record(&[("x", "1")]));
        table.push("b", record(&[("y", "2"), ("z", "3")]));
        table.push("c", record(&[("w", "4")]));

        let width = table.header_row().len();
        assert!(table.output_rows().all(|row| row.len() == width));
        assert_eq!(table.row_count(), 3);
    }

    #[test]
    fn test_empty_table() {
        let table = CombinedTable::new();
        assert!(table.is_empty());
        assert!(table.headers().is_empty());
        assert_eq!(table.header_row(), vec!["id"]);
    }
}
