//! xinfo2csv - XML INFO TO CSV CONVERTER
//!
//! XML 파일의 `<dir name="info">` 안에 있는 name/value 쌍을 CSV로 추출하는 CLI 도구입니다.
//!
//! # 주요 기능
//!
//! - 📄 **개별 모드**: XML 파일마다 같은 이름의 2행 CSV 생성 (1행: 항목 이름, 2행: 값)
//! - 📚 **통합 모드**: 폴더 전체를 `mob_info_all.csv` 하나로 병합, 파일 이름의 식별자를 `id` 열로 사용
//! - ⚠️ **건너뛰기**: info 섹션이 없거나 비어 있거나 깨진 XML은 경고만 남기고 계속 진행
//! - 🔍 **패턴 필터링**: glob 형식의 파일 이름 필터
//! - 🧪 **드라이런 모드**: 실제 저장 없이 처리될 파일 목록 미리 확인
//! - 📈 **처리 통계**: 성공/건너뜀 수, 입출력 용량, 처리 시간
//!
//! # 예제
//!
//! ```bash
//! # 현재 폴더의 *.xml 전부를 개별 CSV로
//! xinfo2csv
//!
//! # 폴더 전체를 하나의 CSV로
//! xinfo2csv ./Mob --mode combined
//! ```

pub mod batch;
pub mod cli;
pub mod console;
pub mod error;
pub mod extractor;
pub mod naming;
pub mod pattern;
pub mod stats;
pub mod table;
pub mod writer;

// Re-exports for convenient access
pub use batch::{BatchOptions, BatchReport, Target};
pub use cli::{Args, OutputMode};
pub use error::{Result, XinfoError};
pub use extractor::{extract_file, extract_info, ExtractResult, InfoRecord};
pub use naming::extract_identifier;
pub use pattern::FileFilter;
pub use stats::{format_bytes, Statistics};
pub use table::{CombinedTable, HeaderSet};
