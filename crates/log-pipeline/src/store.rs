//! 레코드 저장소 -- 한 번의 실행 동안 보강된 레코드를 보관합니다.
//!
//! [`RecordStore`]는 추가만 가능한 순서 있는 시퀀스입니다. 삭제나 제자리
//! 수정 API는 없고, 조회 계층은 읽기 전용 스냅샷으로만 접근합니다.
//!
//! # 순서 불변식
//! 새 레코드의 `line_number`는 마지막 레코드보다 커야 합니다.
//! 위반 시 [`LogPipelineError::OutOfOrder`]를 반환하고 레코드를 버립니다.

use geolog_core::types::LogRecord;

use crate::error::LogPipelineError;
use crate::query::QueryView;

/// 추가 전용 레코드 저장소
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    /// 도착 순서대로 저장된 레코드
    records: Vec<LogRecord>,
}

impl RecordStore {
    /// 빈 저장소를 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 레코드를 추가합니다.
    pub fn append(&mut self, record: LogRecord) -> Result<(), LogPipelineError> {
        let last = self.last_line_number();
        if record.line_number <= last {
            return Err(LogPipelineError::OutOfOrder {
                last,
                got: record.line_number,
            });
        }
        self.records.push(record);
        Ok(())
    }

    /// 마지막 레코드의 라인 번호를 반환합니다. 비어 있으면 0입니다.
    pub fn last_line_number(&self) -> u64 {
        self.records.last().map_or(0, |r| r.line_number)
    }

    /// 레코드를 도착 순서대로 순회합니다.
    pub fn iter(&self) -> std::slice::Iter<'_, LogRecord> {
        self.records.iter()
    }

    /// 전체 레코드 스냅샷을 반환합니다.
    pub fn records(&self) -> &[LogRecord] {
        &self.records
    }

    /// 저장된 레코드 수를 반환합니다.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// 저장소가 비어 있는지 확인합니다.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// 조회 뷰를 생성합니다.
    pub fn query(&self) -> QueryView<'_> {
        QueryView::new(self)
    }
}

impl<'a> IntoIterator for &'a RecordStore {
    type Item = &'a LogRecord;
    type IntoIter = std::slice::Iter<'a, LogRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
