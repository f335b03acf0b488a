//! 파이프라인 trait — 모듈 확장 포인트 정의

use crate::error::GeologError;
use crate::types::LogRecord;

/// 레코드 디코더 trait
///
/// 새로운 원시 라인 형식을 지원하려면 이 trait을 구현합니다.
/// 디코딩 실패는 에러로 반환하고, 대체 레코드 생성은 호출자가 결정합니다.
pub trait RecordDecoder: Send + Sync {
    /// 지원하는 형식 이름
    fn format_name(&self) -> &str;

    /// 원시 라인 하나를 기본 레코드로 디코딩
    fn decode(&self, line: &str) -> Result<LogRecord, GeologError>;
}

/// 보강 규칙 trait
///
/// 레코드 값을 받아 보강된 레코드 값을 돌려주는 순수 변환 단계입니다.
/// 규칙은 외부 상태를 읽지 않으며 어떤 필드 내용에도 실패하지 않습니다.
pub trait EnrichmentRule: Send + Sync {
    /// 규칙 이름
    fn name(&self) -> &str;

    /// 레코드에 규칙을 적용
    fn apply(&self, record: LogRecord) -> LogRecord;
}
