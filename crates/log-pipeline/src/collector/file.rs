//! 파일 기반 라인 수집기
//!
//! 로그 파일 전체를 비동기로 읽어 [`LineReader`]를 생성합니다.
//! 한 번의 실행은 파일의 현재 내용 전체를 대상으로 하는 배치 처리입니다.

use std::path::Path;

use super::LineReader;
use crate::error::LogPipelineError;

/// 파일 소스 식별자 접두어
pub const FILE_SOURCE_PREFIX: &str = "file:";

impl LineReader {
    /// 로그 파일을 열어 리더를 생성합니다.
    ///
    /// 파일이 없거나 읽을 수 없으면 `Collector` 에러를 반환합니다.
    /// 빈 파일은 라인이 0개인 정상 리더가 됩니다.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, LogPipelineError> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| LogPipelineError::Collector {
                source_type: "file".to_owned(),
                reason: format!("{}: {}", path.display(), e),
            })?;

        let source = format!("{}{}", FILE_SOURCE_PREFIX, path.display());
        let reader = Self::from_text(source, &content);
        tracing::debug!(
            path = %path.display(),
            lines = reader.remaining(),
            "opened log file"
        );
        Ok(reader)
    }
}
