//! 라인 수집 모듈 -- 로그 소스에서 원시 라인을 순서대로 공급합니다.
//!
//! # 수집 소스
//! - [`LineReader::open`]: 로그 파일 ([`file`] 모듈)
//! - [`LineReader::from_text`], [`LineReader::from_lines`]: 메모리 내 소스 (테스트, 스트림 버퍼)
//!
//! 공백 라인은 여기서 걸러지므로 디코더는 비어 있지 않은 라인만 받습니다.
//! 소스가 존재하지 않는 것은 실행 전체의 실패이고, 비어 있는 소스는
//! 정상 입력(라인 0개)입니다.

pub mod file;

/// 수집된 원시 라인
///
/// 수집기가 생성하고 디코더가 소비한 뒤 버려지는 중간 데이터입니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLine {
    /// 원시 라인 텍스트 (줄바꿈 제외)
    pub text: String,
    /// 수집 소스 식별자 (예: "file:/var/log/gis-server.log")
    pub source: String,
}

impl RawLine {
    /// 새 RawLine을 생성합니다.
    pub fn new(text: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source: source.into(),
        }
    }
}

/// 순서가 보장되는 원시 라인 공급자
///
/// 입력 순서대로 비어 있지 않은 라인만 내보내는 이터레이터입니다.
#[derive(Debug)]
pub struct LineReader {
    /// 소스 식별자
    source: String,
    /// 남은 라인
    lines: std::vec::IntoIter<String>,
}

impl LineReader {
    /// 텍스트 전체를 라인 단위로 나누어 리더를 생성합니다.
    ///
    /// `\n`과 `\r\n` 줄바꿈을 모두 처리합니다.
    pub fn from_text(source: impl Into<String>, text: &str) -> Self {
        Self::from_lines(source, text.lines())
    }

    /// 라인 목록으로 리더를 생성합니다. 공백 라인은 제외됩니다.
    pub fn from_lines<I, S>(source: impl Into<String>, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let lines: Vec<String> = lines
            .into_iter()
            .map(Into::into)
            .filter(|line| !line.trim().is_empty())
            .collect();

        Self {
            source: source.into(),
            lines: lines.into_iter(),
        }
    }

    /// 소스 식별자를 반환합니다.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// 아직 내보내지 않은 라인 수를 반환합니다.
    pub fn remaining(&self) -> usize {
        self.lines.len()
    }
}

impl Iterator for LineReader {
    type Item = RawLine;

    fn next(&mut self) -> Option<Self::Item> {
        self.lines.next().map(|text| RawLine {
            text,
            source: self.source.clone(),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.lines.size_hint()
    }
}

impl ExactSizeIterator for LineReader {}
