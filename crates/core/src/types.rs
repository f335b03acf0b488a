//! 도메인 타입 — 시스템 전역에서 사용되는 공통 타입
//!
//! 파이프라인의 모든 단계(디코더, 추출기, 규칙 엔진, 저장소, 조회 계층)가
//! 공유하는 데이터 구조를 정의합니다. 필드 이름은 다운스트림 색인 엔진과의
//! 안정적인 계약이므로 직렬화 이름을 바꾸면 안 됩니다.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// 디코딩할 수 없는 라인에 부여되는 로거 이름
pub const RAW_LOGGER: &str = "raw";

/// 레벨을 알 수 없을 때 사용하는 기본 레벨
pub const DEFAULT_LEVEL: &str = "info";

/// 성능 알림 규칙이 추가하는 태그
pub const PERFORMANCE_ALERT_TAG: &str = "performance_alert";

/// [`LogRecord`]의 이름 있는 필드의 직렬화 이름
///
/// `attributes`의 키가 이 이름과 겹치면 평탄화된 문서에서 실제 필드를
/// 가리게 되므로 디코더는 이 이름을 `attributes`에 그대로 넣지 않습니다.
pub const RECORD_FIELDS: [&str; 14] = [
    "timestamp",
    "level",
    "logger",
    "message",
    "correlation_id",
    "context",
    "performance",
    "service",
    "environment",
    "version",
    "alert",
    "tags",
    "operation_type",
    "line_number",
];

const ALERT_FIELD: &str = "alert";
const OPERATION_TYPE_FIELD: &str = "operation_type";

/// 보강된 로그 레코드
///
/// 원시 라인 하나당 정확히 하나가 생성되며, 디코더 → 추출기 → 규칙 엔진을
/// 거친 뒤 저장소에 들어가면 더 이상 변경되지 않습니다.
///
/// 항상 존재하는 필드는 이름 있는 필드로, 페이로드마다 달라지는
/// 나머지 최상위 필드는 [`attributes`](Self::attributes)에 보관합니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    /// ISO-8601 타임스탬프
    pub timestamp: String,
    /// 심각도 레이블 (info, warn, error 등)
    pub level: String,
    /// 로그를 남긴 컴포넌트 이름
    pub logger: String,
    /// 메타데이터 토큰이 제거된 사람이 읽는 메시지
    pub message: String,
    /// 요청/작업 체인 식별자
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<String>,
    /// 숫자가 아닌 임베디드 필드
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub context: BTreeMap<String, String>,
    /// 숫자 접미사를 가진 성능 지표
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub performance: BTreeMap<String, f64>,
    /// 서비스 이름 (설정 상수)
    #[serde(default)]
    pub service: String,
    /// 배포 환경 (설정 상수)
    #[serde(default)]
    pub environment: String,
    /// 서비스 버전 (설정 상수)
    #[serde(default)]
    pub version: String,
    /// 임계값 규칙이 붙인 알림 레이블
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alert: Option<AlertLabel>,
    /// 규칙 매칭으로 누적되는 태그 (중복 허용, 추가만 가능)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// 작업 유형 분류
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation_type: Option<OperationType>,
    /// 입력 시퀀스 내 1부터 시작하는 위치
    #[serde(default)]
    pub line_number: u64,
    /// 페이로드의 나머지 최상위 필드 (원본 그대로)
    #[serde(flatten)]
    pub attributes: BTreeMap<String, serde_json::Value>,
}

impl LogRecord {
    /// 기본 필드만 채워진 레코드를 생성합니다.
    pub fn new(
        timestamp: impl Into<String>,
        level: impl Into<String>,
        logger: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: timestamp.into(),
            level: level.into(),
            logger: logger.into(),
            message: message.into(),
            correlation_id: None,
            context: BTreeMap::new(),
            performance: BTreeMap::new(),
            service: String::new(),
            environment: String::new(),
            version: String::new(),
            alert: None,
            tags: Vec::new(),
            operation_type: None,
            line_number: 0,
            attributes: BTreeMap::new(),
        }
    }

    /// 구조화 디코딩에 실패한 라인으로 만든 레코드인지 확인합니다.
    pub fn is_raw(&self) -> bool {
        self.logger == RAW_LOGGER
    }

    /// 성능 지표 값을 조회합니다.
    pub fn metric(&self, key: &str) -> Option<f64> {
        self.performance.get(key).copied()
    }

    /// 알림 레이블을 설정합니다.
    ///
    /// 페이로드에서 넘어온 알 수 없는 `alert` 값은 함께 제거됩니다.
    pub fn set_alert(&mut self, label: AlertLabel) {
        self.attributes.remove(ALERT_FIELD);
        self.alert = Some(label);
    }

    /// 작업 유형을 설정합니다.
    ///
    /// 페이로드에서 넘어온 알 수 없는 `operation_type` 값은 함께 제거됩니다.
    pub fn set_operation_type(&mut self, op: OperationType) {
        self.attributes.remove(OPERATION_TYPE_FIELD);
        self.operation_type = Some(op);
    }
}

impl fmt::Display for LogRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} [{}] {}: {}",
            self.line_number, self.level, self.logger, self.message,
        )
    }
}

/// 알림 레이블
///
/// 성능 임계값을 초과한 레코드에 붙는 분류입니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertLabel {
    /// 응답 시간 임계값 초과
    SlowResponse,
    /// 지오코딩 시간 임계값 초과
    SlowGeocoding,
}

impl AlertLabel {
    /// 알려진 모든 알림 레이블
    pub const ALL: [AlertLabel; 2] = [AlertLabel::SlowResponse, AlertLabel::SlowGeocoding];

    /// 직렬화 이름을 반환합니다.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SlowResponse => "slow_response",
            Self::SlowGeocoding => "slow_geocoding",
        }
    }
}

impl fmt::Display for AlertLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 작업 유형
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationType {
    /// 정방향 지오코딩
    Geocoding,
    /// 역지오코딩
    ReverseGeocoding,
    /// 일반 HTTP 요청
    HttpRequest,
}

impl OperationType {
    /// 직렬화 이름을 반환합니다.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Geocoding => "geocoding",
            Self::ReverseGeocoding => "reverse_geocoding",
            Self::HttpRequest => "http_request",
        }
    }
}

impl fmt::Display for OperationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
