#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use geolog_log_pipeline::{LogPipelineBuilder, PipelineConfigBuilder};

/// 퍼저용 구조적 입력
#[derive(Arbitrary, Debug)]
struct FuzzInput {
    /// 입력 라인 (최대 32개로 제한)
    lines: Vec<String>,
    response_time_threshold_ms: u16,
    geocode_time_threshold_ms: u16,
}

fuzz_target!(|input: FuzzInput| {
    let Ok(config) = PipelineConfigBuilder::new()
        .response_time_threshold_ms(f64::from(input.response_time_threshold_ms))
        .geocode_time_threshold_ms(f64::from(input.geocode_time_threshold_ms))
        .build()
    else {
        return;
    };
    let Ok(pipeline) = LogPipelineBuilder::new().config(config).build() else {
        return;
    };

    let lines: Vec<String> = input.lines.into_iter().take(32).collect();
    let non_blank = lines.iter().filter(|l| !l.trim().is_empty()).count();

    let Ok((store, stats)) = pipeline.ingest_lines(lines) else {
        panic!("in-memory ingestion must not fail");
    };

    // 공백이 아닌 라인마다 정확히 하나의 레코드, 1부터 연속 번호
    assert_eq!(store.len(), non_blank);
    assert_eq!(stats.records_stored as usize, non_blank);
    for (i, record) in store.iter().enumerate() {
        assert_eq!(record.line_number, i as u64 + 1);
    }

    let view = store.query();
    let _ = view.dashboard();
});
