#![no_main]

use geolog_log_pipeline::extract::{SEGMENT_DELIMITER, extract};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|message: &str| {
    let fields = extract(message);

    // 기본 메시지는 첫 세그먼트
    let base = message.split(SEGMENT_DELIMITER).next().unwrap_or_default();
    assert_eq!(fields.message, base);

    // 한 키는 두 맵 중 하나에만 존재
    for key in fields.performance.keys() {
        assert!(!fields.context.contains_key(key));
    }
    for value in fields.performance.values() {
        assert!(value.is_finite());
    }
});
