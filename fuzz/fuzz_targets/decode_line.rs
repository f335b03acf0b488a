#![no_main]

use geolog_core::types::RAW_LOGGER;
use geolog_log_pipeline::parser::ParserRouter;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(line) = std::str::from_utf8(data) else {
        return;
    };

    let router = ParserRouter::default();
    let outcome = router.decode_or_fallback(line);
    let fallback = outcome.is_fallback();
    let record = outcome.into_record();

    if fallback {
        assert_eq!(record.logger, RAW_LOGGER);
        assert_eq!(record.message, line.trim());
    }
});
