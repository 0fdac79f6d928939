#![no_main]

use libfuzzer_sys::fuzz_target;
use phlint_syntax::parse;

const MAX_SOURCE_BYTES: usize = 65536;

fuzz_target!(|data: &[u8]| {
    let capped = &data[..data.len().min(MAX_SOURCE_BYTES)];
    let source = String::from_utf8_lossy(capped).into_owned();

    let parsed = parse(&source);

    // The tree must cover every input byte, with or without errors.
    assert_eq!(parsed.syntax().text().to_string(), source);

    // Parsing is deterministic.
    let reparsed = parse(&source);
    assert_eq!(parsed.errors(), reparsed.errors());
});
