#![no_main]

use std::path::{Path, PathBuf};

use libfuzzer_sys::fuzz_target;
use phlint_index::{index_file, SymbolIndex};
use phlint_syntax::parse;

const MAX_SOURCE_BYTES: usize = 4096;

fn decode_source(bytes: &[u8]) -> String {
    let capped = &bytes[..bytes.len().min(MAX_SOURCE_BYTES)];
    String::from_utf8_lossy(capped).into_owned()
}

fn lint_to_json(index: &SymbolIndex, path: &Path, text: &str) -> String {
    let report = phlint_sema::lint(index, path, text).expect("file was indexed");
    serde_json::to_string(&report).expect("reports serialize")
}

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    let split = usize::from(data[0]) % (data.len() + 1);
    let raw_decls = decode_source(&data[..split]);
    let raw_body = decode_source(&data[split..]);

    let lib_path = PathBuf::from("/fuzz/lib.php");
    let input_path = PathBuf::from("/fuzz/input.php");

    let lib_text = format!(
        "<?php\nnamespace Fuzz;\nclass Seed {{}}\nfunction seed(): void {{}}\n{}\n",
        raw_decls
    );
    let input_text = format!("<?php\nuse Fuzz\\Seed;\nnew Seed();\n{}\n", raw_body);

    let mut index = SymbolIndex::with_builtins();
    let lib_parse = parse(&lib_text);
    let input_parse = parse(&input_text);
    index_file(&mut index, &lib_path, &lib_parse);
    index_file(&mut index, &input_path, &input_parse);

    // Linting twice must yield byte-identical reports.
    let first = lint_to_json(&index, &input_path, &input_text);
    let second = lint_to_json(&index, &input_path, &input_text);
    assert_eq!(first, second);
    let _ = lint_to_json(&index, &lib_path, &lib_text);

    // Edit -> re-index -> relint cycle.
    let edited = format!("{}\n// fuzz edit cycle\n{}\n", input_text, raw_decls);
    let edited_parse = parse(&edited);
    index_file(&mut index, &input_path, &edited_parse);
    let _ = lint_to_json(&index, &input_path, &edited);
});
