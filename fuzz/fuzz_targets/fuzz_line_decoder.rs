//! Fuzz target: `LineDecoder::push` + `parse`
//!
//! Drives arbitrary byte sequences through the line assembler and parses
//! every completed line.  Asserts that nothing panics, that no line
//! carries its terminator, and that a reset decoder behaves the same as a
//! fresh one.
//!
//! cargo fuzz run fuzz_line_decoder

#![no_main]

use libfuzzer_sys::fuzz_target;
use ninho::protocol::line::LineDecoder;
use ninho::protocol::parse;

fuzz_target!(|data: &[u8]| {
    let mut decoder = LineDecoder::new();
    let mut first = Vec::new();

    for &b in data {
        if let Some(line) = decoder.push(b) {
            assert!(!line.contains('\n'), "line must not contain its terminator");
            let _ = parse(&line);
            first.push(line);
        }
    }

    decoder.reset();
    let second: Vec<String> = data.iter().filter_map(|&b| decoder.push(b)).collect();
    assert_eq!(first, second, "reset decoder must match a fresh one");
});
