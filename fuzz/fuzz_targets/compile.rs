#![no_main]

use libfuzzer_sys::fuzz_target;
use pizarra::frontend::compile;

fuzz_target!(|data: &[u8]| {
    // Convert bytes to UTF-8 string (ignore invalid UTF-8)
    if let Ok(s) = std::str::from_utf8(data) {
        // The front end must reach a verdict on any input without panicking
        let _ = compile(s);
    }
});
