//! Fuzz target for export option parsing.

#![no_main]

use libfuzzer_sys::fuzz_target;
use texoverlay::config::from_yaml_str;

fuzz_target!(|data: &[u8]| {
    if data.len() > 1024 * 1024 {
        return;
    }

    if let Ok(text) = std::str::from_utf8(data) {
        let _ = from_yaml_str(text);
    }
});
