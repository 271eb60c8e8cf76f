#![no_main]

//! Engine input fuzzer.
//!
//! Feeds arbitrary bytes to a full match as if they came from the engine.
//! The bot must never panic, and every line it writes must be a well-formed
//! `send-ship` with positive finite power, a comment, or `end-turn`.

use frontline::Bot;
use frontline::engine::NearestFrontier;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let bot = Bot::new(Box::new(NearestFrontier::default())).with_annotations(true);
    let mut output = Vec::new();
    let _ = bot.run(data, &mut output);

    let Ok(text) = String::from_utf8(output) else {
        panic!("bot wrote invalid UTF-8");
    };
    for line in text.lines() {
        if line == "end-turn" || line.starts_with("# ") {
            continue;
        }
        let parts: Vec<&str> = line.split(' ').collect();
        assert_eq!(parts.len(), 4, "malformed order line: {line}");
        assert_eq!(parts[0], "send-ship");
        let power: f64 = parts[1].parse().unwrap_or(f64::NAN);
        assert!(power.is_finite() && power > 0.0, "bad power in: {line}");
        assert!(!parts[1].contains('e'), "exponent notation in: {line}");
        assert!(parts[2].parse::<usize>().is_ok());
        assert!(parts[3].parse::<usize>().is_ok());
    }
});
