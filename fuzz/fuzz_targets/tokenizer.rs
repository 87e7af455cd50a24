#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };
    let tokens = html::tokenize(input);
    let mut previous_end = 0;
    for token in &tokens {
        let span = token.span();
        assert!(span.start >= previous_end, "tokens overlap");
        assert!(span.slice(input).is_some(), "token span is not a valid slice");
        previous_end = span.end;
    }
});
