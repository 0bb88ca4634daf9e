#![no_main]

use libfuzzer_sys::fuzz_target;
use mathtype::{Config, PrettyPrint, to_mathml};

fuzz_target!(|data: &str| {
    let config = Config::default();
    let mathml = to_mathml(data, &config);
    assert!(mathml.starts_with("<math "));
    assert!(mathml.ends_with("</math>"));

    // Exercise the indenting emitter and the annotation path too.
    let pretty = Config {
        pretty_print: PrettyPrint::Always,
        annotation: true,
        ..Default::default()
    };
    assert!(to_mathml(data, &pretty).ends_with("</math>"));
});
