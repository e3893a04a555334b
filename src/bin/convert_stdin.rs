//! Simple CLI that reads legacy text from stdin and outputs JSON to stdout.
//!
//! Usage: `convert_stdin [encoding] [text|ansi|dump|chars]`

use retrotext::{convert_with_options, Mode, Options, Record};
use serde::Serialize;
use std::io::{self, Read};

#[derive(Serialize)]
struct Output {
    text: String,
    encoding: String,
    newline: String,
    sauce: Option<Record>,
}

fn mode(name: Option<&str>) -> Mode {
    match name {
        Some("ansi") => Mode::Ansi,
        Some("dump") => Mode::Dump,
        Some("chars") => Mode::Chars,
        _ => Mode::Text,
    }
}

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();

    // Read raw bytes from stdin
    let mut bytes = Vec::new();
    if io::stdin().read_to_end(&mut bytes).is_err() {
        eprintln!("Failed to read from stdin");
        std::process::exit(1);
    }

    let options = Options {
        encoding: args.first().cloned().unwrap_or_default(),
        ..Options::default()
    };
    let result = match convert_with_options(&bytes, mode(args.get(1).map(String::as_str)), &options) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    // Output JSON
    let output = Output {
        text: result.text(),
        encoding: result.charset.to_string(),
        newline: result.newline.name().to_string(),
        sauce: result.sauce,
    };

    println!("{}", serde_json::to_string(&output).unwrap_or_default());
}
