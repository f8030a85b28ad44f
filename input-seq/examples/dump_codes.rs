//! Print the code table for a layout
//!
//! Lists every standard code with its analog kind, then parses and renders
//! any sequences given on the command line.
//!
//! Usage:
//!   dump_codes [--joysticks <n>] [sequence ...]
//!
//! Example:
//!   dump_codes --joysticks 2 "KEYCODE_LCONTROL OR JOYCODE_1_BUTTON1"

use input_seq::{grammar, text, CodeRegistry, LayoutConfig, SeqConfig};
use std::env;

fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let mut args = env::args().skip(1).peekable();
    let mut layout = LayoutConfig::default();
    if args.peek().map(String::as_str) == Some("--joysticks") {
        args.next();
        match args.next().and_then(|n| n.parse().ok()) {
            Some(n) => layout.joysticks = n,
            None => {
                eprintln!("--joysticks needs a number");
                std::process::exit(2);
            }
        }
    }

    let config = SeqConfig::default().with_layout(layout);
    let registry = CodeRegistry::build(&[], &config);

    println!("=== CODE TABLE ===");
    for (code, entry) in registry.iter() {
        println!("{:>5}  {:<32} {}", code, entry.token(), entry.analog());
    }

    let stats = registry.stats();
    println!("\n{} codes ({} analog)", registry.len(), stats.num_analog);

    for arg in args {
        let seq = text::string_to_seq(&registry, &arg, &config);
        let verdict = match grammar::check(&seq, &registry) {
            Ok(()) => "valid".to_string(),
            Err(e) => e.to_string(),
        };
        println!("\n{:?}", arg);
        println!("  normalised: {}", text::seq_to_string(&registry, &seq));
        println!("  grammar:    {}", verdict);
    }
}
