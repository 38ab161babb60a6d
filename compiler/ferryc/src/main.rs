//! Ferry CLI
//!
//! Exports marked C++ functions to Python through a generated `extern "C"`
//! boundary library and a ctypes binding module.

use ferryc::commands::{extract_file, inline_snippet, run_session};
use ferryc::{init_tracing, parse_session_options, ParsedArgs, SessionConfig, ToolchainConfig};

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    match command.as_str() {
        "build" | "generate" => {
            let parsed = parse_or_exit(&args[2..]);
            let Some(path) = parsed.inputs.first() else {
                eprintln!("error: missing source file");
                eprintln!("Usage: ferry {command} <file.cpp> [options]");
                std::process::exit(1);
            };
            let mut config = parsed.config.clone();
            if command == "generate" {
                config.build = false;
            }
            run_session(path, config);
        }
        "inline" => {
            let parsed = parse_or_exit(&args[2..]);
            let Some(input) = parsed.inputs.first() else {
                eprintln!("error: missing snippet file");
                eprintln!("Usage: ferry inline <snippet.cpp|-> [--name=<stem>] [options]");
                std::process::exit(1);
            };
            inline_snippet(input, parsed.name.as_deref(), parsed.config.clone());
        }
        "extract" => {
            let parsed = parse_or_exit(&args[2..]);
            let Some(path) = parsed.inputs.first() else {
                eprintln!("error: missing source file");
                eprintln!("Usage: ferry extract <file.cpp> [--marker=<text>]");
                std::process::exit(1);
            };
            extract_file(path, &parsed.config.extract);
        }
        "help" | "--help" | "-h" => {
            print_usage();
        }
        "version" | "--version" | "-V" => {
            println!("ferry {}", env!("CARGO_PKG_VERSION"));
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

fn parse_or_exit(args: &[String]) -> ParsedArgs {
    let base = SessionConfig {
        toolchain: ToolchainConfig::from_env(),
        ..SessionConfig::default()
    };
    match parse_session_options(args, base) {
        Ok(parsed) => parsed,
        Err(e) => {
            eprintln!("error: {e}");
            eprintln!("Run `ferry help` for the list of options.");
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!("ferry - export C++ functions to Python");
    println!();
    println!("Usage: ferry <command> [options]");
    println!();
    println!("Commands:");
    println!("  build <file.cpp>       Generate boundary source and bindings, then compile");
    println!("  generate <file.cpp>    Generate boundary source and bindings only");
    println!("  inline <file|->        Export a snippet without a marker (one function)");
    println!("  extract <file.cpp>     List the functions marked for export");
    println!("  help                   Show this help message");
    println!("  version                Show version information");
    println!();
    println!("Options:");
    println!("  --cxx=<compiler>       C++ compiler (default: $FERRY_CXX or g++)");
    println!("  --toolchain-dir=<dir>  Directory prepended to the compiler's PATH");
    println!("  --std=<standard>       Language standard (default: c++17)");
    println!("  --flag=<arg>           Extra compiler argument (repeatable)");
    println!("  --platform=<name>      Target: linux, macos, windows (default: host)");
    println!("  --marker=<text>        Export marker (default: ferry::export)");
    println!("  -o <dir>, --out-dir=<dir>");
    println!("                         Directory for generated files (default: next to source)");
    println!("  --no-build             Skip compilation");
    println!("  --name=<stem>          File stem for inline snippets (default: inline)");
    println!();
    println!("Environment:");
    println!("  FERRY_CXX              Default compiler");
    println!("  RUST_LOG               Enable logging (e.g. RUST_LOG=ferryc=debug)");
    println!("  FERRY_LOG_TREE=1       Log spans as an indented tree");
    println!();
    println!("Examples:");
    println!("  ferry build model.cpp");
    println!("  ferry build model.cpp -o build --flag=-O2");
    println!("  ferry extract model.cpp");
    println!("  echo 'int twice(int x) {{ return 2 * x; }}' | ferry inline - --name=twice");
}
