//! formulac CLI - Command-line interface
//!
//! Commands:
//!   compile  - Compile formulas into a generated source module

use formulac::*;
use std::fs;
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return ExitCode::from(1);
    }

    let result = match args[1].as_str() {
        "compile" => cmd_compile(&args[2..]),
        "version" | "--version" | "-v" => {
            println!("formulac {}", VERSION);
            Ok(())
        }
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        cmd => {
            eprintln!("Unknown command: {}", cmd);
            print_usage();
            Err("Unknown command".into())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(1)
        }
    }
}

fn print_usage() {
    println!(
        r#"
formulac - compile arithmetic formulas into callable functions

USAGE:
    formulac <COMMAND> [OPTIONS]

COMMANDS:
    compile <formulas.txt>    Compile formulas, one per line ('-' for stdin);
                              blank lines and '#' comments are ignored
    version                   Print version
    help                      Print this help

OPTIONS:
    --lang <rust|go>          Target language (default: rust)
    --output <file>           Output file (default: stdout)
    --package <name>          Package name for the Go target (default: main)
    --skip-invalid            Skip malformed formulas instead of aborting
    --no-provenance           Omit the generated-by header
    --json                    Print the batch report as JSON (requires --output)

EXAMPLES:
    formulac compile rules.txt --output formulas_generated.rs
    formulac compile rules.txt --lang go --package rules --output formulas_generated.go
    echo "a + b - c" | formulac compile - --skip-invalid
"#
    );
}

fn cmd_compile(args: &[String]) -> Result<()> {
    if args.is_empty() {
        return Err("Usage: formulac compile <formulas.txt> [OPTIONS]".into());
    }

    let input = &args[0];
    let mut target = Target::Rust;
    let mut output: Option<PathBuf> = None;
    let mut package = "main".to_string();
    let mut policy = ParseErrorPolicy::Abort;
    let mut provenance = true;
    let mut json_output = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--lang" => {
                let value = flag_value(args, i, "--lang")?;
                target = Target::from_name(value)
                    .ok_or_else(|| format!("Unknown language: {}", value))?;
                i += 2;
            }
            "--output" => {
                output = Some(PathBuf::from(flag_value(args, i, "--output")?));
                i += 2;
            }
            "--package" => {
                package = flag_value(args, i, "--package")?.to_string();
                i += 2;
            }
            "--skip-invalid" => {
                policy = ParseErrorPolicy::Skip;
                i += 1;
            }
            "--no-provenance" => {
                provenance = false;
                i += 1;
            }
            "--json" => {
                json_output = true;
                i += 1;
            }
            flag => return Err(format!("Unknown option: {}", flag).into()),
        }
    }

    if json_output && output.is_none() {
        return Err("--json requires --output <file> for the generated source".into());
    }

    let formulas = read_formulas(input)?;
    if formulas.is_empty() {
        return Err("No formulas found in input".into());
    }

    let compiler = Compiler::new();
    let report = compiler.compile_batch(&formulas, policy)?;

    let config = EmitConfig {
        provenance,
        package,
    };
    let emitter = Emitter::with_config(target, config);

    match &output {
        Some(path) => {
            emitter.emit_to_file(&report.compiled, path)?;
            eprintln!(
                "Compiled {} formulas ({} duplicates, {} skipped) to {}",
                report.compiled.len(),
                report.duplicates.len(),
                report.failures.len(),
                path.display()
            );
        }
        None => {
            let code = emitter.emit(&report.compiled)?;
            println!("{}", code);
        }
    }

    if json_output {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    Ok(())
}

fn flag_value<'a>(args: &'a [String], i: usize, flag: &str) -> Result<&'a str> {
    args.get(i + 1)
        .map(|s| s.as_str())
        .ok_or_else(|| format!("{} requires a value", flag).into())
}

/// Read formulas from a file or stdin, one per line. Blank lines and `#`
/// comments are ignored.
fn read_formulas(input: &str) -> Result<Vec<String>> {
    let content = if input == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf).map_err(Error::Io)?;
        buf
    } else {
        fs::read_to_string(input).map_err(Error::Io)?
    };

    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(String::from)
        .collect())
}
