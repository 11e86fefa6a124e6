// monkey - A tree-walking interpreter for the Monkey programming language
// Copyright (c) 2025 Tom Waddington. MIT licensed.

use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::process;

use monkey_core::{Env, eval_program};
use monkey_parser::Parser;

const PROMPT: &str = ">> ";

const MONKEY_FACE: &str = r#"            __,__
   .--.  .-"     "-.  .--.
  / .. \/  .-. .-.  \/ .. \
 | |  '|  /   Y   \  |'  | |
 | \   \  \ 0 | 0 /  /   / |
  \ '- ,\.-"""""""-./, -' /
   ''-' /_   ^ ^   _\ '-''
       |  \._   _./  |
       \   \ '~' /   /
        '._ '-=-' _.'
           '-----'
"#;

fn main() {
    let args: Vec<String> = env::args().collect();

    // Handle --version flag
    if args.len() == 2 && (args[1] == "--version" || args[1] == "-v") {
        println!("Monkey v0.1.0");
        return;
    }

    // If files provided, evaluate them; otherwise start the REPL
    if args.len() > 1 {
        run_files(&args[1..]);
    } else {
        run_repl();
    }
}

/// Evaluate a sequence of source files in one shared environment.
fn run_files(files: &[String]) {
    let env = Env::new();
    for file_path in files {
        if let Err(e) = eval_file(file_path, &env) {
            eprintln!("{}", e);
            process::exit(1);
        }
    }
}

/// Evaluate a single source file.
fn eval_file(file_path: &str, env: &Env) -> Result<(), String> {
    let path = Path::new(file_path);

    // Validate file extension
    match path.extension().and_then(|e| e.to_str()) {
        Some("monkey") => {}
        Some(ext) => {
            return Err(format!(
                "Error: unsupported file extension '.{}' for '{}' (expected .monkey)",
                ext, file_path
            ));
        }
        None => {
            return Err(format!(
                "Error: file '{}' has no extension (expected .monkey)",
                file_path
            ));
        }
    }

    let source =
        fs::read_to_string(path).map_err(|e| format!("Error reading '{}': {}", file_path, e))?;

    let mut parser = Parser::new(&source);
    let program = parser.parse_program();
    if !parser.errors().is_empty() {
        print_parser_errors(parser.errors());
        return Err(format!("Error: could not parse '{}'", file_path));
    }

    let result = eval_program(&program, env).map_err(|e| format!("ERROR: {}", e))?;
    println!("{}", result);
    Ok(())
}

/// Run the interactive REPL. Bindings persist across lines.
fn run_repl() {
    println!("Monkey v0.1.0");

    let env = Env::new();

    loop {
        print!("{}", PROMPT);
        let _ = io::stdout().flush();

        let mut input = String::new();
        match io::stdin().read_line(&mut input) {
            Ok(0) => {
                println!();
                break;
            }
            Ok(_) => {
                let input = input.trim();
                if input.is_empty() {
                    continue;
                }

                let mut parser = Parser::new(input);
                let program = parser.parse_program();
                if !parser.errors().is_empty() {
                    print_parser_errors(parser.errors());
                    continue;
                }

                match eval_program(&program, &env) {
                    Ok(result) => println!("{}", result),
                    Err(e) => eprintln!("ERROR: {}", e),
                }
            }
            Err(e) => {
                eprintln!("Read error: {}", e);
                break;
            }
        }
    }
}

fn print_parser_errors(errors: &[String]) {
    print!("{}", MONKEY_FACE);
    println!("Woops! We ran into some monkey business here!");
    println!(" parser errors:");
    for err in errors {
        println!("\t{}", err);
    }
}
