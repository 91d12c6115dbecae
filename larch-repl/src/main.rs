use std::fs;
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result, anyhow};
use larch::{Environment, eval, read};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

fn history_path() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join("larch").join("history"))
}

fn repl() -> Result<()> {
    let env = Environment::new();
    let mut editor = DefaultEditor::new()?;

    let history = history_path();
    if let Some(path) = &history {
        let _ = editor.load_history(path);
    }

    println!("Larch REPL");
    println!("Type expressions to evaluate, or exit to quit");
    println!();

    loop {
        match editor.readline("> ") {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                if line == "exit" {
                    break;
                }
                let _ = editor.add_history_entry(line);

                // One faulted expression aborts only itself, not the session.
                let expr = read(line);
                match eval(&expr, &env) {
                    Ok(result) => println!("{result}"),
                    Err(e) => eprintln!("Error: {e}"),
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        }
    }

    if let Some(path) = &history {
        if let Some(dir) = path.parent() {
            let _ = fs::create_dir_all(dir);
        }
        let _ = editor.save_history(path);
    }

    Ok(())
}

/// Evaluate a file as a single top-level expression and print the result.
fn run_file(path: &str) -> Result<()> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("failed to read '{path}'"))?;

    let env = Environment::new();
    let expr = read(&contents);
    let result = eval(&expr, &env).map_err(|e| anyhow!("evaluation error: {e}"))?;
    println!("{result}");
    Ok(())
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  larch              Start interactive REPL");
    eprintln!("  larch <file.lisp>  Evaluate a file");
    eprintln!("  larch --help       Show this help message");
}

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let result = match args.len() {
        1 => repl(),
        2 => {
            let arg = &args[1];
            if arg == "--help" || arg == "-h" {
                print_usage();
                Ok(())
            } else {
                run_file(arg)
            }
        }
        _ => {
            eprintln!("Error: too many arguments");
            print_usage();
            process::exit(1);
        }
    };

    if let Err(e) = result {
        eprintln!("{e}");
        process::exit(1);
    }
}
