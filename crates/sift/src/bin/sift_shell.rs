//! Interactive criterion shell.
//!
//! `sift_shell [config.toml]` reads one command per line; `help` lists them.

use rustyline::{DefaultEditor, error::ReadlineError};
use sift::{core::config::SiftConfig, shell::Shell};
use std::{env, fs, process::ExitCode};

fn main() -> ExitCode {
    let config = match env::args().nth(1).map(load).transpose() {
        Ok(config) => config.unwrap_or_default(),
        Err(message) => {
            eprintln!("{message}");
            return ExitCode::FAILURE;
        }
    };

    match run(Shell::new(config)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("shell error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn load(path: String) -> Result<SiftConfig, String> {
    let text = fs::read_to_string(&path).map_err(|err| format!("cannot read {path}: {err}"))?;

    sift::load_config(&text).map_err(|err| format!("{path}: {err}"))
}

fn run(shell: Shell) -> Result<(), ReadlineError> {
    let mut editor = DefaultEditor::new()?;
    println!("sift {} (type 'help', ctrl-d to quit)", sift::VERSION);

    loop {
        let line = match editor.readline("sift> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => return Ok(()),
            Err(err) => return Err(err),
        };

        if matches!(line.trim(), "quit" | "exit") {
            return Ok(());
        }
        if !line.trim().is_empty() {
            editor.add_history_entry(line.as_str())?;
        }

        match shell.execute(&line) {
            Ok(Some(output)) => println!("{output}"),
            Ok(None) => {}
            Err(err) => eprintln!("error: {err}"),
        }
    }
}
