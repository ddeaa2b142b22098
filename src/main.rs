use std::process::ExitCode;

use lox_expr::{logger, InterpretResult, Lox};

fn main() -> ExitCode {
    if let Err(error) = logger::init(logger::level_from_env()) {
        eprintln!("Could not initialise logging: {error}");
    }

    let lox = Lox::new();

    let args = std::env::args().collect::<Vec<_>>();

    match args.len() {
        1 => {
            if let Err(error) = lox.run_prompt() {
                log::error!("prompt stopped: {error}");
                return ExitCode::from(74);
            }
        }
        2 => match lox.run_file(&args[1]) {
            Ok(InterpretResult::CompileError) => return ExitCode::from(65),
            Ok(InterpretResult::RuntimeError) => return ExitCode::from(70),
            Err(error) => {
                log::debug!("reading {}: {error}", &args[1]);
                println!("Could not open file \"{}\".", &args[1]);
                return ExitCode::from(74);
            }
            Ok(InterpretResult::Ok) => (),
        },
        _ => {
            println!("Usage: lox [script]");
            return ExitCode::from(64);
        }
    }

    ExitCode::SUCCESS
}
