//! The `loxi` CLI driver: reads a source file, runs it through
//! lex -> parse -> resolve -> interpret up to the selected [`Mode`], and
//! translates the outcome into the process's exit code.

use loxi::ast::print_ast;
use loxi::cli::{Cli, Mode};
use loxi::error::CoreError;
use loxi::interpreter::Interpreter;
use loxi::lexer::{lex, render_lex_error};
use loxi::parser::{parse_expression, parse_program};
use loxi::resolver::resolve;

use log::{info, warn};

fn main() {
    let cli = Cli::init();
    simple_logger::init_with_level(log::Level::from(&cli.verbosity)).expect("logger already initialized");

    let source = match std::fs::read_to_string(&cli.file) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("Failed to read file '{}': {err}", cli.file.display());
            std::process::exit(1);
        }
    };

    let code = match run(cli.mode, &source) {
        Ok(()) => 0,
        Err(err) => {
            warn!("pipeline failed with exit code {}", err.exit_code());
            // Lexical errors are already rendered per-token as they're found;
            // every other family still needs its message written out here.
            if !matches!(err, CoreError::Lex(_)) {
                eprintln!("{err}");
            }
            err.exit_code()
        }
    };
    std::process::exit(code);
}

fn run(mode: Mode, source: &str) -> Result<(), CoreError> {
    info!("lexing");
    let (tokens, error_count) = lex(source);

    for token in tokens.iter().filter(|t| t.is_error()) {
        eprintln!("{}", render_lex_error(token));
    }

    if mode == Mode::Tokenize {
        for token in tokens.iter().filter(|t| !t.is_error()) {
            println!("{}", token.render());
        }
        return if error_count > 0 {
            Err(CoreError::Lex(error_count))
        } else {
            Ok(())
        };
    }

    if error_count > 0 {
        return Err(CoreError::Lex(error_count));
    }

    info!("parsing");
    match mode {
        Mode::Parse => {
            let expr = parse_expression(&tokens).map_err(|e| CoreError::Parse(vec![e]))?;
            println!("{}", print_ast(&expr));
            Ok(())
        }
        Mode::Evaluate => {
            let expr = parse_expression(&tokens).map_err(|e| CoreError::Parse(vec![e]))?;
            info!("resolving");
            let (locals, resolve_errors) = resolve(&[]);
            if !resolve_errors.is_empty() {
                return Err(CoreError::Resolve(resolve_errors));
            }
            info!("interpreting");
            let mut interpreter = Interpreter::new(locals);
            let value = interpreter.interpret_expression(&expr).map_err(CoreError::Runtime)?;
            println!("{value}");
            Ok(())
        }
        Mode::Run => {
            let (program, parse_errors) = parse_program(&tokens);
            if !parse_errors.is_empty() {
                return Err(CoreError::Parse(parse_errors));
            }
            info!("resolving");
            let (locals, resolve_errors) = resolve(&program);
            if !resolve_errors.is_empty() {
                return Err(CoreError::Resolve(resolve_errors));
            }
            info!("interpreting");
            let mut interpreter = Interpreter::new(locals);
            interpreter.interpret(&program).map_err(CoreError::Runtime)
        }
        Mode::Tokenize => unreachable!("handled above"),
    }
}
