// src/main.rs

// lambdaf
// A call-by-name normalizer for a small lambda calculus with numbers and lists.

use clap::{Parser as ClapParser, ValueEnum};
use std::io::{BufRead, IsTerminal, Write};
use std::path::Path;
use std::thread;
use tracing::{debug, info, Level};

use lambdaf::{interpret_with, InterpretError, Normalizer};

const MAGENTA: &str = "\x1b[95m";
const RESET: &str = "\x1b[0m";

#[derive(ClapParser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// A source file, or the program text itself. Launches the REPL when omitted.
    input: Option<String>,

    /// Abort normalization once calls nest deeper than this.
    #[arg(long)]
    max_depth: Option<usize>,

    /// Stack size in MiB for the thread that runs normalization.
    #[arg(long, default_value_t = 256)]
    stack_size: usize,

    /// When to print results in colour.
    #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
    color: ColorChoice,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum ColorChoice {
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    fn enabled(self) -> bool {
        match self {
            ColorChoice::Auto => std::io::stdout().is_terminal(),
            ColorChoice::Always => true,
            ColorChoice::Never => false,
        }
    }
}

struct Session {
    normalizer: Normalizer,
    stack_size: usize,
    color: bool,
}

impl Session {
    // Deep recursion is the expected failure mode for divergent programs, so
    // the work runs on a thread whose stack size the user controls.
    fn run(&self, source: String) -> Result<String, String> {
        let normalizer = self.normalizer;
        let stack_bytes = stack_size_bytes(self.stack_size)?;
        let handle = thread::Builder::new()
            .name("normalizer".to_string())
            .stack_size(stack_bytes)
            .spawn(move || interpret_with(&source, &normalizer))
            .map_err(|e| format!("Failed to start normalizer thread: {}", e))?;

        match handle.join() {
            Ok(result) => result.map_err(|e: InterpretError| e.to_string()),
            Err(_) => Err("Normalizer thread panicked".to_string()),
        }
    }

    fn print_result(&self, result: &str) {
        if self.color {
            println!("{}{}{}", MAGENTA, result, RESET);
        } else {
            println!("{}", result);
        }
    }
}

fn stack_size_bytes(mib: usize) -> Result<usize, String> {
    mib.checked_mul(1024 * 1024)
        .ok_or_else(|| format!("Stack size of {} MiB is too large", mib))
}

fn show_examples() {
    println!("\n--- lambdaf Examples ---\n");

    let examples = [
        ("Beta reduction", "(\\x.x) y"),
        ("Arithmetic", "(\\x.\\y.x + y) 3 4"),
        ("Conditional (0 is false)", "if 0 then 2 else 1"),
        ("Let binding", "let f = \\x.x*6 in let g = \\x.x+1 in f (g 1)"),
        ("Factorial (letrec)", "letrec f = \\n. if n==0 then 1 else n*f(n-1) in f 4"),
        ("Lists", "tl (1:2:3:#)"),
        ("Map over a list", "letrec map = \\f. \\xs. if xs==# then # else (f (hd xs)) : (map f (tl xs)) in (map (\\x.x+1) (1:2:3:#))"),
        ("Sequencing", "1+1 ;; (\\x.x) a"),
    ];

    for (description, code) in examples.iter() {
        println!("// {}", description);
        println!("{}\n", code);
    }
    println!("------------------------\n");
}

fn repl(session: &Session) {
    println!("lambdaf REPL");
    println!("Enter expressions, ':quit', or ':examples'");

    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        if std::io::stdout().flush().is_err() {
            break;
        }
        let input = match lines.next() {
            Some(Ok(line)) => line,
            _ => break,
        };
        let input_str = input.trim();

        match input_str {
            "" => continue,
            ":quit" | "quit" | "exit" => break,
            ":examples" => {
                show_examples();
                continue;
            }
            _ => {}
        }

        match session.run(input_str.to_string()) {
            Ok(result) => session.print_result(&result),
            Err(e) => println!("Error: {}", e),
        }
    }
}

/// Reads `input` from disk when it names a file, otherwise treats it as source.
fn load_source(input: &str) -> Result<String, String> {
    let path = Path::new(input);
    if path.is_file() {
        debug!(path = %path.display(), "reading program from file");
        std::fs::read_to_string(path).map_err(|e| format!("Failed to read file '{}': {}", path.display(), e))
    } else {
        Ok(input.to_string())
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let normalizer = match cli.max_depth {
        Some(limit) => Normalizer::with_max_depth(limit),
        None => Normalizer::new(),
    };
    let session = Session {
        normalizer,
        stack_size: cli.stack_size,
        color: cli.color.enabled(),
    };
    info!(max_depth = ?cli.max_depth, stack_size_mib = cli.stack_size, "starting");

    if let Some(input) = cli.input {
        let result = load_source(&input).and_then(|source| session.run(source));
        match result {
            Ok(output) => session.print_result(&output),
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        repl(&session);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stack_size_converts_mib_to_bytes() {
        assert_eq!(stack_size_bytes(256), Ok(256 * 1024 * 1024));
    }

    #[test]
    fn test_oversized_stack_is_reported_not_panicked() {
        assert_eq!(
            stack_size_bytes(usize::MAX),
            Err(format!("Stack size of {} MiB is too large", usize::MAX))
        );

        let session = Session {
            normalizer: Normalizer::new(),
            stack_size: usize::MAX / 1024,
            color: false,
        };
        assert!(session.run("1".to_string()).is_err());
    }
}
