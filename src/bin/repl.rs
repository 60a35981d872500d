use colored::Colorize;
use fltext::command::{underline, Command, CommandError};
use rustyline::{error::ReadlineError, Editor};
use std::io::{self, Write};
use tracing_subscriber::EnvFilter;

struct Repl {
    editor: Editor<()>,
}

impl Repl {
    fn new() -> Self {
        Self {
            editor: Editor::new(),
        }
    }

    fn evaluate(line: &str) -> Result<String, CommandError> {
        Command::parse(line)?.execute()
    }

    fn prompt(&mut self) -> bool {
        let _ = io::stdout().flush();
        let input = match self.editor.readline("> ") {
            Ok(input) => input,
            Err(ReadlineError::Eof) | Err(ReadlineError::Interrupted) => return false,
            Err(err) => {
                eprintln!("{}", err.to_string().red());
                return false;
            }
        };
        match Self::evaluate(&input) {
            Ok(output) => println!("{}", output.green()),
            Err(CommandError::Empty) => return true,
            Err(err) => {
                if let Some(span) = err.span() {
                    println!("  {}", input);
                    println!("  {}", underline(&span).red());
                }
                println!("{} : {}", "error".red(), err);
            }
        }
        self.editor.add_history_entry(input);
        true
    }
}

fn main() {
    // `FLTEXT_LOG=debug` shows how the conversions are carried out.
    if let Ok(filter) = EnvFilter::try_from_env("FLTEXT_LOG") {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .init();
    }

    println!("fltext {} : type 'help' for a list of commands", env!("CARGO_PKG_VERSION"));
    let mut repl = Repl::new();
    while repl.prompt() {}
}
