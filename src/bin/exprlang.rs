use std::fs;
use std::io::{self, Write};
use clap::{Command, Arg, ArgMatches};

use exprlang::{ScriptError, Environment, Expr};
use exprlang::frontend;
use exprlang::lexer::LexerBuilder;

fn main() {
    env_logger::init();

    let app = Command::new("exprlang")
        .version(clap::crate_version!())
        .about("An interpreter for a small embeddable expression language")
        .arg(
            Arg::new("file")
            .index(1)
            .help("Path to a file containing an expression")
            .value_name("FILE")
        )
        .arg(
            Arg::new("cmd")
            .short('c')
            .takes_value(true)
            .help("Evaluate an expression then exit")
            .value_name("CMD")
        )
        .arg(
            Arg::new("parse_only")
            .short('P')
            .help("Parse and print the expression tree instead of evaluating")
        )
        .arg(
            Arg::new("tokens_only")
            .short('T')
            .help("Print the token stream, whitespace included")
        )
        .arg(
            Arg::new("strict")
            .short('s')
            .help("Reject input left over after the expression")
        );

    let version = app.get_version().unwrap_or_default().to_string();
    let args = app.get_matches();

    let source = if let Some(s) = args.value_of("cmd") {
        s.to_string()
    } else if let Some(path) = args.value_of("file") {
        match fs::read_to_string(path) {
            Ok(text) => text,
            Err(error) => {
                println!("Error reading source: {}.", error);
                return;
            }
        }
    } else {
        Repl::new(&args).run(&version);
        return;
    };

    if args.is_present("tokens_only") {
        print_tokens(&source);
    } else if args.is_present("parse_only") {
        parse_and_print_tree(&args, &source);
    } else {
        let env = Environment::new();
        match execute(&args, &source, &env) {
            Ok(result) => println!("{}", result),
            Err(error) => print!("{}", frontend::render_script_error(&source, &error)),
        }
    }
}

fn parse(args: &ArgMatches, source: &str) -> Result<Expr, ScriptError> {
    let expr =
        if args.is_present("strict") { exprlang::parse_strict(source)? }
        else { exprlang::parse(source)? };
    Ok(expr)
}

fn execute(args: &ArgMatches, source: &str, env: &Environment) -> Result<Expr, ScriptError> {
    let expr = parse(args, source)?;
    Ok(exprlang::evaluate(&expr, env)?)
}

fn print_tokens(source: &str) {
    let lexer = LexerBuilder::new()
        .set_include_whitespace(true)
        .build(source);

    for result in lexer {
        match result {
            Ok(token) => println!("{:>4}:{:<4} {}", token.line(), token.offset(), token),
            Err(error) => println!("{}", error),
        }
    }
}

fn parse_and_print_tree(args: &ArgMatches, source: &str) {
    match parse(args, source) {
        Ok(expr) => {
            println!("{:#?}", expr);
            println!("{}", expr.literal());
        },
        Err(error) => print!("{}", frontend::render_script_error(source, &error)),
    }
}


//////// REPL ////////


const PROMPT_START: &str = ">>> ";

struct Repl<'a> {
    args: &'a ArgMatches,
    env: Environment,
}

enum ReadLine {
    Ok(String),
    Empty,
    Restart,
    Quit,
}

impl<'a> Repl<'a> {
    pub fn new(args: &'a ArgMatches) -> Self {
        Self {
            args,
            env: Environment::new(),
        }
    }

    fn read_line(&self, prompt: &'static str) -> ReadLine {
        let mut stdout = io::stdout();
        if stdout.write_all(prompt.as_bytes()).and_then(|_| stdout.flush()).is_err() {
            return ReadLine::Quit;
        }

        let mut input = String::new();
        match io::stdin().read_line(&mut input) {
            Ok(0) => return ReadLine::Quit,  // EOF
            Ok(..) => { },
            Err(error) => {
                println!("Could not read input: {}", error);
                return ReadLine::Restart;
            }
        }

        let input = input.trim_end().to_string();

        if input.is_empty() {
            return ReadLine::Empty;
        }

        if input == "quit" || input.contains('\x04') {
            return ReadLine::Quit;
        }

        ReadLine::Ok(input)
    }

    pub fn run(&mut self, version: &str) {
        println!("\nexprlang {}\n", version);

        loop {
            let input = match self.read_line(PROMPT_START) {
                ReadLine::Quit => return,
                ReadLine::Restart | ReadLine::Empty => continue,
                ReadLine::Ok(line) => line,
            };

            if input == "names" {
                println!("{}", self.env.names().join(" "));
                continue;
            }

            match execute(self.args, &input, &self.env) {
                Ok(result) => println!("{}", result),
                Err(error) => print!("{}", frontend::render_script_error(&input, &error)),
            }
        }
    }
}
