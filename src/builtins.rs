use once_cell::sync::Lazy;
use crate::language;
use crate::parser::expr::Expr;
use crate::runtime::Environment;
use crate::runtime::errors::EvalResult;
use crate::runtime::function::{NativeFunction, NativeCallback};


/// Native functions installed into every new environment. None of them are locked.
pub static PRELUDE: Lazy<Vec<NativeFunction>> = Lazy::new(create_prelude);

fn create_prelude() -> Vec<NativeFunction> {
    vec![
        NativeFunction::new(language::PRINT_NAME, NativeCallback::new(print)),
    ]
}

/// Write each argument's display form, separated by spaces.
pub fn print(env: &Environment, args: &[Expr]) -> EvalResult<Expr> {
    println!("{}", format_print(args));
    Ok(env.null())
}

fn format_print(args: &[Expr]) -> String {
    args.iter()
        .map(|arg| arg.to_string())
        .collect::<Vec<String>>()
        .join(" ")
}
