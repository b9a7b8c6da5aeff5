mod value;
pub use value::{Value, Type};

pub mod environment;
pub use environment::{Environment, EnvOptions};

pub mod callframe;
pub mod function;
pub mod eval;
pub mod compare;
pub mod pattern;
pub mod errors;

pub use errors::{EvalError, EvalResult};
pub use eval::eval_expr;



// Default Hasher

pub type DefaultBuildHasher = ahash::RandomState;
