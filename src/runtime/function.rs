use std::fmt;
use std::sync::Arc;
use crate::language;
use crate::parser::expr::{Expr, Symbol};
use crate::runtime::Environment;
use crate::runtime::errors::EvalResult;


/// Host callback signature. Receives the evaluated call arguments in order.
pub type NativeFn = dyn Fn(&Environment, &[Expr]) -> EvalResult<Expr> + Send + Sync;

#[derive(Clone)]
pub struct NativeCallback(Arc<NativeFn>);

impl NativeCallback {
    pub fn new<F>(func: F) -> Self where F: Fn(&Environment, &[Expr]) -> EvalResult<Expr> + Send + Sync + 'static {
        NativeCallback(Arc::new(func))
    }

    pub fn call(&self, env: &Environment, args: &[Expr]) -> EvalResult<Expr> {
        (self.0)(env, args)
    }
}

impl fmt::Debug for NativeCallback {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "NativeCallback({:p})", Arc::as_ptr(&self.0))
    }
}


/// Anything that a call expression can invoke.
pub trait Invoke {
    fn name(&self) -> &str;
    fn invoke(&self, env: &Environment, args: &[Expr]) -> EvalResult<Expr>;
}


#[derive(Debug, Clone)]
pub struct NativeFunction {
    name: String,
    callback: NativeCallback,
}

impl NativeFunction {
    pub fn new(name: impl ToString, callback: NativeCallback) -> Self {
        Self { name: name.to_string(), callback }
    }
}

impl Invoke for NativeFunction {
    fn name(&self) -> &str { &self.name }

    fn invoke(&self, env: &Environment, args: &[Expr]) -> EvalResult<Expr> {
        self.callback.call(env, args)
    }
}


/// A native function bound to a scope. When called through a scoped call the
/// evaluated scope is passed as the first argument.
#[derive(Debug, Clone)]
pub struct ScopedNativeFunction {
    name: String,
    scope: Symbol,
    callback: NativeCallback,
}

impl ScopedNativeFunction {
    pub fn new(name: impl ToString, scope: Symbol, callback: NativeCallback) -> Self {
        Self { name: name.to_string(), scope, callback }
    }

    pub fn scope(&self) -> &Symbol { &self.scope }

    /// The environment key this function is registered under.
    pub fn qualified_name(&self) -> String {
        format!("{}{}{}", self.scope.literal(), language::SCOPE_SEPARATOR, self.name)
    }
}

impl Invoke for ScopedNativeFunction {
    fn name(&self) -> &str { &self.name }

    fn invoke(&self, env: &Environment, args: &[Expr]) -> EvalResult<Expr> {
        self.callback.call(env, args)
    }
}
