use std::sync::{Mutex, MutexGuard, PoisonError};
use std::collections::HashMap;
use static_assertions::assert_impl_all;
use crate::language;
use crate::builtins;
use crate::parser::expr::{Expr, Scalar, Symbol};
use crate::runtime::{Value, DefaultBuildHasher};
use crate::runtime::callframe::{CallFrame, FrameGuard};
use crate::runtime::function::{NativeCallback, NativeFunction, ScopedNativeFunction, Invoke};
use crate::runtime::errors::{EvalResult, EvalError, ErrorKind};


#[derive(Debug, Clone)]
pub struct EnvOptions {
    /// Persist a null entry for every name that is looked up but not found.
    pub autoregister_globals: bool,
    pub max_call_depth: usize,
}

impl Default for EnvOptions {
    fn default() -> Self {
        EnvOptions {
            autoregister_globals: false,
            max_call_depth: language::DEFAULT_MAX_CALL_DEPTH,
        }
    }
}


#[derive(Debug, Clone)]
struct Entry {
    value: Expr,
    locked: bool,
}

type SymbolTable = HashMap<String, Entry, DefaultBuildHasher>;

/// Symbol table and call stack shared by an evaluation.
///
/// Each individual operation takes the relevant lock once, so single reads
/// and writes are atomic. Sequences of operations are not: callers that
/// need "check then set" semantics must serialize access themselves.
#[derive(Debug)]
pub struct Environment {
    options: EnvOptions,
    table: Mutex<SymbolTable>,
    frames: Mutex<Vec<CallFrame>>,

    null: Expr,
    true_value: Expr,
    false_value: Expr,
    empty: Expr,
}

assert_impl_all!(Environment: Send, Sync);

impl Default for Environment {
    fn default() -> Self { Self::new() }
}

impl Environment {
    pub fn new() -> Self {
        Self::with_options(EnvOptions::default())
    }

    pub fn with_options(options: EnvOptions) -> Self {
        let env = Environment {
            options,
            table: Mutex::new(SymbolTable::default()),
            frames: Mutex::new(Vec::new()),

            null: Scalar::new(language::NULL_NAME, Value::Nil).into(),
            true_value: Scalar::new(language::TRUE_NAME, Value::Bool(true)).into(),
            false_value: Scalar::new(language::FALSE_NAME, Value::Bool(false)).into(),
            empty: Scalar::new(language::EMPTY_NAME, Value::from("")).into(),
        };

        env.bootstrap();
        env
    }

    fn bootstrap(&self) {
        let mut table = self.table();
        for value in [&self.null, &self.true_value, &self.false_value, &self.empty] {
            let name = value.literal();
            table.insert(name, Entry { value: value.clone(), locked: true });
        }

        for func in builtins::PRELUDE.iter() {
            table.insert(func.name().to_string(), Entry { value: func.clone().into(), locked: false });
        }
    }

    pub fn options(&self) -> &EnvOptions { &self.options }

    fn table(&self) -> MutexGuard<'_, SymbolTable> {
        self.table.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn frames(&self) -> MutexGuard<'_, Vec<CallFrame>> {
        self.frames.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // Canonical values
    //
    // Resolved through the table, so rebinding an unlocked "true" or "null" is
    // seen by every operator that produces one. The seeds only stand in when the
    // entry is somehow absent.

    fn canonical(table: &SymbolTable, name: &str, seed: &Expr) -> Expr {
        table.get(name).map_or_else(|| seed.clone(), |entry| entry.value.clone())
    }

    pub fn null(&self) -> Expr { Self::canonical(&self.table(), language::NULL_NAME, &self.null) }
    pub fn true_value(&self) -> Expr { Self::canonical(&self.table(), language::TRUE_NAME, &self.true_value) }
    pub fn false_value(&self) -> Expr { Self::canonical(&self.table(), language::FALSE_NAME, &self.false_value) }
    pub fn empty(&self) -> Expr { Self::canonical(&self.table(), language::EMPTY_NAME, &self.empty) }

    pub fn bool_value(&self, value: bool) -> Expr {
        if value { self.true_value() } else { self.false_value() }
    }

    // Symbol table

    /// Bind a name, failing if the existing entry is locked.
    pub fn set(&self, name: &str, value: Expr) -> EvalResult<()> {
        let mut table = self.table();
        match table.get_mut(name) {
            Some(entry) if entry.locked => {
                let message = format!("cannot assign to \"{}\"", name);
                return Err(EvalError::new(ErrorKind::ReadOnlyViolation, message));
            }
            Some(entry) => entry.value = value,
            None => {
                table.insert(name.to_string(), Entry { value, locked: false });
            }
        }

        log::debug!("set \"{}\"", name);
        Ok(())
    }

    /// Look up a name. Missing names resolve to null.
    pub fn get(&self, name: &str) -> Expr {
        let mut table = self.table();
        if let Some(entry) = table.get(name) {
            return entry.value.clone();
        }

        let null = Self::canonical(&table, language::NULL_NAME, &self.null);
        if self.options.autoregister_globals {
            log::debug!("autoregister \"{}\"", name);
            table.insert(name.to_string(), Entry { value: null.clone(), locked: false });
        }
        null
    }

    /// Set or clear the read-only flag. Locking an absent name registers it as null.
    pub fn lock(&self, name: &str, locked: bool) {
        let mut table = self.table();
        match table.get_mut(name) {
            Some(entry) => entry.locked = locked,
            None => {
                let null = Self::canonical(&table, language::NULL_NAME, &self.null);
                table.insert(name.to_string(), Entry { value: null, locked });
            }
        }

        log::debug!("lock \"{}\" = {}", name, locked);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.table().contains_key(name)
    }

    pub fn is_locked(&self, name: &str) -> bool {
        self.table().get(name).map_or(false, |entry| entry.locked)
    }

    /// All bound names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names = self.table().keys().cloned().collect::<Vec<String>>();
        names.sort();
        names
    }

    // Native extensions

    pub fn register_function<F>(&self, name: &str, func: F) -> EvalResult<()>
    where F: Fn(&Environment, &[Expr]) -> EvalResult<Expr> + Send + Sync + 'static {
        let native = NativeFunction::new(name, NativeCallback::new(func));
        self.set(name, native.into())
    }

    /// Register a function under `scope.name`. When invoked through a scoped
    /// call it receives the evaluated scope as its first argument.
    pub fn register_scoped_function<F>(&self, scope: &str, name: &str, func: F) -> EvalResult<()>
    where F: Fn(&Environment, &[Expr]) -> EvalResult<Expr> + Send + Sync + 'static {
        let native = ScopedNativeFunction::new(name, Symbol::from_path(scope), NativeCallback::new(func));
        let key = native.qualified_name();
        self.set(&key, native.into())
    }

    // Call stack

    pub fn push_frame(&self, frame: CallFrame) -> EvalResult<FrameGuard<'_>> {
        let mut frames = self.frames();
        if frames.len() >= self.options.max_call_depth {
            let message = format!("call depth limit is {}", self.options.max_call_depth);
            return Err(EvalError::new(ErrorKind::RecursionTooDeep, message));
        }

        log::debug!("invoke {} (depth {})", frame.callee().literal(), frames.len() + 1);
        frames.push(frame);
        Ok(FrameGuard::new(self))
    }

    pub fn pop_frame(&self) -> EvalResult<CallFrame> {
        match self.frames().pop() {
            Some(frame) => Ok(frame),
            None => {
                log::warn!("pop on empty call stack");
                Err(EvalError::new(ErrorKind::StackUnderflow, "no active call frame"))
            }
        }
    }

    pub fn call_depth(&self) -> usize {
        self.frames().len()
    }

    pub fn current_frame(&self) -> Option<CallFrame> {
        self.frames().last().cloned()
    }
}
