use crate::parser::expr::Expr;
use crate::runtime::Environment;


/// Bookkeeping for one function invocation.
#[derive(Debug, Clone)]
pub struct CallFrame {
    callee: Expr,
    args: Box<[Expr]>,  // unevaluated, as written at the call site
}

impl CallFrame {
    pub fn new(callee: Expr, args: &[Expr]) -> Self {
        CallFrame { callee, args: args.to_vec().into_boxed_slice() }
    }

    pub fn callee(&self) -> &Expr { &self.callee }
    pub fn args(&self) -> &[Expr] { &self.args }
}


/// Pops the frame it was created for when dropped, so the call stack
/// unwinds on error paths as well as on success.
#[must_use]
pub struct FrameGuard<'e> {
    env: &'e Environment,
}

impl<'e> FrameGuard<'e> {
    pub(super) fn new(env: &'e Environment) -> Self {
        FrameGuard { env }
    }
}

impl Drop for FrameGuard<'_> {
    fn drop(&mut self) {
        if let Err(error) = self.env.pop_frame() {
            log::error!("{}", error);
        }
    }
}
