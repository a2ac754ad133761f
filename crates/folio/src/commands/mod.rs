//! CLI command implementations.

pub(crate) mod check;
pub(crate) mod compile;

pub(crate) use check::CheckArgs;
pub(crate) use compile::CompileArgs;
