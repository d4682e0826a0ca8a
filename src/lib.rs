/// Module for managing source code and turning it into structured code for the runtime.
pub mod lang;

/// Module for the runtime, the data structures it manages and the interpreter itself.
#[macro_use]
pub mod runtime;

pub use runtime::{
    data_structures::value::Value,
    error::{ErrorKind, Result, ScriptError},
    interpreter::{Source, ValueStack, context::Context, evaluate},
};
