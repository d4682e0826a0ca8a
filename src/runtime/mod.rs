/// All of the core data structures used by the Slang runtime.
pub mod data_structures;

/// Module for defining the built-in native words that are available to Slang scripts.
pub mod built_ins;

/// Module for defining the error reporting of the runtime.
pub mod error;

/// Module for defining the core functionality of the interpreter.  This includes tools for
/// managing and examining a context's stack, code and namespace.
pub mod interpreter;

/// Loading and checking of the self-hosted standard vocabulary.
pub mod bootstrap;
