/// Module contains the Value enumeration and it's implementation.  The value is one of the core
/// data structures of the runtime.  It is used to represent everything the stack, the code and the
/// namespaces can hold.
pub mod value;

/// The unified integer and floating point number type.
pub mod number;

/// Blocks, the ordered sequences that double as lists and as code.
pub mod value_block;

/// String keyed objects with an optional parent.
pub mod object;

/// Namespaces, native words and the resolution of names to words.
pub mod namespace;
