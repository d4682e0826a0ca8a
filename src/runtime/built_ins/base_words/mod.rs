/// Words that work with code and its execution.  The primitives the standard vocabulary is built
/// from live here.
pub mod code_words;

/// Words that manipulate the data stack.
mod stack_words;

/// Simple constants.
mod constant_words;

/// Words that work with Value types.
mod value_type_words;

/// Words that work with blocks.
pub mod block_words;

/// Words that work with objects.
mod object_words;

/// Words that read and swap the active namespace.
mod namespace_words;

/// Words that work with math, logic and value equality.
mod math_logic_words;

use crate::runtime::{
    built_ins::base_words::{
        block_words::register_block_words, code_words::register_code_words,
        constant_words::register_constant_words, math_logic_words::register_math_logic_words,
        namespace_words::register_namespace_words, object_words::register_object_words,
        stack_words::register_stack_words, value_type_words::register_value_type_words,
    },
    interpreter::Interpreter,
};

/// Called to register all of the core words of the language into the active namespace.
pub fn register_base_words(interpreter: &mut dyn Interpreter) {
    register_constant_words(interpreter);
    register_code_words(interpreter);
    register_stack_words(interpreter);
    register_math_logic_words(interpreter);
    register_value_type_words(interpreter);
    register_block_words(interpreter);
    register_object_words(interpreter);
    register_namespace_words(interpreter);
}
