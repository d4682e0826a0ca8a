use crate::runtime::{data_structures::value::Value, interpreter::Interpreter};

/// Register the constant words.  These are bound to plain values, so the run loop pushes them
/// directly without a native call.
pub fn register_constant_words(interpreter: &mut dyn Interpreter) {
    interpreter.define("true".to_string(), Value::Boolean(true));
    interpreter.define("false".to_string(), Value::Boolean(false));
    interpreter.define("undefined".to_string(), Value::Undefined);
}
