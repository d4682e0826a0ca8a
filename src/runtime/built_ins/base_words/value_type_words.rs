use crate::{
    add_native_word,
    runtime::{
        data_structures::value::{DeepClone, Value},
        error,
        interpreter::Interpreter,
    },
};

/// Pop a value and push the result of a check on it.
fn check_value(interpreter: &mut dyn Interpreter, check: fn(&Value) -> bool) -> error::Result<()> {
    let value = interpreter.pop()?;

    interpreter.push(Value::Boolean(check(&value)));
    Ok(())
}

/// Is the value a number?
///
/// Signature: `value -- bool`
fn word_is_number(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    check_value(interpreter, Value::is_number)
}

/// Is the value text?  Both quoted text and bare words count.
///
/// Signature: `value -- bool`
fn word_is_text(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    check_value(interpreter, Value::is_textual)
}

/// Signature: `value -- bool`
fn word_is_boolean(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    check_value(interpreter, Value::is_boolean)
}

/// Signature: `value -- bool`
fn word_is_block(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    check_value(interpreter, Value::is_block)
}

/// Signature: `value -- bool`
fn word_is_object(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    check_value(interpreter, Value::is_object)
}

/// Replace a value with the name of its type.
///
/// Signature: `value -- type-name`
fn word_type(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let value = interpreter.pop()?;

    interpreter.push(Value::Text(value.type_name().to_string()));
    Ok(())
}

/// Replace a value with a deep copy of itself.  Blocks and objects are copied all the way down,
/// so changing the copy leaves the original untouched.
///
/// Signature: `value -- copy`
fn word_clone(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let value = interpreter.pop()?;

    interpreter.push(value.deep_clone());
    Ok(())
}

/// Register the value type words.
pub fn register_value_type_words(interpreter: &mut dyn Interpreter) {
    add_native_word!(
        interpreter,
        "isNumber",
        word_is_number,
        "Is the value a number?",
        "value -- bool"
    );

    add_native_word!(
        interpreter,
        "isText",
        word_is_text,
        "Is the value text or a word?",
        "value -- bool"
    );

    add_native_word!(
        interpreter,
        "isBoolean",
        word_is_boolean,
        "Is the value a boolean?",
        "value -- bool"
    );

    add_native_word!(
        interpreter,
        "isBlock",
        word_is_block,
        "Is the value a block?",
        "value -- bool"
    );

    add_native_word!(
        interpreter,
        "isObject",
        word_is_object,
        "Is the value an object?",
        "value -- bool"
    );

    add_native_word!(
        interpreter,
        "type",
        word_type,
        "Get the name of a value's type.",
        "value -- type-name"
    );

    add_native_word!(
        interpreter,
        "clone",
        word_clone,
        "Make a deep copy of a value.",
        "value -- copy"
    );
}
