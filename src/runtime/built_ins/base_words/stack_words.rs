use crate::{
    add_native_word,
    runtime::{
        error::{self, ErrorKind, script_error_str},
        interpreter::Interpreter,
    },
};

/// Duplicate the top value on the data stack.
///
/// Signature: `value -- value value`
fn word_dup(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let value = interpreter.pop()?;

    interpreter.push(value.clone());
    interpreter.push(value);

    Ok(())
}

/// Drop the top value on the data stack.
///
/// Signature: `value -- `
fn word_drop(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let _ = interpreter.pop()?;

    Ok(())
}

/// Swap the top 2 values on the data stack.
///
/// Signature: `a b -- b a`
fn word_swap(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let a = interpreter.pop()?;
    let b = interpreter.pop()?;

    interpreter.push(a);
    interpreter.push(b);

    Ok(())
}

/// Move the top value to the very bottom of the stack.
///
/// Signature: `... x -- x ...`
fn word_rot(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let value = interpreter.pop()?;

    interpreter.stack_mut().insert(0, value);

    Ok(())
}

/// Move the bottom value of the stack to the top.
///
/// Signature: `x ... -- ... x`
fn word_tor(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    if interpreter.stack().is_empty() {
        return script_error_str(interpreter, ErrorKind::StackUnderflow, "Stack underflow.");
    }

    let value = interpreter.stack_mut().remove(0);
    interpreter.push(value);

    Ok(())
}

/// Register the stack manipulation words.
pub fn register_stack_words(interpreter: &mut dyn Interpreter) {
    add_native_word!(
        interpreter,
        "dup",
        word_dup,
        "Duplicate the top value on the data stack.",
        "value -- value value"
    );

    add_native_word!(
        interpreter,
        "drop",
        word_drop,
        "Discard the top value on the data stack.",
        "value -- "
    );

    add_native_word!(
        interpreter,
        "swap",
        word_swap,
        "Swap the top 2 values on the data stack.",
        "a b -- b a"
    );

    add_native_word!(
        interpreter,
        "rot",
        word_rot,
        "Move the top of the stack to the bottom.",
        "... x -- x ..."
    );

    add_native_word!(
        interpreter,
        "tor",
        word_tor,
        "Move the bottom of the stack to the top.",
        "x ... -- ... x"
    );
}
