use crate::{
    add_native_word,
    runtime::{error, interpreter::Interpreter},
};

/// Print the top value of the stack, leaving it in place.
///
/// Signature: `value -- value`
fn word_print(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let value = interpreter.peek()?;

    println!("{}", value);
    Ok(())
}

/// Register the I/O words.
pub fn register_io_words(interpreter: &mut dyn Interpreter) {
    add_native_word!(
        interpreter,
        "print",
        word_print,
        "Print the top value of the stack.",
        "value -- value"
    );
}
