use crate::{
    add_native_word,
    runtime::{
        built_ins::base_words::code_words::code_of,
        data_structures::{
            value::Value,
            value_block::{BlockPtr, ValueBlock},
        },
        error::{self, ErrorKind, script_error},
        interpreter::Interpreter,
    },
};

/// Create a new empty block.  This has to be a word rather than a constant, every use needs its
/// own block.
///
/// Signature: ` -- block`
fn word_block_new(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    interpreter.push(Value::Block(ValueBlock::new()));
    Ok(())
}

/// Read the element at an index.  Negative indices count from the end, anything out of range
/// reads as undefined.
///
/// Signature: `block index -- block element`
fn word_block_at(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let index = interpreter.pop_as_int()?;
    let block = interpreter.peek_as_block()?;

    let value = block.borrow().at(index);
    interpreter.push(value);

    Ok(())
}

/// Write the element at an index, growing the block with undefined values if needed.
///
/// Signature: `block element index -- block`
fn word_block_to(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let index = interpreter.pop_as_int()?;
    let value = interpreter.pop()?;
    let block = interpreter.peek_as_block()?;

    let result = block.borrow_mut().set(index, value);

    if let Err(reason) = result {
        let len = block.borrow().len();

        return script_error(
            interpreter,
            ErrorKind::InvalidArgument,
            format!("Index {} {}, the block holds {}.", index, reason, len),
        );
    }

    Ok(())
}

/// Insert an element before an index.  A negative index counts from the end so that `-1` appends.
///
/// Signature: `block element index -- block`
fn word_block_before(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let index = interpreter.pop_as_int()?;
    let value = interpreter.pop()?;
    let block = interpreter.peek_as_block()?;

    block.borrow_mut().insert_before(index, value);
    Ok(())
}

/// Remove the last element of a block.
///
/// Signature: `block -- block element`
fn word_block_pop(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let block = interpreter.peek_as_block()?;

    let value = block.borrow_mut().pop();
    interpreter.push(value);

    Ok(())
}

/// Get the length of a block or of text.
///
/// Signature: `block -- block length`
fn word_len(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let len = match interpreter.peek()? {
        Value::Block(block) => block.borrow().len(),
        Value::Text(text) | Value::Word(text) => text.chars().count(),
        other => {
            let message = format!("Can not take the length of a {}.", other.type_name());
            return script_error(interpreter, ErrorKind::TypeMismatch, message);
        }
    };

    interpreter.push(Value::Number(len.into()));
    Ok(())
}

/// Run a block over every element of another block.  Each element is run in its own context with
/// just that element on the stack, and whatever that context leaves behind takes the element's
/// place.  No results removes the element, several results are all inserted.
///
/// Signature: `block code -- block`
fn word_block_each(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let code = interpreter.pop()?;
    let block = interpreter.peek_as_block()?;

    substitute_each(interpreter, &block, &code)
}

/// The substitution loop behind `each`.  The block is only borrowed between runs, so the code is
/// free to look at it.
pub fn substitute_each(
    interpreter: &mut dyn Interpreter,
    block: &BlockPtr,
    code: &Value,
) -> error::Result<()> {
    let body = code_of(code);
    let mut index = 0;

    loop {
        let element = {
            let block = block.borrow();

            if index >= block.len() {
                break;
            }

            block.values()[index].clone()
        };

        let results = interpreter.execute_isolated(vec![element], body.clone())?;
        index += block.borrow_mut().replace_with(index, results);
    }

    Ok(())
}

/// Register the block words.
pub fn register_block_words(interpreter: &mut dyn Interpreter) {
    add_native_word!(
        interpreter,
        "[]",
        word_block_new,
        "Create a new empty block.",
        " -- block"
    );

    add_native_word!(
        interpreter,
        "at",
        word_block_at,
        "Read the element at an index, negative indices count from the end.",
        "block index -- block element"
    );

    add_native_word!(
        interpreter,
        "to",
        word_block_to,
        "Write the element at an index.",
        "block element index -- block"
    );

    add_native_word!(
        interpreter,
        "before",
        word_block_before,
        "Insert an element before an index.",
        "block element index -- block"
    );

    add_native_word!(
        interpreter,
        "pop",
        word_block_pop,
        "Remove the last element of a block.",
        "block -- block element"
    );

    add_native_word!(
        interpreter,
        "len",
        word_len,
        "Get the length of a block or text.",
        "block -- block length"
    );

    add_native_word!(
        interpreter,
        "each",
        word_block_each,
        "Replace every element with the results of running code on it.",
        "block code -- block"
    );
}
