use crate::{
    add_native_word,
    runtime::{
        data_structures::{
            object::{Object, ObjectPtr},
            value::Value,
        },
        error::{self, ErrorKind, script_error},
        interpreter::Interpreter,
    },
};

/// Pop an attribute key.  Text and words are used as they are, numbers by their printed form.
fn pop_key(interpreter: &mut dyn Interpreter) -> error::Result<String> {
    match interpreter.pop()? {
        Value::Text(key) | Value::Word(key) => Ok(key),
        Value::Number(number) => Ok(number.to_string()),
        other => script_error(
            interpreter,
            ErrorKind::TypeMismatch,
            format!("A {} can not be used as an object key.", other.type_name()),
        ),
    }
}

/// Create a new empty object.
///
/// Signature: ` -- object`
fn word_object_new(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    interpreter.push(Value::Object(Object::new()));
    Ok(())
}

/// Read one of an object's own attributes, or undefined if it has no such attribute.
///
/// Signature: `object key -- object value`
fn word_object_get(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let key = pop_key(interpreter)?;
    let object = interpreter.peek_as_object()?;

    let value = object.borrow().get(&key).cloned().unwrap_or_default();
    interpreter.push(value);

    Ok(())
}

/// Signature: `object value key -- object`
fn word_object_set(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let key = pop_key(interpreter)?;
    let value = interpreter.pop()?;
    let object = interpreter.peek_as_object()?;

    object.borrow_mut().set(key, value);
    Ok(())
}

/// Delete an attribute, pushing the value it held.
///
/// Signature: `object key -- object value`
fn word_object_delete(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let key = pop_key(interpreter)?;
    let object = interpreter.peek_as_object()?;

    let value = object.borrow_mut().remove(&key).unwrap_or_default();
    interpreter.push(value);

    Ok(())
}

/// Get a block of the object's own attribute names, sorted.
///
/// Signature: `object -- object keys`
fn word_object_keys(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let object = interpreter.peek_as_object()?;

    let keys: Vec<Value> = object.borrow().keys().into_iter().map(Value::Text).collect();
    interpreter.push(Value::from(keys));

    Ok(())
}

/// Signature: `object key -- object bool`
fn word_object_has(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let key = pop_key(interpreter)?;
    let object = interpreter.peek_as_object()?;

    let found = object.borrow().contains(&key);
    interpreter.push(Value::Boolean(found));

    Ok(())
}

/// Get the object's parent, or undefined if it has none.
///
/// Signature: `object -- object parent`
fn word_object_proto(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let object = interpreter.peek_as_object()?;

    let parent = object.borrow().parent().clone();
    interpreter.push(parent.map(Value::Object).unwrap_or_default());

    Ok(())
}

/// Set the object's parent.  Undefined removes it.
///
/// Signature: `object parent -- object`
fn word_object_set_proto(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let parent: Option<ObjectPtr> = match interpreter.pop()? {
        Value::Object(parent) => Some(parent),
        Value::Undefined => None,
        other => {
            return script_error(
                interpreter,
                ErrorKind::TypeMismatch,
                format!("A {} can not be an object's parent.", other.type_name()),
            );
        }
    };

    let object = interpreter.peek_as_object()?;
    object.borrow_mut().set_parent(parent);

    Ok(())
}

/// Look an attribute up on the object and then up its parent chain.
///
/// Signature: `object key -- object value`
fn word_object_lookup(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let key = pop_key(interpreter)?;
    let object = interpreter.peek_as_object()?;

    let value = object.borrow().lookup(&key).unwrap_or_default();
    interpreter.push(value);

    Ok(())
}

/// Register the object words.
pub fn register_object_words(interpreter: &mut dyn Interpreter) {
    add_native_word!(
        interpreter,
        "{}",
        word_object_new,
        "Create a new empty object.",
        " -- object"
    );

    add_native_word!(
        interpreter,
        "get",
        word_object_get,
        "Read one of an object's own attributes.",
        "object key -- object value"
    );

    add_native_word!(
        interpreter,
        "set",
        word_object_set,
        "Write an attribute of an object.",
        "object value key -- object"
    );

    add_native_word!(
        interpreter,
        "del",
        word_object_delete,
        "Delete an attribute, pushing its old value.",
        "object key -- object value"
    );

    add_native_word!(
        interpreter,
        "keys",
        word_object_keys,
        "Get the sorted names of an object's own attributes.",
        "object -- object keys"
    );

    add_native_word!(
        interpreter,
        "has",
        word_object_has,
        "Does the object have the attribute itself?",
        "object key -- object bool"
    );

    add_native_word!(
        interpreter,
        "proto",
        word_object_proto,
        "Get an object's parent.",
        "object -- object parent"
    );

    add_native_word!(
        interpreter,
        "proto!",
        word_object_set_proto,
        "Set an object's parent.",
        "object parent -- object"
    );

    add_native_word!(
        interpreter,
        "lookup",
        word_object_lookup,
        "Look an attribute up through the parent chain.",
        "object key -- object value"
    );
}
