use crate::runtime::{
    data_structures::{
        namespace::Word,
        number::Number,
        object::ObjectPtr,
        value::Value,
        value_block::{BlockPtr, ValueBlock},
    },
    error::{self, ScriptError},
};
use std::{cell::RefCell, collections::VecDeque, rc::Rc};

pub mod context;

/// The data stack of values managed by a context.
pub type ValueStack = Vec<Value>;

/// The shared list that diagnostics are collected into.  Every context created from a root
/// context reports into the same list.
pub type DiagnosticSink = Rc<RefCell<Vec<ScriptError>>>;

/// The remaining code of a context.  Code is consumed from the front, and block words splice their
/// contents back onto the front.
pub type CodeQueue = VecDeque<Value>;

/// Trait for managing a context's data stack.  Intended to be called by native words.
pub trait InterpreterStack {
    /// Use to examine the full data stack when required, for example to print it in the REPL.
    fn stack(&self) -> &ValueStack;

    /// Direct access to the stack for words that rearrange it wholesale.
    fn stack_mut(&mut self) -> &mut ValueStack;

    /// Push a value onto the stack.  This is the primary way of sending values to words.
    fn push(&mut self, value: Value);

    /// Pop a value from the stack.  If the stack is empty a stack underflow error is returned.
    fn pop(&mut self) -> error::Result<Value>;

    /// Pop the top value and attempt to convert it to an integer.  Floats without a fractional
    /// part are accepted.
    fn pop_as_int(&mut self) -> error::Result<i64>;

    /// Pop the top value and attempt to convert it to a count, that is an integer that is not
    /// negative.
    fn pop_as_count(&mut self) -> error::Result<usize>;

    /// Pop the top value as a number.  Booleans count as 0 and 1.
    fn pop_as_number(&mut self) -> error::Result<Number>;

    /// Pop the top value as a string.  Both quoted text and bare words are accepted.
    fn pop_as_text(&mut self) -> error::Result<String>;

    /// Pop the top value and attempt to convert it to a block.
    fn pop_as_block(&mut self) -> error::Result<BlockPtr>;

    /// Pop the top value and attempt to convert it to an object.
    fn pop_as_object(&mut self) -> error::Result<ObjectPtr>;

    /// Look at the top value without removing it.
    fn peek(&self) -> error::Result<&Value>;

    /// Get a reference to the block on top of the stack, leaving it in place.  Most of the block
    /// words work this way, their signature keeps the block on the stack.
    fn peek_as_block(&self) -> error::Result<BlockPtr>;

    /// Get a reference to the object on top of the stack, leaving it in place.
    fn peek_as_object(&self) -> error::Result<ObjectPtr>;
}

/// Trait for managing and executing a context's code.
pub trait CodeManagement {
    /// The code that is still to be run.
    fn code(&self) -> &CodeQueue;

    /// Direct access to the remaining code for words that rearrange it wholesale.
    fn code_mut(&mut self) -> &mut CodeQueue;

    /// Take the next element from the front of the code.  Words that read their arguments from
    /// the code, such as `::`, use this.  Fails if the code is exhausted.
    fn next_code(&mut self) -> error::Result<Value>;

    /// Place the given values onto the front of the code, keeping their order.
    fn splice_code(&mut self, values: Vec<Value>);

    /// Run the code until it is exhausted or the context is halted.
    fn run(&mut self) -> error::Result<()>;

    /// Stop the current run loop.  The remaining code is left in place.
    fn halt(&mut self);

    /// Run code in a fresh context that shares this context's namespace.  The new context starts
    /// with the given stack and its final stack is returned.  This context's own stack and code are
    /// not touched.
    fn execute_isolated(&mut self, stack: ValueStack, code: Vec<Value>)
    -> error::Result<ValueStack>;

    /// Like execute_isolated, but the fresh context resolves words through the given namespace.
    /// The block reader uses this to run code with the pre-processor namespace active.
    fn execute_in(
        &mut self,
        namespace: ObjectPtr,
        stack: ValueStack,
        code: Vec<Value>,
    ) -> error::Result<ValueStack>;
}

/// Definition of a word handler function.  This is the function that is called when a native word
/// is to be executed.  Can be a lambda, a callable object or a Rust function.
pub type WordHandler = dyn Fn(&mut dyn Interpreter) -> error::Result<()>;

/// Simplify registering a native word with the interpreter.
///
/// Required parameters are, the interpreter instance to register with.  The name of the word to
/// register.  The word function handler to execute for the word.  A simple description of the word.
/// As well as the word's stack signature.
///
/// The word is added to the interpreter's active namespace.
#[macro_export]
macro_rules! add_native_word {
    (
        $interpreter:expr ,
        $name:expr ,
        $function:expr ,
        $description:expr ,
        $signature:expr
    ) => {{
        use std::rc::Rc;

        // Register the word while recording where in the source code the word was registered
        // from.
        $interpreter.add_word(
            file!().to_string(),
            line!() as usize,
            column!() as usize,
            $name.to_string(),
            Rc::new($function),
            $description.to_string(),
            $signature.to_string(),
        );
    }};
}

/// Trait for managing namespaces and the words in them.
pub trait WordManagement {
    /// The namespace words are currently resolved through.
    fn namespace(&self) -> ObjectPtr;

    /// Swap in a different namespace.  Definitions made after this land in the new namespace.
    fn set_namespace(&mut self, namespace: ObjectPtr);

    /// The namespace the block reader runs with.
    fn pre_namespace(&self) -> ObjectPtr;

    /// Add a new native word to the active namespace.
    #[allow(clippy::too_many_arguments)]
    fn add_word(
        &mut self,
        file: String,
        line: usize,
        column: usize,
        name: String,
        handler: Rc<WordHandler>,
        description: String,
        signature: String,
    );

    /// Bind a name to a value in the active namespace.  A block becomes a block word, anything
    /// else other than a native becomes a constant.
    fn define(&mut self, name: String, value: Value);

    /// Find a word in the active namespace.
    fn find_word(&self, name: &str) -> Option<Word>;

    /// The name of the native word currently running, if any.
    fn current_word(&self) -> &Option<String>;

    /// Report a problem that should not stop execution, for example an unbalanced block found by
    /// the block reader.
    fn report(&mut self, diagnostic: ScriptError);

    /// The list reports are collected into.
    fn diagnostic_sink(&self) -> DiagnosticSink;
}

/// Core interpreter trait.
///
/// This trait brings together the traits that define the core functionality of a Slang context.
/// Managing the data stack, managing and running code, and managing words.
pub trait Interpreter: InterpreterStack + CodeManagement + WordManagement {}

/// Something that can be evaluated.  Text goes through the lexer and the block reader first, a
/// block is taken to be structured code already and is run as it is.
pub enum Source {
    Text(String),
    Block(BlockPtr),
}

impl From<&str> for Source {
    fn from(text: &str) -> Source {
        Source::Text(text.to_string())
    }
}

impl From<String> for Source {
    fn from(text: String) -> Source {
        Source::Text(text)
    }
}

impl From<BlockPtr> for Source {
    fn from(block: BlockPtr) -> Source {
        Source::Block(block)
    }
}

impl From<Vec<Value>> for Source {
    fn from(values: Vec<Value>) -> Source {
        Source::Block(ValueBlock::from_vec(values))
    }
}

/// Evaluate some source in a fresh context with the standard vocabulary loaded and return the
/// resulting stack.
pub fn evaluate(source: impl Into<Source>) -> error::Result<ValueStack> {
    let mut context = context::Context::new()?;

    context.evaluate(source)
}
