use std::rc::Rc;
use tracing::{ debug, trace, warn };
use crate::{ lang::{ block_reader::read_source,
                     source_buffer::SourceLocation },
             runtime::{ bootstrap,
                        built_ins::{ base_words::register_base_words,
                                     io_words::register_io_words,
                                     reader_words::register_reader_words },
                        data_structures::{ namespace::{ find_word,
                                                        new_namespace,
                                                        NativeWord,
                                                        NativeWordPtr,
                                                        Word },
                                           number::Number,
                                           object::ObjectPtr,
                                           value::Value,
                                           value_block::BlockPtr },
                        error::{ self,
                                 script_error,
                                 script_error_str,
                                 ErrorKind,
                                 ScriptError },
                        interpreter::{ CodeManagement,
                                       CodeQueue,
                                       DiagnosticSink,
                                       Interpreter,
                                       InterpreterStack,
                                       Source,
                                       ValueStack,
                                       WordHandler,
                                       WordManagement } } };



/// An execution context.  A context owns a value stack and the code still to be run, and resolves
/// words through a namespace it shares with every context created from it.
///
/// A root context is created with `Context::new`, which registers the native words and loads the
/// standard vocabulary.  Isolated executions, such as the ones made by `_exec` and `each`, run in
/// short lived contexts that share the root's namespaces and diagnostics.
pub struct Context
{
    stack: ValueStack,
    code: CodeQueue,

    /// The namespace words are resolved through, swappable with `ns!`.
    namespace: ObjectPtr,

    /// The namespace the block reader runs with.
    pre_namespace: ObjectPtr,

    diagnostics: DiagnosticSink,

    /// The native word currently running, used to stamp errors.
    current_word: Option<String>,

    /// Set by `_exit` to stop the run loop.
    halted: bool
}


impl InterpreterStack for Context
{
    fn stack(&self) -> &ValueStack
    {
        &self.stack
    }

    fn stack_mut(&mut self) -> &mut ValueStack
    {
        &mut self.stack
    }

    fn push(&mut self, value: Value)
    {
        self.stack.push(value);
    }

    fn pop(&mut self) -> error::Result<Value>
    {
        match self.stack.pop()
        {
            Some(value) => Ok(value),
            None => script_error_str(self, ErrorKind::StackUnderflow, "Stack underflow.")
        }
    }

    fn pop_as_int(&mut self) -> error::Result<i64>
    {
        let number = self.pop_as_number()?;

        match number.as_int()
        {
            Some(value) => Ok(value),
            None => script_error(self,
                                 ErrorKind::TypeMismatch,
                                 format!("Expected an integer, found {}.", number))
        }
    }

    fn pop_as_count(&mut self) -> error::Result<usize>
    {
        let value = self.pop_as_int()?;

        match usize::try_from(value)
        {
            Ok(count) => Ok(count),
            Err(_) => script_error(self,
                                   ErrorKind::InvalidArgument,
                                   format!("Expected a count, found {}.", value))
        }
    }

    fn pop_as_number(&mut self) -> error::Result<Number>
    {
        match self.pop()?
        {
            Value::Number(number) => Ok(number),
            Value::Boolean(value) => Ok(Number::Int(value as i64)),
            other => script_error(self,
                                  ErrorKind::TypeMismatch,
                                  format!("Expected a number, found {} {}.",
                                          other.type_name(),
                                          other.to_source()))
        }
    }

    fn pop_as_text(&mut self) -> error::Result<String>
    {
        match self.pop()?
        {
            Value::Text(text) | Value::Word(text) => Ok(text),
            other => script_error(self,
                                  ErrorKind::TypeMismatch,
                                  format!("Expected text, found {}.", other.type_name()))
        }
    }

    fn pop_as_block(&mut self) -> error::Result<BlockPtr>
    {
        match self.pop()?
        {
            Value::Block(block) => Ok(block),
            other => script_error(self,
                                  ErrorKind::TypeMismatch,
                                  format!("Expected a block, found {}.", other.type_name()))
        }
    }

    fn pop_as_object(&mut self) -> error::Result<ObjectPtr>
    {
        match self.pop()?
        {
            Value::Object(object) => Ok(object),
            other => script_error(self,
                                  ErrorKind::TypeMismatch,
                                  format!("Expected an object, found {}.", other.type_name()))
        }
    }

    fn peek(&self) -> error::Result<&Value>
    {
        match self.stack.last()
        {
            Some(value) => Ok(value),
            None => script_error_str(self, ErrorKind::StackUnderflow, "Stack underflow.")
        }
    }

    fn peek_as_block(&self) -> error::Result<BlockPtr>
    {
        match self.peek()?
        {
            Value::Block(block) => Ok(block.clone()),
            other => script_error(self,
                                  ErrorKind::TypeMismatch,
                                  format!("Expected a block, found {}.", other.type_name()))
        }
    }

    fn peek_as_object(&self) -> error::Result<ObjectPtr>
    {
        match self.peek()?
        {
            Value::Object(object) => Ok(object.clone()),
            other => script_error(self,
                                  ErrorKind::TypeMismatch,
                                  format!("Expected an object, found {}.", other.type_name()))
        }
    }
}


impl CodeManagement for Context
{
    fn code(&self) -> &CodeQueue
    {
        &self.code
    }

    fn code_mut(&mut self) -> &mut CodeQueue
    {
        &mut self.code
    }

    fn next_code(&mut self) -> error::Result<Value>
    {
        match self.code.pop_front()
        {
            Some(value) => Ok(value),
            None => script_error_str(self, ErrorKind::EndOfCode, "Unexpected end of code.")
        }
    }

    fn splice_code(&mut self, values: Vec<Value>)
    {
        for value in values.into_iter().rev()
        {
            self.code.push_front(value);
        }
    }

    fn run(&mut self) -> error::Result<()>
    {
        self.halted = false;

        while !self.halted
        {
            let Some(current) = self.code.pop_front() else
                {
                    break;
                };

            let word = match &current
                {
                    Value::Word(name) => find_word(&self.namespace, name),
                    _ => None
                };

            match word
            {
                Some(Word::Native(native)) => self.execute_native(&native)?,
                Some(Word::Block(block)) =>
                    {
                        let body = block.borrow().values().clone();
                        self.splice_code(body);
                    },
                Some(Word::Constant(value)) => self.push(value),
                None => self.push(current)
            }
        }

        Ok(())
    }

    fn halt(&mut self)
    {
        self.halted = true;
    }

    fn execute_isolated(&mut self, stack: ValueStack, code: Vec<Value>) -> error::Result<ValueStack>
    {
        let namespace = self.namespace.clone();

        self.execute_in(namespace, stack, code)
    }

    fn execute_in(&mut self,
                  namespace: ObjectPtr,
                  stack: ValueStack,
                  code: Vec<Value>) -> error::Result<ValueStack>
    {
        let mut nested = Context
            {
                stack,
                code: code.into(),
                namespace,
                pre_namespace: self.pre_namespace.clone(),
                diagnostics: self.diagnostics.clone(),
                current_word: None,
                halted: false
            };

        nested.run()?;

        Ok(nested.stack)
    }
}


impl WordManagement for Context
{
    fn namespace(&self) -> ObjectPtr
    {
        self.namespace.clone()
    }

    fn set_namespace(&mut self, namespace: ObjectPtr)
    {
        self.namespace = namespace;
    }

    fn pre_namespace(&self) -> ObjectPtr
    {
        self.pre_namespace.clone()
    }

    fn add_word(&mut self,
                file: String,
                line: usize,
                column: usize,
                name: String,
                handler: Rc<WordHandler>,
                description: String,
                signature: String)
    {
        let location = SourceLocation::new_from_info(&file, line, column);
        let native = NativeWord::new(name.clone(), location, description, signature, handler);

        self.namespace.borrow_mut().set(name, Value::Native(native));
    }

    fn define(&mut self, name: String, value: Value)
    {
        trace!(word = %name, kind = value.type_name(), "define");

        self.namespace.borrow_mut().set(name, value);
    }

    fn find_word(&self, name: &str) -> Option<Word>
    {
        find_word(&self.namespace, name)
    }

    fn current_word(&self) -> &Option<String>
    {
        &self.current_word
    }

    fn report(&mut self, diagnostic: ScriptError)
    {
        warn!(kind = %diagnostic.kind(), "{}", diagnostic);

        self.diagnostics.borrow_mut().push(diagnostic);
    }

    fn diagnostic_sink(&self) -> DiagnosticSink
    {
        self.diagnostics.clone()
    }
}


impl Interpreter for Context
{
}


impl Context
{
    /// Create a context with every native word registered and the standard vocabulary loaded.
    pub fn new() -> error::Result<Context>
    {
        Context::with_bootstrap("<std>", bootstrap::STANDARD_LIBRARY)
    }

    /// Create a context with the native words registered, loading the given source as the
    /// standard vocabulary instead of the built in one.
    pub fn with_bootstrap(path: &str, source: &str) -> error::Result<Context>
    {
        let mut context = Context::without_bootstrap();

        bootstrap::load(&mut context, path, source)?;

        Ok(context)
    }

    /// Create a context with only the native words registered.  Words defined by the standard
    /// vocabulary, such as `exec` or `if`, are not available.
    pub fn without_bootstrap() -> Context
    {
        let mut context = Context
            {
                stack: ValueStack::with_capacity(20),
                code: CodeQueue::new(),
                namespace: new_namespace(),
                pre_namespace: new_namespace(),
                diagnostics: DiagnosticSink::default(),
                current_word: None,
                halted: false
            };

        register_base_words(&mut context);
        register_io_words(&mut context);
        register_reader_words(&mut context);

        debug!(words = context.namespace.borrow().len(), "native words registered");

        context
    }

    /// Evaluate some source in this context and return a copy of the resulting stack.  The stack
    /// and any definitions persist between calls.
    pub fn evaluate(&mut self, source: impl Into<Source>) -> error::Result<ValueStack>
    {
        self.evaluate_named("<eval>", source)
    }

    /// Evaluate some source, tagging lexer diagnostics with the given path.  Code left behind by an
    /// earlier `_exit` is discarded, each evaluation runs only its own code.
    pub fn evaluate_named(&mut self, path: &str, source: impl Into<Source>) -> error::Result<ValueStack>
    {
        let code = match source.into()
            {
                Source::Text(text) => read_source(self, path, &text)?,
                Source::Block(block) => block.borrow().values().clone()
            };

        self.code.clear();
        self.splice_code(code);

        if let Err(error) = self.run()
        {
            self.code.clear();
            return Err(error);
        }

        Ok(self.stack.clone())
    }

    /// Every diagnostic reported so far.
    pub fn diagnostics(&self) -> Vec<ScriptError>
    {
        self.diagnostics.borrow().clone()
    }

    /// Take the diagnostics reported so far, leaving the list empty.
    pub fn take_diagnostics(&mut self) -> Vec<ScriptError>
    {
        self.diagnostics.borrow_mut().drain(..).collect()
    }

    /// Empty the stack, for example after a failed REPL line.
    pub fn clear_stack(&mut self)
    {
        self.stack.clear();
    }

    fn execute_native(&mut self, native: &NativeWordPtr) -> error::Result<()>
    {
        trace!(word = %native.name(), depth = self.stack.len(), "native");

        let previous = self.current_word.replace(native.name().clone());
        let handler = native.handler();

        let result = (*handler)(self);

        self.current_word = previous;

        result
    }
}
