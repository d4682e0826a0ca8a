use std::{ error::Error,
           process::{ ExitCode, Termination },
           fmt::{ self, Debug, Display, Formatter } };
use crate::lang::source_buffer::SourceLocation;

use super::interpreter::Interpreter;



pub type Result<T> = std::result::Result<T, ScriptError>;



/// The broad category of a ScriptError.  Used by hosts and tests to tell failures apart without
/// having to inspect the message text.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ErrorKind
{
    /// A word needed more values than the stack held.
    StackUnderflow,

    /// A block was opened and never closed, or a close marker had no matching open.
    UnbalancedBlock,

    /// A string literal or comment ran off the end of the source.
    UnterminatedLiteral,

    /// A word was handed a value of the wrong type.
    TypeMismatch,

    /// A value had the right type but an unusable value, a negative count for example.
    InvalidArgument,

    /// Integer division or modulo by zero.
    DivisionByZero,

    /// A word expected to read from the code but the code was exhausted.
    EndOfCode,

    /// The standard vocabulary failed to load or failed its self-test.
    Bootstrap,

    /// Reading a script from disk failed.
    Io
}


impl Display for ErrorKind
{
    fn fmt(&self, f: &mut Formatter) -> fmt::Result
    {
        let name = match self
            {
                ErrorKind::StackUnderflow      => "stack underflow",
                ErrorKind::UnbalancedBlock     => "unbalanced block",
                ErrorKind::UnterminatedLiteral => "unterminated literal",
                ErrorKind::TypeMismatch        => "type mismatch",
                ErrorKind::InvalidArgument     => "invalid argument",
                ErrorKind::DivisionByZero      => "division by zero",
                ErrorKind::EndOfCode           => "end of code",
                ErrorKind::Bootstrap           => "bootstrap",
                ErrorKind::Io                  => "i/o"
            };

        write!(f, "{}", name)
    }
}



/// Any error that occurs while reading or running a Slang script.  Structural problems found by
/// the lexer and block reader are also represented by this type, but those are reported through
/// the diagnostic channel instead of being returned.
#[derive(Clone)]
pub struct ScriptError
{
    /// What sort of failure this is.
    kind: ErrorKind,

    /// The location in the source code the error occurred, if available.
    location: Option<SourceLocation>,

    /// The description of the error.
    error: String,

    /// The native word that was running when the error was raised, if any.
    word: Option<String>
}


impl Error for ScriptError
{
}


/// When returned from main, convert the error result to an operating system exit code.
impl Termination for ScriptError
{
    fn report(self) -> ExitCode
    {
        eprintln!("Error: {}", self);
        ExitCode::FAILURE
    }
}


impl Display for ScriptError
{
    fn fmt(&self, f: &mut Formatter) -> fmt::Result
    {
        if let Some(location) = &self.location
        {
            write!(f, "{}: ", location)?;
        }

        write!(f, "{}", self.error)?;

        if let Some(word) = &self.word
        {
            write!(f, " (in word '{}')", word)?;
        }

        Ok(())
    }
}


impl Debug for ScriptError
{
    fn fmt(&self, f: &mut Formatter) -> fmt::Result
    {
        write!(f, "[{}] {}", self.kind, self)
    }
}


impl ScriptError
{
    /// Create a new ScriptError.
    pub fn new(kind: ErrorKind,
               location: Option<SourceLocation>,
               error: String,
               word: Option<String>) -> ScriptError
    {
        ScriptError
            {
                kind,
                location,
                error,
                word
            }
    }

    /// Create a new Script Error and wrap it in a Result::Err.
    pub fn new_as_result<T>(kind: ErrorKind,
                            location: Option<SourceLocation>,
                            error: String,
                            word: Option<String>) -> Result<T>
    {
        Err(ScriptError::new(kind, location, error, word))
    }

    pub fn kind(&self) -> ErrorKind
    {
        self.kind
    }

    /// If available, the location in the source code the error occurred.
    pub fn location(&self) -> &Option<SourceLocation>
    {
        &self.location
    }

    /// The description of the error.
    pub fn error(&self) -> &String
    {
        &self.error
    }

    /// The native word that raised the error, if any.
    pub fn word(&self) -> &Option<String>
    {
        &self.word
    }

    /// Give an error that was raised without a location one.  A location already set is kept.
    pub fn locate(&mut self, location: SourceLocation)
    {
        if self.location.is_none()
        {
            self.location = Some(location);
        }
    }
}


/// Allow for the conversion of a std::io::Error into a ScriptError.
impl From<std::io::Error> for ScriptError
{
    fn from(error: std::io::Error) -> ScriptError
    {
        ScriptError::new(ErrorKind::Io, None, format!("I/O error: {}", error), None)
    }
}



/// A convenience function for creating a ScriptError and wrapping in in a Result::Err, stamped with
/// the name of the native word the interpreter is currently running.
pub fn script_error<T>(interpreter: &dyn Interpreter, kind: ErrorKind, message: String) -> Result<T>
{
    let word = interpreter.current_word().clone();

    ScriptError::new_as_result(kind, None, message, word)
}



pub fn script_error_str<T>(interpreter: &dyn Interpreter, kind: ErrorKind, message: &str) -> Result<T>
{
    script_error(interpreter, kind, message.to_string())
}
