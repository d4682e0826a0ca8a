use core::str::Chars;
use std::fmt::{ self,
                Display,
                Formatter };



/// The location in the source code where a token was found.  Lexer diagnostics carry one of these
/// so that a host can point the user at the offending text.
///
/// This is a read-only structure.  Use the field accessor methods to get the values.
#[derive(Clone, PartialEq, PartialOrd, Eq, Hash)]
pub struct SourceLocation
{
    /// Either the path to the file or a description of the source code.  For example code entered
    /// in the REPL will have a tag of "\<repl\>".
    path: String,

    /// The 1 based line number in the source code where the token was found.
    line: usize,

    /// The 1 based column number in the source code where the token was found.
    column: usize
}


impl Default for SourceLocation
{
    fn default() -> Self
    {
        Self::new()
    }
}


/// Used for error reporting to show where in the source code an error originated.
impl Display for SourceLocation
{
    fn fmt(&self, formatter: &mut Formatter<'_>) -> Result<(), fmt::Error>
    {
        write!(formatter, "{} ({}, {})", self.path, self.line, self.column)
    }
}


impl fmt::Debug for SourceLocation
{
    fn fmt(&self, formatter: &mut Formatter<'_>) -> Result<(), fmt::Error>
    {
        write!(formatter, "{}", self)
    }
}


impl SourceLocation
{
    pub fn new() -> SourceLocation
    {
        SourceLocation { path: "unspecified".to_string(), line: 1, column: 1 }
    }

    /// Create a new SourceLocation at the start of the given source.
    pub fn new_from_path(path: &str) -> Self
    {
        SourceLocation { path: path.to_owned(), line: 1, column: 1 }
    }

    /// Create a new SourceLocation with all of the needed information.  Native words are stamped
    /// with the Rust file, line and column they were registered from.
    pub fn new_from_info(path: &str, line: usize, column: usize) -> Self
    {
        SourceLocation { path: path.to_owned(), line, column }
    }

    /// The path to the source code or a meaningful description of the source code.
    pub fn path(&self) -> &String
    {
        &self.path
    }

    /// The 1 based line number in the source code.
    pub fn line(&self) -> usize
    {
        self.line
    }

    /// The 1 based column number in the source code.
    pub fn column(&self) -> usize
    {
        self.column
    }
}



/// A forward only cursor over source text that keeps track of the line and column of the next
/// character.  The buffer borrows the text, it is never copied.
pub struct SourceBuffer<'a>
{
    chars: Chars<'a>,

    /// The logical location of the cursor in the source code.
    location: SourceLocation,

    /// A character that has been peeked at but not yet consumed.
    current: Option<char>
}


impl<'a> SourceBuffer<'a>
{
    pub fn new(path: &str, source: &'a str) -> Self
    {
        SourceBuffer
            {
                chars: source.chars(),
                location: SourceLocation::new_from_path(path),
                current: None
            }
    }

    /// The location the cursor is at in the source code being processed.
    pub fn location(&self) -> &SourceLocation
    {
        &self.location
    }

    /// Take a peek at the next character in the source code without consuming it.
    pub fn peek_next(&mut self) -> Option<char>
    {
        if self.current.is_none()
        {
            self.current = self.chars.next();
        }

        self.current
    }

    /// Look one character past the next one.  Only valid when nothing else has been peeked beyond
    /// the current character, the lexer uses it to spot the `--` comment opener.
    pub fn peek_second(&mut self) -> Option<char>
    {
        let _ = self.peek_next();
        self.chars.clone().next()
    }

    /// Get and consume the next character in the source code.
    pub fn next_char(&mut self) -> Option<char>
    {
        let next = match self.current.take()
            {
                Some(current) => Some(current),
                None => self.chars.next()
            };

        if let Some(next_char) = next
        {
            self.increment_location(next_char);
        }

        next
    }

    /// Advance one column for regular characters.  Reset the column to 1 and increment the line
    /// for new line characters.
    fn increment_location(&mut self, next: char)
    {
        if next == '\n'
        {
            self.location.line += 1;
            self.location.column = 1;
        }
        else
        {
            self.location.column += 1;
        }
    }
}



#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn tracks_lines_and_columns()
    {
        let mut buffer = SourceBuffer::new("<test>", "ab\nc");

        assert_eq!(buffer.next_char(), Some('a'));
        assert_eq!(buffer.location().column(), 2);

        assert_eq!(buffer.next_char(), Some('b'));
        assert_eq!(buffer.next_char(), Some('\n'));
        assert_eq!(buffer.location().line(), 2);
        assert_eq!(buffer.location().column(), 1);
    }

    #[test]
    fn peeking_does_not_consume()
    {
        let mut buffer = SourceBuffer::new("<test>", "-x");

        assert_eq!(buffer.peek_next(), Some('-'));
        assert_eq!(buffer.peek_second(), Some('x'));
        assert_eq!(buffer.next_char(), Some('-'));
        assert_eq!(buffer.next_char(), Some('x'));
        assert_eq!(buffer.next_char(), None);
    }
}
