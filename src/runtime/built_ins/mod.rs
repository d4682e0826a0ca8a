/// The core words of the language.
pub mod base_words;

/// Words that perform I/O operations.
pub mod io_words;

/// The words of the pre-processor namespace, the block markers and `macro:`.
pub mod reader_words;
