/// Module for managing the original source code.
pub mod source_buffer;

/// Module for turning the source code into a flat list of tokens for further processing.
pub mod tokenizing;

/// Module for structuring a flat token list into nested blocks.  This is done by running the list
/// through the interpreter with the pre-processor namespace active, so the words that build the
/// structure are ordinary native words.
pub mod block_reader;
