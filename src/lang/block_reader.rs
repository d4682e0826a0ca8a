use crate::{
    lang::{
        source_buffer::SourceLocation,
        tokenizing::{Token, tokenize_from_source},
    },
    runtime::{
        built_ins::reader_words::{BLOCK_CLOSE, BLOCK_OPEN},
        data_structures::value::Value,
        error::{self, ErrorKind},
        interpreter::Interpreter,
    },
};

/// Structure a flat list of values.  The values are run as code with the pre-processor namespace
/// active, which only holds the block markers and `macro:`.  Everything else falls through to the
/// result unchanged, so the stack left at the end is the structured code.
pub fn read_structure(
    interpreter: &mut dyn Interpreter,
    values: Vec<Value>,
) -> error::Result<Vec<Value>> {
    let pre_namespace = interpreter.pre_namespace();

    interpreter.execute_in(pre_namespace, Vec::new(), values)
}

/// Lex and structure source text.  Lexer diagnostics are reported through the interpreter, and
/// unbalanced block diagnostics from the reader are pointed at the marker in the source.
pub fn read_source(
    interpreter: &mut dyn Interpreter,
    path: &str,
    source: &str,
) -> error::Result<Vec<Value>> {
    let tokenized = tokenize_from_source(path, source);
    let values = tokenized.values();
    let markers = unbalanced_markers(&tokenized.tokens);

    for diagnostic in tokenized.diagnostics {
        interpreter.report(diagnostic);
    }

    let sink = interpreter.diagnostic_sink();
    let reported = sink.borrow().len();

    let structured = read_structure(interpreter, values)?;

    let mut diagnostics = sink.borrow_mut();
    let mut unlocated: Vec<_> = diagnostics
        .iter_mut()
        .skip(reported)
        .filter(|diagnostic| {
            diagnostic.kind() == ErrorKind::UnbalancedBlock && diagnostic.location().is_none()
        })
        .collect();

    // The reader only sees plain values.  When what it found lines up with the token scan, the
    // scan's locations are used.
    if unlocated.len() == markers.len() {
        for (diagnostic, location) in unlocated.iter_mut().zip(markers) {
            diagnostic.locate(location);
        }
    }

    Ok(structured)
}

/// Where the reader will find unbalanced markers, in the order it reports them.  Close markers
/// without an open come first as they are met, then the opens that never close, innermost first.
fn unbalanced_markers(tokens: &[Token]) -> Vec<SourceLocation> {
    let mut open = Vec::new();
    let mut found = Vec::new();

    for token in tokens {
        let Token::Word(location, word) = token else {
            continue;
        };

        match word.as_str() {
            BLOCK_OPEN => open.push(location.clone()),
            BLOCK_CLOSE => {
                if open.pop().is_none() {
                    found.push(location.clone());
                }
            }
            _ => {}
        }
    }

    found.extend(open.into_iter().rev());
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    fn markers(source: &str) -> Vec<(usize, usize)> {
        let tokenized = tokenize_from_source("<test>", source);

        unbalanced_markers(&tokenized.tokens)
            .iter()
            .map(|location| (location.line(), location.column()))
            .collect()
    }

    #[test]
    fn balanced_source_has_no_markers() {
        assert!(markers("[ 1 [ 2 ] ] [ ]").is_empty());
    }

    #[test]
    fn stray_closes_come_before_unclosed_opens() {
        assert_eq!(markers("] [ 1\n[ 2"), vec![(1, 1), (2, 1), (1, 3)]);
    }
}
