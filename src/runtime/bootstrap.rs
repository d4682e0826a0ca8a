use std::collections::HashSet;
use tracing::{ debug, warn };
use crate::{ lang::{ block_reader::read_source,
                     source_buffer::SourceLocation },
             runtime::{ data_structures::value::Value,
                        error::{ self,
                                 ErrorKind,
                                 ScriptError },
                        interpreter::{ context::Context,
                                       CodeManagement,
                                       WordManagement } } };



/// The standard vocabulary, embedded at build time.
pub const STANDARD_LIBRARY: &str = include_str!("std.sl");


/// Placeholder words that only appear inside templates and lookahead checks.  They are never run
/// so they don't have to be defined.
const MARKERS: [&str; 3] = [ "else", "_op_", "_word_" ];

const DEFINE: &str = "::";

/// Words that define an operator from the two values following them in the code.
const OPERATOR_GENERATORS: [&str; 2] = [ "infix:", "prefix:" ];


/// Programs run by the self-test, along with the stack each one should leave behind.
const SELF_TESTS: &[( &str, &str )] =
    &[
        ( "1 2 add",                                "[ 3 ]" ),
        ( "1 2 over",                               "[ 1 2 1 ]" ),
        ( "1 2 3 swap2",                            "[ 3 2 1 ]" ),
        ( "1 2 3 depth",                            "[ 1 2 3 3 ]" ),
        ( "21 [ 2 mul ] exec",                      "[ 42 ]" ),
        ( "'1 2 add' eval",                         "[ 3 ]" ),
        ( "true [ 'yes' ] [ 'no' ] if",             "[ \"yes\" ]" ),
        ( "false [ 'yes' ] [ 'no' ] if",            "[ \"no\" ]" ),
        ( "[ 1 ] ? [ 'then' ]",                     "[ \"then\" ]" ),
        ( "[ 0 ] ? [ 'then' ] else [ 'else' ]",     "[ \"else\" ]" ),
        ( "[ 1 2 3 ] [ 1 add ] map",                "[ [ 2 3 4 ] ]" ),
        ( "[ 1 2 3 4 ] [ 2 gt ] filter",            "[ [ 3 4 ] ]" ),
        ( "[ 1 2 3 ] 0 [ add ] reduce",             "[ 6 ]" ),
        ( "4 range",                                "[ [ 0 1 2 3 ] ]" ),
        ( "3 7 max 3 7 min",                        "[ 7 3 ]" ),
        ( "5 neg abs",                              "[ 5 ]" ),
        ( "3 + 4",                                  "[ 7 ]" ),
        ( "2 * 3 + 1",                              "[ 7 ]" ),
        ( "{} 1 'a' set new 'a' lookup swap drop",  "[ 1 ]" )
    ];



/// Load a standard vocabulary into a context.  The source is read, checked for forward references
/// and then run.  Anything the vocabulary leaves on the stack is discarded.
pub fn load(context: &mut Context, path: &str, source: &str) -> error::Result<()>
{
    let reported = context.diagnostics().len();
    let code = read_source(context, path, source)?;

    if let Some(diagnostic) = context.diagnostics().get(reported)
    {
        return ScriptError::new_as_result(ErrorKind::Bootstrap,
                                          diagnostic.location().clone(),
                                          format!("Could not read {}: {}", path, diagnostic.error()),
                                          None);
    }

    let mut check = ReferenceCheck::new(context, path);
    check.check_top_level(&code)?;

    debug!(path, definitions = check.defined.len(), "bootstrap checked");

    let leftover = context.execute_isolated(Vec::new(), code)?;

    if !leftover.is_empty()
    {
        warn!(path, values = leftover.len(), "bootstrap left values on the stack");
    }

    debug!(path, "bootstrap loaded");

    Ok(())
}


/// Run the self-test table against a loaded context.  Every program runs in isolation, leaving the
/// context's stack alone.  Returns the number of programs that passed, or an error describing the
/// first one that didn't.
pub fn self_test(context: &mut Context) -> error::Result<usize>
{
    for ( index, ( source, expected ) ) in SELF_TESTS.iter().enumerate()
    {
        let code = read_source(context, "<self-test>", source)?;
        let stack = context.execute_isolated(Vec::new(), code)?;
        let found = Value::from(stack).to_source();

        if found != *expected
        {
            return ScriptError::new_as_result(ErrorKind::Bootstrap,
                                              None,
                                              format!("Self-test '{}' left {}, expected {}.",
                                                      source,
                                                      found,
                                                      expected),
                                              None);
        }

        debug!(test = index, source, "self-test passed");
    }

    Ok(SELF_TESTS.len())
}



/// Walks structured bootstrap code, tracking the names defined so far and rejecting any word that
/// is used before it exists.
struct ReferenceCheck<'a>
{
    context: &'a Context,
    path: &'a str,
    defined: HashSet<String>
}


impl<'a> ReferenceCheck<'a>
{
    fn new(context: &'a Context, path: &'a str) -> ReferenceCheck<'a>
    {
        ReferenceCheck
            {
                context,
                path,
                defined: HashSet::new()
            }
    }

    fn is_known(&self, name: &str) -> bool
    {
           MARKERS.contains(&name)
        || self.defined.contains(name)
        || self.context.find_word(name).is_some()
    }

    fn require(&self, name: &str, within: &str) -> error::Result<()>
    {
        if self.is_known(name)
        {
            return Ok(());
        }

        ScriptError::new_as_result(ErrorKind::Bootstrap,
                                   Some(SourceLocation::new_from_path(self.path)),
                                   format!("Word '{}' is used in {} before it is defined.",
                                           name,
                                           within),
                                   None)
    }

    /// Check every word in a value, descending into nested blocks.  Words behind a quote marker
    /// are checked too, they are almost always run later.
    fn check_body(&self, value: &Value, within: &str) -> error::Result<()>
    {
        match value
        {
            Value::Word(name) => self.require(name, within),

            Value::Block(block) =>
                {
                    for item in block.borrow().iter()
                    {
                        self.check_body(item, within)?;
                    }

                    Ok(())
                },

            _ => Ok(())
        }
    }

    fn definition_name(&self, value: Option<&Value>, context: &str) -> error::Result<String>
    {
        match value.and_then(Value::as_text)
        {
            Some(name) => Ok(name.to_string()),
            None => ScriptError::new_as_result(ErrorKind::Bootstrap,
                                               Some(SourceLocation::new_from_path(self.path)),
                                               format!("Expected a name after '{}'.", context),
                                               None)
        }
    }

    fn check_top_level(&mut self, code: &[Value]) -> error::Result<()>
    {
        let mut values = code.iter();

        while let Some(value) = values.next()
        {
            let Some(word) = value.as_word() else
                {
                    continue;
                };

            if word == DEFINE
            {
                let name = self.definition_name(values.next(), word)?;
                let within = format!("the definition of '{}'", name);

                // Recursion is allowed, so the name is known while its body is checked.
                self.defined.insert(name);

                if let Some(body) = values.next()
                {
                    self.check_body(body, &within)?;
                }
            }
            else if OPERATOR_GENERATORS.contains(&word)
            {
                self.require(word, "the top level")?;

                let operator = self.definition_name(values.next(), word)?;
                let within = format!("the operator '{}'", operator);

                if let Some(target) = values.next()
                {
                    self.check_body(target, &within)?;
                }

                self.defined.insert(operator);
            }
            else
            {
                self.require(word, "the top level")?;
            }
        }

        Ok(())
    }
}
