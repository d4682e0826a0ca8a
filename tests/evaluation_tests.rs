// Table driven tests of the language as a whole.  Every program runs through the full pipeline in a
// fresh context with the standard vocabulary loaded, and the resulting stack is compared in its
// source form, bottom first.


use slang::runtime::bootstrap;
use slang::runtime::data_structures::namespace::native_words;
use slang::runtime::interpreter::{InterpreterStack, WordManagement};
use slang::{Context, ErrorKind, Result, Value};
use std::rc::Rc;
use test_case::test_case;

fn render(stack: &[Value]) -> String {
    stack.iter().map(Value::to_source).collect::<Vec<_>>().join(" ")
}

fn eval(source: &str) -> Result<String> {
    let stack = slang::evaluate(source)?;
    Ok(render(&stack))
}

fn eval_error(source: &str) -> ErrorKind {
    match slang::evaluate(source) {
        Ok(stack) => panic!("'{}' should have failed, left {}", source, render(&stack)),
        Err(error) => error.kind(),
    }
}


#[test_case("1 2 add", "3"; "add")]
#[test_case("7 2 sub", "5"; "sub")]
#[test_case("6 7 mul", "42"; "mul")]
#[test_case("8 2 div", "4"; "exact div stays integral")]
#[test_case("7 2 div", "3.5"; "inexact div gives float")]
#[test_case("7 2 mod", "1"; "mod")]
#[test_case("1.5 2 add", "3.5"; "mixed add")]
#[test_case("'a' 'b' add", "\"ab\""; "text concatenation")]
#[test_case("'n' 1 add", "\"n1\""; "text and number concatenation")]
#[test_case("1 2 gt 'b' 'a' gt", "false true"; "greater than")]
#[test_case("1 1.0 eq true 1 eq", "true true"; "loose equality")]
#[test_case("'a' \\ a eq", "true"; "text equals word")]
#[test_case("0 not", "true"; "not")]
#[test_case("0 5 or 1 5 and 0 5 and", "5 5 0"; "value selecting logic")]
fn math_and_logic(source: &str, expected: &str) -> Result<()> {
    assert_eq!(eval(source)?, expected);
    Ok(())
}


#[test_case("1 dup", "1 1"; "dup")]
#[test_case("1 2 drop", "1"; "drop")]
#[test_case("1 2 swap", "2 1"; "swap")]
#[test_case("1 2 3 rot", "3 1 2"; "rot moves the top to the bottom")]
#[test_case("1 2 3 tor", "2 3 1"; "tor moves the bottom to the top")]
#[test_case("1 2 over", "1 2 1"; "over")]
#[test_case("1 2 nip", "2"; "nip")]
#[test_case("1 2 3 swap2", "3 2 1"; "swap2")]
#[test_case("1 2 dup2", "1 2 1 2"; "dup2")]
#[test_case("1 2 3 depth", "1 2 3 3"; "depth")]
#[test_case("1 2 3 clear", ""; "clear")]
#[test_case("1 2 s2b", "[ 1 2 ]"; "stack to block")]
#[test_case("[ 1 2 ] b2s", "1 2"; "block to stack")]
fn stack_words(source: &str, expected: &str) -> Result<()> {
    assert_eq!(eval(source)?, expected);
    Ok(())
}


#[test_case("1 isNumber 'x' isText foo isText [ ] isBlock {} isObject true isBoolean",
            "true true true true true true"; "type checks")]
#[test_case("1 type [ ] type undefined type foo type", "\"number\" \"block\" \"undefined\" \"word\"";
            "type names")]
#[test_case("undefined isUndefined 0 isUndefined", "true false"; "is undefined")]
#[test_case("[ 1 2 ] dup 9 0 to", "[ 9 2 ] [ 9 2 ]"; "blocks are shared")]
#[test_case("[ 1 2 ] dup clone 9 0 to", "[ 1 2 ] [ 9 2 ]"; "clone is independent")]
fn value_types(source: &str, expected: &str) -> Result<()> {
    assert_eq!(eval(source)?, expected);
    Ok(())
}


#[test_case("[]", "[ ]"; "new block")]
#[test_case("[ 1 2 3 ] 1 at", "[ 1 2 3 ] 2"; "at")]
#[test_case("[ 1 2 3 ] -1 at", "[ 1 2 3 ] 3"; "at from the end")]
#[test_case("[ 1 2 3 ] 9 at", "[ 1 2 3 ] undefined"; "at out of range")]
#[test_case("[ 1 2 ] 5 0 to", "[ 5 2 ]"; "to")]
#[test_case("[ 1 ] 5 3 to", "[ 1 undefined undefined 5 ]"; "to grows the block")]
#[test_case("[ 1 2 ] 0 0 before", "[ 0 1 2 ]"; "before")]
#[test_case("[ 1 2 ] 3 -1 before", "[ 1 2 3 ]"; "before the end appends")]
#[test_case("[ 1 2 ] 9 0 after", "[ 1 9 2 ]"; "after")]
#[test_case("[ 1 2 ] 3 push", "[ 1 2 3 ]"; "push")]
#[test_case("[ 1 2 3 ] pop", "[ 1 2 ] 3"; "pop")]
#[test_case("[ 4 5 ] first [ 4 5 ] last", "[ 4 5 ] 4 [ 4 5 ] 5"; "first and last")]
#[test_case("[ 1 2 3 ] len 'abc' len", "[ 1 2 3 ] 3 \"abc\" 3"; "len")]
#[test_case("[ 1 2 3 ] [ dup ] each", "[ 1 1 2 2 3 3 ]"; "each expands")]
#[test_case("[ 1 2 3 ] [ drop ] each", "[ ]"; "each removes")]
#[test_case("[ 1 2 3 ] [ 1 add ] map", "[ 2 3 4 ]"; "map")]
#[test_case("[ 1 2 3 4 ] [ 2 gt ] filter", "[ 3 4 ]"; "filter")]
#[test_case("[ 1 2 3 ] 0 [ add ] reduce", "6"; "reduce")]
#[test_case("[ 'a' 'b' ] '' [ add ] reduce", "\"ab\""; "reduce text")]
#[test_case("4 range", "[ 0 1 2 3 ]"; "range")]
#[test_case("0 range", "[ ]"; "empty range")]
fn block_words(source: &str, expected: &str) -> Result<()> {
    assert_eq!(eval(source)?, expected);
    Ok(())
}


#[test_case("{} 1 'a' set 'a' get swap drop", "1"; "get own attribute")]
#[test_case("{} 'a' get swap drop", "undefined"; "get missing attribute")]
#[test_case("{} 1 'a' set new 'a' get swap drop", "undefined"; "get ignores the parent")]
#[test_case("{} 1 'a' set new 'a' lookup swap drop", "1"; "lookup walks the parent")]
#[test_case("{} 1 'a' set 'a' has swap drop", "true"; "has")]
#[test_case("{} 1 'a' set 'a' del swap 'a' has swap drop", "1 false"; "del")]
#[test_case("{} 1 'b' set 2 'a' set keys swap drop", "[ \"a\" \"b\" ]"; "keys are sorted")]
#[test_case("{} proto swap drop", "undefined"; "no parent")]
#[test_case("{} new proto isObject swap drop", "true"; "parent of new")]
#[test_case("{} 1 \\ a set \\ a get swap drop", "1"; "word keys")]
fn object_words(source: &str, expected: &str) -> Result<()> {
    assert_eq!(eval(source)?, expected);
    Ok(())
}


#[test_case("21 [ 2 mul ] exec", "42"; "exec")]
#[test_case("1 2 [ add ] exec", "3"; "exec sees the whole stack")]
#[test_case("'1 2 add' eval", "3"; "eval")]
#[test_case("[ 5 ] [ 1 add ] _exec", "[ 6 ]"; "isolated exec")]
#[test_case("[ 1 2 ] b2c", "1 2"; "block to code")]
#[test_case("\\ dup", "dup"; "quote")]
#[test_case("1 _exit 2", "1"; "exit")]
#[test_case("nop", ""; "nop")]
#[test_case("1 2 1 1 _swapN 3", "1 3 2"; "transpose")]
#[test_case("1 0 2 _swapN", "1 undefined undefined"; "transpose pads")]
#[test_case("1 2 _flip 3 4", "4 3 2 1"; "flip")]
#[test_case(":: sq [ dup mul ] 5 sq", "25"; "block definition")]
#[test_case(":: answer 42 answer", "42"; "constant definition")]
#[test_case(":: 'quoted' 7 quoted", "7"; "text name")]
#[test_case("unknown", "unknown"; "unknown words are literals")]
#[test_case("1 2 .", "1"; "print and drop")]
fn code_words(source: &str, expected: &str) -> Result<()> {
    assert_eq!(eval(source)?, expected);
    Ok(())
}


#[test_case("true [ 'yes' ] [ 'no' ] if", "\"yes\""; "if true")]
#[test_case("false [ 'yes' ] [ 'no' ] if", "\"no\""; "if false")]
#[test_case("true 1 2 select false 1 2 select", "1 2"; "select")]
#[test_case("[ 1 ] ? [ 'then' ]", "\"then\""; "ternary without else")]
#[test_case("[ 0 ] ? [ 'then' ]", ""; "ternary without else skipped")]
#[test_case("[ 1 ] ? [ 'then' ] else [ 'other' ]", "\"then\""; "ternary then")]
#[test_case("[ 0 ] ? [ 'then' ] else [ 'other' ]", "\"other\""; "ternary else")]
#[test_case("[ 1 ] ? [ 'then' ] 5", "\"then\" 5"; "ternary keeps what follows")]
#[test_case("4 [ dup 3 gt ] ? [ 'big' ] else [ 'small' ]", "4 \"big\""; "ternary condition sees the stack")]
#[test_case("4 [ 3 gt ] ? [ 'big' ] else [ 'small' ]", "\"big\""; "ternary condition consumes what it uses")]
#[test_case(":: fact [ [ dup 1 gt ] ? [ dup 1 sub fact mul ] ] 5 fact", "120"; "recursion")]
#[test_case("1 2 lt 2 2 ge 3 2 le 1 2 ne", "true true false true"; "comparisons")]
#[test_case("3 7 max 3 7 min", "7 3"; "max and min")]
#[test_case("5 neg abs 4 abs", "5 4"; "neg and abs")]
fn control_words(source: &str, expected: &str) -> Result<()> {
    assert_eq!(eval(source)?, expected);
    Ok(())
}


#[test_case("3 + 4", "7"; "infix add")]
#[test_case("10 - 4", "6"; "infix sub")]
#[test_case("2 * 3 + 1", "7"; "infix chain")]
#[test_case("9 / 3 7 % 4", "3 3"; "infix div and mod")]
#[test_case("1 == 1 1 != 1", "true false"; "infix equality")]
#[test_case("3 > 2 && 2 < 3", "true"; "infix logic")]
#[test_case("prefix: bigger max bigger 3 7", "7"; "prefix")]
#[test_case("infix: plus add 1 plus 2", "3"; "user infix")]
fn operators(source: &str, expected: &str) -> Result<()> {
    assert_eq!(eval(source)?, expected);
    Ok(())
}


#[test_case("macro: twice [ dup add ] 3 twice", "6"; "block macro")]
#[test_case("macro: ten 10 ten ten add", "20"; "value macro")]
#[test_case("( a comment ) 1 -- another comment\n 2", "1 2"; "comments")]
#[test_case("'it\"s' \"it's\"", "'it\"s' \"it's\""; "quotes")]
#[test_case("[ 1 [ 2 [ 3 ] ] ]", "[ 1 [ 2 [ 3 ] ] ]"; "nested blocks")]
fn reader(source: &str, expected: &str) -> Result<()> {
    assert_eq!(eval(source)?, expected);
    Ok(())
}


#[test_case("drop", ErrorKind::StackUnderflow; "underflow")]
#[test_case("1 add", ErrorKind::StackUnderflow; "binary underflow")]
#[test_case("1 0 div", ErrorKind::DivisionByZero; "division by zero")]
#[test_case("1 0 mod", ErrorKind::DivisionByZero; "modulo by zero")]
#[test_case("'a' 1 sub", ErrorKind::TypeMismatch; "text arithmetic")]
#[test_case("[ 1 2 ] 'x' at", ErrorKind::TypeMismatch; "text index")]
#[test_case("1 2 _exec", ErrorKind::TypeMismatch; "exec needs a block")]
#[test_case("1 -1 _swapN", ErrorKind::InvalidArgument; "negative transpose")]
#[test_case("\\", ErrorKind::EndOfCode; "quote at the end")]
#[test_case(":: x", ErrorKind::EndOfCode; "definition at the end")]
#[test_case("1 0 9223372036854775807 _swapN", ErrorKind::InvalidArgument; "transpose padding too large")]
#[test_case("1 9223372036854775807 0 _swapN", ErrorKind::InvalidArgument; "transpose stack padding too large")]
#[test_case("[] 1 9223372036854775807 to", ErrorKind::InvalidArgument; "write far past the end")]
#[test_case("[ 1 ] 2 -5 to", ErrorKind::InvalidArgument; "write before the start")]
fn errors(source: &str, expected: ErrorKind) {
    assert_eq!(eval_error(source), expected);
}


#[test]
fn errors_name_the_running_word() {
    let error = slang::evaluate("1 2 add drop drop drop").unwrap_err();

    assert_eq!(error.kind(), ErrorKind::StackUnderflow);
    assert_eq!(error.word(), &Some("drop".to_string()));
}


#[test]
fn errors_inside_isolated_runs_propagate() {
    let error = slang::evaluate("[ 1 2 ] [ 0 div ] map").unwrap_err();

    assert_eq!(error.kind(), ErrorKind::DivisionByZero);
}


#[test]
fn unbalanced_blocks_are_diagnostics() -> Result<()> {
    let mut context = Context::new()?;

    let stack = context.evaluate("[ 1 2")?;
    assert_eq!(render(&stack), "[ 1 2 ]");

    let diagnostics = context.take_diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].kind(), ErrorKind::UnbalancedBlock);

    let stack = context.evaluate("]")?;
    assert_eq!(render(&stack), "[ 1 2 ]");
    assert_eq!(context.diagnostics().len(), 1);

    Ok(())
}


#[test]
fn unbalanced_block_diagnostics_point_at_the_marker() -> Result<()> {
    let mut context = Context::new()?;

    context.evaluate("1 [ 2")?;
    context.evaluate("3\n  ] 4")?;

    let diagnostics = context.take_diagnostics();
    assert_eq!(diagnostics.len(), 2);

    let unclosed = diagnostics[0].location().clone().unwrap();
    assert_eq!((unclosed.line(), unclosed.column()), (1, 3));

    let stray = diagnostics[1].location().clone().unwrap();
    assert_eq!((stray.line(), stray.column()), (2, 3));
    assert_eq!(stray.path(), "<eval>");
    Ok(())
}


#[test]
fn unterminated_text_is_a_diagnostic() -> Result<()> {
    let mut context = Context::new()?;

    let stack = context.evaluate("'abc")?;

    assert_eq!(render(&stack), "\"abc\"");
    assert_eq!(context.diagnostics()[0].kind(), ErrorKind::UnterminatedLiteral);
    Ok(())
}


#[test]
fn sessions_persist() -> Result<()> {
    let mut context = Context::new()?;

    context.evaluate(":: sq [ dup mul ]")?;
    context.evaluate("3")?;

    let stack = context.evaluate("sq 4 sq")?;
    assert_eq!(render(&stack), "9 16");

    context.clear_stack();
    assert!(context.stack().is_empty());
    Ok(())
}


#[test]
fn exit_leaves_no_code_for_the_next_evaluation() -> Result<()> {
    let mut context = Context::new()?;

    let stack = context.evaluate("1 _exit 2 3")?;
    assert_eq!(render(&stack), "1");

    let stack = context.evaluate("4")?;
    assert_eq!(render(&stack), "1 4");
    Ok(())
}


#[test]
fn failed_evaluations_drop_the_remaining_code() -> Result<()> {
    let mut context = Context::new()?;

    assert!(context.evaluate("1 drop drop 5").is_err());

    let stack = context.evaluate("2")?;
    assert_eq!(render(&stack), "2");
    Ok(())
}


#[test]
fn structured_code_skips_the_reader() -> Result<()> {
    let mut context = Context::new()?;
    let code = vec![Value::from(2i64), Value::from(3i64), Value::Word("add".to_string())];

    let stack = context.evaluate(code)?;
    assert_eq!(stack, vec![Value::from(5i64)]);

    // Reader words are not part of the main namespace, so a bare marker is just a word.
    let stack = context.evaluate(vec![Value::Word("[".to_string())])?;
    assert_eq!(render(&stack), "5 [");
    Ok(())
}


#[test]
fn namespaces_can_be_swapped() -> Result<()> {
    assert_eq!(eval("ns isObject")?, "true");
    assert_eq!(eval(":: x 1 x {} ns! x")?, "1 x");
    assert_eq!(eval("ns \\ dup has swap drop")?, "true");
    Ok(())
}


#[test_case("\\ dup info 'signature' get swap drop", "\"value -- value value\""; "native signature")]
#[test_case("\\ dup info 'kind' get swap drop", "\"native\""; "native kind")]
#[test_case("\\ exec info 'kind' get swap drop", "\"block\""; "block kind")]
#[test_case(":: answer 42 \\ answer info 'kind' get swap drop", "\"constant\""; "constant kind")]
#[test_case("\\ mystery info", "undefined"; "unbound")]
fn word_info(source: &str, expected: &str) -> Result<()> {
    assert_eq!(eval(source)?, expected);
    Ok(())
}


#[test]
fn native_words_record_where_they_were_registered() -> Result<()> {
    let context = Context::new()?;
    let natives = native_words(&context.namespace());

    let names: Vec<&str> = natives.iter().map(|native| native.name().as_str()).collect();
    let mut sorted = names.clone();
    sorted.sort();
    assert_eq!(names, sorted);

    let dup = natives.iter().find(|native| native.name() == "dup").unwrap();
    assert!(dup.location().path().ends_with("stack_words.rs"));
    assert!(dup.location().line() > 0);
    assert_eq!(dup.signature(), "value -- value value");

    // Words defined by the vocabulary are blocks, not natives.
    assert!(!names.contains(&"exec"));
    Ok(())
}


#[test_case("[] dup push", "[ [ ... ] ]"; "block holding itself prints")]
#[test_case("[] dup push clone", "[ [ ... ] ]"; "block holding itself clones")]
#[test_case("[] dup push dup clone eq", "[ [ ... ] ] true"; "cyclic blocks compare")]
#[test_case("[] dup push [ 1 ] eq", "false"; "cyclic block against plain block")]
#[test_case("{} dup 'self' set clone", "{ self: { ... } }"; "object holding itself")]
#[test_case("{} [] over push 'b' set clone", "{ b: [ { ... } ] }"; "object cycle through a block")]
#[test_case("[ 1 ] dup [] swap push swap push", "[ [ 1 ] [ 1 ] ]"; "shared block prints twice")]
fn cyclic_values(source: &str, expected: &str) -> Result<()> {
    assert_eq!(eval(source)?, expected);
    Ok(())
}


#[test]
fn clones_keep_their_own_cycles() -> Result<()> {
    let stack = slang::evaluate("[] dup push dup clone")?;

    let (Value::Block(original), Value::Block(copy)) = (&stack[0], &stack[1]) else {
        panic!("expected two blocks, found {}", render(&stack));
    };

    assert!(!Rc::ptr_eq(original, copy));

    let Value::Block(inner) = copy.borrow().at(0) else {
        panic!("the copy should hold a block");
    };

    assert!(Rc::ptr_eq(copy, &inner));
    Ok(())
}


#[test]
fn contexts_without_the_vocabulary_only_know_natives() -> Result<()> {
    let mut context = Context::without_bootstrap();

    let stack = context.evaluate("1 2 add [ 1 ] exec")?;
    assert_eq!(render(&stack), "3 [ 1 ] exec");
    Ok(())
}


#[test]
fn alternative_vocabularies_load() -> Result<()> {
    let mut context = Context::with_bootstrap("<test>", ":: double [ 2 mul ] :: quad [ double double ]")?;

    let stack = context.evaluate("3 quad")?;
    assert_eq!(render(&stack), "12");
    Ok(())
}


#[test_case(":: a [ b ]"; "undefined word in a body")]
#[test_case(":: a [ 1 [ \\ b ] ]"; "undefined word in a nested block")]
#[test_case("mystery"; "undefined word at the top level")]
#[test_case(":: a [ 1 ] [ 2"; "unbalanced block")]
fn vocabularies_reject_forward_references(source: &str) {
    match Context::with_bootstrap("<test>", source) {
        Ok(_) => panic!("'{}' should have been rejected", source),
        Err(error) => assert_eq!(error.kind(), ErrorKind::Bootstrap),
    }
}


#[test_case(":: a [ a ]"; "recursion")]
#[test_case(":: a [ 1 ] :: b [ a ]"; "earlier definition")]
#[test_case(":: t [ [ :: _op_ [ \\ _word_ ] ] ]"; "template markers")]
fn vocabularies_accept_backward_references(source: &str) {
    assert!(Context::with_bootstrap("<test>", source).is_ok());
}


#[test]
fn standard_vocabulary_self_test() -> Result<()> {
    let mut context = Context::new()?;

    let passed = bootstrap::self_test(&mut context)?;

    assert!(passed > 0);
    assert!(context.stack().is_empty());
    Ok(())
}
