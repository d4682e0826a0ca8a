// Property tests of the laws the engine is built on: transposition between the stack and the code,
// substitution by `each`, and the reader reading back what blocks print.


use proptest::prelude::*;
use slang::lang::{block_reader::read_structure, tokenizing::tokenize_from_source};
use slang::runtime::data_structures::value_block::ValueBlock;
use slang::{Context, Value};

fn numbers(values: &[i64]) -> Vec<Value> {
    values.iter().map(|value| Value::from(*value)).collect()
}

fn word(name: &str) -> Value {
    Value::Word(name.to_string())
}

/// A stack, some code, and transposition counts with the stack count in bounds.
fn transposition() -> impl Strategy<Value = (Vec<i64>, Vec<i64>, usize, usize)> {
    (
        prop::collection::vec(-100i64..100, 0..6),
        prop::collection::vec(-100i64..100, 0..6),
    )
        .prop_flat_map(|(stack, code)| {
            let depth = stack.len();
            (Just(stack), Just(code), 0..=depth, 0usize..8)
        })
}

/// Structured code the reader can round trip.  Words are kept away from the reader's own markers
/// and text away from quotes.
fn structured() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        any::<i64>().prop_map(Value::from),
        "[a-z][a-z_?]{0,5}".prop_map(Value::Word),
        "[a-zA-Z0-9 ]{0,8}".prop_map(Value::Text),
    ];

    leaf.prop_recursive(3, 24, 5, |inner| {
        prop::collection::vec(inner, 0..5).prop_map(Value::from)
    })
}

proptest! {
    /// The top n stack values become the front of the code and the first c code values land on the
    /// top of the stack, padded with undefined.  Running the rest of the code afterwards pushes
    /// every remaining number, so the final stack shows both sides of the exchange.
    #[test]
    fn prop_transposition_law((stack, code, n, c) in transposition()) {
        let mut program = numbers(&stack);
        program.push(Value::from(n as i64));
        program.push(Value::from(c as i64));
        program.push(word("_swapN"));
        program.extend(numbers(&code));

        let mut context = Context::without_bootstrap();
        let result = context.evaluate(program).unwrap();

        let kept = stack.len() - n;
        let pulled = c.min(code.len());

        let mut expected = numbers(&stack[..kept]);
        expected.extend(numbers(&code[..pulled]));
        expected.extend(std::iter::repeat_n(Value::Undefined, c - pulled));
        expected.extend(numbers(&stack[kept..]));
        expected.extend(numbers(&code[pulled..]));

        prop_assert_eq!(result, expected);
    }

    /// Each element is replaced by everything its isolated run leaves behind, in order.
    #[test]
    fn prop_substitution_law(counts in prop::collection::vec(0i64..5, 0..8)) {
        let program = vec![
            Value::from(numbers(&counts)),
            Value::from(vec![word("range"), word("b2s")]),
            word("each"),
        ];

        let mut context = Context::new().unwrap();
        let result = context.evaluate(program).unwrap();

        let expected: Vec<i64> = counts.iter().flat_map(|count| 0..*count).collect();
        let total: i64 = counts.iter().sum();

        prop_assert_eq!(expected.len() as i64, total);
        prop_assert_eq!(result, vec![Value::from(numbers(&expected))]);
    }

    /// Printing structured code and reading it back gives an equal block.
    #[test]
    fn prop_reader_idempotence(values in prop::collection::vec(structured(), 0..6)) {
        let block = ValueBlock::from_vec(values);
        let source = block.borrow().to_source();

        let mut context = Context::without_bootstrap();
        let tokenized = tokenize_from_source("<prop>", &source);
        prop_assert!(tokenized.diagnostics.is_empty());

        let structured = read_structure(&mut context, tokenized.values()).unwrap();

        // The printed form is a single block, so reading it gives exactly that block back.
        prop_assert_eq!(structured, vec![Value::Block(block)]);
        prop_assert!(context.diagnostics().is_empty());
    }
}
