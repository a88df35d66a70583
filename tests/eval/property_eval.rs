//! Property tests for loop semantics and pipeline determinism.

use proptest::prelude::*;

use lark::{Compilation, SyntaxTree, Value, VariableStore};

fn evaluate(text: &str) -> Option<Value> {
    let compilation = Compilation::new(SyntaxTree::parse(text));
    let result = compilation
        .evaluate(&mut VariableStore::new())
        .expect("property fixtures should not fault");
    assert!(
        result.diagnostics.is_empty(),
        "fixture {text:?} reported {:?}",
        result.diagnostics
    );
    result.value
}

proptest! {
    #[test]
    fn for_runs_exactly_max_zero_upper_minus_lower_times(
        lower in -20i32..=20,
        upper in -20i32..=20,
    ) {
        let text = format!(
            "{{ var n = 0 for i = {lower} to {upper} {{ n = n + 1 }} n }}"
        );
        let expected = (upper - lower).max(0);
        prop_assert_eq!(evaluate(&text), Some(Value::Integer(expected)));
    }

    #[test]
    fn for_visits_each_value_from_lower_to_upper_exclusive(
        lower in -15i32..=15,
        upper in -15i32..=15,
    ) {
        let text = format!(
            "{{ var sum = 0 for i = {lower} to {upper} {{ sum = sum + i }} sum }}"
        );
        let expected: i32 = (lower..upper).sum();
        prop_assert_eq!(evaluate(&text), Some(Value::Integer(expected)));
    }

    #[test]
    fn while_and_for_count_identically(count in 0i32..=30) {
        let with_for = format!(
            "{{ var n = 0 for i = 0 to {count} {{ n = n + 1 }} n }}"
        );
        let with_while = format!(
            "{{ var n = 0 var i = 0 while i < {count} {{ n = n + 1 i = i + 1 }} n }}"
        );
        prop_assert_eq!(evaluate(&with_for), evaluate(&with_while));
    }

    #[test]
    fn evaluation_is_deterministic(seed in 0i32..=100) {
        let text = format!(
            "{{ var n = {seed} if n > 50 {{ n = n * 2 }} else {{ n = n + 7 }} n }}"
        );
        prop_assert_eq!(evaluate(&text), evaluate(&text));
    }
}
