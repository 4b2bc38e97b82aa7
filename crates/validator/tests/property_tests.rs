//! Property-based tests for warden-validator.

use proptest::prelude::*;
use warden_validator::prelude::*;

#[derive(Debug, Clone)]
struct Line {
    sku: String,
    quantity: i32,
}

#[derive(Debug, Clone)]
struct Basket {
    owner: Option<String>,
    lines: Vec<Line>,
    note: String,
    express: bool,
}

fn line_strategy() -> impl Strategy<Value = Line> {
    (".{0,6}", -5i32..20).prop_map(|(sku, quantity)| Line { sku, quantity })
}

fn basket_strategy() -> impl Strategy<Value = Basket> {
    (
        proptest::option::of(".{0,8}"),
        proptest::collection::vec(line_strategy(), 0..6),
        ".{0,12}",
        any::<bool>(),
    )
        .prop_map(|(owner, lines, note, express)| Basket {
            owner,
            lines,
            note,
            express,
        })
}

fn basket_validator(fail_fast: bool) -> Validator<Basket> {
    let line = ValidatorBuilder::<Line>::new()
        .constraint(|l| &l.sku, "sku", |c| c.not_blank().fixed_length(4))
        .constraint(|l| &l.quantity, "quantity", |c| c.positive().less_than(10))
        .build();

    ValidatorBuilder::<Basket>::new()
        .fail_fast(fail_fast)
        .constraint_opt(|b| b.owner.as_deref(), "owner", |c| {
            c.not_blank().max_length(5)
        })
        .for_each(|b| Some(&b.lines), "lines", line)
        .constraint_on_condition_with(
            |b: &Basket, _: &ConstraintContext| b.express,
            |v| v.constraint(|b: &Basket| &b.note, "note", |c| c.not_empty()),
        )
        .constraint_on_group_with(ConstraintGroup::of("AUDIT"), |v| {
            v.constraint(|b: &Basket| &b.note, "note", |c| c.contains("ok"))
        })
        .build()
}

// ============================================================================
// VALIDITY: is_valid() <=> no violations
// ============================================================================

proptest! {
    #[test]
    fn valid_iff_no_violations(basket in basket_strategy()) {
        let violations = basket_validator(false).validate(&basket);
        prop_assert_eq!(violations.is_valid(), violations.is_empty());
    }

    #[test]
    fn validate_is_deterministic(basket in basket_strategy()) {
        let validator = basket_validator(false);
        let first = validator.validate(&basket);
        let second = validator.validate(&basket);
        prop_assert_eq!(first, second);
    }
}

// ============================================================================
// FAIL-FAST: at most one violation, and it is the first collect-all one
// ============================================================================

proptest! {
    #[test]
    fn fail_fast_reports_at_most_one(basket in basket_strategy()) {
        let audit = ConstraintContext::from(ConstraintGroup::of("AUDIT"));
        let violations = basket_validator(true).validate_with_context(&basket, &audit);
        prop_assert!(violations.len() <= 1);
    }

    #[test]
    fn fail_fast_returns_first_of_collect_all(basket in basket_strategy()) {
        let all = basket_validator(false).validate(&basket);
        let first = basket_validator(false).fail_fast(true).validate(&basket);
        prop_assert_eq!(first.first(), all.first());
    }
}

// ============================================================================
// COMPLETENESS: one violation per failing leaf rule
// ============================================================================

proptest! {
    #[test]
    fn collect_all_counts_failing_leaf_rules(basket in basket_strategy()) {
        let mut expected = 0;
        match basket.owner.as_deref() {
            // not_blank treats an absent value as a violation
            None => expected += 1,
            Some(owner) => {
                expected += usize::from(owner.trim().is_empty());
                expected += usize::from(owner.chars().count() > 5);
            }
        }
        for line in &basket.lines {
            expected += usize::from(line.sku.trim().is_empty());
            expected += usize::from(line.sku.chars().count() != 4);
            expected += usize::from(line.quantity <= 0);
            expected += usize::from(line.quantity >= 10);
        }
        if basket.express {
            expected += usize::from(basket.note.is_empty());
        }

        prop_assert_eq!(basket_validator(false).validate(&basket).len(), expected);
    }
}

#[test]
fn absent_owner_fails_only_null_invalid_rules() {
    let basket = Basket {
        owner: None,
        lines: Vec::new(),
        note: String::new(),
        express: false,
    };
    let violations = basket_validator(false).validate(&basket);
    assert_eq!(violations.names(), vec!["owner"]);
    assert_eq!(violations[0].message_key(), "string.not_blank");
}

// ============================================================================
// RENDERING: pure in (template, args, locale)
// ============================================================================

proptest! {
    #[test]
    fn rendering_is_idempotent(template in ".{0,40}", a in ".{0,8}", b in any::<i64>()) {
        let args = [Arg::from(a), Arg::from(b)];
        let formatter = SimpleMessageFormatter::new();
        let first = formatter.format("key", &template, &args, &Locale::ROOT);
        let second = formatter.format("key", &template, &args, &Locale::ROOT);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn messages_render_identically_twice(basket in basket_strategy()) {
        let violations = basket_validator(false).validate(&basket);
        prop_assert_eq!(violations.messages(), violations.messages());
    }
}
