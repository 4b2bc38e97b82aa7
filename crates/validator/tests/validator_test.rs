//! End-to-end tests for the field-rule engine.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use pretty_assertions::assert_eq;
use rstest::rstest;
use warden_validator::prelude::*;

// ============================================================================
// FIXTURES
// ============================================================================

#[derive(Debug, Clone)]
struct Country {
    name: Option<String>,
}

#[derive(Debug, Clone)]
struct PhoneNumber {
    value: String,
}

#[derive(Debug, Clone)]
struct Address {
    country: Option<Country>,
    street: Option<String>,
    phone_number: Option<PhoneNumber>,
}

fn country_validator() -> Validator<Country> {
    ValidatorBuilder::<Country>::new()
        .constraint_opt(|c| c.name.as_deref(), "name", |c| {
            c.not_blank().min_length(2)
        })
        .build()
}

fn phone_validator() -> Validator<PhoneNumber> {
    ValidatorBuilder::<PhoneNumber>::new()
        .constraint(|p| &p.value, "value", |c| c.not_blank().min_length(8))
        .build()
}

fn address_validator() -> Validator<Address> {
    ValidatorBuilder::<Address>::new()
        .nest(|a| a.country.as_ref(), "country", country_validator())
        .constraint_opt(|a| a.street.as_deref(), "street", |c| c.not_blank())
        .nest(
            |a| a.phone_number.as_ref(),
            "phoneNumber",
            phone_validator(),
        )
        .build()
}

fn address(country: Option<&str>, street: Option<&str>, phone: &str) -> Address {
    Address {
        country: Some(Country {
            name: country.map(str::to_owned),
        }),
        street: street.map(str::to_owned),
        phone_number: Some(PhoneNumber {
            value: phone.to_owned(),
        }),
    }
}

// ============================================================================
// ADDRESS SCENARIO
// ============================================================================

#[test]
fn test_address_violations_in_declaration_order() {
    let violations = address_validator().validate(&address(Some("J"), None, ""));

    assert_eq!(
        violations.names(),
        vec!["country.name", "street", "phoneNumber.value", "phoneNumber.value"]
    );
    assert_eq!(
        violations.messages(),
        vec![
            "The size of \"country.name\" must be greater than or equal to 2. The given size is 1",
            "\"street\" must not be blank",
            "\"phoneNumber.value\" must not be blank",
            "The size of \"phoneNumber.value\" must be greater than or equal to 8. The given size is 0",
        ]
    );
    assert_eq!(
        violations[0].message_key(),
        "container.greater_than_or_equal"
    );
    assert_eq!(violations[1].message_key(), "string.not_blank");
}

#[test]
fn test_address_absent_country_name() {
    let violations = address_validator().validate(&address(None, Some("tokyo"), "0123456789"));
    assert_eq!(violations.len(), 1);
    assert_eq!(
        violations[0].message(),
        "\"country.name\" must not be blank"
    );
}

#[test]
fn test_address_valid() {
    let violations =
        address_validator().validate(&address(Some("JP"), Some("tokyo"), "0123456789"));
    assert!(violations.is_valid());
    assert!(violations.is_empty());
}

#[test]
fn test_null_nested_reports_once() {
    let target = Address {
        country: None,
        street: Some("tokyo".into()),
        phone_number: None,
    };
    let violations = address_validator().validate(&target);

    assert_eq!(violations.names(), vec!["country", "phoneNumber"]);
    assert_eq!(violations[0].message(), "\"country\" must not be null");
    assert_eq!(violations[0].message_key(), "object.not_null");
    assert_eq!(violations[0].violated_value(), &Arg::Null);
}

#[test]
fn test_nest_if_present_skips_absent() {
    let validator = ValidatorBuilder::<Address>::new()
        .nest_if_present(|a| a.country.as_ref(), "country", country_validator())
        .build();
    let target = Address {
        country: None,
        street: None,
        phone_number: None,
    };
    assert!(validator.validate(&target).is_valid());
}

#[test]
fn test_nest_with_inline_builder() {
    let validator = ValidatorBuilder::<Address>::new()
        .nest_with(|a| a.phone_number.as_ref(), "phone", |b| {
            b.constraint(|p: &PhoneNumber| &p.value, "value", |c| c.starts_with("+"))
        })
        .build();
    let violations = validator.validate(&address(Some("JP"), None, "0123"));
    assert_eq!(violations.names(), vec!["phone.value"]);
    assert_eq!(
        violations[0].message(),
        "\"phone.value\" must start with \"+\""
    );
}

#[test]
fn test_custom_separator_applies_to_nested_names() {
    let validator = ValidatorBuilder::<Address>::new()
        .separator("_")
        .nest(
            |a| a.phone_number.as_ref(),
            "phoneNumber",
            phone_validator(),
        )
        .build();
    let violations = validator.validate(&address(Some("JP"), None, "0123456789a"));
    assert!(violations.is_valid());

    let violations = validator.validate(&address(Some("JP"), None, "123"));
    assert_eq!(violations.names(), vec!["phoneNumber_value"]);
}

// ============================================================================
// COLLECTIONS
// ============================================================================

#[derive(Debug)]
struct Item {
    x: i32,
}

#[derive(Debug)]
struct Order {
    items: Option<Vec<Item>>,
    by_sku: BTreeMap<String, Item>,
    by_slot: HashMap<u32, Item>,
}

fn item_validator() -> Validator<Item> {
    ValidatorBuilder::<Item>::new()
        .constraint(|i| &i.x, "x", |c| c.positive())
        .build()
}

fn order(items: Option<Vec<i32>>) -> Order {
    Order {
        items: items.map(|xs| xs.into_iter().map(|x| Item { x }).collect()),
        by_sku: BTreeMap::new(),
        by_slot: HashMap::new(),
    }
}

#[rstest]
#[case(vec![1, 2, 3], vec![])]
#[case(vec![1, 0, 3], vec!["items[1].x"])]
#[case(vec![-1, 2, -3], vec!["items[0].x", "items[2].x"])]
fn test_for_each_indexes_elements(#[case] xs: Vec<i32>, #[case] expected: Vec<&str>) {
    let validator = ValidatorBuilder::<Order>::new()
        .for_each(|o| o.items.as_ref(), "items", item_validator())
        .build();
    let violations = validator.validate(&order(Some(xs)));
    assert_eq!(violations.names(), expected);
}

#[test]
fn test_for_each_absent_collection() {
    let required = ValidatorBuilder::<Order>::new()
        .for_each(|o| o.items.as_ref(), "items", item_validator())
        .build();
    let violations = required.validate(&order(None));
    assert_eq!(violations.names(), vec!["items"]);
    assert_eq!(violations[0].message_key(), "object.not_null");

    let optional = ValidatorBuilder::<Order>::new()
        .for_each_if_present(|o| o.items.as_ref(), "items", item_validator())
        .build();
    assert!(optional.validate(&order(None)).is_valid());
}

#[test]
fn test_for_each_entry_names_by_key() {
    let mut target = order(Some(vec![]));
    target.by_sku.insert("a-1".into(), Item { x: 1 });
    target.by_sku.insert("b-2".into(), Item { x: -4 });

    let keyed = ValidatorBuilder::<Order>::new()
        .for_each_entry(|o| Some(&o.by_sku), "bySku", item_validator())
        .build();
    assert_eq!(keyed.validate(&target).names(), vec!["bySku[b-2].x"]);

    let positional = ValidatorBuilder::<Order>::new()
        .for_each_value(|o| Some(&o.by_sku), "bySku", item_validator())
        .build();
    assert_eq!(positional.validate(&target).names(), vec!["bySku[1].x"]);
}

#[test]
fn test_for_each_entry_with_hash_map() {
    let mut target = order(Some(vec![]));
    target.by_slot.insert(7, Item { x: 0 });

    let validator = ValidatorBuilder::<Order>::new()
        .for_each_entry_if_present(|o| Some(&o.by_slot), "slots", item_validator())
        .build();
    assert_eq!(validator.validate(&target).names(), vec!["slots[7].x"]);
}

#[test]
fn test_collection_length_rules() {
    let validator = ValidatorBuilder::<Order>::new()
        .constraint_on_object(|o| o.items.as_ref(), "items", |c| {
            c.not_empty().max_length(2)
        })
        .build();
    assert_eq!(validator.validate(&order(Some(vec![]))).len(), 1);
    assert_eq!(
        validator.validate(&order(None))[0].message(),
        "\"items\" must not be empty"
    );
    let too_many = validator.validate(&order(Some(vec![1, 2, 3])));
    assert_eq!(
        too_many[0].message(),
        "The size of \"items\" must be less than or equal to 2. The given size is 3"
    );
}

// ============================================================================
// CONDITIONAL RULES
// ============================================================================

#[derive(Debug)]
struct Account {
    id: i64,
    email: String,
    admin: bool,
}

fn account(id: i64, email: &str, admin: bool) -> Account {
    Account {
        id,
        email: email.to_owned(),
        admin,
    }
}

const UPDATE: ConstraintGroup = ConstraintGroup::of("UPDATE");

fn account_validator() -> Validator<Account> {
    ValidatorBuilder::<Account>::new()
        .constraint(|a| &a.email, "email", |c| c.not_blank().email())
        .constraint_on_group_with(UPDATE, |b| {
            b.constraint(|a: &Account| &a.id, "id", |c| c.positive())
        })
        .constraint_on_condition_with(
            |a: &Account, _: &ConstraintContext| a.admin,
            |b| b.constraint(|a: &Account| &a.email, "email", |c| c.ends_with("@corp.example")),
        )
        .build()
}

#[test]
fn test_group_rules_run_only_in_group() {
    let target = account(0, "a@example.com", false);
    let validator = account_validator();

    assert!(validator.validate(&target).is_valid());

    let violations = validator.validate_with_context(&target, &UPDATE.into());
    assert_eq!(violations.names(), vec!["id"]);
}

#[test]
fn test_condition_rules_run_when_condition_holds() {
    let validator = account_validator();
    assert!(validator.validate(&account(1, "a@example.com", false)).is_valid());

    let violations = validator.validate(&account(1, "a@example.com", true));
    assert_eq!(violations.names(), vec!["email"]);
    assert_eq!(violations[0].message_key(), "string.ends_with");
}

#[test]
fn test_condition_on_context_attribute() {
    let validator = ValidatorBuilder::<Account>::new()
        .constraint_on_condition(
            has_attribute_with_value::<Account>("strict", true),
            ValidatorBuilder::<Account>::new()
                .constraint(|a| &a.id, "id", |c| c.greater_than(100))
                .build(),
        )
        .build();
    let target = account(5, "a@example.com", false);

    assert!(validator.validate(&target).is_valid());
    let strict = ConstraintContext::from_map("DEFAULT", [("strict", true)]);
    assert_eq!(validator.validate_with_context(&target, &strict).len(), 1);
    let lenient = ConstraintContext::from_map("DEFAULT", [("strict", false)]);
    assert!(validator.validate_with_context(&target, &lenient).is_valid());
}

#[derive(Debug)]
struct Card {
    number: String,
}

#[derive(Debug)]
struct Transfer {
    iban: String,
}

#[derive(Debug)]
enum Payment {
    Card(Card),
    Transfer(Transfer),
}

#[test]
fn test_variant_rules_match_only_their_variant() {
    let validator = ValidatorBuilder::<Payment>::new()
        .constraint_on_variant_with(
            |p| match p {
                Payment::Card(card) => Some(card),
                Payment::Transfer(_) => None,
            },
            |b| b.constraint(|c: &Card| &c.number, "number", |c| c.fixed_length(16)),
        )
        .constraint_on_variant_with(
            |p| match p {
                Payment::Transfer(transfer) => Some(transfer),
                Payment::Card(_) => None,
            },
            |b| b.constraint(|t: &Transfer| &t.iban, "iban", |c| c.not_blank()),
        )
        .build();

    let card = Payment::Card(Card {
        number: "123".into(),
    });
    assert_eq!(validator.validate(&card).names(), vec!["number"]);

    let transfer = Payment::Transfer(Transfer { iban: " ".into() });
    assert_eq!(validator.validate(&transfer).names(), vec!["iban"]);
}

// ============================================================================
// FAIL-FAST
// ============================================================================

#[test]
fn test_fail_fast_stops_inside_nested_validator() {
    let validator = address_validator().fail_fast(true);
    let violations = validator.validate(&address(Some(""), None, ""));
    assert_eq!(violations.len(), 1);
    assert_eq!(violations.names(), vec!["country.name"]);
}

#[test]
fn test_fail_fast_child_only_stops_child() {
    let strict_phone = phone_validator().fail_fast(true);
    let validator = ValidatorBuilder::<Address>::new()
        .nest(|a| a.phone_number.as_ref(), "phoneNumber", strict_phone)
        .constraint_opt(|a| a.street.as_deref(), "street", |c| c.not_blank())
        .build();
    let violations = validator.validate(&address(Some("JP"), None, ""));
    assert_eq!(violations.names(), vec!["phoneNumber.value", "street"]);
}

#[test]
fn test_fail_fast_across_collection_elements() {
    let validator = ValidatorBuilder::<Order>::new()
        .fail_fast(true)
        .for_each(|o| o.items.as_ref(), "items", item_validator())
        .build();
    let violations = validator.validate(&order(Some(vec![0, -1, -2])));
    assert_eq!(violations.names(), vec!["items[0].x"]);
}

// ============================================================================
// MESSAGES, LOCALES, ERRORS
// ============================================================================

#[test]
fn test_catalog_formatter_with_locale_fallback() {
    let formatter = CatalogMessageFormatter::new()
        .with_message(Locale::JAPANESE, "string.not_blank", "「{0}」が空白です")
        .with_message(Locale::ROOT, "object.not_null", "{0} is required");
    let validator = ValidatorBuilder::<Address>::new()
        .message_formatter(Arc::new(formatter))
        .constraint_opt(|a| a.street.as_deref(), "street", |c| c.not_blank())
        .nest(|a| a.country.as_ref(), "country", country_validator())
        .build();
    let target = Address {
        country: None,
        street: None,
        phone_number: None,
    };

    let ja = validator.validate_with_locale(&target, &Locale::new("ja_JP"));
    assert_eq!(ja.messages(), vec!["「street」が空白です", "country is required"]);

    let en = validator.validate_with_locale(&target, &Locale::ENGLISH);
    assert_eq!(
        en.messages(),
        vec!["\"street\" must not be blank", "country is required"]
    );
}

#[test]
fn test_custom_message_bypasses_catalog() {
    let formatter = CatalogMessageFormatter::new()
        .with_message(Locale::ROOT, "string.not_blank", "catalog text");
    let validator = ValidatorBuilder::<Address>::new()
        .message_formatter(Arc::new(formatter))
        .constraint_opt(|a| a.street.as_deref(), "street", |c| {
            c.not_blank().message("{0} please")
        })
        .build();
    let violations = validator.validate(&address(None, None, ""));
    assert_eq!(violations[0].message(), "street please");
}

#[test]
fn test_throw_if_invalid_and_into_result() {
    #[derive(Debug)]
    struct Rejected(usize);

    let violations = address_validator().validate(&address(Some("J"), Some("x"), "0123456789"));
    let err = violations.throw_if_invalid(|v| Rejected(v.len())).unwrap_err();
    assert_eq!(err.0, 1);

    let err = violations.into_result().unwrap_err();
    assert_eq!(
        err.to_string(),
        "Constraint violations found!\n* The size of \"country.name\" must be greater than or equal to 2. The given size is 1"
    );
}

#[test]
fn test_details_serialize_to_json() {
    let violations = address_validator().validate(&address(Some("JP"), Some(" "), "0123456789"));
    let json = serde_json::to_value(violations.details()).unwrap();
    assert_eq!(
        json,
        serde_json::json!([{
            "key": "string.not_blank",
            "args": ["street", " "],
            "defaultMessage": "\"street\" must not be blank"
        }])
    );
}

#[test]
fn test_options_applied_from_config() {
    let options: ValidatorOptions =
        serde_json::from_str(r#"{ "separator": "/", "fail_fast": true }"#).unwrap();
    let validator = ValidatorBuilder::<Address>::new()
        .options(options)
        .nest(
            |a| a.phone_number.as_ref(),
            "phoneNumber",
            phone_validator(),
        )
        .build();
    let violations = validator.validate(&address(None, None, ""));
    assert_eq!(violations.names(), vec!["phoneNumber/value"]);
}
