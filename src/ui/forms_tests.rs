#![allow(clippy::unwrap_used)]

use rust_decimal_macros::dec;

use super::forms::*;

fn typed(kind: FormKind, description: &str, amount: &str) -> Form {
    let mut form = Form::new(kind);
    form.description = description.into();
    form.amount = amount.into();
    form
}

// ── parse_amount ──────────────────────────────────────────────

#[test]
fn test_parse_amount_plain() {
    assert_eq!(parse_amount("12.50"), Some(dec!(12.50)));
    assert_eq!(parse_amount("  7 "), Some(dec!(7)));
    assert_eq!(parse_amount("0"), Some(dec!(0)));
}

#[test]
fn test_parse_amount_currency_and_commas() {
    assert_eq!(parse_amount("$1,234.56"), Some(dec!(1234.56)));
    assert_eq!(parse_amount("-$4"), Some(dec!(-4)));
    assert_eq!(parse_amount("-3.25"), Some(dec!(-3.25)));
}

#[test]
fn test_parse_amount_rejects_non_numeric() {
    assert_eq!(parse_amount(""), None);
    assert_eq!(parse_amount("   "), None);
    assert_eq!(parse_amount("abc"), None);
    assert_eq!(parse_amount("12abc"), None);
    assert_eq!(parse_amount("NaN"), None);
    assert_eq!(parse_amount("$"), None);
    assert_eq!(parse_amount("--5"), None);
}

// ── Form ──────────────────────────────────────────────────────

#[test]
fn test_expense_form_starts_on_description() {
    let form = Form::new(FormKind::Expense);
    assert_eq!(form.focus, Field::Description);
    assert_eq!(Form::new(FormKind::TopUp).focus, Field::Amount);
}

#[test]
fn test_typing_goes_to_focused_field() {
    let mut form = Form::new(FormKind::Expense);
    for c in "Tea".chars() {
        form.push(c);
    }
    form.next_field();
    for c in "2.55".chars() {
        form.push(c);
    }
    form.pop();
    assert_eq!(form.description, "Tea");
    assert_eq!(form.amount, "2.5");
}

#[test]
fn test_next_field_wraps() {
    let mut form = Form::new(FormKind::Expense);
    form.next_field();
    assert_eq!(form.focus, Field::Amount);
    form.next_field();
    assert_eq!(form.focus, Field::Description);

    let mut single = Form::new(FormKind::InitialBalance);
    single.next_field();
    assert_eq!(single.focus, Field::Amount);
}

#[test]
fn test_submit_expense() {
    let form = typed(FormKind::Expense, " Lunch ", "12.50");
    assert_eq!(
        form.submit(),
        Some(Submission::Expense {
            description: "Lunch".into(),
            amount: dec!(12.50),
        })
    );
}

#[test]
fn test_submit_expense_requires_description() {
    let form = typed(FormKind::Expense, "  ", "12.50");
    assert_eq!(form.submit(), None);
    assert_eq!(form.first_invalid(), Some(Field::Description));
}

#[test]
fn test_submit_rejects_bad_amount() {
    let form = typed(FormKind::Expense, "Lunch", "twelve");
    assert_eq!(form.submit(), None);
    assert_eq!(form.first_invalid(), Some(Field::Amount));

    assert_eq!(typed(FormKind::TopUp, "", "").submit(), None);
    assert_eq!(typed(FormKind::InitialBalance, "", "x").submit(), None);
}

#[test]
fn test_submit_top_up_and_balance() {
    assert_eq!(
        typed(FormKind::TopUp, "", "20").submit(),
        Some(Submission::TopUp(dec!(20)))
    );
    assert_eq!(
        typed(FormKind::InitialBalance, "ignored", "100").submit(),
        Some(Submission::InitialBalance(dec!(100)))
    );
    assert!(typed(FormKind::TopUp, "", "20").first_invalid().is_none());
}
