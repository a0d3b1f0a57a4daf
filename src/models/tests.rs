#![allow(clippy::unwrap_used)]

use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;

fn make_record(id: &str, description: &str, amount: Decimal, kind: RecordKind) -> Record {
    Record {
        id: id.into(),
        description: description.into(),
        amount,
        date: Utc.with_ymd_and_hms(2024, 3, 14, 12, 0, 0).unwrap(),
        kind,
    }
}

fn assert_consistent(ledger: &Ledger, initial: Decimal) {
    assert_eq!(
        ledger.balance(),
        initial + ledger.credits_total() - ledger.debits_total()
    );
}

// ── Record ────────────────────────────────────────────────────

#[test]
fn test_expense_is_debit() {
    let r = Record::expense("Coffee".into(), dec!(3.50));
    assert_eq!(r.kind, RecordKind::Debit);
    assert!(!r.is_credit());
    assert_eq!(r.signed_amount(), dec!(-3.50));
    assert!(!r.id.is_empty());
}

#[test]
fn test_top_up_is_credit() {
    let r = Record::top_up(dec!(20));
    assert_eq!(r.kind, RecordKind::Credit);
    assert_eq!(r.description, TOP_UP_DESCRIPTION);
    assert_eq!(r.signed_amount(), dec!(20));
}

#[test]
fn test_new_records_get_distinct_ids() {
    let a = Record::expense("A".into(), dec!(1));
    let b = Record::expense("A".into(), dec!(1));
    assert_ne!(a.id, b.id);
}

#[test]
fn test_display_amount() {
    let debit = make_record("1", "Coffee", dec!(3.5), RecordKind::Debit);
    let credit = make_record("2", TOP_UP_DESCRIPTION, dec!(20), RecordKind::Credit);
    assert_eq!(debit.display_amount(), "-$3.50");
    assert_eq!(credit.display_amount(), "+$20.00");
}

#[test]
fn test_display_amount_rounds_to_cents() {
    let debit = make_record("1", "Snack", dec!(3.456), RecordKind::Debit);
    let credit = make_record("2", TOP_UP_DESCRIPTION, dec!(0.125), RecordKind::Credit);
    assert_eq!(debit.display_amount(), "-$3.46");
    assert_eq!(credit.display_amount(), "+$0.13");
}

#[test]
fn test_round_cents() {
    assert_eq!(round_cents(dec!(2.999)), dec!(3.00));
    assert_eq!(round_cents(dec!(1.005)), dec!(1.01));
    assert_eq!(round_cents(dec!(-1.005)), dec!(-1.01));
    assert_eq!(round_cents(dec!(0.124)), dec!(0.12));
}

#[test]
fn test_calendar_date_utc() {
    let r = make_record("1", "Coffee", dec!(3.5), RecordKind::Debit);
    assert_eq!(r.calendar_date(&Utc), "03/14/2024");
}

#[test]
fn test_short_id() {
    let r = make_record("0123456789abcdef", "x", dec!(1), RecordKind::Debit);
    assert_eq!(r.short_id(), "01234567");
    let legacy = make_record("17", "x", dec!(1), RecordKind::Debit);
    assert_eq!(legacy.short_id(), "17");
}

#[test]
fn test_kind_inferred_from_description() {
    assert_eq!(RecordKind::infer("Cash Top Up"), RecordKind::Credit);
    assert_eq!(RecordKind::infer("cash top up"), RecordKind::Debit);
    assert_eq!(RecordKind::infer("Lunch"), RecordKind::Debit);
}

#[test]
fn test_record_json_roundtrip_keeps_kind() {
    let r = make_record("abc", "Refund", dec!(5.25), RecordKind::Credit);
    let json = serde_json::to_string(&r).unwrap();
    assert!(json.contains("\"kind\":\"credit\""));
    let back: Record = serde_json::from_str(&json).unwrap();
    assert_eq!(back, r);
}

#[test]
fn test_record_without_kind_decodes_by_description() {
    let json = r#"[
        {"id":"1710417600000","description":"Cash Top Up","amount":20,"date":"2024-03-14T12:00:00.000Z"},
        {"id":"1710417500000","description":"Coffee","amount":3.5,"date":"2024-03-14T11:58:20.000Z"}
    ]"#;
    let records: Vec<Record> = serde_json::from_str(json).unwrap();
    assert_eq!(records[0].kind, RecordKind::Credit);
    assert_eq!(records[0].amount, dec!(20));
    assert_eq!(records[1].kind, RecordKind::Debit);
    assert_eq!(records[1].amount, dec!(3.5));
}

// ── Ledger ────────────────────────────────────────────────────

#[test]
fn test_new_ledger_is_empty() {
    let ledger = Ledger::new();
    assert!(ledger.is_empty());
    assert_eq!(ledger.balance(), Decimal::ZERO);
}

#[test]
fn test_scenario() {
    let mut ledger = Ledger::new();
    ledger.set_initial_balance(dec!(100));
    assert_eq!(ledger.balance(), dec!(100));

    let lunch_id = ledger.add_expense("Lunch", dec!(12.50)).unwrap().id.clone();
    assert_eq!(ledger.balance(), dec!(87.50));
    assert_eq!(ledger.len(), 1);

    ledger.top_up(dec!(20));
    assert_eq!(ledger.balance(), dec!(107.50));
    assert_eq!(ledger.len(), 2);
    assert_eq!(ledger.records()[0].description, "Cash Top Up");

    let removed = ledger.remove(&lunch_id).unwrap();
    assert_eq!(removed.description, "Lunch");
    assert_eq!(ledger.balance(), dec!(120.00));
    assert_eq!(ledger.len(), 1);
}

#[test]
fn test_newest_first() {
    let mut ledger = Ledger::new();
    ledger.add_expense("First", dec!(1));
    ledger.add_expense("Second", dec!(2));
    ledger.top_up(dec!(3));
    let names: Vec<&str> = ledger
        .records()
        .iter()
        .map(|r| r.description.as_str())
        .collect();
    assert_eq!(names, ["Cash Top Up", "Second", "First"]);
}

#[test]
fn test_blank_description_rejected() {
    let mut ledger = Ledger::new();
    assert!(ledger.add_expense("", dec!(5)).is_none());
    assert!(ledger.add_expense("   ", dec!(5)).is_none());
    assert!(ledger.is_empty());
    assert_eq!(ledger.balance(), Decimal::ZERO);
}

#[test]
fn test_description_trimmed() {
    let mut ledger = Ledger::new();
    let r = ledger.add_expense("  Bus fare ", dec!(2)).unwrap();
    assert_eq!(r.description, "Bus fare");
}

#[test]
fn test_zero_and_negative_expenses_accepted() {
    let mut ledger = Ledger::new();
    ledger.add_expense("Free sample", Decimal::ZERO).unwrap();
    ledger.add_expense("Refund", dec!(-4)).unwrap();
    assert_eq!(ledger.len(), 2);
    assert_eq!(ledger.balance(), dec!(4));
}

#[test]
fn test_invariant_holds_through_mixed_operations() {
    let initial = dec!(250.00);
    let mut ledger = Ledger::new();
    ledger.set_initial_balance(initial);
    assert_consistent(&ledger, initial);

    let groceries = ledger.add_expense("Groceries", dec!(64.37)).unwrap().id.clone();
    assert_consistent(&ledger, initial);
    let top = ledger.top_up(dec!(50)).id.clone();
    assert_consistent(&ledger, initial);
    ledger.add_expense("Coffee", dec!(3.50)).unwrap();
    assert_consistent(&ledger, initial);
    ledger.remove(&top).unwrap();
    assert_consistent(&ledger, initial);
    ledger.top_up(dec!(0.01));
    assert_consistent(&ledger, initial);
    ledger.remove(&groceries).unwrap();
    assert_consistent(&ledger, initial);

    assert_eq!(ledger.balance(), initial + ledger.net_change());
}

#[test]
fn test_remove_then_readd_restores_balance() {
    let mut ledger = Ledger::new();
    ledger.set_initial_balance(dec!(40));
    let id = ledger.add_expense("Taxi", dec!(15.75)).unwrap().id.clone();
    let before = ledger.balance();

    let removed = ledger.remove(&id).unwrap();
    ledger.add_expense(&removed.description, removed.amount).unwrap();
    assert_eq!(ledger.balance(), before);
}

#[test]
fn test_remove_top_up_subtracts() {
    let mut ledger = Ledger::new();
    let id = ledger.top_up(dec!(30)).id.clone();
    assert_eq!(ledger.balance(), dec!(30));
    ledger.remove(&id).unwrap();
    assert_eq!(ledger.balance(), Decimal::ZERO);
}

#[test]
fn test_remove_missing_id_is_noop() {
    let mut ledger = Ledger::new();
    ledger.set_initial_balance(dec!(10));
    ledger.add_expense("Snack", dec!(2)).unwrap();
    let before = ledger.clone();

    assert!(ledger.remove("does-not-exist").is_none());
    assert_eq!(ledger, before);
}

#[test]
fn test_set_initial_balance_ignores_records() {
    let mut ledger = Ledger::new();
    ledger.add_expense("Snack", dec!(2)).unwrap();
    ledger.set_initial_balance(dec!(100));
    assert_eq!(ledger.balance(), dec!(100));
    assert_eq!(ledger.len(), 1);
}

#[test]
fn test_totals() {
    let ledger = Ledger::from_parts(
        vec![
            make_record("a", "Coffee", dec!(3.50), RecordKind::Debit),
            make_record("b", TOP_UP_DESCRIPTION, dec!(20.00), RecordKind::Credit),
            make_record("c", "Lunch", dec!(12.25), RecordKind::Debit),
        ],
        dec!(4.25),
    );
    assert_eq!(ledger.credits_total(), dec!(20.00));
    assert_eq!(ledger.debits_total(), dec!(15.75));
    assert_eq!(ledger.net_change(), dec!(4.25));
    assert_eq!(ledger.balance(), dec!(4.25));
}

#[test]
fn test_matching_exact_and_prefix() {
    let ledger = Ledger::from_parts(
        vec![
            make_record("abc123", "One", dec!(1), RecordKind::Debit),
            make_record("abd456", "Two", dec!(1), RecordKind::Debit),
            make_record("ab", "Three", dec!(1), RecordKind::Debit),
        ],
        Decimal::ZERO,
    );
    // Exact id wins over prefix matches
    let exact = ledger.matching("ab");
    assert_eq!(exact.len(), 1);
    assert_eq!(exact[0].description, "Three");

    let unique = ledger.matching("abc");
    assert_eq!(unique.len(), 1);
    assert_eq!(unique[0].description, "One");

    assert_eq!(ledger.matching("a").len(), 3);
    assert!(ledger.matching("zzz").is_empty());
    assert!(ledger.matching("").is_empty());
}
