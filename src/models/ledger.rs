use rust_decimal::Decimal;

use super::record::{Record, RecordKind};

/// Records (newest first) plus the running balance.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ledger {
    records: Vec<Record>,
    balance: Decimal,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a ledger from persisted parts. The balance is taken as-is and
    /// is not recomputed from the records.
    pub fn from_parts(records: Vec<Record>, balance: Decimal) -> Self {
        Self { records, balance }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Log an expense. Returns `None` (and changes nothing) when the
    /// description is blank. Zero and negative amounts are accepted.
    pub fn add_expense(&mut self, description: &str, amount: Decimal) -> Option<&Record> {
        let description = description.trim();
        if description.is_empty() {
            return None;
        }
        Some(self.prepend(Record::expense(description.to_string(), amount)))
    }

    pub fn top_up(&mut self, amount: Decimal) -> &Record {
        self.prepend(Record::top_up(amount))
    }

    /// Overwrites the balance. Existing records are left alone.
    pub fn set_initial_balance(&mut self, amount: Decimal) {
        self.balance = amount;
    }

    /// Remove a record and undo its effect on the balance.
    pub fn remove(&mut self, id: &str) -> Option<Record> {
        let pos = self.records.iter().position(|r| r.id == id)?;
        let record = self.records.remove(pos);
        self.balance -= record.signed_amount();
        Some(record)
    }

    pub fn find(&self, id: &str) -> Option<&Record> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Records whose id is `query`, or failing that, starts with it.
    pub fn matching(&self, query: &str) -> Vec<&Record> {
        if let Some(exact) = self.find(query) {
            return vec![exact];
        }
        if query.is_empty() {
            return Vec::new();
        }
        self.records
            .iter()
            .filter(|r| r.id.starts_with(query))
            .collect()
    }

    pub fn credits_total(&self) -> Decimal {
        self.total_of(RecordKind::Credit)
    }

    pub fn debits_total(&self) -> Decimal {
        self.total_of(RecordKind::Debit)
    }

    /// Credits minus debits across every record.
    pub fn net_change(&self) -> Decimal {
        self.records.iter().map(Record::signed_amount).sum()
    }

    fn total_of(&self, kind: RecordKind) -> Decimal {
        self.records
            .iter()
            .filter(|r| r.kind == kind)
            .map(|r| r.amount)
            .sum()
    }

    fn prepend(&mut self, record: Record) -> &Record {
        self.balance += record.signed_amount();
        self.records.insert(0, record);
        &self.records[0]
    }
}
