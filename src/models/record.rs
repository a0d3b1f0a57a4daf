use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Description given to every cash top-up.
pub const TOP_UP_DESCRIPTION: &str = "Cash Top Up";

/// Round to whole cents, halves away from zero.
pub fn round_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    /// An expense, taken out of the balance.
    Debit,
    /// A top-up, added to the balance.
    Credit,
}

impl RecordKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Debit => "Debit",
            Self::Credit => "Credit",
        }
    }

    /// Classify a record stored before kinds were tracked explicitly.
    pub fn infer(description: &str) -> Self {
        if description == TOP_UP_DESCRIPTION {
            Self::Credit
        } else {
            Self::Debit
        }
    }
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "StoredRecord")]
pub struct Record {
    pub id: String,
    pub description: String,
    pub amount: Decimal,
    pub date: DateTime<Utc>,
    pub kind: RecordKind,
}

/// On-disk shape of a record. `kind` is optional so that lists written
/// before it existed still load.
#[derive(Deserialize)]
struct StoredRecord {
    id: String,
    description: String,
    amount: Decimal,
    date: DateTime<Utc>,
    #[serde(default)]
    kind: Option<RecordKind>,
}

impl From<StoredRecord> for Record {
    fn from(stored: StoredRecord) -> Self {
        let kind = stored
            .kind
            .unwrap_or_else(|| RecordKind::infer(&stored.description));
        Self {
            id: stored.id,
            description: stored.description,
            amount: stored.amount,
            date: stored.date,
            kind,
        }
    }
}

impl Record {
    pub fn expense(description: String, amount: Decimal) -> Self {
        Self::new(description, amount, RecordKind::Debit)
    }

    pub fn top_up(amount: Decimal) -> Self {
        Self::new(TOP_UP_DESCRIPTION.to_string(), amount, RecordKind::Credit)
    }

    fn new(description: String, amount: Decimal, kind: RecordKind) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            description,
            amount,
            date: Utc::now(),
            kind,
        }
    }

    pub fn is_credit(&self) -> bool {
        self.kind == RecordKind::Credit
    }

    /// The record's effect on the balance.
    pub fn signed_amount(&self) -> Decimal {
        match self.kind {
            RecordKind::Credit => self.amount,
            RecordKind::Debit => -self.amount,
        }
    }

    /// Amount as shown in the history: `+$20.00` or `-$3.50`.
    pub fn display_amount(&self) -> String {
        let sign = if self.is_credit() { "+" } else { "-" };
        format!("{sign}${:.2}", round_cents(self.amount))
    }

    /// Calendar date of creation in the given zone, e.g. `03/14/2024`.
    pub fn calendar_date<Tz: TimeZone>(&self, tz: &Tz) -> String
    where
        Tz::Offset: std::fmt::Display,
    {
        self.date.with_timezone(tz).format("%m/%d/%Y").to_string()
    }

    pub fn short_id(&self) -> &str {
        self.id.get(..8).unwrap_or(&self.id)
    }
}
