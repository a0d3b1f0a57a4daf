mod ledger;
mod record;

pub use ledger::Ledger;
pub use record::{round_cents, Record, RecordKind, TOP_UP_DESCRIPTION};

#[cfg(test)]
mod tests;
