use anyhow::Result;
use rust_decimal::Decimal;

use crate::models::{Ledger, Record};
use crate::store::{LedgerStore, Store};

/// The ledger together with the store it is mirrored to. Every mutation is
/// applied in memory and then flushed.
pub(crate) struct Tracker<S: LedgerStore = Store> {
    ledger: Ledger,
    store: S,
}

impl<S: LedgerStore> Tracker<S> {
    pub(crate) fn load(store: S) -> Result<Self> {
        let ledger = store.load()?;
        tracing::info!(
            records = ledger.len(),
            balance = %ledger.balance(),
            "ledger loaded"
        );
        Ok(Self { ledger, store })
    }

    pub(crate) fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Returns `None` when the description is blank.
    pub(crate) fn add_expense(
        &mut self,
        description: &str,
        amount: Decimal,
    ) -> Result<Option<Record>> {
        let Some(record) = self.ledger.add_expense(description, amount).cloned() else {
            return Ok(None);
        };
        tracing::info!(id = %record.id, description = %record.description, %amount, "expense added");
        self.persist()?;
        Ok(Some(record))
    }

    pub(crate) fn top_up(&mut self, amount: Decimal) -> Result<Record> {
        let record = self.ledger.top_up(amount).clone();
        tracing::info!(id = %record.id, %amount, "cash topped up");
        self.persist()?;
        Ok(record)
    }

    pub(crate) fn set_initial_balance(&mut self, amount: Decimal) -> Result<()> {
        self.ledger.set_initial_balance(amount);
        tracing::info!(%amount, "initial balance set");
        self.persist()
    }

    /// Returns the removed record, or `None` if no record has that id.
    pub(crate) fn remove_record(&mut self, id: &str) -> Result<Option<Record>> {
        let Some(record) = self.ledger.remove(id) else {
            tracing::debug!(id, "no record to remove");
            return Ok(None);
        };
        tracing::info!(id, description = %record.description, "record removed");
        self.persist()?;
        Ok(Some(record))
    }

    fn persist(&mut self) -> Result<()> {
        self.store.save(&self.ledger)
    }

    #[cfg(test)]
    pub(crate) fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
#[path = "tracker_tests.rs"]
mod tests;
