use crate::{
    domain::{Transaction, TransactionDraft, TransactionId},
    errors::Result,
    storage::KeyValueStore,
};

pub const DEFAULT_STORAGE_KEY: &str = "transactions";

/// Owns the insertion-ordered transaction list and the slot it is mirrored to.
///
/// The bare mutators only transform the in-memory sequence. Handlers go through
/// [`LedgerStore::transact`] or [`LedgerStore::wipe`], which keep memory and
/// the slot identical even when a write fails.
pub struct LedgerStore {
    storage: Box<dyn KeyValueStore>,
    key: String,
    transactions: Vec<Transaction>,
    next_id: TransactionId,
}

impl LedgerStore {
    /// Reads the slot. A missing or unparsable slot yields an empty ledger;
    /// individual records are taken as-is.
    pub fn load(storage: Box<dyn KeyValueStore>, key: impl Into<String>) -> Result<Self> {
        let key = key.into();
        let transactions = match storage.get(&key)? {
            Some(raw) => match serde_json::from_str::<Option<Vec<Transaction>>>(&raw) {
                Ok(parsed) => parsed.unwrap_or_default(),
                Err(err) => {
                    tracing::warn!(%key, error = %err, "stored ledger unreadable; starting empty");
                    Vec::new()
                }
            },
            None => Vec::new(),
        };
        tracing::info!(%key, count = transactions.len(), "ledger loaded");

        let next_id = next_id_after(&transactions);
        Ok(Self {
            storage,
            key,
            transactions,
            next_id,
        })
    }

    /// Overwrites the slot with the full sequence.
    pub fn persist(&self) -> Result<()> {
        let json = serde_json::to_string(&self.transactions)?;
        self.storage.set(&self.key, &json)?;
        tracing::debug!(key = %self.key, count = self.transactions.len(), "ledger persisted");
        Ok(())
    }

    /// Drops the slot entirely.
    pub fn erase(&self) -> Result<()> {
        self.storage.remove(&self.key)
    }

    /// Applies `change` and persists the result. When the write fails the
    /// sequence and id counter are restored to what they were before.
    pub fn transact<R>(&mut self, change: impl FnOnce(&mut Self) -> R) -> Result<R> {
        let transactions = self.transactions.clone();
        let next_id = self.next_id;

        let outcome = change(self);
        if let Err(err) = self.persist() {
            tracing::warn!(key = %self.key, error = %err, "persist failed; change rolled back");
            self.transactions = transactions;
            self.next_id = next_id;
            return Err(err);
        }
        Ok(outcome)
    }

    /// Removes the slot, then empties memory. A failed removal changes nothing.
    pub fn wipe(&mut self) -> Result<()> {
        self.erase()?;
        self.clear();
        Ok(())
    }

    pub fn append(&mut self, draft: TransactionDraft) -> TransactionId {
        let id = self.next_id;
        self.next_id = id.next();
        self.transactions.push(draft.into_transaction(id));
        id
    }

    pub fn remove_by_id(&mut self, id: TransactionId) -> Option<Transaction> {
        let index = self.transactions.iter().position(|txn| txn.id == id)?;
        Some(self.transactions.remove(index))
    }

    pub fn clear(&mut self) {
        self.transactions.clear();
        self.next_id = TransactionId(1);
    }

    pub fn replace_all(&mut self, transactions: Vec<Transaction>) {
        self.next_id = next_id_after(&transactions);
        self.transactions = transactions;
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn get(&self, id: TransactionId) -> Option<&Transaction> {
        self.transactions.iter().find(|txn| txn.id == id)
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}

fn next_id_after(transactions: &[Transaction]) -> TransactionId {
    transactions
        .iter()
        .map(|txn| txn.id)
        .max()
        .unwrap_or_default()
        .next()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Category, TransactionKind};
    use crate::errors::LedgerError;
    use crate::storage::MemoryStore;

    fn draft(title: &str, amount: f64, kind: TransactionKind) -> TransactionDraft {
        TransactionDraft {
            title: title.into(),
            amount,
            kind,
            category: Category::Other,
            date: "1 Jan 2024".into(),
        }
    }

    fn empty_store() -> (LedgerStore, MemoryStore) {
        let backing = MemoryStore::new();
        let store = LedgerStore::load(Box::new(backing.clone()), DEFAULT_STORAGE_KEY).unwrap();
        (store, backing)
    }

    #[test]
    fn append_assigns_increasing_ids() {
        let (mut store, _) = empty_store();
        let first = store.append(draft("a", 1.0, TransactionKind::Income));
        let second = store.append(draft("b", 2.0, TransactionKind::Expense));
        assert_eq!(first, TransactionId(1));
        assert_eq!(second, TransactionId(2));
    }

    #[test]
    fn ids_are_not_reused_after_delete() {
        let (mut store, _) = empty_store();
        store.append(draft("a", 1.0, TransactionKind::Income));
        let second = store.append(draft("b", 2.0, TransactionKind::Income));
        store.remove_by_id(second).unwrap();
        let third = store.append(draft("c", 3.0, TransactionKind::Income));
        assert_eq!(third, TransactionId(3));
    }

    #[test]
    fn load_resumes_counter_after_highest_id() {
        let backing = MemoryStore::with_slot(
            DEFAULT_STORAGE_KEY,
            r#"[{"id":41,"title":"x","amount":1,"type":"income","category":"salary","date":"d"}]"#,
        );
        let mut store = LedgerStore::load(Box::new(backing), DEFAULT_STORAGE_KEY).unwrap();
        let id = store.append(draft("y", 1.0, TransactionKind::Expense));
        assert_eq!(id, TransactionId(42));
    }

    #[test]
    fn malformed_slot_loads_as_empty() {
        let backing = MemoryStore::with_slot(DEFAULT_STORAGE_KEY, "{not json");
        let store = LedgerStore::load(Box::new(backing), DEFAULT_STORAGE_KEY).unwrap();
        assert!(store.is_empty());

        let null_slot = MemoryStore::with_slot(DEFAULT_STORAGE_KEY, "null");
        let store = LedgerStore::load(Box::new(null_slot), DEFAULT_STORAGE_KEY).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn persist_mirrors_memory_exactly() {
        let (mut store, backing) = empty_store();
        store.append(draft("Salary", 5000.0, TransactionKind::Income));
        store.persist().unwrap();

        let raw = backing.get(DEFAULT_STORAGE_KEY).unwrap().unwrap();
        let mirrored: Vec<Transaction> = serde_json::from_str(&raw).unwrap();
        assert_eq!(mirrored.as_slice(), store.transactions());
    }

    #[test]
    fn remove_missing_id_leaves_sequence_untouched() {
        let (mut store, _) = empty_store();
        store.append(draft("a", 1.0, TransactionKind::Income));
        let before = store.transactions().to_vec();
        assert!(store.remove_by_id(TransactionId(99)).is_none());
        assert_eq!(store.transactions(), before.as_slice());
    }

    #[test]
    fn wipe_removes_slot() {
        let (mut store, backing) = empty_store();
        store.transact(|store| store.append(draft("a", 1.0, TransactionKind::Income))).unwrap();
        store.wipe().unwrap();
        assert!(!backing.contains(DEFAULT_STORAGE_KEY));
        assert!(store.is_empty());
    }

    /// Reads from a shared [`MemoryStore`] but refuses every write.
    struct ReadOnlyStore(MemoryStore);

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, key: &str) -> Result<Option<String>> {
            self.0.get(key)
        }

        fn set(&self, _key: &str, _value: &str) -> Result<()> {
            Err(LedgerError::Storage("read-only".into()))
        }

        fn remove(&self, _key: &str) -> Result<()> {
            Err(LedgerError::Storage("read-only".into()))
        }
    }

    #[test]
    fn failed_write_rolls_back_memory_and_counter() {
        let backing = MemoryStore::with_slot(
            DEFAULT_STORAGE_KEY,
            r#"[{"id":3,"title":"x","amount":1,"type":"income","category":"salary","date":"d"}]"#,
        );
        let mut store =
            LedgerStore::load(Box::new(ReadOnlyStore(backing.clone())), DEFAULT_STORAGE_KEY)
                .unwrap();
        let before = store.transactions().to_vec();

        let err = store
            .transact(|store| store.append(draft("y", 2.0, TransactionKind::Expense)))
            .unwrap_err();
        assert!(matches!(err, LedgerError::Storage(_)));
        assert_eq!(store.transactions(), before.as_slice());

        assert!(store.transact(|store| store.replace_all(Vec::new())).is_err());
        assert_eq!(store.transactions(), before.as_slice());

        assert!(store.wipe().is_err());
        assert_eq!(store.transactions(), before.as_slice());

        // counter did not advance past the rejected append
        let mut writable = LedgerStore::load(Box::new(backing), DEFAULT_STORAGE_KEY).unwrap();
        assert_eq!(writable.append(draft("z", 1.0, TransactionKind::Income)), TransactionId(4));
        assert_eq!(store.next_id, TransactionId(4));
    }
}
