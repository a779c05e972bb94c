//! Hooks run after a transaction commits.

use crate::{
    Dream, KeyValueStore, MoneyCents,
    storage::{BALANCE_KEY, DREAMS_KEY, encode_balance, encode_dreams},
};

/// What a committed transaction left behind.
#[derive(Clone, Copy, Debug)]
pub struct Commit<'a> {
    pub balance: MoneyCents,
    pub dreams: &'a [Dream],
    pub balance_changed: bool,
    pub dreams_changed: bool,
}

/// Observer of committed transactions.
///
/// Called once per transaction that changed state, after the change is
/// visible. A hook cannot veto or fail the transaction.
pub trait CommitHook {
    fn on_commit(&mut self, commit: &Commit<'_>);
}

/// Writes the changed parts of the state to a [`KeyValueStore`].
///
/// Fire-and-forget: a failed write is logged and the operation still counts
/// as done.
#[derive(Debug)]
pub struct PersistOnCommit<S> {
    store: S,
}

impl<S: KeyValueStore> PersistOnCommit<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    fn write(&mut self, key: &str, value: &str) {
        if let Err(err) = self.store.save(key, value) {
            tracing::warn!(key, "failed to persist state: {err}");
        }
    }
}

impl<S: KeyValueStore> CommitHook for PersistOnCommit<S> {
    fn on_commit(&mut self, commit: &Commit<'_>) {
        if commit.balance_changed {
            self.write(BALANCE_KEY, &encode_balance(commit.balance));
        }
        if commit.dreams_changed {
            match encode_dreams(commit.dreams) {
                Ok(payload) => self.write(DREAMS_KEY, &payload),
                Err(err) => tracing::warn!("failed to encode dreams: {err}"),
            }
        }
    }
}
