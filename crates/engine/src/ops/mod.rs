use crate::{
    Balance, CommitHook, Dream, DreamId, Dreams, KeyValueStore, MoneyCents, PersistOnCommit,
    ResultEngine,
    error::EngineError,
    hooks::Commit,
    storage::{BALANCE_KEY, DREAMS_KEY, decode_balance, decode_dreams},
};

mod balance;
mod dreams;

pub use balance::Withdrawal;

#[derive(Clone, Debug, Default, PartialEq)]
struct State {
    balance: Balance,
    dreams: Dreams,
}

/// Owns the balance and the dreams.
///
/// Every mutation runs as one transaction: it either applies completely and
/// fires the commit hooks once, or it is rejected and nothing changes.
pub struct Engine {
    state: State,
    hooks: Vec<Box<dyn CommitHook>>,
    clock: fn() -> i64,
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("state", &self.state)
            .field("hooks", &self.hooks.len())
            .finish()
    }
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    /// The free balance.
    pub fn balance(&self) -> MoneyCents {
        self.state.balance.get()
    }

    /// All dreams, newest first.
    pub fn dreams(&self) -> &[Dream] {
        self.state.dreams.as_slice()
    }

    pub fn dream(&self, id: DreamId) -> Option<&Dream> {
        self.state.dreams.get(id)
    }

    /// Money set aside in dreams.
    pub fn total_saved(&self) -> MoneyCents {
        self.state.dreams.total_saved()
    }

    /// Run `op` against a staged copy of the state and swap it in on success.
    ///
    /// Hooks only fire when the staged state differs from the live one, so
    /// no-ops (unknown ids, zero transfers) are not committed.
    fn with_tx<T>(
        &mut self,
        name: &'static str,
        op: impl FnOnce(&mut State, i64) -> ResultEngine<T>,
    ) -> ResultEngine<T> {
        let mut staged = self.state.clone();
        let value = match op(&mut staged, (self.clock)()) {
            Ok(value) => value,
            Err(err) => {
                tracing::debug!(op = name, "rejected: {err}");
                return Err(err);
            }
        };

        let balance_changed = staged.balance != self.state.balance;
        let dreams_changed = staged.dreams != self.state.dreams;
        self.state = staged;

        if balance_changed || dreams_changed {
            tracing::debug!(
                op = name,
                balance = %self.state.balance.get(),
                dreams = self.state.dreams.len(),
                "committed"
            );
            let commit = Commit {
                balance: self.state.balance.get(),
                dreams: self.state.dreams.as_slice(),
                balance_changed,
                dreams_changed,
            };
            for hook in &mut self.hooks {
                hook.on_commit(&commit);
            }
        } else {
            tracing::debug!(op = name, "nothing to commit");
        }

        Ok(value)
    }
}

fn ensure_positive(amount: MoneyCents) -> ResultEngine<()> {
    if !amount.is_positive() {
        return Err(EngineError::InvalidAmount(
            "please enter a number bigger than zero".to_string(),
        ));
    }
    Ok(())
}

fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// The builder for `Engine`
pub struct EngineBuilder {
    store: Option<Box<dyn KeyValueStore>>,
    hooks: Vec<Box<dyn CommitHook>>,
    clock: fn() -> i64,
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self {
            store: None,
            hooks: Vec::new(),
            clock: now_millis,
        }
    }
}

impl EngineBuilder {
    /// Load the initial state from `store` and write every commit back to it.
    pub fn store<S: KeyValueStore + 'static>(mut self, store: S) -> EngineBuilder {
        self.store = Some(Box::new(store));
        self
    }

    /// Register an extra commit hook, run after persistence.
    pub fn hook<H: CommitHook + 'static>(mut self, hook: H) -> EngineBuilder {
        self.hooks.push(Box::new(hook));
        self
    }

    /// Source of "now" in Unix milliseconds, used for new dream ids.
    pub fn clock(mut self, clock: fn() -> i64) -> EngineBuilder {
        self.clock = clock;
        self
    }

    /// Construct `Engine`
    pub fn build(self) -> ResultEngine<Engine> {
        let mut state = State::default();
        let mut hooks: Vec<Box<dyn CommitHook>> = Vec::with_capacity(self.hooks.len() + 1);

        if let Some(store) = self.store {
            if let Some(raw) = store.load(BALANCE_KEY)? {
                let stored = decode_balance(&raw)?;
                if stored.is_negative() {
                    tracing::warn!(%stored, "stored balance was negative, reset to zero");
                }
                state.balance = Balance::new(stored.max(MoneyCents::ZERO))?;
            }
            if let Some(raw) = store.load(DREAMS_KEY)? {
                state.dreams = Dreams::from_stored(decode_dreams(&raw)?);
            }
            tracing::debug!(
                balance = %state.balance.get(),
                dreams = state.dreams.len(),
                "loaded state"
            );
            hooks.push(Box::new(PersistOnCommit::new(store)));
        }
        hooks.extend(self.hooks);

        Ok(Engine {
            state,
            hooks,
            clock: self.clock,
        })
    }
}
