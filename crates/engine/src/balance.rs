//! The module contains `Balance`, the free money not allocated to any dream.

use crate::{EngineError, MoneyCents, ResultEngine};

/// The free balance.
///
/// Never negative. Two policies coexist for lowering it:
///
/// - [`adjust`](Balance::adjust) is forgiving: taking out more than there is
///   empties the balance.
/// - [`debit`](Balance::debit) is strict: it refuses instead, and is the only
///   way dream transfers draw money.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Balance(MoneyCents);

impl Balance {
    pub fn new(value: MoneyCents) -> ResultEngine<Self> {
        let mut balance = Self::default();
        balance.set(value)?;
        Ok(balance)
    }

    #[must_use]
    pub fn get(&self) -> MoneyCents {
        self.0
    }

    /// Replace the balance.
    pub fn set(&mut self, value: MoneyCents) -> ResultEngine<()> {
        if value.is_negative() {
            return Err(EngineError::InvalidAmount(format!(
                "balance cannot be negative, got {value}"
            )));
        }
        self.0 = value;
        Ok(())
    }

    /// The value [`adjust`](Balance::adjust) would leave, without applying it.
    pub fn preview(&self, delta: MoneyCents) -> ResultEngine<MoneyCents> {
        let next = self
            .0
            .checked_add(delta)
            .ok_or_else(|| EngineError::InvalidAmount("amount too large".to_string()))?;
        Ok(next.max(MoneyCents::ZERO))
    }

    /// Add `delta`, clamping at zero. Returns the change actually applied,
    /// which differs from `delta` only when the clamp kicked in.
    pub fn adjust(&mut self, delta: MoneyCents) -> ResultEngine<MoneyCents> {
        let next = self.preview(delta)?;
        let applied = next - self.0;
        self.0 = next;
        Ok(applied)
    }

    pub fn credit(&mut self, amount: MoneyCents) -> ResultEngine<()> {
        debug_assert!(!amount.is_negative());
        self.0 = self
            .0
            .checked_add(amount)
            .ok_or_else(|| EngineError::InvalidAmount("amount too large".to_string()))?;
        Ok(())
    }

    /// Subtract `amount` or fail with `InsufficientBalance`.
    pub fn debit(&mut self, amount: MoneyCents) -> ResultEngine<()> {
        self.ensure_covers(amount)?;
        self.0 -= amount;
        Ok(())
    }

    pub fn ensure_covers(&self, amount: MoneyCents) -> ResultEngine<()> {
        if amount > self.0 {
            return Err(EngineError::InsufficientBalance(format!(
                "{amount} requested but only {} available",
                self.0
            )));
        }
        Ok(())
    }
}
