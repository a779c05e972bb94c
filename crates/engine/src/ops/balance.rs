use crate::{MoneyCents, ResultEngine};

use super::{Engine, ensure_positive};

/// Outcome of [`Engine::withdraw`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Withdrawal {
    pub requested: MoneyCents,
    /// Less than `requested` when the balance could not cover it.
    pub withdrawn: MoneyCents,
    pub balance: MoneyCents,
}

impl Engine {
    /// Add money to the balance. Returns the new balance.
    pub fn deposit(&mut self, amount: MoneyCents) -> ResultEngine<MoneyCents> {
        ensure_positive(amount)?;
        self.with_tx("deposit", |state, _| {
            state.balance.adjust(amount)?;
            Ok(state.balance.get())
        })
    }

    /// Take money out of the balance.
    ///
    /// Taking out more than there is empties the balance instead of failing.
    pub fn withdraw(&mut self, amount: MoneyCents) -> ResultEngine<Withdrawal> {
        ensure_positive(amount)?;
        self.with_tx("withdraw", |state, _| {
            let applied = state.balance.adjust(-amount)?;
            Ok(Withdrawal {
                requested: amount,
                withdrawn: -applied,
                balance: state.balance.get(),
            })
        })
    }

    /// Overwrite the balance.
    pub fn set_balance(&mut self, value: MoneyCents) -> ResultEngine<()> {
        self.with_tx("set_balance", |state, _| state.balance.set(value))
    }

    /// The balance a deposit (positive `delta`) or withdrawal (negative
    /// `delta`) would leave.
    pub fn preview_balance(&self, delta: MoneyCents) -> ResultEngine<MoneyCents> {
        self.state.balance.preview(delta)
    }
}
