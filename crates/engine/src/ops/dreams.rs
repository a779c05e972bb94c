use crate::{Dream, DreamId, EngineError, MoneyCents, ResultEngine};

use super::{Engine, ensure_positive};

impl Engine {
    /// Create a dream with nothing saved yet and put it first. Returns its id.
    pub fn add_dream(&mut self, name: &str, amount: MoneyCents) -> ResultEngine<DreamId> {
        self.with_tx("add_dream", |state, now| {
            let id = state.dreams.next_id(now);
            let dream = Dream::new(id, name, amount)?;
            state.dreams.push_front(dream);
            Ok(id)
        })
    }

    /// Move up to `requested` from the balance into a dream.
    ///
    /// The balance must cover the whole `requested` amount, but only what the
    /// dream still needs is moved: asking for 20 toward a dream missing 10
    /// takes 10 from the balance. Returns the amount moved, `None` if there is
    /// no such dream.
    pub fn allocate(
        &mut self,
        id: DreamId,
        requested: MoneyCents,
    ) -> ResultEngine<Option<MoneyCents>> {
        ensure_positive(requested)?;
        self.with_tx("allocate", |state, _| {
            state.balance.ensure_covers(requested)?;
            let Some(dream) = state.dreams.get_mut(id) else {
                return Ok(None);
            };
            let moved = dream.fill(requested);
            state.balance.debit(moved)?;
            Ok(Some(moved))
        })
    }

    /// Move as much as possible into a dream: the smaller of the balance and
    /// what the dream still needs. Never fails for lack of money; moves
    /// nothing when either is zero.
    pub fn boost(&mut self, id: DreamId) -> ResultEngine<Option<MoneyCents>> {
        self.with_tx("boost", |state, _| {
            let available = state.balance.get();
            let Some(dream) = state.dreams.get_mut(id) else {
                return Ok(None);
            };
            let moved = dream.fill(available);
            state.balance.debit(moved)?;
            Ok(Some(moved))
        })
    }

    /// Replace a dream's cost and saved amount.
    ///
    /// Raising `saved` draws the difference from the balance, lowering it
    /// gives the difference back.
    pub fn edit_dream(
        &mut self,
        id: DreamId,
        amount: MoneyCents,
        saved: MoneyCents,
    ) -> ResultEngine<Option<Dream>> {
        self.with_tx("edit_dream", |state, _| {
            if amount.is_negative() || saved.is_negative() {
                return Err(EngineError::InvalidAmount(
                    "cost and saved amount cannot be negative".to_string(),
                ));
            }
            if amount < saved {
                return Err(EngineError::InvalidEdit(
                    "your dream cost can't be less than what you've saved".to_string(),
                ));
            }
            let Some(dream) = state.dreams.get_mut(id) else {
                return Ok(None);
            };

            let difference = saved - dream.saved;
            if difference.is_positive() {
                state.balance.debit(difference)?;
            } else {
                state.balance.credit(-difference)?;
            }
            dream.reshape(amount, saved)?;
            Ok(Some(dream.clone()))
        })
    }

    /// Remove a dream and give its savings back to the balance.
    pub fn delete_dream(&mut self, id: DreamId) -> ResultEngine<Option<Dream>> {
        self.with_tx("delete_dream", |state, _| {
            let Some(dream) = state.dreams.remove(id) else {
                return Ok(None);
            };
            state.balance.credit(dream.saved)?;
            Ok(Some(dream))
        })
    }

    /// Remove a fully funded dream. The savings are spent on it, so the balance
    /// does not change.
    pub fn achieve_dream(&mut self, id: DreamId) -> ResultEngine<Option<Dream>> {
        self.with_tx("achieve_dream", |state, _| {
            match state.dreams.get(id) {
                None => return Ok(None),
                Some(dream) if !dream.is_complete() => {
                    return Err(EngineError::DreamIncomplete(dream.name.clone()));
                }
                Some(_) => {}
            }
            Ok(state.dreams.remove(id))
        })
    }

    /// Remove every dream.
    ///
    /// Unlike [`delete_dream`](Engine::delete_dream), savings are **not**
    /// returned to the balance: they are forfeited. Returns the removed dreams.
    pub fn remove_all_dreams(&mut self) -> ResultEngine<Vec<Dream>> {
        self.with_tx("remove_all_dreams", |state, _| {
            let forfeited = state.dreams.total_saved();
            let removed = state.dreams.clear();
            if !removed.is_empty() {
                tracing::info!(dreams = removed.len(), %forfeited, "removed all dreams");
            }
            Ok(removed)
        })
    }

    /// The balance an edit setting `saved` on the dream would leave. The
    /// current balance if there is no such dream.
    pub fn projected_balance(
        &self,
        id: DreamId,
        saved: MoneyCents,
    ) -> ResultEngine<MoneyCents> {
        let Some(dream) = self.state.dreams.get(id) else {
            return Ok(self.balance());
        };
        self.balance()
            .checked_add(dream.saved)
            .and_then(|freed| freed.checked_sub(saved))
            .ok_or_else(|| EngineError::InvalidAmount("amount too large".to_string()))
    }
}
