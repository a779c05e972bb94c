//! The module contains the representation of a dream, a savings goal, and
//! the ordered collection that holds them.
//!
//! A dream is a bounded pot of money: `saved` can grow up to `amount` and
//! never beyond. Unlike a wallet a dream never receives money from outside,
//! every cent in `saved` was moved there from the free balance.
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{EngineError, MoneyCents, ResultEngine};

/// Stable identifier of a dream.
///
/// Assigned once at creation from the creation time in milliseconds, so it
/// doubles as a creation timestamp.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DreamId(pub i64);

impl fmt::Display for DreamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl std::str::FromStr for DreamId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(DreamId)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DreamStatus {
    /// Still collecting money.
    Active,
    /// Fully funded, ready to be achieved.
    Complete,
}

/// Name given to a stored dream whose name is blank.
pub const UNNAMED_DREAM: &str = "Unnamed dream";

/// A savings goal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dream {
    pub id: DreamId,
    pub name: String,
    /// Target cost.
    pub amount: MoneyCents,
    /// Money already set aside, `0 <= saved <= amount`.
    pub saved: MoneyCents,
}

impl Dream {
    pub fn new(id: DreamId, name: &str, amount: MoneyCents) -> ResultEngine<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(EngineError::InvalidName(
                "dream name must not be empty".to_string(),
            ));
        }
        if amount.is_negative() {
            return Err(EngineError::InvalidAmount(format!(
                "dream cost cannot be negative, got {amount}"
            )));
        }
        Ok(Self {
            id,
            name: name.to_string(),
            amount,
            saved: MoneyCents::ZERO,
        })
    }

    /// How much is still missing.
    #[must_use]
    pub fn remaining(&self) -> MoneyCents {
        self.amount - self.saved
    }

    #[must_use]
    pub fn status(&self) -> DreamStatus {
        if self.saved == self.amount {
            DreamStatus::Complete
        } else {
            DreamStatus::Active
        }
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.status() == DreamStatus::Complete
    }

    /// Funded share in percent, capped at 100. A free dream counts as done.
    #[must_use]
    pub fn progress_percent(&self) -> f64 {
        if self.amount.is_zero() {
            return 100.0;
        }
        (self.saved.cents() as f64 / self.amount.cents() as f64 * 100.0).min(100.0)
    }

    /// Add up to `requested` to `saved`, stopping at `amount`. Returns what was
    /// actually added.
    pub(crate) fn fill(&mut self, requested: MoneyCents) -> MoneyCents {
        let added = requested.min(self.remaining()).max(MoneyCents::ZERO);
        self.saved += added;
        added
    }

    /// Replace cost and saved together.
    pub(crate) fn reshape(&mut self, amount: MoneyCents, saved: MoneyCents) -> ResultEngine<()> {
        if amount.is_negative() || saved.is_negative() {
            return Err(EngineError::InvalidAmount(
                "cost and saved amount cannot be negative".to_string(),
            ));
        }
        if amount < saved {
            return Err(EngineError::InvalidEdit(format!(
                "cost {amount} cannot be less than saved {saved}"
            )));
        }
        self.amount = amount;
        self.saved = saved;
        Ok(())
    }

    /// Bring a dream loaded from storage back within its invariants. Returns
    /// `true` if anything had to change.
    ///
    /// A blank name is replaced rather than dropping the dream, so its
    /// savings are kept.
    pub(crate) fn repair(&mut self) -> bool {
        let before = (self.amount, self.saved);
        self.amount = self.amount.max(MoneyCents::ZERO);
        self.saved = self.saved.clamp(MoneyCents::ZERO, self.amount);

        let trimmed = self.name.trim();
        let name = if trimmed.is_empty() {
            UNNAMED_DREAM
        } else {
            trimmed
        };
        let renamed = name != self.name;
        if renamed {
            self.name = name.to_string();
        }

        renamed || before != (self.amount, self.saved)
    }
}

/// The dreams, newest first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Dreams {
    items: Vec<Dream>,
}

impl Dreams {
    pub fn iter(&self) -> impl Iterator<Item = &Dream> {
        self.items.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Dream] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: DreamId) -> Option<&Dream> {
        self.items.iter().find(|dream| dream.id == id)
    }

    pub(crate) fn get_mut(&mut self, id: DreamId) -> Option<&mut Dream> {
        self.items.iter_mut().find(|dream| dream.id == id)
    }

    /// Total money set aside across all dreams, saturating at the largest
    /// representable amount.
    #[must_use]
    pub fn total_saved(&self) -> MoneyCents {
        self.items
            .iter()
            .fold(MoneyCents::ZERO, |total, dream| total.saturating_add(dream.saved))
    }

    /// An id not used by any dream, based on `now_millis`.
    ///
    /// Normally `now_millis`, bumped past the largest id in use. If the largest
    /// id is `i64::MAX` the smallest free non-negative id is used instead.
    #[must_use]
    pub fn next_id(&self, now_millis: i64) -> DreamId {
        let Some(last) = self.items.iter().map(|dream| dream.id.0).max() else {
            return DreamId(now_millis);
        };
        match last.checked_add(1) {
            Some(after_last) => DreamId(now_millis.max(after_last)),
            None => self.smallest_free_id(),
        }
    }

    fn smallest_free_id(&self) -> DreamId {
        let mut taken: Vec<i64> = self.items.iter().map(|dream| dream.id.0).collect();
        taken.sort_unstable();
        let mut candidate = 0;
        for id in taken {
            if id == candidate {
                candidate += 1;
            } else if id > candidate {
                break;
            }
        }
        DreamId(candidate)
    }

    /// Callers pick the id with [`next_id`](Dreams::next_id).
    pub(crate) fn push_front(&mut self, dream: Dream) {
        debug_assert!(self.get(dream.id).is_none());
        self.items.insert(0, dream);
    }

    pub(crate) fn remove(&mut self, id: DreamId) -> Option<Dream> {
        let index = self.items.iter().position(|dream| dream.id == id)?;
        Some(self.items.remove(index))
    }

    pub(crate) fn clear(&mut self) -> Vec<Dream> {
        std::mem::take(&mut self.items)
    }

    /// Build the collection from stored dreams, repairing what breaks the
    /// invariants. Duplicate ids keep the first occurrence.
    pub(crate) fn from_stored(stored: Vec<Dream>) -> Self {
        let mut dreams = Self::default();
        for mut dream in stored {
            if dreams.get(dream.id).is_some() {
                tracing::warn!(id = %dream.id, "dropping stored dream with duplicate id");
                continue;
            }
            if dream.repair() {
                tracing::warn!(id = %dream.id, "stored dream was invalid, repaired");
            }
            dreams.items.push(dream);
        }
        dreams
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dream(amount: i64, saved: i64) -> Dream {
        let mut dream = Dream::new(DreamId(1), "Bicycle", MoneyCents::dollars(amount)).unwrap();
        dream.saved = MoneyCents::dollars(saved);
        dream
    }

    #[test]
    fn new_dream_starts_empty() {
        let dream = Dream::new(DreamId(7), "  Camera ", MoneyCents::dollars(600)).unwrap();
        assert_eq!(dream.name, "Camera");
        assert_eq!(dream.saved, MoneyCents::ZERO);
        assert_eq!(dream.status(), DreamStatus::Active);
    }

    #[test]
    #[should_panic(expected = "InvalidName(\"dream name must not be empty\")")]
    fn fail_blank_name() {
        Dream::new(DreamId(1), "   ", MoneyCents::dollars(10)).unwrap();
    }

    #[test]
    #[should_panic(expected = "InvalidAmount")]
    fn fail_negative_cost() {
        Dream::new(DreamId(1), "Phone", MoneyCents::new(-1)).unwrap();
    }

    #[test]
    fn fill_is_capped_by_cost() {
        let mut dream = dream(50, 40);
        let added = dream.fill(MoneyCents::dollars(20));
        assert_eq!(added, MoneyCents::dollars(10));
        assert_eq!(dream.saved, MoneyCents::dollars(50));
        assert!(dream.is_complete());
        assert_eq!(dream.fill(MoneyCents::dollars(5)), MoneyCents::ZERO);
    }

    #[test]
    fn reshape_rejects_saved_above_cost() {
        let mut dream = dream(50, 10);
        let err = dream
            .reshape(MoneyCents::dollars(20), MoneyCents::dollars(30))
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidEdit(_)));
        assert_eq!(dream.amount, MoneyCents::dollars(50));
        assert_eq!(dream.saved, MoneyCents::dollars(10));
    }

    #[test]
    fn raising_cost_reactivates() {
        let mut dream = dream(50, 50);
        assert!(dream.is_complete());
        dream
            .reshape(MoneyCents::dollars(80), MoneyCents::dollars(50))
            .unwrap();
        assert_eq!(dream.status(), DreamStatus::Active);
        assert_eq!(dream.remaining(), MoneyCents::dollars(30));
    }

    #[test]
    fn progress() {
        assert_eq!(dream(200, 50).progress_percent(), 25.0);
        assert_eq!(dream(0, 0).progress_percent(), 100.0);
    }

    #[test]
    fn next_id_skips_taken_ids() {
        let mut dreams = Dreams::default();
        assert_eq!(dreams.next_id(1_000), DreamId(1_000));
        dreams.push_front(Dream::new(DreamId(1_000), "A", MoneyCents::ZERO).unwrap());
        assert_eq!(dreams.next_id(1_000), DreamId(1_001));
        assert_eq!(dreams.next_id(5_000), DreamId(5_000));
    }

    #[test]
    fn next_id_reuses_a_gap_when_ids_run_out() {
        let mut dreams = Dreams::default();
        for id in [i64::MAX, 0, 1, 3] {
            dreams.push_front(Dream::new(DreamId(id), "Taken", MoneyCents::ZERO).unwrap());
        }
        assert_eq!(dreams.next_id(1_000), DreamId(2));
    }

    #[test]
    fn total_saved_saturates() {
        let mut dreams = Dreams::default();
        for id in [1, 2] {
            let mut dream = Dream::new(DreamId(id), "Big", MoneyCents::new(i64::MAX)).unwrap();
            dream.saved = MoneyCents::new(i64::MAX / 2 + 1);
            dreams.push_front(dream);
        }
        assert_eq!(dreams.total_saved(), MoneyCents::new(i64::MAX));
    }

    #[test]
    fn push_front_keeps_newest_first() {
        let mut dreams = Dreams::default();
        for (id, name) in [(1, "Old"), (2, "New")] {
            dreams.push_front(Dream::new(DreamId(id), name, MoneyCents::ZERO).unwrap());
        }
        let names: Vec<_> = dreams.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["New", "Old"]);
    }

    #[test]
    fn from_stored_repairs_and_dedups() {
        let mut over = dream(50, 0);
        over.saved = MoneyCents::dollars(70);
        let mut duplicate = dream(10, 0);
        duplicate.name = "Duplicate".to_string();

        let dreams = Dreams::from_stored(vec![over, duplicate]);

        assert_eq!(dreams.len(), 1);
        let kept = dreams.get(DreamId(1)).unwrap();
        assert_eq!(kept.name, "Bicycle");
        assert_eq!(kept.saved, MoneyCents::dollars(50));
    }

    #[test]
    fn repair_names_blank_dreams() {
        let mut blank = dream(50, 10);
        blank.name = "   ".to_string();
        assert!(blank.repair());
        assert_eq!(blank.name, UNNAMED_DREAM);
        assert_eq!(blank.saved, MoneyCents::dollars(10));

        let mut padded = dream(50, 10);
        padded.name = " Bicycle ".to_string();
        assert!(padded.repair());
        assert_eq!(padded.name, "Bicycle");
        assert!(!padded.repair());
    }
}
