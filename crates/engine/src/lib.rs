//! Balance and savings goals ("dreams") for a child's piggy bank.
//!
//! The [`Engine`] owns a free [`Balance`] and an ordered list of [`Dream`]s and
//! moves money between them. After every operation:
//!
//! - the balance is never negative;
//! - every dream has `0 <= saved <= amount`;
//! - money only enters through [`Engine::deposit`] and leaves through
//!   [`Engine::withdraw`] (and [`Engine::set_balance`] or
//!   [`Engine::remove_all_dreams`], which forfeits savings).
//!
//! ```rust
//! use engine::{Engine, MemoryStore, MoneyCents};
//!
//! let mut engine = Engine::builder().store(MemoryStore::new()).build().unwrap();
//! engine.deposit(MoneyCents::dollars(100)).unwrap();
//! let bike = engine.add_dream("Bicycle", MoneyCents::dollars(50)).unwrap();
//! engine.allocate(bike, MoneyCents::dollars(30)).unwrap();
//!
//! assert_eq!(engine.balance(), MoneyCents::dollars(70));
//! assert_eq!(engine.dream(bike).unwrap().saved, MoneyCents::dollars(30));
//! ```

pub use balance::Balance;
pub use dreams::{Dream, DreamId, DreamStatus, Dreams, UNNAMED_DREAM};
pub use error::EngineError;
pub use hooks::{Commit, CommitHook, PersistOnCommit};
pub use money::MoneyCents;
pub use ops::{Engine, EngineBuilder, Withdrawal};
pub use storage::{BALANCE_KEY, DREAMS_KEY, FileStore, KeyValueStore, MemoryStore};

mod balance;
mod dreams;
mod error;
mod hooks;
mod money;
mod ops;
mod storage;

pub type ResultEngine<T> = Result<T, EngineError>;
