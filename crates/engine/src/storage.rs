//! Key-value persistence for the engine state.
//!
//! The state is kept under two independent keys:
//!
//! - [`BALANCE_KEY`]: the balance as a plain decimal string (`"12.5"`).
//! - [`DREAMS_KEY`]: the dreams as a JSON array of
//!   `{ "id", "name", "amount", "saved" }`, newest first.
use std::{
    cell::RefCell,
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
    rc::Rc,
};

use crate::{Dream, EngineError, MoneyCents, ResultEngine};

pub const BALANCE_KEY: &str = "balance";
pub const DREAMS_KEY: &str = "myDreams";

/// A string key-value store.
pub trait KeyValueStore {
    fn load(&self, key: &str) -> ResultEngine<Option<String>>;
    fn save(&mut self, key: &str, value: &str) -> ResultEngine<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn load(&self, key: &str) -> ResultEngine<Option<String>> {
        (**self).load(key)
    }

    fn save(&mut self, key: &str, value: &str) -> ResultEngine<()> {
        (**self).save(key, value)
    }
}

/// In-memory store.
///
/// Clones share the same map, so a test can keep a handle and look at what the
/// engine wrote.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    values: Rc<RefCell<BTreeMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value of `key`, if any.
    pub fn get(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }
}

impl KeyValueStore for MemoryStore {
    fn load(&self, key: &str) -> ResultEngine<Option<String>> {
        Ok(self.get(key))
    }

    fn save(&mut self, key: &str, value: &str) -> ResultEngine<()> {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store backed by a single JSON object file.
///
/// The whole file is read once on open and rewritten on every save. A missing
/// file is an empty store; the file and its parent directories are created on
/// the first save.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl FileStore {
    pub fn open(path: impl AsRef<Path>) -> ResultEngine<Self> {
        let path = path.as_ref().to_path_buf();
        let values = match fs::read_to_string(&path) {
            Ok(content) if content.trim().is_empty() => BTreeMap::new(),
            Ok(content) => serde_json::from_str(&content)?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => return Err(err.into()),
        };
        tracing::debug!(path = %path.display(), keys = values.len(), "opened state file");
        Ok(Self { path, values })
    }
}

impl KeyValueStore for FileStore {
    fn load(&self, key: &str) -> ResultEngine<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: &str) -> ResultEngine<()> {
        self.values.insert(key.to_string(), value.to_string());
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let payload = serde_json::to_string_pretty(&self.values)?;
        fs::write(&self.path, payload)?;
        Ok(())
    }
}

pub(crate) fn encode_balance(balance: MoneyCents) -> String {
    balance.to_plain_string()
}

/// Stored balances may come from clients that kept floats, so any decimal is
/// accepted and rounded to the cent.
pub(crate) fn decode_balance(value: &str) -> ResultEngine<MoneyCents> {
    let parsed: f64 = value.trim().parse().map_err(|_| {
        EngineError::InvalidAmount(format!("stored balance \"{value}\" is not a number"))
    })?;
    MoneyCents::from_dollars_f64(parsed)
}

pub(crate) fn encode_dreams(dreams: &[Dream]) -> ResultEngine<String> {
    Ok(serde_json::to_string(dreams)?)
}

pub(crate) fn decode_dreams(value: &str) -> ResultEngine<Vec<Dream>> {
    Ok(serde_json::from_str(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DreamId;

    fn state_path() -> PathBuf {
        let root = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../target/test_states");
        root.join(format!("state_{}.json", uuid::Uuid::new_v4()))
    }

    #[test]
    fn memory_store_clones_share_values() {
        let store = MemoryStore::new();
        let mut handle = store.clone();
        handle.save("balance", "10").unwrap();
        assert_eq!(store.load("balance").unwrap(), Some("10".to_string()));
        assert_eq!(store.load("missing").unwrap(), None);
    }

    #[test]
    fn file_store_missing_file_is_empty() {
        let store = FileStore::open(state_path()).unwrap();
        assert_eq!(store.load(BALANCE_KEY).unwrap(), None);
    }

    #[test]
    fn file_store_persists_across_opens() {
        let path = state_path();
        let mut store = FileStore::open(&path).unwrap();
        store.save(BALANCE_KEY, "12.5").unwrap();
        store.save(DREAMS_KEY, "[]").unwrap();

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.load(BALANCE_KEY).unwrap(), Some("12.5".to_string()));
        assert_eq!(reopened.load(DREAMS_KEY).unwrap(), Some("[]".to_string()));

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn file_store_rejects_corrupt_file() {
        let path = state_path();
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "not json").unwrap();

        let err = FileStore::open(&path).unwrap_err();
        assert!(matches!(err, EngineError::Serialization(_)));

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn balance_decoding_accepts_float_noise() {
        assert_eq!(decode_balance("100").unwrap(), MoneyCents::dollars(100));
        assert_eq!(
            decode_balance("12.300000000000001").unwrap(),
            MoneyCents::new(1230)
        );
        assert!(decode_balance("lots").is_err());
    }

    #[test]
    fn dreams_use_stored_layout() {
        let dream = Dream {
            id: DreamId(1_700_000_000_000),
            name: "Bicycle".to_string(),
            amount: MoneyCents::dollars(500),
            saved: MoneyCents::new(1250),
        };
        let json = encode_dreams(std::slice::from_ref(&dream)).unwrap();
        assert_eq!(
            json,
            r#"[{"id":1700000000000,"name":"Bicycle","amount":500.0,"saved":12.5}]"#
        );

        let decoded =
            decode_dreams(r#"[{"id":3,"name":"Bicycle","amount":500,"saved":0}]"#).unwrap();
        assert_eq!(decoded[0].id, DreamId(3));
        assert_eq!(decoded[0].amount, MoneyCents::dollars(500));
    }
}
