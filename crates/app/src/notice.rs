//! User facing messages for operation outcomes.
use std::fmt;

use engine::{EngineError, MoneyCents};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Kind {
    Success,
    Info,
    Error,
}

/// A message for the user: a short title and a longer description.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub kind: Kind,
    pub title: String,
    pub description: String,
}

impl Notice {
    pub fn success(title: &str, description: impl Into<String>) -> Self {
        Self {
            kind: Kind::Success,
            title: title.to_string(),
            description: description.into(),
        }
    }

    pub fn info(title: &str, description: impl Into<String>) -> Self {
        Self {
            kind: Kind::Info,
            title: title.to_string(),
            description: description.into(),
        }
    }

    pub fn error(title: &str, description: impl Into<String>) -> Self {
        Self {
            kind: Kind::Error,
            title: title.to_string(),
            description: description.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == Kind::Error
    }

    /// The notice for an operation the engine refused.
    pub fn rejected(err: &EngineError) -> Self {
        let title = match err {
            EngineError::InvalidAmount(_) | EngineError::InvalidName(_) => {
                "Oops! That's not right 🤔"
            }
            EngineError::InsufficientBalance(_) => "Oh no! Not enough money 💰",
            EngineError::InvalidEdit(_) => "Oops! That doesn't work 🤔",
            EngineError::DreamIncomplete(_) => "Not there yet ⏳",
            EngineError::Io(_) | EngineError::Serialization(_) => "Something went wrong 😵",
        };
        Self::error(title, err.to_string())
    }

    pub fn dream_not_found(id: impl fmt::Display) -> Self {
        Self::error("No such dream 🔍", format!("There is no dream with id {id}."))
    }

    pub fn deposited(amount: MoneyCents) -> Self {
        Self::success(
            "Yay! Money Added! 💰",
            format!("{amount} has been added to your piggy bank!"),
        )
    }

    pub fn withdrew(amount: MoneyCents) -> Self {
        Self::success(
            "Money Taken Out 🎈",
            format!("{amount} has been taken from your piggy bank!"),
        )
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n{}", self.title, self.description)
    }
}
