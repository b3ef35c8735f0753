use crate::ModifierKey;
use serde::{Deserialize, Serialize};
use std::fmt;

/// User-facing outcome of a modifier toggle.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notice {
    Combined {
        first: ModifierKey,
        second: ModifierKey,
        into: ModifierKey,
    },
    Rejected {
        key: ModifierKey,
        conflicts_with: ModifierKey,
    },
    Cleared {
        key: ModifierKey,
        by: ModifierKey,
    },
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Combined {
                first,
                second,
                into,
            } => write!(f, "{first} and {second} combined into {into}"),
            Self::Rejected {
                key,
                conflicts_with,
            } => write!(f, "{key} conflicts with active {conflicts_with}; kept {conflicts_with}"),
            Self::Cleared { key, by } => write!(f, "{key} removed by {by}"),
        }
    }
}

#[derive(Debug, Default)]
pub struct NoticeLog {
    queue: Vec<Notice>,
}

impl NoticeLog {
    pub fn push(&mut self, notice: Notice) {
        self.queue.push(notice);
    }

    pub fn extend(&mut self, notices: impl IntoIterator<Item = Notice>) {
        self.queue.extend(notices);
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn drain(&mut self) -> impl Iterator<Item = Notice> + '_ {
        self.queue.drain(..)
    }
}
