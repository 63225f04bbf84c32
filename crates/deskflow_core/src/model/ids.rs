//! Identifiers for board tasks, document blocks and workspace pages.
//!
//! # Responsibility
//! - Give each record family its own id type so a `TaskId` can never be
//!   passed where a `BlockId` is expected.
//! - Provide the process-local id generator port used by every engine.
//!
//! # Invariants
//! - Ids are immutable once assigned.
//! - Generated ids are unique within the lifetime of one generator; nothing
//!   is promised across processes or restarts.
//! - On the wire every id is a bare string, so hand-written seed ids such as
//!   `"1"` or `"b1"` round-trip unchanged.

use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt::{Display, Formatter};
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

const RANDOM_ID_LEN: usize = 9;
const BASE36_ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wraps an existing identifier.
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                self.0.as_str()
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

string_id!(
    /// Stable identifier of one board task.
    TaskId
);
string_id!(
    /// Stable identifier of one content block, unique within its page.
    BlockId
);
string_id!(
    /// Stable identifier of one workspace page.
    PageId
);

/// Source of fresh record identifiers.
///
/// Engines own a boxed generator so tests can swap in a deterministic one.
pub trait IdGenerator: Send + Sync {
    /// Returns an identifier never handed out before by this generator.
    fn next_id(&self) -> String;
}

/// Default generator: short lowercase base-36 tokens drawn from v4 UUIDs.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomIdGenerator;

impl IdGenerator for RandomIdGenerator {
    fn next_id(&self) -> String {
        let mut value = Uuid::new_v4().as_u128();
        let mut out = String::with_capacity(RANDOM_ID_LEN);
        for _ in 0..RANDOM_ID_LEN {
            out.push(BASE36_ALPHABET[(value % 36) as usize] as char);
            value /= 36;
        }
        out
    }
}

/// Deterministic generator producing `<prefix>-1`, `<prefix>-2`, ...
#[derive(Debug)]
pub struct SequentialIdGenerator {
    prefix: String,
    counter: AtomicU64,
}

impl SequentialIdGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            counter: AtomicU64::new(0),
        }
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&self) -> String {
        let next = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        format!("{}-{next}", self.prefix)
    }
}

/// Keeps the first record per id, preserving order.
///
/// Later records carrying an already seen id are dropped and logged under
/// `module`.
pub(crate) fn retain_first_by_id<T, K>(
    records: Vec<T>,
    module: &str,
    id_of: impl Fn(&T) -> &K,
) -> Vec<T>
where
    K: Eq + Hash + Clone + Display,
{
    let mut seen = HashSet::with_capacity(records.len());
    records
        .into_iter()
        .filter(|record| {
            let id = id_of(record);
            if seen.insert(id.clone()) {
                return true;
            }
            debug!("event=records_load module={module} status=skipped reason=duplicate_id id={id}");
            false
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{
        retain_first_by_id, BlockId, IdGenerator, RandomIdGenerator, SequentialIdGenerator, TaskId,
    };
    use std::collections::HashSet;

    #[test]
    fn random_ids_are_short_base36_and_distinct() {
        let generator = RandomIdGenerator;
        let ids = (0..500).map(|_| generator.next_id()).collect::<HashSet<_>>();
        assert_eq!(ids.len(), 500);
        assert!(ids.iter().all(|id| id.len() == 9
            && id
                .chars()
                .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase())));
    }

    #[test]
    fn sequential_ids_count_up_from_one() {
        let generator = SequentialIdGenerator::new("b");
        assert_eq!(generator.next_id(), "b-1");
        assert_eq!(generator.next_id(), "b-2");
    }

    #[test]
    fn ids_serialize_as_bare_strings() {
        let json = serde_json::to_string(&TaskId::new("1")).unwrap();
        assert_eq!(json, "\"1\"");
        let decoded: BlockId = serde_json::from_str("\"b1\"").unwrap();
        assert_eq!(decoded.as_str(), "b1");
    }

    #[test]
    fn retain_first_by_id_drops_later_duplicates() {
        let records = vec![
            (TaskId::new("1"), "first"),
            (TaskId::new("2"), "second"),
            (TaskId::new("1"), "shadow"),
        ];
        let kept = retain_first_by_id(records, "test", |(id, _)| id);
        assert_eq!(
            kept,
            vec![(TaskId::new("1"), "first"), (TaskId::new("2"), "second")]
        );
    }
}
