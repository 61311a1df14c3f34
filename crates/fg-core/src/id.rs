use lasso::{Spur, ThreadedRodeo};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::LazyLock;

/// Global string interner for node and edge IDs.
static INTERNER: LazyLock<ThreadedRodeo> = LazyLock::new(ThreadedRodeo::default);

/// A lightweight, interned identifier for diagram nodes and edges.
/// Internally a 4-byte `Spur` index with O(1) equality and hashing.
///
/// On the wire an id is a plain JSON string, so files written by the
/// browser canvas load unchanged.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(Spur);

impl NodeId {
    /// Intern a string as a NodeId, or return the existing one.
    pub fn intern(s: &str) -> Self {
        NodeId(INTERNER.get_or_intern(s))
    }

    /// Resolve back to a string slice.
    pub fn as_str(&self) -> &str {
        INTERNER.resolve(&self.0)
    }

    /// A time-based id: the millisecond timestamp rendered in decimal.
    pub fn from_millis(millis: u64) -> Self {
        Self::intern(&millis.to_string())
    }
}

/// Hands out strictly increasing time-based ids.
///
/// Two drops inside the same millisecond would otherwise share an id, so
/// the allocator never issues a value lower than `last + 1`.
#[derive(Debug, Clone, Default)]
pub struct IdAllocator {
    last: u64,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next id for the given wall-clock time. `taken` reports ids already in
    /// use (e.g. from an imported file); those are skipped.
    pub fn next(&mut self, now_ms: u64, taken: impl Fn(NodeId) -> bool) -> NodeId {
        let mut candidate = now_ms.max(self.last.saturating_add(1));
        loop {
            let id = NodeId::from_millis(candidate);
            if !taken(id) {
                self.last = candidate;
                return id;
            }
            candidate += 1;
        }
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.as_str())
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for NodeId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for NodeId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(NodeId::intern(&s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interning_roundtrip() {
        let a = NodeId::intern("login_step");
        let b = NodeId::intern("login_step");
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "login_step");
    }

    #[test]
    fn allocator_is_monotonic_within_one_millisecond() {
        let mut ids = IdAllocator::new();
        let a = ids.next(1_700_000_000_000, |_| false);
        let b = ids.next(1_700_000_000_000, |_| false);
        assert_eq!(a.as_str(), "1700000000000");
        assert_eq!(b.as_str(), "1700000000001");
    }

    #[test]
    fn allocator_skips_taken_ids() {
        let mut ids = IdAllocator::new();
        let taken = NodeId::intern("42");
        let id = ids.next(42, |id| id == taken);
        assert_eq!(id.as_str(), "43");
    }

    #[test]
    fn display_is_bare_string() {
        assert_eq!(NodeId::intern("7").to_string(), "7");
    }
}
