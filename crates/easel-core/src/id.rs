use crate::error::EditorError;
use lasso::{Spur, ThreadedRodeo};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Cow;
use std::fmt;
use std::sync::LazyLock;
use std::sync::atomic::{AtomicU64, Ordering};

static INTERNER: LazyLock<ThreadedRodeo> = LazyLock::new(ThreadedRodeo::default);

/// Suffix counter shared by every element kind, so ids never repeat within a
/// session even across kinds.
static NEXT_SUFFIX: AtomicU64 = AtomicU64::new(0);

/// Handle of a placed canvas element, e.g. `circle_3`.
///
/// The host page only ever sees the string form; inside the editor the id is
/// a `Spur` into a process-wide interner, so copies and map lookups stay
/// cheap.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(Spur);

impl ElementId {
    pub fn intern(s: &str) -> Self {
        Self(INTERNER.get_or_intern(s))
    }

    /// Existing id for `s`, without interning it.
    pub fn lookup(s: &str) -> Option<Self> {
        INTERNER.get(s).map(Self)
    }

    /// An id handed back by the host. Strings the editor never minted are
    /// `UnknownElement`.
    pub fn parse(s: &str) -> Result<Self, EditorError> {
        Self::lookup(s).ok_or_else(|| EditorError::UnknownElement(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        INTERNER.resolve(&self.0)
    }

    /// Mint a fresh `<prefix>_<n>` id.
    pub fn with_prefix(prefix: &str) -> Self {
        let n = NEXT_SUFFIX.fetch_add(1, Ordering::Relaxed);
        Self::intern(&format!("{prefix}_{n}"))
    }
}

impl fmt::Debug for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.as_str())
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ElementId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ElementId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = Cow::<str>::deserialize(deserializer)?;
        Ok(Self::intern(&s))
    }
}
