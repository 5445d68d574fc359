//! Formula identity and dedup cache
//!
//! Maps formula text to its assigned synthetic function name. Identity is
//! exact text equality: two textually different but algebraically equivalent
//! formulas get distinct names. The mapping is append-only for the lifetime
//! of the registry; a name is never renamed or reused for different text.

use std::collections::HashMap;
use std::sync::RwLock;

/// Identity store mapping formula text to a `Formula_<N>` name.
///
/// Callers hold an explicit handle rather than going through ambient
/// globals, so tests can run independent registries side by side. Duplicate
/// checks take the shared lock; minting takes the exclusive lock and
/// re-checks the map first, so two callers racing on the same new text
/// observe a single name between them.
#[derive(Debug, Default)]
pub struct FormulaRegistry {
    inner: RwLock<RegistryInner>,
}

#[derive(Debug, Default)]
struct RegistryInner {
    names: HashMap<String, String>,
    next_id: u64,
}

impl FormulaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the name for `formula`, minting `Formula_<N>` on first
    /// sighting. The flag is true when the text was already registered.
    pub fn assign_name(&self, formula: &str) -> (String, bool) {
        {
            let inner = self.inner.read().expect("registry lock poisoned");
            if let Some(name) = inner.names.get(formula) {
                return (name.clone(), true);
            }
        }

        let mut inner = self.inner.write().expect("registry lock poisoned");
        // Another caller may have minted between the read above and here.
        if let Some(name) = inner.names.get(formula) {
            return (name.clone(), true);
        }
        inner.next_id += 1;
        let name = format!("Formula_{}", inner.next_id);
        inner.names.insert(formula.to_string(), name.clone());
        (name, false)
    }

    /// Name previously assigned to `formula`, if any.
    pub fn lookup(&self, formula: &str) -> Option<String> {
        let inner = self.inner.read().expect("registry lock poisoned");
        inner.names.get(formula).cloned()
    }

    /// Number of distinct formulas named so far.
    pub fn len(&self) -> usize {
        let inner = self.inner.read().expect("registry lock poisoned");
        inner.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
