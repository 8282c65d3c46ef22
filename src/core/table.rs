//! Insertion-ordered keyed table shared by the catalog and the ledger.
//!
//! Tables here hold at most a few hundred rows, so lookups are linear scans
//! over a `Vec`. Overwriting a key keeps its original position; removal
//! shifts later rows up, exactly like the printed listings the user indexes.

/// A table of `(key, value)` rows kept in insertion order with unique keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderedTable<V> {
    rows: Vec<(String, V)>,
}

impl<V> Default for OrderedTable<V> {
    fn default() -> Self {
        Self { rows: Vec::new() }
    }
}

impl<V> OrderedTable<V> {
    /// Creates an empty table.
    #[must_use]
    pub const fn new() -> Self {
        Self { rows: Vec::new() }
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.rows.iter().position(|(k, _)| k == key)
    }

    /// Whether a row exists under `key`.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    /// Returns the value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&V> {
        self.rows.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Returns a mutable reference to the value stored under `key`.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        self.rows.iter_mut().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Inserts or overwrites. Returns the previous value if the key existed.
    pub fn insert(&mut self, key: impl Into<String>, value: V) -> Option<V> {
        let key = key.into();
        match self.position(&key) {
            Some(idx) => Some(std::mem::replace(&mut self.rows[idx].1, value)),
            None => {
                self.rows.push((key, value));
                None
            }
        }
    }

    /// Removes the row under `key`, keeping the order of the remaining rows.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        self.position(key).map(|idx| self.rows.remove(idx).1)
    }

    /// Returns the value under `key`, inserting `V::default()` first if absent.
    pub fn get_or_insert_default(&mut self, key: &str) -> &mut V
    where
        V: Default,
    {
        let idx = self.position(key).unwrap_or_else(|| {
            self.rows.push((key.to_string(), V::default()));
            self.rows.len() - 1
        });
        &mut self.rows[idx].1
    }

    /// Iterates rows in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.rows.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>, V> FromIterator<(K, V)> for OrderedTable<V> {
    /// Later duplicates overwrite earlier values in place.
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (k, v) in iter {
            table.insert(k, v);
        }
        table
    }
}
