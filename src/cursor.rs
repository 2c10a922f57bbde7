use crate::error::ViewError;

/// Integer position in a tile's local frame (`0 ≤ x < w`, `0 ≤ y < h`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CursorPos {
    pub x: u32,
    pub y: u32,
}

impl CursorPos {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// A confirmed, labelled annotation. Immutable once issued.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cursor {
    id: String,
    pos: CursorPos,
}

impl Cursor {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn pos(&self) -> CursorPos {
        self.pos
    }
}

/// Bounded stack of unused identifiers; names are issued from the end.
#[derive(Clone, Debug)]
pub struct IdentifierPool {
    remaining: Vec<String>,
}

impl IdentifierPool {
    /// `A`..=`Z` stacked so that `Z` is issued first, then `Y`, ...
    pub fn alphabet() -> Self {
        Self { remaining: ('A'..='Z').map(|c| c.to_string()).collect() }
    }

    /// `names` in the order they should be issued.
    pub fn from_issue_order<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut remaining: Vec<String> = names.into_iter().map(Into::into).collect();
        remaining.reverse();
        Self { remaining }
    }

    pub fn pop(&mut self) -> Result<String, ViewError> {
        self.remaining.pop().ok_or(ViewError::PoolExhausted)
    }

    pub fn len(&self) -> usize {
        self.remaining.len()
    }

    pub fn is_empty(&self) -> bool {
        self.remaining.is_empty()
    }
}

impl Default for IdentifierPool {
    fn default() -> Self {
        Self::alphabet()
    }
}

/// Owns the confirmed cursors (in confirmation order), the unused
/// identifiers and the single hover preview.
#[derive(Clone, Debug, Default)]
pub struct CursorRegistry {
    pool: IdentifierPool,
    confirmed: Vec<Cursor>,
    preview: Option<CursorPos>,
}

impl CursorRegistry {
    pub fn new(pool: IdentifierPool) -> Self {
        Self { pool, confirmed: Vec::new(), preview: None }
    }

    /// Issue the next identifier for `pos`. On `PoolExhausted` nothing changes.
    pub fn confirm(&mut self, pos: CursorPos) -> Result<String, ViewError> {
        let id = self.pool.pop()?;
        self.confirmed.push(Cursor { id: id.clone(), pos });
        Ok(id)
    }

    pub fn set_preview(&mut self, pos: Option<CursorPos>) {
        self.preview = pos;
    }

    pub fn preview(&self) -> Option<CursorPos> {
        self.preview
    }

    pub fn confirmed(&self) -> &[Cursor] {
        &self.confirmed
    }

    /// Identifiers still available.
    pub fn remaining(&self) -> usize {
        self.pool.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alphabet_issues_in_reverse_order() {
        let mut reg = CursorRegistry::default();
        let ids: Vec<String> = (0..26).map(|i| reg.confirm(CursorPos::new(i, i)).unwrap()).collect();
        let expected: Vec<String> = ('A'..='Z').rev().map(|c| c.to_string()).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn exhaustion_leaves_registry_untouched() {
        let mut reg = CursorRegistry::new(IdentifierPool::from_issue_order(["p"]));
        reg.set_preview(Some(CursorPos::new(1, 1)));
        assert_eq!(reg.confirm(CursorPos::new(3, 4)).unwrap(), "p");
        assert_eq!(reg.confirm(CursorPos::new(5, 6)), Err(ViewError::PoolExhausted));
        assert_eq!(reg.confirmed().len(), 1);
        assert_eq!(reg.confirmed()[0].pos(), CursorPos::new(3, 4));
        assert_eq!(reg.preview(), Some(CursorPos::new(1, 1)));
    }

    #[test]
    fn preview_is_independent_of_confirmed() {
        let mut reg = CursorRegistry::default();
        reg.confirm(CursorPos::new(10, 20)).unwrap();
        reg.set_preview(Some(CursorPos::new(2, 2)));
        reg.set_preview(None);
        assert_eq!(reg.confirmed()[0].pos(), CursorPos::new(10, 20));
        assert_eq!(reg.preview(), None);
    }

    #[test]
    fn custom_pool_issues_in_given_order() {
        let mut pool = IdentifierPool::from_issue_order(["a", "b"]);
        assert_eq!(pool.pop().unwrap(), "a");
        assert_eq!(pool.pop().unwrap(), "b");
        assert!(pool.is_empty());
        assert_eq!(pool.pop(), Err(ViewError::PoolExhausted));
    }
}
