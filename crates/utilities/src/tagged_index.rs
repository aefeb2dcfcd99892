use std::cmp::Ordering;
use std::fmt;
use std::hash::Hash;
use std::hash::Hasher;
use std::marker::PhantomData;
use std::ops::Index;
use std::ops::IndexMut;

/// A `usize` index that can only be compared with indices of the same `Tag`.
/// This prevents mixing up, for example, symbol slots and term slots that
/// both live in `Vec`s. Constructing an index does not prove that it is valid.
pub struct TagIndex<Tag> {
    index: usize,
    marker: PhantomData<fn() -> Tag>,
}

impl<Tag> TagIndex<Tag> {
    pub const fn new(index: usize) -> Self {
        Self {
            index,
            marker: PhantomData,
        }
    }

    /// Returns the underlying position.
    pub const fn value(&self) -> usize {
        self.index
    }
}

// Implemented by hand, since deriving would require the bounds on `Tag`.
impl<Tag> Clone for TagIndex<Tag> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<Tag> Copy for TagIndex<Tag> {}

impl<Tag> PartialEq for TagIndex<Tag> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl<Tag> Eq for TagIndex<Tag> {}

impl<Tag> PartialOrd for TagIndex<Tag> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<Tag> Ord for TagIndex<Tag> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.index.cmp(&other.index)
    }
}

impl<Tag> Hash for TagIndex<Tag> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.index.hash(state);
    }
}

impl<Tag> fmt::Debug for TagIndex<Tag> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.index)
    }
}

impl<Tag> fmt::Display for TagIndex<Tag> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index)
    }
}

impl<U, Tag> Index<TagIndex<Tag>> for [U] {
    type Output = U;

    fn index(&self, index: TagIndex<Tag>) -> &Self::Output {
        &self[index.value()]
    }
}

impl<U, Tag> IndexMut<TagIndex<Tag>> for [U] {
    fn index_mut(&mut self, index: TagIndex<Tag>) -> &mut Self::Output {
        &mut self[index.value()]
    }
}

impl<U, Tag> Index<TagIndex<Tag>> for Vec<U> {
    type Output = U;

    fn index(&self, index: TagIndex<Tag>) -> &Self::Output {
        &self[index.value()]
    }
}

impl<U, Tag> IndexMut<TagIndex<Tag>> for Vec<U> {
    fn index_mut(&mut self, index: TagIndex<Tag>) -> &mut Self::Output {
        &mut self[index.value()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Apple;

    #[test]
    fn test_tag_index_vec() {
        let mut values = vec![10, 20, 30];
        let index = TagIndex::<Apple>::new(1);

        assert_eq!(values[index], 20);
        values[index] = 25;
        assert_eq!(values[index.value()], 25);
        assert!(TagIndex::<Apple>::new(0) < index);
        assert_eq!(format!("{index:?}"), "#1");
    }
}
