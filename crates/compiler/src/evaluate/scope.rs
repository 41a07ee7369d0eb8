use std::{cell::RefCell, collections::BTreeMap, sync::Arc};

/// A chain of maps searched from the innermost link outwards
///
/// Unlike lexical shadowing, assigning to a key that some link already holds
/// overwrites it in that link. Only keys no link knows about are created in
/// the innermost one. Links are shared between a chain and the chains derived
/// from it, so such an overwrite is visible to every holder of the link.
#[allow(clippy::type_complexity)]
#[derive(Debug, Clone)]
pub(crate) struct ScopeChain<K, V> {
    /// Outermost first
    links: Vec<Arc<RefCell<BTreeMap<K, V>>>>,
}

impl<K: Ord + Copy, V: Clone> ScopeChain<K, V> {
    pub fn new() -> Self {
        Self::from_map(BTreeMap::new())
    }

    pub fn from_map(map: BTreeMap<K, V>) -> Self {
        Self {
            links: vec![Arc::new(RefCell::new(map))],
        }
    }

    /// A chain with a fresh innermost link in front of every link of this one
    pub fn new_child(&self) -> Self {
        Self::merged(std::iter::once(self))
    }

    /// A chain with a fresh innermost link in front of the links of each of
    /// `chains`, earlier chains taking priority
    pub fn merged<'a>(chains: impl DoubleEndedIterator<Item = &'a Self>) -> Self
    where
        K: 'a,
        V: 'a,
    {
        let mut links: Vec<_> = chains
            .rev()
            .flat_map(|chain| chain.links.iter().map(Arc::clone))
            .collect();
        links.push(Arc::new(RefCell::new(BTreeMap::new())));

        Self { links }
    }

    pub fn get(&self, key: &K) -> Option<V> {
        for link in self.links.iter().rev() {
            if let Some(value) = (**link).borrow().get(key) {
                return Some(value.clone());
            }
        }

        None
    }

    pub fn contains(&self, key: &K) -> bool {
        self.links
            .iter()
            .any(|link| (**link).borrow().contains_key(key))
    }

    pub fn insert(&self, key: K, value: V) {
        let owner = self
            .links
            .iter()
            .rev()
            .find(|link| (***link).borrow().contains_key(&key))
            .or_else(|| self.links.last());

        if let Some(link) = owner {
            (**link).borrow_mut().insert(key, value);
        }
    }

    pub fn depth(&self) -> usize {
        self.links.len()
    }
}

#[cfg(test)]
mod test {
    use super::ScopeChain;

    #[test]
    fn existing_keys_are_overwritten_in_place() {
        let parent: ScopeChain<u8, i32> = ScopeChain::new();
        parent.insert(1, 10);

        let child = parent.new_child();
        child.insert(1, 20);
        child.insert(2, 30);

        assert_eq!(parent.get(&1), Some(20));
        assert_eq!(parent.get(&2), None);
        assert_eq!(child.get(&2), Some(30));
        assert_eq!(child.depth(), 2);
    }

    #[test]
    fn merged_chains_prefer_earlier_sources() {
        let first: ScopeChain<u8, &str> = ScopeChain::new();
        let second: ScopeChain<u8, &str> = ScopeChain::new();
        first.insert(1, "first");
        second.insert(1, "second");
        second.insert(2, "only second");

        let merged = ScopeChain::merged([&first, &second].into_iter());

        assert_eq!(merged.get(&1), Some("first"));
        assert_eq!(merged.get(&2), Some("only second"));
        assert!(merged.contains(&2));
    }
}
