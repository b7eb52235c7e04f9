//! Per-key merge policies arranged as a tree of dotted paths.

use std::collections::BTreeMap;

/// How a single key combines when both the target and a source define it.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum MergePolicy {
    /// Merge mappings key by key; replace anything else wholesale.
    #[default]
    Recurse,
    /// Take the source's value wholesale, even when both sides are mappings.
    PreferIncoming,
    /// Keep the target's value unless it is absent or `null`.
    PreferExisting,
}

/// A tree of [`MergePolicy`] overrides keyed by path segment.
///
/// Keys without an explicit rule use [`MergePolicy::Recurse`]. Rules for
/// nested keys only matter while the merge recurses into their parent, so a
/// parent marked [`MergePolicy::PreferIncoming`] hides its children's rules.
///
/// ```rust
/// use config_plugins::{MergePolicy, MergeRules};
///
/// let rules = MergeRules::new()
///     .set("mode", MergePolicy::PreferExisting)
///     .set("build.rollupOptions", MergePolicy::PreferIncoming);
///
/// assert_eq!(rules.policy("mode"), MergePolicy::PreferExisting);
/// assert_eq!(rules.policy("build.rollupOptions"), MergePolicy::PreferIncoming);
/// assert_eq!(rules.policy("build.target"), MergePolicy::Recurse);
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct MergeRules {
    policy: MergePolicy,
    children: BTreeMap<String, MergeRules>,
}

impl MergeRules {
    /// Rules that recurse everywhere.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the policy for a dotted `path`, returning the updated rules.
    ///
    /// Use [`MergeRules::set_path`] when a key itself contains a dot.
    #[must_use]
    pub fn set(mut self, path: &str, policy: MergePolicy) -> Self {
        self.set_path(path.split('.'), policy);
        self
    }

    /// Set the policy for the key reached by `segments`.
    ///
    /// An empty segment list is ignored; the root of a merge is always a
    /// mapping and always recurses.
    pub fn set_path<I, S>(&mut self, segments: I, policy: MergePolicy)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut node = self;
        let mut descended = false;
        for segment in segments {
            node = node.children.entry(segment.into()).or_default();
            descended = true;
        }
        if descended {
            node.policy = policy;
        }
    }

    /// Attach `rules` beneath `key`, keeping any policy already set on it.
    ///
    /// Typed configurations use this to graft the rules of a nested struct.
    #[must_use]
    pub fn nest(mut self, key: impl Into<String>, rules: Self) -> Self {
        let node = self.children.entry(key.into()).or_default();
        for (child, subtree) in rules.children {
            node.children.insert(child, subtree);
        }
        self
    }

    /// Policy governing the dotted `path`.
    #[must_use]
    pub fn policy(&self, path: &str) -> MergePolicy {
        let mut node = self;
        for segment in path.split('.') {
            match node.children.get(segment) {
                Some(child) => node = child,
                None => return MergePolicy::Recurse,
            }
        }
        node.policy
    }

    /// Rules beneath the immediate child `key`, if any were declared.
    #[must_use]
    pub fn child(&self, key: &str) -> Option<&Self> {
        self.children.get(key)
    }

    /// Returns `true` when no overrides have been declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub(crate) fn policy_of(rules: Option<&Self>, key: &str) -> MergePolicy {
        rules
            .and_then(|node| node.child(key))
            .map_or(MergePolicy::Recurse, |child| child.policy)
    }
}
