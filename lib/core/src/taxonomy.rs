//! The concept taxonomy: rooted trees of ingredient and cuisine concepts.
//!
//! Nodes live in an arena and refer to each other by [`NodeId`], so the
//! parent back-reference never creates an ownership cycle.  The store keeps
//! a cached whole-word matcher over all node names for linking free-text
//! ingredient names to their most specific concept.

use crate::error::{Error, Result};
use crate::normalize::normalize_taxonomy_name;
use parking_lot::RwLock;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Stable handle to a node in the taxonomy arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u32);

/// A snapshot of one taxonomy node.  Returned by value; the arena itself is
/// never exposed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxonomyNode {
    pub id: NodeId,
    pub name: String,
    pub supertype: Option<NodeId>,
    pub subtypes: Vec<NodeId>,
    pub depth: u32,
}

impl TaxonomyNode {
    pub fn is_root(&self) -> bool {
        self.supertype.is_none()
    }
}

#[derive(Default)]
struct Tree {
    nodes: Vec<TaxonomyNode>,
    by_name: HashMap<String, Vec<NodeId>>,
    roots: Vec<NodeId>,
    /// Bumped on every successful insert; used to invalidate the matcher.
    version: u64,
}

impl Tree {
    fn node(&self, id: NodeId) -> &TaxonomyNode {
        &self.nodes[id.0 as usize]
    }

    fn child_named(&self, parent: Option<NodeId>, name: &str) -> Option<NodeId> {
        let candidates = match parent {
            Some(id) => &self.node(id).subtypes,
            None => &self.roots,
        };
        candidates
            .iter()
            .copied()
            .find(|&id| self.node(id).name == name)
    }
}

struct NameMatcher {
    regex: Regex,
    version: u64,
}

/// Owns all taxonomy nodes.  Writers (`insert_path`) are serialized by the
/// inner lock; all read operations may run concurrently.
pub struct TaxonomyStore {
    tree: RwLock<Tree>,
    matcher: RwLock<Option<Arc<NameMatcher>>>,
}

impl Default for TaxonomyStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TaxonomyStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            tree: RwLock::new(Tree::default()),
            matcher: RwLock::new(None),
        }
    }

    /// Insert a root-to-leaf path of concept names, creating only the
    /// missing suffix.  Names are normalized before insertion.
    ///
    /// Re-inserting a path that already exists in full is an error, so
    /// accidental re-ingestion of taxonomy data is detectable.
    pub fn insert_path<S: AsRef<str>>(&self, names: &[S]) -> Result<()> {
        let names: Vec<String> = names
            .iter()
            .map(|n| normalize_taxonomy_name(n.as_ref()))
            .filter(|n| !n.is_empty())
            .collect();

        let mut tree = self.tree.write();
        let mut parent: Option<NodeId> = None;
        let mut created = false;
        for name in &names {
            let id = match tree.child_named(parent, name) {
                Some(id) => id,
                None => {
                    let id = NodeId(tree.nodes.len() as u32);
                    let depth = match parent {
                        Some(pid) => tree.node(pid).depth + 1,
                        None => 0,
                    };
                    tree.nodes.push(TaxonomyNode {
                        id,
                        name: name.clone(),
                        supertype: parent,
                        subtypes: Vec::new(),
                        depth,
                    });
                    match parent {
                        Some(pid) => tree.nodes[pid.0 as usize].subtypes.push(id),
                        None => tree.roots.push(id),
                    }
                    tree.by_name.entry(name.clone()).or_default().push(id);
                    created = true;
                    id
                }
            };
            parent = Some(id);
        }

        if created {
            tree.version += 1;
            Ok(())
        } else {
            Err(Error::DuplicatePath(names.join(" > ")))
        }
    }

    /// All nodes with the given (normalized) name, deepest first.  Several
    /// nodes may share a name as long as their parents differ.
    pub fn find_by_name(&self, name: &str, parent: Option<NodeId>) -> Vec<TaxonomyNode> {
        let name = normalize_taxonomy_name(name);
        let tree = self.tree.read();
        let mut matches: Vec<TaxonomyNode> = tree
            .by_name
            .get(&name)
            .map(|ids| ids.iter().map(|&id| tree.node(id).clone()).collect())
            .unwrap_or_default();
        if let Some(pid) = parent {
            matches.retain(|n| n.supertype == Some(pid));
        }
        matches.sort_by(|a, b| b.depth.cmp(&a.depth));
        matches
    }

    /// The single best node for a name: deepest match wins.
    pub fn resolve(&self, name: &str) -> Option<TaxonomyNode> {
        self.find_by_name(name, None).into_iter().next()
    }

    /// Snapshot of a node by id.
    pub fn node(&self, id: NodeId) -> Option<TaxonomyNode> {
        self.tree.read().nodes.get(id.0 as usize).cloned()
    }

    /// All root nodes, in insertion order.
    pub fn roots(&self) -> Vec<TaxonomyNode> {
        let tree = self.tree.read();
        tree.roots.iter().map(|&id| tree.node(id).clone()).collect()
    }

    pub fn node_count(&self) -> usize {
        self.tree.read().nodes.len()
    }

    /// Nodes sharing the given node's supertype, excluding the node itself.
    /// Roots have no siblings.
    pub fn siblings(&self, id: NodeId) -> Vec<TaxonomyNode> {
        let tree = self.tree.read();
        let Some(node) = tree.nodes.get(id.0 as usize) else {
            return Vec::new();
        };
        let Some(parent) = node.supertype else {
            return Vec::new();
        };
        tree.node(parent)
            .subtypes
            .iter()
            .filter(|&&sid| sid != id)
            .map(|&sid| tree.node(sid).clone())
            .collect()
    }

    /// The path from a root down to the given node, inclusive.
    pub fn ancestors(&self, id: NodeId) -> Vec<TaxonomyNode> {
        let tree = self.tree.read();
        let mut path = Vec::new();
        let mut cursor = tree.nodes.get(id.0 as usize);
        while let Some(node) = cursor {
            path.push(node.clone());
            cursor = node.supertype.map(|pid| tree.node(pid));
        }
        path.reverse();
        path
    }

    /// True if the node equals the named concept or any of its ancestors
    /// does.
    pub fn is_subtype_of(&self, id: NodeId, name: &str) -> bool {
        let name = normalize_taxonomy_name(name);
        self.ancestors(id).iter().any(|n| n.name == name)
    }

    /// Link a normalized ingredient name to the taxonomy node whose name
    /// occurs as a whole word within it.  The longest node name wins; among
    /// nodes with the same name, the deepest.  Returns `None` when nothing
    /// in the taxonomy matches.
    pub fn link_ingredient(&self, ingredient_name: &str) -> Option<TaxonomyNode> {
        let name = crate::normalize::normalize_name(ingredient_name);
        let matcher = self.current_matcher()?;
        let matched = matcher.regex.find(&name)?.as_str().to_string();
        self.resolve(&matched)
    }

    /// Return the cached matcher, rebuilding it when the tree has changed
    /// since it was compiled.  The rebuilt matcher is swapped in whole, so
    /// concurrent readers always see a consistent one.
    fn current_matcher(&self) -> Option<Arc<NameMatcher>> {
        let version = self.tree.read().version;
        if let Some(matcher) = self.matcher.read().as_ref() {
            if matcher.version == version {
                return Some(matcher.clone());
            }
        }

        let mut slot = self.matcher.write();
        // Another thread may have rebuilt while we waited for the lock.
        if let Some(matcher) = slot.as_ref() {
            if matcher.version == version {
                return Some(matcher.clone());
            }
        }

        let tree = self.tree.read();
        if tree.nodes.is_empty() {
            return None;
        }
        // Longest name first so the most specific concept wins; depth breaks
        // ties between identically named nodes.
        let mut entries: Vec<(String, u32)> = tree
            .nodes
            .iter()
            .map(|n| (n.name.clone(), n.depth))
            .collect();
        let version = tree.version;
        drop(tree);
        entries.sort_by(|a, b| b.0.len().cmp(&a.0.len()).then(b.1.cmp(&a.1)));
        entries.dedup_by(|a, b| a.0 == b.0);
        let pattern = format!(
            r"\b(?:{})\b",
            entries
                .iter()
                .map(|(name, _)| regex::escape(name))
                .collect::<Vec<_>>()
                .join("|")
        );

        debug!(version, "rebuilding taxonomy name matcher");
        let regex = Regex::new(&pattern).ok()?;
        let matcher = Arc::new(NameMatcher { regex, version });
        *slot = Some(matcher.clone());
        Some(matcher)
    }

    /// Printable representation of the subtree rooted at the given node,
    /// children sorted by name.
    pub fn subtree_diagram(&self, id: NodeId) -> String {
        let tree = self.tree.read();
        fn render(tree: &Tree, id: NodeId, lines: &mut Vec<String>, indent: usize) {
            let node = tree.node(id);
            lines.push(format!("{}{}", "    ".repeat(indent), node.name));
            let mut children = node.subtypes.clone();
            children.sort_by(|&a, &b| tree.node(a).name.cmp(&tree.node(b).name));
            for child in children {
                render(tree, child, lines, indent + 1);
            }
        }
        let mut lines = Vec::new();
        if (id.0 as usize) < tree.nodes.len() {
            render(&tree, id, &mut lines, 0);
        }
        lines.join("\n")
    }

    /// Every root-to-leaf path in the taxonomy, suitable for replaying
    /// through [`TaxonomyStore::insert_path`].
    pub fn paths(&self) -> Vec<Vec<String>> {
        let tree = self.tree.read();
        tree.nodes
            .iter()
            .filter(|n| n.subtypes.is_empty())
            .map(|leaf| {
                let mut path = Vec::new();
                let mut cursor = Some(leaf.id);
                while let Some(id) = cursor {
                    let node = tree.node(id);
                    path.push(node.name.clone());
                    cursor = node.supertype;
                }
                path.reverse();
                path
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_store() -> TaxonomyStore {
        let store = TaxonomyStore::new();
        store
            .insert_path(&["ingredient", "fruit", "apple"])
            .unwrap();
        store
            .insert_path(&["ingredient", "fruit", "orange"])
            .unwrap();
        store
            .insert_path(&["ingredient", "vegetable", "potato"])
            .unwrap();
        store
    }

    #[test]
    fn duplicate_path_is_rejected_without_growing_the_tree() {
        let store = sample_store();
        let count = store.node_count();
        let err = store
            .insert_path(&["ingredient", "fruit", "apple"])
            .unwrap_err();
        assert!(matches!(err, Error::DuplicatePath(_)));
        assert_eq!(store.node_count(), count);
    }

    #[test]
    fn partial_overlap_creates_only_the_missing_suffix() {
        let store = sample_store();
        let count = store.node_count();
        store
            .insert_path(&["ingredient", "fruit", "banana"])
            .unwrap();
        assert_eq!(store.node_count(), count + 1);
    }

    #[test]
    fn depth_matches_distance_from_root() {
        let store = sample_store();
        let apple = store.resolve("apple").unwrap();
        assert_eq!(apple.depth, 2);
        for node in store.ancestors(apple.id) {
            match node.supertype {
                None => assert_eq!(node.depth, 0),
                Some(pid) => assert_eq!(node.depth, store.node(pid).unwrap().depth + 1),
            }
        }
    }

    #[test]
    fn siblings_are_symmetric_and_exclude_self() {
        let store = sample_store();
        let apple = store.resolve("apple").unwrap();
        let orange = store.resolve("orange").unwrap();
        let apple_siblings: Vec<_> = store.siblings(apple.id).iter().map(|n| n.id).collect();
        let orange_siblings: Vec<_> = store.siblings(orange.id).iter().map(|n| n.id).collect();
        assert!(apple_siblings.contains(&orange.id));
        assert!(orange_siblings.contains(&apple.id));
        assert!(!apple_siblings.contains(&apple.id));
    }

    #[test]
    fn roots_have_no_siblings() {
        let store = sample_store();
        let root = store.resolve("ingredient").unwrap();
        assert!(root.is_root());
        assert!(store.siblings(root.id).is_empty());
    }

    #[test]
    fn sibling_scenario_from_shared_parent() {
        let store = TaxonomyStore::new();
        store
            .insert_path(&["ingredient", "vegetable", "root vegetable", "potato"])
            .unwrap();
        store
            .insert_path(&["ingredient", "vegetable", "root vegetable", "yam"])
            .unwrap();
        let yam = store.resolve("yam").unwrap();
        let siblings: Vec<_> = store
            .siblings(yam.id)
            .into_iter()
            .map(|n| n.name)
            .collect();
        assert_eq!(siblings, vec!["potato"]);
    }

    #[test]
    fn ancestors_run_root_to_node() {
        let store = sample_store();
        let apple = store.resolve("apple").unwrap();
        let names: Vec<_> = store
            .ancestors(apple.id)
            .into_iter()
            .map(|n| n.name)
            .collect();
        assert_eq!(names, vec!["ingredient", "fruit", "apple"]);
    }

    #[test]
    fn subtype_checks_walk_the_ancestry() {
        let store = sample_store();
        let apple = store.resolve("apple").unwrap();
        assert!(store.is_subtype_of(apple.id, "ingredient"));
        assert!(store.is_subtype_of(apple.id, "apple"));
        assert!(!store.is_subtype_of(apple.id, "vegetable"));
    }

    #[test]
    fn same_name_under_different_parents() {
        let store = TaxonomyStore::new();
        store.insert_path(&["ingredient", "vegetable"]).unwrap();
        store.insert_path(&["cuisine", "vegetable"]).unwrap();
        assert_eq!(store.find_by_name("vegetable", None).len(), 2);
        let cuisine = store.resolve("cuisine").unwrap();
        assert_eq!(store.find_by_name("vegetable", Some(cuisine.id)).len(), 1);
    }

    #[test]
    fn link_prefers_longest_then_deepest_match() {
        let store = TaxonomyStore::new();
        store.insert_path(&["ingredient", "vegetable", "potato"]).unwrap();
        store
            .insert_path(&["ingredient", "vegetable", "sweet potato"])
            .unwrap();
        let node = store.link_ingredient("mashed sweet potatoes").unwrap();
        assert_eq!(node.name, "sweet potato");
        let node = store.link_ingredient("2 russet potatoes").unwrap();
        assert_eq!(node.name, "potato");
        assert!(store.link_ingredient("unobtainium").is_none());
    }

    #[test]
    fn matcher_sees_nodes_inserted_after_first_use() {
        let store = TaxonomyStore::new();
        store.insert_path(&["ingredient", "fruit", "apple"]).unwrap();
        assert!(store.link_ingredient("quince jelly").is_none());
        store.insert_path(&["ingredient", "fruit", "quince"]).unwrap();
        assert_eq!(store.link_ingredient("quince jelly").unwrap().name, "quince");
    }

    #[test]
    fn diagram_lists_children_alphabetically() {
        let store = sample_store();
        let root = store.resolve("ingredient").unwrap();
        let diagram = store.subtree_diagram(root.id);
        let expected = "ingredient\n    fruit\n        apple\n        orange\n    vegetable\n        potato";
        assert_eq!(diagram, expected);
    }

    #[test]
    fn paths_replay_reconstructs_the_tree() {
        let store = sample_store();
        let replayed = TaxonomyStore::new();
        for path in store.paths() {
            replayed.insert_path(&path).unwrap();
        }
        assert_eq!(replayed.node_count(), store.node_count());
    }
}
