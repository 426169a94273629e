// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Struct-of-arrays layer storage with allocation, topology, and property management.

use alloc::string::String;
use alloc::vec::Vec;

use crate::class::{ClassId, ClassRegistry};

use super::id::{INVALID, LayerId};
use super::traverse::{Children, Descendants};

/// Per-layer boolean flags.
///
/// Flags are plain data for the query engine: selectors may test them, but
/// no traversal skips hidden or locked layers on its own.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct LayerFlags {
    /// Whether the layer is hidden from view.
    pub hidden: bool,
    /// Whether the layer refuses edits to its content.
    pub locked: bool,
}

/// Struct-of-arrays storage for all layers.
///
/// Layers are addressed by [`LayerId`] handles. Internally, each layer occupies
/// a slot in parallel arrays. Destroyed layers are recycled via a free list,
/// and generation counters prevent stale handle access.
///
/// The topology is always a forest: every layer has at most one parent, only
/// groups own children, and edits that would close a cycle panic.
#[derive(Debug)]
pub struct LayerStore {
    // -- Topology --
    pub(crate) parent: Vec<u32>,
    pub(crate) first_child: Vec<u32>,
    pub(crate) next_sibling: Vec<u32>,
    pub(crate) prev_sibling: Vec<u32>,

    // -- Properties --
    pub(crate) class: Vec<ClassId>,
    pub(crate) name: Vec<String>,
    pub(crate) flags: Vec<LayerFlags>,

    // -- Allocation --
    pub(crate) generation: Vec<u32>,
    pub(crate) free_list: Vec<u32>,
    pub(crate) len: u32,

    // -- Classes --
    pub(crate) classes: ClassRegistry,
}

impl Default for LayerStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LayerStore {
    /// Creates an empty layer store with the built-in classes.
    #[must_use]
    pub fn new() -> Self {
        Self::with_classes(ClassRegistry::new())
    }

    /// Creates an empty layer store using a prepared class registry.
    #[must_use]
    pub fn with_classes(classes: ClassRegistry) -> Self {
        Self {
            parent: Vec::new(),
            first_child: Vec::new(),
            next_sibling: Vec::new(),
            prev_sibling: Vec::new(),
            class: Vec::new(),
            name: Vec::new(),
            flags: Vec::new(),
            generation: Vec::new(),
            free_list: Vec::new(),
            len: 0,
            classes,
        }
    }

    /// Returns the class registry.
    #[must_use]
    pub fn classes(&self) -> &ClassRegistry {
        &self.classes
    }

    /// Returns the class registry for registering new classes.
    ///
    /// Registered classes can never be removed, so existing layers keep
    /// valid class ids.
    pub fn classes_mut(&mut self) -> &mut ClassRegistry {
        &mut self.classes
    }

    // -- Allocation API --

    /// Creates a new layer of the given class and returns its handle.
    ///
    /// The layer starts with an empty name, default flags, and no parent.
    ///
    /// # Panics
    ///
    /// Panics if `class` is not registered.
    pub fn create_layer(&mut self, class: ClassId) -> LayerId {
        assert!(
            self.classes.contains(class),
            "cannot create layer of unknown {class:?}"
        );
        let idx = if let Some(idx) = self.free_list.pop() {
            // Reuse a freed slot.
            self.generation[idx as usize] += 1;
            self.parent[idx as usize] = INVALID;
            self.first_child[idx as usize] = INVALID;
            self.next_sibling[idx as usize] = INVALID;
            self.prev_sibling[idx as usize] = INVALID;
            self.class[idx as usize] = class;
            self.name[idx as usize].clear();
            self.flags[idx as usize] = LayerFlags::default();
            idx
        } else {
            // Allocate a new slot.
            let idx = self.len;
            self.len += 1;
            self.parent.push(INVALID);
            self.first_child.push(INVALID);
            self.next_sibling.push(INVALID);
            self.prev_sibling.push(INVALID);
            self.class.push(class);
            self.name.push(String::new());
            self.flags.push(LayerFlags::default());
            self.generation.push(0);
            idx
        };

        LayerId {
            idx,
            generation: self.generation[idx as usize],
        }
    }

    /// Creates a new plain [`GROUP`](ClassId::GROUP) layer.
    pub fn create_group(&mut self) -> LayerId {
        self.create_layer(ClassId::GROUP)
    }

    /// Creates a new layer of the given class with a name.
    ///
    /// # Panics
    ///
    /// Panics if `class` is not registered.
    pub fn create_named(&mut self, class: ClassId, name: &str) -> LayerId {
        let id = self.create_layer(class);
        self.name[id.idx as usize].push_str(name);
        id
    }

    /// Destroys a layer, freeing its slot for reuse.
    ///
    /// # Panics
    ///
    /// Panics if the layer has children (remove them first) or if the handle
    /// is stale.
    pub fn destroy_layer(&mut self, id: LayerId) {
        self.validate(id);
        let idx = id.idx;
        assert!(
            self.first_child[idx as usize] == INVALID,
            "cannot destroy layer with children"
        );

        // Remove from parent's child list if attached.
        if self.parent[idx as usize] != INVALID {
            self.unlink_from_parent(idx);
        }

        // Bump generation so old handles immediately fail validation.
        self.generation[idx as usize] += 1;

        self.free_list.push(idx);
    }

    /// Returns whether the given handle refers to a live layer.
    #[must_use]
    pub fn is_alive(&self, id: LayerId) -> bool {
        (id.idx < self.len)
            && self.generation[id.idx as usize] == id.generation
            && !self.free_list.contains(&id.idx)
    }

    /// Returns the number of live layers.
    #[must_use]
    pub fn layer_count(&self) -> usize {
        self.len as usize - self.free_list.len()
    }

    // -- Topology API --

    /// Adds `child` as the last child of `parent`.
    ///
    /// # Panics
    ///
    /// Panics if either handle is stale, `parent` is not a group, `child`
    /// already has a parent, or `child` is `parent` or one of its ancestors.
    pub fn add_child(&mut self, parent: LayerId, child: LayerId) {
        self.validate(parent);
        self.validate(child);
        let p = parent.idx;
        let c = child.idx;
        assert!(
            self.parent[c as usize] == INVALID,
            "child already has a parent"
        );
        self.check_attach(p, c);
        self.link_last(p, c);
    }

    /// Removes `child` from its current parent.
    ///
    /// The child becomes a root; its own subtree is untouched.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale or the layer has no parent.
    pub fn remove_from_parent(&mut self, child: LayerId) {
        self.validate(child);
        let c = child.idx;
        assert!(self.parent[c as usize] != INVALID, "layer has no parent");
        self.unlink_from_parent(c);
    }

    /// Moves `child` to be the last child of `new_parent`.
    ///
    /// If `child` already has a parent, it is removed first.
    ///
    /// # Panics
    ///
    /// Panics if either handle is stale, `new_parent` is not a group, or
    /// `child` is `new_parent` or one of its ancestors.
    pub fn reparent(&mut self, child: LayerId, new_parent: LayerId) {
        self.validate(child);
        self.validate(new_parent);
        let p = new_parent.idx;
        let c = child.idx;
        self.check_attach(p, c);

        if self.parent[c as usize] != INVALID {
            self.unlink_from_parent(c);
        }
        self.link_last(p, c);
    }

    /// Inserts `child` before `sibling` in the sibling list.
    ///
    /// `child` must not already have a parent. `sibling` must have a parent.
    ///
    /// # Panics
    ///
    /// Panics if handles are stale, `child` already has a parent, `sibling`
    /// has no parent, or `child` is an ancestor of `sibling`.
    pub fn insert_before(&mut self, child: LayerId, sibling: LayerId) {
        self.validate(child);
        self.validate(sibling);
        let c = child.idx;
        let s = sibling.idx;
        assert!(
            self.parent[c as usize] == INVALID,
            "child already has a parent"
        );
        let p = self.parent[s as usize];
        assert!(p != INVALID, "sibling has no parent");
        self.check_attach(p, c);

        self.parent[c as usize] = p;
        self.next_sibling[c as usize] = s;
        self.prev_sibling[c as usize] = self.prev_sibling[s as usize];

        if self.prev_sibling[s as usize] != INVALID {
            self.next_sibling[self.prev_sibling[s as usize] as usize] = c;
        } else {
            // `sibling` was the first child.
            self.first_child[p as usize] = c;
        }
        self.prev_sibling[s as usize] = c;
    }

    /// Returns the parent of a layer, if any.
    #[must_use]
    pub fn parent(&self, id: LayerId) -> Option<LayerId> {
        self.validate(id);
        let p = self.parent[id.idx as usize];
        if p == INVALID {
            None
        } else {
            Some(self.handle(p))
        }
    }

    /// Returns an iterator over the direct children of a layer, topmost first.
    #[must_use]
    pub fn children(&self, id: LayerId) -> Children<'_> {
        self.validate(id);
        Children::new(self, self.first_child[id.idx as usize])
    }

    /// Returns a lazy depth-first pre-order iterator over every descendant of
    /// a layer. The layer itself is not yielded.
    #[must_use]
    pub fn descendants(&self, id: LayerId) -> Descendants<'_> {
        self.validate(id);
        Descendants::new(self, id.idx)
    }

    /// Returns the number of direct children of a layer.
    #[must_use]
    pub fn child_count(&self, id: LayerId) -> usize {
        self.children(id).count()
    }

    /// Returns the child at `index` in a layer's child list, if any.
    #[must_use]
    pub fn child_at(&self, id: LayerId, index: usize) -> Option<LayerId> {
        self.children(id).nth(index)
    }

    /// Returns the position of a layer within its parent's child list.
    #[must_use]
    pub fn index_in_parent(&self, id: LayerId) -> Option<usize> {
        let parent = self.parent(id)?;
        self.children(parent).position(|c| c == id)
    }

    /// Returns whether `id` is a strict descendant of `ancestor`.
    #[must_use]
    pub fn is_descendant_of(&self, id: LayerId, ancestor: LayerId) -> bool {
        self.validate(id);
        self.validate(ancestor);
        id != ancestor && self.is_self_or_ancestor(ancestor.idx, id.idx)
    }

    /// Returns the root layers (those with no parent).
    #[must_use]
    pub fn roots(&self) -> Vec<LayerId> {
        let mut roots = Vec::new();
        for idx in 0..self.len {
            if self.parent[idx as usize] == INVALID && !self.free_list.contains(&idx) {
                roots.push(self.handle(idx));
            }
        }
        roots
    }

    // -- Property API --

    /// Returns the class of a layer.
    #[must_use]
    pub fn class(&self, id: LayerId) -> ClassId {
        self.validate(id);
        self.class[id.idx as usize]
    }

    /// Returns whether a layer's class is `class` or one of its subclasses.
    #[must_use]
    pub fn is_kind_of(&self, id: LayerId, class: ClassId) -> bool {
        self.classes.is_kind_of(self.class(id), class)
    }

    /// Returns whether a layer is a group (may own children).
    #[must_use]
    pub fn is_group(&self, id: LayerId) -> bool {
        self.is_kind_of(id, ClassId::GROUP)
    }

    /// Returns the name of a layer.
    #[must_use]
    pub fn name(&self, id: LayerId) -> &str {
        self.validate(id);
        &self.name[id.idx as usize]
    }

    /// Sets the name of a layer.
    pub fn set_name(&mut self, id: LayerId, name: &str) {
        self.validate(id);
        let slot = &mut self.name[id.idx as usize];
        slot.clear();
        slot.push_str(name);
    }

    /// Returns the flags of a layer.
    #[must_use]
    pub fn flags(&self, id: LayerId) -> LayerFlags {
        self.validate(id);
        self.flags[id.idx as usize]
    }

    /// Sets the flags of a layer.
    pub fn set_flags(&mut self, id: LayerId, flags: LayerFlags) {
        self.validate(id);
        self.flags[id.idx as usize] = flags;
    }

    // -- Internal helpers --

    /// Panics if the handle is stale.
    pub(crate) fn validate(&self, id: LayerId) {
        assert!(
            id.idx < self.len && self.generation[id.idx as usize] == id.generation,
            "stale LayerId: {id:?} (current gen: {})",
            if id.idx < self.len {
                self.generation[id.idx as usize]
            } else {
                u32::MAX
            }
        );
    }

    /// Builds a handle for a live slot.
    pub(crate) fn handle(&self, idx: u32) -> LayerId {
        LayerId {
            idx,
            generation: self.generation[idx as usize],
        }
    }

    /// Panics unless `c` may be attached under `p`.
    fn check_attach(&self, p: u32, c: u32) {
        assert!(
            self.classes
                .is_kind_of(self.class[p as usize], ClassId::GROUP),
            "parent is not a group"
        );
        assert!(
            !self.is_self_or_ancestor(c, p),
            "attaching layer would create a cycle"
        );
    }

    /// Returns whether `ancestor` is `idx` or lies on its parent chain.
    fn is_self_or_ancestor(&self, ancestor: u32, mut idx: u32) -> bool {
        while idx != INVALID {
            if idx == ancestor {
                return true;
            }
            idx = self.parent[idx as usize];
        }
        false
    }

    /// Appends an unparented `c` to `p`'s child list.
    fn link_last(&mut self, p: u32, c: u32) {
        self.parent[c as usize] = p;
        self.prev_sibling[c as usize] = INVALID;
        self.next_sibling[c as usize] = INVALID;

        if self.first_child[p as usize] == INVALID {
            self.first_child[p as usize] = c;
        } else {
            // Walk to last child.
            let mut last = self.first_child[p as usize];
            while self.next_sibling[last as usize] != INVALID {
                last = self.next_sibling[last as usize];
            }
            self.next_sibling[last as usize] = c;
            self.prev_sibling[c as usize] = last;
        }
    }

    /// Removes `idx` from its parent's child list.
    fn unlink_from_parent(&mut self, idx: u32) {
        let p = self.parent[idx as usize];
        let prev = self.prev_sibling[idx as usize];
        let next = self.next_sibling[idx as usize];

        if prev != INVALID {
            self.next_sibling[prev as usize] = next;
        } else {
            // Was first child.
            self.first_child[p as usize] = next;
        }

        if next != INVALID {
            self.prev_sibling[next as usize] = prev;
        }

        self.parent[idx as usize] = INVALID;
        self.prev_sibling[idx as usize] = INVALID;
        self.next_sibling[idx as usize] = INVALID;
    }
}
