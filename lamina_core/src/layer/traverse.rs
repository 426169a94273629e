// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tree traversal utilities.

use super::id::{INVALID, LayerId};
use super::store::LayerStore;

/// An iterator over the direct children of a layer.
///
/// Created by [`LayerStore::children`].
#[derive(Debug)]
pub struct Children<'a> {
    store: &'a LayerStore,
    current: u32,
}

impl<'a> Children<'a> {
    pub(crate) fn new(store: &'a LayerStore, first: u32) -> Self {
        Self {
            store,
            current: first,
        }
    }
}

impl Iterator for Children<'_> {
    type Item = LayerId;

    fn next(&mut self) -> Option<LayerId> {
        if self.current == INVALID {
            return None;
        }
        let idx = self.current;
        self.current = self.store.next_sibling[idx as usize];
        Some(self.store.handle(idx))
    }
}

/// A lazy depth-first pre-order iterator over the descendants of a layer.
///
/// Each group is yielded before its children, and children are visited in
/// child-list order. The walk follows parent links back up instead of
/// keeping a stack, and never leaves the subtree it was started on.
///
/// Created by [`LayerStore::descendants`].
#[derive(Debug)]
pub struct Descendants<'a> {
    store: &'a LayerStore,
    root: u32,
    current: u32,
}

impl<'a> Descendants<'a> {
    pub(crate) fn new(store: &'a LayerStore, root: u32) -> Self {
        Self {
            store,
            root,
            current: store.first_child[root as usize],
        }
    }

    /// Returns the slot after `idx` in pre-order, or [`INVALID`] at the end
    /// of the subtree.
    fn successor(&self, idx: u32) -> u32 {
        let first = self.store.first_child[idx as usize];
        if first != INVALID {
            return first;
        }
        let mut n = idx;
        while n != self.root {
            let next = self.store.next_sibling[n as usize];
            if next != INVALID {
                return next;
            }
            n = self.store.parent[n as usize];
        }
        INVALID
    }
}

impl Iterator for Descendants<'_> {
    type Item = LayerId;

    fn next(&mut self) -> Option<LayerId> {
        if self.current == INVALID {
            return None;
        }
        let idx = self.current;
        self.current = self.successor(idx);
        Some(self.store.handle(idx))
    }
}
