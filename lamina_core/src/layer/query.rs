// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Type-filtered layer queries.
//!
//! Three operations, each run against a receiver layer (normally a group):
//!
//! - [`layers`](LayerStore::layers): matching direct children, or with
//!   `deep` set, every matching descendant in depth-first pre-order.
//! - [`first_layer`](LayerStore::first_layer): the first layer `layers`
//!   would return. Deep searches stop at the first match instead of building
//!   the full list.
//! - [`flattened_layers`](LayerStore::flattened_layers): every matching
//!   layer in the subtree rooted at the receiver, receiver first, in
//!   pre-order. Groups are traversed but only emitted when `include_groups`
//!   is set.
//!
//! Queries are total: selectors that match nothing give an empty `Vec` or
//! `None`, and a receiver with no children behaves like an empty group.
//! Nothing is cached; every call walks the tree afresh.
//!
//! Each operation has a typed form (`*_of::<K>`) selecting by
//! [`LayerKind`] and a traced form (`*_with`) reporting a
//! [`QueryEvent`] to a [`Tracer`].

use alloc::vec::Vec;
use core::iter;

use crate::kind::{LayerKind, Typed};
use crate::trace::{QueryEvent, QueryKind, Tracer};

use super::id::LayerId;
use super::select::{KindOf, Selector};
use super::store::LayerStore;

impl LayerStore {
    /// Returns the layers under `group` matched by `selector`.
    ///
    /// With `deep == false` only direct children are tested. With
    /// `deep == true` every descendant is tested in depth-first pre-order; a
    /// group is tested before its children. The receiver itself is never
    /// returned. Group children are tested like any other layer.
    ///
    /// # Panics
    ///
    /// Panics if `group` is stale.
    #[must_use]
    pub fn layers<S: Selector + ?Sized>(
        &self,
        group: LayerId,
        selector: &S,
        deep: bool,
    ) -> Vec<LayerId> {
        self.layers_with(group, selector, deep, &mut Tracer::none())
    }

    /// Like [`layers`](Self::layers), reporting the query to `tracer`.
    pub fn layers_with<S: Selector + ?Sized>(
        &self,
        group: LayerId,
        selector: &S,
        deep: bool,
        tracer: &mut Tracer<'_>,
    ) -> Vec<LayerId> {
        let mut visited = 0;
        let found: Vec<LayerId> = if deep {
            self.descendants(group)
                .inspect(|_| visited += 1)
                .filter(|&id| selector.matches(self, id))
                .collect()
        } else {
            self.children(group)
                .inspect(|_| visited += 1)
                .filter(|&id| selector.matches(self, id))
                .collect()
        };
        tracer.query(&QueryEvent {
            kind: QueryKind::Layers,
            root: group,
            deep,
            include_groups: true,
            visited,
            matched: found.len(),
        });
        found
    }

    /// Returns the first layer [`layers`](Self::layers) would return, or
    /// `None` if there is none.
    ///
    /// The search stops at the first match.
    ///
    /// # Panics
    ///
    /// Panics if `group` is stale.
    #[must_use]
    pub fn first_layer<S: Selector + ?Sized>(
        &self,
        group: LayerId,
        selector: &S,
        deep: bool,
    ) -> Option<LayerId> {
        self.first_layer_with(group, selector, deep, &mut Tracer::none())
    }

    /// Like [`first_layer`](Self::first_layer), reporting the query to
    /// `tracer`.
    pub fn first_layer_with<S: Selector + ?Sized>(
        &self,
        group: LayerId,
        selector: &S,
        deep: bool,
        tracer: &mut Tracer<'_>,
    ) -> Option<LayerId> {
        let mut visited = 0;
        let found = if deep {
            self.descendants(group)
                .inspect(|_| visited += 1)
                .find(|&id| selector.matches(self, id))
        } else {
            self.children(group)
                .inspect(|_| visited += 1)
                .find(|&id| selector.matches(self, id))
        };
        tracer.query(&QueryEvent {
            kind: QueryKind::FirstLayer,
            root: group,
            deep,
            include_groups: true,
            visited,
            matched: usize::from(found.is_some()),
        });
        found
    }

    /// Returns every layer in the subtree rooted at `group` matched by
    /// `selector`, in depth-first pre-order starting with `group` itself.
    ///
    /// The whole subtree is always searched. When `include_groups` is
    /// `false`, group layers are searched through but never returned, even
    /// when they match.
    ///
    /// # Panics
    ///
    /// Panics if `group` is stale.
    #[must_use]
    pub fn flattened_layers<S: Selector + ?Sized>(
        &self,
        group: LayerId,
        selector: &S,
        include_groups: bool,
    ) -> Vec<LayerId> {
        self.flattened_layers_with(group, selector, include_groups, &mut Tracer::none())
    }

    /// Like [`flattened_layers`](Self::flattened_layers), reporting the
    /// query to `tracer`.
    pub fn flattened_layers_with<S: Selector + ?Sized>(
        &self,
        group: LayerId,
        selector: &S,
        include_groups: bool,
        tracer: &mut Tracer<'_>,
    ) -> Vec<LayerId> {
        let mut visited = 0;
        let found: Vec<LayerId> = iter::once(group)
            .chain(self.descendants(group))
            .inspect(|_| visited += 1)
            .filter(|&id| (include_groups || !self.is_group(id)) && selector.matches(self, id))
            .collect();
        tracer.query(&QueryEvent {
            kind: QueryKind::FlattenedLayers,
            root: group,
            deep: true,
            include_groups,
            visited,
            matched: found.len(),
        });
        found
    }

    // -- Typed forms --

    /// Typed form of [`layers`](Self::layers): selects layers kind-of `K`.
    ///
    /// Returns an empty list if `K` is not registered.
    #[must_use]
    pub fn layers_of<K: LayerKind>(&self, group: LayerId, deep: bool) -> Vec<Typed<K>> {
        let Some(selector) = self.kind_selector::<K>(group) else {
            return Vec::new();
        };
        self.layers(group, &selector, deep)
            .into_iter()
            .map(Typed::new)
            .collect()
    }

    /// Typed form of [`first_layer`](Self::first_layer): finds a layer
    /// kind-of `K`.
    ///
    /// Returns `None` if `K` is not registered.
    #[must_use]
    pub fn first_layer_of<K: LayerKind>(&self, group: LayerId, deep: bool) -> Option<Typed<K>> {
        let selector = self.kind_selector::<K>(group)?;
        self.first_layer(group, &selector, deep).map(Typed::new)
    }

    /// Typed form of [`flattened_layers`](Self::flattened_layers): collects
    /// layers kind-of `K`.
    ///
    /// Returns an empty list if `K` is not registered.
    #[must_use]
    pub fn flattened_layers_of<K: LayerKind>(
        &self,
        group: LayerId,
        include_groups: bool,
    ) -> Vec<Typed<K>> {
        let Some(selector) = self.kind_selector::<K>(group) else {
            return Vec::new();
        };
        self.flattened_layers(group, &selector, include_groups)
            .into_iter()
            .map(Typed::new)
            .collect()
    }

    /// Returns `id` as a [`Typed<K>`] if the layer is kind-of `K`.
    #[must_use]
    pub fn downcast<K: LayerKind>(&self, id: LayerId) -> Option<Typed<K>> {
        let class = K::class_in(&self.classes)?;
        self.is_kind_of(id, class).then_some(Typed::new(id))
    }

    /// Resolves `K` after checking the receiver, so stale receivers panic
    /// even when `K` is unknown.
    fn kind_selector<K: LayerKind>(&self, group: LayerId) -> Option<KindOf> {
        self.validate(group);
        K::class_in(&self.classes).map(KindOf)
    }
}
