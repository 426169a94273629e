// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drawing documents and the active layer.
//!
//! A [`Drawing`] owns a [`LayerStore`] whose root layer has class
//! [`ClassId::DRAWING`], the paper geometry, and a reference to the *active*
//! layer: the one that receives editing commands. Only layers whose class is
//! [`activatable`](crate::class::ClassInfo::activatable) can become active,
//! and only while they belong to the drawing.
//!
//! Adding and removing layers through [`Drawing::add_layer`] and
//! [`Drawing::remove_layer`] keeps the active layer sensible: removing the
//! active layer (or a group containing it) activates the first remaining
//! layer of the same class, if any.

use kurbo::{Insets, Point, Rect, Size};

use crate::class::{ClassId, ClassRegistry};
use crate::kind::{Grid, Guide, LayerKind, Typed};
use crate::layer::{Activatable, KindOf, LayerId, LayerStore, MasterGrid, Selector};
use crate::trace::{ActiveLayerEvent, Tracer};

/// A drawing document: a layer tree rooted at a [`ClassId::DRAWING`] layer.
#[derive(Debug)]
pub struct Drawing {
    store: LayerStore,
    root: LayerId,
    size: Size,
    margins: Insets,
    active: Option<LayerId>,
}

impl Drawing {
    /// Creates an empty drawing of the given paper size with the built-in
    /// classes.
    #[must_use]
    pub fn new(size: Size) -> Self {
        Self::with_classes(size, ClassRegistry::new())
    }

    /// Creates an empty drawing using a prepared class registry.
    #[must_use]
    pub fn with_classes(size: Size, classes: ClassRegistry) -> Self {
        let mut store = LayerStore::with_classes(classes);
        let root = store.create_layer(ClassId::DRAWING);
        Self {
            store,
            root,
            size,
            margins: Insets::ZERO,
            active: None,
        }
    }

    /// The root layer of the drawing.
    #[must_use]
    pub fn root(&self) -> LayerId {
        self.root
    }

    /// The layer store holding the drawing's layers.
    #[must_use]
    pub fn store(&self) -> &LayerStore {
        &self.store
    }

    /// Mutable access to the layer store.
    ///
    /// Edits made here bypass active layer bookkeeping; the active layer is
    /// re-checked on every read, so a layer detached this way simply stops
    /// being reported as active. The next active layer change forgets it,
    /// so re-attaching it later does not reactivate it.
    pub fn store_mut(&mut self) -> &mut LayerStore {
        &mut self.store
    }

    // -- Geometry --

    /// The paper size.
    #[must_use]
    pub fn size(&self) -> Size {
        self.size
    }

    /// Sets the paper size.
    pub fn set_size(&mut self, size: Size) {
        self.size = size;
    }

    /// The margins between the paper edge and the interior.
    #[must_use]
    pub fn margins(&self) -> Insets {
        self.margins
    }

    /// Sets the margins.
    pub fn set_margins(&mut self, margins: Insets) {
        self.margins = margins;
    }

    /// The paper rectangle shrunk by the margins.
    #[must_use]
    pub fn interior(&self) -> Rect {
        self.size.to_rect() - self.margins
    }

    /// Clamps `point` to the [`interior`](Self::interior).
    #[must_use]
    pub fn pin_point_to_interior(&self, point: Point) -> Point {
        let interior = self.interior();
        Point::new(
            point.x.max(interior.x0).min(interior.x1),
            point.y.max(interior.y0).min(interior.y1),
        )
    }

    // -- Membership --

    /// Returns whether `id` is live and is the root or one of its
    /// descendants.
    #[must_use]
    pub fn contains(&self, id: LayerId) -> bool {
        self.store.is_alive(id) && (id == self.root || self.store.is_descendant_of(id, self.root))
    }

    /// Returns whether `id` could become the active layer right now.
    #[must_use]
    pub fn may_become_active(&self, id: LayerId) -> bool {
        self.contains(id) && Activatable.matches(&self.store, id)
    }

    // -- Active layer --

    /// The active layer, if any.
    #[must_use]
    pub fn active_layer(&self) -> Option<LayerId> {
        self.active.filter(|&id| self.contains(id))
    }

    /// The active layer if it is kind-of `class`.
    #[must_use]
    pub fn active_layer_of_class(&self, class: ClassId) -> Option<LayerId> {
        self.active_layer()
            .filter(|&id| KindOf(class).matches(&self.store, id))
    }

    /// The active layer if it is kind-of `K`.
    #[must_use]
    pub fn active_layer_of<K: LayerKind>(&self) -> Option<Typed<K>> {
        self.active_layer()
            .and_then(|id| self.store.downcast::<K>(id))
    }

    /// Makes `layer` the active layer, or clears it with `None`.
    ///
    /// Returns whether the active layer changed. A layer that is not in the
    /// drawing, or whose class is not activatable, is refused.
    pub fn set_active_layer(&mut self, layer: Option<LayerId>) -> bool {
        self.set_active_layer_with(layer, &mut Tracer::none())
    }

    /// Like [`set_active_layer`](Self::set_active_layer), reporting the
    /// change to `tracer`.
    pub fn set_active_layer_with(
        &mut self,
        layer: Option<LayerId>,
        tracer: &mut Tracer<'_>,
    ) -> bool {
        self.forget_detached_active();
        let previous = self.active;
        if layer == previous {
            return false;
        }
        if let Some(id) = layer
            && !self.may_become_active(id)
        {
            return false;
        }
        self.replace_active(previous, layer, tracer);
        true
    }

    /// Finds the first activatable layer kind-of `class`, searching all
    /// nested groups.
    #[must_use]
    pub fn first_activatable_layer(&self, class: ClassId) -> Option<LayerId> {
        self.store
            .first_layer(self.root, &KindOf(class).and(Activatable), true)
    }

    /// Typed form of
    /// [`first_activatable_layer`](Self::first_activatable_layer).
    #[must_use]
    pub fn first_activatable_layer_of<K: LayerKind>(&self) -> Option<Typed<K>> {
        let class = K::class_in(self.store.classes())?;
        self.first_activatable_layer(class)
            .and_then(|id| self.store.downcast::<K>(id))
    }

    // -- Layer management --

    /// Appends `layer` to the root and optionally makes it active.
    ///
    /// # Panics
    ///
    /// Panics under the same conditions as [`LayerStore::add_child`].
    pub fn add_layer(&mut self, layer: LayerId, activate: bool) {
        self.add_layer_with(layer, activate, &mut Tracer::none());
    }

    /// Like [`add_layer`](Self::add_layer), reporting an active layer change
    /// to `tracer`.
    pub fn add_layer_with(&mut self, layer: LayerId, activate: bool, tracer: &mut Tracer<'_>) {
        self.store.add_child(self.root, layer);
        if activate {
            self.set_active_layer_with(Some(layer), tracer);
        }
    }

    /// Detaches `layer` from the drawing and optionally activates another.
    ///
    /// If `activate_other` names an activatable layer, it becomes active.
    /// Otherwise, if the removed subtree held the active layer, the first
    /// remaining activatable layer of the removed layer's class becomes
    /// active, or none.
    ///
    /// The detached layer keeps its subtree and stays alive in the store.
    ///
    /// # Panics
    ///
    /// Panics if `layer` is the root or not in the drawing, or if
    /// `activate_other` is `Some(layer)`.
    pub fn remove_layer(&mut self, layer: LayerId, activate_other: Option<LayerId>) {
        self.remove_layer_with(layer, activate_other, &mut Tracer::none());
    }

    /// Like [`remove_layer`](Self::remove_layer), reporting an active layer
    /// change to `tracer`.
    pub fn remove_layer_with(
        &mut self,
        layer: LayerId,
        activate_other: Option<LayerId>,
        tracer: &mut Tracer<'_>,
    ) {
        assert!(layer != self.root, "cannot remove the drawing root");
        assert!(self.contains(layer), "layer is not in the drawing");
        assert!(
            activate_other != Some(layer),
            "cannot activate the layer being removed"
        );
        self.forget_detached_active();
        let previous = self.active;
        let held_active =
            previous.is_some_and(|a| a == layer || self.store.is_descendant_of(a, layer));
        let class = self.store.class(layer);

        self.store.remove_from_parent(layer);

        match activate_other {
            Some(other) if self.may_become_active(other) => {
                if Some(other) != previous {
                    self.replace_active(previous, Some(other), tracer);
                }
            }
            _ if held_active => {
                let next = self.first_activatable_layer(class);
                self.replace_active(previous, next, tracer);
            }
            _ => {}
        }
    }

    // -- Well-known layers --

    /// The first master grid layer in the drawing, if any.
    ///
    /// Grid layers whose class has [`master_grid`] unset are skipped.
    ///
    /// [`master_grid`]: crate::class::ClassInfo::master_grid
    #[must_use]
    pub fn grid_layer(&self) -> Option<Typed<Grid>> {
        self.store
            .first_layer(self.root, &MasterGrid, true)
            .and_then(|id| self.store.downcast::<Grid>(id))
    }

    /// The first guide layer in the drawing, if any.
    #[must_use]
    pub fn guide_layer(&self) -> Option<Typed<Guide>> {
        self.store.first_layer_of::<Guide>(self.root, true)
    }

    fn forget_detached_active(&mut self) {
        self.active = self.active_layer();
    }

    fn replace_active(
        &mut self,
        previous: Option<LayerId>,
        next: Option<LayerId>,
        tracer: &mut Tracer<'_>,
    ) {
        self.active = next;
        tracer.active_layer(&ActiveLayerEvent {
            previous,
            current: next,
        });
    }
}
