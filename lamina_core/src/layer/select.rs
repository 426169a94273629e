// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layer selectors.
//!
//! A [`Selector`] is a runtime predicate over a layer. Every query takes one
//! and keeps only the layers it matches. Selectors never cast: class tests go
//! through the store's [`ClassRegistry`](crate::class::ClassRegistry), so a
//! selector naming a class with no instances simply matches nothing.

use crate::class::ClassId;

use super::id::LayerId;
use super::store::LayerStore;

/// A runtime predicate choosing which layers a query returns.
///
/// Implemented by the selector types in this module and by any closure
/// `Fn(&LayerStore, LayerId) -> bool` (see [`predicate`] for a helper that
/// pins down the closure signature).
pub trait Selector {
    /// Returns whether `id` is selected.
    fn matches(&self, store: &LayerStore, id: LayerId) -> bool;

    /// Selects layers matched by both `self` and `other`.
    fn and<S: Selector>(self, other: S) -> And<Self, S>
    where
        Self: Sized,
    {
        And(self, other)
    }

    /// Selects layers matched by `self`, `other`, or both.
    fn or<S: Selector>(self, other: S) -> Or<Self, S>
    where
        Self: Sized,
    {
        Or(self, other)
    }

    /// Selects layers not matched by `self`.
    fn not(self) -> Not<Self>
    where
        Self: Sized,
    {
        Not(self)
    }
}

impl<F> Selector for F
where
    F: Fn(&LayerStore, LayerId) -> bool,
{
    #[inline]
    fn matches(&self, store: &LayerStore, id: LayerId) -> bool {
        self(store, id)
    }
}

/// Identity helper that gives a closure the signature [`Selector`] expects.
///
/// ```
/// use lamina_core::layer::{LayerStore, Selector, predicate};
///
/// let unlocked = predicate(|store, id| !store.flags(id).locked);
/// let mut store = LayerStore::new();
/// let group = store.create_group();
/// assert!(unlocked.matches(&store, group));
/// ```
#[inline]
pub fn predicate<F>(f: F) -> F
where
    F: Fn(&LayerStore, LayerId) -> bool,
{
    f
}

/// Matches layers whose class is the given class or a subclass of it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KindOf(pub ClassId);

impl Selector for KindOf {
    #[inline]
    fn matches(&self, store: &LayerStore, id: LayerId) -> bool {
        store.is_kind_of(id, self.0)
    }
}

/// Matches layers whose class is exactly the given class.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MemberOf(pub ClassId);

impl Selector for MemberOf {
    #[inline]
    fn matches(&self, store: &LayerStore, id: LayerId) -> bool {
        store.class(id) == self.0
    }
}

/// Matches layers with the given name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Named<'a>(pub &'a str);

impl Selector for Named<'_> {
    #[inline]
    fn matches(&self, store: &LayerStore, id: LayerId) -> bool {
        store.name(id) == self.0
    }
}

/// Matches every layer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AnyLayer;

impl Selector for AnyLayer {
    #[inline]
    fn matches(&self, _store: &LayerStore, _id: LayerId) -> bool {
        true
    }
}

/// Matches layers whose class may become a drawing's active layer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Activatable;

impl Selector for Activatable {
    #[inline]
    fn matches(&self, store: &LayerStore, id: LayerId) -> bool {
        store.classes().info(store.class(id)).activatable()
    }
}

/// Matches grid layers whose class may serve as a drawing's master grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MasterGrid;

impl Selector for MasterGrid {
    #[inline]
    fn matches(&self, store: &LayerStore, id: LayerId) -> bool {
        let class = store.class(id);
        store.classes().is_kind_of(class, ClassId::GRID)
            && store.classes().info(class).master_grid()
    }
}

/// Conjunction of two selectors. Created by [`Selector::and`].
#[derive(Clone, Copy, Debug)]
pub struct And<A, B>(A, B);

impl<A: Selector, B: Selector> Selector for And<A, B> {
    #[inline]
    fn matches(&self, store: &LayerStore, id: LayerId) -> bool {
        self.0.matches(store, id) && self.1.matches(store, id)
    }
}

/// Disjunction of two selectors. Created by [`Selector::or`].
#[derive(Clone, Copy, Debug)]
pub struct Or<A, B>(A, B);

impl<A: Selector, B: Selector> Selector for Or<A, B> {
    #[inline]
    fn matches(&self, store: &LayerStore, id: LayerId) -> bool {
        self.0.matches(store, id) || self.1.matches(store, id)
    }
}

/// Negation of a selector. Created by [`Selector::not`].
#[derive(Clone, Copy, Debug)]
pub struct Not<A>(A);

impl<A: Selector> Selector for Not<A> {
    #[inline]
    fn matches(&self, store: &LayerStore, id: LayerId) -> bool {
        !self.0.matches(store, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::LayerFlags;

    #[test]
    fn kind_of_includes_subclasses_member_of_does_not() {
        let mut store = LayerStore::new();
        let owner = store.create_layer(ClassId::OBJECT_OWNER);
        let drawing = store.create_layer(ClassId::OBJECT_DRAWING);

        assert!(KindOf(ClassId::OBJECT_OWNER).matches(&store, owner));
        assert!(KindOf(ClassId::OBJECT_OWNER).matches(&store, drawing));
        assert!(MemberOf(ClassId::OBJECT_OWNER).matches(&store, owner));
        assert!(!MemberOf(ClassId::OBJECT_OWNER).matches(&store, drawing));
    }

    #[test]
    fn named_and_any() {
        let mut store = LayerStore::new();
        let id = store.create_named(ClassId::GUIDE, "Guides");
        assert!(Named("Guides").matches(&store, id));
        assert!(!Named("guides").matches(&store, id));
        assert!(AnyLayer.matches(&store, id));
    }

    #[test]
    fn activatable_follows_class() {
        let mut store = LayerStore::new();
        let grid = store.create_layer(ClassId::GRID);
        let guide = store.create_layer(ClassId::GUIDE);
        let group = store.create_group();
        assert!(!Activatable.matches(&store, grid));
        assert!(Activatable.matches(&store, guide));
        assert!(!Activatable.matches(&store, group));
    }

    #[test]
    fn master_grid_requires_grid_class() {
        let mut store = LayerStore::new();
        let plain = store.classes_mut().register("PlainGrid", ClassId::GRID);
        store.classes_mut().set_master_grid(plain, false);
        let grid = store.create_layer(ClassId::GRID);
        let other = store.create_layer(plain);
        let guide = store.create_layer(ClassId::GUIDE);
        assert!(MasterGrid.matches(&store, grid));
        assert!(!MasterGrid.matches(&store, other));
        assert!(!MasterGrid.matches(&store, guide));
    }

    #[test]
    fn combinators() {
        let mut store = LayerStore::new();
        let shown = store.create_layer(ClassId::OBJECT_DRAWING);
        let hidden = store.create_layer(ClassId::OBJECT_DRAWING);
        let grid = store.create_layer(ClassId::GRID);
        store.set_flags(
            hidden,
            LayerFlags {
                hidden: true,
                locked: false,
            },
        );

        let visible = predicate(|s, id| !s.flags(id).hidden);
        let visible_drawing = KindOf(ClassId::OBJECT_DRAWING).and(visible);
        assert!(visible_drawing.matches(&store, shown));
        assert!(!visible_drawing.matches(&store, hidden));
        assert!(!visible_drawing.matches(&store, grid));

        let grid_or_guide = KindOf(ClassId::GRID).or(KindOf(ClassId::GUIDE));
        assert!(grid_or_guide.matches(&store, grid));
        assert!(!grid_or_guide.matches(&store, shown));

        let not_grid = KindOf(ClassId::GRID).not();
        assert!(not_grid.matches(&store, shown));
        assert!(!not_grid.matches(&store, grid));
    }

    #[test]
    fn dyn_selector_is_usable() {
        let mut store = LayerStore::new();
        let id = store.create_layer(ClassId::GRID);
        let selectors: [&dyn Selector; 2] = [&KindOf(ClassId::GRID), &AnyLayer];
        assert!(selectors.iter().all(|s| s.matches(&store, id)));
    }
}
