// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Typed layer handles.
//!
//! A [`LayerKind`] is a Rust marker type that names a layer class by its
//! registered name. The typed query methods on
//! [`LayerStore`](crate::layer::LayerStore) (`layers_of`, `first_layer_of`,
//! `flattened_layers_of`) resolve the name through the store's registry and
//! return [`Typed`] handles, which record that the layer was kind-of the
//! requested class when it was found.
//!
//! Applications add kinds for their own classes:
//!
//! ```
//! use lamina_core::class::ClassId;
//! use lamina_core::kind::LayerKind;
//! use lamina_core::layer::LayerStore;
//!
//! enum Annotation {}
//! impl LayerKind for Annotation {
//!     const NAME: &'static str = "AnnotationLayer";
//! }
//!
//! let mut store = LayerStore::new();
//! let class = store.classes_mut().register(Annotation::NAME, ClassId::OBJECT_DRAWING);
//! let root = store.create_group();
//! let notes = store.create_layer(class);
//! store.add_child(root, notes);
//!
//! let found = store.first_layer_of::<Annotation>(root, false);
//! assert_eq!(found.map(|t| t.id()), Some(notes));
//! ```

use core::fmt;
use core::hash::{Hash, Hasher};
use core::marker::PhantomData;

use crate::class::ClassRegistry;
use crate::layer::LayerId;

/// A marker type naming a layer class.
pub trait LayerKind {
    /// The registered class name.
    const NAME: &'static str;

    /// Resolves this kind in `classes`.
    ///
    /// Returns `None` when no class with [`NAME`](Self::NAME) is registered.
    #[must_use]
    fn class_in(classes: &ClassRegistry) -> Option<crate::class::ClassId> {
        classes.lookup(Self::NAME)
    }
}

macro_rules! builtin_kinds {
    ($($(#[$meta:meta])* $kind:ident => $name:literal;)*) => {
        $(
            $(#[$meta])*
            #[derive(Debug)]
            pub enum $kind {}

            impl LayerKind for $kind {
                const NAME: &'static str = $name;
            }
        )*
    };
}

builtin_kinds! {
    /// Any layer ([`ClassId::LAYER`](crate::class::ClassId::LAYER)).
    Layer => "Layer";
    /// Layer groups ([`ClassId::GROUP`](crate::class::ClassId::GROUP)).
    Group => "LayerGroup";
    /// Drawing roots ([`ClassId::DRAWING`](crate::class::ClassId::DRAWING)).
    DrawingRoot => "Drawing";
    /// Object owner layers ([`ClassId::OBJECT_OWNER`](crate::class::ClassId::OBJECT_OWNER)).
    ObjectOwner => "ObjectOwnerLayer";
    /// Drawable object layers ([`ClassId::OBJECT_DRAWING`](crate::class::ClassId::OBJECT_DRAWING)).
    ObjectDrawing => "ObjectDrawingLayer";
    /// Grid layers ([`ClassId::GRID`](crate::class::ClassId::GRID)).
    Grid => "GridLayer";
    /// Guide layers ([`ClassId::GUIDE`](crate::class::ClassId::GUIDE)).
    Guide => "GuideLayer";
    /// Image overlay layers ([`ClassId::IMAGE_OVERLAY`](crate::class::ClassId::IMAGE_OVERLAY)).
    ImageOverlay => "ImageOverlayLayer";
    /// Drawing info layers ([`ClassId::DRAWING_INFO`](crate::class::ClassId::DRAWING_INFO)).
    DrawingInfo => "DrawingInfoLayer";
}

/// A [`LayerId`] found by a query for kind `K`.
///
/// The class check happened when the handle was produced. Like any
/// [`LayerId`], the handle goes stale if the layer is destroyed.
pub struct Typed<K> {
    id: LayerId,
    _kind: PhantomData<fn() -> K>,
}

impl<K> Typed<K> {
    pub(crate) fn new(id: LayerId) -> Self {
        Self {
            id,
            _kind: PhantomData,
        }
    }

    /// Returns the untyped handle.
    #[inline]
    #[must_use]
    pub fn id(self) -> LayerId {
        self.id
    }
}

impl<K> Clone for Typed<K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K> Copy for Typed<K> {}

impl<K> PartialEq for Typed<K> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<K> Eq for Typed<K> {}

impl<K> Hash for Typed<K> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl<K: LayerKind> fmt::Debug for Typed<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Typed<{}>({:?})", K::NAME, self.id)
    }
}

impl<K> From<Typed<K>> for LayerId {
    fn from(typed: Typed<K>) -> Self {
        typed.id
    }
}
