// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layer tree data model and queries.
//!
//! A *layer* is a node in a drawing's layer tree. Each layer has:
//!
//! - An identity ([`LayerId`]): a generational handle that becomes stale when
//!   the layer is destroyed, preventing use-after-free bugs at the API level.
//! - A runtime class ([`ClassId`](crate::class::ClassId)). Layers whose class
//!   is kind-of [`GROUP`](crate::class::ClassId::GROUP) may own children.
//! - Topology: parent, first-child, and sibling links forming an ordered
//!   forest. Child order is front-to-back: the first child is the topmost.
//! - A [`name`](LayerStore::name) and [`flags`](LayerStore::flags).
//!
//! Layers are stored in struct-of-arrays layout with index-based handles
//! for cache-friendly traversal.
//!
//! # Queries
//!
//! [`LayerStore::layers`], [`LayerStore::first_layer`], and
//! [`LayerStore::flattened_layers`] search a subtree for layers matching a
//! [`Selector`]. Selectors are runtime predicates; the stock ones test class
//! membership ([`KindOf`], [`MemberOf`]), names ([`Named`]), or
//! activatability ([`Activatable`]), and any closure over
//! `(&LayerStore, LayerId)` works too.

mod id;
mod query;
mod select;
mod store;
mod traverse;

pub use id::LayerId;
pub use select::{
    Activatable, And, AnyLayer, KindOf, MasterGrid, MemberOf, Named, Not, Or, Selector, predicate,
};
pub use store::{LayerFlags, LayerStore};
pub use traverse::{Children, Descendants};
