// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layer tree and typed layer queries for drawing documents.
//!
//! `lamina_core` stores the layers of a drawing as an ordered tree of
//! heterogeneous nodes and answers "which layers of this kind live under this
//! group?" questions about it. It is `no_std` compatible (with `alloc`) and
//! uses array-based struct-of-arrays storage with generational index handles.
//!
//! # Architecture
//!
//! ```text
//!   ClassRegistry ──► LayerStore ──► layers / first_layer / flattened_layers
//!        ▲               ▲                     │
//!        │               │                     ▼
//!    LayerKind        Drawing            Tracer ──► TraceSink
//! ```
//!
//! **[`class`]**: runtime layer classes with single inheritance. Class tests
//! are registry walks, so every kind check is a plain boolean.
//!
//! **[`layer`]**: the struct-of-arrays layer tree, its traversal iterators,
//! [`Selector`](layer::Selector)s, and the three query operations.
//!
//! **[`kind`]**: Rust marker types for classes and [`Typed`](kind::Typed)
//! handles returned by the typed query forms.
//!
//! **[`drawing`]**: a drawing document with paper geometry and an active
//! layer, built on the queries.
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) trait and event types for
//! query instrumentation, with zero-overhead [`Tracer`](trace::Tracer)
//! wrapper.
//!
//! # Example
//!
//! ```
//! use lamina_core::class::ClassId;
//! use lamina_core::layer::{KindOf, LayerStore};
//!
//! let mut store = LayerStore::new();
//! let root = store.create_group();
//! let sketch = store.create_layer(ClassId::OBJECT_DRAWING);
//! let nested = store.create_group();
//! let grid = store.create_layer(ClassId::GRID);
//! store.add_child(root, sketch);
//! store.add_child(root, nested);
//! store.add_child(nested, grid);
//!
//! assert!(store.layers(root, &KindOf(ClassId::GRID), false).is_empty());
//! assert_eq!(store.layers(root, &KindOf(ClassId::GRID), true), [grid]);
//! assert_eq!(store.flattened_layers(root, &KindOf(ClassId::LAYER), false), [sketch, grid]);
//! ```
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod class;
pub mod drawing;
pub mod kind;
pub mod layer;
pub mod trace;
