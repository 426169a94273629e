// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for layer queries.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that the
//! query engine and the drawing model call as they work. All method bodies
//! default to no-ops, so implementing only the events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing (zero overhead). When
//! **on**, each method performs a single `Option` branch before dispatching.
//!
//! Operations that emit events come in pairs: a plain form (for example
//! [`LayerStore::layers`](crate::layer::LayerStore::layers)) and a `_with`
//! form taking a `&mut Tracer<'_>`.

use crate::layer::LayerId;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Which query operation produced an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum QueryKind {
    /// Shallow or deep listing.
    Layers,
    /// First-match search.
    FirstLayer,
    /// Full flattening of a subtree.
    FlattenedLayers,
}

impl QueryKind {
    /// Returns a short label for log lines.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Layers => "layers",
            Self::FirstLayer => "first_layer",
            Self::FlattenedLayers => "flattened_layers",
        }
    }
}

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted once per completed query.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QueryEvent {
    /// Which operation ran.
    pub kind: QueryKind,
    /// The receiver of the query.
    pub root: LayerId,
    /// Whether nested groups were searched.
    pub deep: bool,
    /// Whether group layers were eligible for the result.
    pub include_groups: bool,
    /// Number of layers tested against the selector.
    pub visited: usize,
    /// Number of layers returned.
    pub matched: usize,
}

/// Emitted when a drawing's active layer changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActiveLayerEvent {
    /// The active layer before the change.
    pub previous: Option<LayerId>,
    /// The active layer after the change.
    pub current: Option<LayerId>,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from queries and drawings.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called when a query completes.
    fn on_query(&mut self, e: &QueryEvent) {
        _ = e;
    }

    /// Called when a drawing's active layer changes.
    fn on_active_layer(&mut self, e: &ActiveLayerEvent) {
        _ = e;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits a [`QueryEvent`].
    #[inline]
    pub fn query(&mut self, e: &QueryEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_query(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits an [`ActiveLayerEvent`].
    #[inline]
    pub fn active_layer(&mut self, e: &ActiveLayerEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_active_layer(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::LayerStore;

    fn sample_query(root: LayerId) -> QueryEvent {
        QueryEvent {
            kind: QueryKind::Layers,
            root,
            deep: true,
            include_groups: true,
            visited: 4,
            matched: 2,
        }
    }

    #[test]
    fn query_kind_labels() {
        assert_eq!(QueryKind::Layers.as_str(), "layers");
        assert_eq!(QueryKind::FirstLayer.as_str(), "first_layer");
        assert_eq!(QueryKind::FlattenedLayers.as_str(), "flattened_layers");
    }

    #[test]
    fn noop_sink_compiles() {
        let mut store = LayerStore::new();
        let root = store.create_group();
        let mut sink = NoopSink;
        sink.on_query(&sample_query(root));
        sink.on_active_layer(&ActiveLayerEvent {
            previous: None,
            current: Some(root),
        });
    }

    #[test]
    fn tracer_none_does_nothing() {
        let mut store = LayerStore::new();
        let root = store.create_group();
        let mut tracer = Tracer::none();
        tracer.query(&sample_query(root));
    }

    #[cfg(feature = "trace")]
    #[test]
    fn tracer_dispatches_to_sink() {
        use alloc::vec::Vec;

        struct RecordingSink {
            matched: Vec<usize>,
        }
        impl TraceSink for RecordingSink {
            fn on_query(&mut self, e: &QueryEvent) {
                self.matched.push(e.matched);
            }
        }

        let mut store = LayerStore::new();
        let root = store.create_group();
        let mut sink = RecordingSink {
            matched: Vec::new(),
        };
        let mut tracer = Tracer::new(&mut sink);
        tracer.query(&sample_query(root));
        // Access sink after tracer is dropped.
        drop(tracer);
        assert_eq!(sink.matched, &[2]);
    }
}
