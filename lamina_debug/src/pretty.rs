// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr). Write errors
//! are dropped: sink callbacks have no way to report them.

use std::io::Write;

use lamina_core::layer::LayerId;
use lamina_core::trace::{ActiveLayerEvent, QueryEvent, TraceSink};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the sink and returns the writer.
    #[must_use]
    pub fn into_writer(self) -> W {
        self.writer
    }
}

fn layer_label(id: Option<LayerId>) -> String {
    match id {
        Some(id) => format!("{}@{}", id.index(), id.generation()),
        None => "none".to_owned(),
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_query(&mut self, e: &QueryEvent) {
        let _ = writeln!(
            self.writer,
            "[query] {} root={} deep={} groups={} visited={} matched={}",
            e.kind.as_str(),
            layer_label(Some(e.root)),
            e.deep,
            e.include_groups,
            e.visited,
            e.matched,
        );
    }

    fn on_active_layer(&mut self, e: &ActiveLayerEvent) {
        let _ = writeln!(
            self.writer,
            "[active] {} -> {}",
            layer_label(e.previous),
            layer_label(e.current),
        );
    }
}

#[cfg(test)]
mod tests {
    use lamina_core::class::ClassId;
    use lamina_core::layer::{KindOf, LayerStore};
    use lamina_core::trace::Tracer;

    use super::*;

    #[test]
    fn pretty_print_query() {
        let mut store = LayerStore::new();
        let root = store.create_group();
        let grid = store.create_layer(ClassId::GRID);
        store.add_child(root, grid);

        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        let mut tracer = Tracer::new(&mut sink);
        let _ = store.layers_with(root, &KindOf(ClassId::GRID), true, &mut tracer);
        drop(tracer);

        let output = String::from_utf8(sink.into_writer()).unwrap();
        assert_eq!(
            output,
            "[query] layers root=0@0 deep=true groups=true visited=1 matched=1\n"
        );
    }

    #[test]
    fn pretty_print_active_layer() {
        let mut store = LayerStore::new();
        let layer = store.create_layer(ClassId::GUIDE);

        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        sink.on_active_layer(&ActiveLayerEvent {
            previous: None,
            current: Some(layer),
        });
        let output = String::from_utf8(sink.into_writer()).unwrap();
        assert!(output.starts_with("[active] none -> 0@0"), "got: {output}");
    }
}
