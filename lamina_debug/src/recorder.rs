// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory event recording.
//!
//! [`RecorderSink`] implements [`TraceSink`] and keeps every event it
//! receives, in order, for later inspection or [export](crate::json::export).

use lamina_core::trace::{ActiveLayerEvent, QueryEvent, TraceSink};

/// A single recorded event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecordedEvent {
    /// A completed query.
    Query(QueryEvent),
    /// An active layer change.
    ActiveLayer(ActiveLayerEvent),
}

/// A [`TraceSink`] that stores events in arrival order.
#[derive(Debug, Default)]
pub struct RecorderSink {
    events: Vec<RecordedEvent>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the recorded events.
    #[must_use]
    pub fn events(&self) -> &[RecordedEvent] {
        &self.events
    }

    /// Consumes the recorder and returns the recorded events.
    #[must_use]
    pub fn into_events(self) -> Vec<RecordedEvent> {
        self.events
    }

    /// Discards all recorded events.
    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Returns the recorded queries only.
    pub fn queries(&self) -> impl Iterator<Item = &QueryEvent> {
        self.events.iter().filter_map(|e| match e {
            RecordedEvent::Query(q) => Some(q),
            RecordedEvent::ActiveLayer(_) => None,
        })
    }
}

impl TraceSink for RecorderSink {
    fn on_query(&mut self, e: &QueryEvent) {
        self.events.push(RecordedEvent::Query(*e));
    }

    fn on_active_layer(&mut self, e: &ActiveLayerEvent) {
        self.events.push(RecordedEvent::ActiveLayer(*e));
    }
}

#[cfg(test)]
mod tests {
    use lamina_core::class::ClassId;
    use lamina_core::drawing::Drawing;
    use lamina_core::layer::AnyLayer;
    use lamina_core::trace::{QueryKind, Tracer};

    use super::*;

    #[test]
    fn records_drawing_session_in_order() {
        let mut drawing = Drawing::new(Default::default());
        let root = drawing.root();
        let guide = drawing.store_mut().create_layer(ClassId::GUIDE);

        let mut sink = RecorderSink::new();
        let mut tracer = Tracer::new(&mut sink);
        drawing.add_layer_with(guide, true, &mut tracer);
        let _ = drawing
            .store()
            .first_layer_with(root, &AnyLayer, true, &mut tracer);
        drop(tracer);

        let events = sink.events();
        assert_eq!(events.len(), 2);
        assert!(matches!(
            events[0],
            RecordedEvent::ActiveLayer(ActiveLayerEvent {
                previous: None,
                current: Some(id),
            }) if id == guide
        ));
        let queries: Vec<_> = sink.queries().collect();
        assert_eq!(queries.len(), 1);
        assert_eq!(queries[0].kind, QueryKind::FirstLayer);
        assert_eq!(queries[0].root, root);

        sink.clear();
        assert!(sink.events().is_empty());
    }
}
