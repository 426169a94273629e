// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! JSON exporter for recorded events.
//!
//! [`export`] writes the events held by a
//! [`RecorderSink`](super::recorder::RecorderSink) as a JSON array, one object
//! per event, tagged by a `"type"` field.

use std::io::{self, Write};

use serde_json::{Value, json};

use lamina_core::layer::LayerId;

use crate::recorder::RecordedEvent;

/// Exports recorded events as a JSON array.
///
/// Query events look like:
///
/// ```json
/// { "type": "query", "kind": "layers", "root": { "index": 0, "generation": 0 },
///   "deep": true, "include_groups": true, "visited": 4, "matched": 2 }
/// ```
///
/// Active layer events carry `"previous"` and `"current"` layers, `null`
/// when there was no active layer.
pub fn export(events: &[RecordedEvent], writer: &mut dyn Write) -> io::Result<()> {
    let values: Vec<Value> = events.iter().map(event_to_json).collect();
    serde_json::to_writer_pretty(writer, &values)?;
    Ok(())
}

fn event_to_json(event: &RecordedEvent) -> Value {
    match event {
        RecordedEvent::Query(e) => json!({
            "type": "query",
            "kind": e.kind.as_str(),
            "root": layer_to_json(e.root),
            "deep": e.deep,
            "include_groups": e.include_groups,
            "visited": e.visited,
            "matched": e.matched,
        }),
        RecordedEvent::ActiveLayer(e) => json!({
            "type": "active_layer",
            "previous": e.previous.map(layer_to_json),
            "current": e.current.map(layer_to_json),
        }),
    }
}

fn layer_to_json(id: LayerId) -> Value {
    json!({
        "index": id.index(),
        "generation": id.generation(),
    })
}
