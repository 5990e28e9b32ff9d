// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chrome Trace Event Format export.
//!
//! Converts a [`RecorderSink`](crate::recorder::RecorderSink) recording into
//! JSON that can be loaded in `chrome://tracing` or Perfetto.
//!
//! Recordings carry no wall-clock time, so each event's `ts` is its sequence
//! number in microseconds. Every event is an instant event (`"ph": "i"`);
//! suspensions and captures go on one track per root lane.

use std::io::{self, Write};

use serde_json::{Value, json};
use thicket_core::lanes::Lanes;

use crate::recorder::RecordedEvent;

const PID: u32 = 1;

/// Track for events with no lane.
const TID_MISC: u32 = 0;

fn lane_track(lanes: Lanes) -> u32 {
    let lane = lanes.pick_one();
    if lane.is_empty() {
        TID_MISC
    } else {
        lane.0.trailing_zeros() + 1
    }
}

fn lanes_arg(lanes: Lanes) -> String {
    format!("{:#b}", lanes.0)
}

fn instant(name: &str, cat: &str, ts: usize, tid: u32, args: Value) -> Value {
    json!({
        "ph": "i",
        "name": name,
        "cat": cat,
        "ts": ts,
        "pid": PID,
        "tid": tid,
        "s": "t",
        "args": args,
    })
}

fn to_trace_event(ts: usize, event: &RecordedEvent) -> Value {
    match event {
        RecordedEvent::ComponentSuspended {
            node,
            name,
            wakeable,
            lanes,
        } => instant(
            name.as_deref().unwrap_or("suspended"),
            "suspend",
            ts,
            lane_track(*lanes),
            json!({
                "node": format!("{node:?}"),
                "wakeable": format!("{wakeable:?}"),
                "lanes": lanes_arg(*lanes),
            }),
        ),
        RecordedEvent::ComponentErrored { node, name, lanes } => instant(
            name.as_deref().unwrap_or("errored"),
            "error",
            ts,
            lane_track(*lanes),
            json!({
                "node": format!("{node:?}"),
                "lanes": lanes_arg(*lanes),
            }),
        ),
        RecordedEvent::DebugSuspended { node, name } => instant(
            name.as_deref().unwrap_or("Unknown"),
            "debug",
            ts,
            TID_MISC,
            json!({ "node": format!("{node:?}") }),
        ),
        RecordedEvent::Capture {
            boundary,
            source,
            kind,
            lanes,
        } => instant(
            kind.as_str(),
            "capture",
            ts,
            lane_track(*lanes),
            json!({
                "boundary": format!("{boundary:?}"),
                "source": format!("{source:?}"),
                "lanes": lanes_arg(*lanes),
            }),
        ),
        RecordedEvent::Warning { node, name, kind } => instant(
            name.as_deref().unwrap_or("warning"),
            "warning",
            ts,
            TID_MISC,
            json!({
                "node": format!("{node:?}"),
                "message": kind.message(),
            }),
        ),
        RecordedEvent::RestoreUpdaters { root, lanes } => instant(
            "restore-updaters",
            "updaters",
            ts,
            lane_track(*lanes),
            json!({
                "root": format!("{root:?}"),
                "lanes": lanes_arg(*lanes),
            }),
        ),
    }
}

/// Writes `events` as a Chrome Trace Event Format JSON array.
///
/// # Errors
///
/// Returns any I/O error from `writer`.
pub fn export(events: &[RecordedEvent], writer: &mut dyn Write) -> io::Result<()> {
    let trace: Vec<Value> = events
        .iter()
        .enumerate()
        .map(|(ts, event)| to_trace_event(ts, event))
        .collect();
    serde_json::to_writer_pretty(&mut *writer, &trace).map_err(io::Error::other)?;
    writeln!(writer)
}
