// Copyright 2026 the Chronogrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr).

use std::io::Write;

use chronogrid_core::trace::{CacheHitEvent, OverlapNote, PassBeginEvent, PassEndEvent, TraceSink};
use kurbo::Rect;

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

    /// Consumes the sink and returns its writer.
    #[must_use]
    pub fn into_writer(self) -> W {
        self.writer
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_pass_begin(&mut self, e: &PassBeginEvent) {
        let _ = writeln!(
            self.writer,
            "[pass:begin] pass={} rev={} strategy={} tracks={}",
            e.pass_index,
            e.revision,
            e.strategy.as_str(),
            e.visible_tracks,
        );
    }

    fn on_pass_end(&mut self, e: &PassEndEvent) {
        let _ = writeln!(
            self.writer,
            "[pass:end] pass={} rev={} records={} overlaps={} bands={} size={:.1}x{:.1}",
            e.pass_index,
            e.revision,
            e.records,
            e.overlaps,
            e.bands,
            e.content_width,
            e.content_height,
        );
    }

    fn on_cache_hit(&mut self, e: &CacheHitEvent) {
        let _ = writeln!(
            self.writer,
            "[cache:hit] pass={} rev={}",
            e.pass_index, e.revision,
        );
    }

    fn on_overlaps(&mut self, pass_index: u64, notes: &[OverlapNote]) {
        let _ = writeln!(
            self.writer,
            "[overlaps] pass={pass_index} count={}",
            notes.len(),
        );
        for note in notes {
            let _ = writeln!(
                self.writer,
                "  interval={} column={} kind={}",
                note.interval_index,
                note.column,
                note.kind.as_str(),
            );
        }
    }

    fn on_damage_rects(&mut self, pass_index: u64, rects: &[Rect]) {
        let _ = writeln!(
            self.writer,
            "[damage] pass={pass_index} rects={}",
            rects.len(),
        );
    }
}

#[cfg(test)]
mod tests {
    use chronogrid_core::config::{LayoutConfig, Strategy};
    use chronogrid_core::sheet::Sheet;
    use chronogrid_core::time::Millis;
    use chronogrid_core::trace::Tracer;
    use chronogrid_layout::LayoutCache;

    use super::*;

    #[test]
    fn pretty_print_pass_begin() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        sink.on_pass_begin(&PassBeginEvent {
            pass_index: 1,
            revision: 9,
            strategy: Strategy::Ordinal,
            visible_tracks: 2,
        });
        let output = String::from_utf8(sink.into_writer()).unwrap();
        assert!(output.contains("[pass:begin]"), "got: {output}");
        assert!(output.contains("strategy=ordinal"), "got: {output}");
    }

    #[test]
    fn traced_pass_prints_overlaps() {
        let mut sheet = Sheet::new();
        let t = sheet.create_track();
        let _ = sheet.add_interval(t, Millis(0), Millis(1000));
        let _ = sheet.add_interval(t, Millis(200), Millis(300));

        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        let mut cache = LayoutCache::new(LayoutConfig::time_aligned());
        {
            let mut tracer = Tracer::new(&mut sink);
            cache.update_traced(&sheet, &mut tracer);
            cache.update_traced(&sheet, &mut tracer);
        }
        let output = String::from_utf8(sink.into_writer()).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert!(lines[0].starts_with("[pass:begin] pass=1"), "got: {output}");
        assert!(lines[1].starts_with("[pass:end] pass=1"), "got: {output}");
        assert_eq!(lines[2], "[overlaps] pass=1 count=1");
        assert!(lines[3].contains("kind=clash"), "got: {output}");
        assert!(lines[4].starts_with("[cache:hit]"), "got: {output}");
    }
}
