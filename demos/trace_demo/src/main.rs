// Copyright 2026 the Chronogrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Simulated editing session that exercises the tracing and diagnostics
//! pipeline.
//!
//! Builds a three-track sheet, applies a scripted series of edits, and after
//! each one brings a [`LayoutCache`] up to date while sending trace events to
//! both a [`PrettyPrintSink`] and a [`RecorderSink`]. Finally it writes the
//! last layout as JSON to `layout.json`.

use std::fs::File;
use std::io::BufWriter;

use chronogrid_core::config::{LayoutConfig, Strategy};
use chronogrid_core::sheet::Sheet;
use chronogrid_core::time::Millis;
use chronogrid_core::trace::{
    CacheHitEvent, OverlapNote, PassBeginEvent, PassEndEvent, TraceSink, Tracer,
};
use chronogrid_layout::{DamageRegion, LayoutCache};
use kurbo::Rect;

use chronogrid_debug::pretty::PrettyPrintSink;
use chronogrid_debug::recorder::{RecordedEvent, RecorderSink, decode};
use chronogrid_debug::snapshot::write_snapshot;

/// Forwards every event to two sinks.
struct Fanout<'a> {
    pretty: &'a mut PrettyPrintSink,
    recorder: &'a mut RecorderSink,
}

impl TraceSink for Fanout<'_> {
    fn on_pass_begin(&mut self, e: &PassBeginEvent) {
        self.pretty.on_pass_begin(e);
        self.recorder.on_pass_begin(e);
    }

    fn on_pass_end(&mut self, e: &PassEndEvent) {
        self.pretty.on_pass_end(e);
        self.recorder.on_pass_end(e);
    }

    fn on_cache_hit(&mut self, e: &CacheHitEvent) {
        self.pretty.on_cache_hit(e);
        self.recorder.on_cache_hit(e);
    }

    fn on_overlaps(&mut self, pass_index: u64, notes: &[OverlapNote]) {
        self.pretty.on_overlaps(pass_index, notes);
        self.recorder.on_overlaps(pass_index, notes);
    }

    fn on_damage_rects(&mut self, pass_index: u64, rects: &[Rect]) {
        self.pretty.on_damage_rects(pass_index, rects);
        self.recorder.on_damage_rects(pass_index, rects);
    }
}

fn main() {
    // -- sinks -------------------------------------------------------------
    let mut pretty = PrettyPrintSink::new(Box::new(std::io::stdout()));
    let mut recorder = RecorderSink::new();

    // -- sheet -------------------------------------------------------------
    let mut sheet = Sheet::new();
    let speaker = sheet.create_track();
    let gesture = sheet.create_track();
    let notes = sheet.create_track();

    let greeting = sheet.add_interval(speaker, Millis(0), Millis(1_200));
    let _ = sheet.add_interval(speaker, Millis(1_200), Millis(2_500));
    let _ = sheet.add_interval(gesture, Millis(300), Millis(900));
    let _ = sheet.add_interval(gesture, Millis(600), Millis(1_500)); // clashes
    let marker = sheet.add_interval(notes, Millis(1_200), Millis(1_200));
    let _ = sheet.drain_changes();

    let mut cache = LayoutCache::new(LayoutConfig::time_aligned());
    let mut total = DamageRegion::None;

    // -- scripted edits ----------------------------------------------------
    for step in 0..6 {
        match step {
            0 => {}
            1 => sheet.set_end(greeting, Millis(1_100)),
            2 => sheet.set_track_hidden(gesture, true),
            3 => {
                cache.set_config(LayoutConfig::ordinal());
                sheet.set_track_hidden(gesture, false);
            }
            4 => sheet.move_interval(marker, speaker),
            _ => sheet.set_times(marker, Millis(3_000), Millis(2_800)), // inverted
        }

        let changes = sheet.drain_changes();
        let mut fanout = Fanout {
            pretty: &mut pretty,
            recorder: &mut recorder,
        };
        let mut tracer = Tracer::new(&mut fanout);
        let damage = cache.damage_traced(&sheet, &changes, &mut tracer);
        // A second query at the same revision is served from the cache.
        cache.update_traced(&sheet, &mut tracer);
        total.merge(&damage);
    }

    let strategy = cache.config().strategy;
    assert_eq!(strategy, Strategy::Ordinal);
    println!(
        "[demo] passes={} flagged={} damage={total:?}",
        cache.pass_index(),
        cache.overlap_count(&sheet),
    );

    // -- recording summary --------------------------------------------------
    let passes = decode(recorder.as_bytes())
        .filter(|e| matches!(e, RecordedEvent::PassEnd(_)))
        .count();
    println!(
        "[demo] recorded {} bytes, {passes} pass-end events",
        recorder.as_bytes().len()
    );

    // -- snapshot ------------------------------------------------------------
    let path = "layout.json";
    let file = File::create(path).expect("failed to create layout.json");
    let mut writer = BufWriter::new(file);
    write_snapshot(&mut cache, &sheet, &mut writer).expect("failed to write snapshot");
    println!("[demo] wrote {path}");
}
