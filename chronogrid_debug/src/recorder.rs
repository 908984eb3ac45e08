// Copyright 2026 the Chronogrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compact binary event recording and decoding.
//!
//! [`RecorderSink`] implements [`TraceSink`] and encodes events into a
//! `Vec<u8>` as fixed-size little-endian records. [`decode`] reads them back
//! as an iterator of [`RecordedEvent`]. `f64` fields are stored as their raw
//! bit patterns.
//!
//! Rich events ([`on_overlaps`](TraceSink::on_overlaps),
//! [`on_damage_rects`](TraceSink::on_damage_rects)) store only the count.

use chronogrid_core::config::Strategy;
use chronogrid_core::trace::{CacheHitEvent, OverlapNote, PassBeginEvent, PassEndEvent, TraceSink};
use kurbo::Rect;

// ---------------------------------------------------------------------------
// Event type discriminants
// ---------------------------------------------------------------------------

const TAG_PASS_BEGIN: u8 = 1;
const TAG_PASS_END: u8 = 2;
const TAG_CACHE_HIT: u8 = 3;
const TAG_OVERLAPS_COUNT: u8 = 4;
const TAG_DAMAGE_RECTS_COUNT: u8 = 5;

// ---------------------------------------------------------------------------
// RecorderSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that encodes events into a compact binary buffer.
#[derive(Debug, Default)]
pub struct RecorderSink {
    buf: Vec<u8>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a view of the recorded bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consumes the recorder and returns the recorded bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    // -- encoding helpers --------------------------------------------------

    fn write_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    fn write_u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_u64(&mut self, v: u64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_f64(&mut self, v: f64) {
        self.write_u64(v.to_bits());
    }

    fn write_strategy(&mut self, s: Strategy) {
        self.write_u8(match s {
            Strategy::TimeAligned => 0,
            Strategy::Ordinal => 1,
        });
    }

    fn write_count(&mut self, len: usize) {
        self.write_u32(u32::try_from(len).unwrap_or(u32::MAX));
    }
}

impl TraceSink for RecorderSink {
    fn on_pass_begin(&mut self, e: &PassBeginEvent) {
        self.write_u8(TAG_PASS_BEGIN);
        self.write_u64(e.pass_index);
        self.write_u64(e.revision);
        self.write_strategy(e.strategy);
        self.write_u32(e.visible_tracks);
    }

    fn on_pass_end(&mut self, e: &PassEndEvent) {
        self.write_u8(TAG_PASS_END);
        self.write_u64(e.pass_index);
        self.write_u64(e.revision);
        self.write_u32(e.records);
        self.write_u32(e.overlaps);
        self.write_u32(e.bands);
        self.write_f64(e.content_width);
        self.write_f64(e.content_height);
    }

    fn on_cache_hit(&mut self, e: &CacheHitEvent) {
        self.write_u8(TAG_CACHE_HIT);
        self.write_u64(e.pass_index);
        self.write_u64(e.revision);
    }

    fn on_overlaps(&mut self, pass_index: u64, notes: &[OverlapNote]) {
        self.write_u8(TAG_OVERLAPS_COUNT);
        self.write_u64(pass_index);
        self.write_count(notes.len());
    }

    fn on_damage_rects(&mut self, pass_index: u64, rects: &[Rect]) {
        self.write_u8(TAG_DAMAGE_RECTS_COUNT);
        self.write_u64(pass_index);
        self.write_count(rects.len());
    }
}

// ---------------------------------------------------------------------------
// Decoder
// ---------------------------------------------------------------------------

/// A decoded event from a binary recording.
#[derive(Clone, Debug)]
pub enum RecordedEvent {
    /// A [`PassBeginEvent`].
    PassBegin(PassBeginEvent),
    /// A [`PassEndEvent`].
    PassEnd(PassEndEvent),
    /// A [`CacheHitEvent`].
    CacheHit(CacheHitEvent),
    /// Flagged-interval count for a pass.
    OverlapsCount {
        /// Pass counter.
        pass_index: u64,
        /// Number of flagged intervals.
        count: u32,
    },
    /// Damage-rect count.
    DamageRectsCount {
        /// Pass counter of the layout the damage was computed against.
        pass_index: u64,
        /// Number of damage rects.
        count: u32,
    },
}

/// Decodes a byte slice produced by [`RecorderSink`] into an iterator of
/// [`RecordedEvent`].
pub fn decode(bytes: &[u8]) -> DecodeIter<'_> {
    DecodeIter {
        data: bytes,
        pos: 0,
    }
}

/// Iterator over decoded events.
#[derive(Debug)]
pub struct DecodeIter<'a> {
    data: &'a [u8],
    pos: usize,
}

impl DecodeIter<'_> {
    fn take<const N: usize>(&mut self) -> Option<[u8; N]> {
        let bytes = self.data.get(self.pos..self.pos + N)?.try_into().ok()?;
        self.pos += N;
        Some(bytes)
    }

    fn read_u8(&mut self) -> Option<u8> {
        self.take::<1>().map(|[b]| b)
    }

    fn read_u32(&mut self) -> Option<u32> {
        self.take().map(u32::from_le_bytes)
    }

    fn read_u64(&mut self) -> Option<u64> {
        self.take().map(u64::from_le_bytes)
    }

    fn read_f64(&mut self) -> Option<f64> {
        self.read_u64().map(f64::from_bits)
    }

    fn read_strategy(&mut self) -> Option<Strategy> {
        Some(match self.read_u8()? {
            0 => Strategy::TimeAligned,
            _ => Strategy::Ordinal,
        })
    }

    fn decode_pass_begin(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::PassBegin(PassBeginEvent {
            pass_index: self.read_u64()?,
            revision: self.read_u64()?,
            strategy: self.read_strategy()?,
            visible_tracks: self.read_u32()?,
        }))
    }

    fn decode_pass_end(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::PassEnd(PassEndEvent {
            pass_index: self.read_u64()?,
            revision: self.read_u64()?,
            records: self.read_u32()?,
            overlaps: self.read_u32()?,
            bands: self.read_u32()?,
            content_width: self.read_f64()?,
            content_height: self.read_f64()?,
        }))
    }

    fn decode_cache_hit(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::CacheHit(CacheHitEvent {
            pass_index: self.read_u64()?,
            revision: self.read_u64()?,
        }))
    }
}

impl Iterator for DecodeIter<'_> {
    type Item = RecordedEvent;

    fn next(&mut self) -> Option<Self::Item> {
        let tag = self.read_u8()?;
        match tag {
            TAG_PASS_BEGIN => self.decode_pass_begin(),
            TAG_PASS_END => self.decode_pass_end(),
            TAG_CACHE_HIT => self.decode_cache_hit(),
            TAG_OVERLAPS_COUNT => {
                let pass_index = self.read_u64()?;
                let count = self.read_u32()?;
                Some(RecordedEvent::OverlapsCount { pass_index, count })
            }
            TAG_DAMAGE_RECTS_COUNT => {
                let pass_index = self.read_u64()?;
                let count = self.read_u32()?;
                Some(RecordedEvent::DamageRectsCount { pass_index, count })
            }
            _ => None, // unknown tag → stop iteration
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use chronogrid_core::config::LayoutConfig;
    use chronogrid_core::sheet::Sheet;
    use chronogrid_core::time::Millis;
    use chronogrid_core::trace::Tracer;
    use chronogrid_layout::LayoutCache;

    use super::*;

    #[test]
    fn pass_end_keeps_fractional_bounds() {
        let mut rec = RecorderSink::new();
        rec.on_pass_end(&PassEndEvent {
            pass_index: 4,
            revision: 17,
            records: 3,
            overlaps: 1,
            bands: 5,
            content_width: 480.0,
            content_height: 123.456,
        });

        let events: Vec<_> = decode(rec.as_bytes()).collect();
        assert_eq!(events.len(), 1);
        match &events[0] {
            RecordedEvent::PassEnd(e) => {
                assert_eq!(e.pass_index, 4);
                assert_eq!(e.revision, 17);
                assert_eq!((e.records, e.overlaps, e.bands), (3, 1, 5));
                assert_eq!(e.content_width, 480.0);
                assert_eq!(e.content_height, 123.456);
            }
            other => panic!("expected PassEnd, got {other:?}"),
        }
    }

    #[test]
    fn records_a_full_session() {
        let mut sheet = Sheet::new();
        let t = sheet.create_track();
        let i = sheet.add_interval(t, Millis(500), Millis(100));
        let _ = sheet.drain_changes();

        let mut rec = RecorderSink::new();
        let mut cache = LayoutCache::new(LayoutConfig::ordinal());
        {
            let mut tracer = Tracer::new(&mut rec);
            cache.update_traced(&sheet, &mut tracer);
            cache.update_traced(&sheet, &mut tracer);
            sheet.set_end(i, Millis(900));
            let changes = sheet.drain_changes();
            let _ = cache.damage_traced(&sheet, &changes, &mut tracer);
        }

        let tags: Vec<&str> = decode(rec.as_bytes())
            .map(|e| match e {
                RecordedEvent::PassBegin(_) => "begin",
                RecordedEvent::PassEnd(_) => "end",
                RecordedEvent::CacheHit(_) => "hit",
                RecordedEvent::OverlapsCount { .. } => "overlaps",
                RecordedEvent::DamageRectsCount { .. } => "damage",
            })
            .collect();
        assert_eq!(
            tags,
            ["begin", "end", "overlaps", "hit", "begin", "end", "overlaps", "damage"]
        );

        let last_begin = decode(rec.as_bytes()).find_map(|e| match e {
            RecordedEvent::PassBegin(b) if b.pass_index == 2 => Some(b),
            _ => None,
        });
        assert_eq!(last_begin.map(|b| b.strategy), Some(Strategy::Ordinal));
    }

    #[test]
    fn truncated_input_stops_cleanly() {
        let mut rec = RecorderSink::new();
        rec.on_cache_hit(&CacheHitEvent {
            pass_index: 1,
            revision: 2,
        });
        let bytes = rec.into_bytes();
        assert_eq!(decode(&bytes[..bytes.len() - 1]).count(), 0);
        assert_eq!(decode(&[0xff]).count(), 0, "unknown tag");
    }
}
