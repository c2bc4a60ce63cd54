//! Live frame slot and render history
//!
//! The pipeline keeps exactly one decoded frame with its normalized cache, and a short
//! history of compressed renderings. Raw pixels never enter the history.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::image_pipeline::decode::Frame;
use crate::image_pipeline::encode::EncodedImage;
use crate::image_pipeline::normalize::NormalizedCache;

/// Exposure settings reported alongside a frame by the camera collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CaptureInfo {
    /// Seconds.
    pub exposure_time: f64,
    pub gain: Option<i32>,
    /// (x, y) binning factors.
    pub binning: (u32, u32),
}

impl Default for CaptureInfo {
    fn default() -> Self {
        Self {
            exposure_time: 0.0,
            gain: None,
            binning: (1, 1),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub thumbnail: EncodedImage,
    pub full_image: EncodedImage,
    pub timestamp: DateTime<Utc>,
    pub exposure_time: f64,
    pub gain: Option<i32>,
    pub binning: (u32, u32),
}

impl HistoryEntry {
    pub fn new(thumbnail: EncodedImage, full_image: EncodedImage, capture: CaptureInfo) -> Self {
        Self {
            thumbnail,
            full_image,
            timestamp: Utc::now(),
            exposure_time: capture.exposure_time,
            gain: capture.gain,
            binning: capture.binning,
        }
    }
}

/// FIFO of the most recent renderings.
#[derive(Debug, Clone)]
pub struct FrameHistory {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
}

impl FrameHistory {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Appends `entry`, evicting the oldest entries beyond capacity.
    pub fn push(&mut self, entry: HistoryEntry) {
        self.entries.push_back(entry);
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.back()
    }

    pub fn get(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }

    /// Oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// The decoded frame currently on display and the cache derived from it.
#[derive(Debug, Clone)]
pub struct LiveFrame {
    pub frame: Frame,
    pub cache: NormalizedCache,
}

impl LiveFrame {
    pub fn is_empty(&self) -> bool {
        self.frame.is_empty()
    }
}
