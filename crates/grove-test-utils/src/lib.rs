//! Test utilities for grove development.
//!
//! Provides deterministic [`RandomSource`] implementations
//! ([`ScriptedRandom`], [`FixedRandom`]) and frame-loop helpers in
//! [`fixtures`].

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use std::collections::VecDeque;

use grove_core::RandomSource;

/// Replays a fixed script of draws.
///
/// Each call to [`range_int`](RandomSource::range_int) pops the next value
/// and clamps it into the requested range, so a script written for one
/// configuration never produces an out-of-range draw under another. Once
/// the script runs out every draw returns the range minimum.
#[derive(Clone, Debug, Default)]
pub struct ScriptedRandom {
    script: VecDeque<i32>,
    draws: usize,
}

impl ScriptedRandom {
    pub fn new(script: impl IntoIterator<Item = i32>) -> Self {
        Self {
            script: script.into_iter().collect(),
            draws: 0,
        }
    }

    /// Append more values to the script.
    pub fn push(&mut self, value: i32) {
        self.script.push_back(value);
    }

    /// Values not yet consumed.
    pub fn remaining(&self) -> usize {
        self.script.len()
    }

    /// Total draws taken, scripted or not.
    pub fn draws(&self) -> usize {
        self.draws
    }
}

impl RandomSource for ScriptedRandom {
    fn range_int(&mut self, min: i32, max_inclusive: i32) -> i32 {
        self.draws += 1;
        if max_inclusive <= min {
            self.script.pop_front();
            return min;
        }
        match self.script.pop_front() {
            Some(v) => v.clamp(min, max_inclusive),
            None => min,
        }
    }
}

/// Always draws the range minimum, or the maximum when built with
/// [`FixedRandom::max`].
#[derive(Clone, Copy, Debug, Default)]
pub struct FixedRandom {
    take_max: bool,
}

impl FixedRandom {
    pub fn min() -> Self {
        Self { take_max: false }
    }

    pub fn max() -> Self {
        Self { take_max: true }
    }
}

impl RandomSource for FixedRandom {
    fn range_int(&mut self, min: i32, max_inclusive: i32) -> i32 {
        if self.take_max && max_inclusive > min {
            max_inclusive
        } else {
            min
        }
    }
}
