// Copyright 2025 John Brosnihan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Frame timing
//!
//! Hosts drive the simulation with the absolute timestamp of each rendered
//! frame. [`FrameClock`] turns that stream into per-frame deltas.

/// Converts absolute frame timestamps (seconds) into deltas
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameClock {
    last: Option<f64>,
}

impl FrameClock {
    /// Clock that has not seen a frame yet
    pub fn new() -> Self {
        FrameClock::default()
    }

    /// Seconds elapsed since the previous tick
    ///
    /// The first tick only records the timestamp and yields 0. A timestamp
    /// that is non-finite or earlier than the previous one also yields 0;
    /// a backwards jump becomes the new reference, a non-finite one is
    /// dropped.
    pub fn tick(&mut self, timestamp: f64) -> f64 {
        if !timestamp.is_finite() {
            log::warn!("ignoring non-finite frame timestamp {}", timestamp);
            return 0.0;
        }

        let dt = match self.last {
            Some(last) if timestamp >= last => timestamp - last,
            Some(last) => {
                log::warn!("frame timestamp went backwards ({} -> {})", last, timestamp);
                0.0
            }
            None => 0.0,
        };
        self.last = Some(timestamp);
        dt
    }

    /// Timestamp of the last accepted tick
    pub fn last_timestamp(&self) -> Option<f64> {
        self.last
    }

    /// Forget the previous timestamp; the next tick yields 0 again
    pub fn reset(&mut self) {
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_tick_is_zero() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.tick(100.0), 0.0);
        assert_eq!(clock.tick(100.5), 0.5);
        assert_eq!(clock.tick(101.0), 0.5);
    }

    #[test]
    fn test_backwards_and_nan_timestamps() {
        let mut clock = FrameClock::new();
        clock.tick(10.0);
        assert_eq!(clock.tick(f64::NAN), 0.0);
        assert_eq!(clock.last_timestamp(), Some(10.0));

        assert_eq!(clock.tick(4.0), 0.0);
        assert_eq!(clock.tick(4.25), 0.25);
    }

    #[test]
    fn test_reset() {
        let mut clock = FrameClock::new();
        clock.tick(1.0);
        clock.reset();
        assert_eq!(clock.tick(9.0), 0.0);
    }
}
