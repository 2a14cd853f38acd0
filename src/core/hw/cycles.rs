// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 itsakeyfut
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

//! EE cycle bookkeeping seen by the register bus
//!
//! The scheduler owns these counters; the bus only reads them, and in one
//! case (the INTC_STAT catch-up) moves `cycle` forward.

/// Slack, in cycles, the catch-up allows since the last event before it
/// skips ahead
pub const INTC_CATCHUP_SLACK: u32 = 8;

/// Cycle counters shared with the scheduler
///
/// All counters wrap; comparisons use wrapping differences.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleState {
    /// Current EE cycle
    pub cycle: u32,
    /// Cycle at which the next scheduled event fires
    pub next_event_cycle: u32,
    /// Cycle at which the last event was processed
    pub last_event_cycle: u32,
}

impl CycleState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Skip ahead to the next event if a polling loop is spinning on INTC_STAT
    ///
    /// Only moves forward: the signed distance to the next event must be
    /// positive, so a stale `next_event_cycle` never rewinds the clock.
    ///
    /// # Returns
    ///
    /// `true` if `cycle` was advanced
    pub fn intc_catch_up(&mut self) -> bool {
        let ahead = self.next_event_cycle.wrapping_sub(self.cycle) as i32;
        let since_last = self.cycle.wrapping_sub(self.last_event_cycle);

        if ahead > 0 && since_last > INTC_CATCHUP_SLACK {
            log::trace!(
                "INTC_STAT catch-up: cycle {} -> {}",
                self.cycle,
                self.next_event_cycle
            );
            self.cycle = self.next_event_cycle;
            return true;
        }
        false
    }
}
