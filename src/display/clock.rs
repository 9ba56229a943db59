use std::time::{Duration, Instant};

use crate::platform::Clock;

/// Caps the loop at a fixed frame rate by sleeping out whatever is left of
/// each frame.
#[derive(Debug)]
pub struct FrameClock {
    started: Instant,
    frame_start: Instant,
    frame: Duration,
}

impl FrameClock {
    pub fn new(fps: u32) -> Self {
        let now = Instant::now();
        Self {
            started: now,
            frame_start: now,
            frame: Duration::from_secs(1) / fps.max(1),
        }
    }

    pub fn frame_duration(&self) -> Duration {
        self.frame
    }
}

impl Clock for FrameClock {
    fn wait_for_next_frame(&mut self) {
        let elapsed = self.frame_start.elapsed();
        if elapsed < self.frame {
            std::thread::sleep(self.frame - elapsed);
        }
        self.frame_start = Instant::now();
    }

    fn ticks_ms(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }
}
