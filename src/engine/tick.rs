/// Session loop timing
///
/// Fixed timestep accumulator for the stage's 60 Hz simulation tick.
/// The scene update rate stays constant regardless of how often the
/// surrounding loop wakes up.
use std::time::{Duration, Instant};

/// Target simulation rate (60 ticks per second)
pub const TICK_RATE: f32 = 1.0 / 60.0;
const TICK_DURATION: Duration = Duration::from_micros(16_667); // ~1/60 second

/// Maximum catch-up ticks per frame to prevent spiral of death
const MAX_TICKS_PER_FRAME: u32 = 5;

/// Tick-rate tracking window (average over last N frames)
const RATE_WINDOW_SIZE: usize = 60;

/// Fixed-timestep loop state
pub struct TickLoop {
    /// Accumulated time not yet consumed by ticks
    accumulator: Duration,

    /// Time of last frame
    last_frame_time: Instant,

    /// Time when the session started
    start_time: Instant,

    /// Frame timing history for rate calculation
    frame_times: Vec<Duration>,

    /// Total ticks executed
    tick_count: u64,

    /// Current measured frames per second
    current_rate: f32,
}

impl TickLoop {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            accumulator: Duration::ZERO,
            last_frame_time: now,
            start_time: now,
            frame_times: Vec::with_capacity(RATE_WINDOW_SIZE),
            tick_count: 0,
            current_rate: 0.0,
        }
    }

    /// Begin a new frame, returning the number of fixed ticks to run
    pub fn begin_frame(&mut self) -> u32 {
        let now = Instant::now();
        let frame_time = now.duration_since(self.last_frame_time);
        self.last_frame_time = now;

        self.frame_times.push(frame_time);
        if self.frame_times.len() > RATE_WINDOW_SIZE {
            self.frame_times.remove(0);
            self.update_rate();
        }

        self.accumulator += frame_time;

        let mut ticks = 0;
        while self.accumulator >= TICK_DURATION && ticks < MAX_TICKS_PER_FRAME {
            self.accumulator -= TICK_DURATION;
            ticks += 1;
        }

        // Long stall: drop the surplus instead of bursting later
        if ticks == MAX_TICKS_PER_FRAME {
            self.accumulator = Duration::ZERO;
        }

        self.tick_count += ticks as u64;
        ticks
    }

    /// Fixed timestep in seconds
    pub fn timestep(&self) -> f32 {
        TICK_RATE
    }

    /// Total ticks executed so far
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Total elapsed session time
    pub fn elapsed(&self) -> Duration {
        Instant::now().duration_since(self.start_time)
    }

    /// Measured frame rate (0 until the window fills)
    pub fn rate(&self) -> f32 {
        self.current_rate
    }

    fn update_rate(&mut self) {
        if self.frame_times.is_empty() {
            self.current_rate = 0.0;
            return;
        }

        let total: Duration = self.frame_times.iter().sum();
        let avg = total / self.frame_times.len() as u32;
        self.current_rate = if avg.as_secs_f32() > 0.0 {
            1.0 / avg.as_secs_f32()
        } else {
            0.0
        };
    }
}

impl Default for TickLoop {
    fn default() -> Self {
        Self::new()
    }
}
