use std::time::{Duration, Instant};

/// Frame-rate limiter: `tick()` blocks until at least one interval has passed
/// since the previous call. Late ticks are not made up for.
#[derive(Debug)]
pub struct FrameClock {
    interval: Duration,
    last: Option<Instant>,
}

impl FrameClock {
    pub fn new(interval: Duration) -> FrameClock {
        FrameClock { interval, last: None }
    }

    /// Sleeps out the rest of the current interval and returns the time
    /// since the previous tick (zero on the first call).
    pub fn tick(&mut self) -> Duration {
        let now = Instant::now();
        let elapsed = match self.last {
            Some(last) => {
                let since = now.duration_since(last);
                if since < self.interval {
                    std::thread::sleep(self.interval - since);
                }
                Instant::now().duration_since(last)
            }
            None => Duration::ZERO,
        };
        self.last = Some(Instant::now());
        elapsed
    }
}
