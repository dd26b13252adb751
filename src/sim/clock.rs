/// A simulation clock that hands out step indices and their times.
///
/// # Examples
///
/// ```
/// use windfarm_sim::sim::clock::Clock;
///
/// let mut clock = Clock::new(3, 0.5);
/// let mut times = Vec::new();
///
/// clock.run(|_, time| times.push(time));
/// assert_eq!(times, vec![0.0, 0.5, 1.0]);
/// ```
pub struct Clock {
    /// Next step to hand out
    current: usize,
    /// Total steps to run
    total: usize,
    /// Time step (s)
    dt: f64,
}

impl Clock {
    /// Creates a clock running `total` steps of `dt` seconds, starting at t = 0.
    pub fn new(total: usize, dt: f64) -> Self {
        Self {
            current: 0,
            total,
            dt,
        }
    }

    /// Time at step `step`.
    pub fn time_at(&self, step: usize) -> f64 {
        step as f64 * self.dt
    }

    /// Advances the clock by one step.
    ///
    /// # Returns
    ///
    /// * `Some((step, time))` - The step handed out and its simulation time
    /// * `None` - If the clock has reached its total steps
    pub fn tick(&mut self) -> Option<(usize, f64)> {
        if self.current < self.total {
            let step = self.current;
            self.current += 1;
            Some((step, self.time_at(step)))
        } else {
            None
        }
    }

    /// Runs a function for each remaining step.
    pub fn run(&mut self, mut f: impl FnMut(usize, f64)) {
        while let Some((step, time)) = self.tick() {
            f(step, time);
        }
    }
}
