use std::time::{Duration, Instant};

use log::debug;

/// Logs how long a scope took when it goes out of scope.
pub struct FunctionTimer {
    name: String,
    start: Instant,
}

impl FunctionTimer {
    pub fn new(name: impl Into<String>) -> Self {
        FunctionTimer {
            name: name.into(),
            start: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl Drop for FunctionTimer {
    fn drop(&mut self) {
        debug!("'{}' took {:?}", self.name, self.start.elapsed());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elapsed_grows() {
        let timer = FunctionTimer::new("sleepy");
        std::thread::sleep(Duration::from_millis(5));
        assert!(timer.elapsed() >= Duration::from_millis(5));
    }
}
