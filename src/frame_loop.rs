/// Frame scheduling.
///
/// `run` calls the frame closure at a fixed interval until the loop's
/// `LoopHandle` is released.  The interval only paces wall time; each call
/// is one fixed simulation step.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::debug;

/// Cancel token for a running frame loop.  Clones share the same flag.
#[derive(Clone, Debug, Default)]
pub struct LoopHandle {
    released: Arc<AtomicBool>,
}

impl LoopHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop scheduling future frames.  Safe to call any number of times;
    /// returns `true` only for the call that actually released the loop.
    pub fn release(&self) -> bool {
        let first = !self.released.swap(true, Ordering::SeqCst);
        if first {
            debug!("frame loop released");
        }
        first
    }

    pub fn is_released(&self) -> bool {
        self.released.load(Ordering::SeqCst)
    }
}

pub fn run<F>(handle: &LoopHandle, interval: Duration, mut frame: F) -> std::io::Result<()>
where
    F: FnMut() -> std::io::Result<()>,
{
    while !handle.is_released() {
        let frame_start = Instant::now();
        frame()?;

        let elapsed = frame_start.elapsed();
        if elapsed < interval {
            std::thread::sleep(interval - elapsed);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn release_is_idempotent() {
        let handle = LoopHandle::new();
        let clone = handle.clone();
        assert!(!handle.is_released());
        assert!(clone.release());
        assert!(!handle.release());
        assert!(handle.is_released());
    }

    #[test]
    fn run_stops_once_released() {
        let handle = LoopHandle::new();
        let inner = handle.clone();
        let mut frames = 0;
        run(&handle, Duration::ZERO, || {
            frames += 1;
            if frames == 5 {
                inner.release();
            }
            Ok(())
        })
        .unwrap();
        assert_eq!(frames, 5);
    }

    #[test]
    fn run_never_calls_frame_on_released_handle() {
        let handle = LoopHandle::new();
        handle.release();
        let mut called = false;
        run(&handle, Duration::ZERO, || {
            called = true;
            Ok(())
        })
        .unwrap();
        assert!(!called);
    }

    #[test]
    fn run_propagates_frame_errors() {
        let handle = LoopHandle::new();
        let err = run(&handle, Duration::ZERO, || {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "boom"))
        })
        .unwrap_err();
        assert_eq!(err.to_string(), "boom");
    }
}
