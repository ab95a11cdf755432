//! Headless runtime primitives for scenario execution.

use anyhow::{bail, Result};

/// Configuration for deterministic headless frame execution.
#[derive(Debug, Clone, Copy)]
pub struct HeadlessRunConfig {
    /// Logical viewport width used by the headless run.
    pub width: u32,
    /// Logical viewport height used by the headless run.
    pub height: u32,
    /// Number of frames to execute.
    pub max_frames: u32,
    /// Logical milliseconds between frames.
    pub tick_ms: u64,
}

impl Default for HeadlessRunConfig {
    fn default() -> Self {
        // Phone-sized viewport, below the navigation breakpoint
        Self {
            width: 390,
            height: 844,
            max_frames: 1,
            tick_ms: 16,
        }
    }
}

impl HeadlessRunConfig {
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            bail!("headless dimensions must be non-zero");
        }
        if self.max_frames == 0 {
            bail!("headless max_frames must be > 0");
        }
        if self.tick_ms == 0 {
            bail!("headless tick_ms must be > 0");
        }
        Ok(())
    }
}

/// Frame context passed to headless frame callbacks.
#[derive(Debug, Clone, Copy)]
pub struct HeadlessContext {
    pub frame_index: u32,
    pub width: u32,
    pub height: u32,
    pub elapsed_ms: u64,
}

/// Deterministic headless runtime loop.
pub struct HeadlessRuntime;

impl HeadlessRuntime {
    /// Run a fixed frame budget in headless mode.
    ///
    /// The callback returns `false` to stop early; the number of frames
    /// actually run is returned.
    pub fn run<F>(cfg: HeadlessRunConfig, mut on_frame: F) -> Result<u32>
    where
        F: FnMut(&HeadlessContext) -> bool,
    {
        cfg.validate()?;

        for frame in 0..cfg.max_frames {
            let elapsed_ms = cfg.tick_ms.saturating_mul(frame as u64 + 1);
            let keep_going = on_frame(&HeadlessContext {
                frame_index: frame,
                width: cfg.width,
                height: cfg.height,
                elapsed_ms,
            });
            if !keep_going {
                return Ok(frame + 1);
            }
        }

        Ok(cfg.max_frames)
    }
}

/// Frames needed to cover `wait_ms`, rounding up.
pub fn wait_frames(wait_ms: u64, tick_ms: u64) -> u32 {
    if wait_ms == 0 {
        return 0;
    }
    let tick = tick_ms.max(1);
    let frames = wait_ms.saturating_add(tick.saturating_sub(1)) / tick;
    frames.min(u32::MAX as u64) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runs_fixed_budget() {
        let cfg = HeadlessRunConfig {
            max_frames: 3,
            ..Default::default()
        };
        let mut seen = Vec::new();
        let ran = HeadlessRuntime::run(cfg, |ctx| {
            seen.push(ctx.elapsed_ms);
            true
        })
        .unwrap();
        assert_eq!(ran, 3);
        assert_eq!(seen, vec![16, 32, 48]);
    }

    #[test]
    fn test_stops_early() {
        let cfg = HeadlessRunConfig {
            max_frames: 10,
            ..Default::default()
        };
        let ran = HeadlessRuntime::run(cfg, |ctx| ctx.frame_index < 1).unwrap();
        assert_eq!(ran, 2);
    }

    #[test]
    fn test_rejects_zero_tick() {
        let cfg = HeadlessRunConfig {
            tick_ms: 0,
            ..Default::default()
        };
        assert!(HeadlessRuntime::run(cfg, |_| true).is_err());
    }

    #[test]
    fn test_wait_frames_rounds_up() {
        assert_eq!(wait_frames(0, 16), 0);
        assert_eq!(wait_frames(16, 16), 1);
        assert_eq!(wait_frames(17, 16), 2);
        assert_eq!(wait_frames(500, 16), 32);
    }
}
