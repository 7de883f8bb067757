//! Termination signals.
//!
//! Closing the terminal window sends SIGHUP and `kill` sends SIGTERM. Both only set a
//! flag; the game loop polls it and leaves through the normal exit path, so the high
//! score is still written.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[cfg(unix)]
use signal_hook::consts::{SIGHUP, SIGTERM};

/// Set once a termination signal has arrived.
#[derive(Debug, Clone)]
pub struct ShutdownFlag(Arc<AtomicBool>);

impl ShutdownFlag {
    /// Replace the default action of SIGHUP and SIGTERM with setting this flag.
    pub fn install() -> io::Result<Self> {
        let flag = Arc::new(AtomicBool::new(false));
        #[cfg(unix)]
        for signal in [SIGHUP, SIGTERM] {
            signal_hook::flag::register(signal, Arc::clone(&flag))?;
        }
        Ok(Self(flag))
    }

    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}
