//! Polling system color scheme watcher
//!
//! Native desktops rarely offer a portable change notification for the
//! light/dark preference, so this source polls the detector on a background
//! thread and reports flips to its watchers.

use crate::platform::{detect_system_color_scheme, SchemeCallback, SchemeWatch, SystemScheme};
use crate::theme::ColorScheme;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Watcher configuration
#[derive(Clone, Debug)]
pub struct WatcherConfig {
    /// Time between detector queries
    pub poll_interval: Duration,
    /// Scheme detector, replaceable for testing
    pub detector: fn() -> ColorScheme,
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(2),
            detector: detect_system_color_scheme,
        }
    }
}

/// System scheme source that polls for changes
#[derive(Clone, Debug, Default)]
pub struct SystemSchemeWatcher {
    config: WatcherConfig,
}

impl SystemSchemeWatcher {
    pub fn new(config: WatcherConfig) -> Self {
        Self { config }
    }
}

impl SystemScheme for SystemSchemeWatcher {
    fn current(&self) -> ColorScheme {
        (self.config.detector)()
    }

    fn watch(&self, on_change: SchemeCallback) -> SchemeWatch {
        let stop = Arc::new(AtomicBool::new(false));
        let stop_flag = Arc::clone(&stop);
        let WatcherConfig {
            poll_interval,
            detector,
        } = self.config.clone();
        // Read before returning so flips after this call are reported
        let mut last = detector();

        let spawned = thread::Builder::new()
            .name("haspen-scheme-watcher".into())
            .spawn(move || {
                while !stop_flag.load(Ordering::Acquire) {
                    thread::sleep(poll_interval);
                    if stop_flag.load(Ordering::Acquire) {
                        break;
                    }
                    let scheme = detector();
                    if scheme != last {
                        tracing::debug!(from = %last, to = %scheme, "system color scheme flipped");
                        last = scheme;
                        on_change(scheme);
                    }
                }
                tracing::trace!("scheme watcher stopped");
            });

        match spawned {
            // The thread exits at its next wake-up after the flag is set
            Ok(_) => SchemeWatch::new(move || stop.store(true, Ordering::Release)),
            Err(e) => {
                tracing::warn!(error = %e, "failed to start scheme watcher thread");
                SchemeWatch::inert()
            }
        }
    }
}
