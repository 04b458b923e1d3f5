use indicatif::{ProgressBar, ProgressDrawTarget, ProgressState, ProgressStyle};
use sesmesh::engine::progress::{Progress, ProgressCallback};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::warn;

const SPINNER_TICK_MS: u64 = 80;

/// Renders core [`Progress`] events as a spinner per phase and a bar per task.
#[derive(Clone)]
pub struct CliProgressHandler {
    pb: Arc<Mutex<ProgressBar>>,
}

impl CliProgressHandler {
    pub fn new() -> Self {
        Self::with_draw_target(ProgressDrawTarget::stderr())
    }

    /// A handler that never draws, for quiet runs.
    pub fn hidden() -> Self {
        Self::with_draw_target(ProgressDrawTarget::hidden())
    }

    fn with_draw_target(target: ProgressDrawTarget) -> Self {
        let pb = ProgressBar::new(0)
            .with_style(Self::spinner_style())
            .with_message("Initializing...");
        pb.set_draw_target(target);
        pb.disable_steady_tick();
        pb.finish_and_clear();

        Self {
            pb: Arc::new(Mutex::new(pb)),
        }
    }

    pub fn get_callback(&self) -> ProgressCallback<'static> {
        let pb_clone = self.pb.clone();

        Box::new(move |progress: Progress| {
            let Ok(pb_guard) = pb_clone.lock() else {
                warn!("Progress bar mutex was poisoned. Cannot update progress.");
                return;
            };

            match progress {
                Progress::PhaseStart { name } => {
                    pb_guard.reset();
                    pb_guard.set_length(0);
                    pb_guard.set_style(Self::spinner_style());
                    pb_guard.enable_steady_tick(Duration::from_millis(SPINNER_TICK_MS));
                    pb_guard.set_message(name);
                }
                Progress::PhaseFinish => {
                    pb_guard.disable_steady_tick();
                    pb_guard.finish_with_message("✓ Done");
                }
                Progress::TaskStart { total_steps } => {
                    pb_guard.disable_steady_tick();
                    pb_guard.reset();
                    pb_guard.set_length(total_steps);
                    pb_guard.set_position(0);
                    pb_guard.set_style(Self::bar_style());
                }
                Progress::TaskIncrement => {
                    pb_guard.inc(1);
                }
                Progress::TaskFinish => {
                    let length = pb_guard.length().unwrap_or(0);
                    if pb_guard.position() < length {
                        pb_guard.set_position(length);
                    }
                    pb_guard.finish();
                }
                Progress::Message(msg) => {
                    if !pb_guard.is_finished() {
                        pb_guard.println(format!("  {}", msg));
                    } else {
                        pb_guard.set_message(msg);
                    }
                }
            }
        })
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::with_template("{msg:<30} [{bar:40.cyan/blue}] {pos}/{len} slices ({eta})")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .with_key(
                "eta",
                |state: &ProgressState, w: &mut dyn std::fmt::Write| {
                    let _ = write!(w, "{:.1}s", state.eta().as_secs_f64());
                },
            )
            .progress_chars("##-")
    }
}

impl Default for CliProgressHandler {
    fn default() -> Self {
        Self::new()
    }
}
