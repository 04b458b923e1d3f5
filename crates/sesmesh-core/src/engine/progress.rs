/// Progress events emitted while a surface is being computed.
///
/// A computation is a sequence of phases; a phase may contain one counted task
/// (for example, one increment per sampled z-slice).
#[derive(Debug, Clone, PartialEq)]
pub enum Progress {
    PhaseStart { name: &'static str },
    PhaseFinish,

    TaskStart { total_steps: u64 },
    TaskIncrement,
    TaskFinish,

    Message(String),
}

pub type ProgressCallback<'a> = Box<dyn Fn(Progress) + Send + Sync + 'a>;

/// Forwards [`Progress`] events to an optional callback.
///
/// The reporter is `Sync`, so worker threads may report increments directly.
#[derive(Default)]
pub struct ProgressReporter<'a> {
    callback: Option<ProgressCallback<'a>>,
}

impl<'a> ProgressReporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: ProgressCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    #[inline]
    pub fn report(&self, event: Progress) {
        if let Some(cb) = &self.callback {
            cb(event);
        }
    }

    /// Runs `f` between a `PhaseStart` and a `PhaseFinish` event.
    pub fn phase<T>(&self, name: &'static str, f: impl FnOnce() -> T) -> T {
        self.report(Progress::PhaseStart { name });
        let result = f();
        self.report(Progress::PhaseFinish);
        result
    }
}
