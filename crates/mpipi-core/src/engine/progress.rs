/// Events emitted while a system is being built.
///
/// A build is a sequence of named phases. A phase may contain one counted
/// task (e.g. one step per chain) and any number of messages.
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

/// Forwards build events to an optional callback.
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

    /// Runs `body` between a start and a finish event for phase `name`.
    ///
    /// The finish event is sent even when `body` returns an error.
    pub fn phase<T>(&self, name: &'static str, body: impl FnOnce() -> T) -> T {
        self.report(Progress::PhaseStart { name });
        let result = body();
        self.report(Progress::PhaseFinish);
        result
    }

    /// Runs `step` once per item inside a counted task, stopping at the first error.
    pub fn task<I, E>(
        &self,
        items: impl ExactSizeIterator<Item = I>,
        mut step: impl FnMut(I) -> Result<(), E>,
    ) -> Result<(), E> {
        self.report(Progress::TaskStart {
            total_steps: items.len() as u64,
        });
        for item in items {
            step(item)?;
            self.report(Progress::TaskIncrement);
        }
        self.report(Progress::TaskFinish);
        Ok(())
    }

    pub fn message(&self, text: impl Into<String>) {
        self.report(Progress::Message(text.into()));
    }
}
