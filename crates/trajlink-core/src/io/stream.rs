use super::error::{Error, Result};
use crate::core::frame::Frame;
use crate::engine::options::StreamOptions;
use crate::engine::traits::{Engine, FrameRunner, TrajectoryModule};
use tracing::{debug, trace};

/// Lifecycle of one scan over a trajectory resource.
///
/// The stream is constructed cold and only builds its runner on the first
/// pull; `Exhausted` is the normal terminal state, `Released` the terminal
/// state of every other exit (close, drop, error).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StreamState {
    Unstarted,
    Initialized,
    Streaming,
    Exhausted,
    Released,
}

/// Pull-based frame iterator over a trajectory resource.
///
/// A `FrameStream` mediates between caller demand and the engine's
/// push-based frame production: each `next()` advances the runner by exactly
/// one frame and reads the result out of the caching module. No work happens
/// between pulls.
///
/// The stream borrows the handle's caching module exclusively for its
/// lifetime, so a second simultaneous stream over the same handle is
/// rejected at compile time. The runner is created lazily on the first pull
/// and released exactly once on every exit path: exhaustion, an engine
/// failure, an explicit [`close`](FrameStream::close), or dropping the
/// stream mid-scan.
pub struct FrameStream<'a, E: Engine> {
    engine: &'a E,
    module: &'a mut E::Module,
    options: StreamOptions,
    runner: Option<E::Runner>,
    state: StreamState,
}

impl<'a, E: Engine> FrameStream<'a, E> {
    pub(crate) fn new(engine: &'a E, module: &'a mut E::Module, options: StreamOptions) -> Self {
        Self {
            engine,
            module,
            options,
            runner: None,
            state: StreamState::Unstarted,
        }
    }

    /// The options snapshot this stream was built with.
    pub fn options(&self) -> &StreamOptions {
        &self.options
    }

    /// Whether the stream has finished, normally or otherwise.
    pub fn is_terminated(&self) -> bool {
        matches!(self.state, StreamState::Exhausted | StreamState::Released)
    }

    /// Releases the runner and terminates the stream early.
    ///
    /// Idempotent; dropping the stream has the same effect. Pulling after a
    /// close returns `None`.
    pub fn close(&mut self) {
        self.release_runner();
        if self.state != StreamState::Exhausted {
            self.state = StreamState::Released;
        }
    }

    fn release_runner(&mut self) {
        if let Some(mut runner) = self.runner.take() {
            runner.release(self.module);
            trace!("released frame stream runner");
        }
    }

    /// First-pull setup: construct a fresh runner and initialize it against
    /// the module and the options snapshot. Fails fast without yielding
    /// anything; a runner that was constructed but failed to initialize is
    /// still released.
    fn start(&mut self) -> Result<()> {
        let mut runner = self.engine.create_runner()?;
        if let Err(err) = runner.initialize(self.module, &self.options) {
            runner.release(self.module);
            return Err(err.into());
        }
        self.runner = Some(runner);
        self.state = StreamState::Initialized;
        debug!(path = %self.options.path().display(), "frame stream initialized");
        Ok(())
    }

    fn pull(&mut self) -> Result<Option<Frame>> {
        if self.state == StreamState::Unstarted {
            self.start()?;
        }
        let runner = self
            .runner
            .as_mut()
            .ok_or_else(|| Error::Api("frame stream advanced without an active runner".to_string()))?;

        match runner.advance(self.module) {
            Ok(true) => {
                self.state = StreamState::Streaming;
                // The advance contract: success means the module's
                // current-frame state is already populated.
                let frame = self.module.current_frame().ok_or_else(|| {
                    Error::Api("runner reported a frame but the module cached none".to_string())
                })?;
                trace!(step = frame.step, "yielding frame");
                Ok(Some(frame))
            }
            Ok(false) => {
                self.release_runner();
                self.state = StreamState::Exhausted;
                debug!(path = %self.options.path().display(), "frame stream exhausted");
                Ok(None)
            }
            Err(err) => Err(err.into()),
        }
    }
}

impl<E: Engine> Iterator for FrameStream<'_, E> {
    type Item = Result<Frame>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.is_terminated() {
            return None;
        }
        match self.pull() {
            Ok(Some(frame)) => Some(Ok(frame)),
            Ok(None) => None,
            Err(err) => {
                // Fail-fast: surface the error once, with the runner already
                // released and the stream terminated.
                self.release_runner();
                self.state = StreamState::Released;
                Some(Err(err))
            }
        }
    }
}

impl<E: Engine> Drop for FrameStream<'_, E> {
    fn drop(&mut self) {
        self.release_runner();
    }
}
