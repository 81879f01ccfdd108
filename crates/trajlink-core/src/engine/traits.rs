use super::error::EngineError;
use super::options::StreamOptions;
use crate::core::frame::Frame;
use crate::core::params::ParameterSet;
use std::path::Path;

/// An opened run-input resource on the engine side of the boundary.
///
/// Instances are created by [`Engine::open_input`] and live only for the
/// duration of one scoped acquisition; the handle layer drops them on
/// release and asks the engine for a fresh one on the next access.
pub trait InputSource {
    /// Decodes the full parameter mapping from the resource.
    ///
    /// # Errors
    ///
    /// Returns an opaque engine error if the resource cannot be decoded.
    fn read_parameters(&mut self) -> Result<ParameterSet, EngineError>;
}

/// The engine's caching analysis module for one trajectory resource.
///
/// A module is long-lived and reusable: it holds the most recently produced
/// frame and whatever analysis state the engine keeps, independent of any
/// particular scan. It owns no cursor; advancing is the runner's job.
pub trait TrajectoryModule {
    /// The frame cached by the most recent successful runner advance.
    ///
    /// Returns `None` before the first advance. The cached frame stays
    /// queryable until the next advance replaces it, including after the
    /// runner that produced it has been released.
    fn current_frame(&self) -> Option<Frame>;

    /// A short self-description for diagnostics. Optional; defaults to an
    /// empty string.
    fn info(&self) -> String {
        String::new()
    }
}

/// A short-lived driver that advances a caching module through a trajectory.
///
/// One runner serves exactly one stream: it is constructed fresh per scan,
/// initialized once, advanced until exhaustion or abandonment, and then
/// released. The module is passed into every call rather than captured at
/// construction, so exclusive attachment is visible in the signatures.
pub trait FrameRunner<M: TrajectoryModule> {
    /// Binds the runner to the module and applies the options snapshot.
    ///
    /// Called exactly once, before the first advance.
    ///
    /// # Errors
    ///
    /// Returns an opaque engine error if the resource cannot be opened or
    /// the selection cannot be compiled; the stream then fails before
    /// yielding anything.
    fn initialize(&mut self, module: &mut M, options: &StreamOptions) -> Result<(), EngineError>;

    /// Advances by one frame.
    ///
    /// On `Ok(true)` the module's current-frame state has been fully
    /// populated before this call returned; `Ok(false)` signals that the
    /// trajectory is exhausted and no frame was produced.
    ///
    /// # Errors
    ///
    /// Returns an opaque engine error on decode or analysis failure; the
    /// runner must not be advanced again afterwards.
    fn advance(&mut self, module: &mut M) -> Result<bool, EngineError>;

    /// Releases engine resources held by the runner.
    ///
    /// Called exactly once on every stream exit path, including early
    /// abandonment and error propagation. Must be tolerant of a runner that
    /// was never initialized.
    fn release(&mut self, module: &mut M);
}

/// The complete capability surface a native engine binding must provide.
pub trait Engine {
    type Input: InputSource;
    type Module: TrajectoryModule;
    type Runner: FrameRunner<Self::Module>;

    /// Opens a run-input resource for parameter reading.
    ///
    /// # Errors
    ///
    /// Returns an opaque engine error if the resource is missing or cannot
    /// be decoded.
    fn open_input(&self, path: &Path) -> Result<Self::Input, EngineError>;

    /// Constructs a fresh caching module, bound to no runner.
    fn create_module(&self) -> Self::Module;

    /// Constructs a fresh runner for one scan.
    ///
    /// # Errors
    ///
    /// Returns an opaque engine error if the engine cannot allocate a
    /// runner; the requesting stream fails fast without yielding.
    fn create_runner(&self) -> Result<Self::Runner, EngineError>;
}
