//! In-memory implementation of the engine capability traits.
//!
//! The adapter replays a scripted trajectory and parameter set instead of
//! decoding real resources. It exists for two audiences: the test suite,
//! which drives the io layer against it and observes lifecycle counters, and
//! authors of production bindings, who can read it as the minimal correct
//! realization of the capability contract. Counters and injected failures
//! are shared through `Rc`, matching the single-threaded cooperative model
//! of the streaming protocol.

use super::error::EngineError;
use super::options::StreamOptions;
use super::traits::{Engine, FrameRunner, InputSource, TrajectoryModule};
use crate::core::frame::Frame;
use crate::core::params::ParameterSet;
use std::cell::{Cell, RefCell};
use std::path::Path;
use std::rc::Rc;

#[derive(Default)]
struct EngineInner {
    frames: RefCell<Vec<Frame>>,
    parameters: RefCell<ParameterSet>,
    last_options: RefCell<Option<StreamOptions>>,

    fail_input_open: Cell<bool>,
    fail_runner_construction: Cell<bool>,
    fail_runner_initialize: Cell<bool>,
    fail_advance_after: Cell<Option<usize>>,
    skip_frame_cache: Cell<bool>,

    inputs_opened: Cell<usize>,
    modules_created: Cell<usize>,
    runners_created: Cell<usize>,
    runners_released: Cell<usize>,
}

/// Scripted engine adapter.
///
/// Clones share the same script and counters, so a test can hand one clone
/// to a handle and keep another for assertions.
#[derive(Clone, Default)]
pub struct MemoryEngine {
    inner: Rc<EngineInner>,
}

impl MemoryEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the scripted trajectory.
    pub fn with_frames(self, frames: Vec<Frame>) -> Self {
        self.inner.frames.replace(frames);
        self
    }

    /// Replaces the scripted run-input parameters.
    pub fn with_parameters(self, parameters: ParameterSet) -> Self {
        self.inner.parameters.replace(parameters);
        self
    }

    /// Makes the next and all following input opens fail.
    pub fn fail_input_open(&self) {
        self.inner.fail_input_open.set(true);
    }

    /// Makes runner construction fail.
    pub fn fail_runner_construction(&self) {
        self.inner.fail_runner_construction.set(true);
    }

    /// Makes runner initialization fail.
    pub fn fail_runner_initialize(&self) {
        self.inner.fail_runner_initialize.set(true);
    }

    /// Makes `advance` fail once `successes` frames have been produced.
    pub fn fail_advance_after(&self, successes: usize) {
        self.inner.fail_advance_after.set(Some(successes));
    }

    /// Violates the advance contract: report data without caching a frame.
    pub fn skip_frame_cache(&self) {
        self.inner.skip_frame_cache.set(true);
    }

    /// The options snapshot most recently passed to runner initialization.
    pub fn last_options(&self) -> Option<StreamOptions> {
        self.inner.last_options.borrow().clone()
    }

    pub fn inputs_opened(&self) -> usize {
        self.inner.inputs_opened.get()
    }

    pub fn modules_created(&self) -> usize {
        self.inner.modules_created.get()
    }

    pub fn runners_created(&self) -> usize {
        self.inner.runners_created.get()
    }

    pub fn runners_released(&self) -> usize {
        self.inner.runners_released.get()
    }
}

impl Engine for MemoryEngine {
    type Input = MemoryInput;
    type Module = MemoryModule;
    type Runner = MemoryRunner;

    fn open_input(&self, path: &Path) -> Result<Self::Input, EngineError> {
        if self.inner.fail_input_open.get() {
            return Err(EngineError::new(format!(
                "cannot open run input '{}'",
                path.display()
            )));
        }
        self.inner.inputs_opened.set(self.inner.inputs_opened.get() + 1);
        Ok(MemoryInput {
            parameters: self.inner.parameters.borrow().clone(),
        })
    }

    fn create_module(&self) -> Self::Module {
        self.inner
            .modules_created
            .set(self.inner.modules_created.get() + 1);
        MemoryModule {
            engine: Rc::clone(&self.inner),
            current: None,
        }
    }

    fn create_runner(&self) -> Result<Self::Runner, EngineError> {
        if self.inner.fail_runner_construction.get() {
            return Err(EngineError::new("engine refused to allocate a runner"));
        }
        self.inner
            .runners_created
            .set(self.inner.runners_created.get() + 1);
        Ok(MemoryRunner {
            engine: Rc::clone(&self.inner),
            cursor: 0,
            initialized: false,
            released: false,
        })
    }
}

/// Run-input resource backed by the engine's scripted parameters.
pub struct MemoryInput {
    parameters: ParameterSet,
}

impl InputSource for MemoryInput {
    fn read_parameters(&mut self) -> Result<ParameterSet, EngineError> {
        Ok(self.parameters.clone())
    }
}

/// Caching module holding the most recently advanced-to frame.
pub struct MemoryModule {
    engine: Rc<EngineInner>,
    current: Option<Frame>,
}

impl TrajectoryModule for MemoryModule {
    fn current_frame(&self) -> Option<Frame> {
        self.current.clone()
    }

    fn info(&self) -> String {
        format!(
            "in-memory trajectory module, {} scripted frame(s)",
            self.engine.frames.borrow().len()
        )
    }
}

/// Cursor-owning runner over the scripted trajectory.
pub struct MemoryRunner {
    engine: Rc<EngineInner>,
    cursor: usize,
    initialized: bool,
    released: bool,
}

impl FrameRunner<MemoryModule> for MemoryRunner {
    fn initialize(
        &mut self,
        _module: &mut MemoryModule,
        options: &StreamOptions,
    ) -> Result<(), EngineError> {
        if self.engine.fail_runner_initialize.get() {
            return Err(EngineError::new(format!(
                "cannot initialize runner for '{}'",
                options.path().display()
            )));
        }
        self.engine.last_options.replace(Some(options.clone()));
        self.initialized = true;
        Ok(())
    }

    fn advance(&mut self, module: &mut MemoryModule) -> Result<bool, EngineError> {
        if !self.initialized {
            return Err(EngineError::new("runner advanced before initialization"));
        }
        if let Some(limit) = self.engine.fail_advance_after.get() {
            if self.cursor >= limit {
                return Err(EngineError::new(format!(
                    "decode failure at frame {}",
                    self.cursor
                )));
            }
        }

        let frame = self.engine.frames.borrow().get(self.cursor).cloned();
        match frame {
            Some(frame) => {
                self.cursor += 1;
                if !self.engine.skip_frame_cache.get() {
                    module.current = Some(frame);
                }
                Ok(true)
            }
            // Exhausted. The previously cached frame stays queryable.
            None => Ok(false),
        }
    }

    fn release(&mut self, _module: &mut MemoryModule) {
        if !self.released {
            self.released = true;
            self.engine
                .runners_released
                .set(self.engine.runners_released.get() + 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;
    use std::path::Path;

    fn frames(count: usize) -> Vec<Frame> {
        (0..count)
            .map(|i| {
                Frame::new(
                    i as i64,
                    i as f64 * 2.0,
                    vec![Point3::new(i as f64, 0.0, 0.0)],
                )
            })
            .collect()
    }

    #[test]
    fn runner_walks_scripted_frames_and_caches_each() {
        let engine = MemoryEngine::new().with_frames(frames(2));
        let mut module = engine.create_module();
        let mut runner = engine.create_runner().unwrap();

        let options = StreamOptions::new("/data/run.trr");
        runner.initialize(&mut module, &options).unwrap();

        assert!(runner.advance(&mut module).unwrap());
        assert_eq!(module.current_frame().unwrap().step, 0);
        assert!(runner.advance(&mut module).unwrap());
        assert_eq!(module.current_frame().unwrap().step, 1);

        // Exhaustion leaves the last frame cached.
        assert!(!runner.advance(&mut module).unwrap());
        assert_eq!(module.current_frame().unwrap().step, 1);
    }

    #[test]
    fn release_counts_once_even_when_repeated() {
        let engine = MemoryEngine::new().with_frames(frames(1));
        let mut module = engine.create_module();
        let mut runner = engine.create_runner().unwrap();

        runner.release(&mut module);
        runner.release(&mut module);

        assert_eq!(engine.runners_released(), 1);
    }

    #[test]
    fn advance_before_initialize_is_an_engine_error() {
        let engine = MemoryEngine::new().with_frames(frames(1));
        let mut module = engine.create_module();
        let mut runner = engine.create_runner().unwrap();

        assert!(runner.advance(&mut module).is_err());
    }

    #[test]
    fn input_open_counts_and_failure_injection() {
        let engine = MemoryEngine::new();
        engine.open_input(Path::new("/data/topol.tpr")).unwrap();
        assert_eq!(engine.inputs_opened(), 1);

        engine.fail_input_open();
        assert!(engine.open_input(Path::new("/data/topol.tpr")).is_err());
        assert_eq!(engine.inputs_opened(), 1);
    }
}
