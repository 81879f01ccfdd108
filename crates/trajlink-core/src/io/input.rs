use super::AccessMode;
use super::error::{Error, Result};
use crate::core::params::ParameterSet;
use crate::engine::traits::{Engine, InputSource};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Handle to a simulation run-input file.
///
/// The handle itself is cheap: opening it validates the path and access mode
/// but touches no engine resource. The underlying resource is opened only
/// for the duration of a scoped [`acquire`](RunInputFile::acquire), and
/// nothing is cached between acquisitions.
pub struct RunInputFile<E: Engine> {
    engine: E,
    path: PathBuf,
    mode: AccessMode,
    source: Option<E::Input>,
}

impl<E: Engine> RunInputFile<E> {
    /// Opens a run-input file for read-only access.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::Usage`] when `path` is empty or `mode` is
    /// anything other than [`AccessMode::Read`]; no engine object is
    /// constructed in either case.
    pub fn open(engine: E, path: impl AsRef<Path>, mode: AccessMode) -> Result<Self> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(Error::Usage(
                "run input handles must be associated with a file".to_string(),
            ));
        }
        if mode != AccessMode::Read {
            return Err(Error::Usage(
                "run input files only support read-only access".to_string(),
            ));
        }
        debug!(path = %path.display(), "opened run input handle");
        Ok(Self {
            engine,
            path: path.to_path_buf(),
            mode,
            source: None,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn mode(&self) -> AccessMode {
        self.mode
    }

    /// Whether an engine resource is currently held.
    pub fn is_acquired(&self) -> bool {
        self.source.is_some()
    }

    /// Opens the underlying engine resource for the duration of the guard.
    ///
    /// Dropping the guard releases the resource; a later acquisition opens
    /// it again from scratch.
    ///
    /// # Errors
    ///
    /// Passes through the engine's opaque failure when the resource cannot
    /// be opened.
    pub fn acquire(&mut self) -> Result<InputGuard<'_, E>> {
        let source = self.engine.open_input(&self.path)?;
        self.source = Some(source);
        trace!(path = %self.path.display(), "acquired run input resource");
        Ok(InputGuard { handle: self })
    }

    /// Releases the underlying engine resource. A no-op when nothing is
    /// held, so releasing twice is safe.
    pub fn close(&mut self) {
        if self.source.take().is_some() {
            trace!(path = %self.path.display(), "released run input resource");
        }
    }
}

impl<E: Engine> fmt::Display for RunInputFile<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RunInputFile('{}', '{}')", self.path.display(), self.mode)
    }
}

impl<E: Engine> fmt::Debug for RunInputFile<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunInputFile")
            .field("path", &self.path)
            .field("mode", &self.mode)
            .field("acquired", &self.source.is_some())
            .finish()
    }
}

/// Scoped acquisition of a run-input resource.
///
/// Holds the handle's underlying engine resource open; dropping the guard
/// releases it deterministically on every exit path.
pub struct InputGuard<'a, E: Engine> {
    handle: &'a mut RunInputFile<E>,
}

impl<E: Engine> InputGuard<'_, E> {
    /// Reads the full parameter mapping through the acquired resource.
    ///
    /// # Errors
    ///
    /// [`Error::Api`] if the guard holds no open resource (an internal
    /// contract breach, unreachable through the public API), or the engine's
    /// opaque failure when decoding fails.
    pub fn parameters(&mut self) -> Result<ParameterSet> {
        let source = self
            .handle
            .source
            .as_mut()
            .ok_or_else(|| Error::Api("input guard holds no open resource".to_string()))?;
        Ok(source.read_parameters()?)
    }
}

impl<E: Engine> Drop for InputGuard<'_, E> {
    fn drop(&mut self) {
        self.handle.close();
    }
}

/// Simulation input read from a run-input file.
///
/// The interesting surface hangs off [`output`](SimulationInput::output),
/// mirroring the output-port shape of a simulation work graph node.
pub struct SimulationInput<E: Engine> {
    handle: RunInputFile<E>,
}

impl<E: Engine> SimulationInput<E> {
    pub fn from_handle(handle: RunInputFile<E>) -> Self {
        Self { handle }
    }

    /// Access the output ports of the simulation input.
    pub fn output(&mut self) -> OutputPorts<'_, E> {
        OutputPorts {
            handle: &mut self.handle,
        }
    }
}

/// The output ports of a [`SimulationInput`].
pub struct OutputPorts<'a, E: Engine> {
    handle: &'a mut RunInputFile<E>,
}

impl<E: Engine> OutputPorts<'_, E> {
    /// Reads the simulation parameters.
    ///
    /// Every call performs a fresh scoped acquisition of the underlying
    /// resource; nothing is cached between reads, so concurrent file
    /// replacement is observed on the next access.
    ///
    /// # Errors
    ///
    /// Passes through the engine's opaque failure when the resource cannot
    /// be opened or decoded.
    pub fn parameters(&mut self) -> Result<ParameterSet> {
        let mut guard = self.handle.acquire()?;
        guard.parameters()
    }

    /// Atomic structure details. Not yet built.
    pub fn structure(&self) -> Result<()> {
        Err(Error::FeatureNotAvailable("structure output port"))
    }

    /// Molecular force field details. Not yet built.
    pub fn topology(&self) -> Result<()> {
        Err(Error::FeatureNotAvailable("topology output port"))
    }

    /// Simulation state information. Not yet built.
    pub fn state(&self) -> Result<()> {
        Err(Error::FeatureNotAvailable("state output port"))
    }
}

/// Either an already-open handle or a path to coerce into one.
///
/// [`read_input`] accepts both shapes through `Into`, so callers can pass a
/// previously opened [`RunInputFile`] or anything path-like.
pub enum InputResource<E: Engine> {
    Handle(RunInputFile<E>),
    Path(PathBuf),
}

impl<E: Engine> From<RunInputFile<E>> for InputResource<E> {
    fn from(handle: RunInputFile<E>) -> Self {
        Self::Handle(handle)
    }
}

impl<E: Engine> From<&str> for InputResource<E> {
    fn from(path: &str) -> Self {
        Self::Path(PathBuf::from(path))
    }
}

impl<E: Engine> From<String> for InputResource<E> {
    fn from(path: String) -> Self {
        Self::Path(PathBuf::from(path))
    }
}

impl<E: Engine> From<&Path> for InputResource<E> {
    fn from(path: &Path) -> Self {
        Self::Path(path.to_path_buf())
    }
}

impl<E: Engine> From<PathBuf> for InputResource<E> {
    fn from(path: PathBuf) -> Self {
        Self::Path(path)
    }
}

/// Gets a simulation input object from a run-input resource.
///
/// `resource` may be an existing [`RunInputFile`] or anything path-shaped;
/// a raw path is coerced into a fresh read-only handle using `engine`. Any
/// coercion or construction failure is normalized to a single usage error
/// rather than leaking the underlying cause.
///
/// # Errors
///
/// [`Error::Usage`] when no usable resource or path was supplied.
pub fn read_input<E: Engine>(
    engine: E,
    resource: impl Into<InputResource<E>>,
) -> Result<SimulationInput<E>> {
    let handle = match resource.into() {
        InputResource::Handle(handle) => handle,
        InputResource::Path(path) => RunInputFile::open(engine, &path, AccessMode::Read)
            .map_err(|_| {
                Error::Usage("a run input resource or file path is required".to_string())
            })?,
    };
    Ok(SimulationInput::from_handle(handle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::memory::MemoryEngine;

    fn engine_with_params() -> MemoryEngine {
        let mut params = ParameterSet::new();
        params.insert("init-step", 0i64);
        params.insert("dt", 0.002);
        MemoryEngine::new().with_parameters(params)
    }

    #[test]
    fn open_rejects_write_mode_without_touching_the_engine() {
        let engine = MemoryEngine::new();
        let result = RunInputFile::open(engine.clone(), "/data/topol.tpr", AccessMode::Write);

        assert!(matches!(result, Err(Error::Usage(_))));
        assert_eq!(engine.inputs_opened(), 0);
    }

    #[test]
    fn open_rejects_empty_path() {
        let engine = MemoryEngine::new();
        let result = RunInputFile::open(engine.clone(), "", AccessMode::Read);

        assert!(matches!(result, Err(Error::Usage(_))));
        assert_eq!(engine.inputs_opened(), 0);
    }

    #[test]
    fn display_round_trips_path_and_mode() {
        let handle =
            RunInputFile::open(MemoryEngine::new(), "/data/topol.tpr", AccessMode::Read).unwrap();

        let rendered = handle.to_string();
        assert_eq!(rendered, "RunInputFile('/data/topol.tpr', 'r')");

        let inner = rendered
            .strip_prefix("RunInputFile('")
            .and_then(|s| s.strip_suffix("')"))
            .unwrap();
        let (path, mode) = inner.split_once("', '").unwrap();
        assert_eq!(Path::new(path), handle.path());
        assert_eq!(mode.parse::<AccessMode>().unwrap(), handle.mode());
    }

    #[test]
    fn acquisition_is_scoped_and_reopens_each_time() {
        let engine = engine_with_params();
        let mut handle =
            RunInputFile::open(engine.clone(), "/data/topol.tpr", AccessMode::Read).unwrap();

        {
            let _guard = handle.acquire().unwrap();
        }
        assert!(!handle.is_acquired());

        let _guard = handle.acquire().unwrap();
        drop(_guard);

        assert_eq!(engine.inputs_opened(), 2);
    }

    #[test]
    fn close_without_acquisition_is_a_no_op() {
        let mut handle =
            RunInputFile::open(MemoryEngine::new(), "/data/topol.tpr", AccessMode::Read).unwrap();

        handle.close();
        handle.close();
        assert!(!handle.is_acquired());
    }

    #[test]
    fn parameters_reads_through_a_fresh_acquisition_each_call() {
        let engine = engine_with_params();
        let mut input = read_input(engine.clone(), "/data/topol.tpr").unwrap();

        let first = input.output().parameters().unwrap();
        let second = input.output().parameters().unwrap();

        assert_eq!(first.get_int("init-step"), Some(0));
        assert_eq!(first, second);
        assert_eq!(engine.inputs_opened(), 2);
    }

    #[test]
    fn unbuilt_output_ports_report_feature_not_available() {
        let mut input = read_input(engine_with_params(), "/data/topol.tpr").unwrap();
        let output = input.output();

        assert!(matches!(
            output.structure(),
            Err(Error::FeatureNotAvailable(_))
        ));
        assert!(matches!(
            output.topology(),
            Err(Error::FeatureNotAvailable(_))
        ));
        assert!(matches!(output.state(), Err(Error::FeatureNotAvailable(_))));
    }

    #[test]
    fn read_input_accepts_an_existing_handle() {
        let engine = engine_with_params();
        let handle =
            RunInputFile::open(engine.clone(), "/data/topol.tpr", AccessMode::Read).unwrap();

        let mut input = read_input(engine, handle).unwrap();
        assert_eq!(
            input.output().parameters().unwrap().get_int("init-step"),
            Some(0)
        );
    }

    #[test]
    fn read_input_normalizes_construction_failure_to_usage() {
        let result = read_input(MemoryEngine::new(), "");
        match result {
            Err(Error::Usage(message)) => {
                assert_eq!(message, "a run input resource or file path is required");
            }
            other => panic!("expected a usage error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn engine_open_failure_passes_through_unclassified() {
        let engine = engine_with_params();
        engine.fail_input_open();
        let mut input = read_input(engine, "/data/topol.tpr").unwrap();

        assert!(matches!(
            input.output().parameters(),
            Err(Error::Engine(_))
        ));
    }

    #[test]
    fn handles_work_against_real_filesystem_paths() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("topol.tpr");
        std::fs::write(&path, b"binary run input").unwrap();

        let engine = engine_with_params();
        let mut input = read_input(engine, path.as_path()).unwrap();
        assert_eq!(
            input.output().parameters().unwrap().get_real("dt"),
            Some(0.002)
        );
    }
}
