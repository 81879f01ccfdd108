use super::AccessMode;
use super::error::{Error, Result};
use super::stream::FrameStream;
use crate::core::frame::Frame;
use crate::core::selection::Selection;
use crate::engine::options::StreamOptions;
use crate::engine::traits::{Engine, TrajectoryModule};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Handle to a trajectory data source.
///
/// Opening the handle eagerly constructs the engine's caching analysis
/// module; the module is the expensive, reusable part and outlives every
/// scan. The handle itself holds no iteration state - each call to
/// [`select`](TrajectoryFile::select) builds an independent stream that
/// scans the resource from the start, so re-selecting and re-scanning pays
/// only per-runner cost.
pub struct TrajectoryFile<E: Engine> {
    engine: E,
    path: PathBuf,
    mode: AccessMode,
    module: E::Module,
}

impl<E: Engine> TrajectoryFile<E> {
    /// Opens a trajectory file for read-only access.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::Usage`] for any mode other than
    /// [`AccessMode::Read`]; no module is constructed in that case.
    pub fn open(engine: E, path: impl AsRef<Path>, mode: AccessMode) -> Result<Self> {
        if mode != AccessMode::Read {
            return Err(Error::Usage(
                "trajectory file access mode not supported".to_string(),
            ));
        }
        let module = engine.create_module();
        let path = path.as_ref().to_path_buf();
        debug!(path = %path.display(), "opened trajectory handle");
        Ok(Self {
            engine,
            path,
            mode,
            module,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn mode(&self) -> AccessMode {
        self.mode
    }

    /// The caching module's self-description, for diagnostics.
    pub fn info(&self) -> String {
        self.module.info()
    }

    /// The frame cached by the most recent advance, if any.
    ///
    /// The cache belongs to the module, not to a stream: it stays queryable
    /// after a stream ends, until the next advance replaces it.
    pub fn cached_frame(&self) -> Option<Frame> {
        self.module.current_frame()
    }

    /// Streams frames one at a time, optionally filtered by `selection`.
    ///
    /// The stream is lazy: the runner is created and initialized on the
    /// first pull. It is single-pass; call `select` again for a fresh scan
    /// from the start. The exclusive borrow taken here is what forbids two
    /// simultaneous scans over one handle.
    pub fn select(&mut self, selection: Option<Selection>) -> FrameStream<'_, E> {
        let mut options = StreamOptions::new(self.path.clone());
        if let Some(selection) = selection {
            options = options.with_selection(selection);
        }
        FrameStream::new(&self.engine, &mut self.module, options)
    }
}

impl<E: Engine> fmt::Display for TrajectoryFile<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TrajectoryFile('{}', '{}')",
            self.path.display(),
            self.mode
        )
    }
}

impl<E: Engine> fmt::Debug for TrajectoryFile<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrajectoryFile")
            .field("path", &self.path)
            .field("mode", &self.mode)
            .finish()
    }
}
