use crate::core::selection::Selection;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The immutable configuration snapshot for one frame stream.
///
/// Built once per `select()` call from the trajectory handle's path and the
/// caller's optional selection, then handed to `FrameRunner::initialize`.
/// The snapshot never changes after construction; restarting a scan means
/// building a new one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamOptions {
    path: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    selection: Option<Selection>,
}

impl StreamOptions {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            selection: None,
        }
    }

    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.selection = Some(selection);
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_is_optional() {
        let options = StreamOptions::new("/data/run.trr");
        assert_eq!(options.path(), Path::new("/data/run.trr"));
        assert!(options.selection().is_none());

        let options = options.with_selection(Selection::new("resname SOL"));
        assert_eq!(options.selection().unwrap().expression(), "resname SOL");
    }

    #[test]
    fn snapshot_round_trips_through_toml() {
        let options =
            StreamOptions::new("/data/run.trr").with_selection(Selection::new("name CA"));

        let rendered = toml::to_string(&options).unwrap();
        let parsed: StreamOptions = toml::from_str(&rendered).unwrap();

        assert_eq!(parsed, options);
    }
}
