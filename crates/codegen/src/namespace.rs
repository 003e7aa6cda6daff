use crate::naming::lower_first;
use std::fmt;
use std::path::{Path, PathBuf};

/// A `\`-separated class namespace, e.g. `App\Http\Requests\Posts`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespace {
    segments: Vec<String>,
}

impl Namespace {
    /// Parse a namespace; `/` is accepted as a separator and empty segments
    /// are dropped.
    pub fn parse(namespace: &str) -> Self {
        Self {
            segments: namespace
                .split(['\\', '/'])
                .map(str::trim)
                .filter(|segment| !segment.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }

    pub fn child(&self, segment: impl Into<String>) -> Self {
        let segment = segment.into();
        let mut segments = self.segments.clone();
        if !segment.is_empty() {
            segments.push(segment);
        }
        Self { segments }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn last(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    /// Directory the namespace autoloads from, relative to `base_path`.
    ///
    /// The root segment maps to its lower-cased directory
    /// (`App\Http\Requests` → `<base>/app/Http/Requests`).
    pub fn to_path(&self, base_path: &Path) -> PathBuf {
        let mut path = base_path.to_path_buf();
        for (i, segment) in self.segments.iter().enumerate() {
            if i == 0 {
                path.push(lower_first(segment));
            } else {
                path.push(segment);
            }
        }
        path
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("\\"))
    }
}
