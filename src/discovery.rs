//! File discovery for IDL inputs
//!
//! Expands a glob pattern such as `../idl/HTML*Element.idl` into the list of
//! matching files. The pattern is split into its literal directory prefix,
//! which becomes the walk root, and the glob remainder, which is matched
//! against each file's path relative to that root.
//!
//! Without sorting, files come back in the order the filesystem lists them.

use crate::config::DiscoveryConfig;
use crate::error::{IdlError, IdlResult};
use globset::{GlobBuilder, GlobMatcher};
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

const GLOB_META: &[char] = &['*', '?', '[', '{'];

/// Finds IDL files matching a glob pattern
#[derive(Debug)]
pub struct IdlFileWalker {
    pattern: String,
    sort: bool,
}

impl IdlFileWalker {
    pub fn new(pattern: impl Into<String>, sort: bool) -> Self {
        Self {
            pattern: pattern.into(),
            sort,
        }
    }

    pub fn from_config(config: &DiscoveryConfig) -> Self {
        Self::new(config.pattern.clone(), config.sort)
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Collect every file matching the pattern.
    ///
    /// A missing root directory yields no files. Entries matching the pattern
    /// are returned even when they cannot be followed, so the caller fails on
    /// them; non-matching unreadable entries are skipped with a warning.
    pub fn walk(&self) -> IdlResult<Vec<PathBuf>> {
        let split = PatternSplit::new(&self.pattern);
        let matcher = self.compile(&split.glob)?;

        let root = split.root.clone().unwrap_or_else(|| PathBuf::from("."));
        if !root.is_dir() {
            tracing::debug!(root = %root.display(), "pattern root does not exist");
            return Ok(Vec::new());
        }

        let mut walker = WalkDir::new(&root).min_depth(1).follow_links(true);
        if let Some(depth) = split.depth {
            walker = walker.max_depth(depth);
        }
        if self.sort {
            walker = walker.sort_by_file_name();
        }

        let mut files = Vec::new();
        for entry in walker {
            let (path, is_dir) = match entry {
                Ok(entry) => (entry.path().to_path_buf(), entry.file_type().is_dir()),
                Err(e) => {
                    // A matching path that cannot be followed (dangling symlink,
                    // permission denied) is still an input; reading it will fail.
                    let Some(path) = e.path().map(Path::to_path_buf) else {
                        tracing::warn!("skipping unreadable entry: {e}");
                        continue;
                    };
                    if self.matched_path(&split, &root, &matcher, &path).is_none() {
                        tracing::warn!("skipping unreadable entry: {e}");
                        continue;
                    }
                    tracing::debug!(path = %path.display(), "matched entry is unreadable: {e}");
                    (path, false)
                }
            };
            if is_dir {
                continue;
            }

            if let Some(matched) = self.matched_path(&split, &root, &matcher, &path) {
                tracing::trace!(path = %matched.display(), "matched");
                files.push(matched);
            }
        }

        tracing::debug!(pattern = %self.pattern, count = files.len(), "discovered IDL files");
        Ok(files)
    }

    /// The path to report for `path` if it matches the glob, else `None`.
    fn matched_path(
        &self,
        split: &PatternSplit,
        root: &Path,
        matcher: &GlobMatcher,
        path: &Path,
    ) -> Option<PathBuf> {
        let relative = path.strip_prefix(root).ok()?;
        let normalized = relative.to_string_lossy().replace('\\', "/");
        if !matcher.is_match(&normalized) {
            return None;
        }
        if split.root.is_some() {
            Some(path.to_path_buf())
        } else {
            Some(relative.to_path_buf())
        }
    }

    fn compile(&self, glob: &str) -> IdlResult<GlobMatcher> {
        GlobBuilder::new(glob)
            .literal_separator(true)
            .build()
            .map(|g| g.compile_matcher())
            .map_err(|e| IdlError::InvalidPattern {
                pattern: self.pattern.clone(),
                reason: e.kind().to_string(),
            })
    }
}

/// A pattern split into the directory to walk and the glob to match beneath it.
#[derive(Debug, PartialEq)]
struct PatternSplit {
    /// `None` when the pattern starts with a glob component
    root: Option<PathBuf>,
    glob: String,
    /// Maximum walk depth; `None` when the glob contains `**`
    depth: Option<usize>,
}

impl PatternSplit {
    fn new(pattern: &str) -> Self {
        let components: Vec<Component<'_>> = Path::new(pattern).components().collect();

        let first_glob = components
            .iter()
            .position(|c| c.as_os_str().to_string_lossy().contains(GLOB_META))
            .unwrap_or(components.len());
        // The last component is always matched, never walked into
        let split = first_glob.min(components.len().saturating_sub(1));

        let root = if split == 0 {
            None
        } else {
            Some(components[..split].iter().collect::<PathBuf>())
        };

        let rest: Vec<String> = components[split..]
            .iter()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        let depth = if rest.iter().any(|c| c.contains("**")) {
            None
        } else {
            Some(rest.len())
        };

        Self {
            root,
            glob: rest.join("/"),
            depth,
        }
    }
}
