//! Directory trees on the filesystem.

use core::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::{DirEntry, WalkDir};

use crate::error::{Error, Result};
use crate::provider::Provider;
use crate::step::Step;

/// Directory walker yielding directories only.
type Walker = walkdir::FilterEntry<walkdir::IntoIter, fn(&DirEntry) -> bool>;

/// Node emitted by [`FsDirectoryProvider`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FsNode {
    /// Absolute path of the directory.
    pub origin: PathBuf,
}

/// Provider walking the directories under an absolute path.
///
/// Regular files are skipped. Siblings are visited in file name order, so the
/// sequence is reproducible.
///
/// # Examples
///
/// ```no_run
/// use cellulose::{FsDirectoryProvider, Provider};
///
/// let provider = FsDirectoryProvider::new().max_depth(Some(2));
/// for step in provider.seek("/usr/share".into())? {
///     let step = step?;
///     println!("{:?} {}", step.action, step.node.origin.display());
/// }
/// # Ok::<(), cellulose::Error>(())
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct FsDirectoryProvider {
    /// Whether symbolic links to directories are descended into.
    follow_links: bool,
    /// Maximum depth of emitted directories, the origin being at depth 0.
    max_depth: Option<usize>,
}

impl FsDirectoryProvider {
    /// Creates a provider which does not follow symbolic links.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether symbolic links to directories are followed.
    #[inline]
    #[must_use]
    pub fn follow_links(mut self, yes: bool) -> Self {
        self.follow_links = yes;
        self
    }

    /// Sets the maximum depth, the origin being at depth 0.
    ///
    /// `None` means unlimited.
    #[inline]
    #[must_use]
    pub fn max_depth(mut self, depth: Option<usize>) -> Self {
        self.max_depth = depth;
        self
    }

    /// Creates the walker over the directories below the origin.
    fn walker(&self, origin: &Path) -> Walker {
        let mut walk = WalkDir::new(origin)
            .min_depth(1)
            .follow_links(self.follow_links)
            .sort_by_file_name();
        if let Some(depth) = self.max_depth {
            walk = walk.max_depth(depth);
        }
        walk.into_iter()
            .filter_entry(is_directory as fn(&DirEntry) -> bool)
    }
}

/// Returns true if the entry is a directory.
fn is_directory(entry: &DirEntry) -> bool {
    entry.file_type().is_dir()
}

impl Provider for FsDirectoryProvider {
    type Origin = PathBuf;
    type Node = FsNode;
    type Steps<'a> = FsSteps;

    fn origin_description(&self) -> &str {
        "AbsolutePathnameString"
    }

    fn is_origin(&self, value: &PathBuf) -> bool {
        value.is_absolute()
    }

    fn node_description(&self) -> &str {
        "ObjectWithOrigin"
    }

    fn is_node(&self, value: &FsNode) -> bool {
        self.is_origin(&value.origin)
    }

    fn steps(&self, origin: PathBuf) -> FsSteps {
        FsSteps {
            provider: *self,
            origin: Some(origin),
            walker: None,
            open: Vec::new(),
            pending: None,
            finished: false,
        }
    }
}

/// Raw steps of [`FsDirectoryProvider`].
///
/// Directories are read only as the iteration reaches them. The steps keep
/// their own copy of the provider options.
pub struct FsSteps {
    /// Provider.
    provider: FsDirectoryProvider,
    /// Origin, until the first step.
    origin: Option<PathBuf>,
    /// Walker, after the first step unless the maximum depth is 0.
    walker: Option<Walker>,
    /// Steps entered and not yet left, the origin first.
    open: Vec<Step<FsNode>>,
    /// Entry read ahead while leaving the directories it is not under.
    pending: Option<DirEntry>,
    /// Whether the iteration has ended.
    finished: bool,
}

impl fmt::Debug for FsSteps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FsSteps")
            .field("provider", &self.provider)
            .field("origin", &self.origin)
            .field("open", &self.open)
            .field("pending", &self.pending)
            .field("finished", &self.finished)
            .finish_non_exhaustive()
    }
}

impl FsSteps {
    /// Checks the origin and enters it.
    fn start(&mut self, origin: PathBuf) -> Result<Step<FsNode>> {
        let metadata = fs::metadata(&origin).map_err(|source| Error::Io {
            path: origin.clone(),
            source,
        })?;
        if !metadata.is_dir() {
            return Err(Error::NotADirectory { path: origin });
        }

        // walkdir raises `max_depth` to `min_depth`, so depth 0 skips the walker.
        if self.provider.max_depth != Some(0) {
            self.walker = Some(self.provider.walker(&origin));
        }
        self.enter(origin)
    }

    /// Creates the step of a directory and enters it.
    fn enter(&mut self, origin: PathBuf) -> Result<Step<FsNode>> {
        let mut step = self.provider.create_step(FsNode { origin })?;
        step.enter();
        self.open.push(step.clone());
        Ok(step)
    }

    /// Leaves the innermost open directory.
    fn leave(&mut self) -> Option<Step<FsNode>> {
        let mut step = self.open.pop()?;
        step.leave();
        Some(step)
    }

    /// Returns the next step.
    fn advance(&mut self) -> Option<Result<Step<FsNode>>> {
        if let Some(origin) = self.origin.take() {
            return Some(self.start(origin));
        }

        let entry = match self.pending.take() {
            Some(entry) => Some(entry),
            None => match self.walker.as_mut().and_then(Iterator::next) {
                Some(Ok(entry)) => Some(entry),
                Some(Err(e)) => return Some(Err(e.into())),
                None => None,
            },
        };
        let Some(entry) = entry else {
            return self.leave().map(Ok);
        };

        // The parent of an entry at depth `d` is the open step at index `d - 1`.
        if self.open.len() > entry.depth() {
            self.pending = Some(entry);
            return self.leave().map(Ok);
        }
        debug!(path = %entry.path().display(), depth = entry.depth(), "entering directory");
        Some(self.enter(entry.into_path()))
    }
}

impl Iterator for FsSteps {
    type Item = Result<Step<FsNode>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let next = self.advance();
        if !matches!(next, Some(Ok(_))) {
            self.finished = true;
        }
        next
    }
}

impl core::iter::FusedIterator for FsSteps {}
