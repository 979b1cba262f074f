//! Fluent builder for [`Shim`] construction.

use crate::shim::Shim;

/// Builder for configuring a [`Shim`].
///
/// # Example
/// ```
/// use fs_shim::ShimBuilder;
///
/// let shim = ShimBuilder::new().umask(0o022).sort_entries(false).build();
/// # drop(shim);
/// ```
#[derive(Debug, Clone)]
pub struct ShimBuilder {
    umask: Option<u32>,
    sort_entries: bool,
}

impl Default for ShimBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ShimBuilder {
    /// Creates a builder with the process umask and sorted listings.
    pub fn new() -> Self {
        Self {
            umask: None,
            sort_entries: true,
        }
    }

    /// Uses `umask` instead of the process umask when resolving symbolic modes
    /// that have no `who` part.
    ///
    /// This only affects mode string resolution; the kernel still applies the
    /// process umask when creating directories.
    pub fn umask(mut self, umask: u32) -> Self {
        self.umask = Some(umask & 0o777);
        self
    }

    /// Sorts each directory's entries by name (the default). When disabled,
    /// entries keep the order the OS returns them in.
    pub fn sort_entries(mut self, sort: bool) -> Self {
        self.sort_entries = sort;
        self
    }

    /// Builds the configured [`Shim`].
    pub fn build(self) -> Shim {
        Shim::with_options(self.umask, self.sort_entries)
    }
}
