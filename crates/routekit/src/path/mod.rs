/// Shared route prefix
///
/// A prefix such as `/app` is prepended to every pattern a router registers
/// and every path it resolves, unless the text already starts with it. The
/// handle is cheap to clone; clones observe each other's updates, so several
/// routers can be mounted under one prefix and moved together at runtime.

use std::fmt;
use std::sync::Arc;

use arc_swap::ArcSwap;

/// Cloneable, lock-free prefix handle
///
/// # Examples
///
/// ```
/// use routekit::RoutePrefix;
///
/// let prefix = RoutePrefix::new("/app");
/// assert_eq!(prefix.apply("/user/1"), "/app/user/1");
/// assert_eq!(prefix.apply("/app/user/1"), "/app/user/1");
///
/// let shared = prefix.clone();
/// shared.set("/v2");
/// assert_eq!(prefix.get(), "/v2");
/// ```
#[derive(Clone)]
pub struct RoutePrefix {
    inner: Arc<ArcSwap<String>>,
}

impl RoutePrefix {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(ArcSwap::from_pointee(prefix.into())),
        }
    }

    /// Current prefix (empty when unset)
    pub fn get(&self) -> String {
        (**self.inner.load()).clone()
    }

    pub fn set(&self, prefix: impl Into<String>) {
        self.inner.store(Arc::new(prefix.into()));
    }

    pub fn is_empty(&self) -> bool {
        self.inner.load().is_empty()
    }

    /// Prepends the prefix unless `path` already carries it
    pub fn apply(&self, path: &str) -> String {
        let prefix = self.inner.load();
        if prefix.is_empty() || path.starts_with(prefix.as_str()) {
            path.to_string()
        } else {
            format!("{}{}", prefix.as_str(), path)
        }
    }
}

impl Default for RoutePrefix {
    fn default() -> Self {
        Self::new(String::new())
    }
}

impl fmt::Debug for RoutePrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RoutePrefix").field(&self.get()).finish()
    }
}

impl From<&str> for RoutePrefix {
    fn from(prefix: &str) -> Self {
        Self::new(prefix)
    }
}
