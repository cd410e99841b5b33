//! # routekit
//!
//! Route-pattern compiler, matcher and router index.
//!
//! Patterns use the familiar Express-style mini-language:
//! - Named parameters (`/users/:id`)
//! - Custom capture patterns (`/users/:id(\\d+)`)
//! - Anonymous, auto-numbered captures (`/archive/(\\d{4})`)
//! - Groups with modifiers (`/posts{/:page}?`, `/files/:path*`, `/tags/:tag+`)
//! - Wildcard shorthand (`/files/*rest`)
//!
//! Each pattern compiles once into a [`Matcher`] (path in, parameters out)
//! and a [`PathBuilder`] (parameters in, path out). The [`Router`] keeps an
//! ordered table of compiled patterns bound to caller metadata and resolves a
//! path to the first matching entry, trying parameter-free routes first.
//!
//! ## Example
//!
//! ```
//! use routekit::Router;
//!
//! let mut router = Router::new();
//! router.register("/product/:productId", "product").unwrap();
//! router.register("/product/create", "create").unwrap();
//!
//! let found = router.resolve("/product/create").unwrap();
//! assert_eq!(*found.meta, "create");
//!
//! let found = router.resolve("/product/abc").unwrap();
//! assert_eq!(found.pattern, "/product/:productId");
//! assert_eq!(found.params.get_str("productId"), Some("abc"));
//!
//! assert!(router.resolve("/nonexistent").is_none());
//! ```

use tracing::debug;

// ============================================================================
// Module Declarations
// ============================================================================

pub mod config;
pub mod error;
pub mod options;
pub mod params;
pub mod path;
pub mod route;

pub use config::{RouteMeta, RouteSpec, RouterConfig};
pub use error::{BuildError, SyntaxError};
pub use options::{Codec, PatternOptions};
pub use params::{ParamName, ParamValue, Params};
pub use path::RoutePrefix;
pub use route::parser::parse;
pub use route::regexp::tokens_to_regexp;
pub use route::{compile, Key, MatchResult, Matcher, Modifier, PathBuilder, Pattern, Token};

// ============================================================================
// Core Types
// ============================================================================

/// A registered pattern with its caller-supplied metadata
#[derive(Debug, Clone)]
pub struct RouteEntry<M> {
    /// Pattern text after the route prefix was applied
    pub pattern: String,
    pub compiled: Pattern,
    pub meta: M,
}

/// Outcome of [`Router::resolve`]
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved<'r, M> {
    /// Pattern text of the matching entry
    pub pattern: &'r str,
    /// The resolved path, prefix applied
    pub path: String,
    pub meta: &'r M,
    pub params: Params,
}

// ============================================================================
// Router
// ============================================================================

/// Ordered route table
///
/// Patterns without parameters are kept apart from parameterized ones and
/// always tried first. Within each list the earliest registration wins.
#[derive(Debug, Clone)]
pub struct Router<M> {
    plain: Vec<RouteEntry<M>>,
    dynamic: Vec<RouteEntry<M>>,
    options: PatternOptions,
    prefix: RoutePrefix,
}

impl<M> Router<M> {
    /// Creates an empty router with default pattern options and no prefix
    pub fn new() -> Self {
        Self {
            plain: Vec::new(),
            dynamic: Vec::new(),
            options: PatternOptions::default(),
            prefix: RoutePrefix::default(),
        }
    }

    /// Creates a router mounted under a (possibly shared) prefix
    ///
    /// # Examples
    ///
    /// ```
    /// use routekit::{RoutePrefix, Router};
    ///
    /// let prefix = RoutePrefix::new("/app");
    /// let mut router = Router::with_prefix(prefix.clone());
    /// router.register("/about", ()).unwrap();
    ///
    /// assert_eq!(router.resolve("/about").unwrap().path, "/app/about");
    /// assert_eq!(router.resolve("/app/about").unwrap().pattern, "/app/about");
    /// ```
    pub fn with_prefix(prefix: RoutePrefix) -> Self {
        Self {
            prefix,
            ..Self::new()
        }
    }

    /// Replaces the options used for subsequent registrations
    ///
    /// Routed paths always percent-decode captures and percent-encode built
    /// values, whatever codecs `options` names.
    pub fn with_options(mut self, options: PatternOptions) -> Self {
        self.options = options;
        self
    }

    /// Builder form of [`Router::register`]
    pub fn with_route(mut self, pattern: &str, meta: M) -> Result<Self, SyntaxError> {
        self.register(pattern, meta)?;
        Ok(self)
    }

    pub fn prefix(&self) -> &RoutePrefix {
        &self.prefix
    }

    pub fn options(&self) -> &PatternOptions {
        &self.options
    }

    /// Compiles `pattern` and appends it to the table
    ///
    /// The route prefix is applied first, so the stored pattern text is the
    /// prefixed one.
    pub fn register(&mut self, pattern: &str, meta: M) -> Result<&mut Self, SyntaxError> {
        let pattern = self.prefix.apply(pattern);
        let compiled = Pattern::for_url(&pattern, &self.options)?;

        debug!(pattern = %pattern, plain = compiled.is_plain(), "registered route");

        let entry = RouteEntry {
            pattern,
            compiled,
            meta,
        };

        if entry.compiled.is_plain() {
            self.plain.push(entry);
        } else {
            self.dynamic.push(entry);
        }

        Ok(self)
    }

    /// Finds the first entry matching `path`
    pub fn resolve(&self, path: &str) -> Option<Resolved<'_, M>> {
        let path = self.prefix.apply(path);

        let resolved = self.routes().find_map(|entry| {
            entry.compiled.matches(&path).map(|found| Resolved {
                pattern: entry.pattern.as_str(),
                path: path.clone(),
                meta: &entry.meta,
                params: found.params,
            })
        });

        match &resolved {
            Some(found) => debug!(path = %path, pattern = found.pattern, "resolved route"),
            None => debug!(path = %path, "no route matched"),
        }

        resolved
    }

    /// Builds a concrete path for the entry registered under `pattern`
    ///
    /// Returns `None` when no entry has that pattern text.
    ///
    /// # Examples
    ///
    /// ```
    /// use routekit::{Params, Router};
    ///
    /// let router = Router::new().with_route("/user/:userId", ()).unwrap();
    ///
    /// let path = router
    ///     .build_path("/user/:userId", &Params::new().with("userId", "alice"))
    ///     .unwrap()
    ///     .unwrap();
    /// assert_eq!(path, "/user/alice");
    /// assert!(router.build_path("/missing", &Params::new()).is_none());
    /// ```
    pub fn build_path(&self, pattern: &str, params: &Params) -> Option<Result<String, BuildError>> {
        let pattern = self.prefix.apply(pattern);
        self.routes()
            .find(|entry| entry.pattern == pattern)
            .map(|entry| entry.compiled.build(params))
    }

    /// Entries in resolution order: plain routes, then parameterized routes
    pub fn routes(&self) -> impl Iterator<Item = &RouteEntry<M>> {
        self.plain.iter().chain(self.dynamic.iter())
    }

    pub fn len(&self) -> usize {
        self.plain.len() + self.dynamic.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plain.is_empty() && self.dynamic.is_empty()
    }
}

impl<M> Default for Router<M> {
    fn default() -> Self {
        Self::new()
    }
}
