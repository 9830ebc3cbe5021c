//! # Routes
//!
//! Static route table with a single guard: the profile page needs a logged-in
//! user. Unknown paths and failed guards land on [`Route::Home`].

use crate::app::state::Session;

/// Client routes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Profile,
    Collections,
    Nfts,
    Sales,
}

impl Route {
    pub fn all() -> &'static [Route] {
        &[Route::Home, Route::Profile, Route::Collections, Route::Nfts, Route::Sales]
    }

    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Profile => "/profile",
            Route::Collections => "/collections",
            Route::Nfts => "/nfts",
            Route::Sales => "/sales",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Home => "Home",
            Route::Profile => "Profile",
            Route::Collections => "Collections",
            Route::Nfts => "NFTs",
            Route::Sales => "Sales",
        }
    }

    pub fn requires_auth(&self) -> bool {
        matches!(self, Route::Profile)
    }

    /// Exact match, ignoring query string, fragment and trailing slash.
    pub fn from_path(path: &str) -> Option<Route> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let path = match path.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };
        Route::all().iter().copied().find(|route| route.path() == path)
    }
}

/// Route to display for `path` given the current session.
pub fn resolve(path: &str, session: &Session) -> Route {
    match Route::from_path(path) {
        Some(route) if route.requires_auth() && !session.is_authenticated() => {
            tracing::debug!(path, "Route requires authentication, redirecting home");
            Route::Home
        }
        Some(route) => route,
        None => Route::Home,
    }
}
