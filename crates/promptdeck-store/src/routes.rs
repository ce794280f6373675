//! View route table: maps navigation paths to view names and display titles.
//!
//! Pure data plus a resolver; no business logic lives here. A path segment
//! written `:id` binds a prompt identifier.

use serde::Serialize;

/// One navigable view: a path pattern, the view it resolves to, and the
/// display title applied on navigation.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ViewRoute {
    pub path: &'static str,
    pub view: &'static str,
    pub title: &'static str,
}

/// The navigation surface, in match order. The catch-all is not listed; any
/// unmatched path resolves to [`NOT_FOUND`].
pub const ROUTES: &[ViewRoute] = &[
    ViewRoute {
        path: "/",
        view: "home",
        title: "Prompt Library - Home",
    },
    ViewRoute {
        path: "/prompt/:id",
        view: "prompt-detail",
        title: "Prompt Details",
    },
    ViewRoute {
        path: "/create",
        view: "create-prompt",
        title: "Create Prompt",
    },
    ViewRoute {
        path: "/edit/:id",
        view: "edit-prompt",
        title: "Edit Prompt",
    },
    ViewRoute {
        path: "/recent",
        view: "recent-prompts",
        title: "Recent Prompts",
    },
    ViewRoute {
        path: "/favorites",
        view: "favorite-prompts",
        title: "Favorite Prompts",
    },
    ViewRoute {
        path: "/categories",
        view: "manage-categories",
        title: "Manage Categories",
    },
    ViewRoute {
        path: "/settings",
        view: "settings",
        title: "Settings",
    },
];

/// Catch-all route for unmatched paths.
pub const NOT_FOUND: ViewRoute = ViewRoute {
    path: "*",
    view: "not-found",
    title: "Page Not Found",
};

/// A resolved navigation target.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RouteMatch {
    #[serde(flatten)]
    pub route: ViewRoute,
    /// The prompt id bound to an `:id` segment, when the pattern has one.
    pub id: Option<u64>,
}

/// Resolve a path against the route table, falling back to the catch-all.
pub fn resolve(path: &str) -> RouteMatch {
    for route in ROUTES {
        if let Some(id) = match_pattern(route.path, path) {
            return RouteMatch { route: *route, id };
        }
    }
    RouteMatch {
        route: NOT_FOUND,
        id: None,
    }
}

/// Match `path` against `pattern` segment by segment. Returns the bound id
/// on a match (`None` id for parameterless patterns), or `None` on mismatch.
fn match_pattern(pattern: &str, path: &str) -> Option<Option<u64>> {
    let mut bound = None;

    let pattern_segments: Vec<&str> = pattern.trim_matches('/').split('/').collect();
    let path_segments: Vec<&str> = path.trim_matches('/').split('/').collect();

    if pattern_segments.len() != path_segments.len() {
        return None;
    }

    for (expected, actual) in pattern_segments.iter().zip(&path_segments) {
        if *expected == ":id" {
            bound = Some(actual.parse().ok()?);
        } else if expected != actual {
            return None;
        }
    }

    Some(bound)
}
