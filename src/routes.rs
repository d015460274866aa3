//! Routes
//!
//! Path <-> view mapping for the single-page shell. Navigation goes through
//! the History API; the shell listens to `popstate` for back/forward.

/// Sections of a project detail page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProjectTab {
    #[default]
    Board,
    Finance,
    Team,
    GitHub,
    Files,
}

impl ProjectTab {
    pub const ALL: [ProjectTab; 5] = [
        ProjectTab::Board,
        ProjectTab::Finance,
        ProjectTab::Team,
        ProjectTab::GitHub,
        ProjectTab::Files,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ProjectTab::Board => "Board",
            ProjectTab::Finance => "Finance",
            ProjectTab::Team => "Team",
            ProjectTab::GitHub => "GitHub",
            ProjectTab::Files => "Files",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Login,
    Dashboard,
    Projects,
    ProjectDetail(String),
    Calendar,
    Finance,
    Employees,
    Accounts,
    ClientHome,
    ClientProjects,
}

impl Route {
    /// Resolve a location pathname. `/` goes to the dashboard, anything
    /// unknown goes to login.
    pub fn parse(path: &str) -> Route {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            [] | ["admin"] => Route::Dashboard,
            ["login"] => Route::Login,
            ["admin", "projects"] => Route::Projects,
            ["admin", "projects", id] => Route::ProjectDetail((*id).to_string()),
            ["admin", "calendar"] => Route::Calendar,
            ["admin", "finance"] => Route::Finance,
            ["admin", "employees"] => Route::Employees,
            ["admin", "accounts"] => Route::Accounts,
            ["client"] => Route::ClientHome,
            ["client", "projects"] => Route::ClientProjects,
            _ => Route::Login,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Login => "/login".to_string(),
            Route::Dashboard => "/admin".to_string(),
            Route::Projects => "/admin/projects".to_string(),
            Route::ProjectDetail(id) => format!("/admin/projects/{}", id),
            Route::Calendar => "/admin/calendar".to_string(),
            Route::Finance => "/admin/finance".to_string(),
            Route::Employees => "/admin/employees".to_string(),
            Route::Accounts => "/admin/accounts".to_string(),
            Route::ClientHome => "/client".to_string(),
            Route::ClientProjects => "/client/projects".to_string(),
        }
    }

    /// Every route except login needs a token
    pub fn requires_session(&self) -> bool {
        !matches!(self, Route::Login)
    }

    pub fn is_client_portal(&self) -> bool {
        matches!(self, Route::ClientHome | Route::ClientProjects)
    }

    /// Top-level navigation entry this route highlights
    pub fn nav_root(&self) -> Route {
        match self {
            Route::ProjectDetail(_) => Route::Projects,
            other => other.clone(),
        }
    }
}

/// Admin sidebar entries
pub const ADMIN_NAV: &[(&str, fn() -> Route)] = &[
    ("Dashboard", || Route::Dashboard),
    ("Projects", || Route::Projects),
    ("Calendar", || Route::Calendar),
    ("Finance", || Route::Finance),
    ("Employees", || Route::Employees),
    ("Accounts", || Route::Accounts),
];

/// Current location pathname
pub fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

/// Push a history entry for the route
pub fn push_history(route: &Route) {
    if let Some(history) = web_sys::window().and_then(|w| w.history().ok()) {
        let _ = history.push_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(&route.path()));
    }
}

/// Replace the current history entry (redirects)
pub fn replace_history(route: &Route) {
    if let Some(history) = web_sys::window().and_then(|w| w.history().ok()) {
        let _ = history.replace_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(&route.path()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_paths() {
        assert_eq!(Route::parse("/"), Route::Dashboard);
        assert_eq!(Route::parse("/admin/"), Route::Dashboard);
        assert_eq!(Route::parse("/login"), Route::Login);
        assert_eq!(Route::parse("/admin/projects"), Route::Projects);
        assert_eq!(Route::parse("/admin/projects/abc-123"), Route::ProjectDetail("abc-123".into()));
        assert_eq!(Route::parse("/client/projects"), Route::ClientProjects);
    }

    #[test]
    fn test_unknown_path_goes_to_login() {
        assert_eq!(Route::parse("/admin/messenger"), Route::Login);
        assert_eq!(Route::parse("/nowhere"), Route::Login);
    }

    #[test]
    fn test_path_round_trip_for_every_route() {
        let routes = [
            Route::Login,
            Route::Dashboard,
            Route::Projects,
            Route::ProjectDetail("p1".into()),
            Route::Calendar,
            Route::Finance,
            Route::Employees,
            Route::Accounts,
            Route::ClientHome,
            Route::ClientProjects,
        ];
        for route in routes {
            assert_eq!(Route::parse(&route.path()), route);
        }
    }

    #[test]
    fn test_session_requirements() {
        assert!(!Route::Login.requires_session());
        assert!(Route::Finance.requires_session());
        assert_eq!(Route::ProjectDetail("x".into()).nav_root(), Route::Projects);
    }
}
