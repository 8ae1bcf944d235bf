//! Route table and per-route access policy.
//!
//! Every navigable page of the HR portal is listed here with its path and the
//! policy the navigation guard enforces. Pages under the `/` layout inherit
//! `requires_auth`; admin pages add `requires_admin`; `login` is guest-only.

#[cfg(test)]
#[path = "policy_test.rs"]
mod policy_test;

/// Declarative access flags for a route. Default: no restriction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RoutePolicy {
    /// Only authenticated sessions may enter.
    pub requires_auth: bool,
    /// Only anonymous sessions may enter.
    pub guest_only: bool,
    /// Only administrators may enter.
    pub requires_admin: bool,
}

impl RoutePolicy {
    pub const NONE: Self = Self { requires_auth: false, guest_only: false, requires_admin: false };
    pub const AUTHENTICATED: Self = Self { requires_auth: true, ..Self::NONE };
    pub const ADMIN: Self = Self { requires_auth: true, requires_admin: true, ..Self::NONE };
    pub const GUEST: Self = Self { guest_only: true, ..Self::NONE };

    #[must_use]
    pub fn is_unrestricted(self) -> bool {
        self == Self::NONE
    }
}

/// Named pages of the HR portal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AppRoute {
    Dashboard,
    LeaveManagement,
    SalaryManagement,
    Profile,
    Attendance,
    AdminLeaveRequests,
    AdminUsers,
    AdminAttendance,
    Login,
}

impl AppRoute {
    pub const ALL: [Self; 9] = [
        Self::Dashboard,
        Self::LeaveManagement,
        Self::SalaryManagement,
        Self::Profile,
        Self::Attendance,
        Self::AdminLeaveRequests,
        Self::AdminUsers,
        Self::AdminAttendance,
        Self::Login,
    ];

    /// Where unauthenticated visitors are sent.
    pub const LOGIN: Self = Self::Login;
    /// Where authenticated visitors land when a page is not for them.
    pub const LANDING: Self = Self::Dashboard;

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::LeaveManagement => "leave-management",
            Self::SalaryManagement => "salary-management",
            Self::Profile => "profile",
            Self::Attendance => "attendance",
            Self::AdminLeaveRequests => "admin-leave-requests",
            Self::AdminUsers => "admin-users",
            Self::AdminAttendance => "admin-attendance",
            Self::Login => "login",
        }
    }

    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Dashboard => "/",
            Self::LeaveManagement => "/leave",
            Self::SalaryManagement => "/salary",
            Self::Profile => "/profile",
            Self::Attendance => "/attendance",
            Self::AdminLeaveRequests => "/admin/leave-requests",
            Self::AdminUsers => "/admin/users",
            Self::AdminAttendance => "/admin/attendance",
            Self::Login => "/login",
        }
    }

    #[must_use]
    pub fn policy(self) -> RoutePolicy {
        match self {
            Self::Dashboard | Self::LeaveManagement | Self::SalaryManagement | Self::Profile | Self::Attendance => {
                RoutePolicy::AUTHENTICATED
            }
            Self::AdminLeaveRequests | Self::AdminUsers | Self::AdminAttendance => RoutePolicy::ADMIN,
            Self::Login => RoutePolicy::GUEST,
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|route| route.name() == name)
    }

    /// Match a location path, ignoring query, fragment, and a trailing slash.
    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        let path = normalize_path(path);
        Self::ALL.into_iter().find(|route| route.path() == path)
    }
}

/// Policy for a location path; unknown paths are unrestricted.
#[must_use]
pub fn policy_for_path(path: &str) -> RoutePolicy {
    AppRoute::from_path(path).map_or(RoutePolicy::NONE, AppRoute::policy)
}

fn normalize_path(path: &str) -> &str {
    let path = path.split(['?', '#']).next().unwrap_or_default().trim();
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() { "/" } else { trimmed }
}
