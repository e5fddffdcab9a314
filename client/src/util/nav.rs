//! Portal sections and the roles allowed into each.
//!
//! SYSTEM CONTEXT
//! ==============
//! The router wraps every section in a guard built from `required_roles`,
//! and the sidebar lists exactly the sections whose guard would render.

#[cfg(test)]
#[path = "nav_test.rs"]
mod nav_test;

use crate::net::types::Role;
use crate::state::auth::Session;

const ALL_ROLES: &[Role] = &[Role::Admin, Role::Faculty, Role::Student];

/// A role-gated area of the portal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Section {
    Users,
    Students,
    Faculty,
    Branches,
    Attendance,
    Results,
    Events,
    Notes,
    Notifications,
    Chatbot,
    VirtualClassroom,
    JoinClassroom,
}

impl Section {
    /// Sidebar order.
    pub const ALL: [Section; 12] = [
        Section::Users,
        Section::Students,
        Section::Faculty,
        Section::Branches,
        Section::Attendance,
        Section::Results,
        Section::Events,
        Section::Notes,
        Section::Notifications,
        Section::Chatbot,
        Section::VirtualClassroom,
        Section::JoinClassroom,
    ];

    /// Route path segment, without the leading slash.
    pub fn segment(self) -> &'static str {
        match self {
            Self::Users => "users",
            Self::Students => "students",
            Self::Faculty => "faculty",
            Self::Branches => "branches",
            Self::Attendance => "attendance",
            Self::Results => "results",
            Self::Events => "events",
            Self::Notes => "notes",
            Self::Notifications => "notifications",
            Self::Chatbot => "chatbot",
            Self::VirtualClassroom => "virtual-classroom",
            Self::JoinClassroom => "join",
        }
    }

    pub fn href(self) -> String {
        format!("/{}", self.segment())
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Users => "Users",
            Self::Students => "Students",
            Self::Faculty => "Faculty",
            Self::Branches => "Branches",
            Self::Attendance => "Attendance",
            Self::Results => "Results",
            Self::Events => "Events",
            Self::Notes => "Notes",
            Self::Notifications => "Notifications",
            Self::Chatbot => "Chatbot",
            Self::VirtualClassroom => "Virtual Classroom",
            Self::JoinClassroom => "Join Virtual Classroom",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Users => "Portal accounts and their roles.",
            Self::Students => "Enrolled students.",
            Self::Faculty => "Teaching staff.",
            Self::Branches => "Academic branches and departments.",
            Self::Attendance => "Attendance records.",
            Self::Results => "Examination results.",
            Self::Events => "Campus events.",
            Self::Notes => "Shared course notes.",
            Self::Notifications => "Your notifications.",
            Self::Chatbot => "Ask the campus assistant.",
            Self::VirtualClassroom => "Host live classes.",
            Self::JoinClassroom => "Join a live class with a room code.",
        }
    }

    /// REST collection listed on the section page, when there is one.
    ///
    /// Attendance is split server side: staff read every record, a student
    /// may only read their own under `/attendance/my`.
    pub fn api_path(self, session: &Session) -> Option<&'static str> {
        match self {
            Self::Users => Some("/users"),
            Self::Students => Some("/students"),
            Self::Faculty => Some("/faculties"),
            Self::Branches => Some("/branches"),
            Self::Attendance if session.has_any_role(&[Role::Admin, Role::Faculty]) => Some("/attendance"),
            Self::Attendance => Some("/attendance/my"),
            Self::Results => Some("/results"),
            Self::Events => Some("/events"),
            Self::Notes => Some("/notes"),
            Self::Notifications => Some("/notifications/my"),
            Self::Chatbot | Self::VirtualClassroom | Self::JoinClassroom => None,
        }
    }

    pub fn required_roles(self) -> &'static [Role] {
        match self {
            Self::Users | Self::Branches => &[Role::Admin],
            Self::Students | Self::Faculty => &[Role::Admin, Role::Faculty],
            Self::VirtualClassroom => &[Role::Faculty],
            Self::JoinClassroom => &[Role::Student, Role::Faculty],
            Self::Attendance
            | Self::Results
            | Self::Events
            | Self::Notes
            | Self::Notifications
            | Self::Chatbot => ALL_ROLES,
        }
    }
}

/// Sections the session may open, in sidebar order. Empty when anonymous.
pub fn visible_sections(session: &Session) -> Vec<Section> {
    Section::ALL
        .into_iter()
        .filter(|s| session.has_any_role(s.required_roles()))
        .collect()
}
