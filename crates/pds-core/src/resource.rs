/// The record kinds exposed over HTTP, plus the home page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Home,
    Journals,
    Plans,
    Statements,
    Behaviours,
    Values,
}

impl Resource {
    /// Resources shown in the navigation bar, in display order.
    pub const NAV: [Resource; 5] = [
        Resource::Journals,
        Resource::Plans,
        Resource::Statements,
        Resource::Behaviours,
        Resource::Values,
    ];

    /// Canonical listing path; the redirect target after full-mode writes.
    pub fn listing_path(self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Journals => "/journals",
            Self::Plans => "/plans",
            Self::Statements => "/statements",
            Self::Behaviours => "/behaviours",
            Self::Values => "/values",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Journals => "Journals",
            Self::Plans => "Plans",
            Self::Statements => "Statements",
            Self::Behaviours => "Behaviours",
            Self::Values => "Values",
        }
    }
}
