//! Route definitions

/// Page operations reachable through `/<op>/<title>`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    View,
    Edit,
    Save,
}

impl Operation {
    pub const ALL: [Operation; 3] = [Operation::View, Operation::Edit, Operation::Save];

    /// Path segment naming this operation
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::View => "view",
            Operation::Edit => "edit",
            Operation::Save => "save",
        }
    }

    /// Parse the operation segment of a path
    pub fn from_segment(segment: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.as_str() == segment)
    }

    /// Path of this operation for `title`, e.g. `/view/Home`
    pub fn path_for(self, title: &str) -> String {
        format!("/{}/{}", self.as_str(), title)
    }
}

/// A matched route
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `/`
    Index,

    /// `/<op>/<title>`
    Page { op: Operation, title: String },
}
