//! The kinds of resources exposed by the API

use std::fmt;

/// The type of a resource, used as the second segment of every v2 path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResourceType {
    Folder,
    File,
    Comment,
}

impl ResourceType {
    /// The name used for this resource type in the request path.
    pub fn wire_name(&self) -> &'static str {
        match self {
            Self::Folder => "folder",
            Self::File => "file",
            Self::Comment => "comment",
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}
