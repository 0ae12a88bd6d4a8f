//! Error types surfaced by dialogue lookup and playback startup.
use std::fmt;

/// Error categories reported while configuring or starting dialogue playback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogueErrorKind {
    /// A collaborator playback needs (display sink, library) is missing.
    Configuration { missing: DialogueCollaborator },
    /// More than one instance of a collaborator exists where exactly one is expected.
    Ambiguous { collaborator: DialogueCollaborator },
    ResourceNotFound { name: String },
    IndexOutOfRange { index: usize, len: usize },
}

impl DialogueErrorKind {
    pub fn configuration(missing: DialogueCollaborator) -> Self {
        Self::Configuration { missing }
    }

    pub fn ambiguous(collaborator: DialogueCollaborator) -> Self {
        Self::Ambiguous { collaborator }
    }

    pub fn resource_not_found(name: impl Into<String>) -> Self {
        Self::ResourceNotFound { name: name.into() }
    }

    pub fn index_out_of_range(index: usize, len: usize) -> Self {
        Self::IndexOutOfRange { index, len }
    }
}

impl fmt::Display for DialogueErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configuration { missing } => write!(f, "No {} assigned", missing),
            Self::Ambiguous { collaborator } => {
                write!(f, "Multiple {}s found; expected exactly one", collaborator)
            }
            Self::ResourceNotFound { name } => {
                write!(f, "Dialogue file '{}' not found", name)
            }
            Self::IndexOutOfRange { index, len } => {
                write!(f, "Index {} out of range (library holds {})", index, len)
            }
        }
    }
}

/// Collaborators that must exist before playback can start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DialogueCollaborator {
    DisplaySink,
    Library,
}

impl fmt::Display for DialogueCollaborator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::DisplaySink => "dialogue text display",
            Self::Library => "dialogue library",
        };
        write!(f, "{}", label)
    }
}

/// Dialogue error tagged with the component that reported it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogueError {
    pub source: DialogueErrorSource,
    pub kind: DialogueErrorKind,
}

impl DialogueError {
    pub fn new(source: DialogueErrorSource, kind: DialogueErrorKind) -> Self {
        Self { source, kind }
    }

    pub fn library(kind: DialogueErrorKind) -> Self {
        Self::new(DialogueErrorSource::Library, kind)
    }

    pub fn sequencer(kind: DialogueErrorKind) -> Self {
        Self::new(DialogueErrorSource::Sequencer, kind)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DialogueErrorSource {
    Library,
    Sequencer,
}

impl fmt::Display for DialogueErrorSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Library => "DialogueLibrary",
            Self::Sequencer => "DialogueSequencer",
        };
        write!(f, "{}", label)
    }
}

impl fmt::Display for DialogueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.source, self.kind)
    }
}

impl std::error::Error for DialogueError {}
