//! Kinds of empty authoring files the scaffold command can create.
use std::fmt;

/// An empty-file template: extension plus the name offered by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum FileTemplate {
    Text,
    Json,
    Csv,
    Xml,
}

impl FileTemplate {
    #[cfg_attr(not(test), allow(dead_code))]
    pub const ALL: [FileTemplate; 4] = [Self::Text, Self::Json, Self::Csv, Self::Xml];

    /// Extension including the leading dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Text => ".txt",
            Self::Json => ".json",
            Self::Csv => ".csv",
            Self::Xml => ".xml",
        }
    }

    pub fn default_name(self) -> &'static str {
        match self {
            Self::Text => "NewTextFile",
            Self::Json => "NewJsonFile",
            Self::Csv => "NewCsvFile",
            Self::Xml => "NewXmlFile",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Text => "Text File",
            Self::Json => "JSON File",
            Self::Csv => "CSV File",
            Self::Xml => "XML File",
        }
    }
}

impl fmt::Display for FileTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
