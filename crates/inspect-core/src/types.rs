use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::ops::Sub;
use std::path::PathBuf;

use crate::visibility::{UppercaseExported, VisibilityPolicy};

/// Byte offset into a source buffer, as reported by the parser.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pos(usize);

impl Pos {
    pub fn new(offset: usize) -> Self {
        Self(offset)
    }

    pub fn offset(&self) -> usize {
        self.0
    }
}

impl Sub for Pos {
    type Output = usize;

    /// Distance between two positions. Saturates at zero when `rhs` lies
    /// after `self`.
    fn sub(self, rhs: Pos) -> usize {
        self.0.saturating_sub(rhs.0)
    }
}

/// A function or method extracted from a declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Function {
    pub name: String,
    pub signature: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub documentation: String,
    /// Base type of a method's receiver. Only used to tell methods on
    /// different types apart when merging.
    #[serde(skip)]
    pub receiver: Option<String>,
}

impl Function {
    pub fn new(name: impl Into<String>, signature: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            signature: signature.into(),
            documentation: String::new(),
            receiver: None,
        }
    }

    pub fn with_documentation(mut self, documentation: impl Into<String>) -> Self {
        self.documentation = documentation.into();
        self
    }

    pub fn with_receiver(mut self, receiver: impl Into<String>) -> Self {
        self.receiver = Some(receiver.into());
        self
    }

    /// Whether the function is exported under the default casing rule.
    pub fn is_exported(&self) -> bool {
        UppercaseExported.is_exported(&self.name)
    }

    pub fn is_exported_by(&self, policy: &dyn VisibilityPolicy) -> bool {
        policy.is_exported(&self.name)
    }

    /// Key used for duplicate suppression: `Type.method` for methods,
    /// the bare name otherwise.
    pub fn merge_key(&self) -> Cow<'_, str> {
        match &self.receiver {
            Some(recv) => Cow::Owned(format!("{recv}.{}", self.name)),
            None => Cow::Borrowed(&self.name),
        }
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.signature)
    }
}

/// An interface type declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interface {
    pub name: String,
    /// Method signatures in the form `Name(params) results`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub methods: Vec<String>,
    /// Embedded interfaces, possibly package qualified (`io.Reader`).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub embedded_interfaces: Vec<String>,
}

impl Interface {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Everything extracted from a single source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    pub path: PathBuf,
    pub package: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub imports: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub funcs: Vec<Function>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub interfaces: Vec<Interface>,
}

/// A package assembled from one or more files.
///
/// The name is the registry key and is never serialized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    #[serde(skip)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub imports: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub funcs: Vec<Function>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub interfaces: Vec<Interface>,
}

impl Package {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.imports.is_empty() && self.funcs.is_empty() && self.interfaces.is_empty()
    }
}

/// Which functions survive extraction, by visibility.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FuncFilter {
    #[default]
    Exported,
    Unexported,
    All,
}

impl FuncFilter {
    pub fn admits(&self, exported: bool) -> bool {
        match self {
            FuncFilter::Exported => exported,
            FuncFilter::Unexported => !exported,
            FuncFilter::All => true,
        }
    }
}

impl fmt::Display for FuncFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FuncFilter::Exported => write!(f, "exported"),
            FuncFilter::Unexported => write!(f, "unexported"),
            FuncFilter::All => write!(f, "all"),
        }
    }
}

impl std::str::FromStr for FuncFilter {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "exported" => Ok(FuncFilter::Exported),
            "unexported" => Ok(FuncFilter::Unexported),
            "all" | "both" => Ok(FuncFilter::All),
            _ => Err(anyhow::anyhow!("unknown function filter: {s}")),
        }
    }
}
