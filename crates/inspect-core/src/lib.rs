pub mod aggregate;
pub mod analyzer;
pub mod config;
pub mod doc;
pub mod error;
pub mod imports;
pub mod interface;
pub mod merge;
pub mod pipeline;
pub mod registry;
pub mod signature;
pub mod types;
pub mod visibility;

pub use analyzer::{LanguageAnalyzer, ParsedFile};
pub use config::Config;
pub use error::{InspectError, PartialCollection};
pub use interface::{InterfaceDecl, MemberShape};
pub use pipeline::InspectPipeline;
pub use registry::Registry;
pub use signature::{Absence, DocComment, Extraction, FuncDecl};
pub use types::*;
pub use visibility::{UppercaseExported, VisibilityPolicy};
