pub mod cli;
pub mod config;
pub mod position;
pub mod syntax;

pub use config::{AnalyzerSettings, ConfigError};
pub use position::{
    Element, EngineKind, FastSearch, PositionSearch, PositionService, ReferenceSearch, TokenAtOptions,
    TokenSnapshot, children_of, preceding_token, token_at,
};
pub use syntax::{DocumentTrees, SyntaxKind, SyntaxTree};
