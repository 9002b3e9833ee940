//! glyphc-util - Core Utilities and Foundation Types
//!
//! Fundamental types shared across every stage of the pipeline: interned
//! identifiers ([`symbol`]), typed index vectors ([`index_vec`]), source
//! locations and file maps ([`span`]), and diagnostic reporting
//! ([`diagnostic`]).
//!
//! None of these types know anything about the language being compiled;
//! they are the vocabulary every other crate builds on.

pub mod def_id;
pub mod diagnostic;
pub mod error;
pub mod index_vec;
pub mod span;
pub mod symbol;

pub use def_id::{DefId, DefIdGenerator};
pub use diagnostic::{Diagnostic, DiagnosticBuilder, DiagnosticCode, Handler, Level, SourceSnippet};
pub use error::{
    DiagnosticError, DiagnosticResult, IndexVecError, IndexVecResult, SourceMapError,
    SourceMapResult, SymbolError, SymbolResult,
};
pub use index_vec::{Idx, IndexVec};
pub use span::{FileId, SourceFile, SourceMap, Span};
pub use symbol::Symbol;

pub use rustc_hash::{FxHashMap, FxHashSet};
