//! glyphc-sem - Semantic Analyzer
//!
//! Lowers a parsed [`glyphc_par::ast::Program`] into an arena-indexed
//! [`node::Ast`] and runs the three fixed-order passes over it: scope
//! assignment, symbol resolution, and type checking. [`passes::analyze`]
//! is the entry point the driver calls; it either returns the fully
//! annotated tree plus the resolved scope and type tables, or leaves its
//! diagnostics in the [`Handler`](glyphc_util::Handler) it was given and
//! returns `None`.
//!
//! There is no error recovery here either: a pass that reports any error
//! makes every later pass pointless, so [`passes::analyze`] stops after
//! the first pass that leaves the handler non-empty.

pub mod node;
pub mod passes;
pub mod scope;
pub mod types;

pub use node::{Ast, Node, NodeId, NodeKind};
pub use passes::analyze;
pub use scope::{Scope, ScopeId, ScopeKind, ScopeTable, SymbolId, SymbolInfo, SymbolKind};
pub use types::{FieldUnit, FunctionSignature, Type, TypeId, TypeRegistry, TypeTrait};

#[cfg(test)]
mod edge_cases;
