//! Scope chain and symbol table.
//!
//! A [`ScopeTable`] is an arena of [`Scope`]s, each pointing at its
//! enclosing scope by [`ScopeId`]. Name resolution never walks sibling
//! scopes, only the parent chain, and the first match wins — this is
//! exactly what gives shadowing its usual meaning. Scope names are purely
//! informational (diagnostics, and eventually debug info in
//! `glyphc-gen`); duplicates among sibling scopes of the same kind are
//! disambiguated with a numeric suffix so two `block` scopes under the
//! same function don't print identically in a trace.

use std::cell::RefCell;
use std::collections::HashMap;

use glyphc_util::{Idx, IndexVec, Symbol};

use crate::types::Type;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(pub u32);

impl Idx for ScopeId {
    fn from_usize(idx: usize) -> Self {
        ScopeId(idx as u32)
    }
    fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SymbolId(pub u32);

impl Idx for SymbolId {
    fn from_usize(idx: usize) -> Self {
        SymbolId(idx as u32)
    }
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// What kind of construct opened a scope. Carried mainly for naming; it
/// has no bearing on resolution semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    Global,
    Function(Symbol),
    Block,
    For,
    While,
}

impl ScopeKind {
    fn base_name(&self) -> String {
        match self {
            ScopeKind::Global => "global".to_string(),
            ScopeKind::Function(name) => name.as_str().to_string(),
            ScopeKind::Block => "block".to_string(),
            ScopeKind::For => "for".to_string(),
            ScopeKind::While => "while".to_string(),
        }
    }
}

#[derive(Debug)]
pub struct Scope {
    pub name: String,
    pub kind: ScopeKind,
    pub parent: Option<ScopeId>,
    bindings: HashMap<Symbol, SymbolId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    LocalVariable,
    FunctionArgument,
    Function,
}

impl SymbolKind {
    pub fn describe(&self) -> &'static str {
        match self {
            SymbolKind::LocalVariable => "local variable",
            SymbolKind::FunctionArgument => "function argument",
            SymbolKind::Function => "function",
        }
    }
}

#[derive(Debug)]
pub struct SymbolInfo {
    pub name: Symbol,
    pub scope: ScopeId,
    pub kind: SymbolKind,
    ty: RefCell<Option<Type>>,
}

/// Scope tree plus the flat symbol arena. Symbols are owned here rather
/// than by the declaring AST node so a node only ever needs to carry a
/// [`SymbolId`] (see [`crate::node::Node::symbol`]), not the full
/// [`SymbolInfo`].
pub struct ScopeTable {
    scopes: IndexVec<ScopeId, Scope>,
    symbols: IndexVec<SymbolId, SymbolInfo>,
    name_counts: RefCell<HashMap<String, u32>>,
}

impl ScopeTable {
    pub fn new() -> Self {
        let mut scopes = IndexVec::new();
        scopes.push(Scope {
            name: "global".to_string(),
            kind: ScopeKind::Global,
            parent: None,
            bindings: HashMap::new(),
        });
        Self {
            scopes,
            symbols: IndexVec::new(),
            name_counts: RefCell::new(HashMap::new()),
        }
    }

    pub fn root(&self) -> ScopeId {
        ScopeId(0)
    }

    pub fn scope(&self, id: ScopeId) -> &Scope {
        self.scopes.get(id).expect("dangling ScopeId")
    }

    pub fn parent_of(&self, id: ScopeId) -> Option<ScopeId> {
        self.scope(id).parent
    }

    /// Opens a new child scope under `parent`, assigning it a unique
    /// display name derived from `kind`.
    pub fn enter(&mut self, parent: ScopeId, kind: ScopeKind) -> ScopeId {
        let base = kind.base_name();
        let name = {
            let mut counts = self.name_counts.borrow_mut();
            let count = counts.entry(base.clone()).or_insert(0);
            let name = if *count == 0 {
                base.clone()
            } else {
                format!("{}#{}", base, count)
            };
            *count += 1;
            name
        };
        self.scopes.push(Scope {
            name,
            kind,
            parent: Some(parent),
            bindings: HashMap::new(),
        })
    }

    /// Declares `name` in `scope`. Fails with the existing [`SymbolId`] if
    /// `name` is already bound in that exact scope — shadowing an outer
    /// scope's binding is always fine, redeclaring in the same scope is
    /// not.
    pub fn declare(&mut self, scope: ScopeId, name: Symbol, kind: SymbolKind) -> Result<SymbolId, SymbolId> {
        if let Some(&existing) = self.scopes[scope].bindings.get(&name) {
            return Err(existing);
        }
        let id = self.symbols.push(SymbolInfo {
            name,
            scope,
            kind,
            ty: RefCell::new(None),
        });
        self.scopes[scope].bindings.insert(name, id);
        Ok(id)
    }

    pub fn exists_on_same_scope(&self, scope: ScopeId, name: Symbol) -> bool {
        self.scopes[scope].bindings.contains_key(&name)
    }

    /// Walks the parent chain starting at `scope`, returning the first
    /// binding found.
    pub fn find(&self, scope: ScopeId, name: Symbol) -> Option<SymbolId> {
        let mut current = Some(scope);
        while let Some(id) = current {
            if let Some(&sid) = self.scopes[id].bindings.get(&name) {
                return Some(sid);
            }
            current = self.scopes[id].parent;
        }
        None
    }

    pub fn symbol(&self, id: SymbolId) -> &SymbolInfo {
        self.symbols.get(id).expect("dangling SymbolId")
    }

    pub fn symbol_type(&self, id: SymbolId) -> Option<Type> {
        self.symbol(id).ty.borrow().clone()
    }

    pub fn set_symbol_type(&self, id: SymbolId, ty: Type) {
        *self.symbol(id).ty.borrow_mut() = Some(ty);
    }
}

impl Default for ScopeTable {
    fn default() -> Self {
        Self::new()
    }
}
