//! The type system: [`Type`], the capability traits types carry, and the
//! [`TypeRegistry`] that interns them.
//!
//! Glyph has six primitive types, fixed-size arrays, and function types —
//! nothing nominal, nothing generic. Operators never branch on a type's
//! concrete identity; instead each `Type` advertises the [`TypeTrait`]s it
//! implements, and the type pass (and later, code generation) dispatches
//! through those. This keeps `integer` and `double` interchangeable
//! wherever the grammar only cares that a type is a `Field`, rather than
//! hardcoding "integer or double" at every arithmetic site.

use std::collections::HashMap;

use glyphc_util::Idx;

/// A resolved Glyph type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    Integer,
    Double,
    Boolean,
    Char,
    Void,
    String,
    /// Fixed-size array of a homogeneous element type.
    Array(Box<Type>, u32),
    Function(FunctionSignature),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FunctionSignature {
    pub params: Vec<Type>,
    pub ret: Box<Type>,
}

/// A capability a type may implement. Operators dispatch through these,
/// never through `match`ing on `Type` variants directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeTrait {
    /// `==` / `!=`.
    Boolean,
    /// `+` `-` `*` `/`, and the unit value used for `++` / `--`.
    Field,
    /// `<` `<=` `>` `>=`, and prefix `-` / `+`.
    Ordered,
    /// `base[index]`.
    Indexable,
    /// `callee(args...)`.
    Callable,
}

impl Type {
    /// The `TypeTrait`s this type implements, per the assignment table:
    /// integer and double get `Field` + `Ordered` + `Boolean`; boolean and
    /// char get `Boolean` only; arrays and strings get `Indexable`;
    /// functions get `Callable`; void gets nothing.
    pub fn traits(&self) -> &'static [TypeTrait] {
        match self {
            Type::Integer | Type::Double => &[TypeTrait::Field, TypeTrait::Ordered, TypeTrait::Boolean],
            Type::Boolean | Type::Char => &[TypeTrait::Boolean],
            Type::Array(..) | Type::String => &[TypeTrait::Indexable],
            Type::Function(_) => &[TypeTrait::Callable],
            Type::Void => &[],
        }
    }

    pub fn has_trait(&self, t: TypeTrait) -> bool {
        self.traits().contains(&t)
    }

    /// The unit value added/subtracted by `++` and `--`. Only meaningful
    /// for `Field` types.
    pub fn field_unit(&self) -> Option<FieldUnit> {
        match self {
            Type::Integer => Some(FieldUnit::Integer(1)),
            Type::Double => Some(FieldUnit::Double(1.0)),
            _ => None,
        }
    }

    /// The element type produced by indexing, if this type is `Indexable`.
    pub fn element_type(&self) -> Option<Type> {
        match self {
            Type::Array(elem, _) => Some((**elem).clone()),
            Type::String => Some(Type::Char),
            _ => None,
        }
    }

    pub fn is_primitive(&self) -> bool {
        matches!(
            self,
            Type::Integer | Type::Double | Type::Boolean | Type::Char | Type::Void | Type::String
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldUnit {
    Integer(i32),
    Double(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeId(pub u32);

impl Idx for TypeId {
    fn from_usize(idx: usize) -> Self {
        TypeId(idx as u32)
    }
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// Interns [`Type`]s so structurally-identical types (two uses of
/// `array[4] of integer`, say) share one [`TypeId`]. The six primitives
/// are interned up front; array and function types are interned lazily as
/// the type pass encounters them. `glyphc-mir` is expected to use the
/// registry to memoize the eventual LLVM type for each `TypeId` rather
/// than recomputing it per use site.
pub struct TypeRegistry {
    types: Vec<Type>,
    index: HashMap<Type, TypeId>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            types: Vec::new(),
            index: HashMap::new(),
        };
        for ty in [
            Type::Integer,
            Type::Double,
            Type::Boolean,
            Type::Char,
            Type::Void,
            Type::String,
        ] {
            registry.intern(ty);
        }
        registry
    }

    pub fn intern(&mut self, ty: Type) -> TypeId {
        if let Some(&id) = self.index.get(&ty) {
            return id;
        }
        let id = TypeId(self.types.len() as u32);
        self.types.push(ty.clone());
        self.index.insert(ty, id);
        id
    }

    pub fn get(&self, id: TypeId) -> &Type {
        &self.types[id.index()]
    }

    pub fn lookup(&self, ty: &Type) -> Option<TypeId> {
        self.index.get(ty).copied()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_traits() {
        let t = Type::Integer;
        assert!(t.has_trait(TypeTrait::Field));
        assert!(t.has_trait(TypeTrait::Ordered));
        assert!(t.has_trait(TypeTrait::Boolean));
        assert!(!t.has_trait(TypeTrait::Indexable));
        assert!(!t.has_trait(TypeTrait::Callable));
    }

    #[test]
    fn test_double_traits_match_integer() {
        assert_eq!(Type::Double.traits(), Type::Integer.traits());
    }

    #[test]
    fn test_boolean_traits() {
        let t = Type::Boolean;
        assert!(t.has_trait(TypeTrait::Boolean));
        assert!(!t.has_trait(TypeTrait::Field));
        assert!(!t.has_trait(TypeTrait::Ordered));
    }

    #[test]
    fn test_char_traits() {
        assert_eq!(Type::Char.traits(), Type::Boolean.traits());
    }

    #[test]
    fn test_array_is_indexable_only() {
        let t = Type::Array(Box::new(Type::Integer), 4);
        assert!(t.has_trait(TypeTrait::Indexable));
        assert!(!t.has_trait(TypeTrait::Field));
    }

    #[test]
    fn test_string_is_indexable_only() {
        assert!(Type::String.has_trait(TypeTrait::Indexable));
    }

    #[test]
    fn test_function_is_callable_only() {
        let t = Type::Function(FunctionSignature {
            params: vec![Type::Integer],
            ret: Box::new(Type::Boolean),
        });
        assert!(t.has_trait(TypeTrait::Callable));
        assert!(!t.has_trait(TypeTrait::Field));
    }

    #[test]
    fn test_void_has_no_traits() {
        assert!(Type::Void.traits().is_empty());
    }

    #[test]
    fn test_array_element_type() {
        let t = Type::Array(Box::new(Type::Double), 4);
        assert_eq!(t.element_type(), Some(Type::Double));
    }

    #[test]
    fn test_string_element_type_is_char() {
        assert_eq!(Type::String.element_type(), Some(Type::Char));
    }

    #[test]
    fn test_non_indexable_element_type_is_none() {
        assert_eq!(Type::Integer.element_type(), None);
    }

    #[test]
    fn test_field_unit_integer() {
        assert_eq!(Type::Integer.field_unit(), Some(FieldUnit::Integer(1)));
    }

    #[test]
    fn test_field_unit_double() {
        assert_eq!(Type::Double.field_unit(), Some(FieldUnit::Double(1.0)));
    }

    #[test]
    fn test_field_unit_absent_for_non_field_types() {
        assert_eq!(Type::Boolean.field_unit(), None);
    }

    #[test]
    fn test_registry_prepopulates_primitives() {
        let registry = TypeRegistry::new();
        assert_eq!(registry.len(), 6);
        assert!(registry.lookup(&Type::Integer).is_some());
    }

    #[test]
    fn test_registry_interns_structurally_equal_arrays_once() {
        let mut registry = TypeRegistry::new();
        let before = registry.len();
        let a = registry.intern(Type::Array(Box::new(Type::Integer), 4));
        let b = registry.intern(Type::Array(Box::new(Type::Integer), 4));
        assert_eq!(a, b);
        assert_eq!(registry.len(), before + 1);
    }

    #[test]
    fn test_registry_distinguishes_different_array_sizes() {
        let mut registry = TypeRegistry::new();
        let a = registry.intern(Type::Array(Box::new(Type::Integer), 4));
        let b = registry.intern(Type::Array(Box::new(Type::Integer), 8));
        assert_ne!(a, b);
    }

    #[test]
    fn test_registry_get_round_trips() {
        let mut registry = TypeRegistry::new();
        let id = registry.intern(Type::Array(Box::new(Type::Char), 16));
        assert_eq!(registry.get(id), &Type::Array(Box::new(Type::Char), 16));
    }
}
