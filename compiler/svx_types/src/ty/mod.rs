//! Type pool.
//!
//! Every type of a compilation is stored in one [`TypeArena`] and referenced
//! by a 32-bit [`TypeId`]. Predefined types have fixed handles, so checks like
//! "is this the error type" are a single comparison.

use std::fmt::Write as _;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use svx_ir::{Name, Span, StringInterner};

/// Handle to a type in a [`TypeArena`].
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[repr(transparent)]
pub struct TypeId(u32);

impl TypeId {
    // === Predefined Types (indices 0-10) ===

    /// The error type. Produced by failed binding; propagates silently.
    pub const ERROR: Self = Self(0);
    pub const VOID: Self = Self(1);
    /// Single-bit four-state.
    pub const LOGIC: Self = Self(2);
    /// Single-bit two-state.
    pub const BIT: Self = Self(3);
    /// 32-bit signed two-state.
    pub const INT: Self = Self(4);
    /// 32-bit signed four-state.
    pub const INTEGER: Self = Self(5);
    pub const BYTE: Self = Self(6);
    pub const SHORTINT: Self = Self(7);
    pub const LONGINT: Self = Self(8);
    /// 64-bit unsigned four-state.
    pub const TIME: Self = Self(9);
    pub const STRING: Self = Self(10);

    /// Number of predefined types.
    pub const PREDEFINED_COUNT: u32 = 11;

    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn is_error(self) -> bool {
        self.0 == Self::ERROR.0
    }

    /// Keyword for predefined types.
    pub const fn keyword(self) -> Option<&'static str> {
        match self.0 {
            0 => Some("<error>"),
            1 => Some("void"),
            2 => Some("logic"),
            3 => Some("bit"),
            4 => Some("int"),
            5 => Some("integer"),
            6 => Some("byte"),
            7 => Some("shortint"),
            8 => Some("longint"),
            9 => Some("time"),
            10 => Some("string"),
            _ => None,
        }
    }
}

/// A struct or union member.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct FieldSymbol {
    pub name: Name,
    pub ty: TypeId,
    /// Declaration index for unpacked structs and unions. Bit offset from the
    /// least significant bit for packed structs.
    pub offset: u32,
    pub span: Span,
}

/// Input for declaring a struct or union member.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct FieldDecl {
    pub name: Name,
    pub ty: TypeId,
    pub span: Span,
}

impl FieldDecl {
    pub fn new(name: Name, ty: TypeId, span: Span) -> Self {
        FieldDecl { name, ty, span }
    }
}

/// Reference to one field of an aggregate type.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct FieldRef {
    /// Canonical aggregate type that owns the field.
    pub owner: TypeId,
    /// Declaration index of the field.
    pub index: u32,
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct StructType {
    /// Empty for anonymous structs.
    pub name: Name,
    pub packed: bool,
    pub fields: SmallVec<[FieldSymbol; 4]>,
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct UnionType {
    pub name: Name,
    pub packed: bool,
    pub tagged: bool,
    pub fields: SmallVec<[FieldSymbol; 4]>,
}

/// Type definitions.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum TypeKind {
    Error,
    Void,
    String,
    /// Integral vector (also covers the predefined integer atoms).
    Integral {
        width: u32,
        signed: bool,
        four_state: bool,
    },
    Struct(StructType),
    Union(UnionType),
    /// `T $[]`
    DynamicArray { element: TypeId },
    /// `typedef target name;`
    Alias { name: Name, target: TypeId },
}

/// Owns every type of a compilation.
#[derive(Clone, Debug)]
pub struct TypeArena {
    types: Vec<TypeKind>,
    integrals: FxHashMap<(u32, bool, bool), TypeId>,
    dynamic_arrays: FxHashMap<TypeId, TypeId>,
}

impl Default for TypeArena {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeArena {
    /// Create an arena holding the predefined types.
    pub fn new() -> Self {
        let mut arena = TypeArena {
            types: Vec::with_capacity(64),
            integrals: FxHashMap::default(),
            dynamic_arrays: FxHashMap::default(),
        };
        arena.types.push(TypeKind::Error);
        arena.types.push(TypeKind::Void);
        for (width, signed, four_state) in [
            (1, false, true),  // logic
            (1, false, false), // bit
            (32, true, false), // int
            (32, true, true),  // integer
            (8, true, false),  // byte
            (16, true, false), // shortint
            (64, true, false), // longint
            (64, false, true), // time
        ] {
            arena.integral(width, signed, four_state);
        }
        arena.types.push(TypeKind::String);
        debug_assert_eq!(arena.types.len(), TypeId::PREDEFINED_COUNT as usize);
        arena
    }

    fn push(&mut self, kind: TypeKind) -> TypeId {
        let id = u32::try_from(self.types.len()).unwrap_or_else(|_| panic!("type arena overflow"));
        self.types.push(kind);
        TypeId(id)
    }

    /// Intern an integral vector type.
    pub fn integral(&mut self, width: u32, signed: bool, four_state: bool) -> TypeId {
        if let Some(&id) = self.integrals.get(&(width, signed, four_state)) {
            return id;
        }
        let id = self.push(TypeKind::Integral {
            width,
            signed,
            four_state,
        });
        self.integrals.insert((width, signed, four_state), id);
        id
    }

    /// `logic [width-1:0]`
    pub fn logic_vector(&mut self, width: u32) -> TypeId {
        self.integral(width, false, true)
    }

    /// Intern `element $[]`.
    pub fn dynamic_array(&mut self, element: TypeId) -> TypeId {
        if let Some(&id) = self.dynamic_arrays.get(&element) {
            return id;
        }
        let id = self.push(TypeKind::DynamicArray { element });
        self.dynamic_arrays.insert(element, id);
        id
    }

    pub fn alias(&mut self, name: Name, target: TypeId) -> TypeId {
        self.push(TypeKind::Alias { name, target })
    }

    /// Declare a struct. Packed fields are laid out with the first declared
    /// field in the most significant bits.
    pub fn add_struct(&mut self, name: Name, packed: bool, fields: &[FieldDecl]) -> TypeId {
        let mut symbols: SmallVec<[FieldSymbol; 4]> = SmallVec::with_capacity(fields.len());
        if packed {
            let mut offset = 0u32;
            for decl in fields.iter().rev() {
                symbols.push(FieldSymbol {
                    name: decl.name,
                    ty: decl.ty,
                    offset,
                    span: decl.span,
                });
                offset = offset.saturating_add(self.bit_width(decl.ty).unwrap_or(0));
            }
            symbols.reverse();
        } else {
            symbols.extend(fields.iter().zip(0u32..).map(|(decl, index)| FieldSymbol {
                name: decl.name,
                ty: decl.ty,
                offset: index,
                span: decl.span,
            }));
        }
        self.push(TypeKind::Struct(StructType {
            name,
            packed,
            fields: symbols,
        }))
    }

    /// Declare a union. Members of a tagged or unpacked union are numbered by
    /// declaration index; members of an untagged packed union all start at bit 0.
    pub fn add_union(
        &mut self,
        name: Name,
        tagged: bool,
        packed: bool,
        fields: &[FieldDecl],
    ) -> TypeId {
        let overlay = packed && !tagged;
        let symbols = fields
            .iter()
            .zip(0u32..)
            .map(|(decl, index)| FieldSymbol {
                name: decl.name,
                ty: decl.ty,
                offset: if overlay { 0 } else { index },
                span: decl.span,
            })
            .collect();
        self.push(TypeKind::Union(UnionType {
            name,
            packed,
            tagged,
            fields: symbols,
        }))
    }

    /// Definition of `id`, without resolving aliases.
    #[inline]
    pub fn kind(&self, id: TypeId) -> &TypeKind {
        &self.types[id.index()]
    }

    /// Follow aliases to the underlying type.
    pub fn canonical(&self, mut id: TypeId) -> TypeId {
        while let TypeKind::Alias { target, .. } = self.kind(id) {
            id = *target;
        }
        id
    }

    /// Definition of the canonical type of `id`.
    pub fn canonical_kind(&self, id: TypeId) -> &TypeKind {
        self.kind(self.canonical(id))
    }

    pub fn is_error(&self, id: TypeId) -> bool {
        self.canonical(id).is_error()
    }

    pub fn is_struct(&self, id: TypeId) -> bool {
        matches!(self.canonical_kind(id), TypeKind::Struct(_))
    }

    pub fn is_packed_struct(&self, id: TypeId) -> bool {
        matches!(self.canonical_kind(id), TypeKind::Struct(s) if s.packed)
    }

    pub fn is_tagged_union(&self, id: TypeId) -> bool {
        matches!(self.canonical_kind(id), TypeKind::Union(u) if u.tagged)
    }

    /// Integral vectors and packed aggregates.
    pub fn is_integral(&self, id: TypeId) -> bool {
        match self.canonical_kind(id) {
            TypeKind::Integral { .. } => true,
            TypeKind::Struct(s) => s.packed,
            TypeKind::Union(u) => u.packed,
            _ => false,
        }
    }

    pub fn is_string(&self, id: TypeId) -> bool {
        matches!(self.canonical_kind(id), TypeKind::String)
    }

    pub fn is_signed(&self, id: TypeId) -> bool {
        matches!(self.canonical_kind(id), TypeKind::Integral { signed: true, .. })
    }

    /// Element type of a dynamic array.
    pub fn dynamic_array_element(&self, id: TypeId) -> Option<TypeId> {
        match self.canonical_kind(id) {
            TypeKind::DynamicArray { element } => Some(*element),
            _ => None,
        }
    }

    /// Width in bits of an integral or packed type. `None` for other types
    /// and for packed aggregates whose width does not fit in a `u32`.
    pub fn bit_width(&self, id: TypeId) -> Option<u32> {
        match self.canonical_kind(id) {
            TypeKind::Integral { width, .. } => Some(*width),
            TypeKind::Struct(s) if s.packed => {
                s.fields.iter().try_fold(0u32, |acc, f| acc.checked_add(self.bit_width(f.ty)?))
            }
            TypeKind::Union(u) if u.packed => {
                let widest = u
                    .fields
                    .iter()
                    .map(|f| self.bit_width(f.ty))
                    .collect::<Option<Vec<_>>>()?
                    .into_iter()
                    .max()
                    .unwrap_or(0);
                let tag_bits = if u.tagged {
                    let n = u32::try_from(u.fields.len()).unwrap_or(u32::MAX);
                    n.checked_next_power_of_two().map_or(32, u32::trailing_zeros)
                } else {
                    0
                };
                widest.checked_add(tag_bits)
            }
            _ => None,
        }
    }

    /// Members of a struct or union, in declaration order.
    pub fn fields(&self, id: TypeId) -> &[FieldSymbol] {
        match self.canonical_kind(id) {
            TypeKind::Struct(s) => &s.fields,
            TypeKind::Union(u) => &u.fields,
            _ => &[],
        }
    }

    /// Look up a member of a struct or union by name.
    pub fn find_member(&self, id: TypeId, name: Name) -> Option<FieldRef> {
        let owner = self.canonical(id);
        self.fields(owner)
            .iter()
            .zip(0u32..)
            .find(|(f, _)| f.name == name)
            .map(|(_, index)| FieldRef { owner, index })
    }

    /// The field a [`FieldRef`] points at.
    pub fn field(&self, field: FieldRef) -> &FieldSymbol {
        &self.fields(field.owner)[field.index as usize]
    }

    /// Field references of a struct or union, in declaration order.
    pub fn field_refs(&self, id: TypeId) -> impl Iterator<Item = FieldRef> + '_ {
        let owner = self.canonical(id);
        (0u32..).zip(self.fields(owner)).map(move |(index, _)| FieldRef { owner, index })
    }

    /// Matching types: identical canonical types, integral types of the same
    /// shape, or dynamic arrays of matching elements.
    pub fn is_matching(&self, a: TypeId, b: TypeId) -> bool {
        let (a, b) = (self.canonical(a), self.canonical(b));
        if a == b {
            return true;
        }
        match (self.kind(a), self.kind(b)) {
            (
                TypeKind::Integral {
                    width: w1,
                    signed: s1,
                    four_state: f1,
                },
                TypeKind::Integral {
                    width: w2,
                    signed: s2,
                    four_state: f2,
                },
            ) => w1 == w2 && s1 == s2 && f1 == f2,
            (TypeKind::DynamicArray { element: e1 }, TypeKind::DynamicArray { element: e2 }) => {
                self.is_matching(*e1, *e2)
            }
            _ => false,
        }
    }

    /// Whether a value of `source` can be assigned to `target`, possibly
    /// with an implicit conversion.
    pub fn is_assignment_compatible(&self, target: TypeId, source: TypeId) -> bool {
        self.is_matching(target, source)
            || (self.is_integral(target) && self.is_integral(source))
            || (self.is_string(target) && self.is_string(source))
    }

    /// Human-readable type name for diagnostics.
    pub fn display(&self, id: TypeId, interner: &StringInterner) -> String {
        let mut out = String::new();
        self.write_name(&mut out, id, interner);
        out
    }

    fn write_name(&self, out: &mut String, id: TypeId, interner: &StringInterner) {
        if let Some(keyword) = id.keyword() {
            out.push_str(keyword);
            return;
        }
        let named = |out: &mut String, name: Name, fallback: &str| {
            if name.is_empty() {
                out.push_str(fallback);
            } else {
                out.push_str(interner.lookup(name));
            }
        };
        match self.kind(id) {
            TypeKind::Error => out.push_str("<error>"),
            TypeKind::Void => out.push_str("void"),
            TypeKind::String => out.push_str("string"),
            TypeKind::Integral {
                width,
                signed,
                four_state,
            } => {
                out.push_str(if *four_state { "logic" } else { "bit" });
                if *signed {
                    out.push_str(" signed");
                }
                let _ = write!(out, "[{}:0]", width.saturating_sub(1));
            }
            TypeKind::Struct(s) => named(out, s.name, "<unnamed struct>"),
            TypeKind::Union(u) => named(out, u.name, "<unnamed union>"),
            TypeKind::DynamicArray { element } => {
                self.write_name(out, *element, interner);
                out.push_str("$[]");
            }
            TypeKind::Alias { name, .. } => out.push_str(interner.lookup(*name)),
        }
    }
}
