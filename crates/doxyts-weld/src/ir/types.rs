//! Type system for doxyts
//!
//! This module maps the type tokens found in a Doxygen export (C# flavoured)
//! onto TypeScript types.
//!
//! # Type Mapping Overview
//!
//! Every source token is normalized exactly once into a [`TypeRef`], which
//! is then rendered wherever it is needed. Normalization is a pure function
//! of the token and the (optional) override table.
//!
//! ## Primitive Type Mapping
//!
//! | Source Type | TypeScript Type | Notes |
//! |-------------|----------------|-------|
//! | `bool`, `Boolean` | `boolean` | Direct mapping |
//! | `byte` .. `decimal`, `Int32`, `Double` | `number` | All numerics collapse |
//! | `string`, `String`, `char` | `string` | |
//! | `object`, `dynamic` | `any` | Dynamic values |
//! | `void`, empty token | `void` | Constructors have an empty token |
//!
//! ## Markers and Collections
//!
//! | Source Type | TypeScript Type | Notes |
//! |-------------|----------------|-------|
//! | `T?`, `T??` | `T \| null` | Any run of `?` is one marker |
//! | `T[]`, `T[,]` | `T[]` | Arrays of any rank flatten to one level |
//! | `List<T>`, `IEnumerable<T>`, ... | `T[]` | Sequence collections |
//! | `Dictionary<K, V>`, ... | `Record<string, V>` | Keys are always strings |
//! | `Foo`, `Task<int>` | `Foo`, `Task<int>` | Unknown names pass through |
//!
//! Parameter modifiers (`params`, `ref`, `out`, `in`, `this`) are stripped
//! before a token is inspected. `params` additionally marks the parameter
//! as variadic, see [`TypeNormalizer::normalize_param`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Primitive TypeScript types a source token can resolve to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TsPrimitive {
    Void,
    Boolean,
    Number,
    String,
    Any,
}

impl TsPrimitive {
    /// Convert to TypeScript type string
    pub fn to_typescript(&self) -> &'static str {
        match self {
            TsPrimitive::Void => "void",
            TsPrimitive::Boolean => "boolean",
            TsPrimitive::Number => "number",
            TsPrimitive::String => "string",
            TsPrimitive::Any => "any",
        }
    }

    /// Look up a source type name in the primitive table
    pub fn from_source_type(s: &str) -> Option<Self> {
        PRIMITIVES
            .iter()
            .find(|(name, _)| *name == s)
            .map(|(_, primitive)| *primitive)
    }
}

impl fmt::Display for TsPrimitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_typescript())
    }
}

/// Source primitive names and their TypeScript counterparts
pub const PRIMITIVES: &[(&str, TsPrimitive)] = &[
    ("void", TsPrimitive::Void),
    ("Void", TsPrimitive::Void),
    ("bool", TsPrimitive::Boolean),
    ("Boolean", TsPrimitive::Boolean),
    ("byte", TsPrimitive::Number),
    ("sbyte", TsPrimitive::Number),
    ("short", TsPrimitive::Number),
    ("ushort", TsPrimitive::Number),
    ("int", TsPrimitive::Number),
    ("uint", TsPrimitive::Number),
    ("long", TsPrimitive::Number),
    ("ulong", TsPrimitive::Number),
    ("nint", TsPrimitive::Number),
    ("nuint", TsPrimitive::Number),
    ("float", TsPrimitive::Number),
    ("double", TsPrimitive::Number),
    ("decimal", TsPrimitive::Number),
    ("Byte", TsPrimitive::Number),
    ("SByte", TsPrimitive::Number),
    ("Int16", TsPrimitive::Number),
    ("UInt16", TsPrimitive::Number),
    ("Int32", TsPrimitive::Number),
    ("UInt32", TsPrimitive::Number),
    ("Int64", TsPrimitive::Number),
    ("UInt64", TsPrimitive::Number),
    ("Single", TsPrimitive::Number),
    ("Double", TsPrimitive::Number),
    ("Decimal", TsPrimitive::Number),
    ("string", TsPrimitive::String),
    ("String", TsPrimitive::String),
    ("char", TsPrimitive::String),
    ("Char", TsPrimitive::String),
    ("object", TsPrimitive::Any),
    ("Object", TsPrimitive::Any),
    ("dynamic", TsPrimitive::Any),
];

/// Single-argument generic collections rendered as arrays
const SEQUENCE_COLLECTIONS: &[&str] = &[
    "List",
    "IList",
    "IEnumerable",
    "IReadOnlyList",
    "ICollection",
    "IReadOnlyCollection",
];

/// Two-argument generic collections rendered as records
const MAP_COLLECTIONS: &[&str] = &["Dictionary", "IDictionary", "IReadOnlyDictionary"];

/// Keyword modifiers that may prefix a parameter type token
const PARAM_MODIFIERS: &[&str] = &["params", "ref", "out", "in", "this", "readonly"];

/// Key kind of a map type
///
/// TypeScript record keys are always rendered as strings, whatever the
/// declared key type was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum MapKey {
    #[default]
    String,
}

impl MapKey {
    pub fn to_typescript(&self) -> &'static str {
        match self {
            MapKey::String => "string",
        }
    }
}

/// Normalized type of a parameter or return value
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeRef {
    /// Primitive type
    Primitive(TsPrimitive),

    /// T[] / List<T> -> T[]
    ArrayOf(Box<TypeRef>),

    /// T? -> T | null (or an optional parameter)
    Nullable(Box<TypeRef>),

    /// Dictionary<K, V> -> Record<string, V>
    MapOf { key: MapKey, value: Box<TypeRef> },

    /// Any other type name, emitted verbatim
    Opaque(String),
}

impl TypeRef {
    /// Convert to TypeScript type string
    pub fn to_typescript(&self) -> String {
        match self {
            TypeRef::Primitive(p) => p.to_typescript().to_string(),

            TypeRef::ArrayOf(inner) => format!("{}[]", inner.to_typescript_with_parens()),

            TypeRef::Nullable(inner) => format!("{} | null", inner.to_typescript()),

            TypeRef::MapOf { key, value } => {
                format!("Record<{}, {}>", key.to_typescript(), value.to_typescript())
            }

            TypeRef::Opaque(name) => name.clone(),
        }
    }

    /// Convert to TypeScript with parentheses if needed (for arrays)
    pub(crate) fn to_typescript_with_parens(&self) -> String {
        match self {
            TypeRef::Nullable(_) => format!("({})", self.to_typescript()),
            _ => self.to_typescript(),
        }
    }

    /// Check if this type carries a nullable marker
    pub fn is_nullable(&self) -> bool {
        matches!(self, TypeRef::Nullable(_))
    }

    /// Check if this is the void type
    pub fn is_void(&self) -> bool {
        matches!(self, TypeRef::Primitive(TsPrimitive::Void))
    }

    /// Strip a nullable wrapper, if any
    pub fn unwrap_nullable(&self) -> &TypeRef {
        match self {
            TypeRef::Nullable(inner) => inner,
            _ => self,
        }
    }

    /// Create the void type
    pub fn void() -> Self {
        TypeRef::Primitive(TsPrimitive::Void)
    }

    /// Create the any type
    pub fn any() -> Self {
        TypeRef::Primitive(TsPrimitive::Any)
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_typescript())
    }
}

/// Normalize a source type token with the built-in tables only
pub fn normalize(token: &str) -> TypeRef {
    TypeNormalizer::new().normalize(token)
}

/// Maps source type tokens onto [`TypeRef`]s
///
/// Overrides map a bare source type name (after markers are stripped) to a
/// TypeScript type name and win over the primitive table.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeNormalizer<'a> {
    overrides: Option<&'a BTreeMap<String, String>>,
}

impl<'a> TypeNormalizer<'a> {
    /// Create a normalizer without overrides
    pub fn new() -> Self {
        Self { overrides: None }
    }

    /// Create a normalizer consulting the given override table
    pub fn with_overrides(overrides: &'a BTreeMap<String, String>) -> Self {
        Self {
            overrides: Some(overrides),
        }
    }

    /// Normalize a type token
    pub fn normalize(&self, token: &str) -> TypeRef {
        let (_, token) = strip_modifiers(token);
        self.normalize_stripped(token)
    }

    /// Normalize a parameter type token, reporting whether it was variadic
    pub fn normalize_param(&self, token: &str) -> (TypeRef, bool) {
        let (variadic, token) = strip_modifiers(token);
        (self.normalize_stripped(token), variadic)
    }

    fn normalize_stripped(&self, token: &str) -> TypeRef {
        let token = token.trim();
        if token.is_empty() {
            return TypeRef::void();
        }

        let (base, nullable) = strip_nullable(token);

        let ty = match strip_array(base) {
            Some(element) => TypeRef::ArrayOf(Box::new(self.normalize_stripped(element))),
            None => self.normalize_base(base),
        };

        if nullable {
            TypeRef::Nullable(Box::new(ty))
        } else {
            ty
        }
    }

    fn normalize_base(&self, base: &str) -> TypeRef {
        if base.is_empty() {
            return TypeRef::void();
        }

        if let Some(target) = self.overrides.and_then(|o| o.get(base)) {
            return TypeRef::Opaque(target.clone());
        }

        if let Some((head, args)) = split_generic(base) {
            let head = simple_name(head);

            if SEQUENCE_COLLECTIONS.contains(&head) {
                return TypeRef::ArrayOf(Box::new(self.normalize_stripped(args)));
            }

            if MAP_COLLECTIONS.contains(&head) {
                let parts = split_top_level(args);
                let value = if parts.len() == 2 {
                    self.normalize_stripped(parts[1])
                } else {
                    TypeRef::any()
                };
                return TypeRef::MapOf {
                    key: MapKey::String,
                    value: Box::new(value),
                };
            }

            return TypeRef::Opaque(base.to_string());
        }

        TsPrimitive::from_source_type(simple_name(base))
            .map(TypeRef::Primitive)
            .unwrap_or_else(|| TypeRef::Opaque(base.to_string()))
    }
}

/// Strip leading keyword modifiers; true when one of them was `params`
fn strip_modifiers(token: &str) -> (bool, &str) {
    let mut variadic = false;
    let mut rest = token.trim_start();

    loop {
        let Some((word, tail)) = rest.split_once(char::is_whitespace) else {
            break;
        };
        if !PARAM_MODIFIERS.contains(&word) {
            break;
        }
        variadic |= word == "params";
        rest = tail.trim_start();
    }

    (variadic, rest)
}

/// Strip any run of trailing `?` markers
fn strip_nullable(mut token: &str) -> (&str, bool) {
    let mut nullable = false;
    while let Some(rest) = token.strip_suffix('?') {
        nullable = true;
        token = rest.trim_end();
    }
    (token, nullable)
}

/// Strip one trailing array marker (`[]`, `[,]`, ...), returning the element
fn strip_array(token: &str) -> Option<&str> {
    let body = token.strip_suffix(']')?;
    let open = body.rfind('[')?;
    let rank = &body[open + 1..];
    if rank.chars().all(|c| c == ',' || c.is_whitespace()) {
        Some(body[..open].trim_end())
    } else {
        None
    }
}

/// Split `Base<Args>` into its base name and argument text
fn split_generic(token: &str) -> Option<(&str, &str)> {
    let open = token.find('<')?;
    let inner = token.strip_suffix('>')?;
    let head = token[..open].trim();
    if head.is_empty() || open + 1 > inner.len() {
        return None;
    }
    Some((head, inner[open + 1..].trim()))
}

/// Split on commas that are not nested inside brackets
fn split_top_level(args: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (i, c) in args.char_indices() {
        match c {
            '<' | '[' | '(' => depth += 1,
            '>' | ']' | ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(args[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(args[start..].trim());

    parts
}

/// Last segment of a dotted or `::` qualified name
fn simple_name(name: &str) -> &str {
    name.rsplit(['.', ':']).next().unwrap_or(name)
}
