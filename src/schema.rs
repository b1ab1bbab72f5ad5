//! Schema model
//!
//! A [`Schema`] is an ordered list of declarations owned by the caller.
//! Declarations are appended through explicit builders; name clashes are
//! rejected while the schema is being built, before any emitter runs.
//!
//! ```
//! use wire_idl::{Schema, Target};
//!
//! # fn main() -> wire_idl::Result<()> {
//! let mut schema = Schema::new();
//! schema.declare_type_alias("SuspectId", [(Target::Elm, "String"), (Target::Rust, "String")])?;
//!
//! let mut server = schema.declare_tagged_union("ServerCommand")?;
//! server.variant("Connected")?;
//! server.variant_with("BecomeSuspect")?.field("suspectId", "SuspectId")?;
//! server.variant_with("Echo")?.field("message", "String")?;
//!
//! assert_eq!(schema.len(), 2);
//! # Ok(())
//! # }
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::codegen::names::{
    check_identifier, is_reserved_type_name, is_rust_path_keyword, to_wire_name, IdentCase,
};
use crate::error::{IdlError, Result};
use crate::resolve::Primitive;

/// The wire key carrying the variant name
pub const DISCRIMINANT: &str = "type";

// =============================================================================
// Target
// =============================================================================

/// Output language of an emitter
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    /// Browser client
    Elm,
    /// Server
    Rust,
}

impl Target {
    /// Every target, in render order
    pub const ALL: [Target; 2] = [Target::Elm, Target::Rust];

    /// Lowercase name, as used in schema documents and config
    pub fn name(&self) -> &'static str {
        match self {
            Target::Elm => "elm",
            Target::Rust => "rust",
        }
    }

    /// Source file extension
    pub fn extension(&self) -> &'static str {
        match self {
            Target::Elm => "elm",
            Target::Rust => "rs",
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Target {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "elm" | "client" => Ok(Target::Elm),
            "rust" | "server" => Ok(Target::Rust),
            other => Err(format!("unknown target: {} (expected elm or rust)", other)),
        }
    }
}

// =============================================================================
// Declarations
// =============================================================================

/// A payload field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    /// Schema spelling (camelCase)
    pub name: String,
    /// Primitive name or alias name
    #[serde(rename = "type")]
    pub ty: String,
}

impl Field {
    /// JSON key of this field
    pub fn wire_name(&self) -> String {
        to_wire_name(&self.name)
    }
}

/// Ordered fields of a variant payload
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Record {
    fields: Vec<Field>,
}

impl Record {
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// One constructor of a tagged union
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Variant {
    name: String,
    payload: Option<Record>,
}

impl Variant {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn payload(&self) -> Option<&Record> {
        self.payload.as_ref()
    }

    /// Payload fields, empty for a bare variant
    pub fn fields(&self) -> &[Field] {
        self.payload.as_ref().map(Record::fields).unwrap_or(&[])
    }
}

/// A named set of mutually exclusive variants
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaggedUnion {
    name: String,
    variants: Vec<Variant>,
}

impl TaggedUnion {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn variants(&self) -> &[Variant] {
        &self.variants
    }

    pub fn variant(&self, name: &str) -> Option<&Variant> {
        self.variants.iter().find(|v| v.name == name)
    }
}

/// A named per-target mapping onto an underlying type
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeAlias {
    name: String,
    representations: BTreeMap<Target, String>,
}

impl TypeAlias {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Base type expression for `target`, if declared
    pub fn representation(&self, target: Target) -> Option<&str> {
        self.representations.get(&target).map(String::as_str)
    }

    pub fn representations(&self) -> &BTreeMap<Target, String> {
        &self.representations
    }
}

/// A top-level schema item
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Declaration {
    TypeAlias(TypeAlias),
    TaggedUnion(TaggedUnion),
}

impl Declaration {
    pub fn name(&self) -> &str {
        match self {
            Declaration::TypeAlias(alias) => alias.name(),
            Declaration::TaggedUnion(union) => union.name(),
        }
    }
}

// =============================================================================
// Schema
// =============================================================================

/// Ordered declarations for one generation run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Schema {
    declarations: Vec<Declaration>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declarations in insertion order
    pub fn declarations(&self) -> &[Declaration] {
        &self.declarations
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// Look up a type alias by name
    pub fn alias(&self, name: &str) -> Option<&TypeAlias> {
        self.aliases().find(|a| a.name == name)
    }

    /// Look up a tagged union by name
    pub fn union(&self, name: &str) -> Option<&TaggedUnion> {
        self.unions().find(|u| u.name == name)
    }

    pub fn aliases(&self) -> impl Iterator<Item = &TypeAlias> {
        self.declarations.iter().filter_map(|d| match d {
            Declaration::TypeAlias(alias) => Some(alias),
            Declaration::TaggedUnion(_) => None,
        })
    }

    pub fn unions(&self) -> impl Iterator<Item = &TaggedUnion> {
        self.declarations.iter().filter_map(|d| match d {
            Declaration::TaggedUnion(union) => Some(union),
            Declaration::TypeAlias(_) => None,
        })
    }

    /// Resolve every alias and field for every target; see [`crate::resolve::validate`]
    pub fn validate(&self) -> Result<()> {
        crate::resolve::validate(self)
    }

    /// Declare a type alias.
    ///
    /// Targets missing from `representations` are accepted here and reported
    /// as [`IdlError::UnsupportedTarget`] when that target is generated.
    pub fn declare_type_alias<I, S>(&mut self, name: &str, representations: I) -> Result<()>
    where
        I: IntoIterator<Item = (Target, S)>,
        S: Into<String>,
    {
        self.check_declaration_name(name)?;
        let representations = representations
            .into_iter()
            .map(|(target, repr)| (target, repr.into()))
            .collect();
        self.declarations.push(Declaration::TypeAlias(TypeAlias {
            name: name.to_string(),
            representations,
        }));
        Ok(())
    }

    /// Declare a tagged union and return a builder for its variants.
    ///
    /// The union is appended immediately, so declaration order is the order
    /// of these calls regardless of when variants are added.
    pub fn declare_tagged_union(&mut self, name: &str) -> Result<TaggedUnionBuilder<'_>> {
        self.check_declaration_name(name)?;
        self.declarations.push(Declaration::TaggedUnion(TaggedUnion {
            name: name.to_string(),
            variants: Vec::new(),
        }));
        match self.declarations.last_mut() {
            Some(Declaration::TaggedUnion(union)) => Ok(TaggedUnionBuilder { union }),
            _ => unreachable!("tagged union was just pushed"),
        }
    }

    fn check_declaration_name(&self, name: &str) -> Result<()> {
        check_identifier(name, IdentCase::Upper)?;
        if Primitive::is_neutral_name(name) || is_reserved_type_name(name) {
            return Err(IdlError::ReservedName {
                scope: "schema".to_string(),
                name: name.to_string(),
            });
        }
        if self.declarations.iter().any(|d| d.name() == name) {
            return Err(IdlError::DuplicateName {
                scope: "schema".to_string(),
                name: name.to_string(),
            });
        }
        Ok(())
    }
}

// =============================================================================
// Builders
// =============================================================================

/// Adds variants to a declared tagged union
pub struct TaggedUnionBuilder<'a> {
    union: &'a mut TaggedUnion,
}

impl<'a> TaggedUnionBuilder<'a> {
    /// Add a variant that carries only its discriminant
    pub fn variant(&mut self, name: &str) -> Result<&mut Self> {
        self.push_variant(name, None)?;
        Ok(self)
    }

    /// Add a variant with a payload record and return a builder for its fields
    pub fn variant_with(&mut self, name: &str) -> Result<RecordBuilder<'_>> {
        let scope = format!("{}.{}", self.union.name, name);
        let variant = self.push_variant(name, Some(Record::default()))?;
        let record = variant.payload.get_or_insert_with(Record::default);
        Ok(RecordBuilder { scope, record })
    }

    fn push_variant(&mut self, name: &str, payload: Option<Record>) -> Result<&mut Variant> {
        check_identifier(name, IdentCase::Upper)?;
        if is_rust_path_keyword(name) {
            return Err(IdlError::ReservedName {
                scope: self.union.name.clone(),
                name: name.to_string(),
            });
        }
        if self.union.variants.iter().any(|v| v.name == name) {
            return Err(IdlError::DuplicateName {
                scope: self.union.name.clone(),
                name: name.to_string(),
            });
        }
        self.union.variants.push(Variant {
            name: name.to_string(),
            payload,
        });
        let index = self.union.variants.len() - 1;
        Ok(&mut self.union.variants[index])
    }
}

/// Adds fields to a variant payload
pub struct RecordBuilder<'a> {
    scope: String,
    record: &'a mut Record,
}

impl<'a> RecordBuilder<'a> {
    /// Append a field. `ty` is a primitive name or an alias name; it is
    /// resolved at generation time, so aliases may be declared later.
    pub fn field(&mut self, name: &str, ty: &str) -> Result<&mut Self> {
        check_identifier(name, IdentCase::Lower)?;

        let wire = to_wire_name(name);
        if wire == DISCRIMINANT || is_rust_path_keyword(&wire) {
            return Err(IdlError::ReservedName {
                scope: self.scope.clone(),
                name: name.to_string(),
            });
        }
        if self.record.fields.iter().any(|f| f.name == name) {
            return Err(IdlError::DuplicateName {
                scope: self.scope.clone(),
                name: name.to_string(),
            });
        }
        // Distinct schema names must not share a JSON key
        if self.record.fields.iter().any(|f| f.wire_name() == wire) {
            return Err(IdlError::DuplicateName {
                scope: self.scope.clone(),
                name: wire,
            });
        }

        self.record.fields.push(Field {
            name: name.to_string(),
            ty: ty.to_string(),
        });
        Ok(self)
    }

    /// Scope used in error messages (`Union.Variant`)
    pub fn scope(&self) -> &str {
        &self.scope
    }
}
