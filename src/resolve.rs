//! Type Resolution
//!
//! Maps a declared field type to a target's codec expression by following
//! type-alias chains down to a primitive. Resolution is iterative and keeps
//! the alias path, so a cyclic chain is reported instead of looping.

use std::collections::HashSet;

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use serde_json::Value;

use crate::codegen::{elm, rust};
use crate::error::{IdlError, Result};
use crate::schema::{Schema, Target};

// =============================================================================
// Primitives
// =============================================================================

/// Built-in types with a canonical JSON representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    String,
    Int,
    Float,
    Bool,
}

/// (recognized name, primitive, codec expression)
type PrimitiveEntry = (&'static str, Primitive, &'static str);

/// Elm codec expressions are `Json.Encode`/`Json.Decode` function names
const ELM_PRIMITIVES: &[PrimitiveEntry] = &[
    ("String", Primitive::String, "string"),
    ("Int", Primitive::Int, "int"),
    ("Float", Primitive::Float, "float"),
    ("Bool", Primitive::Bool, "bool"),
];

/// Rust codec expressions are serde-serializable types
const RUST_PRIMITIVES: &[PrimitiveEntry] = &[
    ("String", Primitive::String, "String"),
    ("Int", Primitive::Int, "i64"),
    ("Float", Primitive::Float, "f64"),
    ("Bool", Primitive::Bool, "bool"),
    ("i64", Primitive::Int, "i64"),
    ("i32", Primitive::Int, "i32"),
    ("u64", Primitive::Int, "u64"),
    ("u32", Primitive::Int, "u32"),
    ("f64", Primitive::Float, "f64"),
    ("f32", Primitive::Float, "f32"),
    ("bool", Primitive::Bool, "bool"),
];

impl Primitive {
    fn table(target: Target) -> &'static [PrimitiveEntry] {
        match target {
            Target::Elm => ELM_PRIMITIVES,
            Target::Rust => RUST_PRIMITIVES,
        }
    }

    /// Look up a primitive name recognized by `target`
    pub fn lookup(target: Target, name: &str) -> Option<(Primitive, &'static str)> {
        Self::table(target)
            .iter()
            .find(|(recognized, _, _)| *recognized == name)
            .map(|(_, primitive, expr)| (*primitive, *expr))
    }

    /// Whether `name` is one of the target-neutral primitive names
    pub fn is_neutral_name(name: &str) -> bool {
        ELM_PRIMITIVES.iter().any(|(recognized, _, _)| *recognized == name)
    }

    /// Whether a JSON value has this primitive's canonical representation
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            Primitive::String => value.is_string(),
            Primitive::Int => value.is_i64() || value.is_u64(),
            Primitive::Float => value.is_number(),
            Primitive::Bool => value.is_boolean(),
        }
    }

    /// JSON kind name, for error messages
    pub fn json_kind(&self) -> &'static str {
        match self {
            Primitive::String => "string",
            Primitive::Int => "integer",
            Primitive::Float => "number",
            Primitive::Bool => "boolean",
        }
    }

    /// Whether values of this primitive support `Eq` and `Hash` in Rust
    pub fn is_float(&self) -> bool {
        matches!(self, Primitive::Float)
    }
}

// =============================================================================
// Resolution
// =============================================================================

/// A type reference resolved for one target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// The primitive at the end of the alias chain
    pub primitive: Primitive,
    /// Target codec expression (Elm codec function, Rust type)
    pub expr: &'static str,
    /// Aliases traversed, outermost first
    pub alias_path: Vec<String>,
}

impl Resolution {
    /// Whether the reference named an alias rather than a primitive
    pub fn is_alias(&self) -> bool {
        !self.alias_path.is_empty()
    }
}

/// Resolve `type_ref` for `target`.
///
/// Primitives win over aliases. An alias is followed through its
/// representation for `target`; a missing representation is
/// [`IdlError::UnsupportedTarget`], revisiting an alias on the current path
/// is [`IdlError::CyclicAlias`], and a name that is neither a primitive nor
/// an alias is [`IdlError::UnknownType`].
pub fn resolve(schema: &Schema, target: Target, type_ref: &str) -> Result<Resolution> {
    let mut alias_path: Vec<String> = Vec::new();
    let mut current = type_ref;

    loop {
        if let Some((primitive, expr)) = Primitive::lookup(target, current) {
            return Ok(Resolution {
                primitive,
                expr,
                alias_path,
            });
        }

        let alias = schema.alias(current).ok_or_else(|| IdlError::UnknownType {
            name: current.to_string(),
            target,
            suggestion: suggest(schema, target, current),
        })?;

        if alias_path.iter().any(|seen| seen == current) {
            alias_path.push(current.to_string());
            return Err(IdlError::CyclicAlias { path: alias_path });
        }
        alias_path.push(current.to_string());

        current = alias
            .representation(target)
            .ok_or_else(|| IdlError::UnsupportedTarget {
                alias: alias.name().to_string(),
                target,
            })?;
    }
}

/// Closest known type name for an unresolvable reference
fn suggest(schema: &Schema, target: Target, unknown: &str) -> Option<String> {
    let matcher = SkimMatcherV2::default().ignore_case();

    let candidates = Primitive::table(target)
        .iter()
        .map(|(name, _, _)| *name)
        .chain(schema.aliases().map(|a| a.name()));

    candidates
        .filter(|candidate| *candidate != unknown)
        .filter_map(|candidate| {
            matcher
                .fuzzy_match(candidate, unknown)
                .map(|score| (score, candidate))
        })
        .max_by_key(|(score, _)| *score)
        .map(|(_, candidate)| candidate.to_string())
}

/// The primitive a type reference carries on the wire.
///
/// Both targets must resolve it to the same primitive, otherwise the client
/// and server would encode the field differently.
pub fn wire_primitive(schema: &Schema, type_ref: &str) -> Result<Primitive> {
    let elm = resolve(schema, Target::Elm, type_ref)?.primitive;
    let rust = resolve(schema, Target::Rust, type_ref)?.primitive;
    if elm != rust {
        return Err(IdlError::MismatchedRepresentation {
            name: type_ref.to_string(),
            elm: elm.json_kind(),
            rust: rust.json_kind(),
        });
    }
    Ok(elm)
}

/// Resolve every alias and field of `schema` for every target.
///
/// Emitters assume a validated schema, so [`crate::codegen::generate`] runs
/// this before rendering anything.
pub fn validate(schema: &Schema) -> Result<()> {
    for union in schema.unions() {
        if union.variants().is_empty() {
            return Err(IdlError::EmptyUnion {
                name: union.name().to_string(),
            });
        }
    }

    for target in Target::ALL {
        for alias in schema.aliases() {
            resolve(schema, target, alias.name())?;
        }
        for union in schema.unions() {
            for variant in union.variants() {
                for field in variant.fields() {
                    resolve(schema, target, &field.ty)?;
                }
            }
        }
    }

    for alias in schema.aliases() {
        wire_primitive(schema, alias.name())?;
    }

    check_module_namespaces(schema)
}

/// Names that share one namespace in a generated module must be unique.
///
/// Elm constructors of every union live in the module's value namespace, as
/// do the generated codec functions of both targets.
fn check_module_namespaces(schema: &Schema) -> Result<()> {
    let mut constructors = HashSet::new();
    let mut elm_functions = HashSet::new();
    let mut rust_functions = HashSet::new();

    for union in schema.unions() {
        for variant in union.variants() {
            if !constructors.insert(variant.name()) {
                return Err(IdlError::DuplicateName {
                    scope: "schema".to_string(),
                    name: variant.name().to_string(),
                });
            }
        }

        let (encoder, decoder, field_decoder) = elm::function_names(union);
        for function in [encoder, decoder, field_decoder] {
            if !elm_functions.insert(function.clone()) {
                return Err(IdlError::DuplicateName {
                    scope: "elm module".to_string(),
                    name: function,
                });
            }
        }

        let (encoder, decoder) = rust::function_names(union);
        for function in [encoder, decoder] {
            if !rust_functions.insert(function.clone()) {
                return Err(IdlError::DuplicateName {
                    scope: "rust module".to_string(),
                    name: function,
                });
            }
        }
    }
    Ok(())
}
