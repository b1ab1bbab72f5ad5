//! Rust Code Emitter
//!
//! Renders the server module. Aliases become serde newtypes, which serialize
//! as their inner value, and tagged unions become internally tagged enums
//! (`#[serde(tag = "type")]`). Struct-variant fields are named with their
//! wire spelling so serde keys them exactly as the Elm encoder does.

use tracing::debug;

use super::config::RenderProfile;
use super::names::to_wire_name;
use crate::error::{IdlError, Result};
use crate::resolve::resolve;
use crate::schema::{Declaration, Schema, TaggedUnion, Target, TypeAlias, DISCRIMINANT};

// =============================================================================
// Public API
// =============================================================================

/// Render the complete Rust module for `schema`
pub fn emit_module(schema: &Schema, profile: &RenderProfile) -> Result<String> {
    let mut output = String::new();

    output.push_str("//! Generated by wire-idl. Do not edit.\n");
    if !schema.is_empty() {
        output.push_str("\nuse serde::{Deserialize, Serialize};\n");
    }

    for declaration in schema.declarations() {
        debug!(target: "wire_idl::rust", name = declaration.name(), "rendering declaration");
        output.push('\n');
        match declaration {
            Declaration::TypeAlias(alias) => emit_newtype(&mut output, schema, alias, profile)?,
            Declaration::TaggedUnion(union) => emit_union(&mut output, schema, union, profile)?,
        }
    }

    Ok(output)
}

/// Names of the functions generated for a union: (encoder, decoder)
pub fn function_names(union: &TaggedUnion) -> (String, String) {
    let snake = to_wire_name(union.name());
    (format!("encode_{}", snake), format!("decode_{}", snake))
}

// =============================================================================
// Newtype Emission
// =============================================================================

fn emit_newtype(
    output: &mut String,
    schema: &Schema,
    alias: &TypeAlias,
    profile: &RenderProfile,
) -> Result<()> {
    let representation = alias
        .representation(Target::Rust)
        .ok_or_else(|| IdlError::UnsupportedTarget {
            alias: alias.name().to_string(),
            target: Target::Rust,
        })?;

    let resolved = resolve(schema, Target::Rust, alias.name())?;
    let inner = rust_type(schema, representation)?;

    let mut derives = vec!["Clone", "Debug", "PartialEq"];
    if !resolved.primitive.is_float() {
        derives.extend(["Eq", "Hash"]);
    }
    emit_derives(output, &derives, profile);
    output.push_str(&format!("pub struct {}(pub {});\n", alias.name(), inner));
    Ok(())
}

// =============================================================================
// Union Emission
// =============================================================================

fn emit_union(
    output: &mut String,
    schema: &Schema,
    union: &TaggedUnion,
    profile: &RenderProfile,
) -> Result<()> {
    emit_derives(output, &["Clone", "Debug", "PartialEq"], profile);
    output.push_str(&format!("#[serde(tag = \"{}\")]\n", DISCRIMINANT));
    output.push_str(&format!("pub enum {} {{\n", union.name()));

    for variant in union.variants() {
        match variant.payload() {
            None => output.push_str(&format!("    {},\n", variant.name())),
            Some(record) if record.is_empty() => {
                output.push_str(&format!("    {} {{}},\n", variant.name()))
            }
            Some(record) => {
                output.push_str(&format!("    {} {{\n", variant.name()));
                for field in record.fields() {
                    output.push_str(&format!(
                        "        {}: {},\n",
                        profile.escape_keyword(&field.wire_name()),
                        rust_type(schema, &field.ty)?
                    ));
                }
                output.push_str("    },\n");
            }
        }
    }
    output.push_str("}\n");

    let (encoder, decoder) = function_names(union);
    output.push('\n');
    output.push_str(&format!(
        "pub fn {}(value: &{}) -> serde_json::Result<serde_json::Value> {{\n",
        encoder,
        union.name()
    ));
    output.push_str("    serde_json::to_value(value)\n");
    output.push_str("}\n");
    output.push('\n');
    output.push_str(&format!(
        "pub fn {}(value: serde_json::Value) -> serde_json::Result<{}> {{\n",
        decoder,
        union.name()
    ));
    output.push_str("    serde_json::from_value(value)\n");
    output.push_str("}\n");
    Ok(())
}

// =============================================================================
// Helper Utilities
// =============================================================================

fn emit_derives(output: &mut String, builtin: &[&str], profile: &RenderProfile) {
    let derives: Vec<&str> = builtin
        .iter()
        .copied()
        .chain(["Serialize", "Deserialize"])
        .chain(profile.extra_derives.iter().map(String::as_str))
        .collect();
    output.push_str(&format!("#[derive({})]\n", derives.join(", ")));
}

/// Rust spelling of a type reference: alias names stay nominal (they are
/// newtypes), primitives become their Rust type
fn rust_type(schema: &Schema, type_ref: &str) -> Result<String> {
    if schema.alias(type_ref).is_some() {
        return Ok(type_ref.to_string());
    }
    Ok(resolve(schema, Target::Rust, type_ref)?.expr.to_string())
}
