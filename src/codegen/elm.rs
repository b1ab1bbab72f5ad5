//! Elm Code Emitter
//!
//! Renders the client module: a type alias per alias declaration and, per
//! tagged union, the custom type, a `Json.Encode` encoder and a
//! `Json.Decode` decoder that dispatches on the `"type"` discriminant.
//!
//! Codecs are always referenced fully qualified. Elm rejects shadowing, so
//! local bindings that would hide a top-level function or an enclosing
//! binding get a trailing underscore.

use tracing::debug;

use super::config::RenderProfile;
use super::names::type_to_var;
use crate::error::{IdlError, Result};
use crate::resolve::resolve;
use crate::schema::{Declaration, Field, Schema, TaggedUnion, Target, TypeAlias, DISCRIMINANT};

/// Parameter name of each union's field decoder
const TAG_PARAM: &str = "t";

// =============================================================================
// Public API
// =============================================================================

/// Render the complete Elm module for `schema`
pub fn emit_module(schema: &Schema, profile: &RenderProfile) -> Result<String> {
    let mut output = String::new();
    let top_level = top_level_values(schema);

    emit_header(&mut output, schema, profile);

    for declaration in schema.declarations() {
        debug!(target: "wire_idl::elm", name = declaration.name(), "rendering declaration");
        output.push_str("\n\n");
        match declaration {
            Declaration::TypeAlias(alias) => emit_alias(&mut output, alias)?,
            Declaration::TaggedUnion(union) => {
                emit_union(&mut output, schema, union, profile, &top_level)?
            }
        }
    }

    Ok(output)
}

/// Names of the functions generated for a union: (encoder, decoder, field decoder)
pub fn function_names(union: &TaggedUnion) -> (String, String, String) {
    let var = type_to_var(union.name());
    (
        format!("encode{}", union.name()),
        format!("{}Decoder", var),
        format!("{}FieldDecoder", var),
    )
}

// =============================================================================
// Header
// =============================================================================

fn emit_header(output: &mut String, schema: &Schema, profile: &RenderProfile) {
    let mut exports = Vec::new();
    for declaration in schema.declarations() {
        match declaration {
            Declaration::TypeAlias(alias) => exports.push(alias.name().to_string()),
            Declaration::TaggedUnion(union) => {
                let (encoder, decoder, _) = function_names(union);
                exports.push(format!("{}(..)", union.name()));
                exports.push(encoder);
                exports.push(decoder);
            }
        }
    }

    if exports.is_empty() {
        output.push_str(&format!("module {} exposing (..)\n", profile.module_name));
    } else {
        output.push_str(&format!("module {} exposing\n", profile.module_name));
        for (i, export) in exports.iter().enumerate() {
            let punct = if i == 0 { '(' } else { ',' };
            output.push_str(&format!("    {} {}\n", punct, export));
        }
        output.push_str("    )\n");
    }

    output.push_str("\n{-| Generated by wire-idl. Do not edit.\n-}\n\n");
    output.push_str("import Json.Decode exposing (Decoder)\n");
    output.push_str("import Json.Decode.Pipeline\n");
    output.push_str("import Json.Encode\n");
}

// =============================================================================
// Alias Emission
// =============================================================================

fn emit_alias(output: &mut String, alias: &TypeAlias) -> Result<()> {
    let representation = alias
        .representation(Target::Elm)
        .ok_or_else(|| IdlError::UnsupportedTarget {
            alias: alias.name().to_string(),
            target: Target::Elm,
        })?;
    output.push_str(&format!("type alias {} =\n    {}\n", alias.name(), representation));
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
    top_level: &[String],
) -> Result<()> {
    emit_type(output, union, profile);
    output.push_str("\n\n");
    emit_encoder(output, schema, union, profile, top_level)?;
    output.push_str("\n\n");
    emit_field_decoder(output, schema, union, profile, top_level)?;
    output.push_str("\n\n");
    emit_decoder(output, union);
    Ok(())
}

fn emit_type(output: &mut String, union: &TaggedUnion, profile: &RenderProfile) {
    output.push_str(&format!("type {}\n", union.name()));

    for (i, variant) in union.variants().iter().enumerate() {
        let punct = if i == 0 { '=' } else { '|' };
        match variant.payload() {
            None => output.push_str(&format!("    {} {}\n", punct, variant.name())),
            Some(record) if record.is_empty() => {
                output.push_str(&format!("    {} {} {{}}\n", punct, variant.name()))
            }
            Some(record) => {
                output.push_str(&format!("    {} {}\n", punct, variant.name()));
                for (j, field) in record.fields().iter().enumerate() {
                    let punct = if j == 0 { '{' } else { ',' };
                    output.push_str(&format!(
                        "        {} {} : {}\n",
                        punct,
                        profile.escape_keyword(&field.name),
                        field.ty
                    ));
                }
                output.push_str("        }\n");
            }
        }
    }
}

fn emit_encoder(
    output: &mut String,
    schema: &Schema,
    union: &TaggedUnion,
    profile: &RenderProfile,
    top_level: &[String],
) -> Result<()> {
    let (encoder, _, _) = function_names(union);
    let scrutinee = local_name(profile, &type_to_var(union.name()), top_level);

    output.push_str(&format!("{} : {} -> Json.Encode.Value\n", encoder, union.name()));
    output.push_str(&format!("{} {} =\n", encoder, scrutinee));
    output.push_str(&format!("    case {} of\n", scrutinee));

    for (i, variant) in union.variants().iter().enumerate() {
        if i > 0 {
            output.push('\n');
        }

        let mut taken = top_level.to_vec();
        taken.push(scrutinee.clone());
        let binding = local_name(profile, &type_to_var(variant.name()), &taken);

        match variant.payload() {
            None => output.push_str(&format!("        {} ->\n", variant.name())),
            Some(record) if record.is_empty() => {
                output.push_str(&format!("        {} _ ->\n", variant.name()))
            }
            Some(_) => output.push_str(&format!("        {} {} ->\n", variant.name(), binding)),
        }

        output.push_str("            Json.Encode.object\n");
        output.push_str(&format!(
            "                [ ( \"{}\", Json.Encode.string \"{}\" )\n",
            DISCRIMINANT,
            variant.name()
        ));
        for field in variant.fields() {
            let codec = resolve(schema, Target::Elm, &field.ty)?.expr;
            output.push_str(&format!(
                "                , ( \"{}\", Json.Encode.{} {}.{} )\n",
                field.wire_name(),
                codec,
                binding,
                profile.escape_keyword(&field.name)
            ));
        }
        output.push_str("                ]\n");
    }
    Ok(())
}

fn emit_field_decoder(
    output: &mut String,
    schema: &Schema,
    union: &TaggedUnion,
    profile: &RenderProfile,
    top_level: &[String],
) -> Result<()> {
    let (_, _, field_decoder) = function_names(union);

    output.push_str(&format!("{} : String -> Decoder {}\n", field_decoder, union.name()));
    output.push_str(&format!("{} {} =\n", field_decoder, TAG_PARAM));
    output.push_str(&format!("    case {} of\n", TAG_PARAM));

    for variant in union.variants() {
        output.push_str(&format!("        \"{}\" ->\n", variant.name()));
        match variant.payload() {
            None => output.push_str(&format!(
                "            Json.Decode.succeed {}\n",
                variant.name()
            )),
            Some(record) if record.is_empty() => output.push_str(&format!(
                "            Json.Decode.succeed ({} {{}})\n",
                variant.name()
            )),
            Some(record) => {
                emit_pipeline(output, schema, variant.name(), record.fields(), profile, top_level)?
            }
        }
        output.push('\n');
    }

    output.push_str("        _ ->\n");
    output.push_str(&format!(
        "            Json.Decode.fail (\"Unrecognized type: \" ++ {})\n",
        TAG_PARAM
    ));
    Ok(())
}

/// `Json.Decode.succeed (\a b -> V { a = a, b = b })` followed by one
/// `required` step per field, in declared order
fn emit_pipeline(
    output: &mut String,
    schema: &Schema,
    variant: &str,
    fields: &[Field],
    profile: &RenderProfile,
    top_level: &[String],
) -> Result<()> {
    let mut taken = top_level.to_vec();
    taken.push(TAG_PARAM.to_string());

    let mut params = Vec::with_capacity(fields.len());
    for field in fields {
        let param = local_name(profile, &field.name, &taken);
        taken.push(param.clone());
        params.push(param);
    }

    let assignments: Vec<String> = fields
        .iter()
        .zip(&params)
        .map(|(field, param)| format!("{} = {}", profile.escape_keyword(&field.name), param))
        .collect();

    output.push_str(&format!(
        "            Json.Decode.succeed (\\{} -> {} {{ {} }})\n",
        params.join(" "),
        variant,
        assignments.join(", ")
    ));

    for field in fields {
        let codec = resolve(schema, Target::Elm, &field.ty)?.expr;
        output.push_str(&format!(
            "                |> Json.Decode.Pipeline.required \"{}\" Json.Decode.{}\n",
            field.wire_name(),
            codec
        ));
    }
    Ok(())
}

fn emit_decoder(output: &mut String, union: &TaggedUnion) {
    let (_, decoder, field_decoder) = function_names(union);

    output.push_str(&format!("{} : Decoder {}\n", decoder, union.name()));
    output.push_str(&format!("{} =\n", decoder));
    output.push_str(&format!(
        "    Json.Decode.field \"{}\" Json.Decode.string\n",
        DISCRIMINANT
    ));
    output.push_str(&format!("        |> Json.Decode.andThen {}\n", field_decoder));
}

// =============================================================================
// Helper Utilities
// =============================================================================

/// Every top-level value the module defines
fn top_level_values(schema: &Schema) -> Vec<String> {
    schema
        .unions()
        .flat_map(|union| {
            let (encoder, decoder, field_decoder) = function_names(union);
            [encoder, decoder, field_decoder]
        })
        .collect()
}

/// Keyword-escape `name`, then suffix `_` until it clashes with nothing in `taken`
fn local_name(profile: &RenderProfile, name: &str, taken: &[String]) -> String {
    let mut local = profile.escape_keyword(name);
    while taken.iter().any(|t| *t == local) {
        local.push('_');
    }
    local
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(schema: &Schema) -> String {
        emit_module(schema, &RenderProfile::elm()).unwrap()
    }

    #[test]
    fn test_empty_schema_exposes_everything() {
        let code = render(&Schema::new());
        assert!(code.starts_with("module Commands exposing (..)\n"));
        assert!(code.ends_with("import Json.Encode\n"));
    }

    #[test]
    fn test_alias() {
        let mut schema = Schema::new();
        schema
            .declare_type_alias("SuspectId", [(Target::Elm, "String"), (Target::Rust, "String")])
            .unwrap();
        let code = render(&schema);
        assert!(code.contains("    ( SuspectId\n    )\n"));
        assert!(code.contains("\n\n\ntype alias SuspectId =\n    String\n"));
    }

    #[test]
    fn test_alias_without_elm_representation() {
        let mut schema = Schema::new();
        schema.declare_type_alias("Score", [(Target::Rust, "u32")]).unwrap();
        assert!(matches!(
            emit_module(&schema, &RenderProfile::elm()),
            Err(IdlError::UnsupportedTarget { target: Target::Elm, .. })
        ));
    }

    #[test]
    fn test_module_name_from_profile() {
        let mut profile = RenderProfile::elm();
        profile.module_name = "Api.Messages".to_string();
        let code = emit_module(&Schema::new(), &profile).unwrap();
        assert!(code.starts_with("module Api.Messages exposing (..)"));
    }

    #[test]
    fn test_multi_field_variant() {
        let mut schema = Schema::new();
        let mut union = schema.declare_tagged_union("ClientCommand").unwrap();
        union
            .variant_with("Move")
            .unwrap()
            .field("roomName", "String")
            .unwrap()
            .field("steps", "Int")
            .unwrap();
        let code = render(&schema);

        assert!(code.contains("    = Move\n        { roomName : String\n        , steps : Int\n        }\n"));
        assert!(code.contains("                , ( \"room_name\", Json.Encode.string move.roomName )\n"));
        assert!(code.contains("                , ( \"steps\", Json.Encode.int move.steps )\n"));
        assert!(code.contains(
            "            Json.Decode.succeed (\\roomName steps -> Move { roomName = roomName, steps = steps })\n"
        ));
        assert!(code.contains("                |> Json.Decode.Pipeline.required \"room_name\" Json.Decode.string\n"));
        assert!(code.contains("                |> Json.Decode.Pipeline.required \"steps\" Json.Decode.int\n"));
    }

    #[test]
    fn test_keywords_and_shadowing_are_escaped() {
        let mut schema = Schema::new();
        let mut union = schema.declare_tagged_union("Port").unwrap();
        union.variant_with("Port").unwrap().field("port", "String").unwrap();
        union.variant_with("Tag").unwrap().field("t", "String").unwrap();
        let code = render(&schema);

        // Scrutinee `port` is a keyword; the variant binding must not shadow it
        assert!(code.contains("encodePort port_ =\n    case port_ of\n"));
        assert!(code.contains("        Port port__ ->\n"));
        assert!(code.contains("Json.Encode.string port__.port_ )"));
        // Record fields are escaped, wire keys are not
        assert!(code.contains("        { port_ : String\n"));
        assert!(code.contains("( \"port\", "));
        // `t` is the field decoder's parameter
        assert!(code.contains("Json.Decode.succeed (\\t_ -> Tag { t = t_ })"));
    }

    #[test]
    fn test_unrecognized_discriminant_carries_value() {
        let mut schema = Schema::new();
        schema.declare_tagged_union("Ping").unwrap().variant("Ping").unwrap();
        let code = render(&schema);
        assert!(code.contains("        _ ->\n            Json.Decode.fail (\"Unrecognized type: \" ++ t)\n"));
    }

    #[test]
    fn test_empty_record_variant() {
        let mut schema = Schema::new();
        let mut union = schema.declare_tagged_union("Signal").unwrap();
        union.variant_with("Empty").unwrap();
        let code = render(&schema);
        assert!(code.contains("    = Empty {}\n"));
        assert!(code.contains("        Empty _ ->\n"));
        assert!(code.contains("Json.Decode.succeed (Empty {})\n"));
    }
}
