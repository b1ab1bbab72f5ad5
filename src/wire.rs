//! Reference wire codec
//!
//! Encodes and decodes tagged-union messages directly from the schema model,
//! following the same rules the generated Elm and Rust codecs follow:
//!
//! - a message is a JSON object
//! - `"type"` holds the variant name, case-sensitive
//! - each payload field sits at its wire name, holding the primitive's
//!   canonical JSON value
//! - unknown object keys are ignored when decoding
//!
//! The generators never call this at runtime; it exists so the wire contract
//! can be checked (and messages inspected) without a compiled client or
//! server.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::error::IdlError;
use crate::resolve::wire_primitive;
use crate::schema::{Schema, TaggedUnion, Variant, DISCRIMINANT};

/// Errors from encoding or decoding a message
#[derive(Error, Debug)]
pub enum WireError {
    #[error("Unknown tagged union: {0}")]
    UnknownUnion(String),

    #[error("{union} has no variant {variant}")]
    UnknownVariant { union: String, variant: String },

    #[error("Expected a JSON object")]
    NotAnObject,

    #[error("Missing \"type\" discriminant")]
    MissingDiscriminant,

    #[error("The \"type\" discriminant must be a string")]
    DiscriminantNotString,

    #[error("Unrecognized type: {0}")]
    UnrecognizedDiscriminant(String),

    #[error("Missing field: {0}")]
    MissingField(String),

    #[error("Unexpected field {field} for variant {variant}")]
    UnexpectedField { variant: String, field: String },

    #[error("Field {field} expects a JSON {expected}, got {actual}")]
    WrongKind {
        field: String,
        expected: &'static str,
        actual: Value,
    },

    #[error(transparent)]
    Schema(#[from] IdlError),
}

/// A decoded (or to-be-encoded) tagged-union value
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    /// Variant name
    pub variant: String,
    /// Payload values keyed by schema field name, in declared order
    pub fields: Vec<(String, Value)>,
}

impl Message {
    pub fn new(variant: impl Into<String>) -> Self {
        Self {
            variant: variant.into(),
            fields: Vec::new(),
        }
    }

    /// Add a payload value
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.push((field.into(), value.into()));
        self
    }

    /// Payload value by schema field name
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.iter().find(|(name, _)| name == field).map(|(_, v)| v)
    }
}

/// Encode `message` as a value of `union_name`
pub fn encode(schema: &Schema, union_name: &str, message: &Message) -> Result<Value, WireError> {
    let union = find_union(schema, union_name)?;
    let variant = union
        .variant(&message.variant)
        .ok_or_else(|| WireError::UnknownVariant {
            union: union.name().to_string(),
            variant: message.variant.clone(),
        })?;

    if let Some((extra, _)) = message
        .fields
        .iter()
        .find(|(name, _)| !variant.fields().iter().any(|f| f.name == *name))
    {
        return Err(WireError::UnexpectedField {
            variant: variant.name().to_string(),
            field: extra.clone(),
        });
    }

    let mut object = Map::new();
    object.insert(DISCRIMINANT.to_string(), Value::String(variant.name().to_string()));

    for field in variant.fields() {
        let value = message
            .get(&field.name)
            .ok_or_else(|| WireError::MissingField(field.name.clone()))?;
        check_kind(schema, &field.ty, &field.name, value)?;
        object.insert(field.wire_name(), value.clone());
    }

    Ok(Value::Object(object))
}

/// Decode a JSON value of `union_name`
pub fn decode(schema: &Schema, union_name: &str, value: &Value) -> Result<Message, WireError> {
    let union = find_union(schema, union_name)?;
    let object = value.as_object().ok_or(WireError::NotAnObject)?;

    let tag = object
        .get(DISCRIMINANT)
        .ok_or(WireError::MissingDiscriminant)?
        .as_str()
        .ok_or(WireError::DiscriminantNotString)?;

    let variant: &Variant = union
        .variant(tag)
        .ok_or_else(|| WireError::UnrecognizedDiscriminant(tag.to_string()))?;

    let mut message = Message::new(variant.name());
    for field in variant.fields() {
        let wire = field.wire_name();
        let value = object
            .get(&wire)
            .ok_or_else(|| WireError::MissingField(wire.clone()))?;
        check_kind(schema, &field.ty, &wire, value)?;
        message.fields.push((field.name.clone(), value.clone()));
    }

    Ok(message)
}

fn find_union<'a>(schema: &'a Schema, name: &str) -> Result<&'a TaggedUnion, WireError> {
    schema
        .union(name)
        .ok_or_else(|| WireError::UnknownUnion(name.to_string()))
}

fn check_kind(schema: &Schema, ty: &str, field: &str, value: &Value) -> Result<(), WireError> {
    let primitive = wire_primitive(schema, ty)?;
    if !primitive.accepts(value) {
        return Err(WireError::WrongKind {
            field: field.to_string(),
            expected: primitive.json_kind(),
            actual: value.clone(),
        });
    }
    Ok(())
}
