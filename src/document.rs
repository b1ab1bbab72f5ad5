//! Schema documents
//!
//! A schema can be written as a TOML or JSON document instead of builder
//! calls. Loading replays the document through the builders, so a document
//! is rejected for exactly the reasons the builders reject a declaration.
//!
//! ## Example (schemas/commands.toml):
//! ```toml
//! [[declaration]]
//! alias = "SuspectId"
//! elm = "String"
//! rust = "String"
//!
//! [[declaration]]
//! union = "ServerCommand"
//!
//! [[declaration.variant]]
//! name = "Connected"
//!
//! [[declaration.variant]]
//! name = "BecomeSuspect"
//! fields = [{ name = "suspectId", type = "SuspectId" }]
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::error::{IdlError, Result};
use crate::schema::{Schema, Target};

/// Top-level schema document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaDocument {
    /// Declarations in document order
    #[serde(default, rename = "declaration")]
    pub declarations: Vec<DeclarationDoc>,
}

/// One declaration entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged, deny_unknown_fields)]
pub enum DeclarationDoc {
    Alias {
        alias: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        elm: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        rust: Option<String>,
    },
    Union {
        union: String,
        #[serde(default, rename = "variant")]
        variants: Vec<VariantDoc>,
    },
}

/// A union variant; no fields means a bare variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VariantDoc {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldDoc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldDoc {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
}

impl SchemaDocument {
    /// Parse a TOML document
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Parse a JSON document
    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Build the schema model, declaration by declaration
    pub fn into_schema(self) -> Result<Schema> {
        let mut schema = Schema::new();

        for declaration in self.declarations {
            match declaration {
                DeclarationDoc::Alias { alias, elm, rust } => {
                    let representations = [(Target::Elm, elm), (Target::Rust, rust)]
                        .into_iter()
                        .filter_map(|(target, rep)| rep.map(|rep| (target, rep)));
                    schema.declare_type_alias(&alias, representations)?;
                }
                DeclarationDoc::Union { union, variants } => {
                    let mut builder = schema.declare_tagged_union(&union)?;
                    for variant in variants {
                        if variant.fields.is_empty() {
                            builder.variant(&variant.name)?;
                            continue;
                        }
                        let mut record = builder.variant_with(&variant.name)?;
                        for field in &variant.fields {
                            record.field(&field.name, &field.ty)?;
                        }
                    }
                }
            }
        }

        Ok(schema)
    }
}

/// Load a schema document from disk; the format follows the file extension
pub fn load_schema(path: impl AsRef<Path>) -> Result<Schema> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)?;

    let document = match path.extension().and_then(|e| e.to_str()) {
        Some("toml") => SchemaDocument::from_toml(&content)?,
        Some("json") => SchemaDocument::from_json(&content)?,
        _ => return Err(IdlError::UnsupportedFormat(path.display().to_string())),
    };

    debug!(path = %path.display(), declarations = document.declarations.len(), "loaded schema document");
    document.into_schema()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const COMMANDS: &str = r#"
[[declaration]]
alias = "SuspectId"
elm = "String"
rust = "String"

[[declaration]]
union = "ServerCommand"

[[declaration.variant]]
name = "Connected"

[[declaration.variant]]
name = "BecomeSuspect"
fields = [{ name = "suspectId", type = "SuspectId" }]
"#;

    #[test]
    fn test_toml_document() {
        let schema = SchemaDocument::from_toml(COMMANDS).unwrap().into_schema().unwrap();
        assert_eq!(schema.len(), 2);
        assert_eq!(
            schema.alias("SuspectId").unwrap().representation(Target::Elm),
            Some("String")
        );

        let union = schema.union("ServerCommand").unwrap();
        assert!(union.variant("Connected").unwrap().payload().is_none());
        let fields = union.variant("BecomeSuspect").unwrap().fields();
        assert_eq!(fields[0].name, "suspectId");
        assert_eq!(fields[0].ty, "SuspectId");
    }

    #[test]
    fn test_json_document() {
        let json = r#"{"declaration": [
            {"alias": "Score", "elm": "Int"},
            {"union": "Ping", "variant": [{"name": "Ping"}]}
        ]}"#;
        let schema = SchemaDocument::from_json(json).unwrap().into_schema().unwrap();
        let score = schema.alias("Score").unwrap();
        assert_eq!(score.representation(Target::Elm), Some("Int"));
        assert_eq!(score.representation(Target::Rust), None);
        assert!(schema.union("Ping").is_some());
    }

    #[test]
    fn test_builder_errors_surface() {
        let doc = r#"
[[declaration]]
union = "ServerCommand"

[[declaration.variant]]
name = "Echo"

[[declaration.variant]]
name = "Echo"
"#;
        let err = SchemaDocument::from_toml(doc).unwrap().into_schema().unwrap_err();
        assert!(matches!(err, IdlError::DuplicateName { .. }));
    }

    #[test]
    fn test_unknown_keys_rejected() {
        let doc = r#"
[[declaration]]
alias = "SuspectId"
haskell = "Text"
"#;
        assert!(matches!(SchemaDocument::from_toml(doc), Err(IdlError::Toml(_))));
    }

    #[test]
    fn test_load_schema_by_extension() {
        let dir = tempfile::tempdir().unwrap();

        let toml_path = dir.path().join("commands.toml");
        std::fs::File::create(&toml_path)
            .unwrap()
            .write_all(COMMANDS.as_bytes())
            .unwrap();
        assert_eq!(load_schema(&toml_path).unwrap().len(), 2);

        let yaml_path = dir.path().join("commands.yaml");
        std::fs::write(&yaml_path, "declaration: []").unwrap();
        assert!(matches!(load_schema(&yaml_path), Err(IdlError::UnsupportedFormat(_))));

        assert!(matches!(
            load_schema(dir.path().join("missing.toml")),
            Err(IdlError::Io(_))
        ));
    }
}
