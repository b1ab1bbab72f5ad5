//! wire-idl
//!
//! A small interface definition language for JSON messages shared by an Elm
//! client and a Rust server. A schema declares type aliases and tagged unions
//! once; the generator renders an Elm module and a Rust module whose codecs
//! agree on the wire format.
//!
//! ## Wire format
//!
//! ```text
//! {"type": "BecomeSuspect", "suspect_id": "abc"}
//!   ^^^^^^  variant name      ^^^^^^^^^^  field name in snake_case
//! ```
//!
//! ## Usage
//!
//! ```
//! use wire_idl::{generate, CodegenConfig, Schema, Target};
//!
//! let mut schema = Schema::new();
//! schema
//!     .declare_type_alias("SuspectId", [(Target::Elm, "String"), (Target::Rust, "String")])
//!     .unwrap();
//! let mut commands = schema.declare_tagged_union("ServerCommand").unwrap();
//! commands.variant("Connected").unwrap();
//! commands
//!     .variant_with("BecomeSuspect")
//!     .unwrap()
//!     .field("suspectId", "SuspectId")
//!     .unwrap();
//!
//! let modules = generate(&schema, &CodegenConfig::default()).unwrap();
//! assert!(modules.client.code.contains("suspect_id"));
//! assert!(modules.server.code.contains("suspect_id: SuspectId"));
//! ```

pub mod codegen;
pub mod config;
pub mod document;
pub mod error;
pub mod resolve;
pub mod schema;
pub mod sink;
pub mod wire;

pub use codegen::names::to_wire_name;
pub use codegen::{generate, render, CodegenConfig, GeneratedModule, GeneratedModules, RenderProfile};
pub use config::GeneratorConfig;
pub use document::{load_schema, SchemaDocument};
pub use error::{IdlError, Result};
pub use resolve::{resolve, validate, Primitive, Resolution};
pub use schema::{Declaration, Schema, TaggedUnion, Target, TypeAlias, Variant};
pub use sink::{OutputSink, StaleFile};
pub use wire::{Message, WireError};
