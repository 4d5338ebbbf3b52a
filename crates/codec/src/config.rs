//! Codec configuration.
//!
//! Settings can be built programmatically or read from the environment.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `SCHEMAXML_PRETTY_PRINT` | true | Indent serialized output |
//! | `SCHEMAXML_INDENT` | 2 | Spaces per nesting level when pretty printing |
//! | `SCHEMAXML_XML_DECLARATION` | true | Emit `<?xml version="1.0" encoding="UTF-8"?>` |
//! | `SCHEMAXML_MAX_DEPTH` | 64 | Maximum element nesting accepted or produced |
//!
//! # Example
//!
//! ```rust
//! use schemaxml_codec::CodecConfig;
//!
//! // Create from environment
//! let config = CodecConfig::from_env();
//!
//! // Or create programmatically
//! let config = CodecConfig {
//!     pretty_print: false,
//!     max_depth: 16,
//!     ..Default::default()
//! };
//! assert!(config.validate().is_ok());
//! ```

use clap::{ArgAction, Parser};

/// Settings shared by serialization and deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(name = "schemaxml")]
#[command(about = "Schema-driven XML codec settings")]
pub struct CodecConfig {
    /// Indent nested elements in serialized output.
    #[arg(long, env = "SCHEMAXML_PRETTY_PRINT", default_value = "true", action = ArgAction::Set)]
    pub pretty_print: bool,

    /// Spaces per nesting level when pretty printing.
    #[arg(long, env = "SCHEMAXML_INDENT", default_value = "2")]
    pub indent: usize,

    /// Emit an XML declaration before the root element.
    #[arg(long, env = "SCHEMAXML_XML_DECLARATION", default_value = "true", action = ArgAction::Set)]
    pub xml_declaration: bool,

    /// Maximum element nesting depth, root included.
    ///
    /// Documents nested deeper are rejected while parsing, and the walkers
    /// refuse to recurse past it when encoding or decoding in-memory trees.
    #[arg(long, env = "SCHEMAXML_MAX_DEPTH", default_value = "64")]
    pub max_depth: usize,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            pretty_print: true,
            indent: 2,
            xml_declaration: true,
            max_depth: 64,
        }
    }
}

impl CodecConfig {
    /// Reads settings from `SCHEMAXML_*` environment variables, falling back
    /// to the defaults if any of them fails to parse.
    pub fn from_env() -> Self {
        // Only the program name is passed so process arguments never leak in.
        Self::try_parse_from(["schemaxml"]).unwrap_or_default()
    }

    /// Validates the configuration and returns errors if any.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.max_depth == 0 {
            errors.push("Max depth cannot be 0".to_string());
        }

        if self.indent > 16 {
            errors.push("Indent cannot exceed 16 spaces".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
