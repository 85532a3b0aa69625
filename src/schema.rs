//! Message schema types, loading, and downloading.
//!
//! A schema document declares the message types fake data can be generated
//! for. It is plain JSON: a list of message descriptors, each with an ordered
//! list of typed fields. Nested message fields reference other descriptors by
//! name, and the loaded [`Schema`] acts as the registry that resolves those
//! references at generation time.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};

/// The declared kind of a message field.
///
/// This mirrors the proto3 scalar type set plus `enum` and `message`. The
/// enumeration is closed: generation dispatches over it exhaustively, so a
/// schema can never introduce a kind the generator does not handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Double,
    Float,
    Int32,
    Sint32,
    Sfixed32,
    Uint32,
    Fixed32,
    Int64,
    Sint64,
    Sfixed64,
    Uint64,
    Fixed64,
    Bool,
    String,
    Bytes,
    Enum,
    Message,
}

impl FieldKind {
    /// Whether this kind is one of the 32-bit integer variants.
    pub fn is_int32_family(self) -> bool {
        matches!(
            self,
            FieldKind::Int32
                | FieldKind::Sint32
                | FieldKind::Sfixed32
                | FieldKind::Uint32
                | FieldKind::Fixed32
        )
    }

    /// Whether this kind is one of the 64-bit integer variants.
    pub fn is_int64_family(self) -> bool {
        matches!(
            self,
            FieldKind::Int64
                | FieldKind::Sint64
                | FieldKind::Sfixed64
                | FieldKind::Uint64
                | FieldKind::Fixed64
        )
    }
}

/// A single declared enum constant: name plus wire number.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EnumValue {
    /// Constant name (e.g., `"STATUS_UNKNOWN"`).
    pub name: String,

    /// Constant number (e.g., `0`).
    pub number: i32,
}

/// A single field in a message descriptor.
#[derive(Debug, Clone, Deserialize)]
pub struct FieldDescriptor {
    /// Field name, unique within its message (e.g., `"email_address"`).
    pub name: String,

    /// Declared field kind.
    pub kind: FieldKind,

    /// Whether the field holds an ordered sequence of values.
    #[serde(default)]
    pub repeated: bool,

    /// Declared enum constants, in declaration order. Non-empty exactly when
    /// `kind` is [`FieldKind::Enum`].
    #[serde(default)]
    pub enum_values: Vec<EnumValue>,

    /// Registry key of the nested message type. Present exactly when `kind`
    /// is [`FieldKind::Message`].
    #[serde(default)]
    pub message_type: Option<String>,
}

/// A message type: a name and an ordered sequence of field descriptors.
///
/// Field order is the declaration order from the schema document and is the
/// order generation walks the fields in.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageDescriptor {
    /// Message type name, used as the registry key (e.g., `"user_profile"`).
    pub name: String,

    /// Fields in declaration order.
    #[serde(default)]
    pub fields: Vec<FieldDescriptor>,
}

impl MessageDescriptor {
    /// Look up a field by name.
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Raw schema document shape as written in JSON.
#[derive(Debug, Deserialize)]
struct SchemaDoc {
    /// Schema document version string (e.g., `"1"`).
    #[serde(default)]
    version: String,

    /// Message descriptors in document order.
    messages: Vec<MessageDescriptor>,
}

/// A validated registry of message descriptors.
///
/// The registry is the explicit mapping used to resolve nested message
/// fields: a `message`-kind field carries a `message_type` key, and
/// generation looks that key up here. A key that resolves to nothing is a
/// per-field resolution failure at generation time, not a load error, so
/// partial schemas stay usable.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    /// Schema document version string.
    pub version: String,

    messages: BTreeMap<String, MessageDescriptor>,
}

impl Schema {
    /// Create an empty schema registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a schema from its JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        let doc: SchemaDoc = serde_json::from_str(json)?;
        let mut schema = Schema {
            version: doc.version,
            messages: BTreeMap::new(),
        };
        for descriptor in doc.messages {
            schema.register(descriptor)?;
        }
        Ok(schema)
    }

    /// Add a message descriptor to the registry, checking its invariants.
    ///
    /// Rejects duplicate message names, duplicate field names within the
    /// message, `enum` fields without declared constants, and `message`
    /// fields without a type reference.
    pub fn register(&mut self, descriptor: MessageDescriptor) -> Result<()> {
        if self.messages.contains_key(&descriptor.name) {
            return Err(Error::Schema(format!(
                "duplicate message type '{}'",
                descriptor.name
            )));
        }

        let mut seen = std::collections::BTreeSet::new();
        for field in &descriptor.fields {
            if !seen.insert(field.name.as_str()) {
                return Err(Error::Schema(format!(
                    "duplicate field '{}' in message '{}'",
                    field.name, descriptor.name
                )));
            }
            match field.kind {
                FieldKind::Enum if field.enum_values.is_empty() => {
                    return Err(Error::Schema(format!(
                        "enum field '{}' in message '{}' declares no values",
                        field.name, descriptor.name
                    )));
                }
                FieldKind::Message if field.message_type.is_none() => {
                    return Err(Error::Schema(format!(
                        "message field '{}' in message '{}' has no message_type",
                        field.name, descriptor.name
                    )));
                }
                _ => {}
            }
        }

        self.messages.insert(descriptor.name.clone(), descriptor);
        Ok(())
    }

    /// Look up a message descriptor by name.
    pub fn message(&self, name: &str) -> Option<&MessageDescriptor> {
        self.messages.get(name)
    }

    /// All registered message type names, sorted.
    pub fn message_names(&self) -> Vec<&str> {
        self.messages.keys().map(|s| s.as_str()).collect()
    }

    /// Number of registered message types.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// Load a schema document from disk.
pub fn load_schema(path: &Path) -> Result<Schema> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    Schema::from_json(&content)
}

/// Download a schema document and save it to disk.
///
/// Validates that the response parses as a valid [`Schema`] before writing.
#[cfg(feature = "download")]
pub async fn download_schema(url: &str, output_path: &Path) -> Result<()> {
    eprintln!("Downloading schema from {url}");

    let response = reqwest::get(url)
        .await
        .map_err(|e| Error::Download(format!("GET {url}: {e}")))?;

    if !response.status().is_success() {
        return Err(Error::Download(format!(
            "GET {url} returned {}",
            response.status()
        )));
    }

    let body = response
        .text()
        .await
        .map_err(|e| Error::Download(format!("reading response body: {e}")))?;

    // Validate before writing.
    let schema = Schema::from_json(&body)
        .map_err(|e| Error::Schema(format!("downloaded document is not a valid schema: {e}")))?;

    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| Error::Write {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    std::fs::write(output_path, &body).map_err(|e| Error::Write {
        path: output_path.to_path_buf(),
        source: e,
    })?;

    eprintln!(
        "Saved schema ({} message types) to {}",
        schema.len(),
        output_path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_schema_json() -> String {
        r#"{
            "version": "1",
            "messages": [
                {
                    "name": "user_profile",
                    "fields": [
                        {"name": "user_id", "kind": "string"},
                        {"name": "email_address", "kind": "string"},
                        {"name": "age", "kind": "int32"},
                        {
                            "name": "status",
                            "kind": "enum",
                            "enum_values": [
                                {"name": "STATUS_UNKNOWN", "number": 0},
                                {"name": "STATUS_ACTIVE", "number": 1},
                                {"name": "STATUS_SUSPENDED", "number": 2}
                            ]
                        },
                        {
                            "name": "home_address",
                            "kind": "message",
                            "message_type": "postal_address"
                        },
                        {"name": "nicknames", "kind": "string", "repeated": true}
                    ]
                },
                {
                    "name": "postal_address",
                    "fields": [
                        {"name": "street", "kind": "string"},
                        {"name": "city", "kind": "string"},
                        {"name": "zip_code", "kind": "string"}
                    ]
                }
            ]
        }"#
        .to_string()
    }

    #[test]
    fn parse_minimal_schema() {
        let schema = Schema::from_json(&minimal_schema_json()).unwrap();
        assert_eq!(schema.version, "1");
        assert_eq!(schema.len(), 2);
        assert!(schema.message("user_profile").is_some());
        assert!(schema.message("postal_address").is_some());
    }

    #[test]
    fn field_order_is_declaration_order() {
        let schema = Schema::from_json(&minimal_schema_json()).unwrap();
        let profile = schema.message("user_profile").unwrap();

        let names: Vec<&str> = profile.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "user_id",
                "email_address",
                "age",
                "status",
                "home_address",
                "nicknames"
            ]
        );
    }

    #[test]
    fn parse_field_details() {
        let schema = Schema::from_json(&minimal_schema_json()).unwrap();
        let profile = schema.message("user_profile").unwrap();

        let status = profile.field("status").unwrap();
        assert_eq!(status.kind, FieldKind::Enum);
        assert_eq!(status.enum_values.len(), 3);
        assert_eq!(status.enum_values[0].name, "STATUS_UNKNOWN");
        assert_eq!(status.enum_values[0].number, 0);

        let home = profile.field("home_address").unwrap();
        assert_eq!(home.kind, FieldKind::Message);
        assert_eq!(home.message_type.as_deref(), Some("postal_address"));

        let nicknames = profile.field("nicknames").unwrap();
        assert!(nicknames.repeated);
    }

    #[test]
    fn duplicate_field_name_rejected() {
        let json = r#"{
            "messages": [
                {
                    "name": "bad",
                    "fields": [
                        {"name": "x", "kind": "string"},
                        {"name": "x", "kind": "int32"}
                    ]
                }
            ]
        }"#;
        let err = Schema::from_json(json).unwrap_err();
        assert!(err.to_string().contains("duplicate field 'x'"));
    }

    #[test]
    fn duplicate_message_name_rejected() {
        let json = r#"{
            "messages": [
                {"name": "dup", "fields": []},
                {"name": "dup", "fields": []}
            ]
        }"#;
        let err = Schema::from_json(json).unwrap_err();
        assert!(err.to_string().contains("duplicate message type 'dup'"));
    }

    #[test]
    fn empty_enum_rejected() {
        let json = r#"{
            "messages": [
                {
                    "name": "bad",
                    "fields": [{"name": "status", "kind": "enum"}]
                }
            ]
        }"#;
        let err = Schema::from_json(json).unwrap_err();
        assert!(err.to_string().contains("declares no values"));
    }

    #[test]
    fn message_field_without_type_rejected() {
        let json = r#"{
            "messages": [
                {
                    "name": "bad",
                    "fields": [{"name": "nested", "kind": "message"}]
                }
            ]
        }"#;
        let err = Schema::from_json(json).unwrap_err();
        assert!(err.to_string().contains("has no message_type"));
    }

    #[test]
    fn unresolved_message_reference_loads() {
        // Dangling nested references are a generation-time concern, not a
        // load error.
        let json = r#"{
            "messages": [
                {
                    "name": "holder",
                    "fields": [
                        {"name": "inner", "kind": "message", "message_type": "missing"}
                    ]
                }
            ]
        }"#;
        let schema = Schema::from_json(json).unwrap();
        assert!(schema.message("missing").is_none());
    }

    #[test]
    fn int_family_helpers() {
        assert!(FieldKind::Sint32.is_int32_family());
        assert!(FieldKind::Fixed32.is_int32_family());
        assert!(!FieldKind::Int64.is_int32_family());
        assert!(FieldKind::Sfixed64.is_int64_family());
        assert!(FieldKind::Uint64.is_int64_family());
        assert!(!FieldKind::Bool.is_int64_family());
    }
}
