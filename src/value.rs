//! Runtime message values and the builder that assembles them.
//!
//! [`Value`] is the runtime representation of a single field value,
//! [`DynamicMessage`] an immutable populated instance, and [`MessageBuilder`]
//! the mutable staging object that accumulates field values and finalizes
//! them in one step. Kind compatibility is checked at assignment time, which
//! is where an incompatible caller-supplied override surfaces.

use std::collections::BTreeMap;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;

use crate::error::{Error, Result};
use crate::schema::{EnumValue, FieldDescriptor, FieldKind, MessageDescriptor};

/// A single field value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Double(f64),
    Float(f32),
    Int32(i32),
    Int64(i64),
    Uint32(u32),
    Uint64(u64),
    Bool(bool),
    String(String),
    Bytes(Vec<u8>),
    /// A chosen enum constant (name plus number).
    Enum(EnumValue),
    /// A nested message instance.
    Message(Box<DynamicMessage>),
    /// An ordered sequence of values for a repeated field.
    Repeated(Vec<Value>),
}

impl Value {
    /// Short name of this value's shape, for error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Double(_) => "double",
            Value::Float(_) => "float",
            Value::Int32(_) => "int32",
            Value::Int64(_) => "int64",
            Value::Uint32(_) => "uint32",
            Value::Uint64(_) => "uint64",
            Value::Bool(_) => "bool",
            Value::String(_) => "string",
            Value::Bytes(_) => "bytes",
            Value::Enum(_) => "enum",
            Value::Message(_) => "message",
            Value::Repeated(_) => "repeated",
        }
    }

    /// Whether this value is acceptable for a field of the given kind.
    fn matches_kind(&self, kind: FieldKind) -> bool {
        match self {
            Value::Double(_) => kind == FieldKind::Double,
            Value::Float(_) => kind == FieldKind::Float,
            Value::Int32(_) => {
                matches!(kind, FieldKind::Int32 | FieldKind::Sint32 | FieldKind::Sfixed32)
            }
            Value::Uint32(_) => matches!(kind, FieldKind::Uint32 | FieldKind::Fixed32),
            Value::Int64(_) => {
                matches!(kind, FieldKind::Int64 | FieldKind::Sint64 | FieldKind::Sfixed64)
            }
            Value::Uint64(_) => matches!(kind, FieldKind::Uint64 | FieldKind::Fixed64),
            Value::Bool(_) => kind == FieldKind::Bool,
            Value::String(_) => kind == FieldKind::String,
            Value::Bytes(_) => kind == FieldKind::Bytes,
            Value::Enum(_) => kind == FieldKind::Enum,
            Value::Message(_) => kind == FieldKind::Message,
            Value::Repeated(_) => false,
        }
    }

    /// Render this value as JSON: bytes as base64, enums as constant names,
    /// nested messages as objects.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Double(v) => serde_json::json!(v),
            Value::Float(v) => serde_json::json!(v),
            Value::Int32(v) => serde_json::json!(v),
            Value::Int64(v) => serde_json::json!(v),
            Value::Uint32(v) => serde_json::json!(v),
            Value::Uint64(v) => serde_json::json!(v),
            Value::Bool(v) => serde_json::json!(v),
            Value::String(v) => serde_json::json!(v),
            Value::Bytes(v) => serde_json::Value::String(BASE64.encode(v)),
            Value::Enum(v) => serde_json::Value::String(v.name.clone()),
            Value::Message(m) => m.to_json(),
            Value::Repeated(items) => {
                serde_json::Value::Array(items.iter().map(Value::to_json).collect())
            }
        }
    }
}

/// An immutable populated message instance.
///
/// Instances have no identity beyond structural equality of their fields.
/// Fields that were never set are simply absent.
#[derive(Debug, Clone, PartialEq)]
pub struct DynamicMessage {
    /// Name of the message type this instance was built from.
    pub message_type: String,

    fields: BTreeMap<String, Value>,
}

impl DynamicMessage {
    /// Get a set field's value by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Iterate over set fields in name order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of set fields.
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Reopen this instance as a builder for further mutation.
    pub fn to_builder<'a>(&self, descriptor: &'a MessageDescriptor) -> MessageBuilder<'a> {
        MessageBuilder {
            descriptor,
            fields: self.fields.clone(),
        }
    }

    /// Render the instance as a JSON object.
    pub fn to_json(&self) -> serde_json::Value {
        let map: serde_json::Map<String, serde_json::Value> = self
            .fields
            .iter()
            .map(|(name, value)| (name.clone(), value.to_json()))
            .collect();
        serde_json::Value::Object(map)
    }
}

/// Mutable staging object that assembles a [`DynamicMessage`].
#[derive(Debug)]
pub struct MessageBuilder<'a> {
    descriptor: &'a MessageDescriptor,
    fields: BTreeMap<String, Value>,
}

impl<'a> MessageBuilder<'a> {
    /// Create an empty builder for the given message type.
    pub fn new(descriptor: &'a MessageDescriptor) -> Self {
        Self {
            descriptor,
            fields: BTreeMap::new(),
        }
    }

    /// The message descriptor this builder targets.
    pub fn descriptor(&self) -> &'a MessageDescriptor {
        self.descriptor
    }

    fn lookup(&self, name: &str) -> Result<&'a FieldDescriptor> {
        self.descriptor.field(name).ok_or_else(|| Error::FieldNotFound {
            field: name.to_string(),
            message: self.descriptor.name.clone(),
        })
    }

    /// Set a singular field's value, replacing any previous value.
    ///
    /// A repeated field accepts only a [`Value::Repeated`] here; use
    /// [`add_repeated_field`](Self::add_repeated_field) to append items.
    pub fn set_field(&mut self, name: &str, value: Value) -> Result<()> {
        let field = self.lookup(name)?;

        let compatible = if field.repeated {
            match &value {
                Value::Repeated(items) => items.iter().all(|v| v.matches_kind(field.kind)),
                _ => false,
            }
        } else {
            value.matches_kind(field.kind)
        };
        if !compatible {
            return Err(Error::TypeMismatch {
                field: name.to_string(),
                expected: field.kind,
                actual: value.kind_name().to_string(),
            });
        }

        self.fields.insert(name.to_string(), value);
        Ok(())
    }

    /// Append one occurrence to a repeated field.
    pub fn add_repeated_field(&mut self, name: &str, value: Value) -> Result<()> {
        let field = self.lookup(name)?;

        if !field.repeated || !value.matches_kind(field.kind) {
            return Err(Error::TypeMismatch {
                field: name.to_string(),
                expected: field.kind,
                actual: value.kind_name().to_string(),
            });
        }

        match self
            .fields
            .entry(name.to_string())
            .or_insert_with(|| Value::Repeated(Vec::new()))
        {
            Value::Repeated(items) => items.push(value),
            // The slot is kind-checked on every insert, so it can only hold
            // a Repeated value.
            other => unreachable!("repeated field '{name}' holds {}", other.kind_name()),
        }
        Ok(())
    }

    /// Merge another instance of the same message type onto this builder.
    ///
    /// Singular fields set on `other` replace the builder's values, message
    /// fields merge recursively field-by-field, and repeated fields append
    /// `other`'s items after the builder's existing items.
    pub fn merge_from(&mut self, other: &DynamicMessage) {
        merge_field_map(&mut self.fields, &other.fields);
    }

    /// Finalize the builder into an immutable instance.
    pub fn build(self) -> DynamicMessage {
        DynamicMessage {
            message_type: self.descriptor.name.clone(),
            fields: self.fields,
        }
    }
}

fn merge_field_map(target: &mut BTreeMap<String, Value>, source: &BTreeMap<String, Value>) {
    for (name, incoming) in source {
        let merged_in_place = match (target.get_mut(name), incoming) {
            (Some(Value::Repeated(existing)), Value::Repeated(items)) => {
                existing.extend(items.iter().cloned());
                true
            }
            (Some(Value::Message(existing)), Value::Message(incoming)) => {
                merge_field_map(&mut existing.fields, &incoming.fields);
                true
            }
            _ => false,
        };
        if !merged_in_place {
            target.insert(name.clone(), incoming.clone());
        }
    }
}
