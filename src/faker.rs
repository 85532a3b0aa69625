//! The generation engine: descriptor-driven fake message construction.
//!
//! A [`ProtoFaker`] is bound to one message type from a [`Schema`] and walks
//! the type's field list once per generation call, synthesizing a value for
//! every field: overrides win outright, scalars come from the RNG, string
//! fields go through name-based category synthesis, enum fields skip a
//! leading UNKNOWN sentinel, and message fields recurse through the schema
//! registry. Repeated fields draw a count from the configured range and
//! resolve that many independent items.

use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::warn;

use crate::context;
use crate::error::{Error, Result};
use crate::schema::{EnumValue, FieldDescriptor, FieldKind, MessageDescriptor, Schema};
use crate::value::{DynamicMessage, MessageBuilder, Value};

/// Default lower bound (inclusive) for repeated-field item counts.
const DEFAULT_MIN_REPEATED: usize = 1;

/// Default upper bound (exclusive) for repeated-field item counts.
const DEFAULT_MAX_REPEATED: usize = 5;

/// Ceiling on nested-message recursion. A message-kind field at this depth
/// is left unset, which keeps generation over self-referential schemas
/// finite.
const MAX_NESTING_DEPTH: usize = 8;

/// Public-domain quotations used as bytes payloads.
const QUOTES: &[&str] = &[
    "To be, or not to be, that is the question.",
    "Though this be madness, yet there is method in 't.",
    "Brevity is the soul of wit.",
    "There are more things in heaven and earth, Horatio, than are dreamt of in your philosophy.",
    "The lady doth protest too much, methinks.",
    "This above all: to thine own self be true.",
    "What a piece of work is a man!",
    "One may smile, and smile, and be a villain.",
    "The rest is silence.",
];

/// Generates fake instances of one message type.
///
/// Configuration is applied with chainable `with_*` calls and read on every
/// generation call. A faker owns its RNG and configuration and is not meant
/// to be shared across threads; independent instances share no state.
///
/// ```no_run
/// use std::path::Path;
///
/// use proto_faker::faker::ProtoFaker;
/// use proto_faker::value::Value;
///
/// let schema = proto_faker::schema::load_schema(Path::new("schema.json"))?;
/// let mut faker = ProtoFaker::new(&schema, "user_profile")?
///     .with_field("plan", Value::String("enterprise".to_string()))
///     .with_repeated_count(2, 6);
/// let user = faker.fake()?;
/// # Ok::<(), proto_faker::error::Error>(())
/// ```
#[derive(Debug)]
pub struct ProtoFaker<'a> {
    schema: &'a Schema,
    descriptor: &'a MessageDescriptor,
    overrides: HashMap<String, Value>,
    min_repeated: usize,
    max_repeated: usize,
    rng: StdRng,
}

impl<'a> ProtoFaker<'a> {
    /// Create a faker for the named message type.
    ///
    /// Fails with [`Error::MessageNotFound`] if the type is not registered
    /// in the schema.
    pub fn new(schema: &'a Schema, message_type: &str) -> Result<Self> {
        let descriptor = schema.message(message_type).ok_or_else(|| {
            let available: Vec<&str> = schema.message_names();
            Error::MessageNotFound {
                name: message_type.to_string(),
                available: if available.len() > 10 {
                    format!(
                        "{} ... and {} more",
                        available[..10].join(", "),
                        available.len() - 10
                    )
                } else {
                    available.join(", ")
                },
            }
        })?;

        Ok(Self {
            schema,
            descriptor,
            overrides: HashMap::new(),
            min_repeated: DEFAULT_MIN_REPEATED,
            max_repeated: DEFAULT_MAX_REPEATED,
            rng: StdRng::from_entropy(),
        })
    }

    /// Override the value generated for a named field.
    ///
    /// The value is used verbatim on every generation call. No compatibility
    /// check happens here; an incompatible value fails at set time with a
    /// type-mismatch error. On repeated fields the override is appended as a
    /// single occurrence.
    pub fn with_field(mut self, field_name: &str, value: Value) -> Self {
        self.overrides.insert(field_name.to_string(), value);
        self
    }

    /// Set the item count range for repeated fields: `min` inclusive, `max`
    /// exclusive.
    ///
    /// `min >= max` is a caller error and panics when a repeated field is
    /// next generated.
    pub fn with_repeated_count(mut self, min: usize, max: usize) -> Self {
        self.min_repeated = min;
        self.max_repeated = max;
        self
    }

    /// Seed the faker's RNG for reproducible output.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// The descriptor this faker generates instances of.
    pub fn descriptor(&self) -> &'a MessageDescriptor {
        self.descriptor
    }

    /// Generate one fully populated instance.
    pub fn fake(&mut self) -> Result<DynamicMessage> {
        self.fake_at_depth(0)
    }

    /// Generate an instance and merge `template` onto it.
    ///
    /// Fields explicitly set on the template win: singular fields are
    /// replaced (message fields merge recursively), repeated fields get the
    /// template's items appended after the generated ones.
    pub fn fake_from(&mut self, template: &DynamicMessage) -> Result<DynamicMessage> {
        let generated = self.fake()?;
        let mut builder = generated.to_builder(self.descriptor);
        builder.merge_from(template);
        Ok(builder.build())
    }

    /// Generate `count` independent instances.
    pub fn fakes(&mut self, count: usize) -> Result<Vec<DynamicMessage>> {
        let mut out = Vec::with_capacity(count);
        for _ in 0..count {
            out.push(self.fake()?);
        }
        Ok(out)
    }

    /// Generate `count` instances, each merged with the same template.
    pub fn fakes_from(
        &mut self,
        template: &DynamicMessage,
        count: usize,
    ) -> Result<Vec<DynamicMessage>> {
        let mut out = Vec::with_capacity(count);
        for _ in 0..count {
            out.push(self.fake_from(template)?);
        }
        Ok(out)
    }

    /// Generate one instance per template, pairwise and in order.
    pub fn fakes_from_each(&mut self, templates: &[DynamicMessage]) -> Result<Vec<DynamicMessage>> {
        let mut out = Vec::with_capacity(templates.len());
        for template in templates {
            out.push(self.fake_from(template)?);
        }
        Ok(out)
    }

    fn fake_at_depth(&mut self, depth: usize) -> Result<DynamicMessage> {
        let descriptor = self.descriptor;
        let mut builder = MessageBuilder::new(descriptor);

        for field in &descriptor.fields {
            if let Some(value) = self.overrides.get(&field.name) {
                let value = value.clone();
                if field.repeated {
                    // An override contributes exactly one occurrence.
                    builder.add_repeated_field(&field.name, value)?;
                } else {
                    builder.set_field(&field.name, value)?;
                }
            } else if field.repeated {
                let count = self.rng.gen_range(self.min_repeated..self.max_repeated);
                for _ in 0..count {
                    if let Some(item) = self.resolve(field, depth)? {
                        builder.add_repeated_field(&field.name, item)?;
                    }
                }
            } else if let Some(value) = self.resolve(field, depth)? {
                builder.set_field(&field.name, value)?;
            }
        }

        Ok(builder.build())
    }

    /// Synthesize a single value for a field, ignoring the repeated flag.
    ///
    /// Returns `Ok(None)` when a message-kind field cannot be resolved; the
    /// caller leaves the field unset.
    fn resolve(&mut self, field: &FieldDescriptor, depth: usize) -> Result<Option<Value>> {
        let value = match field.kind {
            FieldKind::Double => Value::Double(round2(self.rng.gen_range(0.0..100.0))),
            FieldKind::Float => Value::Float(round2(self.rng.gen_range(0.0..100.0)) as f32),
            FieldKind::Int32 | FieldKind::Sint32 | FieldKind::Sfixed32 => {
                Value::Int32(self.rng.gen_range(1..10000))
            }
            FieldKind::Uint32 | FieldKind::Fixed32 => Value::Uint32(self.rng.gen_range(1..10000)),
            FieldKind::Int64 | FieldKind::Sint64 | FieldKind::Sfixed64 => {
                Value::Int64(self.rng.gen_range(1..10000))
            }
            FieldKind::Uint64 | FieldKind::Fixed64 => Value::Uint64(self.rng.gen_range(1..10000)),
            FieldKind::Bool => Value::Bool(self.rng.gen_bool(0.5)),
            FieldKind::String => {
                Value::String(context::string_for_field(&field.name, &mut self.rng))
            }
            FieldKind::Bytes => {
                let quote = QUOTES[self.rng.gen_range(0..QUOTES.len())];
                Value::Bytes(quote.as_bytes().to_vec())
            }
            FieldKind::Enum => Value::Enum(self.pick_enum_value(&field.enum_values)),
            FieldKind::Message => return self.resolve_nested(field, depth),
        };
        Ok(Some(value))
    }

    /// Pick an enum constant for a field.
    ///
    /// When more than one constant is declared and the first one's name
    /// contains "UNKNOWN" (case-sensitive), the first is excluded so
    /// generated data avoids the unset sentinel. The pick is uniform over
    /// the remaining positions, last index included.
    fn pick_enum_value(&mut self, values: &[EnumValue]) -> EnumValue {
        let start = if values.len() > 1 && values[0].name.contains("UNKNOWN") {
            1
        } else {
            0
        };
        values[self.rng.gen_range(start..values.len())].clone()
    }

    /// Recursively generate a nested message value.
    ///
    /// The child faker inherits no configuration: overrides and repeated
    /// count bounds apply only to the type they were configured on. Its RNG
    /// is derived from the parent's so seeded runs stay reproducible.
    fn resolve_nested(&mut self, field: &FieldDescriptor, depth: usize) -> Result<Option<Value>> {
        if depth >= MAX_NESTING_DEPTH {
            warn!(
                field = %field.name,
                depth,
                "nesting ceiling reached; leaving field unset"
            );
            return Ok(None);
        }

        // Presence of message_type is a registry invariant.
        let Some(type_name) = field.message_type.as_deref() else {
            return Ok(None);
        };
        let Some(nested) = self.schema.message(type_name) else {
            warn!(
                field = %field.name,
                message_type = %type_name,
                "nested message type not registered; leaving field unset"
            );
            return Ok(None);
        };

        let mut child = ProtoFaker {
            schema: self.schema,
            descriptor: nested,
            overrides: HashMap::new(),
            min_repeated: DEFAULT_MIN_REPEATED,
            max_repeated: DEFAULT_MAX_REPEATED,
            rng: StdRng::seed_from_u64(self.rng.r#gen()),
        };
        let message = child.fake_at_depth(depth + 1)?;
        Ok(Some(Value::Message(Box::new(message))))
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
