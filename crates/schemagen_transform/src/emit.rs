//! Rendering schemas as TypeScript object literals.
//!
//! # Example
//!
//! ```
//! use schemagen_foundation::{ObjectSchema, PropertyType, SchemaProperty};
//! use schemagen_transform::emit::render_schema;
//!
//! let mut schema = ObjectSchema::new("Dog");
//! schema
//!     .properties
//!     .insert("name", SchemaProperty::new(PropertyType::String.into()));
//! assert_eq!(
//!     render_schema(&schema),
//!     "{ name: \"Dog\", properties: { name: { type: \"string\" } } }"
//! );
//! ```

use std::fmt::Write;

use schemagen_foundation::{DefaultValue, ObjectSchema, Properties, SchemaProperty};

/// Configuration for schema rendering.
#[derive(Debug, Clone)]
pub struct EmitConfig {
    /// Indentation unit for nested lines.
    pub indent: String,
    /// Indentation of the line the schema starts on.
    pub base_indent: String,
    /// Whether the schema and its property map span multiple lines.
    ///
    /// Individual property objects are always rendered on one line.
    pub multi_line: bool,
}

impl Default for EmitConfig {
    fn default() -> Self {
        Self {
            indent: "  ".to_string(),
            base_indent: String::new(),
            multi_line: false,
        }
    }
}

/// Render a schema as a single-line object literal.
#[must_use]
pub fn render_schema(schema: &ObjectSchema) -> String {
    render_schema_with_config(schema, &EmitConfig::default())
}

/// Render a schema as an object literal with custom configuration.
#[must_use]
pub fn render_schema_with_config(schema: &ObjectSchema, config: &EmitConfig) -> String {
    let mut writer = SchemaWriter::new(config);
    writer.write_schema(schema);
    writer.output
}

/// Render the `static schema = ...;` class member holding a schema.
#[must_use]
pub fn render_static(schema: &ObjectSchema, config: &EmitConfig) -> String {
    format!("static schema = {};", render_schema_with_config(schema, config))
}

/// Returns true if `name` can be written as an unquoted object key.
#[must_use]
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

/// One open object literal.
struct Frame {
    multi_line: bool,
    empty: bool,
}

/// Schema writer state.
struct SchemaWriter<'c> {
    config: &'c EmitConfig,
    output: String,
    indent_level: usize,
    frames: Vec<Frame>,
}

impl<'c> SchemaWriter<'c> {
    fn new(config: &'c EmitConfig) -> Self {
        Self {
            config,
            output: String::new(),
            indent_level: 0,
            frames: Vec::new(),
        }
    }

    // =========================================================================
    // Schema structure
    // =========================================================================

    fn write_schema(&mut self, schema: &ObjectSchema) {
        self.open(self.config.multi_line);

        self.key("name");
        self.print_string(&schema.name);

        self.key("properties");
        self.write_properties(&schema.properties);

        if let Some(primary_key) = &schema.primary_key {
            self.key("primaryKey");
            self.print_string(primary_key);
        }
        if let Some(embedded) = schema.embedded {
            self.key("embedded");
            self.print_bool(embedded);
        }
        if let Some(asymmetric) = schema.asymmetric {
            self.key("asymmetric");
            self.print_bool(asymmetric);
        }

        self.close();
    }

    fn write_properties(&mut self, properties: &Properties) {
        self.open(self.config.multi_line);
        for (name, property) in properties.iter() {
            self.key(name);
            self.write_property(property);
        }
        self.close();
    }

    fn write_property(&mut self, property: &SchemaProperty) {
        let descriptor = &property.descriptor;
        self.open(false);

        self.key("type");
        self.print_string(descriptor.kind().name());

        if let Some(object_type) = descriptor.object_type() {
            self.key("objectType");
            self.print_string(object_type);
        }
        if let Some(inverted) = descriptor.property() {
            self.key("property");
            self.print_string(inverted);
        }
        if descriptor.optional {
            self.key("optional");
            self.print_bool(true);
        }
        if let Some(default) = &property.default {
            self.key("default");
            self.print_default(default);
        }
        if property.indexed {
            self.key("indexed");
            self.print_bool(true);
        }
        if let Some(map_to) = &property.map_to {
            self.key("mapTo");
            self.print_string(map_to);
        }

        self.close();
    }

    // =========================================================================
    // Object literal layout
    // =========================================================================

    fn open(&mut self, multi_line: bool) {
        self.output.push('{');
        if multi_line {
            self.indent_level += 1;
        }
        self.frames.push(Frame {
            multi_line,
            empty: true,
        });
    }

    fn key(&mut self, key: &str) {
        let (multi_line, first) = match self.frames.last_mut() {
            Some(frame) => {
                let first = frame.empty;
                frame.empty = false;
                (frame.multi_line, first)
            }
            None => (false, true),
        };
        if multi_line {
            if !first {
                self.output.push(',');
            }
            self.newline();
        } else if first {
            self.output.push(' ');
        } else {
            self.output.push_str(", ");
        }
        if is_identifier(key) {
            self.output.push_str(key);
        } else {
            self.print_string(key);
        }
        self.output.push_str(": ");
    }

    fn close(&mut self) {
        let Some(frame) = self.frames.pop() else {
            return;
        };
        if frame.multi_line {
            self.indent_level -= 1;
            if !frame.empty {
                self.output.push(',');
                self.newline();
            }
        } else if !frame.empty {
            self.output.push(' ');
        }
        self.output.push('}');
    }

    fn newline(&mut self) {
        self.output.push('\n');
        self.output.push_str(&self.config.base_indent);
        for _ in 0..self.indent_level {
            self.output.push_str(&self.config.indent);
        }
    }

    // =========================================================================
    // Values
    // =========================================================================

    fn print_bool(&mut self, value: bool) {
        self.output.push_str(if value { "true" } else { "false" });
    }

    fn print_default(&mut self, default: &DefaultValue) {
        match default {
            DefaultValue::Literal(literal) => self.output.push_str(literal.source()),
            DefaultValue::Producer { source } => {
                // A leading brace would parse as a block body.
                if source.trim_start().starts_with('{') {
                    let _ = write!(self.output, "() => ({source})");
                } else {
                    let _ = write!(self.output, "() => {source}");
                }
            }
        }
    }

    fn print_string(&mut self, s: &str) {
        self.output.push('"');
        for c in s.chars() {
            match c {
                '"' => self.output.push_str("\\\""),
                '\\' => self.output.push_str("\\\\"),
                '\n' => self.output.push_str("\\n"),
                '\r' => self.output.push_str("\\r"),
                '\t' => self.output.push_str("\\t"),
                '\u{2028}' => self.output.push_str("\\u2028"),
                '\u{2029}' => self.output.push_str("\\u2029"),
                c if c.is_control() => {
                    let _ = write!(self.output, "\\u{:04X}", u32::from(c));
                }
                c => self.output.push(c),
            }
        }
        self.output.push('"');
    }
}
