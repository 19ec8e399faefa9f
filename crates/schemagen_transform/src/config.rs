//! Configuration for the schema transform.

/// Configuration for the schema transform.
///
/// The defaults follow the Realm conventions: models extend `Object` from
/// the `"realm"` package and use `@index` / `@mapTo(...)` decorators.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransformConfig {
    /// Module specifiers recognized as the storage engine package.
    pub modules: Vec<String>,

    /// Export name of the base entity class.
    pub base_class: String,

    /// Name of the bare decorator that marks a property as indexed.
    pub index_decorator: String,

    /// Name of the call decorator that renames the stored column.
    pub map_to_decorator: String,

    /// Indentation unit used in emitted code.
    pub indent: String,

    /// Whether the emitted schema spans multiple lines.
    pub multi_line: bool,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            modules: vec!["realm".to_string()],
            base_class: "Object".to_string(),
            index_decorator: "index".to_string(),
            map_to_decorator: "mapTo".to_string(),
            indent: "  ".to_string(),
            multi_line: true,
        }
    }
}

impl TransformConfig {
    /// Creates a configuration with the default conventions.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to replace the recognized modules.
    #[must_use]
    pub fn with_modules<I, S>(mut self, modules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.modules = modules.into_iter().map(Into::into).collect();
        self
    }

    /// Builder method to recognize one more module.
    #[must_use]
    pub fn with_module(mut self, module: impl Into<String>) -> Self {
        let module = module.into();
        if !self.modules.contains(&module) {
            self.modules.push(module);
        }
        self
    }

    /// Builder method to set the base class export name.
    #[must_use]
    pub fn with_base_class(mut self, name: impl Into<String>) -> Self {
        self.base_class = name.into();
        self
    }

    /// Builder method to set the index decorator name.
    #[must_use]
    pub fn with_index_decorator(mut self, name: impl Into<String>) -> Self {
        self.index_decorator = name.into();
        self
    }

    /// Builder method to set the column-mapping decorator name.
    #[must_use]
    pub fn with_map_to_decorator(mut self, name: impl Into<String>) -> Self {
        self.map_to_decorator = name.into();
        self
    }

    /// Builder method to set the indentation unit.
    #[must_use]
    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }

    /// Builder method to choose single- or multi-line schema output.
    #[must_use]
    pub fn with_multi_line(mut self, multi_line: bool) -> Self {
        self.multi_line = multi_line;
        self
    }

    /// Returns true if `specifier` names a recognized module.
    #[must_use]
    pub fn is_recognized_module(&self, specifier: &str) -> bool {
        self.modules.iter().any(|m| m == specifier)
    }
}
