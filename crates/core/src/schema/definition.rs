//! Declarative schema descriptions.

/// The expected shape of a YAML value.
#[derive(Debug, Clone, PartialEq)]
pub enum Schema {
    /// Accepts any value.
    Any,
    String,
    /// A lowercase name: letters, digits and single dashes, starting with a letter.
    Identifier,
    Boolean,
    /// Any mapping, contents unchecked.
    Mapping,
    /// A string from a fixed set.
    OneOf(Vec<&'static str>),
    Array(Box<Schema>),
    Object(ObjectSchema),
}

impl Schema {
    pub fn array(items: Schema) -> Self {
        Schema::Array(Box::new(items))
    }
}

/// A mapping with known keys.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ObjectSchema {
    pub keys: Vec<KeySchema>,
    /// Whether keys not listed in [`ObjectSchema::keys`] are accepted.
    pub allow_unknown: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct KeySchema {
    pub name: &'static str,
    pub schema: Schema,
    pub required: bool,
}

impl ObjectSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an optional key.
    pub fn key(mut self, name: &'static str, schema: Schema) -> Self {
        self.keys.push(KeySchema {
            name,
            schema,
            required: false,
        });
        self
    }

    /// Adds a key that must be present and non-null.
    pub fn required(mut self, name: &'static str, schema: Schema) -> Self {
        self.keys.push(KeySchema {
            name,
            schema,
            required: true,
        });
        self
    }

    pub fn allow_unknown(mut self, allow: bool) -> Self {
        self.allow_unknown = allow;
        self
    }

    pub fn get(&self, name: &str) -> Option<&KeySchema> {
        self.keys.iter().find(|key| key.name == name)
    }

    pub fn into_schema(self) -> Schema {
        Schema::Object(self)
    }
}

fn copy_spec_schema() -> Schema {
    ObjectSchema::new()
        .required("source", Schema::String)
        .key("target", Schema::String)
        .into_schema()
}

fn build_dependency_schema() -> Schema {
    ObjectSchema::new()
        .required("name", Schema::Identifier)
        .key("copy", Schema::array(copy_spec_schema()))
        .into_schema()
}

fn build_schema() -> Schema {
    // Module types add their own build keys.
    ObjectSchema::new()
        .key("dependencies", Schema::array(build_dependency_schema()))
        .allow_unknown(true)
        .into_schema()
}

/// Schema for a loaded Module resource.
///
/// Covers the structural fields only. Unknown top-level keys are accepted;
/// type-specific fields are validated later by the module type's handler.
pub fn core_module_schema() -> Schema {
    ObjectSchema::new()
        .required("apiVersion", Schema::String)
        .required("kind", Schema::OneOf(vec!["Module"]))
        .required("type", Schema::Identifier)
        .required("name", Schema::Identifier)
        .key("description", Schema::String)
        .key("disabled", Schema::Boolean)
        .key("include", Schema::array(Schema::String))
        .key("exclude", Schema::array(Schema::String))
        .key("repositoryUrl", Schema::String)
        .key("allowPublish", Schema::Boolean)
        .key("build", build_schema())
        .required("path", Schema::String)
        .required("configPath", Schema::String)
        .key("outputs", Schema::Mapping)
        .key("serviceConfigs", Schema::array(Schema::Any))
        .key("testConfigs", Schema::array(Schema::Any))
        .key("taskConfigs", Schema::array(Schema::Any))
        .key("spec", Schema::Mapping)
        .allow_unknown(true)
        .into_schema()
}
