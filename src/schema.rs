//! Schema types for provider, resource and data source arguments.
//!
//! A schema is the contract with the host: names, types, whether a field is
//! required, optional or computed, defaults and value constraints. The
//! planner and the validator both read it.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Value type of an attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeType {
    /// UTF-8 string.
    String,
    /// Signed 64-bit integer.
    Int64,
    /// Boolean.
    Bool,
    /// Ordered, carried as a JSON array.
    List(Box<AttributeType>),
    /// Unordered, carried as a JSON array.
    Set(Box<AttributeType>),
    /// String keys to values of one type.
    Map(Box<AttributeType>),
}

impl AttributeType {
    /// List of `element_type`.
    pub fn list(element_type: AttributeType) -> Self {
        Self::List(Box::new(element_type))
    }

    /// Set of `element_type`.
    pub fn set(element_type: AttributeType) -> Self {
        Self::Set(Box::new(element_type))
    }

    /// Map from string keys to `element_type`.
    pub fn map(element_type: AttributeType) -> Self {
        Self::Map(Box::new(element_type))
    }
}

/// Who sets an attribute: the configuration, the provider, or both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AttributeFlags {
    /// Must be present in configuration.
    pub required: bool,
    /// May be present in configuration.
    pub optional: bool,
    /// Filled in by the provider when the configuration leaves it unset.
    pub computed: bool,
    /// Hidden from logs and plan output.
    pub sensitive: bool,
}

impl AttributeFlags {
    /// Flags for a required attribute.
    pub fn required() -> Self {
        Self {
            required: true,
            ..Self::default()
        }
    }

    /// Flags for an optional attribute.
    pub fn optional() -> Self {
        Self {
            optional: true,
            ..Self::default()
        }
    }

    /// Flags for a read-only attribute.
    pub fn computed() -> Self {
        Self {
            computed: true,
            ..Self::default()
        }
    }

    /// Optional in configuration, filled in by the provider when absent.
    pub fn optional_computed() -> Self {
        Self {
            optional: true,
            computed: true,
            ..Self::default()
        }
    }

    /// Marks the value as sensitive.
    pub fn sensitive(self) -> Self {
        Self {
            sensitive: true,
            ..self
        }
    }
}

/// One argument or attribute of a schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    /// Value type.
    #[serde(rename = "type")]
    pub attr_type: AttributeType,
    /// Presence flags.
    #[serde(flatten)]
    pub flags: AttributeFlags,
    /// Human-readable description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// A change replaces the object instead of updating it.
    #[serde(default)]
    pub force_new: bool,
    /// Value planned when the configuration leaves the attribute unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<serde_json::Value>,
    /// Value check applied during validation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub constraint: Option<Constraint>,
}

/// A restriction on the values an attribute accepts, checked by
/// [`crate::validation`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Constraint {
    /// Character count in `min..=max`.
    StringLength {
        /// Shortest accepted length.
        min: usize,
        /// Longest accepted length.
        max: usize,
    },
    /// One of a fixed set of strings.
    AllowedStrings(Vec<String>),
    /// One of a fixed set of integers.
    AllowedInts(Vec<i64>),
    /// Integer in `min..=max`.
    IntRange {
        /// Lower bound.
        min: i64,
        /// Upper bound.
        max: i64,
    },
}

impl Attribute {
    /// Attribute of `attr_type` with `flags`.
    pub fn new(attr_type: AttributeType, flags: AttributeFlags) -> Self {
        Self {
            attr_type,
            flags,
            description: None,
            force_new: false,
            default: None,
            constraint: None,
        }
    }

    /// Required string.
    pub fn required_string() -> Self {
        Self::new(AttributeType::String, AttributeFlags::required())
    }

    /// Optional string.
    pub fn optional_string() -> Self {
        Self::new(AttributeType::String, AttributeFlags::optional())
    }

    /// Read-only string.
    pub fn computed_string() -> Self {
        Self::new(AttributeType::String, AttributeFlags::computed())
    }

    /// Optional string the provider fills in when absent.
    pub fn optional_computed_string() -> Self {
        Self::new(AttributeType::String, AttributeFlags::optional_computed())
    }

    /// Required integer.
    pub fn required_int64() -> Self {
        Self::new(AttributeType::Int64, AttributeFlags::required())
    }

    /// Optional integer.
    pub fn optional_int64() -> Self {
        Self::new(AttributeType::Int64, AttributeFlags::optional())
    }

    /// Read-only integer.
    pub fn computed_int64() -> Self {
        Self::new(AttributeType::Int64, AttributeFlags::computed())
    }

    /// Optional integer the provider fills in when absent.
    pub fn optional_computed_int64() -> Self {
        Self::new(AttributeType::Int64, AttributeFlags::optional_computed())
    }

    /// Required boolean.
    pub fn required_bool() -> Self {
        Self::new(AttributeType::Bool, AttributeFlags::required())
    }

    /// Optional boolean.
    pub fn optional_bool() -> Self {
        Self::new(AttributeType::Bool, AttributeFlags::optional())
    }

    /// Read-only boolean.
    pub fn computed_bool() -> Self {
        Self::new(AttributeType::Bool, AttributeFlags::computed())
    }

    /// List attribute.
    pub fn list(element_type: AttributeType, flags: AttributeFlags) -> Self {
        Self::new(AttributeType::list(element_type), flags)
    }

    /// Set attribute.
    pub fn set(element_type: AttributeType, flags: AttributeFlags) -> Self {
        Self::new(AttributeType::set(element_type), flags)
    }

    /// Map of strings.
    pub fn string_map(flags: AttributeFlags) -> Self {
        Self::new(AttributeType::map(AttributeType::String), flags)
    }

    /// The optional path every data source writes its result list to.
    pub fn result_output_file() -> Self {
        Self::optional_string().with_description("Used to save results.")
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Changing this attribute replaces the resource.
    pub fn with_force_new(mut self) -> Self {
        self.force_new = true;
        self
    }

    /// Value used when configuration omits the attribute.
    pub fn with_default(mut self, default: serde_json::Value) -> Self {
        self.default = Some(default);
        self
    }

    /// Marks the value as sensitive.
    pub fn sensitive(mut self) -> Self {
        self.flags = self.flags.sensitive();
        self
    }

    /// Requires a string length in `min..=max`.
    pub fn with_length(self, min: usize, max: usize) -> Self {
        self.with_constraint(Constraint::StringLength { min, max })
    }

    /// Restricts the value to `values`.
    pub fn with_allowed_strings(self, values: &[&str]) -> Self {
        let values = values.iter().map(|v| v.to_string()).collect();
        self.with_constraint(Constraint::AllowedStrings(values))
    }

    /// Restricts the value to `values`.
    pub fn with_allowed_ints(self, values: &[i64]) -> Self {
        self.with_constraint(Constraint::AllowedInts(values.to_vec()))
    }

    /// Requires an integer in `min..=max`.
    pub fn with_int_range(self, min: i64, max: i64) -> Self {
        self.with_constraint(Constraint::IntRange { min, max })
    }

    fn with_constraint(mut self, constraint: Constraint) -> Self {
        self.constraint = Some(constraint);
        self
    }
}

/// Attributes and nested blocks of one level of a schema, such as the
/// `rules` of an alarm policy or the `back_up_tables` of a backup strategy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Attributes by name.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub attributes: HashMap<String, Attribute>,
    /// Nested blocks by name.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub blocks: HashMap<String, NestedBlock>,
}

impl Block {
    /// Empty block.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an attribute.
    pub fn with_attribute(mut self, name: impl Into<String>, attr: Attribute) -> Self {
        self.attributes.insert(name.into(), attr);
        self
    }

    /// Adds a nested block.
    pub fn with_block(mut self, name: impl Into<String>, block: NestedBlock) -> Self {
        self.blocks.insert(name.into(), block);
        self
    }
}

/// A repeated block. Always carried as a JSON array; a block allowing at
/// most one element has `max_items == 1`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NestedBlock {
    /// Shape of each element.
    #[serde(flatten)]
    pub block: Block,
    /// Fewest elements accepted.
    #[serde(default)]
    pub min_items: u32,
    /// 0 is unlimited.
    #[serde(default)]
    pub max_items: u32,
    /// The provider fills the block in: data source results, or an optional
    /// block the API defaults.
    #[serde(default)]
    pub computed: bool,
    /// Changing the block replaces the resource.
    #[serde(default)]
    pub force_new: bool,
}

impl NestedBlock {
    /// Unbounded list of `block`.
    pub fn list(block: Block) -> Self {
        Self {
            block,
            min_items: 0,
            max_items: 0,
            computed: false,
            force_new: false,
        }
    }

    /// At most one element.
    pub fn single(block: Block) -> Self {
        Self::list(block).with_max_items(1)
    }

    /// Sets the fewest elements accepted.
    pub fn with_min_items(mut self, min: u32) -> Self {
        self.min_items = min;
        self
    }

    /// Sets the most elements accepted; 0 means unbounded.
    pub fn with_max_items(mut self, max: u32) -> Self {
        self.max_items = max;
        self
    }

    /// The provider may fill the block in.
    pub fn with_computed(mut self) -> Self {
        self.computed = true;
        self
    }

    /// Changing the block replaces the resource.
    pub fn with_force_new(mut self) -> Self {
        self.force_new = true;
        self
    }
}

/// Schema of a resource, a data source or the provider block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    /// Bumped when the state layout changes.
    #[serde(default)]
    pub version: u64,
    /// Top-level block.
    #[serde(flatten)]
    pub block: Block,
}

impl Default for Schema {
    fn default() -> Self {
        Self::v0()
    }
}

impl Schema {
    /// Empty schema at `version`.
    pub fn new(version: u64) -> Self {
        Self {
            version,
            block: Block::new(),
        }
    }

    /// Empty schema at version 0.
    pub fn v0() -> Self {
        Self::new(0)
    }

    /// Adds a top-level attribute.
    pub fn with_attribute(mut self, name: impl Into<String>, attr: Attribute) -> Self {
        self.block.attributes.insert(name.into(), attr);
        self
    }

    /// Adds a top-level block.
    pub fn with_block(mut self, name: impl Into<String>, block: NestedBlock) -> Self {
        self.block.blocks.insert(name.into(), block);
        self
    }

    /// Whether changing `name` forces replacement.
    pub fn is_force_new(&self, name: &str) -> bool {
        match self.block.attributes.get(name) {
            Some(attr) => attr.force_new,
            None => self.block.blocks.get(name).is_some_and(|b| b.force_new),
        }
    }

    /// Top-level fields whose change forces replacement.
    pub fn force_new_fields(&self) -> Vec<&str> {
        self.field_names()
            .into_iter()
            .filter(|name| self.is_force_new(name))
            .collect()
    }

    /// Whether the provider fills in `name` when the configuration does not.
    pub fn is_computed(&self, name: &str) -> bool {
        match self.block.attributes.get(name) {
            Some(attr) => attr.flags.computed,
            None => self.block.blocks.get(name).is_some_and(|b| b.computed),
        }
    }

    /// Top-level attribute and block names, sorted.
    pub fn field_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .block
            .attributes
            .keys()
            .chain(self.block.blocks.keys())
            .map(String::as_str)
            .collect();
        names.sort_unstable();
        names
    }
}

/// Every schema the provider serves, by type name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ProviderSchema {
    /// The provider block itself.
    #[serde(default)]
    pub provider: Schema,
    /// Resource schemas by type name.
    #[serde(default)]
    pub resources: HashMap<String, Schema>,
    /// Data source schemas by type name.
    #[serde(default)]
    pub data_sources: HashMap<String, Schema>,
}

impl ProviderSchema {
    /// Empty provider schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the provider configuration schema.
    pub fn with_provider_config(mut self, schema: Schema) -> Self {
        self.provider = schema;
        self
    }

    /// Registers a resource schema.
    pub fn with_resource(mut self, name: impl Into<String>, schema: Schema) -> Self {
        self.resources.insert(name.into(), schema);
        self
    }

    /// Registers a data source schema.
    pub fn with_data_source(mut self, name: impl Into<String>, schema: Schema) -> Self {
        self.data_sources.insert(name.into(), schema);
        self
    }
}

/// How serious a diagnostic is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticSeverity {
    /// The operation cannot proceed.
    Error,
    /// Reported but not fatal.
    Warning,
}

/// A validation finding reported back to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Error or warning.
    pub severity: DiagnosticSeverity,
    /// One-line description.
    pub summary: String,
    /// Longer explanation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    /// Dotted path of the offending attribute, e.g. `conditions.0.rules.1.period`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute: Option<String>,
}

impl Diagnostic {
    fn with_severity(severity: DiagnosticSeverity, summary: impl Into<String>) -> Self {
        Self {
            severity,
            summary: summary.into(),
            detail: None,
            attribute: None,
        }
    }

    /// Error diagnostic.
    pub fn error(summary: impl Into<String>) -> Self {
        Self::with_severity(DiagnosticSeverity::Error, summary)
    }

    /// Warning diagnostic.
    pub fn warning(summary: impl Into<String>) -> Self {
        Self::with_severity(DiagnosticSeverity::Warning, summary)
    }

    /// Adds a longer explanation.
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Points the diagnostic at an attribute.
    pub fn with_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.attribute = Some(attribute.into());
        self
    }

    /// True for error diagnostics.
    pub fn is_error(&self) -> bool {
        self.severity == DiagnosticSeverity::Error
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_type_constructors() {
        let list = AttributeType::list(AttributeType::String);
        assert!(matches!(list, AttributeType::List(_)));

        let map = AttributeType::map(AttributeType::Int64);
        assert!(matches!(map, AttributeType::Map(_)));
    }

    #[test]
    fn test_attribute_flags() {
        let required = AttributeFlags::required();
        assert!(required.required);
        assert!(!required.optional);
        assert!(!required.computed);

        let computed = AttributeFlags::computed();
        assert!(!computed.required);
        assert!(!computed.optional);
        assert!(computed.computed);

        let optional_computed = AttributeFlags::optional_computed();
        assert!(!optional_computed.required);
        assert!(optional_computed.optional);
        assert!(optional_computed.computed);

        let sensitive = AttributeFlags::required().sensitive();
        assert!(sensitive.sensitive);
    }

    #[test]
    fn test_attribute_builders() {
        let attr = Attribute::required_string()
            .with_description("A test attribute")
            .with_force_new();

        assert_eq!(attr.attr_type, AttributeType::String);
        assert!(attr.flags.required);
        assert_eq!(attr.description, Some("A test attribute".to_string()));
        assert!(attr.force_new);
    }

    #[test]
    fn test_schema_builder() {
        let schema = Schema::v0()
            .with_attribute("instance_id", Attribute::required_string())
            .with_attribute("id", Attribute::computed_string())
            .with_block(
                "meta_backup_strategy",
                NestedBlock::list(
                    Block::new().with_attribute("week_days", Attribute::required_string()),
                )
                .with_max_items(1),
            );

        assert_eq!(schema.version, 0);
        assert!(schema.block.attributes.contains_key("instance_id"));
        assert!(schema.block.attributes.contains_key("id"));
        assert!(schema.block.blocks.contains_key("meta_backup_strategy"));
    }

    #[test]
    fn test_provider_schema() {
        let provider_schema = ProviderSchema::new()
            .with_provider_config(
                Schema::v0().with_attribute("secret_key", Attribute::required_string().sensitive()),
            )
            .with_resource(
                "tencentcloud_clickhouse_backup",
                Schema::v0()
                    .with_attribute("name", Attribute::required_string())
                    .with_attribute("id", Attribute::computed_string()),
            )
            .with_data_source(
                "tencentcloud_clickhouse_instances",
                Schema::v0().with_attribute("instance_id", Attribute::optional_string()),
            );

        assert!(provider_schema
            .provider
            .block
            .attributes
            .contains_key("secret_key"));
        assert!(provider_schema.resources.contains_key("tencentcloud_clickhouse_backup"));
        assert!(provider_schema.data_sources.contains_key("tencentcloud_clickhouse_instances"));
    }

    #[test]
    fn test_diagnostic() {
        let err = Diagnostic::error("Invalid configuration")
            .with_detail("The value must be positive")
            .with_attribute("count");

        assert_eq!(err.severity, DiagnosticSeverity::Error);
        assert_eq!(err.summary, "Invalid configuration");
        assert_eq!(err.detail, Some("The value must be positive".to_string()));
        assert_eq!(err.attribute, Some("count".to_string()));
    }

    #[test]
    fn test_constraints() {
        let attr = Attribute::optional_string().with_length(0, 100);
        assert_eq!(
            attr.constraint,
            Some(Constraint::StringLength { min: 0, max: 100 })
        );

        let attr = Attribute::optional_int64().with_allowed_ints(&[0, 1]);
        assert_eq!(attr.constraint, Some(Constraint::AllowedInts(vec![0, 1])));
    }

    #[test]
    fn test_schema_field_lookups() {
        let schema = Schema::v0()
            .with_attribute("namespace", Attribute::required_string().with_force_new())
            .with_attribute("create_time", Attribute::computed_string())
            .with_block(
                "policy_tag",
                NestedBlock::list(Block::new().with_attribute("key", Attribute::required_string()))
                    .with_force_new(),
            );

        assert!(schema.is_force_new("namespace"));
        assert!(schema.is_force_new("policy_tag"));
        assert!(!schema.is_force_new("create_time"));
        assert!(schema.is_computed("create_time"));
        assert_eq!(schema.field_names(), vec!["create_time", "namespace", "policy_tag"]);
        assert_eq!(schema.force_new_fields(), vec!["namespace", "policy_tag"]);
    }

    #[test]
    fn test_single_block() {
        let single = NestedBlock::single(Block::new()).with_computed();
        assert_eq!(single.max_items, 1);
        assert_eq!(single.min_items, 0);
        assert!(single.computed);
    }

    #[test]
    fn test_attribute_serializes_flat() {
        let attr = Attribute::optional_int64()
            .with_default(serde_json::json!(1))
            .with_allowed_ints(&[0, 1]);
        let value = serde_json::to_value(&attr).unwrap();
        assert_eq!(value["type"], "int64");
        assert_eq!(value["optional"], true);
        assert_eq!(value["default"], 1);
        assert_eq!(value["constraint"]["allowed_ints"], serde_json::json!([0, 1]));
    }
}
