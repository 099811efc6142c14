//! Schema validation helpers.
//!
//! Validates a configuration `serde_json::Value` against a [`Schema`] before
//! any API call is made, so malformed input surfaces as diagnostics without
//! contacting the cloud.
//!
//! ```
//! use tencentcloud_provider::schema::{Attribute, Schema};
//! use tencentcloud_provider::validation::validate;
//! use serde_json::json;
//!
//! let schema = Schema::v0()
//!     .with_attribute("policy_name", Attribute::required_string())
//!     .with_attribute("remark", Attribute::optional_string().with_length(0, 100));
//!
//! assert!(validate(&schema, &json!({"policy_name": "cpu-high"})).is_empty());
//!
//! let diagnostics = validate(&schema, &json!({"policy_name": 1}));
//! assert_eq!(diagnostics[0].attribute, Some("policy_name".to_string()));
//! ```

use crate::schema::{
    Attribute, AttributeType, Block, Constraint, Diagnostic, DiagnosticSeverity, NestedBlock,
    Schema,
};
use serde_json::Value;

/// Validate a JSON value against a schema.
///
/// - Required attributes must be present and non-null
/// - Computed-only attributes and blocks are skipped
/// - Attribute types and value constraints must hold
/// - Nested blocks are validated recursively with min/max item constraints
pub fn validate(schema: &Schema, value: &Value) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    validate_block(&schema.block, value, "", &mut diagnostics);
    diagnostics
}

/// Validate a JSON value against a schema, returning the diagnostics as an error.
pub fn validate_result(schema: &Schema, value: &Value) -> Result<(), Vec<Diagnostic>> {
    let diagnostics = validate(schema, value);
    if diagnostics.is_empty() {
        Ok(())
    } else {
        Err(diagnostics)
    }
}

/// Check if a JSON value is valid against a schema.
pub fn is_valid(schema: &Schema, value: &Value) -> bool {
    validate(schema, value).is_empty()
}

fn validate_block(block: &Block, value: &Value, path: &str, diagnostics: &mut Vec<Diagnostic>) {
    let obj = match value {
        Value::Object(map) => map,
        Value::Null => return,
        _ => {
            let mut diag =
                Diagnostic::error("Expected object").with_detail(format!("Got {}", value_type_name(value)));
            if !path.is_empty() {
                diag = diag.with_attribute(path);
            }
            diagnostics.push(diag);
            return;
        },
    };

    for (name, attr) in &block.attributes {
        let attr_path = join_path(path, name);
        validate_attribute(attr, obj.get(name), &attr_path, diagnostics);
    }

    for (name, nested) in &block.blocks {
        let block_path = join_path(path, name);
        validate_nested_block(nested, obj.get(name), &block_path, diagnostics);
    }
}

fn validate_attribute(
    attr: &Attribute,
    value: Option<&Value>,
    path: &str,
    diagnostics: &mut Vec<Diagnostic>,
) {
    if attr.flags.computed && !attr.flags.optional && !attr.flags.required {
        return;
    }

    match value {
        None | Some(Value::Null) => {
            if attr.flags.required {
                diagnostics.push(
                    Diagnostic::error(format!("Missing required attribute '{}'", path))
                        .with_detail("This attribute is required and must be provided")
                        .with_attribute(path),
                );
            }
        },
        Some(v) => {
            let before = diagnostics.len();
            validate_attribute_type(&attr.attr_type, v, path, diagnostics);
            if diagnostics.len() == before {
                if let Some(constraint) = &attr.constraint {
                    validate_constraint(constraint, v, path, diagnostics);
                }
            }
        },
    }
}

fn validate_attribute_type(
    attr_type: &AttributeType,
    value: &Value,
    path: &str,
    diagnostics: &mut Vec<Diagnostic>,
) {
    match attr_type {
        AttributeType::String => {
            if !value.is_string() {
                diagnostics.push(type_error(path, "string", value));
            }
        },
        AttributeType::Int64 => {
            if !is_int64(value) {
                diagnostics.push(type_error(path, "int64", value));
            }
        },
        AttributeType::Bool => {
            if !value.is_boolean() {
                diagnostics.push(type_error(path, "bool", value));
            }
        },
        AttributeType::List(element_type) | AttributeType::Set(element_type) => {
            let expected = if matches!(attr_type, AttributeType::Set(_)) {
                "set"
            } else {
                "list"
            };
            match value.as_array() {
                Some(arr) => {
                    for (i, elem) in arr.iter().enumerate() {
                        let elem_path = format!("{}.{}", path, i);
                        validate_attribute_type(element_type, elem, &elem_path, diagnostics);
                    }
                },
                None => diagnostics.push(type_error(path, expected, value)),
            }
        },
        AttributeType::Map(value_type) => match value.as_object() {
            Some(obj) => {
                for (key, val) in obj {
                    let key_path = format!("{}.{}", path, key);
                    validate_attribute_type(value_type, val, &key_path, diagnostics);
                }
            },
            None => diagnostics.push(type_error(path, "map", value)),
        },
    }
}

fn validate_constraint(
    constraint: &Constraint,
    value: &Value,
    path: &str,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let violation = match constraint {
        Constraint::StringLength { min, max } => value.as_str().and_then(|s| {
            let len = s.chars().count();
            (len < *min || len > *max)
                .then(|| format!("length must be between {} and {}, got {}", min, max, len))
        }),
        Constraint::AllowedStrings(allowed) => value.as_str().and_then(|s| {
            (!allowed.iter().any(|a| a == s))
                .then(|| format!("expected one of [{}], got {:?}", allowed.join(", "), s))
        }),
        Constraint::AllowedInts(allowed) => value.as_i64().and_then(|n| {
            (!allowed.contains(&n)).then(|| {
                let allowed: Vec<String> = allowed.iter().map(i64::to_string).collect();
                format!("expected one of [{}], got {}", allowed.join(", "), n)
            })
        }),
        Constraint::IntRange { min, max } => value.as_i64().and_then(|n| {
            (n < *min || n > *max)
                .then(|| format!("expected value in range {}..={}, got {}", min, max, n))
        }),
    };

    if let Some(detail) = violation {
        diagnostics.push(
            Diagnostic::error(format!("Invalid value for attribute '{}'", path))
                .with_detail(detail)
                .with_attribute(path),
        );
    }
}

fn validate_nested_block(
    nested: &NestedBlock,
    value: Option<&Value>,
    path: &str,
    diagnostics: &mut Vec<Diagnostic>,
) {
    match value {
        None | Some(Value::Null) => {
            if nested.min_items > 0 && !nested.computed {
                diagnostics.push(
                    Diagnostic::error(format!(
                        "Block '{}' requires at least {} item(s)",
                        path, nested.min_items
                    ))
                    .with_attribute(path),
                );
            }
        },
        Some(Value::Array(arr)) => {
            let len = arr.len() as u32;

            if len < nested.min_items {
                diagnostics.push(
                    Diagnostic::error(format!(
                        "Block '{}' requires at least {} item(s), got {}",
                        path, nested.min_items, len
                    ))
                    .with_attribute(path),
                );
            }

            // 0 means unlimited
            if nested.max_items > 0 && len > nested.max_items {
                diagnostics.push(
                    Diagnostic::error(format!(
                        "Block '{}' allows at most {} item(s), got {}",
                        path, nested.max_items, len
                    ))
                    .with_attribute(path),
                );
            }

            for (i, item) in arr.iter().enumerate() {
                let item_path = format!("{}.{}", path, i);
                validate_block(&nested.block, item, &item_path, diagnostics);
            }
        },
        Some(v) => {
            diagnostics.push(
                Diagnostic::error(format!("Expected list for block '{}'", path))
                    .with_detail(format!("Got {}", value_type_name(v)))
                    .with_attribute(path),
            );
        },
    }
}

fn join_path(base: &str, name: &str) -> String {
    if base.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", base, name)
    }
}

fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn is_int64(value: &Value) -> bool {
    match value {
        Value::Number(n) if n.is_i64() => true,
        Value::Number(n) => n
            .as_f64()
            .is_some_and(|f| f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64),
        _ => false,
    }
}

fn type_error(path: &str, expected: &str, got: &Value) -> Diagnostic {
    Diagnostic {
        severity: DiagnosticSeverity::Error,
        summary: format!("Invalid type for attribute '{}'", path),
        detail: Some(format!("Expected {}, got {}", expected, value_type_name(got))),
        attribute: Some(path.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Attribute, AttributeFlags, Block, NestedBlock, Schema};
    use serde_json::json;

    #[test]
    fn test_validate_required_string() {
        let schema = Schema::v0().with_attribute("instance_id", Attribute::required_string());

        assert!(validate(&schema, &json!({"instance_id": "cdwch-xxxx"})).is_empty());

        let diagnostics = validate(&schema, &json!({}));
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].attribute, Some("instance_id".to_string()));

        assert_eq!(validate(&schema, &json!({"instance_id": null})).len(), 1);

        let diagnostics = validate(&schema, &json!({"instance_id": 123}));
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].summary.contains("Invalid type"));
    }

    #[test]
    fn test_validate_optional_and_computed() {
        let schema = Schema::v0()
            .with_attribute("project_id", Attribute::optional_int64())
            .with_attribute("create_time", Attribute::computed_string());

        assert!(validate(&schema, &json!({})).is_empty());
        assert!(validate(&schema, &json!({"project_id": null})).is_empty());
        assert!(validate(&schema, &json!({"project_id": 0, "create_time": 5})).is_empty());
        assert_eq!(validate(&schema, &json!({"project_id": "zero"})).len(), 1);
    }

    #[test]
    fn test_validate_int64() {
        let schema = Schema::v0().with_attribute("retain_days", Attribute::required_int64());

        assert!(validate(&schema, &json!({"retain_days": 7})).is_empty());
        assert!(validate(&schema, &json!({"retain_days": 7.0})).is_empty());
        assert_eq!(validate(&schema, &json!({"retain_days": 7.5})).len(), 1);
        assert_eq!(validate(&schema, &json!({"retain_days": "7"})).len(), 1);
    }

    #[test]
    fn test_validate_collections() {
        let schema = Schema::v0()
            .with_attribute(
                "notice_ids",
                Attribute::list(AttributeType::String, AttributeFlags::optional()),
            )
            .with_attribute("labels", Attribute::string_map(AttributeFlags::optional()))
            .with_attribute(
                "whitelist",
                Attribute::set(AttributeType::String, AttributeFlags::optional()),
            );

        assert!(validate(
            &schema,
            &json!({"notice_ids": ["notice-1"], "labels": {"severity": "warn"}, "whitelist": []})
        )
        .is_empty());

        let diagnostics = validate(&schema, &json!({"notice_ids": ["a", 1]}));
        assert_eq!(diagnostics[0].attribute, Some("notice_ids.1".to_string()));

        let diagnostics = validate(&schema, &json!({"labels": {"severity": 2}}));
        assert_eq!(diagnostics[0].attribute, Some("labels.severity".to_string()));

        let diagnostics = validate(&schema, &json!({"whitelist": "10.0.0.1"}));
        assert_eq!(diagnostics[0].detail, Some("Expected set, got string".to_string()));
    }

    #[test]
    fn test_validate_constraints() {
        let schema = Schema::v0()
            .with_attribute("remark", Attribute::optional_string().with_length(0, 5))
            .with_attribute("enable", Attribute::optional_int64().with_allowed_ints(&[0, 1]))
            .with_attribute(
                "notice_type",
                Attribute::optional_string().with_allowed_strings(&["ALARM", "OK", "ALL"]),
            )
            .with_attribute("execute_hour", Attribute::optional_int64().with_int_range(0, 23));

        assert!(validate(
            &schema,
            &json!({"remark": "short", "enable": 1, "notice_type": "ALL", "execute_hour": 23})
        )
        .is_empty());

        let diagnostics = validate(
            &schema,
            &json!({"remark": "too long", "enable": 2, "notice_type": "NONE", "execute_hour": 24}),
        );
        assert_eq!(diagnostics.len(), 4);
        assert!(diagnostics
            .iter()
            .all(|d| d.summary.starts_with("Invalid value for attribute")));
    }

    #[test]
    fn test_type_error_skips_constraint() {
        let schema =
            Schema::v0().with_attribute("remark", Attribute::optional_string().with_length(0, 1));
        let diagnostics = validate(&schema, &json!({"remark": 42}));
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].summary.contains("Invalid type"));
    }

    #[test]
    fn test_validate_nested_block_list() {
        let schema = Schema::v0().with_block(
            "conditions",
            NestedBlock::list(Block::new().with_attribute("is_union_rule", Attribute::required_int64()))
                .with_min_items(1)
                .with_max_items(1),
        );

        assert!(validate(&schema, &json!({"conditions": [{"is_union_rule": 0}]})).is_empty());

        let diagnostics = validate(&schema, &json!({"conditions": []}));
        assert!(diagnostics[0].summary.contains("at least 1"));

        let diagnostics = validate(
            &schema,
            &json!({"conditions": [{"is_union_rule": 0}, {"is_union_rule": 1}]}),
        );
        assert!(diagnostics[0].summary.contains("at most 1"));

        let diagnostics = validate(&schema, &json!({"conditions": [{"is_union_rule": "no"}]}));
        assert_eq!(
            diagnostics[0].attribute,
            Some("conditions.0.is_union_rule".to_string())
        );

        let diagnostics = validate(&schema, &json!({"conditions": {"is_union_rule": 0}}));
        assert!(diagnostics[0].summary.contains("Expected list"));
    }

    #[test]
    fn test_computed_block_not_required() {
        let schema = Schema::v0().with_block(
            "instance_list",
            NestedBlock::list(Block::new().with_attribute("instance_id", Attribute::computed_string()))
                .with_min_items(1)
                .with_computed(),
        );
        assert!(validate(&schema, &json!({})).is_empty());
    }

    #[test]
    fn test_validate_deeply_nested() {
        let schema = Schema::v0().with_block(
            "data_backup_strategy",
            NestedBlock::list(
                Block::new()
                    .with_attribute("week_days", Attribute::required_string())
                    .with_block(
                        "back_up_tables",
                        NestedBlock::list(
                            Block::new().with_attribute("database", Attribute::required_string()),
                        ),
                    ),
            ),
        );

        assert!(validate(
            &schema,
            &json!({"data_backup_strategy": [{"week_days": "3", "back_up_tables": [{"database": "db"}]}]})
        )
        .is_empty());

        let diagnostics = validate(
            &schema,
            &json!({"data_backup_strategy": [{"week_days": "3", "back_up_tables": [{"database": 1}]}]}),
        );
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            diagnostics[0].attribute,
            Some("data_backup_strategy.0.back_up_tables.0.database".to_string())
        );
    }

    #[test]
    fn test_result_helpers() {
        let schema = Schema::v0().with_attribute("name", Attribute::required_string());

        assert!(is_valid(&schema, &json!({"name": "test"})));
        assert!(!is_valid(&schema, &json!({})));
        assert!(validate_result(&schema, &json!({"name": "test"})).is_ok());
        assert_eq!(validate_result(&schema, &json!({})).unwrap_err().len(), 1);
    }

    #[test]
    fn test_validate_root_not_object() {
        let schema = Schema::v0().with_attribute("name", Attribute::required_string());

        let diagnostics = validate(&schema, &json!("not an object"));
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].summary.contains("Expected object"));
        assert_eq!(diagnostics[0].attribute, None);
    }
}
