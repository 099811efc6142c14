//! Schema-driven planning: diff proposed state against prior state.

use crate::schema::Schema;
use crate::state::{values_equal, ID_KEY};
use crate::types::{AttributeChange, PlanResult};
use serde_json::Value;

/// Fill unset attributes that declare a default.
pub fn apply_defaults(schema: &Schema, state: &mut Value) {
    let Some(obj) = state.as_object_mut() else {
        return;
    };
    for (name, attr) in &schema.block.attributes {
        if let Some(default) = &attr.default {
            let unset = obj.get(name).map_or(true, Value::is_null);
            if unset {
                obj.insert(name.clone(), default.clone());
            }
        }
    }
}

/// Plan the transition from `prior` to `proposed`.
///
/// - `proposed == null` plans a destroy.
/// - Defaults are applied to the proposed state.
/// - Computed fields left unset keep their prior value.
/// - A change to a `force_new` field requires replacement.
pub fn plan(schema: &Schema, prior: Option<&Value>, proposed: &Value) -> PlanResult {
    if proposed.is_null() {
        let changes = prior
            .and_then(Value::as_object)
            .map(|obj| {
                obj.iter()
                    .filter(|(_, v)| !v.is_null())
                    .map(|(k, v)| AttributeChange::removed(k.clone(), v.clone()))
                    .collect()
            })
            .unwrap_or_default();
        return PlanResult::with_changes(Value::Null, changes, false);
    }

    let mut planned = proposed.clone();
    apply_defaults(schema, &mut planned);

    let Some(prior_obj) = prior.filter(|p| !p.is_null()).and_then(Value::as_object) else {
        let changes = planned
            .as_object()
            .map(|obj| {
                let mut fields: Vec<_> = obj.iter().filter(|(_, v)| !v.is_null()).collect();
                fields.sort_by(|a, b| a.0.cmp(b.0));
                fields
                    .into_iter()
                    .map(|(k, v)| AttributeChange::added(k.clone(), v.clone()))
                    .collect()
            })
            .unwrap_or_default();
        return PlanResult::with_changes(planned, changes, false);
    };

    if let Some(obj) = planned.as_object_mut() {
        for name in schema.field_names() {
            let unset = obj.get(name).map_or(true, Value::is_null);
            if unset && schema.is_computed(name) {
                if let Some(prev) = prior_obj.get(name) {
                    obj.insert(name.to_string(), prev.clone());
                }
            }
        }
        if let Some(id) = prior_obj.get(ID_KEY) {
            obj.insert(ID_KEY.to_string(), id.clone());
        }
    }

    let mut changes = Vec::new();
    let mut requires_replace = false;
    for name in schema.field_names() {
        if name == ID_KEY {
            continue;
        }
        let before = prior_obj.get(name).unwrap_or(&Value::Null);
        let after = planned.get(name).unwrap_or(&Value::Null);
        if values_equal(before, after) {
            continue;
        }
        if schema.is_force_new(name) {
            requires_replace = true;
        }
        changes.push(match (before.is_null(), after.is_null()) {
            (true, _) => AttributeChange::added(name, after.clone()),
            (_, true) => AttributeChange::removed(name, before.clone()),
            _ => AttributeChange::modified(name, before.clone(), after.clone()),
        });
    }

    if changes.is_empty() {
        PlanResult::no_change(planned)
    } else {
        PlanResult::with_changes(planned, changes, requires_replace)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Attribute, Block, NestedBlock};
    use serde_json::json;

    fn schema() -> Schema {
        Schema::v0()
            .with_attribute("id", Attribute::computed_string())
            .with_attribute("policy_name", Attribute::required_string())
            .with_attribute("namespace", Attribute::required_string().with_force_new())
            .with_attribute("enable", Attribute::optional_int64().with_default(json!(1)))
            .with_attribute("create_time", Attribute::computed_string())
            .with_block(
                "policy_tag",
                NestedBlock::list(Block::new().with_attribute("key", Attribute::required_string()))
                    .with_force_new(),
            )
    }

    #[test]
    fn test_plan_create_applies_defaults() {
        let result = plan(&schema(), None, &json!({"policy_name": "a", "namespace": "cvm"}));
        assert_eq!(result.planned_state["enable"], 1);
        assert!(!result.requires_replace);
        let paths: Vec<&str> = result.changes.iter().map(|c| c.path.as_str()).collect();
        assert_eq!(paths, vec!["enable", "namespace", "policy_name"]);
    }

    #[test]
    fn test_plan_no_change_keeps_computed() {
        let prior = json!({
            "id": "policy-1",
            "policy_name": "a",
            "namespace": "cvm",
            "enable": 1,
            "create_time": "2024-01-01 00:00:00"
        });
        let result = plan(
            &schema(),
            Some(&prior),
            &json!({"policy_name": "a", "namespace": "cvm", "create_time": null}),
        );
        assert!(!result.has_changes());
        assert_eq!(result.planned_state["create_time"], "2024-01-01 00:00:00");
        assert_eq!(result.planned_state["id"], "policy-1");
    }

    #[test]
    fn test_plan_in_place_update() {
        let prior = json!({"id": "p", "policy_name": "a", "namespace": "cvm", "enable": 1});
        let result = plan(
            &schema(),
            Some(&prior),
            &json!({"policy_name": "b", "namespace": "cvm", "enable": 0}),
        );
        assert!(!result.requires_replace);
        assert_eq!(result.changes.len(), 2);
        assert_eq!(
            result.changes[1],
            AttributeChange::modified("policy_name", json!("a"), json!("b"))
        );
    }

    #[test]
    fn test_plan_force_new_requires_replace() {
        let prior = json!({"id": "p", "policy_name": "a", "namespace": "cvm", "enable": 1});
        let result = plan(
            &schema(),
            Some(&prior),
            &json!({"policy_name": "a", "namespace": "cdb", "enable": 1, "policy_tag": [{"key": "k"}]}),
        );
        assert!(result.requires_replace);
        assert_eq!(result.changes.len(), 2);
    }

    #[test]
    fn test_plan_destroy() {
        let prior = json!({"id": "p", "policy_name": "a", "remark": null});
        let result = plan(&schema(), Some(&prior), &Value::Null);
        assert!(result.planned_state.is_null());
        assert_eq!(result.changes.len(), 2);
        assert!(result.changes.iter().all(|c| c.after.is_none()));
    }
}
