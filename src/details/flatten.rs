use super::extract::{parse_blob, MalformedBlob};
use super::{ADDITIONAL_DATA_KEY, AI_INPUTS_KEY, SNAPSHOT_INR_KEY, SNAPSHOT_USD_KEY};
use crate::model::{MaterialSpec, METAL_TYPE_KEY, METAL_WEIGHT_KEY};
use serde_json::{json, Map, Value};
use tracing::warn;

/// Writes `spec` into an existing details blob and returns the serialized
/// blob, ready to be sent as the product's `details` field.
///
/// Material fields are written at the root and into `additionalData`, and
/// into a nested `aiInputs` when one exists (object or JSON-encoded string,
/// written back as an object) so a zero weight cannot resolve to a stale
/// value there. Other keys are preserved. Price snapshots are removed at
/// every level.
pub fn merge_material_spec(existing: Option<&Value>, spec: &MaterialSpec) -> String {
    let mut root = match parse_blob(existing) {
        Ok(map) => map.unwrap_or_default(),
        Err(MalformedBlob(reason)) => {
            warn!(%reason, "Replacing malformed product details");
            Map::new()
        }
    };

    let mut additional = match parse_blob(root.get(ADDITIONAL_DATA_KEY)) {
        Ok(map) => map.unwrap_or_default(),
        Err(_) => Map::new(),
    };
    write_spec(&mut root, spec);
    write_spec(&mut additional, spec);
    drop_snapshot(&mut root);
    drop_snapshot(&mut additional);
    root.insert(ADDITIONAL_DATA_KEY.to_string(), Value::Object(additional));

    if let Some(ai) = root.get(AI_INPUTS_KEY).and_then(|v| merge_ai_inputs(v, spec)) {
        root.insert(AI_INPUTS_KEY.to_string(), ai);
    }

    Value::Object(root).to_string()
}

/// Writes `spec` into an `aiInputs` value, returning it as an object.
///
/// `None` when there is nothing readable to rewrite: null, blank, or
/// malformed values are skipped by the extractor anyway.
pub fn merge_ai_inputs(existing: &Value, spec: &MaterialSpec) -> Option<Value> {
    let mut ai = parse_blob(Some(existing)).ok().flatten()?;
    write_spec(&mut ai, spec);
    drop_snapshot(&mut ai);
    Some(Value::Object(ai))
}

fn write_spec(target: &mut Map<String, Value>, spec: &MaterialSpec) {
    target.insert(METAL_TYPE_KEY.into(), json!(spec.metal_type));
    target.insert(METAL_WEIGHT_KEY.into(), json!(spec.metal_weight));
    for (role, slot) in spec.slots() {
        target.insert(role.stone_key().into(), json!(slot.label()));
        target.insert(role.weight_key().into(), json!(slot.carats));
    }
}

fn drop_snapshot(target: &mut Map<String, Value>) {
    target.remove(SNAPSHOT_USD_KEY);
    target.remove(SNAPSHOT_INR_KEY);
}
