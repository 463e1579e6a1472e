use super::{
    Source, ADDITIONAL_DATA_KEY, AI_INPUTS_KEY, DESCRIPTION_KEYS, SNAPSHOT_INR_KEY,
    SNAPSHOT_USD_KEY, SOURCE_PRIORITY,
};
use crate::model::{
    parse_stone, MaterialSpec, Product, StoneRole, StoneSlot, METAL_TYPE_KEY, METAL_WEIGHT_KEY,
    UNKNOWN_METAL,
};
use serde_json::{Map, Value};
use tracing::warn;

/// Everything the storefront reads out of a details blob.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProductDetails {
    pub materials: MaterialSpec,
    pub ai_description: Option<String>,
    pub snapshot: PriceSnapshot,
}

/// Totals the server cached alongside the blob.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PriceSnapshot {
    pub usd: Option<f64>,
    pub inr: Option<f64>,
}

impl PriceSnapshot {
    pub fn is_empty(&self) -> bool {
        self.usd.is_none() && self.inr.is_none()
    }
}

/// The blob is not JSON, or not a JSON object.
#[derive(Debug)]
pub(crate) struct MalformedBlob(pub(crate) String);

/// Decodes a blob that may be absent, an object, or a JSON-encoded string.
///
/// `Ok(None)` means there is nothing to read (null, blank string).
pub(crate) fn parse_blob(value: Option<&Value>) -> Result<Option<Map<String, Value>>, MalformedBlob> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Object(map)) => Ok(Some(map.clone())),
        Some(Value::String(raw)) if raw.trim().is_empty() => Ok(None),
        Some(Value::String(raw)) => match serde_json::from_str::<Value>(raw) {
            Ok(Value::Object(map)) => Ok(Some(map)),
            Ok(Value::Null) => Ok(None),
            Ok(other) => Err(MalformedBlob(format!("expected an object, found {other}"))),
            Err(e) => Err(MalformedBlob(e.to_string())),
        },
        Some(other) => Err(MalformedBlob(format!("expected an object, found {other}"))),
    }
}

/// The three lookup locations of one product.
struct Sources {
    root: Map<String, Value>,
    ai_inputs: Option<Map<String, Value>>,
    additional: Option<Map<String, Value>>,
}

impl Sources {
    fn layer(&self, source: Source) -> Option<&Map<String, Value>> {
        match source {
            Source::Root => Some(&self.root),
            Source::AiInputs => self.ai_inputs.as_ref(),
            Source::AdditionalData => self.additional.as_ref(),
        }
    }

    fn values<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a Value> + 'a {
        SOURCE_PRIORITY
            .into_iter()
            .filter_map(move |source| self.layer(source)?.get(key))
    }

    /// First non-empty string along the priority chain.
    fn string(&self, key: &str) -> Option<String> {
        self.values(key).find_map(|value| match value {
            Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            _ => None,
        })
    }

    /// First positive number along the priority chain.
    fn number(&self, key: &str) -> Option<f64> {
        self.values(key).find_map(coerce_number)
    }
}

/// Reads a weight or price from a number or a numeric string.
///
/// Zero, negative, NaN and non-numeric values count as absent.
pub fn coerce_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => leading_number(s)?,
        _ => return None,
    };
    (n.is_finite() && n > 0.0).then_some(n)
}

/// Parses the numeric prefix of a string such as `"4.5g"` or `" 12 "`.
fn leading_number(raw: &str) -> Option<f64> {
    let s = raw.trim();
    let end = s
        .char_indices()
        .take_while(|(i, c)| c.is_ascii_digit() || *c == '.' || (*i == 0 && (*c == '-' || *c == '+')))
        .map(|(i, c)| i + c.len_utf8())
        .last()?;
    s[..end].parse().ok()
}

/// Resolves the material specification of a product.
pub fn extract_material_spec(details: Option<&Value>, ai_inputs: Option<&Value>) -> MaterialSpec {
    extract_details(details, ai_inputs).materials
}

/// Resolves every field the storefront reads from the details blob.
///
/// `ai_inputs` is the product's own `aiInputs` value; when absent,
/// `details.aiInputs` is used instead.
pub fn extract_details(details: Option<&Value>, ai_inputs: Option<&Value>) -> ProductDetails {
    let root = match parse_blob(details) {
        Ok(map) => map.unwrap_or_default(),
        Err(MalformedBlob(reason)) => {
            warn!(%reason, "Malformed product details, using defaults");
            return ProductDetails::default();
        }
    };

    let ai_inputs = match ai_inputs.filter(|v| !v.is_null()) {
        Some(explicit) => nested(Some(explicit), AI_INPUTS_KEY),
        None => nested(root.get(AI_INPUTS_KEY), AI_INPUTS_KEY),
    };
    let additional = nested(root.get(ADDITIONAL_DATA_KEY), ADDITIONAL_DATA_KEY);

    let sources = Sources {
        root,
        ai_inputs,
        additional,
    };
    resolve(&sources)
}

/// Nested objects are read leniently: a malformed one is skipped, not fatal.
fn nested(value: Option<&Value>, name: &str) -> Option<Map<String, Value>> {
    match parse_blob(value) {
        Ok(map) => map,
        Err(MalformedBlob(reason)) => {
            warn!(source = name, %reason, "Ignoring malformed nested details");
            None
        }
    }
}

fn resolve(sources: &Sources) -> ProductDetails {
    let slot = |role: StoneRole| StoneSlot {
        stone: sources
            .string(role.stone_key())
            .and_then(|name| parse_stone(&name)),
        carats: sources.number(role.weight_key()).unwrap_or(0.0),
    };

    let materials = MaterialSpec {
        metal_type: sources
            .string(METAL_TYPE_KEY)
            .unwrap_or_else(|| UNKNOWN_METAL.to_string()),
        metal_weight: sources.number(METAL_WEIGHT_KEY).unwrap_or(0.0),
        primary: slot(StoneRole::Primary),
        secondary: slot(StoneRole::Secondary),
        other: slot(StoneRole::Other),
    };

    ProductDetails {
        materials,
        ai_description: DESCRIPTION_KEYS.iter().find_map(|key| sources.string(key)),
        snapshot: PriceSnapshot {
            usd: sources.number(SNAPSHOT_USD_KEY),
            inr: sources.number(SNAPSHOT_INR_KEY),
        },
    }
}

impl Product {
    /// Everything readable from this product's details blob.
    pub fn parsed_details(&self) -> ProductDetails {
        extract_details(self.details.as_ref(), self.ai_inputs.as_ref())
    }

    pub fn material_spec(&self) -> MaterialSpec {
        self.parsed_details().materials
    }
}
