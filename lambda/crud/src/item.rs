use aws_sdk_dynamodb::types::AttributeValue;
use base64::{engine::general_purpose, Engine as _};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use std::collections::HashMap;
use std::str::FromStr;

use crate::error::CrudError;

pub(crate) const ID_ATTRIBUTE: &str = "id";

// Magnitudes the table accepts for non-zero numbers.
const MIN_NUMBER: f64 = 1e-130;
const MAX_NUMBER: f64 = 1e126;

/// A row of the table. Everything besides `id` is stored as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct Item {
    pub(crate) id: String,
    #[serde(flatten)]
    pub(crate) attributes: Map<String, Value>,
}

impl Item {
    /// Rejects numbers the table would refuse, so they surface as a client error.
    pub(crate) fn check_numbers(&self) -> Result<(), CrudError> {
        self.attributes.values().try_for_each(check_number_range)
    }

    pub(crate) fn to_attributes(&self) -> HashMap<String, AttributeValue> {
        let mut row: HashMap<String, AttributeValue> = self
            .attributes
            .iter()
            .map(|(name, value)| (name.clone(), to_attribute(value)))
            .collect();
        row.insert(ID_ATTRIBUTE.to_string(), AttributeValue::S(self.id.clone()));
        row
    }

    pub(crate) fn from_attributes(row: &HashMap<String, AttributeValue>) -> Result<Self, CrudError> {
        let id = row
            .get(ID_ATTRIBUTE)
            .and_then(|v| v.as_s().ok())
            .cloned()
            .ok_or_else(|| CrudError::Codec("Stored item has no string id".to_string()))?;

        let mut attributes = Map::new();
        for (name, value) in row {
            if name == ID_ATTRIBUTE {
                continue;
            }
            attributes.insert(name.clone(), from_attribute(value)?);
        }

        Ok(Item { id, attributes })
    }
}

fn check_number_range(value: &Value) -> Result<(), CrudError> {
    match value {
        Value::Number(n) if n.is_f64() => {
            let magnitude = n.as_f64().map(f64::abs).unwrap_or_default();
            if magnitude == 0.0 || (MIN_NUMBER..MAX_NUMBER).contains(&magnitude) {
                Ok(())
            } else {
                Err(CrudError::NumberOutOfRange(n.to_string()))
            }
        }
        Value::Array(values) => values.iter().try_for_each(check_number_range),
        Value::Object(fields) => fields.values().try_for_each(check_number_range),
        _ => Ok(()),
    }
}

pub(crate) fn key(id: &str) -> HashMap<String, AttributeValue> {
    let mut key = HashMap::new();
    key.insert(ID_ATTRIBUTE.to_string(), AttributeValue::S(id.to_string()));
    key
}

fn to_attribute(value: &Value) -> AttributeValue {
    match value {
        Value::Null => AttributeValue::Null(true),
        Value::Bool(b) => AttributeValue::Bool(*b),
        Value::Number(n) => AttributeValue::N(n.to_string()),
        Value::String(s) => AttributeValue::S(s.clone()),
        Value::Array(values) => AttributeValue::L(values.iter().map(to_attribute).collect()),
        Value::Object(fields) => AttributeValue::M(
            fields
                .iter()
                .map(|(name, v)| (name.clone(), to_attribute(v)))
                .collect(),
        ),
    }
}

fn from_attribute(value: &AttributeValue) -> Result<Value, CrudError> {
    let value = match value {
        AttributeValue::S(s) => Value::String(s.clone()),
        AttributeValue::N(n) => Value::Number(parse_number(n)?),
        AttributeValue::Bool(b) => Value::Bool(*b),
        AttributeValue::Null(_) => Value::Null,
        AttributeValue::L(values) => Value::Array(
            values
                .iter()
                .map(from_attribute)
                .collect::<Result<Vec<_>, _>>()?,
        ),
        AttributeValue::M(fields) => {
            let mut object = Map::new();
            for (name, v) in fields {
                object.insert(name.clone(), from_attribute(v)?);
            }
            Value::Object(object)
        }
        AttributeValue::Ss(values) => {
            Value::Array(values.iter().cloned().map(Value::String).collect())
        }
        AttributeValue::Ns(values) => Value::Array(
            values
                .iter()
                .map(|n| parse_number(n).map(Value::Number))
                .collect::<Result<Vec<_>, _>>()?,
        ),
        AttributeValue::B(blob) => {
            Value::String(general_purpose::STANDARD.encode(blob.as_ref()))
        }
        AttributeValue::Bs(blobs) => Value::Array(
            blobs
                .iter()
                .map(|blob| Value::String(general_purpose::STANDARD.encode(blob.as_ref())))
                .collect(),
        ),
        other => {
            return Err(CrudError::Codec(format!(
                "Unsupported attribute type: {:?}",
                other
            )))
        }
    };
    Ok(value)
}

fn parse_number(n: &str) -> Result<Number, CrudError> {
    Number::from_str(n).map_err(|e| CrudError::Codec(format!("Invalid number {}: {}", n, e)))
}
