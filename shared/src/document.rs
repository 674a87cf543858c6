//! Translation between DynamoDB attribute values and plain JSON values,
//! configured the way the movie tables were provisioned: empty strings become
//! explicit NULLs, absent optional fields are stripped, structured values
//! flatten to maps, and numbers read back as native numbers.

use aws_sdk_dynamodb::types::AttributeValue;
use serde::Serialize;
use serde_json::{Map, Number, Value};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, Default)]
pub struct MarshallOptions {
    pub convert_empty_values: bool,
    pub remove_undefined_values: bool,
    pub convert_class_instance_to_map: bool,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct UnmarshallOptions {
    pub wrap_numbers: bool,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TranslateConfig {
    pub marshall: MarshallOptions,
    pub unmarshall: UnmarshallOptions,
}

pub fn marshall_item<T: Serialize>(
    input: &T,
    options: &MarshallOptions,
) -> Result<HashMap<String, AttributeValue>, String> {
    let value =
        serde_json::to_value(input).map_err(|e| format!("Error serializing item: {:?}", e))?;
    let Value::Object(fields) = value else {
        return Err("Item does not serialize to a map".to_string());
    };

    let mut item = HashMap::new();
    for (name, field) in fields {
        if field.is_null() && options.remove_undefined_values {
            continue;
        }
        item.insert(name, marshall_value(field, options)?);
    }
    Ok(item)
}

pub fn marshall_value(value: Value, options: &MarshallOptions) -> Result<AttributeValue, String> {
    match value {
        Value::Null => Ok(AttributeValue::Null(true)),
        Value::Bool(flag) => Ok(AttributeValue::Bool(flag)),
        Value::Number(number) => Ok(AttributeValue::N(number.to_string())),
        Value::String(text) if text.is_empty() && options.convert_empty_values => {
            Ok(AttributeValue::Null(true))
        }
        Value::String(text) => Ok(AttributeValue::S(text)),
        Value::Array(values) => {
            let mut list = Vec::with_capacity(values.len());
            for entry in values {
                list.push(marshall_value(entry, options)?);
            }
            Ok(AttributeValue::L(list))
        }
        Value::Object(fields) => {
            if !options.convert_class_instance_to_map {
                return Err("Structured value cannot be marshalled".to_string());
            }
            let mut map = HashMap::new();
            for (name, field) in fields {
                if field.is_null() && options.remove_undefined_values {
                    continue;
                }
                map.insert(name, marshall_value(field, options)?);
            }
            Ok(AttributeValue::M(map))
        }
    }
}

pub fn unmarshall_item(
    item: &HashMap<String, AttributeValue>,
    options: &UnmarshallOptions,
) -> Result<Map<String, Value>, String> {
    let mut fields = Map::new();
    for (name, attribute) in item {
        fields.insert(name.clone(), unmarshall_value(attribute, options)?);
    }
    Ok(fields)
}

pub fn unmarshall_value(
    attribute: &AttributeValue,
    options: &UnmarshallOptions,
) -> Result<Value, String> {
    match attribute {
        AttributeValue::Null(_) => Ok(Value::Null),
        AttributeValue::Bool(flag) => Ok(Value::Bool(*flag)),
        AttributeValue::S(text) => Ok(Value::String(text.clone())),
        AttributeValue::N(number) => unmarshall_number(number, options),
        AttributeValue::L(list) => list
            .iter()
            .map(|entry| unmarshall_value(entry, options))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        AttributeValue::M(map) => {
            let mut fields = Map::new();
            for (name, entry) in map {
                fields.insert(name.clone(), unmarshall_value(entry, options)?);
            }
            Ok(Value::Object(fields))
        }
        AttributeValue::Ss(values) => Ok(Value::Array(
            values.iter().cloned().map(Value::String).collect(),
        )),
        AttributeValue::Ns(values) => values
            .iter()
            .map(|number| unmarshall_number(number, options))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        other => Err(format!("Unsupported attribute value: {:?}", other)),
    }
}

fn unmarshall_number(raw: &str, options: &UnmarshallOptions) -> Result<Value, String> {
    if options.wrap_numbers {
        return Ok(Value::String(raw.to_string()));
    }
    if let Ok(number) = raw.parse::<i64>() {
        return Ok(Value::Number(number.into()));
    }
    if let Ok(number) = raw.parse::<u64>() {
        return Ok(Value::Number(number.into()));
    }
    raw.parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map(Value::Number)
        .ok_or_else(|| format!("Cannot read number: {}", raw))
}
