//! Flat key/value persistence.
//!
//! Every module saves its parameters into a JSON object and reloads them from
//! one. Loading never fails: a missing key keeps the compiled-in default, and
//! a key with the wrong type or an out-of-range value is logged and replaced
//! by the default or clamped into range.

use serde_json::{Map, Value};
use thiserror::Error;

pub type StateMap = Map<String, Value>;

#[derive(Debug, Error)]
pub enum StateError {
    #[error("invalid rack JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("rack state must be a JSON array of modules")]
    NotAnArray,
    #[error("module entry {index} has no \"module\" kind")]
    MissingKind { index: usize },
    #[error("unknown module kind: {0}")]
    UnknownKind(String),
}

pub trait Persist {
    fn save(&self, map: &mut StateMap);
    fn load(&mut self, map: &StateMap);
}

pub fn write_f32(map: &mut StateMap, key: &str, value: f32) {
    map.insert(key.to_owned(), Value::from(value));
}

pub fn write_bool(map: &mut StateMap, key: &str, value: bool) {
    map.insert(key.to_owned(), Value::Bool(value));
}

pub fn write_index(map: &mut StateMap, key: &str, value: usize) {
    map.insert(key.to_owned(), Value::from(value as u64));
}

/// Number in `[min, max]`, or `default` when missing or mistyped.
pub fn read_f32(map: &StateMap, key: &str, default: f32, min: f32, max: f32) -> f32 {
    match map.get(key) {
        None => default,
        Some(value) => match value.as_f64() {
            Some(v) if v.is_finite() => {
                let v = v as f32;
                if v < min || v > max {
                    log::warn!("state key {key}: {v} out of range [{min}, {max}], clamping");
                }
                v.clamp(min, max)
            }
            _ => {
                log::warn!("state key {key}: expected a number, got {value}");
                default
            }
        },
    }
}

pub fn read_bool(map: &StateMap, key: &str, default: bool) -> bool {
    match map.get(key) {
        None => default,
        Some(Value::Bool(b)) => *b,
        Some(value) => {
            log::warn!("state key {key}: expected a bool, got {value}");
            default
        }
    }
}

/// Selector index below `len`, or `default` when missing or invalid.
pub fn read_index(map: &StateMap, key: &str, default: usize, len: usize) -> usize {
    match map.get(key) {
        None => default,
        Some(value) => match value.as_u64() {
            Some(v) if (v as usize) < len => v as usize,
            _ => {
                log::warn!("state key {key}: invalid selector {value}, using default");
                default
            }
        },
    }
}
