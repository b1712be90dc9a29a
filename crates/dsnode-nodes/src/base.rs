//! Node trait — the contract a workflow host uses to discover, describe,
//! and invoke a node.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{json, Map, Value};
use std::collections::HashMap;

// ─────────────────────────────────────────────
// Input schema
// ─────────────────────────────────────────────

/// Type and widget options of a single node input.
#[derive(Clone, Debug, PartialEq)]
pub enum InputKind {
    String {
        multiline: bool,
        default: Option<String>,
    },
    Float {
        default: f64,
        min: f64,
        max: f64,
        step: f64,
    },
    Int {
        default: i64,
        min: i64,
        max: i64,
        step: i64,
    },
    Boolean {
        default: bool,
    },
}

impl InputKind {
    /// Host type tag (`"STRING"`, `"FLOAT"`, ...).
    pub fn type_name(&self) -> &'static str {
        match self {
            InputKind::String { .. } => "STRING",
            InputKind::Float { .. } => "FLOAT",
            InputKind::Int { .. } => "INT",
            InputKind::Boolean { .. } => "BOOLEAN",
        }
    }

    /// `[type, options]` pair in the host's schema format.
    pub fn to_value(&self) -> Value {
        let options = match self {
            InputKind::String { multiline, default } => {
                let mut opts = json!({ "multiline": multiline });
                if let Some(d) = default {
                    opts["default"] = json!(d);
                }
                opts
            }
            InputKind::Float { default, min, max, step } => {
                json!({ "default": default, "min": min, "max": max, "step": step })
            }
            InputKind::Int { default, min, max, step } => {
                json!({ "default": default, "min": min, "max": max, "step": step })
            }
            InputKind::Boolean { default } => json!({ "default": default }),
        };
        json!([self.type_name(), options])
    }
}

/// Declared inputs of a node, split into required and optional.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InputTypes {
    pub required: Vec<(String, InputKind)>,
    pub optional: Vec<(String, InputKind)>,
}

impl InputTypes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn required(mut self, name: impl Into<String>, kind: InputKind) -> Self {
        self.required.push((name.into(), kind));
        self
    }

    pub fn optional(mut self, name: impl Into<String>, kind: InputKind) -> Self {
        self.optional.push((name.into(), kind));
        self
    }

    /// `{"required": {...}, "optional": {...}}`.
    pub fn to_value(&self) -> Value {
        fn section(entries: &[(String, InputKind)]) -> Value {
            let map: Map<String, Value> = entries
                .iter()
                .map(|(name, kind)| (name.clone(), kind.to_value()))
                .collect();
            Value::Object(map)
        }

        json!({
            "required": section(&self.required),
            "optional": section(&self.optional),
        })
    }
}

/// Everything the host needs to list and instantiate a node.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct NodeDefinition {
    pub id: String,
    pub display_name: String,
    pub category: String,
    pub description: String,
    pub input: Value,
    /// Output types; every output of a node here is a string.
    pub output: Vec<String>,
    pub output_name: Vec<String>,
}

// ─────────────────────────────────────────────
// Node trait
// ─────────────────────────────────────────────

/// Every workflow node implements this trait.
///
/// The host discovers nodes via `id()`, renders their widgets from
/// `input_types()`, and invokes them via `execute()`.
#[async_trait]
pub trait Node: Send + Sync {
    /// Stable identifier the host registers the node under.
    fn id(&self) -> &str;

    /// Name shown in the host's node picker.
    fn display_name(&self) -> &str;

    /// Menu category.
    fn category(&self) -> &str;

    /// Info text shown on the node.
    fn description(&self) -> &str;

    /// Declared inputs.
    fn input_types(&self) -> InputTypes;

    /// Names of the string outputs, in order.
    fn output_names(&self) -> &[&str];

    /// Run the node with the given inputs.
    ///
    /// An `Err` means the inputs themselves were unusable; the registry
    /// converts it to an error string for the host.
    async fn execute(&self, inputs: HashMap<String, Value>) -> anyhow::Result<String>;

    /// Build the `NodeDefinition` handed to the host.
    fn to_definition(&self) -> NodeDefinition {
        let outputs = self.output_names();
        NodeDefinition {
            id: self.id().to_string(),
            display_name: self.display_name().to_string(),
            category: self.category().to_string(),
            description: self.description().to_string(),
            input: self.input_types().to_value(),
            output: vec!["STRING".to_string(); outputs.len()],
            output_name: outputs.iter().map(|s| s.to_string()).collect(),
        }
    }
}

// ─────────────────────────────────────────────
// Param helpers
// ─────────────────────────────────────────────

/// Extract a required `String` input, returning a user-friendly error.
pub fn require_string(inputs: &HashMap<String, Value>, key: &str) -> anyhow::Result<String> {
    inputs
        .get(key)
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
        .ok_or_else(|| anyhow::anyhow!("Missing required input: {key}"))
}

/// Look up an optional input; `null` counts as absent.
fn present<'a>(inputs: &'a HashMap<String, Value>, key: &str) -> Option<&'a Value> {
    inputs.get(key).filter(|v| !v.is_null())
}

fn wrong_type(key: &str, expected: &str, got: &Value) -> anyhow::Error {
    anyhow::anyhow!("Input '{key}' must be {expected}, got {got}")
}

/// Extract an optional `String` input. A non-string value is an error.
pub fn optional_string(
    inputs: &HashMap<String, Value>,
    key: &str,
) -> anyhow::Result<Option<String>> {
    match present(inputs, key) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(wrong_type(key, "a string", other)),
    }
}

/// Extract an optional float input (integers are accepted too).
pub fn optional_f64(inputs: &HashMap<String, Value>, key: &str) -> anyhow::Result<Option<f64>> {
    match present(inputs, key) {
        None => Ok(None),
        Some(v) => v
            .as_f64()
            .map(Some)
            .ok_or_else(|| wrong_type(key, "a number", v)),
    }
}

/// Extract an optional integer input. Whole-number floats such as `512.0`
/// are accepted; fractional values are an error.
pub fn optional_i64(inputs: &HashMap<String, Value>, key: &str) -> anyhow::Result<Option<i64>> {
    let Some(v) = present(inputs, key) else {
        return Ok(None);
    };
    if let Some(n) = v.as_i64() {
        return Ok(Some(n));
    }
    match v.as_f64() {
        Some(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 => {
            Ok(Some(f as i64))
        }
        _ => Err(wrong_type(key, "an integer", v)),
    }
}

/// Extract an optional boolean input (defaults to `false` if absent).
/// A non-boolean value is an error.
pub fn optional_bool(inputs: &HashMap<String, Value>, key: &str) -> anyhow::Result<bool> {
    match present(inputs, key) {
        None => Ok(false),
        Some(Value::Bool(b)) => Ok(*b),
        Some(other) => Err(wrong_type(key, "a boolean", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_string_present() {
        let mut inputs = HashMap::new();
        inputs.insert("text".into(), json!("hello"));
        assert_eq!(require_string(&inputs, "text").unwrap(), "hello");
    }

    #[test]
    fn test_require_string_missing() {
        let inputs = HashMap::new();
        let err = require_string(&inputs, "text").unwrap_err();
        assert!(err.to_string().contains("text"));
    }

    #[test]
    fn test_require_string_wrong_type() {
        let mut inputs = HashMap::new();
        inputs.insert("text".into(), json!(42));
        assert!(require_string(&inputs, "text").is_err());
    }

    #[test]
    fn test_optional_numbers() {
        let mut inputs = HashMap::new();
        inputs.insert("temperature".into(), json!(1.5));
        inputs.insert("max_tokens".into(), json!(256));
        assert_eq!(optional_f64(&inputs, "temperature").unwrap(), Some(1.5));
        assert_eq!(optional_f64(&inputs, "max_tokens").unwrap(), Some(256.0));
        assert_eq!(optional_i64(&inputs, "max_tokens").unwrap(), Some(256));
        assert_eq!(optional_i64(&inputs, "missing").unwrap(), None);
    }

    #[test]
    fn test_optional_i64_accepts_whole_floats() {
        let mut inputs = HashMap::new();
        inputs.insert("max_tokens".into(), json!(512.0));
        assert_eq!(optional_i64(&inputs, "max_tokens").unwrap(), Some(512));
    }

    #[test]
    fn test_optional_i64_rejects_fractions_and_strings() {
        let mut inputs = HashMap::new();
        inputs.insert("a".into(), json!(1.5));
        inputs.insert("b".into(), json!("512"));
        assert!(optional_i64(&inputs, "a").is_err());
        assert!(optional_i64(&inputs, "b").is_err());
    }

    #[test]
    fn test_optional_string_and_bool() {
        let mut inputs = HashMap::new();
        inputs.insert("system_prompt".into(), json!("Be brief."));
        inputs.insert("test_mode".into(), json!(true));
        assert_eq!(
            optional_string(&inputs, "system_prompt").unwrap(),
            Some("Be brief.".into())
        );
        assert_eq!(optional_string(&inputs, "other").unwrap(), None);
        assert!(optional_bool(&inputs, "test_mode").unwrap());
        assert!(!optional_bool(&inputs, "missing").unwrap());
    }

    #[test]
    fn test_optional_bool_rejects_other_types() {
        let mut inputs = HashMap::new();
        inputs.insert("s".into(), json!("true"));
        inputs.insert("n".into(), json!(1));
        let err = optional_bool(&inputs, "s").unwrap_err();
        assert!(err.to_string().contains("must be a boolean"));
        assert!(optional_bool(&inputs, "n").is_err());
    }

    #[test]
    fn test_null_counts_as_absent() {
        let mut inputs = HashMap::new();
        inputs.insert("test_mode".into(), Value::Null);
        inputs.insert("temperature".into(), Value::Null);
        assert!(!optional_bool(&inputs, "test_mode").unwrap());
        assert_eq!(optional_f64(&inputs, "temperature").unwrap(), None);
    }

    #[test]
    fn test_wrong_typed_string_and_float() {
        let mut inputs = HashMap::new();
        inputs.insert("system_prompt".into(), json!(7));
        inputs.insert("temperature".into(), json!("hot"));
        assert!(optional_string(&inputs, "system_prompt").is_err());
        assert!(optional_f64(&inputs, "temperature").is_err());
    }

    #[test]
    fn test_input_kind_values() {
        let kind = InputKind::Int {
            default: 1024,
            min: 1,
            max: 8192,
            step: 1,
        };
        assert_eq!(
            kind.to_value(),
            json!(["INT", {"default": 1024, "min": 1, "max": 8192, "step": 1}])
        );

        let kind = InputKind::String {
            multiline: true,
            default: None,
        };
        assert_eq!(kind.to_value(), json!(["STRING", {"multiline": true}]));
    }

    /// Verify the default `to_definition()` produces the right shape.
    #[tokio::test]
    async fn test_to_definition_default() {
        struct DummyNode;

        #[async_trait]
        impl Node for DummyNode {
            fn id(&self) -> &str {
                "Dummy"
            }
            fn display_name(&self) -> &str {
                "Dummy Node"
            }
            fn category(&self) -> &str {
                "Testing"
            }
            fn description(&self) -> &str {
                "A test node"
            }
            fn input_types(&self) -> InputTypes {
                InputTypes::new()
                    .required(
                        "msg",
                        InputKind::String {
                            multiline: false,
                            default: None,
                        },
                    )
                    .optional("loud", InputKind::Boolean { default: false })
            }
            fn output_names(&self) -> &[&str] {
                &["echo"]
            }
            async fn execute(&self, _inputs: HashMap<String, Value>) -> anyhow::Result<String> {
                Ok("ok".into())
            }
        }

        let def = DummyNode.to_definition();
        assert_eq!(def.id, "Dummy");
        assert_eq!(def.display_name, "Dummy Node");
        assert_eq!(def.output, vec!["STRING"]);
        assert_eq!(def.output_name, vec!["echo"]);
        assert_eq!(def.input["required"]["msg"][0], "STRING");
        assert_eq!(def.input["optional"]["loud"], json!(["BOOLEAN", {"default": false}]));
        assert_eq!(DummyNode.execute(HashMap::new()).await.unwrap(), "ok");
    }
}
