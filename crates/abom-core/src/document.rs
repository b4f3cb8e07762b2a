//! ABOM documents and their normalized section views.
//!
//! The raw document is kept as an untyped [`serde_json::Value`] so it can be
//! echoed back unchanged in reports. Scoring never reads it directly: each
//! section goes through one normalization step that resolves defaults and
//! discards wrong-typed values, leaving the extractors total.

use serde_json::{Map, Value};

use crate::error::{AbomError, Result};

pub const MODEL_CORE: &str = "model_core";
pub const AGENCY_PROFILE: &str = "agency_profile";
pub const AUTONOMY_LEASH: &str = "autonomy_leash";
pub const PERSISTENCE_LAYER: &str = "persistence_layer";
pub const SCAFFOLDING_INVENTORY: &str = "scaffolding_inventory";

/// An immutable ABOM input document.
#[derive(Debug, Clone, PartialEq)]
pub struct AbomDocument {
    raw: Value,
}

impl AbomDocument {
    /// Parse a document from raw bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let raw = serde_json::from_slice(bytes).map_err(AbomError::MalformedDocument)?;
        Ok(Self { raw })
    }

    pub fn from_value(raw: Value) -> Self {
        Self { raw }
    }

    /// The document exactly as submitted.
    pub fn raw(&self) -> &Value {
        &self.raw
    }

    /// Check that the three mandatory sections are present and non-empty.
    pub fn validate(&self) -> Result<()> {
        if self.section(AGENCY_PROFILE).map_or(true, is_blank) {
            return Err(AbomError::MissingSection {
                field: AGENCY_PROFILE,
            });
        }
        let leash_missing = match self.section(AUTONOMY_LEASH) {
            None | Some(Value::Null) => true,
            Some(Value::String(s)) => s.is_empty(),
            Some(_) => false,
        };
        if leash_missing {
            return Err(AbomError::MissingSection {
                field: AUTONOMY_LEASH,
            });
        }
        if self.section(PERSISTENCE_LAYER).map_or(true, is_blank) {
            return Err(AbomError::MissingSection {
                field: PERSISTENCE_LAYER,
            });
        }
        Ok(())
    }

    fn section(&self, name: &str) -> Option<&Value> {
        self.raw.as_object().and_then(|m| m.get(name))
    }

    fn section_map(&self, name: &str) -> Option<&Map<String, Value>> {
        self.section(name).and_then(Value::as_object)
    }

    pub fn agency_profile(&self) -> AgencyProfile {
        self.section_map(AGENCY_PROFILE)
            .map(AgencyProfile::from_map)
            .unwrap_or_default()
    }

    pub fn autonomy_leash(&self) -> AutonomyLeash {
        self.section(AUTONOMY_LEASH)
            .map(AutonomyLeash::from_value)
            .unwrap_or_else(|| AutonomyLeash::Bare(String::new()))
    }

    pub fn persistence_layer(&self) -> PersistenceLayer {
        self.section_map(PERSISTENCE_LAYER)
            .map(PersistenceLayer::from_map)
            .unwrap_or_default()
    }

    pub fn scaffolding_inventory(&self) -> ScaffoldingInventory {
        self.section_map(SCAFFOLDING_INVENTORY)
            .map(ScaffoldingInventory::from_map)
            .unwrap_or_default()
    }

    pub fn model_core(&self) -> ModelCore {
        self.section_map(MODEL_CORE)
            .map(ModelCore::from_map)
            .unwrap_or_default()
    }
}

/// A single tool declared in the agency profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolEntry {
    /// Legacy form: the tool is just a name such as `"write_file"`.
    PlainName(String),
    /// Structured form: `{"name": "Email", "permission": "write"}`.
    Detailed { name: String, permission: String },
    /// Any other value in the list. Still a declared tool, with nothing to match on.
    Opaque,
}

impl ToolEntry {
    fn from_value(value: &Value) -> Self {
        match value {
            Value::String(name) => Self::PlainName(name.clone()),
            Value::Object(map) => Self::Detailed {
                name: str_field(map, "name"),
                permission: str_field(map, "permission"),
            },
            _ => Self::Opaque,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::PlainName(name) => name,
            Self::Detailed { name, .. } => name,
            Self::Opaque => "",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AgencyProfile {
    pub tools: Vec<ToolEntry>,
    pub scope: String,
    pub capability_flags: Vec<String>,
}

impl AgencyProfile {
    fn from_map(map: &Map<String, Value>) -> Self {
        let tools = map
            .get("tools")
            .and_then(Value::as_array)
            .map(|items| items.iter().map(ToolEntry::from_value).collect())
            .unwrap_or_default();
        let capability_flags = map
            .get("capability_flags")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();
        Self {
            tools,
            scope: str_field(map, "scope"),
            capability_flags,
        }
    }
}

/// Human-oversight mode, given either as a bare string or as `{"mode": ...}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AutonomyLeash {
    Bare(String),
    Structured { mode: String },
}

impl AutonomyLeash {
    fn from_value(value: &Value) -> Self {
        match value {
            Value::String(mode) => Self::Bare(mode.clone()),
            Value::Object(map) => Self::Structured {
                mode: str_field(map, "mode"),
            },
            _ => Self::Bare(String::new()),
        }
    }

    pub fn mode(&self) -> &str {
        match self {
            Self::Bare(mode) => mode,
            Self::Structured { mode } => mode,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersistenceLayer {
    pub memory_type: String,
    pub retention: String,
}

impl PersistenceLayer {
    fn from_map(map: &Map<String, Value>) -> Self {
        Self {
            memory_type: str_field(map, "memory_type"),
            retention: str_field(map, "retention"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScaffoldingInventory {
    pub mcp_used: bool,
    pub orchestrator: String,
    pub sandboxed: bool,
    pub sandbox_type: String,
    pub circuit_breaker: bool,
    pub kill_switch: bool,
}

impl ScaffoldingInventory {
    fn from_map(map: &Map<String, Value>) -> Self {
        let flag = |key: &str| map.get(key).is_some_and(is_truthy);
        Self {
            mcp_used: flag("mcp_used"),
            orchestrator: str_field(map, "orchestrator"),
            sandboxed: flag("sandboxed"),
            sandbox_type: str_field(map, "sandbox_type"),
            circuit_breaker: flag("circuit_breaker"),
            kill_switch: flag("kill_switch"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ModelCore {
    /// Training compute in FLOPs, when declared and parseable.
    pub training_flops: Option<f64>,
}

impl ModelCore {
    fn from_map(map: &Map<String, Value>) -> Self {
        let training_flops = ["training_flops", "flops"]
            .iter()
            .find_map(|key| map.get(*key).and_then(parse_flops));
        Self { training_flops }
    }
}

fn str_field(map: &Map<String, Value>, key: &str) -> String {
    map.get(key)
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_default()
}

fn parse_flops(value: &Value) -> Option<f64> {
    let flops = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    flops.is_finite().then_some(flops)
}

/// Empty-ish values that do not count as a supplied section.
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

/// Boolean-ish interpretation of a scaffolding signal.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => matches!(
            s.trim().to_ascii_lowercase().as_str(),
            "true" | "yes" | "1" | "on"
        ),
        _ => false,
    }
}
