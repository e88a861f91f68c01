//! Layered plant configuration.
//!
//! Entries are scoped either to all plants or to one plant kind; resolving
//! a kind starts from the schema defaults, applies the `All` layer, then the
//! kind layer. Every entry is validated against the schema even if its
//! scope does not apply, so a typo in any layer is caught up front.

use crate::error::{PlantError, PlantResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Steelmaking routes the assembler knows how to wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlantKind {
    /// Shaft-furnace direct reduction followed by an electric arc furnace.
    DriEaf,
    /// Single-vessel hydrogen plasma smelting reduction.
    Plasma,
    /// Shaft pre-reduction to wustite, finished in a plasma vessel.
    Hybrid,
}

impl PlantKind {
    pub const ALL: [PlantKind; 3] = [PlantKind::DriEaf, PlantKind::Plasma, PlantKind::Hybrid];

    pub fn key(&self) -> &'static str {
        match self {
            PlantKind::DriEaf => "dri-eaf",
            PlantKind::Plasma => "plasma",
            PlantKind::Hybrid => "hybrid",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConfigScope {
    All,
    Plant(PlantKind),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Number(f64),
    Text(String),
    Flag(bool),
}

impl ConfigValue {
    fn type_name(&self) -> &'static str {
        match self {
            ConfigValue::Number(_) => "number",
            ConfigValue::Text(_) => "text",
            ConfigValue::Flag(_) => "flag",
        }
    }
}

/// One configuration line: a scope, a key, and a value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigEntry {
    pub scope: ConfigScope,
    pub key: String,
    pub value: ConfigValue,
}

impl ConfigEntry {
    pub fn all(key: impl Into<String>, value: ConfigValue) -> Self {
        Self {
            scope: ConfigScope::All,
            key: key.into(),
            value,
        }
    }

    pub fn plant(kind: PlantKind, key: impl Into<String>, value: ConfigValue) -> Self {
        Self {
            scope: ConfigScope::Plant(kind),
            key: key.into(),
            value,
        }
    }
}

/// Schema: every known key with its default value.
fn schema() -> Vec<(&'static str, ConfigValue)> {
    use ConfigValue::{Flag, Number, Text};
    vec![
        ("ambient temp k", Number(298.15)),
        ("feed ore kg", Number(1600.0)),
        ("ore fe2o3 mass percent", Number(95.0)),
        ("ore sio2 mass percent", Number(3.0)),
        ("ore al2o3 mass percent", Number(2.0)),
        ("reduction conversion", Number(0.95)),
        ("pre reduction percent", Number(33.33)),
        ("reduction temp k", Number(973.15)),
        ("h2 excess ratio", Number(1.5)),
        ("h2 recycle fraction", Number(0.98)),
        ("metal tap temp k", Number(1923.15)),
        ("slag temp k", Number(1923.15)),
        ("offgas temp k", Number(1200.0)),
        ("feo to slag percent", Number(90.0)),
        ("basicity target", Number(2.0)),
        ("furnace electrical efficiency", Number(0.85)),
        ("annual steel production tonnes", Number(1.5e6)),
        ("plant lifetime years", Number(20.0)),
        ("h2 storage type", Text("salt caverns".to_string())),
        ("on premises h2 production", Flag(false)),
    ]
}

/// Configuration resolved for one plant kind.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    values: BTreeMap<&'static str, ConfigValue>,
}

impl Settings {
    /// Resolve entries for `kind`: defaults, then `All`, then the kind
    /// layer. Unknown keys and type mismatches anywhere are errors.
    pub fn resolve(entries: &[ConfigEntry], kind: PlantKind) -> PlantResult<Self> {
        let mut values: BTreeMap<&'static str, ConfigValue> = schema().into_iter().collect();

        let mut layered: Vec<&ConfigEntry> = Vec::new();
        for entry in entries {
            let default = values.get(entry.key.as_str()).ok_or_else(|| {
                PlantError::UnknownConfigKey {
                    key: entry.key.clone(),
                }
            })?;
            if std::mem::discriminant(&entry.value) != std::mem::discriminant(default) {
                return Err(PlantError::WrongType {
                    key: entry.key.clone(),
                    expected: default.type_name(),
                });
            }
            match entry.scope {
                ConfigScope::All => layered.push(entry),
                ConfigScope::Plant(k) if k == kind => {}
                ConfigScope::Plant(_) => continue,
            }
        }
        // Kind layer wins over All, so apply it second.
        let kind_layer = entries
            .iter()
            .filter(|e| e.scope == ConfigScope::Plant(kind));
        for entry in layered.into_iter().chain(kind_layer) {
            let key = schema_key(entry.key.as_str())?;
            values.insert(key, entry.value.clone());
        }

        Ok(Self { values })
    }

    pub fn defaults() -> Self {
        Self {
            values: schema().into_iter().collect(),
        }
    }

    pub fn number(&self, key: &'static str) -> PlantResult<f64> {
        match self.values.get(key) {
            Some(ConfigValue::Number(v)) => Ok(*v),
            Some(_) => Err(PlantError::WrongType {
                key: key.to_string(),
                expected: "number",
            }),
            None => Err(PlantError::UnknownConfigKey {
                key: key.to_string(),
            }),
        }
    }

    pub fn text(&self, key: &'static str) -> PlantResult<&str> {
        match self.values.get(key) {
            Some(ConfigValue::Text(v)) => Ok(v),
            Some(_) => Err(PlantError::WrongType {
                key: key.to_string(),
                expected: "text",
            }),
            None => Err(PlantError::UnknownConfigKey {
                key: key.to_string(),
            }),
        }
    }

    pub fn flag(&self, key: &'static str) -> PlantResult<bool> {
        match self.values.get(key) {
            Some(ConfigValue::Flag(v)) => Ok(*v),
            Some(_) => Err(PlantError::WrongType {
                key: key.to_string(),
                expected: "flag",
            }),
            None => Err(PlantError::UnknownConfigKey {
                key: key.to_string(),
            }),
        }
    }
}

/// Map a key back to its `'static` schema spelling.
fn schema_key(key: &str) -> PlantResult<&'static str> {
    schema()
        .into_iter()
        .map(|(k, _)| k)
        .find(|k| *k == key)
        .ok_or_else(|| PlantError::UnknownConfigKey {
            key: key.to_string(),
        })
}
