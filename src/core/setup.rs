//! Builder registration: the builder name and the configuration options it
//! understands, with their defaults and accepted value kinds.

use serde_json::Value;

use crate::config::Config;
use crate::core::builder::MessageCatalogBuilder;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Bool,
    String,
    List,
}

impl ValueKind {
    fn matches(self, value: &Value) -> bool {
        match self {
            ValueKind::Bool => value.is_boolean(),
            ValueKind::String => value.is_string(),
            ValueKind::List => value.is_array(),
        }
    }

    fn name(self) -> &'static str {
        match self {
            ValueKind::Bool => "boolean",
            ValueKind::String => "string",
            ValueKind::List => "list",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigOption {
    /// Key in the config file.
    pub name: &'static str,
    pub default: Value,
    pub kinds: &'static [ValueKind],
}

impl ConfigOption {
    pub fn accepts(&self, value: &Value) -> bool {
        self.kinds.iter().any(|kind| kind.matches(value))
    }

    /// Human readable list of accepted kinds, e.g. "boolean or string".
    pub fn expected(&self) -> String {
        self.kinds
            .iter()
            .map(|kind| kind.name())
            .collect::<Vec<_>>()
            .join(" or ")
    }
}

#[derive(Debug, Clone)]
pub struct Registration {
    pub builder: &'static str,
    pub options: Vec<ConfigOption>,
    /// Documents may be read in parallel by a host orchestrator.
    pub parallel_read_safe: bool,
    /// Catalogs may be written in parallel.
    pub parallel_write_safe: bool,
}

impl Registration {
    pub fn option(&self, name: &str) -> Option<&ConfigOption> {
        self.options.iter().find(|option| option.name == name)
    }
}

const BOOL: &[ValueKind] = &[ValueKind::Bool];
const STRING: &[ValueKind] = &[ValueKind::String];
const LIST: &[ValueKind] = &[ValueKind::List];
const BOOL_OR_STRING: &[ValueKind] = &[ValueKind::Bool, ValueKind::String];

/// Register the catalog builder and its options.
pub fn setup() -> Registration {
    let defaults = serde_json::to_value(Config::default()).unwrap_or(Value::Null);
    let option = |name: &'static str, kinds: &'static [ValueKind]| ConfigOption {
        name,
        default: defaults.get(name).cloned().unwrap_or(Value::Null),
        kinds,
    };

    Registration {
        builder: MessageCatalogBuilder::NAME,
        options: vec![
            option("project", STRING),
            option("version", STRING),
            option("copyright", STRING),
            option("sourceRoot", STRING),
            option("outputDir", STRING),
            option("templatesPath", LIST),
            option("templateExtension", STRING),
            option("ignores", LIST),
            option("compact", BOOL_OR_STRING),
            option("showLocations", BOOL),
            option("showIds", BOOL),
            option("autoBuild", BOOL),
            option("additionalTargets", LIST),
            option("lastTranslator", STRING),
            option("languageTeam", STRING),
        ],
        parallel_read_safe: true,
        parallel_write_safe: true,
    }
}
