use crate::error::Result;
use std::collections::HashMap;
use std::collections::HashSet;
use std::path::Path;

/// how an effect combines with copies of itself or family siblings
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StackingType {
    Stack,
    Unique,
    NoStack,
}

impl StackingType {
    fn parse(raw: &str) -> Option<StackingType> {
        match raw {
            "stack" => Some(StackingType::Stack),
            "unique" => Some(StackingType::Unique),
            "no_stack" => Some(StackingType::NoStack),
            _ => None,
        }
    }
}

impl std::fmt::Display for StackingType {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            StackingType::Stack => write!(f, "stack"),
            StackingType::Unique => write!(f, "unique"),
            StackingType::NoStack => write!(f, "no_stack"),
        }
    }
}

/// a display name whose stacking type differs between deep and regular
/// pool sources
#[derive(Debug, Clone, Copy, Default)]
pub struct SourceOverride {
    pub regular: Option<StackingType>,
    pub deep: Option<StackingType>,
}

/// stacking-type assignments by display name, with per-source overrides,
/// loaded from `stacking_rules.json`. a missing or unreadable file leaves
/// the rules empty and every effect falls back to the default type.
#[derive(Debug, Default)]
pub struct StackingRules {
    by_name: HashMap<String, StackingType>,
    raw_names: Vec<String>,
    source_overrides: HashMap<String, SourceOverride>,
    override_display_names: HashSet<String>,
}

/// canonical display-name form used by every rules lookup: whitespace
/// collapsed, percent signs stripped, lowercased
pub fn normalize(name: &str) -> String {
    name.replace('%', " ")
        .split_whitespace()
        .collect::<Vec<&str>>()
        .join(" ")
        .to_lowercase()
}

/// fallback form with the trailing parenthetical removed
pub fn strip_parenthetical(name: &str) -> &str {
    match name.rfind('(') {
        Some(i) => name[..i].trim_end(),
        None => name,
    }
}

impl StackingRules {
    pub fn load(path: &Path) -> Result<StackingRules> {
        if !path.exists() {
            log::warn!("no stacking rules at {}", path.display());
            return Ok(StackingRules::default());
        }
        let raw = std::fs::read_to_string(path)?;
        let json: serde_json::Value = serde_json::from_str(&raw)?;
        Ok(Self::from_json(&json))
    }

    pub fn from_json(json: &serde_json::Value) -> StackingRules {
        let mut rules = StackingRules::default();
        let Some(object) = json.as_object() else {
            return rules;
        };
        for (name, value) in object {
            if name.starts_with('_') {
                continue;
            }
            if let Some(stype) = value.as_str().and_then(StackingType::parse) {
                rules.raw_names.push(name.clone());
                rules.by_name.insert(normalize(name), stype);
            }
        }
        if let Some(overrides) = object.get("_source_overrides").and_then(|v| v.as_object()) {
            for (name, value) in overrides {
                rules.override_display_names.insert(name.clone());
                let mut entry = SourceOverride::default();
                if let Some(map) = value.as_object() {
                    entry.regular = map
                        .get("regular")
                        .and_then(|v| v.as_str())
                        .and_then(StackingType::parse);
                    entry.deep = map
                        .get("deep")
                        .and_then(|v| v.as_str())
                        .and_then(StackingType::parse);
                }
                rules.source_overrides.insert(normalize(name), entry);
            }
        }
        rules
    }

    /// rule names as written in the document (family building walks them)
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.raw_names.iter().map(String::as_str)
    }

    /// direct lookup, then the trailing-parenthetical fallback
    pub fn lookup(&self, normalized: &str) -> Option<StackingType> {
        self.by_name
            .get(normalized)
            .or_else(|| self.by_name.get(strip_parenthetical(normalized)))
            .copied()
    }

    pub fn source_override(&self, normalized: &str) -> Option<&SourceOverride> {
        self.source_overrides.get(normalized)
    }

    /// raw display names carrying a source override (the effects catalogue
    /// splits these into separate deep entries)
    pub fn is_override_name(&self, display_name: &str) -> bool {
        self.override_display_names.contains(display_name)
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty() && self.source_overrides.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalization_collapses_and_lowers() {
        assert_eq!(normalize("  HP   Restore "), "hp restore");
        assert_eq!(normalize("Damage +5%"), "damage +5");
        assert_eq!(normalize("A\tB"), "a b");
    }

    #[test]
    fn parenthetical_fallback() {
        assert_eq!(strip_parenthetical("guard boost (deep)"), "guard boost");
        assert_eq!(strip_parenthetical("plain"), "plain");
    }

    #[test]
    fn loads_names_and_overrides() {
        let json = serde_json::json!({
            "HP Restore": "no_stack",
            "HP Restore +1": "unique",
            "Fire Attack Power Up": "stack",
            "_source_overrides": {
                "Sunken Blessing": {"regular": "no_stack", "deep": "unique"}
            }
        });
        let rules = StackingRules::from_json(&json);
        assert_eq!(rules.lookup("hp restore"), Some(StackingType::NoStack));
        assert_eq!(rules.lookup("hp restore +1"), Some(StackingType::Unique));
        assert_eq!(rules.lookup("unknown"), None);
        assert!(rules.is_override_name("Sunken Blessing"));
        let entry = rules.source_override("sunken blessing").unwrap();
        assert_eq!(entry.regular, Some(StackingType::NoStack));
        assert_eq!(entry.deep, Some(StackingType::Unique));
    }

    #[test]
    fn parenthetical_lookup_falls_back() {
        let json = serde_json::json!({"Guard Boost": "stack"});
        let rules = StackingRules::from_json(&json);
        assert_eq!(
            rules.lookup("guard boost (while two-handing)"),
            Some(StackingType::Stack)
        );
    }
}
