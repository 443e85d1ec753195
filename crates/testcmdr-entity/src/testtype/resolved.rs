//! Two-tier test-type resolution.
//!
//! Effective name/description/icon = organization override ?? global
//! default; effective enabled = organization flag, defaulting to disabled
//! when the organization has no entry for the code.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::model::{GlobalTestType, OrgTestType, TypeStatus};

/// A test type after merging an organization's overlay onto the global
/// catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedTestType {
    /// Stable catalog code.
    pub code: String,
    /// Effective display name.
    pub name: String,
    /// Taxonomy category (not overridable).
    pub category: String,
    /// Effective description.
    pub description: String,
    /// Effective icon descriptor.
    pub icon: String,
    /// Whether the organization has enabled this type.
    pub enabled: bool,
    /// Global lifecycle status.
    pub status: TypeStatus,
}

/// An organization's fully resolved test-type catalog, keyed by code.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResolvedCatalog {
    by_code: HashMap<String, ResolvedTestType>,
}

impl ResolvedCatalog {
    /// Merge organization entries onto the global catalog.
    pub fn resolve(globals: &[GlobalTestType], org_entries: &[OrgTestType]) -> Self {
        let overlay: HashMap<&str, &OrgTestType> = org_entries
            .iter()
            .map(|entry| (entry.code.as_str(), entry))
            .collect();

        let by_code = globals
            .iter()
            .map(|global| {
                let entry = overlay.get(global.code.as_str());
                let resolved = ResolvedTestType {
                    code: global.code.clone(),
                    name: entry
                        .and_then(|e| e.name_override.clone())
                        .unwrap_or_else(|| global.name.clone()),
                    category: global.category.clone(),
                    description: entry
                        .and_then(|e| e.description_override.clone())
                        .unwrap_or_else(|| global.description.clone()),
                    icon: entry
                        .and_then(|e| e.icon_override.clone())
                        .unwrap_or_else(|| global.icon.clone()),
                    enabled: entry.map(|e| e.enabled).unwrap_or(false),
                    status: global.status,
                };
                (global.code.clone(), resolved)
            })
            .collect();

        Self { by_code }
    }

    /// Look up a resolved entry by code.
    pub fn get(&self, code: &str) -> Option<&ResolvedTestType> {
        self.by_code.get(code)
    }

    /// Effective display name for a code, if the code is in the catalog.
    pub fn name_for(&self, code: &str) -> Option<&str> {
        self.by_code.get(code).map(|t| t.name.as_str())
    }

    /// All resolved entries, enabled and disabled alike.
    pub fn entries(&self) -> impl Iterator<Item = &ResolvedTestType> {
        self.by_code.values()
    }

    /// Only the entries the organization has enabled.
    pub fn enabled(&self) -> impl Iterator<Item = &ResolvedTestType> {
        self.by_code.values().filter(|t| t.enabled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use testcmdr_core::types::OrganizationId;

    fn global(code: &str, name: &str) -> GlobalTestType {
        GlobalTestType {
            code: code.into(),
            name: name.into(),
            category: "functional".into(),
            description: format!("{name} testing"),
            icon: "beaker".into(),
            status: TypeStatus::Active,
        }
    }

    #[test]
    fn test_override_wins_over_global_default() {
        let globals = [global("FUNC", "Functional")];
        let org = [OrgTestType {
            organization_id: OrganizationId::new(),
            code: "FUNC".into(),
            enabled: true,
            name_override: Some("Feature Checks".into()),
            description_override: None,
            icon_override: None,
        }];

        let catalog = ResolvedCatalog::resolve(&globals, &org);
        let resolved = catalog.get("FUNC").unwrap();
        assert_eq!(resolved.name, "Feature Checks");
        assert_eq!(resolved.description, "Functional testing");
        assert!(resolved.enabled);
    }

    #[test]
    fn test_missing_org_entry_defaults_to_disabled() {
        let globals = [global("PERF", "Performance")];
        let catalog = ResolvedCatalog::resolve(&globals, &[]);
        let resolved = catalog.get("PERF").unwrap();
        assert_eq!(resolved.name, "Performance");
        assert!(!resolved.enabled);
    }

    #[test]
    fn test_org_entry_for_unknown_code_is_ignored() {
        let org = [OrgTestType {
            organization_id: OrganizationId::new(),
            code: "GHOST".into(),
            enabled: true,
            name_override: None,
            description_override: None,
            icon_override: None,
        }];
        let catalog = ResolvedCatalog::resolve(&[], &org);
        assert!(catalog.get("GHOST").is_none());
    }
}
