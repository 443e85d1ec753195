//! Filter predicate over test-case nodes.
//!
//! Folders are never filtered; the predicate applies to test-case leaves
//! only, and all active criteria are ANDed.

use serde::{Deserialize, Serialize};

use testcmdr_core::types::TagId;
use testcmdr_entity::testcase::{Priority, RunStatus, TestCase};
use testcmdr_entity::testtype::ResolvedCatalog;

/// Active filter dimensions. Unset fields are inactive.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Case-insensitive substring matched against tcid, name,
    /// HTML-stripped description, and author.
    #[serde(default)]
    pub search_term: String,
    /// Exact overall-result match.
    #[serde(default)]
    pub status: Option<RunStatus>,
    /// Exact priority match.
    #[serde(default)]
    pub priority: Option<Priority>,
    /// Exact match against the resolved test-type name.
    #[serde(default)]
    pub test_type: Option<String>,
    /// At least one of these tag ids must appear on the case.
    #[serde(default)]
    pub tag_ids: Vec<TagId>,
}

impl FilterCriteria {
    /// Whether any dimension is active.
    pub fn is_active(&self) -> bool {
        !self.search_term.trim().is_empty()
            || self.status.is_some()
            || self.priority.is_some()
            || self.test_type.is_some()
            || !self.tag_ids.is_empty()
    }
}

/// Evaluates all active criteria against a test case.
pub fn passes_filters(case: &TestCase, criteria: &FilterCriteria, catalog: &ResolvedCatalog) -> bool {
    let term = criteria.search_term.trim().to_lowercase();
    if !term.is_empty() {
        let haystack = format!(
            "{} {} {} {}",
            case.tcid,
            case.name,
            strip_html(&case.description),
            case.author
        )
        .to_lowercase();
        if !haystack.contains(&term) {
            return false;
        }
    }

    if let Some(status) = criteria.status
        && case.overall_result != status
    {
        return false;
    }

    if let Some(priority) = criteria.priority
        && case.priority != priority
    {
        return false;
    }

    if let Some(wanted) = &criteria.test_type {
        let resolved = case
            .test_type_code
            .as_deref()
            .and_then(|code| catalog.name_for(code))
            .unwrap_or(case.test_type.as_str());
        if resolved != wanted {
            return false;
        }
    }

    if !criteria.tag_ids.is_empty()
        && !case.tags.iter().any(|t| criteria.tag_ids.contains(t))
    {
        return false;
    }

    true
}

/// Strips HTML tags and decodes the common entities, collapsing the
/// result's surrounding whitespace.
pub fn strip_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut in_tag = false;
    for ch in input.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            c if !in_tag => out.push(c),
            _ => {}
        }
    }
    out.replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::collections::HashMap;
    use testcmdr_core::types::{FolderId, OrganizationId, ProjectId, TestCaseId, UserId};

    fn case(tcid: &str, status: RunStatus, priority: Priority, tags: Vec<TagId>) -> TestCase {
        TestCase {
            id: TestCaseId::new(),
            tcid: tcid.to_string(),
            name: format!("case {tcid}"),
            description: "<p>Checks the &amp; flow</p>".to_string(),
            author: "Morgan".to_string(),
            test_type: "Functional".to_string(),
            test_type_code: None,
            priority,
            overall_result: status,
            prerequisites: String::new(),
            tags,
            tags_snapshot: HashMap::new(),
            steps: Vec::new(),
            folder_id: Some(FolderId::new()),
            organization_id: OrganizationId::new(),
            project_id: ProjectId::new(),
            created_by: Some(UserId::new()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_strip_html_removes_tags_and_entities() {
        assert_eq!(
            strip_html("<p>Checks the &amp; flow</p>"),
            "Checks the & flow"
        );
        assert_eq!(strip_html("plain"), "plain");
        assert_eq!(strip_html("<br/>&nbsp;"), "");
    }

    #[test]
    fn test_no_active_criteria_always_passes() {
        let criteria = FilterCriteria::default();
        assert!(!criteria.is_active());
        let tc = case("TC-1", RunStatus::Failed, Priority::Low, vec![]);
        assert!(passes_filters(&tc, &criteria, &ResolvedCatalog::default()));
    }

    #[test]
    fn test_search_matches_stripped_description() {
        let criteria = FilterCriteria {
            search_term: "& flow".to_string(),
            ..Default::default()
        };
        let tc = case("TC-1", RunStatus::NotRun, Priority::Medium, vec![]);
        assert!(passes_filters(&tc, &criteria, &ResolvedCatalog::default()));

        let miss = FilterCriteria {
            search_term: "missing".to_string(),
            ..Default::default()
        };
        assert!(!passes_filters(&tc, &miss, &ResolvedCatalog::default()));
    }

    #[test]
    fn test_tag_filter_requires_intersection() {
        let t1 = TagId::new();
        let t2 = TagId::new();
        let tc = case("TC-1", RunStatus::NotRun, Priority::Medium, vec![t1]);

        let hit = FilterCriteria {
            tag_ids: vec![t1, t2],
            ..Default::default()
        };
        assert!(passes_filters(&tc, &hit, &ResolvedCatalog::default()));

        let miss = FilterCriteria {
            tag_ids: vec![t2],
            ..Default::default()
        };
        assert!(!passes_filters(&tc, &miss, &ResolvedCatalog::default()));
    }

    #[test]
    fn test_combined_criteria_equal_intersection_of_single_criteria() {
        let catalog = ResolvedCatalog::default();
        let cases = vec![
            case("TC-1", RunStatus::Failed, Priority::High, vec![]),
            case("TC-2", RunStatus::Failed, Priority::Low, vec![]),
            case("TC-3", RunStatus::Passed, Priority::High, vec![]),
            case("TC-4", RunStatus::Passed, Priority::Low, vec![]),
            case("TC-5", RunStatus::Failed, Priority::High, vec![]),
        ];

        let by_status = FilterCriteria {
            status: Some(RunStatus::Failed),
            ..Default::default()
        };
        let by_priority = FilterCriteria {
            priority: Some(Priority::High),
            ..Default::default()
        };
        let combined = FilterCriteria {
            status: Some(RunStatus::Failed),
            priority: Some(Priority::High),
            ..Default::default()
        };

        let pick = |c: &FilterCriteria| -> Vec<String> {
            cases
                .iter()
                .filter(|tc| passes_filters(tc, c, &catalog))
                .map(|tc| tc.tcid.clone())
                .collect()
        };

        let status_set = pick(&by_status);
        let priority_set = pick(&by_priority);
        let expected: Vec<String> = status_set
            .iter()
            .filter(|id| priority_set.contains(id))
            .cloned()
            .collect();

        assert_eq!(pick(&combined), expected);
        assert_eq!(pick(&combined), vec!["TC-1", "TC-5"]);
    }

    #[test]
    fn test_type_filter_prefers_catalog_resolution() {
        use testcmdr_entity::testtype::{GlobalTestType, OrgTestType, TypeStatus};

        let globals = vec![GlobalTestType {
            code: "FUNC".to_string(),
            name: "Functional".to_string(),
            category: "core".to_string(),
            description: String::new(),
            icon: "beaker".to_string(),
            status: TypeStatus::Active,
        }];
        let org = OrganizationId::new();
        let entries = vec![OrgTestType {
            organization_id: org,
            code: "FUNC".to_string(),
            enabled: true,
            name_override: Some("Feature Check".to_string()),
            description_override: None,
            icon_override: None,
        }];
        let catalog = ResolvedCatalog::resolve(&globals, &entries);

        let mut tc = case("TC-1", RunStatus::NotRun, Priority::Medium, vec![]);
        tc.test_type_code = Some("FUNC".to_string());

        let by_override = FilterCriteria {
            test_type: Some("Feature Check".to_string()),
            ..Default::default()
        };
        assert!(passes_filters(&tc, &by_override, &catalog));

        let by_raw_label = FilterCriteria {
            test_type: Some("Functional".to_string()),
            ..Default::default()
        };
        assert!(!passes_filters(&tc, &by_raw_label, &catalog));
    }
}
