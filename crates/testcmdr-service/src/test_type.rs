//! Test-type catalog resolution and organization overrides.

use std::sync::Arc;

use dashmap::DashMap;
use tracing::info;

use testcmdr_auth::{Permission, RbacEnforcer};
use testcmdr_core::AppResult;
use testcmdr_core::types::OrganizationId;
use testcmdr_database::repositories::test_type::TestTypeRepository;
use testcmdr_entity::testtype::{GlobalTestType, OrgTestType, ResolvedCatalog};

use crate::context::RequestContext;

/// Serves the two-tier test-type taxonomy.
///
/// Resolved catalogs are cached per organization and dropped whenever
/// that organization's entries (or the global catalog) change.
pub struct TestTypeService {
    type_repo: Arc<TestTypeRepository>,
    enforcer: Arc<RbacEnforcer>,
    catalogs: DashMap<OrganizationId, Arc<ResolvedCatalog>>,
}

impl TestTypeService {
    /// Creates a new test-type service.
    pub fn new(type_repo: Arc<TestTypeRepository>, enforcer: Arc<RbacEnforcer>) -> Self {
        Self {
            type_repo,
            enforcer,
            catalogs: DashMap::new(),
        }
    }

    /// The global catalog, unresolved.
    pub async fn list_globals(&self) -> AppResult<Vec<GlobalTestType>> {
        self.type_repo.find_globals().await
    }

    /// An organization's resolved catalog (override merged onto global),
    /// from cache when available.
    pub async fn resolved_catalog(
        &self,
        organization_id: OrganizationId,
    ) -> AppResult<Arc<ResolvedCatalog>> {
        if let Some(cached) = self.catalogs.get(&organization_id) {
            return Ok(Arc::clone(&cached));
        }

        let globals = self.type_repo.find_globals().await?;
        let entries = self.type_repo.find_org_entries(organization_id).await?;
        let catalog = Arc::new(ResolvedCatalog::resolve(&globals, &entries));
        self.catalogs.insert(organization_id, Arc::clone(&catalog));
        Ok(catalog)
    }

    /// Enables, disables, or overrides a global type for an organization.
    pub async fn set_org_entry(
        &self,
        ctx: &RequestContext,
        entry: OrgTestType,
    ) -> AppResult<OrgTestType> {
        self.enforcer
            .require_permission(&ctx.roles, Permission::TestTypeAdminister)?;
        self.enforcer
            .require_org_access(&ctx.roles, ctx.organization_id, entry.organization_id)?;

        let saved = self.type_repo.upsert_org_entry(&entry).await?;
        self.catalogs.remove(&saved.organization_id);
        info!(
            code = %saved.code,
            organization_id = %saved.organization_id,
            enabled = saved.enabled,
            user_id = %ctx.user_id,
            "Updated organization test type"
        );
        Ok(saved)
    }

    /// Renames a global catalog entry. Used by maintenance tooling;
    /// every organization's resolved view changes, so all cached catalogs
    /// are dropped.
    pub async fn rename_global(&self, code: &str, new_name: &str) -> AppResult<GlobalTestType> {
        let renamed = self.type_repo.rename_global(code, new_name).await?;
        self.catalogs.clear();
        info!(code = %renamed.code, name = %renamed.name, "Renamed global test type");
        Ok(renamed)
    }
}
