//! Tree subsystem tests over an in-memory child source.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Utc;

use testcmdr_core::AppResult;
use testcmdr_core::types::{FolderId, OrganizationId, ProjectId, TagId, TestCaseId, UserId};
use testcmdr_entity::folder::Folder;
use testcmdr_entity::testcase::{Priority, RunStatus, TestCase};
use testcmdr_entity::testtype::ResolvedCatalog;
use testcmdr_tree::{
    ChildSource, DragPayload, DropTarget, ExpansionController, FilterCriteria, MoveOutcome,
    MoveRejection, TreeMaterializer, TreeNode, handle_drop,
};

#[derive(Default)]
struct MemoryState {
    folders: HashMap<FolderId, Folder>,
    cases: HashMap<TestCaseId, TestCase>,
}

/// In-memory store standing in for the Postgres repositories.
#[derive(Default)]
struct MemorySource {
    state: Mutex<MemoryState>,
    fetches: AtomicUsize,
}

impl MemorySource {
    fn add_folder(&self, name: &str, parent: Option<FolderId>) -> FolderId {
        let folder = Folder {
            id: FolderId::new(),
            name: name.to_string(),
            description: None,
            parent_folder_id: parent,
            organization_id: OrganizationId::new(),
            project_id: ProjectId::new(),
            created_by: None,
            created_at: Utc::now(),
        };
        let id = folder.id;
        self.state.lock().unwrap().folders.insert(id, folder);
        id
    }

    fn add_case(&self, tcid: &str, name: &str, folder: Option<FolderId>) -> TestCaseId {
        let case = TestCase {
            id: TestCaseId::new(),
            tcid: tcid.to_string(),
            name: name.to_string(),
            description: String::new(),
            author: "Riley".to_string(),
            test_type: "Functional".to_string(),
            test_type_code: None,
            priority: Priority::default(),
            overall_result: RunStatus::default(),
            prerequisites: String::new(),
            tags: Vec::<TagId>::new(),
            tags_snapshot: HashMap::new(),
            steps: Vec::new(),
            folder_id: folder,
            organization_id: OrganizationId::new(),
            project_id: ProjectId::new(),
            created_by: Some(UserId::new()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let id = case.id;
        self.state.lock().unwrap().cases.insert(id, case);
        id
    }

    fn parent_in_store(&self, folder: FolderId) -> Option<FolderId> {
        self.state
            .lock()
            .unwrap()
            .folders
            .get(&folder)
            .and_then(|f| f.parent_folder_id)
    }

    fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChildSource for MemorySource {
    async fn load_folders(&self, parent: Option<FolderId>) -> AppResult<Vec<Folder>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .state
            .lock()
            .unwrap()
            .folders
            .values()
            .filter(|f| f.parent_folder_id == parent)
            .cloned()
            .collect())
    }

    async fn load_cases(&self, folder: FolderId) -> AppResult<Vec<TestCase>> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .cases
            .values()
            .filter(|c| c.folder_id == Some(folder))
            .cloned()
            .collect())
    }

    async fn parent_of(&self, folder: FolderId) -> AppResult<Option<FolderId>> {
        Ok(self.parent_in_store(folder))
    }

    async fn move_folder(&self, folder: FolderId, new_parent: Option<FolderId>) -> AppResult<()> {
        if let Some(f) = self.state.lock().unwrap().folders.get_mut(&folder) {
            f.parent_folder_id = new_parent;
        }
        Ok(())
    }

    async fn move_case(&self, case: TestCaseId, folder: FolderId) -> AppResult<()> {
        if let Some(c) = self.state.lock().unwrap().cases.get_mut(&case) {
            c.folder_id = Some(folder);
        }
        Ok(())
    }
}

fn labels(nodes: &[TreeNode]) -> Vec<String> {
    nodes.iter().map(|n| n.label().to_string()).collect()
}

#[tokio::test]
async fn root_never_returns_unfiled_test_cases() {
    let source = Arc::new(MemorySource::default());
    source.add_folder("Smoke", None);
    source.add_case("TC-ORPHAN-1", "orphan one", None);
    source.add_case("TC-ORPHAN-2", "orphan two", None);

    let mut tree = TreeMaterializer::new(source);
    let children = tree.children(None).await.unwrap();

    assert_eq!(children.len(), 1);
    assert!(children.iter().all(TreeNode::is_folder));
}

#[tokio::test]
async fn children_are_folders_first_then_cases_by_tcid() {
    let source = Arc::new(MemorySource::default());
    let parent = source.add_folder("Suite", None);
    source.add_case("TC-B", "b", Some(parent));
    source.add_case("TC-A", "a", Some(parent));
    source.add_folder("zeta", Some(parent));
    source.add_folder("Alpha", Some(parent));

    let mut tree = TreeMaterializer::new(source);
    let children = tree.children(Some(parent)).await.unwrap();

    assert_eq!(labels(&children), vec!["Alpha", "zeta", "TC-A", "TC-B"]);
}

#[tokio::test]
async fn repeated_expansion_hits_the_cache_until_reload() {
    let source = Arc::new(MemorySource::default());
    let parent = source.add_folder("Suite", None);

    let mut tree = TreeMaterializer::new(Arc::clone(&source) as Arc<dyn ChildSource>);
    tree.children(Some(parent)).await.unwrap();
    tree.children(Some(parent)).await.unwrap();
    tree.children(Some(parent)).await.unwrap();
    assert_eq!(source.fetch_count(), 1);

    tree.reload(Some(parent)).await.unwrap();
    assert_eq!(source.fetch_count(), 2);
}

#[tokio::test]
async fn moving_folder_under_own_descendant_is_rejected_without_writes() {
    let source = Arc::new(MemorySource::default());
    let a = source.add_folder("A", None);
    let b = source.add_folder("B", Some(a));
    let c = source.add_folder("C", Some(b));

    let mut tree = TreeMaterializer::new(Arc::clone(&source) as Arc<dyn ChildSource>);
    let outcome = handle_drop(
        &mut tree,
        DragPayload::Folder {
            id: a,
            source_parent_id: None,
        },
        DropTarget::Folder(c),
    )
    .await
    .unwrap();

    assert_eq!(
        outcome,
        MoveOutcome::Rejected {
            reason: MoveRejection::IntoOwnDescendant
        }
    );
    assert_eq!(source.parent_in_store(a), None);
    assert_eq!(source.parent_in_store(b), Some(a));
    assert_eq!(source.parent_in_store(c), Some(b));
}

#[tokio::test]
async fn moving_folder_onto_itself_is_rejected() {
    let source = Arc::new(MemorySource::default());
    let a = source.add_folder("A", None);

    let mut tree = TreeMaterializer::new(Arc::clone(&source) as Arc<dyn ChildSource>);
    let outcome = handle_drop(
        &mut tree,
        DragPayload::Folder {
            id: a,
            source_parent_id: None,
        },
        DropTarget::Folder(a),
    )
    .await
    .unwrap();

    assert_eq!(
        outcome,
        MoveOutcome::Rejected {
            reason: MoveRejection::IntoSelf
        }
    );
}

#[tokio::test]
async fn dropping_case_on_root_is_rejected() {
    let source = Arc::new(MemorySource::default());
    let folder = source.add_folder("Suite", None);
    let case = source.add_case("TC-1", "one", Some(folder));

    let mut tree = TreeMaterializer::new(Arc::clone(&source) as Arc<dyn ChildSource>);
    let outcome = handle_drop(
        &mut tree,
        DragPayload::Case {
            id: case,
            source_folder_id: Some(folder),
        },
        DropTarget::Root,
    )
    .await
    .unwrap();

    assert_eq!(
        outcome,
        MoveOutcome::Rejected {
            reason: MoveRejection::CaseAtRoot
        }
    );
}

#[tokio::test]
async fn case_move_reloads_both_parents() {
    let source = Arc::new(MemorySource::default());
    let from = source.add_folder("From", None);
    let to = source.add_folder("To", None);
    let case = source.add_case("TC-1", "one", Some(from));

    let mut tree = TreeMaterializer::new(Arc::clone(&source) as Arc<dyn ChildSource>);
    tree.children(Some(from)).await.unwrap();
    tree.children(Some(to)).await.unwrap();

    let outcome = handle_drop(
        &mut tree,
        DragPayload::Case {
            id: case,
            source_folder_id: Some(from),
        },
        DropTarget::Folder(to),
    )
    .await
    .unwrap();
    assert_eq!(outcome, MoveOutcome::Moved);

    assert!(labels(tree.cached(Some(from)).unwrap()).is_empty());
    assert_eq!(labels(tree.cached(Some(to)).unwrap()), vec!["TC-1"]);
}

#[tokio::test]
async fn dropping_case_on_its_own_folder_is_a_noop() {
    let source = Arc::new(MemorySource::default());
    let folder = source.add_folder("Suite", None);
    let case = source.add_case("TC-1", "one", Some(folder));

    let mut tree = TreeMaterializer::new(Arc::clone(&source) as Arc<dyn ChildSource>);
    let outcome = handle_drop(
        &mut tree,
        DragPayload::Case {
            id: case,
            source_folder_id: Some(folder),
        },
        DropTarget::Folder(folder),
    )
    .await
    .unwrap();

    assert_eq!(outcome, MoveOutcome::Noop);
}

#[tokio::test]
async fn folder_move_to_root_is_legal() {
    let source = Arc::new(MemorySource::default());
    let a = source.add_folder("A", None);
    let b = source.add_folder("B", Some(a));

    let mut tree = TreeMaterializer::new(Arc::clone(&source) as Arc<dyn ChildSource>);
    let outcome = handle_drop(
        &mut tree,
        DragPayload::Folder {
            id: b,
            source_parent_id: Some(a),
        },
        DropTarget::Root,
    )
    .await
    .unwrap();

    assert_eq!(outcome, MoveOutcome::Moved);
    assert_eq!(source.parent_in_store(b), None);
}

#[tokio::test]
async fn expand_subtree_opens_every_descendant() {
    let source = Arc::new(MemorySource::default());
    let a = source.add_folder("A", None);
    let b = source.add_folder("B", Some(a));
    let c = source.add_folder("C", Some(b));
    let sibling = source.add_folder("Sibling", None);

    let mut tree = TreeMaterializer::new(source);
    let mut expansion = ExpansionController::new();
    expansion.expand_subtree(&mut tree, a).await.unwrap();

    assert!(expansion.is_expanded(a));
    assert!(expansion.is_expanded(b));
    assert!(expansion.is_expanded(c));
    assert!(!expansion.is_expanded(sibling));
}

#[tokio::test]
async fn collapse_all_clears_state_but_keeps_cache() {
    let source = Arc::new(MemorySource::default());
    let a = source.add_folder("A", None);

    let mut tree = TreeMaterializer::new(Arc::clone(&source) as Arc<dyn ChildSource>);
    let mut expansion = ExpansionController::new();
    expansion.toggle(&mut tree, a).await.unwrap();
    assert!(expansion.is_expanded(a));

    expansion.collapse_all();
    assert!(!expansion.is_expanded(a));
    assert!(tree.cached(Some(a)).is_some());
}

#[tokio::test]
async fn auto_expand_opens_folders_with_matching_loaded_cases() {
    let source = Arc::new(MemorySource::default());
    let with_match = source.add_folder("Hits", None);
    let without_match = source.add_folder("Misses", None);
    source.add_case("TC-LOGIN-01", "Valid Login", Some(with_match));
    source.add_case("TC-OTHER", "Other", Some(without_match));

    let mut tree = TreeMaterializer::new(source);
    tree.children(None).await.unwrap();
    tree.children(Some(with_match)).await.unwrap();
    tree.children(Some(without_match)).await.unwrap();

    let criteria = FilterCriteria {
        search_term: "login".to_string(),
        ..Default::default()
    };
    let catalog = ResolvedCatalog::default();
    let mut expansion = ExpansionController::new();
    expansion.auto_expand_matches(&tree, &criteria, &catalog);

    assert!(expansion.is_expanded(with_match));
    assert!(!expansion.is_expanded(without_match));
}

#[tokio::test]
async fn lazy_expansion_reveals_nodes_level_by_level() {
    let source = Arc::new(MemorySource::default());
    let regression = source.add_folder("Regression", None);
    let login = source.add_folder("Login", Some(regression));
    source.add_case("TC-LOGIN-01", "Valid Login", Some(login));

    let mut tree = TreeMaterializer::new(source);
    let mut expansion = ExpansionController::new();
    let criteria = FilterCriteria::default();
    let catalog = ResolvedCatalog::default();

    tree.ensure_loaded(None).await.unwrap();
    let visible = expansion.visible_nodes(&tree, &criteria, &catalog);
    assert_eq!(
        visible.iter().map(|v| v.node.label()).collect::<Vec<_>>(),
        vec!["Regression"]
    );

    expansion.toggle(&mut tree, regression).await.unwrap();
    let visible = expansion.visible_nodes(&tree, &criteria, &catalog);
    assert_eq!(
        visible.iter().map(|v| v.node.label()).collect::<Vec<_>>(),
        vec!["Regression", "Login"]
    );

    expansion.toggle(&mut tree, login).await.unwrap();
    let visible = expansion.visible_nodes(&tree, &criteria, &catalog);
    assert_eq!(
        visible.iter().map(|v| v.node.label()).collect::<Vec<_>>(),
        vec!["Regression", "Login", "TC-LOGIN-01"]
    );
    assert_eq!(visible[2].depth, 2);

    match &visible[2].node {
        TreeNode::Case(tc) => {
            assert_eq!(tc.overall_result, RunStatus::NotRun);
            assert_eq!(tc.priority, Priority::Medium);
        }
        TreeNode::Folder(_) => panic!("expected a test case leaf"),
    }
}

#[tokio::test]
async fn filtered_render_drops_failing_leaves_but_keeps_folders() {
    let source = Arc::new(MemorySource::default());
    let suite = source.add_folder("Suite", None);
    source.add_case("TC-PASS", "shown", Some(suite));
    source.add_case("TC-MISS", "hidden", Some(suite));

    let mut tree = TreeMaterializer::new(source);
    let mut expansion = ExpansionController::new();
    tree.ensure_loaded(None).await.unwrap();
    expansion.toggle(&mut tree, suite).await.unwrap();

    let criteria = FilterCriteria {
        search_term: "shown".to_string(),
        ..Default::default()
    };
    let visible = expansion.visible_nodes(&tree, &criteria, &ResolvedCatalog::default());
    assert_eq!(
        visible.iter().map(|v| v.node.label()).collect::<Vec<_>>(),
        vec!["Suite", "TC-PASS"]
    );
}
