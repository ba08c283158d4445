use super::*;
use crate::adapters::outbound::repository::InMemoryRepository;
use crate::application::dto::CollectConfig;
use crate::dependency_collection::domain::{DependencyNode, Exclusion, Scope, Version};
use crate::dependency_collection::policies::{DependencyManagerKind, ManagementPrecedence};
use std::sync::Mutex;

#[derive(Clone, Default)]
struct CapturingReporter {
    messages: Arc<Mutex<Vec<String>>>,
    errors: Arc<Mutex<Vec<String>>>,
}

impl CapturingReporter {
    fn errors(&self) -> Vec<String> {
        self.errors.lock().unwrap().clone()
    }

    fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl ProgressReporter for CapturingReporter {
    fn report(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }

    fn report_progress(&self, _current: usize, _total: usize, _message: Option<&str>) {}

    fn report_error(&self, message: &str) {
        self.errors.lock().unwrap().push(message.to_string());
    }

    fn report_completion(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

/// Delays every descriptor read
struct SlowReader {
    inner: InMemoryRepository,
    delay: Duration,
}

#[async_trait]
impl DescriptorReader for SlowReader {
    async fn read_descriptor(
        &self,
        artifact: &Artifact,
        repositories: &[RemoteRepository],
    ) -> Result<ArtifactDescriptor> {
        tokio::time::sleep(self.delay).await;
        self.inner.read_descriptor(artifact, repositories).await
    }
}

fn dep(coords: &str) -> Dependency {
    Dependency::parse(coords, "compile").unwrap()
}

fn descriptor(coords: &str, dependencies: Vec<Dependency>) -> ArtifactDescriptor {
    let mut descriptor = ArtifactDescriptor::new(Artifact::parse(coords).unwrap());
    descriptor.dependencies = dependencies;
    descriptor
}

fn collector(
    repository: InMemoryRepository,
) -> (
    CollectDependenciesUseCase<InMemoryRepository, InMemoryRepository, CapturingReporter>,
    CapturingReporter,
) {
    let reporter = CapturingReporter::default();
    let use_case = CollectDependenciesUseCase::new(repository.clone(), repository, reporter.clone());
    (use_case, reporter)
}

fn session(config: CollectConfig) -> CollectSession {
    CollectSession::new(config)
}

fn skipping() -> CollectConfig {
    CollectConfig::builder().skipper_enabled(true).build().unwrap()
}

fn request(dependencies: Vec<Dependency>) -> CollectRequest {
    CollectRequest::builder()
        .dependencies(dependencies)
        .build()
        .unwrap()
}

fn only<'a>(node: &'a DependencyNode, artifact_id: &str) -> &'a DependencyNode {
    let found = node.children_named(artifact_id);
    assert_eq!(found.len(), 1, "expected one '{}' below {}", artifact_id, node.dump());
    found[0]
}

fn version_of(node: &DependencyNode) -> &str {
    node.artifact().unwrap().version()
}

/// a -> x, b -> x, x -> y
fn diamond() -> InMemoryRepository {
    InMemoryRepository::new()
        .with_descriptor(descriptor("g:a:jar:1.0", vec![dep("g:x:jar:1.0")]))
        .with_descriptor(descriptor("g:b:jar:1.0", vec![dep("g:x:jar:1.0")]))
        .with_descriptor(descriptor("g:x:jar:1.0", vec![dep("g:y:jar:1.0")]))
        .with_descriptor(descriptor("g:y:jar:1.0", vec![]))
}

#[tokio::test]
async fn test_range_child_resolves_to_highest_match() {
    let repository = InMemoryRepository::new()
        .with_descriptor(descriptor("g:a:jar:1.0", vec![dep("g:b:jar:[1.0,2.0)")]))
        .with_descriptor(descriptor("g:b:jar:1.0", vec![]))
        .with_descriptor(descriptor("g:b:jar:1.5", vec![]))
        .with_descriptor(descriptor("g:b:jar:2.0", vec![]));
    let (use_case, _) = collector(repository);

    let result = use_case
        .execute(&CollectSession::default(), request(vec![dep("g:a:jar:1.0")]))
        .await
        .unwrap();

    let a = only(result.root(), "a");
    let b = only(a, "b");
    assert_eq!(version_of(b), "1.5");
    assert_eq!(b.dependency().unwrap().scope(), Scope::Compile);
    assert!(b.version_constraint().unwrap().is_range());
    assert!(result.errors().is_empty());
}

#[tokio::test]
async fn test_different_exclusions_expand_separately() {
    let repository = InMemoryRepository::new()
        .with_descriptor(descriptor("g:p1:jar:1.0", vec![dep("g:x:jar:1.0")]))
        .with_descriptor(descriptor("g:p2:jar:1.0", vec![dep("g:x:jar:1.0")]))
        .with_descriptor(descriptor(
            "g:x:jar:1.0",
            vec![dep("g:t1:jar:1.0"), dep("g:t2:jar:1.0")],
        ))
        .with_descriptor(descriptor("g:t1:jar:1.0", vec![]))
        .with_descriptor(descriptor("g:t2:jar:1.0", vec![]));
    let (use_case, _) = collector(repository);

    let p1 = dep("g:p1:jar:1.0").with_exclusion(Exclusion::parse("g:t1").unwrap());
    let p2 = dep("g:p2:jar:1.0").with_exclusion(Exclusion::parse("g:t2").unwrap());
    let result = use_case
        .execute(&session(skipping()), request(vec![p1, p2]))
        .await
        .unwrap();

    let x1 = only(only(result.root(), "p1"), "x");
    let x2 = only(only(result.root(), "p2"), "x");
    assert_eq!(x1.kind(), NodeKind::Resolved);
    assert_eq!(x2.kind(), NodeKind::Resolved);
    assert!(x1.children_named("t1").is_empty());
    assert_eq!(x1.children_named("t2").len(), 1);
    assert!(x2.children_named("t2").is_empty());
    assert_eq!(x2.children_named("t1").len(), 1);
    assert_eq!(result.stats().duplicates, 0);
}

#[tokio::test]
async fn test_managed_version_and_scope_applied_transitively() {
    let repository = InMemoryRepository::new()
        .with_descriptor(descriptor("g:a:jar:1.0", vec![dep("g:y:jar:1.0")]))
        .with_descriptor(descriptor("g:y:jar:1.0", vec![]))
        .with_descriptor(descriptor("g:y:jar:3.0", vec![]));
    let (use_case, _) = collector(repository);

    let request = CollectRequest::builder()
        .dependency(dep("g:a:jar:1.0"))
        .managed_dependency(
            ManagedDependency::parse("g:y")
                .unwrap()
                .with_version("3.0")
                .with_scope(Scope::Runtime),
        )
        .build()
        .unwrap();
    let result = use_case
        .execute(&CollectSession::default(), request)
        .await
        .unwrap();

    let y = only(only(result.root(), "a"), "y");
    assert_eq!(version_of(y), "3.0");
    assert_eq!(y.dependency().unwrap().scope(), Scope::Runtime);
    assert_eq!(y.premanaged().version(), Some("1.0"));
    assert_eq!(y.premanaged().scope(), Some(Scope::Compile));
}

#[tokio::test]
async fn test_descriptor_failure_truncates_one_branch() {
    let repository = InMemoryRepository::new()
        .with_descriptor(descriptor(
            "g:a:jar:1.0",
            vec![dep("g:b:jar:1.0"), dep("g:c:jar:1.0")],
        ))
        .with_unavailable(Artifact::parse("g:b:jar:1.0").unwrap())
        .with_descriptor(descriptor("g:c:jar:1.0", vec![dep("g:d:jar:1.0")]))
        .with_descriptor(descriptor("g:d:jar:1.0", vec![]));
    let (use_case, reporter) = collector(repository);

    let result = use_case
        .execute(&CollectSession::default(), request(vec![dep("g:a:jar:1.0")]))
        .await
        .unwrap();

    let a = only(result.root(), "a");
    let b = only(a, "b");
    assert_eq!(b.kind(), NodeKind::Unresolved);
    assert!(b.children().is_empty());
    assert_eq!(only(only(a, "c"), "d").kind(), NodeKind::Resolved);

    assert_eq!(result.errors().len(), 1);
    match &result.errors()[0] {
        CollectError::BranchDescriptorFailure { artifact, path, .. } => {
            assert_eq!(artifact, "g:b:jar:1.0");
            assert!(path.contains("g:a:jar:1.0"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert!(result.is_complete());
    assert!(reporter
        .errors()
        .iter()
        .any(|e| e.contains("1 branch(es) could not be collected")));
}

#[tokio::test]
async fn test_unmatched_range_records_range_failure() {
    let repository = InMemoryRepository::new()
        .with_descriptor(descriptor("g:a:jar:1.0", vec![dep("g:b:jar:[5.0,)")]))
        .with_descriptor(descriptor("g:b:jar:1.0", vec![]));
    let (use_case, _) = collector(repository);

    let result = use_case
        .execute(&CollectSession::default(), request(vec![dep("g:a:jar:1.0")]))
        .await
        .unwrap();

    let b = only(only(result.root(), "a"), "b");
    assert_eq!(b.kind(), NodeKind::Unresolved);
    assert_eq!(result.errors().len(), 1);
    assert!(matches!(
        result.errors()[0],
        CollectError::RangeResolutionFailure { .. }
    ));
}

#[tokio::test]
async fn test_identical_subtree_marked_duplicate() {
    let (use_case, _) = collector(diamond());

    let result = use_case
        .execute(
            &session(skipping()),
            request(vec![dep("g:a:jar:1.0"), dep("g:b:jar:1.0")]),
        )
        .await
        .unwrap();

    let first = only(only(result.root(), "a"), "x");
    let second = only(only(result.root(), "b"), "x");
    assert_eq!(first.kind(), NodeKind::Resolved);
    assert_eq!(second.kind(), NodeKind::Duplicate { of: first.id() });
    assert!(second.children().is_empty());
    assert_eq!(result.stats().duplicates, 1);
    assert_eq!(result.stats().skipper_hits, 1);
    // a, b, x, y
    assert_eq!(result.stats().descriptor_reads, 4);
}

#[tokio::test]
async fn test_skipper_does_not_change_expanded_tree() {
    let (use_case, _) = collector(diamond());
    let deps = vec![dep("g:a:jar:1.0"), dep("g:b:jar:1.0")];

    let plain = use_case
        .execute(&CollectSession::default(), request(deps.clone()))
        .await
        .unwrap();
    let skipped = use_case
        .execute(&session(skipping()), request(deps))
        .await
        .unwrap();

    assert_eq!(plain.stats().duplicates, 0);
    assert_eq!(plain.stats().descriptor_reads, 6);
    assert_eq!(skipped.expand_duplicates().dump(), plain.root().dump());
}

#[tokio::test]
async fn test_skipper_does_not_change_tree_around_cycles() {
    // c leads back to an ancestor of one occurrence only
    let back_to_a = InMemoryRepository::new()
        .with_descriptor(descriptor("g:a:jar:1.0", vec![dep("g:c:jar:1.0")]))
        .with_descriptor(descriptor("g:b:jar:1.0", vec![dep("g:c:jar:1.0")]))
        .with_descriptor(descriptor("g:c:jar:1.0", vec![dep("g:a:jar:1.0")]));
    let back_to_b = InMemoryRepository::new()
        .with_descriptor(descriptor("g:a:jar:1.0", vec![dep("g:c:jar:1.0")]))
        .with_descriptor(descriptor("g:b:jar:1.0", vec![dep("g:c:jar:1.0")]))
        .with_descriptor(descriptor("g:c:jar:1.0", vec![dep("g:b:jar:1.0")]));

    for repository in [back_to_a, back_to_b] {
        let (use_case, _) = collector(repository);
        let deps = vec![dep("g:a:jar:1.0"), dep("g:b:jar:1.0")];

        let plain = use_case
            .execute(&CollectSession::default(), request(deps.clone()))
            .await
            .unwrap();
        let skipped = use_case
            .execute(&session(skipping()), request(deps))
            .await
            .unwrap();

        assert_eq!(skipped.expand_duplicates().dump(), plain.root().dump());
        assert_eq!(skipped.root().dump(), plain.root().dump());
        assert_eq!(skipped.stats().duplicates, 0);
        assert_eq!(skipped.stats().skipper_hits, 1);
    }
}

#[tokio::test]
async fn test_cycle_is_marked_and_terminates() {
    let repository = InMemoryRepository::new()
        .with_descriptor(descriptor("g:a:jar:1.0", vec![dep("g:b:jar:1.0")]))
        .with_descriptor(descriptor("g:b:jar:1.0", vec![dep("g:a:jar:2.0")]))
        .with_descriptor(descriptor("g:a:jar:2.0", vec![]));
    let (use_case, _) = collector(repository);

    let result = use_case
        .execute(&CollectSession::default(), request(vec![dep("g:a:jar:1.0")]))
        .await
        .unwrap();

    let back = only(only(only(result.root(), "a"), "b"), "a");
    assert_eq!(back.kind(), NodeKind::Cycle);
    assert!(back.children().is_empty());
    assert_eq!(result.stats().cycles, 1);
    assert!(result.dump().contains("(cycle)"));
}

#[tokio::test]
async fn test_relocation_is_followed() {
    let mut old = descriptor("g:old:jar:1.0", vec![]);
    old.relocated_to = Some(Artifact::parse("g:new:jar:2.0").unwrap());
    let repository = InMemoryRepository::new()
        .with_descriptor(descriptor("g:a:jar:1.0", vec![dep("g:old:jar:1.0")]))
        .with_descriptor(old)
        .with_descriptor(descriptor("g:new:jar:2.0", vec![dep("g:z:jar:1.0")]))
        .with_descriptor(descriptor("g:z:jar:1.0", vec![]));
    let (use_case, reporter) = collector(repository);

    let result = use_case
        .execute(&CollectSession::default(), request(vec![dep("g:a:jar:1.0")]))
        .await
        .unwrap();

    let moved = only(only(result.root(), "a"), "new");
    assert_eq!(version_of(moved), "2.0");
    assert_eq!(
        moved.relocations(),
        &[Artifact::parse("g:old:jar:1.0").unwrap()]
    );
    assert_eq!(only(moved, "z").kind(), NodeKind::Resolved);
    assert_eq!(result.stats().relocations, 1);
    assert!(reporter.messages().iter().any(|m| m.contains("relocated to")));
}

#[tokio::test]
async fn test_relocation_into_ancestor_is_a_cycle() {
    let mut moved = descriptor("g:b:jar:1.0", vec![]);
    moved.relocated_to = Some(Artifact::parse("g:a:jar:1.0").unwrap());
    let repository = InMemoryRepository::new()
        .with_descriptor(descriptor("g:a:jar:1.0", vec![dep("g:b:jar:1.0")]))
        .with_descriptor(moved);
    let (use_case, _) = collector(repository);

    let result = use_case
        .execute(&CollectSession::default(), request(vec![dep("g:a:jar:1.0")]))
        .await
        .unwrap();

    let a = only(result.root(), "a");
    let back = only(a, "a");
    assert_eq!(back.kind(), NodeKind::Cycle);
    assert!(back.children().is_empty());
    assert_eq!(back.relocations(), &[Artifact::parse("g:b:jar:1.0").unwrap()]);
    assert_eq!(result.stats().cycles, 1);
    assert_eq!(result.stats().relocations, 1);
    assert!(result.errors().is_empty());
}

#[tokio::test]
async fn test_dependency_on_relocated_ancestor_is_a_cycle() {
    // a moved to z; z depends on the old a coordinates
    let mut moved = descriptor("g:a:jar:1.0", vec![]);
    moved.relocated_to = Some(Artifact::parse("g:z:jar:1.0").unwrap());
    let repository = InMemoryRepository::new()
        .with_descriptor(moved)
        .with_descriptor(descriptor("g:z:jar:1.0", vec![dep("g:a:jar:1.0")]));
    let (use_case, _) = collector(repository);

    let result = use_case
        .execute(&CollectSession::default(), request(vec![dep("g:a:jar:1.0")]))
        .await
        .unwrap();

    let z = only(result.root(), "z");
    assert_eq!(only(z, "a").kind(), NodeKind::Cycle);
    assert_eq!(result.stats().cycles, 1);
}

#[tokio::test]
async fn test_relocation_loop_is_a_branch_failure() {
    let mut first = descriptor("g:a:jar:1.0", vec![]);
    first.relocated_to = Some(Artifact::parse("g:b:jar:1.0").unwrap());
    let mut second = descriptor("g:b:jar:1.0", vec![]);
    second.relocated_to = Some(Artifact::parse("g:a:jar:1.0").unwrap());
    let repository = InMemoryRepository::new()
        .with_descriptor(first)
        .with_descriptor(second);
    let (use_case, _) = collector(repository);

    let result = use_case
        .execute(&CollectSession::default(), request(vec![dep("g:a:jar:1.0")]))
        .await
        .unwrap();

    assert_eq!(only(result.root(), "a").kind(), NodeKind::Unresolved);
    assert_eq!(result.errors().len(), 1);
    assert!(result.errors()[0].to_string().contains("relocation loop"));
}

#[tokio::test]
async fn test_root_failure_carries_partial_result() {
    let (use_case, _) = collector(InMemoryRepository::new());
    let request = CollectRequest::builder()
        .root(dep("g:missing:jar:1.0"))
        .build()
        .unwrap();

    let err = use_case
        .execute(&CollectSession::default(), request)
        .await
        .unwrap_err();

    let err = err.downcast_ref::<CollectError>().unwrap();
    assert!(!err.is_recoverable());
    let partial = err.partial_result().unwrap();
    assert!(!partial.is_complete());
    assert_eq!(partial.root().kind(), NodeKind::Unresolved);
    assert!(partial.root().children().is_empty());
    assert_eq!(partial.errors().len(), 1);
    assert!(matches!(
        partial.errors()[0],
        CollectError::BranchDescriptorFailure { .. }
    ));
}

#[tokio::test]
async fn test_root_range_failure_is_listed_in_partial_result() {
    let (use_case, _) = collector(InMemoryRepository::new());
    let request = CollectRequest::builder()
        .root(dep("g:missing:jar:[1.0,2.0)"))
        .build()
        .unwrap();

    let err = use_case
        .execute(&CollectSession::default(), request)
        .await
        .unwrap_err();

    let partial = err
        .downcast_ref::<CollectError>()
        .and_then(CollectError::partial_result)
        .unwrap();
    assert_eq!(partial.errors().len(), 1);
    match &partial.errors()[0] {
        CollectError::RangeResolutionFailure {
            artifact,
            constraint,
            ..
        } => {
            assert_eq!(artifact, "g:missing:jar");
            assert_eq!(constraint, "[1.0,2.0)");
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[tokio::test]
async fn test_root_dependency_descriptor_drives_first_level() {
    let mut root = descriptor("g:root:jar:1.0", vec![dep("g:a:jar:1.0"), dep("g:b:jar:1.0")]);
    root.managed_dependencies = vec![ManagedDependency::parse("g:x").unwrap().with_version("2.0")];
    let repository = InMemoryRepository::new()
        .with_descriptor(root)
        .with_descriptor(descriptor("g:a:jar:1.0", vec![dep("g:x:jar:1.0")]))
        .with_descriptor(descriptor("g:b:jar:1.0", vec![]))
        .with_descriptor(descriptor("g:b:jar:1.1", vec![]))
        .with_descriptor(descriptor("g:x:jar:2.0", vec![]));
    let (use_case, _) = collector(repository);

    let request = CollectRequest::builder()
        .root(dep("g:root:jar:1.0"))
        .dependency(dep("g:b:jar:1.1"))
        .build()
        .unwrap();
    let result = use_case
        .execute(&CollectSession::default(), request)
        .await
        .unwrap();

    assert_eq!(version_of(result.root()), "1.0");
    assert_eq!(version_of(only(result.root(), "b")), "1.1");
    assert_eq!(version_of(only(only(result.root(), "a"), "x")), "2.0");
}

#[tokio::test]
async fn test_request_management_wins_by_default() {
    let mut root = descriptor("g:root:jar:1.0", vec![dep("g:a:jar:1.0")]);
    root.managed_dependencies = vec![ManagedDependency::parse("g:y").unwrap().with_version("2.0")];
    let repository = InMemoryRepository::new()
        .with_descriptor(root)
        .with_descriptor(descriptor("g:a:jar:1.0", vec![dep("g:y:jar:1.0")]))
        .with_descriptor(descriptor("g:y:jar:2.0", vec![]))
        .with_descriptor(descriptor("g:y:jar:3.0", vec![]));
    let (use_case, reporter) = collector(repository);

    let build = || {
        CollectRequest::builder()
            .root(dep("g:root:jar:1.0"))
            .managed_dependency(ManagedDependency::parse("g:y").unwrap().with_version("3.0"))
            .build()
            .unwrap()
    };

    let by_request = use_case
        .execute(&CollectSession::default(), build())
        .await
        .unwrap();
    assert_eq!(version_of(only(only(by_request.root(), "a"), "y")), "3.0");
    assert_eq!(by_request.conflicts().len(), 1);
    assert_eq!(by_request.conflicts()[0].kept(), "3.0");
    assert_eq!(by_request.conflicts()[0].discarded(), "2.0");
    assert!(reporter
        .errors()
        .iter()
        .any(|e| e.contains("Management conflict")));

    let config = CollectConfig::builder()
        .management_precedence(ManagementPrecedence::Descriptor)
        .build()
        .unwrap();
    let by_descriptor = use_case.execute(&session(config), build()).await.unwrap();
    assert_eq!(version_of(only(only(by_descriptor.root(), "a"), "y")), "2.0");
}

#[tokio::test]
async fn test_transitive_manager_applies_deeper_management() {
    let mut b = descriptor("g:b:jar:1.0", vec![dep("g:c:jar:1.0")]);
    b.managed_dependencies = vec![ManagedDependency::parse("g:z").unwrap().with_version("2.0")];
    let repository = InMemoryRepository::new()
        .with_descriptor(descriptor("g:a:jar:1.0", vec![dep("g:b:jar:1.0")]))
        .with_descriptor(b)
        .with_descriptor(descriptor("g:c:jar:1.0", vec![dep("g:z:jar:1.0")]))
        .with_descriptor(descriptor("g:z:jar:1.0", vec![]))
        .with_descriptor(descriptor("g:z:jar:2.0", vec![]));
    let (use_case, _) = collector(repository);
    let z_version = |result: &CollectResult| {
        let z = only(only(only(only(result.root(), "a"), "b"), "c"), "z");
        version_of(z).to_string()
    };

    let classic = use_case
        .execute(&CollectSession::default(), request(vec![dep("g:a:jar:1.0")]))
        .await
        .unwrap();
    assert_eq!(z_version(&classic), "1.0");

    let config = CollectConfig::builder()
        .dependency_manager(DependencyManagerKind::Transitive)
        .build()
        .unwrap();
    let transitive = use_case
        .execute(&session(config), request(vec![dep("g:a:jar:1.0")]))
        .await
        .unwrap();
    assert_eq!(z_version(&transitive), "2.0");
}

#[tokio::test]
async fn test_transitive_optional_and_test_scope_dropped() {
    let repository = InMemoryRepository::new()
        .with_descriptor(descriptor(
            "g:a:jar:1.0",
            vec![
                dep("g:opt:jar:1.0").with_optional(true),
                Dependency::parse("g:junit:jar:4.0", "test").unwrap(),
                Dependency::parse("g:rt:jar:1.0", "runtime").unwrap(),
            ],
        ))
        .with_descriptor(descriptor("g:opt:jar:1.0", vec![]))
        .with_descriptor(descriptor("g:rt:jar:1.0", vec![]));
    let (use_case, _) = collector(repository);

    let result = use_case
        .execute(&CollectSession::default(), request(vec![dep("g:a:jar:1.0")]))
        .await
        .unwrap();
    let a = only(result.root(), "a");
    assert!(a.children_named("opt").is_empty());
    assert!(a.children_named("junit").is_empty());
    assert_eq!(only(a, "rt").dependency().unwrap().scope(), Scope::Runtime);

    let config = CollectConfig::builder().include_optional(true).build().unwrap();
    let result = use_case
        .execute(&session(config), request(vec![dep("g:a:jar:1.0")]))
        .await
        .unwrap();
    assert_eq!(only(result.root(), "a").children_named("opt").len(), 1);
}

#[tokio::test]
async fn test_scope_narrows_below_runtime_parent() {
    let repository = InMemoryRepository::new()
        .with_descriptor(descriptor("g:a:jar:1.0", vec![dep("g:b:jar:1.0")]))
        .with_descriptor(descriptor("g:b:jar:1.0", vec![]));
    let (use_case, _) = collector(repository);

    let a = Dependency::parse("g:a:jar:1.0", "runtime").unwrap();
    let result = use_case
        .execute(&CollectSession::default(), request(vec![a]))
        .await
        .unwrap();

    let b = only(only(result.root(), "a"), "b");
    assert_eq!(b.dependency().unwrap().scope(), Scope::Runtime);
}

#[tokio::test]
async fn test_depth_limit_stops_expansion() {
    let repository = InMemoryRepository::new()
        .with_descriptor(descriptor("g:a:jar:1.0", vec![dep("g:b:jar:1.0")]))
        .with_descriptor(descriptor("g:b:jar:1.0", vec![dep("g:c:jar:1.0")]))
        .with_descriptor(descriptor("g:c:jar:1.0", vec![]));
    let (use_case, reporter) = collector(repository);

    let config = CollectConfig::builder().max_depth(Some(2)).build().unwrap();
    let result = use_case
        .execute(&session(config), request(vec![dep("g:a:jar:1.0")]))
        .await
        .unwrap();

    let b = only(only(result.root(), "a"), "b");
    assert_eq!(b.kind(), NodeKind::DepthLimited);
    assert!(b.children().is_empty());
    assert!(reporter.errors().iter().any(|e| e.contains("Depth limit")));
}

#[tokio::test]
async fn test_unmerged_range_keeps_every_match() {
    let repository = InMemoryRepository::new()
        .with_descriptor(descriptor("g:a:jar:1.0", vec![dep("g:b:jar:[1.0,2.0)")]))
        .with_descriptor(descriptor("g:b:jar:1.0", vec![]))
        .with_descriptor(descriptor("g:b:jar:1.5", vec![]))
        .with_descriptor(descriptor("g:b:jar:2.0", vec![]));
    let (use_case, _) = collector(repository);

    let config = CollectConfig::builder()
        .use_range_resolution(false)
        .build()
        .unwrap();
    let result = use_case
        .execute(&session(config), request(vec![dep("g:a:jar:1.0")]))
        .await
        .unwrap();

    let versions: Vec<&str> = only(result.root(), "a")
        .children_named("b")
        .into_iter()
        .map(version_of)
        .collect();
    assert_eq!(versions, vec!["1.0", "1.5"]);
}

#[tokio::test]
async fn test_cancelled_session_returns_incomplete_result() {
    let (use_case, reporter) = collector(diamond());
    let session = CollectSession::default();
    session.cancellation().cancel();

    let result = use_case
        .execute(&session, request(vec![dep("g:a:jar:1.0")]))
        .await
        .unwrap();

    assert!(!result.is_complete());
    assert!(result.root().children().is_empty());
    assert_eq!(result.stats().levels, 0);
    assert!(reporter.errors().iter().any(|e| e.contains("cancelled")));
}

#[tokio::test]
async fn test_slow_descriptor_read_times_out() {
    let repository = InMemoryRepository::new()
        .with_descriptor(descriptor("g:a:jar:1.0", vec![dep("g:b:jar:1.0")]));
    let use_case = CollectDependenciesUseCase::new(
        SlowReader {
            inner: repository.clone(),
            delay: Duration::from_secs(5),
        },
        repository,
        CapturingReporter::default(),
    );

    let config = CollectConfig::builder()
        .request_timeout(Some(Duration::from_millis(20)))
        .build()
        .unwrap();
    let result = use_case
        .execute(&session(config), request(vec![dep("g:a:jar:1.0")]))
        .await
        .unwrap();

    assert_eq!(only(result.root(), "a").kind(), NodeKind::Unresolved);
    assert_eq!(result.errors().len(), 1);
    assert!(result.errors()[0].to_string().contains("Timed out"));
}

#[tokio::test]
async fn test_repeated_collection_is_identical() {
    let (use_case, _) = collector(diamond());
    let deps = vec![dep("g:a:jar:1.0"), dep("g:b:jar:1.0")];

    let first = use_case
        .execute(&session(skipping()), request(deps.clone()))
        .await
        .unwrap();
    let second = use_case
        .execute(&session(skipping()), request(deps))
        .await
        .unwrap();

    assert_eq!(first.dump(), second.dump());
    assert_eq!(first.stats(), second.stats());
}

#[tokio::test]
async fn test_collect_through_inbound_port() {
    let (use_case, reporter) = collector(diamond());
    let port: &dyn DependencyCollectionPort = &use_case;

    let result = port
        .collect(&CollectSession::default(), request(vec![dep("g:a:jar:1.0")]))
        .await
        .unwrap();

    assert_eq!(result.stats().nodes, 3);
    assert!(reporter
        .messages()
        .iter()
        .any(|m| m.starts_with("✅ Collected 3 node(s)")));
}

#[tokio::test]
async fn test_collection_runs_on_spawned_task() {
    let (use_case, _) = collector(diamond());
    let port: Arc<dyn DependencyCollectionPort> = Arc::new(use_case);

    let handle = tokio::spawn(async move {
        port.collect(&CollectSession::default(), request(vec![dep("g:a:jar:1.0")]))
            .await
    });

    let result = handle.await.unwrap().unwrap();
    assert_eq!(result.stats().nodes, 3);
}

#[tokio::test]
async fn test_listed_version_without_descriptor_fails_branch() {
    let key = Artifact::parse("g:b:jar:1.0").unwrap().key().clone();
    let repository = InMemoryRepository::new()
        .with_descriptor(descriptor("g:a:jar:1.0", vec![dep("g:b:jar:[1.0,)")]))
        .with_available_version(key, Version::new("1.0").unwrap());
    let (use_case, _) = collector(repository);

    let result = use_case
        .execute(&CollectSession::default(), request(vec![dep("g:a:jar:1.0")]))
        .await
        .unwrap();

    let b = only(only(result.root(), "a"), "b");
    assert_eq!(version_of(b), "1.0");
    assert_eq!(b.kind(), NodeKind::Unresolved);
    assert!(matches!(
        result.errors()[0],
        CollectError::BranchDescriptorFailure { .. }
    ));
}
