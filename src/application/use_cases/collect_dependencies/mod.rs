mod frontier;

use self::frontier::{FrontierUnit, NodeArena, NodeSlot, PendingExpansion};
use super::resolve_version_constraint::{VersionConstraintResolver, VersionResolution};
use crate::application::dto::{CollectRequest, CollectSession};
use crate::dependency_collection::domain::{
    merge_repositories, Artifact, CollectResult, CollectStats, Dependency, ExclusionSet,
    ManagedDependency, ManagementConflict, NodeId, NodeKind, RemoteRepository, VersionConstraint,
};
use crate::dependency_collection::policies::{
    DependencyManager, ManagementContext, ScopeDeriver, SelectionContext, SelectorChain,
};
use crate::dependency_collection::services::{SkipDecision, Skipper, SkipperSignature};
use crate::ports::inbound::DependencyCollectionPort;
use crate::ports::outbound::{
    ArtifactDescriptor, DescriptorReader, ProgressReporter, VersionRangeResolver,
};
use crate::shared::error::CollectError;
use crate::shared::Result;
use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Longest relocation chain followed before giving up
pub const MAX_RELOCATIONS: usize = 16;

/// CollectDependenciesUseCase - breadth-first dependency collection
///
/// Builds the raw dependency tree level by level. Within a level, version
/// resolution and descriptor reads run concurrently (bounded by
/// `max_concurrency`) while node creation, cycle checks and skipper claims
/// happen in declaration order, so the resulting tree is deterministic.
///
/// # Type Parameters
/// * `DR` - DescriptorReader implementation
/// * `VR` - VersionRangeResolver implementation
/// * `PR` - ProgressReporter implementation
pub struct CollectDependenciesUseCase<DR, VR, PR> {
    descriptor_reader: DR,
    version_resolver: VR,
    progress_reporter: PR,
}

/// Per-call counters; updated from concurrently polled futures
#[derive(Debug, Default)]
struct StatsRecorder {
    levels: AtomicUsize,
    nodes: AtomicUsize,
    duplicates: AtomicUsize,
    cycles: AtomicUsize,
    descriptor_reads: AtomicUsize,
    version_resolutions: AtomicUsize,
    relocations: AtomicUsize,
}

impl StatsRecorder {
    fn bump(counter: &AtomicUsize) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    fn snapshot(&self, skipper: &Skipper) -> CollectStats {
        CollectStats {
            levels: self.levels.load(Ordering::Relaxed),
            nodes: self.nodes.load(Ordering::Relaxed),
            duplicates: self.duplicates.load(Ordering::Relaxed),
            cycles: self.cycles.load(Ordering::Relaxed),
            skipper_hits: skipper.hits(),
            skipper_misses: skipper.misses(),
            descriptor_reads: self.descriptor_reads.load(Ordering::Relaxed),
            version_resolutions: self.version_resolutions.load(Ordering::Relaxed),
            relocations: self.relocations.load(Ordering::Relaxed),
        }
    }
}

/// Descriptor at the end of a relocation chain
struct RelocatedDescriptor {
    descriptor: ArtifactDescriptor,
    /// Artifacts relocated away from, oldest first
    relocations: Vec<Artifact>,
}

/// Mutable state of one collection call
struct Collection {
    arena: NodeArena,
    root: NodeId,
    errors: Vec<CollectError>,
    conflicts: Vec<ManagementConflict>,
    stats: StatsRecorder,
    skipper: Skipper,
    /// Expansion context of every node marked as a duplicate
    duplicates: Vec<PendingExpansion>,
}

impl Collection {
    fn into_result(self, complete: bool) -> CollectResult {
        CollectResult {
            root: self.arena.materialize(self.root),
            stats: self.stats.snapshot(&self.skipper),
            errors: self.errors,
            conflicts: self.conflicts,
            complete,
        }
    }
}

/// What the traversal starts from once the root is settled
struct RootExpansion {
    dependencies: Vec<Dependency>,
    management: Arc<ManagementContext>,
    exclusions: Arc<ExclusionSet>,
    repositories: Arc<Vec<RemoteRepository>>,
}

impl<DR, VR, PR> CollectDependenciesUseCase<DR, VR, PR>
where
    DR: DescriptorReader,
    VR: VersionRangeResolver,
    PR: ProgressReporter,
{
    /// Creates a new CollectDependenciesUseCase with injected dependencies
    pub fn new(descriptor_reader: DR, version_resolver: VR, progress_reporter: PR) -> Self {
        Self {
            descriptor_reader,
            version_resolver,
            progress_reporter,
        }
    }

    /// Executes the collection
    ///
    /// # Arguments
    /// * `session` - Configuration snapshot and cancellation handle
    /// * `request` - Root, direct and managed dependencies, repositories
    ///
    /// # Returns
    /// The raw dependency tree with recoverable errors, management conflicts
    /// and statistics
    ///
    /// # Errors
    /// Returns `CollectError::RootResolutionFailure` when the root
    /// dependency's version or descriptor cannot be resolved
    pub async fn execute(
        &self,
        session: &CollectSession,
        request: CollectRequest,
    ) -> Result<CollectResult> {
        let config = session.config();
        let selector = SelectorChain::new(config.include_optional(), config.accepted_scopes().clone());
        let manager = DependencyManager::new(config.dependency_manager());

        let (arena, root) = NodeArena::with_root(
            request.root().cloned(),
            request.root_artifact().cloned(),
        );
        let mut collection = Collection {
            arena,
            root,
            errors: Vec::new(),
            conflicts: Vec::new(),
            stats: StatsRecorder::default(),
            skipper: Skipper::new(config.skipper_enabled()),
            duplicates: Vec::new(),
        };

        self.progress_reporter.report(&format!(
            "🔍 Collecting dependencies of {}",
            root_label(&request)
        ));

        // Step 1: Settle the root and the first level
        let start = self.expand_root(session, &request, &mut collection).await?;
        let mut frontier: Vec<FrontierUnit> = start
            .dependencies
            .iter()
            .map(|dependency| {
                let outcome = manager.manage(dependency, &start.management, 1);
                let scope = ScopeDeriver::derive(None, outcome.dependency.scope());
                FrontierUnit {
                    parent: collection.root,
                    dependency: outcome.dependency.with_scope(scope),
                    premanaged: outcome.premanaged,
                    declared_scope: dependency.scope(),
                    declared_optional: dependency.is_optional(),
                    exclusions: Arc::clone(&start.exclusions),
                    management: Arc::clone(&start.management),
                    repositories: Arc::clone(&start.repositories),
                    depth: 1,
                }
            })
            .collect();

        // Step 2: Process levels until the frontier is empty and no
        // duplicate needs expanding
        let mut complete = true;
        let mut level = 0;
        loop {
            let reclaimed = if frontier.is_empty() {
                let reclaimed = self.reclaim_duplicates(&mut collection);
                if reclaimed.is_empty() {
                    break;
                }
                reclaimed
            } else {
                Vec::new()
            };

            if session.is_cancelled() {
                self.progress_reporter.report_error(&format!(
                    "⚠️  Warning: Collection cancelled before level {}; the result is incomplete.",
                    level + 1
                ));
                complete = false;
                break;
            }
            level += 1;
            StatsRecorder::bump(&collection.stats.levels);

            frontier = if reclaimed.is_empty() {
                self.progress_reporter.report(&format!(
                    "📦 Level {}: {} dependenc(ies)",
                    level,
                    frontier.len()
                ));
                self.process_level(session, &selector, &manager, &mut collection, frontier)
                    .await
            } else {
                self.progress_reporter.report(&format!(
                    "📦 Level {}: re-expanding {} duplicate(s) with different ancestors",
                    level,
                    reclaimed.len()
                ));
                self.expand_pending(session, &manager, &mut collection, reclaimed)
                    .await
            };

            let queued = format!("{} dependenc(ies) queued", frontier.len());
            let total = level + usize::from(!frontier.is_empty());
            self.progress_reporter
                .report_progress(level, total, Some(&queued));
        }

        // Step 3: Report and materialize
        let result = collection.into_result(complete);
        if !result.errors().is_empty() {
            self.progress_reporter.report_error(&format!(
                "⚠️  Warning: {} branch(es) could not be collected.",
                result.errors().len()
            ));
        }
        self.progress_reporter.report_completion(&format!(
            "✅ Collected {} node(s) in {} level(s) ({} duplicate(s), {} cycle(s))",
            result.stats().nodes,
            result.stats().levels,
            result.stats().duplicates,
            result.stats().cycles
        ));

        Ok(result)
    }

    /// Resolves and reads the root dependency when there is one, and builds
    /// the management context, exclusions and repositories for level 1
    async fn expand_root(
        &self,
        session: &CollectSession,
        request: &CollectRequest,
        collection: &mut Collection,
    ) -> Result<RootExpansion> {
        let config = session.config();
        let timeout = config.request_timeout();
        let mut repositories = request.repositories().to_vec();

        let Some(root) = request.root() else {
            let (management, conflicts) = root_management(request.managed_dependencies());
            self.record_conflicts(collection, conflicts);
            return Ok(RootExpansion {
                dependencies: request.dependencies().to_vec(),
                management,
                exclusions: Arc::new(ExclusionSet::new()),
                repositories: Arc::new(repositories),
            });
        };

        let resolution = self
            .resolve_version(root.artifact(), &repositories, timeout, &collection.stats)
            .await;
        let resolution = match resolution {
            Ok(resolution) => resolution,
            Err(e) => return Err(root_failure(RootStep::Version, root.artifact(), e, collection)),
        };
        let Some(candidate) = resolution.highest().cloned() else {
            let e = anyhow::anyhow!("No candidate version for {}", root.artifact());
            return Err(root_failure(RootStep::Version, root.artifact(), e, collection));
        };

        let resolved_root = root.clone().with_version(candidate.version().as_str());
        let resolved = resolved_root.artifact().clone();
        {
            let slot = collection.arena.slot_mut(collection.root);
            slot.dependency = Some(resolved_root);
            slot.version_constraint = Some(resolution.constraint.clone());
            slot.repository = candidate.repository().cloned();
        }
        StatsRecorder::bump(&collection.stats.nodes);

        let read = self
            .read_descriptor(&resolved, &repositories, timeout, &collection.stats)
            .await;
        let relocated = match read {
            Ok(relocated) => relocated,
            Err(e) => return Err(root_failure(RootStep::Descriptor, &resolved, e, collection)),
        };
        let root_id = collection.root;
        self.apply_relocation(collection, root_id, &relocated);

        let descriptor = relocated.descriptor;
        let dependencies = merge_direct_dependencies(&descriptor.dependencies, request.dependencies());
        let managed = config
            .management_precedence()
            .order(request.managed_dependencies(), &descriptor.managed_dependencies);
        let (management, conflicts) = root_management(&managed);
        self.record_conflicts(collection, conflicts);
        repositories = merge_repositories(&repositories, &descriptor.repositories);

        Ok(RootExpansion {
            dependencies,
            management,
            exclusions: Arc::new(root.exclusions().clone()),
            repositories: Arc::new(repositories),
        })
    }

    /// Runs one level and returns the next frontier
    async fn process_level(
        &self,
        session: &CollectSession,
        selector: &SelectorChain,
        manager: &DependencyManager,
        collection: &mut Collection,
        frontier: Vec<FrontierUnit>,
    ) -> Vec<FrontierUnit> {
        let config = session.config();
        let timeout = config.request_timeout();
        let concurrency = config.max_concurrency();

        // Phase 1: Selection
        let selected: Vec<FrontierUnit> = frontier
            .into_iter()
            .filter(|unit| {
                selector
                    .select(&SelectionContext {
                        dependency: &unit.dependency,
                        declared_scope: unit.declared_scope,
                        declared_optional: unit.declared_optional,
                        depth: unit.depth,
                        exclusions: &unit.exclusions,
                    })
                    .is_accepted()
            })
            .collect();

        // Phase 2: Version resolution (concurrent, results in order)
        let stats = &collection.stats;
        let calls: Vec<_> = selected
            .iter()
            .map(|unit| {
                self.resolve_version(unit.dependency.artifact(), &unit.repositories, timeout, stats)
            })
            .collect();
        let resolutions: Vec<Result<VersionResolution>> =
            stream::iter(calls).buffered(concurrency).collect().await;

        // Phase 3: Node creation, cycle check, depth guard, skipper claim
        let mut pending = Vec::new();
        for (unit, resolution) in selected.into_iter().zip(resolutions) {
            match resolution {
                Ok(resolution) => {
                    self.create_nodes(session, collection, &unit, &resolution, &mut pending)
                }
                Err(e) => self.record_range_failure(collection, &unit, e),
            }
        }

        self.expand_pending(session, manager, collection, pending)
            .await
    }

    /// Reads the descriptors of claimed nodes and returns their children
    async fn expand_pending(
        &self,
        session: &CollectSession,
        manager: &DependencyManager,
        collection: &mut Collection,
        pending: Vec<PendingExpansion>,
    ) -> Vec<FrontierUnit> {
        let config = session.config();
        let timeout = config.request_timeout();

        // Phase 4: Descriptor reads (concurrent, results in order)
        let stats = &collection.stats;
        let calls: Vec<_> = pending
            .iter()
            .map(|expansion| {
                self.read_descriptor(&expansion.artifact, &expansion.repositories, timeout, stats)
            })
            .collect();
        let descriptors: Vec<Result<RelocatedDescriptor>> = stream::iter(calls)
            .buffered(config.max_concurrency())
            .collect()
            .await;

        // Phase 5: Children for the next level
        let mut next = Vec::new();
        for (expansion, read) in pending.into_iter().zip(descriptors) {
            match read {
                Ok(relocated) => {
                    self.apply_relocation(collection, expansion.id, &relocated);
                    if collection.arena.relocated_into_path(expansion.id) {
                        collection.arena.slot_mut(expansion.id).kind = NodeKind::Cycle;
                        StatsRecorder::bump(&collection.stats.cycles);
                        continue;
                    }
                    self.enqueue_children(
                        manager,
                        collection,
                        &expansion,
                        relocated.descriptor,
                        &mut next,
                    );
                }
                Err(e) => self.record_descriptor_failure(collection, &expansion, e),
            }
        }
        next
    }

    fn create_nodes(
        &self,
        session: &CollectSession,
        collection: &mut Collection,
        unit: &FrontierUnit,
        resolution: &VersionResolution,
        pending: &mut Vec<PendingExpansion>,
    ) {
        let config = session.config();

        for candidate in resolution.selected(config.use_range_resolution()) {
            let dependency = unit
                .dependency
                .clone()
                .with_version(candidate.version().as_str());
            let artifact = dependency.artifact().clone();

            let mut slot = NodeSlot::new(dependency.clone(), unit.premanaged.clone(), unit.depth);
            slot.version_constraint = Some(resolution.constraint.clone());
            slot.repository = candidate.repository().cloned();
            let id = collection.arena.add_child(unit.parent, slot);
            StatsRecorder::bump(&collection.stats.nodes);

            if collection.arena.path_contains(unit.parent, artifact.key()) {
                collection.arena.slot_mut(id).kind = NodeKind::Cycle;
                StatsRecorder::bump(&collection.stats.cycles);
                continue;
            }

            if config.max_depth().is_some_and(|max| unit.depth >= max) {
                collection.arena.slot_mut(id).kind = NodeKind::DepthLimited;
                self.progress_reporter.report_error(&format!(
                    "⚠️  Warning: Depth limit reached at {}; its dependencies were not collected.",
                    artifact
                ));
                continue;
            }

            let mut child_exclusions = ExclusionSet::clone(&unit.exclusions);
            child_exclusions.extend(dependency.exclusions().iter().cloned());
            let child_exclusions = Arc::new(child_exclusions);

            let signature = SkipperSignature {
                artifact: artifact.clone(),
                scope: dependency.scope(),
                optional: dependency.is_optional(),
                exclusions: Arc::clone(&child_exclusions),
                management: Arc::clone(&unit.management),
                repositories: Arc::clone(&unit.repositories),
                depth_tier: match config.max_depth() {
                    Some(_) => unit.depth,
                    None => unit.depth.min(2),
                },
            };
            let expansion = PendingExpansion {
                id,
                artifact,
                scope: dependency.scope(),
                child_exclusions,
                management: Arc::clone(&unit.management),
                repositories: Arc::clone(&unit.repositories),
                depth: unit.depth,
            };

            match collection.skipper.claim(signature, id) {
                SkipDecision::Duplicate(of) => {
                    collection.arena.slot_mut(id).kind = NodeKind::Duplicate { of };
                    StatsRecorder::bump(&collection.stats.duplicates);
                    collection.duplicates.push(expansion);
                }
                SkipDecision::Expand => pending.push(expansion),
            }
        }
    }

    /// Turns duplicates back into expansions when the subtree they point at
    /// would come out differently under their own ancestors
    fn reclaim_duplicates(&self, collection: &mut Collection) -> Vec<PendingExpansion> {
        let mut reclaimed = Vec::new();
        for expansion in std::mem::take(&mut collection.duplicates) {
            let NodeKind::Duplicate { of } = collection.arena.slot(expansion.id).kind else {
                continue;
            };
            if collection.arena.shares_ancestry(of, expansion.id) {
                collection.duplicates.push(expansion);
                continue;
            }
            collection.arena.slot_mut(expansion.id).kind = NodeKind::Resolved;
            collection.stats.duplicates.fetch_sub(1, Ordering::Relaxed);
            reclaimed.push(expansion);
        }
        reclaimed
    }

    fn enqueue_children(
        &self,
        manager: &DependencyManager,
        collection: &mut Collection,
        expansion: &PendingExpansion,
        descriptor: ArtifactDescriptor,
        next: &mut Vec<FrontierUnit>,
    ) {
        let (management, conflicts) = manager.derive_child_context(
            &expansion.management,
            expansion.depth,
            &descriptor.managed_dependencies,
        );
        self.record_conflicts(collection, conflicts);

        let repositories = if descriptor.repositories.is_empty() {
            Arc::clone(&expansion.repositories)
        } else {
            Arc::new(merge_repositories(
                &expansion.repositories,
                &descriptor.repositories,
            ))
        };

        let depth = expansion.depth + 1;
        for declared in &descriptor.dependencies {
            let outcome = manager.manage(declared, &management, depth);
            let scope = ScopeDeriver::derive(Some(expansion.scope), outcome.dependency.scope());
            next.push(FrontierUnit {
                parent: expansion.id,
                dependency: outcome.dependency.with_scope(scope),
                premanaged: outcome.premanaged,
                declared_scope: declared.scope(),
                declared_optional: declared.is_optional(),
                exclusions: Arc::clone(&expansion.child_exclusions),
                management: Arc::clone(&management),
                repositories: Arc::clone(&repositories),
                depth,
            });
        }
    }

    fn apply_relocation(&self, collection: &mut Collection, id: NodeId, relocated: &RelocatedDescriptor) {
        let slot = collection.arena.slot_mut(id);
        if slot.repository.is_none() {
            slot.repository = relocated.descriptor.repository.clone();
        }
        if relocated.relocations.is_empty() {
            return;
        }

        let target = relocated.descriptor.artifact.clone();
        slot.relocations = relocated.relocations.clone();
        slot.dependency = slot
            .dependency
            .take()
            .map(|dependency| dependency.with_artifact(target.clone()));
        collection
            .stats
            .relocations
            .fetch_add(relocated.relocations.len(), Ordering::Relaxed);

        self.progress_reporter.report(&format!(
            "↪️  {} relocated to {}",
            relocated.relocations[0], target
        ));
    }

    fn record_range_failure(&self, collection: &mut Collection, unit: &FrontierUnit, e: anyhow::Error) {
        let mut slot = NodeSlot::new(unit.dependency.clone(), unit.premanaged.clone(), unit.depth);
        slot.kind = NodeKind::Unresolved;
        slot.version_constraint = VersionConstraint::parse(unit.dependency.artifact().version()).ok();
        let id = collection.arena.add_child(unit.parent, slot);
        StatsRecorder::bump(&collection.stats.nodes);

        let error = CollectError::RangeResolutionFailure {
            artifact: unit.dependency.artifact().key().to_string(),
            constraint: unit.dependency.artifact().version().to_string(),
            path: collection.arena.path(id),
            details: e.to_string(),
        };
        self.progress_reporter.report_error(&format!(
            "⚠️  Warning: Could not resolve version {} of {}: {}",
            unit.dependency.artifact().version(),
            unit.dependency.artifact().key(),
            e
        ));
        collection.errors.push(error);
    }

    fn record_descriptor_failure(
        &self,
        collection: &mut Collection,
        expansion: &PendingExpansion,
        e: anyhow::Error,
    ) {
        collection.arena.slot_mut(expansion.id).kind = NodeKind::Unresolved;

        let error = CollectError::BranchDescriptorFailure {
            artifact: expansion.artifact.to_string(),
            path: collection.arena.path(expansion.id),
            details: e.to_string(),
        };
        self.progress_reporter.report_error(&format!(
            "⚠️  Warning: Could not read descriptor of {}: {}",
            expansion.artifact, e
        ));
        collection.errors.push(error);
    }

    fn record_conflicts(&self, collection: &mut Collection, conflicts: Vec<ManagementConflict>) {
        for conflict in conflicts {
            self.progress_reporter
                .report_error(&format!("⚠️  Warning: Management conflict: {}", conflict));
            collection.conflicts.push(conflict);
        }
    }

    async fn resolve_version(
        &self,
        artifact: &Artifact,
        repositories: &[RemoteRepository],
        timeout: Option<Duration>,
        stats: &StatsRecorder,
    ) -> Result<VersionResolution> {
        StatsRecorder::bump(&stats.version_resolutions);
        let resolver = VersionConstraintResolver::new(&self.version_resolver);
        with_timeout(
            timeout,
            "resolving the version of",
            artifact,
            resolver.resolve(artifact, repositories),
        )
        .await
    }

    /// Reads a descriptor and follows its relocation chain
    async fn read_descriptor(
        &self,
        artifact: &Artifact,
        repositories: &[RemoteRepository],
        timeout: Option<Duration>,
        stats: &StatsRecorder,
    ) -> Result<RelocatedDescriptor> {
        let mut current = artifact.clone();
        let mut relocations: Vec<Artifact> = Vec::new();

        loop {
            StatsRecorder::bump(&stats.descriptor_reads);
            let descriptor = with_timeout(
                timeout,
                "reading the descriptor of",
                &current,
                self.descriptor_reader.read_descriptor(&current, repositories),
            )
            .await?;

            let Some(target) = descriptor.relocated_to.clone() else {
                return Ok(RelocatedDescriptor {
                    descriptor,
                    relocations,
                });
            };

            if target == current || target == *artifact || relocations.contains(&target) {
                return Err(CollectError::DescriptorUnavailable {
                    artifact: artifact.to_string(),
                    details: format!("relocation loop at {}", target),
                }
                .into());
            }
            if relocations.len() >= MAX_RELOCATIONS {
                return Err(CollectError::DescriptorUnavailable {
                    artifact: artifact.to_string(),
                    details: format!("more than {} relocations", MAX_RELOCATIONS),
                }
                .into());
            }

            relocations.push(current);
            current = target;
        }
    }
}

#[async_trait]
impl<DR, VR, PR> DependencyCollectionPort for CollectDependenciesUseCase<DR, VR, PR>
where
    DR: DescriptorReader,
    VR: VersionRangeResolver,
    PR: ProgressReporter,
{
    async fn collect(
        &self,
        session: &CollectSession,
        request: CollectRequest,
    ) -> Result<CollectResult> {
        self.execute(session, request).await
    }
}

async fn with_timeout<T>(
    timeout: Option<Duration>,
    operation: &str,
    artifact: &Artifact,
    call: impl Future<Output = Result<T>>,
) -> Result<T> {
    let Some(limit) = timeout else {
        return call.await;
    };
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result,
        Err(_) => Err(CollectError::Timeout {
            operation: operation.to_string(),
            artifact: artifact.to_string(),
            millis: limit.as_millis(),
        }
        .into()),
    }
}

fn root_label(request: &CollectRequest) -> String {
    request
        .root()
        .map(|root| root.artifact().to_string())
        .or_else(|| request.root_artifact().map(Artifact::to_string))
        .unwrap_or_else(|| format!("{} direct dependenc(ies)", request.dependencies().len()))
}

fn root_management(
    managed: &[ManagedDependency],
) -> (Arc<ManagementContext>, Vec<ManagementConflict>) {
    let mut context = ManagementContext::new();
    let conflicts = context.absorb(managed);
    (Arc::new(context), conflicts)
}

/// Descriptor dependencies with request entries substituted on equal
/// versionless key; remaining request entries are appended.
fn merge_direct_dependencies(declared: &[Dependency], requested: &[Dependency]) -> Vec<Dependency> {
    let mut merged: Vec<Dependency> = declared
        .iter()
        .map(|dependency| {
            requested
                .iter()
                .find(|r| r.artifact().key() == dependency.artifact().key())
                .unwrap_or(dependency)
                .clone()
        })
        .collect();

    for dependency in requested {
        if !declared
            .iter()
            .any(|d| d.artifact().key() == dependency.artifact().key())
        {
            merged.push(dependency.clone());
        }
    }
    merged
}

/// Step at which the root could not be settled
enum RootStep {
    Version,
    Descriptor,
}

fn root_failure(
    step: RootStep,
    artifact: &Artifact,
    e: anyhow::Error,
    collection: &mut Collection,
) -> anyhow::Error {
    let root = collection.root;
    collection.arena.slot_mut(root).kind = NodeKind::Unresolved;
    let path = collection.arena.path(root);
    collection.errors.push(match step {
        RootStep::Version => CollectError::RangeResolutionFailure {
            artifact: artifact.key().to_string(),
            constraint: artifact.version().to_string(),
            path,
            details: e.to_string(),
        },
        RootStep::Descriptor => CollectError::BranchDescriptorFailure {
            artifact: artifact.to_string(),
            path,
            details: e.to_string(),
        },
    });

    let partial = CollectResult {
        root: collection.arena.materialize(root),
        errors: std::mem::take(&mut collection.errors),
        conflicts: collection.conflicts.clone(),
        stats: collection.stats.snapshot(&collection.skipper),
        complete: false,
    };

    CollectError::RootResolutionFailure {
        artifact: artifact.to_string(),
        details: e.to_string(),
        partial: Box::new(partial),
    }
    .into()
}

#[cfg(test)]
mod tests;
