//! Mapper synthesis: from a type pair to a committed workspace snapshot.
//!
//! A request runs these steps against immutable snapshots:
//!
//! 1. derive the mapper identity from the type pair,
//! 2. find or fork the mapping document,
//! 3. find or create its namespace,
//! 4. find or create the mapper class tagged with the mapping capability,
//! 5. find or create the `Map` method stub,
//! 6. hand the document to the body generator,
//! 7. diff the result against the originating snapshot.
//!
//! Steps 3-5 are folded into one root and committed together. Every step is
//! a no-op when its node already exists, so running a request twice leaves
//! the second run with an empty edit-set (given a body generator that is
//! itself idempotent).
//!
//! Cancellation is checked before each commit. A cancelled request returns
//! [`SynthesisError::Cancelled`] and the caller keeps its own snapshot,
//! which no step ever mutates.

pub mod action;
pub mod edit;
pub mod stub;

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::cancel::CancellationToken;
use crate::config::SynthesisConfig;
use crate::context::ServiceContext;
use crate::error::SynthesisError;
use crate::naming::{MapperIdentity, TypePair};
use crate::syntax::locate::{
    find_method, get_or_create_class, get_or_create_namespace, insert_method, Acquired,
};
use crate::syntax::{ClassPath, MappingCapability, MethodDecl, MethodPath};
use crate::workspace::fork::acquire_mapping_document;
use crate::workspace::{Document, DocumentId, Workspace};

pub use edit::{DocumentEdit, EditKind, EditSet};
pub use stub::{has_pair_signature, map_method_stub, MAP_ARITY};

/// What to synthesize and where the request came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesisRequest {
    /// Document the trigger fired in, if any.
    pub origin: Option<DocumentId>,
    /// Source type and target class.
    pub pair: TypePair,
}

/// Outcome of the body generation step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BodyStatus {
    /// The generator returned a document and it was committed.
    Generated,
    /// The generator failed; the method keeps its previous body.
    Failed {
        /// Generator error message.
        reason: String,
    },
}

/// Which find-or-create branch each step took.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SynthesisReport {
    /// Mapping document.
    pub file: Acquired,
    /// Namespace inside the mapping document.
    pub namespace: Acquired,
    /// Mapper class.
    pub class: Acquired,
    /// `Map` method.
    pub method: Acquired,
}

impl SynthesisReport {
    /// Returns `true` when every node already existed.
    #[must_use]
    pub fn all_reused(&self) -> bool {
        [self.file, self.namespace, self.class, self.method]
            .iter()
            .all(|a| *a == Acquired::Reused)
    }
}

/// Result of a completed synthesis request.
#[derive(Debug, Clone)]
pub struct SynthesisOutcome {
    /// Snapshot with every committed change.
    pub workspace: Workspace,
    /// Mapping document id.
    pub document: DocumentId,
    /// Address of the `Map` method in the final snapshot.
    pub method: MethodPath,
    /// Names of the generated mapper.
    pub identity: MapperIdentity,
    /// Branches taken.
    pub report: SynthesisReport,
    /// Body generation result.
    pub body: BodyStatus,
    /// Documents added or changed relative to the originating snapshot.
    pub edits: EditSet,
}

impl SynthesisOutcome {
    /// The `Map` method as it stands in the final snapshot.
    #[must_use]
    pub fn method_decl(&self) -> Option<&MethodDecl> {
        self.workspace.document(self.document)?.root.method(&self.method)
    }

    /// Returns `true` while the `Map` method still only signals "not implemented".
    #[must_use]
    pub fn is_stub(&self) -> bool {
        self.method_decl().is_some_and(MethodDecl::is_stub)
    }
}

/// Resolves a method through namespace, class and method lookups in one go.
///
/// Uses the document's first namespace, the one the mapping steps create.
#[must_use]
pub fn resolve_method(
    document: &Document,
    class_name: &str,
    name: &str,
    arity: usize,
) -> Option<MethodPath> {
    let class = ClassPath { namespace: document.root.first_namespace()?, name: class_name.into() };
    find_method(&document.root, &class, name, arity)
}

/// Runs a synthesis request against `workspace`.
///
/// `workspace` itself is never modified; the returned outcome carries the
/// new snapshot and the edit-set that turns one into the other.
///
/// # Errors
///
/// Returns `Cancelled` if `cancel` fires before the last commit,
/// `StaleHandle` if a node created by an earlier step no longer resolves,
/// `BodyGeneratorContract` if the body generator returns another document
/// or drops the method, and `DuplicateDocument` if the id generator hands
/// out an id already in use.
#[tracing::instrument(
    level = "info",
    skip_all,
    fields(source = %request.pair.source_type_name, target = %request.pair.target.name)
)]
pub async fn synthesize(
    ctx: &ServiceContext,
    config: &SynthesisConfig,
    workspace: &Workspace,
    request: &SynthesisRequest,
    cancel: &CancellationToken,
) -> Result<SynthesisOutcome, SynthesisError> {
    let pair = &request.pair;
    let identity = pair.identity();
    cancel.ensure_not_cancelled()?;

    let mapping = acquire_mapping_document(
        workspace,
        config,
        &identity.class_name,
        ctx.id_gen.as_ref(),
        request.origin,
    )?;
    let document_id = mapping.document;
    let document = Arc::clone(mapping.workspace.require(document_id)?);

    let namespace = get_or_create_namespace(&document.root, &config.namespace);
    debug!(branch = ?namespace.acquired, "namespace");

    let capability = MappingCapability::new(
        pair.source_type_name.clone(),
        identity.qualified_target_name.clone(),
    );
    let class =
        get_or_create_class(&namespace.root, namespace.path, &identity.class_name, &capability)
            .ok_or_else(|| stale("namespace", &config.namespace, &document))?;
    debug!(branch = ?class.acquired, class = %identity.class_name, "class");

    let (root, method_acquired) =
        match find_method(&class.root, &class.path, &config.method_name, MAP_ARITY) {
            Some(existing) => {
                if let Some(decl) = class.root.method(&existing) {
                    if !has_pair_signature(decl, pair) {
                        warn!(
                            class = %identity.class_name,
                            method = %config.method_name,
                            "reusing mapping method whose parameter types differ from the type pair"
                        );
                    }
                }
                (class.root, Acquired::Reused)
            }
            None => {
                let stub = map_method_stub(pair, &config.method_name);
                let (root, _) = insert_method(&class.root, &class.path, stub)
                    .ok_or_else(|| stale("class", &identity.class_name, &document))?;
                (root, Acquired::Created)
            }
        };
    debug!(branch = ?method_acquired, method = %config.method_name, "method");

    cancel.ensure_not_cancelled()?;
    let mut committed = mapping.workspace.with_document_root(document_id, root)?;

    // Handles from before the commit are re-resolved against the new root.
    let document = Arc::clone(committed.require(document_id)?);
    let method = find_method(&document.root, &class.path, &config.method_name, MAP_ARITY)
        .ok_or_else(|| stale("method", &config.method_name, &document))?;

    cancel.ensure_not_cancelled()?;
    let body = match ctx.body.generate_body(&document, &method, cancel).await {
        Ok(generated) => {
            cancel.ensure_not_cancelled()?;
            check_contract(&generated, &document, &method)?;
            committed = committed.with_document_root(document_id, Arc::clone(&generated.root))?;
            BodyStatus::Generated
        }
        Err(_) if cancel.is_cancelled() => return Err(SynthesisError::Cancelled),
        Err(e) => {
            warn!(
                error = %e,
                class = %identity.class_name,
                "body generation failed; keeping existing body"
            );
            BodyStatus::Failed { reason: e.to_string() }
        }
    };

    let report = SynthesisReport {
        file: mapping.acquired,
        namespace: namespace.acquired,
        class: class.acquired,
        method: method_acquired,
    };
    let edits = EditSet::between(workspace, &committed);
    info!(edits = edits.edits.len(), ?report, "synthesis complete");

    Ok(SynthesisOutcome {
        workspace: committed,
        document: document_id,
        method,
        identity,
        report,
        body,
        edits,
    })
}

fn stale(kind: &'static str, name: &str, document: &Document) -> SynthesisError {
    SynthesisError::StaleHandle { kind, name: name.to_string(), path: document.path.clone() }
}

fn check_contract(
    generated: &Document,
    submitted: &Document,
    method: &MethodPath,
) -> Result<(), SynthesisError> {
    if generated.id != submitted.id {
        return Err(SynthesisError::BodyGeneratorContract(format!(
            "returned document {} for request on {}",
            generated.id, submitted.id
        )));
    }
    if generated.root.method(method).is_none() {
        return Err(SynthesisError::BodyGeneratorContract(format!(
            "method {}.{} is missing from the returned document",
            method.class.name, method.name
        )));
    }
    Ok(())
}
