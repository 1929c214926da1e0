//! The code action an editor offers on a target class.

use tracing::debug;

use super::{synthesize, SynthesisOutcome, SynthesisRequest};
use crate::cancel::CancellationToken;
use crate::config::SynthesisConfig;
use crate::context::ServiceContext;
use crate::error::SynthesisError;
use crate::naming::{TargetClass, TypePair};
use crate::workspace::{DocumentId, Workspace};

/// Title shown for the action.
pub const TITLE: &str = "Mapping: Create mapping properties";

/// A mapping request bound to the document and class it was offered on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingCodeAction {
    request: SynthesisRequest,
}

impl MappingCodeAction {
    /// Binds the action to `target_class` inside document `origin`.
    ///
    /// When `source_type` is `None` the source is read from a
    /// `// MappingSource: <Type>` comment above the class.
    ///
    /// # Errors
    ///
    /// Returns `UnknownDocument` if `origin` is not in `workspace`,
    /// `TargetClassNotFound` if the document declares no such class, and
    /// `MissingMappingSource` if no source type is available.
    pub fn new(
        workspace: &Workspace,
        origin: DocumentId,
        target_class: &str,
        source_type: Option<&str>,
    ) -> Result<Self, SynthesisError> {
        let document = workspace.require(origin)?;
        let (namespace, class) = document.root.find_class(target_class).ok_or_else(|| {
            SynthesisError::TargetClassNotFound {
                class: target_class.to_string(),
                path: document.path.clone(),
            }
        })?;

        let source = source_type
            .or_else(|| class.mapping_source_from_comments())
            .ok_or_else(|| SynthesisError::MissingMappingSource(class.name.clone()))?;
        debug!(source, target = %class.name, "mapping action bound");

        let pair = TypePair::new(source, TargetClass::new(class.name.clone(), namespace));
        Ok(Self { request: SynthesisRequest { origin: Some(origin), pair } })
    }

    /// Title to present to the user.
    #[must_use]
    pub fn title(&self) -> &'static str {
        TITLE
    }

    /// The type pair this action synthesizes a mapper for.
    #[must_use]
    pub fn pair(&self) -> &TypePair {
        &self.request.pair
    }

    /// Runs synthesis and returns the outcome, whose edit-set the caller
    /// applies atomically.
    ///
    /// # Errors
    ///
    /// See [`synthesize`].
    pub async fn compute_edits(
        &self,
        ctx: &ServiceContext,
        config: &SynthesisConfig,
        workspace: &Workspace,
        cancel: &CancellationToken,
    ) -> Result<SynthesisOutcome, SynthesisError> {
        synthesize(ctx, config, workspace, &self.request, cancel).await
    }
}
