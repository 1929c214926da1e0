//! Default body generator.

use tracing::debug;

use crate::cancel::CancellationToken;
use crate::ports::{BodyFuture, BodyGenerator};
use crate::syntax::MethodPath;
use crate::workspace::Document;

/// Leaves the method body as it is.
///
/// Used when no property-matching generator is wired in; a freshly
/// inserted `Map` method keeps its "not implemented" placeholder.
#[derive(Debug, Default)]
pub struct StubBodyGenerator;

impl BodyGenerator for StubBodyGenerator {
    fn generate_body<'a>(
        &'a self,
        document: &'a Document,
        method: &'a MethodPath,
        cancel: &'a CancellationToken,
    ) -> BodyFuture<'a> {
        Box::pin(async move {
            cancel.ensure_not_cancelled()?;
            debug!(class = %method.class.name, method = %method.name, "keeping existing body");
            Ok(document.clone())
        })
    }
}
