//! Body generator port: fills in the copy logic of a `Map` method.

use std::error::Error;
use std::future::Future;
use std::pin::Pin;

use crate::cancel::CancellationToken;
use crate::syntax::MethodPath;
use crate::workspace::Document;

/// Boxed future type alias used by [`BodyGenerator`] to keep the trait dyn-compatible.
pub type BodyFuture<'a> =
    Pin<Box<dyn Future<Output = Result<Document, Box<dyn Error + Send + Sync>>> + Send + 'a>>;

/// Generates the body of a mapping method.
///
/// How properties are matched and assigned is entirely up to the
/// implementation. The returned document must be the same document (same
/// id) and must still contain a method at `method`.
pub trait BodyGenerator: Send + Sync {
    /// Returns `document` with the body of the method at `method` regenerated.
    ///
    /// Implementations should poll `cancel` at their own suspension points.
    ///
    /// # Errors
    ///
    /// Returns an error if the body cannot be generated; the caller keeps
    /// the existing body.
    fn generate_body<'a>(
        &'a self,
        document: &'a Document,
        method: &'a MethodPath,
        cancel: &'a CancellationToken,
    ) -> BodyFuture<'a>;
}
