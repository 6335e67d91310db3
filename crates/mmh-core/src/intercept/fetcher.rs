use mmh_model::FieldDefaults;

use super::Interception;
use crate::error::TransportError;
use crate::transport::{RequestDescriptor, Transport};

/// Outcome of one reason selection.
#[derive(Debug, Clone, PartialEq)]
pub enum Delivery {
    /// Defaults handed to the form.
    Apply(FieldDefaults),
    /// A newer selection superseded this one; the result was dropped.
    Discarded,
    /// The request was aborted and nothing was fetched.
    Rejected,
    /// The blank option was selected; there is nothing to fetch.
    Skipped,
}

/// Carries out an [`Interception`] decision against a transport.
#[derive(Debug)]
pub struct TemplateFetcher<'a, T> {
    transport: &'a T,
}

impl<'a, T: Transport> TemplateFetcher<'a, T> {
    /// Creates a fetcher.
    pub fn new(transport: &'a T) -> Self {
        Self { transport }
    }

    /// Fetches what `decision` calls for.
    ///
    /// Returns `None` for a rejected request, which performs no network call.
    /// Transport errors are returned as the transport reported them.
    pub async fn execute(
        &self,
        request: &RequestDescriptor,
        decision: &Interception,
    ) -> Result<Option<FieldDefaults>, TransportError> {
        match decision {
            Interception::Continue => self.transport.get_json(request).await.map(Some),
            Interception::PassThrough { post_process } => {
                let mut defaults = self.transport.get_json(request).await?;
                post_process.apply(&mut defaults);
                Ok(Some(defaults))
            }
            Interception::Reject { .. } => Ok(None),
            Interception::Substitute(context) => {
                let mut defaults = self.transport.get_json(&context.replacement).await?;
                defaults.merge_template(&context.template);
                tracing::debug!(reason_id = %context.reason_id, "merged custom template");
                Ok(Some(defaults))
            }
        }
    }
}
