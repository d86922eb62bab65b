use quay_core::Result;
use std::future::Future;
use std::sync::Arc;

/// The unit of work done for every received message.
///
/// Returning an error leaves the message in the queue; it is received again
/// once its visibility timeout runs out.
pub trait Workload: Send + Sync {
    fn process(&self, body: &str) -> impl Future<Output = Result<()>> + Send;
}

impl<W: Workload> Workload for Arc<W> {
    fn process(&self, body: &str) -> impl Future<Output = Result<()>> + Send {
        (**self).process(body)
    }
}
