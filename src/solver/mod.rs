pub mod http;
pub mod wire;

use crate::error::RequestError;
use crate::graph::network::Network;
use crate::solver::wire::{NetworkRequest, RandomParams};
use crate::state::result::SolverResult;
use std::future::Future;

/// The computation service, as seen by the rest of the application.
pub trait SolverBackend: Send + Sync + 'static {
    fn solve(
        &self,
        request: NetworkRequest,
    ) -> impl Future<Output = Result<SolverResult, RequestError>> + Send;

    fn random_network(
        &self,
        params: RandomParams,
    ) -> impl Future<Output = Result<Network, RequestError>> + Send;

    fn health(&self) -> impl Future<Output = Result<(), RequestError>> + Send;
}
