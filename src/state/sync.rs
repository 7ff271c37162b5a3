use crate::error::{RequestError, SolveError, ValidationError};
use crate::graph::network::{Network, NetworkKind};
use crate::state::panels::Panels;
use crate::state::result::SolverResult;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Identifies one accepted request. Tokens only ever increase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncState {
    Idle,
    Pending(RequestToken),
    Resolved,
    Failed(String),
}

/// An accepted solve request, carrying the exact network that was submitted.
#[derive(Debug, Clone)]
pub struct Ticket {
    pub token: RequestToken,
    pub network: Network,
}

/// A result together with the network it solves.
#[derive(Debug, Clone)]
pub struct Resolved {
    network: Network,
    result: Arc<SolverResult>,
}

impl Resolved {
    pub fn network(&self) -> &Network {
        &self.network
    }

    pub fn result(&self) -> &Arc<SolverResult> {
        &self.result
    }
}

#[derive(Debug, Clone)]
enum InFlight {
    Solve(Network),
    Random,
}

#[derive(Debug)]
pub enum Completion {
    Resolved,
    Failed(String),
    Stale,
}

#[derive(Debug)]
pub enum Generated {
    Network(Network),
    Failed(String),
    Stale,
}

pub struct ResultSynchronizer {
    state: SyncState,
    last_token: u64,
    in_flight: Option<InFlight>,
    resolved: Option<Resolved>,
    panels: Panels,
}

impl ResultSynchronizer {
    pub fn new() -> Self {
        Self {
            state: SyncState::Idle,
            last_token: 0,
            in_flight: None,
            resolved: None,
            panels: Panels::default(),
        }
    }

    pub fn state(&self) -> &SyncState {
        &self.state
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.state, SyncState::Pending(_))
    }

    pub fn resolved(&self) -> Option<&Resolved> {
        self.resolved.as_ref()
    }

    pub fn result(&self) -> Option<&Arc<SolverResult>> {
        self.resolved.as_ref().map(Resolved::result)
    }

    pub fn panels(&self) -> &Panels {
        &self.panels
    }

    fn next_token(&mut self) -> Result<RequestToken, SolveError> {
        if let SyncState::Pending(token) = self.state {
            debug!(?token, "request rejected while pending");
            return Err(SolveError::Busy);
        }
        self.last_token += 1;
        let token = RequestToken(self.last_token);
        self.state = SyncState::Pending(token);
        Ok(token)
    }

    /// Validates and accepts a solve request. Nothing is accepted while another is pending.
    pub fn begin(&mut self, network: &Network) -> Result<Ticket, SolveError> {
        if self.is_pending() {
            return Err(SolveError::Busy);
        }
        if let Err(err) = network.validate() {
            warn!(%err, "network rejected before solving");
            return Err(err.into());
        }
        let token = self.next_token()?;
        self.in_flight = Some(InFlight::Solve(network.clone()));
        info!(?token, n = network.node_count(), edges = network.edges().len(), "solve requested");
        Ok(Ticket {
            token,
            network: network.clone(),
        })
    }

    /// Accepts a random-network request for `n` nodes; it shares the pending slot with solves.
    pub fn begin_random(&mut self, n: usize) -> Result<RequestToken, SolveError> {
        if self.is_pending() {
            return Err(SolveError::Busy);
        }
        let bounds = NetworkKind::SOLVER_NODES;
        if !bounds.contains(&n) {
            let err = ValidationError::NodeCount {
                n,
                min: *bounds.start(),
                max: *bounds.end(),
            };
            warn!(%err, "random network rejected before requesting");
            return Err(err.into());
        }
        let token = self.next_token()?;
        self.in_flight = Some(InFlight::Random);
        info!(?token, n, "random network requested");
        Ok(token)
    }

    fn is_current(&self, token: RequestToken) -> bool {
        self.state == SyncState::Pending(token)
    }

    fn settle(&mut self) {
        self.state = if self.resolved.is_some() {
            SyncState::Resolved
        } else {
            SyncState::Idle
        };
    }

    pub fn complete(
        &mut self,
        token: RequestToken,
        outcome: Result<SolverResult, RequestError>,
    ) -> Completion {
        if !self.is_current(token) || !matches!(self.in_flight, Some(InFlight::Solve(_))) {
            debug!(?token, "discarding stale solve response");
            return Completion::Stale;
        }
        match (outcome, self.in_flight.take()) {
            (Ok(result), Some(InFlight::Solve(network))) => {
                info!(
                    ?token,
                    max_flow = result.max_flow(),
                    steps = result.steps().len(),
                    "solve resolved"
                );
                self.panels = Panels::from_result(&result);
                self.resolved = Some(Resolved {
                    network,
                    result: Arc::new(result),
                });
                self.state = SyncState::Resolved;
                Completion::Resolved
            }
            (Ok(_), _) => self.fail(token, "response without a submitted network".to_string()),
            (Err(err), _) => self.fail(token, err.to_string()),
        }
    }

    pub fn complete_random(
        &mut self,
        token: RequestToken,
        outcome: Result<Network, RequestError>,
    ) -> Generated {
        if !self.is_current(token) || !matches!(self.in_flight, Some(InFlight::Random)) {
            debug!(?token, "discarding stale random network");
            return Generated::Stale;
        }
        match outcome {
            Ok(network) => {
                info!(?token, n = network.node_count(), "random network received");
                self.in_flight = None;
                self.settle();
                Generated::Network(network)
            }
            Err(err) => match self.fail(token, err.to_string()) {
                Completion::Failed(reason) => Generated::Failed(reason),
                _ => Generated::Stale,
            },
        }
    }

    fn fail(&mut self, token: RequestToken, reason: String) -> Completion {
        warn!(?token, %reason, "request failed");
        self.in_flight = None;
        self.state = SyncState::Failed(reason.clone());
        Completion::Failed(reason)
    }

    /// Drops the result and invalidates whatever is in flight.
    pub fn reset(&mut self) {
        self.last_token += 1;
        self.state = SyncState::Idle;
        self.in_flight = None;
        self.resolved = None;
        self.panels = Panels::default();
    }
}
