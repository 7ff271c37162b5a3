use crate::error::RequestError;
use crate::graph::network::Network;
use crate::solver::SolverBackend;
use crate::solver::wire::{NetworkDefinition, NetworkRequest, RandomParams, SolveResponse};
use crate::state::result::SolverResult;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

#[derive(Clone, Debug)]
pub struct HttpSolverOptions {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for HttpSolverOptions {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(5),
            request_timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Clone, Debug)]
pub struct HttpSolver {
    base: Url,
    client: reqwest::Client,
}

#[derive(Deserialize)]
struct Health {
    status: String,
}

impl HttpSolver {
    pub fn new(base: &str, options: HttpSolverOptions) -> Result<Self, RequestError> {
        let mut base = Url::parse(base)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let client = reqwest::Client::builder()
            .connect_timeout(options.connect_timeout)
            .timeout(options.request_timeout)
            .build()?;
        Ok(Self { base, client })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, path: &str) -> Result<Url, RequestError> {
        Ok(self.base.join(path)?)
    }
}

async fn read_json<T: DeserializeOwned>(res: reqwest::Response) -> Result<T, RequestError> {
    let status = res.status();
    let body = res.text().await?;
    if !status.is_success() {
        return Err(RequestError::Status {
            status: status.as_u16(),
            body,
        });
    }
    serde_json::from_str(&body).map_err(|err| RequestError::Malformed(err.to_string()))
}

impl SolverBackend for HttpSolver {
    async fn solve(&self, request: NetworkRequest) -> Result<SolverResult, RequestError> {
        let res = self
            .client
            .post(self.endpoint("api/maxflow")?)
            .json(&request)
            .send()
            .await?;
        let body: SolveResponse = read_json(res).await?;
        Ok(body.into())
    }

    async fn random_network(&self, params: RandomParams) -> Result<Network, RequestError> {
        let res = self
            .client
            .get(self.endpoint("api/random")?)
            .query(&params)
            .send()
            .await?;
        let body: NetworkDefinition = read_json(res).await?;
        Ok(body.into_network())
    }

    async fn health(&self) -> Result<(), RequestError> {
        let res = self.client.get(self.endpoint("health")?).send().await?;
        let body: Health = read_json(res).await?;
        if body.status == "ok" {
            Ok(())
        } else {
            Err(RequestError::Malformed(format!("unexpected status `{}`", body.status)))
        }
    }
}
