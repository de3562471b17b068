use crate::adapter::{ReadAdapter, RpcReadAdapter};
use crate::client::core::Liquity;
use crate::deployment::Deployment;
use crate::{Error, ErrorContext, Result};
use alloy_primitives::Address;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Builder for [`Liquity`].
///
/// The adapter is optional: when none is injected, a JSON-RPC adapter is built
/// from the configured RPC URL. Unset values fall back to the environment:
/// - `LIQUITY_RPC_URL`
/// - `LIQUITY_DEPLOYMENT_PATH`
/// - `LIQUITY_USER_ADDRESS`
pub struct LiquityBuilder {
    adapter: Option<Arc<dyn ReadAdapter>>,
    deployment: Option<Deployment>,
    deployment_path: Option<PathBuf>,
    rpc_url: Option<String>,
    current_user: Option<Address>,
}

impl LiquityBuilder {
    pub fn new() -> Self {
        Self {
            adapter: None,
            deployment: None,
            deployment_path: None,
            rpc_url: None,
            current_user: None,
        }
    }

    /// Inject a read adapter. `rpc_url` is ignored when one is set.
    pub fn adapter(mut self, adapter: Arc<dyn ReadAdapter>) -> Self {
        self.adapter = Some(adapter);
        self
    }

    pub fn deployment(mut self, deployment: Deployment) -> Self {
        self.deployment = Some(deployment);
        self
    }

    /// Load the deployment from a JSON or YAML file at build time.
    pub fn deployment_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.deployment_path = Some(path.into());
        self
    }

    pub fn rpc_url(mut self, url: impl Into<String>) -> Self {
        self.rpc_url = Some(url.into());
        self
    }

    /// Address used by queries that are not given one.
    pub fn current_user(mut self, user: Address) -> Self {
        self.current_user = Some(user);
        self
    }

    async fn resolve_deployment(
        deployment: Option<Deployment>,
        path: Option<PathBuf>,
    ) -> Result<Deployment> {
        if let Some(deployment) = deployment {
            deployment.validate()?;
            return Ok(deployment);
        }

        let path = path
            .or_else(|| std::env::var("LIQUITY_DEPLOYMENT_PATH").ok().map(PathBuf::from))
            .ok_or_else(|| {
                Error::configuration_with_context(
                    "no deployment given; set one on the builder or LIQUITY_DEPLOYMENT_PATH",
                    ErrorContext::new()
                        .with_field_path("deployment")
                        .with_source("builder"),
                )
            })?;
        Deployment::from_file(path).await
    }

    fn resolve_current_user(explicit: Option<Address>) -> Result<Option<Address>> {
        if explicit.is_some() {
            return Ok(explicit);
        }
        match std::env::var("LIQUITY_USER_ADDRESS") {
            Ok(raw) if !raw.trim().is_empty() => {
                raw.trim().parse::<Address>().map(Some).map_err(|e| {
                    Error::validation_with_context(
                        format!("invalid user address '{}': {}", raw.trim(), e),
                        ErrorContext::new()
                            .with_field_path("LIQUITY_USER_ADDRESS")
                            .with_source("builder"),
                    )
                })
            }
            _ => Ok(None),
        }
    }

    /// Build the client.
    pub async fn build(self) -> Result<Liquity> {
        let deployment = Self::resolve_deployment(self.deployment, self.deployment_path).await?;
        let current_user = Self::resolve_current_user(self.current_user)?;

        let adapter: Arc<dyn ReadAdapter> = match self.adapter {
            Some(adapter) => adapter,
            None => {
                let url = self
                    .rpc_url
                    .or_else(|| std::env::var("LIQUITY_RPC_URL").ok())
                    .ok_or_else(|| {
                        Error::configuration_with_context(
                            "no read adapter or RPC URL given; \
                             set one on the builder or LIQUITY_RPC_URL",
                            ErrorContext::new()
                                .with_field_path("rpc_url")
                                .with_source("builder"),
                        )
                    })?;
                Arc::new(RpcReadAdapter::new(&url)?)
            }
        };

        info!(
            chain_id = ?deployment.chain_id,
            trove_manager = %deployment.addresses.trove_manager,
            "liquity read client ready"
        );

        Ok(Liquity {
            adapter,
            deployment,
            current_user,
        })
    }
}

impl Default for LiquityBuilder {
    fn default() -> Self {
        Self::new()
    }
}
