//! Protocol deployment description: where each contract lives.
//!
//! Deployments are usually loaded from the JSON files shipped with the protocol
//! (`{"chainId": 1, "addresses": {"troveManager": "0x...", ...}}`); YAML with the
//! same shape is accepted too. Unknown keys (e.g. contracts this client never
//! reads) are ignored.

use crate::{Error, ErrorContext, Result};
use alloy_primitives::Address;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Addresses of every contract the read client talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractAddresses {
    pub active_pool: Address,
    pub coll_surplus_pool: Address,
    pub community_issuance: Address,
    pub default_pool: Address,
    pub lqty_staking: Address,
    pub lqty_token: Address,
    pub lusd_token: Address,
    pub multi_trove_getter: Address,
    pub multicall: Address,
    pub price_feed: Address,
    pub stability_pool: Address,
    pub trove_manager: Address,
    pub uni_token: Address,
    pub unipool: Address,
}

impl ContractAddresses {
    fn named(&self) -> [(&'static str, Address); 14] {
        [
            ("activePool", self.active_pool),
            ("collSurplusPool", self.coll_surplus_pool),
            ("communityIssuance", self.community_issuance),
            ("defaultPool", self.default_pool),
            ("lqtyStaking", self.lqty_staking),
            ("lqtyToken", self.lqty_token),
            ("lusdToken", self.lusd_token),
            ("multiTroveGetter", self.multi_trove_getter),
            ("multicall", self.multicall),
            ("priceFeed", self.price_feed),
            ("stabilityPool", self.stability_pool),
            ("troveManager", self.trove_manager),
            ("uniToken", self.uni_token),
            ("unipool", self.unipool),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deployment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chain_id: Option<u64>,
    pub addresses: ContractAddresses,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DeploymentFormat {
    Json,
    Yaml,
}

impl DeploymentFormat {
    fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "json" => Some(DeploymentFormat::Json),
            "yaml" | "yml" => Some(DeploymentFormat::Yaml),
            _ => None,
        }
    }
}

impl Deployment {
    pub fn new(addresses: ContractAddresses) -> Self {
        Self {
            chain_id: None,
            addresses,
        }
    }

    pub fn with_chain_id(mut self, chain_id: u64) -> Self {
        self.chain_id = Some(chain_id);
        self
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let deployment: Deployment = serde_json::from_str(content)?;
        deployment.validate()?;
        Ok(deployment)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        let deployment: Deployment = serde_yaml::from_str(content)?;
        deployment.validate()?;
        Ok(deployment)
    }

    /// Load a deployment file: `.json` as JSON, `.yaml` or `.yml` as YAML.
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let format = DeploymentFormat::from_path(path).ok_or_else(|| {
            Error::configuration_with_context(
                "unsupported deployment file extension; expected .json, .yaml or .yml",
                ErrorContext::new()
                    .with_field_path("deployment_path")
                    .with_details(path.display().to_string())
                    .with_source("deployment"),
            )
        })?;

        tracing::debug!(path = %path.display(), ?format, "loading deployment");
        let content = tokio::fs::read_to_string(path).await?;
        match format {
            DeploymentFormat::Json => Self::from_json(&content),
            DeploymentFormat::Yaml => Self::from_yaml(&content),
        }
    }

    /// Reject deployments that leave a contract at the zero address.
    pub fn validate(&self) -> Result<()> {
        for (name, address) in self.addresses.named() {
            if address.is_zero() {
                return Err(Error::configuration_with_context(
                    format!("contract '{}' has no address", name),
                    ErrorContext::new()
                        .with_field_path(format!("addresses.{}", name))
                        .with_source("deployment"),
                ));
            }
        }
        Ok(())
    }
}
