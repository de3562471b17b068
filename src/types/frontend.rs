use super::decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Registration state of a frontend operator in the Stability Pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum FrontendStatus {
    Unregistered,
    #[serde(rename_all = "camelCase")]
    Registered {
        /// Fraction of LQTY rewards passed on to depositors using this frontend.
        kickback_rate: Decimal,
    },
}

impl FrontendStatus {
    pub fn is_registered(&self) -> bool {
        matches!(self, FrontendStatus::Registered { .. })
    }

    pub fn kickback_rate(&self) -> Option<Decimal> {
        match self {
            FrontendStatus::Registered { kickback_rate } => Some(*kickback_rate),
            FrontendStatus::Unregistered => None,
        }
    }
}
