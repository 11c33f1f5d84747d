use crate::catalog::{EffectId, TemplateId, UpgradeId};
use crate::error::{ErrorSeverity, GameError};

/// Catalog lookup failures.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CatalogError {
    #[error("card template '{0}' not found in catalog")]
    TemplateNotFound(TemplateId),

    #[error("effect '{0}' not found in catalog")]
    EffectNotFound(EffectId),

    #[error("upgrade '{0}' not found in catalog")]
    UpgradeNotFound(UpgradeId),
}

impl GameError for CatalogError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::TemplateNotFound(_) => "CATALOG_TEMPLATE_NOT_FOUND",
            Self::EffectNotFound(_) => "CATALOG_EFFECT_NOT_FOUND",
            Self::UpgradeNotFound(_) => "CATALOG_UPGRADE_NOT_FOUND",
        }
    }
}
