//! Subscription plans and the features each one unlocks.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Subscription plan of the signed-in farmer.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, strum::AsRefStr, strum::EnumString, strum::EnumIter)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Plan {
    Free,
    #[default]
    Premium,
    Enterprise,
}

/// Gated portal features.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, strum::AsRefStr, strum::EnumString, strum::EnumIter)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Feature {
    CropMonitor,
    DiseaseDetector,
    Weather,
    MarketTrends,
    GovernmentSchemes,
    AiAssistant,
    GroceryMarketplace,
    ColdStorage,
    AdvancedAnalytics,
}

impl Plan {
    /// Features available on this plan.
    pub fn features(&self) -> &'static [Feature] {
        use Feature::*;

        match self {
            Plan::Free => &[DiseaseDetector, Weather, MarketTrends, GovernmentSchemes, AiAssistant, GroceryMarketplace, ColdStorage],
            Plan::Premium => &[CropMonitor, DiseaseDetector, Weather, MarketTrends, GovernmentSchemes, AiAssistant, GroceryMarketplace, ColdStorage],
            Plan::Enterprise => &[
                CropMonitor,
                DiseaseDetector,
                Weather,
                MarketTrends,
                GovernmentSchemes,
                AiAssistant,
                GroceryMarketplace,
                ColdStorage,
                AdvancedAnalytics,
            ],
        }
    }

    pub fn allows(
        &self,
        feature: Feature,
    ) -> bool {
        self.features().contains(&feature)
    }

    /// String-keyed check used by page guards; unknown feature names are denied.
    pub fn has_feature_access(
        &self,
        feature: &str,
    ) -> bool {
        Feature::from_str(feature).map(|f| self.allows(f)).unwrap_or(false)
    }
}
