use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};
use utoipa::ToSchema;

#[derive(
    Debug, Copy, Clone, Default, Eq, PartialEq, Serialize, Deserialize, Display, EnumString, EnumIter, ToSchema,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum AppView {
    #[default]
    CheckIn,
    HrDashboard,
    AiPlayground,
}

impl AppView {
    /// Navigation label
    pub fn label(&self) -> &'static str {
        match self {
            AppView::CheckIn => "Check In",
            AppView::HrDashboard => "HR Dashboard",
            AppView::AiPlayground => "AI Playground",
        }
    }
}
