//! Pipeline stage implementations.

mod analytics;
mod build;
mod clean;
mod layout;
mod load;
mod render;
mod write;

pub use analytics::AnalyticsStage;
pub use build::BuildStage;
pub use clean::CleanStage;
pub use layout::LayoutStage;
pub use load::LoadStage;
pub use render::RenderStage;
pub use write::WriteStage;
