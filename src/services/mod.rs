pub mod analytics_service;
pub mod assets;
pub mod click_recorder;
pub mod link_service;
pub mod redirect;

pub use analytics_service::{AnalyticsSummary, aggregate};
pub use assets::{AssetStore, MemoryAssetStore, render_qr_svg};
pub use click_recorder::{ClickContext, ClickRecorder};
pub use link_service::{CreateLinkRequest, LinkService};
pub use redirect::RedirectService;
