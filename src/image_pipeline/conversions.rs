//! Pipeline orchestration module
//!
//! Ties decoding, normalization, adjustment, histograms, encoding and history together
//! for one camera view.

mod frame_view;
mod scheduler;
pub mod types;


pub use frame_view::FrameViewPipeline;
pub use scheduler::RenderScheduler;
pub use types::{RenderKind, RenderOutput, ViewerConfig, ViewerConfigBuilder};
