pub mod metrics;
pub mod render;
pub mod window;

pub use metrics::LiveMetrics;
pub use render::{CharState, RenderChar, RenderLine, RenderModel};
pub use window::{LineSpan, Viewport};
