mod band;
mod null_renderer;

pub use band::AvailabilityBand;
pub use null_renderer::NullRenderer;

use crate::api::WorkloadChart;
use crate::error::WorkloadResult;

/// Contract implemented by any output backend (markup, raster, documents).
///
/// Backends receive the fully computed `WorkloadChart` so formatting code
/// stays isolated from allocation and projection logic.
pub trait Renderer {
    fn render(&mut self, chart: &WorkloadChart) -> WorkloadResult<()>;
}
