use crate::api::WorkloadChart;
use crate::error::WorkloadResult;
use crate::render::Renderer;

/// No-op renderer used by tests and headless engine usage.
///
/// It still validates the chart so tests can catch invalid values before a
/// real backend is introduced.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub last_row_count: usize,
    pub last_bucket_count: usize,
    pub last_displayed_count: usize,
}

impl Renderer for NullRenderer {
    fn render(&mut self, chart: &WorkloadChart) -> WorkloadResult<()> {
        chart.validate()?;
        self.last_row_count = chart.rows.len();
        self.last_bucket_count = chart.bucket_count();
        self.last_displayed_count = chart
            .rows
            .iter()
            .map(|row| row.displayed_buckets().count())
            .sum();
        Ok(())
    }
}
