mod severity;
mod record;
mod finding;
mod summary;
mod chart;

pub use severity::Severity;
pub use record::RawRecord;
pub use finding::Finding;
pub use summary::{CveDetail, Distribution, KeyCount, KeyMetrics, Summaries, TimelinePoint};
pub use chart::{ChartBar, ChartData};
