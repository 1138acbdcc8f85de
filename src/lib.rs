pub mod cluster;
pub mod config;
pub mod cv_utils;
pub mod denomination;
pub mod draw;
pub mod pipeline;
pub mod report;
pub mod sink;

pub use config::TallyParams;
pub use denomination::{CountTable, Denomination, DenominationMap};
pub use pipeline::{count_coins, TallyError, TallyOutcome, CLASS_COUNT};
pub use report::TallyReport;
pub use sink::{ImageFileSink, ResultSink, WindowSink};
