//! Record types stored in the index.

mod plot_number;
mod plot_record;

pub use plot_number::PlotNumber;
pub use plot_record::PlotRecord;
