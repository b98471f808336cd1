pub mod formatter;

pub use formatter::{
    format_breakdown, format_measurement_detail, format_score, format_throughput,
    should_use_colors,
};
