// bucketlens CLI library: report shapes and text rendering.
// Pure functions: engine results in, strings/serializable values out. No IO, no clap.

pub mod render;
pub mod report;
