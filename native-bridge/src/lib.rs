pub mod bridge;
pub mod envelope;
pub mod helpers;
pub mod invoke;
pub mod java;
pub mod loader;
pub mod method_area;
pub mod options;
pub mod registry;
pub mod test_probes;
pub mod traps;
