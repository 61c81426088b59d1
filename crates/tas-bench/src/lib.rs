//! Benchmarks for TAS-RS live in `benches/`.
