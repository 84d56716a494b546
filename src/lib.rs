// Library root: re-exports all modules so integration tests and external
// consumers can access the crate's public API.
//
// The engine proper is `boxscore` + `metrics`: pure, stateless functions
// over immutable inputs, safe to call concurrently without coordination.
// `config` and `loader` are the thin edges the boxstat binary uses.

pub mod boxscore;
pub mod config;
pub mod loader;
pub mod metrics;
