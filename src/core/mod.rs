pub mod config;
pub mod constants;
pub mod framing;
pub mod geo;
pub mod plot;
pub mod scene;
