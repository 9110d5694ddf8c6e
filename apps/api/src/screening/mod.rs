// Resume screening service: ingestion, job postings, candidate matching, analytics.
// Pure scoring lives in `matching`; this module wires it to storage and HTTP.

pub mod analytics;
pub mod handlers;
pub mod pipeline;
pub mod service;
pub mod store;
