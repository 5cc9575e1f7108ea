//! ML core: feature schema, training pipeline, model artifact store.

pub mod dataset;
pub mod metrics;
pub mod pipeline;
pub mod scaler;
pub mod schema;
pub mod store;
pub mod tfidf;
