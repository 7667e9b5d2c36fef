//! Request pacing

mod pacer;

pub use pacer::Pacer;
