//! Progress delivery.
//!
//! The pipeline reports progress through a [`ProgressSink`]. The HTTP layer
//! plugs in a [`ChannelProgressSink`] whose receiver feeds the response body.

mod sink;

pub use sink::{ChannelProgressSink, CollectingProgressSink, ProgressSink};
