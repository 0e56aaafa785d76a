//! Property tests over generated sources.
