//! Shared utilities for the frame loop.

/// Smoothed frame-rate tracking.
pub mod frame_timing;
