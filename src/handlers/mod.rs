//! HTTP request handlers
//!
//! This module organizes all API handlers into logical groups:
//! - `api` - Health check endpoint
//! - `sign` - One signing endpoint per remote protocol

pub mod api;
pub mod sign;
