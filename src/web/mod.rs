//! Web server for browser-based probe matching.
//!
//! A single page lets users upload a probe table, paste a target sequence and
//! download the results as CSV.
//!
//! ## Starting the Server
//!
//! ```text
//! # Start on default port 8080
//! probe-matcher serve
//!
//! # Custom port and auto-open browser
//! probe-matcher serve --port 3000 --open
//! ```
//!
//! ## API Endpoints
//!
//! - `GET /` - Main page with upload form
//! - `GET /api/health` - Liveness check
//! - `POST /api/search` - Multipart form: `probes` (file), `target` (text), optional `strands`
//! - `POST /api/reverse-complement` - JSON `{"sequences": [...]}`

pub mod server;
