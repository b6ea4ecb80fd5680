// handlers/public/mod.rs - Public handlers (no session required)
//
// Session acquisition and release, plus service info and health.
pub mod auth;
pub mod system;
