// handlers/mod.rs - two security tiers
//
// Public (no session) -> Protected (session cookie required)
pub mod protected;
pub mod public;
