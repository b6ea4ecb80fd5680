// handlers/protected/mod.rs - Protected handlers (session cookie required)
//
// Every route here sits behind `session_auth_middleware`, so handlers can
// rely on an `AuthUser` extension being present.
pub mod auth;
pub mod tasks;
