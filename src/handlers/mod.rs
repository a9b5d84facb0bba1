// Two-tier handler layout: public (no session required) and protected
// (session authentication enforced by middleware::require_auth).

pub mod protected;
pub mod public;
