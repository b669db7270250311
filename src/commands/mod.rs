pub mod delete;
pub mod fetch;
pub mod mine;
pub mod purge_expired;
pub mod serve;
pub mod share;
