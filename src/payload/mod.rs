//! Request and response bodies exchanged over HTTP.

pub mod auth;
pub mod customer;
pub mod customer_group;
pub mod shift;
pub mod staff;
