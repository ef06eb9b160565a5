pub mod activity_log;
pub mod customer;
pub mod customer_group;
pub mod media;
pub mod role;
pub mod shift;
pub mod staff;
pub mod store;
