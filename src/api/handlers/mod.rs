pub mod catalog;
pub mod keepalive;
pub mod notes;
pub mod notices;
pub mod root;
pub mod visitors;
