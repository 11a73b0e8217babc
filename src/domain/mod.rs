pub mod entities;
pub mod health;
pub mod ports;
pub mod value_objects;
