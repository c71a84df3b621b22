// src/db/mod.rs
//
// Database layer
//
// CRITICAL RULES:
// - Connection management is explicit (pool created once, passed around)
// - Schema changes only through migrations
// - No SQL outside db/ and repositories/

pub mod connection;
pub mod migrations;

pub use connection::{
    create_connection_pool, create_test_pool, get_connection, ConnectionPool, PooledConn,
};
pub use migrations::initialize_database;
