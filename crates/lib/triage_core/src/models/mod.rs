//! Domain models shared by the client and the API.

pub mod chat;
