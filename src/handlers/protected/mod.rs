// handlers/protected/mod.rs - Routes behind bearer token authentication
//
// Every handler here can rely on an `Actor` in request extensions; the auth
// middleware rejects the request with 401 before a handler runs otherwise.

pub mod pokedex;
