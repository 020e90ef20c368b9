mod common;
mod gesture;
mod session;
