mod common;
mod service;
mod validate;
