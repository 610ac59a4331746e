mod join_authorizer;

pub use join_authorizer::*;
