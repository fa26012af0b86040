#![allow(dead_code)]

mod mock_resolvers;

pub use mock_resolvers::{Behavior, CallLog, MockNameResolver};
