//! Cucumber scenarios driving a real clinic server over HTTP.

pub mod features;
