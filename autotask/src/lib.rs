mod autotask_url;
mod client;
mod domain;

pub use autotask_url::AutotaskURL;
pub use client::*;
pub use domain::*;
