mod account;
mod filters;
mod project;
mod resource;
mod task;
mod threshold_info;
mod time_entry;

pub use account::*;
pub use filters::*;
pub use project::*;
pub use resource::*;
pub use task::*;
pub use threshold_info::*;
pub use time_entry::*;
