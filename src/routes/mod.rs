mod health_check;
mod subscriptions;
mod total_cost;

pub use health_check::*;
pub use subscriptions::*;
pub use total_cost::*;
