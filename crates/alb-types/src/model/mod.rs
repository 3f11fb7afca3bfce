mod alert;
mod common;
mod health_monitor;
mod http_policy_set;
mod network_security_policy;
mod pool;
mod tenant;
mod virtual_service;

pub use alert::*;
pub use common::*;
pub use health_monitor::*;
pub use http_policy_set::*;
pub use network_security_policy::*;
pub use pool::*;
pub use tenant::*;
pub use virtual_service::*;

/// An entry in an ordered rule list.
pub trait Indexed {
    fn index(&self) -> u32;
}

/// Borrows `items` in ascending index order. Ties keep their wire order.
pub fn sorted_by_index<T: Indexed>(items: &[T]) -> Vec<&T> {
    let mut sorted: Vec<&T> = items.iter().collect();
    sorted.sort_by_key(|item| item.index());
    sorted
}
