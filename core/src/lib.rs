pub mod access;
pub mod loader;
pub mod scope;
pub mod store;
pub mod track;
pub mod util;
pub mod val;

mod macros;


pub use access::{Accessor, NotFound, params};
pub use scope::{Scope, ScopeGuard, ScopeStack, freeze, scoped, spawn};
pub use store::{HashIndexed, KeyStore};
pub use val::{Suggester, Val, coerce_toward};
