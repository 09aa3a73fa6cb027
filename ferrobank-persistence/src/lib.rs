mod config;
mod pool;
mod repos;
pub mod test_utils;

pub use config::*;
pub use pool::*;
pub use repos::*;

pub mod prelude {
    pub use crate::config::*;
    pub use crate::pool::*;
    pub use crate::repos::*;
}
