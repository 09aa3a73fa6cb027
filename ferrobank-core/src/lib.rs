mod currency;
mod errors;
mod logging;
mod models;
pub mod money;
mod traits;
mod utils;

pub use currency::*;
pub use errors::*;
pub use logging::*;
pub use models::*;
pub use money::MoneyError;
pub use traits::*;
pub use utils::*;

pub mod prelude {
    pub use crate::currency::*;
    pub use crate::errors::*;
    pub use crate::logging::*;
    pub use crate::models::*;
    pub use crate::money;
    pub use crate::traits::*;
    pub use crate::utils::*;
}
