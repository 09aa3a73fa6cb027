mod accounts;
mod sessions;
mod transfers;
mod users;

pub use accounts::*;
pub use sessions::*;
pub use transfers::*;
pub use users::*;
