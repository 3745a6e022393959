pub(crate) mod extractors;
pub mod password;

pub use extractors::AuthUser;
