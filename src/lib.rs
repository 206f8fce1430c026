pub mod consts;
pub mod version;
pub mod bundle;
pub mod installer;

pub mod prelude {
    pub use super::consts::*;
    pub use super::version::Version;
    pub use super::bundle::Bundle;
    pub use super::installer::prelude::*;
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
