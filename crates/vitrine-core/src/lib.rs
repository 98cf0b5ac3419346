pub mod cadence;
pub mod cms;
pub mod config;
pub mod constants;
pub mod ease;
pub mod error;
pub mod music;
pub mod preloader;
pub mod readiness;
pub mod reveal;
pub mod scroll;
pub mod site;
pub mod stage;
pub mod style;
pub mod timeline;

pub use cadence::*;
pub use cms::*;
pub use config::*;
pub use constants::*;
pub use ease::*;
pub use error::Error;
pub use music::*;
pub use preloader::*;
pub use readiness::*;
pub use reveal::*;
pub use scroll::*;
pub use stage::*;
pub use style::*;
pub use timeline::*;
