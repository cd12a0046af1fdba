// Module declarations
pub mod commands;
pub mod error;
pub mod favourites;
pub mod logging;
pub mod museums;
pub mod proxy;
pub mod settings;
pub mod sorting;

pub use commands::AppState;
pub use error::AppError;
pub use museums::{Aggregator, Artwork, FetchTerms, MuseumProvider, MuseumSource};
