pub mod aggregator;
pub mod cleveland_provider;
pub mod config;
pub mod dates;
pub mod error;
pub mod http;
pub mod provider;
pub mod rijks_provider;
pub mod science_provider;
pub mod va_provider;

pub use aggregator::{assign_unique_keys, settle_all, Aggregator, CombinedResults, Settled, SourceFailure};
pub use cleveland_provider::ClevelandProvider;
pub use config::MuseumConfig;
pub use dates::extract_sortable_year;
pub use error::MuseumError;
pub use provider::{Artwork, FetchTerms, MuseumProvider, MuseumSource};
pub use rijks_provider::RijksmuseumProvider;
pub use science_provider::ScienceMuseumProvider;
pub use va_provider::VictoriaAlbertProvider;
