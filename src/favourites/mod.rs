mod storage;
mod store;

pub use storage::{JsonFileStorage, KeyValueStorage, MemoryStorage, StorageError};
pub use store::{FavouriteSet, FavouritesStore, FAVOURITES_KEY};
