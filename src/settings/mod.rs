pub mod manager;

#[cfg(test)]
mod tests;

pub use manager::{MuseumSettings, ProxySettings, Settings, SettingsError, SettingsManager};
