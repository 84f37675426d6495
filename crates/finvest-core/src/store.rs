//! Asset Store
//!
//! In-memory collection of holdings. No persistence: state lives for the
//! lifetime of the process, seeded with a fixed demo portfolio at startup.

use rust_decimal_macros::dec;
use uuid::Uuid;

use crate::model::{Asset, AssetType};

/// In-memory asset collection
///
/// Mutation is caller-serialized; the store itself holds no lock.
#[derive(Clone, Debug, Default)]
pub struct AssetStore {
    assets: Vec<Asset>,
}

impl AssetStore {
    pub const fn new() -> Self {
        Self { assets: Vec::new() }
    }

    /// Demo portfolio used to seed a fresh process
    pub fn seeded() -> Self {
        let mut store = Self::new();
        store.add(
            Asset::new(
                "PETR4",
                "Petrobras PN",
                AssetType::Stock,
                dec!(100),
                dec!(28.50),
                dec!(35.20),
            )
            .with_sector("Energy"),
        );
        store.add(
            Asset::new(
                "HGLG11",
                "CSHG Logistica",
                AssetType::RealEstateFund,
                dec!(15),
                dec!(155.00),
                dec!(162.30),
            )
            .with_sector("Logistics"),
        );
        store.add(
            Asset::new(
                "BTC",
                "Bitcoin",
                AssetType::Crypto,
                dec!(0.005),
                dec!(250000),
                dec!(380000),
            )
            .with_sector("Crypto"),
        );
        store.add(
            Asset::new(
                "TESOURO SELIC",
                "Tesouro Selic 2027",
                AssetType::FixedIncome,
                dec!(1),
                dec!(12000),
                dec!(12500),
            )
            .with_sector("Government"),
        );
        store
    }

    /// Add a holding; returns its id
    pub fn add(&mut self, asset: Asset) -> Uuid {
        let id = asset.id;
        tracing::debug!(ticker = %asset.ticker, %id, "asset added");
        self.assets.push(asset);
        id
    }

    /// Remove a holding by id; returns whether it existed
    pub fn remove(&mut self, id: Uuid) -> bool {
        let before = self.assets.len();
        self.assets.retain(|a| a.id != id);
        before != self.assets.len()
    }

    pub fn assets(&self) -> &[Asset] {
        &self.assets
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_remove() {
        let mut store = AssetStore::new();
        let id = store.add(Asset::new(
            "BTC",
            "Bitcoin",
            AssetType::Crypto,
            dec!(0.1),
            dec!(40000),
            dec!(50000),
        ));

        assert_eq!(store.len(), 1);
        assert!(store.remove(id));
        assert!(store.is_empty());
        assert!(!store.remove(id));
    }

    #[test]
    fn test_duplicate_tickers_allowed() {
        let mut store = AssetStore::new();
        for _ in 0..2 {
            store.add(Asset::new(
                "BTC",
                "Bitcoin",
                AssetType::Crypto,
                dec!(0.1),
                dec!(40000),
                dec!(50000),
            ));
        }
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_seeded_portfolio() {
        let store = AssetStore::seeded();
        assert_eq!(store.len(), 4);
        assert!(store.assets().iter().any(|a| a.ticker == "PETR4"));
        assert!(store
            .assets()
            .iter()
            .any(|a| a.asset_type == AssetType::FixedIncome));
    }
}
