//! Portfolio Aggregation
//!
//! Pure functions deriving the portfolio summary and the per-type allocation
//! from the asset list. Figures are recomputed on every read - the source
//! collection is small and can change between reads, so nothing is cached.

use std::collections::HashMap;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::model::{AllocationEntry, Asset, AssetType, PortfolioSummary};

/// Compute aggregate figures for the whole portfolio
///
/// Profitability is defined as 0 when nothing is invested, guarding the
/// division by zero.
pub fn summarize(assets: &[Asset]) -> PortfolioSummary {
    let mut total_invested = Decimal::ZERO;
    let mut total_value = Decimal::ZERO;

    for asset in assets {
        total_invested += asset.invested();
        total_value += asset.line_total();
    }

    let profitability_value = total_value - total_invested;
    let profitability = if total_invested.is_zero() {
        Decimal::ZERO
    } else {
        profitability_value / total_invested * dec!(100)
    };

    PortfolioSummary {
        total_value,
        total_invested,
        profitability,
        profitability_value,
    }
}

/// Sum current value per asset type
///
/// Types absent from the portfolio produce no entry.
pub fn allocations(assets: &[Asset]) -> Vec<AllocationEntry> {
    let mut by_type: HashMap<AssetType, Decimal> = HashMap::new();
    for asset in assets {
        *by_type.entry(asset.asset_type).or_default() += asset.line_total();
    }

    by_type
        .into_iter()
        .map(|(asset_type, value)| AllocationEntry { asset_type, value })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_portfolio() -> Vec<Asset> {
        vec![
            Asset::new(
                "PETR4",
                "Petrobras PN",
                AssetType::Stock,
                dec!(100),
                dec!(28.50),
                dec!(35.20),
            ),
            Asset::new(
                "HGLG11",
                "CSHG Logistica",
                AssetType::RealEstateFund,
                dec!(15),
                dec!(155.00),
                dec!(162.30),
            ),
            Asset::new(
                "BTC",
                "Bitcoin",
                AssetType::Crypto,
                dec!(0.005),
                dec!(250000),
                dec!(380000),
            ),
        ]
    }

    #[test]
    fn test_summary_single_asset() {
        let assets = vec![Asset::new(
            "PETR4",
            "Petrobras PN",
            AssetType::Stock,
            dec!(100),
            dec!(28.50),
            dec!(35.20),
        )];

        let summary = summarize(&assets);
        assert_eq!(summary.total_invested, dec!(2850.00));
        assert_eq!(summary.total_value, dec!(3520.00));
        assert_eq!(summary.profitability_value, dec!(670.00));
        assert_eq!(summary.profitability.round_dp(2), dec!(23.51));
    }

    #[test]
    fn test_summary_identity() {
        let summary = summarize(&sample_portfolio());
        assert_eq!(
            summary.total_value - summary.total_invested,
            summary.profitability_value
        );
    }

    #[test]
    fn test_summary_empty_portfolio() {
        let summary = summarize(&[]);
        assert_eq!(summary.total_invested, Decimal::ZERO);
        assert_eq!(summary.total_value, Decimal::ZERO);
        assert_eq!(summary.profitability, Decimal::ZERO);
        assert_eq!(summary.profitability_value, Decimal::ZERO);
        assert!(allocations(&[]).is_empty());
    }

    #[test]
    fn test_profitability_zero_when_nothing_invested() {
        // Free shares: value without cost basis
        let assets = vec![Asset::new(
            "GIFT",
            "Gifted Shares",
            AssetType::Stock,
            dec!(10),
            dec!(0),
            dec!(5),
        )];

        let summary = summarize(&assets);
        assert_eq!(summary.total_value, dec!(50));
        assert_eq!(summary.profitability, Decimal::ZERO);
    }

    #[test]
    fn test_allocation_partitions_total_value() {
        let assets = sample_portfolio();
        let summary = summarize(&assets);
        let entries = allocations(&assets);

        let allocated: Decimal = entries.iter().map(|e| e.value).sum();
        assert_eq!(allocated, summary.total_value);

        // Every type present in the input shows up
        assert_eq!(entries.len(), 3);
        assert!(entries.iter().any(|e| e.asset_type == AssetType::Crypto));
    }

    #[test]
    fn test_allocation_merges_same_type() {
        let mut assets = sample_portfolio();
        assets.push(Asset::new(
            "VALE3",
            "Vale ON",
            AssetType::Stock,
            dec!(10),
            dec!(60),
            dec!(65),
        ));

        let entries = allocations(&assets);
        let stocks = entries
            .iter()
            .find(|e| e.asset_type == AssetType::Stock)
            .unwrap();
        assert_eq!(stocks.value, dec!(3520.00) + dec!(650));
    }
}
