//! Application State
//!
//! Single state container for the dashboard: the asset store, the active
//! view, and the in-flight flags guarding the generative actions. Nothing
//! mutates ambiently; every transition is an explicit method triggered by a
//! discrete user action.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CoreError, Result};
use crate::model::{AllocationEntry, Asset, PortfolioSummary};
use crate::store::AssetStore;
use crate::summary::{allocations, summarize};

/// Active pane of the dashboard
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViewState {
    #[default]
    Dashboard,
    Wallet,
    Advisor,
    VisionBoard,
}

/// Which generative action is in flight
///
/// The design provides no request deduplication; these flags are the
/// caller-side guard against overlapping invocations of the same action.
#[derive(Clone, Copy, Debug, Default)]
struct BusyFlags {
    advice: bool,
    image: bool,
    video: bool,
}

/// Dashboard session state
///
/// Owns the asset store and the view flags. Mutations happen on one thread
/// at a time (the server serializes them behind a lock), so each method is
/// atomic from the caller's perspective.
#[derive(Clone, Debug)]
pub struct AppSession {
    store: AssetStore,
    view: ViewState,
    form_open: bool,
    busy: BusyFlags,
    advice: Option<String>,
}

impl Default for AppSession {
    fn default() -> Self {
        Self::new(AssetStore::new())
    }
}

impl AppSession {
    pub const fn new(store: AssetStore) -> Self {
        Self {
            store,
            view: ViewState::Dashboard,
            form_open: false,
            busy: BusyFlags {
                advice: false,
                image: false,
                video: false,
            },
            advice: None,
        }
    }

    /// Session seeded with the demo portfolio
    pub fn seeded() -> Self {
        Self::new(AssetStore::seeded())
    }

    // ------------------------------------------------------------------
    // Asset store
    // ------------------------------------------------------------------

    pub fn add_asset(&mut self, asset: Asset) -> Uuid {
        self.store.add(asset)
    }

    pub fn remove_asset(&mut self, id: Uuid) -> Result<()> {
        if self.store.remove(id) {
            Ok(())
        } else {
            Err(CoreError::AssetNotFound(id))
        }
    }

    pub fn assets(&self) -> &[Asset] {
        self.store.assets()
    }

    /// Aggregate figures, recomputed from the current asset list
    pub fn summary(&self) -> PortfolioSummary {
        summarize(self.store.assets())
    }

    /// Per-type allocation, recomputed from the current asset list
    pub fn allocation(&self) -> Vec<AllocationEntry> {
        allocations(self.store.assets())
    }

    // ------------------------------------------------------------------
    // View transitions
    // ------------------------------------------------------------------

    pub fn view(&self) -> ViewState {
        self.view
    }

    pub fn set_view(&mut self, view: ViewState) {
        tracing::debug!(?view, "view changed");
        self.view = view;
    }

    pub fn form_open(&self) -> bool {
        self.form_open
    }

    pub fn open_form(&mut self) {
        self.form_open = true;
    }

    pub fn close_form(&mut self) {
        self.form_open = false;
    }

    // ------------------------------------------------------------------
    // In-flight guards
    // ------------------------------------------------------------------

    /// Mark the advisory action started; refused while one is running
    pub fn begin_advice(&mut self) -> Result<()> {
        if self.busy.advice {
            return Err(CoreError::BusyAction("advice"));
        }
        self.busy.advice = true;
        Ok(())
    }

    /// Record the advisory result and clear the flag
    pub fn finish_advice(&mut self, advice: String) {
        self.advice = Some(advice);
        self.busy.advice = false;
    }

    /// Latest advisory text, replaced wholesale on each request
    pub fn advice(&self) -> Option<&str> {
        self.advice.as_deref()
    }

    pub fn begin_image(&mut self) -> Result<()> {
        if self.busy.image {
            return Err(CoreError::BusyAction("image"));
        }
        self.busy.image = true;
        Ok(())
    }

    pub fn finish_image(&mut self) {
        self.busy.image = false;
    }

    pub fn begin_video(&mut self) -> Result<()> {
        if self.busy.video {
            return Err(CoreError::BusyAction("video"));
        }
        self.busy.video = true;
        Ok(())
    }

    pub fn finish_video(&mut self) {
        self.busy.video = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AssetType;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    #[test]
    fn test_view_transitions() {
        let mut session = AppSession::default();
        assert_eq!(session.view(), ViewState::Dashboard);

        session.set_view(ViewState::Advisor);
        assert_eq!(session.view(), ViewState::Advisor);

        session.open_form();
        assert!(session.form_open());
        session.close_form();
        assert!(!session.form_open());
    }

    #[test]
    fn test_advice_guard_refuses_overlap() {
        let mut session = AppSession::default();
        assert!(session.begin_advice().is_ok());
        assert_eq!(
            session.begin_advice(),
            Err(CoreError::BusyAction("advice"))
        );

        session.finish_advice("hold everything".into());
        assert_eq!(session.advice(), Some("hold everything"));
        assert!(session.begin_advice().is_ok());
    }

    #[test]
    fn test_guards_are_independent() {
        let mut session = AppSession::default();
        assert!(session.begin_video().is_ok());
        assert!(session.begin_image().is_ok());
        assert!(session.begin_video().is_err());

        session.finish_video();
        assert!(session.begin_video().is_ok());
    }

    #[test]
    fn test_summary_tracks_store_changes() {
        let mut session = AppSession::default();
        assert_eq!(session.summary().total_value, Decimal::ZERO);

        let id = session.add_asset(Asset::new(
            "PETR4",
            "Petrobras PN",
            AssetType::Stock,
            dec!(100),
            dec!(28.50),
            dec!(35.20),
        ));
        assert_eq!(session.summary().total_value, dec!(3520.00));

        session.remove_asset(id).unwrap();
        assert_eq!(session.summary().total_value, Decimal::ZERO);
        assert_eq!(session.remove_asset(id), Err(CoreError::AssetNotFound(id)));
    }
}
