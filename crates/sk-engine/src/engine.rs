//! Slot Engine: spin lifecycle
//!
//! `SlotEngine` is the single entry point: it guards against overlapping
//! spins, runs reel generation and payline evaluation, and publishes the
//! started/completed notifications.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use parking_lot::Mutex;

use crate::config::{ConfigError, SlotConfig};
use crate::events::{SpinEvents, SubscriptionId};
use crate::paytable::PayTable;
use crate::reels::generate_grid;
use crate::rng::{RandomError, RandomProvider};
use crate::spin::SpinResult;
use crate::symbols::Symbol;

/// Spin failures
#[derive(Debug, thiserror::Error)]
pub enum SpinError {
    #[error("Cannot spin while another spin is in progress")]
    ConcurrencyViolation,

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Random source error: {0}")]
    Random(#[from] RandomError),
}

/// Holds the in-progress flag for the duration of one spin.
///
/// Released on drop, so early returns, errors and panicking observers all
/// clear the flag.
struct SpinGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> SpinGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for SpinGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// Slot Engine
///
/// Shareable across threads (`Arc<SlotEngine>`). At most one spin runs at a
/// time; a spin requested while another is in flight fails with
/// [`SpinError::ConcurrencyViolation`] instead of waiting.
pub struct SlotEngine {
    /// Table configuration (read-only)
    config: Arc<SlotConfig>,
    /// Configured symbols, shared into every grid cell
    symbols: Vec<Arc<Symbol>>,
    /// Active paylines and minimum match
    paytable: PayTable,
    /// Random number source
    rng: Mutex<Box<dyn RandomProvider>>,
    /// Spin-in-progress flag
    spinning: AtomicBool,
    /// Accepted spins
    spin_count: AtomicU64,
    /// Lifecycle channels
    events: SpinEvents,
}

impl SlotEngine {
    /// Create an engine; the configuration is validated here, not mid-spin
    pub fn new<R>(config: impl Into<Arc<SlotConfig>>, rng: R) -> Result<Self, ConfigError>
    where
        R: RandomProvider + 'static,
    {
        let config = config.into();
        config.validate()?;

        let symbols = config.symbols.iter().cloned().map(Arc::new).collect();
        let paytable = PayTable::from_config(&config);

        log::info!(
            "Slot engine ready: {}x{} grid, {} symbols, {} active paylines, min match {}",
            config.grid.reels,
            config.grid.rows,
            config.symbols.len(),
            paytable.paylines.len(),
            config.min_match
        );

        Ok(Self {
            config,
            symbols,
            paytable,
            rng: Mutex::new(Box::new(rng)),
            spinning: AtomicBool::new(false),
            spin_count: AtomicU64::new(0),
            events: SpinEvents::new(),
        })
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // STATE
    // ═══════════════════════════════════════════════════════════════════════════

    /// Clear the in-progress flag. Idempotent.
    ///
    /// Calling this from inside a running spin releases the guard early. A
    /// second spin may then start; it fails with
    /// [`SpinError::ConcurrencyViolation`] if the random source is still
    /// drawing for the first.
    pub fn initialize(&self) {
        self.spinning.store(false, Ordering::Release);
    }

    /// True when no spin is in flight
    pub fn can_spin(&self) -> bool {
        !self.spinning.load(Ordering::Acquire)
    }

    /// Get current config
    pub fn config(&self) -> &SlotConfig {
        &self.config
    }

    /// Get paytable
    pub fn paytable(&self) -> &PayTable {
        &self.paytable
    }

    /// Spins accepted so far (including ones that later failed)
    pub fn spin_count(&self) -> u64 {
        self.spin_count.load(Ordering::Relaxed)
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // NOTIFICATIONS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Called when a spin is accepted, before any reel is drawn. The engine
    /// already reports `can_spin() == false` at this point.
    pub fn on_spin_started<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.events.on_started(callback)
    }

    /// Called with the finished result, before the in-progress flag clears.
    /// Not called for failed spins.
    pub fn on_spin_completed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&SpinResult) + Send + Sync + 'static,
    {
        self.events.on_completed(callback)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.events.unsubscribe(id)
    }

    pub fn events(&self) -> &SpinEvents {
        &self.events
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // SPIN EXECUTION
    // ═══════════════════════════════════════════════════════════════════════════

    /// Execute one spin
    pub fn spin(&self) -> Result<SpinResult, SpinError> {
        let Some(_guard) = SpinGuard::acquire(&self.spinning) else {
            log::warn!("Spin rejected: another spin is in progress");
            return Err(SpinError::ConcurrencyViolation);
        };

        let spin_number = self.spin_count.fetch_add(1, Ordering::Relaxed) + 1;
        let spin_id = format!("spin-{:06}", spin_number);

        self.events.emit_started();

        let result = self.resolve(spin_id).inspect_err(|e| {
            log::warn!("Spin {} failed: {}", spin_number, e);
        })?;

        log::debug!(
            "{}: {} line win(s), payout {}",
            result.spin_id(),
            result.line_wins().len(),
            result.total_payout()
        );

        self.events.emit_completed(&result);
        Ok(result)
    }

    /// Generate the grid, then score it. A random source still drawing for
    /// another spin (reachable after `initialize`) rejects instead of blocking.
    fn resolve(&self, spin_id: String) -> Result<SpinResult, SpinError> {
        let grid = {
            let Some(mut rng) = self.rng.try_lock() else {
                log::warn!("{}: random source busy with another spin", spin_id);
                return Err(SpinError::ConcurrencyViolation);
            };
            generate_grid(self.config.grid, &self.symbols, &mut **rng)?
        };

        let eval = self.paytable.evaluate(&grid);
        Ok(SpinResult::new(spin_id, grid, eval))
    }
}
