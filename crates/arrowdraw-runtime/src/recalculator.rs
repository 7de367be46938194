#![forbid(unsafe_code)]

//! Full-pass recomputation of every declared arrow.
//!
//! # Design
//!
//! [`ReactiveRecalculator`] subscribes to the host's [`MutationFeed`]. Each
//! layout-relevant batch triggers one pass: all declared arrows are read
//! from the host, recomputed from scratch and written back. There is no
//! incremental state beyond which arrows have been drawn at least once.
//!
//! ```text
//! MutationFeed ──► ChangeFilter ──► PassGuard ──► compute (host borrowed)
//!                                                    │
//!                                                    ▼
//!                                   render (host borrowed mutably) ──► PassReport
//! ```
//!
//! # Convergence
//!
//! A pass writes styles, and a host may report those writes as mutations.
//! Two rules keep the loop from feeding itself:
//!
//! 1. Batches made only of geometry writes are skipped ([`ChangeFilter`]).
//! 2. Notifications delivered while a pass is running are suppressed
//!    ([`PassGuard`]).
//!
//! # Failure Modes
//!
//! - **Overlap / missing reference**: recorded in the [`PassReport`] and
//!   logged with `warn!`; the remaining arrows are still computed.
//! - **Host busy**: if the host is already borrowed when a pass starts, the
//!   pass is abandoned and counted as suppressed.
//! - **Style write rejected**: logged; the arrow's visibility is unchanged.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use arrowdraw_core::{ArrowPipeline, GeometryError};
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, info, info_span, warn};
use web_time::Instant;

use crate::config::{ConfigError, RecalcConfig};
use crate::host::{LayoutHost, RenderSink};
use crate::reactive::{ChangeFilter, Mutation, MutationFeed, PassGuard, Subscription, in_pass};
use crate::render::ArrowStyle;
use crate::report::{ArrowOutcome, PassReport, RecalcStats};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Visibility {
    Shown,
    Hidden,
}

enum RenderAction {
    Show(String, ArrowStyle),
    Hide(String),
}

#[derive(Debug, Default)]
struct RecalcState {
    stats: RecalcStats,
    visibility: FxHashMap<String, Visibility>,
    last_report: Option<PassReport>,
}

struct RecalcInner<H> {
    host: Rc<RefCell<H>>,
    pipeline: ArrowPipeline,
    config: RecalcConfig,
    filter: ChangeFilter,
    state: RefCell<RecalcState>,
}

/// Keeps every declared arrow positioned as the host's layout changes.
///
/// Dropping the recalculator ends its subscription.
pub struct ReactiveRecalculator<H: LayoutHost + RenderSink + 'static> {
    inner: Rc<RecalcInner<H>>,
    subscription: RefCell<Option<Subscription>>,
}

impl<H: LayoutHost + RenderSink + 'static> std::fmt::Debug for ReactiveRecalculator<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReactiveRecalculator")
            .field("config", &self.inner.config)
            .field("stats", &self.stats())
            .field("active", &self.is_active())
            .finish()
    }
}

impl<H: LayoutHost + RenderSink + 'static> ReactiveRecalculator<H> {
    /// Create an inactive recalculator. No pass runs until
    /// [`recompute_all`](Self::recompute_all) is called.
    pub fn new(host: Rc<RefCell<H>>, config: RecalcConfig) -> Result<Self, ConfigError> {
        let errors = config.validate();
        if !errors.is_empty() {
            return Err(ConfigError::Invalid(errors));
        }
        Ok(Self {
            inner: Rc::new(RecalcInner {
                host,
                pipeline: config.pipeline(),
                config,
                filter: ChangeFilter,
                state: RefCell::new(RecalcState::default()),
            }),
            subscription: RefCell::new(None),
        })
    }

    /// Run the initial pass, then recompute on every layout-relevant batch
    /// published on `feed`.
    pub fn activate(
        host: Rc<RefCell<H>>,
        feed: &MutationFeed,
        config: RecalcConfig,
    ) -> Result<Self, ConfigError> {
        let recalc = Self::new(host, config)?;
        recalc.recompute_all();
        recalc.attach(feed);
        Ok(recalc)
    }

    /// Subscribe to `feed`, replacing any previous subscription.
    pub fn attach(&self, feed: &MutationFeed) {
        let weak: Weak<RecalcInner<H>> = Rc::downgrade(&self.inner);
        let subscription = feed.subscribe(move |batch| {
            if let Some(inner) = weak.upgrade() {
                inner.on_batch(batch);
            }
        });
        *self.subscription.borrow_mut() = Some(subscription);
    }

    /// Stop reacting to the feed. Returns `false` if already inactive.
    pub fn deactivate(&self) -> bool {
        match self.subscription.borrow_mut().take() {
            Some(subscription) => {
                subscription.unsubscribe();
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.subscription.borrow().is_some()
    }

    /// Run one full pass now.
    ///
    /// Returns `None` when the pass could not run: another pass is in
    /// progress on this thread, or the host is borrowed.
    pub fn recompute_all(&self) -> Option<PassReport> {
        self.inner.recompute_all()
    }

    #[must_use]
    pub fn stats(&self) -> RecalcStats {
        self.inner.state.borrow().stats
    }

    /// Report of the most recent completed pass.
    #[must_use]
    pub fn last_report(&self) -> Option<PassReport> {
        self.inner.state.borrow().last_report.clone()
    }

    #[must_use]
    pub fn config(&self) -> &RecalcConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn host(&self) -> &Rc<RefCell<H>> {
        &self.inner.host
    }
}

impl<H: LayoutHost + RenderSink> RecalcInner<H> {
    fn on_batch(&self, batch: &[Mutation]) {
        if in_pass() {
            self.state.borrow_mut().stats.suppressed += 1;
            debug!(records = batch.len(), "Suppressed notification during pass");
            return;
        }
        if !self.filter.is_layout_relevant(batch) {
            self.state.borrow_mut().stats.skipped += 1;
            debug!(records = batch.len(), "Skipped geometry-only batch");
            return;
        }
        self.recompute_all();
    }

    fn recompute_all(&self) -> Option<PassReport> {
        let Some(_guard) = PassGuard::enter() else {
            self.state.borrow_mut().stats.suppressed += 1;
            debug!("Suppressed nested pass");
            return None;
        };

        let pass = self.state.borrow().stats.passes + 1;
        let start = Instant::now();
        let span = info_span!(
            "arrowdraw.pass",
            pass,
            arrows = tracing::field::Empty,
            resolved = tracing::field::Empty,
            failed = tracing::field::Empty,
            duration_us = tracing::field::Empty
        );
        let _entered = span.enter();

        let (outcomes, pairs_scanned) = match self.host.try_borrow() {
            Ok(host) => self.compute(&*host),
            Err(_) => {
                self.state.borrow_mut().stats.suppressed += 1;
                warn!("Host is borrowed; pass abandoned");
                return None;
            }
        };
        self.render(&outcomes);

        let arrows = outcomes.len() as u64;
        let failed = outcomes.iter().filter(|o| o.is_failure()).count() as u64;
        let resolved = arrows - failed;
        let duration_us = start.elapsed().as_micros() as u64;
        span.record("arrows", arrows);
        span.record("resolved", resolved);
        span.record("failed", failed);
        span.record("duration_us", duration_us);
        info!(
            pass,
            arrows,
            resolved,
            failed,
            pairs_scanned,
            duration_us,
            "arrowdraw pass complete"
        );

        let report = PassReport {
            pass,
            outcomes,
            pairs_scanned,
            duration_us,
        };
        let mut state = self.state.borrow_mut();
        state.stats.passes = pass;
        state.last_report = Some(report.clone());
        Some(report)
    }

    fn compute(&self, host: &H) -> (Vec<ArrowOutcome>, u64) {
        let specs = host.declared_arrows();
        let mut outcomes = Vec::with_capacity(specs.len());
        let mut pairs_scanned = 0u64;

        for spec in specs {
            let (from, to) = match (host.bounds(&spec.from), host.bounds(&spec.to)) {
                (Some(from), Some(to)) => (from, to),
                (from, _) => {
                    let missing = if from.is_none() {
                        spec.from.clone()
                    } else {
                        spec.to.clone()
                    };
                    warn!(
                        arrow_id = %spec.id,
                        missing = %missing,
                        "Arrow references an unknown element; skipped"
                    );
                    outcomes.push(ArrowOutcome::MissingReference {
                        arrow_id: spec.id,
                        missing,
                    });
                    continue;
                }
            };

            match self.pipeline.compute_with_cost(&spec, &from, &to) {
                Ok(computed) => {
                    pairs_scanned += computed.pairs_scanned;
                    if computed.geometry.degenerate {
                        debug!(arrow_id = %spec.id, "Degenerate geometry clamped to zero");
                    }
                    outcomes.push(ArrowOutcome::Resolved(computed.geometry));
                }
                Err(GeometryError::Overlap { from, to }) => {
                    warn!(
                        arrow_id = %spec.id,
                        from = %from,
                        to = %to,
                        "Arrow endpoints overlap on both axes; geometry withheld"
                    );
                    outcomes.push(ArrowOutcome::OverlapFailure {
                        arrow_id: spec.id,
                        from,
                        to,
                    });
                }
            }
        }
        (outcomes, pairs_scanned)
    }

    fn render(&self, outcomes: &[ArrowOutcome]) {
        let actions: Vec<RenderAction> = {
            let state = self.state.borrow();
            outcomes
                .iter()
                .filter_map(|outcome| match outcome {
                    ArrowOutcome::Resolved(geometry) => Some(RenderAction::Show(
                        geometry.arrow_id.clone(),
                        ArrowStyle::from_geometry(geometry, self.config.head_px),
                    )),
                    failure => (!state.visibility.contains_key(failure.arrow_id()))
                        .then(|| RenderAction::Hide(failure.arrow_id().to_string())),
                })
                .collect()
        };

        let mut applied = Vec::with_capacity(actions.len());
        match self.host.try_borrow_mut() {
            Ok(mut host) => {
                for action in actions {
                    match action {
                        RenderAction::Show(id, style) => match host.apply_arrow_style(&id, &style) {
                            Ok(()) => applied.push((id, Visibility::Shown)),
                            Err(err) => warn!(
                                arrow_id = %id,
                                error_type = err.error_type(),
                                "Failed to apply arrow style: {err}"
                            ),
                        },
                        RenderAction::Hide(id) => match host.hide_arrow(&id) {
                            Ok(()) => applied.push((id, Visibility::Hidden)),
                            Err(err) => warn!(
                                arrow_id = %id,
                                error_type = err.error_type(),
                                "Failed to hide arrow: {err}"
                            ),
                        },
                    }
                }
            }
            Err(_) => warn!("Host is borrowed; styles not written"),
        }

        let declared: FxHashSet<&str> = outcomes.iter().map(ArrowOutcome::arrow_id).collect();
        let mut state = self.state.borrow_mut();
        state.visibility.retain(|id, _| declared.contains(id.as_str()));
        state.visibility.extend(applied);
    }
}
