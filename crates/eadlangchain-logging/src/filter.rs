//! Threshold filter for the process-wide subscriber.
//!
//! Only events are filtered. Spans always stay enabled so the formatter can
//! name the enclosing function even when the threshold is above the span's
//! level.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::field::{Field, Visit};
use tracing::subscriber::Interest;
use tracing::{Event, Metadata, Subscriber};
use tracing_subscriber::layer::{Context, Layer};

use crate::Severity;
use crate::format::CRITICAL_FIELD;

/// Event filter whose threshold can be swapped at runtime.
#[derive(Debug, Clone)]
pub(crate) struct ThresholdFilter {
    threshold: Arc<RwLock<Severity>>,
}

impl ThresholdFilter {
    pub(crate) fn new(threshold: Arc<RwLock<Severity>>) -> Self {
        Self { threshold }
    }
}

impl<S: Subscriber> Layer<S> for ThresholdFilter {
    fn register_callsite(&self, _metadata: &'static Metadata<'static>) -> Interest {
        // The threshold changes between calls, so never cache a decision.
        Interest::sometimes()
    }

    fn enabled(&self, metadata: &Metadata<'_>, _ctx: Context<'_, S>) -> bool {
        metadata.is_span() || *metadata.level() <= self.threshold.read().to_level_filter()
    }

    fn event_enabled(&self, event: &Event<'_>, _ctx: Context<'_, S>) -> bool {
        if *self.threshold.read() != Severity::Critical {
            return true;
        }
        let mut visitor = CriticalVisitor::default();
        event.record(&mut visitor);
        visitor.critical
    }
}

#[derive(Default)]
struct CriticalVisitor {
    critical: bool,
}

impl Visit for CriticalVisitor {
    fn record_bool(&mut self, field: &Field, value: bool) {
        if field.name() == CRITICAL_FIELD {
            self.critical = value;
        }
    }

    fn record_debug(&mut self, _field: &Field, _value: &dyn std::fmt::Debug) {}
}
