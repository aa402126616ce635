//! AMF-level statistics
//!
//! Owns the two Prometheus instrument families the AMF exposes: an NGAP
//! message counter and a gNB session-profile gauge. Construction and
//! registration are explicit so the process entry point can fail fast on a
//! duplicate registration instead of running with telemetry silently missing.

use std::sync::Arc;

use prometheus::{GaugeVec, IntCounterVec, Opts, Registry};

use crate::error::Result;

/// Counter family name, fixed for dashboard compatibility.
pub const NGAP_MESSAGES_TOTAL: &str = "ngap_messages_total";

/// Gauge family name, fixed for dashboard compatibility.
pub const GNB_SESSION_PROFILE: &str = "gnb_session_profile";

const NGAP_LABELS: &[&str] = &["amf_id", "msg_type", "direction", "result", "reason"];
const SESSION_LABELS: &[&str] = &["id", "ip", "state", "tac"];

/// AMF-level stats handle.
///
/// Writers receive this by shared ownership (`Arc`), so no write can happen
/// before [`AmfStats::register`] has completed. Label cardinality is
/// unbounded here: every distinct label tuple allocates a series that lives
/// until the process exits, so callers must not pass free-text or otherwise
/// unbounded values.
pub struct AmfStats {
    ngap_msg: IntCounterVec,
    gnb_session_profile: GaugeVec,
}

impl AmfStats {
    /// Construct both instrument families and register them with `registry`.
    ///
    /// # Errors
    ///
    /// Fails if a collector with the same name is already registered. This
    /// is a fatal configuration error: the caller should terminate the
    /// process with a diagnostic rather than continue without telemetry.
    pub fn register(registry: &Registry) -> Result<Arc<Self>> {
        let ngap_msg = IntCounterVec::new(
            Opts::new(NGAP_MESSAGES_TOTAL, "ngap interface counters"),
            NGAP_LABELS,
        )?;
        let gnb_session_profile = GaugeVec::new(
            Opts::new(GNB_SESSION_PROFILE, "gNB session Profile"),
            SESSION_LABELS,
        )?;

        registry.register(Box::new(ngap_msg.clone()))?;
        registry.register(Box::new(gnb_session_profile.clone()))?;

        Ok(Arc::new(Self {
            ngap_msg,
            gnb_session_profile,
        }))
    }

    /// Increment the NGAP message counter for the given label tuple.
    ///
    /// Creates the series on first use and increments it atomically; safe to
    /// call from any number of threads concurrently. No validation is done
    /// on the label values.
    pub fn inc_ngap_msg(
        &self,
        amf_id: &str,
        msg_type: &str,
        direction: &str,
        result: &str,
        reason: &str,
    ) {
        self.ngap_msg
            .with_label_values(&[amf_id, msg_type, direction, result, reason])
            .inc();
    }

    /// Record a gNB session profile, last write wins per `(id, ip, state)`.
    ///
    /// The `tac` label is declared in the family schema for dashboard
    /// compatibility but is never supplied as a label value; the
    /// tracking-area-code travels as the gauge's numeric value instead. The
    /// label slot is filled with the empty string so the series stays keyed
    /// by `(id, ip, state)` only. Existing dashboards depend on this shape.
    pub fn set_gnb_session_profile(&self, id: &str, ip: &str, state: &str, tac: u64) {
        self.gnb_session_profile
            .with_label_values(&[id, ip, state, ""])
            .set(tac as f64);
    }
}

impl std::fmt::Debug for AmfStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AmfStats").finish()
    }
}
