use resq_core::IncidentId;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

/// Per-incident single-flight guard. Two concurrent automatic-processing
/// runs for the same incident would double-create service rows; the second
/// caller is turned away instead.
#[derive(Debug, Clone, Default)]
pub struct SingleFlight {
    inner: Arc<Mutex<HashSet<IncidentId>>>,
}

impl SingleFlight {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the incident. Returns None when another run already holds it;
    /// the claim is released when the guard drops.
    pub fn begin(&self, id: IncidentId) -> Option<InFlightGuard> {
        let mut in_flight = self.inner.lock().unwrap_or_else(|err| err.into_inner());
        if in_flight.insert(id) {
            Some(InFlightGuard {
                inner: Arc::clone(&self.inner),
                id,
            })
        } else {
            None
        }
    }
}

pub struct InFlightGuard {
    inner: Arc<Mutex<HashSet<IncidentId>>>,
    id: IncidentId,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        let mut in_flight = self.inner.lock().unwrap_or_else(|err| err.into_inner());
        in_flight.remove(&self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_claim_is_rejected_until_release() {
        let flight = SingleFlight::new();
        let id = IncidentId::new();

        let guard = flight.begin(id).expect("first claim");
        assert!(flight.begin(id).is_none());

        drop(guard);
        assert!(flight.begin(id).is_some());
    }

    #[test]
    fn claims_are_independent_per_incident() {
        let flight = SingleFlight::new();
        let _first = flight.begin(IncidentId::new()).expect("first");
        assert!(flight.begin(IncidentId::new()).is_some());
    }
}
