use std::collections::BTreeSet;

/// Actions that must not be submitted twice while the first is in flight.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) enum PendingAction {
    Login,
    CreateBooking,
    UploadPayment,
    /// Per booking id, so cancelling one booking does not block another.
    Cancel(i64),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct PendingActions(BTreeSet<PendingAction>);

impl PendingActions {
    /// Mark `action` in flight. `false` if it already was.
    pub fn try_begin(&mut self, action: PendingAction) -> bool {
        self.0.insert(action)
    }

    pub fn finish(&mut self, action: PendingAction) {
        self.0.remove(&action);
    }

    pub fn is_pending(&self, action: PendingAction) -> bool {
        self.0.contains(&action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_submit_is_rejected_until_finished() {
        let mut p = PendingActions::default();
        assert!(p.try_begin(PendingAction::CreateBooking));
        assert!(!p.try_begin(PendingAction::CreateBooking));
        assert!(p.is_pending(PendingAction::CreateBooking));

        p.finish(PendingAction::CreateBooking);
        assert!(!p.is_pending(PendingAction::CreateBooking));
        assert!(p.try_begin(PendingAction::CreateBooking));
    }

    #[test]
    fn test_cancel_locks_are_per_booking() {
        let mut p = PendingActions::default();
        assert!(p.try_begin(PendingAction::Cancel(1)));
        assert!(p.try_begin(PendingAction::Cancel(2)));
        assert!(!p.try_begin(PendingAction::Cancel(1)));
        assert!(p.try_begin(PendingAction::UploadPayment));
    }
}
