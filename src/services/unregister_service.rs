use std::sync::Mutex;

use tracing::{debug, error, warn};

use crate::remote::RosterStore;
use crate::services::gates::{AlertGate, ConfirmationGate};
use crate::services::notifier_service::{MessageKind, Notifier, UNREGISTER_NOTICE_TTL};
use crate::view::{renderer, PageState};

/// Remove a participant row after interactive confirmation. Declining does
/// nothing at all; while a request is in flight the row's control stays
/// disabled so the same row cannot be submitted twice.
pub async fn unregister<S, C, A>(
    store: &S,
    page: &Mutex<PageState>,
    notifier: &Notifier,
    confirmation: &C,
    alerts: &A,
    activity: &str,
    email: &str,
) where
    S: RosterStore,
    C: ConfirmationGate,
    A: AlertGate,
{
    if !confirmation.confirm(&format!("Unregister {} from {}?", email, activity)) {
        return;
    }

    if !claim_control(page, activity, email) {
        return;
    }

    match store.unregister(activity, email).await {
        Ok(()) => {
            apply_unregister(page, activity, email);
            notifier.notify(
                format!("{} unregistered from {}.", email, activity),
                MessageKind::Success,
                UNREGISTER_NOTICE_TTL,
            );
        }
        Err(err) => {
            error!("unregister request failed: {}", err);
            release_control(page, activity, email);
            alerts.alert(&format!("Could not unregister participant: {}", err));
        }
    }
}

/// Per-row reentrancy guard: disable the row's remove control before the
/// request goes out. Returns false when there is nothing to claim.
fn claim_control(page: &Mutex<PageState>, activity: &str, email: &str) -> bool {
    let mut page = page.lock().unwrap();
    let Some(control) = renderer::remove_control_mut(&mut page.activities_list, activity, email)
    else {
        warn!("remove control for {} in {:?} is gone", email, activity);
        return false;
    };
    if control.disabled {
        debug!("unregister for {} in {:?} already in flight", email, activity);
        return false;
    }
    control.disabled = true;
    true
}

fn release_control(page: &Mutex<PageState>, activity: &str, email: &str) {
    let mut page = page.lock().unwrap();
    if let Some(control) = renderer::remove_control_mut(&mut page.activities_list, activity, email)
    {
        control.disabled = false;
    }
}

fn apply_unregister(page: &Mutex<PageState>, activity: &str, email: &str) {
    let mut page = page.lock().unwrap();
    let spots_left = page.roster.activity_mut(activity).map(|a| {
        a.participants.retain(|p| p != email);
        a.spots_left()
    });
    let Some(spots_left) = spots_left else {
        warn!("store acknowledged unregister for unknown activity {:?}", activity);
        return;
    };
    if let Err(gap) =
        renderer::remove_participant(&mut page.activities_list, activity, email, spots_left)
    {
        warn!("unregister applied but view patch skipped: {}", gap);
    }
}
