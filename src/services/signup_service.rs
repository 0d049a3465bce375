use std::sync::Mutex;

use tracing::{debug, error, warn};

use crate::remote::{RosterApiError, RosterStore};
use crate::services::notifier_service::{MessageKind, Notifier, SIGNUP_NOTICE_TTL};
use crate::view::{renderer, PageState};

/// Sign an email up for an activity. The model and the view change only
/// after the store acknowledges; every failure leaves both untouched and
/// reports through the banner.
pub async fn sign_up<S: RosterStore>(
    store: &S,
    page: &Mutex<PageState>,
    notifier: &Notifier,
    activity: &str,
    email: &str,
) {
    if activity.is_empty() || email.is_empty() {
        notifier.notify(
            "Please pick an activity and enter an email.",
            MessageKind::Error,
            SIGNUP_NOTICE_TTL,
        );
        return;
    }

    debug!("signup submitting {} for {:?}", email, activity);
    match store.signup(activity, email).await {
        Ok(receipt) => {
            // The store's copy of the identifier wins when it returns one.
            let applied_email = receipt.email.unwrap_or_else(|| email.to_string());
            let message = receipt
                .message
                .unwrap_or_else(|| format!("Signed up {} for {}", applied_email, activity));
            apply_signup(page, activity, &applied_email);
            debug!("signup applied for {} in {:?}", applied_email, activity);
            notifier.notify(message, MessageKind::Success, SIGNUP_NOTICE_TTL);
        }
        Err(RosterApiError::Http { detail, .. }) => {
            let text = if detail.is_empty() {
                "An error occurred".to_string()
            } else {
                detail
            };
            notifier.notify(text, MessageKind::Error, SIGNUP_NOTICE_TTL);
        }
        Err(err) => {
            error!("signup request failed: {}", err);
            notifier.notify(
                "Failed to sign up. Please try again.",
                MessageKind::Error,
                SIGNUP_NOTICE_TTL,
            );
        }
    }
}

fn apply_signup(page: &Mutex<PageState>, activity: &str, email: &str) {
    let mut page = page.lock().unwrap();
    let spots_left = page.roster.activity_mut(activity).map(|a| {
        a.participants.push(email.to_string());
        a.spots_left()
    });
    let Some(spots_left) = spots_left else {
        warn!("store acknowledged signup for unknown activity {:?}", activity);
        return;
    };
    if let Err(gap) = renderer::insert_participant(&mut page.activities_list, activity, email, spots_left)
    {
        warn!("signup applied but view patch skipped: {}", gap);
    }
    page.signup_form.reset();
}
