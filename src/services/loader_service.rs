use std::sync::Mutex;

use tracing::error;

use crate::models::Roster;
use crate::remote::RosterStore;
use crate::view::{renderer, PageState};

/// Initial full fetch + full render. Any failure leaves the model empty and
/// swaps the activities container for the fallback message; nothing retries.
pub async fn load_roster<S: RosterStore>(store: &S, page: &Mutex<PageState>) {
    match store.fetch_activities().await {
        Ok(roster) => {
            let mut page = page.lock().unwrap();
            page.roster = roster;
            page.render_all();
        }
        Err(err) => {
            error!("initial roster load failed: {}", err);
            let mut page = page.lock().unwrap();
            page.roster = Roster::default();
            renderer::render_load_failure(&mut page.activities_list);
        }
    }
}
