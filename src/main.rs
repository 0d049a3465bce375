use std::io::{self, BufRead, Write};
use std::sync::Mutex;

use dotenvy::dotenv;

use rosterfront::remote::HttpRosterStore;
use rosterfront::services::gates::ConsoleGate;
use rosterfront::services::notifier_service::Notifier;
use rosterfront::services::{loader_service, signup_service, unregister_service};
use rosterfront::view::PageState;

#[tokio::main]
async fn main() {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let store = HttpRosterStore::from_env();
    let page = Mutex::new(PageState::new());
    let notifier = Notifier::new();
    let gate = ConsoleGate;

    loader_service::load_roster(&store, &page).await;
    print_page(&page, &notifier);

    // Terminal stand-in for the page's signup form and row controls.
    println!("commands: list | signup <activity> <email> | remove <activity> <email> | quit");
    let stdin = io::stdin();
    loop {
        print!("> ");
        let _ = io::stdout().flush();
        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let line = line.trim();

        if line == "quit" || line == "exit" {
            break;
        }
        if line.is_empty() || line == "list" {
            print_page(&page, &notifier);
            continue;
        }
        if let Some(rest) = line.strip_prefix("signup ") {
            if let Some((activity, email)) = split_target(rest) {
                signup_service::sign_up(&store, &page, &notifier, activity, email).await;
                print_page(&page, &notifier);
                continue;
            }
        }
        if let Some(rest) = line.strip_prefix("remove ") {
            if let Some((activity, email)) = split_target(rest) {
                unregister_service::unregister(
                    &store, &page, &notifier, &gate, &gate, activity, email,
                )
                .await;
                print_page(&page, &notifier);
                continue;
            }
        }
        println!("commands: list | signup <activity> <email> | remove <activity> <email> | quit");
    }
}

// Activity names contain spaces, so the email is whatever follows the last
// space: `signup Chess Club a@x.com`.
fn split_target(rest: &str) -> Option<(&str, &str)> {
    let (activity, email) = rest.rsplit_once(' ')?;
    let (activity, email) = (activity.trim(), email.trim());
    if activity.is_empty() || email.is_empty() {
        return None;
    }
    Some((activity, email))
}

fn print_page(page: &Mutex<PageState>, notifier: &Notifier) {
    let page = page.lock().unwrap();
    println!("{}", page.activities_list.to_html());
    println!("{}", page.activity_select.to_html());
    let banner = notifier.snapshot();
    if banner.visible {
        let kind = banner.kind.map(|k| k.as_str()).unwrap_or("info");
        println!("[{}] {}", kind, banner.text);
    }
}
