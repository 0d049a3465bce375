use thiserror::Error;

use crate::models::{Activity, Roster};
use crate::view::dom::Element;

/// An expected container is missing from the visual tree. Non-fatal: the
/// affected patch is abandoned, the controller keeps going.
#[derive(Debug, Error)]
#[error("missing {missing} for activity {activity:?}")]
pub struct StructuralGap {
    pub missing: &'static str,
    pub activity: String,
}

const EMPTY_PLACEHOLDER_TEXT: &str = "No participants yet";
const LOAD_FAILURE_TEXT: &str = "Failed to load activities. Please try again later.";
const LOADING_TEXT: &str = "Loading activities...";
const SELECT_PLACEHOLDER_TEXT: &str = "-- Select an activity --";

/// Rebuild the activities container from the roster, cards in roster order.
pub fn render_cards_into(list: &mut Element, roster: &Roster) {
    list.clear_children();
    for activity in &roster.activities {
        list.children.push(activity_card(activity));
    }
}

/// Rebuild the activity selector: placeholder option first, then one option
/// per activity in roster order.
pub fn render_options_into(select: &mut Element, roster: &Roster) {
    select.clear_children();
    select.children.push(
        Element::new("option")
            .with_attr("value", "")
            .with_text(SELECT_PLACEHOLDER_TEXT),
    );
    for activity in &roster.activities {
        select.children.push(
            Element::new("option")
                .with_attr("value", activity.name.clone())
                .with_text(activity.name.clone()),
        );
    }
}

pub fn render_loading(list: &mut Element) {
    list.clear_children();
    list.children.push(Element::new("p").with_text(LOADING_TEXT));
}

pub fn render_load_failure(list: &mut Element) {
    list.clear_children();
    list.children.push(Element::new("p").with_text(LOAD_FAILURE_TEXT));
}

/// Append one participant row to an already-rendered card. Safe to call with
/// already-applied state: an existing row for (activity, email) is left
/// alone. Also refreshes the card's availability line so the displayed
/// remaining capacity tracks the model between full renders.
pub fn insert_participant(
    list: &mut Element,
    activity: &str,
    email: &str,
    spots_left: i64,
) -> Result<(), StructuralGap> {
    let card = card_mut(list, activity)?;
    refresh_availability(card, spots_left);

    let section = participants_section(card, activity)?;
    if let Some(ul) = section.child_by_tag("ul") {
        let exists = ul
            .children
            .iter()
            .any(|li| li.attr("data-activity") == Some(activity) && li.attr("data-email") == Some(email));
        if exists {
            return Ok(());
        }
    }

    section.retain_children(|c| !c.has_class("no-participants"));
    if section.child_by_tag("ul").is_none() {
        section.children.push(Element::new("ul"));
    }
    if let Some(ul) = section.child_by_tag_mut("ul") {
        ul.children.push(participant_row(activity, email));
    }
    Ok(())
}

/// Remove the row matching (activity, email). When the list empties out the
/// placeholder comes back; a row that is already gone is a no-op.
pub fn remove_participant(
    list: &mut Element,
    activity: &str,
    email: &str,
    spots_left: i64,
) -> Result<(), StructuralGap> {
    let card = card_mut(list, activity)?;
    refresh_availability(card, spots_left);

    let section = participants_section(card, activity)?;
    let Some(ul) = section.child_by_tag_mut("ul") else {
        return Ok(());
    };
    ul.retain_children(|li| {
        !(li.attr("data-activity") == Some(activity) && li.attr("data-email") == Some(email))
    });
    if ul.children.is_empty() {
        section.retain_children(|c| c.tag != "ul");
        section
            .children
            .push(empty_placeholder());
    }
    Ok(())
}

/// The removal control for one row, used by the unregister flow as its
/// per-row reentrancy guard.
pub fn remove_control_mut<'a>(
    list: &'a mut Element,
    activity: &str,
    email: &str,
) -> Option<&'a mut Element> {
    list.find_mut(&|e| {
        e.has_class("remove-participant")
            && e.attr("data-activity") == Some(activity)
            && e.attr("data-email") == Some(email)
    })
}

fn activity_card(activity: &Activity) -> Element {
    let mut participants = Element::new("div")
        .with_class("participants")
        .with_child(Element::new("strong").with_text("Participants:"));
    if activity.participants.is_empty() {
        participants.children.push(empty_placeholder());
    } else {
        let mut ul = Element::new("ul");
        for email in &activity.participants {
            ul.children.push(participant_row(&activity.name, email));
        }
        participants.children.push(ul);
    }

    Element::new("div")
        .with_class("activity-card")
        .with_child(Element::new("h4").with_text(activity.name.clone()))
        .with_child(Element::new("p").with_text(activity.description.clone()))
        .with_child(Element::new("p").with_text(format!("Schedule: {}", activity.schedule)))
        .with_child(availability_line(activity.spots_left()))
        .with_child(participants)
}

fn participant_row(activity: &str, email: &str) -> Element {
    Element::new("li")
        .with_class("participant")
        .with_attr("data-activity", activity)
        .with_attr("data-email", email)
        .with_child(
            Element::new("span")
                .with_class("participant-name")
                .with_text(email),
        )
        .with_child(
            Element::new("button")
                .with_class("remove-participant")
                .with_attr("type", "button")
                .with_attr("title", "Unregister participant")
                .with_attr("aria-label", format!("Unregister {}", email))
                .with_attr("data-activity", activity)
                .with_attr("data-email", email)
                .with_text("\u{d7}"),
        )
}

fn availability_line(spots_left: i64) -> Element {
    Element::new("p")
        .with_class("availability")
        .with_text(format!("{} spots left", spots_left))
}

fn empty_placeholder() -> Element {
    Element::new("p")
        .with_class("no-participants")
        .with_text(EMPTY_PLACEHOLDER_TEXT)
}

fn refresh_availability(card: &mut Element, spots_left: i64) {
    if let Some(line) = card.child_by_class_mut("availability") {
        line.text = Some(format!("{} spots left", spots_left));
    }
}

fn card_mut<'a>(list: &'a mut Element, activity: &str) -> Result<&'a mut Element, StructuralGap> {
    let found = list.children.iter_mut().find(|c| {
        c.has_class("activity-card")
            && c.child_by_tag("h4").and_then(|h| h.text.as_deref()) == Some(activity)
    });
    found.ok_or_else(|| StructuralGap {
        missing: "activity card",
        activity: activity.to_string(),
    })
}

fn participants_section<'a>(
    card: &'a mut Element,
    activity: &str,
) -> Result<&'a mut Element, StructuralGap> {
    card.child_by_class_mut("participants").ok_or_else(|| StructuralGap {
        missing: "participants section",
        activity: activity.to_string(),
    })
}
