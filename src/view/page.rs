use crate::models::Roster;
use crate::view::dom::Element;
use crate::view::renderer;

/// Everything the controller owns about the page: the roster model, the two
/// rendered containers, and the signup form fields. Shared behind a
/// `std::sync::Mutex`; callers lock around state edits and never across an
/// await, so independent in-flight requests can interleave freely.
#[derive(Debug)]
pub struct PageState {
    pub roster: Roster,
    pub activities_list: Element,
    pub activity_select: Element,
    pub signup_form: SignupForm,
}

#[derive(Debug, Default, Clone)]
pub struct SignupForm {
    pub email: String,
    pub activity: String,
}

impl SignupForm {
    pub fn reset(&mut self) {
        self.email.clear();
        self.activity.clear();
    }
}

impl PageState {
    pub fn new() -> Self {
        let mut activities_list = Element::new("div").with_id("activities-list");
        renderer::render_loading(&mut activities_list);
        PageState {
            roster: Roster::default(),
            activities_list,
            activity_select: Element::new("select").with_id("activity"),
            signup_form: SignupForm::default(),
        }
    }

    /// Full render: rebuild both containers from the current roster.
    pub fn render_all(&mut self) {
        renderer::render_cards_into(&mut self.activities_list, &self.roster);
        renderer::render_options_into(&mut self.activity_select, &self.roster);
    }
}

impl Default for PageState {
    fn default() -> Self {
        Self::new()
    }
}
