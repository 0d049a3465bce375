pub mod dom;
pub mod page;
pub mod renderer;

pub use dom::Element;
pub use page::{PageState, SignupForm};
pub use renderer::StructuralGap;
