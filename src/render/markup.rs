//! Stable class names of the rendered markup contract.

pub const ROOT_CLASS: &str = "topic-cards-carousel";
pub const VIEWPORT_CLASS: &str = "topic-cards-carousel__viewport";
pub const SLIDE_LIST_CLASS: &str = "topic-cards-carousel__container";
pub const SLIDE_CLASS: &str = "topic-cards-carousel__slide";
pub const ARROW_CLASS: &str = "topic-cards-carousel__arrow";
pub const PREV_ARROW_CLASS: &str = "topic-cards-carousel__arrow--prev";
pub const NEXT_ARROW_CLASS: &str = "topic-cards-carousel__arrow--next";
pub const DOTS_CLASS: &str = "topic-cards-carousel__dots";
pub const DOT_CLASS: &str = "topic-cards-carousel__dot";
pub const ACTIVE_DOT_CLASS: &str = "topic-cards-carousel__dot--active";

pub const LOADING_MODIFIER: &str = "topic-cards-carousel--loading";
pub const ERROR_MODIFIER: &str = "topic-cards-carousel--error";
pub const EMPTY_MODIFIER: &str = "topic-cards-carousel--empty";
pub const CAROUSEL_MODIFIER: &str = "topic-cards-carousel--carousel";
pub const GRID_MODIFIER: &str = "topic-cards-carousel--grid";

pub const PREV_LABEL: &str = "Previous slide";
pub const NEXT_LABEL: &str = "Next slide";
pub const EMPTY_MESSAGE: &str = "No topics to show.";

#[must_use]
pub fn slide_label(position: usize, total: usize) -> String {
    format!("Slide {} of {}", position + 1, total)
}
