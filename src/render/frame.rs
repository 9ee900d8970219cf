use crate::api::{CarouselState, LayoutMode};
use crate::core::{CarouselPhase, ContentItem};
use crate::error::{CarouselError, CarouselResult};

use super::CardRenderer;
use super::markup::{
    ACTIVE_DOT_CLASS, ARROW_CLASS, CAROUSEL_MODIFIER, DOT_CLASS, DOTS_CLASS, EMPTY_MESSAGE,
    EMPTY_MODIFIER, ERROR_MODIFIER, GRID_MODIFIER, LOADING_MODIFIER, NEXT_ARROW_CLASS, NEXT_LABEL,
    PREV_ARROW_CLASS, PREV_LABEL, ROOT_CLASS, SLIDE_CLASS, SLIDE_LIST_CLASS, VIEWPORT_CLASS,
    slide_label,
};

/// Landmark attributes of the focusable carousel region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionAttributes {
    pub role: &'static str,
    pub aria_label: String,
    pub aria_roledescription: &'static str,
    pub tabindex: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SlideFrame<'a> {
    pub position: usize,
    pub item: &'a ContentItem,
    pub class: &'static str,
    pub role: &'static str,
    pub aria_roledescription: &'static str,
    pub aria_label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrowFrame {
    /// Shared arrow class followed by its direction modifier.
    pub classes: [&'static str; 2],
    pub aria_label: &'static str,
    pub disabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DotFrame {
    pub index: usize,
    pub classes: Vec<&'static str>,
    pub aria_label: String,
    /// `aria-current` value; present only on the active dot.
    pub aria_current: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReadyFrame<'a> {
    pub region: RegionAttributes,
    pub layout_mode: LayoutMode,
    /// Clipping element the sliding engine is attached to.
    pub viewport_class: &'static str,
    /// Direct parent of the slides.
    pub slide_list_class: &'static str,
    pub slides: Vec<SlideFrame<'a>>,
    /// Absent in grid layout.
    pub previous: Option<ArrowFrame>,
    pub next: Option<ArrowFrame>,
    pub dots_class: Option<&'static str>,
    pub dots: Vec<DotFrame>,
}

impl ReadyFrame<'_> {
    /// Hands each slide's item to the card renderer, in slide order.
    pub fn render_cards<C: CardRenderer>(&self, cards: &mut C) -> Vec<C::Output> {
        self.slides
            .iter()
            .map(|slide| cards.render_card(slide.item))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FrameBody<'a> {
    Loading,
    Error { message: String },
    Empty { message: &'static str },
    Ready(ReadyFrame<'a>),
}

/// Deterministic description of the rendered tree for one phase.
#[derive(Debug, Clone, PartialEq)]
pub struct CarouselFrame<'a> {
    pub root_classes: Vec<&'static str>,
    pub body: FrameBody<'a>,
}

impl<'a> CarouselFrame<'a> {
    #[must_use]
    pub fn build(state: &'a CarouselState) -> Self {
        let mut root_classes = vec![ROOT_CLASS];
        let body = match state.phase() {
            CarouselPhase::Loading => {
                root_classes.push(LOADING_MODIFIER);
                FrameBody::Loading
            }
            CarouselPhase::Error(message) => {
                root_classes.push(ERROR_MODIFIER);
                FrameBody::Error {
                    message: message.clone(),
                }
            }
            CarouselPhase::Empty => {
                root_classes.push(EMPTY_MODIFIER);
                FrameBody::Empty {
                    message: EMPTY_MESSAGE,
                }
            }
            CarouselPhase::Ready => {
                let layout_mode = state.layout_mode();
                root_classes.push(match layout_mode {
                    LayoutMode::Carousel => CAROUSEL_MODIFIER,
                    LayoutMode::Grid => GRID_MODIFIER,
                });
                FrameBody::Ready(build_ready(state, layout_mode))
            }
        };
        Self { root_classes, body }
    }

    #[must_use]
    pub fn ready(&self) -> Option<&ReadyFrame<'a>> {
        match &self.body {
            FrameBody::Ready(ready) => Some(ready),
            _ => None,
        }
    }

    /// Checks the accessibility contract of the frame.
    pub fn validate(&self) -> CarouselResult<()> {
        match &self.body {
            FrameBody::Loading | FrameBody::Empty { .. } => Ok(()),
            FrameBody::Error { message } => {
                if message.trim().is_empty() {
                    return Err(CarouselError::InvalidData(
                        "error frame must carry a message".to_owned(),
                    ));
                }
                Ok(())
            }
            FrameBody::Ready(ready) => validate_ready(ready),
        }
    }
}

fn build_ready<'a>(state: &'a CarouselState, layout_mode: LayoutMode) -> ReadyFrame<'a> {
    let items = state.items();
    let layout = state.layout();
    let slides = items
        .iter()
        .enumerate()
        .map(|(position, item)| SlideFrame {
            position,
            item,
            class: SLIDE_CLASS,
            role: "group",
            aria_roledescription: "slide",
            aria_label: slide_label(position, items.len()),
        })
        .collect();

    let (previous, next, dots_class, dots) = match layout_mode {
        LayoutMode::Grid => (None, None, None, Vec::new()),
        LayoutMode::Carousel => {
            let dots = layout
                .dots
                .iter()
                .map(|dot| {
                    let mut classes = vec![DOT_CLASS];
                    if dot.is_active {
                        classes.push(ACTIVE_DOT_CLASS);
                    }
                    DotFrame {
                        index: dot.index,
                        classes,
                        aria_label: dot.label.clone(),
                        aria_current: dot.is_active.then_some("true"),
                    }
                })
                .collect();
            (
                Some(ArrowFrame {
                    classes: [ARROW_CLASS, PREV_ARROW_CLASS],
                    aria_label: PREV_LABEL,
                    disabled: !layout.can_scroll_prev,
                }),
                Some(ArrowFrame {
                    classes: [ARROW_CLASS, NEXT_ARROW_CLASS],
                    aria_label: NEXT_LABEL,
                    disabled: !layout.can_scroll_next,
                }),
                Some(DOTS_CLASS),
                dots,
            )
        }
    };

    ReadyFrame {
        region: RegionAttributes {
            role: "region",
            aria_label: state.settings().region_label.clone(),
            aria_roledescription: "carousel",
            tabindex: 0,
        },
        layout_mode,
        viewport_class: VIEWPORT_CLASS,
        slide_list_class: SLIDE_LIST_CLASS,
        slides,
        previous,
        next,
        dots_class,
        dots,
    }
}

fn validate_ready(ready: &ReadyFrame<'_>) -> CarouselResult<()> {
    if ready.slides.is_empty() {
        return Err(CarouselError::InvalidData(
            "ready frame must contain at least one slide".to_owned(),
        ));
    }
    if ready.region.aria_label.trim().is_empty() {
        return Err(CarouselError::InvalidData(
            "carousel region must be labelled".to_owned(),
        ));
    }
    let total = ready.slides.len();
    for (position, slide) in ready.slides.iter().enumerate() {
        if slide.position != position || slide.aria_label != slide_label(position, total) {
            return Err(CarouselError::InvalidData(format!(
                "slide {position} carries a stale positional label"
            )));
        }
    }
    if !ready.dots.is_empty() {
        let active = ready
            .dots
            .iter()
            .filter(|dot| dot.aria_current.is_some())
            .count();
        if active != 1 {
            return Err(CarouselError::InvalidData(format!(
                "expected exactly one active dot, found {active}"
            )));
        }
    }
    Ok(())
}
