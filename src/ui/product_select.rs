use iced::widget::image::Handle;
use iced::widget::{button, column, container, image, mouse_area, row, scrollable, text, Space};
use iced::{Alignment, Border, Color, ContentFit, Element, Length, Padding, Theme};
use std::collections::HashMap;

use crate::state::data::{Survey, SurveyStyle};

/// Label shown on the trigger before any pick
pub const PLACEHOLDER_LABEL: &str = "Select a product...";

/// Width of the whole form column
pub const FORM_WIDTH: f32 = 420.0;

/// Tallest the option menu gets before it scrolls
const MENU_MAX_HEIGHT: f32 = 240.0;

/// Vertical spacing between the form's blocks
const BLOCK_SPACING: f32 = 24.0;

/// Nominal block heights, used to drop the menu in just below the trigger
const HEADER_BLOCK: f32 = 64.0;
const PROMO_BLOCK: f32 = 156.0;
const QUESTION_LABEL: f32 = 26.0;
const TRIGGER_HEIGHT: f32 = 46.0;
const MENU_GAP: f32 = 4.0;

/// Events produced by the picker's interactive parts
#[derive(Debug, Clone)]
pub enum Event {
    /// The trigger control was pressed
    TriggerPressed,
    /// An option row was pressed
    ProductPicked(String),
    /// A press landed anywhere the open menu does not capture
    Dismissed,
}

/// The product picker dropdown
///
/// Owns nothing but its open/closed state. The selected product id lives
/// with the caller and is passed back in for rendering; picks are handed
/// back out of `update`.
pub struct ProductSelect {
    menu_open: bool,
}

impl ProductSelect {
    /// Create a picker with the menu closed
    pub fn new() -> Self {
        Self { menu_open: false }
    }

    /// Whether the option menu is currently open
    pub fn is_open(&self) -> bool {
        self.menu_open
    }

    /// Handle a picker event
    ///
    /// Returns the picked product id when an option row was activated;
    /// every other event returns None. Picking or dismissing closes the
    /// menu, pressing the trigger toggles it.
    pub fn update(&mut self, event: Event) -> Option<String> {
        match event {
            Event::TriggerPressed => {
                self.menu_open = !self.menu_open;
                None
            }
            Event::ProductPicked(product_id) => {
                self.menu_open = false;
                Some(product_id)
            }
            Event::Dismissed => {
                self.menu_open = false;
                None
            }
        }
    }

    /// Build the form: header, optional promo banner, question and trigger
    ///
    /// The option menu is not part of this tree; it lives in `overlay` so
    /// it can float above the rest of the page.
    pub fn view<'a>(
        &'a self,
        survey: &'a Survey,
        selected: Option<&'a str>,
        thumbnails: &'a HashMap<String, Handle>,
    ) -> Element<'a, Event> {
        let header = column![
            text("Quick Survey - Instant Rewards!")
                .size(26)
                .width(Length::Fill)
                .align_x(Alignment::Center),
            text("Share your experience now!")
                .size(16)
                .color(Color::from_rgb8(0x4B, 0x55, 0x63))
                .width(Length::Fill)
                .align_x(Alignment::Center),
        ]
        .spacing(8);

        let mut body = column![header].spacing(BLOCK_SPACING);

        // Promo banner only for the WithInfo style
        if survey.style == SurveyStyle::WithInfo {
            body = body.push(promo_banner());
        }

        body = body.push(self.question_block(survey, selected, thumbnails));

        container(body).width(FORM_WIDTH).into()
    }

    /// The dismiss layer with the option menu, shown while the menu is open
    ///
    /// Stacked over the whole page by the caller. Option rows capture their
    /// own presses; any press they do not capture dismisses the menu, which
    /// gives outside-press-closes semantics for the widget's lifetime.
    pub fn overlay<'a>(
        &'a self,
        survey: &'a Survey,
        selected: Option<&'a str>,
        thumbnails: &'a HashMap<String, Handle>,
        top_origin: f32,
    ) -> Option<Element<'a, Event>> {
        if !self.menu_open {
            return None;
        }

        let mut options = column![].width(Length::Fill);
        for product in &survey.products {
            let is_selected = selected == Some(product.id.as_str());

            let mut entry = row![].spacing(12).align_y(Alignment::Center);
            if let Some(handle) = thumbnails.get(&product.id) {
                entry = entry.push(
                    image(handle.clone())
                        .width(32)
                        .height(32)
                        .content_fit(ContentFit::Contain),
                );
            }
            entry = entry.push(text(&product.name).size(16));

            // The selected row is only distinguished visually
            let row_style: fn(&Theme, button::Status) -> button::Style = if is_selected {
                button::secondary
            } else {
                button::text
            };

            options = options.push(
                button(entry)
                    .width(Length::Fill)
                    .padding(10)
                    .style(row_style)
                    .on_press(Event::ProductPicked(product.id.clone())),
            );
        }

        let menu = container(scrollable(options).width(Length::Fill))
            .width(FORM_WIDTH)
            .max_height(MENU_MAX_HEIGHT)
            .style(container::bordered_box);

        let layer = mouse_area(
            container(menu)
                .width(Length::Fill)
                .height(Length::Fill)
                .align_x(Alignment::Center)
                .padding(Padding {
                    top: top_origin + menu_top_offset(survey.style),
                    right: 0.0,
                    bottom: 0.0,
                    left: 0.0,
                }),
        )
        .on_press(Event::Dismissed);

        Some(layer.into())
    }

    /// The question label and the trigger control
    fn question_block<'a>(
        &'a self,
        survey: &'a Survey,
        selected: Option<&'a str>,
        thumbnails: &'a HashMap<String, Handle>,
    ) -> Element<'a, Event> {
        let selected_product = selected.and_then(|id| survey.product(id));

        let mut caption = row![].spacing(12).align_y(Alignment::Center);
        if let Some(product) = selected_product {
            if let Some(handle) = thumbnails.get(&product.id) {
                caption = caption.push(
                    image(handle.clone())
                        .width(32)
                        .height(32)
                        .content_fit(ContentFit::Contain),
                );
            }
        }
        caption = caption
            .push(text(trigger_caption(survey, selected)).size(16))
            .push(Space::with_width(Length::Fill))
            .push(text(if self.menu_open { "▴" } else { "▾" }).size(14));

        // Nothing to pick from: leave the trigger disabled
        let trigger = button(caption)
            .width(Length::Fill)
            .padding(12)
            .style(button::secondary)
            .on_press_maybe((!survey.products.is_empty()).then_some(Event::TriggerPressed));

        column![
            text("Which product did you purchase?").size(14),
            trigger,
        ]
        .spacing(8)
        .into()
    }
}

/// Caption shown on the trigger: the selected product's name, or the
/// placeholder label when nothing (or an unknown id) is selected
pub fn trigger_caption<'a>(survey: &'a Survey, selected: Option<&str>) -> &'a str {
    selected
        .and_then(|id| survey.product(id))
        .map(|p| p.name.as_str())
        .unwrap_or(PLACEHOLDER_LABEL)
}

/// Vertical distance from the page top to where the menu drops in,
/// just below the trigger
fn menu_top_offset(style: SurveyStyle) -> f32 {
    let mut offset = HEADER_BLOCK + BLOCK_SPACING;
    if style == SurveyStyle::WithInfo {
        offset += PROMO_BLOCK + BLOCK_SPACING;
    }
    offset + QUESTION_LABEL + TRIGGER_HEIGHT + MENU_GAP
}

/// The giveaway banner shown for the WithInfo style
fn promo_banner<'a>() -> Element<'a, Event> {
    let fine_print = "*Limit one giveaway per valid order. Proof of purchase from \
        authorized retailer may be required. No additional purchase necessary. \
        Subject to availability, change, or cancellation.";

    container(
        column![
            text("Get a FREE Gift*")
                .size(18)
                .color(Color::from_rgb8(0x1E, 0x3A, 0x8A))
                .width(Length::Fill)
                .align_x(Alignment::Center),
            text("No Credit Card - No Shipping - 100% FREE!")
                .size(15)
                .color(Color::from_rgb8(0x1D, 0x4E, 0xD8))
                .width(Length::Fill)
                .align_x(Alignment::Center),
            text(fine_print)
                .size(11)
                .color(Color::from_rgb8(0x6B, 0x72, 0x80))
                .width(Length::Fill)
                .align_x(Alignment::Center),
        ]
        .spacing(6),
    )
    .width(Length::Fill)
    .padding(16)
    .style(promo_style)
    .into()
}

/// Light blue rounded box behind the promo text
fn promo_style(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Color::from_rgb8(0xEF, 0xF6, 0xFF).into()),
        border: Border {
            radius: 8.0.into(),
            ..Border::default()
        },
        ..container::Style::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::data::Product;

    fn product(id: &str, name: &str) -> Product {
        Product {
            id: id.to_string(),
            name: name.to_string(),
            image_path: format!("assets/images/{}.png", id),
            thumbnail_path: format!("assets/images/{}_thumb.png", id),
        }
    }

    fn sample_survey() -> Survey {
        Survey {
            style: SurveyStyle::Simple,
            products: vec![product("p1", "Widget"), product("p2", "Gadget")],
        }
    }

    #[test]
    fn test_starts_closed() {
        let select = ProductSelect::new();

        assert!(!select.is_open());
    }

    #[test]
    fn test_trigger_toggles_menu() {
        let mut select = ProductSelect::new();

        assert_eq!(select.update(Event::TriggerPressed), None);
        assert!(select.is_open());

        assert_eq!(select.update(Event::TriggerPressed), None);
        assert!(!select.is_open());
    }

    #[test]
    fn test_pick_emits_id_and_closes() {
        let mut select = ProductSelect::new();
        select.update(Event::TriggerPressed);

        let picked = select.update(Event::ProductPicked("p1".to_string()));

        assert_eq!(picked, Some("p1".to_string()));
        assert!(!select.is_open());
    }

    #[test]
    fn test_dismiss_closes_without_emitting() {
        let mut select = ProductSelect::new();
        select.update(Event::TriggerPressed);

        assert_eq!(select.update(Event::Dismissed), None);
        assert!(!select.is_open());
    }

    #[test]
    fn test_trigger_caption_matches_selection() {
        let survey = sample_survey();

        assert_eq!(trigger_caption(&survey, Some("p2")), "Gadget");
        assert_eq!(trigger_caption(&survey, None), PLACEHOLDER_LABEL);
        // An id that is not in the list counts as no selection
        assert_eq!(trigger_caption(&survey, Some("p99")), PLACEHOLDER_LABEL);
    }

    #[test]
    fn test_menu_drops_below_promo_banner() {
        assert!(menu_top_offset(SurveyStyle::WithInfo) > menu_top_offset(SurveyStyle::Simple));
    }

    #[test]
    fn test_pick_flow() {
        // Trigger shows "Gadget" for the current selection, then picking
        // "p1" hands p1 back exactly once and closes the menu
        let survey = sample_survey();
        let mut select = ProductSelect::new();

        assert_eq!(trigger_caption(&survey, Some("p2")), "Gadget");

        select.update(Event::TriggerPressed);
        assert!(select.is_open());

        let picked = select.update(Event::ProductPicked("p1".to_string()));
        assert_eq!(picked, Some("p1".to_string()));
        assert!(!select.is_open());
    }
}
