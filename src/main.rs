use iced::widget::image::Handle;
use iced::widget::{button, column, container, row, stack, text, Space};
use iced::{Alignment, Element, Length, Task, Theme};
use rfd::FileDialog;
use std::collections::HashMap;
use std::path::PathBuf;

// Declare the application modules
mod media;
mod state;
mod ui;

use state::data::Survey;
use state::response::SurveyResponse;
use ui::product_select::{self, ProductSelect};

/// Survey definition loaded on startup
const DEFAULT_SURVEY_PATH: &str = "assets/products.json";

/// Outer padding around the page content
const PAGE_PADDING: f32 = 32.0;

/// Gap between the form and the status row
const BLOCK_GAP: f32 = 24.0;

/// Main application state
struct SurveyApp {
    /// The survey being presented, once its definition has loaded
    survey: Option<Survey>,
    /// The product picker widget
    select: ProductSelect,
    /// Id of the product the respondent picked, if any
    selected_product: Option<String>,
    /// Thumbnail pixels per product id
    thumbnails: HashMap<String, Handle>,
    /// Status message to display to the user
    status: String,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    /// User clicked the "Open Survey..." button
    OpenSurvey,
    /// Background survey load completed
    SurveyLoaded(Result<Survey, String>),
    /// Background thumbnail load completed for one product
    ThumbnailLoaded(String, Handle),
    /// The product picker produced an event
    Select(product_select::Event),
}

impl SurveyApp {
    /// Create a new instance of the application
    fn new() -> (Self, Task<Message>) {
        let app = SurveyApp {
            survey: None,
            select: ProductSelect::new(),
            selected_product: None,
            thumbnails: HashMap::new(),
            status: String::from("Loading survey..."),
        };

        // Load the default survey definition in the background
        let load = Task::perform(
            state::catalog::load_survey_async(PathBuf::from(DEFAULT_SURVEY_PATH)),
            Message::SurveyLoaded,
        );

        (app, load)
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::OpenSurvey => {
                // Show the native file picker dialog
                let file = FileDialog::new()
                    .set_title("Select Survey Definition")
                    .add_filter("Survey definition", &["json"])
                    .pick_file();

                if let Some(path) = file {
                    self.status = format!("Loading {}...", path.display());
                    return Task::perform(
                        state::catalog::load_survey_async(path),
                        Message::SurveyLoaded,
                    );
                }

                Task::none()
            }
            Message::SurveyLoaded(Ok(survey)) => {
                println!("📋 Survey ready with {} products", survey.products.len());

                self.status = format!("Ready. {} products available.", survey.products.len());
                self.selected_product = None;
                self.select = ProductSelect::new();

                // Show the placeholder for every product until its real
                // thumbnail arrives
                let placeholder = media::thumbnail::placeholder_handle();
                self.thumbnails = survey
                    .products
                    .iter()
                    .map(|p| (p.id.clone(), placeholder.clone()))
                    .collect();

                // Load the real thumbnails in the background, one task each
                let loads: Vec<Task<Message>> = survey
                    .products
                    .iter()
                    .cloned()
                    .map(|product| {
                        Task::perform(
                            media::thumbnail::load_product_thumbnail(product),
                            |(id, handle)| Message::ThumbnailLoaded(id, handle),
                        )
                    })
                    .collect();

                self.survey = Some(survey);

                Task::batch(loads)
            }
            Message::SurveyLoaded(Err(error)) => {
                eprintln!("⚠️  Survey load failed: {}", error);
                self.status = format!("⚠️ Could not load survey: {}", error);

                Task::none()
            }
            Message::ThumbnailLoaded(product_id, handle) => {
                self.thumbnails.insert(product_id, handle);

                Task::none()
            }
            Message::Select(event) => {
                if let Some(product_id) = self.select.update(event) {
                    let name = self
                        .survey
                        .as_ref()
                        .and_then(|s| s.product(&product_id))
                        .map(|p| p.name.clone())
                        .unwrap_or_else(|| product_id.clone());

                    let response = SurveyResponse::new(product_id.clone());
                    if let Ok(json) = response.to_json() {
                        println!("📊 Survey response: {}", json);
                    }

                    self.selected_product = Some(product_id);
                    self.status = format!("✅ Recorded selection: {}", name);
                }

                Task::none()
            }
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let survey = match &self.survey {
            Some(survey) => survey,
            None => return self.loading_view(),
        };

        let form = self
            .select
            .view(survey, self.selected_product.as_deref(), &self.thumbnails)
            .map(Message::Select);

        let page = column![
            container(form).center_x(Length::Fill),
            Space::with_height(Length::Fill),
            row![
                button("Open Survey...").on_press(Message::OpenSurvey).padding(8),
                Space::with_width(Length::Fill),
                text(&self.status).size(14),
            ]
            .spacing(12)
            .align_y(Alignment::Center),
        ]
        .spacing(BLOCK_GAP)
        .padding(PAGE_PADDING);

        // While the menu is open, float it (and its dismiss layer) over
        // the whole page so a press anywhere else closes it
        match self.select.overlay(
            survey,
            self.selected_product.as_deref(),
            &self.thumbnails,
            PAGE_PADDING,
        ) {
            Some(overlay) => stack![page, overlay.map(Message::Select)].into(),
            None => page.into(),
        }
    }

    /// Shown before a survey definition has loaded
    fn loading_view(&self) -> Element<Message> {
        let content = column![
            text("Reward Survey").size(28),
            text(&self.status).size(16),
            button("Open Survey...").on_press(Message::OpenSurvey).padding(10),
        ]
        .spacing(20)
        .align_x(Alignment::Center);

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .into()
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Light
    }
}

fn main() -> iced::Result {
    iced::application(
        "Reward Survey",
        SurveyApp::update,
        SurveyApp::view,
    )
    .theme(SurveyApp::theme)
    .window_size(iced::Size::new(560.0, 720.0))
    .centered()
    .run_with(SurveyApp::new)
}
