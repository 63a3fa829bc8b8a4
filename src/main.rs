// src/main.rs
use std::sync::Arc;

use iced::widget::{button, column, container, pick_list, row, scrollable, text, text_input, Column, Space};
use iced::{executor, window, Application, Command, Element, Length, Settings, Theme};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use table_viewer::shell::ShellState;
use table_viewer::theme::{JsonFileStore, MemoryStore, PreferenceStore, ThemePreference};
use table_viewer::ui;
use table_viewer::{Config, LoadOutcome, Loader, SourceEntry};

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::load().unwrap_or_else(|e| {
        error!("{}; using defaults", e);
        Config::default()
    });
    let loader = Loader::new(&config)?;

    let store: Box<dyn PreferenceStore> = match JsonFileStore::default_path() {
        Some(path) => Box::new(JsonFileStore::open(path)),
        None => Box::new(MemoryStore::default()),
    };

    info!("Starting Table Viewer v{}", VERSION);
    TableViewer::run(Settings {
        window: window::Settings {
            size: (1024, 768),
            ..Default::default()
        },
        ..Settings::with_flags(Flags {
            config,
            loader: Arc::new(loader),
            store,
        })
    })?;

    Ok(())
}

struct Flags {
    config: Config,
    loader: Arc<Loader>,
    store: Box<dyn PreferenceStore>,
}

struct TableViewer {
    loader: Arc<Loader>,
    store: Box<dyn PreferenceStore>,
    sources: Vec<SourceEntry>,
    selector_input: String,
    shell: ShellState,
}

#[derive(Debug, Clone)]
enum Message {
    SourcePicked(SourceEntry),
    SelectorChanged(String),
    LoadSelector,
    Loaded(u64, LoadOutcome),
    QueryChanged(String),
    ToggleTheme,
}

impl Application for TableViewer {
    type Executor = executor::Default;
    type Message = Message;
    type Theme = Theme;
    type Flags = Flags;

    fn new(flags: Flags) -> (Self, Command<Message>) {
        let theme = ThemePreference::load(flags.store.as_ref());
        let mut app = TableViewer {
            loader: flags.loader,
            store: flags.store,
            sources: flags.config.sources.clone(),
            selector_input: String::new(),
            shell: ShellState::new(theme),
        };

        let command = match flags.config.startup_selector() {
            Some(selector) => {
                app.selector_input = selector.clone();
                app.start_load(selector)
            }
            None => Command::none(),
        };

        (app, command)
    }

    fn title(&self) -> String {
        format!("Table Viewer v{}", VERSION)
    }

    fn update(&mut self, message: Message) -> Command<Message> {
        match message {
            Message::SourcePicked(entry) => {
                self.selector_input = entry.selector.clone();
                self.start_load(entry.selector)
            }

            Message::SelectorChanged(value) => {
                self.selector_input = value;
                Command::none()
            }

            Message::LoadSelector => {
                let selector = self.selector_input.trim().to_string();
                if selector.is_empty() {
                    return Command::none();
                }
                self.start_load(selector)
            }

            Message::Loaded(generation, outcome) => {
                self.shell.finish_load(generation, outcome);
                Command::none()
            }

            Message::QueryChanged(query) => {
                self.shell.set_query(&query);
                Command::none()
            }

            Message::ToggleTheme => {
                self.shell.toggle_theme(self.store.as_mut());
                Command::none()
            }
        }
    }

    fn view(&self) -> Element<Message> {
        let theme = self.shell.theme();
        let styles = ui::styles(theme);

        let selected = self
            .sources
            .iter()
            .find(|s| s.selector == self.shell.selector())
            .cloned();

        let toolbar = row![
            pick_list(&self.sources[..], selected, Message::SourcePicked)
                .placeholder("Choose a source"),
            text_input("path, URL or sheetId|sheetName", &self.selector_input)
                .on_input(Message::SelectorChanged)
                .on_submit(Message::LoadSelector)
                .padding(8),
            button(text("Load")).on_press(Message::LoadSelector),
            button(text(ui::toggle_label(theme))).on_press(Message::ToggleTheme),
        ]
        .spacing(10);

        let search = text_input("Search...", self.shell.query())
            .on_input(Message::QueryChanged)
            .padding(8);

        let status: Element<Message> = match self.shell.status() {
            Some(status) => text(format!("{}  ({})", status.message, status.at.format("%H:%M:%S")))
                .style(iced::theme::Text::Color(styles.status_color(status.severity)))
                .into(),
            None => Space::with_height(Length::Shrink).into(),
        };

        let rows = Column::with_children(
            self.shell
                .rendered_rows()
                .into_iter()
                .map(|line| -> Element<Message> { text(line).size(16).into() })
                .collect(),
        )
        .spacing(4);

        let footer = row![
            text(format!("Table Viewer v{}", VERSION))
                .size(14)
                .style(iced::theme::Text::Color(styles.muted_fg)),
            Space::with_width(Length::Fill),
            text(format!(
                "{} of {} rows",
                self.shell.visible().len(),
                self.shell.current().len()
            ))
            .size(14)
            .style(iced::theme::Text::Color(styles.muted_fg)),
        ];

        container(
            column![
                toolbar,
                search,
                status,
                scrollable(rows).height(Length::Fill),
                footer
            ]
            .spacing(10)
            .padding(20),
        )
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
    }

    fn theme(&self) -> Theme {
        match self.shell.theme() {
            ThemePreference::Light => Theme::Light,
            ThemePreference::Dark => Theme::Dark,
        }
    }
}

impl TableViewer {
    fn start_load(&mut self, selector: String) -> Command<Message> {
        let generation = self.shell.begin_load(&selector);
        let loader = Arc::clone(&self.loader);

        Command::perform(
            async move { loader.load(&selector).await },
            move |outcome| Message::Loaded(generation, outcome),
        )
    }
}
