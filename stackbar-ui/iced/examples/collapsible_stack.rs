use env_logger::Env;
use iced::widget::{Column, button, container, text};
use iced::{Element, Length, Size, Subscription, Task, alignment, window};
use log::{debug, info, warn};
use stackbar::{
    CollapsibleStack, Item, ItemContent, OverflowMenu, StackEffect, StackEvent,
    StackListener, StackSettings, reduce,
};
use stackbar_ui_iced::{StackView, menu_view, track_pointer};

const WINDOW_WIDTH: f32 = 320.0;
const WINDOW_HEIGHT: f32 = 560.0;
const CONTENT_MIN_HEIGHT: f32 = 140.0;
const SETTINGS: &str = r#"{
    "skin": "office2007",
    "button_height": 30,
    "strip_spacing": 4
}"#;
const ITEMS: [(&str, &str, &str); 6] = [
    ("mail", "Mail", "✉"),
    ("calendar", "Calendar", "▦"),
    ("contacts", "Contacts", "☺"),
    ("tasks", "Tasks", "✓"),
    ("notes", "Notes", "✎"),
    ("folders", "Folder List", "▤"),
];

#[derive(Debug, Clone)]
enum Message {
    Stack(StackEvent),
    Window(window::Event),
    Pressure,
    CloseMenu,
}

struct LogListener;

impl StackListener for LogListener {
    fn item_clicked(&mut self, item: &Item) {
        info!("clicked {}", item.label());
    }

    fn item_entered(&mut self, item: &Item) {
        debug!("entered {}", item.label());
    }

    fn item_exited(&mut self, item: &Item) {
        debug!("exited {}", item.label());
    }
}

struct Demo {
    stack: CollapsibleStack,
    menu: Option<OverflowMenu>,
    window: Size,
}

impl Demo {
    fn new() -> (Self, Task<Message>) {
        let settings = match StackSettings::from_json_str(SETTINGS) {
            Ok(settings) => settings,
            Err(err) => {
                warn!("falling back to default settings: {err}");
                StackSettings::default()
            },
        };

        let mut stack = CollapsibleStack::new(settings);
        for (key, label, icon) in ITEMS {
            let content =
                ItemContent::new(label).small_icon(icon).tooltip(label);
            if let Err(err) = stack.add_item(key, content) {
                warn!("{err}");
            }
        }
        stack.add_listener(Box::new(LogListener));

        let demo = Self {
            stack,
            menu: None,
            window: Size::new(WINDOW_WIDTH, WINDOW_HEIGHT),
        };
        (demo, Task::done(Message::Pressure))
    }

    fn title(&self) -> String {
        String::from("Collapsible stack")
    }

    fn subscription(&self) -> Subscription<Message> {
        window::events().map(|(_id, event)| Message::Window(event))
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Stack(event) => {
                let picks_entry = matches!(event, StackEvent::Menu(_));
                match reduce(&mut self.stack, event) {
                    Some(StackEffect::OpenMenu(menu)) => self.menu = Some(menu),
                    None if picks_entry => self.menu = None,
                    None => {},
                }
                self.log_invalidation();
                Task::none()
            },
            Message::Window(window::Event::Resized(size)) => {
                self.window = size;
                self.relieve_pressure()
            },
            Message::Window(_) => Task::none(),
            Message::Pressure => self.relieve_pressure(),
            Message::CloseMenu => {
                self.menu = None;
                Task::none()
            },
        }
    }

    /// Notify the stack of the space left under the content area. Every
    /// notification moves at most one item, so keep notifying until the
    /// shown count settles.
    fn relieve_pressure(&mut self) -> Task<Message> {
        let available = (self.window.height - CONTENT_MIN_HEIGHT).max(0.0);
        let before = self.stack.count_shown();
        reduce(
            &mut self.stack,
            StackEvent::ContainerResized {
                width: self.window.width as i32,
                available_height: available as i32,
            },
        );
        self.log_invalidation();

        if self.stack.count_shown() != before {
            Task::done(Message::Pressure)
        } else {
            Task::none()
        }
    }

    fn log_invalidation(&mut self) {
        let invalidation = self.stack.take_invalidation();
        if !invalidation.is_empty() {
            debug!("stack invalidated: {invalidation:?}");
        }
    }

    fn view(&self) -> Element<'_, Message> {
        let content: Element<'_, Message> = match &self.menu {
            Some(menu) => Column::new()
                .push(menu_view(menu, |action| {
                    Message::Stack(StackEvent::Menu(action))
                }))
                .push(button(text("Close")).on_press(Message::CloseMenu))
                .spacing(6)
                .into(),
            None => {
                let title = self
                    .stack
                    .selected()
                    .map_or("Nothing selected", Item::label);
                container(text(title).size(20))
                    .width(Length::Fill)
                    .height(Length::Fill)
                    .align_x(alignment::Horizontal::Center)
                    .align_y(alignment::Vertical::Center)
                    .into()
            },
        };

        let body = Column::new()
            .push(
                container(content)
                    .padding(12)
                    .width(Length::Fill)
                    .height(Length::Fill),
            )
            .push(StackView::new(&self.stack, Message::Stack).view());

        let stack_top =
            (self.window.height - self.stack.needed_height() as f32).max(0.0);
        track_pointer(body, stack_top, Message::Stack)
    }
}

fn main() -> iced::Result {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    iced::application(Demo::new, Demo::update, Demo::view)
        .title(Demo::title)
        .window(window::Settings {
            size: Size::new(WINDOW_WIDTH, WINDOW_HEIGHT),
            ..window::Settings::default()
        })
        .resizable(true)
        .subscription(Demo::subscription)
        .run()
}
