//! A settings screen driven through a console "adapter".
//!
//! The adapter prints every change set the model emits and renders the rows
//! the way a list widget would ask for them.
//!
//! Run with `RUST_LOG=rowbox=debug cargo run --example sections` to see the
//! model's own logging.

use std::sync::Arc;

use parking_lot::Mutex;
use rowbox::model::{
    Change, HeaderFooterContent, Item, ListModel, Position, RenderArtifact, RenderKind,
    Responders, RowAnimation, Section, SelectionResponder, SwipeAction, SwipeActionResponder,
};
use rowbox::ListConfig;

#[derive(Debug, PartialEq)]
struct Title(&'static str);

impl Item for Title {
    type Payload = &'static str;

    fn identifier(&self) -> Option<&str> {
        Some(self.0)
    }

    fn payload(&self) -> &&'static str {
        &self.0
    }

    fn render_kind(&self) -> RenderKind {
        RenderKind::new("title")
    }

    fn render(&self, position: Position) -> RenderArtifact {
        RenderArtifact::new(self.render_kind(), position).with_content(self.0)
    }
}

struct Switch {
    key: &'static str,
    on: Arc<Mutex<bool>>,
    responders: Responders,
}

impl Switch {
    fn new(key: &'static str, on: bool) -> Self {
        let state = Arc::new(Mutex::new(on));
        let flip = state.clone();
        Self {
            key,
            on: state,
            responders: Responders::new().with_did_select(move |_| {
                let mut on = flip.lock();
                *on = !*on;
            }),
        }
    }
}

impl PartialEq for Switch {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.on, &other.on)
    }
}

impl SwipeActionResponder for Switch {
    fn trailing_swipe_actions(&self) -> Vec<SwipeAction> {
        let key = self.key;
        vec![SwipeAction::destructive("Reset", move |p| {
            println!("  reset {key} at {p}");
        })]
    }
}

impl Item for Switch {
    type Payload = Arc<Mutex<bool>>;

    fn identifier(&self) -> Option<&str> {
        Some(self.key)
    }

    fn payload(&self) -> &Self::Payload {
        &self.on
    }

    fn render_kind(&self) -> RenderKind {
        RenderKind::new("switch")
    }

    fn render(&self, position: Position) -> RenderArtifact {
        RenderArtifact::new(self.render_kind(), position).with_content(*self.on.lock())
    }

    fn as_selection_responder(&self) -> Option<&dyn SelectionResponder> {
        Some(&self.responders)
    }

    fn as_swipe_action_responder(&self) -> Option<&dyn SwipeActionResponder> {
        Some(self)
    }
}

fn describe(change: &Change) -> String {
    match change {
        Change::RowsInserted { section, rows, animation } => {
            format!("insert rows {rows:?} in section {section} ({animation:?})")
        }
        Change::RowsRemoved { positions, animation } => {
            let list: Vec<String> = positions.iter().map(ToString::to_string).collect();
            format!("remove rows {} ({animation:?})", list.join(", "))
        }
        Change::RowMoved { from, to } => format!("move row {from} -> {to}"),
        Change::SectionsInserted { indices, animation } => {
            format!("insert sections {indices:?} ({animation:?})")
        }
        Change::SectionsRemoved { indices, animation } => {
            format!("remove sections {indices:?} ({animation:?})")
        }
        Change::SectionMoved { from, to } => format!("move section {from} -> {to}"),
        Change::SectionsUpdated { indices } => format!("update sections {indices:?}"),
    }
}

fn draw(model: &ListModel) {
    for section in 0..model.section_count() {
        let header = model.resolved_header(section);
        match &header.content {
            HeaderFooterContent::Title(title) => println!("  [{title}]"),
            HeaderFooterContent::ReusableView(tag) => println!("  [<{tag}>]"),
            HeaderFooterContent::FixedView(_) => println!("  [<view>]"),
            HeaderFooterContent::None => println!("  [-]"),
        }
        for row in 0..model.row_count(section) {
            let artifact = model.render(Position::new(section, row));
            println!("    {} {:?}", artifact.kind, artifact.content);
        }
    }
}

fn main() -> rowbox::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let model = ListModel::with_config(
        ListConfig::new().with_default_header("plain-header", 28.0),
        vec![
            Section::new()
                .with_id("network")
                .with_header_title("Network")
                .with_items([Switch::new("wifi", true), Switch::new("bluetooth", false)]),
            Section::new().with_id("about").with_items([Title("Version 0.3")]),
        ],
    )?;

    model.signals().changed.connect(|changes| {
        for change in changes {
            println!("> {}", describe(change));
        }
    });

    println!("initial:");
    draw(&model);

    model.append_row(Switch::new("airplane", false), 0, RowAnimation::Automatic);
    model.prepend_row(Title("Legal"), 1, RowAnimation::Automatic);

    let wifi = model.position_of_identifier("wifi").unwrap_or_default();
    let target = model.will_select(wifi);
    model.did_select(target);

    for action in model.trailing_swipe_actions(wifi) {
        action.trigger(wifi);
    }

    model.move_row(Position::new(0, 2), Position::new(0, 0));
    model.remove_first_where(
        |item| item.identifier() == Some("bluetooth"),
        RowAnimation::Automatic,
    );
    model.modify_section(1, |section| section.clear_header());

    if let Some(about) = model.section_index("about") {
        model.remove_rows(
            (0..model.row_count(about)).map(|row| Position::new(about, row)),
            RowAnimation::Fade,
            true,
        );
    }

    println!("final:");
    draw(&model);
    Ok(())
}
