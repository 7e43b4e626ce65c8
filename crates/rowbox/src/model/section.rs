//! Sections: ordered runs of rows with header and footer metadata.

use std::fmt;

use slotmap::new_key_type;

use super::erased::ErasedItem;

new_key_type! {
    /// Handle to a header/footer view owned by the render adapter.
    ///
    /// The model only stores the handle; the adapter resolves it.
    pub struct ViewId;
}

/// Smallest positive height a header or footer slot can have.
///
/// List widgets tend to treat a zero height as "use the default", so a
/// collapsed slot is given this height instead.
pub const MIN_RENDERABLE_HEIGHT: f64 = f64::MIN_POSITIVE;

/// Tag identifying a reusable header/footer view class.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReuseTag(String);

impl ReuseTag {
    /// Creates a tag.
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    /// Returns the tag string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReuseTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ReuseTag {
    fn from(tag: &str) -> Self {
        Self::new(tag)
    }
}

/// Height policy for a header or footer.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Height {
    /// Let the widget size the slot.
    #[default]
    Automatic,
    /// An explicit height.
    Fixed(f64),
}

impl Height {
    /// Returns the explicit height, if any.
    pub fn fixed(self) -> Option<f64> {
        match self {
            Self::Automatic => None,
            Self::Fixed(height) => Some(height),
        }
    }

    /// Returns `true` for [`Height::Automatic`].
    pub fn is_automatic(self) -> bool {
        matches!(self, Self::Automatic)
    }
}

/// What a header or footer slot shows.
///
/// A fixed view and a reusable view are alternatives: setting one replaces
/// the other.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum HeaderFooterContent {
    /// Nothing.
    #[default]
    None,
    /// Plain title text.
    Title(String),
    /// A specific view instance held by the adapter.
    FixedView(ViewId),
    /// A view the adapter dequeues by tag.
    ReusableView(ReuseTag),
}

impl HeaderFooterContent {
    /// Returns `true` for [`HeaderFooterContent::None`].
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Returns the title text, if this is a title.
    pub fn title(&self) -> Option<&str> {
        match self {
            Self::Title(title) => Some(title),
            _ => None,
        }
    }
}

/// Header or footer metadata for one section.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HeaderFooter {
    /// What the slot shows.
    pub content: HeaderFooterContent,
    /// Height policy.
    pub height: Height,
    /// Estimated height used before layout.
    pub estimated_height: Height,
}

impl HeaderFooter {
    /// An empty slot with automatic heights.
    pub fn new() -> Self {
        Self::default()
    }

    /// A title slot with automatic heights.
    pub fn title(text: impl Into<String>) -> Self {
        Self {
            content: HeaderFooterContent::Title(text.into()),
            ..Self::default()
        }
    }

    /// A slot showing a fixed view.
    pub fn fixed_view(view: ViewId) -> Self {
        Self {
            content: HeaderFooterContent::FixedView(view),
            ..Self::default()
        }
    }

    /// A slot showing a reusable view.
    pub fn reusable_view(tag: impl Into<ReuseTag>) -> Self {
        Self {
            content: HeaderFooterContent::ReusableView(tag.into()),
            ..Self::default()
        }
    }

    /// A collapsed slot: no content and the smallest renderable height.
    pub fn collapsed() -> Self {
        Self {
            content: HeaderFooterContent::None,
            height: Height::Fixed(MIN_RENDERABLE_HEIGHT),
            estimated_height: Height::Automatic,
        }
    }

    /// Sets an explicit height.
    pub fn with_height(mut self, height: f64) -> Self {
        self.height = Height::Fixed(height);
        self
    }

    /// Sets an explicit estimated height.
    pub fn with_estimated_height(mut self, height: f64) -> Self {
        self.estimated_height = Height::Fixed(height);
        self
    }

    /// Shows `view`, replacing any reusable view or title.
    pub fn set_fixed_view(&mut self, view: ViewId) {
        self.content = HeaderFooterContent::FixedView(view);
    }

    /// Shows a reusable view, replacing any fixed view or title.
    pub fn set_reusable_view(&mut self, tag: impl Into<ReuseTag>) {
        self.content = HeaderFooterContent::ReusableView(tag.into());
    }

    /// Returns `true` if the slot shows a view (fixed or reusable).
    pub fn has_view(&self) -> bool {
        matches!(
            self.content,
            HeaderFooterContent::FixedView(_) | HeaderFooterContent::ReusableView(_)
        )
    }
}

/// An ordered run of rows with optional header and footer.
///
/// The row count is always `items().len()`.
///
/// # Example
///
/// ```
/// use rowbox::model::{Item, Position, RenderArtifact, RenderKind, Section};
///
/// #[derive(Debug, PartialEq)]
/// struct Label(&'static str);
///
/// impl Item for Label {
///     type Payload = &'static str;
///     fn payload(&self) -> &&'static str { &self.0 }
///     fn render_kind(&self) -> RenderKind { RenderKind::new("label") }
///     fn render(&self, position: Position) -> RenderArtifact {
///         RenderArtifact::new(self.render_kind(), position).with_content(self.0)
///     }
/// }
///
/// let mut section = Section::new()
///     .with_id("fruit")
///     .with_header_title("Fruit")
///     .with_items([Label("apple"), Label("pear")]);
///
/// section.insert_item(Label("fig"), 1);
/// assert_eq!(section.row_count(), 3);
/// assert!(section.item(1).matches(&Label("fig")));
/// ```
#[derive(Debug, Default, PartialEq)]
pub struct Section {
    id: Option<String>,
    items: Vec<ErasedItem>,
    /// Header metadata.
    pub header: HeaderFooter,
    /// Footer metadata.
    pub footer: HeaderFooter,
}

impl Section {
    /// Creates an empty section with no id and empty header/footer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the section id.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Sets a title header.
    pub fn with_header_title(mut self, title: impl Into<String>) -> Self {
        self.header = HeaderFooter::title(title);
        self
    }

    /// Sets a title footer.
    pub fn with_footer_title(mut self, title: impl Into<String>) -> Self {
        self.footer = HeaderFooter::title(title);
        self
    }

    /// Sets the header.
    pub fn with_header(mut self, header: HeaderFooter) -> Self {
        self.header = header;
        self
    }

    /// Sets the footer.
    pub fn with_footer(mut self, footer: HeaderFooter) -> Self {
        self.footer = footer;
        self
    }

    /// Appends rows.
    pub fn with_items<I>(mut self, items: impl IntoIterator<Item = I>) -> Self
    where
        I: Into<ErasedItem>,
    {
        self.items.extend(items.into_iter().map(Into::into));
        self
    }

    /// The section id.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Sets or clears the section id.
    pub fn set_id(&mut self, id: Option<String>) {
        self.id = id;
    }

    /// Rows in display order.
    pub fn items(&self) -> &[ErasedItem] {
        &self.items
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the section has no rows.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The row at `row`.
    ///
    /// # Panics
    ///
    /// Panics if `row >= row_count()`.
    pub fn item(&self, row: usize) -> &ErasedItem {
        self.check_row(row);
        &self.items[row]
    }

    /// The row at `row`, or `None` if out of range.
    pub fn get(&self, row: usize) -> Option<&ErasedItem> {
        self.items.get(row)
    }

    /// Mutable access to the row at `row`, or `None` if out of range.
    pub fn get_mut(&mut self, row: usize) -> Option<&mut ErasedItem> {
        self.items.get_mut(row)
    }

    /// Appends a row.
    pub fn append_item(&mut self, item: impl Into<ErasedItem>) {
        self.items.push(item.into());
    }

    /// Inserts a row before `row`.
    ///
    /// # Panics
    ///
    /// Panics if `row > row_count()`.
    pub fn insert_item(&mut self, item: impl Into<ErasedItem>, row: usize) {
        self.check_insert(row);
        self.items.insert(row, item.into());
    }

    /// Inserts a contiguous run of rows starting at `row`.
    ///
    /// # Panics
    ///
    /// Panics if `row > row_count()`.
    pub fn insert_items<I>(&mut self, items: impl IntoIterator<Item = I>, row: usize)
    where
        I: Into<ErasedItem>,
    {
        self.check_insert(row);
        self.items.splice(row..row, items.into_iter().map(Into::into));
    }

    /// Removes and returns the row at `row`.
    ///
    /// # Panics
    ///
    /// Panics if `row >= row_count()`.
    pub fn remove_item(&mut self, row: usize) -> ErasedItem {
        self.check_row(row);
        self.items.remove(row)
    }

    /// Swaps the row at `row` for `item`, returning the old one.
    ///
    /// # Panics
    ///
    /// Panics if `row >= row_count()`.
    pub fn replace_item(&mut self, row: usize, item: impl Into<ErasedItem>) -> ErasedItem {
        self.check_row(row);
        std::mem::replace(&mut self.items[row], item.into())
    }

    /// Removes every row, keeping id and metadata.
    pub fn take_items(&mut self) -> Vec<ErasedItem> {
        std::mem::take(&mut self.items)
    }

    /// Collapses the header without removing its slot.
    pub fn clear_header(&mut self) {
        self.header = HeaderFooter::collapsed();
    }

    /// Collapses the footer without removing its slot.
    pub fn clear_footer(&mut self) {
        self.footer = HeaderFooter::collapsed();
    }

    /// Index of the first row satisfying `predicate`.
    pub fn position_where(&self, predicate: impl FnMut(&ErasedItem) -> bool) -> Option<usize> {
        self.items.iter().position(predicate)
    }

    fn check_row(&self, row: usize) {
        assert!(
            row < self.items.len(),
            "row {row} out of range for section with {} rows",
            self.items.len()
        );
    }

    fn check_insert(&self, row: usize) {
        assert!(
            row <= self.items.len(),
            "insertion row {row} out of range for section with {} rows",
            self.items.len()
        );
    }
}

/// In-place access to a section that keeps its row count fixed.
///
/// Handed out by [`ListModel::modify_section`](super::ListModel::modify_section).
/// Reading goes through `Deref<Target = Section>`. Rows can be edited or
/// swapped through [`get_mut`](Self::get_mut), but never added or removed:
///
/// ```compile_fail
/// use rowbox::model::{ListModel, Section};
///
/// let model = ListModel::new(vec![Section::new()]);
/// model.modify_section(0, |section| section.take_items());
/// ```
pub struct SectionEdit<'a> {
    section: &'a mut Section,
}

impl<'a> SectionEdit<'a> {
    pub(crate) fn new(section: &'a mut Section) -> Self {
        Self { section }
    }

    /// Sets or clears the section id.
    pub fn set_id(&mut self, id: Option<String>) {
        self.section.set_id(id);
    }

    pub fn header_mut(&mut self) -> &mut HeaderFooter {
        &mut self.section.header
    }

    pub fn footer_mut(&mut self) -> &mut HeaderFooter {
        &mut self.section.footer
    }

    /// See [`Section::clear_header`].
    pub fn clear_header(&mut self) {
        self.section.clear_header();
    }

    /// See [`Section::clear_footer`].
    pub fn clear_footer(&mut self) {
        self.section.clear_footer();
    }

    /// Mutable access to the row at `row`, or `None` if out of range.
    pub fn get_mut(&mut self, row: usize) -> Option<&mut ErasedItem> {
        self.section.get_mut(row)
    }
}

impl std::ops::Deref for SectionEdit<'_> {
    type Target = Section;

    fn deref(&self) -> &Section {
        self.section
    }
}

impl fmt::Debug for SectionEdit<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("SectionEdit").field(&self.section).finish()
    }
}
