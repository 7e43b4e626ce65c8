//! The sectioned list model.
//!
//! [`ListModel`] owns an ordered list of [`Section`]s and is the only thing a
//! render adapter talks to. It answers count and content queries, applies
//! structural mutations, and describes every mutation through
//! [`ListSignals`] so the adapter can animate it.
//!
//! Mutators take `&self`; the sections live behind a `parking_lot::RwLock`.
//! A mutator takes the lock's upgradable read guard, checks all of its
//! preconditions, emits `about_to_change`, and only then upgrades to write.
//! Mutators are therefore serialized, and a panicking call leaves the model
//! and the adapter unchanged. Lookups use recursive reads, so an
//! `about_to_change` slot can read the model while the guard is held. No lock
//! is held while `changed` slots or responder callbacks run.

use parking_lot::{
    MappedRwLockReadGuard, RwLock, RwLockReadGuard, RwLockUpgradableReadGuard,
};

use rowbox_core::PerfSpan;
use rowbox_core::logging::targets;

use crate::config::{AnimationDefaults, DefaultHeaderFooter, ListConfig};
use crate::error::Result;

use super::change::{Change, ChangeSet, ListSignals, RowAnimation};
use super::erased::ErasedItem;
use super::item::Item;
use super::position::Position;
use super::render::{RenderArtifact, RenderKind};
use super::responder::SwipeAction;
use super::section::{HeaderFooter, Section, SectionEdit};

type MutationGuard<'a> = RwLockUpgradableReadGuard<'a, Vec<Section>>;

/// A list of sections of heterogeneous rows.
///
/// # Example
///
/// ```
/// use rowbox::model::{Item, ListModel, Position, RenderArtifact, RenderKind, Section};
///
/// #[derive(Debug, PartialEq)]
/// struct Name(&'static str);
///
/// impl Item for Name {
///     type Payload = &'static str;
///     fn payload(&self) -> &&'static str { &self.0 }
///     fn render_kind(&self) -> RenderKind { RenderKind::new("name") }
///     fn render(&self, position: Position) -> RenderArtifact {
///         RenderArtifact::new(self.render_kind(), position).with_content(self.0)
///     }
/// }
///
/// let model = ListModel::new(vec![
///     Section::new().with_items([Name("a"), Name("b"), Name("c")]),
/// ]);
///
/// model.signals().changed.connect(|changes| {
///     for change in changes {
///         println!("{change:?}");
///     }
/// });
///
/// model.move_row(Position::new(0, 0), Position::new(0, 2));
/// assert_eq!(model.position_of(&Name("a")), Some(Position::new(0, 2)));
/// ```
pub struct ListModel {
    sections: RwLock<Vec<Section>>,
    config: RwLock<ListConfig>,
    signals: ListSignals,
}

impl Default for ListModel {
    fn default() -> Self {
        Self::empty()
    }
}

impl ListModel {
    /// Creates a model holding `sections`, with the default configuration.
    pub fn new(sections: Vec<Section>) -> Self {
        Self::from_parts(ListConfig::default(), sections)
    }

    /// Creates a model with no sections.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Creates a model holding `sections` with the given configuration.
    ///
    /// Fails with [`Error::InvalidHeight`](crate::Error::InvalidHeight) if a
    /// configured default header or footer height is not renderable.
    pub fn with_config(config: ListConfig, sections: Vec<Section>) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_parts(config, sections))
    }

    fn from_parts(config: ListConfig, sections: Vec<Section>) -> Self {
        Self {
            sections: RwLock::new(sections),
            config: RwLock::new(config),
            signals: ListSignals::new(),
        }
    }

    /// The model's signals.
    pub fn signals(&self) -> &ListSignals {
        &self.signals
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    /// A copy of the current configuration.
    pub fn config(&self) -> ListConfig {
        self.config.read().clone()
    }

    /// Replaces the configuration.
    ///
    /// Emits `sections_updated`, since resolved headers and footers may change.
    /// An invalid configuration is rejected and the current one kept.
    pub fn set_config(&self, config: ListConfig) -> Result<()> {
        config.validate()?;
        *self.config.write() = config;
        self.signals.sections_updated.emit(());
        Ok(())
    }

    /// Sets the header shown for sections that specify none.
    pub fn set_default_header(&self, tag: impl Into<String>, height: f64) -> Result<()> {
        let header = DefaultHeaderFooter::new(tag, height);
        header.validate("default header")?;
        self.config.write().default_header = Some(header);
        self.signals.sections_updated.emit(());
        Ok(())
    }

    /// Sets the footer shown for sections that specify none.
    pub fn set_default_footer(&self, tag: impl Into<String>, height: f64) -> Result<()> {
        let footer = DefaultHeaderFooter::new(tag, height);
        footer.validate("default footer")?;
        self.config.write().default_footer = Some(footer);
        self.signals.sections_updated.emit(());
        Ok(())
    }

    fn animations(&self) -> AnimationDefaults {
        self.config.read().animations
    }

    // =========================================================================
    // Lookup
    // =========================================================================

    /// Number of sections.
    pub fn section_count(&self) -> usize {
        self.sections.read_recursive().len()
    }

    /// Returns `true` if the model has no sections.
    pub fn is_empty(&self) -> bool {
        self.sections.read_recursive().is_empty()
    }

    /// Number of rows in `section`.
    ///
    /// # Panics
    ///
    /// Panics if `section >= section_count()`.
    pub fn row_count(&self, section: usize) -> usize {
        let sections = self.sections.read_recursive();
        check_section(&sections, section);
        sections[section].row_count()
    }

    /// Number of rows across all sections.
    pub fn total_row_count(&self) -> usize {
        self.sections.read_recursive().iter().map(Section::row_count).sum()
    }

    /// Borrows the row at `position`.
    ///
    /// The returned guard holds the model's read lock. Drop it before calling
    /// any mutator.
    ///
    /// # Panics
    ///
    /// Panics if `position` is out of range.
    pub fn item_at(&self, position: Position) -> MappedRwLockReadGuard<'_, ErasedItem> {
        let sections = self.sections.read_recursive();
        check_row(&sections, position);
        RwLockReadGuard::map(sections, |s| &s[position.section].items()[position.row])
    }

    /// Borrows the row at `position`, or `None` if out of range.
    pub fn get(&self, position: Position) -> Option<MappedRwLockReadGuard<'_, ErasedItem>> {
        RwLockReadGuard::try_map(self.sections.read_recursive(), |s| {
            s.get(position.section)?.get(position.row)
        })
        .ok()
    }

    /// Runs `f` on the row at `position` and returns its result.
    ///
    /// # Panics
    ///
    /// Panics if `position` is out of range.
    pub fn with_item<R>(&self, position: Position, f: impl FnOnce(&ErasedItem) -> R) -> R {
        f(&self.item_at(position))
    }

    /// Renders the row at `position`.
    ///
    /// # Panics
    ///
    /// Panics if `position` is out of range.
    pub fn render(&self, position: Position) -> RenderArtifact {
        self.with_item(position, |item| item.render(position))
    }

    /// The render kind of the row at `position`.
    ///
    /// # Panics
    ///
    /// Panics if `position` is out of range.
    pub fn render_kind(&self, position: Position) -> RenderKind {
        self.with_item(position, ErasedItem::render_kind)
    }

    /// First position whose row satisfies `predicate`.
    ///
    /// Sections are scanned in order, and rows in order within each section.
    pub fn first_position(&self, predicate: impl FnMut(&ErasedItem) -> bool) -> Option<Position> {
        scan(&self.sections.read_recursive(), predicate)
    }

    /// First position whose row equals `item`.
    pub fn position_of<I: Item>(&self, item: &I) -> Option<Position> {
        self.first_position(|candidate| candidate.matches(item))
    }

    /// First position whose row has the identifier `identifier`.
    pub fn position_of_identifier(&self, identifier: &str) -> Option<Position> {
        self.first_position(|candidate| candidate.identifier() == Some(identifier))
    }

    /// Index of the first section with id `id`.
    pub fn section_index(&self, id: &str) -> Option<usize> {
        self.sections.read_recursive().iter().position(|s| s.id() == Some(id))
    }

    /// Borrows the section at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= section_count()`.
    pub fn section(&self, index: usize) -> MappedRwLockReadGuard<'_, Section> {
        let sections = self.sections.read_recursive();
        check_section(&sections, index);
        RwLockReadGuard::map(sections, |s| &s[index])
    }

    /// Borrows every section.
    pub fn sections(&self) -> MappedRwLockReadGuard<'_, [Section]> {
        RwLockReadGuard::map(self.sections.read_recursive(), Vec::as_slice)
    }

    // =========================================================================
    // Headers and footers
    // =========================================================================

    /// The header metadata of `section`, as stored.
    ///
    /// # Panics
    ///
    /// Panics if `section >= section_count()`.
    pub fn header(&self, section: usize) -> HeaderFooter {
        self.section(section).header.clone()
    }

    /// The footer metadata of `section`, as stored.
    ///
    /// # Panics
    ///
    /// Panics if `section >= section_count()`.
    pub fn footer(&self, section: usize) -> HeaderFooter {
        self.section(section).footer.clone()
    }

    /// The header to display for `section`.
    ///
    /// A header with content is shown as the section specifies it. A header
    /// with no content and an automatic height falls back to the configured
    /// default header, if there is one. A collapsed header stays collapsed.
    ///
    /// # Panics
    ///
    /// Panics if `section >= section_count()`.
    pub fn resolved_header(&self, section: usize) -> HeaderFooter {
        let header = self.header(section);
        resolve_slot(header, self.config.read().default_header.as_ref())
    }

    /// The footer to display for `section`. See [`resolved_header`].
    ///
    /// [`resolved_header`]: Self::resolved_header
    ///
    /// # Panics
    ///
    /// Panics if `section >= section_count()`.
    pub fn resolved_footer(&self, section: usize) -> HeaderFooter {
        let footer = self.footer(section);
        resolve_slot(footer, self.config.read().default_footer.as_ref())
    }

    // =========================================================================
    // Row mutation
    // =========================================================================

    /// Inserts `item` at `at`.
    ///
    /// # Panics
    ///
    /// Panics if `at.section` is out of range or `at.row` is past the end of
    /// the section.
    pub fn insert_row(&self, item: impl Into<ErasedItem>, at: Position, animation: RowAnimation) {
        self.insert_rows([item.into()], at, animation);
    }

    /// Inserts a contiguous run of rows starting at `at`.
    ///
    /// Emits one [`Change::RowsInserted`] covering the whole run. Inserting no
    /// rows does nothing.
    ///
    /// # Panics
    ///
    /// Panics if `at.section` is out of range or `at.row` is past the end of
    /// the section.
    pub fn insert_rows<I>(
        &self,
        items: impl IntoIterator<Item = I>,
        at: Position,
        animation: RowAnimation,
    ) where
        I: Into<ErasedItem>,
    {
        let _perf = PerfSpan::new("insert_rows");
        let items = items.into_iter().map(Into::into).collect();
        let sections = self.sections.upgradable_read();
        check_insertion(&sections, at);
        self.insert_locked(sections, items, at, animation);
    }

    /// Appends `item` to the end of `section`.
    ///
    /// # Panics
    ///
    /// Panics if `section >= section_count()`.
    pub fn append_row(&self, item: impl Into<ErasedItem>, section: usize, animation: RowAnimation) {
        let _perf = PerfSpan::new("append_row");
        let sections = self.sections.upgradable_read();
        check_section(&sections, section);
        let at = Position::new(section, sections[section].row_count());
        self.insert_locked(sections, vec![item.into()], at, animation);
    }

    /// Inserts `item` at the start of `section`.
    ///
    /// # Panics
    ///
    /// Panics if `section >= section_count()`.
    pub fn prepend_row(
        &self,
        item: impl Into<ErasedItem>,
        section: usize,
        animation: RowAnimation,
    ) {
        self.insert_row(
            item,
            Position::new(section, 0),
            animation.or(self.animations().prepend),
        );
    }

    fn insert_locked(
        &self,
        sections: MutationGuard<'_>,
        items: Vec<ErasedItem>,
        at: Position,
        animation: RowAnimation,
    ) {
        if items.is_empty() {
            return;
        }

        let count = items.len();
        tracing::debug!(
            target: targets::MODEL,
            section = at.section,
            row = at.row,
            count,
            "inserting rows"
        );

        let changes = ChangeSet::single(Change::RowsInserted {
            section: at.section,
            rows: at.row..at.row + count,
            animation: animation.or(self.animations().insert),
        });
        self.signals.emit_change(changes, move || {
            let mut sections = RwLockUpgradableReadGuard::upgrade(sections);
            sections[at.section].insert_items(items, at.row);
        });
    }

    /// Removes and returns the row at `at`.
    ///
    /// If `collapse_empty_section` is set and the section is left with no
    /// rows, the section is removed too, reported as a
    /// [`Change::SectionsRemoved`] after the [`Change::RowsRemoved`].
    ///
    /// # Panics
    ///
    /// Panics if `at` is out of range.
    pub fn remove_row(
        &self,
        at: Position,
        animation: RowAnimation,
        collapse_empty_section: bool,
    ) -> ErasedItem {
        let sections = self.sections.upgradable_read();
        check_row(&sections, at);
        self.remove_single_locked(sections, at, animation, collapse_empty_section)
    }

    /// Removes a batch of rows, possibly spanning several sections.
    ///
    /// Every position refers to the layout before the call, so the order of
    /// `positions` does not matter. The removal is reported as one
    /// [`Change::RowsRemoved`] with the positions sorted, followed (when
    /// `collapse_empty_sections` is set and any section was emptied) by one
    /// [`Change::SectionsRemoved`] listing the emptied sections by their
    /// original indices.
    ///
    /// Returns the removed rows in ascending position order.
    ///
    /// # Panics
    ///
    /// Panics if any position is out of range or listed twice.
    pub fn remove_rows(
        &self,
        positions: impl IntoIterator<Item = Position>,
        animation: RowAnimation,
        collapse_empty_sections: bool,
    ) -> Vec<ErasedItem> {
        let _perf = PerfSpan::new("remove_rows");
        let mut positions: Vec<Position> = positions.into_iter().collect();
        positions.sort_unstable();
        if let Some(pair) = positions.windows(2).find(|pair| pair[0] == pair[1]) {
            panic!("position {} listed more than once in batch removal", pair[0]);
        }

        let sections = self.sections.upgradable_read();
        for &position in &positions {
            check_row(&sections, position);
        }
        self.remove_locked(sections, positions, animation, collapse_empty_sections)
    }

    /// Removes the first row of `section`, collapsing the section if it is
    /// left empty.
    ///
    /// # Panics
    ///
    /// Panics if `section` is out of range or has no rows.
    pub fn remove_first_row(&self, section: usize, animation: RowAnimation) -> ErasedItem {
        let sections = self.sections.upgradable_read();
        check_section(&sections, section);
        assert!(
            !sections[section].is_empty(),
            "cannot remove the first row of empty section {section}"
        );
        let animation = animation.or(self.animations().remove_first);
        self.remove_single_locked(sections, Position::new(section, 0), animation, true)
    }

    /// Removes the last row of `section`, collapsing the section if it is
    /// left empty.
    ///
    /// # Panics
    ///
    /// Panics if `section` is out of range or has no rows.
    pub fn remove_last_row(&self, section: usize, animation: RowAnimation) -> ErasedItem {
        let sections = self.sections.upgradable_read();
        check_section(&sections, section);
        let count = sections[section].row_count();
        assert!(count > 0, "cannot remove the last row of empty section {section}");
        let animation = animation.or(self.animations().remove_last);
        self.remove_single_locked(sections, Position::new(section, count - 1), animation, true)
    }

    /// Removes the first row equal to `item`, collapsing its section if it is
    /// left empty. Returns `None` if no row matches.
    pub fn remove_first_occurrence<I: Item>(
        &self,
        item: &I,
        animation: RowAnimation,
    ) -> Option<ErasedItem> {
        self.remove_first_where(|candidate| candidate.matches(item), animation)
    }

    /// Removes the first row satisfying `predicate`, collapsing its section if
    /// it is left empty. Returns `None` if no row matches.
    pub fn remove_first_where(
        &self,
        predicate: impl FnMut(&ErasedItem) -> bool,
        animation: RowAnimation,
    ) -> Option<ErasedItem> {
        let sections = self.sections.upgradable_read();
        let position = scan(&sections, predicate)?;
        Some(self.remove_single_locked(sections, position, animation, true))
    }

    fn remove_single_locked(
        &self,
        sections: MutationGuard<'_>,
        at: Position,
        animation: RowAnimation,
        collapse_empty_section: bool,
    ) -> ErasedItem {
        let mut removed = self.remove_locked(sections, vec![at], animation, collapse_empty_section);
        match removed.pop() {
            Some(item) => item,
            None => unreachable!("a validated single-row removal returns one row"),
        }
    }

    /// `positions` must be sorted, distinct and in range.
    fn remove_locked(
        &self,
        sections: MutationGuard<'_>,
        positions: Vec<Position>,
        animation: RowAnimation,
        collapse_empty_sections: bool,
    ) -> Vec<ErasedItem> {
        if positions.is_empty() {
            return Vec::new();
        }

        let emptied: Vec<usize> = if collapse_empty_sections {
            positions
                .chunk_by(|a, b| a.section == b.section)
                .filter(|run| run.len() == sections[run[0].section].row_count())
                .map(|run| run[0].section)
                .collect()
        } else {
            Vec::new()
        };

        tracing::debug!(
            target: targets::MODEL,
            count = positions.len(),
            collapsed = emptied.len(),
            "removing rows"
        );

        let defaults = self.animations();
        let mut changes = ChangeSet::single(Change::RowsRemoved {
            positions: positions.clone(),
            animation: animation.or(defaults.remove),
        });
        if !emptied.is_empty() {
            changes.push(Change::SectionsRemoved {
                indices: emptied.clone(),
                animation: animation.or(defaults.remove_section),
            });
        }

        self.signals.emit_change(changes, move || {
            let mut sections = RwLockUpgradableReadGuard::upgrade(sections);
            let mut removed: Vec<ErasedItem> = positions
                .iter()
                .rev()
                .map(|p| sections[p.section].remove_item(p.row))
                .collect();
            for &index in emptied.iter().rev() {
                sections.remove(index);
            }
            removed.reverse();
            removed
        })
    }

    /// Moves the row at `from` to `to`, keeping the row itself (with any
    /// callbacks it carries) intact.
    ///
    /// `to` is addressed after the row has been taken out of its section. If
    /// the source section is left empty it is removed, reported as a
    /// [`Change::SectionsRemoved`] after the [`Change::RowMoved`].
    ///
    /// # Panics
    ///
    /// Panics if `from` is out of range, or `to` is out of range once the row
    /// has been taken out.
    pub fn move_row(&self, from: Position, to: Position) {
        let _perf = PerfSpan::new("move_row");
        let sections = self.sections.upgradable_read();
        check_row(&sections, from);
        check_section(&sections, to.section);
        let available = if to.section == from.section {
            sections[to.section].row_count() - 1
        } else {
            sections[to.section].row_count()
        };
        assert!(
            to.row <= available,
            "move destination {to} out of range: section {} would have {available} rows",
            to.section
        );
        let collapses = to.section != from.section && sections[from.section].row_count() == 1;

        tracing::debug!(target: targets::MODEL, %from, %to, collapses, "moving row");

        let mut changes = ChangeSet::single(Change::RowMoved { from, to });
        if collapses {
            changes.push(Change::SectionsRemoved {
                indices: vec![from.section],
                animation: self.animations().remove_section,
            });
        }

        self.signals.emit_change(changes, move || {
            let mut sections = RwLockUpgradableReadGuard::upgrade(sections);
            let item = sections[from.section].remove_item(from.row);
            sections[to.section].insert_item(item, to.row);
            if collapses {
                sections.remove(from.section);
            }
        });
    }

    /// Swaps the row at `at` for `item` and returns the old row.
    ///
    /// Reported as a [`Change::RowsRemoved`] followed by a
    /// [`Change::RowsInserted`] at the same position. The section is never
    /// collapsed, even when it has a single row.
    ///
    /// # Panics
    ///
    /// Panics if `at` is out of range.
    pub fn replace_row(
        &self,
        at: Position,
        item: impl Into<ErasedItem>,
        out_animation: RowAnimation,
        in_animation: RowAnimation,
    ) -> ErasedItem {
        let _perf = PerfSpan::new("replace_row");
        let item = item.into();
        let sections = self.sections.upgradable_read();
        check_row(&sections, at);

        tracing::debug!(
            target: targets::MODEL,
            section = at.section,
            row = at.row,
            "replacing row"
        );

        let defaults = self.animations();
        let changes = ChangeSet::single(Change::RowsRemoved {
            positions: vec![at],
            animation: out_animation.or(defaults.replace_out),
        })
        .with(Change::RowsInserted {
            section: at.section,
            rows: at.row..at.row + 1,
            animation: in_animation.or(defaults.replace_in),
        });

        self.signals.emit_change(changes, move || {
            RwLockUpgradableReadGuard::upgrade(sections)[at.section].replace_item(at.row, item)
        })
    }

    // =========================================================================
    // Section mutation
    // =========================================================================

    /// Inserts `section` at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index > section_count()`.
    pub fn insert_section(&self, section: Section, index: usize, animation: RowAnimation) {
        let sections = self.sections.upgradable_read();
        let count = sections.len();
        assert!(
            index <= count,
            "section insertion index {index} out of range for {count} sections"
        );
        self.insert_section_locked(sections, section, index, animation);
    }

    /// Appends `section` after the last section.
    pub fn append_section(&self, section: Section, animation: RowAnimation) {
        let sections = self.sections.upgradable_read();
        let index = sections.len();
        self.insert_section_locked(sections, section, index, animation);
    }

    fn insert_section_locked(
        &self,
        sections: MutationGuard<'_>,
        section: Section,
        index: usize,
        animation: RowAnimation,
    ) {
        let _perf = PerfSpan::new("insert_section");
        tracing::debug!(
            target: targets::MODEL,
            index,
            rows = section.row_count(),
            "inserting section"
        );

        let changes = ChangeSet::single(Change::SectionsInserted {
            indices: vec![index],
            animation: animation.or(self.animations().insert_section),
        });
        self.signals.emit_change(changes, move || {
            RwLockUpgradableReadGuard::upgrade(sections).insert(index, section);
        });
    }

    /// Removes and returns the section at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= section_count()`.
    pub fn remove_section(&self, index: usize, animation: RowAnimation) -> Section {
        let _perf = PerfSpan::new("remove_section");
        let sections = self.sections.upgradable_read();
        check_section(&sections, index);

        tracing::debug!(target: targets::MODEL, index, "removing section");

        let changes = ChangeSet::single(Change::SectionsRemoved {
            indices: vec![index],
            animation: animation.or(self.animations().remove_section),
        });
        self.signals.emit_change(changes, move || {
            RwLockUpgradableReadGuard::upgrade(sections).remove(index)
        })
    }

    /// Moves the section at `from` so that it ends up at `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range.
    pub fn move_section(&self, from: usize, to: usize) {
        let _perf = PerfSpan::new("move_section");
        let sections = self.sections.upgradable_read();
        check_section(&sections, from);
        check_section(&sections, to);

        tracing::debug!(target: targets::MODEL, from, to, "moving section");

        let changes = ChangeSet::single(Change::SectionMoved { from, to });
        self.signals.emit_change(changes, move || {
            let mut sections = RwLockUpgradableReadGuard::upgrade(sections);
            let section = sections.remove(from);
            sections.insert(to, section);
        });
    }

    /// Swaps the section at `index` for `section` and returns the old one.
    ///
    /// Reported as a [`Change::SectionsRemoved`] followed by a
    /// [`Change::SectionsInserted`], never as an update.
    ///
    /// # Panics
    ///
    /// Panics if `index >= section_count()`.
    pub fn replace_section(
        &self,
        index: usize,
        section: Section,
        out_animation: RowAnimation,
        in_animation: RowAnimation,
    ) -> Section {
        let _perf = PerfSpan::new("replace_section");
        let sections = self.sections.upgradable_read();
        check_section(&sections, index);

        tracing::debug!(target: targets::MODEL, index, "replacing section");

        let defaults = self.animations();
        let changes = ChangeSet::single(Change::SectionsRemoved {
            indices: vec![index],
            animation: out_animation.or(defaults.replace_out),
        })
        .with(Change::SectionsInserted {
            indices: vec![index],
            animation: in_animation.or(defaults.replace_in),
        });

        self.signals.emit_change(changes, move || {
            let mut sections = RwLockUpgradableReadGuard::upgrade(sections);
            std::mem::replace(&mut sections[index], section)
        })
    }

    /// Edits the section at `index` in place, reported as a
    /// [`Change::SectionsUpdated`].
    ///
    /// `f` gets a [`SectionEdit`]: it can change the id, the header and the
    /// footer, and edit rows through [`SectionEdit::get_mut`], but it cannot
    /// add, remove or reorder rows. `f` runs under the model's write lock and
    /// must not call back into the model.
    ///
    /// # Panics
    ///
    /// Panics if `index >= section_count()`.
    pub fn modify_section<R>(
        &self,
        index: usize,
        f: impl FnOnce(&mut SectionEdit<'_>) -> R,
    ) -> R {
        let sections = self.sections.upgradable_read();
        check_section(&sections, index);

        tracing::debug!(target: targets::MODEL, index, "updating section");

        let changes = ChangeSet::single(Change::SectionsUpdated {
            indices: vec![index],
        });
        self.signals.emit_change(changes, move || {
            let mut sections = RwLockUpgradableReadGuard::upgrade(sections);
            f(&mut SectionEdit::new(&mut sections[index]))
        })
    }

    /// Replaces every section.
    ///
    /// Emits `model_about_to_reset`, `model_reset` and `sections_updated`
    /// instead of a change set.
    pub fn set_sections(&self, sections: Vec<Section>) {
        let _perf = PerfSpan::new("set_sections");
        tracing::debug!(target: targets::MODEL, sections = sections.len(), "resetting sections");

        self.signals.emit_reset(|| {
            *self.sections.write() = sections;
        });
    }

    /// Removes every section. Emits the reset signals.
    pub fn clear(&self) {
        self.set_sections(Vec::new());
    }

    // =========================================================================
    // Responder dispatch
    // =========================================================================

    /// Tells the row at `position` it is about to appear.
    ///
    /// # Panics
    ///
    /// Panics if `position` is out of range. The same holds for every
    /// dispatch method below.
    pub fn will_appear(&self, position: Position) {
        let callback = self.with_item(position, |item| {
            item.as_appearance_responder().and_then(|r| r.on_will_appear())
        });
        if let Some(callback) = callback {
            tracing::trace!(target: targets::RESPONDER, %position, "will appear");
            callback(position);
        }
    }

    /// Tells the row at `position` it appeared.
    pub fn did_appear(&self, position: Position) {
        let callback = self.with_item(position, |item| {
            item.as_appearance_responder().and_then(|r| r.on_did_appear())
        });
        if let Some(callback) = callback {
            tracing::trace!(target: targets::RESPONDER, %position, "did appear");
            callback(position);
        }
    }

    /// Asks the row at `position` which position to actually select.
    ///
    /// Returns `position` unchanged if the row does not redirect.
    pub fn will_select(&self, position: Position) -> Position {
        let redirect = self.with_item(position, |item| {
            item.as_selection_responder().and_then(|r| r.on_will_select())
        });
        match redirect {
            Some(redirect) => {
                let redirected = redirect(position);
                tracing::trace!(target: targets::RESPONDER, %position, %redirected, "will select");
                redirected
            }
            None => position,
        }
    }

    /// Tells the row at `position` it was selected.
    pub fn did_select(&self, position: Position) {
        let callback = self.with_item(position, |item| {
            item.as_selection_responder().and_then(|r| r.on_did_select())
        });
        if let Some(callback) = callback {
            tracing::trace!(target: targets::RESPONDER, %position, "did select");
            callback(position);
        }
    }

    /// Asks the row at `position` which position to actually deselect.
    ///
    /// Returns `position` unchanged if the row does not redirect.
    pub fn will_deselect(&self, position: Position) -> Position {
        let redirect = self.with_item(position, |item| {
            item.as_deselection_responder().and_then(|r| r.on_will_deselect())
        });
        match redirect {
            Some(redirect) => {
                let redirected = redirect(position);
                tracing::trace!(
                    target: targets::RESPONDER,
                    %position,
                    %redirected,
                    "will deselect"
                );
                redirected
            }
            None => position,
        }
    }

    /// Tells the row at `position` it was deselected.
    pub fn did_deselect(&self, position: Position) {
        let callback = self.with_item(position, |item| {
            item.as_deselection_responder().and_then(|r| r.on_did_deselect())
        });
        if let Some(callback) = callback {
            tracing::trace!(target: targets::RESPONDER, %position, "did deselect");
            callback(position);
        }
    }

    /// Swipe actions on the leading edge of the row at `position`.
    pub fn leading_swipe_actions(&self, position: Position) -> Vec<SwipeAction> {
        self.with_item(position, |item| {
            item.as_swipe_action_responder()
                .map(|r| r.leading_swipe_actions())
                .unwrap_or_default()
        })
    }

    /// Swipe actions on the trailing edge of the row at `position`.
    pub fn trailing_swipe_actions(&self, position: Position) -> Vec<SwipeAction> {
        self.with_item(position, |item| {
            item.as_swipe_action_responder()
                .map(|r| r.trailing_swipe_actions())
                .unwrap_or_default()
        })
    }
}

impl std::fmt::Debug for ListModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sections = self.sections.read_recursive();
        f.debug_struct("ListModel")
            .field("sections", &sections.len())
            .field(
                "rows",
                &sections.iter().map(Section::row_count).collect::<Vec<_>>(),
            )
            .finish_non_exhaustive()
    }
}

static_assertions::assert_impl_all!(ListModel: Send, Sync);

fn scan(
    sections: &[Section],
    mut predicate: impl FnMut(&ErasedItem) -> bool,
) -> Option<Position> {
    sections.iter().enumerate().find_map(|(index, section)| {
        section
            .position_where(&mut predicate)
            .map(|row| Position::new(index, row))
    })
}

fn resolve_slot(slot: HeaderFooter, default: Option<&DefaultHeaderFooter>) -> HeaderFooter {
    match default {
        Some(default) if slot.content.is_none() && slot.height.is_automatic() => {
            HeaderFooter::reusable_view(default.reuse_tag()).with_height(default.height)
        }
        _ => slot,
    }
}

#[track_caller]
fn check_section(sections: &[Section], section: usize) {
    assert!(
        section < sections.len(),
        "section {section} out of range for model with {} sections",
        sections.len()
    );
}

#[track_caller]
fn check_row(sections: &[Section], position: Position) {
    check_section(sections, position.section);
    let rows = sections[position.section].row_count();
    assert!(
        position.row < rows,
        "position {position} out of range: section {} has {rows} rows",
        position.section
    );
}

#[track_caller]
fn check_insertion(sections: &[Section], position: Position) {
    check_section(sections, position.section);
    let rows = sections[position.section].row_count();
    assert!(
        position.row <= rows,
        "insertion position {position} out of range: section {} has {rows} rows",
        position.section
    );
}
