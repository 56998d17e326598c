//! A4 print grid geometry and roster pagination.
//!
//! # Responsibility
//! - Define paper/grid dimensions and the derived card slot size.
//! - Chunk an ordered roster into print pages, padding the last page
//!   with placeholders so the grid geometry holds.
//!
//! # Invariants
//! - `pages.len() == ceil(roster.len() / capacity)` for a non-empty
//!   roster; an empty roster yields zero pages.
//! - Concatenating the card slots of all pages reproduces the input
//!   order exactly.

use crate::model::selection::Selection;
use crate::model::student::Student;

/// Print grid configuration for one physical sheet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrintConfig {
    /// Paper width in millimeters.
    pub paper_width_mm: f64,
    /// Paper height in millimeters.
    pub paper_height_mm: f64,
    /// Outer margin on every side, in millimeters.
    pub margin_mm: f64,
    /// Gap between adjacent card slots, in millimeters.
    pub spacing_mm: f64,
    /// Card columns per sheet.
    pub cols: usize,
    /// Card rows per sheet.
    pub rows: usize,
}

impl Default for PrintConfig {
    /// A4 portrait, 2x5 grid: the layout the print dialog expects at
    /// 100% scale with default margins.
    fn default() -> Self {
        Self {
            paper_width_mm: 210.0,
            paper_height_mm: 297.0,
            margin_mm: 10.0,
            spacing_mm: 5.0,
            cols: 2,
            rows: 5,
        }
    }
}

impl PrintConfig {
    /// Card slots per sheet.
    pub fn capacity(&self) -> usize {
        self.rows * self.cols
    }

    /// Width of one card slot, in millimeters.
    ///
    /// With the A4 default this is 92.5 mm.
    pub fn card_width_mm(&self) -> f64 {
        let usable = self.paper_width_mm
            - 2.0 * self.margin_mm
            - self.spacing_mm * (self.cols as f64 - 1.0);
        usable / self.cols as f64
    }

    /// Height of one card slot, in millimeters.
    ///
    /// With the A4 default this is 52.4 mm.
    pub fn card_height_mm(&self) -> f64 {
        let usable = self.paper_height_mm
            - 2.0 * self.margin_mm
            - self.spacing_mm * (self.rows as f64 - 1.0);
        usable / self.rows as f64
    }
}

/// One slot of a print page grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageSlot {
    /// A student card.
    Card(Student),
    /// Invisible filler keeping the grid geometry of a partial page.
    Placeholder,
}

/// One physical sheet worth of card slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintPage {
    slots: Vec<PageSlot>,
}

impl PrintPage {
    /// All slots in grid order, placeholders included.
    pub fn slots(&self) -> &[PageSlot] {
        &self.slots
    }

    /// Students on this page, in grid order.
    pub fn cards(&self) -> impl Iterator<Item = &Student> {
        self.slots.iter().filter_map(|slot| match slot {
            PageSlot::Card(student) => Some(student),
            PageSlot::Placeholder => None,
        })
    }

    /// Number of real cards on this page.
    pub fn card_count(&self) -> usize {
        self.cards().count()
    }

    /// Number of trailing placeholder slots.
    pub fn placeholder_count(&self) -> usize {
        self.slots.len() - self.card_count()
    }
}

/// Partitions an ordered roster into print pages.
///
/// Each page carries exactly `config.capacity()` slots. The final
/// page pads its tail with [`PageSlot::Placeholder`] entries so a
/// partially filled sheet keeps the same grid geometry.
pub fn paginate(students: &[Student], config: &PrintConfig) -> Vec<PrintPage> {
    let capacity = config.capacity();
    if capacity == 0 {
        return Vec::new();
    }

    students
        .chunks(capacity)
        .map(|chunk| {
            let mut slots: Vec<PageSlot> = chunk
                .iter()
                .cloned()
                .map(PageSlot::Card)
                .collect();
            slots.resize(capacity, PageSlot::Placeholder);
            PrintPage { slots }
        })
        .collect()
}

/// Resolves which students go to print.
///
/// A non-empty selection filters the roster preserving roster order;
/// an empty selection prints everyone.
pub fn select_for_print(students: &[Student], selection: &Selection) -> Vec<Student> {
    if selection.is_empty() {
        return students.to_vec();
    }
    students
        .iter()
        .filter(|student| selection.contains(student.id))
        .cloned()
        .collect()
}
