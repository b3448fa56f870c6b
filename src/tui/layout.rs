/// Width breakpoints for the bug table and status bar.
///
/// Narrow terminals drop the widest columns first so the title stays readable.

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Breakpoint {
    /// < 70 cols: id, title, status only
    Compact,
    /// 70-109 cols: adds priority and created
    Normal,
    /// 110+ cols: every column, including description
    Wide,
}

impl Breakpoint {
    pub fn from_width(width: u16) -> Self {
        match width {
            0..=69 => Breakpoint::Compact,
            70..=109 => Breakpoint::Normal,
            _ => Breakpoint::Wide,
        }
    }

    pub fn at_least(&self, min: Breakpoint) -> bool {
        *self >= min
    }

    /// Which of the five data columns (title, description, status,
    /// priority, created) to show
    pub fn visible_columns(&self) -> [bool; 5] {
        match self {
            Breakpoint::Compact => [true, false, true, false, false],
            Breakpoint::Normal => [true, false, true, true, true],
            Breakpoint::Wide => [true; 5],
        }
    }
}
