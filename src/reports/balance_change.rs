//! Balance Change Report
//!
//! Walks the category hierarchy and shows each subcategory's current balance
//! together with its change since the previous snapshot.
//!
//! The primary output is a small markup fragment (bold category headers,
//! indented subcategory lines, `<br>` line breaks, an inline coloured arrow
//! for non-zero changes). The same report is available as a full HTML
//! document and as plain text for the two parts of an outgoing message.

use crate::models::{BalanceSnapshot, Money, SubcategoryId};
use crate::services::Hierarchy;

const INDENT: &str = "&nbsp;&nbsp;&nbsp;&nbsp;";
const PLAIN_INDENT: &str = "    ";

/// Direction of a non-zero change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    fn color(self) -> &'static str {
        match self {
            Self::Up => "green",
            Self::Down => "red",
        }
    }

    fn html_arrow(self) -> &'static str {
        match self {
            Self::Up => "&uarr;",
            Self::Down => "&darr;",
        }
    }

    fn arrow(self) -> char {
        match self {
            Self::Up => '↑',
            Self::Down => '↓',
        }
    }
}

/// A row in the report for a single subcategory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubcategoryLine {
    pub id: SubcategoryId,
    pub name: String,
    pub current: Money,
    pub previous: Money,
    /// `current - previous`, rounded to cents
    pub delta: Money,
}

impl SubcategoryLine {
    fn new(id: SubcategoryId, name: String, current: Money, previous: Money) -> Self {
        Self {
            id,
            name,
            current,
            previous,
            delta: (current - previous).round_to_cents(),
        }
    }

    /// `None` when the rounded change is zero
    pub fn direction(&self) -> Option<Direction> {
        if self.delta.is_positive() {
            Some(Direction::Up)
        } else if self.delta.is_negative() {
            Some(Direction::Down)
        } else {
            None
        }
    }

    fn markup_indicator(&self) -> String {
        match self.direction() {
            Some(direction) => format!(
                "&nbsp;&nbsp;<span style='color:{}'>{}&nbsp;{}</span>",
                direction.color(),
                self.delta.abs(),
                direction.html_arrow()
            ),
            None => String::new(),
        }
    }

    fn plain_indicator(&self) -> String {
        match self.direction() {
            Some(direction) => format!("  {} {}", self.delta.abs(), direction.arrow()),
            None => String::new(),
        }
    }
}

/// A category header with its subcategory rows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySection {
    pub name: String,
    pub lines: Vec<SubcategoryLine>,
}

/// Balance change report across all reportable categories
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BalanceChangeReport {
    pub sections: Vec<CategorySection>,
}

impl BalanceChangeReport {
    /// Compute rows for every reportable category in hierarchy order
    ///
    /// Both snapshots default to zero for subcategories they do not contain.
    pub fn build(
        hierarchy: &Hierarchy,
        current: &BalanceSnapshot,
        previous: &BalanceSnapshot,
    ) -> Self {
        let sections = hierarchy
            .reportable()
            .map(|node| CategorySection {
                name: node.name.clone(),
                lines: node
                    .subcategories
                    .iter()
                    .map(|entry| {
                        SubcategoryLine::new(
                            entry.id.clone(),
                            entry.name.clone(),
                            current.get_or_default(&entry.id),
                            previous.get_or_default(&entry.id),
                        )
                    })
                    .collect(),
            })
            .collect();

        Self { sections }
    }

    /// Render the markup fragment
    pub fn render_markup(&self) -> String {
        let mut output = String::from("<p>");

        for section in &self.sections {
            output.push_str(&format!("<b>{}</b> <br>", escape_html(&section.name)));

            for line in &section.lines {
                output.push_str(INDENT);
                output.push_str(&format!(
                    "{}: {}{}<br>",
                    escape_html(&line.name),
                    line.current,
                    line.markup_indicator()
                ));
            }
        }

        output.push_str("</p>");
        output
    }

    /// The markup wrapped in a minimal HTML document
    pub fn html_document(&self) -> String {
        format!(
            "<html><head></head><body>{}</body></html>",
            self.render_markup()
        )
    }

    /// Render for a plain-text mail part or a terminal
    pub fn plain_text(&self) -> String {
        let mut output = String::new();

        for section in &self.sections {
            output.push_str(&section.name);
            output.push('\n');

            for line in &section.lines {
                output.push_str(&format!(
                    "{}{}: {}{}\n",
                    PLAIN_INDENT,
                    line.name,
                    line.current,
                    line.plain_indicator()
                ));
            }
        }

        output
    }

    /// Iterate every subcategory row
    pub fn lines(&self) -> impl Iterator<Item = &SubcategoryLine> {
        self.sections.iter().flat_map(|s| &s.lines)
    }

    /// Number of subcategories whose rounded balance changed
    pub fn changed_count(&self) -> usize {
        self.lines().filter(|l| l.direction().is_some()).count()
    }
}

/// Render the markup report in one step
pub fn render_report(
    hierarchy: &Hierarchy,
    current: &BalanceSnapshot,
    previous: &BalanceSnapshot,
) -> String {
    BalanceChangeReport::build(hierarchy, current, previous).render_markup()
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
