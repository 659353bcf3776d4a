//! Clause walk and pagination
//!
//! Lays a template out as an ordered sequence of fixed-size pages. The
//! walk is a single pass in document order (array order, depth-first),
//! keeping a running vertical cursor and breaking to a new page when a
//! clause or the signature section would start too close to the bottom
//! edge.
//!
//! Positions are millimetres from the top-left corner of an A4 portrait
//! page; the PDF emitter converts to points and flips the axis. Line
//! wrapping is approximated by character count rather than glyph
//! metrics, which is adequate for this document register. A caller with
//! real text measurement can swap the widths in [`PageGeometry`] without
//! touching the walk.

use contract_model::{substitute, Clause, GenerationInput, Template};

/// Vertical advance after a top-level clause heading.
const CLAUSE_TITLE_ADVANCE: f64 = 10.0;
/// Extra spacing after each top-level clause.
const CLAUSE_GAP: f64 = 5.0;
/// Extra spacing after each sub-clause.
const SUBCLAUSE_GAP: f64 = 3.0;
/// Gap between the last clause and the signature section when no page
/// break is needed.
const SIGNATURE_LEAD: f64 = 20.0;
/// Drop from a signature label down to its ruled line.
const RULE_DROP: f64 = 25.0;
/// Length of a signature rule.
const RULE_LENGTH: f64 = 60.0;
/// Gap between a ruled line and the caption below it.
const CAPTION_GAP: f64 = 5.0;
/// Gap between the company block and the acknowledgement sentence.
const ACKNOWLEDGEMENT_LEAD: f64 = 15.0;

/// Output page geometry. All distances are in millimetres.
#[derive(Debug, Clone)]
pub struct PageGeometry {
    pub page_width: f64,
    pub page_height: f64,
    pub margin_left: f64,
    /// Advance per body text line.
    pub line_height: f64,
    /// A clause starting below this cursor position moves to a new page.
    pub clause_break_y: f64,
    /// Cursor position at the top of a continuation page.
    pub page_top_y: f64,
    /// The signature section needs less room than a full clause, so it
    /// breaks at a smaller threshold.
    pub signature_break_y: f64,
    /// Cursor position when the signature section opens a fresh page.
    pub signature_top_y: f64,
    /// Wrap width for top-level clause content.
    pub text_width: f64,
    /// Indent added per nesting level below the top.
    pub level_indent: f64,
    /// Approximate advance of one body character, used for wrapping and
    /// centering in place of glyph metrics.
    pub char_width: f64,
    pub title_size: f64,
    pub body_size: f64,
    pub header_title_y: f64,
    pub header_banner_y: f64,
    pub header_date_y: f64,
    pub header_salutation_y: f64,
    /// Cursor position of the first clause on the first page.
    pub body_start_y: f64,
}

impl Default for PageGeometry {
    /// A4 portrait with the margins and thresholds the document was
    /// designed around.
    fn default() -> Self {
        Self {
            page_width: 210.0,
            page_height: 297.0,
            margin_left: 20.0,
            line_height: 7.0,
            clause_break_y: 270.0,
            page_top_y: 20.0,
            signature_break_y: 240.0,
            signature_top_y: 30.0,
            text_width: 170.0,
            level_indent: 5.0,
            char_width: 2.1,
            title_size: 16.0,
            body_size: 12.0,
            header_title_y: 20.0,
            header_banner_y: 30.0,
            header_date_y: 45.0,
            header_salutation_y: 60.0,
            body_start_y: 75.0,
        }
    }
}

/// Font face for a text item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontStyle {
    Regular,
    Bold,
}

/// Horizontal alignment for a text item. Centered items give `x` as the
/// center line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

/// One positioned element on a page.
#[derive(Debug, Clone, PartialEq)]
pub enum PageItem {
    Text {
        x: f64,
        y: f64,
        size: f64,
        style: FontStyle,
        align: Align,
        text: String,
    },
    /// A horizontal ruled line, as used under signatures.
    Rule { x1: f64, x2: f64, y: f64 },
}

/// One output page, items in emission order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub items: Vec<PageItem>,
}

impl Page {
    /// The page's text content joined line-per-item, for searching.
    pub fn text(&self) -> String {
        self.items
            .iter()
            .filter_map(|item| match item {
                PageItem::Text { text, .. } => Some(text.as_str()),
                PageItem::Rule { .. } => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Lay a template out as pages of positioned items, substituting the
/// input record into every clause.
pub fn layout_document(
    template: &Template,
    input: &GenerationInput,
    geometry: &PageGeometry,
) -> Vec<Page> {
    let mut layout = Layout::new(input, geometry);
    layout.header();
    layout.clauses(&template.clauses);
    layout.signature_section();
    layout.finish()
}

struct Layout<'a> {
    geometry: &'a PageGeometry,
    input: &'a GenerationInput,
    done: Vec<Page>,
    current: Page,
    y: f64,
}

impl<'a> Layout<'a> {
    fn new(input: &'a GenerationInput, geometry: &'a PageGeometry) -> Self {
        Self {
            geometry,
            input,
            done: Vec::new(),
            current: Page::default(),
            y: geometry.body_start_y,
        }
    }

    fn text(
        &mut self,
        x: f64,
        y: f64,
        size: f64,
        style: FontStyle,
        align: Align,
        text: impl Into<String>,
    ) {
        self.current.items.push(PageItem::Text {
            x,
            y,
            size,
            style,
            align,
            text: text.into(),
        });
    }

    fn rule(&mut self, x1: f64, x2: f64, y: f64) {
        self.current.items.push(PageItem::Rule { x1, x2, y });
    }

    fn break_page(&mut self, top: f64) {
        self.done.push(std::mem::take(&mut self.current));
        self.y = top;
    }

    /// Start a new page when the cursor has passed the clause threshold.
    fn ensure_clause_room(&mut self) {
        if self.y > self.geometry.clause_break_y {
            self.break_page(self.geometry.page_top_y);
        }
    }

    fn header(&mut self) {
        let g = self.geometry;
        let center = g.page_width / 2.0;
        self.text(
            center,
            g.header_title_y,
            g.title_size,
            FontStyle::Bold,
            Align::Center,
            format!(
                "LETTER OF APPOINTMENT FOR POSITION OF {}",
                self.input.position.to_uppercase()
            ),
        );
        self.text(
            center,
            g.header_banner_y,
            g.body_size,
            FontStyle::Bold,
            Align::Center,
            "PRIVATE AND CONFIDENTIAL",
        );
        self.text(
            g.margin_left,
            g.header_date_y,
            g.body_size,
            FontStyle::Regular,
            Align::Left,
            format!("DATE: {}", self.input.formatted_start_date()),
        );
        self.text(
            g.margin_left,
            g.header_salutation_y,
            g.body_size,
            FontStyle::Regular,
            Align::Left,
            format!("Dear {},", self.input.employee_name),
        );
        self.y = g.body_start_y;
    }

    fn clauses(&mut self, clauses: &[Clause]) {
        for (index, clause) in clauses.iter().enumerate() {
            self.clause(clause, &(index + 1).to_string());
            self.y += CLAUSE_GAP;
        }
    }

    fn clause(&mut self, clause: &Clause, number: &str) {
        let g = self.geometry;
        self.ensure_clause_room();

        self.text(
            g.margin_left,
            self.y,
            g.body_size,
            FontStyle::Bold,
            Align::Left,
            format!("{number}. {}", clause.title),
        );
        self.y += CLAUSE_TITLE_ADVANCE;

        if !clause.content.is_empty() {
            self.body_lines(&clause.content, g.margin_left, g.text_width);
        }

        for (index, sub) in clause.subclauses.iter().enumerate() {
            self.subclause(sub, &format!("{number}.{}", index + 1), 1);
        }
    }

    fn subclause(&mut self, clause: &Clause, number: &str, depth: usize) {
        let g = self.geometry;
        self.ensure_clause_room();

        let indent = g.level_indent * depth as f64;
        let mut heading = format!("{number}.");
        if !clause.title.is_empty() {
            heading.push(' ');
            heading.push_str(&clause.title);
        }
        self.text(
            g.margin_left + indent,
            self.y,
            g.body_size,
            FontStyle::Bold,
            Align::Left,
            heading,
        );
        self.y += g.line_height;

        if !clause.content.is_empty() {
            self.body_lines(&clause.content, g.margin_left + indent, g.text_width - indent);
        }
        self.y += SUBCLAUSE_GAP;

        for (index, sub) in clause.subclauses.iter().enumerate() {
            self.subclause(sub, &format!("{number}.{}", index + 1), depth + 1);
        }
    }

    /// Substitute, wrap and emit one clause body, advancing the cursor
    /// one line height per wrapped line.
    fn body_lines(&mut self, content: &str, x: f64, width: f64) {
        let g = self.geometry;
        let body = substitute(content, self.input);
        let lines = wrap(&body, chars_per_line(width, g.char_width));
        for line in lines {
            self.text(x, self.y, g.body_size, FontStyle::Regular, Align::Left, line);
            self.y += g.line_height;
        }
    }

    fn signature_section(&mut self) {
        let g = self.geometry;
        if self.y > g.signature_break_y {
            self.break_page(g.signature_top_y);
        } else {
            self.y += SIGNATURE_LEAD;
        }

        let x = g.margin_left;
        self.text(
            x,
            self.y,
            g.body_size,
            FontStyle::Regular,
            Align::Left,
            "For and on behalf of the Company",
        );
        self.y += RULE_DROP;
        self.rule(x, x + RULE_LENGTH, self.y);
        self.y += CAPTION_GAP;
        self.text(
            x,
            self.y,
            g.body_size,
            FontStyle::Regular,
            Align::Left,
            "Authorized Signatory",
        );

        self.y += ACKNOWLEDGEMENT_LEAD;
        self.text(
            x,
            self.y,
            g.body_size,
            FontStyle::Regular,
            Align::Left,
            "I have read and understood the terms and conditions of my employment.",
        );
        self.y += RULE_DROP;
        self.rule(x, x + RULE_LENGTH, self.y);
        self.y += CAPTION_GAP;
        self.text(
            x,
            self.y,
            g.body_size,
            FontStyle::Regular,
            Align::Left,
            self.input.employee_name.clone(),
        );
    }

    fn finish(mut self) -> Vec<Page> {
        self.done.push(self.current);
        self.done
    }
}

fn chars_per_line(width: f64, char_width: f64) -> usize {
    (width / char_width).max(1.0) as usize
}

/// Greedy word wrap by character count. A word longer than the limit
/// gets its own overlong line rather than being split mid-word.
fn wrap(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
        } else if current.chars().count() + 1 + word.chars().count() <= max_chars {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use contract_model::ProbationPeriod;
    use contract_store::default_templates;
    use pretty_assertions::assert_eq;

    fn input() -> GenerationInput {
        GenerationInput {
            employee_name: "Priya Shah".to_string(),
            position: "Software Engineer".to_string(),
            start_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            location: "Ahmedabad, Gujarat".to_string(),
            salary: Some(String::new()),
            probation_period: ProbationPeriod::Three,
            template_id: "default".to_string(),
        }
    }

    fn standard_template() -> Template {
        default_templates()
            .into_iter()
            .find(|t| t.id == "default")
            .unwrap()
    }

    fn leaf(id: &str, content: &str) -> Clause {
        Clause {
            id: id.to_string(),
            title: String::new(),
            content: content.to_string(),
            subclauses: Vec::new(),
        }
    }

    #[test]
    fn wrap_respects_word_boundaries() {
        let lines = wrap("one two three four", 9);
        assert_eq!(lines, vec!["one two", "three", "four"]);
    }

    #[test]
    fn wrap_gives_overlong_words_their_own_line() {
        let lines = wrap("a incomprehensibilities b", 10);
        assert_eq!(lines, vec!["a", "incomprehensibilities", "b"]);
    }

    #[test]
    fn wrap_of_empty_text_is_empty() {
        assert!(wrap("", 80).is_empty());
    }

    #[test]
    fn first_page_carries_header_and_salutation() {
        let pages = layout_document(&standard_template(), &input(), &PageGeometry::default());
        let first = pages[0].text();
        assert!(first.contains("LETTER OF APPOINTMENT FOR POSITION OF SOFTWARE ENGINEER"));
        assert!(first.contains("PRIVATE AND CONFIDENTIAL"));
        assert!(first.contains("DATE: 15/01/2024"));
        assert!(first.contains("Dear Priya Shah,"));
    }

    #[test]
    fn header_title_is_bold_and_centered() {
        let geometry = PageGeometry::default();
        let pages = layout_document(&standard_template(), &input(), &geometry);
        let Some(PageItem::Text { style, align, x, size, .. }) = pages[0].items.first() else {
            panic!("first item should be the header title");
        };
        assert_eq!(*style, FontStyle::Bold);
        assert_eq!(*align, Align::Center);
        assert_eq!(*x, geometry.page_width / 2.0);
        assert_eq!(*size, geometry.title_size);
    }

    #[test]
    fn clauses_are_numbered_positionally_and_substituted() {
        let pages = layout_document(&standard_template(), &input(), &PageGeometry::default());
        let text = pages
            .iter()
            .map(Page::text)
            .collect::<Vec<_>>()
            .join("\n")
            .replace('\n', " ");

        assert!(text.contains("1. EMPLOYMENT CONTRACT AND PERIOD"));
        assert!(text.contains("2. EFFECTIVE DATE"));
        assert!(text.contains("1.1."));
        assert!(text.contains("2.2."));
        assert!(text.contains("position of \"Software Engineer\""));
        assert!(text.contains("first 3 months"));
        assert!(!text.contains("{{"));
    }

    #[test]
    fn signature_section_closes_the_document() {
        let pages = layout_document(&standard_template(), &input(), &PageGeometry::default());
        let last = pages.last().unwrap();
        let text = last.text();
        assert!(text.contains("For and on behalf of the Company"));
        assert!(text.contains("Authorized Signatory"));
        assert!(text.contains("I have read and understood the terms and conditions"));
        assert!(text.ends_with("Priya Shah"));

        let rules = last
            .items
            .iter()
            .filter(|item| matches!(item, PageItem::Rule { .. }))
            .count();
        assert_eq!(rules, 2);
    }

    #[test]
    fn long_documents_break_onto_further_pages() {
        let filler = "The parties agree that this provision continues in full force \
                      and effect for the duration of the employment relationship.";
        let clauses: Vec<Clause> = (0..12)
            .map(|n| Clause {
                id: format!("clause_{n}"),
                title: format!("SECTION {n}"),
                content: filler.to_string(),
                subclauses: vec![
                    leaf(&format!("clause_{n}_1"), filler),
                    leaf(&format!("clause_{n}_2"), filler),
                ],
            })
            .collect();
        let template = Template {
            id: "long".to_string(),
            name: "Long".to_string(),
            clauses,
        };

        let geometry = PageGeometry::default();
        let pages = layout_document(&template, &input(), &geometry);
        assert!(pages.len() > 1, "expected a page break, got 1 page");

        // Continuation pages start at the top margin, not mid-page.
        let Some(PageItem::Text { y, .. }) = pages[1].items.first() else {
            panic!("second page should start with a clause heading");
        };
        assert_eq!(*y, geometry.page_top_y);
    }

    #[test]
    fn sub_clauses_break_independently_of_their_parent() {
        let filler = "This obligation survives termination of the agreement and binds \
                      successors and assigns of the Company wherever engaged.";
        let template = Template {
            id: "deep".to_string(),
            name: "Deep".to_string(),
            clauses: vec![Clause {
                id: "clause_root".to_string(),
                title: "OBLIGATIONS".to_string(),
                content: String::new(),
                subclauses: (0..30)
                    .map(|n| leaf(&format!("clause_root_{n}"), filler))
                    .collect(),
            }],
        };

        let pages = layout_document(&template, &input(), &PageGeometry::default());
        assert!(pages.len() > 1);
        // The parent heading sits on page one together with the first
        // sub-clauses; later sub-clauses flowed to the next page.
        assert!(pages[0].text().contains("1. OBLIGATIONS"));
        assert!(pages[1].text().contains("1.1"));
    }

    #[test]
    fn nesting_below_two_levels_renders_with_deeper_numbers_and_indent() {
        let geometry = PageGeometry::default();
        let template = Template {
            id: "nested".to_string(),
            name: "Nested".to_string(),
            clauses: vec![Clause {
                id: "a".to_string(),
                title: "TOP".to_string(),
                content: String::new(),
                subclauses: vec![Clause {
                    id: "a_1".to_string(),
                    title: String::new(),
                    content: "Middle level.".to_string(),
                    subclauses: vec![leaf("a_1_1", "Bottom level.")],
                }],
            }],
        };

        let pages = layout_document(&template, &input(), &geometry);
        let text = pages[0].text();
        assert!(text.contains("1.1."));
        assert!(text.contains("1.1.1."));

        let deepest_x = pages[0]
            .items
            .iter()
            .find_map(|item| match item {
                PageItem::Text { x, text, .. } if text.starts_with("1.1.1.") => Some(*x),
                _ => None,
            })
            .unwrap();
        assert_eq!(deepest_x, geometry.margin_left + 2.0 * geometry.level_indent);
    }

    #[test]
    fn signature_moves_to_a_fresh_page_when_space_is_tight() {
        // One clause tall enough to land the cursor between the clause
        // and signature thresholds.
        let long_line = "word ".repeat(400);
        let template = Template {
            id: "tight".to_string(),
            name: "Tight".to_string(),
            clauses: vec![Clause {
                id: "only".to_string(),
                title: "TERMS".to_string(),
                content: long_line.trim().to_string(),
                subclauses: Vec::new(),
            }],
        };

        let geometry = PageGeometry::default();
        let pages = layout_document(&template, &input(), &geometry);
        let last = pages.last().unwrap();
        assert!(last.text().contains("Authorized Signatory"));

        if pages.len() > 1 {
            // Wherever the break fell, no page may run past the sheet.
            for page in &pages {
                for item in &page.items {
                    if let PageItem::Text { y, .. } = item {
                        assert!(*y < geometry.page_height);
                    }
                }
            }
        }
    }
}
