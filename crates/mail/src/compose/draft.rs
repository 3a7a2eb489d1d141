//! Draft editing model
//!
//! The body is HTML. Positions are char indices into the body so that
//! multi-byte text never splits a code point.

/// Placeholder tokens the recipient-side mail merge understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateVariable {
    FirstName,
    LastName,
    Company,
    Date,
    Time,
}

impl TemplateVariable {
    pub const ALL: [TemplateVariable; 5] = [
        TemplateVariable::FirstName,
        TemplateVariable::LastName,
        TemplateVariable::Company,
        TemplateVariable::Date,
        TemplateVariable::Time,
    ];

    /// Literal token spliced into the body
    pub fn token(&self) -> &'static str {
        match self {
            TemplateVariable::FirstName => "{{firstName}}",
            TemplateVariable::LastName => "{{lastName}}",
            TemplateVariable::Company => "{{company}}",
            TemplateVariable::Date => "{{date}}",
            TemplateVariable::Time => "{{time}}",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TemplateVariable::FirstName => "First Name",
            TemplateVariable::LastName => "Last Name",
            TemplateVariable::Company => "Company",
            TemplateVariable::Date => "Date",
            TemplateVariable::Time => "Time",
        }
    }

    /// Look up by short name (`firstName`) or full token (`{{firstName}}`),
    /// ignoring case
    pub fn parse(name: &str) -> Option<Self> {
        let name = name
            .trim()
            .trim_start_matches("{{")
            .trim_end_matches("}}");
        Self::ALL.into_iter().find(|v| {
            let short = &v.token()[2..v.token().len() - 2];
            short.eq_ignore_ascii_case(name)
        })
    }
}

/// Inline formatting applied around the selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Format {
    Bold,
    Italic,
    Underline,
    BulletList,
    Link(String),
}

impl Format {
    fn tags(&self) -> (String, String) {
        match self {
            Format::Bold => ("<b>".into(), "</b>".into()),
            Format::Italic => ("<i>".into(), "</i>".into()),
            Format::Underline => ("<u>".into(), "</u>".into()),
            Format::BulletList => ("<ul><li>".into(), "</li></ul>".into()),
            Format::Link(url) => (format!("<a href=\"{}\">", escape_html(url)), "</a>".into()),
        }
    }
}

/// Escape text for inclusion in an HTML body or attribute
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn byte_index(text: &str, char_idx: usize) -> usize {
    text.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(text.len())
}

/// An in-progress message
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    subject: String,
    body: String,
    cursor: usize,
    anchor: Option<usize>,
}

impl Draft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_subject(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            ..Self::default()
        }
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Selected char range, if any text is selected
    pub fn selection(&self) -> Option<(usize, usize)> {
        let anchor = self.anchor?;
        match anchor.cmp(&self.cursor) {
            std::cmp::Ordering::Less => Some((anchor, self.cursor)),
            std::cmp::Ordering::Greater => Some((self.cursor, anchor)),
            std::cmp::Ordering::Equal => None,
        }
    }

    pub fn selected_text(&self) -> &str {
        match self.selection() {
            Some((start, end)) => {
                &self.body[byte_index(&self.body, start)..byte_index(&self.body, end)]
            }
            None => "",
        }
    }

    /// Whether subject or body is blank
    pub fn is_blank(&self) -> bool {
        self.subject.trim().is_empty() || self.body.trim().is_empty()
    }

    fn len(&self) -> usize {
        self.body.chars().count()
    }

    pub fn set_subject(&mut self, subject: impl Into<String>) {
        self.subject = subject.into();
    }

    /// Insert plain text at the cursor, replacing the selection
    pub fn insert_text(&mut self, text: &str) {
        self.replace_selection(&escape_html(text));
    }

    /// Splice a literal template token at the cursor, replacing the selection
    pub fn insert_variable(&mut self, token: &str) {
        self.replace_selection(token);
    }

    /// Wrap the selection in `format`
    ///
    /// With nothing selected an empty pair is inserted and the cursor is
    /// left between the tags.
    pub fn apply_format(&mut self, format: &Format) {
        let (open, close) = format.tags();
        match self.selection() {
            Some((start, end)) => {
                let inner = self.selected_text().to_string();
                self.splice(start, end, &format!("{}{}{}", open, inner, close));
                self.cursor = start + open.chars().count() + inner.chars().count() + close.chars().count();
            }
            None => {
                let at = self.cursor;
                self.splice(at, at, &format!("{}{}", open, close));
                self.cursor = at + open.chars().count();
            }
        }
        self.anchor = None;
    }

    /// Move the cursor, dropping the selection
    pub fn move_cursor_to(&mut self, pos: usize) {
        self.cursor = pos.min(self.len());
        self.anchor = None;
    }

    pub fn move_left(&mut self) {
        match self.selection() {
            Some((start, _)) => self.move_cursor_to(start),
            None => self.move_cursor_to(self.cursor.saturating_sub(1)),
        }
    }

    pub fn move_right(&mut self) {
        match self.selection() {
            Some((_, end)) => self.move_cursor_to(end),
            None => self.move_cursor_to(self.cursor + 1),
        }
    }

    /// Select `start..end` (char indices, clamped); the cursor ends at `end`
    pub fn select(&mut self, start: usize, end: usize) {
        let len = self.len();
        self.anchor = Some(start.min(len));
        self.cursor = end.min(len);
    }

    pub fn select_all(&mut self) {
        self.select(0, self.len());
    }

    /// Delete the selection, or the char before the cursor
    pub fn delete_backward(&mut self) {
        match self.selection() {
            Some((start, end)) => {
                self.splice(start, end, "");
                self.cursor = start;
            }
            None if self.cursor > 0 => {
                let at = self.cursor - 1;
                self.splice(at, self.cursor, "");
                self.cursor = at;
            }
            None => {}
        }
        self.anchor = None;
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    fn replace_selection(&mut self, text: &str) {
        let (start, end) = self.selection().unwrap_or((self.cursor, self.cursor));
        self.splice(start, end, text);
        self.cursor = start + text.chars().count();
        self.anchor = None;
    }

    fn splice(&mut self, start: usize, end: usize, text: &str) {
        let start = byte_index(&self.body, start);
        let end = byte_index(&self.body, end);
        self.body.replace_range(start..end, text);
    }
}
