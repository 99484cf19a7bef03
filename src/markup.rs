//! Inline markup for paragraph text.
//!
//! Paragraph text in a [`Content`](crate::content::Content) sequence may carry a small set of
//! HTML-like tags.  [`parse_markup`] turns such text into a flat list of [`Run`]s that the
//! renderer converts into `genpdf` styled strings.  The supported constructs are:
//!
//! - `<b>bold</b>` and `<i>italic</i>`, freely nested
//! - `<font color="#RRGGBB">colored</font>`
//! - `<br/>` (or `<br>` / `<br />`) for a forced line break
//! - the entities `&amp;`, `&lt;`, `&gt;` and `&quot;`
//!
//! Anything else is literal text, so strings such as `latency <1%` or `R&D` need no escaping.
//! Tags that are opened but never closed, or closed out of order, are reported as
//! [`MarkupError`]s with the byte offset of the problem.

use std::fmt;

use genpdf::style::{Color, Style, StyledString};

/// A slice of text together with inline style attributes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Span {
    text: String,
    bold: bool,
    italic: bool,
    color: Option<Color>,
}

impl Span {
    /// Creates a new span with the provided text and no styles applied.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_bold(&self) -> bool {
        self.bold
    }

    pub fn is_italic(&self) -> bool {
        self.italic
    }

    pub fn color(&self) -> Option<Color> {
        self.color
    }

    /// Marks the span as bold.
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Marks the span as italic.
    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    /// Assigns a color to the span.
    pub fn colored(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Converts the span into a [`StyledString`], layering its inline attributes over `base`.
    pub fn to_styled_string(&self, base: Style) -> StyledString {
        let mut style = base;
        if let Some(color) = self.color {
            style.set_color(color);
        }
        if self.bold {
            style.set_bold();
        }
        if self.italic {
            style.set_italic();
        }
        StyledString::new(self.text.clone(), style)
    }
}

/// One element of parsed markup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Run {
    Text(Span),
    LineBreak,
}

/// Parse errors produced by [`parse_markup`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MarkupError {
    index: usize,
    message: String,
}

impl MarkupError {
    fn new(index: usize, message: impl Into<String>) -> Self {
        Self {
            index,
            message: message.into(),
        }
    }

    /// Byte index in the original input string where the error was detected.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Human-readable description of the parsing error.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for MarkupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (at byte {})", self.message, self.index)
    }
}

impl std::error::Error for MarkupError {}

#[derive(Clone, Copy, Debug, Default)]
struct StyleState {
    bold: bool,
    italic: bool,
    color: Option<Color>,
}

impl StyleState {
    fn to_span(self, text: String) -> Span {
        Span {
            text,
            bold: self.bold,
            italic: self.italic,
            color: self.color,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Tag {
    Bold,
    Italic,
    Font,
}

impl Tag {
    fn name(self) -> &'static str {
        match self {
            Tag::Bold => "b",
            Tag::Italic => "i",
            Tag::Font => "font",
        }
    }
}

#[derive(Clone, Copy)]
enum Token {
    Open(Tag, Option<Color>),
    Close(Tag),
    Break,
}

const ENTITIES: &[(&str, char)] = &[("&amp;", '&'), ("&lt;", '<'), ("&gt;", '>'), ("&quot;", '"')];

/// Parses marked-up paragraph text into a list of [`Run`]s.
pub fn parse_markup(input: &str) -> Result<Vec<Run>, MarkupError> {
    let mut runs = Vec::new();
    let index = parse_inner(input, 0, StyleState::default(), None, &mut runs)?;
    debug_assert_eq!(index, input.len());
    Ok(runs)
}

/// Groups runs into lines, splitting at every [`Run::LineBreak`].
///
/// The result always contains at least one (possibly empty) line.
pub fn split_lines(runs: &[Run]) -> Vec<Vec<Span>> {
    let mut lines = vec![Vec::new()];
    for run in runs {
        match run {
            Run::Text(span) => {
                if let Some(line) = lines.last_mut() {
                    line.push(span.clone());
                }
            }
            Run::LineBreak => lines.push(Vec::new()),
        }
    }
    lines
}

/// Strips all markup and returns the plain text, with line breaks as `\n`.
pub fn plain_text(runs: &[Run]) -> String {
    runs.iter()
        .map(|run| match run {
            Run::Text(span) => span.text(),
            Run::LineBreak => "\n",
        })
        .collect()
}

fn parse_inner(
    input: &str,
    mut index: usize,
    state: StyleState,
    open: Option<(Tag, usize)>,
    runs: &mut Vec<Run>,
) -> Result<usize, MarkupError> {
    let mut buffer = String::new();

    while index < input.len() {
        let rest = &input[index..];

        if rest.starts_with('<') {
            if let Some((token, len)) = match_tag(input, index)? {
                match token {
                    Token::Break => {
                        flush_buffer(&mut buffer, runs, state);
                        runs.push(Run::LineBreak);
                        index += len;
                    }
                    Token::Open(tag, color) => {
                        flush_buffer(&mut buffer, runs, state);
                        let mut nested = state;
                        match tag {
                            Tag::Bold => nested.bold = true,
                            Tag::Italic => nested.italic = true,
                            Tag::Font => nested.color = color.or(state.color),
                        }
                        index = parse_inner(input, index + len, nested, Some((tag, index)), runs)?;
                    }
                    Token::Close(tag) => {
                        return match open {
                            Some((expected, _)) if expected == tag => {
                                flush_buffer(&mut buffer, runs, state);
                                Ok(index + len)
                            }
                            Some((expected, _)) => Err(MarkupError::new(
                                index,
                                format!(
                                    "closing tag `</{}>` does not match open `<{}>`",
                                    tag.name(),
                                    expected.name()
                                ),
                            )),
                            None => Err(MarkupError::new(
                                index,
                                format!("unexpected closing tag `</{}>`", tag.name()),
                            )),
                        };
                    }
                }
                continue;
            }
        }

        if rest.starts_with('&') {
            if let Some((entity, ch)) = ENTITIES.iter().find(|(name, _)| rest.starts_with(name)) {
                buffer.push(*ch);
                index += entity.len();
                continue;
            }
        }

        let Some(ch) = rest.chars().next() else {
            break;
        };
        buffer.push(ch);
        index += ch.len_utf8();
    }

    if let Some((tag, start)) = open {
        Err(MarkupError::new(
            start,
            format!("unterminated `<{}>` tag", tag.name()),
        ))
    } else {
        flush_buffer(&mut buffer, runs, state);
        Ok(index)
    }
}

fn flush_buffer(buffer: &mut String, runs: &mut Vec<Run>, state: StyleState) {
    if buffer.is_empty() {
        return;
    }
    runs.push(Run::Text(state.to_span(std::mem::take(buffer))));
}

/// Recognises a tag starting at `index`.
///
/// Returns `Ok(None)` when the `<` does not start a supported tag and should be kept as text.
fn match_tag(input: &str, index: usize) -> Result<Option<(Token, usize)>, MarkupError> {
    let rest = &input[index..];
    let simple: &[(&str, Token)] = &[
        ("<b>", Token::Open(Tag::Bold, None)),
        ("</b>", Token::Close(Tag::Bold)),
        ("<i>", Token::Open(Tag::Italic, None)),
        ("</i>", Token::Close(Tag::Italic)),
        ("</font>", Token::Close(Tag::Font)),
        ("<br/>", Token::Break),
        ("<br />", Token::Break),
        ("<br>", Token::Break),
    ];
    for (literal, token) in simple {
        if rest.starts_with(literal) {
            return Ok(Some((*token, literal.len())));
        }
    }

    if rest.starts_with("<font ") {
        let (color, len) = parse_font_tag(input, index)?;
        return Ok(Some((Token::Open(Tag::Font, Some(color)), len)));
    }

    Ok(None)
}

fn parse_font_tag(input: &str, index: usize) -> Result<(Color, usize), MarkupError> {
    let rest = &input[index..];
    let end = rest
        .find('>')
        .ok_or_else(|| MarkupError::new(index, "unterminated `<font` tag"))?;
    let attributes = rest["<font ".len()..end].trim();

    let value = attributes
        .strip_prefix("color=")
        .ok_or_else(|| MarkupError::new(index, "expected `color` attribute on `<font>`"))?;
    let value = value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .or_else(|| value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')))
        .ok_or_else(|| MarkupError::new(index, "color attribute must be quoted"))?;

    let hex = value
        .strip_prefix('#')
        .filter(|hex| hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()))
        .ok_or_else(|| {
            MarkupError::new(
                index,
                "invalid RGB specification; expected `#RRGGBB` with hexadecimal digits",
            )
        })?;

    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&hex[range], 16)
            .map_err(|_| MarkupError::new(index, "invalid RGB specification"))
    };
    let color = Color::Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?);
    Ok((color, end + 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spans(runs: &[Run]) -> Vec<&Span> {
        runs.iter()
            .filter_map(|run| match run {
                Run::Text(span) => Some(span),
                Run::LineBreak => None,
            })
            .collect()
    }

    #[test]
    fn span_to_style_reflects_flags() {
        let span = Span::new("Hello")
            .bold()
            .italic()
            .colored(Color::Rgb(10, 20, 30));
        let styled = span.to_styled_string(Style::new());
        assert_eq!(styled.s, "Hello");
        assert!(styled.style.is_bold());
        assert!(styled.style.is_italic());
        assert_eq!(styled.style.color(), Some(Color::Rgb(10, 20, 30)));
    }

    #[test]
    fn parse_plain_text() {
        let runs = parse_markup("Hello world").expect("parse succeeds");
        assert_eq!(runs, vec![Run::Text(Span::new("Hello world"))]);
    }

    #[test]
    fn parse_nested_styles() {
        let runs = parse_markup("This is <b>very <i>cool</i></b>!").expect("parse succeeds");
        let spans = spans(&runs);
        assert_eq!(spans.len(), 4);
        assert_eq!(spans[0].text(), "This is ");
        assert!(!spans[0].is_bold());
        assert_eq!(spans[1].text(), "very ");
        assert!(spans[1].is_bold());
        assert_eq!(spans[2].text(), "cool");
        assert!(spans[2].is_bold() && spans[2].is_italic());
        assert_eq!(spans[3].text(), "!");
        assert!(!spans[3].is_bold());
    }

    #[test]
    fn line_breaks_split_lines() {
        let runs = parse_markup("const a = 1;<br/>const b = 2;<br/>").expect("parse succeeds");
        let lines = split_lines(&runs);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0][0].text(), "const a = 1;");
        assert_eq!(lines[1][0].text(), "const b = 2;");
        assert!(lines[2].is_empty());
        assert_eq!(plain_text(&runs), "const a = 1;\nconst b = 2;\n");
    }

    #[test]
    fn font_color_applies_to_nested_text() {
        let runs = parse_markup("<font color=\"#0BA360\">go <b>now</b></font> later")
            .expect("parse succeeds");
        let spans = spans(&runs);
        assert_eq!(spans[0].color(), Some(Color::Rgb(0x0b, 0xa3, 0x60)));
        assert_eq!(spans[1].color(), Some(Color::Rgb(0x0b, 0xa3, 0x60)));
        assert!(spans[1].is_bold());
        assert_eq!(spans[2].color(), None);
    }

    #[test]
    fn unknown_angle_brackets_and_ampersands_are_literal() {
        let runs = parse_markup("Dispute Rate Target: <1% &amp; R&D -> done").expect("parse");
        assert_eq!(plain_text(&runs), "Dispute Rate Target: <1% & R&D -> done");
    }

    #[test]
    fn error_on_unterminated_bold() {
        let err = parse_markup("ok <b>oops").unwrap_err();
        assert!(err.message().contains("unterminated `<b>`"));
        assert_eq!(err.index(), 3);
    }

    #[test]
    fn error_on_mismatched_close() {
        let err = parse_markup("<b>x</i>").unwrap_err();
        assert!(err.message().contains("does not match"));
        let err = parse_markup("x</b>").unwrap_err();
        assert!(err.message().contains("unexpected closing tag"));
    }

    #[test]
    fn error_on_invalid_color() {
        let err = parse_markup("<font color=\"#12FG34\">x</font>").unwrap_err();
        assert!(err.message().contains("invalid RGB"));
    }
}
