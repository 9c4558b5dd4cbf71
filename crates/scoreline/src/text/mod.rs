//! Rich text values shown on a board.
//!
//! Titles, lines and score labels are all [`Text`]: a run of styled spans
//! parsed from the legacy `§`-code notation. Parsing normalizes the value
//! (empty spans dropped, neighbours with identical style merged), so two
//! spellings that render the same are equal. The engine relies on this to
//! avoid resending lines whose visible content did not change.
//!
//! Plain-text dialects put [`Text::to_legacy`] on the wire; rich-text
//! dialects send [`Text::to_component`].

mod split;

#[cfg(test)]
mod tests;

use std::fmt;

use serde_json::{Map, Value, json};

pub use self::split::{SplitLine, last_format_codes, split_line};

/// Character introducing a two-character legacy formatting code.
pub const FORMAT_CHAR: char = '§';

/// The sixteen named text colours, in legacy code order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    /// `§0`
    Black,
    /// `§1`
    DarkBlue,
    /// `§2`
    DarkGreen,
    /// `§3`
    DarkAqua,
    /// `§4`
    DarkRed,
    /// `§5`
    DarkPurple,
    /// `§6`
    Gold,
    /// `§7`
    Gray,
    /// `§8`
    DarkGray,
    /// `§9`
    Blue,
    /// `§a`
    Green,
    /// `§b`
    Aqua,
    /// `§c`
    Red,
    /// `§d`
    LightPurple,
    /// `§e`
    Yellow,
    /// `§f`
    White,
}

impl Color {
    /// Every colour, indexed by its legacy code value.
    pub const ALL: [Self; 16] = [
        Self::Black,
        Self::DarkBlue,
        Self::DarkGreen,
        Self::DarkAqua,
        Self::DarkRed,
        Self::DarkPurple,
        Self::Gold,
        Self::Gray,
        Self::DarkGray,
        Self::Blue,
        Self::Green,
        Self::Aqua,
        Self::Red,
        Self::LightPurple,
        Self::Yellow,
        Self::White,
    ];

    /// Legacy code character following [`FORMAT_CHAR`].
    #[must_use]
    pub const fn code(self) -> char {
        match self {
            Self::Black => '0',
            Self::DarkBlue => '1',
            Self::DarkGreen => '2',
            Self::DarkAqua => '3',
            Self::DarkRed => '4',
            Self::DarkPurple => '5',
            Self::Gold => '6',
            Self::Gray => '7',
            Self::DarkGray => '8',
            Self::Blue => '9',
            Self::Green => 'a',
            Self::Aqua => 'b',
            Self::Red => 'c',
            Self::LightPurple => 'd',
            Self::Yellow => 'e',
            Self::White => 'f',
        }
    }

    /// Colour name used in JSON chat components.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Black => "black",
            Self::DarkBlue => "dark_blue",
            Self::DarkGreen => "dark_green",
            Self::DarkAqua => "dark_aqua",
            Self::DarkRed => "dark_red",
            Self::DarkPurple => "dark_purple",
            Self::Gold => "gold",
            Self::Gray => "gray",
            Self::DarkGray => "dark_gray",
            Self::Blue => "blue",
            Self::Green => "green",
            Self::Aqua => "aqua",
            Self::Red => "red",
            Self::LightPurple => "light_purple",
            Self::Yellow => "yellow",
            Self::White => "white",
        }
    }
}

/// A single legacy formatting code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatCode {
    /// Switch colour; clears every decoration.
    Color(Color),
    /// `§k`
    Obfuscated,
    /// `§l`
    Bold,
    /// `§m`
    Strikethrough,
    /// `§n`
    Underlined,
    /// `§o`
    Italic,
    /// `§r`: back to the default style.
    Reset,
}

impl FormatCode {
    /// Looks up the code for the character following [`FORMAT_CHAR`].
    #[must_use]
    pub fn from_char(code: char) -> Option<Self> {
        let lower = code.to_ascii_lowercase();
        if let Some(color) = Color::ALL.iter().copied().find(|c| c.code() == lower) {
            return Some(Self::Color(color));
        }
        match lower {
            'k' => Some(Self::Obfuscated),
            'l' => Some(Self::Bold),
            'm' => Some(Self::Strikethrough),
            'n' => Some(Self::Underlined),
            'o' => Some(Self::Italic),
            'r' => Some(Self::Reset),
            _ => None,
        }
    }

    /// Code character following [`FORMAT_CHAR`].
    #[must_use]
    pub const fn code(self) -> char {
        match self {
            Self::Color(color) => color.code(),
            Self::Obfuscated => 'k',
            Self::Bold => 'l',
            Self::Strikethrough => 'm',
            Self::Underlined => 'n',
            Self::Italic => 'o',
            Self::Reset => 'r',
        }
    }

    /// Returns `true` for decorations, which stack on the active colour.
    #[must_use]
    pub const fn is_format(self) -> bool {
        !matches!(self, Self::Color(_) | Self::Reset)
    }
}

impl fmt::Display for FormatCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{FORMAT_CHAR}{}", self.code())
    }
}

/// Active colour and decorations for a span.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[expect(
    clippy::struct_excessive_bools,
    reason = "each flag maps to one independent legacy decoration code"
)]
pub struct Style {
    /// Colour, or `None` for the client default.
    pub color: Option<Color>,
    /// `§l`
    pub bold: bool,
    /// `§o`
    pub italic: bool,
    /// `§n`
    pub underlined: bool,
    /// `§m`
    pub strikethrough: bool,
    /// `§k`
    pub obfuscated: bool,
}

impl Style {
    /// Style with only a colour set.
    #[must_use]
    pub const fn colored(color: Color) -> Self {
        Self {
            color: Some(color),
            bold: false,
            italic: false,
            underlined: false,
            strikethrough: false,
            obfuscated: false,
        }
    }

    /// Style after `code` is applied.
    #[must_use]
    pub const fn apply(self, code: FormatCode) -> Self {
        match code {
            FormatCode::Color(color) => Self::colored(color),
            FormatCode::Reset => Self::colored_default(),
            FormatCode::Obfuscated => Self {
                obfuscated: true,
                ..self
            },
            FormatCode::Bold => Self { bold: true, ..self },
            FormatCode::Strikethrough => Self {
                strikethrough: true,
                ..self
            },
            FormatCode::Underlined => Self {
                underlined: true,
                ..self
            },
            FormatCode::Italic => Self {
                italic: true,
                ..self
            },
        }
    }

    const fn colored_default() -> Self {
        Self {
            color: None,
            bold: false,
            italic: false,
            underlined: false,
            strikethrough: false,
            obfuscated: false,
        }
    }

    /// Decoration codes set on this style, in legacy code order.
    fn decorations(self) -> impl Iterator<Item = FormatCode> {
        [
            (self.obfuscated, FormatCode::Obfuscated),
            (self.bold, FormatCode::Bold),
            (self.strikethrough, FormatCode::Strikethrough),
            (self.underlined, FormatCode::Underlined),
            (self.italic, FormatCode::Italic),
        ]
        .into_iter()
        .filter_map(|(set, code)| set.then_some(code))
    }

    /// Returns `true` when every decoration of `other` is also set here.
    const fn covers(self, other: Self) -> bool {
        (self.bold || !other.bold)
            && (self.italic || !other.italic)
            && (self.underlined || !other.underlined)
            && (self.strikethrough || !other.strikethrough)
            && (self.obfuscated || !other.obfuscated)
    }

    /// Shortest legacy code sequence turning `previous` into `self`.
    fn transition_from(self, previous: Self) -> String {
        if self == previous {
            return String::new();
        }
        if self.color == previous.color && self.covers(previous) {
            return self
                .decorations()
                .filter(|code| !previous.decorations().any(|p| p == *code))
                .map(|code| code.to_string())
                .collect();
        }
        let base = self.color.map_or(FormatCode::Reset, FormatCode::Color);
        std::iter::once(base)
            .chain(self.decorations())
            .map(|code| code.to_string())
            .collect()
    }
}

/// A run of text rendered with one style.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Span {
    style: Style,
    text: String,
}

impl Span {
    /// Style of the run.
    #[must_use]
    pub const fn style(&self) -> Style {
        self.style
    }

    /// Visible characters of the run.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    fn to_component(&self) -> Value {
        let mut object = Map::new();
        object.insert("text".to_owned(), Value::String(self.text.clone()));
        if let Some(color) = self.style.color {
            object.insert("color".to_owned(), Value::String(color.name().to_owned()));
        }
        for (set, key) in [
            (self.style.bold, "bold"),
            (self.style.italic, "italic"),
            (self.style.underlined, "underlined"),
            (self.style.strikethrough, "strikethrough"),
            (self.style.obfuscated, "obfuscated"),
        ] {
            if set {
                object.insert(key.to_owned(), Value::Bool(true));
            }
        }
        Value::Object(object)
    }
}

/// Normalized rich text.
///
/// # Example
///
/// ```
/// use scoreline::text::Text;
///
/// let redundant = Text::parse_legacy("§a§aKills: §a3");
/// let tidy = Text::parse_legacy("§aKills: 3");
/// assert_eq!(redundant, tidy);
/// assert_eq!(tidy.to_legacy(), "§aKills: 3");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Text {
    spans: Vec<Span>,
}

impl Text {
    /// Text with no visible characters.
    #[must_use]
    pub const fn empty() -> Self {
        Self { spans: Vec::new() }
    }

    /// Parses legacy `§`-code notation.
    ///
    /// Unknown codes and a trailing lone [`FORMAT_CHAR`] are kept as literal
    /// characters.
    #[must_use]
    pub fn parse_legacy(input: &str) -> Self {
        let mut text = Self::empty();
        let mut style = Style::default();
        let mut chars = input.chars().peekable();
        while let Some(c) = chars.next() {
            if c == FORMAT_CHAR {
                if let Some(code) = chars.peek().copied().and_then(FormatCode::from_char) {
                    chars.next();
                    style = style.apply(code);
                    continue;
                }
            }
            text.push_char(style, c);
        }
        text
    }

    /// Single run of `content` in `style`, taken literally.
    #[must_use]
    pub fn styled(style: Style, content: &str) -> Self {
        let mut text = Self::empty();
        text.push_str(style, content);
        text
    }

    /// Appends `other`, merging the seam when styles match.
    #[must_use]
    pub fn append(mut self, other: &Self) -> Self {
        for span in &other.spans {
            self.push_str(span.style, &span.text);
        }
        self
    }

    /// Returns `true` when nothing would be rendered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Normalized runs.
    #[must_use]
    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    /// Visible characters with styling stripped.
    #[must_use]
    pub fn plain_text(&self) -> String {
        self.spans.iter().map(|span| span.text.as_str()).collect()
    }

    /// Canonical legacy rendering.
    #[must_use]
    pub fn to_legacy(&self) -> String {
        let mut out = String::new();
        let mut current = Style::default();
        for span in &self.spans {
            out.push_str(&span.style.transition_from(current));
            out.push_str(&span.text);
            current = span.style;
        }
        out
    }

    /// JSON chat component. Empty text yields `{"text":""}`.
    #[must_use]
    pub fn to_component(&self) -> Value {
        if self.spans.is_empty() {
            return json!({ "text": "" });
        }
        let extra: Vec<Value> = self.spans.iter().map(Span::to_component).collect();
        json!({ "text": "", "extra": extra })
    }

    fn push_char(&mut self, style: Style, c: char) {
        match self.spans.last_mut() {
            Some(last) if last.style == style => last.text.push(c),
            _ => self.spans.push(Span {
                style,
                text: c.to_string(),
            }),
        }
    }

    fn push_str(&mut self, style: Style, content: &str) {
        if content.is_empty() {
            return;
        }
        match self.spans.last_mut() {
            Some(last) if last.style == style => last.text.push_str(content),
            _ => self.spans.push(Span {
                style,
                text: content.to_owned(),
            }),
        }
    }
}

impl From<&str> for Text {
    fn from(value: &str) -> Self {
        Self::parse_legacy(value)
    }
}

impl From<String> for Text {
    fn from(value: String) -> Self {
        Self::parse_legacy(&value)
    }
}

impl fmt::Display for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_legacy())
    }
}
