// Copyright 2025 the Gadgetry Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Statement parser.
//!
//! The parser pulls tokens from the [`Lexer`] and hands complete statements to the loader one
//! at a time, so windows can be created while the rest of the file is still unread.

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use gadgetry_gadgets::combo_box::ComboBoxData;
use gadgetry_gadgets::list_box::ListBoxData;
use gadgetry_gadgets::progress_bar::ProgressBarData;
use gadgetry_gadgets::radio_button::RadioButtonData;
use gadgetry_gadgets::slider::SliderData;
use gadgetry_gadgets::static_text::StaticTextData;
use gadgetry_gadgets::tab_control::{MAX_TAB_PANES, TabControlData, TabEdge, TabOrientation};
use gadgetry_gadgets::text_entry::TextEntryData;
use gadgetry_gadgets::{GadgetData, GadgetKind};
use gadgetry_tree::{DrawData, FontDesc, TextColors, WindowStatus, WindowStyle, make_color};
use peniko::Color;

use crate::error::{LoadError, LoadErrorKind};
use crate::lexer::{Lexer, Token};
use crate::names::{STATUS_NAMES, STYLE_NAMES, flag, window_type};

/// Image name meaning "no image".
const NO_IMAGE: &str = "NoImage";

/// Most columns a list box may declare.
pub(crate) const MAX_COLUMNS: usize = 64;

/// Draw state a color or draw-data field applies to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum DrawState {
    Enabled,
    Disabled,
    Hilite,
}

/// Handler slot named by a callback field.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Slot {
    System,
    Input,
    Tooltip,
    Draw,
}

/// Authored screen rectangle.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct ScreenRect {
    pub(crate) left: i32,
    pub(crate) top: i32,
    pub(crate) right: i32,
    pub(crate) bottom: i32,
    pub(crate) width: i32,
    pub(crate) height: i32,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Field {
    WindowType(Option<GadgetKind>),
    ScreenRect(ScreenRect),
    Name(String),
    Status(WindowStatus),
    Style(WindowStyle),
    Text(String),
    TooltipText(String),
    TooltipDelay(i32),
    Font(FontDesc),
    HeaderTemplate(String),
    Callback(Slot, String),
    TextColor(TextColors),
    DrawData(DrawState, Vec<DrawData>),
    /// Fill and border of draw-data entry 0.
    Color(DrawState, Color, Color),
    /// Text color and text border of one state.
    TextStateColor(DrawState, Color, Color),
    Data(GadgetData),
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Statement {
    Version(i32),
    LayoutBlock {
        init: Option<String>,
        update: Option<String>,
        shutdown: Option<String>,
    },
    Window,
    Child,
    EndAllChildren,
    End,
    Field(Field),
}

pub(crate) struct Parser<'a> {
    lexer: Lexer<'a>,
    peeked: Option<(usize, Token<'a>)>,
    line: usize,
}

fn is_number(token: Token<'_>) -> bool {
    matches!(token, Token::Word(w) if w.parse::<i32>().is_ok())
}

impl<'a> Parser<'a> {
    pub(crate) fn new(src: &'a str) -> Self {
        Self {
            lexer: Lexer::new(src),
            peeked: None,
            line: 1,
        }
    }

    /// Line of the last token read.
    pub(crate) fn line(&self) -> usize {
        self.line
    }

    fn error(&self, kind: LoadErrorKind) -> LoadError {
        LoadError::new(self.line, kind)
    }

    fn peek(&mut self) -> Result<Option<Token<'a>>, LoadError> {
        if self.peeked.is_none() {
            self.peeked = self.lexer.next().transpose()?;
        }
        Ok(self.peeked.map(|(_, t)| t))
    }

    fn bump(&mut self) -> Result<Option<Token<'a>>, LoadError> {
        let next = match self.peeked.take() {
            Some(p) => Some(p),
            None => self.lexer.next().transpose()?,
        };
        Ok(next.map(|(line, t)| {
            self.line = line;
            t
        }))
    }

    fn token(&mut self) -> Result<Token<'a>, LoadError> {
        match self.bump()? {
            Some(t) => Ok(t),
            None => {
                self.line = self.lexer.line();
                Err(self.error(LoadErrorKind::UnexpectedEof))
            }
        }
    }

    fn expect(&mut self, want: Token<'static>) -> Result<(), LoadError> {
        let got = self.token()?;
        if got == want {
            Ok(())
        } else {
            Err(self.error(LoadErrorKind::Expected(want.describe())))
        }
    }

    fn word(&mut self) -> Result<&'a str, LoadError> {
        match self.token()? {
            Token::Word(w) => Ok(w),
            _ => Err(self.error(LoadErrorKind::Expected("word"))),
        }
    }

    /// A quoted string, or a bare word standing in for one.
    fn text(&mut self) -> Result<String, LoadError> {
        match self.token()? {
            Token::Word(w) | Token::Str(w) => Ok(w.to_string()),
            _ => Err(self.error(LoadErrorKind::Expected("string"))),
        }
    }

    fn int(&mut self) -> Result<i32, LoadError> {
        let w = self.word()?;
        w.parse()
            .map_err(|_| self.error(LoadErrorKind::BadNumber(w.to_string())))
    }

    fn count(&mut self) -> Result<usize, LoadError> {
        let w = self.word()?;
        w.parse()
            .map_err(|_| self.error(LoadErrorKind::BadNumber(w.to_string())))
    }

    fn boolean(&mut self) -> Result<bool, LoadError> {
        Ok(self.int()? != 0)
    }

    fn color(&mut self) -> Result<Color, LoadError> {
        let mut c = [0_u8; 4];
        for slot in &mut c {
            let w = self.word()?;
            *slot = w
                .parse()
                .map_err(|_| self.error(LoadErrorKind::BadNumber(w.to_string())))?;
        }
        Ok(make_color(c[0], c[1], c[2], c[3]))
    }

    fn label(&mut self, want: &'static str) -> Result<(), LoadError> {
        let w = self.word()?;
        if w.eq_ignore_ascii_case(want) {
            Ok(())
        } else {
            Err(self.error(LoadErrorKind::Expected(want)))
        }
    }

    /// Labels of a `LABEL: value, LABEL: value;` list, until the closing `;`.
    fn next_label(&mut self) -> Result<Option<&'a str>, LoadError> {
        match self.token()? {
            Token::Semicolon => Ok(None),
            Token::Word(w) => Ok(Some(w)),
            _ => Err(self.error(LoadErrorKind::Expected("label"))),
        }
    }

    fn unknown_label(&self, label: &str) -> LoadError {
        self.error(LoadErrorKind::UnknownLabel(label.to_string()))
    }

    fn flags<F: Copy + core::ops::BitOr<Output = F>>(
        &mut self,
        table: &[(&str, F)],
        empty: F,
    ) -> Result<F, LoadError> {
        let mut bits = empty;
        loop {
            let name = self.word()?;
            bits = bits
                | flag(table, name)
                    .ok_or_else(|| self.error(LoadErrorKind::UnknownFlag(name.to_string())))?;
            match self.token()? {
                Token::Plus => {}
                Token::Semicolon => return Ok(bits),
                _ => return Err(self.error(LoadErrorKind::Expected("`+` or `;`"))),
            }
        }
    }

    /// Next statement with its line, or `None` at the end of the input.
    pub(crate) fn next_statement(&mut self) -> Result<Option<(usize, Statement)>, LoadError> {
        let Some(first) = self.bump()? else {
            return Ok(None);
        };
        let line = self.line;
        let Token::Word(keyword) = first else {
            return Err(self.error(LoadErrorKind::Expected("keyword")));
        };
        let k = keyword.to_ascii_uppercase();
        let statement = match k.as_str() {
            "WINDOW" => Statement::Window,
            "CHILD" => Statement::Child,
            "ENDALLCHILDREN" => Statement::EndAllChildren,
            "END" => Statement::End,
            "STARTLAYOUTBLOCK" => self.layout_block()?,
            "FILE_VERSION" => {
                self.expect(Token::Equals)?;
                let v = self.int()?;
                self.expect(Token::Semicolon)?;
                Statement::Version(v)
            }
            _ => {
                self.expect(Token::Equals)?;
                Statement::Field(self.field(&k, keyword)?)
            }
        };
        Ok(Some((line, statement)))
    }

    fn layout_block(&mut self) -> Result<Statement, LoadError> {
        let (mut init, mut update, mut shutdown) = (None, None, None);
        loop {
            let w = self.word()?;
            let slot = match w.to_ascii_uppercase().as_str() {
                "ENDLAYOUTBLOCK" => {
                    return Ok(Statement::LayoutBlock {
                        init,
                        update,
                        shutdown,
                    });
                }
                "LAYOUTINIT" => &mut init,
                "LAYOUTUPDATE" => &mut update,
                "LAYOUTSHUTDOWN" => &mut shutdown,
                _ => return Err(self.error(LoadErrorKind::UnknownKeyword(w.to_string()))),
            };
            self.expect(Token::Equals)?;
            *slot = Some(self.text()?);
            self.expect(Token::Semicolon)?;
        }
    }

    fn field(&mut self, key: &str, raw: &str) -> Result<Field, LoadError> {
        let field = match key {
            "WINDOWTYPE" => {
                let name = self.word()?;
                let kind = window_type(name).ok_or_else(|| {
                    self.error(LoadErrorKind::UnknownWindowType(name.to_string()))
                })?;
                self.expect(Token::Semicolon)?;
                Field::WindowType(kind)
            }
            "SCREENRECT" => Field::ScreenRect(self.screen_rect()?),
            "NAME" => Field::Name(self.string_field()?),
            "TEXT" => Field::Text(self.string_field()?),
            "TOOLTIPTEXT" => Field::TooltipText(self.string_field()?),
            "HEADERTEMPLATE" => Field::HeaderTemplate(self.string_field()?),
            "STATUS" => Field::Status(self.flags(STATUS_NAMES, WindowStatus::empty())?),
            "STYLE" => Field::Style(self.flags(STYLE_NAMES, WindowStyle::empty())?),
            "TOOLTIPDELAY" => {
                let delay = self.int()?;
                self.expect(Token::Semicolon)?;
                Field::TooltipDelay(delay)
            }
            "FONT" => Field::Font(self.font()?),
            "SYSTEMCALLBACK" => Field::Callback(Slot::System, self.string_field()?),
            "INPUTCALLBACK" => Field::Callback(Slot::Input, self.string_field()?),
            "TOOLTIPCALLBACK" => Field::Callback(Slot::Tooltip, self.string_field()?),
            "DRAWCALLBACK" => Field::Callback(Slot::Draw, self.string_field()?),
            "TEXTCOLOR" => Field::TextColor(self.text_colors()?),
            "ENABLEDDRAWDATA" => Field::DrawData(DrawState::Enabled, self.draw_data()?),
            "DISABLEDDRAWDATA" => Field::DrawData(DrawState::Disabled, self.draw_data()?),
            "HILITEDRAWDATA" => Field::DrawData(DrawState::Hilite, self.draw_data()?),
            "ENABLEDCOLOR" | "DISABLEDCOLOR" | "HILITECOLOR" | "ENABLEDTEXTCOLOR"
            | "DISABLEDTEXTCOLOR" | "HILITETEXTCOLOR" => {
                let state = match &key[..key.len().min(3)] {
                    "ENA" => DrawState::Enabled,
                    "DIS" => DrawState::Disabled,
                    _ => DrawState::Hilite,
                };
                let (color, border) = self.color_pair()?;
                if key.ends_with("TEXTCOLOR") {
                    Field::TextStateColor(state, color, border)
                } else {
                    Field::Color(state, color, border)
                }
            }
            "LISTBOXDATA" => Field::Data(GadgetData::ListBox(self.list_box_data()?)),
            "COMBOBOXDATA" => Field::Data(GadgetData::ComboBox(self.combo_box_data()?)),
            "SLIDERDATA" => Field::Data(GadgetData::Slider(self.slider_data()?)),
            "RADIOBUTTONDATA" => Field::Data(GadgetData::RadioButton(self.radio_data()?)),
            "TEXTENTRYDATA" => Field::Data(GadgetData::TextEntry(self.text_entry_data()?)),
            "STATICTEXTDATA" => Field::Data(GadgetData::StaticText(self.static_text_data()?)),
            "TABCONTROLDATA" => Field::Data(GadgetData::TabControl(self.tab_control_data()?)),
            "PROGRESSBARDATA" => Field::Data(GadgetData::ProgressBar(self.progress_data()?)),
            _ => return Err(self.error(LoadErrorKind::UnknownKeyword(raw.to_string()))),
        };
        Ok(field)
    }

    fn string_field(&mut self) -> Result<String, LoadError> {
        let s = self.text()?;
        self.expect(Token::Semicolon)?;
        Ok(s)
    }

    fn screen_rect(&mut self) -> Result<ScreenRect, LoadError> {
        self.label("UPPERLEFT")?;
        let (left, top) = (self.int()?, self.int()?);
        self.label("BOTTOMRIGHT")?;
        let (right, bottom) = (self.int()?, self.int()?);
        self.label("CREATIONRESOLUTION")?;
        let (width, height) = (self.int()?, self.int()?);
        self.expect(Token::Semicolon)?;
        Ok(ScreenRect {
            left,
            top,
            right,
            bottom,
            width,
            height,
        })
    }

    fn font(&mut self) -> Result<FontDesc, LoadError> {
        let mut font = FontDesc::default();
        while let Some(label) = self.next_label()? {
            match label.to_ascii_uppercase().as_str() {
                "NAME" => font.name = self.text()?,
                "SIZE" => {
                    let size = self.int()?;
                    font.size = u32::try_from(size)
                        .map_err(|_| self.error(LoadErrorKind::BadNumber(size.to_string())))?;
                }
                "BOLD" => font.bold = self.boolean()?,
                _ => return Err(self.unknown_label(label)),
            }
        }
        Ok(font)
    }

    fn text_colors(&mut self) -> Result<TextColors, LoadError> {
        let mut colors = TextColors::default();
        while let Some(label) = self.next_label()? {
            let slot = match label.to_ascii_uppercase().as_str() {
                "ENABLED" => &mut colors.enabled,
                "ENABLEDBORDER" => &mut colors.enabled_border,
                "DISABLED" => &mut colors.disabled,
                "DISABLEDBORDER" => &mut colors.disabled_border,
                "HILITE" => &mut colors.hilite,
                "HILITEBORDER" => &mut colors.hilite_border,
                _ => return Err(self.unknown_label(label)),
            };
            *slot = self.color()?;
        }
        Ok(colors)
    }

    fn draw_data(&mut self) -> Result<Vec<DrawData>, LoadError> {
        let mut list: Vec<DrawData> = Vec::new();
        while let Some(label) = self.next_label()? {
            let upper = label.to_ascii_uppercase();
            if upper == "IMAGE" {
                let name = self.text()?;
                list.push(DrawData {
                    image: (!name.eq_ignore_ascii_case(NO_IMAGE)).then_some(name),
                    ..DrawData::default()
                });
                continue;
            }
            if list.is_empty() {
                list.push(DrawData::default());
            }
            let Some(entry) = list.last_mut() else {
                continue;
            };
            match upper.as_str() {
                "COLOR" => entry.color = self.color()?,
                "BORDERCOLOR" => entry.border_color = self.color()?,
                _ => return Err(self.unknown_label(label)),
            }
        }
        Ok(list)
    }

    fn color_pair(&mut self) -> Result<(Color, Color), LoadError> {
        let mut color = Color::TRANSPARENT;
        let mut border = Color::TRANSPARENT;
        while let Some(label) = self.next_label()? {
            match label.to_ascii_uppercase().as_str() {
                "COLOR" => color = self.color()?,
                "BORDERCOLOR" => border = self.color()?,
                _ => return Err(self.unknown_label(label)),
            }
        }
        Ok((color, border))
    }

    fn list_box_data(&mut self) -> Result<ListBoxData, LoadError> {
        let mut d = ListBoxData::default();
        while let Some(label) = self.next_label()? {
            match label.to_ascii_uppercase().as_str() {
                "LENGTH" => d.length = self.count()?,
                "AUTOSCROLL" => d.auto_scroll = self.boolean()?,
                "SCROLLIFATEND" => d.scroll_if_at_end = self.boolean()?,
                "AUTOPURGE" => d.auto_purge = self.boolean()?,
                "SCROLLBAR" => d.scroll_bar = self.boolean()?,
                "MULTISELECT" => d.multi_select = self.boolean()?,
                "FORCESELECT" => d.force_select = self.boolean()?,
                "COLUMNS" => {
                    let n = self.count()?;
                    if n > MAX_COLUMNS {
                        return Err(self.error(LoadErrorKind::TooManyColumns(n)));
                    }
                    d.columns = n.max(1);
                }
                "COLUMNSWIDTH" => {
                    d.column_width_pct = (0..d.columns)
                        .map(|_| self.int())
                        .collect::<Result<_, _>>()?;
                }
                _ => return Err(self.unknown_label(label)),
            }
        }
        Ok(d)
    }

    fn combo_box_data(&mut self) -> Result<ComboBoxData, LoadError> {
        let mut d = ComboBoxData::default();
        while let Some(label) = self.next_label()? {
            match label.to_ascii_uppercase().as_str() {
                "ISEDITABLE" => d.editable = self.boolean()?,
                "MAXCHARS" => d.max_chars = self.count()?,
                "MAXDISPLAY" => d.max_display = self.count()?,
                "ASCIIONLY" => d.ascii_only = self.boolean()?,
                "LETTERSANDNUMBERS" => d.letters_and_numbers = self.boolean()?,
                _ => return Err(self.unknown_label(label)),
            }
        }
        Ok(d)
    }

    fn slider_data(&mut self) -> Result<SliderData, LoadError> {
        let (mut min, mut max) = (0, 0);
        while let Some(label) = self.next_label()? {
            match label.to_ascii_uppercase().as_str() {
                "MINVALUE" => min = self.int()?,
                "MAXVALUE" => max = self.int()?,
                _ => return Err(self.unknown_label(label)),
            }
        }
        Ok(SliderData::new(min, max))
    }

    fn radio_data(&mut self) -> Result<RadioButtonData, LoadError> {
        let mut d = RadioButtonData::default();
        while let Some(label) = self.next_label()? {
            match label.to_ascii_uppercase().as_str() {
                "GROUP" => d.group = self.int()?,
                _ => return Err(self.unknown_label(label)),
            }
        }
        Ok(d)
    }

    fn text_entry_data(&mut self) -> Result<TextEntryData, LoadError> {
        let mut d = TextEntryData::default();
        while let Some(label) = self.next_label()? {
            match label.to_ascii_uppercase().as_str() {
                "MAXLEN" => d.max_len = self.count()?,
                "SECRETTEXT" => d.secret = self.boolean()?,
                "NUMERICALONLY" => d.numerical = self.boolean()?,
                "ALPHANUMERICALONLY" => d.alpha_numerical = self.boolean()?,
                "ASCIIONLY" => d.ascii_only = self.boolean()?,
                _ => return Err(self.unknown_label(label)),
            }
        }
        Ok(d)
    }

    fn static_text_data(&mut self) -> Result<StaticTextData, LoadError> {
        let mut d = StaticTextData::default();
        while let Some(label) = self.next_label()? {
            match label.to_ascii_uppercase().as_str() {
                "CENTERED" => d.centered = self.boolean()?,
                _ => return Err(self.unknown_label(label)),
            }
        }
        Ok(d)
    }

    fn tab_control_data(&mut self) -> Result<TabControlData, LoadError> {
        let mut d = TabControlData::default();
        while let Some(label) = self.next_label()? {
            match label.to_ascii_uppercase().as_str() {
                "TABORIENTATION" => {
                    d.tab_orientation = match self.int()? {
                        0 => TabOrientation::TopLeft,
                        1 => TabOrientation::Center,
                        2 => TabOrientation::BottomRight,
                        n => return Err(self.error(LoadErrorKind::BadNumber(n.to_string()))),
                    };
                }
                "TABEDGE" => {
                    d.tab_edge = match self.int()? {
                        0 => TabEdge::Top,
                        1 => TabEdge::Right,
                        2 => TabEdge::Bottom,
                        3 => TabEdge::Left,
                        n => return Err(self.error(LoadErrorKind::BadNumber(n.to_string()))),
                    };
                }
                "TABWIDTH" => d.tab_width = f64::from(self.int()?),
                "TABHEIGHT" => d.tab_height = f64::from(self.int()?),
                "TABCOUNT" => d.tab_count = self.count()?.min(MAX_TAB_PANES),
                "PANEBORDER" => d.pane_border = f64::from(self.int()?),
                "PANEDISABLED" => {
                    let mut i = 0;
                    while self.peek()?.is_some_and(is_number) {
                        let off = self.boolean()?;
                        if let Some(slot) = d.disabled.get_mut(i) {
                            *slot = off;
                        }
                        i += 1;
                    }
                }
                _ => return Err(self.unknown_label(label)),
            }
        }
        Ok(d)
    }

    fn progress_data(&mut self) -> Result<ProgressBarData, LoadError> {
        let mut d = ProgressBarData::default();
        while let Some(label) = self.next_label()? {
            match label.to_ascii_uppercase().as_str() {
                "PERCENT" => {
                    let p = self.int()?.clamp(0, 100);
                    d.percent = u8::try_from(p).unwrap_or(100);
                }
                _ => return Err(self.unknown_label(label)),
            }
        }
        Ok(d)
    }
}
