//! Theme colors and slide-master text styles.
//!
//! Runs often reference scheme colors (`accent1`, `tx2`, ...) instead of an
//! explicit RGB value, and body placeholders inherit their bullets from the
//! slide master. Both are resolved here so the slide model only carries
//! concrete values.

use crate::parser::local_name;
use docup_core::{Error, ListStyle, Result, Rgb};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::collections::HashMap;

/// Number of outline levels in a master text style.
const LEVELS: usize = 9;

/// Color slots of a theme's color scheme (`dk1`, `lt1`, `accent1`, ...).
#[derive(Debug, Clone, Default)]
pub struct ThemeColors {
    slots: HashMap<String, Rgb>,
}

impl ThemeColors {
    /// Parse the `a:clrScheme` of a theme part.
    pub fn parse(xml: &str) -> Result<Self> {
        let mut slots = HashMap::new();
        let mut reader = Reader::from_str(xml);
        reader.trim_text(true);

        let mut in_scheme = false;
        let mut current_slot: Option<String> = None;

        loop {
            match reader.read_event() {
                Ok(Event::Start(ref e)) => {
                    let name = e.name();
                    let local = local_name(name.as_ref());
                    if local == b"clrScheme" {
                        in_scheme = true;
                    } else if in_scheme && current_slot.is_none() {
                        current_slot = Some(String::from_utf8_lossy(local).to_string());
                    } else if let Some(slot) = &current_slot {
                        if let Some(rgb) = slot_color(local, e) {
                            slots.insert(slot.clone(), rgb);
                        }
                    }
                }
                Ok(Event::Empty(ref e)) => {
                    let name = e.name();
                    if let Some(slot) = &current_slot {
                        if let Some(rgb) = slot_color(local_name(name.as_ref()), e) {
                            slots.insert(slot.clone(), rgb);
                        }
                    }
                }
                Ok(Event::End(ref e)) => {
                    let name = e.name();
                    let local = local_name(name.as_ref());
                    if local == b"clrScheme" {
                        in_scheme = false;
                        current_slot = None;
                    } else if current_slot.as_deref().map(str::as_bytes) == Some(local) {
                        current_slot = None;
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(Error::XmlError(format!("Error parsing theme: {}", e)));
                }
                _ => {}
            }
        }

        Ok(Self { slots })
    }

    /// Color of a scheme slot such as `accent1`.
    pub fn get(&self, slot: &str) -> Option<Rgb> {
        self.slots.get(slot).copied()
    }
}

/// RGB value of an `srgbClr`/`sysClr` element inside a scheme slot.
fn slot_color(local: &[u8], e: &BytesStart) -> Option<Rgb> {
    let attr = match local {
        b"srgbClr" => b"val".as_slice(),
        b"sysClr" => b"lastClr".as_slice(),
        _ => return None,
    };
    attribute(e, attr).and_then(|v| Rgb::from_hex(&v))
}

/// Text styles and color mapping of a slide master.
#[derive(Debug, Clone)]
pub struct MasterStyles {
    /// `p:clrMap`: `tx1` → `dk1`, `bg1` → `lt1`, ...
    color_map: HashMap<String, String>,
    /// Bullet style per level of `p:bodyStyle`.
    body_levels: [Option<ListStyle>; LEVELS],
}

impl Default for MasterStyles {
    fn default() -> Self {
        let color_map = [("tx1", "dk1"), ("bg1", "lt1"), ("tx2", "dk2"), ("bg2", "lt2")]
            .into_iter()
            .map(|(alias, slot)| (alias.to_string(), slot.to_string()))
            .collect();
        Self {
            color_map,
            body_levels: [None; LEVELS],
        }
    }
}

impl MasterStyles {
    /// Parse `p:clrMap` and `p:txStyles/p:bodyStyle` from a slide master.
    pub fn parse(xml: &str) -> Result<Self> {
        let mut styles = Self::default();
        let mut reader = Reader::from_str(xml);
        reader.trim_text(true);

        let mut in_body_style = false;
        let mut level: Option<usize> = None;

        loop {
            match reader.read_event() {
                Ok(Event::Start(ref e)) => {
                    let name = e.name();
                    match local_name(name.as_ref()) {
                        b"bodyStyle" => in_body_style = true,
                        local if in_body_style => {
                            if let Some(lvl) = level_index(local) {
                                level = Some(lvl);
                            }
                            styles.apply_bullet(level, local);
                        }
                        b"clrMap" => styles.read_color_map(e),
                        _ => {}
                    }
                }
                Ok(Event::Empty(ref e)) => {
                    let name = e.name();
                    let local = local_name(name.as_ref());
                    if local == b"clrMap" {
                        styles.read_color_map(e);
                    } else if in_body_style {
                        styles.apply_bullet(level, local);
                    }
                }
                Ok(Event::End(ref e)) => {
                    let name = e.name();
                    let local = local_name(name.as_ref());
                    if local == b"bodyStyle" {
                        in_body_style = false;
                        level = None;
                    } else if level_index(local).is_some() {
                        level = None;
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(Error::XmlError(format!("Error parsing slide master: {}", e)));
                }
                _ => {}
            }
        }

        Ok(styles)
    }

    fn read_color_map(&mut self, e: &BytesStart) {
        for attr in e.attributes().flatten() {
            let alias = String::from_utf8_lossy(local_name(attr.key.as_ref())).to_string();
            let slot = String::from_utf8_lossy(&attr.value).to_string();
            self.color_map.insert(alias, slot);
        }
    }

    fn apply_bullet(&mut self, level: Option<usize>, local: &[u8]) {
        let Some(level) = level else {
            return;
        };
        if let Some(style) = bullet_style(local) {
            self.body_levels[level] = Some(style);
        }
    }

    /// Bullet style a body placeholder paragraph inherits at `level`.
    pub fn body_list_style(&self, level: u8) -> ListStyle {
        self.body_levels
            .get(usize::from(level))
            .copied()
            .flatten()
            .unwrap_or(ListStyle::None)
    }

    /// Map a scheme color name through the master's color map.
    pub fn map_scheme<'a>(&'a self, name: &'a str) -> &'a str {
        self.color_map.get(name).map(String::as_str).unwrap_or(name)
    }
}

/// Everything needed to turn style references into concrete values.
#[derive(Debug, Clone, Default)]
pub struct StyleContext {
    pub theme: ThemeColors,
    pub master: MasterStyles,
}

impl StyleContext {
    pub fn new(theme: ThemeColors, master: MasterStyles) -> Self {
        Self { theme, master }
    }

    /// Resolve a scheme color name (`accent1`, `tx2`, `phClr`, ...).
    pub fn resolve_scheme(&self, name: &str) -> Option<Rgb> {
        self.theme.get(self.master.map_scheme(name))
    }
}

/// `lvl3pPr` → 2.
pub(crate) fn level_index(local: &[u8]) -> Option<usize> {
    let digits = local.strip_prefix(b"lvl")?.strip_suffix(b"pPr")?;
    let level: usize = std::str::from_utf8(digits).ok()?.parse().ok()?;
    (1..=LEVELS).contains(&level).then(|| level - 1)
}

/// List style named by a bullet element.
pub(crate) fn bullet_style(local: &[u8]) -> Option<ListStyle> {
    match local {
        b"buChar" | b"buBlip" => Some(ListStyle::Bullet),
        b"buAutoNum" => Some(ListStyle::Numbered),
        b"buNone" => Some(ListStyle::None),
        _ => None,
    }
}

/// Value of an attribute by local name.
pub(crate) fn attribute(e: &BytesStart, name: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|attr| local_name(attr.key.as_ref()) == name)
        .map(|attr| String::from_utf8_lossy(&attr.value).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const THEME: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<a:theme xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" name="Office Theme">
  <a:themeElements>
    <a:clrScheme name="Office">
      <a:dk1><a:sysClr val="windowText" lastClr="000000"/></a:dk1>
      <a:lt1><a:sysClr val="window" lastClr="FFFFFF"/></a:lt1>
      <a:dk2><a:srgbClr val="44546A"/></a:dk2>
      <a:lt2><a:srgbClr val="E7E6E6"/></a:lt2>
      <a:accent1><a:srgbClr val="4472C4"/></a:accent1>
      <a:accent5><a:srgbClr val="5B9BD5"/></a:accent5>
    </a:clrScheme>
    <a:fmtScheme name="Office"><a:fillStyleLst><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:fillStyleLst></a:fmtScheme>
  </a:themeElements>
</a:theme>"#;

    const MASTER: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sldMaster xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main">
  <p:cSld><p:spTree/></p:cSld>
  <p:clrMap bg1="lt1" tx1="dk1" bg2="lt2" tx2="accent5" accent1="accent1"/>
  <p:txStyles>
    <p:titleStyle><a:lvl1pPr><a:buNone/></a:lvl1pPr></p:titleStyle>
    <p:bodyStyle>
      <a:lvl1pPr marL="228600"><a:buFont typeface="Arial"/><a:buChar char="&#8226;"/></a:lvl1pPr>
      <a:lvl2pPr marL="685800"><a:buAutoNum type="arabicPeriod"/></a:lvl2pPr>
      <a:lvl3pPr><a:buNone/></a:lvl3pPr>
    </p:bodyStyle>
  </p:txStyles>
</p:sldMaster>"#;

    #[test]
    fn test_theme_colors() {
        let theme = ThemeColors::parse(THEME).unwrap();
        assert_eq!(theme.get("dk1"), Some(Rgb::new(0, 0, 0)));
        assert_eq!(theme.get("accent1"), Some(Rgb::new(0x44, 0x72, 0xC4)));
        assert_eq!(theme.get("accent5"), Some(Rgb::new(0x5B, 0x9B, 0xD5)));
        assert_eq!(theme.get("phClr"), None);
    }

    #[test]
    fn test_master_body_style() {
        let master = MasterStyles::parse(MASTER).unwrap();
        assert_eq!(master.body_list_style(0), ListStyle::Bullet);
        assert_eq!(master.body_list_style(1), ListStyle::Numbered);
        assert_eq!(master.body_list_style(2), ListStyle::None);
        assert_eq!(master.body_list_style(7), ListStyle::None);
    }

    #[test]
    fn test_resolve_scheme_through_color_map() {
        let context = StyleContext::new(
            ThemeColors::parse(THEME).unwrap(),
            MasterStyles::parse(MASTER).unwrap(),
        );
        assert_eq!(context.resolve_scheme("tx1"), Some(Rgb::new(0, 0, 0)));
        assert_eq!(context.resolve_scheme("tx2"), Some(Rgb::new(0x5B, 0x9B, 0xD5)));
        assert_eq!(context.resolve_scheme("accent1"), Some(Rgb::new(0x44, 0x72, 0xC4)));
        assert_eq!(context.resolve_scheme("phClr"), None);
    }

    #[test]
    fn test_default_color_map() {
        let context = StyleContext::new(ThemeColors::parse(THEME).unwrap(), MasterStyles::default());
        assert_eq!(context.resolve_scheme("tx2"), Some(Rgb::new(0x44, 0x54, 0x6A)));
        assert_eq!(context.resolve_scheme("bg1"), Some(Rgb::new(0xFF, 0xFF, 0xFF)));
    }

    #[test]
    fn test_level_index() {
        assert_eq!(level_index(b"lvl1pPr"), Some(0));
        assert_eq!(level_index(b"lvl9pPr"), Some(8));
        assert_eq!(level_index(b"lvl0pPr"), None);
        assert_eq!(level_index(b"defPPr"), None);
    }
}
