//! PPTX file parser implementation.

use crate::theme::{attribute, bullet_style, level_index, MasterStyles, StyleContext, ThemeColors};
use docup_core::{
    DeckParser, Error, ListStyle, Paragraph, Presentation, PresentationFormat, Result, Rgb, Slide,
    TextRun, TextShape,
};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::io::{Cursor, Read, Seek};
use zip::ZipArchive;

const PRESENTATION_PATH: &str = "ppt/presentation.xml";
const PRESENTATION_RELS_PATH: &str = "ppt/_rels/presentation.xml.rels";
const DEFAULT_THEME_PATH: &str = "ppt/theme/theme1.xml";

/// Parser for PPTX (Office Open XML) files.
pub struct PptxParser;

impl PptxParser {
    /// Create a new PPTX parser.
    pub fn new() -> Self {
        Self
    }

    /// Parse a PPTX file from a reader.
    pub fn parse_reader<R: Read + Seek>(&self, reader: R, filename: &str) -> Result<Presentation> {
        let mut archive =
            ZipArchive::new(reader).map_err(|e| Error::ZipError(format!("Failed to open ZIP: {}", e)))?;

        let mut presentation = Presentation::new(filename, PresentationFormat::Pptx);

        let rels = self.read_relationships(&mut archive, PRESENTATION_RELS_PATH)?;
        let slide_order = self.get_slide_order(&mut archive, &rels)?;
        let context = self.load_styles(&mut archive, &rels);

        for (idx, slide_path) in slide_order.iter().enumerate() {
            let slide = self.parse_slide(&mut archive, slide_path, idx + 1, &context)?;
            presentation.add_slide(slide);
        }

        log::debug!("{}: {} slides", filename, presentation.slides.len());
        Ok(presentation)
    }

    /// Ordered slide paths: the `p:sldIdLst` of presentation.xml when
    /// present, otherwise the slide relationships sorted by number.
    fn get_slide_order<R: Read + Seek>(
        &self,
        archive: &mut ZipArchive<R>,
        rels: &[Relationship],
    ) -> Result<Vec<String>> {
        if let Ok(content) = self.read_file_from_archive(archive, PRESENTATION_PATH) {
            let ordered: Vec<String> = read_slide_ids(&content)?
                .iter()
                .filter_map(|id| rels.iter().find(|r| &r.id == id && r.is_slide()))
                .map(|r| resolve_target("ppt", &r.target))
                .collect();
            if !ordered.is_empty() {
                return Ok(ordered);
            }
        }

        log::debug!("No slide list in {}, ordering slides by number", PRESENTATION_PATH);
        let mut slides: Vec<(String, Option<usize>)> = rels
            .iter()
            .filter(|r| r.is_slide())
            .map(|r| {
                let order_num = extract_slide_number(&r.target).or_else(|| extract_slide_number(&r.id));
                (resolve_target("ppt", &r.target), order_num)
            })
            .collect();

        slides.sort_by(|a, b| match (a.1, b.1) {
            (Some(na), Some(nb)) => na.cmp(&nb),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => a.0.cmp(&b.0),
        });

        Ok(slides.into_iter().map(|(path, _)| path).collect())
    }

    /// Theme colors and master styles. Missing or broken parts fall back to
    /// defaults, which leave scheme colors unresolved.
    fn load_styles<R: Read + Seek>(&self, archive: &mut ZipArchive<R>, rels: &[Relationship]) -> StyleContext {
        let mut master = MasterStyles::default();
        let mut theme_path = None;

        if let Some(master_rel) = rels.iter().find(|r| r.has_type("slideMaster")) {
            let master_path = resolve_target("ppt", &master_rel.target);
            match self
                .read_file_from_archive(archive, &master_path)
                .and_then(|xml| MasterStyles::parse(&xml))
            {
                Ok(parsed) => master = parsed,
                Err(e) => log::warn!("Ignoring slide master {}: {}", master_path, e),
            }

            theme_path = self
                .read_relationships(archive, &rels_path_for(&master_path))
                .ok()
                .and_then(|master_rels| {
                    master_rels
                        .iter()
                        .find(|r| r.has_type("theme"))
                        .map(|r| resolve_target(parent_dir(&master_path), &r.target))
                });
        }

        let theme_path = theme_path
            .or_else(|| {
                rels.iter()
                    .find(|r| r.has_type("theme"))
                    .map(|r| resolve_target("ppt", &r.target))
            })
            .unwrap_or_else(|| DEFAULT_THEME_PATH.to_string());

        let theme = match self
            .read_file_from_archive(archive, &theme_path)
            .and_then(|xml| ThemeColors::parse(&xml))
        {
            Ok(theme) => theme,
            Err(e) => {
                log::debug!("No theme colors from {}: {}", theme_path, e);
                ThemeColors::default()
            }
        };

        StyleContext::new(theme, master)
    }

    /// Parse a single slide from the archive.
    fn parse_slide<R: Read + Seek>(
        &self,
        archive: &mut ZipArchive<R>,
        slide_path: &str,
        slide_number: usize,
        context: &StyleContext,
    ) -> Result<Slide> {
        let content = self.read_file_from_archive(archive, slide_path)?;
        let mut slide = Slide::new(slide_number);

        let shapes = SlideReader::new(context)
            .read(&content)
            .map_err(|e| Error::PptxParseError(format!("{}: {}", slide_path, e)))?;
        for shape in shapes {
            slide.add_shape(shape);
        }

        Ok(slide)
    }

    /// Read and parse a relationships part.
    fn read_relationships<R: Read + Seek>(
        &self,
        archive: &mut ZipArchive<R>,
        path: &str,
    ) -> Result<Vec<Relationship>> {
        let content = self.read_file_from_archive(archive, path)?;
        let mut rels = Vec::new();

        let mut reader = Reader::from_str(&content);
        reader.trim_text(true);

        loop {
            match reader.read_event() {
                Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                    if local_name(e.name().as_ref()) == b"Relationship" =>
                {
                    let mut rel = Relationship::default();
                    for attr in e.attributes().flatten() {
                        let value = String::from_utf8_lossy(&attr.value).to_string();
                        match attr.key.as_ref() {
                            b"Id" => rel.id = value,
                            b"Type" => rel.rel_type = value,
                            b"Target" => rel.target = value,
                            _ => {}
                        }
                    }
                    rels.push(rel);
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(Error::XmlError(format!(
                        "Error parsing relationships in '{}': {}",
                        path, e
                    )));
                }
                _ => {}
            }
        }

        Ok(rels)
    }

    /// Read a file from the ZIP archive.
    fn read_file_from_archive<R: Read + Seek>(
        &self,
        archive: &mut ZipArchive<R>,
        path: &str,
    ) -> Result<String> {
        let mut file = archive
            .by_name(path)
            .map_err(|e| Error::ZipError(format!("File not found in archive '{}': {}", path, e)))?;

        let mut content = String::new();
        file.read_to_string(&mut content)
            .map_err(|e| Error::ZipError(format!("Failed to read '{}': {}", path, e)))?;

        Ok(content)
    }
}

impl Default for PptxParser {
    fn default() -> Self {
        Self::new()
    }
}

impl DeckParser for PptxParser {
    fn parse(&self, data: &[u8], filename: &str) -> Result<Presentation> {
        self.parse_reader(Cursor::new(data), filename)
    }
}

/// One entry of a `.rels` part.
#[derive(Debug, Default, Clone)]
struct Relationship {
    id: String,
    rel_type: String,
    target: String,
}

impl Relationship {
    /// Relationship types end in `/slide`, `/slideMaster`, `/theme`, ...
    fn has_type(&self, kind: &str) -> bool {
        self.rel_type.rsplit('/').next() == Some(kind)
    }

    fn is_slide(&self) -> bool {
        self.has_type("slide")
    }
}

/// `r:id` values of `p:sldIdLst`, in presentation order.
fn read_slide_ids(xml: &str) -> Result<Vec<String>> {
    let mut ids = Vec::new();
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    loop {
        match reader.read_event() {
            Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e)) if local_name(e.name().as_ref()) == b"sldId" => {
                let rel_id = e
                    .attributes()
                    .flatten()
                    .find(|attr| attr.key.prefix().is_some() && local_name(attr.key.as_ref()) == b"id");
                if let Some(attr) = rel_id {
                    ids.push(String::from_utf8_lossy(&attr.value).to_string());
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(Error::XmlError(format!("Error parsing presentation: {}", e)));
            }
            _ => {}
        }
    }

    Ok(ids)
}

/// A color reference before theme resolution.
#[derive(Debug, Clone)]
enum ColorRef {
    Rgb(Rgb),
    Scheme(String),
}

#[derive(Debug, Default)]
struct RunState {
    text: String,
    bold: Option<bool>,
    color: Option<ColorRef>,
}

#[derive(Debug, Default)]
struct ParagraphState {
    runs: Vec<TextRun>,
    explicit_list: Option<ListStyle>,
    level: u8,
    default_color: Option<ColorRef>,
}

#[derive(Debug, Default)]
struct BodyState {
    paragraphs: Vec<Paragraph>,
    placeholder_body: bool,
    /// Shape-level `a:lstStyle` bullets per level.
    levels: [Option<ListStyle>; 9],
}

/// Streams one slide part into text shapes.
///
/// Every `txBody` (shape, placeholder or table cell) becomes one
/// [`TextShape`]. Element context is tracked with a stack of local names so
/// the same element name can be told apart by its parent.
struct SlideReader<'c> {
    context: &'c StyleContext,
    stack: Vec<Vec<u8>>,
    shapes: Vec<TextShape>,
    placeholder_body: bool,
    body: Option<BodyState>,
    paragraph: Option<ParagraphState>,
    run: Option<RunState>,
}

impl<'c> SlideReader<'c> {
    fn new(context: &'c StyleContext) -> Self {
        Self {
            context,
            stack: Vec::new(),
            shapes: Vec::new(),
            placeholder_body: false,
            body: None,
            paragraph: None,
            run: None,
        }
    }

    fn read(mut self, xml: &str) -> std::result::Result<Vec<TextShape>, quick_xml::Error> {
        let mut reader = Reader::from_str(xml);
        // Spaces inside runs are significant.
        reader.trim_text(false);

        loop {
            match reader.read_event()? {
                Event::Start(ref e) => {
                    let name = e.name();
                    let local = local_name(name.as_ref()).to_vec();
                    self.open(&local, e);
                    self.stack.push(local);
                }
                Event::Empty(ref e) => {
                    let name = e.name();
                    let local = local_name(name.as_ref());
                    self.open(local, e);
                    self.close(local);
                }
                Event::End(ref e) => {
                    let name = e.name();
                    self.stack.pop();
                    self.close(local_name(name.as_ref()));
                }
                Event::Text(ref e) => {
                    let text = e.unescape()?;
                    self.text(&text);
                }
                Event::Eof => break,
                _ => {}
            }
        }

        Ok(self.shapes)
    }

    /// The `n`th enclosing element (0 is the direct parent).
    fn ancestor(&self, n: usize) -> &[u8] {
        self.stack.iter().rev().nth(n).map(Vec::as_slice).unwrap_or(b"")
    }

    fn open(&mut self, local: &[u8], e: &BytesStart) {
        let parent = self.ancestor(0).to_vec();
        match local {
            b"sp" | b"graphicFrame" => self.placeholder_body = false,
            b"ph" => {
                self.placeholder_body = matches!(attribute(e, b"type").as_deref(), None | Some("body") | Some("obj"));
            }
            b"txBody" => {
                self.body = Some(BodyState {
                    placeholder_body: self.placeholder_body,
                    ..BodyState::default()
                });
            }
            b"p" if parent == b"txBody" && self.body.is_some() => {
                self.paragraph = Some(ParagraphState::default());
            }
            b"pPr" if parent == b"p" => {
                if let Some(paragraph) = &mut self.paragraph {
                    paragraph.level = attribute(e, b"lvl")
                        .and_then(|v| v.parse::<u8>().ok())
                        .unwrap_or(0)
                        .min(8);
                }
            }
            b"r" | b"fld" if parent == b"p" => self.run = Some(RunState::default()),
            b"br" if parent == b"p" => {
                if let Some(paragraph) = &mut self.paragraph {
                    paragraph.runs.push(TextRun::plain("\n"));
                }
            }
            b"rPr" if matches!(parent.as_slice(), b"r" | b"fld") => {
                if let Some(run) = &mut self.run {
                    run.bold = attribute(e, b"b").map(|v| v == "1" || v == "true");
                }
            }
            b"srgbClr" | b"schemeClr" if parent == b"solidFill" => self.apply_color(local, e),
            _ => {
                if let Some(style) = bullet_style(local) {
                    self.apply_bullet(style);
                }
            }
        }
    }

    fn apply_color(&mut self, local: &[u8], e: &BytesStart) {
        let value = attribute(e, b"val");
        let color = match local {
            b"srgbClr" => value.and_then(|v| Rgb::from_hex(&v)).map(ColorRef::Rgb),
            _ => value.map(ColorRef::Scheme),
        };

        match self.ancestor(1) {
            b"rPr" => {
                if let Some(run) = &mut self.run {
                    run.color = color;
                }
            }
            b"defRPr" if self.ancestor(2) == b"pPr" => {
                if let Some(paragraph) = &mut self.paragraph {
                    paragraph.default_color = color;
                }
            }
            _ => {}
        }
    }

    fn apply_bullet(&mut self, style: ListStyle) {
        if self.ancestor(0) == b"pPr" {
            if let Some(paragraph) = &mut self.paragraph {
                paragraph.explicit_list = Some(style);
            }
        } else if self.ancestor(1) == b"lstStyle" {
            if let (Some(level), Some(body)) = (level_index(self.ancestor(0)), &mut self.body) {
                body.levels[level] = Some(style);
            }
        }
    }

    fn text(&mut self, text: &str) {
        if self.ancestor(0) == b"t" && matches!(self.ancestor(1), b"r" | b"fld") {
            if let Some(run) = &mut self.run {
                run.text.push_str(text);
            }
        }
    }

    fn close(&mut self, local: &[u8]) {
        match local {
            b"r" | b"fld" => {
                let (Some(run), Some(paragraph)) = (self.run.take(), &mut self.paragraph) else {
                    return;
                };
                let color = run
                    .color
                    .or_else(|| paragraph.default_color.clone())
                    .and_then(|c| match c {
                        ColorRef::Rgb(rgb) => Some(rgb),
                        ColorRef::Scheme(name) => self.context.resolve_scheme(&name),
                    });
                paragraph.runs.push(TextRun::styled(run.text, run.bold, color));
            }
            b"p" => {
                let (Some(paragraph), Some(body)) = (self.paragraph.take(), &mut self.body) else {
                    return;
                };
                let level = paragraph.level;
                let list_style = paragraph
                    .explicit_list
                    .or(body.levels[usize::from(level)])
                    .unwrap_or_else(|| {
                        if body.placeholder_body {
                            self.context.master.body_list_style(level)
                        } else {
                            ListStyle::None
                        }
                    });
                body.paragraphs.push(Paragraph {
                    runs: paragraph.runs,
                    list_style,
                    level,
                });
            }
            b"txBody" => {
                if let Some(body) = self.body.take() {
                    if body.paragraphs.iter().any(|p| !p.is_blank()) {
                        self.shapes.push(TextShape::new(body.paragraphs));
                    }
                }
            }
            _ => {}
        }
    }
}

/// Extract the local name from a potentially namespaced XML element name.
pub(crate) fn local_name(name: &[u8]) -> &[u8] {
    if let Some(pos) = name.iter().position(|&b| b == b':') {
        &name[pos + 1..]
    } else {
        name
    }
}

/// Extract a slide number from a string like "rId2" or "slide3.xml".
fn extract_slide_number(s: &str) -> Option<usize> {
    let s = s.trim_end_matches(".xml").trim_end_matches(".rels");

    let digits: String = s.chars().rev().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    let digits: String = digits.chars().rev().collect();
    digits.parse().ok()
}

/// Resolve a relationship target against the directory of its source part.
fn resolve_target(base_dir: &str, target: &str) -> String {
    if let Some(absolute) = target.strip_prefix('/') {
        return absolute.to_string();
    }

    let mut parts: Vec<&str> = base_dir.split('/').filter(|s| !s.is_empty()).collect();
    for segment in target.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                parts.pop();
            }
            other => parts.push(other),
        }
    }
    parts.join("/")
}

fn parent_dir(path: &str) -> &str {
    path.rsplit_once('/').map(|(dir, _)| dir).unwrap_or("")
}

/// `ppt/slideMasters/slideMaster1.xml` → `ppt/slideMasters/_rels/slideMaster1.xml.rels`.
fn rels_path_for(part: &str) -> String {
    match part.rsplit_once('/') {
        Some((dir, file)) => format!("{}/_rels/{}.rels", dir, file),
        None => format!("_rels/{}.rels", part),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::{
        body_placeholder, bullet, marker, numbered, para, run, styled_run, table, text_box, title,
        PptxBuilder,
    };

    fn parse(bytes: Vec<u8>) -> Presentation {
        PptxParser::new().parse(&bytes, "MATS_Session_1.pptx").unwrap()
    }

    #[test]
    fn test_extract_slide_number() {
        assert_eq!(extract_slide_number("rId1"), Some(1));
        assert_eq!(extract_slide_number("rId12"), Some(12));
        assert_eq!(extract_slide_number("slide1.xml"), Some(1));
        assert_eq!(extract_slide_number("slide123.xml"), Some(123));
        assert_eq!(extract_slide_number("nodigits"), None);
    }

    #[test]
    fn test_local_name() {
        assert_eq!(local_name(b"p:sp"), b"sp");
        assert_eq!(local_name(b"a:t"), b"t");
        assert_eq!(local_name(b"sp"), b"sp");
    }

    #[test]
    fn test_resolve_target() {
        assert_eq!(resolve_target("ppt", "slides/slide1.xml"), "ppt/slides/slide1.xml");
        assert_eq!(resolve_target("ppt/slideMasters", "../theme/theme1.xml"), "ppt/theme/theme1.xml");
        assert_eq!(resolve_target("ppt", "/ppt/slides/slide2.xml"), "ppt/slides/slide2.xml");
        assert_eq!(
            rels_path_for("ppt/slideMasters/slideMaster1.xml"),
            "ppt/slideMasters/_rels/slideMaster1.xml.rels"
        );
    }

    #[test]
    fn test_runs_keep_formatting_and_spaces() {
        let deck = PptxBuilder::new()
            .slide(text_box(&[para(&[marker("Atom"), run(": the smallest unit of matter")])]))
            .build();
        let presentation = parse(deck);

        assert_eq!(presentation.slides.len(), 1);
        let paragraph = &presentation.slides[0].shapes[0].paragraphs[0];
        assert_eq!(paragraph.text(), "Atom: the smallest unit of matter");
        assert_eq!(paragraph.runs[0].bold, Some(true));
        assert_eq!(paragraph.runs[0].color, Some(Rgb::new(0x00, 0x70, 0xC0)));
        assert_eq!(paragraph.runs[1].bold, None);
        assert_eq!(paragraph.runs[1].color, None);
    }

    #[test]
    fn test_scheme_color_resolved_from_theme() {
        let deck = PptxBuilder::new()
            .slide(text_box(&[para(&[
                styled_run("Density", Some(true), Some(r#"<a:schemeClr val="accent1"/>"#)),
                styled_run(" plain", Some(false), Some(r#"<a:schemeClr val="tx1"/>"#)),
                styled_run(" odd", None, Some(r#"<a:schemeClr val="phClr"/>"#)),
            ])]))
            .build();
        let runs = &parse(deck).slides[0].shapes[0].paragraphs[0].runs;

        assert_eq!(runs[0].color, Some(Rgb::new(0x44, 0x72, 0xC4)));
        assert_eq!(runs[1].color, Some(Rgb::new(0, 0, 0)));
        assert_eq!(runs[1].bold, Some(false));
        assert_eq!(runs[2].color, None);
    }

    #[test]
    fn test_list_styles_explicit_and_inherited() {
        let deck = PptxBuilder::new()
            .slide(format!(
                "{}{}{}",
                title("Goals"),
                body_placeholder(&[
                    para(&[run("Inherited bullet")]),
                    numbered("Explicit number"),
                    "<a:p><a:pPr><a:buNone/></a:pPr><a:r><a:t>No bullet</a:t></a:r></a:p>".to_string(),
                ]),
                text_box(&[para(&[run("Text box line")]), bullet("Text box bullet")]),
            ))
            .build();
        let slide = &parse(deck).slides[0];

        assert_eq!(slide.shapes.len(), 3);
        assert_eq!(slide.shapes[0].paragraphs[0].list_style, ListStyle::None);
        let body = &slide.shapes[1].paragraphs;
        assert_eq!(body[0].list_style, ListStyle::Bullet);
        assert_eq!(body[1].list_style, ListStyle::Numbered);
        assert_eq!(body[2].list_style, ListStyle::None);
        let text_box = &slide.shapes[2].paragraphs;
        assert_eq!(text_box[0].list_style, ListStyle::None);
        assert_eq!(text_box[1].list_style, ListStyle::Bullet);
    }

    #[test]
    fn test_slide_order_follows_presentation_list() {
        let deck = PptxBuilder::new()
            .slide(text_box(&[para(&[run("first file")])]))
            .slide(text_box(&[para(&[run("second file")])]))
            .slide(text_box(&[para(&[run("third file")])]))
            .with_order(vec![2, 0, 1])
            .build();
        let presentation = parse(deck);

        let texts: Vec<String> = presentation.slides.iter().map(|s| s.shapes[0].text()).collect();
        assert_eq!(texts, vec!["third file", "first file", "second file"]);
        let numbers: Vec<usize> = presentation.slides.iter().map(|s| s.number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
    }

    #[test]
    fn test_slide_order_without_presentation_list() {
        let mut builder = PptxBuilder::new();
        for n in 1..=11 {
            builder = builder.slide(text_box(&[para(&[run(&format!("slide {}", n))])]));
        }
        let presentation = parse(builder.without_slide_list().build());

        assert_eq!(presentation.slides.len(), 11);
        assert_eq!(presentation.slides[1].shapes[0].text(), "slide 2");
        assert_eq!(presentation.slides[10].shapes[0].text(), "slide 11");
    }

    #[test]
    fn test_table_cells_become_shapes() {
        let deck = PptxBuilder::new()
            .slide(table(&[&["Beaker", "Graduated cylinder"], &["Goggles", ""]]))
            .build();
        let slide = &parse(deck).slides[0];

        let texts: Vec<String> = slide.shapes.iter().map(|s| s.text()).collect();
        assert_eq!(texts, vec!["Beaker", "Graduated cylinder", "Goggles"]);
    }

    #[test]
    fn test_entities_and_line_breaks() {
        let deck = PptxBuilder::new()
            .slide(text_box(&[
                "<a:p><a:r><a:t>Salt &amp; pepper</a:t></a:r><a:br/><a:r><a:t>next</a:t></a:r></a:p>"
                    .to_string(),
            ]))
            .build();
        let paragraph = &parse(deck).slides[0].shapes[0].paragraphs[0];
        assert_eq!(paragraph.text(), "Salt & pepper\nnext");
    }

    #[test]
    fn test_empty_shapes_skipped() {
        let deck = PptxBuilder::new()
            .slide(format!("{}{}", text_box(&[para(&[run("   ")])]), text_box(&[para(&[run("kept")])])))
            .build();
        let slide = &parse(deck).slides[0];
        assert_eq!(slide.shapes.len(), 1);
        assert_eq!(slide.shapes[0].text(), "kept");
    }

    #[test]
    fn test_not_a_zip() {
        let err = PptxParser::new().parse(b"PK\x03\x04 broken", "broken.pptx").unwrap_err();
        assert!(matches!(err, Error::ZipError(_)));
    }

    #[test]
    fn test_missing_slide_part() {
        let deck = PptxBuilder::new()
            .slide(text_box(&[para(&[run("x")])]))
            .with_order(vec![0, 5])
            .build();
        assert!(PptxParser::new().parse(&deck, "MATS_Session_1.pptx").is_err());
    }
}
