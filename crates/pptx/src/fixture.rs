//! In-memory PPTX archives for tests.
//!
//! Builds the minimum set of parts the parser reads: presentation,
//! relationships, slides, one slide master and one theme.

use std::collections::BTreeSet;
use std::io::{Cursor, Write};
use zip::write::FileOptions;
use zip::ZipWriter;

const NAMESPACES: &str = r#"xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main""#;

const REL_SLIDE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide";
const REL_MASTER: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster";
const REL_THEME: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme";

const THEME: &str = r#"<a:theme xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" name="Office Theme"><a:themeElements><a:clrScheme name="Office"><a:dk1><a:sysClr val="windowText" lastClr="000000"/></a:dk1><a:lt1><a:sysClr val="window" lastClr="FFFFFF"/></a:lt1><a:dk2><a:srgbClr val="44546A"/></a:dk2><a:lt2><a:srgbClr val="E7E6E6"/></a:lt2><a:accent1><a:srgbClr val="4472C4"/></a:accent1><a:accent2><a:srgbClr val="ED7D31"/></a:accent2><a:accent5><a:srgbClr val="5B9BD5"/></a:accent5><a:accent6><a:srgbClr val="70AD47"/></a:accent6><a:hlink><a:srgbClr val="0563C1"/></a:hlink></a:clrScheme></a:themeElements></a:theme>"#;

/// Builder for a small PPTX archive.
#[derive(Debug, Default)]
pub struct PptxBuilder {
    slides: Vec<String>,
    order: Option<Vec<usize>>,
    slide_list: bool,
}

impl PptxBuilder {
    pub fn new() -> Self {
        Self {
            slides: Vec::new(),
            order: None,
            slide_list: true,
        }
    }

    /// Add a slide whose shape tree contains `shapes`.
    pub fn slide(mut self, shapes: impl Into<String>) -> Self {
        self.slides.push(shapes.into());
        self
    }

    /// Presentation order as indexes into the added slides. Indexes past
    /// the added slides produce a relationship to a missing part.
    pub fn with_order(mut self, order: Vec<usize>) -> Self {
        self.order = Some(order);
        self
    }

    /// Leave `p:sldIdLst` out of presentation.xml.
    pub fn without_slide_list(mut self) -> Self {
        self.slide_list = false;
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let order = self
            .order
            .clone()
            .unwrap_or_else(|| (0..self.slides.len()).collect());
        let related: BTreeSet<usize> = order.iter().copied().chain(0..self.slides.len()).collect();

        let mut files: Vec<(String, String)> = Vec::new();

        let slide_ids: String = if self.slide_list {
            let ids: String = order
                .iter()
                .enumerate()
                .map(|(pos, idx)| format!(r#"<p:sldId id="{}" r:id="rId{}"/>"#, 256 + pos, idx + 2))
                .collect();
            format!("<p:sldIdLst>{}</p:sldIdLst>", ids)
        } else {
            String::new()
        };
        files.push((
            "ppt/presentation.xml".into(),
            format!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><p:presentation {}><p:sldMasterIdLst><p:sldMasterId id="2147483648" r:id="rId1"/></p:sldMasterIdLst>{}<p:sldSz cx="12192000" cy="6858000"/></p:presentation>"#,
                NAMESPACES, slide_ids
            ),
        ));

        let mut rels = format!(
            r#"<Relationship Id="rId1" Type="{}" Target="slideMasters/slideMaster1.xml"/>"#,
            REL_MASTER
        );
        for idx in &related {
            rels.push_str(&format!(
                r#"<Relationship Id="rId{}" Type="{}" Target="slides/slide{}.xml"/>"#,
                idx + 2,
                REL_SLIDE,
                idx + 1
            ));
        }
        rels.push_str(&format!(
            r#"<Relationship Id="rId{}" Type="{}" Target="theme/theme1.xml"/>"#,
            related.iter().max().map_or(2, |last| last + 3),
            REL_THEME
        ));
        files.push(("ppt/_rels/presentation.xml.rels".into(), relationships(&rels)));

        for (idx, shapes) in self.slides.iter().enumerate() {
            files.push((
                format!("ppt/slides/slide{}.xml", idx + 1),
                format!(
                    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sld {}>
  <p:cSld>
    <p:spTree>
      <p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>
      <p:grpSpPr/>
      {}
    </p:spTree>
  </p:cSld>
</p:sld>"#,
                    NAMESPACES, shapes
                ),
            ));
        }

        files.push((
            "ppt/slideMasters/slideMaster1.xml".into(),
            format!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><p:sldMaster {}><p:cSld><p:spTree/></p:cSld><p:clrMap bg1="lt1" tx1="dk1" bg2="lt2" tx2="dk2" accent1="accent1" accent2="accent2" accent5="accent5" accent6="accent6" hlink="hlink" folHlink="folHlink"/><p:txStyles><p:titleStyle><a:lvl1pPr><a:buNone/></a:lvl1pPr></p:titleStyle><p:bodyStyle><a:lvl1pPr marL="228600" indent="-228600"><a:buFont typeface="Arial"/><a:buChar char="&#8226;"/></a:lvl1pPr><a:lvl2pPr marL="685800" indent="-228600"><a:buFont typeface="Arial"/><a:buChar char="&#8211;"/></a:lvl2pPr></p:bodyStyle></p:txStyles></p:sldMaster>"#,
                NAMESPACES
            ),
        ));
        files.push((
            "ppt/slideMasters/_rels/slideMaster1.xml.rels".into(),
            relationships(&format!(
                r#"<Relationship Id="rId1" Type="{}" Target="../theme/theme1.xml"/>"#,
                REL_THEME
            )),
        ));
        files.push(("ppt/theme/theme1.xml".into(), THEME.to_string()));

        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        for (name, content) in files {
            zip.start_file(name, FileOptions::default())
                .expect("start fixture part");
            zip.write_all(content.as_bytes()).expect("write fixture part");
        }
        zip.finish().expect("finish fixture archive").into_inner()
    }
}

fn relationships(body: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">{}</Relationships>"#,
        body
    )
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

fn sp(placeholder: &str, paragraphs: &[String]) -> String {
    format!(
        r#"<p:sp><p:nvSpPr><p:cNvPr id="2" name="Shape"/><p:cNvSpPr/><p:nvPr>{}</p:nvPr></p:nvSpPr><p:spPr/><p:txBody><a:bodyPr/><a:lstStyle/>{}</p:txBody></p:sp>"#,
        placeholder,
        paragraphs.concat()
    )
}

/// A plain text box.
pub fn text_box(paragraphs: &[String]) -> String {
    sp("", paragraphs)
}

/// A body placeholder, which inherits the master's bullets.
pub fn body_placeholder(paragraphs: &[String]) -> String {
    sp(r#"<p:ph idx="1"/>"#, paragraphs)
}

/// A title placeholder with one run.
pub fn title(text: &str) -> String {
    sp(r#"<p:ph type="title"/>"#, &[para(&[run(text)])])
}

/// A table with one text frame per cell.
pub fn table(rows: &[&[&str]]) -> String {
    let rows: String = rows
        .iter()
        .map(|cells| {
            let cells: String = cells
                .iter()
                .map(|text| {
                    format!(
                        r#"<a:tc><a:txBody><a:bodyPr/><a:lstStyle/>{}</a:txBody><a:tcPr/></a:tc>"#,
                        para(&[run(text)])
                    )
                })
                .collect();
            format!(r#"<a:tr h="370840">{}</a:tr>"#, cells)
        })
        .collect();
    format!(
        r#"<p:graphicFrame><p:nvGraphicFramePr><p:cNvPr id="4" name="Table"/><p:cNvGraphicFramePr/><p:nvPr/></p:nvGraphicFramePr><p:xfrm/><a:graphic><a:graphicData uri="http://schemas.openxmlformats.org/drawingml/2006/table"><a:tbl><a:tblGrid/>{}</a:tbl></a:graphicData></a:graphic></p:graphicFrame>"#,
        rows
    )
}

/// A paragraph of runs.
pub fn para(runs: &[String]) -> String {
    format!("<a:p>{}</a:p>", runs.concat())
}

/// An explicitly bulleted paragraph.
pub fn bullet(text: &str) -> String {
    format!(
        r#"<a:p><a:pPr marL="342900" indent="-342900"><a:buFont typeface="Arial"/><a:buChar char="&#8226;"/></a:pPr>{}</a:p>"#,
        run(text)
    )
}

/// An explicitly auto-numbered paragraph.
pub fn numbered(text: &str) -> String {
    format!(
        r#"<a:p><a:pPr marL="457200" indent="-457200"><a:buAutoNum type="arabicPeriod"/></a:pPr>{}</a:p>"#,
        run(text)
    )
}

/// An unformatted run.
pub fn run(text: &str) -> String {
    format!(
        r#"<a:r><a:rPr lang="en-US" dirty="0"/><a:t>{}</a:t></a:r>"#,
        escape(text)
    )
}

/// A bold blue run, the way vocabulary terms are styled.
pub fn marker(text: &str) -> String {
    styled_run(text, Some(true), Some(r#"<a:srgbClr val="0070C0"/>"#))
}

/// A run with an optional bold flag and an optional fill color element.
pub fn styled_run(text: &str, bold: Option<bool>, color: Option<&str>) -> String {
    let bold = match bold {
        Some(true) => r#" b="1""#,
        Some(false) => r#" b="0""#,
        None => "",
    };
    match color {
        Some(color) => format!(
            r#"<a:r><a:rPr lang="en-US"{} dirty="0"><a:solidFill>{}</a:solidFill></a:rPr><a:t>{}</a:t></a:r>"#,
            bold,
            color,
            escape(text)
        ),
        None => format!(r#"<a:r><a:rPr lang="en-US"{} dirty="0"/><a:t>{}</a:t></a:r>"#, bold, escape(text)),
    }
}
